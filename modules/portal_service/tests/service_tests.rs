//! Integration tests for the portal domain service

use portal_service::config::{AccessCodes, Config};
use portal_service::contract::*;
use portal_service::domain::SessionResolver;

mod common;
use common::{new_event, new_resource, session, Harness};

fn resolver() -> SessionResolver {
    SessionResolver::new(&Config {
        access_codes: AccessCodes {
            kenya: Some("kenya-code".into()),
            uganda: Some("uganda-code".into()),
            tanzania: Some("tanzania-code".into()),
            global: Some("global-code".into()),
        },
        session_secret: "integration-secret".into(),
        ..Config::default()
    })
}

/// Login and resolve the issued credential the way a request would
fn login(resolver: &SessionResolver, code: &str) -> SessionContext {
    let grant = resolver.login(code).unwrap();
    resolver.current_session(Some(&grant.token)).into()
}

// ===== Resources =====

#[tokio::test]
async fn created_resource_belongs_to_session_tenant() {
    let h = Harness::new();

    for tenant in TenantScope::ALL {
        let created = h
            .service
            .create_resource(&session(tenant), new_resource("Field Notes"))
            .await
            .unwrap();
        assert_eq!(created.tenant, tenant);
    }
    assert_eq!(h.store.resource_count(), 4);
}

#[tokio::test]
async fn create_resource_normalises_payload() {
    let h = Harness::new();
    let mut payload = new_resource("  Solar Policy  ");
    payload.description = Some("   ".into());
    payload.category = Category::Policy;

    let created = h
        .service
        .create_resource(&session(TenantScope::Uganda), payload)
        .await
        .unwrap();

    assert_eq!(created.title, "Solar Policy");
    assert_eq!(created.description, None);
    assert_eq!(created.category, Category::Policy);
}

#[tokio::test]
async fn oversized_pdf_is_rejected_without_writing() {
    let h = Harness::new();
    let mut payload = new_resource("Huge Manual");
    payload.file_size = Some("17.00 MB".into());

    let err = h
        .service
        .create_resource(&session(TenantScope::Kenya), payload)
        .await
        .unwrap_err();

    assert!(matches!(err, PortalError::Validation { .. }));
    assert_eq!(h.store.resource_count(), 0);
    assert!(h.invalidator.paths().is_empty());
}

#[tokio::test]
async fn list_filters_by_tenant_newest_first() {
    let h = Harness::new();
    let kenya = session(TenantScope::Kenya);
    let uganda = session(TenantScope::Uganda);

    h.service.create_resource(&kenya, new_resource("K1")).await.unwrap();
    h.service.create_resource(&uganda, new_resource("U1")).await.unwrap();
    h.service.create_resource(&kenya, new_resource("K2")).await.unwrap();

    let only_kenya = h
        .service
        .list_resources(TenantFilter::Only(TenantScope::Kenya))
        .await
        .unwrap();
    let titles: Vec<_> = only_kenya.iter().map(|r| r.title.as_str()).collect();
    assert_eq!(titles, vec!["K2", "K1"]);
    assert!(only_kenya.iter().all(|r| r.tenant == TenantScope::Kenya));

    let all = h.service.list_resources(TenantFilter::All).await.unwrap();
    assert_eq!(all.len(), 3);
    assert!(all.windows(2).all(|w| w[0].created_at >= w[1].created_at));

    let tanzania = h
        .service
        .list_resources(TenantFilter::Only(TenantScope::Tanzania))
        .await
        .unwrap();
    assert!(tanzania.is_empty());
}

#[tokio::test]
async fn update_resource_applies_patch_and_invalidates() {
    let h = Harness::new();
    let ctx = session(TenantScope::Tanzania);
    let created = h.service.create_resource(&ctx, new_resource("Draft")).await.unwrap();

    let updated = h
        .service
        .update_resource(
            &ctx,
            created.id,
            ResourcePatch {
                title: Some("Final".into()),
                description: Some(String::new()),
                category: Some(Category::CaseStudy),
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.title, "Final");
    assert_eq!(updated.description, None);
    assert_eq!(updated.category, Category::CaseStudy);
    assert_eq!(updated.tenant, TenantScope::Tanzania);
    assert!(updated.updated_at >= created.updated_at);
    assert_eq!(
        h.invalidator.paths(),
        vec![
            "/knowledge-hub",
            "/admin/dashboard/resources",
            "/knowledge-hub",
            "/admin/dashboard/resources"
        ]
    );
}

#[tokio::test]
async fn update_rejects_blank_title() {
    let h = Harness::new();
    let ctx = session(TenantScope::Kenya);
    let created = h.service.create_resource(&ctx, new_resource("Keep")).await.unwrap();

    let err = h
        .service
        .update_resource(
            &ctx,
            created.id,
            ResourcePatch {
                title: Some("  ".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();

    assert_eq!(err, PortalError::validation("title is required"));
}

#[tokio::test]
async fn unknown_ids_report_not_found() {
    let h = Harness::new();
    let ctx = session(TenantScope::Global);
    let missing = uuid::Uuid::new_v4();

    let err = h.service.delete_resource(&ctx, missing).await.unwrap_err();
    assert!(matches!(err, PortalError::NotFound { .. }));

    let err = h
        .service
        .update_resource(&ctx, missing, ResourcePatch::default())
        .await
        .unwrap_err();
    assert!(matches!(err, PortalError::NotFound { .. }));

    let err = h.service.delete_event(&ctx, missing).await.unwrap_err();
    assert!(matches!(err, PortalError::NotFound { .. }));

    let err = h.service.delete_image(&ctx, missing).await.unwrap_err();
    assert!(matches!(err, PortalError::NotFound { .. }));

    assert!(h.invalidator.paths().is_empty());
}

#[tokio::test]
async fn store_failure_surfaces_as_store_error() {
    let h = Harness::new();
    h.store.set_write_failure(true);

    let err = h
        .service
        .create_resource(&session(TenantScope::Kenya), new_resource("Lost"))
        .await
        .unwrap_err();

    assert!(matches!(err, PortalError::Store { .. }));
    assert!(h.invalidator.paths().is_empty());
}

// ===== Gallery =====

#[tokio::test]
async fn event_without_images_is_rejected_and_persists_nothing() {
    let h = Harness::new();

    let err = h
        .service
        .create_event(&session(TenantScope::Kenya), new_event("Empty", &[]))
        .await
        .unwrap_err();

    assert_eq!(err, PortalError::validation("at least one image required"));
    assert_eq!(h.store.event_count(), 0);
    assert_eq!(h.store.image_count(), 0);
}

#[tokio::test]
async fn deleting_event_cascades_only_to_its_images() {
    let h = Harness::new();
    let ctx = session(TenantScope::Uganda);

    let doomed = h
        .service
        .create_event(&ctx, new_event("Launch", &["a.jpg", "b.jpg"]))
        .await
        .unwrap();
    let kept = h
        .service
        .create_event(&ctx, new_event("Workshop", &["c.jpg"]))
        .await
        .unwrap();
    let standalone = h
        .service
        .create_image(
            &ctx,
            NewGalleryImage {
                title: None,
                image_url: "d.jpg".into(),
            },
        )
        .await
        .unwrap();
    assert_eq!(h.store.image_count(), 4);

    h.service.delete_event(&ctx, doomed.event.id).await.unwrap();

    let images = h.service.list_images(TenantFilter::All).await.unwrap();
    let ids: Vec<_> = images.iter().map(|i| i.id).collect();
    assert_eq!(images.len(), 2);
    assert!(ids.contains(&kept.images[0].id));
    assert!(ids.contains(&standalone.id));

    let events = h.service.list_events(TenantFilter::All).await.unwrap();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].event.id, kept.event.id);
}

#[tokio::test]
async fn update_event_keeps_cover_and_images() {
    let h = Harness::new();
    let ctx = session(TenantScope::Kenya);
    let created = h
        .service
        .create_event(&ctx, new_event("Old", &["cover.jpg", "second.jpg"]))
        .await
        .unwrap();

    let updated = h
        .service
        .update_event(
            &ctx,
            created.event.id,
            GalleryEventPatch {
                title: Some("New".into()),
                description: Some("Site visit".into()),
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.event.title, "New");
    assert_eq!(updated.event.description.as_deref(), Some("Site visit"));
    assert_eq!(updated.event.cover_image, "cover.jpg");
    assert_eq!(updated.images.len(), 2);
}

#[tokio::test]
async fn gallery_writes_invalidate_gallery_listings() {
    let h = Harness::new();
    h.service
        .create_event(&session(TenantScope::Global), new_event("Expo", &["x.jpg"]))
        .await
        .unwrap();

    assert_eq!(h.invalidator.paths(), vec!["/gallery", "/admin/dashboard/gallery"]);
}

// ===== Authorization =====

#[tokio::test]
async fn anonymous_writes_are_unauthorized_and_mutate_nothing() {
    let h = Harness::new();
    let owner = session(TenantScope::Kenya);
    let resource = h.service.create_resource(&owner, new_resource("Owned")).await.unwrap();
    let event = h
        .service
        .create_event(&owner, new_event("Owned", &["o.jpg"]))
        .await
        .unwrap();
    let paths_before = h.invalidator.paths().len();

    let anon = SessionContext::anonymous();
    let results = vec![
        h.service.create_resource(&anon, new_resource("Nope")).await.err(),
        h.service
            .update_resource(&anon, resource.id, ResourcePatch::default())
            .await
            .err(),
        h.service.delete_resource(&anon, resource.id).await.err(),
        h.service.create_event(&anon, new_event("Nope", &["n.jpg"])).await.err(),
        h.service
            .update_event(&anon, event.event.id, GalleryEventPatch::default())
            .await
            .err(),
        h.service.delete_event(&anon, event.event.id).await.err(),
        h.service
            .create_image(
                &anon,
                NewGalleryImage {
                    title: None,
                    image_url: "n.jpg".into(),
                },
            )
            .await
            .err(),
        h.service.delete_image(&anon, event.images[0].id).await.err(),
        h.service.get_statistics(&anon).await.err(),
    ];

    for result in results {
        assert_eq!(result, Some(PortalError::Unauthorized));
    }
    assert_eq!(h.store.resource_count(), 1);
    assert_eq!(h.store.event_count(), 1);
    assert_eq!(h.store.image_count(), 1);
    assert_eq!(h.invalidator.paths().len(), paths_before);
}

#[tokio::test]
async fn listings_need_no_session() {
    let h = Harness::new();
    h.service
        .create_resource(&session(TenantScope::Uganda), new_resource("Public"))
        .await
        .unwrap();

    let listed = h
        .service
        .list_resources(TenantFilter::parse(Some("Uganda")).unwrap())
        .await
        .unwrap();
    assert_eq!(listed.len(), 1);
}

// ===== End-to-end =====

#[tokio::test]
async fn regional_admin_creates_lists_and_deletes_resource() {
    let h = Harness::new();
    let resolver = resolver();
    let ctx = login(&resolver, "kenya-code");

    let created = h
        .service
        .create_resource(
            &ctx,
            NewResource {
                title: "Annual Report 2024".into(),
                category: Category::Report,
                file_url: "https://files.example/annual-2024.pdf".into(),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    let filter = TenantFilter::parse(Some("Kenya")).unwrap();
    let listed = h.service.list_resources(filter).await.unwrap();
    let found = listed.iter().find(|r| r.id == created.id).unwrap();
    assert_eq!(found.title, "Annual Report 2024");
    assert_eq!(found.tenant, TenantScope::Kenya);

    h.service.delete_resource(&ctx, created.id).await.unwrap();
    let listed = h.service.list_resources(filter).await.unwrap();
    assert!(listed.iter().all(|r| r.id != created.id));
}

#[tokio::test]
async fn global_admin_creates_event_with_cover_from_first_image() {
    let h = Harness::new();
    let resolver = resolver();
    let ctx = login(&resolver, "global-code");

    let created = h
        .service
        .create_event(&ctx, new_event("Regional Summit", &["u1", "u2", "u3"]))
        .await
        .unwrap();
    assert_eq!(created.event.cover_image, "u1");
    assert_eq!(created.event.tenant, TenantScope::Global);

    let events = h.service.list_events(TenantFilter::All).await.unwrap();
    let listed = events
        .iter()
        .find(|e| e.event.id == created.event.id)
        .unwrap();
    assert_eq!(listed.images.len(), 3);
    assert!(listed.images.iter().all(|i| i.event_id == Some(created.event.id)));
}

#[tokio::test]
async fn wrong_code_yields_no_session() {
    let resolver = resolver();
    assert_eq!(resolver.login("guess").unwrap_err(), AuthError::InvalidCode);

    let ctx: SessionContext = resolver.current_session(Some("forged.token.value")).into();
    assert_eq!(ctx.require().unwrap_err(), PortalError::Unauthorized);
}

#[tokio::test]
async fn native_client_delegates_to_service() {
    let h = Harness::new();
    let module = portal_service::PortalServiceModule::default();
    module.init_with_service(h.service.clone());
    let client = module.client().unwrap();

    let created = client
        .create_resource(&session(TenantScope::Tanzania), new_resource("Via client"))
        .await
        .unwrap();
    assert_eq!(created.tenant, TenantScope::Tanzania);

    let listed = client.list_resources(TenantFilter::All).await.unwrap();
    assert_eq!(listed.len(), 1);

    let err = client
        .delete_resource(&SessionContext::anonymous(), created.id)
        .await
        .unwrap_err();
    assert_eq!(err, PortalError::Unauthorized);
}
