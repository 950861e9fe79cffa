//! Shared in-memory repositories and fixtures for integration tests

#![allow(dead_code)]

use async_trait::async_trait;
use chrono::{DateTime, Duration, TimeZone, Utc};
use parking_lot::{Mutex, RwLock};
use portal_service::contract::*;
use portal_service::domain::repository::{
    GalleryRepository, ResourceRepository, StatisticsRepository,
};
use portal_service::domain::statistics::bucket_by_month;
use portal_service::domain::{Service, ViewInvalidator};
use std::sync::atomic::{AtomicBool, AtomicI64, Ordering};
use std::sync::Arc;
use uuid::Uuid;

#[derive(Default)]
struct State {
    resources: Vec<Resource>,
    events: Vec<GalleryEvent>,
    images: Vec<GalleryImage>,
}

/// In-memory store backing all three repository traits
///
/// Creation timestamps advance one second per insert so newest-first
/// ordering is deterministic.
pub struct MemoryStore {
    state: RwLock<State>,
    clock: AtomicI64,
    fail_ping: AtomicBool,
    fail_writes: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            state: RwLock::new(State::default()),
            clock: AtomicI64::new(0),
            fail_ping: AtomicBool::new(false),
            fail_writes: AtomicBool::new(false),
        })
    }

    fn tick(&self) -> DateTime<Utc> {
        let offset = self.clock.fetch_add(1, Ordering::SeqCst);
        Utc::now() + Duration::seconds(offset)
    }

    /// Make the connectivity probe fail
    pub fn set_ping_failure(&self, fail: bool) {
        self.fail_ping.store(fail, Ordering::SeqCst);
    }

    /// Make every insert fail
    pub fn set_write_failure(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    fn check_writes(&self) -> anyhow::Result<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            anyhow::bail!("connection reset by peer");
        }
        Ok(())
    }

    /// Insert a resource with an explicit creation time
    pub fn seed_resource(
        &self,
        tenant: TenantScope,
        category: Category,
        created_at: DateTime<Utc>,
    ) -> Resource {
        let resource = Resource {
            id: Uuid::new_v4(),
            title: format!("{} {}", tenant, category),
            description: None,
            category,
            tenant,
            file_url: "https://files.example/doc.pdf".into(),
            file_size: Some("1.00 MB".into()),
            created_at,
            updated_at: created_at,
        };
        self.state.write().resources.push(resource.clone());
        resource
    }

    /// Insert a standalone image with an explicit creation time
    pub fn seed_image(&self, tenant: TenantScope, created_at: DateTime<Utc>) -> GalleryImage {
        let image = GalleryImage {
            id: Uuid::new_v4(),
            event_id: None,
            title: None,
            tenant,
            image_url: "https://files.example/photo.jpg".into(),
            created_at,
        };
        self.state.write().images.push(image.clone());
        image
    }

    pub fn resource_count(&self) -> usize {
        self.state.read().resources.len()
    }

    pub fn event_count(&self) -> usize {
        self.state.read().events.len()
    }

    pub fn image_count(&self) -> usize {
        self.state.read().images.len()
    }

    fn with_images(state: &State, event: &GalleryEvent) -> GalleryEventWithImages {
        let mut images: Vec<GalleryImage> = state
            .images
            .iter()
            .filter(|i| i.event_id == Some(event.id))
            .cloned()
            .collect();
        images.sort_by_key(|i| i.created_at);
        GalleryEventWithImages {
            event: event.clone(),
            images,
        }
    }
}

fn newest_first<T, F>(mut items: Vec<T>, key: F) -> Vec<T>
where
    F: Fn(&T) -> DateTime<Utc>,
{
    items.sort_by_key(|item| std::cmp::Reverse(key(item)));
    items
}

#[async_trait]
impl ResourceRepository for MemoryStore {
    async fn create(&self, resource: &NewResource, tenant: TenantScope) -> anyhow::Result<Resource> {
        self.check_writes()?;
        let now = self.tick();
        let created = Resource {
            id: Uuid::new_v4(),
            title: resource.title.clone(),
            description: resource.description.clone(),
            category: resource.category,
            tenant,
            file_url: resource.file_url.clone(),
            file_size: resource.file_size.clone(),
            created_at: now,
            updated_at: now,
        };
        self.state.write().resources.push(created.clone());
        Ok(created)
    }

    async fn list(&self, tenant: Option<TenantScope>) -> anyhow::Result<Vec<Resource>> {
        let state = self.state.read();
        let items: Vec<Resource> = state
            .resources
            .iter()
            .filter(|r| tenant.is_none_or(|t| r.tenant == t))
            .cloned()
            .collect();
        Ok(newest_first(items, |r| r.created_at))
    }

    async fn update(&self, id: Uuid, patch: &ResourcePatch) -> anyhow::Result<Option<Resource>> {
        let now = self.tick();
        let mut state = self.state.write();
        let Some(resource) = state.resources.iter_mut().find(|r| r.id == id) else {
            return Ok(None);
        };
        if let Some(title) = &patch.title {
            resource.title = title.clone();
        }
        if let Some(description) = &patch.description {
            resource.description = (!description.is_empty()).then(|| description.clone());
        }
        if let Some(category) = patch.category {
            resource.category = category;
        }
        resource.updated_at = now;
        Ok(Some(resource.clone()))
    }

    async fn delete(&self, id: Uuid) -> anyhow::Result<bool> {
        let mut state = self.state.write();
        let before = state.resources.len();
        state.resources.retain(|r| r.id != id);
        Ok(state.resources.len() < before)
    }
}

#[async_trait]
impl GalleryRepository for MemoryStore {
    async fn create_event(
        &self,
        event: &NewGalleryEvent,
        tenant: TenantScope,
    ) -> anyhow::Result<GalleryEventWithImages> {
        self.check_writes()?;
        let cover = event
            .image_urls
            .first()
            .ok_or_else(|| anyhow::anyhow!("event without images"))?;
        let now = self.tick();
        let created = GalleryEvent {
            id: Uuid::new_v4(),
            title: event.title.clone(),
            description: event.description.clone(),
            tenant,
            cover_image: cover.clone(),
            created_at: now,
            updated_at: now,
        };
        let images: Vec<GalleryImage> = event
            .image_urls
            .iter()
            .map(|url| GalleryImage {
                id: Uuid::new_v4(),
                event_id: Some(created.id),
                title: Some(event.title.clone()),
                tenant,
                image_url: url.clone(),
                created_at: now,
            })
            .collect();

        let mut state = self.state.write();
        state.events.push(created.clone());
        state.images.extend(images.iter().cloned());
        Ok(GalleryEventWithImages {
            event: created,
            images,
        })
    }

    async fn list_events(
        &self,
        tenant: Option<TenantScope>,
    ) -> anyhow::Result<Vec<GalleryEventWithImages>> {
        let state = self.state.read();
        let events: Vec<GalleryEvent> = state
            .events
            .iter()
            .filter(|e| tenant.is_none_or(|t| e.tenant == t))
            .cloned()
            .collect();
        Ok(newest_first(events, |e| e.created_at)
            .iter()
            .map(|e| Self::with_images(&state, e))
            .collect())
    }

    async fn update_event(
        &self,
        id: Uuid,
        patch: &GalleryEventPatch,
    ) -> anyhow::Result<Option<GalleryEventWithImages>> {
        let now = self.tick();
        let mut state = self.state.write();
        let Some(event) = state.events.iter_mut().find(|e| e.id == id) else {
            return Ok(None);
        };
        if let Some(title) = &patch.title {
            event.title = title.clone();
        }
        if let Some(description) = &patch.description {
            event.description = (!description.is_empty()).then(|| description.clone());
        }
        event.updated_at = now;
        let event = event.clone();
        Ok(Some(Self::with_images(&state, &event)))
    }

    async fn delete_event(&self, id: Uuid) -> anyhow::Result<bool> {
        let mut state = self.state.write();
        let before = state.events.len();
        state.events.retain(|e| e.id != id);
        let removed = state.events.len() < before;
        if removed {
            state.images.retain(|i| i.event_id != Some(id));
        }
        Ok(removed)
    }

    async fn create_image(
        &self,
        image: &NewGalleryImage,
        tenant: TenantScope,
    ) -> anyhow::Result<GalleryImage> {
        self.check_writes()?;
        let created = GalleryImage {
            id: Uuid::new_v4(),
            event_id: None,
            title: image.title.clone(),
            tenant,
            image_url: image.image_url.clone(),
            created_at: self.tick(),
        };
        self.state.write().images.push(created.clone());
        Ok(created)
    }

    async fn list_images(&self, tenant: Option<TenantScope>) -> anyhow::Result<Vec<GalleryImage>> {
        let state = self.state.read();
        let images: Vec<GalleryImage> = state
            .images
            .iter()
            .filter(|i| tenant.is_none_or(|t| i.tenant == t))
            .cloned()
            .collect();
        Ok(newest_first(images, |i| i.created_at))
    }

    async fn delete_image(&self, id: Uuid) -> anyhow::Result<bool> {
        let mut state = self.state.write();
        let before = state.images.len();
        state.images.retain(|i| i.id != id);
        Ok(state.images.len() < before)
    }
}

fn count_by<T, K, F>(items: &[T], key: F) -> Vec<(K, u64)>
where
    K: Ord + Copy,
    F: Fn(&T) -> K,
{
    let mut counts = std::collections::BTreeMap::new();
    for item in items {
        *counts.entry(key(item)).or_insert(0u64) += 1;
    }
    counts.into_iter().collect()
}

#[async_trait]
impl StatisticsRepository for MemoryStore {
    async fn count_resources(&self) -> anyhow::Result<u64> {
        Ok(self.state.read().resources.len() as u64)
    }

    async fn count_images(&self) -> anyhow::Result<u64> {
        Ok(self.state.read().images.len() as u64)
    }

    async fn resources_by_category(&self) -> anyhow::Result<Vec<(Category, u64)>> {
        Ok(count_by(&self.state.read().resources, |r| r.category))
    }

    async fn resources_by_tenant(&self) -> anyhow::Result<Vec<(TenantScope, u64)>> {
        Ok(count_by(&self.state.read().resources, |r| r.tenant))
    }

    async fn images_by_tenant(&self) -> anyhow::Result<Vec<(TenantScope, u64)>> {
        Ok(count_by(&self.state.read().images, |i| i.tenant))
    }

    async fn resource_activity(&self, since: DateTime<Utc>) -> anyhow::Result<Vec<MonthlyCount>> {
        let state = self.state.read();
        Ok(bucket_by_month(
            state
                .resources
                .iter()
                .map(|r| r.created_at)
                .filter(|at| *at >= since),
        ))
    }

    async fn image_activity(&self, since: DateTime<Utc>) -> anyhow::Result<Vec<MonthlyCount>> {
        let state = self.state.read();
        Ok(bucket_by_month(
            state
                .images
                .iter()
                .map(|i| i.created_at)
                .filter(|at| *at >= since),
        ))
    }

    async fn ping(&self) -> anyhow::Result<()> {
        if self.fail_ping.load(Ordering::SeqCst) {
            anyhow::bail!("connection refused");
        }
        Ok(())
    }

    async fn latest_resource_at(&self) -> anyhow::Result<Option<DateTime<Utc>>> {
        Ok(self.state.read().resources.iter().map(|r| r.created_at).max())
    }

    async fn latest_image_at(&self) -> anyhow::Result<Option<DateTime<Utc>>> {
        Ok(self.state.read().images.iter().map(|i| i.created_at).max())
    }
}

/// Invalidator that records every requested path
#[derive(Default)]
pub struct RecordingInvalidator {
    paths: Mutex<Vec<String>>,
}

impl RecordingInvalidator {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn paths(&self) -> Vec<String> {
        self.paths.lock().clone()
    }
}

#[async_trait]
impl ViewInvalidator for RecordingInvalidator {
    async fn invalidate(&self, path: &str) -> anyhow::Result<()> {
        self.paths.lock().push(path.to_string());
        Ok(())
    }
}

/// Service wired to a fresh store and a recording invalidator
pub struct Harness {
    pub store: Arc<MemoryStore>,
    pub invalidator: Arc<RecordingInvalidator>,
    pub service: Arc<Service>,
}

impl Harness {
    pub fn new() -> Self {
        let store = MemoryStore::new();
        let invalidator = RecordingInvalidator::new();
        let service = Arc::new(Service::new(
            store.clone(),
            store.clone(),
            store.clone(),
            invalidator.clone(),
        ));
        Self {
            store,
            invalidator,
            service,
        }
    }
}

pub fn session(tenant: TenantScope) -> SessionContext {
    SessionContext::authenticated(tenant)
}

pub fn new_resource(title: &str) -> NewResource {
    NewResource {
        title: title.into(),
        description: Some("Quarterly findings".into()),
        category: Category::Report,
        file_url: format!("https://files.example/{}.pdf", title.replace(' ', "-")),
        file_size: Some("2.35 MB".into()),
    }
}

pub fn new_event(title: &str, urls: &[&str]) -> NewGalleryEvent {
    NewGalleryEvent {
        title: title.into(),
        description: None,
        image_urls: urls.iter().map(|u| u.to_string()).collect(),
    }
}

/// Mid-month instant, `months_ago` calendar months before now
pub fn months_ago(months_ago: u32) -> DateTime<Utc> {
    let now = Utc::now();
    let shifted = now
        .checked_sub_months(chrono::Months::new(months_ago))
        .unwrap_or(now);
    Utc.with_ymd_and_hms(
        chrono::Datelike::year(&shifted),
        chrono::Datelike::month(&shifted),
        15,
        12,
        0,
        0,
    )
    .single()
    .unwrap_or(shifted)
}
