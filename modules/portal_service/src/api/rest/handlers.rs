//! HTTP request handlers - thin layer that delegates to domain service

use super::{
    dto::*,
    openapi::PortalApiDoc,
    error::{map_auth_error, map_domain_error, map_json_rejection, Problem},
};
use crate::contract::{NewResource, ResourcePatch, SessionContext, TenantFilter};
use crate::domain::{Service, SessionResolver, SESSION_COOKIE};
use axum::{
    extract::{rejection::JsonRejection, Path, Query},
    http::StatusCode,
    Json,
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use std::sync::Arc;
use utoipa::OpenApi;
use uuid::Uuid;

/// Shared state injected into every handler
pub struct ApiState {
    pub service: Arc<Service>,
    pub sessions: Arc<SessionResolver>,
    /// Mark the session cookie `Secure`
    pub secure_cookies: bool,
}

impl ApiState {
    /// Resolve the request's session cookie into a context
    fn session(&self, jar: &CookieJar) -> SessionContext {
        let token = jar.get(SESSION_COOKIE).map(|c| c.value());
        self.sessions.current_session(token).into()
    }
}

/// Gate a write on the session before its body is looked at
fn authorized_body<T>(
    ctx: &SessionContext,
    body: Result<Json<T>, JsonRejection>,
) -> Result<T, Problem> {
    ctx.require().map_err(map_domain_error)?;
    let Json(body) = body.map_err(map_json_rejection)?;
    Ok(body)
}

fn parse_filter(query: &ListQuery) -> Result<TenantFilter, Problem> {
    TenantFilter::parse(query.country.as_deref()).map_err(map_domain_error)
}

// ===== Session Handlers =====

/// Exchange an access code for a session cookie
pub async fn login(
    state: Arc<ApiState>,
    jar: CookieJar,
    Json(req): Json<LoginRequest>,
) -> Result<(CookieJar, Json<SessionDto>), Problem> {
    let grant = state.sessions.login(&req.code).map_err(map_auth_error)?;

    let cookie = Cookie::build((SESSION_COOKIE, grant.token))
        .http_only(true)
        .secure(state.secure_cookies)
        .same_site(SameSite::Lax)
        .path("/")
        .max_age(time::Duration::seconds(grant.max_age_secs));

    Ok((
        jar.add(cookie),
        Json(SessionDto {
            country: grant.tenant.to_string(),
        }),
    ))
}

/// Discard the session cookie; always succeeds
pub async fn logout(jar: CookieJar) -> (CookieJar, StatusCode) {
    (
        jar.remove(Cookie::build(SESSION_COOKIE).path("/")),
        StatusCode::NO_CONTENT,
    )
}

/// Report the tenant of the current session
pub async fn current_session(
    state: Arc<ApiState>,
    jar: CookieJar,
) -> Result<Json<SessionDto>, Problem> {
    let ctx = state.session(&jar);
    let principal = ctx.require().map_err(map_domain_error)?;

    Ok(Json(SessionDto {
        country: principal.tenant.to_string(),
    }))
}

// ===== Resource Handlers =====

/// List resources, optionally restricted to one country
pub async fn list_resources(
    state: Arc<ApiState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<ResourcesListResponse>, Problem> {
    let filter = parse_filter(&query)?;
    let resources = state
        .service
        .list_resources(filter)
        .await
        .map_err(map_domain_error)?;

    let items: Vec<ResourceDto> = resources.into_iter().map(Into::into).collect();
    let total = items.len();

    Ok(Json(ResourcesListResponse { items, total }))
}

pub async fn create_resource(
    state: Arc<ApiState>,
    jar: CookieJar,
    body: Result<Json<CreateResourceRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<ResourceDto>), Problem> {
    let ctx = state.session(&jar);
    let req = authorized_body(&ctx, body)?;
    let resource: NewResource = req.try_into().map_err(map_domain_error)?;

    let created = state
        .service
        .create_resource(&ctx, resource)
        .await
        .map_err(map_domain_error)?;

    Ok((StatusCode::CREATED, Json(created.into())))
}

pub async fn update_resource(
    state: Arc<ApiState>,
    jar: CookieJar,
    Path(id): Path<Uuid>,
    body: Result<Json<UpdateResourceRequest>, JsonRejection>,
) -> Result<Json<ResourceDto>, Problem> {
    let ctx = state.session(&jar);
    let req = authorized_body(&ctx, body)?;
    let patch: ResourcePatch = req.try_into().map_err(map_domain_error)?;

    let updated = state
        .service
        .update_resource(&ctx, id, patch)
        .await
        .map_err(map_domain_error)?;

    Ok(Json(updated.into()))
}

pub async fn delete_resource(
    state: Arc<ApiState>,
    jar: CookieJar,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, Problem> {
    let ctx = state.session(&jar);
    state
        .service
        .delete_resource(&ctx, id)
        .await
        .map_err(map_domain_error)?;

    Ok(StatusCode::NO_CONTENT)
}

// ===== Gallery Event Handlers =====

pub async fn list_events(
    state: Arc<ApiState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<GalleryEventsListResponse>, Problem> {
    let filter = parse_filter(&query)?;
    let events = state
        .service
        .list_events(filter)
        .await
        .map_err(map_domain_error)?;

    let items: Vec<GalleryEventDto> = events.into_iter().map(Into::into).collect();
    let total = items.len();

    Ok(Json(GalleryEventsListResponse { items, total }))
}

/// Create an event from already-uploaded image URLs
pub async fn create_event(
    state: Arc<ApiState>,
    jar: CookieJar,
    body: Result<Json<CreateGalleryEventRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<GalleryEventDto>), Problem> {
    let ctx = state.session(&jar);
    let req = authorized_body(&ctx, body)?;
    let created = state
        .service
        .create_event(&ctx, req.into())
        .await
        .map_err(map_domain_error)?;

    Ok((StatusCode::CREATED, Json(created.into())))
}

pub async fn update_event(
    state: Arc<ApiState>,
    jar: CookieJar,
    Path(id): Path<Uuid>,
    body: Result<Json<UpdateGalleryEventRequest>, JsonRejection>,
) -> Result<Json<GalleryEventDto>, Problem> {
    let ctx = state.session(&jar);
    let req = authorized_body(&ctx, body)?;
    let updated = state
        .service
        .update_event(&ctx, id, req.into())
        .await
        .map_err(map_domain_error)?;

    Ok(Json(updated.into()))
}

pub async fn delete_event(
    state: Arc<ApiState>,
    jar: CookieJar,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, Problem> {
    let ctx = state.session(&jar);
    state
        .service
        .delete_event(&ctx, id)
        .await
        .map_err(map_domain_error)?;

    Ok(StatusCode::NO_CONTENT)
}

// ===== Standalone Image Handlers =====

pub async fn list_images(
    state: Arc<ApiState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<GalleryImagesListResponse>, Problem> {
    let filter = parse_filter(&query)?;
    let images = state
        .service
        .list_images(filter)
        .await
        .map_err(map_domain_error)?;

    let items: Vec<GalleryImageDto> = images.into_iter().map(Into::into).collect();
    let total = items.len();

    Ok(Json(GalleryImagesListResponse { items, total }))
}

pub async fn create_image(
    state: Arc<ApiState>,
    jar: CookieJar,
    body: Result<Json<CreateGalleryImageRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<GalleryImageDto>), Problem> {
    let ctx = state.session(&jar);
    let req = authorized_body(&ctx, body)?;
    let created = state
        .service
        .create_image(&ctx, req.into())
        .await
        .map_err(map_domain_error)?;

    Ok((StatusCode::CREATED, Json(created.into())))
}

pub async fn delete_image(
    state: Arc<ApiState>,
    jar: CookieJar,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, Problem> {
    let ctx = state.session(&jar);
    state
        .service
        .delete_image(&ctx, id)
        .await
        .map_err(map_domain_error)?;

    Ok(StatusCode::NO_CONTENT)
}

// ===== Dashboard Handlers =====

pub async fn get_statistics(
    state: Arc<ApiState>,
    jar: CookieJar,
) -> Result<Json<StatisticsDto>, Problem> {
    let ctx = state.session(&jar);
    let snapshot = state
        .service
        .get_statistics(&ctx)
        .await
        .map_err(map_domain_error)?;

    Ok(Json(snapshot.into()))
}

/// Upload limits the admin UI enforces before sending files to the provider
pub async fn upload_policy() -> Json<UploadPolicyDto> {
    Json(UploadPolicyDto::current())
}

pub async fn openapi_document() -> Json<utoipa::openapi::OpenApi> {
    Json(PortalApiDoc::openapi())
}
