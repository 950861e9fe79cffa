//! Route registration for the public and admin endpoints

use super::{dto::*, error::Problem, handlers, handlers::ApiState};
use axum::{
    extract::{rejection::JsonRejection, Path, Query},
    http::StatusCode,
    routing::{get, patch, post},
    Extension, Json, Router,
};
use axum_extra::extract::cookie::CookieJar;
use std::sync::Arc;
use uuid::Uuid;

/// Register all REST routes
pub fn register_routes(router: Router, state: Arc<ApiState>) -> anyhow::Result<Router> {
    let router = router
        // Session endpoints
        .route("/admin/login", post(login_handler))
        .route("/admin/logout", post(handlers::logout))
        .route("/admin/session", get(current_session_handler))
        // Resource endpoints
        .route("/resources", get(list_resources_handler))
        .route("/admin/resources", post(create_resource_handler))
        .route(
            "/admin/resources/{id}",
            patch(update_resource_handler).delete(delete_resource_handler),
        )
        // Gallery endpoints
        .route("/gallery/events", get(list_events_handler))
        .route("/admin/gallery/events", post(create_event_handler))
        .route(
            "/admin/gallery/events/{id}",
            patch(update_event_handler).delete(delete_event_handler),
        )
        .route("/gallery/images", get(list_images_handler))
        .route("/admin/gallery/images", post(create_image_handler))
        .route(
            "/admin/gallery/images/{id}",
            axum::routing::delete(delete_image_handler),
        )
        // Dashboard endpoints
        .route("/admin/statistics", get(statistics_handler))
        .route("/uploads/policy", get(handlers::upload_policy))
        .route("/openapi.json", get(handlers::openapi_document))
        .layer(Extension(state));

    Ok(router)
}

// ===== Handler wrappers that extract state from Extension =====

async fn login_handler(
    Extension(state): Extension<Arc<ApiState>>,
    jar: CookieJar,
    json: Json<LoginRequest>,
) -> Result<(CookieJar, Json<SessionDto>), Problem> {
    handlers::login(state, jar, json).await
}

async fn current_session_handler(
    Extension(state): Extension<Arc<ApiState>>,
    jar: CookieJar,
) -> Result<Json<SessionDto>, Problem> {
    handlers::current_session(state, jar).await
}

async fn list_resources_handler(
    Extension(state): Extension<Arc<ApiState>>,
    query: Query<ListQuery>,
) -> Result<Json<ResourcesListResponse>, Problem> {
    handlers::list_resources(state, query).await
}

async fn create_resource_handler(
    Extension(state): Extension<Arc<ApiState>>,
    jar: CookieJar,
    json: Result<Json<CreateResourceRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<ResourceDto>), Problem> {
    handlers::create_resource(state, jar, json).await
}

async fn update_resource_handler(
    Extension(state): Extension<Arc<ApiState>>,
    jar: CookieJar,
    path: Path<Uuid>,
    json: Result<Json<UpdateResourceRequest>, JsonRejection>,
) -> Result<Json<ResourceDto>, Problem> {
    handlers::update_resource(state, jar, path, json).await
}

async fn delete_resource_handler(
    Extension(state): Extension<Arc<ApiState>>,
    jar: CookieJar,
    path: Path<Uuid>,
) -> Result<StatusCode, Problem> {
    handlers::delete_resource(state, jar, path).await
}

async fn list_events_handler(
    Extension(state): Extension<Arc<ApiState>>,
    query: Query<ListQuery>,
) -> Result<Json<GalleryEventsListResponse>, Problem> {
    handlers::list_events(state, query).await
}

async fn create_event_handler(
    Extension(state): Extension<Arc<ApiState>>,
    jar: CookieJar,
    json: Result<Json<CreateGalleryEventRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<GalleryEventDto>), Problem> {
    handlers::create_event(state, jar, json).await
}

async fn update_event_handler(
    Extension(state): Extension<Arc<ApiState>>,
    jar: CookieJar,
    path: Path<Uuid>,
    json: Result<Json<UpdateGalleryEventRequest>, JsonRejection>,
) -> Result<Json<GalleryEventDto>, Problem> {
    handlers::update_event(state, jar, path, json).await
}

async fn delete_event_handler(
    Extension(state): Extension<Arc<ApiState>>,
    jar: CookieJar,
    path: Path<Uuid>,
) -> Result<StatusCode, Problem> {
    handlers::delete_event(state, jar, path).await
}

async fn list_images_handler(
    Extension(state): Extension<Arc<ApiState>>,
    query: Query<ListQuery>,
) -> Result<Json<GalleryImagesListResponse>, Problem> {
    handlers::list_images(state, query).await
}

async fn create_image_handler(
    Extension(state): Extension<Arc<ApiState>>,
    jar: CookieJar,
    json: Result<Json<CreateGalleryImageRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<GalleryImageDto>), Problem> {
    handlers::create_image(state, jar, json).await
}

async fn delete_image_handler(
    Extension(state): Extension<Arc<ApiState>>,
    jar: CookieJar,
    path: Path<Uuid>,
) -> Result<StatusCode, Problem> {
    handlers::delete_image(state, jar, path).await
}

async fn statistics_handler(
    Extension(state): Extension<Arc<ApiState>>,
    jar: CookieJar,
) -> Result<Json<StatisticsDto>, Problem> {
    handlers::get_statistics(state, jar).await
}
