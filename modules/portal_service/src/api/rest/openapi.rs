//! OpenAPI document describing the REST payloads

use super::dto::*;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(title = "Portal Service API", description = "Country-scoped resources, gallery and dashboard"),
    components(schemas(
        LoginRequest,
        SessionDto,
        ResourceDto,
        CreateResourceRequest,
        UpdateResourceRequest,
        ResourcesListResponse,
        GalleryImageDto,
        GalleryEventDto,
        CreateGalleryEventRequest,
        UpdateGalleryEventRequest,
        CreateGalleryImageRequest,
        GalleryEventsListResponse,
        GalleryImagesListResponse,
        UploadCountsDto,
        NamedCountDto,
        ActivityPointDto,
        StatisticsChartsDto,
        SystemHealthDto,
        StatisticsDto,
        UploadPolicyDto,
    ))
)]
pub struct PortalApiDoc;
