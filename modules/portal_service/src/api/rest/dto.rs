//! REST DTOs with serde derives for HTTP API

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

// ===== Session DTOs =====

/// Admin login request
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct LoginRequest {
    /// Per-country access code
    pub code: String,
}

/// Resolved session scope
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SessionDto {
    #[schema(example = "Kenya")]
    pub country: String,
}

/// Optional country filter for public listings
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListQuery {
    /// Country name or "All"
    pub country: Option<String>,
}

// ===== Resource DTOs =====

/// Resource response DTO
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ResourceDto {
    pub id: Uuid,
    #[schema(example = "Annual Report 2024")]
    pub title: String,
    pub description: Option<String>,
    #[schema(example = "Report")]
    pub category: String,
    #[schema(example = "Kenya")]
    pub country: String,
    pub file_url: String,
    #[schema(example = "2.35 MB")]
    pub file_size: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Create resource request; any country field is ignored in favour of the session
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateResourceRequest {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Defaults to "Other"
    #[serde(default)]
    pub category: Option<String>,
    pub file_url: String,
    #[serde(default)]
    pub file_size: Option<String>,
}

/// Partial resource update
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateResourceRequest {
    #[serde(default)]
    pub title: Option<String>,
    /// Empty string clears the description
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ResourcesListResponse {
    pub items: Vec<ResourceDto>,
    pub total: usize,
}

// ===== Gallery DTOs =====

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GalleryImageDto {
    pub id: Uuid,
    pub event_id: Option<Uuid>,
    pub title: Option<String>,
    pub country: String,
    pub image_url: String,
    pub created_at: DateTime<Utc>,
}

/// Gallery event with its images
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GalleryEventDto {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub country: String,
    pub cover_image: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub images: Vec<GalleryImageDto>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateGalleryEventRequest {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Uploaded image URLs; the first becomes the cover
    #[serde(default)]
    pub image_urls: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateGalleryEventRequest {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateGalleryImageRequest {
    #[serde(default)]
    pub title: Option<String>,
    pub image_url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct GalleryEventsListResponse {
    pub items: Vec<GalleryEventDto>,
    pub total: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct GalleryImagesListResponse {
    pub items: Vec<GalleryImageDto>,
    pub total: usize,
}

// ===== Statistics DTOs =====

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UploadCountsDto {
    pub resources: u64,
    pub gallery: u64,
    pub total_uploads: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct NamedCountDto {
    pub name: String,
    pub value: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ActivityPointDto {
    #[schema(example = "Dec")]
    pub name: String,
    /// Start of the month
    pub date: DateTime<Utc>,
    pub value: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StatisticsChartsDto {
    pub by_category: Vec<NamedCountDto>,
    pub by_country: Vec<NamedCountDto>,
    pub activity: Vec<ActivityPointDto>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SystemHealthDto {
    #[schema(example = "Connected")]
    pub database: String,
    pub last_activity: Option<DateTime<Utc>>,
    pub version: String,
    #[schema(example = "Operational")]
    pub status: String,
}

/// Dashboard statistics
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct StatisticsDto {
    pub counts: UploadCountsDto,
    pub charts: StatisticsChartsDto,
    pub health: SystemHealthDto,
}

/// Limits the upload provider applies
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UploadPolicyDto {
    pub max_image_bytes: u64,
    pub max_images_per_upload: usize,
    pub max_pdf_bytes: u64,
    pub max_pdfs_per_upload: usize,
}

// Note: Conversion implementations live in mapper.rs
