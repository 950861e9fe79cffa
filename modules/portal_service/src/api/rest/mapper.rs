//! Mapper implementations for converting between DTOs and contract models

use super::dto::*;
use crate::contract::{self, Category, PortalError};
use crate::domain::validation::UploadPolicy;

fn parse_category(value: Option<&str>) -> Result<Option<Category>, PortalError> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::parse)
        .transpose()
}

// ===== Resource conversions =====

impl From<contract::Resource> for ResourceDto {
    fn from(resource: contract::Resource) -> Self {
        Self {
            id: resource.id,
            title: resource.title,
            description: resource.description,
            category: resource.category.to_string(),
            country: resource.tenant.to_string(),
            file_url: resource.file_url,
            file_size: resource.file_size,
            created_at: resource.created_at,
            updated_at: resource.updated_at,
        }
    }
}

impl TryFrom<CreateResourceRequest> for contract::NewResource {
    type Error = PortalError;

    fn try_from(req: CreateResourceRequest) -> Result<Self, Self::Error> {
        Ok(Self {
            title: req.title,
            description: req.description,
            category: parse_category(req.category.as_deref())?.unwrap_or_default(),
            file_url: req.file_url,
            file_size: req.file_size,
        })
    }
}

impl TryFrom<UpdateResourceRequest> for contract::ResourcePatch {
    type Error = PortalError;

    fn try_from(req: UpdateResourceRequest) -> Result<Self, Self::Error> {
        Ok(Self {
            title: req.title,
            description: req.description,
            category: parse_category(req.category.as_deref())?,
        })
    }
}

// ===== Gallery conversions =====

impl From<contract::GalleryImage> for GalleryImageDto {
    fn from(image: contract::GalleryImage) -> Self {
        Self {
            id: image.id,
            event_id: image.event_id,
            title: image.title,
            country: image.tenant.to_string(),
            image_url: image.image_url,
            created_at: image.created_at,
        }
    }
}

impl From<contract::GalleryEventWithImages> for GalleryEventDto {
    fn from(value: contract::GalleryEventWithImages) -> Self {
        let event = value.event;
        Self {
            id: event.id,
            title: event.title,
            description: event.description,
            country: event.tenant.to_string(),
            cover_image: event.cover_image,
            created_at: event.created_at,
            updated_at: event.updated_at,
            images: value.images.into_iter().map(Into::into).collect(),
        }
    }
}

impl From<CreateGalleryEventRequest> for contract::NewGalleryEvent {
    fn from(req: CreateGalleryEventRequest) -> Self {
        Self {
            title: req.title,
            description: req.description,
            image_urls: req.image_urls,
        }
    }
}

impl From<UpdateGalleryEventRequest> for contract::GalleryEventPatch {
    fn from(req: UpdateGalleryEventRequest) -> Self {
        Self {
            title: req.title,
            description: req.description,
        }
    }
}

impl From<CreateGalleryImageRequest> for contract::NewGalleryImage {
    fn from(req: CreateGalleryImageRequest) -> Self {
        Self {
            title: req.title,
            image_url: req.image_url,
        }
    }
}

// ===== Statistics conversions =====

impl From<contract::NamedCount> for NamedCountDto {
    fn from(count: contract::NamedCount) -> Self {
        Self {
            name: count.name,
            value: count.value,
        }
    }
}

impl From<contract::ActivityPoint> for ActivityPointDto {
    fn from(point: contract::ActivityPoint) -> Self {
        Self {
            name: point.name,
            date: point.date,
            value: point.value,
        }
    }
}

impl From<contract::StatisticsSnapshot> for StatisticsDto {
    fn from(snapshot: contract::StatisticsSnapshot) -> Self {
        let contract::StatisticsSnapshot {
            counts,
            charts,
            health,
        } = snapshot;

        Self {
            counts: UploadCountsDto {
                resources: counts.resources,
                gallery: counts.gallery,
                total_uploads: counts.total_uploads,
            },
            charts: StatisticsChartsDto {
                by_category: charts.by_category.into_iter().map(Into::into).collect(),
                by_country: charts.by_country.into_iter().map(Into::into).collect(),
                activity: charts.activity.into_iter().map(Into::into).collect(),
            },
            health: SystemHealthDto {
                database: health.database.as_str().to_string(),
                last_activity: health.last_activity,
                version: health.version,
                status: health.status,
            },
        }
    }
}

impl UploadPolicyDto {
    pub fn current() -> Self {
        Self {
            max_image_bytes: UploadPolicy::MAX_IMAGE_BYTES,
            max_images_per_upload: UploadPolicy::MAX_IMAGES_PER_UPLOAD,
            max_pdf_bytes: UploadPolicy::MAX_PDF_BYTES,
            max_pdfs_per_upload: UploadPolicy::MAX_PDFS_PER_UPLOAD,
        }
    }
}
