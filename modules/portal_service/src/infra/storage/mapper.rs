//! Entity to model mappers
//!
//! Conversions between SeaORM entities and contract models

use super::entity::{gallery_event, gallery_image, resource};
use crate::contract::{
    Category, GalleryEvent, GalleryEventWithImages, GalleryImage, Resource, TenantScope,
};
use anyhow::{Context, Result};

pub(crate) fn parse_tenant(value: &str) -> Result<TenantScope> {
    value
        .parse()
        .with_context(|| format!("stored country '{}' is not a known tenant", value))
}

pub(crate) fn parse_category(value: &str) -> Result<Category> {
    value
        .parse()
        .with_context(|| format!("stored category '{}' is not a known category", value))
}

// ===== Resource Conversions =====

impl TryFrom<resource::Model> for Resource {
    type Error = anyhow::Error;

    fn try_from(entity: resource::Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: entity.id,
            title: entity.title,
            description: entity.description,
            category: parse_category(&entity.category)?,
            tenant: parse_tenant(&entity.country)?,
            file_url: entity.file_url,
            file_size: entity.file_size,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        })
    }
}

// ===== Gallery Conversions =====

impl TryFrom<gallery_event::Model> for GalleryEvent {
    type Error = anyhow::Error;

    fn try_from(entity: gallery_event::Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: entity.id,
            title: entity.title,
            description: entity.description,
            tenant: parse_tenant(&entity.country)?,
            cover_image: entity.cover_image,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        })
    }
}

impl TryFrom<gallery_image::Model> for GalleryImage {
    type Error = anyhow::Error;

    fn try_from(entity: gallery_image::Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: entity.id,
            event_id: entity.event_id,
            title: entity.title,
            tenant: parse_tenant(&entity.country)?,
            image_url: entity.image_url,
            created_at: entity.created_at,
        })
    }
}

/// Combine an event row with the image rows it owns
pub(crate) fn event_with_images(
    event: gallery_event::Model,
    images: Vec<gallery_image::Model>,
) -> Result<GalleryEventWithImages> {
    Ok(GalleryEventWithImages {
        event: event.try_into()?,
        images: images
            .into_iter()
            .map(GalleryImage::try_from)
            .collect::<Result<Vec<_>>>()?,
    })
}
