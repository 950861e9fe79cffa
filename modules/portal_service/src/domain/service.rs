//! Domain service - business logic orchestration

use super::invalidation::{invalidate_listings, ListingKind, ViewInvalidator};
use super::repository::{GalleryRepository, ResourceRepository, StatisticsRepository};
use super::validation;
use crate::contract::{
    GalleryEventPatch, GalleryEventWithImages, GalleryImage, NewGalleryEvent, NewGalleryImage,
    NewResource, PortalError, Resource, ResourcePatch, SessionContext, TenantFilter,
};
use std::sync::Arc;
use uuid::Uuid;

/// Log a repository failure and convert it into a contract error
pub(crate) fn store_error(operation: &'static str) -> impl FnOnce(anyhow::Error) -> PortalError {
    move |e| {
        tracing::error!(operation, error = ?e, "store operation failed");
        PortalError::store(e)
    }
}

/// Domain service for resources, gallery events and statistics
pub struct Service {
    pub(crate) resource_repo: Arc<dyn ResourceRepository>,
    pub(crate) gallery_repo: Arc<dyn GalleryRepository>,
    pub(crate) stats_repo: Arc<dyn StatisticsRepository>,
    invalidator: Arc<dyn ViewInvalidator>,
    /// Activity chart look-back, in months
    pub(crate) activity_window_months: u32,
}

impl Service {
    /// Create a new service instance
    pub fn new(
        resource_repo: Arc<dyn ResourceRepository>,
        gallery_repo: Arc<dyn GalleryRepository>,
        stats_repo: Arc<dyn StatisticsRepository>,
        invalidator: Arc<dyn ViewInvalidator>,
    ) -> Self {
        Self {
            resource_repo,
            gallery_repo,
            stats_repo,
            invalidator,
            activity_window_months: 6,
        }
    }

    pub fn with_activity_window(mut self, months: u32) -> Self {
        self.activity_window_months = months;
        self
    }

    // ===== Resource Operations =====

    /// List resources newest first
    pub async fn list_resources(&self, filter: TenantFilter) -> Result<Vec<Resource>, PortalError> {
        self.resource_repo
            .list(filter.tenant())
            .await
            .map_err(store_error("list_resources"))
    }

    /// Create a resource owned by the session's tenant
    pub async fn create_resource(
        &self,
        ctx: &SessionContext,
        resource: NewResource,
    ) -> Result<Resource, PortalError> {
        let principal = ctx.require()?;
        let resource = validation::validate_new_resource(resource)?;

        let created = self
            .resource_repo
            .create(&resource, principal.tenant)
            .await
            .map_err(store_error("create_resource"))?;

        tracing::info!(id = %created.id, tenant = %created.tenant, "resource created");
        invalidate_listings(self.invalidator.as_ref(), ListingKind::Resources).await;
        Ok(created)
    }

    /// Update title, description or category of a resource
    pub async fn update_resource(
        &self,
        ctx: &SessionContext,
        id: Uuid,
        patch: ResourcePatch,
    ) -> Result<Resource, PortalError> {
        ctx.require()?;
        let patch = validation::validate_resource_patch(patch)?;

        let updated = self
            .resource_repo
            .update(id, &patch)
            .await
            .map_err(store_error("update_resource"))?
            .ok_or_else(|| PortalError::not_found("resource", id))?;

        tracing::info!(id = %id, "resource updated");
        invalidate_listings(self.invalidator.as_ref(), ListingKind::Resources).await;
        Ok(updated)
    }

    /// Hard delete a resource
    pub async fn delete_resource(&self, ctx: &SessionContext, id: Uuid) -> Result<(), PortalError> {
        ctx.require()?;

        let removed = self
            .resource_repo
            .delete(id)
            .await
            .map_err(store_error("delete_resource"))?;
        if !removed {
            return Err(PortalError::not_found("resource", id));
        }

        tracing::info!(id = %id, "resource deleted");
        invalidate_listings(self.invalidator.as_ref(), ListingKind::Resources).await;
        Ok(())
    }

    // ===== Gallery Event Operations =====

    /// List events newest first, each with its images
    pub async fn list_events(
        &self,
        filter: TenantFilter,
    ) -> Result<Vec<GalleryEventWithImages>, PortalError> {
        self.gallery_repo
            .list_events(filter.tenant())
            .await
            .map_err(store_error("list_events"))
    }

    /// Create an event and its images; the first image becomes the cover
    pub async fn create_event(
        &self,
        ctx: &SessionContext,
        event: NewGalleryEvent,
    ) -> Result<GalleryEventWithImages, PortalError> {
        let principal = ctx.require()?;
        let event = validation::validate_new_event(event)?;

        let created = self
            .gallery_repo
            .create_event(&event, principal.tenant)
            .await
            .map_err(store_error("create_event"))?;

        tracing::info!(
            id = %created.event.id,
            tenant = %created.event.tenant,
            images = created.images.len(),
            "gallery event created"
        );
        invalidate_listings(self.invalidator.as_ref(), ListingKind::Gallery).await;
        Ok(created)
    }

    /// Update title or description; cover and images stay untouched
    pub async fn update_event(
        &self,
        ctx: &SessionContext,
        id: Uuid,
        patch: GalleryEventPatch,
    ) -> Result<GalleryEventWithImages, PortalError> {
        ctx.require()?;
        let patch = validation::validate_event_patch(patch)?;

        let updated = self
            .gallery_repo
            .update_event(id, &patch)
            .await
            .map_err(store_error("update_event"))?
            .ok_or_else(|| PortalError::not_found("gallery event", id))?;

        tracing::info!(id = %id, "gallery event updated");
        invalidate_listings(self.invalidator.as_ref(), ListingKind::Gallery).await;
        Ok(updated)
    }

    /// Delete an event together with its images
    pub async fn delete_event(&self, ctx: &SessionContext, id: Uuid) -> Result<(), PortalError> {
        ctx.require()?;

        let removed = self
            .gallery_repo
            .delete_event(id)
            .await
            .map_err(store_error("delete_event"))?;
        if !removed {
            return Err(PortalError::not_found("gallery event", id));
        }

        tracing::info!(id = %id, "gallery event deleted");
        invalidate_listings(self.invalidator.as_ref(), ListingKind::Gallery).await;
        Ok(())
    }

    // ===== Standalone Image Operations =====

    /// List every image, newest first
    pub async fn list_images(&self, filter: TenantFilter) -> Result<Vec<GalleryImage>, PortalError> {
        self.gallery_repo
            .list_images(filter.tenant())
            .await
            .map_err(store_error("list_images"))
    }

    /// Create an image that belongs to no event
    pub async fn create_image(
        &self,
        ctx: &SessionContext,
        image: NewGalleryImage,
    ) -> Result<GalleryImage, PortalError> {
        let principal = ctx.require()?;
        let image = validation::validate_new_image(image)?;

        let created = self
            .gallery_repo
            .create_image(&image, principal.tenant)
            .await
            .map_err(store_error("create_image"))?;

        tracing::info!(id = %created.id, tenant = %created.tenant, "gallery image created");
        invalidate_listings(self.invalidator.as_ref(), ListingKind::Gallery).await;
        Ok(created)
    }

    pub async fn delete_image(&self, ctx: &SessionContext, id: Uuid) -> Result<(), PortalError> {
        ctx.require()?;

        let removed = self
            .gallery_repo
            .delete_image(id)
            .await
            .map_err(store_error("delete_image"))?;
        if !removed {
            return Err(PortalError::not_found("gallery image", id));
        }

        tracing::info!(id = %id, "gallery image deleted");
        invalidate_listings(self.invalidator.as_ref(), ListingKind::Gallery).await;
        Ok(())
    }
}
