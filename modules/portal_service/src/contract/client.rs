//! Native client trait for inter-module communication
//!
//! Other modules (e.g. the public site renderer) call the portal through this
//! trait instead of HTTP.

use super::{
    error::PortalError,
    model::{
        GalleryEventPatch, GalleryEventWithImages, GalleryImage, NewGalleryEvent,
        NewGalleryImage, NewResource, Resource, ResourcePatch, SessionContext,
        StatisticsSnapshot, TenantFilter,
    },
};
use async_trait::async_trait;
use uuid::Uuid;

/// Portal service API for inter-module communication
#[async_trait]
pub trait PortalApi: Send + Sync {
    // ===== Resource Operations =====

    /// List resources, newest first
    async fn list_resources(&self, filter: TenantFilter) -> Result<Vec<Resource>, PortalError>;

    async fn create_resource(
        &self,
        ctx: &SessionContext,
        resource: NewResource,
    ) -> Result<Resource, PortalError>;

    async fn update_resource(
        &self,
        ctx: &SessionContext,
        id: Uuid,
        patch: ResourcePatch,
    ) -> Result<Resource, PortalError>;

    async fn delete_resource(&self, ctx: &SessionContext, id: Uuid) -> Result<(), PortalError>;

    // ===== Gallery Operations =====

    /// List gallery events with their images, newest first
    async fn list_events(
        &self,
        filter: TenantFilter,
    ) -> Result<Vec<GalleryEventWithImages>, PortalError>;

    async fn create_event(
        &self,
        ctx: &SessionContext,
        event: NewGalleryEvent,
    ) -> Result<GalleryEventWithImages, PortalError>;

    async fn update_event(
        &self,
        ctx: &SessionContext,
        id: Uuid,
        patch: GalleryEventPatch,
    ) -> Result<GalleryEventWithImages, PortalError>;

    /// Delete an event and every image it owns
    async fn delete_event(&self, ctx: &SessionContext, id: Uuid) -> Result<(), PortalError>;

    /// List images regardless of owning event, newest first
    async fn list_images(&self, filter: TenantFilter) -> Result<Vec<GalleryImage>, PortalError>;

    async fn create_image(
        &self,
        ctx: &SessionContext,
        image: NewGalleryImage,
    ) -> Result<GalleryImage, PortalError>;

    async fn delete_image(&self, ctx: &SessionContext, id: Uuid) -> Result<(), PortalError>;

    // ===== Statistics =====

    async fn get_statistics(&self, ctx: &SessionContext)
        -> Result<StatisticsSnapshot, PortalError>;
}
