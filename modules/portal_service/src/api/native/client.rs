//! Native client implementation - wraps domain service for in-process calls

use crate::contract::{
    GalleryEventPatch, GalleryEventWithImages, GalleryImage, NewGalleryEvent, NewGalleryImage,
    NewResource, PortalApi, PortalError, Resource, ResourcePatch, SessionContext,
    StatisticsSnapshot, TenantFilter,
};
use crate::domain::Service;
use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

/// Native client implementation that directly calls the domain service
///
/// Callers supply the session context themselves; gated operations still
/// reject an anonymous context.
#[derive(Clone)]
pub struct NativeClient {
    service: Arc<Service>,
}

impl NativeClient {
    /// Create a new native client
    pub fn new(service: Arc<Service>) -> Self {
        Self { service }
    }
}

#[async_trait]
impl PortalApi for NativeClient {
    async fn list_resources(&self, filter: TenantFilter) -> Result<Vec<Resource>, PortalError> {
        self.service.list_resources(filter).await
    }

    async fn create_resource(
        &self,
        ctx: &SessionContext,
        resource: NewResource,
    ) -> Result<Resource, PortalError> {
        self.service.create_resource(ctx, resource).await
    }

    async fn update_resource(
        &self,
        ctx: &SessionContext,
        id: Uuid,
        patch: ResourcePatch,
    ) -> Result<Resource, PortalError> {
        self.service.update_resource(ctx, id, patch).await
    }

    async fn delete_resource(&self, ctx: &SessionContext, id: Uuid) -> Result<(), PortalError> {
        self.service.delete_resource(ctx, id).await
    }

    async fn list_events(
        &self,
        filter: TenantFilter,
    ) -> Result<Vec<GalleryEventWithImages>, PortalError> {
        self.service.list_events(filter).await
    }

    async fn create_event(
        &self,
        ctx: &SessionContext,
        event: NewGalleryEvent,
    ) -> Result<GalleryEventWithImages, PortalError> {
        self.service.create_event(ctx, event).await
    }

    async fn update_event(
        &self,
        ctx: &SessionContext,
        id: Uuid,
        patch: GalleryEventPatch,
    ) -> Result<GalleryEventWithImages, PortalError> {
        self.service.update_event(ctx, id, patch).await
    }

    async fn delete_event(&self, ctx: &SessionContext, id: Uuid) -> Result<(), PortalError> {
        self.service.delete_event(ctx, id).await
    }

    async fn list_images(&self, filter: TenantFilter) -> Result<Vec<GalleryImage>, PortalError> {
        self.service.list_images(filter).await
    }

    async fn create_image(
        &self,
        ctx: &SessionContext,
        image: NewGalleryImage,
    ) -> Result<GalleryImage, PortalError> {
        self.service.create_image(ctx, image).await
    }

    async fn delete_image(&self, ctx: &SessionContext, id: Uuid) -> Result<(), PortalError> {
        self.service.delete_image(ctx, id).await
    }

    async fn get_statistics(
        &self,
        ctx: &SessionContext,
    ) -> Result<StatisticsSnapshot, PortalError> {
        self.service.get_statistics(ctx).await
    }
}
