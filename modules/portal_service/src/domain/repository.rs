//! Repository traits for data access
//!
//! These traits define the interface for data access operations.
//! Implementations are in infra/storage/repositories.rs

use crate::contract::{
    Category, GalleryEventPatch, GalleryEventWithImages, GalleryImage, MonthlyCount,
    NewGalleryEvent, NewGalleryImage, NewResource, Resource, ResourcePatch, TenantScope,
};
use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Repository for knowledge-hub resources
#[async_trait]
pub trait ResourceRepository: Send + Sync {
    /// Insert a resource owned by `tenant`; id and timestamps are generated by the store
    async fn create(&self, resource: &NewResource, tenant: TenantScope) -> Result<Resource>;

    /// List resources newest first, optionally restricted to one tenant
    async fn list(&self, tenant: Option<TenantScope>) -> Result<Vec<Resource>>;

    /// Apply a patch; `None` when no row has this id
    async fn update(&self, id: Uuid, patch: &ResourcePatch) -> Result<Option<Resource>>;

    /// Hard delete; returns whether a row was removed
    async fn delete(&self, id: Uuid) -> Result<bool>;
}

/// Repository for gallery events and their images
#[async_trait]
pub trait GalleryRepository: Send + Sync {
    /// Insert an event and one image per URL as a single unit
    async fn create_event(
        &self,
        event: &NewGalleryEvent,
        tenant: TenantScope,
    ) -> Result<GalleryEventWithImages>;

    /// List events newest first, each with its images
    async fn list_events(&self, tenant: Option<TenantScope>) -> Result<Vec<GalleryEventWithImages>>;

    async fn update_event(
        &self,
        id: Uuid,
        patch: &GalleryEventPatch,
    ) -> Result<Option<GalleryEventWithImages>>;

    /// Hard delete; owned images go with it
    async fn delete_event(&self, id: Uuid) -> Result<bool>;

    /// Insert a standalone image with no owning event
    async fn create_image(&self, image: &NewGalleryImage, tenant: TenantScope)
        -> Result<GalleryImage>;

    /// List all images newest first
    async fn list_images(&self, tenant: Option<TenantScope>) -> Result<Vec<GalleryImage>>;

    async fn delete_image(&self, id: Uuid) -> Result<bool>;
}

/// Grouped read queries backing the statistics dashboard
#[async_trait]
pub trait StatisticsRepository: Send + Sync {
    async fn count_resources(&self) -> Result<u64>;

    async fn count_images(&self) -> Result<u64>;

    /// Resource counts per category; categories without rows are omitted
    async fn resources_by_category(&self) -> Result<Vec<(Category, u64)>>;

    async fn resources_by_tenant(&self) -> Result<Vec<(TenantScope, u64)>>;

    async fn images_by_tenant(&self) -> Result<Vec<(TenantScope, u64)>>;

    /// Resources created at or after `since`, counted per calendar month
    async fn resource_activity(&self, since: DateTime<Utc>) -> Result<Vec<MonthlyCount>>;

    /// Images created at or after `since`, counted per calendar month
    async fn image_activity(&self, since: DateTime<Utc>) -> Result<Vec<MonthlyCount>>;

    /// Trivial connectivity probe
    async fn ping(&self) -> Result<()>;

    async fn latest_resource_at(&self) -> Result<Option<DateTime<Utc>>>;

    async fn latest_image_at(&self) -> Result<Option<DateTime<Utc>>>;
}
