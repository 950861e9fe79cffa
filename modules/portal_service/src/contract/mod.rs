//! Contract layer - public API for inter-module communication
//!
//! This layer contains transport-agnostic models and the native client trait.
//! NO serde derives on models - these are pure domain types.

pub mod client;
pub mod error;
pub mod model;

pub use client::PortalApi;
pub use error::{AuthError, PortalError};
pub use model::{
    ActivityPoint, Category, DatabaseStatus, GalleryEvent, GalleryEventPatch,
    GalleryEventWithImages, GalleryImage, MonthlyCount, NamedCount, NewGalleryEvent,
    NewGalleryImage, NewResource, Principal, Resource, ResourcePatch, SessionContext,
    StatisticsCharts, StatisticsSnapshot, SystemHealth, TenantFilter, TenantScope, UploadCounts,
    YearMonth,
};
