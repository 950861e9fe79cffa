//! Portal Service Module
//!
//! Country-scoped content management for a multi-region knowledge portal.
//! Admins log in with a per-country access code and manage knowledge-hub
//! documents and gallery events; the public site lists them, optionally
//! filtered by country, and the dashboard aggregates upload statistics.

// Public exports
pub mod contract;
pub use contract::{
    client::PortalApi, error::PortalError, Category, GalleryEvent, GalleryEventWithImages,
    GalleryImage, Resource, SessionContext, StatisticsSnapshot, TenantFilter, TenantScope,
};

pub mod module;
pub use module::PortalServiceModule;

// Internal modules (hidden from public API)
#[doc(hidden)]
pub mod api;
#[doc(hidden)]
pub mod config;
#[doc(hidden)]
pub mod domain;
#[doc(hidden)]
pub mod infra;
