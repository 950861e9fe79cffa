//! Domain layer - business logic and services

pub mod invalidation;
pub mod repository;
pub mod service;
pub mod session;
pub mod statistics;
pub mod validation;

pub use invalidation::{ListingKind, TracingInvalidator, ViewInvalidator};
pub use repository::{GalleryRepository, ResourceRepository, StatisticsRepository};
pub use service::Service;
pub use session::{SessionGrant, SessionResolver, SESSION_COOKIE};
