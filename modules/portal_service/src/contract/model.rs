//! Contract models for the portal service
//!
//! These models are transport-agnostic and used for inter-module communication.
//! NO serde derives - these are pure domain models.

use chrono::{DateTime, Datelike, TimeZone, Utc};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use super::error::PortalError;

/// Region partition that sessions and stored rows belong to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TenantScope {
    Kenya,
    Uganda,
    Tanzania,
    /// Super scope; rows created under it are recorded as `Global`
    Global,
}

impl TenantScope {
    /// Every scope in reporting order
    pub const ALL: [TenantScope; 4] = [
        TenantScope::Kenya,
        TenantScope::Uganda,
        TenantScope::Tanzania,
        TenantScope::Global,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TenantScope::Kenya => "Kenya",
            TenantScope::Uganda => "Uganda",
            TenantScope::Tanzania => "Tanzania",
            TenantScope::Global => "Global",
        }
    }
}

impl fmt::Display for TenantScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TenantScope {
    type Err = PortalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TenantScope::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| PortalError::Validation {
                message: format!("unknown country '{}'", s),
            })
    }
}

/// Tenant restriction applied to public listings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TenantFilter {
    /// No restriction
    #[default]
    All,
    /// Only rows stored under the given tenant
    Only(TenantScope),
}

impl TenantFilter {
    /// Sentinel accepted in place of a tenant name
    pub const ALL_SENTINEL: &'static str = "All";

    /// Parse an optional query value; absent, empty and "All" mean no restriction
    pub fn parse(value: Option<&str>) -> Result<Self, PortalError> {
        match value.map(str::trim) {
            None | Some("") | Some(Self::ALL_SENTINEL) => Ok(TenantFilter::All),
            Some(name) => name.parse().map(TenantFilter::Only),
        }
    }

    pub fn tenant(&self) -> Option<TenantScope> {
        match self {
            TenantFilter::All => None,
            TenantFilter::Only(t) => Some(*t),
        }
    }
}

/// Knowledge-hub document category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub enum Category {
    Report,
    CaseStudy,
    Policy,
    Manual,
    #[default]
    Other,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::Report,
        Category::CaseStudy,
        Category::Policy,
        Category::Manual,
        Category::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Report => "Report",
            Category::CaseStudy => "Case Study",
            Category::Policy => "Policy",
            Category::Manual => "Manual",
            Category::Other => "Other",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = PortalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| PortalError::Validation {
                message: format!("unknown category '{}'", s),
            })
    }
}

/// Knowledge-hub document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resource {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub category: Category,
    pub tenant: TenantScope,
    /// Location of the uploaded PDF
    pub file_url: String,
    /// Display size, e.g. "2.35 MB"
    pub file_size: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Payload for a new resource; the tenant comes from the session
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NewResource {
    pub title: String,
    pub description: Option<String>,
    pub category: Category,
    pub file_url: String,
    pub file_size: Option<String>,
}

/// Mutable resource fields; `None` leaves the stored value untouched
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ResourcePatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub category: Option<Category>,
}

/// Photo collection with a cover image
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GalleryEvent {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub tenant: TenantScope,
    /// First image supplied at creation
    pub cover_image: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Single gallery photo; legacy standalone images have no event
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GalleryImage {
    pub id: Uuid,
    pub event_id: Option<Uuid>,
    pub title: Option<String>,
    pub tenant: TenantScope,
    pub image_url: String,
    pub created_at: DateTime<Utc>,
}

/// Event together with every image it owns
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GalleryEventWithImages {
    pub event: GalleryEvent,
    pub images: Vec<GalleryImage>,
}

/// Payload for a new event; at least one image URL is required
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NewGalleryEvent {
    pub title: String,
    pub description: Option<String>,
    pub image_urls: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GalleryEventPatch {
    pub title: Option<String>,
    pub description: Option<String>,
}

/// Payload for a standalone image
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NewGalleryImage {
    pub title: Option<String>,
    pub image_url: String,
}

/// Authenticated identity resolved from a session credential
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Principal {
    pub tenant: TenantScope,
}

/// Per-request authentication context passed into every gated operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SessionContext {
    principal: Option<Principal>,
}

impl SessionContext {
    /// Context without a valid session
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// Context for a resolved tenant
    pub fn authenticated(tenant: TenantScope) -> Self {
        Self {
            principal: Some(Principal { tenant }),
        }
    }

    /// The principal, or `Unauthorized` when there is no session
    pub fn require(&self) -> Result<&Principal, PortalError> {
        self.principal.as_ref().ok_or(PortalError::Unauthorized)
    }
}

impl From<Option<Principal>> for SessionContext {
    fn from(principal: Option<Principal>) -> Self {
        Self { principal }
    }
}

/// Calendar month used as the activity grouping key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct YearMonth {
    pub year: i32,
    /// 1-based month
    pub month: u32,
}

impl YearMonth {
    const ABBREVIATIONS: [&'static str; 12] = [
        "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
    ];

    pub fn new(year: i32, month: u32) -> Self {
        Self { year, month }
    }

    pub fn of(instant: DateTime<Utc>) -> Self {
        Self::new(instant.year(), instant.month())
    }

    /// English three-letter abbreviation, e.g. "Dec"
    pub fn label(&self) -> &'static str {
        Self::ABBREVIATIONS[(self.month.clamp(1, 12) - 1) as usize]
    }

    /// Midnight UTC on the first day of the month
    pub fn start(&self) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(self.year, self.month, 1, 0, 0, 0)
            .single()
            .unwrap_or(DateTime::UNIX_EPOCH)
    }
}

/// Row count for one calendar month
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthlyCount {
    pub month: YearMonth,
    pub count: u64,
}

/// Name/value pair used by the dashboard charts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamedCount {
    pub name: String,
    pub value: u64,
}

/// One point of the activity chart
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivityPoint {
    /// Month abbreviation
    pub name: String,
    /// Start of the month
    pub date: DateTime<Utc>,
    pub value: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct UploadCounts {
    pub resources: u64,
    pub gallery: u64,
    pub total_uploads: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StatisticsCharts {
    pub by_category: Vec<NamedCount>,
    pub by_country: Vec<NamedCount>,
    pub activity: Vec<ActivityPoint>,
}

/// Outcome of the store connectivity probe
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatabaseStatus {
    Connected,
    Error,
}

impl DatabaseStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            DatabaseStatus::Connected => "Connected",
            DatabaseStatus::Error => "Error",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SystemHealth {
    pub database: DatabaseStatus,
    /// Latest upload; the epoch when both tables are empty, absent when the probe failed
    pub last_activity: Option<DateTime<Utc>>,
    pub version: String,
    pub status: String,
}

/// Dashboard statistics
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatisticsSnapshot {
    pub counts: UploadCounts,
    pub charts: StatisticsCharts,
    pub health: SystemHealth,
}
