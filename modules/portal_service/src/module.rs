//! Module lifecycle: configuration, wiring, migrations and route registration

use crate::api::{native::NativeClient, rest};
use crate::config::Config;
use crate::contract::PortalApi;
use crate::domain::{Service, SessionResolver, TracingInvalidator};
use crate::infra::storage::{
    migrations::Migrator, SeaOrmGalleryRepository, SeaOrmResourceRepository,
    SeaOrmStatisticsRepository,
};
use anyhow::Result;
use parking_lot::RwLock;
use sea_orm::DatabaseConnection;
use sea_orm_migration::MigratorTrait;
use std::sync::Arc;

/// Portal service module
pub struct PortalServiceModule {
    config: RwLock<Config>,
    service: RwLock<Option<Arc<Service>>>,
    sessions: RwLock<Option<Arc<SessionResolver>>>,
}

impl Default for PortalServiceModule {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

impl PortalServiceModule {
    pub fn new(config: Config) -> Self {
        Self {
            config: RwLock::new(config),
            service: RwLock::new(None),
            sessions: RwLock::new(None),
        }
    }

    /// Apply pending schema migrations
    pub async fn migrate(&self, db: &DatabaseConnection) -> Result<()> {
        Migrator::up(db, None).await?;
        tracing::info!("Portal service migrations completed");
        Ok(())
    }

    /// Build repositories and the domain service on top of a database connection
    pub fn init(&self, db: Arc<DatabaseConnection>) -> Result<()> {
        let resource_repo = Arc::new(SeaOrmResourceRepository::new(db.clone()));
        let gallery_repo = Arc::new(SeaOrmGalleryRepository::new(db.clone()));
        let stats_repo = Arc::new(SeaOrmStatisticsRepository::new(db));
        let invalidator = Arc::new(TracingInvalidator);

        let window = self.config.read().activity_window_months;
        let service = Service::new(resource_repo, gallery_repo, stats_repo, invalidator)
            .with_activity_window(window);

        self.init_with_service(Arc::new(service));
        Ok(())
    }

    /// Install an already-built service, e.g. one backed by in-memory repositories
    pub fn init_with_service(&self, service: Arc<Service>) {
        let sessions = Arc::new(SessionResolver::new(&self.config.read()));
        *self.service.write() = Some(service);
        *self.sessions.write() = Some(sessions);

        tracing::info!("Portal service initialized");
    }

    /// In-process client for other modules
    pub fn client(&self) -> Result<Arc<dyn PortalApi>> {
        let service = self.service()?;
        Ok(Arc::new(NativeClient::new(service)))
    }

    /// Mount the public and admin REST routes
    pub fn register_rest(&self, router: axum::Router) -> Result<axum::Router> {
        let service = self.service()?;
        let sessions = self
            .sessions
            .read()
            .as_ref()
            .ok_or_else(|| anyhow::anyhow!("Service not initialized"))?
            .clone();

        let state = Arc::new(rest::ApiState {
            service,
            sessions,
            secure_cookies: self.config.read().secure_cookies,
        });

        tracing::info!("Registering portal service REST routes");
        rest::routes::register_routes(router, state)
    }

    fn service(&self) -> Result<Arc<Service>> {
        self.service
            .read()
            .as_ref()
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("Service not initialized"))
    }
}
