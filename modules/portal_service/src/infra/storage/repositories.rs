//! SeaORM repository implementations

use crate::contract::{
    Category, GalleryEventPatch, GalleryEventWithImages, GalleryImage, MonthlyCount,
    NewGalleryEvent, NewGalleryImage, NewResource, Resource, ResourcePatch, TenantScope,
};
use crate::domain::repository::{GalleryRepository, ResourceRepository, StatisticsRepository};
use crate::domain::statistics::bucket_by_month;
use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::{
    prelude::Expr, ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection,
    EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Statement,
    TransactionTrait,
};
use std::collections::HashMap;
use std::sync::Arc;
use uuid::Uuid;

use super::entity::{gallery_event, gallery_image, resource};
use super::mapper::{event_with_images, parse_category, parse_tenant};

/// Empty patch descriptions clear the stored value
fn patched_description(description: &str) -> Option<String> {
    (!description.is_empty()).then(|| description.to_string())
}

// ===== Resource Repository =====

pub struct SeaOrmResourceRepository {
    db: Arc<DatabaseConnection>,
}

impl SeaOrmResourceRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ResourceRepository for SeaOrmResourceRepository {
    async fn create(&self, resource: &NewResource, tenant: TenantScope) -> Result<Resource> {
        use sea_orm::ActiveValue::Set;

        let now = Utc::now();
        let active = resource::ActiveModel {
            id: Set(Uuid::new_v4()),
            title: Set(resource.title.clone()),
            description: Set(resource.description.clone()),
            category: Set(resource.category.as_str().to_string()),
            country: Set(tenant.as_str().to_string()),
            file_url: Set(resource.file_url.clone()),
            file_size: Set(resource.file_size.clone()),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let result = resource::Entity::insert(active)
            .exec_with_returning(&*self.db)
            .await?;

        result.try_into()
    }

    async fn list(&self, tenant: Option<TenantScope>) -> Result<Vec<Resource>> {
        let mut query = resource::Entity::find();

        if let Some(tenant) = tenant {
            query = query.filter(resource::Column::Country.eq(tenant.as_str()));
        }

        let results = query
            .order_by_desc(resource::Column::CreatedAt)
            .all(&*self.db)
            .await?;

        results.into_iter().map(Resource::try_from).collect()
    }

    async fn update(&self, id: Uuid, patch: &ResourcePatch) -> Result<Option<Resource>> {
        use sea_orm::ActiveValue::Set;

        let Some(existing) = resource::Entity::find_by_id(id).one(&*self.db).await? else {
            return Ok(None);
        };

        let mut active: resource::ActiveModel = existing.into();
        if let Some(title) = &patch.title {
            active.title = Set(title.clone());
        }
        if let Some(description) = &patch.description {
            active.description = Set(patched_description(description));
        }
        if let Some(category) = patch.category {
            active.category = Set(category.as_str().to_string());
        }
        active.updated_at = Set(Utc::now());

        let updated = active.update(&*self.db).await?;
        Ok(Some(updated.try_into()?))
    }

    async fn delete(&self, id: Uuid) -> Result<bool> {
        let result = resource::Entity::delete_by_id(id).exec(&*self.db).await?;
        Ok(result.rows_affected > 0)
    }
}

// ===== Gallery Repository =====

pub struct SeaOrmGalleryRepository {
    db: Arc<DatabaseConnection>,
}

impl SeaOrmGalleryRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    async fn images_of(&self, event: gallery_event::Model) -> Result<GalleryEventWithImages> {
        let images = gallery_image::Entity::find()
            .filter(gallery_image::Column::EventId.eq(event.id))
            .all(&*self.db)
            .await?;
        event_with_images(event, images)
    }
}

#[async_trait]
impl GalleryRepository for SeaOrmGalleryRepository {
    async fn create_event(
        &self,
        event: &NewGalleryEvent,
        tenant: TenantScope,
    ) -> Result<GalleryEventWithImages> {
        use sea_orm::ActiveValue::Set;

        let cover_image = event
            .image_urls
            .first()
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("gallery event needs at least one image"))?;

        let now = Utc::now();
        let event_id = Uuid::new_v4();

        // Event and images commit together; dropping `txn` on error rolls back
        let txn = self.db.begin().await?;

        let created = gallery_event::Entity::insert(gallery_event::ActiveModel {
            id: Set(event_id),
            title: Set(event.title.clone()),
            description: Set(event.description.clone()),
            country: Set(tenant.as_str().to_string()),
            cover_image: Set(cover_image),
            created_at: Set(now),
            updated_at: Set(now),
        })
        .exec_with_returning(&txn)
        .await?;

        let mut images = Vec::with_capacity(event.image_urls.len());
        for url in &event.image_urls {
            let image = gallery_image::Entity::insert(gallery_image::ActiveModel {
                id: Set(Uuid::new_v4()),
                event_id: Set(Some(event_id)),
                title: Set(None),
                country: Set(tenant.as_str().to_string()),
                image_url: Set(url.clone()),
                created_at: Set(now),
            })
            .exec_with_returning(&txn)
            .await?;
            images.push(image);
        }

        txn.commit().await?;

        event_with_images(created, images)
    }

    async fn list_events(&self, tenant: Option<TenantScope>) -> Result<Vec<GalleryEventWithImages>> {
        let mut query = gallery_event::Entity::find();

        if let Some(tenant) = tenant {
            query = query.filter(gallery_event::Column::Country.eq(tenant.as_str()));
        }

        let events = query
            .order_by_desc(gallery_event::Column::CreatedAt)
            .all(&*self.db)
            .await?;
        if events.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<Uuid> = events.iter().map(|e| e.id).collect();
        let mut images_by_event: HashMap<Uuid, Vec<gallery_image::Model>> = HashMap::new();
        for image in gallery_image::Entity::find()
            .filter(gallery_image::Column::EventId.is_in(ids))
            .all(&*self.db)
            .await?
        {
            if let Some(event_id) = image.event_id {
                images_by_event.entry(event_id).or_default().push(image);
            }
        }

        events
            .into_iter()
            .map(|event| {
                let images = images_by_event.remove(&event.id).unwrap_or_default();
                event_with_images(event, images)
            })
            .collect()
    }

    async fn update_event(
        &self,
        id: Uuid,
        patch: &GalleryEventPatch,
    ) -> Result<Option<GalleryEventWithImages>> {
        use sea_orm::ActiveValue::Set;

        let Some(existing) = gallery_event::Entity::find_by_id(id).one(&*self.db).await? else {
            return Ok(None);
        };

        let mut active: gallery_event::ActiveModel = existing.into();
        if let Some(title) = &patch.title {
            active.title = Set(title.clone());
        }
        if let Some(description) = &patch.description {
            active.description = Set(patched_description(description));
        }
        active.updated_at = Set(Utc::now());

        let updated = active.update(&*self.db).await?;
        Ok(Some(self.images_of(updated).await?))
    }

    async fn delete_event(&self, id: Uuid) -> Result<bool> {
        // Owned images are removed by the foreign key's ON DELETE CASCADE
        let result = gallery_event::Entity::delete_by_id(id).exec(&*self.db).await?;
        Ok(result.rows_affected > 0)
    }

    async fn create_image(
        &self,
        image: &NewGalleryImage,
        tenant: TenantScope,
    ) -> Result<GalleryImage> {
        use sea_orm::ActiveValue::Set;

        let active = gallery_image::ActiveModel {
            id: Set(Uuid::new_v4()),
            event_id: Set(None),
            title: Set(image.title.clone()),
            country: Set(tenant.as_str().to_string()),
            image_url: Set(image.image_url.clone()),
            created_at: Set(Utc::now()),
        };

        let result = gallery_image::Entity::insert(active)
            .exec_with_returning(&*self.db)
            .await?;

        result.try_into()
    }

    async fn list_images(&self, tenant: Option<TenantScope>) -> Result<Vec<GalleryImage>> {
        let mut query = gallery_image::Entity::find();

        if let Some(tenant) = tenant {
            query = query.filter(gallery_image::Column::Country.eq(tenant.as_str()));
        }

        let results = query
            .order_by_desc(gallery_image::Column::CreatedAt)
            .all(&*self.db)
            .await?;

        results.into_iter().map(GalleryImage::try_from).collect()
    }

    async fn delete_image(&self, id: Uuid) -> Result<bool> {
        let result = gallery_image::Entity::delete_by_id(id).exec(&*self.db).await?;
        Ok(result.rows_affected > 0)
    }
}

// ===== Statistics Repository =====

pub struct SeaOrmStatisticsRepository {
    db: Arc<DatabaseConnection>,
}

impl SeaOrmStatisticsRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

/// Convert `(literal, count)` rows from a GROUP BY into typed pairs
fn typed_counts<T>(
    rows: Vec<(String, i64)>,
    parse: impl Fn(&str) -> Result<T>,
) -> Result<Vec<(T, u64)>> {
    rows.into_iter()
        .map(|(name, count)| Ok((parse(&name)?, u64::try_from(count)?)))
        .collect()
}

#[async_trait]
impl StatisticsRepository for SeaOrmStatisticsRepository {
    async fn count_resources(&self) -> Result<u64> {
        Ok(resource::Entity::find().count(&*self.db).await?)
    }

    async fn count_images(&self) -> Result<u64> {
        Ok(gallery_image::Entity::find().count(&*self.db).await?)
    }

    async fn resources_by_category(&self) -> Result<Vec<(Category, u64)>> {
        let rows = resource::Entity::find()
            .select_only()
            .column(resource::Column::Category)
            .column_as(Expr::col(resource::Column::Id).count(), "value")
            .group_by(resource::Column::Category)
            .into_tuple::<(String, i64)>()
            .all(&*self.db)
            .await?;

        typed_counts(rows, parse_category)
    }

    async fn resources_by_tenant(&self) -> Result<Vec<(TenantScope, u64)>> {
        let rows = resource::Entity::find()
            .select_only()
            .column(resource::Column::Country)
            .column_as(Expr::col(resource::Column::Id).count(), "value")
            .group_by(resource::Column::Country)
            .into_tuple::<(String, i64)>()
            .all(&*self.db)
            .await?;

        typed_counts(rows, parse_tenant)
    }

    async fn images_by_tenant(&self) -> Result<Vec<(TenantScope, u64)>> {
        let rows = gallery_image::Entity::find()
            .select_only()
            .column(gallery_image::Column::Country)
            .column_as(Expr::col(gallery_image::Column::Id).count(), "value")
            .group_by(gallery_image::Column::Country)
            .into_tuple::<(String, i64)>()
            .all(&*self.db)
            .await?;

        typed_counts(rows, parse_tenant)
    }

    async fn resource_activity(&self, since: DateTime<Utc>) -> Result<Vec<MonthlyCount>> {
        // Bucketed in process so the same query runs on Postgres and SQLite
        let created = resource::Entity::find()
            .select_only()
            .column(resource::Column::CreatedAt)
            .filter(resource::Column::CreatedAt.gte(since))
            .into_tuple::<DateTime<Utc>>()
            .all(&*self.db)
            .await?;

        Ok(bucket_by_month(created))
    }

    async fn image_activity(&self, since: DateTime<Utc>) -> Result<Vec<MonthlyCount>> {
        let created = gallery_image::Entity::find()
            .select_only()
            .column(gallery_image::Column::CreatedAt)
            .filter(gallery_image::Column::CreatedAt.gte(since))
            .into_tuple::<DateTime<Utc>>()
            .all(&*self.db)
            .await?;

        Ok(bucket_by_month(created))
    }

    async fn ping(&self) -> Result<()> {
        let backend = self.db.get_database_backend();
        self.db
            .execute(Statement::from_string(backend, "SELECT 1"))
            .await?;
        Ok(())
    }

    async fn latest_resource_at(&self) -> Result<Option<DateTime<Utc>>> {
        Ok(resource::Entity::find()
            .order_by_desc(resource::Column::CreatedAt)
            .one(&*self.db)
            .await?
            .map(|r| r.created_at))
    }

    async fn latest_image_at(&self) -> Result<Option<DateTime<Utc>>> {
        Ok(gallery_image::Entity::find()
            .order_by_desc(gallery_image::Column::CreatedAt)
            .one(&*self.db)
            .await?
            .map(|i| i.created_at))
    }
}
