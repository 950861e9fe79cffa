//! Database migrations for the portal service

use sea_orm_migration::prelude::*;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250101_000001_create_resources::Migration),
            Box::new(m20250101_000002_create_gallery::Migration),
        ]
    }
}

mod m20250101_000001_create_resources {
    use super::*;

    pub struct Migration;

    // Recorded in seaql_migrations; must stay unique and never change
    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20250101_000001_create_resources"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Resources::Table)
                        .if_not_exists()
                        .col(ColumnDef::new(Resources::Id).uuid().not_null().primary_key())
                        .col(ColumnDef::new(Resources::Title).text().not_null())
                        .col(ColumnDef::new(Resources::Description).text())
                        .col(
                            ColumnDef::new(Resources::Category)
                                .string()
                                .not_null()
                                .default("Other"),
                        )
                        .col(
                            ColumnDef::new(Resources::Country)
                                .string()
                                .not_null()
                                .default("Global"),
                        )
                        .col(ColumnDef::new(Resources::FileUrl).text().not_null())
                        .col(ColumnDef::new(Resources::FileSize).string())
                        .col(
                            ColumnDef::new(Resources::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null()
                                .default(Expr::current_timestamp()),
                        )
                        .col(
                            ColumnDef::new(Resources::UpdatedAt)
                                .timestamp_with_time_zone()
                                .not_null()
                                .default(Expr::current_timestamp()),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .name("idx_resources_country")
                        .table(Resources::Table)
                        .col(Resources::Country)
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .name("idx_resources_created_at")
                        .table(Resources::Table)
                        .col(Resources::CreatedAt)
                        .to_owned(),
                )
                .await?;

            Ok(())
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Resources::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    enum Resources {
        Table,
        Id,
        Title,
        Description,
        Category,
        Country,
        FileUrl,
        FileSize,
        CreatedAt,
        UpdatedAt,
    }
}

mod m20250101_000002_create_gallery {
    use super::*;

    pub struct Migration;

    // Recorded in seaql_migrations; must stay unique and never change
    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20250101_000002_create_gallery"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(GalleryEvents::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(GalleryEvents::Id)
                                .uuid()
                                .not_null()
                                .primary_key(),
                        )
                        .col(ColumnDef::new(GalleryEvents::Title).text().not_null())
                        .col(ColumnDef::new(GalleryEvents::Description).text())
                        .col(
                            ColumnDef::new(GalleryEvents::Country)
                                .string()
                                .not_null()
                                .default("Global"),
                        )
                        .col(ColumnDef::new(GalleryEvents::CoverImage).text().not_null())
                        .col(
                            ColumnDef::new(GalleryEvents::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null()
                                .default(Expr::current_timestamp()),
                        )
                        .col(
                            ColumnDef::new(GalleryEvents::UpdatedAt)
                                .timestamp_with_time_zone()
                                .not_null()
                                .default(Expr::current_timestamp()),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(GalleryImages::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(GalleryImages::Id)
                                .uuid()
                                .not_null()
                                .primary_key(),
                        )
                        .col(ColumnDef::new(GalleryImages::EventId).uuid())
                        .col(ColumnDef::new(GalleryImages::Title).text())
                        .col(
                            ColumnDef::new(GalleryImages::Country)
                                .string()
                                .not_null()
                                .default("Global"),
                        )
                        .col(ColumnDef::new(GalleryImages::ImageUrl).text().not_null())
                        .col(
                            ColumnDef::new(GalleryImages::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null()
                                .default(Expr::current_timestamp()),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_gallery_images_event")
                                .from(GalleryImages::Table, GalleryImages::EventId)
                                .to(GalleryEvents::Table, GalleryEvents::Id)
                                .on_delete(ForeignKeyAction::Cascade)
                                .on_update(ForeignKeyAction::Cascade),
                        )
                        .to_owned(),
                )
                .await?;

            // Create indexes
            manager
                .create_index(
                    Index::create()
                        .name("idx_gallery_events_country")
                        .table(GalleryEvents::Table)
                        .col(GalleryEvents::Country)
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .name("idx_gallery_images_event_id")
                        .table(GalleryImages::Table)
                        .col(GalleryImages::EventId)
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .name("idx_gallery_images_country")
                        .table(GalleryImages::Table)
                        .col(GalleryImages::Country)
                        .to_owned(),
                )
                .await?;

            Ok(())
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(GalleryImages::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(GalleryEvents::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    enum GalleryEvents {
        Table,
        Id,
        Title,
        Description,
        Country,
        CoverImage,
        CreatedAt,
        UpdatedAt,
    }

    #[derive(DeriveIden)]
    enum GalleryImages {
        Table,
        Id,
        EventId,
        Title,
        Country,
        ImageUrl,
        CreatedAt,
    }
}
