//! SeaORM entities for database tables
//!
//! Tenant scope and category are stored as their literal names; the mapper
//! converts them into contract enums.

/// Knowledge-hub documents
pub mod resource {
    use sea_orm::entity::prelude::*;

    #[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
    #[sea_orm(table_name = "resources")]
    pub struct Model {
        #[sea_orm(primary_key, auto_increment = false)]
        pub id: Uuid,

        pub title: String,

        #[sea_orm(column_type = "Text", nullable)]
        pub description: Option<String>,

        /// Category display name ("Case Study", ...)
        pub category: String,

        /// Tenant scope literal
        #[sea_orm(indexed)]
        pub country: String,

        pub file_url: String,

        #[sea_orm(nullable)]
        pub file_size: Option<String>,

        #[sea_orm(indexed)]
        pub created_at: DateTimeUtc,

        pub updated_at: DateTimeUtc,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {}

    impl ActiveModelBehavior for ActiveModel {}
}

/// Named photo collections
pub mod gallery_event {
    use sea_orm::entity::prelude::*;

    #[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
    #[sea_orm(table_name = "gallery_events")]
    pub struct Model {
        #[sea_orm(primary_key, auto_increment = false)]
        pub id: Uuid,

        pub title: String,

        #[sea_orm(column_type = "Text", nullable)]
        pub description: Option<String>,

        #[sea_orm(indexed)]
        pub country: String,

        /// URL of the first image supplied at creation
        pub cover_image: String,

        #[sea_orm(indexed)]
        pub created_at: DateTimeUtc,

        pub updated_at: DateTimeUtc,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {
        /// One-to-many relationship with images
        #[sea_orm(has_many = "super::gallery_image::Entity")]
        Images,
    }

    impl Related<super::gallery_image::Entity> for Entity {
        fn to() -> RelationDef {
            Relation::Images.def()
        }
    }

    impl ActiveModelBehavior for ActiveModel {}
}

/// Gallery photos; `event_id` is null for legacy standalone images
pub mod gallery_image {
    use sea_orm::entity::prelude::*;

    #[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
    #[sea_orm(table_name = "gallery_images")]
    pub struct Model {
        #[sea_orm(primary_key, auto_increment = false)]
        pub id: Uuid,

        #[sea_orm(indexed, nullable)]
        pub event_id: Option<Uuid>,

        #[sea_orm(nullable)]
        pub title: Option<String>,

        #[sea_orm(indexed)]
        pub country: String,

        pub image_url: String,

        #[sea_orm(indexed)]
        pub created_at: DateTimeUtc,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {
        /// Foreign key to gallery_events, cascading on delete
        #[sea_orm(
            belongs_to = "super::gallery_event::Entity",
            from = "Column::EventId",
            to = "super::gallery_event::Column::Id",
            on_delete = "Cascade"
        )]
        Event,
    }

    impl Related<super::gallery_event::Entity> for Entity {
        fn to() -> RelationDef {
            Relation::Event.def()
        }
    }

    impl ActiveModelBehavior for ActiveModel {}
}
