#![allow(dead_code, clippy::unwrap_used, clippy::expect_used)]

use blueprint_apigen::config::GeneratorConfig;
use blueprint_apigen::model::{Column, DataType, Entity, RelationKind, Schema};
use chrono::{DateTime, TimeZone, Utc};

/// Clock used by every fixture so example timestamps are stable.
pub fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 12, 12, 5, 32, 50).single().unwrap()
}

pub fn fixed_config() -> GeneratorConfig {
    GeneratorConfig {
        example_timestamp: Some(fixed_now()),
        ..GeneratorConfig::default()
    }
}

pub fn post_entity() -> Entity {
    Entity::new("Post")
        .with_column(Column::new("title", DataType::String))
        .with_column(Column::new("content", DataType::Text))
        .with_column(
            Column::new("status", DataType::Enum).with_values(["draft", "published", "archived"]),
        )
        .with_column(Column::new("published_at", DataType::DateTime).nullable())
        .with_column(Column::new("user_id", DataType::Integer))
        .with_relationship(RelationKind::HasMany, "comments")
        .with_relationship(RelationKind::BelongsToMany, "tags")
        .with_relationship(RelationKind::BelongsTo, "user")
}

pub fn tag_entity() -> Entity {
    Entity::new("Tag")
        .with_column(Column::new("title", DataType::String))
        .with_relationship(RelationKind::HasMany, "posts")
}

pub fn blog_schema() -> Schema {
    Schema::new(vec![post_entity(), tag_entity()])
}

pub const BLOG_DRAFT: &str = r#"
models:
  Post:
    title: string:400
    content: text
    status: enum:draft,published,archived
    published_at: nullable datetime
    user_id: id:user foreign
    relationships:
      belongsTo: user
      hasMany: comments
      belongsToMany: tags
  Tag:
    title: string
    relationships:
      hasMany: posts
controllers:
  Api/Post:
    resource: api
  Api/Tag:
    resource: api
  Admin/Dashboard:
    index: render admin.dashboard
"#;
