#![allow(clippy::unwrap_used, clippy::expect_used)]

use super::allow_list::render_filters;
use super::naming::{camel, class_basename, headline, human_title, plural, singular, snake, studly};
use super::*;
use crate::config::{EnumNaming, GeneratorConfig};
use crate::model::{Column, DataType, Entity, RelationKind};

fn post() -> Entity {
    Entity::new("Post")
        .with_column(Column::new("id", DataType::Id))
        .with_column(Column::new("title", DataType::String))
        .with_column(Column::new("content", DataType::LongText))
        .with_column(Column::new("status", DataType::Enum).with_values(["draft", "published"]))
        .with_column(Column::new("user_id", DataType::UnsignedBigInteger))
        .with_column(Column::new("published_at", DataType::Timestamp).nullable())
        .with_relationship(RelationKind::HasMany, "Comment")
        .with_relationship(RelationKind::BelongsToMany, "Tag")
        .with_relationship(RelationKind::BelongsTo, "User")
}

#[test]
fn test_case_conversions() {
    assert_eq!(studly("user_profile"), "UserProfile");
    assert_eq!(camel("user_profile"), "userProfile");
    assert_eq!(camel("Comment"), "comment");
    assert_eq!(snake("UserProfile"), "user_profile");
    assert_eq!(human_title("published_at"), "Published At");
    assert_eq!(headline("BlogPost"), "Blog Post");
    assert_eq!(class_basename("App\\Enums\\PostStatus"), "PostStatus");
    assert_eq!(class_basename("Plain"), "Plain");
}

#[test]
fn test_singular_and_plural() {
    assert_eq!(singular("comments"), "comment");
    assert_eq!(singular("Categories"), "Category");
    assert_eq!(singular("BlogPosts"), "BlogPost");
    assert_eq!(singular("statuses"), "status");
    assert_eq!(singular("people"), "person");
    assert_eq!(plural("comment"), "comments");
    assert_eq!(plural("Category"), "Categories");
    assert_eq!(plural("status"), "statuses");
    assert_eq!(plural("box"), "boxes");
    assert_eq!(plural("person"), "people");
    assert_eq!(plural("news"), "news");

    assert_eq!(singular("movies"), "movie");
    assert_eq!(singular("Cookies"), "Cookie");
    assert_eq!(singular("heroes"), "hero");
    assert_eq!(singular("FeaturedMovies"), "FeaturedMovie");
    assert_eq!(singular("movie"), "movie");
    assert_eq!(plural("movie"), "movies");
    assert_eq!(plural("hero"), "heroes");
    assert_eq!(plural("day"), "days");
    assert_eq!(plural("photo"), "photos");
}

#[test]
fn test_plural_is_idempotent() {
    for word in [
        "posts",
        "comments",
        "tags",
        "categories",
        "people",
        "Boxes",
        "BlogPosts",
        "movies",
        "heroes",
    ] {
        assert_eq!(plural(word), word, "plural({word})");
    }
}

#[test]
fn test_map_type_families() {
    let cases = [
        (DataType::Id, "int", "integer"),
        (DataType::BigInteger, "int", "integer"),
        (DataType::Decimal, "float", "number"),
        (DataType::Double, "float", "number"),
        (DataType::Boolean, "bool", "boolean"),
        (DataType::Json, "array", "object"),
        (DataType::Jsonb, "array", "object"),
        (DataType::String, "string", "string"),
        (DataType::Other("uuid".to_string()), "string", "string"),
    ];
    for (ty, target, doc) in cases {
        let mapped = map_type("value", &ty);
        assert_eq!(mapped.target.as_str(), target, "{ty:?}");
        assert_eq!(mapped.doc.as_str(), doc, "{ty:?}");
        assert_eq!(mapped.format, None);
    }

    let date = map_type("published_at", &DataType::DateTime);
    assert_eq!(date.target, TargetType::DateTime);
    assert_eq!(date.doc, DocType::String);
    assert_eq!(date.format, Some("date-time"));

    assert_eq!(map_type("status", &DataType::Enum).target, TargetType::Enum);
}

#[test]
fn test_foreign_keys_are_always_integers() {
    for ty in [DataType::String, DataType::Other("uuid".into()), DataType::Json] {
        let mapped = map_type("author_id", &ty);
        assert_eq!(mapped.target, TargetType::Int);
        assert_eq!(mapped.doc, DocType::Integer);
    }
}

#[test]
fn test_allowed_filters_exact_then_partial() {
    let filters = allowed_filters(Some(&post()));
    assert_eq!(
        filters,
        vec![
            FilterEntry::Exact("status".into()),
            FilterEntry::Exact("user_id".into()),
            FilterEntry::Partial("title".into()),
            FilterEntry::Partial("content".into()),
        ]
    );
}

#[test]
fn test_allowed_filter_import_removed_when_unused() {
    let mut imports = ImportRegistry::new();
    imports.add("Spatie\\QueryBuilder\\AllowedFilter");
    imports.add("Illuminate\\Http\\JsonResponse");

    let tag = Entity::new("Tag").with_column(Column::new("title", DataType::String));
    let rendered = render_filters(&allowed_filters(Some(&tag)), &mut imports);
    assert_eq!(rendered, "['title']");
    assert!(!imports.contains("Spatie\\QueryBuilder\\AllowedFilter"));
    assert!(imports.contains("Illuminate\\Http\\JsonResponse"));

    let mut imports = ImportRegistry::new();
    imports.add("Spatie\\QueryBuilder\\AllowedFilter");
    assert_eq!(render_filters(&allowed_filters(None), &mut imports), "[]");
    assert!(imports.is_empty());
}

#[test]
fn test_allowed_sorts() {
    assert_eq!(
        allowed_sorts(Some(&post())),
        vec!["created_at", "published_at", "title", "id"]
    );
    assert_eq!(allowed_sorts(None), vec!["created_at", "id"]);

    let bare = Entity::new("Setting")
        .without_timestamps()
        .with_column(Column::new("value", DataType::Text));
    assert_eq!(allowed_sorts(Some(&bare)), vec!["id"]);

    let explicit = Entity::new("Page")
        .with_column(Column::new("name", DataType::String))
        .with_column(Column::new("updated_at", DataType::Timestamp));
    assert_eq!(
        allowed_sorts(Some(&explicit)),
        vec!["created_at", "updated_at", "name", "id"]
    );
}

#[test]
fn test_allowed_includes_dedup_in_kind_order() {
    assert_eq!(
        allowed_includes(Some(&post())),
        vec!["user", "comment", "tag"]
    );

    let dup = Entity::new("Post")
        .with_relationship(RelationKind::HasMany, "comments")
        .with_relationship(RelationKind::MorphMany, "comments");
    assert_eq!(allowed_includes(Some(&dup)), vec!["comments"]);
    assert!(allowed_includes(Some(&Entity::new("Lonely"))).is_empty());
    assert!(allowed_includes(None).is_empty());
}

#[test]
fn test_format_array_shapes() {
    let empty: [&str; 0] = [];
    assert_eq!(format_array(&empty, true), "[]");
    assert_eq!(format_array(&["id"], true), "['id']");
    assert_eq!(
        format_array(&["created_at", "id"], true),
        "[\n            'created_at',\n            'id',\n        ]"
    );
    assert_eq!(
        format_array(&["AllowedFilter::exact('status')"], false),
        "[AllowedFilter::exact('status')]"
    );
}

#[test]
fn test_enum_resolution_order() {
    let mut config = GeneratorConfig::default();
    config
        .enum_classes
        .insert("Post.kind".to_string(), "Domain\\PostKind".to_string());
    let resolver = EnumResolver::new(&config);
    let entity = Entity::new("Post");

    let declared = Column::new("status", DataType::Enum)
        .with_attribute("enum_class", serde_json::json!("Custom\\Status"));
    assert_eq!(resolver.resolve(&entity, &declared), "Custom\\Status");

    let mapped = Column::new("kind", DataType::Enum);
    assert_eq!(resolver.resolve(&entity, &mapped), "Domain\\PostKind");

    let suffixed = Column::new("payment_status", DataType::Enum);
    assert_eq!(resolver.resolve(&entity, &suffixed), "App\\Enums\\PaymentStatus");

    let plain = Column::new("visibility", DataType::Enum);
    assert_eq!(resolver.resolve(&entity, &plain), "App\\Enums\\PostVisibility");
}

#[test]
fn test_entity_qualified_enum_naming() {
    let config = GeneratorConfig {
        enum_naming: EnumNaming::EntityQualified,
        ..GeneratorConfig::default()
    };
    let resolver = EnumResolver::new(&config);
    let column = Column::new("status", DataType::Enum);
    assert_eq!(
        resolver.resolve(&Entity::new("Post"), &column),
        "App\\Enums\\PostStatus"
    );
}

#[test]
fn test_class_names() {
    let config = GeneratorConfig::default();
    let names = ClassNames::new(&config);
    assert_eq!(names.model_fqcn("post"), "App\\Models\\Post");
    assert_eq!(names.data_fqcn("Post"), "App\\Data\\PostData");
    assert_eq!(
        names.resource_fqcn("Api", "Post"),
        "App\\Http\\Resources\\Api\\PostResource"
    );
    assert_eq!(
        names.controller_namespace("Api"),
        "App\\Http\\Controllers\\Api"
    );
}
