use std::path::PathBuf;

use super::imports::ImportRegistry;
use super::naming::{camel, class_basename, plural, singular, studly, ClassNames, EnumResolver};
use super::templates::{SlotMap, StubLoader, DATA_CLASS_STUB};
use super::types::{map_type, TargetType};
use crate::config::GeneratorConfig;
use crate::error::GeneratorError;
use crate::model::{Column, Entity, RelationKind};

const DATA_BASE_FQCN: &str = "Spatie\\LaravelData\\Data";
const WITH_CAST_FQCN: &str = "Spatie\\LaravelData\\Attributes\\WithCast";
const ENUM_CAST_FQCN: &str = "Spatie\\LaravelData\\Casts\\EnumCast";
const DATE_CAST_FQCN: &str = "Spatie\\LaravelData\\Casts\\DateTimeInterfaceCast";
const CARBON_IMMUTABLE_FQCN: &str = "Carbon\\CarbonImmutable";

/// Indentation of constructor parameters inside the data stub.
const PROPERTY_INDENT: &str = "        ";

/// Builds the typed Data object for an entity.
pub struct DataBuilder<'a> {
    config: &'a GeneratorConfig,
    names: ClassNames<'a>,
    enums: EnumResolver<'a>,
    stubs: &'a StubLoader,
}

impl<'a> DataBuilder<'a> {
    pub fn new(config: &'a GeneratorConfig, stubs: &'a StubLoader) -> Self {
        Self {
            config,
            names: ClassNames::new(config),
            enums: EnumResolver::new(config),
            stubs,
        }
    }

    /// `{app_path}/Data/{Entity}Data.{ext}`, relative to the output root.
    pub fn relative_path(&self, entity: &Entity) -> PathBuf {
        PathBuf::from(&self.config.app_path).join("Data").join(format!(
            "{}.{}",
            self.names.data_class(&entity.name),
            self.config.extension
        ))
    }

    pub fn render(&self, entity: &Entity) -> Result<String, GeneratorError> {
        let stub = self.stubs.load(DATA_CLASS_STUB)?;

        let mut imports = ImportRegistry::new();
        imports.add(DATA_BASE_FQCN);
        let properties = self.properties(entity, &mut imports);

        let slots = SlotMap::new()
            .with("namespace", self.names.data_namespace())
            .with("class", self.names.data_class(&entity.name))
            .with("imports", imports.render())
            .with("properties", properties);
        Ok(stub.render(&slots))
    }

    /// Constructor parameters: scalar columns first, then relationships.
    /// Managed and foreign-key columns are left out.
    fn properties(&self, entity: &Entity, imports: &mut ImportRegistry) -> String {
        let mut properties: Vec<String> = entity
            .columns()
            .iter()
            .filter(|c| !c.is_managed() && !c.is_foreign_key())
            .map(|c| self.column_property(entity, c, imports))
            .collect();

        for (kind, related) in entity.relationships() {
            for name in related {
                properties.push(self.relationship_property(entity, *kind, name, imports));
            }
        }

        if properties.is_empty() {
            return String::new();
        }
        format!("{},", properties.join(&format!(",\n{PROPERTY_INDENT}")))
    }

    fn column_property(
        &self,
        entity: &Entity,
        column: &Column,
        imports: &mut ImportRegistry,
    ) -> String {
        let mapped = map_type(&column.name, &column.data_type);
        let mut attributes = Vec::new();

        let type_name = match mapped.target {
            TargetType::Enum => {
                let enum_fqcn = self.enums.resolve(entity, column);
                imports.add(WITH_CAST_FQCN);
                imports.add(ENUM_CAST_FQCN);
                let enum_name = class_basename(&enum_fqcn).to_string();
                imports.add(enum_fqcn);
                attributes.push(format!(
                    "#[WithCast(EnumCast::class, type: {enum_name}::class)]"
                ));
                enum_name
            }
            TargetType::DateTime => {
                imports.add(CARBON_IMMUTABLE_FQCN);
                imports.add(WITH_CAST_FQCN);
                imports.add(DATE_CAST_FQCN);
                attributes.push("#[WithCast(DateTimeInterfaceCast::class)]".to_string());
                mapped.target.as_str().to_string()
            }
            other => other.as_str().to_string(),
        };

        let nullable = if column.nullable { "?" } else { "" };
        let declaration = format!("public {nullable}{type_name} ${}", column.name);
        if attributes.is_empty() {
            declaration
        } else {
            format!(
                "{}\n{PROPERTY_INDENT}{declaration}",
                attributes.join(&format!("\n{PROPERTY_INDENT}"))
            )
        }
    }

    /// A relationship back to `entity` itself needs no import.
    fn relationship_property(
        &self,
        entity: &Entity,
        kind: RelationKind,
        related: &str,
        imports: &mut ImportRegistry,
    ) -> String {
        let model = studly(&singular(related));
        let data_class = self.names.data_class(&model);
        if model != studly(&entity.name) {
            imports.add(self.names.data_fqcn(&model));
        }

        if kind.is_to_many() {
            format!(
                "/** @var array<{data_class}> */\n{PROPERTY_INDENT}public array ${}",
                camel(&plural(related))
            )
        } else {
            format!("public {data_class} ${}", camel(&singular(related)))
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]

    use super::*;
    use crate::model::DataType;

    #[test]
    fn test_enum_and_date_properties() {
        let config = GeneratorConfig::default();
        let stubs = StubLoader::from_config(&config);
        let builder = DataBuilder::new(&config, &stubs);
        let entity = Entity::new("Post")
            .with_column(Column::new("status", DataType::Enum).with_values(["draft", "published"]))
            .with_column(Column::new("published_at", DataType::Timestamp).nullable());

        let mut imports = ImportRegistry::new();
        let props = builder.properties(&entity, &mut imports);
        assert_eq!(
            props,
            "#[WithCast(EnumCast::class, type: Status::class)]\n        public Status $status,\n        #[WithCast(DateTimeInterfaceCast::class)]\n        public ?CarbonImmutable $published_at,"
        );
        assert!(imports.contains("App\\Enums\\Status"));
        assert!(imports.contains("Carbon\\CarbonImmutable"));
        assert!(imports.contains(ENUM_CAST_FQCN));
    }

    #[test]
    fn test_relationship_properties() {
        let config = GeneratorConfig::default();
        let stubs = StubLoader::from_config(&config);
        let builder = DataBuilder::new(&config, &stubs);

        let post = Entity::new("Post");

        let mut imports = ImportRegistry::new();
        assert_eq!(
            builder.relationship_property(&post, RelationKind::HasMany, "Comment", &mut imports),
            "/** @var array<CommentData> */\n        public array $comments"
        );
        assert_eq!(
            builder.relationship_property(&post, RelationKind::BelongsTo, "User", &mut imports),
            "public UserData $user"
        );
        assert!(imports.contains("App\\Data\\CommentData"));
        assert!(imports.contains("App\\Data\\UserData"));
    }

    #[test]
    fn test_empty_entity_renders_no_properties() {
        let config = GeneratorConfig::default();
        let stubs = StubLoader::from_config(&config);
        let builder = DataBuilder::new(&config, &stubs);
        let out = builder.render(&Entity::new("Empty")).unwrap();
        assert!(out.contains("class EmptyData extends Data"));
        assert!(out.contains("use Spatie\\LaravelData\\Data;"));
        assert!(!out.contains("{{"));
    }

    #[test]
    fn test_self_relationship_is_not_imported() {
        let config = GeneratorConfig::default();
        let stubs = StubLoader::from_config(&config);
        let builder = DataBuilder::new(&config, &stubs);
        let comment = Entity::new("Comment")
            .with_column(Column::new("body", DataType::Text))
            .with_relationship(RelationKind::HasMany, "comments")
            .with_relationship(RelationKind::BelongsTo, "post");

        let out = builder.render(&comment).unwrap();
        assert!(!out.contains("use App\\Data\\CommentData;"));
        assert!(out.contains("use App\\Data\\PostData;"));
        assert!(out.contains("/** @var array<CommentData> */\n        public array $comments"));
        assert!(out.contains("public PostData $post"));
    }
}
