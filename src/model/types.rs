use heck::ToUpperCamelCase;
use serde_json::Value;
use std::collections::BTreeMap;
use std::str::FromStr;

/// Column data type as declared in a draft.
///
/// The families matter more than the individual variants: every generator
/// component dispatches on `is_integer`, `is_decimal`, `is_text`,
/// `is_temporal` and `is_json` rather than on the exact type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataType {
    Id,
    Integer,
    UnsignedInteger,
    BigInteger,
    UnsignedBigInteger,
    TinyInteger,
    UnsignedTinyInteger,
    SmallInteger,
    UnsignedSmallInteger,
    MediumInteger,
    UnsignedMediumInteger,
    Decimal,
    Float,
    Double,
    Boolean,
    String,
    Text,
    LongText,
    Enum,
    Date,
    DateTime,
    Timestamp,
    Json,
    Jsonb,
    /// Anything the generator has no special handling for (`uuid`, `char`, ...)
    Other(String),
}

impl DataType {
    pub fn is_integer(&self) -> bool {
        matches!(
            self,
            DataType::Id
                | DataType::Integer
                | DataType::UnsignedInteger
                | DataType::BigInteger
                | DataType::UnsignedBigInteger
                | DataType::TinyInteger
                | DataType::UnsignedTinyInteger
                | DataType::SmallInteger
                | DataType::UnsignedSmallInteger
                | DataType::MediumInteger
                | DataType::UnsignedMediumInteger
        )
    }

    pub fn is_decimal(&self) -> bool {
        matches!(self, DataType::Decimal | DataType::Float | DataType::Double)
    }

    /// `string`, `text` and `longtext`
    pub fn is_text(&self) -> bool {
        matches!(self, DataType::String | DataType::Text | DataType::LongText)
    }

    pub fn is_temporal(&self) -> bool {
        matches!(self, DataType::Date | DataType::DateTime | DataType::Timestamp)
    }

    pub fn is_json(&self) -> bool {
        matches!(self, DataType::Json | DataType::Jsonb)
    }

    /// Draft spelling of the type (`bigInteger`, `longtext`, ...)
    pub fn as_str(&self) -> &str {
        match self {
            DataType::Id => "id",
            DataType::Integer => "integer",
            DataType::UnsignedInteger => "unsignedInteger",
            DataType::BigInteger => "bigInteger",
            DataType::UnsignedBigInteger => "unsignedBigInteger",
            DataType::TinyInteger => "tinyInteger",
            DataType::UnsignedTinyInteger => "unsignedTinyInteger",
            DataType::SmallInteger => "smallInteger",
            DataType::UnsignedSmallInteger => "unsignedSmallInteger",
            DataType::MediumInteger => "mediumInteger",
            DataType::UnsignedMediumInteger => "unsignedMediumInteger",
            DataType::Decimal => "decimal",
            DataType::Float => "float",
            DataType::Double => "double",
            DataType::Boolean => "boolean",
            DataType::String => "string",
            DataType::Text => "text",
            DataType::LongText => "longtext",
            DataType::Enum => "enum",
            DataType::Date => "date",
            DataType::DateTime => "datetime",
            DataType::Timestamp => "timestamp",
            DataType::Json => "json",
            DataType::Jsonb => "jsonb",
            DataType::Other(s) => s,
        }
    }
}

impl FromStr for DataType {
    type Err = std::convert::Infallible;

    /// Parsing never fails: unknown names become [`DataType::Other`].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let ty = match s.to_ascii_lowercase().as_str() {
            "id" => DataType::Id,
            "integer" | "int" => DataType::Integer,
            "unsignedinteger" => DataType::UnsignedInteger,
            "biginteger" => DataType::BigInteger,
            "unsignedbiginteger" => DataType::UnsignedBigInteger,
            "tinyinteger" => DataType::TinyInteger,
            "unsignedtinyinteger" => DataType::UnsignedTinyInteger,
            "smallinteger" => DataType::SmallInteger,
            "unsignedsmallinteger" => DataType::UnsignedSmallInteger,
            "mediuminteger" => DataType::MediumInteger,
            "unsignedmediuminteger" => DataType::UnsignedMediumInteger,
            "decimal" => DataType::Decimal,
            "float" => DataType::Float,
            "double" => DataType::Double,
            "boolean" | "bool" => DataType::Boolean,
            "string" => DataType::String,
            "text" => DataType::Text,
            "longtext" => DataType::LongText,
            "enum" => DataType::Enum,
            "date" => DataType::Date,
            "datetime" => DataType::DateTime,
            "timestamp" => DataType::Timestamp,
            "json" => DataType::Json,
            "jsonb" => DataType::Jsonb,
            _ => DataType::Other(s.to_string()),
        };
        Ok(ty)
    }
}

impl std::fmt::Display for DataType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Relationship kind. The declaration order here is the order in which
/// relationship groups are visited during generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RelationKind {
    BelongsTo,
    HasOne,
    HasMany,
    BelongsToMany,
    MorphTo,
    MorphOne,
    MorphMany,
    MorphToMany,
}

impl RelationKind {
    pub const ALL: [RelationKind; 8] = [
        RelationKind::BelongsTo,
        RelationKind::HasOne,
        RelationKind::HasMany,
        RelationKind::BelongsToMany,
        RelationKind::MorphTo,
        RelationKind::MorphOne,
        RelationKind::MorphMany,
        RelationKind::MorphToMany,
    ];

    /// Whether the related side is a collection.
    pub fn is_to_many(self) -> bool {
        matches!(
            self,
            RelationKind::HasMany
                | RelationKind::BelongsToMany
                | RelationKind::MorphMany
                | RelationKind::MorphToMany
        )
    }

    pub fn as_str(self) -> &'static str {
        match self {
            RelationKind::BelongsTo => "belongsTo",
            RelationKind::HasOne => "hasOne",
            RelationKind::HasMany => "hasMany",
            RelationKind::BelongsToMany => "belongsToMany",
            RelationKind::MorphTo => "morphTo",
            RelationKind::MorphOne => "morphOne",
            RelationKind::MorphMany => "morphMany",
            RelationKind::MorphToMany => "morphToMany",
        }
    }
}

impl FromStr for RelationKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RelationKind::ALL
            .into_iter()
            .find(|k| k.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown relationship kind '{s}'"))
    }
}

impl std::fmt::Display for RelationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single column of an entity.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub name: String,
    pub data_type: DataType,
    pub nullable: bool,
    /// Free-form attributes: `values` (enum values), `enum_class`,
    /// `foreign`, `default`, ...
    pub attributes: BTreeMap<String, Value>,
}

impl Column {
    pub fn new(name: impl Into<String>, data_type: DataType) -> Self {
        Self {
            name: name.into(),
            data_type,
            nullable: false,
            attributes: BTreeMap::new(),
        }
    }

    pub fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    pub fn with_attribute(mut self, key: impl Into<String>, value: Value) -> Self {
        self.attributes.insert(key.into(), value);
        self
    }

    /// Shorthand for an enum column's declared values.
    pub fn with_values<I, S>(self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let values = values
            .into_iter()
            .map(|v| Value::String(v.into()))
            .collect::<Vec<_>>();
        self.with_attribute("values", Value::Array(values))
    }

    /// Declared enum values, in declaration order.
    pub fn enum_values(&self) -> Vec<&str> {
        self.attributes
            .get("values")
            .and_then(Value::as_array)
            .map(|vals| vals.iter().filter_map(Value::as_str).collect())
            .unwrap_or_default()
    }

    /// Enum class explicitly declared on the column, if any.
    pub fn enum_class(&self) -> Option<&str> {
        self.attributes.get("enum_class").and_then(Value::as_str)
    }

    /// `*_id` columns are foreign keys by convention.
    pub fn is_foreign_key(&self) -> bool {
        is_foreign_key(&self.name)
    }

    /// Columns managed by the framework itself.
    pub fn is_managed(&self) -> bool {
        is_managed_column(&self.name)
    }
}

pub fn is_foreign_key(name: &str) -> bool {
    name.ends_with("_id")
}

pub fn is_managed_column(name: &str) -> bool {
    matches!(name, "id" | "created_at" | "updated_at" | "deleted_at")
}

/// One schema entity (a model).
#[derive(Debug, Clone, PartialEq)]
pub struct Entity {
    pub name: String,
    columns: Vec<Column>,
    relationships: BTreeMap<RelationKind, Vec<String>>,
    /// `created_at`/`updated_at` are implied (the draft default)
    pub timestamps: bool,
    /// `deleted_at` is implied
    pub soft_deletes: bool,
}

impl Entity {
    pub fn new(name: impl AsRef<str>) -> Self {
        Self {
            name: name.as_ref().to_upper_camel_case(),
            columns: Vec::new(),
            relationships: BTreeMap::new(),
            timestamps: true,
            soft_deletes: false,
        }
    }

    /// Add a column. A column with the same name is replaced in place so
    /// names stay unique.
    pub fn with_column(mut self, column: Column) -> Self {
        self.push_column(column);
        self
    }

    pub fn push_column(&mut self, column: Column) {
        match self.columns.iter_mut().find(|c| c.name == column.name) {
            Some(existing) => *existing = column,
            None => self.columns.push(column),
        }
    }

    pub fn with_relationship(mut self, kind: RelationKind, related: impl Into<String>) -> Self {
        self.push_relationship(kind, related);
        self
    }

    pub fn push_relationship(&mut self, kind: RelationKind, related: impl Into<String>) {
        self.relationships
            .entry(kind)
            .or_default()
            .push(related.into());
    }

    pub fn without_timestamps(mut self) -> Self {
        self.timestamps = false;
        self
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Relationship groups in [`RelationKind`] order.
    pub fn relationships(&self) -> &BTreeMap<RelationKind, Vec<String>> {
        &self.relationships
    }

    pub fn has_relationships(&self) -> bool {
        self.relationships.values().any(|names| !names.is_empty())
    }
}

/// A controller declared in the draft.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControllerDef {
    /// Relative namespace (`Api`, `Api/Admin`, ...)
    pub namespace: String,
    /// Name without the `Controller` suffix (`Post`)
    pub prefix: String,
    /// Method names in declaration order
    pub methods: Vec<String>,
}

/// Methods of an API resource controller.
pub const API_RESOURCE_METHODS: [&str; 5] = ["index", "store", "show", "update", "destroy"];

/// Methods of a web resource controller.
pub const WEB_RESOURCE_METHODS: [&str; 7] =
    ["index", "create", "store", "show", "edit", "update", "destroy"];

impl ControllerDef {
    pub fn new<I, S>(namespace: impl Into<String>, prefix: impl Into<String>, methods: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            namespace: namespace.into(),
            prefix: prefix.into(),
            methods: methods.into_iter().map(Into::into).collect(),
        }
    }

    /// An API resource controller for `prefix` in `namespace`.
    pub fn api_resource(namespace: impl Into<String>, prefix: impl Into<String>) -> Self {
        Self::new(namespace, prefix, API_RESOURCE_METHODS)
    }

    pub fn class_name(&self) -> String {
        format!("{}Controller", self.prefix.to_upper_camel_case())
    }

    pub fn has_method(&self, name: &str) -> bool {
        self.methods.iter().any(|m| m == name)
    }
}

/// The whole generation input.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Schema {
    pub models: Vec<Entity>,
    pub controllers: Vec<ControllerDef>,
}

impl Schema {
    pub fn new(models: Vec<Entity>) -> Self {
        Self {
            models,
            controllers: Vec::new(),
        }
    }

    pub fn with_controller(mut self, controller: ControllerDef) -> Self {
        self.controllers.push(controller);
        self
    }

    /// Look up a model by name, tolerating case differences
    /// (`post`, `Post`, `blog_post` -> `BlogPost`).
    pub fn model_for_context(&self, name: &str) -> Option<&Entity> {
        let wanted = name.to_upper_camel_case();
        self.models.iter().find(|m| m.name == wanted)
    }

    /// Declared controllers, or one API resource controller per model in
    /// `default_namespace` when the schema declares none.
    pub fn effective_controllers(&self, default_namespace: &str) -> Vec<ControllerDef> {
        if !self.controllers.is_empty() {
            return self.controllers.clone();
        }
        self.models
            .iter()
            .map(|m| ControllerDef::api_resource(default_namespace, m.name.clone()))
            .collect()
    }
}
