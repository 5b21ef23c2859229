use crate::model::{is_foreign_key, DataType};

/// Target-language type of a generated property.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetType {
    Int,
    Float,
    Bool,
    Array,
    /// Immutable date-time wrapper
    DateTime,
    /// Placeholder for the enum class resolved by the naming engine
    Enum,
    String,
}

impl TargetType {
    /// Type as written in a property declaration. Enums have no fixed
    /// spelling and must be resolved by the caller.
    pub fn as_str(self) -> &'static str {
        match self {
            TargetType::Int => "int",
            TargetType::Float => "float",
            TargetType::Bool => "bool",
            TargetType::Array => "array",
            TargetType::DateTime => "CarbonImmutable",
            TargetType::Enum => "string",
            TargetType::String => "string",
        }
    }
}

/// Type tag used in documentation attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocType {
    String,
    Integer,
    Number,
    Boolean,
    Object,
}

impl DocType {
    pub fn as_str(self) -> &'static str {
        match self {
            DocType::String => "string",
            DocType::Integer => "integer",
            DocType::Number => "number",
            DocType::Boolean => "boolean",
            DocType::Object => "object",
        }
    }
}

impl std::fmt::Display for DocType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of [`map_type`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MappedType {
    pub target: TargetType,
    pub doc: DocType,
    /// Documentation format hint (`date-time`)
    pub format: Option<&'static str>,
}

impl MappedType {
    const fn new(target: TargetType, doc: DocType) -> Self {
        Self {
            target,
            doc,
            format: None,
        }
    }
}

/// Map a column to its property type and documentation type.
///
/// Foreign keys (`*_id`) are always integers, whatever their declared type.
/// Unknown types map to strings.
pub fn map_type(column_name: &str, data_type: &DataType) -> MappedType {
    if is_foreign_key(column_name) {
        return MappedType::new(TargetType::Int, DocType::Integer);
    }

    match data_type {
        t if t.is_integer() => MappedType::new(TargetType::Int, DocType::Integer),
        t if t.is_decimal() => MappedType::new(TargetType::Float, DocType::Number),
        DataType::Boolean => MappedType::new(TargetType::Bool, DocType::Boolean),
        t if t.is_json() => MappedType::new(TargetType::Array, DocType::Object),
        t if t.is_temporal() => MappedType {
            target: TargetType::DateTime,
            doc: DocType::String,
            format: Some("date-time"),
        },
        DataType::Enum => MappedType::new(TargetType::Enum, DocType::String),
        _ => MappedType::new(TargetType::String, DocType::String),
    }
}
