use super::types::{
    Column, ControllerDef, DataType, Entity, RelationKind, Schema, API_RESOURCE_METHODS,
    WEB_RESOURCE_METHODS,
};
use anyhow::{anyhow, bail, Context};
use serde_json::Value as JsonValue;
use serde_yaml::{Mapping, Value};
use std::path::Path;

/// Column modifiers understood in a column definition. Anything else that is
/// not the first type-like token ends up in the attribute bag as a flag.
const MODIFIERS: [&str; 14] = [
    "nullable",
    "unique",
    "index",
    "foreign",
    "default",
    "unsigned",
    "primary",
    "autoincrement",
    "usecurrent",
    "usecurrentonupdate",
    "comment",
    "ondelete",
    "onupdate",
    "enumclass",
];

/// Load a Blueprint-style draft file into a [`Schema`].
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not a valid draft.
pub fn load_draft(path: &Path) -> anyhow::Result<Schema> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read draft: {}", path.display()))?;
    parse_draft(&content).with_context(|| format!("Failed to parse draft: {}", path.display()))
}

/// Parse draft YAML text.
///
/// ```yaml
/// models:
///   Post:
///     title: string:400
///     status: enum:draft,published,archived
///     published_at: nullable timestamp
///     user_id: id foreign
///     relationships:
///       hasMany: Comment
///       belongsToMany: Tag
/// controllers:
///   Api/Post:
///     resource: api
/// ```
pub fn parse_draft(content: &str) -> anyhow::Result<Schema> {
    let doc: Value = serde_yaml::from_str(content)?;
    let mut schema = Schema::default();

    if let Some(models) = doc.get("models") {
        let models = models
            .as_mapping()
            .ok_or_else(|| anyhow!("`models` must be a mapping"))?;
        for (name, def) in models {
            let name = key_str(name)?;
            let entity = parse_model(name, def).with_context(|| format!("model `{name}`"))?;
            schema.models.push(entity);
        }
    }

    if let Some(controllers) = doc.get("controllers") {
        let controllers = controllers
            .as_mapping()
            .ok_or_else(|| anyhow!("`controllers` must be a mapping"))?;
        for (name, def) in controllers {
            let name = key_str(name)?;
            let controller =
                parse_controller(name, def).with_context(|| format!("controller `{name}`"))?;
            schema.controllers.push(controller);
        }
    }

    Ok(schema)
}

fn key_str(key: &Value) -> anyhow::Result<&str> {
    key.as_str()
        .ok_or_else(|| anyhow!("expected a string key, found {key:?}"))
}

fn parse_model(name: &str, def: &Value) -> anyhow::Result<Entity> {
    let mut entity = Entity::new(name);
    let map = match def {
        Value::Null => return Ok(entity),
        Value::Mapping(map) => map,
        other => bail!("expected a mapping of columns, found {other:?}"),
    };

    for (key, value) in map {
        let key = key_str(key)?;
        match key {
            "relationships" => parse_relationships(&mut entity, value)?,
            "timestamps" | "timestampsTz" => {
                if value.as_bool() == Some(false) {
                    entity.timestamps = false;
                }
            }
            "softDeletes" | "softdeletes" | "softDeletesTz" => entity.soft_deletes = true,
            "indexes" | "meta" => {}
            "id" if value.as_bool() == Some(false) => {}
            column => {
                let definition = scalar_str(value)
                    .ok_or_else(|| anyhow!("column `{column}` needs a type definition"))?;
                entity.push_column(parse_column(column, &definition));
            }
        }
    }
    Ok(entity)
}

fn scalar_str(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn parse_relationships(entity: &mut Entity, value: &Value) -> anyhow::Result<()> {
    let Some(map) = value.as_mapping() else {
        bail!("`relationships` must be a mapping");
    };
    for (kind, related) in map {
        let kind: RelationKind = key_str(kind)?.parse().map_err(|e: String| anyhow!(e))?;
        for name in related_names(related)? {
            entity.push_relationship(kind, name);
        }
    }
    Ok(())
}

fn related_names(value: &Value) -> anyhow::Result<Vec<String>> {
    match value {
        Value::String(s) => Ok(split_list(s)),
        Value::Sequence(items) => Ok(items
            .iter()
            .filter_map(Value::as_str)
            .flat_map(split_list)
            .collect()),
        other => bail!("relationship targets must be a string or a list, found {other:?}"),
    }
}

fn split_list(s: &str) -> Vec<String> {
    s.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

/// Parse one column definition such as `nullable timestamp` or
/// `enum:draft,published`.
pub fn parse_column(name: &str, definition: &str) -> Column {
    let mut data_type: Option<DataType> = None;
    let mut column = Column::new(name, DataType::String);

    for token in definition.split_whitespace() {
        let (head, args) = match token.split_once(':') {
            Some((head, args)) => (head, Some(args)),
            None => (token, None),
        };
        let lower = head.to_ascii_lowercase();

        if MODIFIERS.contains(&lower.as_str()) {
            match lower.as_str() {
                "nullable" => column.nullable = true,
                "enumclass" => {
                    if let Some(class) = args {
                        column
                            .attributes
                            .insert("enum_class".into(), JsonValue::String(class.into()));
                    }
                }
                _ => {
                    let value = args
                        .map(|a| JsonValue::String(a.to_string()))
                        .unwrap_or(JsonValue::Bool(true));
                    column.attributes.insert(head.to_string(), value);
                }
            }
            continue;
        }

        if data_type.is_none() {
            let ty = head.parse::<DataType>().unwrap_or(DataType::String);
            if let Some(args) = args {
                let key = if ty == DataType::Enum { "values" } else { "args" };
                let list = split_list(args)
                    .into_iter()
                    .map(JsonValue::String)
                    .collect::<Vec<_>>();
                column.attributes.insert(key.into(), JsonValue::Array(list));
            }
            data_type = Some(ty);
        } else {
            column
                .attributes
                .insert(token.to_string(), JsonValue::Bool(true));
        }
    }

    column.data_type = data_type.unwrap_or(DataType::String);
    column
}

fn parse_controller(name: &str, def: &Value) -> anyhow::Result<ControllerDef> {
    let (namespace, prefix) = match name.rsplit_once('/') {
        Some((ns, prefix)) => (ns.replace('/', "\\"), prefix),
        None => (String::new(), name),
    };
    let prefix = prefix.strip_suffix("Controller").unwrap_or(prefix);

    let mut methods: Vec<String> = Vec::new();
    let empty = Mapping::new();
    let map = match def {
        Value::Null => &empty,
        Value::Mapping(map) => map,
        other => bail!("expected a mapping of methods, found {other:?}"),
    };

    for (key, value) in map {
        let key = key_str(key)?;
        if key == "resource" {
            let resource = value.as_str().unwrap_or("web");
            let listed: Vec<String> = match resource {
                "api" => API_RESOURCE_METHODS.iter().map(|m| m.to_string()).collect(),
                "web" => WEB_RESOURCE_METHODS.iter().map(|m| m.to_string()).collect(),
                other => split_list(other),
            };
            for method in listed {
                if !methods.contains(&method) {
                    methods.push(method);
                }
            }
        } else if !methods.iter().any(|m| m == key) {
            methods.push(key.to_string());
        }
    }

    Ok(ControllerDef::new(namespace, prefix, methods))
}
