//! Allowed filters, sorts and includes for the query layer.
//!
//! Each list is built as data first (`allowed_*`) and rendered separately
//! (`render_*`), so the lists can be inspected without generating code.

use super::imports::ImportRegistry;
use super::naming::camel;
use crate::model::{DataType, Entity};

/// Helper type referenced by exact-match filters.
pub const ALLOWED_FILTER_FQCN: &str = "Spatie\\QueryBuilder\\AllowedFilter";

/// Sortable column names, in output order.
pub const SORTABLE_COLUMNS: [&str; 5] =
    ["created_at", "published_at", "updated_at", "title", "name"];

/// A single allowed filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterEntry {
    /// Exact match (foreign keys, enums)
    Exact(String),
    /// Partial match (text columns)
    Partial(String),
}

impl FilterEntry {
    pub fn column(&self) -> &str {
        match self {
            FilterEntry::Exact(c) | FilterEntry::Partial(c) => c,
        }
    }

    pub fn is_exact(&self) -> bool {
        matches!(self, FilterEntry::Exact(_))
    }

    /// `AllowedFilter::exact('status')` or `'title'`
    pub fn render(&self) -> String {
        match self {
            FilterEntry::Exact(c) => format!("AllowedFilter::exact('{c}')"),
            FilterEntry::Partial(c) => format!("'{c}'"),
        }
    }
}

/// Filters for `entity`: exact-match entries first, then partial-match
/// entries, each in column declaration order.
pub fn allowed_filters(entity: Option<&Entity>) -> Vec<FilterEntry> {
    let Some(entity) = entity else {
        return Vec::new();
    };

    let mut exact = Vec::new();
    let mut partial = Vec::new();
    for column in entity.columns().iter().filter(|c| !c.is_managed()) {
        if column.is_foreign_key() || column.data_type == DataType::Enum {
            exact.push(FilterEntry::Exact(column.name.clone()));
        } else if column.data_type.is_text() {
            partial.push(FilterEntry::Partial(column.name.clone()));
        }
    }
    exact.extend(partial);
    exact
}

/// Sorts for `entity`. `id` is always present exactly once, last.
pub fn allowed_sorts(entity: Option<&Entity>) -> Vec<String> {
    let Some(entity) = entity else {
        return vec!["created_at".to_string(), "id".to_string()];
    };

    let mut sorts: Vec<String> = SORTABLE_COLUMNS
        .iter()
        .filter(|name| is_sortable_on(entity, name))
        .map(|name| name.to_string())
        .collect();

    if !sorts.iter().any(|s| s == "id") {
        sorts.push("id".to_string());
    }
    sorts
}

/// Declared columns are sortable; implicit timestamps only contribute
/// `created_at`.
fn is_sortable_on(entity: &Entity, name: &str) -> bool {
    entity.column(name).is_some() || (name == "created_at" && entity.timestamps)
}

/// Relationship names that may be eager loaded, camel-cased and
/// de-duplicated, in relationship-kind order.
pub fn allowed_includes(entity: Option<&Entity>) -> Vec<String> {
    let Some(entity) = entity else {
        return Vec::new();
    };

    let mut includes: Vec<String> = Vec::new();
    for related in entity.relationships().values().flatten() {
        let name = camel(related);
        if !includes.contains(&name) {
            includes.push(name);
        }
    }
    includes
}

/// Render filters and drop the `AllowedFilter` import when no exact filter
/// uses it.
pub fn render_filters(filters: &[FilterEntry], imports: &mut ImportRegistry) -> String {
    if !filters.iter().any(FilterEntry::is_exact) {
        imports.remove(ALLOWED_FILTER_FQCN);
    }
    let items = filters.iter().map(FilterEntry::render).collect::<Vec<_>>();
    format_array(&items, false)
}

/// Render sorts. Without a model the fallback list is written inline.
pub fn render_sorts(entity: Option<&Entity>) -> String {
    match entity {
        Some(_) => render_names(&allowed_sorts(entity)),
        None => "['created_at', 'id']".to_string(),
    }
}

pub fn render_names(names: &[String]) -> String {
    format_array(names, true)
}

/// PHP array literal. Empty and single-item arrays stay on one line; longer
/// ones are block formatted at method-body indentation.
pub fn format_array<S: AsRef<str>>(items: &[S], quoted: bool) -> String {
    let items = items
        .iter()
        .map(|i| {
            if quoted {
                format!("'{}'", i.as_ref())
            } else {
                i.as_ref().to_string()
            }
        })
        .collect::<Vec<_>>();

    match items.as_slice() {
        [] => "[]".to_string(),
        [only] => format!("[{only}]"),
        _ => format!(
            "[\n            {},\n        ]",
            items.join(",\n            ")
        ),
    }
}
