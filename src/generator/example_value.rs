// example_value.rs

use super::naming::human_title;
use crate::model::{is_foreign_key, Column, DataType};
use chrono::{DateTime, Datelike, SecondsFormat, Utc};

/// Quote `s` as a single-quoted PHP string literal.
pub fn php_string_literal(s: &str) -> String {
    format!("'{}'", s.replace('\\', "\\\\").replace('\'', "\\'"))
}

/// Human-readable description of a column for documentation attributes.
///
/// `verb` (`creating` / `updating`) is accepted for callers that compose
/// longer sentences; it is not part of the returned text.
pub fn describe(column_name: &str, _verb: &str) -> String {
    if let Some(relation) = column_name.strip_suffix("_id") {
        return format!("The ID of the {}.", human_title(relation));
    }
    format!("The {}.", human_title(column_name))
}

/// Produces representative example literals for documentation.
///
/// Date-time and year examples are derived from `now`, so a fixed clock
/// gives reproducible output.
#[derive(Debug, Clone, Copy)]
pub struct ExampleSynthesizer {
    now: DateTime<Utc>,
}

impl ExampleSynthesizer {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self { now }
    }

    /// `now` as ISO-8601 with microseconds, e.g. `2025-12-12T05:32:50.329264Z`
    pub fn timestamp(&self) -> String {
        self.now.to_rfc3339_opts(SecondsFormat::Micros, true)
    }

    /// Example literal for a column. The name is checked first, then the
    /// type. The result is never an empty literal.
    pub fn example(
        &self,
        column_name: &str,
        data_type: &DataType,
        column: Option<&Column>,
    ) -> String {
        if column_name == "email" {
            return php_string_literal("user@example.com");
        }
        if column_name == "password" {
            return php_string_literal("password123");
        }
        if column_name.contains("url") {
            return php_string_literal("https://example.com");
        }
        if is_foreign_key(column_name) {
            return "1".to_string();
        }

        let example = match data_type {
            t if t.is_text() => string_example(column_name),
            t if t.is_integer() => self.integer_example(column_name),
            t if t.is_decimal() => decimal_example(column_name).to_string(),
            DataType::Boolean => "true".to_string(),
            DataType::Enum => enum_example(column),
            t if t.is_temporal() => php_string_literal(&self.timestamp()),
            t if t.is_json() => php_string_literal("{}"),
            _ => string_example(column_name),
        };

        if example.trim().is_empty() || example == "''" {
            string_example(column_name)
        } else {
            example
        }
    }

    fn integer_example(&self, column_name: &str) -> String {
        if ["count", "quantity", "stock"]
            .iter()
            .any(|p| column_name.contains(p))
        {
            "10".to_string()
        } else if column_name.contains("age") {
            "25".to_string()
        } else if column_name.contains("year") {
            self.now.year().to_string()
        } else {
            "1".to_string()
        }
    }
}

fn string_example(column_name: &str) -> String {
    let text = if column_name.contains("title") {
        "Example Title".to_string()
    } else if column_name.contains("name") {
        "Example Name".to_string()
    } else if column_name.contains("content") {
        "This is example content for the article...".to_string()
    } else if column_name.contains("description") {
        "This is a description...".to_string()
    } else if column_name.contains("excerpt") {
        "Example excerpt".to_string()
    } else if column_name.contains("slug") {
        "example-slug".to_string()
    } else if column_name.contains("code") {
        "CODE123".to_string()
    } else {
        format!("Example {column_name}")
    };
    php_string_literal(&text)
}

fn decimal_example(column_name: &str) -> &'static str {
    if column_name.contains("price") || column_name.contains("amount") {
        "99.99"
    } else if column_name.contains("rate") || column_name.contains("percentage") {
        "0.85"
    } else {
        "1.00"
    }
}

fn enum_example(column: Option<&Column>) -> String {
    match column.and_then(|c| c.enum_values().first().copied()) {
        Some(first) => php_string_literal(first),
        None => php_string_literal("draft"),
    }
}
