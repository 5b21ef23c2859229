//! Naming conventions and name-based heuristics.
//!
//! Case conversion is delegated to `heck`; singular/plural forms use simple
//! English rules plus a short irregular table, which is enough for schema
//! entity names.

use crate::config::{EnumNaming, GeneratorConfig};
use crate::model::{Column, Entity};
use heck::{ToLowerCamelCase, ToSnakeCase, ToTitleCase, ToUpperCamelCase};
use std::collections::BTreeMap;

const IRREGULAR: [(&str, &str); 20] = [
    ("person", "people"),
    ("child", "children"),
    ("man", "men"),
    ("woman", "women"),
    ("mouse", "mice"),
    ("tooth", "teeth"),
    ("foot", "feet"),
    ("goose", "geese"),
    // -ie stems the `ies -> y` rule would break
    ("movie", "movies"),
    ("cookie", "cookies"),
    ("zombie", "zombies"),
    ("pie", "pies"),
    ("tie", "ties"),
    // -o stems pluralised with -es
    ("hero", "heroes"),
    ("potato", "potatoes"),
    ("tomato", "tomatoes"),
    ("echo", "echoes"),
    ("veto", "vetoes"),
    ("buffalo", "buffaloes"),
    ("quiz", "quizzes"),
];

const UNCOUNTABLE: [&str; 11] = [
    "data",
    "equipment",
    "feedback",
    "fish",
    "information",
    "media",
    "metadata",
    "news",
    "series",
    "sheep",
    "species",
];

/// `user_profile` -> `UserProfile`
pub fn studly(s: &str) -> String {
    s.to_upper_camel_case()
}

/// `user_profile` -> `userProfile`
pub fn camel(s: &str) -> String {
    s.to_lower_camel_case()
}

/// `UserProfile` -> `user_profile`
pub fn snake(s: &str) -> String {
    s.to_snake_case()
}

/// `published_at` -> `Published At`
pub fn human_title(s: &str) -> String {
    s.to_title_case()
}

/// `BlogPost` -> `Blog Post`
pub fn headline(s: &str) -> String {
    s.to_title_case()
}

/// Last part of a namespaced class name.
pub fn class_basename(fqcn: &str) -> &str {
    fqcn.rsplit('\\').next().unwrap_or(fqcn)
}

/// Split off the last word of a snake_case or StudlyCase identifier.
fn split_last_word(word: &str) -> (&str, &str) {
    let boundary = word
        .char_indices()
        .filter(|(i, c)| *c == '_' || (*i > 0 && c.is_uppercase()))
        .map(|(i, c)| if c == '_' { i + 1 } else { i })
        .last()
        .unwrap_or(0);
    word.split_at(boundary)
}

/// Re-apply the capitalisation of `original`'s first letter to `word`.
fn match_case(original: &str, word: String) -> String {
    match original.chars().next() {
        Some(c) if c.is_uppercase() => {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => word,
            }
        }
        _ => word,
    }
}

fn singular_word(w: &str) -> String {
    if UNCOUNTABLE.contains(&w) {
        return w.to_string();
    }
    if let Some((singular, _)) = IRREGULAR.iter().find(|(_, plural)| *plural == w) {
        return singular.to_string();
    }
    if IRREGULAR.iter().any(|(singular, _)| *singular == w) {
        return w.to_string();
    }
    if let Some(stem) = w.strip_suffix("ies") {
        // categories -> category, soliloquies -> soliloquy
        if stem.ends_with("qu") || stem.chars().last().is_some_and(|c| !is_vowel(c)) {
            return format!("{stem}y");
        }
    }
    if w.ends_with("uses") {
        // statuses -> status, houses -> house
        let stem = &w[..w.len() - 4];
        let vowel_before = stem.chars().last().is_some_and(is_vowel);
        return if vowel_before {
            w[..w.len() - 1].to_string()
        } else {
            w[..w.len() - 2].to_string()
        };
    }
    if w.ends_with("sses") || w.ends_with("shes") || w.ends_with("ches") || w.ends_with("xes") {
        return w[..w.len() - 2].to_string();
    }
    if w.ends_with("ss") || w.ends_with("us") || w.ends_with("is") {
        return w.to_string();
    }
    if let Some(stem) = w.strip_suffix('s') {
        return stem.to_string();
    }
    w.to_string()
}

fn plural_word(w: &str) -> String {
    if UNCOUNTABLE.contains(&w) {
        return w.to_string();
    }
    if let Some((_, plural)) = IRREGULAR.iter().find(|(singular, _)| *singular == w) {
        return plural.to_string();
    }
    if IRREGULAR.iter().any(|(_, plural)| *plural == w) {
        return w.to_string();
    }

    let s = singular_word(w);
    if ["s", "x", "z", "ch", "sh"].iter().any(|end| s.ends_with(end)) {
        return format!("{s}es");
    }
    if let Some(stem) = s.strip_suffix('y') {
        if stem.ends_with("qu") || stem.chars().last().is_some_and(|c| !is_vowel(c)) {
            return format!("{stem}ies");
        }
    }
    format!("{s}s")
}

fn is_vowel(c: char) -> bool {
    matches!(c, 'a' | 'e' | 'i' | 'o' | 'u')
}

/// `comments` -> `comment`, `BlogPosts` -> `BlogPost`
pub fn singular(word: &str) -> String {
    let (head, last) = split_last_word(word);
    let inflected = singular_word(&last.to_lowercase());
    format!("{head}{}", match_case(last, inflected))
}

/// `comment` -> `comments`. Plural input is returned unchanged.
pub fn plural(word: &str) -> String {
    let (head, last) = split_last_word(word);
    let inflected = plural_word(&last.to_lowercase());
    format!("{head}{}", match_case(last, inflected))
}

/// Fully qualified class names of the artifacts surrounding a model.
#[derive(Debug, Clone, Copy)]
pub struct ClassNames<'a> {
    config: &'a GeneratorConfig,
}

impl<'a> ClassNames<'a> {
    pub fn new(config: &'a GeneratorConfig) -> Self {
        Self { config }
    }

    /// `App\Models\Post`
    pub fn model_fqcn(&self, model: &str) -> String {
        format!(
            "{}\\{}\\{}",
            self.config.namespace,
            self.config.models_namespace,
            studly(model)
        )
    }

    /// `PostData`
    pub fn data_class(&self, model: &str) -> String {
        format!("{}Data", studly(model))
    }

    /// `App\Data\PostData`
    pub fn data_fqcn(&self, model: &str) -> String {
        format!("{}\\Data\\{}", self.config.namespace, self.data_class(model))
    }

    /// `App\Data`
    pub fn data_namespace(&self) -> String {
        format!("{}\\Data", self.config.namespace)
    }

    /// `PostResource`
    pub fn resource_class(&self, model: &str) -> String {
        format!("{}Resource", studly(model))
    }

    /// `App\Http\Resources\Api\PostResource`
    pub fn resource_fqcn(&self, controller_namespace: &str, model: &str) -> String {
        format!(
            "{}\\Http\\Resources\\{}\\{}",
            self.config.namespace,
            controller_namespace,
            self.resource_class(model)
        )
    }

    /// `App\Http\Controllers\Api`
    pub fn controller_namespace(&self, controller_namespace: &str) -> String {
        if controller_namespace.is_empty() {
            format!("{}\\Http\\Controllers", self.config.namespace)
        } else {
            format!(
                "{}\\Http\\Controllers\\{}",
                self.config.namespace, controller_namespace
            )
        }
    }

    /// `App\Enums`
    pub fn enums_namespace(&self) -> String {
        format!("{}\\Enums", self.config.namespace)
    }
}

/// Works out which enum class backs an enum column.
///
/// Resolution order: the class declared on the column, then the configured
/// lookup table (`"Post.status"`), then the configured naming heuristic.
/// The heuristic is not checked against real enum classes.
#[derive(Debug, Clone)]
pub struct EnumResolver<'a> {
    enums_namespace: String,
    naming: EnumNaming,
    suffixes: &'a [String],
    overrides: &'a BTreeMap<String, String>,
}

impl<'a> EnumResolver<'a> {
    pub fn new(config: &'a GeneratorConfig) -> Self {
        Self {
            enums_namespace: ClassNames::new(config).enums_namespace(),
            naming: config.enum_naming,
            suffixes: &config.enum_suffixes,
            overrides: &config.enum_classes,
        }
    }

    /// Fully qualified enum class for `column` of `entity`.
    pub fn resolve(&self, entity: &Entity, column: &Column) -> String {
        if let Some(class) = column.enum_class() {
            return class.to_string();
        }
        let key = format!("{}.{}", entity.name, column.name);
        if let Some(class) = self.overrides.get(&key) {
            return class.clone();
        }

        let enum_name = studly(&column.name);
        let standalone = match self.naming {
            EnumNaming::Suffix => self.suffixes.iter().any(|s| enum_name.ends_with(s.as_str())),
            EnumNaming::EntityQualified => false,
        };
        if standalone {
            format!("{}\\{}", self.enums_namespace, enum_name)
        } else {
            format!("{}\\{}{}", self.enums_namespace, studly(&entity.name), enum_name)
        }
    }
}
