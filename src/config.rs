//! Generator configuration
//!
//! Settings live in an `apigen.toml` file that sits alongside the draft, or
//! at a path given explicitly on the command line. Every key is optional.
//!
//! ```toml
//! namespace = "App"
//! app_path = "app"
//! stubs_dirs = ["stubs"]
//! enum_naming = "entity-qualified"
//! example_timestamp = "2025-01-01T00:00:00Z"
//!
//! [enum_classes]
//! "Post.status" = "App\\Enums\\PostStatus"
//! ```

use anyhow::Context;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// File name looked up next to the draft.
pub const CONFIG_FILE_NAME: &str = "apigen.toml";

/// How enum classes are named when the draft does not declare one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EnumNaming {
    /// `StatusType`-style names stand alone, others get the entity prefix
    #[default]
    Suffix,
    /// Always `{Entity}{Column}`
    EntityQualified,
}

/// Generator settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Root namespace of the application (`App`)
    pub namespace: String,
    /// Application directory relative to the output root (`app`)
    pub app_path: String,
    /// Only controllers in this namespace are generated (`Api`)
    pub controller_namespace: String,
    /// Namespace segment holding models (`Models`)
    pub models_namespace: String,
    /// Extension of generated files
    pub extension: String,
    /// Directories searched for stubs, in order
    pub stubs_dirs: Vec<PathBuf>,
    /// Fall back to the stubs bundled with the generator
    pub builtin_stubs: bool,
    pub enum_naming: EnumNaming,
    /// Suffixes that mark a column name as a standalone enum name
    pub enum_suffixes: Vec<String>,
    /// `"Entity.column"` -> fully qualified enum class
    pub enum_classes: BTreeMap<String, String>,
    /// Fixed clock for date and year examples. Unset means "now".
    pub example_timestamp: Option<DateTime<Utc>>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            namespace: "App".to_string(),
            app_path: "app".to_string(),
            controller_namespace: "Api".to_string(),
            models_namespace: "Models".to_string(),
            extension: "php".to_string(),
            stubs_dirs: Vec::new(),
            builtin_stubs: true,
            enum_naming: EnumNaming::Suffix,
            enum_suffixes: vec!["Status".to_string(), "Type".to_string()],
            enum_classes: BTreeMap::new(),
            example_timestamp: None,
        }
    }
}

impl GeneratorConfig {
    /// Resolve relative stub directories against `base` (the config file's
    /// directory).
    pub fn resolve_paths(mut self, base: &Path) -> Self {
        self.stubs_dirs = self
            .stubs_dirs
            .into_iter()
            .map(|p| if p.is_relative() { base.join(p) } else { p })
            .collect();
        self
    }
}

/// Load generator configuration from a TOML file
///
/// # Returns
///
/// Returns `Ok(Some(config))` if the file exists and parses successfully,
/// `Ok(None)` if it doesn't exist (not an error),
/// `Err` if it exists but fails to parse.
pub fn load_generator_config(config_path: &Path) -> anyhow::Result<Option<GeneratorConfig>> {
    if !config_path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(config_path).with_context(|| {
        format!(
            "Failed to read generator config: {}",
            config_path.display()
        )
    })?;

    let config: GeneratorConfig = toml::from_str(&contents).with_context(|| {
        format!(
            "Failed to parse generator config: {}",
            config_path.display()
        )
    })?;

    let base = config_path.parent().unwrap_or_else(|| Path::new("."));
    Ok(Some(config.resolve_paths(base)))
}

/// Look for `apigen.toml` in the draft's directory.
pub fn auto_detect_config_path(draft_path: &Path) -> Option<PathBuf> {
    let draft_dir = draft_path.parent()?;
    let config_path = draft_dir.join(CONFIG_FILE_NAME);
    if config_path.exists() {
        Some(config_path)
    } else {
        None
    }
}

/// Resolve the config path
///
/// Priority:
/// 1. Explicitly provided path (via CLI)
/// 2. Auto-detected alongside the draft
/// 3. None (defaults)
pub fn resolve_config_path(explicit_path: Option<&Path>, draft_path: &Path) -> Option<PathBuf> {
    if let Some(path) = explicit_path {
        return Some(path.to_path_buf());
    }
    auto_detect_config_path(draft_path)
}

/// Resolve and load the configuration, falling back to defaults.
///
/// # Errors
///
/// An explicitly named file that does not exist is an error; an absent
/// auto-detected one is not.
pub fn load_or_default(
    explicit_path: Option<&Path>,
    draft_path: &Path,
) -> anyhow::Result<GeneratorConfig> {
    if let Some(path) = explicit_path {
        if !path.exists() {
            anyhow::bail!("Config file not found: {}", path.display());
        }
    }
    match resolve_config_path(explicit_path, draft_path) {
        Some(path) => Ok(load_generator_config(&path)?.unwrap_or_default()),
        None => Ok(GeneratorConfig::default()),
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]

    use super::*;
    use std::fs;

    #[test]
    fn test_missing_config_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let res = load_generator_config(&dir.path().join(CONFIG_FILE_NAME)).unwrap();
        assert!(res.is_none());
    }

    #[test]
    fn test_partial_config_keeps_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        fs::write(
            &path,
            "namespace = \"Blog\"\nenum_naming = \"entity-qualified\"\nstubs_dirs = [\"stubs\"]\n\n[enum_classes]\n\"Post.status\" = \"Blog\\\\Enums\\\\PostStatus\"\n",
        )
        .unwrap();

        let cfg = load_generator_config(&path).unwrap().unwrap();
        assert_eq!(cfg.namespace, "Blog");
        assert_eq!(cfg.app_path, "app");
        assert_eq!(cfg.enum_naming, EnumNaming::EntityQualified);
        assert_eq!(cfg.stubs_dirs, vec![dir.path().join("stubs")]);
        assert_eq!(
            cfg.enum_classes.get("Post.status").map(String::as_str),
            Some("Blog\\Enums\\PostStatus")
        );
        assert!(cfg.builtin_stubs);
    }

    #[test]
    fn test_example_timestamp_parses() {
        let cfg: GeneratorConfig =
            toml::from_str("example_timestamp = \"2025-12-12T05:32:50Z\"").unwrap();
        let ts = cfg.example_timestamp.unwrap();
        assert_eq!(ts.to_rfc3339(), "2025-12-12T05:32:50+00:00");
    }

    #[test]
    fn test_invalid_config_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        fs::write(&path, "enum_naming = 3").unwrap();
        assert!(load_generator_config(&path).is_err());
    }

    #[test]
    fn test_auto_detect_next_to_draft() {
        let dir = tempfile::tempdir().unwrap();
        let draft = dir.path().join("draft.yaml");
        assert!(resolve_config_path(None, &draft).is_none());

        fs::write(dir.path().join(CONFIG_FILE_NAME), "").unwrap();
        assert_eq!(
            resolve_config_path(None, &draft),
            Some(dir.path().join(CONFIG_FILE_NAME))
        );
    }

    #[test]
    fn test_explicit_missing_config_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let draft = dir.path().join("draft.yaml");
        let res = load_or_default(Some(&dir.path().join("nope.toml")), &draft);
        assert!(res.is_err());
    }
}
