//! Stub loading and slot substitution.
//!
//! Stubs are plain text files containing `{{ slot }}` tokens. They are looked
//! up in the configured stub directories first and then among the stubs
//! compiled into the binary, so a project can override any of them by
//! dropping a file of the same name into its own stub directory.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::config::GeneratorConfig;
use crate::error::GeneratorError;

pub const CONTROLLER_CLASS_STUB: &str = "api-controller.class.stub";
pub const DATA_CLASS_STUB: &str = "data.class.stub";

/// `api-controller.method.{verb}.stub`
pub fn controller_method_stub(verb: &str) -> String {
    format!("api-controller.method.{verb}.stub")
}

const BUILTIN_STUBS: [(&str, &str); 7] = [
    (
        CONTROLLER_CLASS_STUB,
        include_str!("../../stubs/api-controller.class.stub"),
    ),
    (
        "api-controller.method.index.stub",
        include_str!("../../stubs/api-controller.method.index.stub"),
    ),
    (
        "api-controller.method.show.stub",
        include_str!("../../stubs/api-controller.method.show.stub"),
    ),
    (
        "api-controller.method.store.stub",
        include_str!("../../stubs/api-controller.method.store.stub"),
    ),
    (
        "api-controller.method.update.stub",
        include_str!("../../stubs/api-controller.method.update.stub"),
    ),
    (
        "api-controller.method.destroy.stub",
        include_str!("../../stubs/api-controller.method.destroy.stub"),
    ),
    (DATA_CLASS_STUB, include_str!("../../stubs/data.class.stub")),
];

static SLOT_RE: Lazy<Regex> = Lazy::new(|| {
    #[allow(clippy::expect_used)]
    Regex::new(r"\{\{\s*([A-Za-z_][A-Za-z0-9_]*)\s*\}\}").expect("slot pattern is valid")
});

/// Where a stub was loaded from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StubSource {
    File(PathBuf),
    Builtin,
}

/// A loaded template.
#[derive(Debug, Clone)]
pub struct Stub {
    pub name: String,
    pub source: StubSource,
    pub text: String,
}

impl Stub {
    pub fn render(&self, slots: &SlotMap) -> String {
        substitute(&self.text, slots)
    }
}

/// Finds stubs by file name.
#[derive(Debug, Clone)]
pub struct StubLoader {
    dirs: Vec<PathBuf>,
    builtin: bool,
}

impl StubLoader {
    pub fn new(dirs: Vec<PathBuf>, builtin: bool) -> Self {
        Self { dirs, builtin }
    }

    pub fn from_config(config: &GeneratorConfig) -> Self {
        Self::new(config.stubs_dirs.clone(), config.builtin_stubs)
    }

    /// Load a stub that must exist.
    pub fn load(&self, name: &str) -> Result<Stub, GeneratorError> {
        self.find(name)?
            .ok_or_else(|| GeneratorError::TemplateNotFound {
                name: name.to_string(),
                searched: self.dirs.clone(),
            })
    }

    /// Look for an optional stub. Absence is `Ok(None)`; only read failures
    /// on a file that does exist are errors.
    pub fn find(&self, name: &str) -> Result<Option<Stub>, GeneratorError> {
        for dir in &self.dirs {
            let path = dir.join(name);
            if let Some(text) = read_if_exists(&path)? {
                debug!(stub = name, path = %path.display(), "Loaded stub from directory");
                return Ok(Some(Stub {
                    name: name.to_string(),
                    source: StubSource::File(path),
                    text,
                }));
            }
        }

        if self.builtin {
            if let Some((_, text)) = BUILTIN_STUBS.iter().find(|(n, _)| *n == name) {
                return Ok(Some(Stub {
                    name: name.to_string(),
                    source: StubSource::Builtin,
                    text: (*text).to_string(),
                }));
            }
        }
        Ok(None)
    }
}

fn read_if_exists(path: &Path) -> Result<Option<String>, GeneratorError> {
    match fs::read_to_string(path) {
        Ok(text) => Ok(Some(text)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(GeneratorError::io(path, e)),
    }
}

/// Slot name to replacement text.
#[derive(Debug, Clone, Default)]
pub struct SlotMap {
    slots: BTreeMap<String, String>,
}

impl SlotMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, slot: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.slots.insert(slot.into(), value.into());
        self
    }

    pub fn with(mut self, slot: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(slot, value);
        self
    }

    pub fn get(&self, slot: &str) -> Option<&str> {
        self.slots.get(slot).map(String::as_str)
    }
}

/// Replace every `{{ slot }}` token in one pass.
///
/// Inserted values are never scanned again, so a value that itself contains
/// `{{ x }}` comes out verbatim. Tokens without a value are left untouched.
pub fn substitute(template: &str, slots: &SlotMap) -> String {
    SLOT_RE
        .replace_all(template, |caps: &Captures<'_>| {
            let name = &caps[1];
            match slots.get(name) {
                Some(value) => value.to_string(),
                None => {
                    debug!(slot = name, "No value for slot, leaving token in place");
                    caps[0].to_string()
                }
            }
        })
        .into_owned()
}
