use std::fmt;
use std::io;
use std::path::PathBuf;

/// Errors produced while generating artifacts.
///
/// `TemplateNotFound` is scoped to a single entity: the run records it and
/// moves on. `Io` aborts the run and is handed back to the caller.
#[derive(Debug)]
pub enum GeneratorError {
    /// A required stub could not be found in any search location
    TemplateNotFound {
        /// Stub name, e.g. `api-controller.class.stub`
        name: String,
        /// Directories that were searched
        searched: Vec<PathBuf>,
    },
    /// Reading a stub or writing an artifact failed
    Io {
        /// The file or directory involved
        path: PathBuf,
        /// Underlying error
        source: io::Error,
    },
}

impl GeneratorError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        GeneratorError::Io {
            path: path.into(),
            source,
        }
    }
}

impl fmt::Display for GeneratorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GeneratorError::TemplateNotFound { name, searched } => {
                write!(f, "stub '{name}' not found")?;
                if searched.is_empty() {
                    write!(f, " (no stub directories configured, built-in stubs disabled)")
                } else {
                    let dirs = searched
                        .iter()
                        .map(|p| p.display().to_string())
                        .collect::<Vec<_>>()
                        .join(", ");
                    write!(f, " (searched: {dirs})")
                }
            }
            GeneratorError::Io { path, source } => {
                write!(f, "I/O error on {}: {source}", path.display())
            }
        }
    }
}

impl std::error::Error for GeneratorError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GeneratorError::TemplateNotFound { .. } => None,
            GeneratorError::Io { source, .. } => Some(source),
        }
    }
}
