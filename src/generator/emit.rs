use serde::Serialize;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::info;

use crate::error::GeneratorError;

/// Kind of class-level artifact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum ArtifactKind {
    Controller,
    Data,
}

impl ArtifactKind {
    /// Manifest label.
    pub fn label(self) -> &'static str {
        match self {
            ArtifactKind::Controller => "API Controller",
            ArtifactKind::Data => "Data",
        }
    }
}

impl std::fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// One rendered file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedArtifact {
    pub kind: ArtifactKind,
    pub path: PathBuf,
    pub content: String,
}

/// `(kind label, path)` as reported after a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ManifestEntry {
    pub kind: &'static str,
    pub path: PathBuf,
}

/// Writes artifacts under an output root and keeps the manifest.
///
/// Each file is written to a temporary file in its destination directory and
/// then renamed over the target, so readers never see partial content.
/// Existing files are overwritten.
#[derive(Debug)]
pub struct FileEmitter {
    root: PathBuf,
    dry_run: bool,
    artifacts: Vec<GeneratedArtifact>,
}

impl FileEmitter {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        let root = if root.is_absolute() {
            root
        } else {
            std::env::current_dir()
                .map(|cwd| cwd.join(&root))
                .unwrap_or(root)
        };
        Self {
            root,
            dry_run: false,
            artifacts: Vec::new(),
        }
    }

    /// Record artifacts without touching the filesystem.
    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn is_dry_run(&self) -> bool {
        self.dry_run
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolve a path relative to the output root.
    pub fn path_for(&self, relative: impl AsRef<Path>) -> PathBuf {
        self.root.join(relative)
    }

    pub fn emit(
        &mut self,
        kind: ArtifactKind,
        path: PathBuf,
        content: String,
    ) -> Result<(), GeneratorError> {
        if self.dry_run {
            info!(kind = kind.label(), path = %path.display(), "Would write artifact (dry run)");
        } else {
            write_atomically(&path, &content)?;
            info!(
                kind = kind.label(),
                path = %path.display(),
                bytes = content.len(),
                "Wrote artifact"
            );
        }
        self.artifacts.push(GeneratedArtifact {
            kind,
            path,
            content,
        });
        Ok(())
    }

    pub fn artifacts(&self) -> &[GeneratedArtifact] {
        &self.artifacts
    }

    pub fn manifest(&self) -> Vec<ManifestEntry> {
        self.artifacts
            .iter()
            .map(|a| ManifestEntry {
                kind: a.kind.label(),
                path: a.path.clone(),
            })
            .collect()
    }
}

fn write_atomically(path: &Path, content: &str) -> Result<(), GeneratorError> {
    let dir = path
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."));
    fs::create_dir_all(&dir).map_err(|e| GeneratorError::io(&dir, e))?;

    let mut tmp = NamedTempFile::new_in(&dir).map_err(|e| GeneratorError::io(&dir, e))?;
    tmp.write_all(content.as_bytes())
        .map_err(|e| GeneratorError::io(tmp.path(), e))?;
    tmp.persist(path).map_err(|e| GeneratorError::io(path, e.error))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]

    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_emit_creates_dirs_and_overwrites() {
        let dir = tempdir().unwrap();
        let mut emitter = FileEmitter::new(dir.path());
        let path = emitter.path_for("app/Data/PostData.php");

        emitter
            .emit(ArtifactKind::Data, path.clone(), "first".to_string())
            .unwrap();
        emitter
            .emit(ArtifactKind::Data, path.clone(), "second".to_string())
            .unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "second");
        assert_eq!(emitter.manifest().len(), 2);
        assert_eq!(emitter.manifest()[0].kind, "Data");

        // no temp files left behind
        let entries: Vec<_> = fs::read_dir(path.parent().unwrap()).unwrap().collect();
        assert_eq!(entries.len(), 1);
    }

    #[test]
    fn test_dry_run_writes_nothing() {
        let dir = tempdir().unwrap();
        let mut emitter = FileEmitter::new(dir.path()).dry_run(true);
        let path = emitter.path_for("app/Http/Controllers/Api/PostController.php");
        emitter
            .emit(ArtifactKind::Controller, path.clone(), "x".to_string())
            .unwrap();

        assert!(!path.exists());
        assert_eq!(emitter.manifest()[0].kind, "API Controller");
        assert_eq!(emitter.artifacts()[0].content, "x");
    }

    #[test]
    fn test_relative_root_is_made_absolute() {
        let emitter = FileEmitter::new("out");
        assert!(emitter.root().is_absolute());
    }
}
