//! Removing the files that belong to a generated resource.
//!
//! Deletion only covers files at their conventional paths. Anything that
//! needs editing rather than deleting (routes, migrations, references in
//! other classes) is reported through [`manual_cleanup_steps`].

use anyhow::Context;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::config::GeneratorConfig;
use crate::generator::naming::{plural, snake, studly};

/// Files that make up the resource `name`, relative to the project root.
pub fn resource_file_paths(config: &GeneratorConfig, name: &str) -> Vec<PathBuf> {
    let name = studly(name);
    let ext = &config.extension;
    let app = PathBuf::from(&config.app_path);
    let ns = &config.controller_namespace;

    vec![
        app.join("Data").join(format!("{name}Data.{ext}")),
        app.join("Http/Controllers")
            .join(ns)
            .join(format!("{name}Controller.{ext}")),
        app.join("Http/Requests")
            .join(ns)
            .join(format!("{name}StoreRequest.{ext}")),
        app.join("Http/Requests")
            .join(ns)
            .join(format!("{name}UpdateRequest.{ext}")),
        app.join("Http/Resources")
            .join(ns)
            .join(format!("{name}Collection.{ext}")),
        app.join("Http/Resources")
            .join(ns)
            .join(format!("{name}Resource.{ext}")),
        app.join(&config.models_namespace)
            .join(format!("{name}.{ext}")),
        PathBuf::from("database/factories").join(format!("{name}Factory.{ext}")),
        PathBuf::from("database/seeders").join(format!("{name}Seeder.{ext}")),
    ]
}

/// What [`delete_resource`] did.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CleanupReport {
    pub deleted: Vec<PathBuf>,
    pub missing: Vec<PathBuf>,
}

/// Delete every existing file of resource `name` under `root`.
///
/// Paths in the report are relative to `root`.
pub fn delete_resource(
    root: &Path,
    config: &GeneratorConfig,
    name: &str,
) -> anyhow::Result<CleanupReport> {
    let mut report = CleanupReport::default();
    for relative in resource_file_paths(config, name) {
        let path = root.join(&relative);
        if path.is_file() {
            fs::remove_file(&path)
                .with_context(|| format!("Failed to delete {}", path.display()))?;
            info!(path = %relative.display(), "Deleted");
            report.deleted.push(relative);
        } else {
            warn!(path = %relative.display(), "Not found");
            report.missing.push(relative);
        }
    }
    Ok(report)
}

/// A group of follow-up tasks that cannot be automated safely.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CleanupStep {
    pub title: &'static str,
    pub items: Vec<String>,
}

/// Manual follow-ups after deleting resource `name`.
pub fn manual_cleanup_steps(name: &str) -> Vec<CleanupStep> {
    let table = snake(&plural(&studly(name)));
    vec![
        CleanupStep {
            title: "Database & Migrations",
            items: vec![
                format!("Remove migration file(s) for the '{table}' table from database/migrations/"),
                format!("Drop the '{table}' table if it exists: Schema::dropIfExists('{table}');"),
            ],
        },
        CleanupStep {
            title: "Routes",
            items: vec![
                "Remove API routes from routes/api.php".to_string(),
                "Remove web routes from routes/web.php (if any)".to_string(),
            ],
        },
        CleanupStep {
            title: "References",
            items: vec![
                "Search and remove references in other models (relationships, imports)".to_string(),
                "Update any controllers, services, or classes that use this resource".to_string(),
                "Remove test files from tests/Feature/ and tests/Unit/".to_string(),
            ],
        },
        CleanupStep {
            title: "Database Seeders",
            items: vec!["Remove seeder calls from database/seeders/DatabaseSeeder.php".to_string()],
        },
        CleanupStep {
            title: "Regenerate Cache & Documentation",
            items: vec![
                "php artisan optimize:clear".to_string(),
                "php artisan ide-helper:generate".to_string(),
                "php artisan ide-helper:meta".to_string(),
            ],
        },
    ]
}
