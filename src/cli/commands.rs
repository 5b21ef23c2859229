use anyhow::Context;
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::cleanup::{delete_resource, manual_cleanup_steps, resource_file_paths};
use crate::config::{load_generator_config, load_or_default, GeneratorConfig};
use crate::generator::allow_list::render_filters;
use crate::generator::{
    allowed_filters, allowed_includes, allowed_sorts, ArtifactKind, EnumResolver, FileEmitter,
    Generator, ImportRegistry,
};
use crate::model::{load_draft, DataType, Schema};

/// Command-line interface for the API generator
#[derive(Parser)]
#[command(name = "blueprint-apigen")]
#[command(about = "Generate API controllers and Data objects from a model draft", long_about = None)]
pub struct Cli {
    /// The subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Generate controllers and Data classes from a draft
    Generate {
        /// Path to the draft YAML file
        #[arg(short, long)]
        draft: PathBuf,

        /// Project root the artifacts are written under
        #[arg(short, long, default_value = ".")]
        output: PathBuf,

        /// Path to the generator config (apigen.toml).
        /// If not provided, will auto-detect alongside the draft
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Limit generation to specific parts (comma-separated or repeated)
        #[arg(long, value_enum, num_args = 1.., value_delimiter = ',')]
        only: Option<Vec<OnlyPart>>,

        /// Perform a dry run: show what would be written without writing files
        #[arg(long, default_value_t = false)]
        dry_run: bool,

        /// Clock used for date-time and year examples (RFC 3339).
        /// Overrides `example_timestamp` from the config
        #[arg(long, value_parser = parse_timestamp)]
        timestamp: Option<DateTime<Utc>>,
    },
    /// Print the allow-lists derived for each model as JSON
    Inspect {
        /// Path to the draft YAML file
        #[arg(short, long)]
        draft: PathBuf,

        /// Path to the generator config (apigen.toml)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// List or delete the files belonging to a resource
    DeleteResource {
        /// Resource name (e.g. `Post`)
        name: String,

        /// Project root
        #[arg(long, default_value = ".")]
        root: PathBuf,

        /// Path to the generator config (apigen.toml)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Actually delete; without this flag the files are only listed
        #[arg(long, default_value_t = false)]
        yes: bool,
    },
}

/// Artifact kinds selectable with `--only`
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OnlyPart {
    /// API controller classes
    Controllers,
    /// Data object classes
    Data,
}

impl From<OnlyPart> for ArtifactKind {
    fn from(part: OnlyPart) -> Self {
        match part {
            OnlyPart::Controllers => ArtifactKind::Controller,
            OnlyPart::Data => ArtifactKind::Data,
        }
    }
}

fn parse_timestamp(s: &str) -> Result<DateTime<Utc>, String> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| format!("invalid RFC 3339 timestamp '{s}': {e}"))
}

/// Parse the process arguments and run the selected command.
pub fn run_cli() -> anyhow::Result<()> {
    run(Cli::parse())
}

/// Run an already parsed command line.
pub fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Commands::Generate {
            draft,
            output,
            config,
            only,
            dry_run,
            timestamp,
        } => {
            let mut config = load_or_default(config.as_deref(), &draft)?;
            if timestamp.is_some() {
                config.example_timestamp = timestamp;
            }
            let schema = load_draft(&draft)?;

            let mut generator = Generator::new(config);
            if let Some(parts) = only {
                generator = generator.only(parts.into_iter().map(ArtifactKind::from));
            }

            let mut emitter = FileEmitter::new(output).dry_run(dry_run);
            let report = generator
                .generate(&schema, &mut emitter)
                .context("Generation failed")?;

            let verb = if dry_run { "Would create" } else { "Created" };
            for entry in &report.manifest {
                println!("✅ {verb} {}: {}", entry.kind, entry.path.display());
            }
            for failure in &report.failures {
                println!("⚠️  Skipped {} {}: {}", failure.kind, failure.name, failure.error);
            }
            if !report.is_success() {
                anyhow::bail!("{} artifact(s) could not be generated", report.failures.len());
            }
            Ok(())
        }
        Commands::Inspect { draft, config } => {
            let config = load_or_default(config.as_deref(), &draft)?;
            let schema = load_draft(&draft)?;
            let summary = inspect_schema(&schema, &config);
            println!("{}", serde_json::to_string_pretty(&summary)?);
            Ok(())
        }
        Commands::DeleteResource {
            name,
            root,
            config,
            yes,
        } => {
            let config = match config {
                Some(path) => load_generator_config(&path)?
                    .with_context(|| format!("Config file not found: {}", path.display()))?,
                None => GeneratorConfig::default(),
            };
            run_delete_resource(&root, &config, &name, yes)
        }
    }
}

/// Per-model summary printed by `inspect`.
#[derive(Debug, Serialize)]
pub struct ModelSummary {
    pub filters: String,
    pub sorts: Vec<String>,
    pub includes: Vec<String>,
    pub enums: BTreeMap<String, String>,
}

pub(crate) fn inspect_schema(
    schema: &Schema,
    config: &GeneratorConfig,
) -> BTreeMap<String, ModelSummary> {
    let enums = EnumResolver::new(config);
    schema
        .models
        .iter()
        .map(|model| {
            let mut imports = ImportRegistry::new();
            let summary = ModelSummary {
                filters: render_filters(&allowed_filters(Some(model)), &mut imports),
                sorts: allowed_sorts(Some(model)),
                includes: allowed_includes(Some(model)),
                enums: model
                    .columns()
                    .iter()
                    .filter(|c| c.data_type == DataType::Enum)
                    .map(|c| (c.name.clone(), enums.resolve(model, c)))
                    .collect(),
            };
            (model.name.clone(), summary)
        })
        .collect()
}

fn run_delete_resource(
    root: &Path,
    config: &GeneratorConfig,
    name: &str,
    yes: bool,
) -> anyhow::Result<()> {
    if !yes {
        println!("⚠️  The following files belong to the \"{name}\" resource:");
        for path in resource_file_paths(config, name) {
            let marker = if root.join(&path).is_file() { "✓" } else { "⊘" };
            println!("  {marker} {}", path.display());
        }
        println!("Re-run with --yes to delete them.");
        return Ok(());
    }

    let report = delete_resource(root, config, name)?;
    println!("Deleted {} file(s):", report.deleted.len());
    for path in &report.deleted {
        println!("  - {}", path.display());
    }
    if !report.missing.is_empty() {
        println!("Skipped {} file(s) (not found):", report.missing.len());
        for path in &report.missing {
            println!("  - {}", path.display());
        }
    }

    println!();
    println!("📋 MANUAL CLEANUP REQUIRED:");
    for (i, step) in manual_cleanup_steps(name).iter().enumerate() {
        println!("{}. {}", i + 1, step.title);
        for item in &step.items {
            println!("   - {item}");
        }
    }
    Ok(())
}
