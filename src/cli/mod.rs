//! # CLI Module
//!
//! Command-line interface for the generator.
//!
//! ## Commands
//!
//! ### `generate`
//!
//! Generate controllers and Data classes from a draft:
//!
//! ```bash
//! blueprint-apigen generate --draft draft.yaml --output .
//! ```
//!
//! Options:
//! - `--draft <FILE>` - Draft YAML describing models and controllers (required)
//! - `--output <DIR>` - Project root the artifacts are written under (default: `.`)
//! - `--config <FILE>` - Generator config (default: `apigen.toml` next to the draft)
//! - `--only <PARTS>` - Restrict to `controllers` and/or `data`
//! - `--dry-run` - Report what would be written without touching disk
//! - `--timestamp <RFC3339>` - Fix the clock used for date examples
//!
//! ### `inspect`
//!
//! Print the filters, sorts, includes and enum classes derived for every
//! model as JSON:
//!
//! ```bash
//! blueprint-apigen inspect --draft draft.yaml
//! ```
//!
//! ### `delete-resource`
//!
//! List (or with `--yes`, delete) the files belonging to a resource:
//!
//! ```bash
//! blueprint-apigen delete-resource Post --root . --yes
//! ```
//!
//! ## Usage from Code
//!
//! ```rust,ignore
//! use blueprint_apigen::cli::{run, Cli};
//! use clap::Parser;
//!
//! run(Cli::parse())?;
//! ```

mod commands;

pub use commands::{run, run_cli, Cli, Commands, OnlyPart};
