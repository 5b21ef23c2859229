//! # blueprint-apigen
//!
//! Generates the API layer of a Laravel-style application from a declarative
//! model draft: one query-builder controller per API controller and one typed
//! Data object per model.
//!
//! ## Overview
//!
//! - **[`model`]** - Entities, columns, relationships and controllers, plus the draft YAML parser
//! - **[`generator`]** - Type mapping, naming, allow-lists, example values, stubs and
//!   the file emitter
//! - **[`cleanup`]** - Listing and deleting the files of a generated resource
//! - **[`config`]** - `apigen.toml` generator configuration
//! - **[`logging`]** - `tracing` subscriber setup
//! - **[`cli`]** - The `blueprint-apigen` command line
//!
//! ## Generation Flow
//!
//! ```mermaid
//! sequenceDiagram
//!     participant User
//!     participant CLI as CLI<br/>(blueprint-apigen)
//!     participant Draft as model::load_draft
//!     participant Gen as generator::Generator
//!     participant Stubs as generator::templates
//!     participant FS as FileEmitter
//!
//!     User->>CLI: generate --draft draft.yaml
//!     CLI->>Draft: load_draft("draft.yaml")
//!     Draft-->>CLI: Schema
//!     CLI->>Gen: generate(&schema, &mut emitter)
//!     loop each controller / model
//!         Gen->>Stubs: load class stub
//!         Gen->>Gen: allow-lists, properties, attributes
//!         Gen->>Stubs: substitute slots
//!         Gen->>FS: emit(kind, path, content)
//!     end
//!     Gen-->>CLI: GenerationReport (manifest, failures)
//! ```
//!
//! ## Example
//!
//! ```rust,ignore
//! use blueprint_apigen::config::GeneratorConfig;
//! use blueprint_apigen::generator::{FileEmitter, Generator};
//! use blueprint_apigen::model::{Column, DataType, Entity, Schema};
//!
//! let schema = Schema::new(vec![
//!     Entity::new("Tag").with_column(Column::new("title", DataType::String)),
//! ]);
//! let mut emitter = FileEmitter::new("/srv/app");
//! let report = Generator::new(GeneratorConfig::default()).generate(&schema, &mut emitter)?;
//! assert!(report.is_success());
//! ```

pub mod cleanup;
pub mod cli;
pub mod config;
pub mod error;
pub mod generator;
pub mod logging;
pub mod model;

pub use config::GeneratorConfig;
pub use error::GeneratorError;
pub use generator::{FileEmitter, GenerationReport, Generator};
pub use model::{load_draft, Schema};
