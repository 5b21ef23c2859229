//! # Generator Module
//!
//! Turns a [`Schema`](crate::model::Schema) into API source artifacts: one
//! controller class per API controller and one typed Data class per entity.
//!
//! ## Pipeline
//!
//! ```text
//! Schema → type mapping / naming / allow-lists / examples → fragments
//!        → stub substitution → FileEmitter → manifest
//! ```
//!
//! Each artifact gets its own [`ImportRegistry`]; fragment builders add the
//! types they reference and the registry is rendered once into the
//! `{{ imports }}` slot of the class stub.
//!
//! ## Stubs
//!
//! | Stub | Slots |
//! |------|-------|
//! | `api-controller.class.stub` | `namespace`, `imports`, `class`, `model`, `modelClass`, `resourceClass`, `allowedFilters`, `allowedSorts`, `allowedIncludes`, `methods` |
//! | `api-controller.method.{index,show,store,update,destroy}.stub` | `modelVariable`, `modelClass`, `modelName`, `modelPlural`, `resourceClass`, `dataClass` (store/update), `{verb}Attributes` |
//! | `data.class.stub` | `namespace`, `imports`, `class`, `properties` |
//!
//! Stubs found in a configured stub directory take precedence over the
//! built-in ones. Method stubs are optional; class stubs are required.
//!
//! ## Example
//!
//! ```rust,ignore
//! use blueprint_apigen::config::GeneratorConfig;
//! use blueprint_apigen::generator::{FileEmitter, Generator};
//! use blueprint_apigen::model::load_draft;
//!
//! let schema = load_draft("draft.yaml".as_ref())?;
//! let mut emitter = FileEmitter::new("out");
//! let report = Generator::new(GeneratorConfig::default()).generate(&schema, &mut emitter)?;
//! for entry in &report.manifest {
//!     println!("{}: {}", entry.kind, entry.path.display());
//! }
//! ```

pub mod allow_list;
mod controller;
mod data;
mod emit;
pub mod example_value;
mod imports;
pub mod naming;
mod project;
pub mod templates;
mod types;

pub use allow_list::{allowed_filters, allowed_includes, allowed_sorts, format_array, FilterEntry};
pub use controller::ControllerBuilder;
pub use data::DataBuilder;
pub use emit::{ArtifactKind, FileEmitter, GeneratedArtifact, ManifestEntry};
pub use example_value::{describe, ExampleSynthesizer};
pub use imports::ImportRegistry;
pub use naming::{ClassNames, EnumResolver};
pub use project::{EntityFailure, GenerationReport, Generator};
pub use templates::{substitute, SlotMap, Stub, StubLoader};
pub use types::{map_type, DocType, MappedType, TargetType};

#[cfg(test)]
mod tests;
