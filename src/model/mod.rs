//! # Model Module
//!
//! In-memory schema consumed by the generator: entities with their columns
//! and relationships, plus the controllers declared for them.
//!
//! The generator only ever reads these types. Drafts on disk are turned into a
//! [`Schema`] by [`load_draft`], which lives here so the generator itself
//! never touches a file format.

mod load;
mod types;

pub use load::*;
pub use types::*;
