//! classmark model - The generated-code model
//!
//! This crate defines the in-memory model handed over by a schema-driven class
//! generator: an arena of types, their fields, methods and constructors, and the
//! annotation sets attached to each of them.
//!
//! The engine only ever mutates annotation sets and removes constructors. It
//! never adds fields or ordinary methods and never creates types.

mod annotation;
mod error;
mod model;
mod node;
mod types;

pub use annotation::*;
pub use error::ModelError;
pub use model::*;
pub use node::*;
pub use types::*;
