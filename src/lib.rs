//! classmark - Annotation inference for schema-generated classes
//!
//! This is the root workspace crate that provides integration tests.
//! The actual implementation is in the workspace member crates.

// Re-export main crates for convenience
pub use classmark_annotators as annotators;
pub use classmark_config as config;
pub use classmark_model as model;
pub use classmark_rules as rules;
