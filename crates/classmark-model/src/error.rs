//! Error types for model construction and mutation

use thiserror::Error;

use crate::{MethodId, TypeId};

/// Errors raised while building or mutating a code model
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    /// E-MODEL-001: A field name is declared twice on one type
    #[error("duplicate field `{field}` on type `{owner}`")]
    DuplicateField { owner: String, field: String },

    /// E-MODEL-002: A type id does not belong to the model
    #[error("unknown type id {0:?}")]
    UnknownType(TypeId),

    /// E-MODEL-003: A member enumerated on a type is absent from its canonical list
    #[error("method {method:?} missing from canonical member list of `{owner}`")]
    MissingMember { owner: String, method: MethodId },

    /// E-MODEL-004: A type names a parent that is not in the model
    #[error("type `{ty}` has unknown parent {parent:?}")]
    UnknownParent { ty: String, parent: TypeId },

    /// E-MODEL-005: Following parents from a type leads back to it
    #[error("type `{ty}` is nested inside itself")]
    NestingCycle { ty: String },
}

impl ModelError {
    /// Error code for machine-readable output
    pub fn code(&self) -> &'static str {
        match self {
            ModelError::DuplicateField { .. } => "E-MODEL-001",
            ModelError::UnknownType(_) => "E-MODEL-002",
            ModelError::MissingMember { .. } => "E-MODEL-003",
            ModelError::UnknownParent { .. } => "E-MODEL-004",
            ModelError::NestingCycle { .. } => "E-MODEL-005",
        }
    }
}
