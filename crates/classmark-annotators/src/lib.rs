//! classmark annotators - Listener dispatch and annotation propagation
//!
//! Lifecycle events of the class generator flow through a listener tree to
//! every lifecycle-capable annotator. The built-in annotators classify property
//! fields by nullability and spread the matching marker family to the
//! constructor parameters, setters and getters of the type.
//!
//! ```text
//! finished type ─► Listener tree ─► NullabilityAnnotator
//!                                     ├─ creator hints
//!                                     ├─ NullabilityClassifier
//!                                     └─ MemberAnnotationPropagator
//! ```

mod checkerable;
mod classify;
mod creator;
mod listener;
mod nullability;
mod propagate;
pub mod vocabulary;

pub use checkerable::CheckerableAnnotator;
pub use classify::{Classification, NullabilityBucket, NullabilityClassifier};
pub use creator::{annotate_creator, CreatorAnnotator};
pub use listener::{on_constructor_finished, on_type_finished, Annotator, ConstructorRef, LifecycleAnnotator, Listener};
pub use nullability::NullabilityAnnotator;
pub use propagate::{
    is_identifier, property_name, safe_annotate, MemberAnnotationPropagator, ParamMatching, PlacementRules,
    EQUALS_METHOD,
};
pub use vocabulary::MarkerFamilies;
