//! classmark rules - Wrappers around the class generator's rules
//!
//! Each wrapper runs the generator's own rule and then post-processes the
//! result:
//!
//! - **ConstructorRule**: resolves whether the no-args constructor is wanted,
//!   prunes it if not, and announces every remaining constructor
//! - **ObjectRule** / **EnumRule**: announce every finished type
//! - **NotRequiredRule**: marks optional properties `Nullable` (deprecated
//!   checker-compatible mode)
//!
//! `RuleFactory` builds all of them from one configuration and annotator tree.

mod constructor;
mod error;
mod factory;
mod not_required;
mod object;
mod prune;
mod resolver;
mod rule;

pub use constructor::ConstructorRule;
pub use error::{Result, RuleError};
pub use factory::{RuleFactory, NOOP_ANNOTATOR};
pub use not_required::NotRequiredRule;
pub use object::{EnumRule, ObjectRule};
pub use prune::ConstructorPruner;
pub use resolver::{ConfigurationResolver, DEFAULT_INCLUDE_NO_ARGS_CONSTRUCTOR, INCLUDE_NO_ARGS_CONSTRUCTOR};
pub use rule::{Member, Rule, SchemaNode};
