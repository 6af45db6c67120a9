//! Rule factory wiring the wrappers to one configuration and annotator tree

use std::sync::Arc;

use classmark_annotators::{CheckerableAnnotator, Listener, NullabilityAnnotator};
use classmark_config::GenerationConfig;
use classmark_model::TypeId;
use tracing::info;

use crate::constructor::ConstructorRule;
use crate::error::{Result, RuleError};
use crate::not_required::NotRequiredRule;
use crate::object::{EnumRule, ObjectRule};
use crate::rule::{Member, Rule};

/// Custom annotator name that stands for no custom annotator
pub const NOOP_ANNOTATOR: &str = "noop";

/// Builds rule wrappers sharing a configuration, an annotator tree and an
/// optional explicit no-args constructor inclusion flag
#[derive(Clone)]
pub struct RuleFactory {
    config: Arc<dyn GenerationConfig>,
    annotator: Listener,
    include_no_args_constructor: Option<bool>,
    checker_compatible: bool,
}

impl RuleFactory {
    /// Inclusion of the no-args constructor is inferred from the build tool
    pub fn new(config: Arc<dyn GenerationConfig>, annotator: Listener) -> Self {
        Self {
            config,
            annotator,
            include_no_args_constructor: None,
            checker_compatible: false,
        }
    }

    /// Factory whose annotator tree holds the nullability annotator
    pub fn with_default_annotator(config: Arc<dyn GenerationConfig>) -> Self {
        let annotator = Self::default_annotator(config.as_ref());
        Self::new(config, annotator)
    }

    pub fn default_annotator(config: &dyn GenerationConfig) -> Listener {
        Listener::composite([Listener::lifecycle(NullabilityAnnotator::new(config))])
    }

    /// Always removes the no-args constructor
    pub fn exclude_no_args_constructor(config: Arc<dyn GenerationConfig>, annotator: Listener) -> Self {
        Self::new(config, annotator).with_include_no_args_constructor(Some(false))
    }

    /// Always keeps the no-args constructor
    pub fn include_no_args_constructor(config: Arc<dyn GenerationConfig>, annotator: Listener) -> Self {
        Self::new(config, annotator).with_include_no_args_constructor(Some(true))
    }

    /// Checker-compatible mode (deprecated)
    ///
    /// Not-required properties are marked `Nullable`. Without a configured
    /// custom annotator the tree gains a `CheckerableAnnotator`; with one, the
    /// tree must already be checker-compatible.
    pub fn checker_compatible(config: Arc<dyn GenerationConfig>, annotator: Listener) -> Result<Self> {
        let mut factory = Self::new(config, Listener::composite([]));
        factory.checker_compatible = true;
        factory.set_annotator(annotator)?;
        Ok(factory)
    }

    pub fn with_include_no_args_constructor(mut self, include: Option<bool>) -> Self {
        self.include_no_args_constructor = include;
        self
    }

    pub fn config(&self) -> &dyn GenerationConfig {
        self.config.as_ref()
    }

    pub fn annotator(&self) -> &Listener {
        &self.annotator
    }

    pub fn include_no_args_constructor_flag(&self) -> Option<bool> {
        self.include_no_args_constructor
    }

    pub fn is_checker_compatible(&self) -> bool {
        self.checker_compatible
    }

    pub fn set_annotator(&mut self, annotator: Listener) -> Result<()> {
        self.annotator = if self.checker_compatible {
            self.compose_checkerable(annotator)?
        } else {
            annotator
        };
        info!(annotator = ?self.annotator, "annotator tree set");
        Ok(())
    }

    fn compose_checkerable(&self, annotator: Listener) -> Result<Listener> {
        match self.config.custom_annotator() {
            Some(custom) if custom != NOOP_ANNOTATOR => {
                if annotator.is_checker_compatible() {
                    Ok(annotator)
                } else {
                    Err(RuleError::InvalidConfiguration {
                        reason: format!("custom annotator `{custom}` is not checker-compatible"),
                    })
                }
            }
            _ if annotator.is_checker_compatible() => Ok(annotator),
            _ => Ok(Listener::composite([annotator, Listener::lifecycle(CheckerableAnnotator::new())])),
        }
    }

    // ========== Rules ==========

    pub fn constructor_rule<R>(&self, delegate: R) -> Result<ConstructorRule<R>>
    where
        R: Rule<TypeId, TypeId>,
    {
        ConstructorRule::new(
            Arc::clone(&self.config),
            self.annotator.clone(),
            self.include_no_args_constructor,
            delegate,
        )
    }

    pub fn object_rule<R>(&self, delegate: R) -> ObjectRule<R> {
        ObjectRule::new(self.annotator.clone(), delegate)
    }

    pub fn enum_rule<R>(&self, delegate: R) -> EnumRule<R> {
        EnumRule::new(self.annotator.clone(), delegate)
    }

    /// The delegate itself, wrapped in `NotRequiredRule` in checker-compatible mode
    pub fn not_required_rule<R>(&self, delegate: R) -> Box<dyn Rule<Member, Member>>
    where
        R: Rule<Member, Member> + 'static,
    {
        if self.checker_compatible {
            Box::new(NotRequiredRule::new(delegate))
        } else {
            Box::new(delegate)
        }
    }
}
