//! Listener trees and lifecycle event dispatch
//!
//! A listener is either a leaf or an ordered composite of listeners. Only
//! lifecycle-capable leaves receive `on_type` / `on_constructor` events; basic
//! leaves are part of the tree for the generator's own hooks and are skipped.

use std::fmt;
use std::sync::Arc;

use classmark_model::{CodeModel, MethodId, TypeId, TypeRef};
use tracing::debug;

/// A listener registered with the class generator
pub trait Annotator: Send + Sync {
    /// Name used in logs
    fn name(&self) -> &str;

    /// Whether the annotator propagates the nullness checker's markers on its own
    fn is_checker_compatible(&self) -> bool {
        false
    }
}

/// An annotator that also listens to type and constructor completion
///
/// Both callbacks default to no-ops.
pub trait LifecycleAnnotator: Annotator {
    /// Called once for every constructor the generator kept
    fn on_constructor(&self, _model: &mut CodeModel, _constructor: ConstructorRef) {}

    /// Called once for every finished class or enum
    fn on_type(&self, _model: &mut CodeModel, _ty: &TypeRef) {}
}

/// Address of a constructor inside the model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConstructorRef {
    pub owner: TypeId,
    pub method: MethodId,
}

/// A listener tree
#[derive(Clone)]
pub enum Listener {
    /// Leaf without lifecycle callbacks
    Basic(Arc<dyn Annotator>),
    /// Leaf with lifecycle callbacks
    Lifecycle(Arc<dyn LifecycleAnnotator>),
    /// Ordered children, possibly composites themselves
    Composite(Vec<Listener>),
}

impl Listener {
    pub fn basic(annotator: impl Annotator + 'static) -> Self {
        Listener::Basic(Arc::new(annotator))
    }

    pub fn lifecycle(annotator: impl LifecycleAnnotator + 'static) -> Self {
        Listener::Lifecycle(Arc::new(annotator))
    }

    pub fn composite(children: impl IntoIterator<Item = Listener>) -> Self {
        Listener::Composite(children.into_iter().collect())
    }

    /// Leaves in depth-first, left-to-right order.
    ///
    /// No deduplication: a leaf reachable twice appears twice.
    pub fn leaves(&self) -> Vec<&Listener> {
        let mut out = Vec::new();
        self.collect_leaves(&mut out);
        out
    }

    fn collect_leaves<'a>(&'a self, out: &mut Vec<&'a Listener>) {
        match self {
            Listener::Composite(children) => {
                for child in children {
                    child.collect_leaves(out);
                }
            }
            leaf => out.push(leaf),
        }
    }

    fn lifecycle_leaves(&self) -> impl Iterator<Item = &Arc<dyn LifecycleAnnotator>> {
        self.leaves().into_iter().filter_map(|leaf| match leaf {
            Listener::Lifecycle(annotator) => Some(annotator),
            _ => None,
        })
    }

    /// Leaf name, `None` for composites
    pub fn name(&self) -> Option<&str> {
        match self {
            Listener::Basic(annotator) => Some(annotator.name()),
            Listener::Lifecycle(annotator) => Some(annotator.name()),
            Listener::Composite(_) => None,
        }
    }

    /// Whether any leaf carries the given name
    pub fn contains(&self, name: &str) -> bool {
        self.leaves().iter().any(|leaf| leaf.name() == Some(name))
    }

    /// Whether any leaf is checker-compatible
    pub fn is_checker_compatible(&self) -> bool {
        self.leaves().iter().any(|leaf| match leaf {
            Listener::Basic(annotator) => annotator.is_checker_compatible(),
            Listener::Lifecycle(annotator) => annotator.is_checker_compatible(),
            Listener::Composite(_) => false,
        })
    }

    pub fn dispatch_constructor(&self, model: &mut CodeModel, constructor: ConstructorRef) {
        for annotator in self.lifecycle_leaves() {
            debug!(annotator = annotator.name(), ?constructor, "constructor finished");
            annotator.on_constructor(model, constructor);
        }
    }

    pub fn dispatch_type(&self, model: &mut CodeModel, ty: &TypeRef) {
        for annotator in self.lifecycle_leaves() {
            debug!(annotator = annotator.name(), ?ty, "type finished");
            annotator.on_type(model, ty);
        }
    }
}

impl fmt::Debug for Listener {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Listener::Basic(annotator) => write!(f, "Basic({})", annotator.name()),
            Listener::Lifecycle(annotator) => write!(f, "Lifecycle({})", annotator.name()),
            Listener::Composite(children) => f.debug_list().entries(children).finish(),
        }
    }
}

/// Notify every lifecycle leaf of `root` that a type is finished
pub fn on_type_finished(root: &Listener, model: &mut CodeModel, ty: &TypeRef) {
    root.dispatch_type(model, ty);
}

/// Notify every lifecycle leaf of `root` that a constructor is finished
pub fn on_constructor_finished(root: &Listener, model: &mut CodeModel, constructor: ConstructorRef) {
    root.dispatch_constructor(model, constructor);
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    type Log = Arc<Mutex<Vec<String>>>;

    struct Recorder {
        label: &'static str,
        log: Log,
    }

    impl Annotator for Recorder {
        fn name(&self) -> &str {
            self.label
        }
    }

    impl LifecycleAnnotator for Recorder {
        fn on_constructor(&self, _model: &mut CodeModel, _constructor: ConstructorRef) {
            self.log.lock().unwrap().push(format!("ctor:{}", self.label));
        }

        fn on_type(&self, _model: &mut CodeModel, _ty: &TypeRef) {
            self.log.lock().unwrap().push(format!("type:{}", self.label));
        }
    }

    struct Plain(&'static str);

    impl Annotator for Plain {
        fn name(&self) -> &str {
            self.0
        }
    }

    struct Silent;

    impl Annotator for Silent {
        fn name(&self) -> &str {
            "silent"
        }
    }

    impl LifecycleAnnotator for Silent {}

    fn recorder(label: &'static str, log: &Log) -> Listener {
        Listener::lifecycle(Recorder {
            label,
            log: Arc::clone(log),
        })
    }

    fn ctor() -> ConstructorRef {
        ConstructorRef {
            owner: TypeId(0),
            method: MethodId(0),
        }
    }

    #[test]
    fn test_nested_composite_fan_out() {
        let log = Log::default();
        let inner = Listener::composite([recorder("A", &log), Listener::basic(Plain("B")), recorder("C", &log)]);
        let root = Listener::composite([inner, recorder("D", &log)]);

        let mut model = CodeModel::new();
        on_constructor_finished(&root, &mut model, ctor());

        assert_eq!(*log.lock().unwrap(), vec!["ctor:A", "ctor:C", "ctor:D"]);
    }

    #[test]
    fn test_type_event_reaches_only_lifecycle_leaves() {
        let log = Log::default();
        let root = Listener::composite([Listener::basic(Plain("B")), recorder("A", &log)]);

        let mut model = CodeModel::new();
        on_type_finished(&root, &mut model, &TypeRef::Defined(TypeId(0)));

        assert_eq!(*log.lock().unwrap(), vec!["type:A"]);
    }

    #[test]
    fn test_shared_leaf_is_invoked_per_path() {
        let log = Log::default();
        let shared = recorder("A", &log);
        let root = Listener::composite([shared.clone(), Listener::composite([shared])]);

        let mut model = CodeModel::new();
        root.dispatch_constructor(&mut model, ctor());

        assert_eq!(log.lock().unwrap().len(), 2);
    }

    #[test]
    fn test_empty_composite_and_basic_root() {
        let mut model = CodeModel::new();
        assert!(Listener::composite([]).leaves().is_empty());

        // Neither call panics nor does anything
        Listener::composite([]).dispatch_constructor(&mut model, ctor());
        Listener::basic(Plain("B")).dispatch_type(&mut model, &TypeRef::Void);
    }

    #[test]
    fn test_default_callbacks_are_no_ops() {
        let mut model = CodeModel::new();
        Listener::lifecycle(Silent).dispatch_constructor(&mut model, ctor());
        Listener::lifecycle(Silent).dispatch_type(&mut model, &TypeRef::Void);
        assert!(model.is_empty());
    }

    #[test]
    fn test_contains_and_debug() {
        let log = Log::default();
        let root = Listener::composite([Listener::basic(Plain("jackson")), recorder("A", &log)]);
        assert!(root.contains("jackson"));
        assert!(!root.contains("missing"));
        assert_eq!(format!("{root:?}"), "[Basic(jackson), Lifecycle(A)]");
    }

    #[test]
    fn test_checker_compatibility_comes_from_leaves() {
        let log = Log::default();
        // A leaf named like the checker annotator is not compatible by name alone
        let impostor = Listener::composite([Listener::basic(Plain("checkerable")), recorder("A", &log)]);
        assert!(!impostor.is_checker_compatible());

        let nested = Listener::composite([
            Listener::basic(Plain("jackson")),
            Listener::composite([Listener::lifecycle(crate::CheckerableAnnotator::new())]),
        ]);
        assert!(nested.is_checker_compatible());
    }
}
