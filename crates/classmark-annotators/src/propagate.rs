//! Annotation propagation across structurally related members
//!
//! Given the fields of one nullability bucket and a marker set, the propagator
//! annotates the fields themselves, every same-named parameter of every
//! method and constructor of the type and its nested types, and every getter
//! whose suffix names one of the fields. All placements go through
//! safe-annotate, so propagating twice yields the same annotation sets.

use std::collections::{BTreeSet, HashSet};

use classmark_model::{
    AnnotationDescriptor, AnnotationSet, CodeModel, FieldNode, MethodId, MethodKind, ModelError, TypeId, TypeRef,
    GETTER_PREFIX,
};
use tracing::debug;

use crate::vocabulary::{CHECKER_NULLNESS_MARKERS, PROPERTY_MARKER};

/// Name of the equality method whose parameter is always nullable
pub const EQUALS_METHOD: &str = "equals";

/// Markers that may not be placed on an element whose declared type is nested
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlacementRules {
    nested_exclusions: BTreeSet<String>,
}

impl PlacementRules {
    pub fn new<I, S>(nested_exclusions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            nested_exclusions: nested_exclusions.into_iter().map(Into::into).collect(),
        }
    }

    /// No placement restrictions
    pub fn unrestricted() -> Self {
        Self {
            nested_exclusions: BTreeSet::new(),
        }
    }

    pub fn allows(&self, marker: &str, target_is_nested: bool) -> bool {
        !target_is_nested || !self.nested_exclusions.contains(marker)
    }
}

impl Default for PlacementRules {
    /// The nullness checker rejects its markers on members typed by a nested class
    fn default() -> Self {
        Self::new(CHECKER_NULLNESS_MARKERS)
    }
}

/// Add every marker not already present on the element.
///
/// `target_is_nested` tells whether the element's declared type is a type
/// nested in another one; excluded markers are then skipped. Returns the
/// number of descriptors added.
pub fn safe_annotate(
    annotations: &mut AnnotationSet,
    target_is_nested: bool,
    markers: &[AnnotationDescriptor],
    rules: &PlacementRules,
) -> usize {
    markers
        .iter()
        .filter(|marker| rules.allows(&marker.name, target_is_nested))
        .filter(|marker| annotations.insert((*marker).clone()))
        .count()
}

/// How parameters are matched against bucket fields
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamMatching {
    /// Match on the raw field name
    FieldName,
    /// Match on the property name derived from the field's property marker;
    /// fields without a marker value match nothing
    PropertyName,
}

/// Property name of a field carrying a property marker with a `value`.
///
/// When the external name is a valid identifier the field keeps it verbatim,
/// otherwise the generator prefixed the field name with one character.
pub fn property_name(field: &FieldNode) -> Option<String> {
    let external = field.annotations.get(PROPERTY_MARKER)?.value()?;
    if is_identifier(external) {
        Some(field.name.clone())
    } else {
        let mut chars = field.name.chars();
        chars.next();
        Some(chars.as_str().to_string())
    }
}

const RESERVED_WORDS: &[&str] = &[
    "abstract", "assert", "boolean", "break", "byte", "case", "catch", "char", "class", "const", "continue",
    "default", "do", "double", "else", "enum", "extends", "false", "final", "finally", "float", "for", "goto", "if",
    "implements", "import", "instanceof", "int", "interface", "long", "native", "new", "null", "package", "private",
    "protected", "public", "return", "short", "static", "strictfp", "super", "switch", "synchronized", "this",
    "throw", "throws", "transient", "true", "try", "void", "volatile", "while",
];

/// Whether `name` can be used verbatim as a member name in generated code
pub fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    let is_part = |c: char| c.is_alphanumeric() || c == '_' || c == '$';
    (first.is_alphabetic() || first == '_' || first == '$') && chars.all(is_part) && !RESERVED_WORDS.contains(&name)
}

fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Applies marker sets to a type's members
#[derive(Debug, Clone, Default)]
pub struct MemberAnnotationPropagator {
    rules: PlacementRules,
}

impl MemberAnnotationPropagator {
    pub fn new(rules: PlacementRules) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &PlacementRules {
        &self.rules
    }

    /// Propagate `markers` from the given fields of `ty` to their related members.
    ///
    /// Returns the number of descriptors added.
    pub fn propagate<S: AsRef<str>>(
        &self,
        model: &mut CodeModel,
        ty: TypeId,
        bucket_fields: &[S],
        markers: &[AnnotationDescriptor],
        matching: ParamMatching,
    ) -> Result<usize, ModelError> {
        let mut added = 0;
        let mut names = HashSet::new();

        let node = model.node(ty)?;
        let targets: Vec<(String, bool)> = bucket_fields
            .iter()
            .filter_map(|name| node.field(name.as_ref()))
            .map(|field| (field.name.clone(), model.is_nested_type(&field.ty)))
            .collect();
        for field in node.fields() {
            if !targets.iter().any(|(name, _)| name == &field.name) {
                continue;
            }
            match matching {
                ParamMatching::FieldName => {
                    names.insert(field.name.clone());
                }
                ParamMatching::PropertyName => names.extend(property_name(field)),
            }
        }

        let node = model.node_mut(ty)?;
        for (name, nested) in &targets {
            if let Some(field) = node.field_mut(name) {
                added += safe_annotate(&mut field.annotations, *nested, markers, &self.rules);
            }
        }

        added += self.annotate_parameters(model, ty, &names, markers)?;
        added += self.annotate_getters(model, ty, &names, markers)?;

        debug!(ty = ?ty, fields = targets.len(), added, "propagated markers");
        Ok(added)
    }

    /// Annotate every parameter named in `names` across the methods and
    /// constructors of `ty` and all of its nested types
    pub fn annotate_parameters(
        &self,
        model: &mut CodeModel,
        ty: TypeId,
        names: &HashSet<String>,
        markers: &[AnnotationDescriptor],
    ) -> Result<usize, ModelError> {
        model.node(ty)?;
        if names.is_empty() {
            return Ok(0);
        }

        let mut targets: Vec<(TypeId, MethodId, usize, bool)> = Vec::new();
        for owner in model.structure(ty) {
            let node = model.node(owner)?;
            for method in node.methods().chain(node.constructors()) {
                for (index, param) in method.params.iter().enumerate() {
                    if names.contains(&param.name) {
                        targets.push((owner, method.id, index, model.is_nested_type(&param.ty)));
                    }
                }
            }
        }

        let mut added = 0;
        for (owner, method, index, nested) in targets {
            let param = model
                .node_mut(owner)?
                .method_mut(method)
                .and_then(|m| m.params.get_mut(index));
            if let Some(param) = param {
                added += safe_annotate(&mut param.annotations, nested, markers, &self.rules);
            }
        }
        Ok(added)
    }

    /// Annotate zero-parameter getters whose capitalized suffix matches a
    /// capitalized name, across `ty` and its nested types
    fn annotate_getters(
        &self,
        model: &mut CodeModel,
        ty: TypeId,
        names: &HashSet<String>,
        markers: &[AnnotationDescriptor],
    ) -> Result<usize, ModelError> {
        if names.is_empty() {
            return Ok(0);
        }
        let capitalized: HashSet<String> = names.iter().map(|name| capitalize(name)).collect();

        let mut targets: Vec<(TypeId, MethodId, bool)> = Vec::new();
        for owner in model.structure(ty) {
            let node = model.node(owner)?;
            for method in node.methods().filter(|m| m.kind() == MethodKind::Getter) {
                let Some(suffix) = method.name.strip_prefix(GETTER_PREFIX) else {
                    continue;
                };
                if capitalized.contains(&capitalize(suffix)) {
                    targets.push((owner, method.id, model.is_nested_type(&method.return_type)));
                }
            }
        }

        let mut added = 0;
        for (owner, method, nested) in targets {
            if let Some(method) = model.node_mut(owner)?.method_mut(method) {
                added += safe_annotate(&mut method.annotations, nested, markers, &self.rules);
            }
        }
        Ok(added)
    }

    /// Annotate the sole parameter of `equals(Object)` declared on `ty`
    pub fn annotate_equals_parameter(
        &self,
        model: &mut CodeModel,
        ty: TypeId,
        markers: &[AnnotationDescriptor],
    ) -> Result<usize, ModelError> {
        let node = model.node_mut(ty)?;
        let Some(equals) = node.find_method(EQUALS_METHOD, &[TypeRef::Object]) else {
            return Ok(0);
        };
        let param = node.method_mut(equals).and_then(|m| m.params.first_mut());
        Ok(param.map_or(0, |param| safe_annotate(&mut param.annotations, false, markers, &self.rules)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vocabulary::{checker_nullable, markers, CHECKER_NULLABLE, JAVAX_NULLABLE};
    use classmark_model::{MethodNode, ParamNode, TypeNode};

    fn string() -> TypeRef {
        TypeRef::named("String")
    }

    fn property(name: &str, external: &str) -> FieldNode {
        FieldNode::new(name, string()).with_annotation(AnnotationDescriptor::new(PROPERTY_MARKER).with_value(external))
    }

    fn nullable() -> Vec<AnnotationDescriptor> {
        markers(&[JAVAX_NULLABLE, CHECKER_NULLABLE])
    }

    fn names(set: &AnnotationSet) -> Vec<&str> {
        set.names().collect()
    }

    /// `Person { id, name }` with an all-args constructor, getters, a setter and `equals`
    fn person() -> (CodeModel, TypeId) {
        let mut ty = TypeNode::class("Person");
        ty.add_field(property("id", "id")).unwrap();
        ty.add_field(property("name", "name")).unwrap();
        ty.add_method(MethodNode::constructor(vec![ParamNode::new("id", string()), ParamNode::new("name", string())]));
        ty.add_method(MethodNode::method("getId", string(), vec![]));
        ty.add_method(MethodNode::method("getName", string(), vec![]));
        ty.add_method(MethodNode::method("setId", TypeRef::Void, vec![ParamNode::new("id", string())]));
        ty.add_method(MethodNode::method(
            "equals",
            TypeRef::named("boolean"),
            vec![ParamNode::new("other", TypeRef::Object)],
        ));
        let mut model = CodeModel::new();
        let id = model.add_type(ty);
        (model, id)
    }

    #[test]
    fn test_propagate_reaches_field_params_and_getter() {
        let (mut model, person) = person();
        let propagator = MemberAnnotationPropagator::default();

        propagator
            .propagate(&mut model, person, &["id"], &nullable(), ParamMatching::PropertyName)
            .unwrap();

        let node = model.get(person).unwrap();
        assert_eq!(names(&node.field("id").unwrap().annotations), vec![PROPERTY_MARKER, JAVAX_NULLABLE, CHECKER_NULLABLE]);
        let ctor = node.constructors().next().unwrap();
        assert_eq!(names(&ctor.param("id").unwrap().annotations), vec![JAVAX_NULLABLE, CHECKER_NULLABLE]);
        assert!(ctor.param("name").unwrap().annotations.is_empty());

        let get_id = node.methods_named("getId").next().unwrap();
        assert!(get_id.annotations.contains(CHECKER_NULLABLE));
        assert!(node.methods_named("getName").next().unwrap().annotations.is_empty());

        let set_id = node.methods_named("setId").next().unwrap();
        assert!(set_id.param("id").unwrap().annotations.contains(JAVAX_NULLABLE));
    }

    #[test]
    fn test_propagate_is_idempotent() {
        let (mut model, person) = person();
        let propagator = MemberAnnotationPropagator::default();

        let first = propagator
            .propagate(&mut model, person, &["id", "name"], &nullable(), ParamMatching::PropertyName)
            .unwrap();
        let snapshot = model.clone();
        let second = propagator
            .propagate(&mut model, person, &["id", "name"], &nullable(), ParamMatching::PropertyName)
            .unwrap();

        assert!(first > 0);
        assert_eq!(second, 0);
        assert_eq!(model, snapshot);
    }

    #[test]
    fn test_property_matching_uses_derived_name() {
        let mut ty = TypeNode::class("Event");
        // `class` is reserved, so the generator named the field `_class`
        ty.add_field(property("_class", "class")).unwrap();
        ty.add_method(MethodNode::constructor(vec![ParamNode::new("class", string())]));
        let mut model = CodeModel::new();
        let event = model.add_type(ty);

        MemberAnnotationPropagator::default()
            .propagate(&mut model, event, &["_class"], &checker_nullable(), ParamMatching::PropertyName)
            .unwrap();

        let ctor = model.get(event).unwrap().constructors().next().unwrap();
        assert!(ctor.param("class").unwrap().annotations.contains(CHECKER_NULLABLE));
    }

    #[test]
    fn test_field_name_matching_ignores_property_marker() {
        let mut ty = TypeNode::class("Person");
        ty.add_field(FieldNode::new("nickname", string())).unwrap();
        ty.add_method(MethodNode::constructor(vec![ParamNode::new("nickname", string())]));
        let mut model = CodeModel::new();
        let person = model.add_type(ty);

        let by_property = MemberAnnotationPropagator::default()
            .propagate(&mut model.clone(), person, &["nickname"], &checker_nullable(), ParamMatching::PropertyName)
            .unwrap();
        MemberAnnotationPropagator::default()
            .propagate(&mut model, person, &["nickname"], &checker_nullable(), ParamMatching::FieldName)
            .unwrap();

        // Only the field itself is annotated when there is no property name
        assert_eq!(by_property, 1);
        let ctor = model.get(person).unwrap().constructors().next().unwrap();
        assert!(ctor.param("nickname").unwrap().annotations.contains(CHECKER_NULLABLE));
    }

    #[test]
    fn test_only_getter_shaped_methods_are_annotated() {
        let (mut model, person) = person();
        let lookup = model
            .get_mut(person)
            .unwrap()
            .add_method(MethodNode::method("getId", string(), vec![ParamNode::new("locale", string())]));

        MemberAnnotationPropagator::default()
            .propagate(&mut model, person, &["id"], &checker_nullable(), ParamMatching::PropertyName)
            .unwrap();

        let node = model.get(person).unwrap();
        assert!(node.method(lookup).unwrap().annotations.is_empty());
        let getters: Vec<_> = node.methods_named("getId").filter(|m| m.params.is_empty()).collect();
        assert!(getters[0].annotations.contains(CHECKER_NULLABLE));
    }

    #[test]
    fn test_nested_types_are_traversed() {
        let (mut model, person) = person();
        let mut builder = TypeNode::class("PersonBuilder");
        builder.add_method(MethodNode::method("withId", TypeRef::Void, vec![ParamNode::new("id", string())]));
        let builder = model.add_nested(person, builder).unwrap();

        MemberAnnotationPropagator::default()
            .propagate(&mut model, person, &["id"], &checker_nullable(), ParamMatching::PropertyName)
            .unwrap();

        let with_id = model.get(builder).unwrap().methods_named("withId").next().unwrap();
        assert!(with_id.param("id").unwrap().annotations.contains(CHECKER_NULLABLE));
    }

    #[test]
    fn test_checker_markers_skip_nested_typed_members() {
        let mut model = CodeModel::new();
        let outer = model.add_type(TypeNode::class("Order"));
        let address = model.add_nested(outer, TypeNode::class("Address")).unwrap();
        {
            let node = model.get_mut(outer).unwrap();
            let field = FieldNode::new("address", TypeRef::Defined(address))
                .with_annotation(AnnotationDescriptor::new(PROPERTY_MARKER).with_value("address"));
            node.add_field(field).unwrap();
            node.add_method(MethodNode::method("getAddress", TypeRef::Defined(address), vec![]));
        }

        MemberAnnotationPropagator::default()
            .propagate(&mut model, outer, &["address"], &nullable(), ParamMatching::PropertyName)
            .unwrap();

        let node = model.get(outer).unwrap();
        assert_eq!(names(&node.field("address").unwrap().annotations), vec![PROPERTY_MARKER, JAVAX_NULLABLE]);
        let getter = node.methods_named("getAddress").next().unwrap();
        assert_eq!(names(&getter.annotations), vec![JAVAX_NULLABLE]);

        // Without restrictions the checker marker is placed as well
        let mut unrestricted = model.clone();
        MemberAnnotationPropagator::new(PlacementRules::unrestricted())
            .propagate(&mut unrestricted, outer, &["address"], &nullable(), ParamMatching::PropertyName)
            .unwrap();
        let field = unrestricted.get(outer).unwrap().field("address").unwrap();
        assert!(field.annotations.contains(CHECKER_NULLABLE));
    }

    #[test]
    fn test_equals_parameter() {
        let (mut model, person) = person();
        let propagator = MemberAnnotationPropagator::default();

        assert_eq!(propagator.annotate_equals_parameter(&mut model, person, &checker_nullable()).unwrap(), 1);
        assert_eq!(propagator.annotate_equals_parameter(&mut model, person, &checker_nullable()).unwrap(), 0);

        let equals = model.get(person).unwrap().methods_named("equals").next().unwrap();
        assert_eq!(names(&equals.params[0].annotations), vec![CHECKER_NULLABLE]);
    }

    #[test]
    fn test_equals_with_other_signature_is_ignored() {
        let mut ty = TypeNode::class("Point");
        ty.add_method(MethodNode::method(
            "equals",
            TypeRef::named("boolean"),
            vec![ParamNode::new("other", TypeRef::named("Point"))],
        ));
        let mut model = CodeModel::new();
        let point = model.add_type(ty);

        let added = MemberAnnotationPropagator::default()
            .annotate_equals_parameter(&mut model, point, &checker_nullable())
            .unwrap();
        assert_eq!(added, 0);
    }

    #[test]
    fn test_unknown_type() {
        let mut model = CodeModel::new();
        let err = MemberAnnotationPropagator::default()
            .propagate(&mut model, TypeId(3), &["id"], &checker_nullable(), ParamMatching::FieldName)
            .unwrap_err();
        assert_eq!(err, ModelError::UnknownType(TypeId(3)));
    }

    #[test]
    fn test_identifier_rules() {
        assert!(is_identifier("firstName"));
        assert!(is_identifier("_id"));
        assert!(!is_identifier("1st"));
        assert!(!is_identifier("first-name"));
        assert!(!is_identifier("class"));
        assert!(!is_identifier(""));
        assert_eq!(capitalize("id"), "Id");
        assert_eq!(capitalize(""), "");
    }
}
