use classmark_model::{AnnotationSet, MethodNode, TypeNode};

/// Assert the exact marker names of an annotation set, in order
pub fn assert_markers(set: &AnnotationSet, expected: &[&str]) {
    let actual: Vec<&str> = set.names().collect();
    assert_eq!(actual, expected, "unexpected markers");
}

/// Assert the type declares exactly one method with the given name, and return it
pub fn assert_has_method<'a>(ty: &'a TypeNode, name: &str) -> &'a MethodNode {
    let mut found = ty.methods_named(name);
    let method = found
        .next()
        .unwrap_or_else(|| panic!("Expected method {name} on {}", ty.name));
    assert!(found.next().is_none(), "Method {name} declared twice on {}", ty.name);
    method
}

/// Assert the type has constructors with exactly these parameter counts
pub fn assert_constructor_arities(ty: &TypeNode, expected: &[usize]) {
    let actual: Vec<usize> = ty.constructors().map(|c| c.params.len()).collect();
    assert_eq!(actual, expected, "unexpected constructors on {}", ty.name);
}
