//! Marker vocabulary
//!
//! Concrete marker names used by the built-in annotators, and the resolution
//! of the nullable / non-nullable families from generation switches. The
//! propagation engine itself treats markers as opaque names.

use classmark_config::GenerationConfig;
use classmark_model::AnnotationDescriptor;

/// Marks a field as bound to an external property; its `value` is the property name
pub const PROPERTY_MARKER: &str = "com.fasterxml.jackson.annotation.JsonProperty";

/// Marks the constructor used to create instances from external data
pub const CREATOR_MARKER: &str = "com.fasterxml.jackson.annotation.JsonCreator";

pub const CHECKER_NON_NULL: &str = "org.checkerframework.checker.nullness.qual.NonNull";
pub const CHECKER_NULLABLE: &str = "org.checkerframework.checker.nullness.qual.Nullable";

pub const JAKARTA_VALIDATION_NOT_NULL: &str = "jakarta.validation.constraints.NotNull";
pub const JAVAX_VALIDATION_NOT_NULL: &str = "javax.validation.constraints.NotNull";
pub const JAKARTA_NONNULL: &str = "jakarta.annotation.Nonnull";
pub const JAVAX_NONNULL: &str = "javax.annotation.Nonnull";
pub const JAKARTA_NULLABLE: &str = "jakarta.annotation.Nullable";
pub const JAVAX_NULLABLE: &str = "javax.annotation.Nullable";

/// Every marker that classifies a field as non-nullable, regardless of switches
pub const NON_NULLABLE_MARKERS: [&str; 5] = [
    JAKARTA_VALIDATION_NOT_NULL,
    JAVAX_VALIDATION_NOT_NULL,
    JAKARTA_NONNULL,
    JAVAX_NONNULL,
    CHECKER_NON_NULL,
];

/// Markers of the nullness checker, which may not be placed on nested-type members
pub const CHECKER_NULLNESS_MARKERS: [&str; 2] = [CHECKER_NON_NULL, CHECKER_NULLABLE];

/// The marker sets applied to each nullability bucket
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkerFamilies {
    pub nullable: Vec<AnnotationDescriptor>,
    pub non_nullable: Vec<AnnotationDescriptor>,
}

impl MarkerFamilies {
    /// Resolve the families enabled by the generation switches.
    ///
    /// The nullness-checker marker always closes each family.
    pub fn resolve(config: &dyn GenerationConfig) -> Self {
        let jakarta = config.is_use_jakarta_validation();

        let mut non_nullable = Vec::new();
        if config.is_include_jsr303_annotations() {
            non_nullable.push(if jakarta { JAKARTA_VALIDATION_NOT_NULL } else { JAVAX_VALIDATION_NOT_NULL });
        }
        if config.is_include_jsr305_annotations() {
            non_nullable.push(if jakarta { JAKARTA_NONNULL } else { JAVAX_NONNULL });
        }
        non_nullable.push(CHECKER_NON_NULL);

        let mut nullable = Vec::new();
        if config.is_include_jsr305_annotations() {
            nullable.push(if jakarta { JAKARTA_NULLABLE } else { JAVAX_NULLABLE });
        }
        nullable.push(CHECKER_NULLABLE);

        Self {
            nullable: markers(&nullable),
            non_nullable: markers(&non_nullable),
        }
    }
}

/// Descriptors without arguments for the given names
pub fn markers(names: &[&str]) -> Vec<AnnotationDescriptor> {
    names.iter().copied().map(AnnotationDescriptor::new).collect()
}

/// The single checker `Nullable` marker, applied to `equals` parameters
pub fn checker_nullable() -> Vec<AnnotationDescriptor> {
    markers(&[CHECKER_NULLABLE])
}
