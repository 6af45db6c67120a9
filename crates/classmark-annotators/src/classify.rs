//! Nullability classification of property fields

use std::collections::BTreeMap;

use classmark_model::{FieldNode, TypeNode};

/// Which marker family a field's related elements receive
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum NullabilityBucket {
    Nullable,
    NonNullable,
}

impl NullabilityBucket {
    pub const ALL: [NullabilityBucket; 2] = [NullabilityBucket::Nullable, NullabilityBucket::NonNullable];
}

/// Eligible field names of one type, partitioned by bucket
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Classification {
    buckets: BTreeMap<NullabilityBucket, Vec<String>>,
}

impl Classification {
    /// Field names in `bucket`, in declaration order
    pub fn fields(&self, bucket: NullabilityBucket) -> &[String] {
        self.buckets.get(&bucket).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn bucket_of(&self, field: &str) -> Option<NullabilityBucket> {
        self.buckets
            .iter()
            .find(|(_, names)| names.iter().any(|name| name == field))
            .map(|(bucket, _)| *bucket)
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.values().all(Vec::is_empty)
    }
}

/// Partitions eligible fields by the presence of a non-nullable marker
#[derive(Debug, Clone)]
pub struct NullabilityClassifier {
    non_nullable_family: Vec<String>,
}

impl NullabilityClassifier {
    pub fn new<I, S>(non_nullable_family: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            non_nullable_family: non_nullable_family.into_iter().map(Into::into).collect(),
        }
    }

    /// A field is `NonNullable` iff it carries at least one marker of the family
    pub fn bucket(&self, field: &FieldNode) -> NullabilityBucket {
        if field.annotations.contains_any(&self.non_nullable_family) {
            NullabilityBucket::NonNullable
        } else {
            NullabilityBucket::Nullable
        }
    }

    pub fn classify<F>(&self, ty: &TypeNode, eligible: F) -> Classification
    where
        F: Fn(&FieldNode) -> bool,
    {
        let mut classification = Classification::default();
        for field in ty.fields().iter().filter(|f| eligible(f)) {
            classification
                .buckets
                .entry(self.bucket(field))
                .or_default()
                .push(field.name.clone());
        }
        classification
    }
}
