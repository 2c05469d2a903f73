//! Canonical level identifiers

use std::cmp::Ordering;
use std::fmt;

use serde::{Serialize, Serializer};

/// Stable identifier of a resolved level: `"<dimension>.lvl<index>"`.
///
/// Ordering is lexicographic on the rendered string, so `date.lvl10` sorts
/// before `date.lvl2`. Clause output depends on this exact order.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CanonicalLevelRef {
    dimension: String,
    index: usize,
    rendered: String,
}

impl CanonicalLevelRef {
    pub fn new(dimension: impl Into<String>, index: usize) -> Self {
        let dimension = dimension.into();
        let rendered = format!("{dimension}.lvl{index}");
        Self {
            dimension,
            index,
            rendered,
        }
    }

    pub fn dimension(&self) -> &str {
        &self.dimension
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn as_str(&self) -> &str {
        &self.rendered
    }
}

impl Ord for CanonicalLevelRef {
    fn cmp(&self, other: &Self) -> Ordering {
        self.rendered.cmp(&other.rendered)
    }
}

impl PartialOrd for CanonicalLevelRef {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for CanonicalLevelRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.rendered)
    }
}

impl Serialize for CanonicalLevelRef {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.rendered)
    }
}
