//! Cube catalog lookup
//!
//! The catalog is an external collaborator. This crate only needs a
//! read-only, name-based lookup that is safe to share across builders.

use std::collections::HashMap;
use std::sync::Arc;

use crate::schema::Cube;

/// Source of cube schemas, keyed by cube name
pub trait CubeCatalog: Send + Sync {
    /// Look up a cube by name. Absence is an expected outcome.
    fn cube_by_name(&self, name: &str) -> Option<Arc<Cube>>;
}

/// Catalog holding its cubes in memory, keyed by lower-cased name
#[derive(Debug, Default, Clone)]
pub struct InMemoryCatalog {
    cubes: HashMap<String, Arc<Cube>>,
}

impl InMemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a cube, replacing any cube with the same (case-insensitive) name
    pub fn insert(&mut self, cube: Cube) -> Option<Arc<Cube>> {
        self.cubes.insert(cube.name().to_lowercase(), Arc::new(cube))
    }

    /// Registered cube names, sorted
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<_> = self.cubes.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.cubes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cubes.is_empty()
    }
}

impl FromIterator<Cube> for InMemoryCatalog {
    fn from_iter<T: IntoIterator<Item = Cube>>(iter: T) -> Self {
        let mut catalog = Self::new();
        for cube in iter {
            catalog.insert(cube);
        }
        catalog
    }
}

impl CubeCatalog for InMemoryCatalog {
    fn cube_by_name(&self, name: &str) -> Option<Arc<Cube>> {
        self.cubes.get(&name.to_lowercase()).cloned()
    }
}
