//! Cubes and dimensions

use super::{Hierarchy, SchemaError};

/// One categorical axis of a cube, with one or more alternate hierarchies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dimension {
    name: String,
    hierarchies: Vec<Hierarchy>,
}

impl Dimension {
    pub fn new(name: impl Into<String>, hierarchies: Vec<Hierarchy>) -> Result<Self, SchemaError> {
        let name = name.into();
        if hierarchies.is_empty() {
            return Err(SchemaError::NoHierarchies { dimension: name });
        }
        Ok(Self { name, hierarchies })
    }

    /// Dimension with a single linear hierarchy over `level_names`, finest first.
    pub fn linear<I, S>(name: impl Into<String>, level_names: I) -> Result<Self, SchemaError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(name, vec![Hierarchy::linear(level_names)?])
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn hierarchies(&self) -> &[Hierarchy] {
        &self.hierarchies
    }

    /// The first hierarchy; the only one for a linear dimension.
    pub fn primary_hierarchy(&self) -> &Hierarchy {
        &self.hierarchies[0]
    }

    pub fn is_linear(&self) -> bool {
        self.hierarchies.len() == 1
    }
}

/// Immutable description of a multidimensional dataset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cube {
    name: String,
    dimensions: Vec<Dimension>,
}

impl Cube {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            dimensions: Vec::new(),
        }
    }

    /// Append a dimension, keeping dimension names unique.
    pub fn add_dimension(&mut self, dimension: Dimension) -> Result<(), SchemaError> {
        if self.dimension(dimension.name()).is_some() {
            return Err(SchemaError::DuplicateDimension {
                cube: self.name.clone(),
                dimension: dimension.name,
            });
        }
        self.dimensions.push(dimension);
        Ok(())
    }

    /// Chainable form of [`Cube::add_dimension`].
    pub fn with_dimension(mut self, dimension: Dimension) -> Result<Self, SchemaError> {
        self.add_dimension(dimension)?;
        Ok(self)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn dimensions(&self) -> &[Dimension] {
        &self.dimensions
    }

    pub fn dimension(&self, name: &str) -> Option<&Dimension> {
        self.dimensions.iter().find(|d| d.name == name)
    }
}
