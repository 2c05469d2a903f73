//! Schema validation errors

use thiserror::Error;

/// Errors raised while constructing a cube schema
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchemaError {
    #[error("Hierarchy has no levels")]
    EmptyHierarchy,

    #[error("Level indices must be contiguous from 0: expected {expected}, found {found}")]
    NonContiguousLevels { expected: usize, found: usize },

    #[error("Dimension '{dimension}' has no hierarchies")]
    NoHierarchies { dimension: String },

    #[error("Duplicate dimension '{dimension}' in cube '{cube}'")]
    DuplicateDimension { cube: String, dimension: String },
}
