//! Cube schema model: dimensions, hierarchies, and levels
//!
//! Schemas are created by a catalog and are read-only to the rest of the
//! crate. Constructors enforce the structural invariants up front so the
//! resolver never has to re-check them.

mod cube;
mod error;
mod level;
mod reference;

pub use cube::{Cube, Dimension};
pub use error::SchemaError;
pub use level::{Hierarchy, Level};
pub use reference::CanonicalLevelRef;
