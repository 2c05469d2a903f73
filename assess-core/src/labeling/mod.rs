//! Interval labeling engine
//!
//! Compiles bracket-style range rules such as `[0.9, 1.1]: fine` into a
//! disjoint covering of the extended real line and classifies delta values
//! against it.

mod error;
mod partition;
mod rule;

pub use error::{LabelingError, PartitionDefect};
pub use partition::{Interval, LabelPartition};
pub use rule::{LabelingRule, parse_rules};
