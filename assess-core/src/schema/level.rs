//! Levels and hierarchies

use serde::{Deserialize, Serialize};

use super::SchemaError;

/// One granularity step of a hierarchy. Index 0 is the finest grain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Level {
    pub index: usize,
    pub name: String,
}

impl Level {
    pub fn new(index: usize, name: impl Into<String>) -> Self {
        Self {
            index,
            name: name.into(),
        }
    }
}

/// An ordered drill path of levels, finest to coarsest.
///
/// Level indices are unique and contiguous starting at 0; levels are kept
/// sorted by index so `levels()[i].index == i` always holds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hierarchy {
    levels: Vec<Level>,
}

impl Hierarchy {
    /// Build a hierarchy from explicitly indexed levels, in any order.
    pub fn new(mut levels: Vec<Level>) -> Result<Self, SchemaError> {
        if levels.is_empty() {
            return Err(SchemaError::EmptyHierarchy);
        }

        levels.sort_by_key(|level| level.index);
        for (expected, level) in levels.iter().enumerate() {
            if level.index != expected {
                return Err(SchemaError::NonContiguousLevels {
                    expected,
                    found: level.index,
                });
            }
        }

        Ok(Self { levels })
    }

    /// Build a linear hierarchy, assigning indices in the order given.
    pub fn linear<I, S>(names: I) -> Result<Self, SchemaError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let levels = names
            .into_iter()
            .enumerate()
            .map(|(index, name)| Level::new(index, name))
            .collect();
        Self::new(levels)
    }

    pub fn levels(&self) -> &[Level] {
        &self.levels
    }

    pub fn level(&self, index: usize) -> Option<&Level> {
        self.levels.get(index)
    }

    /// The index-0 level
    pub fn finest(&self) -> &Level {
        &self.levels[0]
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linear_assigns_indices() {
        let hierarchy = Hierarchy::linear(["date", "month", "year"]).unwrap();
        assert_eq!(hierarchy.len(), 3);
        assert_eq!(hierarchy.level(1), Some(&Level::new(1, "month")));
        assert_eq!(hierarchy.finest().name, "date");
    }

    #[test]
    fn test_new_sorts_by_index() {
        let hierarchy = Hierarchy::new(vec![
            Level::new(2, "country"),
            Level::new(0, "store"),
            Level::new(1, "city"),
        ])
        .unwrap();
        let names: Vec<_> = hierarchy.levels().iter().map(|l| l.name.as_str()).collect();
        assert_eq!(names, vec!["store", "city", "country"]);
    }

    #[test]
    fn test_empty_hierarchy_rejected() {
        let err = Hierarchy::new(Vec::new()).unwrap_err();
        assert_eq!(err, SchemaError::EmptyHierarchy);
    }

    #[test]
    fn test_gap_in_indices_rejected() {
        let err = Hierarchy::new(vec![Level::new(0, "a"), Level::new(2, "c")]).unwrap_err();
        assert_eq!(
            err,
            SchemaError::NonContiguousLevels {
                expected: 1,
                found: 2
            }
        );
    }

    #[test]
    fn test_duplicate_index_rejected() {
        let err = Hierarchy::new(vec![Level::new(0, "a"), Level::new(0, "b")]).unwrap_err();
        assert!(matches!(err, SchemaError::NonContiguousLevels { .. }));
    }

    #[test]
    fn test_level_names_may_repeat() {
        let hierarchy = Hierarchy::linear(["x", "x"]).unwrap();
        assert_eq!(hierarchy.len(), 2);
    }
}
