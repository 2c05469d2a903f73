//! Level name resolution
//!
//! Maps a bare level or dimension name onto the unique level it denotes in a
//! cube. Every level of every hierarchy of every dimension is searched;
//! the name must identify exactly one canonical level ref.

use std::collections::BTreeSet;

use thiserror::Error;

use crate::schema::{CanonicalLevelRef, Cube};

/// Errors from resolving a name against a cube schema
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    #[error("No level named '{name}'")]
    NotFound { name: String },

    #[error("Level name '{name}' is ambiguous: {}", .candidates.join(", "))]
    Ambiguous {
        name: String,
        candidates: Vec<String>,
    },
}

impl ResolveError {
    /// The name that failed to resolve
    pub fn name(&self) -> &str {
        match self {
            Self::NotFound { name } | Self::Ambiguous { name, .. } => name,
        }
    }
}

/// Resolve `name` to the canonical ref of the single level it names.
///
/// Matching is exact and case-sensitive. A name equal to a dimension's own
/// name denotes the index-0 level of that dimension's first hierarchy.
/// Matches that render to the same canonical ref (the same level index
/// reached through several hierarchies) count once.
pub fn resolve_level(cube: &Cube, name: &str) -> Result<CanonicalLevelRef, ResolveError> {
    let mut matches = matching_refs(cube, name).into_iter();

    match (matches.next(), matches.next()) {
        (None, _) => Err(ResolveError::NotFound {
            name: name.to_string(),
        }),
        (Some(reference), None) => Ok(reference),
        (Some(first), Some(second)) => Err(ResolveError::Ambiguous {
            name: name.to_string(),
            candidates: [first, second]
                .into_iter()
                .chain(matches)
                .map(|reference| reference.to_string())
                .collect(),
        }),
    }
}

/// Every distinct ref `name` can denote, in canonical order
fn matching_refs(cube: &Cube, name: &str) -> BTreeSet<CanonicalLevelRef> {
    let mut matches = BTreeSet::new();

    for dimension in cube.dimensions() {
        if dimension.name() == name {
            let finest = dimension.primary_hierarchy().finest();
            matches.insert(CanonicalLevelRef::new(dimension.name(), finest.index));
        }

        for hierarchy in dimension.hierarchies() {
            for level in hierarchy.levels() {
                if level.name == name {
                    matches.insert(CanonicalLevelRef::new(dimension.name(), level.index));
                }
            }
        }
    }

    matches
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{Dimension, Hierarchy};

    fn sales_cube() -> Cube {
        Cube::new("sales")
            .with_dimension(Dimension::linear("date", ["date", "month", "year"]).unwrap())
            .unwrap()
            .with_dimension(Dimension::linear("customer", ["customer", "gender"]).unwrap())
            .unwrap()
            .with_dimension(Dimension::linear("product", ["product", "type", "category"]).unwrap())
            .unwrap()
            .with_dimension(Dimension::linear("store", ["store", "city", "country"]).unwrap())
            .unwrap()
    }

    #[test]
    fn test_resolves_level_names() {
        let cube = sales_cube();
        assert_eq!(resolve_level(&cube, "month").unwrap().as_str(), "date.lvl1");
        assert_eq!(resolve_level(&cube, "category").unwrap().as_str(), "product.lvl2");
        assert_eq!(resolve_level(&cube, "country").unwrap().as_str(), "store.lvl2");
    }

    #[test]
    fn test_every_name_in_collision_free_cube_resolves() {
        let cube = sales_cube();
        for dimension in cube.dimensions() {
            assert!(resolve_level(&cube, dimension.name()).is_ok());
            for level in dimension.primary_hierarchy().levels() {
                let resolved = resolve_level(&cube, &level.name).unwrap();
                assert_eq!(resolved.dimension(), dimension.name());
                assert_eq!(resolved.index(), level.index);
            }
        }
    }

    #[test]
    fn test_dimension_name_resolves_to_finest_level() {
        let cube = Cube::new("c")
            .with_dimension(Dimension::linear("time", ["day", "month"]).unwrap())
            .unwrap();
        assert_eq!(resolve_level(&cube, "time").unwrap().as_str(), "time.lvl0");
        assert_eq!(resolve_level(&cube, "day").unwrap().as_str(), "time.lvl0");
    }

    #[test]
    fn test_dimension_name_reused_at_coarser_level_is_ambiguous() {
        let cube = Cube::new("c")
            .with_dimension(Dimension::linear("warehouse", ["bin", "warehouse"]).unwrap())
            .unwrap();
        let err = resolve_level(&cube, "warehouse").unwrap_err();
        match err {
            ResolveError::Ambiguous { candidates, .. } => {
                assert_eq!(candidates, vec!["warehouse.lvl0", "warehouse.lvl1"]);
            }
            other => panic!("Expected Ambiguous, got {other:?}"),
        }
    }

    #[test]
    fn test_unknown_name_not_found() {
        let err = resolve_level(&sales_cube(), "week").unwrap_err();
        assert_eq!(
            err,
            ResolveError::NotFound {
                name: "week".into()
            }
        );
    }

    #[test]
    fn test_match_is_case_sensitive() {
        let err = resolve_level(&sales_cube(), "Month").unwrap_err();
        assert!(matches!(err, ResolveError::NotFound { .. }));
    }

    #[test]
    fn test_cross_dimension_duplicate_is_ambiguous() {
        let cube = Cube::new("c")
            .with_dimension(Dimension::linear("customer", ["customer", "city"]).unwrap())
            .unwrap()
            .with_dimension(Dimension::linear("store", ["store", "city"]).unwrap())
            .unwrap();

        let err = resolve_level(&cube, "city").unwrap_err();
        match err {
            ResolveError::Ambiguous { name, candidates } => {
                assert_eq!(name, "city");
                assert_eq!(candidates, vec!["customer.lvl1", "store.lvl1"]);
            }
            other => panic!("Expected Ambiguous, got {other:?}"),
        }

        // Unrelated names stay resolvable
        assert_eq!(resolve_level(&cube, "store").unwrap().as_str(), "store.lvl0");
    }

    #[test]
    fn test_all_hierarchies_searched() {
        let date = Dimension::new(
            "date",
            vec![
                Hierarchy::linear(["date", "month", "year"]).unwrap(),
                Hierarchy::linear(["date", "week"]).unwrap(),
            ],
        )
        .unwrap();
        let cube = Cube::new("c").with_dimension(date).unwrap();

        assert_eq!(resolve_level(&cube, "week").unwrap().as_str(), "date.lvl1");
        assert_eq!(resolve_level(&cube, "year").unwrap().as_str(), "date.lvl2");

        // Index 0 of both hierarchies is the same canonical level
        assert_eq!(resolve_level(&cube, "date").unwrap().as_str(), "date.lvl0");
    }

    #[test]
    fn test_shared_base_level_keeps_dimension_name_resolvable() {
        let date = Dimension::new(
            "date",
            vec![
                Hierarchy::linear(["date", "month", "year"]).unwrap(),
                Hierarchy::linear(["date", "week"]).unwrap(),
            ],
        )
        .unwrap();
        let cube = Cube::new("c")
            .with_dimension(date)
            .unwrap()
            .with_dimension(Dimension::linear("store", ["store", "city"]).unwrap())
            .unwrap();

        for dimension in cube.dimensions() {
            let resolved = resolve_level(&cube, dimension.name()).unwrap();
            assert_eq!(resolved.dimension(), dimension.name());
            assert_eq!(resolved.index(), 0);
        }
    }

    #[test]
    fn test_same_name_at_different_indices_across_hierarchies_is_ambiguous() {
        let date = Dimension::new(
            "date",
            vec![
                Hierarchy::linear(["day", "month", "year"]).unwrap(),
                Hierarchy::linear(["day", "week", "month"]).unwrap(),
            ],
        )
        .unwrap();
        let cube = Cube::new("c").with_dimension(date).unwrap();

        match resolve_level(&cube, "month").unwrap_err() {
            ResolveError::Ambiguous { candidates, .. } => {
                assert_eq!(candidates, vec!["date.lvl1", "date.lvl2"]);
            }
            other => panic!("Expected Ambiguous, got {other:?}"),
        }
    }

    #[test]
    fn test_ambiguous_candidates_sorted_by_ref() {
        let cube = Cube::new("c")
            .with_dimension(Dimension::linear("store", ["store", "city"]).unwrap())
            .unwrap()
            .with_dimension(Dimension::linear("customer", ["customer", "city"]).unwrap())
            .unwrap();

        match resolve_level(&cube, "city").unwrap_err() {
            ResolveError::Ambiguous { candidates, .. } => {
                assert_eq!(candidates, vec!["customer.lvl1", "store.lvl1"]);
            }
            other => panic!("Expected Ambiguous, got {other:?}"),
        }
    }

    #[test]
    fn test_error_display_and_name() {
        let err = ResolveError::Ambiguous {
            name: "city".into(),
            candidates: vec!["a.lvl1".into(), "b.lvl1".into()],
        };
        assert_eq!(err.name(), "city");
        assert_eq!(
            err.to_string(),
            "Level name 'city' is ambiguous: a.lvl1, b.lvl1"
        );
    }
}
