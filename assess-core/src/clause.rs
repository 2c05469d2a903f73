//! Gamma (group-by) and Sigma (selection) clause construction
//!
//! Inputs arrive as unordered sets and mappings. Output is always sorted by
//! the canonical ref string so identical logical inputs render identical
//! clause text regardless of iteration order.

use std::fmt;

use serde::Serialize;
use thiserror::Error;

use crate::resolver::{ResolveError, resolve_level};
use crate::schema::{CanonicalLevelRef, Cube};

/// A clause name failed to resolve
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClauseError {
    #[error("Group-by name could not be resolved: {0}")]
    GroupBy(#[source] ResolveError),

    #[error("Selection predicate could not be resolved: {0}")]
    Selection(#[source] ResolveError),
}

impl ClauseError {
    /// The underlying resolution failure
    pub fn resolve_error(&self) -> &ResolveError {
        match self {
            Self::GroupBy(err) | Self::Selection(err) => err,
        }
    }
}

/// Resolved group-by levels, sorted and de-duplicated
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct GammaClause(Vec<CanonicalLevelRef>);

impl GammaClause {
    pub fn levels(&self) -> &[CanonicalLevelRef] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for GammaClause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, level) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{level}")?;
        }
        Ok(())
    }
}

/// One resolved selection predicate: `level = 'value'`
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct SelectionPredicate {
    pub level: CanonicalLevelRef,
    pub value: String,
}

impl fmt::Display for SelectionPredicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}='{}'", self.level, self.value)
    }
}

/// Resolved selection predicates, sorted by level then literal, without repeats
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct SigmaClause(Vec<SelectionPredicate>);

impl SigmaClause {
    pub fn predicates(&self) -> &[SelectionPredicate] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for SigmaClause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, predicate) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{predicate}")?;
        }
        Ok(())
    }
}

/// Resolve every group-by name and return the sorted Gamma clause.
///
/// Two names resolving to the same level contribute a single entry.
pub fn build_gamma<I, S>(cube: &Cube, names: I) -> Result<GammaClause, ClauseError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut names: Vec<S> = names.into_iter().collect();
    names.sort_by(|a, b| a.as_ref().cmp(b.as_ref()));

    let mut levels = names
        .iter()
        .map(|name| resolve_level(cube, name.as_ref()).map_err(ClauseError::GroupBy))
        .collect::<Result<Vec<_>, _>>()?;

    levels.sort();
    levels.dedup();
    Ok(GammaClause(levels))
}

/// Resolve every predicate name and return the sorted Sigma clause.
///
/// Two names resolving to the same level with the same literal contribute a
/// single entry.
pub fn build_sigma<I, K, V>(cube: &Cube, predicates: I) -> Result<SigmaClause, ClauseError>
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: Into<String>,
{
    let mut predicates: Vec<(K, V)> = predicates.into_iter().collect();
    predicates.sort_by(|a, b| a.0.as_ref().cmp(b.0.as_ref()));

    let mut resolved = Vec::with_capacity(predicates.len());
    for (name, value) in predicates {
        let level = resolve_level(cube, name.as_ref()).map_err(ClauseError::Selection)?;
        resolved.push(SelectionPredicate {
            level,
            value: value.into(),
        });
    }

    resolved.sort();
    resolved.dedup();
    Ok(SigmaClause(resolved))
}
