//! Error types for structure-matching operations.
//!
//! Only genuinely invalid inputs are errors. A search that finds nothing
//! returns an empty result set; a search that exhausts its budget returns
//! its partial results with a flag. Predicate panics are contract
//! violations and are never converted into these variants.

use thiserror::Error;

/// Errors reported by the mode orchestrator before a search starts.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MatchError {
    /// Subgraph mode requires the query to fit inside the target.
    #[error("query does not fit target: {query_atoms} query atoms > {target_atoms} target atoms")]
    QueryLargerThanTarget {
        /// Atom count of the query graph.
        query_atoms: usize,
        /// Atom count of the target graph.
        target_atoms: usize,
    },

    /// Isomorphism requires both graphs to have identical dimensions.
    #[error("graphs are not the same size: {left_atoms}/{left_bonds} vs {right_atoms}/{right_bonds} atoms/bonds")]
    SizeMismatch {
        /// Atom count of the first graph.
        left_atoms: usize,
        /// Bond count of the first graph.
        left_bonds: usize,
        /// Atom count of the second graph.
        right_atoms: usize,
        /// Bond count of the second graph.
        right_bonds: usize,
    },
}
