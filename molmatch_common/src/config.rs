//! Configuration for structure-matching searches.
//!
//! This module exposes a minimal, stable surface for consumers to
//! parameterize how matching should behave.
//!
//! The main concepts are:
//! - mode: whether the query must embed completely into the target
//!   (subgraph), or the largest common substructure of two graphs is
//!   wanted (MCS).
//! - stop_at_first: whether the search short-circuits after the first
//!   accepted mapping.
//! - budgets: an optional wall-clock budget and an optional step budget;
//!   exhausting either aborts the search cooperatively and returns the
//!   mappings accepted so far, flagged as timed out.
//!
//! Quick examples
//!
//! Enumerate every subgraph embedding:
//! ```
//! use molmatch_common::SearchConfig;
//! let cfg = SearchConfig::subgraph();
//! ```
//!
//! First MCS mapping only, with a 2 second budget:
//! ```
//! use std::time::Duration;
//! use molmatch_common::SearchConfig;
//! let cfg = SearchConfig::mcs()
//!     .with_stop_at_first(true)
//!     .with_time_budget(Duration::from_secs(2));
//! ```

use std::time::Duration;

/// Which question a search answers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SearchMode {
    /// Map every query bond onto the target (exact embedding).
    Subgraph,
    /// Find the largest mapping common to both graphs.
    Mcs,
}

/// Immutable search configuration.
///
/// - mode: subgraph embedding vs. maximum common substructure.
/// - stop_at_first:
///     - true  => terminate the whole search as soon as one mapping is
///       accepted; the result list has at most one element.
///     - false => enumerate every accepted mapping.
/// - time_budget: optional wall-clock budget, polled cooperatively at
///   every search step. Exhaustion is not an error; the mappings accepted
///   so far are returned with the timed-out flag set.
/// - max_iterations: optional cap on search steps, same soft semantics as
///   the time budget.
/// - ring_constraints: when true and ring annotations are supplied, a
///   query atom or bond flagged in-ring only maps onto an in-ring target
///   counterpart.
#[derive(Clone, Debug)]
pub struct SearchConfig {
    /// Subgraph embedding or maximum common substructure.
    pub mode: SearchMode,
    /// Stop after the first accepted mapping.
    pub stop_at_first: bool,
    /// Optional wall-clock budget for one search invocation.
    pub time_budget: Option<Duration>,
    /// Optional cap on search steps for one search invocation.
    pub max_iterations: Option<u64>,
    /// Enforce ring membership agreement when annotations are present.
    pub ring_constraints: bool,
}

impl SearchConfig {
    /// Creates a configuration for the given mode with everything else at
    /// defaults (exhaustive, unbudgeted, no ring constraints).
    #[must_use]
    pub fn new(mode: SearchMode) -> Self {
        Self {
            mode,
            stop_at_first: false,
            time_budget: None,
            max_iterations: None,
            ring_constraints: false,
        }
    }

    /// Convenience: subgraph mode.
    #[must_use]
    pub fn subgraph() -> Self {
        Self::new(SearchMode::Subgraph)
    }

    /// Convenience: MCS mode.
    #[must_use]
    pub fn mcs() -> Self {
        Self::new(SearchMode::Mcs)
    }

    /// Returns the configuration with `stop_at_first` replaced.
    #[must_use]
    pub fn with_stop_at_first(mut self, stop_at_first: bool) -> Self {
        self.stop_at_first = stop_at_first;
        self
    }

    /// Returns the configuration with a wall-clock budget.
    #[must_use]
    pub fn with_time_budget(mut self, budget: Duration) -> Self {
        self.time_budget = Some(budget);
        self
    }

    /// Returns the configuration with a step budget.
    #[must_use]
    pub fn with_max_iterations(mut self, cap: u64) -> Self {
        self.max_iterations = Some(cap);
        self
    }

    /// Returns the configuration with ring constraints enabled.
    #[must_use]
    pub fn with_ring_constraints(mut self, enabled: bool) -> Self {
        self.ring_constraints = enabled;
        self
    }
}

impl Default for SearchConfig {
    /// Default configuration: exhaustive subgraph search, no budgets.
    fn default() -> Self {
        Self::subgraph()
    }
}
