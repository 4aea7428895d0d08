//! Mode orchestrator: the public structure-matching entry points.
//!
//! This module wires the pipeline together — pair enumeration, relation
//! graph, clique search, extraction — and owns the handful of decisions
//! that sit above the search itself: input validation, the zero-bond
//! query path, and which graph plays query in MCS mode.

use std::collections::HashSet;
use std::time::Instant;

use molmatch_common::{
    AtomId, GraphView, MatchError, MatchPredicate, RingAnnotations, SearchConfig, SearchMode,
};

use crate::extract::MatchMapping;
use crate::pairs::{RingFilter, enumerate_compatible_pairs};
use crate::rgraph::RGraph;
use crate::search::{CliqueSearch, SearchOutcome};

/// The ordered result collection of one search invocation.
///
/// Mappings appear in acceptance order; the first element is what
/// [`StructureMatcher::first_mapping`] returns. `timed_out` marks results
/// truncated by the time or iteration budget — a soft condition, never an
/// error.
#[derive(Clone, Debug, Default)]
pub struct MatchSet {
    /// Accepted mappings in acceptance order, duplicates removed.
    pub mappings: Vec<MatchMapping>,
    /// Whether a budget expired before the search space was exhausted.
    pub timed_out: bool,
    /// Search steps executed; a cost measure for instrumentation.
    pub iterations: u64,
}

impl MatchSet {
    /// Number of mappings found.
    #[must_use]
    pub fn len(&self) -> usize {
        self.mappings.len()
    }

    /// Whether no mapping was found.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.mappings.is_empty()
    }

    /// The first mapping in acceptance order.
    #[must_use]
    pub fn first(&self) -> Option<&MatchMapping> {
        self.mappings.first()
    }
}

/// Entry points for structure-matching searches.
///
/// Each call owns its entire search state; graphs, annotations and
/// predicates are only read. Independent calls may run concurrently.
pub struct StructureMatcher;

impl StructureMatcher {
    /// Enumerates every embedding of `query` into `target`.
    ///
    /// Requires the query to fit: more query atoms than target atoms is an
    /// [`MatchError::QueryLargerThanTarget`]. Zero-atom inputs yield an
    /// empty set.
    pub fn find_subgraph_mappings(
        query: &dyn GraphView,
        target: &dyn GraphView,
        predicate: &MatchPredicate,
        config: &SearchConfig,
    ) -> Result<MatchSet, MatchError> {
        Self::find_subgraph_mappings_with_annotations(query, target, None, None, predicate, config)
    }

    /// [`Self::find_subgraph_mappings`] with ring annotations for one or
    /// both graphs. Annotations only take effect when the config enables
    /// ring constraints.
    pub fn find_subgraph_mappings_with_annotations(
        query: &dyn GraphView,
        target: &dyn GraphView,
        query_rings: Option<&RingAnnotations>,
        target_rings: Option<&RingAnnotations>,
        predicate: &MatchPredicate,
        config: &SearchConfig,
    ) -> Result<MatchSet, MatchError> {
        if query.atom_count() == 0 || target.atom_count() == 0 {
            return Ok(MatchSet::default());
        }
        if query.atom_count() > target.atom_count() {
            return Err(MatchError::QueryLargerThanTarget {
                query_atoms: query.atom_count(),
                target_atoms: target.atom_count(),
            });
        }

        let mut config = config.clone();
        config.mode = SearchMode::Subgraph;

        let core = MatcherCore {
            query,
            target,
            query_rings,
            target_rings,
            predicate,
            config: &config,
        };
        Ok(core.run())
    }

    /// Finds the maximum common substructures of two graphs.
    ///
    /// Symmetric in its arguments: the side with fewer bonds plays query
    /// internally and every returned mapping is re-oriented so that atom
    /// tables always read `a -> b`.
    #[must_use]
    pub fn find_mcs(
        a: &dyn GraphView,
        b: &dyn GraphView,
        predicate: &MatchPredicate,
        config: &SearchConfig,
    ) -> MatchSet {
        Self::find_mcs_with_annotations(a, b, None, None, predicate, config)
    }

    /// [`Self::find_mcs`] with ring annotations for one or both graphs.
    #[must_use]
    pub fn find_mcs_with_annotations(
        a: &dyn GraphView,
        b: &dyn GraphView,
        a_rings: Option<&RingAnnotations>,
        b_rings: Option<&RingAnnotations>,
        predicate: &MatchPredicate,
        config: &SearchConfig,
    ) -> MatchSet {
        if a.atom_count() == 0 || b.atom_count() == 0 {
            return MatchSet::default();
        }

        let mut config = config.clone();
        config.mode = SearchMode::Mcs;

        // fewer bonds (then atoms) plays query; shrinks the branching factor
        let swapped = (b.bond_count(), b.atom_count()) < (a.bond_count(), a.atom_count());
        let (query, target, query_rings, target_rings) = if swapped {
            (b, a, b_rings, a_rings)
        } else {
            (a, b, a_rings, b_rings)
        };

        let core = MatcherCore {
            query,
            target,
            query_rings,
            target_rings,
            predicate,
            config: &config,
        };
        let mut set = core.run();

        if swapped {
            set.mappings = set.mappings.iter().map(MatchMapping::inverted).collect();
        }
        set
    }

    /// Enumerates the isomorphism mappings of two equally sized graphs.
    ///
    /// Unequal atom or bond counts are a [`MatchError::SizeMismatch`].
    pub fn find_isomorphism_mappings(
        a: &dyn GraphView,
        b: &dyn GraphView,
        predicate: &MatchPredicate,
        config: &SearchConfig,
    ) -> Result<MatchSet, MatchError> {
        if a.atom_count() != b.atom_count() || a.bond_count() != b.bond_count() {
            return Err(MatchError::SizeMismatch {
                left_atoms: a.atom_count(),
                left_bonds: a.bond_count(),
                right_atoms: b.atom_count(),
                right_bonds: b.bond_count(),
            });
        }
        Self::find_subgraph_mappings(a, b, predicate, config)
    }

    /// Whether the two graphs are isomorphic under the predicate. Size
    /// mismatch is simply `false`.
    #[must_use]
    pub fn is_isomorphic(
        a: &dyn GraphView,
        b: &dyn GraphView,
        predicate: &MatchPredicate,
    ) -> bool {
        if a.atom_count() != b.atom_count() || a.bond_count() != b.bond_count() {
            return false;
        }
        let config = SearchConfig::subgraph().with_stop_at_first(true);
        Self::find_subgraph_mappings(a, b, predicate, &config)
            .map(|set| !set.is_empty())
            .unwrap_or(false)
    }

    /// Whether `query` occurs in `target`. An oversized query is simply
    /// `false`.
    #[must_use]
    pub fn contains_substructure(
        query: &dyn GraphView,
        target: &dyn GraphView,
        predicate: &MatchPredicate,
    ) -> bool {
        let config = SearchConfig::subgraph().with_stop_at_first(true);
        Self::find_subgraph_mappings(query, target, predicate, &config)
            .map(|set| !set.is_empty())
            .unwrap_or(false)
    }

    /// The first mapping under the configured mode, forcing the
    /// short-circuit. Deterministic for identical inputs.
    pub fn first_mapping(
        query: &dyn GraphView,
        target: &dyn GraphView,
        predicate: &MatchPredicate,
        config: &SearchConfig,
    ) -> Result<Option<MatchMapping>, MatchError> {
        let config = config.clone().with_stop_at_first(true);
        let set = Self::dispatch(query, target, predicate, &config)?;
        Ok(set.mappings.into_iter().next())
    }

    /// Every mapping under the configured mode, exhaustively.
    pub fn all_mappings(
        query: &dyn GraphView,
        target: &dyn GraphView,
        predicate: &MatchPredicate,
        config: &SearchConfig,
    ) -> Result<MatchSet, MatchError> {
        let config = config.clone().with_stop_at_first(false);
        Self::dispatch(query, target, predicate, &config)
    }

    /// Number of mappings under the configured mode.
    pub fn count_matches(
        query: &dyn GraphView,
        target: &dyn GraphView,
        predicate: &MatchPredicate,
        config: &SearchConfig,
    ) -> Result<usize, MatchError> {
        Ok(Self::all_mappings(query, target, predicate, config)?.len())
    }

    fn dispatch(
        query: &dyn GraphView,
        target: &dyn GraphView,
        predicate: &MatchPredicate,
        config: &SearchConfig,
    ) -> Result<MatchSet, MatchError> {
        match config.mode {
            SearchMode::Subgraph => {
                Self::find_subgraph_mappings(query, target, predicate, config)
            }
            SearchMode::Mcs => Ok(Self::find_mcs(query, target, predicate, config)),
        }
    }
}

/// One validated search, ready to run.
struct MatcherCore<'a> {
    query: &'a dyn GraphView,
    target: &'a dyn GraphView,
    query_rings: Option<&'a RingAnnotations>,
    target_rings: Option<&'a RingAnnotations>,
    predicate: &'a MatchPredicate,
    config: &'a SearchConfig,
}

impl MatcherCore<'_> {
    fn run(&self) -> MatchSet {
        tracing::info!(
            "starting {:?} search: query {} atoms / {} bonds, target {} atoms / {} bonds",
            self.config.mode,
            self.query.atom_count(),
            self.query.bond_count(),
            self.target.atom_count(),
            self.target.bond_count()
        );

        let outcome = if self.query.bond_count() == 0 {
            self.match_isolated_atoms()
        } else {
            self.match_bond_pairs()
        };

        tracing::info!(
            "search complete: {} mappings, {} iterations, timed_out={}",
            outcome.mappings.len(),
            outcome.iterations,
            outcome.timed_out
        );

        MatchSet {
            mappings: outcome.mappings,
            timed_out: outcome.timed_out,
            iterations: outcome.iterations,
        }
    }

    /// The relation-graph pipeline for queries with at least one bond.
    fn match_bond_pairs(&self) -> SearchOutcome {
        let rings = RingFilter::new(
            self.config.ring_constraints,
            self.query_rings,
            self.target_rings,
        );
        let pairs = enumerate_compatible_pairs(
            self.query,
            self.target,
            self.predicate,
            rings,
            self.config.mode == SearchMode::Subgraph,
        );
        let rgraph = RGraph::build(self.query, self.target, pairs);
        CliqueSearch::new(&rgraph, self.query.bond_count(), self.config).run()
    }

    /// Direct atom-level backtracking for bond-less queries; the pair
    /// enumerator has nothing to work with there.
    fn match_isolated_atoms(&self) -> SearchOutcome {
        AtomSearch::new(self).run()
    }
}

/// Injective atom-only assignment search for zero-bond queries.
///
/// Subgraph mode requires every query atom to be assigned; MCS mode may
/// leave atoms unassigned and keeps the largest assignments found.
struct AtomSearch<'a> {
    core: &'a MatcherCore<'a>,
    rings: RingFilter<'a>,
    deadline: Option<Instant>,
    max_iterations: Option<u64>,

    iterations: u64,
    timed_out: bool,
    stop: bool,
    best: usize,
    used: Vec<bool>,
    assignment: Vec<(AtomId, AtomId)>,
    seen: HashSet<Vec<(AtomId, AtomId)>>,
    results: Vec<MatchMapping>,
}

impl<'a> AtomSearch<'a> {
    fn new(core: &'a MatcherCore<'a>) -> Self {
        Self {
            core,
            rings: RingFilter::new(
                core.config.ring_constraints,
                core.query_rings,
                core.target_rings,
            ),
            deadline: core.config.time_budget.map(|budget| Instant::now() + budget),
            max_iterations: core.config.max_iterations,
            iterations: 0,
            timed_out: false,
            stop: false,
            best: 0,
            used: vec![false; core.target.atom_count()],
            assignment: Vec::new(),
            seen: HashSet::new(),
            results: Vec::new(),
        }
    }

    fn run(mut self) -> SearchOutcome {
        self.recurse(0);
        SearchOutcome {
            mappings: self.results,
            timed_out: self.timed_out,
            iterations: self.iterations,
        }
    }

    fn recurse(&mut self, query_atom: AtomId) {
        self.iterations += 1;
        if self.budget_exhausted() {
            self.timed_out = true;
            return;
        }

        if query_atom == self.core.query.atom_count() {
            self.accept();
            return;
        }

        for target_atom in 0..self.core.target.atom_count() {
            if self.used[target_atom] {
                continue;
            }
            if !self.core.predicate.atom.matches(
                self.core.query,
                self.core.target,
                query_atom,
                target_atom,
            ) {
                continue;
            }
            if !self.rings.atom_ok(query_atom, target_atom) {
                continue;
            }

            self.used[target_atom] = true;
            self.assignment.push((query_atom, target_atom));
            self.recurse(query_atom + 1);
            self.assignment.pop();
            self.used[target_atom] = false;

            if self.stop || self.timed_out {
                return;
            }
        }

        if self.core.config.mode == SearchMode::Mcs {
            // also explore leaving this query atom unmapped
            self.recurse(query_atom + 1);
        }
    }

    fn accept(&mut self) {
        if self.assignment.is_empty() {
            return;
        }
        if self.core.config.mode == SearchMode::Mcs {
            let size = self.assignment.len();
            if size < self.best {
                return;
            }
            if size > self.best {
                self.best = size;
                self.results.clear();
                self.seen.clear();
            }
        }

        let mapping = MatchMapping::from_atom_pairs(&self.assignment);
        if self.seen.insert(mapping.signature()) {
            self.results.push(mapping);
            if self.core.config.stop_at_first {
                self.stop = true;
            }
        }
    }

    fn budget_exhausted(&self) -> bool {
        if self
            .max_iterations
            .is_some_and(|cap| self.iterations >= cap)
        {
            return true;
        }
        self.deadline
            .is_some_and(|deadline| Instant::now() >= deadline)
    }
}
