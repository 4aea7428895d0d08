//! Backtracking clique enumeration over the relation graph.
//!
//! Binary-branching depth-first search: at every step the lowest-index
//! candidate is either included in the growing clique or excluded from the
//! branch. Inclusion intersects the candidate and excluded sets with the
//! node's neighbors; exclusion moves the node into the excluded set so
//! maximality can be detected. All sets are sorted vectors, which keeps
//! the traversal order, and therefore the result order, deterministic.

use std::collections::HashSet;
use std::time::Instant;

use molmatch_common::{AtomId, SearchConfig, SearchMode};

use crate::extract::MatchMapping;
use crate::rgraph::{NodeId, RGraph};

/// What one clique search produced.
#[derive(Debug, Default)]
pub(crate) struct SearchOutcome {
    pub(crate) mappings: Vec<MatchMapping>,
    pub(crate) timed_out: bool,
    pub(crate) iterations: u64,
}

/// One search invocation. Owns every piece of mutable state, so separate
/// invocations never share anything.
pub(crate) struct CliqueSearch<'a> {
    rgraph: &'a RGraph,
    mode: SearchMode,
    /// Query bond count; the clique size a subgraph embedding must reach.
    required: usize,
    stop_at_first: bool,
    deadline: Option<Instant>,
    max_iterations: Option<u64>,

    iterations: u64,
    timed_out: bool,
    stop: bool,
    /// Size of the largest clique accepted so far (MCS mode).
    best: usize,
    current: Vec<NodeId>,
    seen: HashSet<Vec<(AtomId, AtomId)>>,
    results: Vec<MatchMapping>,
}

impl<'a> CliqueSearch<'a> {
    pub(crate) fn new(rgraph: &'a RGraph, required: usize, config: &SearchConfig) -> Self {
        Self {
            rgraph,
            mode: config.mode,
            required,
            stop_at_first: config.stop_at_first,
            deadline: config.time_budget.map(|budget| Instant::now() + budget),
            max_iterations: config.max_iterations,
            iterations: 0,
            timed_out: false,
            stop: false,
            best: 0,
            current: Vec::new(),
            seen: HashSet::new(),
            results: Vec::new(),
        }
    }

    pub(crate) fn run(mut self) -> SearchOutcome {
        let candidates: Vec<NodeId> = (0..self.rgraph.len() as NodeId).collect();
        self.backtrack(candidates, Vec::new());

        tracing::debug!(
            "clique search done: {} mappings, {} iterations, timed_out={}",
            self.results.len(),
            self.iterations,
            self.timed_out
        );

        SearchOutcome {
            mappings: self.results,
            timed_out: self.timed_out,
            iterations: self.iterations,
        }
    }

    fn backtrack(&mut self, candidates: Vec<NodeId>, excluded: Vec<NodeId>) {
        self.iterations += 1;
        if self.budget_exhausted() {
            self.timed_out = true;
            return;
        }

        if self.mode == SearchMode::Subgraph && self.current.len() == self.required {
            self.accept();
            return;
        }

        if candidates.is_empty() {
            // inclusion-maximal: nothing extends the clique, and nothing
            // previously excluded could have
            if self.mode == SearchMode::Mcs
                && excluded.is_empty()
                && !self.current.is_empty()
                && self.current.len() >= self.best
            {
                self.accept();
            }
            return;
        }

        if self.current.len() + candidates.len() < self.bound() {
            return;
        }

        let pivot = candidates[0];
        let rest = &candidates[1..];
        let neighbors: &[NodeId] = self.rgraph.neighbors(pivot);
        let next_candidates = intersect_sorted(rest, neighbors);
        let next_excluded = intersect_sorted(&excluded, neighbors);

        // include branch
        self.current.push(pivot);
        self.backtrack(next_candidates, next_excluded);
        self.current.pop();

        if self.stop || self.timed_out {
            return;
        }

        // exclude branch
        let rest = rest.to_vec();
        let mut excluded = excluded;
        let at = excluded.binary_search(&pivot).unwrap_or_else(|slot| slot);
        excluded.insert(at, pivot);
        self.backtrack(rest, excluded);
    }

    /// Minimum clique size this branch must still be able to reach.
    fn bound(&self) -> usize {
        match self.mode {
            SearchMode::Subgraph => self.required,
            SearchMode::Mcs => self.best,
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

    fn accept(&mut self) {
        if self.mode == SearchMode::Mcs {
            let size = self.current.len();
            if size > self.best {
                // a strictly larger clique invalidates everything smaller
                self.best = size;
                self.results.clear();
                self.seen.clear();
            }
        }

        let mapping = MatchMapping::from_clique(self.rgraph, &self.current);
        if self.seen.insert(mapping.signature()) {
            self.results.push(mapping);
            if self.stop_at_first {
                self.stop = true;
            }
        }
    }
}

/// Intersection of two ascending slices, preserving order.
pub(crate) fn intersect_sorted(a: &[NodeId], b: &[NodeId]) -> Vec<NodeId> {
    let mut out = Vec::with_capacity(a.len().min(b.len()));
    let (mut i, mut j) = (0, 0);
    while i < a.len() && j < b.len() {
        match a[i].cmp(&b[j]) {
            std::cmp::Ordering::Less => i += 1,
            std::cmp::Ordering::Greater => j += 1,
            std::cmp::Ordering::Equal => {
                out.push(a[i]);
                i += 1;
                j += 1;
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pairs::{RingFilter, enumerate_compatible_pairs};
    use molmatch_common::{GraphView, MatchPredicate, test_cases};

    fn rgraph_for(
        query: &dyn GraphView,
        target: &dyn GraphView,
    ) -> RGraph {
        let pairs = enumerate_compatible_pairs(
            query,
            target,
            &MatchPredicate::exact(),
            RingFilter::default(),
            false,
        );
        RGraph::build(query, target, pairs)
    }

    #[test]
    fn intersect_sorted_is_order_preserving() {
        assert_eq!(intersect_sorted(&[1, 3, 5, 7], &[2, 3, 6, 7]), vec![3, 7]);
        assert_eq!(intersect_sorted(&[], &[1, 2]), Vec::<NodeId>::new());
    }

    #[test]
    fn propane_embeds_twice_into_itself() {
        let query = test_cases::carbon_chain(3);
        let rgraph = rgraph_for(&query, &query);

        let outcome =
            CliqueSearch::new(&rgraph, query.bond_count(), &SearchConfig::subgraph()).run();

        // identity and the end-to-end flip
        assert_eq!(outcome.mappings.len(), 2);
        assert!(!outcome.timed_out);
    }

    #[test]
    fn mcs_on_identical_chains_keeps_only_full_size() {
        let query = test_cases::carbon_chain(3);
        let rgraph = rgraph_for(&query, &query);

        let outcome =
            CliqueSearch::new(&rgraph, query.bond_count(), &SearchConfig::mcs()).run();

        assert!(!outcome.mappings.is_empty());
        for mapping in &outcome.mappings {
            assert_eq!(mapping.bond_len(), 2);
        }
    }

    #[test]
    fn zero_time_budget_flags_timeout() {
        let query = test_cases::carbon_chain(3);
        let rgraph = rgraph_for(&query, &query);

        let config =
            SearchConfig::subgraph().with_time_budget(std::time::Duration::ZERO);
        let outcome = CliqueSearch::new(&rgraph, query.bond_count(), &config).run();

        assert!(outcome.timed_out);
        assert!(outcome.mappings.is_empty());
    }

    #[test]
    fn iteration_cap_truncates_enumeration() {
        let query = test_cases::single_bond_cc();
        let target = test_cases::cyclohexane();
        let rgraph = rgraph_for(&query, &target);

        let capped = SearchConfig::subgraph().with_max_iterations(3);
        let outcome = CliqueSearch::new(&rgraph, query.bond_count(), &capped).run();
        assert!(outcome.timed_out);

        let full =
            CliqueSearch::new(&rgraph, query.bond_count(), &SearchConfig::subgraph()).run();
        assert!(!full.timed_out);
        assert!(outcome.mappings.len() < full.mappings.len());
    }
}
