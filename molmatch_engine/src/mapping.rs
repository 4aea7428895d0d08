//! Bidirectional atom table built up while finalizing a clique.

use std::collections::HashMap;

use molmatch_common::AtomId;

/// Query-to-target atom assignments, kept in both directions so that
/// injectivity can be checked in O(1) from either side.
#[derive(Clone, Debug, Default)]
pub(crate) struct AtomMapping {
    /// Query to target atom mapping
    query_to_target: HashMap<AtomId, AtomId>,
    /// Target to query atom mapping
    target_to_query: HashMap<AtomId, AtomId>,
}

impl AtomMapping {
    #[contracts::debug_ensures(ret.query_to_target.is_empty())]
    #[contracts::debug_ensures(ret.target_to_query.is_empty())]
    pub(crate) fn new() -> Self {
        Self {
            query_to_target: HashMap::new(),
            target_to_query: HashMap::new(),
        }
    }

    /// Records `query -> target`. Returns false if the identification
    /// conflicts with an existing entry on either side; the table is left
    /// unchanged in that case.
    #[contracts::debug_requires(self.query_to_target.len() == self.target_to_query.len())]
    #[contracts::debug_ensures(self.query_to_target.len() == self.target_to_query.len())]
    pub(crate) fn bind(&mut self, query: AtomId, target: AtomId) -> bool {
        match (
            self.query_to_target.get(&query),
            self.target_to_query.get(&target),
        ) {
            (None, None) => {
                self.query_to_target.insert(query, target);
                self.target_to_query.insert(target, query);
                true
            }
            (existing_target, existing_query) => {
                existing_target == Some(&target) && existing_query == Some(&query)
            }
        }
    }

    pub(crate) fn target_atom(&self, query: AtomId) -> Option<AtomId> {
        self.query_to_target.get(&query).copied()
    }

    pub(crate) fn query_atom(&self, target: AtomId) -> Option<AtomId> {
        self.target_to_query.get(&target).copied()
    }

    #[contracts::debug_requires(self.query_to_target.len() == self.target_to_query.len())]
    pub(crate) fn len(&self) -> usize {
        self.query_to_target.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.query_to_target.is_empty()
    }

    /// Atom pairs sorted by query atom; the value identity of a mapping.
    pub(crate) fn sorted_pairs(&self) -> Vec<(AtomId, AtomId)> {
        let mut pairs: Vec<(AtomId, AtomId)> = self
            .query_to_target
            .iter()
            .map(|(&q, &t)| (q, t))
            .collect();
        pairs.sort_unstable();
        pairs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bind_is_injective_both_ways() {
        let mut m = AtomMapping::new();
        assert!(m.bind(0, 5));
        // repeating the same identification is fine
        assert!(m.bind(0, 5));
        // same query atom, different target
        assert!(!m.bind(0, 6));
        // same target atom, different query
        assert!(!m.bind(1, 5));
        assert_eq!(m.len(), 1);
        assert_eq!(m.target_atom(0), Some(5));
        assert_eq!(m.query_atom(5), Some(0));
    }

    #[test]
    fn sorted_pairs_are_ordered_by_query_atom() {
        let mut m = AtomMapping::new();
        m.bind(2, 0);
        m.bind(0, 2);
        m.bind(1, 1);
        assert_eq!(m.sorted_pairs(), vec![(0, 2), (1, 1), (2, 0)]);
    }
}
