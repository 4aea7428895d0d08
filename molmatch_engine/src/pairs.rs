//! Compatibility-pair enumeration.
//!
//! The first stage of a search: every query bond is tested against every
//! target bond under the configured predicates, and each endpoint
//! orientation that survives becomes one candidate pair. The output is the
//! node set of the relation graph.

use itertools::Itertools;
use molmatch_common::{AtomId, BondId, GraphView, MatchPredicate, RingAnnotations};

/// Which endpoint pairing of a bond association satisfied the atom
/// predicates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Orientation {
    /// query begin -> target begin, query end -> target end.
    Forward,
    /// query begin -> target end, query end -> target begin.
    Swapped,
}

/// A candidate association of one query bond with one target bond under
/// one accepted orientation.
///
/// Identity is the full triple: a bond pair that is valid both ways yields
/// two pairs, because the two orientations imply different atom tables.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CompatPair {
    /// Bond index in the query graph.
    pub query_bond: BondId,
    /// Bond index in the target graph.
    pub target_bond: BondId,
    /// Endpoint pairing accepted for this association.
    pub orientation: Orientation,
}

impl CompatPair {
    /// The two atom identifications implied by this pair.
    pub(crate) fn atom_identifications(
        &self,
        query: &dyn GraphView,
        target: &dyn GraphView,
    ) -> [(AtomId, AtomId); 2] {
        let (q_begin, q_end) = query.bond_endpoints(self.query_bond);
        let (t_begin, t_end) = target.bond_endpoints(self.target_bond);
        match self.orientation {
            Orientation::Forward => [(q_begin, t_begin), (q_end, t_end)],
            Orientation::Swapped => [(q_begin, t_end), (q_end, t_begin)],
        }
    }
}

/// Ring membership filter applied on top of the predicates.
///
/// Active only when the config enables ring constraints and both sides
/// carry annotations; otherwise every check passes.
#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct RingFilter<'a> {
    query: Option<&'a RingAnnotations>,
    target: Option<&'a RingAnnotations>,
    enabled: bool,
}

impl<'a> RingFilter<'a> {
    pub(crate) fn new(
        enabled: bool,
        query: Option<&'a RingAnnotations>,
        target: Option<&'a RingAnnotations>,
    ) -> Self {
        Self {
            query,
            target,
            enabled,
        }
    }

    fn active(&self) -> Option<(&'a RingAnnotations, &'a RingAnnotations)> {
        if !self.enabled {
            return None;
        }
        Some((self.query?, self.target?))
    }

    /// An in-ring query atom may only map onto an in-ring target atom.
    pub(crate) fn atom_ok(&self, query_atom: AtomId, target_atom: AtomId) -> bool {
        self.active().is_none_or(|(q, t)| {
            !q.atom_in_ring(query_atom) || t.atom_in_ring(target_atom)
        })
    }

    /// An in-ring query bond may only map onto an in-ring target bond.
    pub(crate) fn bond_ok(&self, query_bond: BondId, target_bond: BondId) -> bool {
        self.active().is_none_or(|(q, t)| {
            !q.bond_in_ring(query_bond) || t.bond_in_ring(target_bond)
        })
    }
}

/// Enumerates every compatible `(query bond, target bond, orientation)`
/// triple, in ascending order. O(|Eq| * |Et|) predicate evaluations.
///
/// `enforce_degree` prunes endpoint pairings where the target atom has
/// fewer bonds than the query atom. Sound only when every query bond must
/// be mapped, so the orchestrator enables it in subgraph mode and leaves
/// it off for MCS.
pub(crate) fn enumerate_compatible_pairs(
    query: &dyn GraphView,
    target: &dyn GraphView,
    predicate: &MatchPredicate,
    rings: RingFilter<'_>,
    enforce_degree: bool,
) -> Vec<CompatPair> {
    let mut pairs = Vec::new();

    for (query_bond, target_bond) in
        (0..query.bond_count()).cartesian_product(0..target.bond_count())
    {
        if !predicate.bond.matches(query, target, query_bond, target_bond) {
            continue;
        }
        if !rings.bond_ok(query_bond, target_bond) {
            continue;
        }

        let (q_begin, q_end) = query.bond_endpoints(query_bond);
        let (t_begin, t_end) = target.bond_endpoints(target_bond);

        let endpoints_ok = |qa: AtomId, ta: AtomId| {
            (!enforce_degree || target.degree(ta) >= query.degree(qa))
                && predicate.atom.matches(query, target, qa, ta)
                && rings.atom_ok(qa, ta)
        };

        if endpoints_ok(q_begin, t_begin) && endpoints_ok(q_end, t_end) {
            pairs.push(CompatPair {
                query_bond,
                target_bond,
                orientation: Orientation::Forward,
            });
        }
        if endpoints_ok(q_begin, t_end) && endpoints_ok(q_end, t_begin) {
            pairs.push(CompatPair {
                query_bond,
                target_bond,
                orientation: Orientation::Swapped,
            });
        }
    }

    tracing::debug!(
        "pair enumeration: {} query bonds x {} target bonds -> {} candidate pairs",
        query.bond_count(),
        target.bond_count(),
        pairs.len()
    );

    pairs
}
