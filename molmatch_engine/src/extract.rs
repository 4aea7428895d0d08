//! Conversion of accepted cliques into finalized mappings.

use molmatch_common::{AtomId, BondId};

use crate::mapping::AtomMapping;
use crate::rgraph::{NodeId, RGraph};

/// One finalized structure mapping: an atom table that is injective in
/// both directions, plus the bond correspondence it implies.
#[derive(Clone, Debug)]
pub struct MatchMapping {
    atoms: AtomMapping,
    bonds: Vec<(BondId, BondId)>,
}

impl MatchMapping {
    /// Unions the atom identifications of a clique into one table.
    ///
    /// Clique membership already guarantees pairwise consistency, so every
    /// bind must succeed; a rejected bind is an internal invariant
    /// violation.
    pub(crate) fn from_clique(rgraph: &RGraph, clique: &[NodeId]) -> Self {
        let mut atoms = AtomMapping::new();
        let mut bonds = Vec::with_capacity(clique.len());

        for &node in clique {
            let pair = rgraph.node(node);
            bonds.push((pair.query_bond, pair.target_bond));
            for &(qa, ta) in rgraph.identifications(node) {
                let bound = atoms.bind(qa, ta);
                debug_assert!(bound, "clique implied a non-injective atom table");
            }
        }
        bonds.sort_unstable();

        Self { atoms, bonds }
    }

    /// Builds a bond-less mapping from direct atom assignments (the
    /// zero-bond query path).
    pub(crate) fn from_atom_pairs(pairs: &[(AtomId, AtomId)]) -> Self {
        let mut atoms = AtomMapping::new();
        for &(qa, ta) in pairs {
            let bound = atoms.bind(qa, ta);
            debug_assert!(bound, "atom assignment was not injective");
        }
        Self {
            atoms,
            bonds: Vec::new(),
        }
    }

    /// Swaps the query and target roles; used when the MCS orchestrator
    /// ran the search with its arguments reversed.
    pub(crate) fn inverted(&self) -> Self {
        let mut atoms = AtomMapping::new();
        for (q, t) in self.atoms.sorted_pairs() {
            let bound = atoms.bind(t, q);
            debug_assert!(bound, "inverting a bijective table cannot conflict");
        }
        let mut bonds: Vec<(BondId, BondId)> =
            self.bonds.iter().map(|&(q, t)| (t, q)).collect();
        bonds.sort_unstable();
        Self { atoms, bonds }
    }

    /// Atom pairs `(query, target)` sorted by query atom.
    #[must_use]
    pub fn atom_pairs(&self) -> Vec<(AtomId, AtomId)> {
        self.atoms.sorted_pairs()
    }

    /// Bond pairs `(query, target)` sorted by query bond.
    #[must_use]
    pub fn bond_pairs(&self) -> &[(BondId, BondId)] {
        &self.bonds
    }

    /// Target atom a query atom is mapped onto, if it is in the table.
    #[must_use]
    pub fn target_atom(&self, query: AtomId) -> Option<AtomId> {
        self.atoms.target_atom(query)
    }

    /// Query atom a target atom is mapped from, if it is in the table.
    #[must_use]
    pub fn query_atom(&self, target: AtomId) -> Option<AtomId> {
        self.atoms.query_atom(target)
    }

    /// Number of atoms in the table.
    #[must_use]
    pub fn atom_len(&self) -> usize {
        self.atoms.len()
    }

    /// Number of bond correspondences; the size measure of a mapping.
    #[must_use]
    pub fn bond_len(&self) -> usize {
        self.bonds.len()
    }

    /// Whether the table is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.atoms.is_empty()
    }

    /// Value identity for duplicate elimination: the sorted atom table.
    pub(crate) fn signature(&self) -> Vec<(AtomId, AtomId)> {
        self.atoms.sorted_pairs()
    }
}
