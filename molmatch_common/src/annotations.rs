//! Ring membership annotations supplied by an upstream perception pass.
//!
//! The engine does not perceive rings. When ring constraints are enabled,
//! a caller passes one [`RingAnnotations`] per graph; the enumerator reads
//! it and never writes back to the graph.

use crate::graph::{AtomId, BondId};

/// Read-only ring membership flags for one graph.
///
/// Indices parallel the graph view the annotations were computed for.
/// Atoms or bonds beyond the recorded range count as not in a ring, so a
/// partially annotated graph degrades to open-chain semantics.
#[derive(Clone, Debug, Default)]
pub struct RingAnnotations {
    atom_in_ring: Vec<bool>,
    bond_in_ring: Vec<bool>,
}

impl RingAnnotations {
    /// Creates annotations from per-atom and per-bond in-ring flags.
    #[must_use]
    pub fn new(atom_in_ring: Vec<bool>, bond_in_ring: Vec<bool>) -> Self {
        Self {
            atom_in_ring,
            bond_in_ring,
        }
    }

    /// Whether the atom is part of at least one ring.
    #[must_use]
    pub fn atom_in_ring(&self, atom: AtomId) -> bool {
        self.atom_in_ring.get(atom).copied().unwrap_or(false)
    }

    /// Whether the bond is part of at least one ring.
    #[must_use]
    pub fn bond_in_ring(&self, bond: BondId) -> bool {
        self.bond_in_ring.get(bond).copied().unwrap_or(false)
    }
}
