//! Shared molecule fixtures for engine and integration tests.
//!
//! Kept in the common crate so every member crate tests against the same
//! structures. Atom indices follow construction order; tests rely on that.

use crate::graph::{BondOrder, MolGraph};

/// Linear chain of `n` carbons with single bonds.
#[must_use]
pub fn carbon_chain(n: usize) -> MolGraph {
    let mut g = MolGraph::new();
    let atoms: Vec<_> = (0..n).map(|_| g.add_atom("C")).collect();
    for pair in atoms.windows(2) {
        g.add_bond(pair[0], pair[1], BondOrder::Single);
    }
    g
}

/// Benzene: six carbons, six aromatic ring bonds (alternating kekulé
/// orders under the aromatic flag).
#[must_use]
pub fn benzene() -> MolGraph {
    let mut g = MolGraph::new();
    let atoms: Vec<_> = (0..6).map(|_| g.add_atom("C")).collect();
    for i in 0..6 {
        let order = if i % 2 == 0 {
            BondOrder::Double
        } else {
            BondOrder::Single
        };
        g.add_aromatic_bond(atoms[i], atoms[(i + 1) % 6], order);
    }
    g
}

/// Cyclohexane: six carbons, six single ring bonds.
#[must_use]
pub fn cyclohexane() -> MolGraph {
    let mut g = MolGraph::new();
    let atoms: Vec<_> = (0..6).map(|_| g.add_atom("C")).collect();
    for i in 0..6 {
        g.add_bond(atoms[i], atoms[(i + 1) % 6], BondOrder::Single);
    }
    g
}

/// Ethanol heavy-atom skeleton: C-C-O.
#[must_use]
pub fn ethanol() -> MolGraph {
    let mut g = MolGraph::new();
    let c0 = g.add_atom("C");
    let c1 = g.add_atom("C");
    let o = g.add_atom("O");
    g.add_bond(c0, c1, BondOrder::Single);
    g.add_bond(c1, o, BondOrder::Single);
    g
}

/// Acrolein heavy-atom skeleton: C=C-C=O.
#[must_use]
pub fn acrolein() -> MolGraph {
    let mut g = MolGraph::new();
    let c0 = g.add_atom("C");
    let c1 = g.add_atom("C");
    let c2 = g.add_atom("C");
    let o = g.add_atom("O");
    g.add_bond(c0, c1, BondOrder::Double);
    g.add_bond(c1, c2, BondOrder::Single);
    g.add_bond(c2, o, BondOrder::Double);
    g
}

/// A single atom with the given symbol and no bonds.
#[must_use]
pub fn lone_atom(symbol: &str) -> MolGraph {
    let mut g = MolGraph::new();
    g.add_atom(symbol);
    g
}

/// Two-carbon single-bond query: C-C.
#[must_use]
pub fn single_bond_cc() -> MolGraph {
    carbon_chain(2)
}
