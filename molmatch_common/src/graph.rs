//! Read-only graph view contract and the reference molecular graph.
//!
//! The matching engine never owns or mutates a molecular graph; it only
//! reads it through [`GraphView`]. Host systems adapt their own atom/bond
//! containers to this trait. [`MolGraph`] is the reference adjacency-list
//! implementation used by callers and tests.

/// Index of an atom within a graph view.
pub type AtomId = usize;

/// Index of a bond within a graph view.
pub type BondId = usize;

/// Covalent bond order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum BondOrder {
    /// Single bond.
    Single,
    /// Double bond.
    Double,
    /// Triple bond.
    Triple,
}

/// Immutable, read-only view over a molecular graph.
///
/// Every method is called inside the search hot loops and must be O(1) or
/// O(degree). Implementations expose no mutation surface; the engine shares
/// views freely across concurrent searches.
pub trait GraphView {
    /// Number of atoms in the graph.
    fn atom_count(&self) -> usize;

    /// Number of bonds in the graph.
    fn bond_count(&self) -> usize;

    /// Element symbol of an atom (e.g. `"C"`, `"N"`).
    fn atom_symbol(&self, atom: AtomId) -> &str;

    /// Number of bonds incident to an atom.
    fn degree(&self, atom: AtomId) -> usize;

    /// Bonds incident to an atom, in insertion order.
    fn connected_bonds(&self, atom: AtomId) -> &[BondId];

    /// The two endpoint atoms of a bond.
    fn bond_endpoints(&self, bond: BondId) -> (AtomId, AtomId);

    /// Order of a bond.
    fn bond_order(&self, bond: BondId) -> BondOrder;

    /// Whether a bond carries the aromatic flag.
    fn bond_is_aromatic(&self, bond: BondId) -> bool;
}

#[derive(Clone, Debug)]
struct AtomData {
    symbol: String,
}

#[derive(Clone, Debug)]
struct BondData {
    begin: AtomId,
    end: AtomId,
    order: BondOrder,
    aromatic: bool,
}

/// Reference [`GraphView`] implementation backed by adjacency lists.
///
/// Built once through [`MolGraph::add_atom`] / [`MolGraph::add_bond`] and
/// treated as immutable afterwards. Indices are dense and stable.
#[derive(Clone, Debug, Default)]
pub struct MolGraph {
    atoms: Vec<AtomData>,
    bonds: Vec<BondData>,
    adjacency: Vec<Vec<BondId>>,
}

impl MolGraph {
    /// Creates an empty graph.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an atom and returns its index.
    pub fn add_atom(&mut self, symbol: impl Into<String>) -> AtomId {
        self.atoms.push(AtomData {
            symbol: symbol.into(),
        });
        self.adjacency.push(Vec::new());
        self.atoms.len() - 1
    }

    /// Adds a non-aromatic bond between two existing atoms and returns its
    /// index.
    #[contracts::debug_requires(begin < self.atoms.len() && end < self.atoms.len())]
    #[contracts::debug_requires(begin != end)]
    pub fn add_bond(&mut self, begin: AtomId, end: AtomId, order: BondOrder) -> BondId {
        self.push_bond(begin, end, order, false)
    }

    /// Adds a bond carrying the aromatic flag.
    #[contracts::debug_requires(begin < self.atoms.len() && end < self.atoms.len())]
    #[contracts::debug_requires(begin != end)]
    pub fn add_aromatic_bond(&mut self, begin: AtomId, end: AtomId, order: BondOrder) -> BondId {
        self.push_bond(begin, end, order, true)
    }

    fn push_bond(&mut self, begin: AtomId, end: AtomId, order: BondOrder, aromatic: bool) -> BondId {
        self.bonds.push(BondData {
            begin,
            end,
            order,
            aromatic,
        });
        let idx = self.bonds.len() - 1;
        self.adjacency[begin].push(idx);
        self.adjacency[end].push(idx);
        tracing::trace!(
            "MolGraph::push_bond #{idx} {begin}-{end} {order:?} aromatic={aromatic}"
        );
        idx
    }

    /// Looks up the bond connecting two atoms, if any.
    #[must_use]
    pub fn bond_between(&self, a: AtomId, b: AtomId) -> Option<BondId> {
        self.adjacency.get(a)?.iter().copied().find(|&bond| {
            let (x, y) = (self.bonds[bond].begin, self.bonds[bond].end);
            (x, y) == (a, b) || (x, y) == (b, a)
        })
    }
}

impl GraphView for MolGraph {
    fn atom_count(&self) -> usize {
        self.atoms.len()
    }

    fn bond_count(&self) -> usize {
        self.bonds.len()
    }

    fn atom_symbol(&self, atom: AtomId) -> &str {
        &self.atoms[atom].symbol
    }

    fn degree(&self, atom: AtomId) -> usize {
        self.adjacency[atom].len()
    }

    fn connected_bonds(&self, atom: AtomId) -> &[BondId] {
        &self.adjacency[atom]
    }

    fn bond_endpoints(&self, bond: BondId) -> (AtomId, AtomId) {
        (self.bonds[bond].begin, self.bonds[bond].end)
    }

    fn bond_order(&self, bond: BondId) -> BondOrder {
        self.bonds[bond].order
    }

    fn bond_is_aromatic(&self, bond: BondId) -> bool {
        self.bonds[bond].aromatic
    }
}
