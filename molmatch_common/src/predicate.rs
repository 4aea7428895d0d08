//! Atom and bond compatibility predicates.
//!
//! Predicates are the evaluated form of a query language: an upstream
//! compiler (SMARTS, CTFile queries, ...) lowers its textual expressions to
//! these tagged variants, and the engine only ever asks the boolean
//! question "may this query atom/bond map onto this target atom/bond?".
//!
//! Every variant is stateless and side-effect-free, so evaluation may be
//! repeated in any order. Composites short-circuit: `And` stops at the
//! first false operand, `Or` at the first true one. A predicate that
//! panics is a programming error and is deliberately not caught anywhere
//! in the engine.
//!
//! Quick examples
//!
//! Element-symbol + bond-order matching (the classic default):
//! ```
//! use molmatch_common::MatchPredicate;
//! let pred = MatchPredicate::exact();
//! ```
//!
//! "Any nitrogen or oxygen, any bond":
//! ```
//! use molmatch_common::{AtomPredicate, BondPredicate, MatchPredicate};
//! let pred = MatchPredicate::new(
//!     AtomPredicate::symbol_set(["N", "O"]),
//!     BondPredicate::OrderAny,
//! );
//! ```

use std::collections::BTreeSet;

use crate::graph::{AtomId, BondId, BondOrder, GraphView};

/// Compatibility test between one query atom and one target atom.
#[derive(Clone, Debug)]
pub enum AtomPredicate {
    /// Query and target atoms must carry the same element symbol.
    ExactSymbol,
    /// Target atom symbol must be a member of the set.
    SymbolSet(BTreeSet<String>),
    /// Any target atom is acceptable.
    Wildcard,
    /// One sub-predicate per query atom, indexed by query atom id. This is
    /// the compiled form of per-atom query expressions. Indexing past the
    /// vector is a contract violation and panics.
    PerQueryAtom(Vec<AtomPredicate>),
    /// All operands must hold.
    And(Vec<AtomPredicate>),
    /// At least one operand must hold.
    Or(Vec<AtomPredicate>),
    /// The operand must not hold.
    Not(Box<AtomPredicate>),
}

impl AtomPredicate {
    /// Builds a [`AtomPredicate::SymbolSet`] from symbol literals.
    pub fn symbol_set<I, S>(symbols: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::SymbolSet(symbols.into_iter().map(Into::into).collect())
    }

    /// Evaluates the predicate for one `(query atom, target atom)` pair.
    #[must_use]
    pub fn matches(
        &self,
        query: &dyn GraphView,
        target: &dyn GraphView,
        query_atom: AtomId,
        target_atom: AtomId,
    ) -> bool {
        match self {
            Self::ExactSymbol => {
                query.atom_symbol(query_atom) == target.atom_symbol(target_atom)
            }
            Self::SymbolSet(symbols) => symbols.contains(target.atom_symbol(target_atom)),
            Self::Wildcard => true,
            Self::PerQueryAtom(per_atom) => {
                per_atom[query_atom].matches(query, target, query_atom, target_atom)
            }
            Self::And(operands) => operands
                .iter()
                .all(|p| p.matches(query, target, query_atom, target_atom)),
            Self::Or(operands) => operands
                .iter()
                .any(|p| p.matches(query, target, query_atom, target_atom)),
            Self::Not(operand) => !operand.matches(query, target, query_atom, target_atom),
        }
    }
}

/// Compatibility test between one query bond and one target bond.
#[derive(Clone, Debug)]
pub enum BondPredicate {
    /// Bond orders must be equal, or both bonds must be aromatic.
    OrderExact,
    /// Any target bond is acceptable.
    OrderAny,
    /// Target bond order must be a member of the set.
    OrderSet(BTreeSet<BondOrder>),
    /// One sub-predicate per query bond, indexed by query bond id.
    /// Indexing past the vector is a contract violation and panics.
    PerQueryBond(Vec<BondPredicate>),
    /// All operands must hold.
    And(Vec<BondPredicate>),
    /// At least one operand must hold.
    Or(Vec<BondPredicate>),
    /// The operand must not hold.
    Not(Box<BondPredicate>),
}

impl BondPredicate {
    /// Builds a [`BondPredicate::OrderSet`] from bond orders.
    pub fn order_set<I>(orders: I) -> Self
    where
        I: IntoIterator<Item = BondOrder>,
    {
        Self::OrderSet(orders.into_iter().collect())
    }

    /// Evaluates the predicate for one `(query bond, target bond)` pair.
    #[must_use]
    pub fn matches(
        &self,
        query: &dyn GraphView,
        target: &dyn GraphView,
        query_bond: BondId,
        target_bond: BondId,
    ) -> bool {
        match self {
            Self::OrderExact => {
                query.bond_order(query_bond) == target.bond_order(target_bond)
                    || (query.bond_is_aromatic(query_bond)
                        && target.bond_is_aromatic(target_bond))
            }
            Self::OrderAny => true,
            Self::OrderSet(orders) => orders.contains(&target.bond_order(target_bond)),
            Self::PerQueryBond(per_bond) => {
                per_bond[query_bond].matches(query, target, query_bond, target_bond)
            }
            Self::And(operands) => operands
                .iter()
                .all(|p| p.matches(query, target, query_bond, target_bond)),
            Self::Or(operands) => operands
                .iter()
                .any(|p| p.matches(query, target, query_bond, target_bond)),
            Self::Not(operand) => !operand.matches(query, target, query_bond, target_bond),
        }
    }
}

/// The atom and bond predicates one search runs under.
#[derive(Clone, Debug)]
pub struct MatchPredicate {
    /// Atom-level compatibility test.
    pub atom: AtomPredicate,
    /// Bond-level compatibility test.
    pub bond: BondPredicate,
}

impl MatchPredicate {
    /// Pairs an atom predicate with a bond predicate.
    #[must_use]
    pub fn new(atom: AtomPredicate, bond: BondPredicate) -> Self {
        Self { atom, bond }
    }

    /// Element symbols must match and bond orders must match (or both
    /// bonds be aromatic). The classic structure-search default.
    #[must_use]
    pub fn exact() -> Self {
        Self::new(AtomPredicate::ExactSymbol, BondPredicate::OrderExact)
    }

    /// Accepts every atom and every bond; useful for pure topology
    /// queries.
    #[must_use]
    pub fn wildcard() -> Self {
        Self::new(AtomPredicate::Wildcard, BondPredicate::OrderAny)
    }
}

impl Default for MatchPredicate {
    fn default() -> Self {
        Self::exact()
    }
}
