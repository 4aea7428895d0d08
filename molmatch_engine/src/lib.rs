//! Relation-graph structure matching for molecular graphs.
//!
//! Given a query graph and a target graph, this crate finds every way the
//! query's atoms and bonds map onto a consistent subset of the target
//! (subgraph isomorphism), or the largest mapping common to both graphs
//! (maximum common substructure), under pluggable atom/bond compatibility
//! predicates.
//!
//! The pipeline: compatible `(query bond, target bond)` pairs are
//! enumerated, a relation graph is built whose edges connect mutually
//! consistent pairs, and cliques of that graph — which correspond exactly
//! to valid mappings — are enumerated by a pruned backtracking search.
//! Results are deterministic, de-duplicated, and ordered by acceptance.
//!
//! [`StructureMatcher`] is the entry point; everything it needs from the
//! caller side (graph views, predicates, configuration) lives in
//! `molmatch_common` and is re-exported here.

mod extract;
mod mapping;
mod matcher;
mod pairs;
mod rgraph;
mod search;

pub use extract::MatchMapping;
pub use matcher::{MatchSet, StructureMatcher};

pub use molmatch_common::{
    AtomId, AtomPredicate, BondId, BondOrder, BondPredicate, GraphView, MatchError,
    MatchPredicate, MolGraph, RingAnnotations, SearchConfig, SearchMode,
};
