//! Shared contracts for the molmatch workspace: the read-only graph view,
//! compatibility predicates, ring annotations, search configuration, and
//! the recoverable error taxonomy.
//!
//! The matching engine itself lives in `molmatch_engine`; this crate holds
//! everything both the engine and its callers need to agree on.

pub mod annotations;
pub mod config;
pub mod error;
pub mod graph;
pub mod predicate;
pub mod test_cases;

pub use annotations::RingAnnotations;
pub use config::{SearchConfig, SearchMode};
pub use error::MatchError;
pub use graph::{AtomId, BondId, BondOrder, GraphView, MolGraph};
pub use predicate::{AtomPredicate, BondPredicate, MatchPredicate};
