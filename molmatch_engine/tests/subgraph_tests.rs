//! End-to-end subgraph search behavior.

use std::sync::OnceLock;
use std::time::Duration;

use molmatch_common::test_cases;
use molmatch_engine::{
    BondOrder, GraphView, MatchError, MatchMapping, MatchPredicate, MolGraph, RingAnnotations,
    SearchConfig, StructureMatcher,
};
use rstest::rstest;

fn init_test_logger() {
    static INIT: OnceLock<()> = OnceLock::new();
    let _ = INIT.get_or_init(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

lazy_static::lazy_static! {
    static ref CYCLOHEXANE: MolGraph = test_cases::cyclohexane();
    static ref ETHANOL: MolGraph = test_cases::ethanol();
}

/// Injectivity plus bond consistency of one returned mapping.
fn mapping_is_consistent(query: &MolGraph, target: &MolGraph, m: &MatchMapping) -> bool {
    let mut seen_targets = std::collections::HashSet::new();
    if !m.atom_pairs().iter().all(|&(_, t)| seen_targets.insert(t)) {
        return false;
    }
    m.bond_pairs().iter().all(|&(qb, tb)| {
        let (qa, qz) = query.bond_endpoints(qb);
        let (ta, tz) = target.bond_endpoints(tb);
        match (m.target_atom(qa), m.target_atom(qz)) {
            (Some(x), Some(y)) => (x, y) == (ta, tz) || (x, y) == (tz, ta),
            _ => false,
        }
    })
}

#[test]
fn cc_matches_every_cyclohexane_ring_bond() {
    init_test_logger();
    let query = test_cases::single_bond_cc();

    let set = StructureMatcher::find_subgraph_mappings(
        &query,
        &*CYCLOHEXANE,
        &MatchPredicate::exact(),
        &SearchConfig::subgraph(),
    )
    .unwrap();

    // one mapping per ring bond, doubled by the two bond orientations
    assert_eq!(set.len(), 12);
    assert!(!set.timed_out);
    for m in &set.mappings {
        assert_eq!(m.bond_len(), 1);
        assert!(mapping_is_consistent(&query, &CYCLOHEXANE, m));
    }
}

#[test]
fn aromatic_cc_matches_every_benzene_ring_bond() {
    init_test_logger();
    let mut query = MolGraph::new();
    let a = query.add_atom("C");
    let b = query.add_atom("C");
    query.add_aromatic_bond(a, b, BondOrder::Single);
    let benzene = test_cases::benzene();

    let set = StructureMatcher::find_subgraph_mappings(
        &query,
        &benzene,
        &MatchPredicate::exact(),
        &SearchConfig::subgraph(),
    )
    .unwrap();

    // the aromatic-aromatic clause covers both kekulé orders
    assert_eq!(set.len(), 12);
}

#[rstest]
#[case(2, 2)]
#[case(3, 4)]
#[case(6, 10)]
fn cc_match_count_in_carbon_chains(#[case] chain_len: usize, #[case] expected: usize) {
    init_test_logger();
    let query = test_cases::single_bond_cc();
    let target = test_cases::carbon_chain(chain_len);

    let count = StructureMatcher::count_matches(
        &query,
        &target,
        &MatchPredicate::exact(),
        &SearchConfig::subgraph(),
    )
    .unwrap();
    assert_eq!(count, expected);
}

#[test]
fn whole_chain_embeds_twice_into_itself() {
    init_test_logger();
    let chain = test_cases::carbon_chain(4);

    let set = StructureMatcher::find_subgraph_mappings(
        &chain,
        &chain,
        &MatchPredicate::exact(),
        &SearchConfig::subgraph(),
    )
    .unwrap();

    // identity and the end-to-end flip
    assert_eq!(set.len(), 2);
    for m in &set.mappings {
        assert_eq!(m.bond_len(), chain.bond_count());
        assert_eq!(m.atom_len(), chain.atom_count());
        assert!(mapping_is_consistent(&chain, &chain, m));
    }
}

#[test]
fn oversized_query_is_invalid_input() {
    init_test_logger();
    let query = test_cases::carbon_chain(3);
    let target = test_cases::carbon_chain(2);

    let err = StructureMatcher::find_subgraph_mappings(
        &query,
        &target,
        &MatchPredicate::exact(),
        &SearchConfig::subgraph(),
    )
    .unwrap_err();
    assert_eq!(
        err,
        MatchError::QueryLargerThanTarget {
            query_atoms: 3,
            target_atoms: 2,
        }
    );

    // the convenience wrappers propagate it
    assert!(
        StructureMatcher::first_mapping(
            &query,
            &target,
            &MatchPredicate::exact(),
            &SearchConfig::subgraph(),
        )
        .is_err()
    );
}

#[test]
fn lone_wildcard_atom_matches_every_target_atom() {
    init_test_logger();
    let query = test_cases::lone_atom("*");

    let set = StructureMatcher::find_subgraph_mappings(
        &query,
        &*ETHANOL,
        &MatchPredicate::wildcard(),
        &SearchConfig::subgraph(),
    )
    .unwrap();

    assert_eq!(set.len(), ETHANOL.atom_count());
    for (i, m) in set.mappings.iter().enumerate() {
        assert_eq!(m.atom_pairs(), vec![(0, i)]);
        assert!(m.bond_pairs().is_empty());
    }
}

#[test]
fn lone_symbol_atom_matches_only_its_element() {
    init_test_logger();
    let query = test_cases::lone_atom("O");

    let set = StructureMatcher::find_subgraph_mappings(
        &query,
        &*ETHANOL,
        &MatchPredicate::exact(),
        &SearchConfig::subgraph(),
    )
    .unwrap();

    assert_eq!(set.len(), 1);
    assert_eq!(set.mappings[0].atom_pairs(), vec![(0, 2)]);
}

#[test]
fn empty_graphs_are_no_match_not_errors() {
    init_test_logger();
    let empty = MolGraph::new();

    let set = StructureMatcher::find_subgraph_mappings(
        &empty,
        &*ETHANOL,
        &MatchPredicate::exact(),
        &SearchConfig::subgraph(),
    )
    .unwrap();
    assert!(set.is_empty());

    let set = StructureMatcher::find_subgraph_mappings(
        &*ETHANOL,
        &empty,
        &MatchPredicate::exact(),
        &SearchConfig::subgraph(),
    )
    .unwrap();
    assert!(set.is_empty());
}

#[test]
fn incompatible_query_is_empty_not_error() {
    init_test_logger();
    let mut query = MolGraph::new();
    let c = query.add_atom("C");
    let n = query.add_atom("N");
    query.add_bond(c, n, BondOrder::Single);

    let set = StructureMatcher::find_subgraph_mappings(
        &query,
        &*ETHANOL,
        &MatchPredicate::exact(),
        &SearchConfig::subgraph(),
    )
    .unwrap();
    assert!(set.is_empty());
    assert!(!set.timed_out);
}

#[test]
fn stop_at_first_short_circuits_the_search() {
    init_test_logger();
    let query = test_cases::single_bond_cc();

    let first = StructureMatcher::find_subgraph_mappings(
        &query,
        &*CYCLOHEXANE,
        &MatchPredicate::exact(),
        &SearchConfig::subgraph().with_stop_at_first(true),
    )
    .unwrap();
    let all = StructureMatcher::find_subgraph_mappings(
        &query,
        &*CYCLOHEXANE,
        &MatchPredicate::exact(),
        &SearchConfig::subgraph(),
    )
    .unwrap();

    assert_eq!(first.len(), 1);
    assert_eq!(all.len(), 12);
    // the short-circuit must actually skip work, not just drop results
    assert!(first.iterations < all.iterations);
}

#[test]
fn first_mapping_is_deterministic() {
    init_test_logger();
    let query = test_cases::single_bond_cc();

    let reference = StructureMatcher::first_mapping(
        &query,
        &*CYCLOHEXANE,
        &MatchPredicate::exact(),
        &SearchConfig::subgraph(),
    )
    .unwrap()
    .unwrap();

    for _ in 0..5 {
        let again = StructureMatcher::first_mapping(
            &query,
            &*CYCLOHEXANE,
            &MatchPredicate::exact(),
            &SearchConfig::subgraph(),
        )
        .unwrap()
        .unwrap();
        assert_eq!(again.atom_pairs(), reference.atom_pairs());
        assert_eq!(again.bond_pairs(), reference.bond_pairs());
    }
}

#[test]
fn all_mappings_is_idempotent() {
    init_test_logger();
    let query = test_cases::single_bond_cc();

    let as_tables = |set: &molmatch_engine::MatchSet| {
        set.mappings
            .iter()
            .map(MatchMapping::atom_pairs)
            .collect::<Vec<_>>()
    };

    let once = StructureMatcher::all_mappings(
        &query,
        &*CYCLOHEXANE,
        &MatchPredicate::exact(),
        &SearchConfig::subgraph(),
    )
    .unwrap();
    let twice = StructureMatcher::all_mappings(
        &query,
        &*CYCLOHEXANE,
        &MatchPredicate::exact(),
        &SearchConfig::subgraph(),
    )
    .unwrap();

    assert_eq!(as_tables(&once), as_tables(&twice));
}

#[test]
fn no_two_mappings_share_an_atom_table() {
    init_test_logger();
    let benzene = test_cases::benzene();

    let set = StructureMatcher::find_subgraph_mappings(
        &benzene,
        &benzene,
        &MatchPredicate::exact(),
        &SearchConfig::subgraph(),
    )
    .unwrap();

    let tables: std::collections::HashSet<_> = set
        .mappings
        .iter()
        .map(MatchMapping::atom_pairs)
        .collect();
    assert_eq!(tables.len(), set.len());
}

#[test]
fn zero_time_budget_returns_partial_results_flagged() {
    init_test_logger();
    let query = test_cases::single_bond_cc();

    let set = StructureMatcher::find_subgraph_mappings(
        &query,
        &*CYCLOHEXANE,
        &MatchPredicate::exact(),
        &SearchConfig::subgraph().with_time_budget(Duration::ZERO),
    )
    .unwrap();

    assert!(set.timed_out);
    assert!(set.len() < 12);
}

#[test]
fn ring_bond_refuses_chain_bond_under_ring_constraints() {
    init_test_logger();
    let query = test_cases::single_bond_cc();
    let chain = test_cases::carbon_chain(6);

    let query_rings = RingAnnotations::new(vec![true, true], vec![true]);
    let chain_rings = RingAnnotations::new(vec![false; 6], vec![false; 5]);

    let constrained = StructureMatcher::find_subgraph_mappings_with_annotations(
        &query,
        &chain,
        Some(&query_rings),
        Some(&chain_rings),
        &MatchPredicate::exact(),
        &SearchConfig::subgraph().with_ring_constraints(true),
    )
    .unwrap();
    assert!(constrained.is_empty());

    // same annotations, constraint left disabled
    let unconstrained = StructureMatcher::find_subgraph_mappings_with_annotations(
        &query,
        &chain,
        Some(&query_rings),
        Some(&chain_rings),
        &MatchPredicate::exact(),
        &SearchConfig::subgraph(),
    )
    .unwrap();
    assert_eq!(unconstrained.len(), 10);

    // constraint enabled but no annotations supplied
    let unannotated = StructureMatcher::find_subgraph_mappings(
        &query,
        &chain,
        &MatchPredicate::exact(),
        &SearchConfig::subgraph().with_ring_constraints(true),
    )
    .unwrap();
    assert_eq!(unannotated.len(), 10);
}

#[test]
fn isomorphism_requires_equal_dimensions() {
    init_test_logger();

    assert!(StructureMatcher::is_isomorphic(
        &*CYCLOHEXANE,
        &test_cases::cyclohexane(),
        &MatchPredicate::exact(),
    ));

    // same dimensions, different bonds
    assert!(!StructureMatcher::is_isomorphic(
        &*CYCLOHEXANE,
        &test_cases::benzene(),
        &MatchPredicate::exact(),
    ));

    let err = StructureMatcher::find_isomorphism_mappings(
        &*ETHANOL,
        &*CYCLOHEXANE,
        &MatchPredicate::exact(),
        &SearchConfig::subgraph(),
    )
    .unwrap_err();
    assert!(matches!(err, MatchError::SizeMismatch { .. }));
}

#[test]
fn contains_substructure_never_errors() {
    init_test_logger();

    assert!(StructureMatcher::contains_substructure(
        &test_cases::single_bond_cc(),
        &*ETHANOL,
        &MatchPredicate::exact(),
    ));
    assert!(!StructureMatcher::contains_substructure(
        &test_cases::carbon_chain(4),
        &*ETHANOL,
        &MatchPredicate::exact(),
    ));
    // oversized query degrades to false instead of an error
    assert!(!StructureMatcher::contains_substructure(
        &*ETHANOL,
        &test_cases::lone_atom("C"),
        &MatchPredicate::exact(),
    ));
}
