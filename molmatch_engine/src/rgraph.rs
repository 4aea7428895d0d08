//! Relation graph construction.
//!
//! Nodes are candidate pairs; two nodes are adjacent iff the mappings they
//! imply can coexist. Cliques of this graph are exactly the mutually
//! consistent pair sets, which reduces both subgraph embedding and MCS to
//! clique enumeration.

use molmatch_common::{AtomId, GraphView};

use crate::pairs::CompatPair;

/// Dense node index into a [`RGraph`].
pub(crate) type NodeId = u32;

/// The relation graph for one `(query, target)` search.
///
/// Immutable after [`RGraph::build`]. Node order is the enumeration order
/// of the pairs — ascending `(query_bond, target_bond, orientation)` —
/// which is what makes the search deterministic. Neighbor lists are kept
/// sorted so candidate sets stay sorted under intersection.
#[derive(Clone, Debug)]
pub(crate) struct RGraph {
    nodes: Vec<CompatPair>,
    identifications: Vec<[(AtomId, AtomId); 2]>,
    adjacency: Vec<Vec<NodeId>>,
}

impl RGraph {
    /// Builds nodes and mutual-consistency adjacency from the enumerated
    /// pairs. O(n^2) consistency checks, done once per search.
    pub(crate) fn build(
        query: &dyn GraphView,
        target: &dyn GraphView,
        pairs: Vec<CompatPair>,
    ) -> Self {
        let identifications: Vec<[(AtomId, AtomId); 2]> = pairs
            .iter()
            .map(|p| p.atom_identifications(query, target))
            .collect();

        let mut adjacency: Vec<Vec<NodeId>> = vec![Vec::new(); pairs.len()];
        for i in 0..pairs.len() {
            for j in (i + 1)..pairs.len() {
                if Self::consistent(
                    &pairs[i],
                    &identifications[i],
                    &pairs[j],
                    &identifications[j],
                ) {
                    adjacency[i].push(j as NodeId);
                    adjacency[j].push(i as NodeId);
                }
            }
        }

        let edge_count: usize = adjacency.iter().map(Vec::len).sum::<usize>() / 2;
        tracing::debug!(
            "relation graph: {} nodes, {} edges",
            pairs.len(),
            edge_count
        );

        Self {
            nodes: pairs,
            identifications,
            adjacency,
        }
    }

    /// Two pairs may coexist iff they use distinct bonds on both sides and
    /// the union of their atom identifications is injective in both
    /// directions. The injectivity check subsumes the topology condition:
    /// a shared query atom forces the corresponding target atoms to
    /// coincide, which in turn forces the target bonds to be adjacent.
    fn consistent(
        a: &CompatPair,
        a_idents: &[(AtomId, AtomId); 2],
        b: &CompatPair,
        b_idents: &[(AtomId, AtomId); 2],
    ) -> bool {
        if a.query_bond == b.query_bond || a.target_bond == b.target_bond {
            return false;
        }
        for &(qa, ta) in a_idents {
            for &(qb, tb) in b_idents {
                if (qa == qb) != (ta == tb) {
                    return false;
                }
            }
        }
        true
    }

    pub(crate) fn len(&self) -> usize {
        self.nodes.len()
    }

    pub(crate) fn node(&self, id: NodeId) -> &CompatPair {
        &self.nodes[id as usize]
    }

    pub(crate) fn identifications(&self, id: NodeId) -> &[(AtomId, AtomId); 2] {
        &self.identifications[id as usize]
    }

    /// Sorted neighbor list of a node. O(degree) to traverse.
    pub(crate) fn neighbors(&self, id: NodeId) -> &[NodeId] {
        &self.adjacency[id as usize]
    }
}
