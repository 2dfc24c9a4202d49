//! Static graph model shared by the graph search variants.
//!
//! This module defines:
//! - `Edge`: a directed link to a neighbor, with a non-negative cost.
//! - `Node`: an identifier, a display position and an ordered neighbor list.
//! - `Graph`: an immutable, validated collection of nodes.
//!
//! Two fixed 7-node sample graphs are provided: `sample_graph` (unit costs,
//! used by depth-first and depth-limited search) and `weighted_sample_graph`
//! (used by uniform-cost search).
use crate::error::SearchError;
use serde::Serialize;
use std::collections::HashSet;

/// Node where every sample search starts.
pub const SAMPLE_START: &str = "A";
/// Node every sample search looks for.
pub const SAMPLE_GOAL: &str = "G";

/// A link from one node to a neighbor.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Edge {
    /// Identifier of the neighbor node.
    pub to: String,
    /// Cost of traversing the edge. Unweighted graphs use 1.
    pub cost: u32,
}

/// A graph vertex.
///
/// The neighbor order is significant: depth-first variants visit neighbors
/// in exactly the order they are declared here.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Node {
    pub id: String,
    /// Position used by renderers only; it plays no part in any search.
    pub position: (f32, f32),
    pub edges: Vec<Edge>,
}

impl Node {
    /// Creates a node whose edges all cost 1.
    pub fn unweighted(id: &str, position: (f32, f32), neighbors: &[&str]) -> Self {
        Node {
            id: id.to_string(),
            position,
            edges: neighbors
                .iter()
                .map(|to| Edge {
                    to: to.to_string(),
                    cost: 1,
                })
                .collect(),
        }
    }

    /// Creates a node from `(neighbor, cost)` pairs.
    pub fn weighted(id: &str, position: (f32, f32), neighbors: &[(&str, u32)]) -> Self {
        Node {
            id: id.to_string(),
            position,
            edges: neighbors
                .iter()
                .map(|&(to, cost)| Edge {
                    to: to.to_string(),
                    cost,
                })
                .collect(),
        }
    }

    /// Neighbor identifiers in declaration order.
    pub fn neighbors(&self) -> impl Iterator<Item = &str> {
        self.edges.iter().map(|e| e.to.as_str())
    }
}

/// An immutable graph. Once built it is never mutated.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Graph {
    nodes: Vec<Node>,
}

impl Graph {
    /// Builds a graph, checking that ids are unique and that every edge
    /// targets a node of the graph.
    ///
    /// # Errors
    /// `SearchError::DuplicateNode` or `SearchError::DanglingEdge`.
    pub fn new(nodes: Vec<Node>) -> Result<Self, SearchError> {
        let mut ids = HashSet::new();
        for node in &nodes {
            if !ids.insert(node.id.as_str()) {
                return Err(SearchError::DuplicateNode(node.id.clone()));
            }
        }
        for node in &nodes {
            if let Some(edge) = node.edges.iter().find(|e| !ids.contains(e.to.as_str())) {
                return Err(SearchError::DanglingEdge {
                    from: node.id.clone(),
                    to: edge.to.clone(),
                });
            }
        }
        Ok(Graph { nodes })
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn node(&self, id: &str) -> Option<&Node> {
        self.nodes.iter().find(|n| n.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.node(id).is_some()
    }

    /// Outgoing edges of `id`, or an empty slice for unknown ids.
    pub fn edges(&self, id: &str) -> &[Edge] {
        self.node(id).map(|n| n.edges.as_slice()).unwrap_or(&[])
    }

    /// Returns `Ok(())` if `id` names a node of this graph.
    pub fn require(&self, id: &str) -> Result<(), SearchError> {
        if self.contains(id) {
            Ok(())
        } else {
            Err(SearchError::UnknownNode(id.to_string()))
        }
    }
}

const POSITIONS: [(&str, (f32, f32)); 7] = [
    ("A", (300.0, 50.0)),
    ("B", (150.0, 150.0)),
    ("C", (450.0, 150.0)),
    ("D", (75.0, 250.0)),
    ("E", (225.0, 250.0)),
    ("F", (450.0, 250.0)),
    ("G", (337.0, 350.0)),
];

fn position(id: &str) -> (f32, f32) {
    POSITIONS
        .iter()
        .find(|(p, _)| *p == id)
        .map_or((0.0, 0.0), |&(_, pos)| pos)
}

/// The unweighted 7-node sample graph.
///
/// ```
/// use search_stepper::graph::sample_graph;
/// let graph = sample_graph();
/// let b: Vec<&str> = graph.node("B").unwrap().neighbors().collect();
/// assert_eq!(b, vec!["A", "D", "E"]);
/// ```
pub fn sample_graph() -> Graph {
    let adjacency: [(&str, &[&str]); 7] = [
        ("A", &["B", "C"]),
        ("B", &["A", "D", "E"]),
        ("C", &["A", "F"]),
        ("D", &["B"]),
        ("E", &["B", "G"]),
        ("F", &["C", "G"]),
        ("G", &["E", "F"]),
    ];
    let nodes = adjacency
        .iter()
        .map(|&(id, neighbors)| Node::unweighted(id, position(id), neighbors))
        .collect();
    Graph { nodes }
}

/// The weighted sample graph used by uniform-cost search.
///
/// Same adjacency as [`sample_graph`], with undirected costs
/// A-B 1, A-C 2, B-D 4, B-E 5, C-F 3, E-G 6, F-G 4.
pub fn weighted_sample_graph() -> Graph {
    let adjacency: [(&str, &[(&str, u32)]); 7] = [
        ("A", &[("B", 1), ("C", 2)]),
        ("B", &[("A", 1), ("D", 4), ("E", 5)]),
        ("C", &[("A", 2), ("F", 3)]),
        ("D", &[("B", 4)]),
        ("E", &[("B", 5), ("G", 6)]),
        ("F", &[("C", 3), ("G", 4)]),
        ("G", &[("E", 6), ("F", 4)]),
    ];
    let nodes = adjacency
        .iter()
        .map(|&(id, neighbors)| Node::weighted(id, position(id), neighbors))
        .collect();
    Graph { nodes }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_graphs_are_valid() {
        let plain = sample_graph();
        let weighted = weighted_sample_graph();
        assert_eq!(Graph::new(plain.nodes().to_vec()).as_ref(), Ok(&plain));
        assert_eq!(Graph::new(weighted.nodes().to_vec()).as_ref(), Ok(&weighted));
        assert_eq!(plain.nodes().len(), 7);
    }

    #[test]
    fn test_weighted_graph_is_symmetric() {
        let graph = weighted_sample_graph();
        for node in graph.nodes() {
            for edge in &node.edges {
                let back = graph
                    .edges(&edge.to)
                    .iter()
                    .find(|e| e.to == node.id)
                    .map(|e| e.cost);
                assert_eq!(back, Some(edge.cost), "{} -> {}", node.id, edge.to);
            }
        }
    }

    #[test]
    fn test_unweighted_edges_cost_one() {
        let graph = sample_graph();
        assert!(graph
            .nodes()
            .iter()
            .flat_map(|n| n.edges.iter())
            .all(|e| e.cost == 1));
    }

    #[test]
    fn test_duplicate_node_rejected() {
        let nodes = vec![
            Node::unweighted("A", (0.0, 0.0), &[]),
            Node::unweighted("A", (1.0, 1.0), &[]),
        ];
        assert_eq!(
            Graph::new(nodes),
            Err(SearchError::DuplicateNode("A".to_string()))
        );
    }

    #[test]
    fn test_dangling_edge_rejected() {
        let nodes = vec![Node::unweighted("A", (0.0, 0.0), &["Z"])];
        assert_eq!(
            Graph::new(nodes),
            Err(SearchError::DanglingEdge {
                from: "A".to_string(),
                to: "Z".to_string()
            })
        );
    }

    #[test]
    fn test_lookup() {
        let graph = sample_graph();
        assert!(graph.contains("D"));
        assert!(graph.edges("missing").is_empty());
        assert_eq!(
            graph.require("X"),
            Err(SearchError::UnknownNode("X".to_string()))
        );
    }
}
