//! Reply graph between authors.

use api::InteractionAdjacency;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphNode {
    pub id: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphEdge {
    pub source: String,
    pub target: String,
    pub value: u64,
}

impl GraphEdge {
    pub fn is_self_loop(&self) -> bool {
        self.source == self.target
    }

    /// Stroke width for drawing the edge; grows with the square root of the volume.
    pub fn width(&self) -> f64 {
        (self.value as f64).sqrt()
    }
}

/// Node and edge lists built once from the backend adjacency.
///
/// Only authors that appear as a source become nodes. An author who was replied to but never
/// replied is reachable as an edge target only.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InteractionGraph {
    pub nodes: Vec<GraphNode>,
    pub edges: Vec<GraphEdge>,
}

impl InteractionGraph {
    pub fn build(adjacency: &InteractionAdjacency) -> Self {
        let nodes = adjacency
            .keys()
            .map(|id| GraphNode { id: id.clone() })
            .collect();

        let edges = adjacency
            .iter()
            .flat_map(|(source, targets)| {
                targets.iter().map(move |(target, value)| GraphEdge {
                    source: source.clone(),
                    target: target.clone(),
                    value: *value,
                })
            })
            .collect();

        Self { nodes, edges }
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.edges.is_empty()
    }

    pub fn total_interactions(&self) -> u64 {
        self.edges.iter().map(|edge| edge.value).sum()
    }

    pub fn has_node(&self, id: &str) -> bool {
        self.nodes.iter().any(|node| node.id == id)
    }

    /// Heaviest edges first; equal weights keep their adjacency order.
    pub fn strongest(&self, limit: usize) -> Vec<GraphEdge> {
        let mut edges = self.edges.clone();
        edges.sort_by(|a, b| b.value.cmp(&a.value));
        edges.truncate(limit);
        edges
    }
}
