//! Connected-component labeling.
//!
//! Labels are dense integers assigned in vertex iteration order: the first
//! vertex visited gets component 0, the first vertex of a not-yet-seen
//! component gets the next id, and so on. Given the same graph, the labeling
//! is always the same.

use super::VertexId;
use petgraph::algo::kosaraju_scc;
use petgraph::stable_graph::StableDiGraph;
use petgraph::unionfind::UnionFind;
use petgraph::visit::{EdgeRef, IntoEdgeReferences, NodeIndexable};
use std::collections::HashMap;

/// Component label per vertex, plus the size of each component.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ComponentLabels {
    labels: HashMap<VertexId, usize>,
    sizes: Vec<usize>,
}

impl ComponentLabels {
    /// Component id of `vertex`, or `None` for an unknown vertex.
    #[must_use]
    pub fn label(&self, vertex: VertexId) -> Option<usize> {
        self.labels.get(&vertex).copied()
    }

    /// The full vertex → component id map.
    #[must_use]
    pub fn labels(&self) -> &HashMap<VertexId, usize> {
        &self.labels
    }

    /// Number of vertices in each component, indexed by component id.
    #[must_use]
    pub fn sizes(&self) -> &[usize] {
        &self.sizes
    }

    /// Number of components.
    #[must_use]
    pub fn component_count(&self) -> usize {
        self.sizes.len()
    }

    /// Vertices of each component, indexed by component id, in ascending
    /// vertex order.
    #[must_use]
    pub fn groups(&self) -> Vec<Vec<VertexId>> {
        let mut groups: Vec<Vec<VertexId>> =
            self.sizes.iter().map(|&n| Vec::with_capacity(n)).collect();
        for (&vertex, &label) in &self.labels {
            groups[label].push(vertex);
        }
        for group in &mut groups {
            group.sort_unstable();
        }
        groups
    }

    fn from_roots<I>(vertices: I, mut root_of: impl FnMut(VertexId) -> usize) -> Self
    where
        I: IntoIterator<Item = VertexId>,
    {
        let mut root_labels: HashMap<usize, usize> = HashMap::new();
        let mut result = Self::default();
        for vertex in vertices {
            let next = root_labels.len();
            let label = *root_labels.entry(root_of(vertex)).or_insert(next);
            if label == result.sizes.len() {
                result.sizes.push(0);
            }
            result.sizes[label] += 1;
            result.labels.insert(vertex, label);
        }
        result
    }
}

/// Weak components: edge direction ignored, union-find over the edge list.
pub(super) fn label_weak(graph: &StableDiGraph<(), ()>) -> ComponentLabels {
    let mut sets = UnionFind::<usize>::new(graph.node_bound());
    for edge in graph.edge_references() {
        sets.union(edge.source().index(), edge.target().index());
    }
    ComponentLabels::from_roots(graph.node_indices(), |v| sets.find_mut(v.index()))
}

/// Strong components via Kosaraju, relabeled to follow vertex order.
pub(super) fn label_strong(graph: &StableDiGraph<(), ()>) -> ComponentLabels {
    let mut scc_of: HashMap<VertexId, usize> = HashMap::new();
    for (scc, members) in kosaraju_scc(graph).into_iter().enumerate() {
        for vertex in members {
            scc_of.insert(vertex, scc);
        }
    }
    ComponentLabels::from_roots(graph.node_indices(), |v| scc_of[&v])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_pairs() -> (StableDiGraph<(), ()>, [VertexId; 4]) {
        let mut graph = StableDiGraph::new();
        let a = graph.add_node(());
        let b = graph.add_node(());
        let c = graph.add_node(());
        let d = graph.add_node(());
        graph.add_edge(a, b, ());
        graph.add_edge(d, c, ());
        (graph, [a, b, c, d])
    }

    #[test]
    fn test_weak_labels_follow_vertex_order() {
        let (graph, [a, b, c, d]) = two_pairs();
        let labels = label_weak(&graph);

        assert_eq!(labels.component_count(), 2);
        assert_eq!(labels.sizes(), &[2, 2]);
        assert_eq!(labels.label(a), Some(0));
        assert_eq!(labels.label(b), Some(0));
        assert_eq!(labels.label(c), Some(1));
        assert_eq!(labels.label(d), Some(1));
        assert_eq!(labels.groups(), vec![vec![a, b], vec![c, d]]);
    }

    #[test]
    fn test_strong_labels_split_one_way_edges() {
        let (mut graph, [a, b, _, _]) = two_pairs();
        let labels = label_strong(&graph);
        assert_eq!(labels.component_count(), 4);

        graph.add_edge(b, a, ());
        let labels = label_strong(&graph);
        assert_eq!(labels.component_count(), 3);
        assert_eq!(labels.label(a), labels.label(b));
    }

    #[test]
    fn test_empty_graph_has_no_components() {
        let graph = StableDiGraph::<(), ()>::new();
        assert_eq!(label_weak(&graph), ComponentLabels::default());
    }
}
