//! Ordered adjacency between entities.

use std::collections::BTreeSet;

use petgraph::{
    graph::{DiGraph, EdgeIndex, NodeIndex},
    visit::EdgeRef,
    Direction,
};

/// Directed graph whose node `i` is entity `i` of the owning [`super::Store`] and whose edge
/// weights are association indices.
///
/// petgraph hands back a node's edges most-recent-first; every accessor here re-sorts by edge
/// index so callers see association insertion order.
#[derive(Debug, Clone, Default)]
pub struct DecisionTree(DiGraph<usize, usize>);

impl DecisionTree {
    pub fn with_entities(count: usize) -> Self {
        let mut graph = DiGraph::with_capacity(count, count.saturating_sub(1));
        for idx in 0..count {
            graph.add_node(idx);
        }
        DecisionTree(graph)
    }

    pub fn as_graph(&self) -> &DiGraph<usize, usize> {
        &self.0
    }

    pub(crate) fn add_edge(&mut self, from: usize, to: usize, association: usize) -> EdgeIndex {
        self.0
            .add_edge(NodeIndex::new(from), NodeIndex::new(to), association)
    }

    fn ordered(&self, entity: usize, dir: Direction) -> Vec<(usize, usize)> {
        let mut edges = self
            .0
            .edges_directed(NodeIndex::new(entity), dir)
            .map(|e| {
                let other = match dir {
                    Direction::Outgoing => e.target(),
                    Direction::Incoming => e.source(),
                };
                (e.id(), *e.weight(), other.index())
            })
            .collect::<Vec<_>>();
        edges.sort_by_key(|(id, _, _)| *id);
        edges
            .into_iter()
            .map(|(_, association, other)| (association, other))
            .collect()
    }

    /// `(association, child)` pairs of `entity`, in insertion order.
    pub fn children(&self, entity: usize) -> Vec<(usize, usize)> {
        self.ordered(entity, Direction::Outgoing)
    }

    /// Distinct parents of `entity`, in insertion order of the first association from each.
    /// Two answers from the same parent leading here count once.
    pub fn parents(&self, entity: usize) -> Vec<usize> {
        let mut seen = BTreeSet::new();
        self.ordered(entity, Direction::Incoming)
            .into_iter()
            .map(|(_, parent)| parent)
            .filter(|parent| seen.insert(*parent))
            .collect()
    }

    pub fn has_incoming(&self, entity: usize) -> bool {
        self.0
            .neighbors_directed(NodeIndex::new(entity), Direction::Incoming)
            .next()
            .is_some()
    }

    /// `(from, to)` entity pairs of every edge, in insertion order.
    pub fn edges(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.0
            .raw_edges()
            .iter()
            .map(|e| (e.source().index(), e.target().index()))
    }

    /// child → distinct parents, inverted once for path resolution.
    pub fn reverse_index(&self) -> Vec<Vec<usize>> {
        let mut parents: Vec<Vec<usize>> = vec![Vec::new(); self.0.node_count()];
        for (from, to) in self.edges() {
            if !parents[to].contains(&from) {
                parents[to].push(from);
            }
        }
        parents
    }

    pub fn entity_count(&self) -> usize {
        self.0.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.0.edge_count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_children_keep_insertion_order() {
        let mut tree = DecisionTree::with_entities(4);
        tree.add_edge(0, 2, 0);
        tree.add_edge(0, 1, 1);
        tree.add_edge(0, 3, 2);
        tree.add_edge(1, 3, 3);
        assert_eq!(tree.children(0), vec![(0, 2), (1, 1), (2, 3)]);
        assert!(tree.children(2).is_empty());
        assert_eq!(tree.parents(3), vec![0, 1]);
        assert!(!tree.has_incoming(0));
        assert_eq!(tree.reverse_index()[3], vec![0, 1]);
        assert_eq!(tree.edge_count(), 4);
    }

    #[test]
    fn test_repeated_answers_from_one_parent_count_once() {
        let mut tree = DecisionTree::with_entities(3);
        tree.add_edge(0, 1, 0);
        tree.add_edge(2, 1, 1);
        tree.add_edge(0, 1, 2);
        assert_eq!(tree.children(0), vec![(0, 1), (2, 1)]);
        assert_eq!(tree.parents(1), vec![0, 2]);
        assert_eq!(tree.reverse_index()[1], vec![0, 2]);
    }
}
