//! Node assembly: one entity plus its resolved `(question, answer)` children.

use super::Store;
use crate::{
    error::TopicTreeError,
    properties::{Child, Node},
};

impl Store {
    /// Materialize the entity `id`. An entity without outgoing associations is a leaf, not an
    /// error.
    pub fn node(&self, id: &str) -> Result<Node, TopicTreeError> {
        Ok(self.node_at(self.index_of(id)?))
    }

    pub fn root_node(&self) -> Node {
        self.node_at(self.root)
    }

    /// Follow the `ordinal`-th (1-based) child of `id`, as an interactive walk does.
    pub fn choose(&self, id: &str, ordinal: usize) -> Result<Node, TopicTreeError> {
        let children = self.tree.children(self.index_of(id)?);
        match ordinal.checked_sub(1).and_then(|i| children.get(i)) {
            Some((_, child)) => Ok(self.node_at(*child)),
            None => Err(TopicTreeError::InvalidChoice {
                node: id.to_string(),
                ordinal,
                available: children.len(),
            }),
        }
    }

    pub(crate) fn node_at(&self, idx: usize) -> Node {
        Node {
            root: self.entities[idx].clone(),
            children: self
                .tree
                .children(idx)
                .into_iter()
                .map(|(association, child)| Child {
                    question: self.entities[child].clone(),
                    answer: self.link_for(association).clone(),
                })
                .collect(),
        }
    }
}
