use std::collections::BTreeMap;

use super::DecisionTree;
use crate::{
    error::TopicTreeError,
    properties::{Association, Entity, Link},
};

/// Owns one validated document: entity, link and association arenas, id lookups, and the
/// [`DecisionTree`] over them. Built only by [`super::build`].
#[derive(Debug, Clone)]
pub struct Store {
    pub(crate) entities: Vec<Entity>,
    pub(crate) links: Vec<Link>,
    pub(crate) associations: Vec<Association>,
    pub(crate) entity_index: BTreeMap<String, usize>,
    pub(crate) link_index: BTreeMap<String, usize>,
    pub(crate) tree: DecisionTree,
    pub(crate) root: usize,
}

impl Store {
    pub fn root(&self) -> &Entity {
        &self.entities[self.root]
    }

    pub fn entity(&self, id: &str) -> Option<&Entity> {
        self.entity_index.get(id).map(|idx| &self.entities[*idx])
    }

    pub fn link(&self, id: &str) -> Option<&Link> {
        self.link_index.get(id).map(|idx| &self.links[*idx])
    }

    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    pub fn links(&self) -> &[Link] {
        &self.links
    }

    pub fn associations(&self) -> &[Association] {
        &self.associations
    }

    pub fn tree(&self) -> &DecisionTree {
        &self.tree
    }

    pub(crate) fn index_of(&self, id: &str) -> Result<usize, TopicTreeError> {
        self.entity_index
            .get(id)
            .copied()
            .ok_or_else(|| TopicTreeError::UnknownEntity(id.to_string()))
    }

    /// The link an association points at. Builder validation guarantees it exists.
    pub(crate) fn link_for(&self, association: usize) -> &Link {
        let id = &self.associations[association].id;
        &self.links[self.link_index[id]]
    }
}
