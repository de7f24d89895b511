//! [crate::properties] contains the records produced by the codecs and served by the
//! [crate::tree::Store]: entities, links, associations and materialized nodes.
use serde::{Deserialize, Serialize};
use std::{
    fmt::{Display, Formatter},
    path::PathBuf,
};

/// A question/state topic.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entity {
    pub id: String,
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Set by the graph builder. Absent for the root.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,
}

impl Entity {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Entity {
            id: id.into(),
            label: label.into(),
            ..Default::default()
        }
    }
}

impl Display for Entity {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        if self.label.is_empty() || self.label == self.id {
            write!(f, "{}", self.id)
        } else {
            write!(f, "{} ({})", self.label, self.id)
        }
    }
}

/// An answer/choice topic: the linking phrase that labels an association.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    pub id: String,
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Link {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Link {
            id: id.into(),
            label: label.into(),
            ..Default::default()
        }
    }
}

/// A directed edge from a parent entity to a child entity. `id` is the id of the [`Link`] whose
/// label it carries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Association {
    pub id: String,
    pub from_id: String,
    pub to_id: String,
    pub label: String,
}

impl Display for Association {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "{} --[{}: {}]--> {}",
            self.from_id, self.id, self.label, self.to_id
        )
    }
}

/// One resolved child of a [`Node`]: the child entity and the link that leads to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Child {
    pub question: Entity,
    pub answer: Link,
}

/// A materialized view of one entity plus its immediate children, in insertion order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    pub root: Entity,
    pub children: Vec<Child>,
}

impl Node {
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}

/// An ordered root-to-target route.
pub type EntityPath = Vec<Entity>;

/// Raw records produced by a [`crate::codec::DocCodec`], in document order, with no tree
/// semantics yet.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedDocument {
    pub entities: Vec<Entity>,
    pub links: Vec<Link>,
    pub associations: Vec<Association>,
}

impl ParsedDocument {
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty() && self.links.is_empty() && self.associations.is_empty()
    }
}
