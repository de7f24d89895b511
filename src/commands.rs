use serde::{Deserialize, Serialize};
use std::{
    fmt::{Display, Formatter},
    path::PathBuf,
};

use crate::{
    error::TopicTreeError,
    properties::{EntityPath, Node},
    session::TreeSession,
};

/// Command interface between an outer transport (HTTP handler, CLI) and a [`TreeSession`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Op {
    /// Parse and install a document whose sidecar folders are already in place.
    LoadDocument { path: PathBuf },
    /// Expand one node.
    GetNode { id: String },
    /// Every route from the root to a node
    GetPaths { id: String },
    RenderAscii,
    /// Follow the 1-based `ordinal`-th child of a node
    Choose { id: String, ordinal: usize },
}

impl Display for Op {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        match self {
            Op::LoadDocument { path } => write!(f, "LoadDocument({})", path.display()),
            Op::GetNode { id } => write!(f, "GetNode({id})"),
            Op::GetPaths { id } => write!(f, "GetPaths({id})"),
            Op::RenderAscii => write!(f, "RenderAscii"),
            Op::Choose { id, ordinal } => write!(f, "Choose({id}, {ordinal})"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OpResult {
    Node(Node),
    Paths(Vec<EntityPath>),
    Text(String),
}

impl TreeSession {
    pub fn dispatch(&mut self, op: Op) -> Result<OpResult, TopicTreeError> {
        tracing::debug!("Dispatching {}", op);
        match op {
            Op::LoadDocument { path } => self.load_document(path).map(OpResult::Node),
            Op::GetNode { id } => self.get_node(&id).map(OpResult::Node),
            Op::GetPaths { id } => self.get_paths(&id).map(OpResult::Paths),
            Op::RenderAscii => self.render_ascii().map(OpResult::Text),
            Op::Choose { id, ordinal } => self.choose(&id, ordinal).map(OpResult::Node),
        }
    }

    /// [`Self::dispatch`] over JSON: the request is an [`Op`], the reply either the [`OpResult`]
    /// or `{"error": ..., "status": ...}`.
    pub fn dispatch_json(&mut self, request: &str) -> String {
        let reply = serde_json::from_str::<Op>(request)
            .map_err(TopicTreeError::from)
            .and_then(|op| self.dispatch(op))
            .and_then(|result| Ok(serde_json::to_value(result)?));
        match reply {
            Ok(value) => value.to_string(),
            Err(e) => serde_json::json!({
                "error": e.to_string(),
                "status": e.status_code().as_u16(),
            })
            .to_string(),
        }
    }
}
