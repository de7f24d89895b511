use std::io;

use http::status::StatusCode;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use serde_json::Error as JsonError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
pub enum TopicTreeError {
    #[error("Malformed document: {0}")]
    MalformedDocument(String),
    #[error("No root found: every entity is the target of some association")]
    NoRootFound,
    #[error("Ambiguous root: {} entities have no incoming association ({})", .candidates.len(), .candidates.join(", "))]
    AmbiguousRoot { candidates: Vec<String> },
    #[error("Circular reference: {}", .cycle.join(" -> "))]
    CircularReference { cycle: Vec<String> },
    #[error("Entity '{entity}' has more than one parent ({})", .parents.join(", "))]
    MultipleParents {
        entity: String,
        parents: Vec<String>,
    },
    #[error("Association '{association}' references unknown entity '{entity}'")]
    DanglingReference { association: String, entity: String },
    #[error("Unknown entity: {0}")]
    UnknownEntity(String),
    #[error("Invalid choice {ordinal} for '{node}': expected 1..={available}")]
    InvalidChoice {
        node: String,
        ordinal: usize,
        available: usize,
    },
    #[error("Resource unavailable at {path}: {reason}")]
    ResourceUnavailable { path: String, reason: String },
    #[error("File System error: {0}")]
    Io(String),
    #[error("(De)Serialization error: {0}")]
    Serialization(String),
    #[error("No document has been loaded")]
    NoDocumentLoaded,
}

impl TopicTreeError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            TopicTreeError::MalformedDocument(_) => StatusCode::UNPROCESSABLE_ENTITY,
            TopicTreeError::NoRootFound => StatusCode::UNPROCESSABLE_ENTITY,
            TopicTreeError::AmbiguousRoot { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            TopicTreeError::CircularReference { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            TopicTreeError::MultipleParents { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            TopicTreeError::DanglingReference { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            TopicTreeError::UnknownEntity(_) => StatusCode::NOT_FOUND,
            TopicTreeError::InvalidChoice { .. } => StatusCode::BAD_REQUEST,
            TopicTreeError::ResourceUnavailable { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            TopicTreeError::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
            TopicTreeError::Serialization(_) => StatusCode::INTERNAL_SERVER_ERROR,
            TopicTreeError::NoDocumentLoaded => StatusCode::CONFLICT,
        }
    }

    /// True for failures detected while parsing or building a document, which abort the whole
    /// load. Query-time failures leave the live tree untouched either way.
    pub fn is_load_failure(&self) -> bool {
        !matches!(
            self,
            TopicTreeError::UnknownEntity(_)
                | TopicTreeError::InvalidChoice { .. }
                | TopicTreeError::NoDocumentLoaded
        )
    }
}

impl From<roxmltree::Error> for TopicTreeError {
    fn from(src: roxmltree::Error) -> TopicTreeError {
        TopicTreeError::MalformedDocument(format!("XML parse failed: {src}"))
    }
}

impl From<toml::de::Error> for TopicTreeError {
    fn from(src: toml::de::Error) -> TopicTreeError {
        TopicTreeError::Serialization(format!("Toml deserialization error: {src}"))
    }
}

impl From<JsonError> for TopicTreeError {
    fn from(src: JsonError) -> TopicTreeError {
        TopicTreeError::Serialization(format!("JSON (de)serialization error: {src}"))
    }
}

impl From<io::Error> for TopicTreeError {
    fn from(x: io::Error) -> Self {
        match x.kind() {
            io::ErrorKind::NotFound => TopicTreeError::Io(format!("not found: {x}")),
            _ => TopicTreeError::Io(format!("IOError: {}", x.kind())),
        }
    }
}
