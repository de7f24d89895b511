//! Document parsing into raw topic records.
//!
//! A codec turns the text of one source document into a [`ParsedDocument`]: entities, links and
//! associations in document order, with no tree semantics yet. Validation of the graph they
//! describe is left to [`crate::tree`].
//!
//! ## Built-in Codecs
//!
//! - **XTM** (`.xtm`, `.xml`) - via [`xtm::XtmCodec`], a topic map whose linking-phrase topics
//!   label the associations between concept topics. Sidecar resources are resolved relative to
//!   the document's folder (`images/`, `texts/`).
//! - **Triads** (`.txt`, `.tsv`, `.triads`) - via [`triads::TriadCodec`], one
//!   `source<TAB>label<TAB>target` edge per line.

use std::{fs::read_to_string, path::Path};

use crate::{config::TreeConfig, error::TopicTreeError, properties::ParsedDocument};

pub mod triads;
pub mod xtm;

pub use triads::TriadCodec;
pub use xtm::XtmCodec;

/// Implement to support a new source format.
pub trait DocCodec {
    /// Parse `content`. `folder` is the directory holding the source document, against which
    /// sidecar resources are resolved.
    fn parse(
        &self,
        content: &str,
        folder: &Path,
        config: &TreeConfig,
    ) -> Result<ParsedDocument, TopicTreeError>;
}

/// Pick a codec by file extension.
pub fn codec_for_path(path: &Path) -> Result<Box<dyn DocCodec>, TopicTreeError> {
    let ext = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "xtm" | "xml" => Ok(Box::new(XtmCodec)),
        "txt" | "tsv" | "triads" => Ok(Box::new(TriadCodec)),
        _ => Err(TopicTreeError::MalformedDocument(format!(
            "no codec for {path:?} (expected .xtm, .xml, .txt, .tsv or .triads)"
        ))),
    }
}

/// Read and parse the document at `path` with the codec matching its extension.
pub fn parse_document(path: &Path, config: &TreeConfig) -> Result<ParsedDocument, TopicTreeError> {
    let codec = codec_for_path(path)?;
    tracing::debug!("Reading {:?}", path);
    let content = read_to_string(path)?;
    let folder = path.parent().unwrap_or_else(|| Path::new("."));
    let parsed = codec.parse(&content, folder, config)?;
    tracing::info!(
        "Parsed {:?}: {} entities, {} links, {} associations",
        path,
        parsed.entities.len(),
        parsed.links.len(),
        parsed.associations.len()
    );
    Ok(parsed)
}
