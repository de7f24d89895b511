//! The live decision tree and the boundary operations external callers use.
//!
//! A [`TreeSession`] holds at most one [`Store`]. Loading builds a fresh store from scratch and
//! swaps it in only once parsing and validation have both succeeded, so a rejected document
//! leaves the previously loaded tree fully queryable.

use std::path::Path;

use crate::{
    codec::parse_document,
    config::TreeConfig,
    error::TopicTreeError,
    properties::{EntityPath, Node},
    tree::{build, Store},
};

#[derive(Debug, Clone, Default)]
pub struct TreeSession {
    config: TreeConfig,
    store: Option<Store>,
}

impl TreeSession {
    pub fn new(config: TreeConfig) -> Self {
        TreeSession {
            config,
            store: None,
        }
    }

    pub fn config(&self) -> &TreeConfig {
        &self.config
    }

    pub fn store(&self) -> Result<&Store, TopicTreeError> {
        self.store.as_ref().ok_or(TopicTreeError::NoDocumentLoaded)
    }

    pub fn is_loaded(&self) -> bool {
        self.store.is_some()
    }

    /// Parse, validate and install the document at `path`, returning its root node.
    pub fn load_document<P: AsRef<Path>>(&mut self, path: P) -> Result<Node, TopicTreeError> {
        let path = path.as_ref();
        let store = parse_document(path, &self.config)
            .and_then(|parsed| build(parsed, &self.config))
            .inspect_err(|e| {
                tracing::warn!(
                    "Rejected {:?}: {}{}",
                    path,
                    e,
                    if self.store.is_some() {
                        "; keeping the previous tree"
                    } else {
                        ""
                    }
                )
            })?;
        let root = store.root_node();
        self.store = Some(store);
        tracing::info!("Loaded {:?} with root '{}'", path, root.root.id);
        Ok(root)
    }

    pub fn get_node(&self, id: &str) -> Result<Node, TopicTreeError> {
        self.store()?.node(id)
    }

    pub fn get_paths(&self, id: &str) -> Result<Vec<EntityPath>, TopicTreeError> {
        self.store()?.paths_to(id)
    }

    pub fn render_ascii(&self) -> Result<String, TopicTreeError> {
        Ok(self.store()?.render_ascii())
    }

    pub fn choose(&self, id: &str, ordinal: usize) -> Result<Node, TopicTreeError> {
        self.store()?.choose(id, ordinal)
    }

    /// Drop the loaded tree.
    pub fn clear(&mut self) {
        self.store = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::helpers::init_logging;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_failed_load_keeps_previous_tree() {
        init_logging();
        let dir = tempdir().unwrap();
        let good = dir.path().join("good.txt");
        let cyclic = dir.path().join("cyclic.txt");
        fs::write(&good, "A\tx\tB\nB\ty\tC\n").unwrap();
        fs::write(&cyclic, "R\tx\tS\nS\ty\tT\nT\tz\tS\n").unwrap();

        let mut session = TreeSession::default();
        assert_eq!(session.get_node("A").unwrap_err(), TopicTreeError::NoDocumentLoaded);

        assert_eq!(session.load_document(&good).unwrap().root.id, "A");
        let err = session.load_document(&cyclic).unwrap_err();
        assert!(matches!(err, TopicTreeError::CircularReference { .. }));

        assert_eq!(session.store().unwrap().root().id, "A");
        assert_eq!(session.get_paths("C").unwrap()[0].len(), 3);

        session.clear();
        assert!(!session.is_loaded());
    }

    #[test]
    fn test_reload_replaces_tree() {
        let dir = tempdir().unwrap();
        let first = dir.path().join("first.txt");
        let second = dir.path().join("second.txt");
        fs::write(&first, "A\tx\tB\n").unwrap();
        fs::write(&second, "P\tx\tQ\n").unwrap();

        let mut session = TreeSession::default();
        session.load_document(&first).unwrap();
        session.load_document(&second).unwrap();
        assert_eq!(
            session.get_node("A").unwrap_err(),
            TopicTreeError::UnknownEntity("A".into())
        );
        assert!(session.render_ascii().unwrap().starts_with("[1] P"));
    }
}
