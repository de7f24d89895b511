//! Tab-separated triad codec: one `source<TAB>label<TAB>target` edge per line.
//!
//! Entity ids double as their labels. Each line gets its own link, `link-<line number>`, so two
//! lines that share a label still produce distinct associations.

use std::{collections::BTreeSet, path::Path};

use super::DocCodec;
use crate::{
    config::TreeConfig,
    error::TopicTreeError,
    properties::{Association, Entity, Link, ParsedDocument},
};

#[derive(Debug, Default, Clone, Copy)]
pub struct TriadCodec;

impl DocCodec for TriadCodec {
    fn parse(
        &self,
        content: &str,
        _folder: &Path,
        _config: &TreeConfig,
    ) -> Result<ParsedDocument, TopicTreeError> {
        let mut parsed = ParsedDocument::default();
        let mut seen = BTreeSet::new();

        for (idx, raw) in content.lines().enumerate() {
            let line_no = idx + 1;
            let line = raw.trim_matches(|c| c == '\r' || c == '\n' || c == ' ');
            if line.is_empty() {
                continue;
            }
            let fields = line.split('\t').map(str::trim).collect::<Vec<_>>();
            let &[source, label, target] = fields.as_slice() else {
                return Err(TopicTreeError::MalformedDocument(format!(
                    "line {line_no}: expected 3 tab-separated fields, found {}",
                    fields.len()
                )));
            };
            if source.is_empty() || target.is_empty() {
                return Err(TopicTreeError::MalformedDocument(format!(
                    "line {line_no}: empty source or target"
                )));
            }

            for name in [source, target] {
                if seen.insert(name.to_string()) {
                    parsed.entities.push(Entity::new(name, name));
                }
            }
            let link = Link::new(format!("link-{line_no}"), label);
            parsed.associations.push(Association {
                id: link.id.clone(),
                from_id: source.to_string(),
                to_id: target.to_string(),
                label: link.label.clone(),
            });
            parsed.links.push(link);
        }

        Ok(parsed)
    }
}
