//! Shared test utilities for codec and tree testing

use crate::{
    codec::{xtm::XLINK_NS, xtm::XTM_NS, DocCodec, TriadCodec},
    config::{MultiParentPolicy, TreeConfig},
    error::TopicTreeError,
    properties::ParsedDocument,
    tree::{build, Store},
};
use std::path::Path;

/// Initialize logging for tests
pub fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init()
        .ok();
}

/// Parse `source<TAB>label<TAB>target` lines into raw records
pub fn parsed_from_triads(lines: &[&str]) -> ParsedDocument {
    TriadCodec
        .parse(&lines.join("\n"), Path::new("."), &TreeConfig::default())
        .expect("test triads should parse")
}

/// Parse and build triad lines under the given multi-parent policy
pub fn build_triads(lines: &[&str], policy: MultiParentPolicy) -> Result<Store, TopicTreeError> {
    init_logging();
    let config = TreeConfig {
        multi_parent: policy,
        ..Default::default()
    };
    build(parsed_from_triads(lines), &config)
}

/// One `<topic>` element. `kind` is the fragment of its type indicator.
pub fn xtm_topic(id: &str, kind: &str, label: &str, resource: Option<&str>) -> String {
    let occurrence = resource
        .map(|href| format!(r#"<occurrence><resourceRef xlink:href="{href}"/></occurrence>"#))
        .unwrap_or_default();
    format!(
        r##"<topic id="{id}">
  <instanceOf><subjectIndicatorRef xlink:href="http://cmap.ihmc.us/xml/cmap.xtm#{kind}"/></instanceOf>
  <baseName><baseNameString>{label}</baseNameString></baseName>
  {occurrence}
</topic>"##
    )
}

/// A complete topic map from topic elements and `(link, from, to)` associations
pub fn xtm_document(topics: &[String], associations: &[(&str, &str, &str)]) -> String {
    let associations = associations
        .iter()
        .map(|(link, from, to)| {
            format!(
                r##"<association>
  <instanceOf><topicRef xlink:href="#{link}"/></instanceOf>
  <member><topicRef xlink:href="#{from}"/></member>
  <member><topicRef xlink:href="#{to}"/></member>
</association>"##
            )
        })
        .collect::<Vec<_>>()
        .join("\n");
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<topicMap xmlns="{XTM_NS}" xmlns:xlink="{XLINK_NS}">
{}
{associations}
</topicMap>"#,
        topics.join("\n")
    )
}
