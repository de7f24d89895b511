//! XTM 1.0 topic map codec.
//!
//! Expected shape (namespaces elided):
//!
//! ```text
//! <topicMap>
//!   <topic id="t1">
//!     <instanceOf><subjectIndicatorRef xlink:href="...#concept"/></instanceOf>
//!     <baseName><baseNameString>Is it raining?</baseNameString></baseName>
//!     <occurrence><resourceRef xlink:href="file:/./rain.png"/></occurrence>
//!   </topic>
//!   <topic id="l1">
//!     <instanceOf><subjectIndicatorRef xlink:href="...#linkingPhrase"/></instanceOf>
//!     <baseName><baseNameString>yes</baseNameString></baseName>
//!   </topic>
//!   <association>
//!     <instanceOf><topicRef xlink:href="#l1"/></instanceOf>
//!     <member><topicRef xlink:href="#t1"/></member>
//!     <member><topicRef xlink:href="#t2"/></member>
//!   </association>
//! </topicMap>
//! ```

use roxmltree::{Document, Node as XmlNode};
use std::{borrow::Cow, fs, io, path::Path};

use super::DocCodec;
use crate::{
    config::TreeConfig,
    error::TopicTreeError,
    properties::{Association, Entity, Link, ParsedDocument},
};

pub const XTM_NS: &str = "http://www.topicmaps.org/xtm/1.0/";
pub const XLINK_NS: &str = "http://www.w3.org/1999/xlink";

#[derive(Debug, Default, Clone, Copy)]
pub struct XtmCodec;

impl DocCodec for XtmCodec {
    fn parse(
        &self,
        content: &str,
        folder: &Path,
        config: &TreeConfig,
    ) -> Result<ParsedDocument, TopicTreeError> {
        let doc = Document::parse(content)?;
        let root = doc.root_element();
        if !root.has_tag_name((XTM_NS, "topicMap")) {
            return Err(malformed(
                &root,
                format!(
                    "root element is <{}>, expected an XTM topicMap in namespace {XTM_NS}",
                    root.tag_name().name()
                ),
            ));
        }
        let mut parsed = ParsedDocument::default();

        for topic in root.descendants().filter(|n| is_xtm(n, "topic")) {
            let id = topic.attribute("id").ok_or_else(|| {
                malformed(&topic, "topic without an id attribute".to_string())
            })?;
            let kind = topic_type(&topic, id)?;
            let label = base_name(&topic, id)?;

            if kind == config.linking_phrase_marker {
                parsed.links.push(Link::new(id, label));
                continue;
            }

            let mut entity = Entity::new(id, label);
            if let Some(href) = last_resource_ref(&topic) {
                resolve_resource(&mut entity, href, folder, config)?;
            }
            parsed.entities.push(entity);
        }

        for association in root.descendants().filter(|n| is_xtm(n, "association")) {
            parsed
                .associations
                .push(parse_association(&association, &parsed.links)?);
        }

        Ok(parsed)
    }
}

fn is_xtm(node: &XmlNode, name: &str) -> bool {
    node.is_element() && node.has_tag_name((XTM_NS, name))
}

fn child<'a, 'input>(node: &XmlNode<'a, 'input>, name: &str) -> Option<XmlNode<'a, 'input>> {
    node.children().find(|n| is_xtm(n, name))
}

fn href<'a>(node: &XmlNode<'a, '_>) -> Option<&'a str> {
    node.attribute((XLINK_NS, "href"))
        .or_else(|| node.attribute("href"))
}

/// The id fragment of a reference: everything after the last `#`.
fn fragment(href: &str) -> Option<&str> {
    let frag = href.rsplit('#').next().unwrap_or(href).trim();
    if frag.is_empty() {
        None
    } else {
        Some(frag)
    }
}

fn malformed(node: &XmlNode, msg: String) -> TopicTreeError {
    let pos = node.document().text_pos_at(node.range().start);
    TopicTreeError::MalformedDocument(format!("{msg} (line {}, column {})", pos.row, pos.col))
}

fn topic_type(topic: &XmlNode, id: &str) -> Result<String, TopicTreeError> {
    let instance_of = child(topic, "instanceOf")
        .ok_or_else(|| malformed(topic, format!("topic '{id}' has no instanceOf")))?;
    instance_of
        .descendants()
        .filter(|n| is_xtm(n, "subjectIndicatorRef") || is_xtm(n, "topicRef"))
        .find_map(|n| href(&n))
        .and_then(fragment)
        .map(str::to_string)
        .ok_or_else(|| {
            malformed(
                topic,
                format!("topic '{id}' has an unresolvable type reference"),
            )
        })
}

fn base_name(topic: &XmlNode, id: &str) -> Result<String, TopicTreeError> {
    topic
        .descendants()
        .find(|n| is_xtm(n, "baseNameString"))
        .map(|n| n.text().unwrap_or_default().trim().to_string())
        .ok_or_else(|| malformed(topic, format!("topic '{id}' has no baseNameString")))
}

fn last_resource_ref<'a>(topic: &XmlNode<'a, '_>) -> Option<&'a str> {
    topic
        .children()
        .filter(|n| is_xtm(n, "occurrence"))
        .filter_map(|occurrence| {
            let resource = child(&occurrence, "resourceRef");
            if resource.is_none() {
                tracing::debug!(
                    "Skipping occurrence without resourceRef on topic {:?}",
                    topic.attribute("id")
                );
            }
            resource.and_then(|r| href(&r))
        })
        .last()
}

/// Last path segment of `href`, percent-decoded. Undecodable escapes are kept as written.
fn basename(href: &str) -> Cow<'_, str> {
    let raw = href.rsplit(['/', '\\']).next().unwrap_or(href);
    urlencoding::decode(raw).unwrap_or(Cow::Borrowed(raw))
}

/// Attach the image or description an occurrence points at.
fn resolve_resource(
    entity: &mut Entity,
    href: &str,
    folder: &Path,
    config: &TreeConfig,
) -> Result<(), TopicTreeError> {
    let name = basename(href);
    let name = name.as_ref();
    let ext = Path::new(name)
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or_default()
        .to_string();

    if !name.is_empty() && config.is_image_extension(&ext) {
        entity.image = Some(folder.join(&config.images_dir).join(name));
    } else if !name.is_empty() && config.is_text_extension(&ext) {
        let path = folder.join(&config.texts_dir).join(name);
        entity.description = Some(read_sidecar(&path, &ext, config)?);
    } else if config.literal_resource_descriptions && !href.starts_with("file:") {
        entity.description = Some(href.to_string());
    } else {
        tracing::debug!(
            "Ignoring resource '{}' on entity '{}': unrecognized extension",
            href,
            entity.id
        );
    }
    Ok(())
}

/// Read a text sidecar. Bytes that are not valid UTF-8 are replaced rather than failing the load.
fn read_sidecar(path: &Path, ext: &str, config: &TreeConfig) -> Result<String, TopicTreeError> {
    let unavailable = |path: &Path, e: io::Error| TopicTreeError::ResourceUnavailable {
        path: path.display().to_string(),
        reason: e.to_string(),
    };
    let (path, bytes) = match fs::read(path) {
        Ok(bytes) => (path.to_path_buf(), bytes),
        Err(e)
            if e.kind() == io::ErrorKind::NotFound
                && config.html_extension_fallback
                && ext.eq_ignore_ascii_case("htm") =>
        {
            let long = path.with_extension("html");
            tracing::debug!("{:?} not found, retrying as {:?}", path, long);
            let bytes = fs::read(&long).map_err(|e| unavailable(&long, e))?;
            (long, bytes)
        }
        Err(e) => return Err(unavailable(path, e)),
    };
    match String::from_utf8(bytes) {
        Ok(text) => Ok(text),
        Err(e) => {
            tracing::warn!("{:?} is not valid UTF-8; replacing invalid bytes", path);
            Ok(String::from_utf8_lossy(e.as_bytes()).into_owned())
        }
    }
}

fn member_ref(member: &XmlNode) -> Option<String> {
    member
        .descendants()
        .filter(|n| is_xtm(n, "topicRef"))
        .find_map(|n| href(&n))
        .and_then(fragment)
        .map(str::to_string)
}

fn parse_association(
    association: &XmlNode,
    links: &[Link],
) -> Result<Association, TopicTreeError> {
    let link_id = child(association, "instanceOf")
        .and_then(|instance_of| {
            instance_of
                .descendants()
                .filter(|n| is_xtm(n, "topicRef"))
                .find_map(|n| href(&n))
        })
        .and_then(fragment)
        .ok_or_else(|| {
            malformed(
                association,
                "association without a resolvable type reference".to_string(),
            )
        })?;

    let members = association
        .children()
        .filter(|n| is_xtm(n, "member"))
        .collect::<Vec<_>>();
    if members.len() != 2 {
        return Err(malformed(
            association,
            format!(
                "association '{link_id}' has {} members, expected 2",
                members.len()
            ),
        ));
    }
    let from_id = member_ref(&members[0]).ok_or_else(|| {
        malformed(
            association,
            format!("association '{link_id}' has an unresolvable source member"),
        )
    })?;
    let to_id = member_ref(&members[1]).ok_or_else(|| {
        malformed(
            association,
            format!("association '{link_id}' has an unresolvable target member"),
        )
    })?;

    let link = links.iter().find(|l| l.id == link_id).ok_or_else(|| {
        malformed(
            association,
            format!("association references unknown linking phrase '{link_id}'"),
        )
    })?;

    Ok(Association {
        id: link.id.clone(),
        from_id,
        to_id,
        label: link.label.clone(),
    })
}
