use crate::error::TopicTreeError;
use serde::{Deserialize, Serialize};
use std::{fs::read_to_string, path::Path};

/// How the graph builder treats an entity that is the target of more than one association.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MultiParentPolicy {
    /// Strict tree: a second incoming association fails the build.
    #[default]
    Reject,
    /// Tolerate convergent nodes; the last association visited sets the parent.
    LastWins,
}

/// Parser and builder settings. Every field has a default, so a config file only needs the keys
/// it overrides:
///
/// ```toml
/// multi_parent = "last_wins"
/// image_extensions = ["png", "jpg"]
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TreeConfig {
    /// Fragment of a topic's type indicator that classifies it as a link.
    pub linking_phrase_marker: String,
    /// Sidecar folder for images, relative to the document's folder.
    pub images_dir: String,
    /// Sidecar folder for description texts, relative to the document's folder.
    pub texts_dir: String,
    pub image_extensions: Vec<String>,
    pub text_extensions: Vec<String>,
    /// Retry a missing `.htm` sidecar as `.html`.
    pub html_extension_fallback: bool,
    /// Keep a resource reference that is neither an image nor a text file verbatim as the
    /// entity's description.
    pub literal_resource_descriptions: bool,
    pub multi_parent: MultiParentPolicy,
}

impl Default for TreeConfig {
    fn default() -> Self {
        TreeConfig {
            linking_phrase_marker: "linkingPhrase".to_string(),
            images_dir: "images".to_string(),
            texts_dir: "texts".to_string(),
            image_extensions: ["png", "jpg", "jpeg", "gif", "bmp", "svg", "webp"]
                .iter()
                .map(|ext| ext.to_string())
                .collect(),
            text_extensions: ["txt", "htm", "html"]
                .iter()
                .map(|ext| ext.to_string())
                .collect(),
            html_extension_fallback: true,
            literal_resource_descriptions: true,
            multi_parent: MultiParentPolicy::Reject,
        }
    }
}

impl TreeConfig {
    pub fn from_toml(content: &str) -> Result<Self, TopicTreeError> {
        Ok(toml::from_str(content)?)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, TopicTreeError> {
        tracing::debug!("Reading config from {:?}", path.as_ref());
        let content = read_to_string(path.as_ref())?;
        Self::from_toml(&content)
    }

    pub fn is_image_extension(&self, ext: &str) -> bool {
        self.image_extensions
            .iter()
            .any(|known| known.eq_ignore_ascii_case(ext))
    }

    pub fn is_text_extension(&self, ext: &str) -> bool {
        self.text_extensions
            .iter()
            .any(|known| known.eq_ignore_ascii_case(ext))
    }
}
