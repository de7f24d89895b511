//! # topictree
//!
//! Compiles topic-map documents into navigable decision trees.
//!
//! ## Overview
//!
//! A source document describes *topics* and *associations* between them. Topics classified as
//! linking phrases become [`properties::Link`]s (answers); every other topic becomes an
//! [`properties::Entity`] (a question or state). Each association is a directed edge from one
//! entity to another, labelled by a link. topictree validates that those edges form a single
//! rooted tree and then serves it one node at a time.
//!
//! ## Architecture
//!
//! - **[`codec`]**: Document parsing (`DocCodec` trait, XTM and triad codecs)
//! - **[`tree`]**: Graph building and validation, node materialization, path resolution,
//!   ascii rendering
//! - **[`session`]**: The live tree, replaced atomically on each successful load
//! - **[`commands`]**: Serializable `Op`/`OpResult` interface for outer transports
//! - **[`properties`]**: Entity, link, association and node records
//! - **[`config`]**: Parser and builder settings, loadable from TOML
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use topictree::{config::TreeConfig, session::TreeSession};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut session = TreeSession::new(TreeConfig::default());
//!
//!     // `map.xtm` sits next to its `images/` and `texts/` folders
//!     let root = session.load_document("./export/map.xtm")?;
//!     for child in &root.children {
//!         println!("{} -> {}", child.answer.label, child.question.label);
//!     }
//!
//!     println!("{}", session.render_ascii()?);
//!     Ok(())
//! }
//! ```
//!
//! ## Failure Model
//!
//! Parsing and validation failures abort the whole load and leave any previously loaded tree in
//! place. Query failures ([`TopicTreeError::UnknownEntity`] and friends) are per call.
//!
//! ## Features
//!
//! - **default**: Library only
//! - **bin**: The `topictree` command-line tool

pub mod codec;
pub mod commands;
pub mod config;
pub mod error;
pub mod properties;
pub mod session;
#[cfg(test)]
mod tests;
pub mod tree;

pub use error::*;
