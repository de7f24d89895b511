//! Tree module: the validated decision tree and the queries answered over it.
//!
//! # Module Organization
//!
//! - [`graph`]: [`DecisionTree`], the ordered adjacency between entities
//! - [`store`]: [`Store`], owner of one loaded document's entities, links and associations
//! - [`builder`]: validation (single root, acyclic, no dangling edges) and parent back-fill
//! - [`materialize`]: [`Node`](crate::properties::Node) assembly for a single entity
//! - [`paths`]: root-to-target path resolution
//! - [`ascii`]: diagnostic rendering of the whole tree
//!
//! A [`Store`] only exists once its document has passed validation, so every query below runs
//! against a well-formed tree.
//!
//! ```rust
//! use topictree::{codec::{DocCodec, TriadCodec}, config::TreeConfig, tree::build};
//! # use std::path::Path;
//!
//! let config = TreeConfig::default();
//! let parsed = TriadCodec
//!     .parse("A\tlabel1\tB\nA\tlabel2\tC\nB\tlabel3\tD\n", Path::new("."), &config)
//!     .unwrap();
//! let store = build(parsed, &config).unwrap();
//! assert_eq!(store.root().id, "A");
//! assert_eq!(store.paths_to("D").unwrap()[0].len(), 3);
//! ```

pub mod ascii;
pub mod builder;
mod graph;
pub mod materialize;
pub mod paths;
mod store;

pub use builder::build;
pub use graph::DecisionTree;
pub use store::Store;
