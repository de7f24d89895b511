//! Diagnostic box-drawing dump of a decision tree.
//!
//! ```text
//! [1] A
//! ├── label1 → [2] B
//! │   └── label3 → [3] D
//! └── label2 → [4] C
//! ```
//!
//! Each distinct entity gets a display index the first time it is printed. An entity reached a
//! second time is printed once more, marked `(seen)`, and not expanded again.

use std::{
    collections::{BTreeMap, BTreeSet},
    fmt::Write,
};

use super::Store;
use crate::{error::TopicTreeError, properties::Node};

struct Frame {
    node: Node,
    next: usize,
    prefix: String,
}

impl Store {
    /// Render the whole tree from its root.
    pub fn render_ascii(&self) -> String {
        self.render_node(self.root_node())
    }

    /// Render the subtree below `id`.
    pub fn render_ascii_from(&self, id: &str) -> Result<String, TopicTreeError> {
        Ok(self.render_node(self.node(id)?))
    }

    fn render_node(&self, node: Node) -> String {
        let mut out = String::new();
        let mut numbering: BTreeMap<String, usize> = BTreeMap::new();
        let mut visited = BTreeSet::new();

        let mut number = |id: &str| {
            let next = numbering.len() + 1;
            *numbering.entry(id.to_string()).or_insert(next)
        };

        let _ = writeln!(out, "[{}] {}", number(&node.root.id), node.root.label);
        visited.insert(node.root.id.clone());
        let mut stack = vec![Frame {
            node,
            next: 0,
            prefix: String::new(),
        }];

        while let Some(top) = stack.last_mut() {
            let idx = top.next;
            if idx >= top.node.children.len() {
                stack.pop();
                continue;
            }
            top.next += 1;
            let last = top.next == top.node.children.len();
            let child = &top.node.children[idx];
            let (branch, indent) = if last {
                ("└── ", "    ")
            } else {
                ("├── ", "│   ")
            };
            let first_visit = visited.insert(child.question.id.clone());
            let _ = writeln!(
                out,
                "{}{}{} → [{}] {}{}",
                top.prefix,
                branch,
                child.answer.label,
                number(&child.question.id),
                child.question.label,
                if first_visit { "" } else { " (seen)" }
            );
            if first_visit {
                let prefix = format!("{}{}", top.prefix, indent);
                let child_id = child.question.id.clone();
                match self.node(&child_id) {
                    Ok(node) => stack.push(Frame {
                        node,
                        next: 0,
                        prefix,
                    }),
                    Err(e) => tracing::warn!("Cannot expand '{}': {}", child_id, e),
                }
            }
        }
        out
    }
}
