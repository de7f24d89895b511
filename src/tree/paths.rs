//! Root-to-target path resolution.

use std::collections::VecDeque;

use super::Store;
use crate::{error::TopicTreeError, properties::EntityPath};

impl Store {
    /// Every route from the root to `id`, root first and `id` last.
    ///
    /// Expands breadth-first from the target through a reverse (child → parents) index, so a
    /// convergent node fans out into one path per parent. Chains that end anywhere but the root
    /// are dropped; an empty result means `id` is not reachable from the root.
    pub fn paths_to(&self, id: &str) -> Result<Vec<EntityPath>, TopicTreeError> {
        let target = self.index_of(id)?;
        let parents = self.tree.reverse_index();

        let mut complete = Vec::new();
        let mut queue = VecDeque::from([vec![target]]);
        while let Some(suffix) = queue.pop_front() {
            let head = suffix[suffix.len() - 1];
            let next = &parents[head];
            if next.is_empty() {
                if head == self.root {
                    complete.push(suffix);
                } else {
                    tracing::debug!(
                        "Dropping chain to '{}' that ends at non-root '{}'",
                        id,
                        self.entities[head].id
                    );
                }
                continue;
            }
            for parent in next {
                if suffix.contains(parent) {
                    continue;
                }
                let mut extended = suffix.clone();
                extended.push(*parent);
                queue.push_back(extended);
            }
        }

        Ok(complete
            .into_iter()
            .map(|suffix| {
                suffix
                    .into_iter()
                    .rev()
                    .map(|idx| self.entities[idx].clone())
                    .collect()
            })
            .collect())
    }
}
