//! Graph building and structural validation.
//!
//! [`build`] turns a [`ParsedDocument`] into a [`Store`], in order:
//!
//! 1. Index entities and links; ids must be unique and the two namespaces disjoint.
//! 2. Insert one edge per association, preserving document order. Unknown endpoints fail with
//!    [`TopicTreeError::DanglingReference`].
//! 3. Find the root: the only entity no association targets.
//! 4. Walk depth-first from the root, then from anything the root cannot reach, failing with
//!    [`TopicTreeError::CircularReference`] on the first edge back onto the current path.
//! 5. Apply the [`MultiParentPolicy`] to convergent nodes.
//! 6. Back-fill each entity's `parent`.
//!
//! Any failure drops the partial result; nothing half-built escapes.

use std::collections::{BTreeMap, BTreeSet};

use super::{DecisionTree, Store};
use crate::{
    config::{MultiParentPolicy, TreeConfig},
    error::TopicTreeError,
    properties::{Entity, ParsedDocument},
};

pub fn build(parsed: ParsedDocument, config: &TreeConfig) -> Result<Store, TopicTreeError> {
    let ParsedDocument {
        mut entities,
        links,
        associations,
    } = parsed;

    let mut entity_index = BTreeMap::new();
    for (idx, entity) in entities.iter().enumerate() {
        if entity_index.insert(entity.id.clone(), idx).is_some() {
            return Err(TopicTreeError::MalformedDocument(format!(
                "duplicate entity id '{}'",
                entity.id
            )));
        }
    }
    let mut link_index = BTreeMap::new();
    for (idx, link) in links.iter().enumerate() {
        if entity_index.contains_key(&link.id) {
            return Err(TopicTreeError::MalformedDocument(format!(
                "id '{}' is used by both an entity and a link",
                link.id
            )));
        }
        if link_index.insert(link.id.clone(), idx).is_some() {
            return Err(TopicTreeError::MalformedDocument(format!(
                "duplicate link id '{}'",
                link.id
            )));
        }
    }

    let mut tree = DecisionTree::with_entities(entities.len());
    let mut seen_associations = BTreeSet::new();
    for (idx, association) in associations.iter().enumerate() {
        if !seen_associations.insert(association.id.as_str()) {
            return Err(TopicTreeError::MalformedDocument(format!(
                "linking phrase '{}' labels more than one association",
                association.id
            )));
        }
        if !link_index.contains_key(&association.id) {
            return Err(TopicTreeError::MalformedDocument(format!(
                "association references unknown link '{}'",
                association.id
            )));
        }
        let endpoint = |id: &String| {
            entity_index
                .get(id)
                .copied()
                .ok_or_else(|| TopicTreeError::DanglingReference {
                    association: association.id.clone(),
                    entity: id.clone(),
                })
        };
        let from = endpoint(&association.from_id)?;
        let to = endpoint(&association.to_id)?;
        tree.add_edge(from, to, idx);
    }

    let root = find_root(&tree, &entities)?;
    check_acyclic(&tree, &entities, root)?;

    for (idx, entity) in entities.iter().enumerate() {
        let parents = tree.parents(idx);
        if parents.len() > 1 {
            let parents = parents
                .iter()
                .map(|p| entities[*p].id.clone())
                .collect::<Vec<_>>();
            match config.multi_parent {
                MultiParentPolicy::Reject => {
                    return Err(TopicTreeError::MultipleParents {
                        entity: entity.id.clone(),
                        parents,
                    });
                }
                MultiParentPolicy::LastWins => {
                    tracing::warn!(
                        "Entity '{}' has {} parents ({}); the last one is kept",
                        entity.id,
                        parents.len(),
                        parents.join(", ")
                    );
                }
            }
        }
    }

    for (from, to) in tree.edges().collect::<Vec<_>>() {
        entities[to].parent = Some(entities[from].id.clone());
    }

    tracing::info!(
        "Built decision tree rooted at '{}': {} entities, {} associations",
        entities[root].id,
        entities.len(),
        tree.edge_count()
    );

    Ok(Store {
        entities,
        links,
        associations,
        entity_index,
        link_index,
        tree,
        root,
    })
}

fn find_root(
    tree: &DecisionTree,
    entities: &[Entity],
) -> Result<usize, TopicTreeError> {
    let candidates = (0..entities.len())
        .filter(|idx| !tree.has_incoming(*idx))
        .collect::<Vec<_>>();
    match candidates[..] {
        [] => Err(TopicTreeError::NoRootFound),
        [root] => Ok(root),
        _ => Err(TopicTreeError::AmbiguousRoot {
            candidates: candidates
                .iter()
                .map(|idx| entities[*idx].id.clone())
                .collect(),
        }),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mark {
    Unvisited,
    OnPath,
    Done,
}

struct Frame {
    entity: usize,
    children: Vec<usize>,
    next: usize,
}

/// Iterative depth-first cycle check. Fully explored nodes are not re-walked, so a convergent
/// node reached from a second branch costs nothing.
fn check_acyclic(
    tree: &DecisionTree,
    entities: &[Entity],
    root: usize,
) -> Result<(), TopicTreeError> {
    let mut marks = vec![Mark::Unvisited; entities.len()];
    let starts = std::iter::once(root).chain(0..entities.len());

    for start in starts {
        if marks[start] != Mark::Unvisited {
            continue;
        }
        if start != root {
            tracing::debug!("'{}' is unreachable from the root", entities[start].id);
        }
        let frame = |entity: usize| Frame {
            entity,
            children: tree.children(entity).into_iter().map(|(_, c)| c).collect(),
            next: 0,
        };
        marks[start] = Mark::OnPath;
        let mut stack = vec![frame(start)];

        while let Some(top) = stack.last_mut() {
            if top.next == top.children.len() {
                marks[top.entity] = Mark::Done;
                stack.pop();
                continue;
            }
            let child = top.children[top.next];
            top.next += 1;
            match marks[child] {
                Mark::Done => {}
                Mark::OnPath => {
                    let pos = stack
                        .iter()
                        .position(|f| f.entity == child)
                        .unwrap_or_default();
                    let cycle = stack[pos..]
                        .iter()
                        .map(|f| entities[f.entity].id.clone())
                        .chain(std::iter::once(entities[child].id.clone()))
                        .collect();
                    return Err(TopicTreeError::CircularReference { cycle });
                }
                Mark::Unvisited => {
                    marks[child] = Mark::OnPath;
                    stack.push(frame(child));
                }
            }
        }
    }
    Ok(())
}
