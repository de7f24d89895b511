//! End-to-end tests from XTM text through to queries on a session

use super::helpers::*;
use crate::{
    config::{MultiParentPolicy, TreeConfig},
    error::TopicTreeError,
    session::TreeSession,
};
use std::{fs, path::PathBuf};
use tempfile::{tempdir, TempDir};
use test_log::test;

fn weather_map() -> String {
    xtm_document(
        &[
            xtm_topic("raining", "concept", "Is it raining?", Some("file:/./rain.png")),
            xtm_topic("umbrella", "concept", "Take an umbrella", Some("umbrella.txt")),
            xtm_topic("windy", "concept", "Is it windy?", None),
            xtm_topic("kite", "concept", "Fly a kite", None),
            xtm_topic("stay", "concept", "Stay in", None),
            xtm_topic("yes1", "linkingPhrase", "yes", None),
            xtm_topic("no1", "linkingPhrase", "no", None),
            xtm_topic("yes2", "linkingPhrase", "yes", None),
            xtm_topic("no2", "linkingPhrase", "no", None),
        ],
        &[
            ("yes1", "raining", "umbrella"),
            ("no1", "raining", "windy"),
            ("yes2", "windy", "kite"),
            ("no2", "windy", "stay"),
        ],
    )
}

fn write_map(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let texts = dir.path().join("texts");
    fs::create_dir_all(&texts).unwrap();
    fs::write(texts.join("umbrella.txt"), "Any umbrella will do.").unwrap();
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

#[test]
fn test_load_xtm_document() {
    let dir = tempdir().unwrap();
    let path = write_map(&dir, "weather.xtm", &weather_map());

    let mut session = TreeSession::default();
    let root = session.load_document(&path).unwrap();
    assert_eq!(root.root.id, "raining");
    assert_eq!(root.root.image, Some(dir.path().join("images").join("rain.png")));
    assert_eq!(root.children.len(), 2);
    assert_eq!(root.children[0].answer.id, "yes1");
    assert_eq!(
        root.children[0].question.description.as_deref(),
        Some("Any umbrella will do.")
    );

    let windy = session.get_node("windy").unwrap();
    assert_eq!(windy.root.parent.as_deref(), Some("raining"));
    assert_eq!(
        windy
            .children
            .iter()
            .map(|c| c.question.id.as_str())
            .collect::<Vec<_>>(),
        vec!["kite", "stay"]
    );

    let paths = session.get_paths("kite").unwrap();
    assert_eq!(paths.len(), 1);
    assert_eq!(
        paths[0].iter().map(|e| e.id.as_str()).collect::<Vec<_>>(),
        vec!["raining", "windy", "kite"]
    );

    let root_paths = session.get_paths("raining").unwrap();
    assert_eq!(root_paths.len(), 1);
    assert_eq!(root_paths[0].len(), 1);
}

#[test]
fn test_every_association_round_trips() {
    let dir = tempdir().unwrap();
    let path = write_map(&dir, "weather.xtm", &weather_map());
    let mut session = TreeSession::default();
    session.load_document(&path).unwrap();

    let store = session.store().unwrap();
    assert_eq!(store.associations().len(), 4);
    for association in store.associations() {
        let node = session.get_node(&association.from_id).unwrap();
        assert!(node
            .children
            .iter()
            .any(|c| c.question.id == association.to_id && c.answer.id == association.id));
    }
}

#[test]
fn test_cycle_rejected_and_previous_tree_kept() {
    let dir = tempdir().unwrap();
    let good = write_map(&dir, "weather.xtm", &weather_map());
    let cyclic = write_map(
        &dir,
        "cyclic.xtm",
        &xtm_document(
            &[
                xtm_topic("a", "concept", "A", None),
                xtm_topic("b", "concept", "B", None),
                xtm_topic("c", "concept", "C", None),
                xtm_topic("l1", "linkingPhrase", "go", None),
                xtm_topic("l2", "linkingPhrase", "go", None),
                xtm_topic("l3", "linkingPhrase", "back", None),
            ],
            &[("l1", "a", "b"), ("l2", "b", "c"), ("l3", "c", "b")],
        ),
    );

    let mut session = TreeSession::default();
    session.load_document(&good).unwrap();
    let before = session.render_ascii().unwrap();

    assert_eq!(
        session.load_document(&cyclic).unwrap_err(),
        TopicTreeError::CircularReference {
            cycle: vec!["b".into(), "c".into(), "b".into()]
        }
    );
    assert_eq!(session.render_ascii().unwrap(), before);
    assert!(session.get_node("windy").is_ok());
}

#[test]
fn test_isolated_entity_makes_root_ambiguous() {
    let dir = tempdir().unwrap();
    let doc = weather_map().replace(
        "</topicMap>",
        &format!("{}</topicMap>", xtm_topic("orphan", "concept", "Orphan", None)),
    );
    let path = write_map(&dir, "orphan.xtm", &doc);
    let mut session = TreeSession::default();
    assert_eq!(
        session.load_document(&path).unwrap_err(),
        TopicTreeError::AmbiguousRoot {
            candidates: vec!["raining".into(), "orphan".into()]
        }
    );
    assert!(!session.is_loaded());
}

#[test]
fn test_convergent_map_under_last_wins() {
    let dir = tempdir().unwrap();
    let doc = xtm_document(
        &[
            xtm_topic("a", "concept", "A", None),
            xtm_topic("b", "concept", "B", None),
            xtm_topic("c", "concept", "C", None),
            xtm_topic("d", "concept", "D", None),
            xtm_topic("l1", "linkingPhrase", "1", None),
            xtm_topic("l2", "linkingPhrase", "2", None),
            xtm_topic("l3", "linkingPhrase", "3", None),
            xtm_topic("l4", "linkingPhrase", "4", None),
        ],
        &[
            ("l1", "a", "b"),
            ("l2", "a", "c"),
            ("l3", "b", "d"),
            ("l4", "c", "d"),
        ],
    );
    let path = write_map(&dir, "diamond.xtm", &doc);

    let mut strict = TreeSession::default();
    assert!(matches!(
        strict.load_document(&path),
        Err(TopicTreeError::MultipleParents { .. })
    ));

    let mut tolerant = TreeSession::new(TreeConfig {
        multi_parent: MultiParentPolicy::LastWins,
        ..Default::default()
    });
    tolerant.load_document(&path).unwrap();
    assert_eq!(tolerant.get_paths("d").unwrap().len(), 2);
    let rendered = tolerant.render_ascii().unwrap();
    assert_eq!(rendered.lines().count(), 5);
    assert!(rendered.ends_with("(seen)\n"));
}
