// Copyright 2025 Cowboy AI, LLC.

//! Property tests for session counting, cancellation and stamp keys

use std::sync::Arc;

use chrono::{TimeZone, Utc};
use cim_composer::{
    Comment, ComponentHandle, Composer, ConceptAssembler, InMemoryEntityStore, PublicId,
    StampCoordinate, Status,
};
use proptest::prelude::*;
use proptest::sample::Index;

fn any_status() -> impl Strategy<Value = Status> {
    prop_oneof![
        Just(Status::Active),
        Just(Status::Inactive),
        Just(Status::Withdrawn),
        Just(Status::Canceled),
        Just(Status::Primordial),
    ]
}

/// Attach a comment under a randomly chosen existing node for each index
fn grow_tree(root: ComponentHandle, shape: &[Index]) -> Vec<ComponentHandle> {
    let mut nodes = vec![root];
    for (i, pick) in shape.iter().enumerate() {
        let parent = nodes[pick.index(nodes.len())].clone();
        let child = parent
            .attach(Comment::new(format!("node {i}")))
            .expect("attach comment");
        nodes.push(child);
    }
    nodes
}

fn open(composer: &mut Composer, offset_secs: i64) -> cim_composer::Session {
    composer.open(
        Status::Active,
        Utc.timestamp_opt(1_700_000_000 + offset_secs, 0).unwrap(),
        PublicId::from_name("author"),
        PublicId::from_name("module"),
        PublicId::from_name("path"),
    )
}

proptest! {
    #[test]
    fn count_matches_nodes_in_any_tree(shape in prop::collection::vec(any::<Index>(), 0..40)) {
        let store = Arc::new(InMemoryEntityStore::new());
        let mut composer = Composer::new(store.clone());
        let session = open(&mut composer, 0);

        let root = session.compose(ConceptAssembler::new()).expect("compose root");
        let nodes = grow_tree(root, &shape);
        composer.close_session(&session).expect("commit");

        prop_assert_eq!(session.components_in_session_count(), shape.len() + 1);
        prop_assert_eq!(nodes.len(), shape.len() + 1);
        prop_assert_eq!(store.record_count().expect("count"), shape.len() + 1);
    }

    #[test]
    fn cancel_discards_every_node(shape in prop::collection::vec(any::<Index>(), 0..25)) {
        let store = Arc::new(InMemoryEntityStore::new());
        let mut composer = Composer::new(store.clone());
        let session = open(&mut composer, 0);

        let root = session.compose(ConceptAssembler::new()).expect("compose root");
        let nodes = grow_tree(root, &shape);
        composer.cancel_session(&session).expect("cancel");

        for node in &nodes {
            prop_assert!(store.durable_versions(node.public_id()).expect("read").is_empty());
        }
        prop_assert_eq!(store.staged_version_count().expect("count"), 0);
    }

    #[test]
    fn equal_stamp_fields_share_a_key(
        status in any_status(),
        millis in 0i64..4_000_000_000_000,
        author in "[a-z]{1,12}",
        module in "[a-z]{1,12}",
        path in "[a-z]{1,12}",
    ) {
        let time = Utc.timestamp_millis_opt(millis).unwrap();
        let stamp = || StampCoordinate::new(
            status,
            time,
            PublicId::from_name(&author),
            PublicId::from_name(&module),
            PublicId::from_name(&path),
        );

        prop_assert_eq!(stamp().key(), stamp().key());

        let later = StampCoordinate::new(
            status,
            time + chrono::Duration::milliseconds(1),
            PublicId::from_name(&author),
            PublicId::from_name(&module),
            PublicId::from_name(&path),
        );
        prop_assert_ne!(stamp().key(), later.key());
    }

    #[test]
    fn sweeps_finish_every_session(sessions in 1usize..8) {
        let store = Arc::new(InMemoryEntityStore::new());
        let mut composer = Composer::new(store.clone());
        for offset in 0..sessions {
            open(&mut composer, offset as i64)
                .compose(ConceptAssembler::new())
                .expect("compose");
        }

        let report = composer.close_all_sessions();
        prop_assert!(report.is_clean());
        prop_assert_eq!(report.finished.len(), sessions);
        prop_assert_eq!(composer.open_session_count(), 0);
        prop_assert_eq!(store.record_count().expect("count"), sessions);
    }
}
