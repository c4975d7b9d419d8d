//! Round trips through the file store and history log.

use compass_core::models::{CacheDocument, CacheOp, HistoryDocument, LoadingPriors, Sentiment};
use compass_core::traits::IStateStore;
use compass_storage::{HistoryLimits, HistoryLog, JsonFileStore};

#[test]
fn graph_document_round_trips() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonFileStore::open(dir.path().join("state")).unwrap();
    let doc = test_fixtures::requires_pair();
    store.save_graph(&doc).unwrap();
    assert_eq!(store.load_graph().unwrap(), Some(doc));
}

#[test]
fn history_round_trips_with_cursors() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonFileStore::open(dir.path()).unwrap();

    let mut log = HistoryLog::new(HistoryLimits::default());
    for i in test_fixtures::interaction_stream(&["query", "load", "generate"]) {
        log.append_interaction(i);
    }
    for f in test_fixtures::feedback_mix(Some("A"), 1, 1) {
        log.append_feedback(f);
    }
    log.queue_cache_op(CacheOp::Access {
        key: "A".into(),
        at: test_fixtures::base_time(),
    });
    log.mark_feedback_applied(4);
    store.save_history(log.document()).unwrap();

    let loaded: HistoryDocument = store.load_history().unwrap().unwrap();
    assert_eq!(&loaded, log.document());
    let reopened = HistoryLog::from_document(loaded, HistoryLimits::default());
    assert_eq!(reopened.unapplied_feedback().len(), 1);
    assert_eq!(reopened.unapplied_feedback()[0].sentiment, Sentiment::Negative);
}

#[test]
fn cache_document_with_priors_round_trips() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonFileStore::open(dir.path()).unwrap();
    let mut priors = LoadingPriors {
        compression_floor: 7,
        preload_limit: Some(2),
        ..Default::default()
    };
    priors
        .level_item_limits
        .insert(compass_core::models::ExperienceLevel::Beginner, 10);
    let doc = CacheDocument {
        priors,
        last_updated: Some(test_fixtures::base_time()),
        ..Default::default()
    };
    store.save_cache(&doc).unwrap();
    assert_eq!(store.load_cache().unwrap(), Some(doc));
}

#[test]
fn overwriting_leaves_no_temp_files_behind() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonFileStore::open(dir.path()).unwrap();
    store.save_cache(&CacheDocument::default()).unwrap();
    store.save_cache(&CacheDocument::default()).unwrap();
    let files: Vec<_> = std::fs::read_dir(dir.path()).unwrap().collect();
    assert_eq!(files.len(), 1);
}

// ─── Retention ───────────────────────────────────────────────────────────────

mod retention {
    use compass_core::models::Interaction;
    use compass_storage::{HistoryLimits, HistoryLog};
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn caps_hold_and_newest_survive(cap in 1usize..20, appended in 0usize..60) {
            let limits = HistoryLimits { interactions: cap, ..HistoryLimits::default() };
            let mut log = HistoryLog::new(limits);
            let mut last = 0;
            for _ in 0..appended {
                last = log.append_interaction(Interaction::new("query"));
            }
            prop_assert!(log.interactions().len() <= cap);
            prop_assert_eq!(log.interactions().len(), appended.min(cap));
            if appended > 0 {
                prop_assert_eq!(log.interactions().last().map(|i| i.sequence), Some(last));
            }
        }
    }
}
