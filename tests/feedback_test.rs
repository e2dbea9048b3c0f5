//! SCT feedback storage tests

mod common;

use common::*;
use ct_gossip::{GossipError, GossipStorage, SqliteStore};

#[test]
fn test_two_chains_three_scts_each() {
    let store = SqliteStore::in_memory().unwrap();
    let batch = vec![
        feedback(&["A-leaf", "A-int"], &["x", "y", "z"]),
        feedback(&["B-leaf", "B-int"], &["p", "q", "r"]),
    ];

    store.add_feedback(&batch).unwrap();
    assert_eq!(store.chain_count().unwrap(), 2);
    assert_eq!(store.sct_count().unwrap(), 6);
    assert_eq!(store.feedback_count().unwrap(), 6);

    for _ in 0..10 {
        store.add_feedback(&batch).unwrap();
    }
    assert_eq!(store.chain_count().unwrap(), 2);
    assert_eq!(store.sct_count().unwrap(), 6);
    assert_eq!(store.feedback_count().unwrap(), 6);

    let a = strings(&["A-leaf", "A-int"]);
    assert!(store.has_feedback(&a, "y").unwrap());
    assert!(!store.has_feedback(&a, "q").unwrap());
}

#[test]
fn test_identities_are_stable_across_submissions() {
    let store = SqliteStore::in_memory().unwrap();
    store.add_feedback(&[feedback(&["LEAF"], &["SCT"])]).unwrap();
    let chain_id = store.chain_id(&strings(&["LEAF"])).unwrap();
    let sct_id = store.sct_id("SCT").unwrap();

    store
        .add_feedback(&[feedback(&["OTHER"], &["SCT2"]), feedback(&["LEAF"], &["SCT", "SCT3"])])
        .unwrap();

    assert_eq!(store.chain_id(&strings(&["LEAF"])).unwrap(), chain_id);
    assert_eq!(store.sct_id("SCT").unwrap(), sct_id);
}

#[test]
fn test_element_order_matters() {
    let store = SqliteStore::in_memory().unwrap();
    store
        .add_feedback(&[feedback(&["L", "I"], &["s"]), feedback(&["I", "L"], &["s"])])
        .unwrap();

    assert_eq!(store.chain_count().unwrap(), 2);
    assert_eq!(store.sct_count().unwrap(), 1);
    assert_eq!(store.feedback_count().unwrap(), 2);
}

#[test]
fn test_empty_token_rejects_batch_without_side_effects() {
    let store = SqliteStore::in_memory().unwrap();
    let result = store.add_feedback(&[
        feedback(&["GOOD"], &["fine"]),
        feedback(&["ALSO-GOOD"], &["fine", ""]),
    ]);

    assert!(matches!(result, Err(GossipError::InvalidArgument(_))));
    assert_eq!(store.chain_count().unwrap(), 0);
    assert_eq!(store.sct_count().unwrap(), 0);
    assert_eq!(store.feedback_count().unwrap(), 0);
}

#[test]
fn test_feedback_persists_across_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("gossip.db");

    let store = SqliteStore::new(&path).unwrap();
    store.add_feedback(&[feedback(&["LEAF"], &["SCT"])]).unwrap();
    let id = store.chain_id(&strings(&["LEAF"])).unwrap();
    store.close().unwrap();

    let store = SqliteStore::open(&path).unwrap();
    assert_eq!(store.chain_id(&strings(&["LEAF"])).unwrap(), id);
    assert!(store.has_feedback(&strings(&["LEAF"]), "SCT").unwrap());
}

#[test]
fn test_closed_store_rejects_writes() {
    let store = SqliteStore::in_memory().unwrap();
    store.close().unwrap();

    assert!(matches!(
        store.add_feedback(&[feedback(&["LEAF"], &["SCT"])]),
        Err(GossipError::StorageUnavailable(_))
    ));
}
