//! End-to-end read scenarios
//!
//! Each test runs a full read through the resource, commits the response to
//! an in-memory store, and checks what ends up persisted.

use check_document::{Normalizer, equivalent};
use check_reconcile::{
    Outcome, ReadRequest, Reconciler, Severity, StoredRecord, SyntheticCheckResource,
};
use check_test_utils::fixtures::{
    API_RESPONSE_WITH_PERMISSIONS, BASE_YAML, DATASET, INVALID_YAML, ORIGIN,
};
use check_test_utils::{MemoryStateStore, StaticClient};
use pretty_assertions::assert_eq;

const LOCAL: &str = "spec:\n  enabled: true\n  url: https://a.example.com\n";

async fn read_and_commit(stored: &str, api_response: &str) -> (MemoryStateStore, usize, usize) {
    let resource = SyntheticCheckResource::new(StaticClient::returning(api_response));
    let response = resource
        .read(ReadRequest {
            state: StoredRecord::new(ORIGIN, DATASET, stored),
        })
        .await;

    let mut store = MemoryStateStore::new();
    let diagnostics = response.commit(&mut store);
    (store, diagnostics.warnings_count(), diagnostics.errors_count())
}

// =============================================================================
// Scenario A: remote adds only metadata timestamps and version
// =============================================================================

#[tokio::test]
async fn scenario_a_metadata_only_is_unchanged() {
    let remote = "metadata:\n  createdAt: \"2024-03-01T10:00:00Z\"\n  updatedAt: \"2024-03-02T10:00:00Z\"\n  version: 14\nspec:\n  enabled: true\n  url: https://a.example.com\n";

    let (store, warnings, errors) = read_and_commit(LOCAL, remote).await;

    assert_eq!(store.current().unwrap().document, LOCAL);
    assert_eq!((warnings, errors), (0, 0));
}

// =============================================================================
// Scenario B: remote injects a permissions block
// =============================================================================

#[tokio::test]
async fn scenario_b_injected_permissions_is_unchanged() {
    let remote = r#"{"spec":{"enabled":true,"url":"https://a.example.com","permissions":[{"role":"admin","actions":["synthetic_check:read"]}]}}"#;

    let (store, warnings, errors) = read_and_commit(LOCAL, remote).await;

    assert_eq!(store.current().unwrap().document, LOCAL);
    assert_eq!((warnings, errors), (0, 0));
}

#[tokio::test]
async fn scenario_b_real_api_payload_is_unchanged() {
    let (store, warnings, errors) = read_and_commit(BASE_YAML, API_RESPONSE_WITH_PERMISSIONS).await;

    assert_eq!(store.current().unwrap().document, BASE_YAML);
    assert_eq!((warnings, errors), (0, 0));
}

// =============================================================================
// Scenario C: user-owned fields differ
// =============================================================================

#[tokio::test]
async fn scenario_c_user_fields_replace_state() {
    let remote = "spec:\n  enabled: false\n  url: https://b.example.com\n";

    let (store, warnings, errors) = read_and_commit(LOCAL, remote).await;

    assert_eq!(store.current().unwrap().document, remote);
    assert_eq!((warnings, errors), (0, 0));
}

// =============================================================================
// Scenario D: remote text is unparsable
// =============================================================================

#[tokio::test]
async fn scenario_d_malformed_remote_replaces_with_warning() {
    let (store, warnings, errors) = read_and_commit(LOCAL, INVALID_YAML).await;

    assert_eq!(store.current().unwrap().document, INVALID_YAML);
    assert_eq!((warnings, errors), (1, 0));
    assert_eq!(store.writes(), 1);
}

#[test]
fn scenario_d_verdict_shape() {
    let stored = StoredRecord::new(ORIGIN, DATASET, LOCAL);
    let verdict = Reconciler::default().decide(&stored, INVALID_YAML);

    assert_eq!(verdict.outcome, Outcome::ReplacingWithWarning);
    assert!(verdict.changes.is_empty());
    let diagnostic = verdict.diagnostic.unwrap();
    assert_eq!(diagnostic.severity, Severity::Warning);
    assert!(diagnostic.detail.contains("YAML"));
}

// =============================================================================
// Idempotence
// =============================================================================

#[tokio::test]
async fn reconciling_against_itself_is_unchanged() {
    for document in [LOCAL, BASE_YAML, API_RESPONSE_WITH_PERMISSIONS, "", "{}"] {
        let (store, warnings, errors) = read_and_commit(document, document).await;
        assert_eq!(store.current().unwrap().document, document);
        assert_eq!((warnings, errors), (0, 0));
    }
}

#[test]
fn yaml_and_json_of_same_check_are_equivalent() {
    let normalizer = Normalizer::default();
    let yaml = normalizer.normalize(LOCAL).unwrap();
    let json = normalizer
        .normalize(r#"{"spec": {"url": "https://a.example.com", "enabled": true}}"#)
        .unwrap();

    assert!(equivalent(&yaml, &json));
}
