//! Read scenarios against a fake API
//!
//! Each case starts from the same stored definition and varies what the API
//! returns.

use check_reconcile::{
    FetchError, Outcome, ReadRequest, Reconciler, StoredRecord, SyntheticCheckResource,
};
use check_test_utils::StaticClient;
use check_test_utils::fixtures::{
    API_RESPONSE_WITH_PERMISSIONS, BASE_YAML, DATASET, INVALID_YAML, ORIGIN,
    YAML_WITH_METADATA_CHANGES, YAML_WITH_SIGNIFICANT_CHANGES,
};
use pretty_assertions::assert_eq;
use rstest::rstest;

fn base_record() -> StoredRecord {
    StoredRecord::new(ORIGIN, DATASET, BASE_YAML)
}

#[rstest]
#[case::metadata_changes_only(YAML_WITH_METADATA_CHANGES, false, false)]
#[case::api_adds_permissions(API_RESPONSE_WITH_PERMISSIONS, false, false)]
#[case::significant_changes(YAML_WITH_SIGNIFICANT_CHANGES, true, false)]
#[case::invalid_yaml_response(INVALID_YAML, true, true)]
#[case::null_response("null", true, true)]
#[tokio::test]
async fn test_read_with_diffs(
    #[case] api_response: &str,
    #[case] expect_state_update: bool,
    #[case] expect_warning: bool,
) {
    let resource = SyntheticCheckResource::new(StaticClient::returning(api_response));

    let response = resource
        .read(ReadRequest {
            state: base_record(),
        })
        .await;

    assert!(!response.diagnostics.has_error());
    if expect_warning {
        assert_eq!(response.diagnostics.warnings_count(), 1);
    } else {
        assert!(response.diagnostics.is_empty());
    }

    if expect_state_update {
        assert_eq!(response.state.document, api_response);
    } else {
        assert_eq!(response.state.document, BASE_YAML);
    }
    assert_eq!(response.state.origin, ORIGIN);
    assert_eq!(response.state.dataset, DATASET);
}

#[rstest]
#[case::metadata_changes_only(YAML_WITH_METADATA_CHANGES, Outcome::Unchanged)]
#[case::api_adds_permissions(API_RESPONSE_WITH_PERMISSIONS, Outcome::Unchanged)]
#[case::significant_changes(YAML_WITH_SIGNIFICANT_CHANGES, Outcome::Replacing)]
#[case::invalid_yaml_response(INVALID_YAML, Outcome::ReplacingWithWarning)]
#[case::identical(BASE_YAML, Outcome::Unchanged)]
#[case::null_response("null", Outcome::ReplacingWithWarning)]
#[case::bare_scalar_response("42", Outcome::ReplacingWithWarning)]
fn test_decide_outcomes(#[case] api_response: &str, #[case] expected: Outcome) {
    let verdict = Reconciler::default().decide(&base_record(), api_response);

    assert_eq!(verdict.outcome, expected);
    assert_eq!(verdict.changed, expected != Outcome::Unchanged);
    assert_eq!(
        verdict.diagnostic.is_some(),
        expected == Outcome::ReplacingWithWarning
    );
}

#[test]
fn test_significant_change_lists_paths() {
    let verdict = Reconciler::default().decide(&base_record(), YAML_WITH_SIGNIFICANT_CHANGES);

    let paths: Vec<_> = verdict.changes.iter().map(|c| c.path()).collect();
    assert_eq!(paths, vec!["spec.enabled", "spec.plugin.spec.request.url"]);
}

#[test]
fn test_replacement_is_raw_text_not_normalized() {
    let verdict = Reconciler::default().decide(&base_record(), YAML_WITH_SIGNIFICANT_CHANGES);
    let replacement = verdict.replacement.unwrap();

    assert_eq!(replacement.document, YAML_WITH_SIGNIFICANT_CHANGES);
    assert_eq!(replacement, base_record().with_document(YAML_WITH_SIGNIFICANT_CHANGES));
}

#[rstest]
#[case::transport(FetchError::Transport("connection refused".to_string()))]
#[case::unauthorized(FetchError::Unauthorized("invalid token".to_string()))]
#[case::not_found(FetchError::NotFound {
    origin: ORIGIN.to_string(),
    dataset: DATASET.to_string(),
})]
#[tokio::test]
async fn test_fetch_error_leaves_state_untouched(#[case] error: FetchError) {
    let client = StaticClient::failing(error);
    let resource = SyntheticCheckResource::new(client);

    let response = resource
        .read(ReadRequest {
            state: base_record(),
        })
        .await;

    assert!(response.diagnostics.has_error());
    assert_eq!(response.diagnostics.errors_count(), 1);
    assert_eq!(response.diagnostics.warnings_count(), 0);
    assert_eq!(response.state, base_record());
    assert_eq!(resource.client().calls(), 1);
}

#[tokio::test]
async fn test_reconcile_twice_is_stable() {
    let client = StaticClient::returning(API_RESPONSE_WITH_PERMISSIONS);
    let reconciler = Reconciler::default();

    let first = reconciler.reconcile(&base_record(), &client).await.unwrap();
    let state = first.resolve(base_record());
    let second = reconciler.reconcile(&state, &client).await.unwrap();

    assert_eq!(second.outcome, Outcome::Unchanged);
    assert_eq!(state.document, BASE_YAML);
    assert_eq!(client.calls(), 2);
}

#[tokio::test]
async fn test_malformed_state_recovers_from_api() {
    let broken = StoredRecord::new(ORIGIN, DATASET, INVALID_YAML);
    let client = StaticClient::returning(BASE_YAML);
    let resource = SyntheticCheckResource::new(client);

    let response = resource.read(ReadRequest { state: broken }).await;

    assert!(!response.diagnostics.has_error());
    assert_eq!(response.diagnostics.warnings_count(), 1);
    assert_eq!(response.state.document, BASE_YAML);
}
