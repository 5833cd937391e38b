//! Concurrent and cancelled reads

use std::sync::Arc;
use std::time::Duration;

use check_reconcile::{
    Outcome, ReadRequest, Reconciler, StoredRecord, SyntheticCheckResource,
};
use check_test_utils::fixtures::{
    API_RESPONSE_WITH_PERMISSIONS, BASE_YAML, DATASET, ORIGIN, YAML_WITH_SIGNIFICANT_CHANGES,
};
use check_test_utils::{MemoryStateStore, PendingClient, StaticClient};
use pretty_assertions::assert_eq;

const TASKS: usize = 32;

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_reconciliations_share_reconciler() {
    let reconciler = Arc::new(Reconciler::default());
    let client = Arc::new(StaticClient::returning(API_RESPONSE_WITH_PERMISSIONS));

    let mut handles = Vec::with_capacity(TASKS);
    for i in 0..TASKS {
        let reconciler = Arc::clone(&reconciler);
        let client = Arc::clone(&client);
        // Every other record holds a user edit the API does not know about.
        let document = if i % 2 == 0 {
            BASE_YAML
        } else {
            YAML_WITH_SIGNIFICANT_CHANGES
        };
        let record = StoredRecord::new(ORIGIN, format!("{DATASET}-{i}"), document);

        handles.push(tokio::spawn(async move {
            let verdict = reconciler.reconcile(&record, client.as_ref()).await;
            (i, record, verdict)
        }));
    }

    for handle in handles {
        let (i, record, verdict) = handle.await.unwrap();
        let verdict = verdict.unwrap();
        if i % 2 == 0 {
            assert_eq!(verdict.outcome, Outcome::Unchanged);
            assert_eq!(verdict.resolve(record.clone()), record);
        } else {
            assert_eq!(verdict.outcome, Outcome::Replacing);
            let resolved = verdict.resolve(record.clone());
            assert_eq!(resolved.document, API_RESPONSE_WITH_PERMISSIONS);
            assert_eq!(resolved.dataset, record.dataset);
        }
    }

    assert_eq!(client.calls(), TASKS);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_reads_through_shared_resource() {
    let resource = Arc::new(SyntheticCheckResource::new(Arc::new(
        StaticClient::returning(YAML_WITH_SIGNIFICANT_CHANGES),
    )));

    let handles: Vec<_> = (0..TASKS)
        .map(|_| {
            let resource = Arc::clone(&resource);
            tokio::spawn(async move {
                resource
                    .read(ReadRequest {
                        state: StoredRecord::new(ORIGIN, DATASET, BASE_YAML),
                    })
                    .await
            })
        })
        .collect();

    for handle in handles {
        let response = handle.await.unwrap();
        assert!(response.diagnostics.is_empty());
        assert_eq!(response.state.document, YAML_WITH_SIGNIFICANT_CHANGES);
    }

    assert_eq!(resource.client().calls(), TASKS);
}

#[tokio::test]
async fn test_cancelled_read_leaves_store_untouched() {
    let resource = SyntheticCheckResource::new(PendingClient);
    let record = StoredRecord::new(ORIGIN, DATASET, BASE_YAML);
    let mut store = MemoryStateStore::new();

    let result = tokio::time::timeout(
        Duration::from_millis(50),
        resource.read(ReadRequest {
            state: record.clone(),
        }),
    )
    .await;

    assert!(result.is_err());
    assert_eq!(store.writes(), 0);
    assert!(store.current().is_none());

    // The caller still holds its record and can retry later.
    let retry = SyntheticCheckResource::new(StaticClient::returning(BASE_YAML))
        .read(ReadRequest { state: record })
        .await;
    let diagnostics = retry.commit(&mut store);
    assert!(diagnostics.is_empty());
    assert_eq!(store.current().unwrap().document, BASE_YAML);
}
