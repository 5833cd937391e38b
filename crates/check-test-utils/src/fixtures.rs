//! Synthetic check documents.
//!
//! [`API_RESPONSE_WITH_PERMISSIONS`] is a real API payload: JSON, with the
//! permissions the API keeps in a separate table plus its bookkeeping labels.

pub const ORIGIN: &str = "test-origin";
pub const DATASET: &str = "test-dataset";

/// Definition as a user would write it
pub const BASE_YAML: &str = r#"
kind: Dash0SyntheticCheck
metadata:
  name: test-check
spec:
  enabled: true
  plugin:
    kind: http
    spec:
      request:
        url: https://test.example.com
"#;

/// [`BASE_YAML`] with server timestamps and revision counter
pub const YAML_WITH_METADATA_CHANGES: &str = r#"
kind: Dash0SyntheticCheck
metadata:
  name: test-check
  createdAt: "2024-01-01T00:00:00Z"
  updatedAt: "2024-01-02T00:00:00Z"
  version: 2
spec:
  enabled: true
  plugin:
    kind: http
    spec:
      request:
        url: https://test.example.com
"#;

/// [`BASE_YAML`] disabled and pointed at a different URL
pub const YAML_WITH_SIGNIFICANT_CHANGES: &str = r#"
kind: Dash0SyntheticCheck
metadata:
  name: test-check
spec:
  enabled: false
  plugin:
    kind: http
    spec:
      request:
        url: https://different.example.com
"#;

pub const API_RESPONSE_WITH_PERMISSIONS: &str = r#"{"kind":"Dash0SyntheticCheck","metadata":{"annotations":{},"labels":{"dash0.com/dataset":"test-dataset","dash0.com/id":"test-uuid","dash0.com/origin":"tf_test-origin","dash0.com/version":"1"},"name":"test-check"},"spec":{"enabled":true,"permissions":[{"actions":["synthetic_check:read","synthetic_check:delete"],"role":"admin"},{"actions":["synthetic_check:read"],"role":"basic_member"}],"plugin":{"kind":"http","spec":{"request":{"url":"https://test.example.com"}}}}}"#;

pub const INVALID_YAML: &str = "invalid: : : yaml";
