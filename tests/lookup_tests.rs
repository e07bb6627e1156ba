use std::collections::HashMap;
use std::sync::Arc;

use axum::extract::{Path, Query};
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{json, Value};
use tokio::sync::Notify;

use vm_aws::error::Result;
use vm_aws::form::{FormContext, FormValues};
use vm_aws::models::{FormParameter, RemoteObject};
use vm_aws::picker::{LookupClient, PickerOptions, RemoteLookup, RemotePicker, RemoteQuery, SearchOutcome};
use vm_aws::{DefaultHost, ParameterConfigurator, Profile, VmAwsError};

async fn lookup(Path((node, criteria)): Path<(String, String)>, Query(params): Query<HashMap<String, String>>) -> Json<Value> {
    let key = params.get("service:vm:aws:access-key-id").cloned().unwrap_or_default();
    if node.ends_with("enveloped") {
        Json(json!({ "data": [{ "id": "i-1", "name": criteria, "description": key }] }))
    } else {
        Json(json!([{ "id": "i-1", "name": criteria, "description": key }]))
    }
}

async fn spawn_stub() -> String {
    let app = Router::new()
        .route("/rest/service/vm/aws/:node/:criteria", get(lookup))
        .route("/rest/broken/:node/:criteria", get(|| async { (axum::http::StatusCode::INTERNAL_SERVER_ERROR, "boom") }));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}/rest/", addr)
}

fn instance_picker() -> RemotePicker {
    let host = DefaultHost::default();
    let configurator = ParameterConfigurator::new(&host, Profile::default());
    let mut configuration = vm_aws::form::Configuration::new(
        None,
        vec![FormParameter::new("service:vm:aws:id", true)],
    );
    configurator.configure_subscription_parameters(&mut configuration);
    let fieldsets = configuration.render();
    fieldsets[0].picker("service:vm:aws:id").unwrap().clone()
}

#[tokio::test]
async fn test_lookup_with_credentials_and_new_entry() {
    vm_aws::picker::client::set_silent(true);
    let base = spawn_stub().await;
    let client = LookupClient::new(&base).unwrap();
    let picker = instance_picker();
    let context = FormContext {
        node: None,
        values: FormValues::new().with("service:vm:aws:access-key-id", "AKIA"),
    };

    match picker.search("Web", &context, &client).await.unwrap() {
        SearchOutcome::Results(results) => {
            assert_eq!(results.len(), 2);
            assert!(results[0].new);
            assert_eq!(results[0].id, "web");
            assert_eq!(results[1].id, "i-1");
            assert_eq!(results[1].name.as_deref(), Some("Web"));
            assert_eq!(results[1].description.as_deref(), Some("AKIA"));
        }
        other => panic!("unexpected outcome {:?}", other),
    }
}

#[tokio::test]
async fn test_lookup_envelope_shapes_match() {
    vm_aws::picker::client::set_silent(true);
    let base = spawn_stub().await;
    let client = LookupClient::new(&base).unwrap();
    let query = |node: &str| RemoteQuery {
        path: "service/vm/aws/".into(),
        prefix: format!("{}/", node),
        term: "x".into(),
        ..RemoteQuery::default()
    };
    let bare = client.lookup(&query("plain")).await.unwrap();
    let wrapped = client.lookup(&query("enveloped")).await.unwrap();
    assert_eq!(bare, wrapped);
    assert_eq!(bare.len(), 1);
}

#[tokio::test]
async fn test_lookup_failure_propagates() {
    vm_aws::picker::client::set_silent(true);
    let base = spawn_stub().await;
    let client = LookupClient::new(&base).unwrap();
    let picker = RemotePicker::new(
        "p",
        &FormParameter::new("p", false),
        PickerOptions::new("broken/"),
        "node",
        None,
    );
    let err = picker.search("x", &FormContext::default(), &client).await.unwrap_err();
    assert!(matches!(err, VmAwsError::Status { status: 500, .. }));
    assert_eq!(
        picker.search("", &FormContext::default(), &client).await.unwrap(),
        SearchOutcome::TooShort
    );
}

/// Lookup that blocks its first request until released.
struct GatedLookup {
    gate: Arc<Notify>,
    calls: std::sync::atomic::AtomicUsize,
    fail_first: bool,
}

impl GatedLookup {
    fn new(gate: &Arc<Notify>, fail_first: bool) -> Self {
        Self {
            gate: Arc::clone(gate),
            calls: std::sync::atomic::AtomicUsize::new(0),
            fail_first,
        }
    }
}

impl RemoteLookup for GatedLookup {
    async fn lookup(&self, query: &RemoteQuery) -> Result<Vec<RemoteObject>> {
        let n = self.calls.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
        if n == 0 {
            self.gate.notified().await;
            if self.fail_first {
                return Err(VmAwsError::Status {
                    status: 502,
                    url: query.to_relative_url(),
                });
            }
        }
        Ok(vec![RemoteObject {
            id: query.term.clone(),
            ..RemoteObject::default()
        }])
    }
}

#[tokio::test]
async fn test_superseded_response_is_discarded() {
    let gate = Arc::new(Notify::new());
    let lookup = GatedLookup::new(&gate, false);
    let picker = RemotePicker::new("p", &FormParameter::new("p", false), PickerOptions::new("x/"), "node", None);
    let context = FormContext::default();

    let slow = picker.search("a", &context, &lookup);
    let fast = async {
        tokio::task::yield_now().await;
        let outcome = picker.search("ab", &context, &lookup).await;
        gate.notify_one();
        outcome
    };
    let (slow, fast) = tokio::join!(slow, fast);
    assert_eq!(slow.unwrap(), SearchOutcome::Superseded);
    match fast.unwrap() {
        SearchOutcome::Results(results) => assert_eq!(results[0].id, "ab"),
        other => panic!("unexpected outcome {:?}", other),
    }
}

#[tokio::test]
async fn test_superseded_failure_is_not_returned() {
    let gate = Arc::new(Notify::new());
    let lookup = GatedLookup::new(&gate, true);
    let picker = RemotePicker::new("p", &FormParameter::new("p", false), PickerOptions::new("x/"), "node", None);
    let context = FormContext::default();

    let slow = picker.search("a", &context, &lookup);
    let fast = async {
        tokio::task::yield_now().await;
        let outcome = picker.search("ab", &context, &lookup).await;
        gate.notify_one();
        outcome
    };
    let (slow, fast) = tokio::join!(slow, fast);
    assert_eq!(slow.unwrap(), SearchOutcome::Superseded);
    assert!(matches!(fast.unwrap(), SearchOutcome::Results(_)));
}
