use serde_json::json;

use vm_aws::server::{build_app, AppState};
use vm_aws::{DefaultHost, Profile};

async fn spawn_preview() -> String {
    let app = build_app(AppState::new(DefaultHost::default(), Profile::default()));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}

#[tokio::test]
async fn test_render_endpoints() {
    let base = spawn_preview().await;
    let client = reqwest::Client::new();
    let subscription = json!({
        "id": 5,
        "parameters": {
            "service:vm:aws:id": "i-5",
            "service:vm:aws:region": "eu-west-3",
            "service:vm:aws:account": "777"
        },
        "data": { "vm": { "name": "api", "cpu": 2, "ram": 2048 } }
    });

    let key = client
        .post(format!("{}/render/key", base))
        .json(&subscription)
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert_eq!(key, "i-5");

    let features = client
        .post(format!("{}/render/features", base))
        .json(&subscription)
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert!(features.contains("777.signin.aws.amazon.com"));
    assert!(features.contains("region=eu-west-3#Instances:search=i-5"));

    let details = client
        .post(format!("{}/render/details", base))
        .json(&subscription)
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert!(details.contains("2 CPU, 2 GB"));
}

#[tokio::test]
async fn test_render_form_installs_picker() {
    let base = spawn_preview().await;
    let response = reqwest::Client::new()
        .post(format!("{}/render/form", base))
        .json(&json!({}))
        .send()
        .await
        .unwrap();
    assert!(response.status().is_success());
    let html = response.text().await.unwrap();
    assert!(html.contains("id=\"service:vm:aws:id\""));
    assert!(html.contains("data-picker=\"service/vm/aws/\""));
    assert!(html.contains("required=\"required\""));
}
