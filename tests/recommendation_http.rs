//! HTTP round-trip tests for the recommendation service.

use std::sync::Arc;

use product_microservices::{
    recommendation_router, InMemoryKeyValueStore, RecommendationApp, ServiceUtil,
};

async fn spawn_service() -> String {
    let app = RecommendationApp::new(
        InMemoryKeyValueStore::new(),
        ServiceUtil::with_address("rec-host:7002"),
    );
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, recommendation_router(Arc::new(app)))
            .await
            .unwrap();
    });
    format!("http://{}", addr)
}

fn recommendation_json(product_id: i32, recommendation_id: i32) -> serde_json::Value {
    serde_json::json!({
        "productId": product_id,
        "recommendationId": recommendation_id,
        "author": format!("author-{}", recommendation_id),
        "rate": 4,
        "content": "worth a look",
    })
}

#[tokio::test]
async fn create_then_list_roundtrip() {
    let base = spawn_service().await;
    let client = reqwest::Client::new();

    let resp = client
        .post(format!("{}/recommendation", base))
        .json(&recommendation_json(1, 1))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);

    let created: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(created["productId"], 1);
    assert_eq!(created["recommendationId"], 1);
    assert_eq!(created["serviceAddress"], "rec-host:7002");

    let resp = client
        .get(format!("{}/recommendation?productId=1", base))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);

    let list: serde_json::Value = resp.json().await.unwrap();
    let list = list.as_array().unwrap();
    assert_eq!(list.len(), 1);
    assert_eq!(list[0]["author"], "author-1");
}

#[tokio::test]
async fn duplicate_create_returns_422_with_error_body() {
    let base = spawn_service().await;
    let client = reqwest::Client::new();

    let resp = client
        .post(format!("{}/recommendation", base))
        .json(&recommendation_json(1, 1))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);

    let resp = client
        .post(format!("{}/recommendation", base))
        .json(&recommendation_json(1, 1))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 422);

    let body: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(body["path"], "/recommendation");
    assert_eq!(body["httpStatus"], 422);
    assert!(body["message"]
        .as_str()
        .unwrap()
        .contains("duplicate key, product id: 1, recommendation id: 1"));
    assert!(body["timestamp"].is_string());
}

#[tokio::test]
async fn list_for_unknown_product_is_empty() {
    let base = spawn_service().await;
    let client = reqwest::Client::new();

    let resp = client
        .get(format!("{}/recommendation?productId=42", base))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);

    let list: serde_json::Value = resp.json().await.unwrap();
    assert!(list.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn list_with_non_positive_product_id_returns_400() {
    let base = spawn_service().await;
    let client = reqwest::Client::new();

    let resp = client
        .get(format!("{}/recommendation?productId=0", base))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);

    let body: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(body["httpStatus"], 400);
}

#[tokio::test]
async fn delete_by_product_id_sweeps_the_product() {
    let base = spawn_service().await;
    let client = reqwest::Client::new();

    for n in 1..=3 {
        let resp = client
            .post(format!("{}/recommendation", base))
            .json(&recommendation_json(1, n))
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), 200);
    }
    let resp = client
        .post(format!("{}/recommendation", base))
        .json(&recommendation_json(2, 1))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);

    let resp = client
        .delete(format!("{}/recommendation?productId=1", base))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);

    let list: serde_json::Value = client
        .get(format!("{}/recommendation?productId=1", base))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(list.as_array().unwrap().is_empty());

    // The other product's records survive the sweep.
    let list: serde_json::Value = client
        .get(format!("{}/recommendation?productId=2", base))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(list.as_array().unwrap().len(), 1);

    // Sweeping again is a no-op, not an error.
    let resp = client
        .delete(format!("{}/recommendation?productId=1", base))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
}
