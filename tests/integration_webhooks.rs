#![allow(clippy::unwrap_used, clippy::panic, clippy::missing_panics_doc, clippy::must_use_candidate, missing_debug_implementations, unreachable_pub, clippy::similar_names)]
use axum::http::StatusCode;
use munigate::domain::delivery::DeliveryStatus;
use time::macros::datetime;

mod common;

fn dlr_query(token: &str) -> Vec<(&'static str, String)> {
    vec![
        ("FN", "0821234567".to_string()),
        ("TN", "0839876543".to_string()),
        ("SC", "1".to_string()),
        ("ST", "OK".to_string()),
        ("RF", "msg-001".to_string()),
        ("TS", "2024-01-15T10:00:00Z".to_string()),
        ("token", token.to_string()),
    ]
}

#[tokio::test]
async fn test_dlr_happy_path() {
    let app = common::TestApp::spawn().await;

    let resp = app
        .client
        .get(format!("{}/webhooks/mtn/dlr", app.api_url))
        .query(&dlr_query(common::TEST_TOKEN))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);

    let body: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(body["status"], "success");
    assert_eq!(body["message"], "Delivery receipt processed");
    assert_eq!(body["messageKey"], "msg-001");

    let stored = app.store.receipt("msg-001").expect("receipt should be persisted");
    assert_eq!(stored.delivery_status, DeliveryStatus::Delivered);
    assert_eq!(stored.timestamp, datetime!(2024-01-15 10:00:00 UTC));
}

#[tokio::test]
async fn test_dlr_failed_status_same_envelope() {
    let app = common::TestApp::spawn().await;

    let mut query = dlr_query(common::TEST_TOKEN);
    query[2] = ("SC", "0".to_string());

    let resp = app
        .client
        .get(format!("{}/webhooks/mtn/dlr", app.api_url))
        .query(&query)
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);

    // The ack envelope never exposes the delivery status; it is only
    // observable on the stored record.
    let body: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(body["status"], "success");
    assert!(body.get("deliveryStatus").is_none());

    let stored = app.store.receipt("msg-001").unwrap();
    assert_eq!(stored.delivery_status, DeliveryStatus::Failed);
}

#[tokio::test]
async fn test_dlr_unrecognized_status_is_unknown() {
    let app = common::TestApp::spawn().await;

    for (i, sc) in ["abc", "2", ""].iter().enumerate() {
        let key = format!("msg-unk-{i}");
        let resp = app
            .client
            .get(format!("{}/webhooks/mtn/dlr", app.api_url))
            .query(&[("SC", *sc), ("RF", key.as_str()), ("token", common::TEST_TOKEN)])
            .send()
            .await
            .unwrap();

        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(app.store.receipt(&key).unwrap().delivery_status, DeliveryStatus::Unknown);
    }
}

#[tokio::test]
async fn test_dlr_redelivery_is_idempotent() {
    let app = common::TestApp::spawn().await;

    for _ in 0..3 {
        let resp = app
            .client
            .get(format!("{}/webhooks/mtn/dlr", app.api_url))
            .query(&dlr_query(common::TEST_TOKEN))
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
    }

    assert_eq!(app.store.receipt_count(), 1);
}

#[tokio::test]
async fn test_dlr_without_reference_acks_without_key() {
    let app = common::TestApp::spawn().await;

    let resp = app
        .client
        .get(format!("{}/webhooks/mtn/dlr", app.api_url))
        .query(&[("FN", "0821234567"), ("SC", "1"), ("token", common::TEST_TOKEN)])
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);

    let body: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(body["status"], "success");
    assert!(body.get("messageKey").is_none());

    assert_eq!(app.store.receipt_count(), 0);
}

#[tokio::test]
async fn test_dlr_bad_timestamp_falls_back_to_receipt_time() {
    let app = common::TestApp::spawn().await;

    let mut query = dlr_query(common::TEST_TOKEN);
    query[5] = ("TS", "not-a-date".to_string());

    let resp = app
        .client
        .get(format!("{}/webhooks/mtn/dlr", app.api_url))
        .query(&query)
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);

    let stored = app.store.receipt("msg-001").unwrap();
    assert_eq!(stored.timestamp, stored.received_at);
}

#[tokio::test]
async fn test_mo_happy_path() {
    let app = common::TestApp::spawn().await;

    let resp = app
        .client
        .get(format!("{}/webhooks/mtn/mo", app.api_url))
        .query(&[
            ("FN", "0821234567"),
            ("TN", "0839876543"),
            ("MS", "no water in extension 7"),
            ("TS", "2024-01-15T10:00:00Z"),
            ("token", common::TEST_TOKEN),
        ])
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);

    let body: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(body["status"], "success");
    assert_eq!(body["message"], "Incoming message processed");

    let inbound = app.store.inbound_messages();
    assert_eq!(inbound.len(), 1);
    assert_eq!(inbound[0].from_number, "0821234567");
    assert_eq!(inbound[0].message_text, "no water in extension 7");
    assert_eq!(inbound[0].timestamp, datetime!(2024-01-15 10:00:00 UTC));
}

#[tokio::test]
async fn test_mo_bad_timestamp_falls_back_to_receipt_time() {
    let app = common::TestApp::spawn().await;

    let resp = app
        .client
        .get(format!("{}/webhooks/mtn/mo", app.api_url))
        .query(&[
            ("FN", "0821234567"),
            ("TN", "0839876543"),
            ("MS", "hello"),
            ("TS", "bad-timestamp"),
            ("token", common::TEST_TOKEN),
        ])
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);

    let body: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(body["status"], "success");
    assert_eq!(body["message"], "Incoming message processed");

    let inbound = app.store.inbound_messages();
    assert_eq!(inbound.len(), 1);
    assert_eq!(inbound[0].timestamp, inbound[0].received_at);
}

#[tokio::test]
async fn test_wrong_token_is_forbidden() {
    let app = common::TestApp::spawn().await;

    let resp = app
        .client
        .get(format!("{}/webhooks/mtn/dlr", app.api_url))
        .query(&dlr_query("wrong"))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    let body: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(body["error"], "Forbidden - invalid token");

    assert_eq!(app.store.receipt_count(), 0);
}

#[tokio::test]
async fn test_missing_token_is_forbidden() {
    let app = common::TestApp::spawn().await;

    for path in ["/webhooks/mtn/dlr", "/webhooks/mtn/mo"] {
        let resp = app
            .client
            .get(format!("{}{path}", app.api_url))
            .query(&[("FN", "0821234567")])
            .send()
            .await
            .unwrap();

        assert_eq!(resp.status(), StatusCode::FORBIDDEN);

        let body: serde_json::Value = resp.json().await.unwrap();
        assert_eq!(body["error"], "Forbidden - invalid token");
    }
}

#[tokio::test]
async fn test_missing_secret_is_configuration_error() {
    let mut config = common::get_test_config();
    config.webhook.token = None;
    let app = common::TestApp::spawn_with_config(config).await;

    for path in ["/webhooks/mtn/dlr", "/webhooks/mtn/mo"] {
        let resp = app
            .client
            .get(format!("{}{path}", app.api_url))
            .query(&[("token", common::TEST_TOKEN)])
            .send()
            .await
            .unwrap();

        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body: serde_json::Value = resp.json().await.unwrap();
        assert_eq!(body["error"], "Server configuration error");
    }
}
