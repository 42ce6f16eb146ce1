//! Integration tests for `BackendClient` using wiremock HTTP mocks.

use uuid::Uuid;
use wiremock::matchers::{body_partial_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use hcr_backend::{BackendClient, BackendError};
use hcr_core::{Ratings, ResolvedAddress, ReviewDraft, ReviewSubmission};

fn test_client(base_url: &str) -> BackendClient {
    BackendClient::new(base_url, "anon-key", 30).expect("client construction should not fail")
}

fn sample_submission() -> ReviewSubmission {
    let draft = ReviewDraft {
        homeowner_name: "Pat Doe".to_owned(),
        project_type: "Roofing".to_owned(),
        project_date: None,
        comments: "Solid work, finished on time.".to_owned(),
        ratings: Ratings {
            payment: 5,
            communication: 4,
            scope: 5,
            change_orders: 4,
            overall: 5,
        },
    };
    let address = ResolvedAddress {
        city: "Austin".to_owned(),
        state: "Texas".to_owned(),
        zip: "78701".to_owned(),
        display_address: "123 Congress Ave, Austin, TX 78701".to_owned(),
        location: None,
    };
    ReviewSubmission::assemble(Uuid::new_v4(), &draft, &address, Vec::new())
        .expect("sample draft should validate")
}

// ---- user tokens ----

#[tokio::test]
async fn upsert_user_token_sends_merge_duplicates_upsert() {
    let server = MockServer::start().await;
    let user_id = Uuid::new_v4();

    Mock::given(method("POST"))
        .and(path("/rest/v1/user_tokens"))
        .and(query_param("on_conflict", "user_id,fcm_token"))
        .and(header("Prefer", "resolution=merge-duplicates"))
        .and(header("apikey", "anon-key"))
        .and(body_partial_json(serde_json::json!({
            "user_id": user_id,
            "fcm_token": "fcm-abc",
        })))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    client
        .upsert_user_token(user_id, "fcm-abc")
        .await
        .expect("upsert should succeed");
}

#[tokio::test]
async fn delete_user_tokens_filters_by_user_id() {
    let server = MockServer::start().await;
    let user_id = Uuid::new_v4();

    Mock::given(method("DELETE"))
        .and(path("/rest/v1/user_tokens"))
        .and(query_param("user_id", format!("eq.{user_id}")))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    client
        .delete_user_tokens(user_id)
        .await
        .expect("delete should succeed");
}

#[tokio::test]
async fn upsert_user_token_surfaces_auth_failure() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/rest/v1/user_tokens"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let err = client
        .upsert_user_token(Uuid::new_v4(), "fcm-abc")
        .await
        .expect_err("401 should be an error");
    assert!(matches!(
        err,
        BackendError::UnexpectedStatus { status: 401, .. }
    ));
}

// ---- reviews ----

#[tokio::test]
async fn submit_review_posts_payload_with_return_minimal() {
    let server = MockServer::start().await;
    let submission = sample_submission();

    Mock::given(method("POST"))
        .and(path("/rest/v1/reviews"))
        .and(header("Prefer", "return=minimal"))
        .and(body_partial_json(serde_json::json!({
            "homeowner_name": "Pat Doe",
            "city": "Austin",
            "zip": "78701",
            "rating_overall": 5,
        })))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    client
        .submit_review(&submission)
        .await
        .expect("submit should succeed");
}

// ---- services ----

#[tokio::test]
async fn list_services_returns_parsed_rows() {
    let server = MockServer::start().await;

    let body = serde_json::json!([
        { "id": 1, "name": "Electrical" },
        { "id": 2, "name": "Roofing" },
    ]);

    Mock::given(method("GET"))
        .and(path("/rest/v1/services"))
        .and(query_param("order", "name"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let services = client.list_services().await.expect("list should succeed");
    assert_eq!(services.len(), 2);
    assert_eq!(services[0].name, "Electrical");
    assert_eq!(services[1].id, 2);
}

#[tokio::test]
async fn list_services_rejects_malformed_rows() {
    let server = MockServer::start().await;

    let body = serde_json::json!([{ "id": "not-a-number", "name": "Roofing" }]);

    Mock::given(method("GET"))
        .and(path("/rest/v1/services"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let err = client
        .list_services()
        .await
        .expect_err("malformed row should fail deserialization");
    assert!(matches!(err, BackendError::Deserialize { .. }));
}

// ---- storage ----

#[tokio::test]
async fn upload_object_upserts_and_returns_public_url() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/storage/v1/object/profile-images/reviews/abc_1.jpg"))
        .and(header("x-upsert", "true"))
        .and(header("content-type", "image/jpeg"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let url = client
        .upload_object(
            "profile-images",
            "reviews/abc_1.jpg",
            vec![0xFF, 0xD8],
            "image/jpeg",
        )
        .await
        .expect("upload should succeed");
    assert!(url.ends_with("/storage/v1/object/public/profile-images/reviews/abc_1.jpg"));
}
