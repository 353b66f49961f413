use std::path::Path;

use actix_web::http::StatusCode;
use actix_web::{test, web, App};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use uuid::Uuid;

use fintrack_api::app_state::AppState;
use fintrack_api::config::{DbConfig, ServiceConfig};
use fintrack_api::http::routes;
use fintrack_api::infra::sqlite::Storage;
use fintrack_api::model::Transaction;
use fintrack_api::repository::Repository;

async fn test_state() -> AppState {
    let config = DbConfig {
        database_url: "sqlite::memory:".to_string(),
        ..DbConfig::default()
    };
    let storage = Storage::connect(&config).await.expect("connect");
    storage
        .init_schema(Path::new("schema.sql"))
        .await
        .expect("schema");
    AppState::new(ServiceConfig::default(), storage)
}

macro_rules! test_app {
    ($state:expr) => {
        test::init_service(
            App::new()
                .app_data(web::Data::new($state.clone()))
                .configure(routes::configure),
        )
        .await
    };
}

macro_rules! create_user {
    ($app:expr, $user_id:expr) => {{
        let req = test::TestRequest::post()
            .uri("/api/users")
            .set_json(json!({"id": $user_id, "name": "Anna", "surname": "Bianchi"}))
            .to_request();
        let resp = test::call_service($app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
    }};
}

#[actix_rt::test]
async fn get_transactions_for_unknown_user_returns_404() {
    let state = test_state().await;
    let app = test_app!(&state);

    let req = test::TestRequest::get()
        .uri(&format!("/api/users/{}/transactions", Uuid::new_v4()))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body, json!({"error": "Transactions not found"}));
}

#[actix_rt::test]
async fn malformed_user_id_behaves_as_absent() {
    let state = test_state().await;
    let app = test_app!(&state);

    let req = test::TestRequest::get()
        .uri("/api/users/not-a-uuid/transactions")
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_rt::test]
async fn existing_user_with_no_transactions_gets_an_empty_array() {
    let state = test_state().await;
    let app = test_app!(&state);
    let user_id = Uuid::new_v4();
    create_user!(&app, user_id);

    let req = test::TestRequest::get()
        .uri(&format!("/api/users/{}/transactions", user_id))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body, json!([]));
}

#[actix_rt::test]
async fn post_transaction_returns_201_with_a_fresh_uuid() {
    let state = test_state().await;
    let app = test_app!(&state);
    let user_id = Uuid::new_v4();
    create_user!(&app, user_id);

    let req = test::TestRequest::post()
        .uri(&format!("/api/users/{}/transactions", user_id))
        .set_json(json!({"amount": 42.0, "category": "groceries"}))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: Value = test::read_body_json(resp).await;
    let id = body["id"].as_str().expect("id present");
    assert!(Uuid::parse_str(id).is_ok());
    assert_eq!(body["user_id"], json!(user_id));
    assert_eq!(body["amount"], json!(42.0));
    assert_eq!(body["category"], json!("groceries"));

    // the created row shows up on a subsequent GET
    let req = test::TestRequest::get()
        .uri(&format!("/api/users/{}/transactions", user_id))
        .to_request();
    let resp = test::call_service(&app, req).await;
    let listed: Value = test::read_body_json(resp).await;
    assert_eq!(listed.as_array().expect("array").len(), 1);
    assert_eq!(listed[0]["id"], json!(id));
}

#[actix_rt::test]
async fn post_transaction_for_unknown_user_creates_no_row() {
    let state = test_state().await;
    let app = test_app!(&state);

    let req = test::TestRequest::post()
        .uri(&format!("/api/users/{}/transactions", Uuid::new_v4()))
        .set_json(json!({"amount": 1.0, "category": "misc"}))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body, json!({"error": "User not found"}));

    let repo = Repository::<Transaction>::new(&state.storage).expect("repo");
    assert!(repo.select(&[]).await.expect("select").is_empty());
}

#[actix_rt::test]
async fn post_transaction_with_a_missing_field_creates_no_row() {
    let state = test_state().await;
    let app = test_app!(&state);
    let user_id = Uuid::new_v4();
    create_user!(&app, user_id);

    let req = test::TestRequest::post()
        .uri(&format!("/api/users/{}/transactions", user_id))
        .set_json(json!({"amount": 1.0}))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body, json!({"error": "Invalid request"}));

    let repo = Repository::<Transaction>::new(&state.storage).expect("repo");
    assert!(repo.select(&[]).await.expect("select").is_empty());
}

#[actix_rt::test]
async fn post_transaction_with_a_client_supplied_id_is_rejected() {
    let state = test_state().await;
    let app = test_app!(&state);
    let user_id = Uuid::new_v4();
    create_user!(&app, user_id);

    let req = test::TestRequest::post()
        .uri(&format!("/api/users/{}/transactions", user_id))
        .set_json(json!({"id": Uuid::new_v4(), "amount": 1.0, "category": "misc"}))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_rt::test]
async fn post_without_a_body_returns_415() {
    let state = test_state().await;
    let app = test_app!(&state);
    let user_id = Uuid::new_v4();
    create_user!(&app, user_id);

    let req = test::TestRequest::post()
        .uri(&format!("/api/users/{}/transactions", user_id))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body, json!({"error": "Unsupported media type"}));
}

#[actix_rt::test]
async fn post_with_an_unparseable_body_returns_415() {
    let state = test_state().await;
    let app = test_app!(&state);
    let user_id = Uuid::new_v4();
    create_user!(&app, user_id);

    let req = test::TestRequest::post()
        .uri(&format!("/api/users/{}/transactions", user_id))
        .set_payload("definitely not json")
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
}

#[actix_rt::test]
async fn put_transaction_is_reflected_on_a_subsequent_get() {
    let state = test_state().await;
    let app = test_app!(&state);
    let user_id = Uuid::new_v4();
    create_user!(&app, user_id);

    let req = test::TestRequest::post()
        .uri(&format!("/api/users/{}/transactions", user_id))
        .set_json(json!({"amount": 10.0, "category": "groceries"}))
        .to_request();
    let created: Value = test::read_body_json(test::call_service(&app, req).await).await;
    let transaction_id = created["id"].as_str().expect("id").to_string();

    let req = test::TestRequest::put()
        .uri(&format!(
            "/api/users/{}/transactions/{}",
            user_id, transaction_id
        ))
        .set_json(json!({"amount": 11.5, "category": "rent"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let req = test::TestRequest::get()
        .uri(&format!("/api/users/{}/transactions", user_id))
        .to_request();
    let listed: Value = test::read_body_json(test::call_service(&app, req).await).await;
    assert_eq!(
        listed,
        json!([{
            "id": transaction_id,
            "user_id": user_id,
            "amount": 11.5,
            "category": "rent",
            "description": null
        }])
    );
}

#[actix_rt::test]
async fn put_for_an_unknown_user_returns_404() {
    let state = test_state().await;
    let app = test_app!(&state);

    let req = test::TestRequest::put()
        .uri(&format!(
            "/api/users/{}/transactions/{}",
            Uuid::new_v4(),
            Uuid::new_v4()
        ))
        .set_json(json!({"amount": 1.0, "category": "misc"}))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body, json!({"error": "User not found"}));
}

#[actix_rt::test]
async fn user_defaults_apply_when_fields_are_absent() {
    let state = test_state().await;
    let app = test_app!(&state);

    let req = test::TestRequest::post()
        .uri("/api/users")
        .set_json(json!({}))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: Value = test::read_body_json(resp).await;
    assert!(Uuid::parse_str(body["id"].as_str().expect("id")).is_ok());
    assert_eq!(body["name"], json!("Mario"));
    assert_eq!(body["surname"], json!("Rossi"));
}

#[actix_rt::test]
async fn user_update_round_trips() {
    let state = test_state().await;
    let app = test_app!(&state);
    let user_id = Uuid::new_v4();
    create_user!(&app, user_id);

    let req = test::TestRequest::put()
        .uri(&format!("/api/users/{}", user_id))
        .set_json(json!({"name": "Luigi", "surname": "Verdi"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let req = test::TestRequest::get()
        .uri(&format!("/api/users/{}", user_id))
        .to_request();
    let body: Value = test::read_body_json(test::call_service(&app, req).await).await;
    assert_eq!(
        body,
        json!({"id": user_id, "name": "Luigi", "surname": "Verdi"})
    );
}

#[actix_rt::test]
async fn updating_an_unknown_user_returns_404() {
    let state = test_state().await;
    let app = test_app!(&state);

    let req = test::TestRequest::put()
        .uri(&format!("/api/users/{}", Uuid::new_v4()))
        .set_json(json!({"name": "Luigi"}))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_rt::test]
async fn advice_routes_mirror_the_transaction_contract() {
    let state = test_state().await;
    let app = test_app!(&state);
    let user_id = Uuid::new_v4();
    create_user!(&app, user_id);

    let req = test::TestRequest::post()
        .uri(&format!("/api/users/{}/advice", user_id))
        .set_json(json!({"topic": "budgeting", "message": "track every expense"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let created: Value = test::read_body_json(resp).await;
    let advice_id = created["id"].as_str().expect("id").to_string();

    let req = test::TestRequest::put()
        .uri(&format!("/api/users/{}/advice/{}", user_id, advice_id))
        .set_json(json!({"topic": "budgeting", "message": "review it monthly"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let req = test::TestRequest::get()
        .uri(&format!("/api/users/{}/advice", user_id))
        .to_request();
    let listed: Value = test::read_body_json(test::call_service(&app, req).await).await;
    assert_eq!(listed.as_array().expect("array").len(), 1);
    assert_eq!(listed[0]["message"], json!("review it monthly"));

    let req = test::TestRequest::get()
        .uri(&format!("/api/users/{}/advice", Uuid::new_v4()))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_rt::test]
async fn operational_routes_respond() {
    let state = test_state().await;
    let app = test_app!(&state);

    let resp = test::call_service(&app, test::TestRequest::get().uri("/healthz").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = test::call_service(&app, test::TestRequest::get().uri("/readyz").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let resp =
        test::call_service(&app, test::TestRequest::get().uri("/version").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["name"], json!("fintrack-api"));
}
