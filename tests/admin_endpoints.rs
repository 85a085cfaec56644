//! Integration tests for the admin API surface.
//!
//! Each test builds the full Actix app around an in-memory store, so the
//! suite runs hermetically: no database, no environment coupling.

use std::sync::Arc;
use std::time::Duration;

use actix_web::{App, test, web};
use jukwaa_server::auth::password::hash_password;
use jukwaa_server::models::{ADMIN_USERS, AdminUser, Role};
use jukwaa_server::{AppConfig, AppState, MemStore, Store, handlers};
use serde_json::{Value, json};

fn test_config() -> AppConfig {
    AppConfig {
        host: "127.0.0.1".into(),
        port: 0,
        jwt_secret: "integration-test-secret".into(),
        token_ttl_secs: 3600,
        production: false,
        admin_email: None,
        admin_password: "admin123".into(),
        admin_name: "Primary Admin".into(),
        connect_timeout: Duration::from_secs(5),
    }
}

async fn state_with_admin() -> AppState {
    let store: Arc<dyn Store> = Arc::new(MemStore::new());
    let state = AppState::with_store(store, test_config());
    let user = AdminUser {
        name: "Primary Admin".into(),
        email: "admin@jukwaa.local".into(),
        password_hash: hash_password("admin123").unwrap(),
        role: Role::Admin,
        is_active: true,
    };
    state
        .store
        .insert(ADMIN_USERS, serde_json::to_value(&user).unwrap())
        .await
        .unwrap();
    state
}

macro_rules! test_app {
    ($state:expr) => {
        test::init_service(
            App::new()
                .app_data(web::Data::new($state.clone()))
                .configure(handlers::admin::configure_admin_routes),
        )
        .await
    };
}

macro_rules! login {
    ($app:expr, $email:expr, $password:expr) => {{
        let req = test::TestRequest::post()
            .uri("/api/admin/login")
            .set_json(json!({ "email": $email, "password": $password }))
            .to_request();
        let body: Value = test::call_and_read_body_json(&$app, req).await;
        body["data"]["token"]
            .as_str()
            .expect("login token")
            .to_string()
    }};
}

#[actix_web::test]
async fn login_succeeds_and_omits_password_hash() {
    let state = state_with_admin().await;
    let app = test_app!(state);

    let req = test::TestRequest::post()
        .uri("/api/admin/login")
        .set_json(json!({ "email": "Admin@Jukwaa.LOCAL", "password": "admin123" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);

    let body: Value = test::read_body_json(resp).await;
    assert!(body["data"]["token"].as_str().is_some());
    assert_eq!(body["data"]["user"]["email"], "admin@jukwaa.local");
    assert_eq!(body["data"]["user"]["role"], "admin");
    assert!(body["data"]["user"].get("passwordHash").is_none());
}

#[actix_web::test]
async fn login_with_bad_password_is_unauthorized() {
    let state = state_with_admin().await;
    let app = test_app!(state);

    let req = test::TestRequest::post()
        .uri("/api/admin/login")
        .set_json(json!({ "email": "admin@jukwaa.local", "password": "wrong-password" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 401);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Unauthorized");
}

#[actix_web::test]
async fn login_for_inactive_identity_is_unauthorized() {
    let state = state_with_admin().await;
    let user = AdminUser {
        name: "Dormant".into(),
        email: "dormant@jukwaa.local".into(),
        password_hash: hash_password("admin123").unwrap(),
        role: Role::Admin,
        is_active: false,
    };
    state
        .store
        .insert(ADMIN_USERS, serde_json::to_value(&user).unwrap())
        .await
        .unwrap();
    let app = test_app!(state);

    let req = test::TestRequest::post()
        .uri("/api/admin/login")
        .set_json(json!({ "email": "dormant@jukwaa.local", "password": "admin123" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 401);
}

#[actix_web::test]
async fn requests_without_token_are_unauthorized() {
    let state = state_with_admin().await;
    let app = test_app!(state);

    let req = test::TestRequest::get().uri("/api/admin/blogs").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 401);

    let req = test::TestRequest::get()
        .uri("/api/admin/blogs")
        .insert_header(("Authorization", "Bearer not-a-token"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 401);
}

#[actix_web::test]
async fn me_echoes_token_claims() {
    let state = state_with_admin().await;
    let app = test_app!(state);
    let token = login!(app, "admin@jukwaa.local", "admin123");

    let req = test::TestRequest::get()
        .uri("/api/admin/me")
        .insert_header(("Authorization", format!("Bearer {token}")))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["email"], "admin@jukwaa.local");
    assert_eq!(body["data"]["role"], "admin");
}

#[actix_web::test]
async fn logout_acknowledges_and_token_stays_valid() {
    let state = state_with_admin().await;
    let app = test_app!(state);
    let token = login!(app, "admin@jukwaa.local", "admin123");

    let req = test::TestRequest::post()
        .uri("/api/admin/logout")
        .insert_header(("Authorization", format!("Bearer {token}")))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["success"], true);

    // Revocation is a no-op; the same token still authenticates.
    let req = test::TestRequest::get()
        .uri("/api/admin/me")
        .insert_header(("Authorization", format!("Bearer {token}")))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);
}

#[actix_web::test]
async fn user_list_never_exposes_password_hash() {
    let state = state_with_admin().await;
    let app = test_app!(state);
    let token = login!(app, "admin@jukwaa.local", "admin123");

    let req = test::TestRequest::get()
        .uri("/api/admin/users")
        .insert_header(("Authorization", format!("Bearer {token}")))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    let users = body["data"].as_array().unwrap();
    assert_eq!(users.len(), 1);
    assert!(users[0].get("passwordHash").is_none());
    assert_eq!(users[0]["email"], "admin@jukwaa.local");
}

#[actix_web::test]
async fn user_routes_require_admin_role() {
    let state = state_with_admin().await;
    let user = AdminUser {
        name: "Editor".into(),
        email: "editor@jukwaa.local".into(),
        password_hash: hash_password("editor-pass").unwrap(),
        role: Role::User,
        is_active: true,
    };
    state
        .store
        .insert(ADMIN_USERS, serde_json::to_value(&user).unwrap())
        .await
        .unwrap();
    let app = test_app!(state);
    let token = login!(app, "editor@jukwaa.local", "editor-pass");

    let req = test::TestRequest::get()
        .uri("/api/admin/users")
        .insert_header(("Authorization", format!("Bearer {token}")))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 403);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Admin access required");
}

#[actix_web::test]
async fn create_user_rejects_duplicates_and_blank_fields() {
    let state = state_with_admin().await;
    let app = test_app!(state);
    let token = login!(app, "admin@jukwaa.local", "admin123");

    let req = test::TestRequest::post()
        .uri("/api/admin/users")
        .insert_header(("Authorization", format!("Bearer {token}")))
        .set_json(json!({
            "name": "Second",
            "email": "ADMIN@jukwaa.local",
            "password": "longenough",
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 409);

    let req = test::TestRequest::post()
        .uri("/api/admin/users")
        .insert_header(("Authorization", format!("Bearer {token}")))
        .set_json(json!({
            "name": "   ",
            "email": "new@jukwaa.local",
            "password": "longenough",
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);
}

#[actix_web::test]
async fn create_and_update_user_round_trip() {
    let state = state_with_admin().await;
    let app = test_app!(state);
    let token = login!(app, "admin@jukwaa.local", "admin123");

    let req = test::TestRequest::post()
        .uri("/api/admin/users")
        .insert_header(("Authorization", format!("Bearer {token}")))
        .set_json(json!({
            "name": "Editor",
            "email": "editor@jukwaa.local",
            "password": "editor-pass",
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 201);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["role"], "user");
    assert!(body["data"].get("passwordHash").is_none());
    let id = body["data"]["id"].as_str().unwrap().to_string();

    let req = test::TestRequest::put()
        .uri(&format!("/api/admin/users/{id}"))
        .insert_header(("Authorization", format!("Bearer {token}")))
        .set_json(json!({ "role": "admin", "isActive": false }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["role"], "admin");
    assert_eq!(body["data"]["isActive"], false);

    let req = test::TestRequest::put()
        .uri("/api/admin/users/00000000-0000-0000-0000-000000000042")
        .insert_header(("Authorization", format!("Bearer {token}")))
        .set_json(json!({ "name": "Nobody" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 404);
}

#[actix_web::test]
async fn unknown_entity_is_not_found() {
    let state = state_with_admin().await;
    let app = test_app!(state);
    let token = login!(app, "admin@jukwaa.local", "admin123");

    let req = test::TestRequest::get()
        .uri("/api/admin/widgets")
        .insert_header(("Authorization", format!("Bearer {token}")))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 404);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Entity not found");
}

#[actix_web::test]
async fn entity_crud_round_trip() {
    let state = state_with_admin().await;
    let app = test_app!(state);
    let token = login!(app, "admin@jukwaa.local", "admin123");

    let req = test::TestRequest::post()
        .uri("/api/admin/blogs")
        .insert_header(("Authorization", format!("Bearer {token}")))
        .set_json(json!({ "title": "Civic budgets 101", "status": "draft" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 201);
    let body: Value = test::read_body_json(resp).await;
    let id = body["data"]["id"].as_str().unwrap().to_string();
    assert_eq!(body["data"]["title"], "Civic budgets 101");

    let req = test::TestRequest::put()
        .uri(&format!("/api/admin/blogs/{id}"))
        .insert_header(("Authorization", format!("Bearer {token}")))
        .set_json(json!({ "status": "published" }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    // Shallow merge keeps fields the patch did not mention.
    assert_eq!(body["data"]["title"], "Civic budgets 101");
    assert_eq!(body["data"]["status"], "published");

    let req = test::TestRequest::get()
        .uri("/api/admin/blogs")
        .insert_header(("Authorization", format!("Bearer {token}")))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 1);

    let req = test::TestRequest::delete()
        .uri(&format!("/api/admin/blogs/{id}"))
        .insert_header(("Authorization", format!("Bearer {token}")))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["success"], true);

    let req = test::TestRequest::delete()
        .uri(&format!("/api/admin/blogs/{id}"))
        .insert_header(("Authorization", format!("Bearer {token}")))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 404);
}

#[actix_web::test]
async fn read_only_entities_list_but_reject_mutation() {
    let state = state_with_admin().await;
    state
        .store
        .insert("subscriptions", json!({ "email": "reader@example.com" }))
        .await
        .unwrap();
    let app = test_app!(state);
    let token = login!(app, "admin@jukwaa.local", "admin123");

    let req = test::TestRequest::get()
        .uri("/api/admin/subscriptions")
        .insert_header(("Authorization", format!("Bearer {token}")))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);

    let req = test::TestRequest::post()
        .uri("/api/admin/subscriptions")
        .insert_header(("Authorization", format!("Bearer {token}")))
        .set_json(json!({ "email": "intruder@example.com" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 403);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "This entity is read-only in admin");

    let req = test::TestRequest::post()
        .uri("/api/admin/event-registrations/bulk")
        .insert_header(("Authorization", format!("Bearer {token}")))
        .set_json(json!({ "ids": ["00000000-0000-0000-0000-000000000001"], "action": "delete" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 403);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Bulk actions are not allowed for this entity");
}

#[actix_web::test]
async fn bulk_delete_reports_affected_count() {
    let state = state_with_admin().await;
    let kept = state
        .store
        .insert("videos", json!({ "title": "kept", "isActive": true }))
        .await
        .unwrap();
    let doomed = state
        .store
        .insert("videos", json!({ "title": "doomed", "isActive": true }))
        .await
        .unwrap();
    let app = test_app!(state.clone());
    let token = login!(app, "admin@jukwaa.local", "admin123");

    let req = test::TestRequest::post()
        .uri("/api/admin/videos/bulk")
        .insert_header(("Authorization", format!("Bearer {token}")))
        .set_json(json!({
            "ids": [doomed.id, "00000000-0000-0000-0000-00000000dead"],
            "action": "delete",
        }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["affectedCount"], 1);

    let remaining = state.store.list("videos").await.unwrap();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].id, kept.id);
}

#[actix_web::test]
async fn bulk_publish_applies_entity_transition() {
    let state = state_with_admin().await;
    let target = state
        .store
        .insert("blogs", json!({ "title": "a", "status": "draft" }))
        .await
        .unwrap();
    let untouched = state
        .store
        .insert("blogs", json!({ "title": "b", "status": "draft" }))
        .await
        .unwrap();
    let app = test_app!(state.clone());
    let token = login!(app, "admin@jukwaa.local", "admin123");

    let req = test::TestRequest::post()
        .uri("/api/admin/blogs/bulk")
        .insert_header(("Authorization", format!("Bearer {token}")))
        .set_json(json!({ "ids": [target.id], "action": "publish" }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["affectedCount"], 1);

    let published = state.store.find_by_id("blogs", target.id).await.unwrap().unwrap();
    assert_eq!(published.data["status"], "published");
    let other = state.store.find_by_id("blogs", untouched.id).await.unwrap().unwrap();
    assert_eq!(other.data["status"], "draft");

    // Careers use open/closed rather than published/draft.
    let career = state
        .store
        .insert("careers", json!({ "title": "organizer", "status": "open" }))
        .await
        .unwrap();
    let req = test::TestRequest::post()
        .uri("/api/admin/careers/bulk")
        .insert_header(("Authorization", format!("Bearer {token}")))
        .set_json(json!({ "ids": [career.id], "action": "unpublish" }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["affectedCount"], 1);
    let closed = state.store.find_by_id("careers", career.id).await.unwrap().unwrap();
    assert_eq!(closed.data["status"], "closed");
}

#[actix_web::test]
async fn missing_body_field_gets_json_error_envelope() {
    let state = state_with_admin().await;
    let app = test_app!(state);

    // No password field: rejected by the body extractor, not the handler.
    let req = test::TestRequest::post()
        .uri("/api/admin/login")
        .set_json(json!({ "email": "admin@jukwaa.local" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);
    assert_eq!(
        resp.headers().get("content-type").unwrap(),
        "application/json"
    );

    let body: Value = test::read_body_json(resp).await;
    assert!(body["message"].as_str().unwrap().contains("password"));
}

#[actix_web::test]
async fn malformed_record_id_is_bad_request() {
    let state = state_with_admin().await;
    let app = test_app!(state);
    let token = login!(app, "admin@jukwaa.local", "admin123");

    let req = test::TestRequest::put()
        .uri("/api/admin/blogs/not-a-uuid")
        .insert_header(("Authorization", format!("Bearer {token}")))
        .set_json(json!({ "status": "published" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);

    let body: Value = test::read_body_json(resp).await;
    assert!(body["message"].as_str().is_some());
}

#[actix_web::test]
async fn bulk_rejects_empty_ids_and_unknown_actions() {
    let state = state_with_admin().await;
    let app = test_app!(state);
    let token = login!(app, "admin@jukwaa.local", "admin123");

    let req = test::TestRequest::post()
        .uri("/api/admin/blogs/bulk")
        .insert_header(("Authorization", format!("Bearer {token}")))
        .set_json(json!({ "ids": [], "action": "delete" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "ids array is required");

    let req = test::TestRequest::post()
        .uri("/api/admin/blogs/bulk")
        .insert_header(("Authorization", format!("Bearer {token}")))
        .set_json(json!({
            "ids": ["00000000-0000-0000-0000-000000000001"],
            "action": "archive",
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Unsupported bulk action for this entity");
}
