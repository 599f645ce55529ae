//! Account endpoints
//!
//! | Method | Path            | Success              | Failure  |
//! |--------|-----------------|----------------------|----------|
//! | GET    | /accounts       | 200, array           |          |
//! | GET    | /accounts/{id}  | 200, object          | 404      |
//! | POST   | /accounts       | 201, object, Location| 400      |
//! | PUT    | /accounts/{id}  | 200, object          | 404, 400 |
//! | DELETE | /accounts/{id}  | 204                  |          |

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::IntoResponse,
    routing::get,
    Json, Router,
};

use crate::http::error::ApiError;
use crate::http::extractors::{AccountId, ValidJson};
use crate::http::server::AppState;
use crate::models::{Account, AccountPayload};

/// GET /accounts - list all accounts
async fn list_accounts(State(state): State<AppState>) -> Result<Json<Vec<Account>>, ApiError> {
    tracing::info!("Request to list Accounts");

    let accounts = state.store.all().await?;
    tracing::info!("Returning [{}] accounts", accounts.len());

    Ok(Json(accounts))
}

/// GET /accounts/{id} - read a single account
async fn get_account(
    State(state): State<AppState>,
    AccountId(id): AccountId,
) -> Result<Json<Account>, ApiError> {
    tracing::info!("Request to read an Account with id: {}", id);

    let account = state
        .store
        .find(id)
        .await?
        .ok_or_else(|| ApiError::account_not_found(id))?;

    Ok(Json(account))
}

/// POST /accounts - create an account
async fn create_account(
    State(state): State<AppState>,
    ValidJson(payload): ValidJson<AccountPayload>,
) -> Result<impl IntoResponse, ApiError> {
    tracing::info!("Request to create an Account");

    let account = state.store.save(payload.validate()?).await?;
    let location = format!("/accounts/{}", account.id);
    tracing::info!(id = account.id, "Account created");

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(account),
    ))
}

/// PUT /accounts/{id} - replace an account's fields
///
/// Existence is checked before the body, so a missing id is 404 even when
/// the body is also malformed.
async fn update_account(
    State(state): State<AppState>,
    AccountId(id): AccountId,
    payload: Result<ValidJson<AccountPayload>, ApiError>,
) -> Result<Json<Account>, ApiError> {
    tracing::info!("Request to update an Account with id: {}", id);

    if state.store.find(id).await?.is_none() {
        return Err(ApiError::account_not_found(id));
    }

    let ValidJson(payload) = payload?;
    let account = state.store.update(payload.validate()?.with_id(id)).await?;

    Ok(Json(account))
}

/// DELETE /accounts/{id} - delete an account (idempotent)
async fn delete_account(
    State(state): State<AppState>,
    AccountId(id): AccountId,
) -> Result<StatusCode, ApiError> {
    tracing::info!("Request to delete an Account with id: {}", id);

    if state.store.find(id).await?.is_some() {
        state.store.delete(id).await?;
    }

    Ok(StatusCode::NO_CONTENT)
}

/// Account routes
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/accounts", get(list_accounts).post(create_account))
        .route(
            "/accounts/{id}",
            get(get_account).put(update_account).delete(delete_account),
        )
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::body::{to_bytes, Body};
    use axum::http::{HeaderMap, Request};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;
    use crate::db::MemoryAccountStore;
    use crate::http::server::{build_router, ServerConfig};

    fn app() -> Router {
        let state = AppState::new(Arc::new(MemoryAccountStore::new()));
        build_router(state, &ServerConfig::default())
    }

    async fn send(
        app: &Router,
        method: &str,
        uri: &str,
        body: Option<Value>,
    ) -> (StatusCode, HeaderMap, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(body) => builder
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };

        (status, headers, value)
    }

    async fn create(app: &Router, body: Value) -> Value {
        let (status, _, created) = send(app, "POST", "/accounts", Some(body)).await;
        assert_eq!(status, StatusCode::CREATED);
        created
    }

    #[tokio::test]
    async fn create_returns_location_and_record() {
        let app = app();

        let (status, headers, body) = send(
            &app,
            "POST",
            "/accounts",
            Some(json!({"name": "Alice", "balance": 100})),
        )
        .await;

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body, json!({"id": 1, "name": "Alice", "balance": 100}));
        assert_eq!(headers[header::LOCATION], "/accounts/1");

        let (status, _, read) = send(&app, "GET", "/accounts/1", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(read, body);
    }

    #[tokio::test]
    async fn create_then_read_keeps_optional_fields() {
        let app = app();
        let input = json!({
            "name": "Bob",
            "balance": -25,
            "email": "bob@example.com",
            "address": "1 Main St",
            "phone_number": "555-0100"
        });

        let created = create(&app, input.clone()).await;
        let id = created["id"].as_i64().unwrap();

        let (status, _, read) = send(&app, "GET", &format!("/accounts/{}", id), None).await;
        assert_eq!(status, StatusCode::OK);

        let mut expected = input;
        expected["id"] = json!(id);
        assert_eq!(read, expected);
    }

    #[tokio::test]
    async fn list_returns_every_created_account() {
        let app = app();

        let (status, _, empty) = send(&app, "GET", "/accounts", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(empty, json!([]));

        let mut created = Vec::new();
        for (name, balance) in [("a", 1), ("b", 2), ("c", 3)] {
            created.push(create(&app, json!({"name": name, "balance": balance})).await);
        }

        let (status, _, list) = send(&app, "GET", "/accounts", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(list, Value::Array(created));
    }

    #[tokio::test]
    async fn read_missing_is_404() {
        let app = app();
        create(&app, json!({"name": "Alice", "balance": 1})).await;

        let (status, _, body) = send(&app, "GET", "/accounts/0", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["message"], "Account with id [0] could not be found.");
    }

    #[tokio::test]
    async fn non_integer_id_is_404() {
        let app = app();
        let (status, _, _) = send(&app, "GET", "/accounts/abc", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn signed_or_padded_id_is_404() {
        let app = app();
        create(&app, json!({"name": "A", "balance": 1})).await;

        for uri in ["/accounts/+1", "/accounts/-1", "/accounts/%201", "/accounts/1.0"] {
            let (status, _, _) = send(&app, "GET", uri, None).await;
            assert_eq!(status, StatusCode::NOT_FOUND, "{}", uri);
        }
    }

    #[tokio::test]
    async fn oversized_body_is_413() {
        let app = app();
        let address = "x".repeat(3 * 1024 * 1024);

        let (status, _, body) = send(
            &app,
            "POST",
            "/accounts",
            Some(json!({"name": "Big", "balance": 0, "address": address})),
        )
        .await;
        assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
        assert_eq!(body["error"], "invalid_body");

        let (_, _, list) = send(&app, "GET", "/accounts", None).await;
        assert_eq!(list, json!([]));
    }

    #[tokio::test]
    async fn create_missing_field_is_400() {
        let app = app();

        let (status, _, body) =
            send(&app, "POST", "/accounts", Some(json!({"name": "Alice"}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "validation_error");

        let (_, _, list) = send(&app, "GET", "/accounts", None).await;
        assert_eq!(list, json!([]));
    }

    #[tokio::test]
    async fn create_invalid_field_is_400() {
        let app = app();

        let (status, _, _) = send(
            &app,
            "POST",
            "/accounts",
            Some(json!({"name": "", "balance": 1})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _, _) = send(
            &app,
            "POST",
            "/accounts",
            Some(json!({"name": "Alice", "balance": "lots"})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn create_without_json_body_is_400() {
        let app = app();
        let request = Request::builder()
            .method("POST")
            .uri("/accounts")
            .header("content-type", "application/json")
            .body(Body::from("{not json"))
            .unwrap();

        let response = app.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let (status, _, _) = send(&app, "POST", "/accounts", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn update_missing_is_404_and_creates_nothing() {
        let app = app();

        let (status, _, _) = send(
            &app,
            "PUT",
            "/accounts/5",
            Some(json!({"name": "Ghost", "balance": 0})),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        // existence is checked before the body
        let (status, _, _) = send(&app, "PUT", "/accounts/5", Some(json!({}))).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (_, _, list) = send(&app, "GET", "/accounts", None).await;
        assert_eq!(list, json!([]));
    }

    #[tokio::test]
    async fn update_replaces_all_fields() {
        let app = app();
        let created = create(
            &app,
            json!({"name": "Alice", "balance": 100, "email": "alice@example.com"}),
        )
        .await;
        let uri = format!("/accounts/{}", created["id"]);

        let (status, _, updated) = send(
            &app,
            "PUT",
            &uri,
            Some(json!({"id": 999, "name": "Alicia", "balance": 250})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        let expected = json!({"id": created["id"], "name": "Alicia", "balance": 250});
        assert_eq!(updated, expected);

        let (_, _, read) = send(&app, "GET", &uri, None).await;
        assert_eq!(read, expected);
    }

    #[tokio::test]
    async fn update_with_bad_body_is_400() {
        let app = app();
        let created = create(&app, json!({"name": "Alice", "balance": 100})).await;
        let uri = format!("/accounts/{}", created["id"]);

        let (status, _, _) = send(&app, "PUT", &uri, Some(json!({"balance": 1}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (_, _, read) = send(&app, "GET", &uri, None).await;
        assert_eq!(read, created);
    }

    #[tokio::test]
    async fn delete_is_idempotent() {
        let app = app();
        let keep = create(&app, json!({"name": "Keep", "balance": 1})).await;
        let gone = create(&app, json!({"name": "Gone", "balance": 2})).await;
        let uri = format!("/accounts/{}", gone["id"]);

        let (status, _, body) = send(&app, "DELETE", &uri, None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);
        assert_eq!(body, Value::Null);

        let (status, _, _) = send(&app, "DELETE", &uri, None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);

        let (status, _, _) = send(&app, "GET", &uri, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (_, _, list) = send(&app, "GET", "/accounts", None).await;
        assert_eq!(list, json!([keep]));
    }
}
