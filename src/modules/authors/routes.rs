//! HTTP handlers for `/authors`.

use std::sync::Arc;

use authors_http::error::AppError;
use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    routing::{get, put},
    Json, Router,
};

use super::models::Author;
use super::store::{AuthorStore, StoreError};
use super::validation::AuthorInput;

impl From<StoreError> for AppError {
    fn from(error: StoreError) -> Self {
        match error {
            StoreError::Validation(e) => AppError::validation(e.to_string()),
            e @ StoreError::Conflict { .. } => AppError::conflict(e.to_string()),
            e @ StoreError::NotFound { .. } => AppError::not_found(e.to_string()),
        }
    }
}

/// Routes relative to the module mount point.
pub fn router(store: Arc<AuthorStore>) -> Router {
    Router::new()
        .route("/", get(list_authors).post(create_author))
        .route("/{id}", put(update_author).delete(delete_author))
        .with_state(store)
}

/// Unparseable bodies get the same `{error}` shape as every other failure
fn read_input(
    payload: Result<Json<AuthorInput>, JsonRejection>,
) -> Result<AuthorInput, AppError> {
    payload
        .map(|Json(input)| input)
        .map_err(|rejection| AppError::bad_request(rejection.body_text()))
}

fn read_path(path: Result<Path<String>, PathRejection>) -> Result<String, AppError> {
    path
        .map(|Path(raw)| raw)
        .map_err(|rejection| AppError::bad_request(rejection.body_text()))
}

/// Read an id the way a lenient integer parse does: leading whitespace and an
/// optional sign, then the longest run of digits. Anything after the digits is
/// ignored (`"1abc"` and `"2.0"` name authors 1 and 2). No digits means no id.
pub fn parse_id(raw: &str) -> Option<i64> {
    let trimmed = raw.trim_start();
    let (negative, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    let magnitude: i64 = rest[..end].parse().ok()?;

    Some(if negative { -magnitude } else { magnitude })
}

async fn list_authors(State(store): State<Arc<AuthorStore>>) -> Json<Vec<Author>> {
    Json(store.list().await)
}

async fn create_author(
    State(store): State<Arc<AuthorStore>>,
    payload: Result<Json<AuthorInput>, JsonRejection>,
) -> Result<(StatusCode, Json<Author>), AppError> {
    let author = store.create(read_input(payload)?).await?;
    Ok((StatusCode::CREATED, Json(author)))
}

async fn update_author(
    State(store): State<Arc<AuthorStore>>,
    path: Result<Path<String>, PathRejection>,
    payload: Result<Json<AuthorInput>, JsonRejection>,
) -> Result<Json<Author>, AppError> {
    let raw_id = read_path(path)?;
    let input = read_input(payload)?;

    // A non-numeric id cannot name an author; the body is still checked first.
    let author = match parse_id(&raw_id) {
        Some(id) => store.update(id, input).await?,
        None => {
            input.validate().map_err(StoreError::from)?;
            return Err(AppError::not_found("Author not found"));
        }
    };

    Ok(Json(author))
}

async fn delete_author(
    State(store): State<Arc<AuthorStore>>,
    path: Result<Path<String>, PathRejection>,
) -> Result<StatusCode, AppError> {
    if let Some(id) = parse_id(&read_path(path)?) {
        store.delete(id).await;
    }
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::authors::models::demo_authors;
    use authors_http::error::ErrorBody;
    use axum::{
        body::{self, Body},
        http::{Request, Response},
    };
    use serde::de::DeserializeOwned;
    use serde_json::json;
    use tower::ServiceExt;

    fn app() -> (Router, Arc<AuthorStore>) {
        let store = Arc::new(AuthorStore::seeded(demo_authors()));
        (router(store.clone()), store)
    }

    fn json_request(method: &str, uri: &str, value: serde_json::Value) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(value.to_string()))
            .expect("request")
    }

    fn empty_request(method: &str, uri: &str) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .expect("request")
    }

    async fn read<T: DeserializeOwned>(response: Response<Body>) -> T {
        let bytes = body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body");
        serde_json::from_slice(&bytes).expect("json")
    }

    #[tokio::test]
    async fn list_returns_all_authors() {
        let (app, _) = app();
        let response = app.oneshot(empty_request("GET", "/")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let authors: Vec<Author> = read(response).await;
        assert_eq!(authors, demo_authors());
    }

    #[tokio::test]
    async fn create_returns_201_with_record() {
        let (app, store) = app();
        let response = app
            .oneshot(json_request(
                "POST",
                "/",
                json!({"first": "a", "last": "b", "email": "a@b.co"}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);

        let created: Author = read(response).await;
        assert_eq!((created.first.as_str(), created.last.as_str()), ("a", "b"));
        assert_eq!(created.email, "a@b.co");
        assert!(store.list().await.contains(&created));
    }

    #[tokio::test]
    async fn create_with_missing_field_is_400() {
        let (app, store) = app();
        let response = app
            .oneshot(json_request(
                "POST",
                "/",
                json!({"first": "a", "email": "a@b.co"}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body: ErrorBody = read(response).await;
        assert_eq!(body.error, "last is required");
        assert_eq!(store.len().await, 2);
    }

    #[tokio::test]
    async fn malformed_json_is_400_with_error_body() {
        let (app, _) = app();
        let request = Request::builder()
            .method("POST")
            .uri("/")
            .header("content-type", "application/json")
            .body(Body::from("{not json"))
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body: ErrorBody = read(response).await;
        assert!(!body.error.is_empty());
    }

    #[tokio::test]
    async fn wrong_field_type_is_400() {
        let (app, _) = app();
        let response = app
            .oneshot(json_request(
                "POST",
                "/",
                json!({"first": 5, "last": "b", "email": "a@b.co"}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn update_unknown_id_is_404() {
        let (app, _) = app();
        let response = app
            .oneshot(json_request(
                "PUT",
                "/999",
                json!({"first": "a", "last": "b", "email": "a@b.co"}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body: ErrorBody = read(response).await;
        assert_eq!(body.error, "Author not found");
    }

    #[tokio::test]
    async fn update_non_numeric_id_validates_then_404s() {
        let (app, _) = app();
        let invalid = app
            .clone()
            .oneshot(json_request("PUT", "/abc", json!({"first": "a"})))
            .await
            .unwrap();
        assert_eq!(invalid.status(), StatusCode::BAD_REQUEST);

        let valid = app
            .oneshot(json_request(
                "PUT",
                "/abc",
                json!({"first": "a", "last": "b", "email": "a@b.co"}),
            ))
            .await
            .unwrap();
        assert_eq!(valid.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn update_returns_updated_record() {
        let (app, _) = app();
        let response = app
            .oneshot(json_request(
                "PUT",
                "/2",
                json!({"first": "Janet", "last": "Doe", "email": "jane@aol.com"}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let updated: Author = read(response).await;
        assert_eq!(updated, Author::new(2, "Janet", "Doe", "jane@aol.com"));
    }

    #[tokio::test]
    async fn delete_non_numeric_id_is_a_no_op() {
        let (app, store) = app();
        let response = app
            .oneshot(empty_request("DELETE", "/abc"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NO_CONTENT);
        assert_eq!(store.len().await, 2);
    }

    #[test]
    fn ids_parse_by_leading_digits() {
        assert_eq!(parse_id("42"), Some(42));
        assert_eq!(parse_id("1abc"), Some(1));
        assert_eq!(parse_id("2.0"), Some(2));
        assert_eq!(parse_id(" 7"), Some(7));
        assert_eq!(parse_id("-3"), Some(-3));
        assert_eq!(parse_id("+5x"), Some(5));
        assert_eq!(parse_id("abc"), None);
        assert_eq!(parse_id(""), None);
        assert_eq!(parse_id("-"), None);
        assert_eq!(parse_id("99999999999999999999"), None);
    }

    #[tokio::test]
    async fn delete_with_trailing_garbage_uses_leading_digits() {
        let (app, store) = app();
        let response = app
            .oneshot(empty_request("DELETE", "/1abc"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NO_CONTENT);
        let remaining = store.list().await;
        assert_eq!(remaining.len(), 1);
        assert!(remaining.iter().all(|a| a.id != 1));
    }

    #[tokio::test]
    async fn update_with_decimal_id_targets_integer_part() {
        let (app, _) = app();
        let response = app
            .oneshot(json_request(
                "PUT",
                "/2.0",
                json!({"first": "Janet", "last": "Doe", "email": "jane@aol.com"}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let updated: Author = read(response).await;
        assert_eq!(updated, Author::new(2, "Janet", "Doe", "jane@aol.com"));
    }

    #[tokio::test]
    async fn undecodable_path_is_400_with_error_body() {
        let (app, store) = app();
        let response = app
            .oneshot(empty_request("DELETE", "/%FF"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body: ErrorBody = read(response).await;
        assert!(!body.error.is_empty());
        assert_eq!(store.len().await, 2);
    }

    #[tokio::test]
    async fn scenario_over_http() {
        let (app, store) = app();
        let ann = json!({"first": "Ann", "last": "Lee", "email": "ann@x.co"});

        let created = app
            .clone()
            .oneshot(json_request("POST", "/", ann.clone()))
            .await
            .unwrap();
        assert_eq!(created.status(), StatusCode::CREATED);
        let created: Author = read(created).await;
        assert!(created.id != 1 && created.id != 2);

        let duplicate = app
            .clone()
            .oneshot(json_request("POST", "/", ann))
            .await
            .unwrap();
        assert_eq!(duplicate.status(), StatusCode::CONFLICT);
        let body: ErrorBody = read(duplicate).await;
        assert_eq!(body.error, "Email already exists.");
        assert_eq!(store.len().await, 3);

        let clash = app
            .clone()
            .oneshot(json_request(
                "PUT",
                "/1",
                json!({"first": "Sam", "last": "Iam", "email": "jane@aol.com"}),
            ))
            .await
            .unwrap();
        assert_eq!(clash.status(), StatusCode::CONFLICT);

        let missing = app
            .clone()
            .oneshot(empty_request("DELETE", "/999"))
            .await
            .unwrap();
        assert_eq!(missing.status(), StatusCode::NO_CONTENT);
        assert_eq!(store.len().await, 3);

        let removed = app
            .clone()
            .oneshot(empty_request("DELETE", "/1"))
            .await
            .unwrap();
        assert_eq!(removed.status(), StatusCode::NO_CONTENT);

        let listed = app.oneshot(empty_request("GET", "/")).await.unwrap();
        let authors: Vec<Author> = read(listed).await;
        assert_eq!(authors.len(), 2);
        assert!(authors.iter().all(|a| a.id != 1));
    }
}
