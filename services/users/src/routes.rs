//! Users service routes

use axum::{
    Json, Router,
    extract::{Path, Query, State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use serde::Deserialize;
use serde_json::json;
use tracing::{error, info};

use crate::{
    error::UserResult,
    models::{CreateUser, DEFAULT_PAGE_LIMIT, UpdateUser, UserId, UserResponse},
    repositories::UserRepository,
    state::AppState,
};

/// Query string for `GET /users`
///
/// Paging values are kept as text; anything that is not a number falls back
/// to the default window instead of rejecting the request.
#[derive(Debug, Default, Deserialize)]
pub struct ListUsersQuery {
    /// When present, look up a single user instead of listing
    pub email: Option<String>,
    pub limit: Option<String>,
    pub offset: Option<String>,
}

impl ListUsersQuery {
    pub fn limit(&self) -> i64 {
        parse_or(self.limit.as_deref(), DEFAULT_PAGE_LIMIT)
    }

    pub fn offset(&self) -> i64 {
        parse_or(self.offset.as_deref(), 0)
    }
}

fn parse_or(raw: Option<&str>, default: i64) -> i64 {
    raw.and_then(|s| s.trim().parse().ok()).unwrap_or(default)
}

/// Query string for `DELETE /users/:id`
#[derive(Debug, Default, Deserialize)]
pub struct DeactivateQuery {
    pub reason: Option<String>,
}

/// Create the router for the users service
pub fn create_router<R: UserRepository + 'static>(state: AppState<R>) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/ready", get(readiness::<R>))
        .route("/users", get(list_users::<R>).post(create_user::<R>))
        .route(
            "/users/:id",
            get(get_user::<R>)
                .put(update_user::<R>)
                .delete(deactivate_user::<R>),
        )
        .with_state(state)
}

/// Liveness endpoint
pub async fn health_check() -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "service": "users-service"
    }))
}

/// Readiness endpoint; ready once storage answers
pub async fn readiness<R: UserRepository>(State(state): State<AppState<R>>) -> Response {
    match state.user_service.health_check().await {
        Ok(true) => (
            StatusCode::OK,
            Json(json!({"status": "ready", "db": "up"})),
        )
            .into_response(),
        Ok(false) => not_ready(),
        Err(e) => {
            error!("Readiness check failed: {}", e);
            not_ready()
        }
    }
}

fn not_ready() -> Response {
    (
        StatusCode::SERVICE_UNAVAILABLE,
        Json(json!({"status": "not-ready", "db": "down"})),
    )
        .into_response()
}

/// POST /users
pub async fn create_user<R: UserRepository>(
    State(state): State<AppState<R>>,
    payload: Result<Json<CreateUser>, JsonRejection>,
) -> UserResult<impl IntoResponse> {
    let Json(payload) = payload?;
    let id = state.user_service.create_user(payload).await?;
    Ok((StatusCode::CREATED, Json(json!({ "id": id }))))
}

/// GET /users/:id
pub async fn get_user<R: UserRepository>(
    State(state): State<AppState<R>>,
    Path(id): Path<UserId>,
) -> UserResult<Json<UserResponse>> {
    let user = state.user_service.get_user(id).await?;
    Ok(Json(user.into()))
}

/// GET /users?email=... or GET /users?limit=&offset=
pub async fn list_users<R: UserRepository>(
    State(state): State<AppState<R>>,
    Query(query): Query<ListUsersQuery>,
) -> UserResult<Response> {
    if let Some(email) = query.email.as_deref().filter(|e| !e.trim().is_empty()) {
        let user = state.user_service.get_user_by_email(email).await?;
        return Ok(Json(UserResponse::from(user)).into_response());
    }

    let users = state
        .user_service
        .list_users(query.limit(), query.offset())
        .await?;

    let body: Vec<UserResponse> = users.into_iter().map(UserResponse::from).collect();
    Ok(Json(body).into_response())
}

/// PUT /users/:id
pub async fn update_user<R: UserRepository>(
    State(state): State<AppState<R>>,
    Path(id): Path<UserId>,
    payload: Result<Json<UpdateUser>, JsonRejection>,
) -> UserResult<StatusCode> {
    let Json(payload) = payload?;
    state.user_service.update_user(id, payload).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /users/:id deactivates; rows are never removed
pub async fn deactivate_user<R: UserRepository>(
    State(state): State<AppState<R>>,
    Path(id): Path<UserId>,
    Query(query): Query<DeactivateQuery>,
) -> UserResult<StatusCode> {
    info!(user_id = id, "Deactivation request");
    state
        .user_service
        .deactivate_user(id, query.reason.as_deref())
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(limit: Option<&str>, offset: Option<&str>) -> ListUsersQuery {
        ListUsersQuery {
            email: None,
            limit: limit.map(str::to_string),
            offset: offset.map(str::to_string),
        }
    }

    #[test]
    fn test_paging_parses_numbers() {
        let q = query(Some(" 20 "), Some("40"));
        assert_eq!((q.limit(), q.offset()), (20, 40));
    }

    #[test]
    fn test_paging_falls_back_on_garbage() {
        let q = query(Some("abc"), Some("x"));
        assert_eq!((q.limit(), q.offset()), (DEFAULT_PAGE_LIMIT, 0));

        let q = query(Some("99999999999999999999"), None);
        assert_eq!(q.limit(), DEFAULT_PAGE_LIMIT);
    }
}
