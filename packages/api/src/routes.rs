use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use notes_store::{Note, UserInfo};
use serde::Deserialize;
use serde_json::json;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::auth::{Authorized, LoginResponse};
use crate::error::AppError;
use crate::service::parse_id;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct NoteBody {
    pub content: Option<String>,
    pub important: Option<bool>,
}

#[derive(Debug, Deserialize)]
pub struct RegisterBody {
    pub username: Option<String>,
    pub name: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct LoginBody {
    pub username: Option<String>,
    pub password: Option<String>,
}

/// Build the HTTP router for the notes API.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/notes", get(list_notes).post(create_note))
        .route(
            "/api/notes/{id}",
            get(get_note).put(update_note).delete(delete_note),
        )
        .route("/api/users", get(list_users).post(create_user))
        .route("/api/login", post(login))
        .method_not_allowed_fallback(method_not_allowed)
        .fallback(unknown_endpoint)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn list_notes(State(state): State<AppState>) -> Result<Json<Vec<Note>>, AppError> {
    Ok(Json(state.notes.list().await?))
}

async fn get_note(
    State(state): State<AppState>,
    id: Result<Path<String>, PathRejection>,
) -> Result<Json<Note>, AppError> {
    let Path(id) = id?;
    let id = parse_id(&id)?;
    Ok(Json(state.notes.get_by_id(id).await?))
}

/// Token is checked before the body, so an unauthenticated request is a 401
/// even when its body is also invalid.
async fn create_note(
    State(state): State<AppState>,
    Authorized(identity): Authorized,
    body: Result<Json<NoteBody>, JsonRejection>,
) -> Result<Json<Note>, AppError> {
    let Json(body) = body?;
    let note = state
        .notes
        .create(&identity, body.content, body.important)
        .await?;
    Ok(Json(note))
}

async fn update_note(
    State(state): State<AppState>,
    id: Result<Path<String>, PathRejection>,
    body: Result<Json<NoteBody>, JsonRejection>,
) -> Result<Json<Note>, AppError> {
    let Path(id) = id?;
    let id = parse_id(&id)?;
    let Json(body) = body?;
    Ok(Json(
        state
            .notes
            .update_by_id(id, body.content, body.important)
            .await?,
    ))
}

async fn delete_note(
    State(state): State<AppState>,
    id: Result<Path<String>, PathRejection>,
) -> Result<StatusCode, AppError> {
    let Path(id) = id?;
    let id = parse_id(&id)?;
    state.notes.delete_by_id(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn list_users(State(state): State<AppState>) -> Result<Json<Vec<UserInfo>>, AppError> {
    Ok(Json(state.users.list().await?))
}

async fn create_user(
    State(state): State<AppState>,
    body: Result<Json<RegisterBody>, JsonRejection>,
) -> Result<Json<UserInfo>, AppError> {
    let Json(body) = body?;
    let user = state
        .users
        .register(body.username, body.name, body.password)
        .await?;
    Ok(Json(user))
}

async fn login(
    State(state): State<AppState>,
    body: Result<Json<LoginBody>, JsonRejection>,
) -> Result<Json<LoginResponse>, AppError> {
    let Json(body) = body?;
    let username = body.username.unwrap_or_default();
    let password = body.password.unwrap_or_default();
    Ok(Json(state.auth.login(&username, &password).await?))
}

async fn method_not_allowed() -> impl IntoResponse {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        Json(json!({ "error": "method not allowed" })),
    )
}

async fn unknown_endpoint() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "error": "unknown endpoint" })),
    )
}
