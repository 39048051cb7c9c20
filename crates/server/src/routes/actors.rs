use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;

use models::actor;
use service::actor_service;

use crate::errors::ApiError;
use crate::routes::AppState;

/// Body for POST /actor and PATCH /actor/:id. The field is optional so the
/// service layer owns the "name is required" decision.
#[derive(Debug, Deserialize)]
pub struct ActorInput {
    pub name: Option<String>,
}

pub async fn list_actors(State(state): State<AppState>) -> Result<Json<Vec<actor::Model>>, ApiError> {
    let actors = actor_service::list_actors(&state.db).await?;
    Ok(Json(actors))
}

pub async fn get_actor(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<actor::Model>, ApiError> {
    let found = actor_service::get_actor(&state.db, id).await?;
    Ok(Json(found))
}

pub async fn create_actor(
    State(state): State<AppState>,
    Json(input): Json<ActorInput>,
) -> Result<(StatusCode, Json<actor::Model>), ApiError> {
    let created = actor_service::create_actor(&state.db, input.name.as_deref()).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn update_actor(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(input): Json<ActorInput>,
) -> Result<Json<actor::Model>, ApiError> {
    let updated = actor_service::update_actor(&state.db, id, input.name.as_deref()).await?;
    Ok(Json(updated))
}

pub async fn delete_actor(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<serde_json::Value>, ApiError> {
    actor_service::delete_actor(&state.db, id).await?;
    Ok(Json(serde_json::json!({})))
}
