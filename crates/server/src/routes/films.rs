use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;

use service::film_service::{self, FilmWithActors};

use crate::errors::ApiError;
use crate::routes::AppState;

/// Body for POST /film and PATCH /film/:id. `actors` carries ids of actor
/// entities; on PATCH both fields are independent and optional.
#[derive(Debug, Deserialize)]
pub struct FilmInput {
    pub name: Option<String>,
    pub actors: Option<Vec<i32>>,
}

pub async fn list_films(State(state): State<AppState>) -> Result<Json<Vec<FilmWithActors>>, ApiError> {
    let films = film_service::list_films(&state.db).await?;
    Ok(Json(films))
}

pub async fn get_film(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<FilmWithActors>, ApiError> {
    let found = film_service::get_film(&state.db, id).await?;
    Ok(Json(found))
}

pub async fn create_film(
    State(state): State<AppState>,
    Json(input): Json<FilmInput>,
) -> Result<(StatusCode, Json<FilmWithActors>), ApiError> {
    let created =
        film_service::create_film(&state.db, input.name.as_deref(), input.actors.as_deref()).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn update_film(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(input): Json<FilmInput>,
) -> Result<Json<FilmWithActors>, ApiError> {
    let updated =
        film_service::update_film(&state.db, id, input.name.as_deref(), input.actors.as_deref())
            .await?;
    Ok(Json(updated))
}

pub async fn delete_film(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<serde_json::Value>, ApiError> {
    film_service::delete_film(&state.db, id).await?;
    Ok(Json(serde_json::json!({})))
}
