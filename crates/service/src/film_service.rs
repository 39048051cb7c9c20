use sea_orm::{DatabaseConnection, DatabaseTransaction, TransactionTrait};
use serde::{Deserialize, Serialize};

use models::{actor, film, film_actor};

use crate::actor_service;
use crate::errors::ServiceError;

/// Aggregated read shape: a film row with its junction-resolved cast.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilmWithActors {
    pub id: i32,
    pub name: String,
    pub actors: Vec<actor::Model>,
}

impl From<(film::Model, Vec<actor::Model>)> for FilmWithActors {
    fn from((film, actors): (film::Model, Vec<actor::Model>)) -> Self {
        Self { id: film.id, name: film.name, actors }
    }
}

pub async fn list_films(db: &DatabaseConnection) -> Result<Vec<FilmWithActors>, ServiceError> {
    let films = film::find_all_with_actors(db).await?;
    Ok(films.into_iter().map(FilmWithActors::from).collect())
}

pub async fn get_film(db: &DatabaseConnection, id: i32) -> Result<FilmWithActors, ServiceError> {
    film::find_with_actors(db, id)
        .await?
        .map(FilmWithActors::from)
        .ok_or_else(|| ServiceError::film_not_found(id))
}

/// Create a film together with its association set.
///
/// The actor list is required; an empty list is valid and means "no actors".
/// Every id must resolve to an existing actor before anything is written, so
/// a bad id leaves the film table untouched.
pub async fn create_film(
    db: &DatabaseConnection,
    name: Option<&str>,
    actor_ids: Option<&[i32]>,
) -> Result<FilmWithActors, ServiceError> {
    let name = require_name(name)?;
    let actor_ids =
        actor_ids.ok_or_else(|| ServiceError::Validation("the list of actors is required".into()))?;

    if film::find_by_name(db, name).await?.is_some() {
        return Err(ServiceError::Conflict("there is already such a film".into()));
    }
    let actors = actor_service::get_actors_by_ids(db, actor_ids).await?;

    let txn = db.begin().await.map_err(|e| ServiceError::Db(e.to_string()))?;
    let created = match insert_film_rows(&txn, name, actor_ids).await {
        Ok(film) => film,
        Err(e) => {
            let _ = txn.rollback().await;
            return Err(e);
        }
    };
    txn.commit().await.map_err(|e| ServiceError::Db(e.to_string()))?;

    Ok(FilmWithActors { id: created.id, name: created.name, actors })
}

async fn insert_film_rows(
    txn: &DatabaseTransaction,
    name: &str,
    actor_ids: &[i32],
) -> Result<film::Model, ServiceError> {
    let created = film::insert(txn, name).await?;
    film_actor::replace_for_film(txn, created.id, actor_ids).await?;
    Ok(created)
}

/// Partial update; `name` and `actor_ids` are independent.
///
/// A provided actor list fully replaces the association set ("provided but
/// empty" clears it); an absent list leaves the set untouched. Everything is
/// validated before the first write, and both mutations share one
/// transaction. The rename path deliberately skips the uniqueness check.
pub async fn update_film(
    db: &DatabaseConnection,
    id: i32,
    name: Option<&str>,
    actor_ids: Option<&[i32]>,
) -> Result<FilmWithActors, ServiceError> {
    film::find_by_id(db, id)
        .await?
        .ok_or_else(|| ServiceError::film_not_found(id))?;

    if let Some(name) = name {
        film::validate_name(name)?;
    }
    if let Some(ids) = actor_ids {
        actor_service::get_actors_by_ids(db, ids).await?;
    }

    let txn = db.begin().await.map_err(|e| ServiceError::Db(e.to_string()))?;
    if let Err(e) = apply_film_update(&txn, id, name, actor_ids).await {
        let _ = txn.rollback().await;
        return Err(e);
    }
    txn.commit().await.map_err(|e| ServiceError::Db(e.to_string()))?;

    // Re-read after mutation so the caller sees the current state
    get_film(db, id).await
}

async fn apply_film_update(
    txn: &DatabaseTransaction,
    id: i32,
    name: Option<&str>,
    actor_ids: Option<&[i32]>,
) -> Result<(), ServiceError> {
    if let Some(name) = name {
        film::update_name(txn, id, name)
            .await?
            .ok_or_else(|| ServiceError::film_not_found(id))?;
    }
    if let Some(ids) = actor_ids {
        film_actor::replace_for_film(txn, id, ids).await?;
    }
    Ok(())
}

/// Delete the film row and all its junction pairs in one transaction.
pub async fn delete_film(db: &DatabaseConnection, id: i32) -> Result<(), ServiceError> {
    film::find_by_id(db, id)
        .await?
        .ok_or_else(|| ServiceError::film_not_found(id))?;

    let txn = db.begin().await.map_err(|e| ServiceError::Db(e.to_string()))?;
    if let Err(e) = delete_film_rows(&txn, id).await {
        let _ = txn.rollback().await;
        return Err(e);
    }
    txn.commit().await.map_err(|e| ServiceError::Db(e.to_string()))?;
    Ok(())
}

async fn delete_film_rows(txn: &DatabaseTransaction, id: i32) -> Result<(), ServiceError> {
    film::delete_by_id(txn, id).await?;
    film_actor::delete_by_film(txn, id).await?;
    Ok(())
}

fn require_name(name: Option<&str>) -> Result<&str, ServiceError> {
    let name = name.ok_or_else(|| ServiceError::Validation("film name is required".into()))?;
    film::validate_name(name)?;
    Ok(name)
}
