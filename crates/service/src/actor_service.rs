use sea_orm::{DatabaseConnection, DatabaseTransaction, TransactionTrait};

use models::{actor, film_actor};

use crate::errors::ServiceError;

pub async fn list_actors(db: &DatabaseConnection) -> Result<Vec<actor::Model>, ServiceError> {
    Ok(actor::find_all(db).await?)
}

pub async fn get_actor(db: &DatabaseConnection, id: i32) -> Result<actor::Model, ServiceError> {
    actor::find_by_id(db, id)
        .await?
        .ok_or_else(|| ServiceError::actor_not_found(id))
}

/// Resolve a client-supplied id list, failing on the first id that does not
/// exist. This is the gate that keeps films from referencing missing actors.
pub async fn get_actors_by_ids(
    db: &DatabaseConnection,
    ids: &[i32],
) -> Result<Vec<actor::Model>, ServiceError> {
    let mut actors = Vec::with_capacity(ids.len());
    for id in ids {
        actors.push(get_actor(db, *id).await?);
    }
    Ok(actors)
}

/// Validate and insert. No uniqueness check: distinct actors may share a name.
pub async fn create_actor(
    db: &DatabaseConnection,
    name: Option<&str>,
) -> Result<actor::Model, ServiceError> {
    let name = require_name(name)?;
    Ok(actor::insert(db, name).await?)
}

/// Full name replace.
pub async fn update_actor(
    db: &DatabaseConnection,
    id: i32,
    name: Option<&str>,
) -> Result<actor::Model, ServiceError> {
    let name = require_name(name)?;
    actor::update_name(db, id, name)
        .await?
        .ok_or_else(|| ServiceError::actor_not_found(id))
}

/// Delete the actor row and every junction pair referencing it. The cascade
/// is the service's responsibility, so both deletes share one transaction.
pub async fn delete_actor(db: &DatabaseConnection, id: i32) -> Result<(), ServiceError> {
    get_actor(db, id).await?;

    let txn = db.begin().await.map_err(|e| ServiceError::Db(e.to_string()))?;
    if let Err(e) = delete_actor_rows(&txn, id).await {
        let _ = txn.rollback().await;
        return Err(e);
    }
    txn.commit().await.map_err(|e| ServiceError::Db(e.to_string()))?;
    Ok(())
}

async fn delete_actor_rows(txn: &DatabaseTransaction, id: i32) -> Result<(), ServiceError> {
    actor::delete_by_id(txn, id).await?;
    film_actor::delete_by_actor(txn, id).await?;
    Ok(())
}

fn require_name(name: Option<&str>) -> Result<&str, ServiceError> {
    let name = name.ok_or_else(|| ServiceError::Validation("actor name is required".into()))?;
    actor::validate_name(name)?;
    Ok(name)
}
