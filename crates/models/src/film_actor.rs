use sea_orm::{entity::prelude::*, ConnectionTrait, Set};
use serde::{Deserialize, Serialize};

use crate::actor;
use crate::errors::ModelError;
use crate::film;

/// Pure many-to-many membership between a film and an actor; carries no
/// attributes of its own. Referential integrity is enforced by the services
/// that write pairs, not by the store.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "film_actor")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub film_id: i32,
    #[sea_orm(primary_key, auto_increment = false)]
    pub actor_id: i32,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Film,
    Actor,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Film => Entity::belongs_to(film::Entity)
                .from(Column::FilmId)
                .to(film::Column::Id)
                .into(),
            Relation::Actor => Entity::belongs_to(actor::Entity)
                .from(Column::ActorId)
                .to(actor::Column::Id)
                .into(),
        }
    }
}

impl Related<film::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Film.def()
    }
}

impl Related<actor::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Actor.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

pub async fn insert<C: ConnectionTrait>(conn: &C, film_id: i32, actor_id: i32) -> Result<(), ModelError> {
    let am = ActiveModel {
        film_id: Set(film_id),
        actor_id: Set(actor_id),
    };
    Entity::insert(am)
        .exec_without_returning(conn)
        .await
        .map_err(|e| ModelError::Db(e.to_string()))?;
    Ok(())
}

pub async fn find_by_film<C: ConnectionTrait>(conn: &C, film_id: i32) -> Result<Vec<Model>, ModelError> {
    Entity::find()
        .filter(Column::FilmId.eq(film_id))
        .all(conn)
        .await
        .map_err(|e| ModelError::Db(e.to_string()))
}

pub async fn find_by_actor<C: ConnectionTrait>(conn: &C, actor_id: i32) -> Result<Vec<Model>, ModelError> {
    Entity::find()
        .filter(Column::ActorId.eq(actor_id))
        .all(conn)
        .await
        .map_err(|e| ModelError::Db(e.to_string()))
}

pub async fn count<C: ConnectionTrait>(conn: &C) -> Result<u64, ModelError> {
    Entity::find().count(conn).await.map_err(|e| ModelError::Db(e.to_string()))
}

pub async fn delete_by_film<C: ConnectionTrait>(conn: &C, film_id: i32) -> Result<u64, ModelError> {
    let res = Entity::delete_many()
        .filter(Column::FilmId.eq(film_id))
        .exec(conn)
        .await
        .map_err(|e| ModelError::Db(e.to_string()))?;
    Ok(res.rows_affected)
}

pub async fn delete_by_actor<C: ConnectionTrait>(conn: &C, actor_id: i32) -> Result<u64, ModelError> {
    let res = Entity::delete_many()
        .filter(Column::ActorId.eq(actor_id))
        .exec(conn)
        .await
        .map_err(|e| ModelError::Db(e.to_string()))?;
    Ok(res.rows_affected)
}

pub async fn delete_all<C: ConnectionTrait>(conn: &C) -> Result<u64, ModelError> {
    let res = Entity::delete_many()
        .exec(conn)
        .await
        .map_err(|e| ModelError::Db(e.to_string()))?;
    Ok(res.rows_affected)
}

/// Replace a film's whole association set: delete every existing pair for
/// the film, then insert one pair per requested actor id. Must run inside a
/// transaction so readers never observe the half-replaced set.
pub async fn replace_for_film<C: ConnectionTrait>(
    conn: &C,
    film_id: i32,
    actor_ids: &[i32],
) -> Result<(), ModelError> {
    delete_by_film(conn, film_id).await?;
    for actor_id in actor_ids {
        insert(conn, film_id, *actor_id).await?;
    }
    Ok(())
}
