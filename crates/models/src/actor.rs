use sea_orm::{entity::prelude::*, ConnectionTrait, DatabaseConnection, QueryOrder, Set};
use serde::{Deserialize, Serialize};

use crate::errors::ModelError;
use crate::film;
use crate::film_actor;

pub const NAME_MAX_LEN: usize = 1024;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "actor")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    FilmActor,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::FilmActor => Entity::has_many(film_actor::Entity).into(),
        }
    }
}

impl Related<film_actor::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::FilmActor.def()
    }
}

impl Related<film::Entity> for Entity {
    fn to() -> RelationDef {
        film_actor::Relation::Film.def()
    }

    fn via() -> Option<RelationDef> {
        Some(film_actor::Relation::Actor.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Actor names are required and capped at 1024 characters. They are not
/// unique: distinct actors may share a name.
pub fn validate_name(name: &str) -> Result<(), ModelError> {
    if name.is_empty() {
        return Err(ModelError::Validation("actor name is required".into()));
    }
    if name.chars().count() > NAME_MAX_LEN {
        return Err(ModelError::Validation(format!(
            "actor name must be at most {NAME_MAX_LEN} characters"
        )));
    }
    Ok(())
}

pub async fn find_all(db: &DatabaseConnection) -> Result<Vec<Model>, ModelError> {
    Entity::find().all(db).await.map_err(|e| ModelError::Db(e.to_string()))
}

pub async fn find_by_id<C: ConnectionTrait>(conn: &C, id: i32) -> Result<Option<Model>, ModelError> {
    Entity::find_by_id(id).one(conn).await.map_err(|e| ModelError::Db(e.to_string()))
}

pub async fn find_by_name<C: ConnectionTrait>(conn: &C, name: &str) -> Result<Option<Model>, ModelError> {
    Entity::find()
        .filter(Column::Name.eq(name))
        .one(conn)
        .await
        .map_err(|e| ModelError::Db(e.to_string()))
}

/// First row in id order; fixture sampling only.
pub async fn find_first<C: ConnectionTrait>(conn: &C) -> Result<Option<Model>, ModelError> {
    Entity::find()
        .order_by_asc(Column::Id)
        .one(conn)
        .await
        .map_err(|e| ModelError::Db(e.to_string()))
}

pub async fn count<C: ConnectionTrait>(conn: &C) -> Result<u64, ModelError> {
    Entity::find().count(conn).await.map_err(|e| ModelError::Db(e.to_string()))
}

pub async fn insert<C: ConnectionTrait>(conn: &C, name: &str) -> Result<Model, ModelError> {
    let am = ActiveModel {
        name: Set(name.to_string()),
        ..Default::default()
    };
    am.insert(conn).await.map_err(|e| ModelError::Db(e.to_string()))
}

/// Full name replace. Returns `None` when the row does not exist.
pub async fn update_name<C: ConnectionTrait>(
    conn: &C,
    id: i32,
    name: &str,
) -> Result<Option<Model>, ModelError> {
    let found = Entity::find_by_id(id)
        .one(conn)
        .await
        .map_err(|e| ModelError::Db(e.to_string()))?;
    match found {
        Some(model) => {
            let mut am: ActiveModel = model.into();
            am.name = Set(name.to_string());
            let updated = am.update(conn).await.map_err(|e| ModelError::Db(e.to_string()))?;
            Ok(Some(updated))
        }
        None => Ok(None),
    }
}

pub async fn delete_by_id<C: ConnectionTrait>(conn: &C, id: i32) -> Result<u64, ModelError> {
    let res = Entity::delete_by_id(id)
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
