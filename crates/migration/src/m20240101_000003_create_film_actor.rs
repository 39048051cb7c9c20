//! Create `film_actor` junction table.
//!
//! Composite primary key rules out duplicate pairs. The foreign keys carry
//! no ON DELETE action: cascading cleanup is the service layer's job.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(FilmActor::Table)
                    .if_not_exists()
                    .col(integer(FilmActor::FilmId).not_null())
                    .col(integer(FilmActor::ActorId).not_null())
                    .primary_key(
                        Index::create()
                            .name("pk_film_actor")
                            .col(FilmActor::FilmId)
                            .col(FilmActor::ActorId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_film_actor_film")
                            .from(FilmActor::Table, FilmActor::FilmId)
                            .to(Film::Table, Film::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_film_actor_actor")
                            .from(FilmActor::Table, FilmActor::ActorId)
                            .to(Actor::Table, Actor::Id),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(FilmActor::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum FilmActor { Table, FilmId, ActorId }

#[derive(DeriveIden)]
enum Film { Table, Id }

#[derive(DeriveIden)]
enum Actor { Table, Id }
