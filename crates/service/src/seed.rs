//! Demo dataset loader, used by `SEED_DB=1` at startup and by manual testing.

use std::collections::HashMap;

use sea_orm::{DatabaseConnection, DatabaseTransaction, TransactionTrait};
use tracing::info;

use models::{actor, film, film_actor};

use crate::errors::ServiceError;

// Some actors appear in several films on purpose: the dataset demonstrates
// that a shared cast member is one actor row referenced by many films, even
// though the REST API itself allows distinct actors with equal names.
const DEMO_FILMS: &[(&str, &[&str])] = &[
    ("Revolver", &["Jason Statham", "Ray Liotta"]),
    ("The Hitchhiker's Guide to the Galaxy", &["Martin Freeman", "Yasiin Bey"]),
    ("Fight Club", &["Edward Norton", "Brad Pitt"]),
    ("The Last Samurai", &["Ken Watanabe", "Tom Cruise"]),
    ("Edge of Tomorrow", &["Tom Cruise", "Emily Blunt"]),
    ("Interview with the Vampire", &["Tom Cruise", "Brad Pitt"]),
    ("The Italian Job", &["Jason Statham", "Yasiin Bey", "Edward Norton"]),
];

/// Reset all three tables and load the demo dataset in one transaction.
pub async fn seed_demo(db: &DatabaseConnection) -> Result<(), ServiceError> {
    let txn = db.begin().await.map_err(|e| ServiceError::Db(e.to_string()))?;
    if let Err(e) = load_dataset(&txn).await {
        let _ = txn.rollback().await;
        return Err(e);
    }
    txn.commit().await.map_err(|e| ServiceError::Db(e.to_string()))?;

    info!(films = DEMO_FILMS.len(), "demo dataset seeded");
    Ok(())
}

async fn load_dataset(txn: &DatabaseTransaction) -> Result<(), ServiceError> {
    film_actor::delete_all(txn).await?;
    film::delete_all(txn).await?;
    actor::delete_all(txn).await?;

    // One actor row per distinct name, first occurrence wins
    let mut actor_ids: HashMap<&str, i32> = HashMap::new();
    for &(_, cast) in DEMO_FILMS {
        for &name in cast {
            if !actor_ids.contains_key(name) {
                let created = actor::insert(txn, name).await?;
                actor_ids.insert(name, created.id);
            }
        }
    }

    for &(film_name, cast) in DEMO_FILMS {
        let created = film::insert(txn, film_name).await?;
        for &name in cast {
            film_actor::insert(txn, created.id, actor_ids[name]).await?;
        }
    }
    Ok(())
}
