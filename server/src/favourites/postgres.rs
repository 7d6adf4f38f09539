use super::{CreateOutcome, FavouriteStore, StoreError};
use crate::db::DbPool;
use crate::models::{Favourite, NewFavourite};
use crate::schema::favourites;
use async_trait::async_trait;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use uuid::Uuid;

/// Favourites stored in the `favourites` table.
///
/// Diesel is synchronous, so each operation checks a connection out of the
/// pool and runs on the blocking thread pool.
#[derive(Clone)]
pub struct PgFavouriteStore {
    pool: DbPool,
}

impl PgFavouriteStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    async fn with_conn<T, F>(&self, op: F) -> Result<T, StoreError>
    where
        F: FnOnce(&mut PgConnection) -> Result<T, StoreError> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut conn = pool.get()?;
            op(&mut conn)
        })
        .await
        .map_err(|e| StoreError::Storage(format!("database task failed: {}", e)))?
    }
}

#[async_trait]
impl FavouriteStore for PgFavouriteStore {
    async fn list(&self) -> Result<Vec<Favourite>, StoreError> {
        self.with_conn(|conn| {
            let rows = favourites::table
                .select(Favourite::as_select())
                .order((favourites::created_at.desc(), favourites::id.desc()))
                .load(conn)?;
            Ok(rows)
        })
        .await
    }

    async fn insert_if_absent(&self, favourite: NewFavourite) -> Result<CreateOutcome, StoreError> {
        self.with_conn(move |conn| {
            let existing: i64 = favourites::table
                .filter(favourites::recipe_id.eq(&favourite.recipe_id))
                .count()
                .get_result(conn)?;

            if existing > 0 {
                return Ok(CreateOutcome::AlreadyExists);
            }

            // A concurrent save of the same recipe can win between the check
            // above and this insert; the unique index turns that into a no-op.
            match diesel::insert_into(favourites::table)
                .values(&favourite)
                .returning(Favourite::as_returning())
                .get_result(conn)
            {
                Ok(saved) => Ok(CreateOutcome::Created(saved)),
                Err(DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _)) => {
                    tracing::debug!(recipe_id = %favourite.recipe_id, "lost insert race");
                    Ok(CreateOutcome::AlreadyExists)
                }
                Err(e) => Err(e.into()),
            }
        })
        .await
    }

    async fn remove(&self, id: Uuid) -> Result<(), StoreError> {
        self.with_conn(move |conn| {
            let deleted = diesel::delete(favourites::table.find(id)).execute(conn)?;
            if deleted == 0 {
                return Err(StoreError::NotFound);
            }
            Ok(())
        })
        .await
    }
}
