//! In-memory store used by the router tests.

use super::{CreateOutcome, FavouriteStore, StoreError};
use crate::models::{Favourite, NewFavourite};
use async_trait::async_trait;
use chrono::{Duration, Utc};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use uuid::Uuid;

#[derive(Default)]
pub struct MemoryFavouriteStore {
    rows: Mutex<Vec<Favourite>>,
    /// Number of calls that reached storage, for asserting validation gates.
    writes: AtomicUsize,
    fail: bool,
}

impl MemoryFavouriteStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store whose every operation fails with a storage error.
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn len(&self) -> usize {
        self.rows.lock().unwrap().len()
    }

    pub fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    fn check(&self) -> Result<(), StoreError> {
        if self.fail {
            return Err(StoreError::Storage("simulated outage".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl FavouriteStore for MemoryFavouriteStore {
    async fn list(&self) -> Result<Vec<Favourite>, StoreError> {
        self.check()?;
        let mut rows = self.rows.lock().unwrap().clone();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(rows)
    }

    async fn insert_if_absent(&self, favourite: NewFavourite) -> Result<CreateOutcome, StoreError> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        self.check()?;

        let mut rows = self.rows.lock().unwrap();
        if rows.iter().any(|row| row.recipe_id == favourite.recipe_id) {
            return Ok(CreateOutcome::AlreadyExists);
        }

        // Keep timestamps strictly increasing so newest-first is unambiguous.
        let now = Utc::now();
        let created_at = match rows.iter().map(|row| row.created_at).max() {
            Some(latest) if latest >= now => latest + Duration::microseconds(1),
            _ => now,
        };

        let saved = Favourite {
            id: Uuid::new_v4(),
            recipe_id: favourite.recipe_id,
            title: favourite.title,
            image: favourite.image,
            source_url: favourite.source_url,
            calories: favourite.calories,
            ready_in_minutes: favourite.ready_in_minutes,
            diets: favourite.diets,
            created_at,
        };
        rows.push(saved.clone());
        Ok(CreateOutcome::Created(saved))
    }

    async fn remove(&self, id: Uuid) -> Result<(), StoreError> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        self.check()?;

        let mut rows = self.rows.lock().unwrap();
        let before = rows.len();
        rows.retain(|row| row.id != id);
        if rows.len() == before {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::favourites::FavouriteInput;

    #[tokio::test]
    async fn test_create_twice_stores_once() {
        let store = MemoryFavouriteStore::new();

        let first = store.create(FavouriteInput::new("r1", "Soup")).await.unwrap();
        assert!(matches!(first, CreateOutcome::Created(_)));

        let second = store.create(FavouriteInput::new("r1", "Soup again")).await.unwrap();
        assert_eq!(second, CreateOutcome::AlreadyExists);
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn test_list_is_newest_first() {
        let store = MemoryFavouriteStore::new();
        for i in 0..5 {
            store
                .create(FavouriteInput::new(&format!("r{}", i), "Dish"))
                .await
                .unwrap();
        }

        let rows = store.list().await.unwrap();
        assert_eq!(rows.len(), 5);
        assert_eq!(rows[0].recipe_id, "r4");
        assert!(rows.windows(2).all(|w| w[0].created_at >= w[1].created_at));
    }

    #[tokio::test]
    async fn test_invalid_input_never_reaches_storage() {
        let store = MemoryFavouriteStore::new();
        let err = store.create(FavouriteInput::default()).await.unwrap_err();
        assert!(matches!(err, StoreError::Validation(_)));
        assert_eq!(store.writes(), 0);
        assert_eq!(store.len(), 0);
    }

    #[tokio::test]
    async fn test_remove() {
        let store = MemoryFavouriteStore::new();
        let CreateOutcome::Created(saved) = store.create(FavouriteInput::new("r1", "Soup")).await.unwrap() else {
            panic!("expected a new favourite");
        };

        let err = store.remove(Uuid::new_v4()).await.unwrap_err();
        assert!(matches!(err, StoreError::NotFound));
        assert_eq!(store.len(), 1);

        store.remove(saved.id).await.unwrap();
        assert_eq!(store.len(), 0);
        assert!(store.list().await.unwrap().is_empty());

        // Removing frees the recipe id for a fresh save.
        let again = store.create(FavouriteInput::new("r1", "Soup")).await.unwrap();
        assert!(matches!(again, CreateOutcome::Created(_)));
    }
}
