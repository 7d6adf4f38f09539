//! Persistence for favourite recipes.
//!
//! A favourite is identified by its store-assigned `id`, but `recipe_id` is
//! the natural key: saving a recipe that is already a favourite is a no-op.

#[cfg(test)]
pub mod memory;
mod postgres;

pub use postgres::PgFavouriteStore;

use crate::models::{Favourite, NewFavourite};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("{0}")]
    Validation(String),

    #[error("Favourite not found")]
    NotFound,

    #[error("Storage error: {0}")]
    Storage(String),
}

impl From<diesel::result::Error> for StoreError {
    fn from(e: diesel::result::Error) -> Self {
        StoreError::Storage(e.to_string())
    }
}

impl From<diesel::r2d2::PoolError> for StoreError {
    fn from(e: diesel::r2d2::PoolError) -> Self {
        StoreError::Storage(format!("connection pool: {}", e))
    }
}

/// Result of a successful `create`.
#[derive(Debug, Clone, PartialEq)]
pub enum CreateOutcome {
    Created(Favourite),
    AlreadyExists,
}

/// Body of a save request. Everything is optional on the wire so that a
/// missing or mistyped field becomes a validation failure or a default
/// rather than a deserialization error.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FavouriteInput {
    #[schema(value_type = String)]
    pub recipe_id: Option<Value>,
    #[schema(value_type = String)]
    pub title: Option<Value>,
    #[schema(value_type = Option<String>)]
    pub image: Option<Value>,
    #[schema(value_type = Option<String>)]
    pub source_url: Option<Value>,
    #[schema(value_type = Option<f64>)]
    pub calories: Option<Value>,
    #[schema(value_type = Option<f64>)]
    pub ready_in_minutes: Option<Value>,
    #[schema(value_type = Option<Vec<String>>)]
    pub diets: Option<Value>,
}

#[cfg(test)]
impl FavouriteInput {
    /// Convenience constructor for the two required fields.
    pub fn new(recipe_id: &str, title: &str) -> Self {
        Self {
            recipe_id: Some(Value::from(recipe_id)),
            title: Some(Value::from(title)),
            ..Self::default()
        }
    }
}

fn non_empty_string(value: Option<&Value>) -> Option<String> {
    value
        .and_then(Value::as_str)
        .filter(|s| !s.trim().is_empty())
        .map(str::to_string)
}

impl TryFrom<FavouriteInput> for NewFavourite {
    type Error = StoreError;

    /// Validate required fields and apply defaults to the optional ones.
    fn try_from(input: FavouriteInput) -> Result<Self, Self::Error> {
        let (Some(recipe_id), Some(title)) = (
            non_empty_string(input.recipe_id.as_ref()),
            non_empty_string(input.title.as_ref()),
        ) else {
            return Err(StoreError::Validation(
                "Missing recipeId or title".to_string(),
            ));
        };

        let diets = match input.diets {
            Some(Value::Array(items)) => items
                .into_iter()
                .filter_map(|item| match item {
                    Value::String(s) => Some(s),
                    _ => None,
                })
                .collect(),
            _ => Vec::new(),
        };

        Ok(NewFavourite {
            recipe_id,
            title,
            image: non_empty_string(input.image.as_ref()).unwrap_or_default(),
            source_url: non_empty_string(input.source_url.as_ref()).unwrap_or_default(),
            calories: input.calories.as_ref().and_then(Value::as_f64),
            ready_in_minutes: input.ready_in_minutes.as_ref().and_then(Value::as_f64),
            diets,
        })
    }
}

/// Storage for favourites. Implementations must be safe to share across requests.
#[async_trait]
pub trait FavouriteStore: Send + Sync {
    /// All favourites, newest first.
    async fn list(&self) -> Result<Vec<Favourite>, StoreError>;

    /// Insert unless a favourite with the same `recipe_id` already exists.
    async fn insert_if_absent(&self, favourite: NewFavourite) -> Result<CreateOutcome, StoreError>;

    /// Delete by id. `NotFound` if nothing was deleted.
    async fn remove(&self, id: Uuid) -> Result<(), StoreError>;

    /// Validate `input`, then insert it. Invalid input never reaches storage.
    async fn create(&self, input: FavouriteInput) -> Result<CreateOutcome, StoreError> {
        let favourite = NewFavourite::try_from(input)?;
        self.insert_if_absent(favourite).await
    }
}

/// Parse a path id. Ids that cannot have been issued by the store are
/// reported as not found; an empty id is a client error.
pub fn parse_id(id: &str) -> Result<Uuid, StoreError> {
    let id = id.trim();
    if id.is_empty() {
        return Err(StoreError::Validation("Missing id param".to_string()));
    }
    Uuid::parse_str(id).map_err(|_| StoreError::NotFound)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn input(body: Value) -> FavouriteInput {
        serde_json::from_value(body).unwrap()
    }

    #[test]
    fn test_defaults_are_applied() {
        let new = NewFavourite::try_from(input(json!({ "recipeId": "r1", "title": "Soup" }))).unwrap();
        assert_eq!(new.recipe_id, "r1");
        assert_eq!(new.title, "Soup");
        assert_eq!(new.image, "");
        assert_eq!(new.source_url, "");
        assert_eq!(new.calories, None);
        assert_eq!(new.ready_in_minutes, None);
        assert!(new.diets.is_empty());
    }

    #[test]
    fn test_all_fields_are_kept() {
        let new = NewFavourite::try_from(input(json!({
            "recipeId": "r2",
            "title": "Stew",
            "image": "https://img.example/stew.jpg",
            "sourceUrl": "https://food.example/stew",
            "calories": 640.5,
            "readyInMinutes": 90,
            "diets": ["Low-Carb", "Gluten-Free"]
        })))
        .unwrap();
        assert_eq!(new.image, "https://img.example/stew.jpg");
        assert_eq!(new.source_url, "https://food.example/stew");
        assert_eq!(new.calories, Some(640.5));
        assert_eq!(new.ready_in_minutes, Some(90.0));
        assert_eq!(new.diets, vec!["Low-Carb", "Gluten-Free"]);
    }

    #[test]
    fn test_non_array_diets_become_empty() {
        let new = NewFavourite::try_from(input(json!({
            "recipeId": "r3",
            "title": "Salad",
            "diets": "Vegan"
        })))
        .unwrap();
        assert!(new.diets.is_empty());
    }

    #[test]
    fn test_non_numeric_calories_become_null() {
        let new = NewFavourite::try_from(input(json!({
            "recipeId": "r4",
            "title": "Bread",
            "calories": "120",
            "readyInMinutes": null
        })))
        .unwrap();
        assert_eq!(new.calories, None);
        assert_eq!(new.ready_in_minutes, None);
    }

    #[test]
    fn test_missing_required_fields() {
        for body in [
            json!({}),
            json!({ "title": "Soup" }),
            json!({ "recipeId": "r1" }),
            json!({ "recipeId": "", "title": "Soup" }),
            json!({ "recipeId": "r1", "title": "   " }),
            json!({ "recipeId": 7, "title": "Soup" }),
        ] {
            let err = NewFavourite::try_from(input(body.clone())).unwrap_err();
            assert!(matches!(err, StoreError::Validation(_)), "{}", body);
        }
    }

    #[test]
    fn test_parse_id() {
        let id = Uuid::new_v4();
        assert_eq!(parse_id(&id.to_string()).unwrap(), id);
        assert!(matches!(parse_id("not-a-uuid"), Err(StoreError::NotFound)));
        assert!(matches!(parse_id(""), Err(StoreError::Validation(_))));
    }
}
