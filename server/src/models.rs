use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

/// A saved recipe. Never updated after insertion.
#[derive(Queryable, Selectable, Debug, Clone, PartialEq, Serialize, ToSchema)]
#[diesel(table_name = crate::schema::favourites)]
#[diesel(check_for_backend(diesel::pg::Pg))]
#[serde(rename_all = "camelCase")]
pub struct Favourite {
    pub id: Uuid,
    pub recipe_id: String,
    pub title: String,
    pub image: String,
    pub source_url: String,
    pub calories: Option<f64>,
    pub ready_in_minutes: Option<f64>,
    pub diets: Vec<String>,
    pub created_at: DateTime<Utc>,
}

/// A favourite that passed validation and has its defaults filled in.
#[derive(Insertable, Debug, Clone, PartialEq)]
#[diesel(table_name = crate::schema::favourites)]
pub struct NewFavourite {
    pub recipe_id: String,
    pub title: String,
    pub image: String,
    pub source_url: String,
    pub calories: Option<f64>,
    pub ready_in_minutes: Option<f64>,
    pub diets: Vec<String>,
}
