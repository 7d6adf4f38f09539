//! Conversion of Edamam `hits[].recipe` objects into [`SearchResult`]s.
//!
//! The upstream body is handled as loose JSON: a field with the wrong type is
//! treated as absent rather than failing the whole search.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde_json::Value;

use crate::error::SearchError;
use crate::types::SearchResult;

pub const UNTITLED_RECIPE: &str = "Untitled recipe";

/// Characters left alone by JavaScript's `encodeURIComponent`.
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Percent-encode a recipe URI so it can be used as an opaque id.
pub fn encode_recipe_id(uri: &str) -> String {
    utf8_percent_encode(uri, URI_COMPONENT).to_string()
}

/// Normalise a full search response body. A missing `hits` array means no results.
pub fn normalize_response(body: &Value) -> Result<Vec<SearchResult>, SearchError> {
    let Some(object) = body.as_object() else {
        return Err(SearchError::MalformedResponse(
            "response body is not a JSON object".to_string(),
        ));
    };

    let hits = match object.get("hits") {
        None | Some(Value::Null) => return Ok(Vec::new()),
        Some(Value::Array(hits)) => hits,
        Some(_) => {
            return Err(SearchError::MalformedResponse(
                "`hits` is not an array".to_string(),
            ))
        }
    };

    Ok(hits
        .iter()
        .map(|hit| normalize_recipe(hit.get("recipe").unwrap_or(&Value::Null)))
        .collect())
}

/// Normalise a single upstream recipe object.
pub fn normalize_recipe(recipe: &Value) -> SearchResult {
    let text = |key: &str| {
        recipe
            .get(key)
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
    };

    let mut diets = string_list(recipe.get("dietLabels"));
    diets.extend(string_list(recipe.get("healthLabels")));

    SearchResult {
        recipe_id: encode_recipe_id(text("uri").unwrap_or_default()),
        title: text("label").unwrap_or(UNTITLED_RECIPE).to_string(),
        image: text("image").unwrap_or_default().to_string(),
        source_url: text("url").unwrap_or_default().to_string(),
        calories: recipe.get("calories").and_then(Value::as_f64),
        ready_in_minutes: recipe
            .get("totalTime")
            .and_then(Value::as_f64)
            .filter(|minutes| *minutes > 0.0),
        diets,
    }
}

fn string_list(value: Option<&Value>) -> Vec<String> {
    match value {
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(|item| item.as_str().map(str::to_string))
            .collect(),
        _ => Vec::new(),
    }
}
