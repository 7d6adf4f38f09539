use thiserror::Error;

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    #[error("Upstream returned HTTP {status}")]
    Status { status: u16, body: String },

    #[error("Invalid JSON in response: {0}")]
    InvalidJson(String),
}

#[derive(Error, Debug)]
pub enum SearchError {
    #[error("Missing 'ingredients' query param")]
    MissingIngredients,

    #[error("Recipe search failed: {0}")]
    Upstream(#[from] FetchError),

    #[error("Unexpected response shape: {0}")]
    MalformedResponse(String),
}

impl SearchError {
    /// True when the caller supplied bad input, as opposed to the upstream failing.
    pub fn is_client_error(&self) -> bool {
        matches!(self, SearchError::MissingIngredients)
    }
}
