pub mod error;
pub mod http;
pub mod search;
pub mod types;

pub use error::{FetchError, SearchError};
pub use http::{HttpClient, JsonRequest, MockClient, MockResponse, ReqwestClient};
pub use search::{RecipeApiConfig, SearchGateway};
pub use types::SearchResult;
