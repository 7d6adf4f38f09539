//! Outbound HTTP.
//!
//! All calls to third-party APIs go through [`HttpClient`] so the search
//! gateway can be exercised against [`MockClient`] in tests.

mod client;

pub use client::{
    HttpClient, JsonRequest, MockClient, MockResponse, ReqwestClient, ReqwestClientBuilder,
};
