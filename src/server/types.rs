//! Fetch endpoint data structures.

use serde::{Deserialize, Serialize};

use crate::extract::{Extractor, NamedCaptures};
use crate::fetch::FetchClient;

/// Shared state for the fetch endpoint
#[derive(Debug, Clone)]
pub struct AppState {
    pub client: FetchClient,
    pub extractor: Extractor,
}

impl AppState {
    pub fn new(client: FetchClient) -> Self {
        Self {
            client,
            extractor: Extractor::default(),
        }
    }
}

/// Query parameters of `GET /`
///
/// Both fields are optional at the extraction layer so that a missing `url`
/// is reported with the same JSON error body as an empty one.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FetchQuery {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub parse_regex: Option<String>,
}

/// JSON response for `GET /`
///
/// Exactly one field is populated; the others are omitted.
#[derive(Debug, Default, Serialize)]
pub struct FetchResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub matches: Option<Vec<NamedCaptures>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl FetchResponse {
    pub fn content(content: String) -> Self {
        Self {
            content: Some(content),
            ..Default::default()
        }
    }

    pub fn matches(matches: Vec<NamedCaptures>) -> Self {
        Self {
            matches: Some(matches),
            ..Default::default()
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            error: Some(message.into()),
            ..Default::default()
        }
    }
}
