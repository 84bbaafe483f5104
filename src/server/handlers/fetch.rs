//! Fetch-and-extract handler.

use std::time::Instant;

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use log::{info, warn};

use super::super::types::{AppState, FetchQuery, FetchResponse};
use crate::error_handling::{ClientError, ErrorSource};

/// `GET /?url=..&parseRegex=..`
///
/// Fetches `url` and returns either its content or, when `parseRegex` is
/// non-empty, the named captures of every match. Every failure yields a JSON
/// `{"error": ..}` body.
pub async fn fetch_handler(
    State(state): State<AppState>,
    query: Result<Query<FetchQuery>, QueryRejection>,
) -> Response {
    let started = Instant::now();

    let query = match query {
        Ok(Query(query)) => query,
        Err(rejection) => {
            return error_response(&ClientError::request(rejection.body_text()));
        }
    };
    let url = query.url.clone().unwrap_or_default();

    match process(&state, query).await {
        Ok(body) => {
            info!(
                "GET {} -> {} in {:.2?}",
                url,
                StatusCode::OK.as_u16(),
                started.elapsed()
            );
            (StatusCode::OK, Json(body)).into_response()
        }
        Err(e) => {
            let response = error_response(&e);
            warn!(
                "GET {} -> {} in {:.2?} ({} error: {})",
                url,
                response.status().as_u16(),
                started.elapsed(),
                e.kind(),
                e
            );
            response
        }
    }
}

async fn process(state: &AppState, query: FetchQuery) -> Result<FetchResponse, ClientError> {
    let url = query.url.unwrap_or_default();
    let content = state.client.fetch_text(&url).await?;

    match query.parse_regex.filter(|pattern| !pattern.is_empty()) {
        None => Ok(FetchResponse::content(content)),
        Some(pattern) => {
            let matches = state.extractor.extract(&pattern, content).await?;
            Ok(FetchResponse::matches(matches))
        }
    }
}

/// Status code for a classified client error.
pub fn status_for(kind: ErrorSource) -> StatusCode {
    match kind {
        ErrorSource::Request => StatusCode::BAD_REQUEST,
        ErrorSource::Configuration | ErrorSource::Unknown => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Message shown to the caller for a classified client error.
pub fn error_message(error: &ClientError) -> String {
    match error.kind() {
        ErrorSource::Request => error.message().to_string(),
        ErrorSource::Configuration => format!("Client configuration error: {}", error.message()),
        ErrorSource::Unknown => {
            format!("Failed to retrieve data using Client: {}", error.message())
        }
    }
}

fn error_response(error: &ClientError) -> Response {
    (
        status_for(error.kind()),
        Json(FetchResponse::error(error_message(error))),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_every_source_maps_to_an_error_status() {
        for kind in ErrorSource::iter() {
            let status = status_for(kind);
            assert!(
                status.is_client_error() || status.is_server_error(),
                "{:?} mapped to {}",
                kind,
                status
            );
        }
    }

    #[test]
    fn test_request_errors_are_client_errors() {
        assert_eq!(status_for(ErrorSource::Request), StatusCode::BAD_REQUEST);
        assert_eq!(
            status_for(ErrorSource::Configuration),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            status_for(ErrorSource::Unknown),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_error_message_prefixes() {
        let request = ClientError::request("The 'url' query parameter is required.");
        assert_eq!(
            error_message(&request),
            "The 'url' query parameter is required."
        );

        let config = ClientError::configuration("Error parsing 'userAgent'");
        assert_eq!(
            error_message(&config),
            "Client configuration error: Error parsing 'userAgent'"
        );

        let unknown = ClientError::new(ErrorSource::Unknown, "stream reset");
        assert_eq!(
            error_message(&unknown),
            "Failed to retrieve data using Client: stream reset"
        );
    }
}
