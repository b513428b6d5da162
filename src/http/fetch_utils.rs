//! Single-shot HTTP requests with status-code classification.
//!
//! Every request is sent exactly once: there is no retry, no backoff and no
//! response cache. A non-success status or an unparsable body is turned into
//! the matching `AppError` variant and returned to the caller.

use reqwest::{Client, Response};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, error, info, instrument};

use crate::error::AppError;

/// Sends a GET request and parses the JSON body into `T`.
#[instrument(skip(client))]
pub async fn get_json<T: DeserializeOwned>(client: &Client, url: &str) -> Result<T, AppError> {
    info!("Fetching data from URL: {url}");

    let response = client
        .get(url)
        .send()
        .await
        .map_err(|e| transport_error(e, url))?;

    let body = read_success_body(response, url).await?;
    parse_body(&body, url)
}

/// Sends a GET request and returns the body as text. Used for the CSV
/// downloads; invalid UTF-8 is replaced rather than rejected.
#[instrument(skip(client))]
pub async fn get_text(client: &Client, url: &str) -> Result<String, AppError> {
    info!("Fetching text from URL: {url}");

    let response = client
        .get(url)
        .send()
        .await
        .map_err(|e| transport_error(e, url))?;

    read_success_body(response, url).await
}

/// Sends a POST request with a JSON body and bearer authentication, and
/// parses the JSON response into `T`.
#[instrument(skip(client, bearer_token, body))]
pub async fn post_json<B, T>(
    client: &Client,
    url: &str,
    bearer_token: &str,
    body: &B,
) -> Result<T, AppError>
where
    B: Serialize + ?Sized,
    T: DeserializeOwned,
{
    info!("Posting request to URL: {url}");

    let response = client
        .post(url)
        .bearer_auth(bearer_token)
        .json(body)
        .send()
        .await
        .map_err(|e| transport_error(e, url))?;

    let body = read_success_body(response, url).await?;
    parse_body(&body, url)
}

fn transport_error(e: reqwest::Error, url: &str) -> AppError {
    error!("Request failed for URL {}: {}", url, e);
    if e.is_timeout() {
        AppError::network_timeout(url)
    } else if e.is_connect() {
        AppError::network_connection(url, e.to_string())
    } else {
        AppError::ApiFetch(e)
    }
}

/// Checks the status code and returns the body text of a successful response.
async fn read_success_body(response: Response, url: &str) -> Result<String, AppError> {
    let status = response.status();
    debug!("Response status: {status}");

    if !status.is_success() {
        let status_code = status.as_u16();
        let reason = status.canonical_reason().unwrap_or("Unknown error");
        let detail: String = response
            .text()
            .await
            .unwrap_or_default()
            .chars()
            .take(200)
            .collect();

        error!("HTTP {} - {} (URL: {}) {}", status_code, reason, url, detail);

        return Err(match status_code {
            404 => AppError::api_not_found(url),
            429 => AppError::api_rate_limit(reason, url),
            400..=499 => AppError::api_client_error(status_code, reason, url),
            _ => AppError::api_server_error(status_code, reason, url),
        });
    }

    match response.text().await {
        Ok(text) => {
            debug!("Response length: {} bytes", text.len());
            Ok(text)
        }
        Err(e) => {
            error!("Failed to read response text from URL {}: {}", url, e);
            Err(AppError::ApiFetch(e))
        }
    }
}

/// Parses a response body, telling empty, non-JSON and wrongly shaped bodies apart.
pub(crate) fn parse_body<T: DeserializeOwned>(text: &str, url: &str) -> Result<T, AppError> {
    match serde_json::from_str::<T>(text) {
        Ok(parsed) => Ok(parsed),
        Err(e) => {
            error!("Failed to parse API response: {} (URL: {})", e, url);
            error!(
                "Response text (first 200 chars): {}",
                text.chars().take(200).collect::<String>()
            );

            let trimmed = text.trim_start();
            if trimmed.is_empty() {
                Err(AppError::api_no_data("Response body is empty", url))
            } else if !trimmed.starts_with('{') && !trimmed.starts_with('[') && trimmed != "null" {
                Err(AppError::api_malformed_json("Response is not valid JSON", url))
            } else {
                Err(AppError::api_unexpected_structure(e.to_string(), url))
            }
        }
    }
}
