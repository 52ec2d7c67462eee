//! Remote (HTTP/HTTPS) source.

use reqwest::{Client, Response, StatusCode};
use tracing::{debug, info, warn};

use crate::config::SourceConfig;
use crate::error::SourceError;
use crate::strategy::decode_text;

/// Fetch `url` with a single GET and return its body as text.
///
/// Only `200 OK` counts as success. Redirects follow the client default;
/// there is no retry and no timeout.
///
/// # Errors
///
/// - `SourceError::Request` if no response was received (DNS, connect, bad URL)
/// - `SourceError::Status` for any status other than 200
/// - `SourceError::Body` if the body could not be read
/// - `SourceError::TooLarge` if the body exceeds `config.max_body_size`
pub async fn fetch_resource(url: &str, config: &SourceConfig) -> Result<String, SourceError> {
    info!("Fetching URL resource: {url}");

    let client = Client::builder()
        .user_agent(config.user_agent.as_str())
        .build()
        .map_err(|source| SourceError::Request {
            url: url.to_owned(),
            source,
        })?;

    let response = client
        .get(url)
        .send()
        .await
        .map_err(|source| SourceError::Request {
            url: url.to_owned(),
            source,
        })?;

    let status = response.status();
    if status != StatusCode::OK {
        warn!(url, status = status.as_u16(), "URL resource returned non-200 status");
        return Err(SourceError::Status {
            url: url.to_owned(),
            status: status.as_u16(),
        });
    }

    read_body(response, url, config).await
}

/// Collect the response body, enforcing `max_body_size` as chunks arrive.
async fn read_body(
    mut response: Response,
    url: &str,
    config: &SourceConfig,
) -> Result<String, SourceError> {
    let too_large = || SourceError::TooLarge {
        locator: url.to_owned(),
        limit: config.max_body_size,
    };

    if let Some(len) = response.content_length()
        && len > config.max_body_size
    {
        return Err(too_large());
    }

    let mut body = Vec::new();
    while let Some(chunk) = response
        .chunk()
        .await
        .map_err(|source| SourceError::Body {
            url: url.to_owned(),
            source,
        })?
    {
        if (body.len() + chunk.len()) as u64 > config.max_body_size {
            return Err(too_large());
        }
        body.extend_from_slice(&chunk);
    }

    debug!(url, bytes = body.len(), "URL resource received");
    Ok(decode_text(body))
}
