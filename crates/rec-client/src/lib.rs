//! HTTP client for the GitGraph recommendation service.
//!
//! This crate provides a Rust client for the recommendation endpoint. It
//! handles:
//! - Building the request URL (the username is encoded as one path segment)
//! - Deserializing the response body into session types
//! - Mapping transport, server and schema failures to distinct error kinds
//!
//! The service contract is small: `GET {base_url}/recommend/{username}`
//! returns `{"recommendations": [...], "similarity_scores": [...]}` on
//! success, and on failure a JSON body whose optional `detail` field carries
//! a human-readable reason. An optional `top_k` query parameter bounds the
//! number of recommendations (service default: 10).

use anyhow::{Context, Result};
use reqwest::{Client, StatusCode, Url};
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, warn};

use session::Recommendation;

/// Shown for a non-success response that carries no `detail` of its own.
pub const SERVER_ERROR_FALLBACK: &str = "An error occurred on the server";

/// Errors that can occur when requesting recommendations.
///
/// The `Display` of each variant is exactly what the form shows the user, so
/// a server-provided `detail` is rendered verbatim and without any prefix.
#[derive(Error, Debug)]
pub enum RecClientError {
    /// The request never produced an HTTP response (connect, DNS, read).
    #[error("Failed to reach recommendation service: {0}")]
    Transport(#[from] reqwest::Error),

    /// The service answered with a non-success status.
    #[error("{}", .detail.as_deref().unwrap_or(SERVER_ERROR_FALLBACK))]
    Server {
        status: StatusCode,
        detail: Option<String>,
    },

    /// The service answered with a success status but the body did not match
    /// the expected schema.
    #[error("Malformed response from recommendation service: {0}")]
    MalformedResponse(String),
}

/// Success-path response body.
#[derive(Debug, Deserialize)]
struct RecommendResponse {
    recommendations: Vec<String>,
    similarity_scores: Option<Vec<f32>>,
}

/// Failure-path response body; `detail` is optional.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    detail: Option<String>,
}

/// Client for the recommendation service.
///
/// Wraps a shared `reqwest::Client`; cloning is cheap. No request timeout is
/// configured, so a request against a hung service pends until it settles.
#[derive(Clone)]
pub struct RecommendClient {
    http: Client,
    base_url: String,
}

impl RecommendClient {
    /// Create a client for the service at `base_url`
    /// (e.g., "http://localhost:8000").
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let base_url = base_url.into();
        Url::parse(&base_url).context("Invalid recommendation service URL")?;

        let http = Client::builder()
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Fetch recommendations for a GitHub username.
    ///
    /// # Arguments
    /// * `username` - The GitHub username to recommend repositories for
    /// * `limit` - Optional bound on the number of recommendations (`top_k`)
    ///
    /// # Returns
    /// Recommendations in the order the service ranked them, each paired
    /// with its similarity score when the service reported one.
    pub async fn recommend(
        &self,
        username: &str,
        limit: Option<u32>,
    ) -> std::result::Result<Vec<Recommendation>, RecClientError> {
        let url = format!(
            "{}/recommend/{}",
            self.base_url,
            encode_path_segment(username)
        );
        debug!("Requesting recommendations for '{}' from {}", username, url);

        let mut request = self.http.get(&url);
        if let Some(limit) = limit {
            request = request.query(&[("top_k", limit)]);
        }

        let response = request.send().await?;
        let status = response.status();

        if !status.is_success() {
            let detail = response
                .text()
                .await
                .ok()
                .and_then(|body| serde_json::from_str::<ErrorBody>(&body).ok())
                .and_then(|body| body.detail);
            warn!(
                "Recommendation request for '{}' failed with status {}",
                username, status
            );
            return Err(RecClientError::Server { status, detail });
        }

        let body = response.text().await?;
        let parsed: RecommendResponse = serde_json::from_str(&body)
            .map_err(|e| RecClientError::MalformedResponse(e.to_string()))?;

        let scores = parsed.similarity_scores.unwrap_or_default();
        let recommendations: Vec<Recommendation> = parsed
            .recommendations
            .into_iter()
            .enumerate()
            .map(|(i, repo)| match scores.get(i) {
                Some(score) => Recommendation::new(repo).with_score(*score),
                None => Recommendation::new(repo),
            })
            .collect();

        debug!(
            "Received {} recommendations for '{}'",
            recommendations.len(),
            username
        );
        Ok(recommendations)
    }

    /// Get the base URL this client talks to.
    pub fn service_address(&self) -> &str {
        &self.base_url
    }
}

/// Percent-encode a username so it travels as exactly one path segment.
///
/// The source this service was built for interpolated the username into the
/// URL unencoded, which breaks for reserved characters; encoding here makes
/// that case well-defined.
fn encode_path_segment(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for byte in s.bytes() {
        match byte {
            b'a'..=b'z' | b'A'..=b'Z' | b'0'..=b'9' | b'-' | b'.' | b'_' | b'~' => {
                out.push(byte as char)
            }
            _ => out.push_str(&format!("%{:02X}", byte)),
        }
    }
    out
}
