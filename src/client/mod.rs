use crate::models::profile::UserProfile;
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, USER_AGENT};
use reqwest::{Client, Method, RequestBuilder};
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_API_BASE: &str = "https://api.github.com";

/// The only message ever shown to the user for a failed lookup.
pub const USER_NOT_FOUND_MESSAGE: &str = "GitHub user not found";

/// Why a lookup failed. Only used for diagnostics; every variant is
/// presented to the user as [`USER_NOT_FOUND_MESSAGE`].
#[derive(Debug, Error)]
pub enum LookupError {
    #[error("profile service answered with status {status}")]
    NotFound { status: u16 },

    #[error("request to profile service failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("profile response could not be parsed: {0}")]
    MalformedResponse(#[from] serde_json::Error),
}

impl LookupError {
    pub fn user_message(&self) -> &'static str {
        USER_NOT_FOUND_MESSAGE
    }
}

/// Anything that can resolve a handle to a profile.
#[async_trait]
pub trait ProfileSource: Send + Sync {
    async fn fetch_user(&self, handle: &str) -> Result<UserProfile, LookupError>;
}

#[derive(Clone, Debug)]
pub struct GitHubClient {
    client: Client,
    host: String,
    encode_handle: bool,
}

impl GitHubClient {
    pub fn new(host: String, timeout: Option<Duration>, encode_handle: bool) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, HeaderValue::from_static("devradar"));
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("application/vnd.github+json"),
        );

        let mut builder = Client::builder().default_headers(headers);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().context("Failed to build reqwest client")?;

        Ok(Self {
            client,
            host,
            encode_handle,
        })
    }

    fn request(&self, method: Method, endpoint: &str) -> RequestBuilder {
        let url = format!(
            "{}/{}",
            self.host.trim_end_matches('/'),
            endpoint.trim_start_matches('/')
        );
        self.client.request(method, &url)
    }

    fn user_endpoint(&self, handle: &str) -> String {
        if self.encode_handle {
            format!("users/{}", urlencoding::encode(handle))
        } else {
            format!("users/{}", handle)
        }
    }
}

#[async_trait]
impl ProfileSource for GitHubClient {
    async fn fetch_user(&self, handle: &str) -> Result<UserProfile, LookupError> {
        let endpoint = self.user_endpoint(handle);
        let response = self.request(Method::GET, &endpoint).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(LookupError::NotFound {
                status: status.as_u16(),
            });
        }

        let body = response.text().await?;
        tracing::debug!(handle, payload = %body, "profile response");

        let profile = serde_json::from_str::<UserProfile>(&body)?;
        Ok(profile)
    }
}
