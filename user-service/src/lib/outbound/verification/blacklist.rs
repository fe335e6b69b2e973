use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Deserialize;
use serde::Serialize;

use crate::config::BlacklistConfig;
use crate::domain::user::models::VerificationOutcome;
use crate::domain::user::ports::IdentityVerifier;
use crate::user::errors::VerificationError;

const CHECK_PATH: &str = "/check-blacklist";
const BLACKLISTED_REASON: &str = "Listed by the blacklist service";

/// HTTP client for the external blacklist service.
///
/// Posts `{first_name, last_name, email}` to `{base_url}/check-blacklist`
/// and expects `201 Created` with `{is_in_blacklist}`.
pub struct HttpBlacklistClient {
    base_url: String,
    client: reqwest::Client,
}

#[derive(Debug, Serialize)]
struct CheckBlacklistRequest<'a> {
    first_name: &'a str,
    last_name: String,
    email: &'a str,
}

#[derive(Debug, Deserialize)]
struct CheckBlacklistResponse {
    is_in_blacklist: bool,
}

impl HttpBlacklistClient {
    /// # Errors
    /// * `RequestFailed` - HTTP client could not be built
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, VerificationError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| VerificationError::RequestFailed(e.to_string()))?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    pub fn from_config(config: &BlacklistConfig) -> Result<Self, VerificationError> {
        Self::new(
            &config.base_url,
            Duration::from_secs(config.timeout_seconds),
        )
    }
}

/// Split a display name into the remote API's first/last name fields.
///
/// First whitespace-separated token is the first name, the rest joined by
/// single spaces is the last name.
fn split_name(name: &str) -> (&str, String) {
    let mut parts = name.split_whitespace();
    match parts.next() {
        Some(first) => (first, parts.collect::<Vec<_>>().join(" ")),
        None => (name, String::new()),
    }
}

#[async_trait]
impl IdentityVerifier for HttpBlacklistClient {
    async fn check(
        &self,
        _id_number: &str,
        name: &str,
        email: &str,
    ) -> Result<VerificationOutcome, VerificationError> {
        let (first_name, last_name) = split_name(name);
        let request = CheckBlacklistRequest {
            first_name,
            last_name,
            email,
        };

        let response = self
            .client
            .post(format!("{}{}", self.base_url, CHECK_PATH))
            .json(&request)
            .send()
            .await
            .map_err(|e| VerificationError::RequestFailed(e.to_string()))?;

        if response.status() != StatusCode::CREATED {
            return Err(VerificationError::UnexpectedStatus(response.status().as_u16()));
        }

        let body: CheckBlacklistResponse = response
            .json()
            .await
            .map_err(|e| VerificationError::InvalidResponse(e.to_string()))?;

        tracing::debug!(
            email = %email,
            is_in_blacklist = body.is_in_blacklist,
            "Blacklist check completed"
        );

        if body.is_in_blacklist {
            Ok(VerificationOutcome::blacklisted(BLACKLISTED_REASON))
        } else {
            Ok(VerificationOutcome::clean())
        }
    }
}
