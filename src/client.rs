//! HTTP client for the game server.

use derive_more::{Display, Error};
use gridle_rules::GuessResult;
use reqwest::StatusCode;
use tracing::{debug, info, instrument, warn};

use crate::server::GuessRequest;

/// Client-side failure talking to the game server.
#[derive(Debug, Clone, Display, Error)]
#[display("Client error: {} at {}:{}", message, file, line)]
pub struct ClientError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ClientError {
    /// Creates a new client error.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}

impl From<reqwest::Error> for ClientError {
    #[track_caller]
    fn from(err: reqwest::Error) -> Self {
        Self::new(format!("HTTP request failed: {}", err))
    }
}

/// Server verdict on a submitted name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuessReply {
    /// The name resolved to a driver and was scored.
    Judged(GuessResult),
    /// No driver has that name; no attempt was consumed.
    NotFound,
}

/// Type-safe client for the game's REST routes.
#[derive(Debug, Clone)]
pub struct GameClient {
    base_url: String,
    client: reqwest::Client,
}

impl GameClient {
    /// Creates a client for the server at `base_url`.
    #[instrument(skip_all, fields(base_url = %base_url.as_ref()))]
    pub fn new(base_url: impl AsRef<str>) -> Self {
        info!("Creating game client");
        Self {
            base_url: base_url.as_ref().trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
        }
    }

    /// Base URL without a trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetches the autocomplete name list.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] on transport failure or a non-success status.
    #[instrument(skip(self))]
    pub async fn driver_names(&self) -> Result<Vec<String>, ClientError> {
        let response = self
            .client
            .get(format!("{}/drivers", self.base_url))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ClientError::new(format!(
                "Name list unavailable: HTTP {}",
                response.status()
            )));
        }

        let names: Vec<String> = response.json().await?;
        debug!(count = names.len(), "Fetched driver names");
        Ok(names)
    }

    /// Submits a guess.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] on transport failure or any status other
    /// than success or 404.
    #[instrument(skip(self))]
    pub async fn submit_guess(&self, name: &str) -> Result<GuessReply, ClientError> {
        let response = self
            .client
            .post(format!("{}/game", self.base_url))
            .json(&GuessRequest {
                name: name.to_string(),
            })
            .send()
            .await?;

        match response.status() {
            status if status == StatusCode::NOT_FOUND => {
                debug!("Server does not know this driver");
                Ok(GuessReply::NotFound)
            }
            status if status.is_success() => {
                let result: GuessResult = response.json().await?;
                debug!(is_correct = result.is_correct, "Guess judged");
                Ok(GuessReply::Judged(result))
            }
            status => {
                let body = response.text().await.unwrap_or_default();
                warn!(%status, body = %body, "Guess rejected");
                Err(ClientError::new(format!("Guess failed: HTTP {} {}", status, body)))
            }
        }
    }

    /// Fetches today's answer.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] if the route is disabled or unreachable.
    #[instrument(skip(self))]
    pub async fn reveal_answer(&self) -> Result<String, ClientError> {
        let response = self
            .client
            .get(format!("{}/game", self.base_url))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ClientError::new(format!(
                "Answer unavailable: HTTP {}",
                response.status()
            )));
        }

        Ok(response.json().await?)
    }
}
