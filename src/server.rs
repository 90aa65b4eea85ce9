//! HTTP game server.
//!
//! - `GET /drivers`: driver names in random order, for autocomplete.
//! - `GET /game`: today's answer (can be disabled).
//! - `POST /game`: judge a guess `{ "name": ... }`.

use std::sync::Arc;

use axum::body::Body;
use axum::extract::State;
use axum::http::{Request, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use chrono::NaiveDate;
use gridle_rules::{GuessResult, RulesError, judge_guess, select_target, utc_today};
use serde::{Deserialize, Serialize};
use tower::ServiceBuilder;
use tracing::{debug, error, info, instrument, warn};

use crate::roster::{RosterError, RosterProvider};

/// Body of `POST /game`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GuessRequest {
    /// Driver name as typed by the player.
    pub name: String,
}

/// Error body returned by every failing route.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    /// Human-readable message.
    pub error: String,
}

/// Failure of a request, mapped onto an HTTP status.
#[derive(Debug, derive_more::Display, derive_more::From)]
pub enum ApiError {
    /// Rules rejected the request.
    #[display("{}", _0)]
    Rules(RulesError),
    /// The roster provider failed.
    #[display("{}", _0)]
    Roster(RosterError),
    /// `GET /game` is disabled by configuration.
    #[display("Answer route is disabled")]
    AnswerHidden,
}

impl ApiError {
    /// HTTP status for this error.
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Rules(RulesError::DriverNotFound(_)) | ApiError::AnswerHidden => {
                StatusCode::NOT_FOUND
            }
            ApiError::Rules(_) | ApiError::Roster(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message sent to the client.
    pub fn message(&self) -> String {
        match self {
            ApiError::Rules(RulesError::DriverNotFound(_)) => "Driver not found".to_string(),
            ApiError::Rules(RulesError::EmptyRoster) => "No driver available today".to_string(),
            ApiError::Rules(RulesError::CorruptedSession(_)) => "Internal error".to_string(),
            ApiError::Roster(_) => "Roster unavailable".to_string(),
            ApiError::AnswerHidden => "Not found".to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(error = %self, %status, "Request failed");
        } else {
            warn!(error = %self, %status, "Request rejected");
        }
        (status, Json(ErrorBody { error: self.message() })).into_response()
    }
}

/// Shared, read-only server state.
#[derive(Clone)]
pub struct GameServer {
    roster: Arc<dyn RosterProvider>,
    reveal_answer: bool,
    fixed_day: Option<NaiveDate>,
}

impl std::fmt::Debug for GameServer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameServer")
            .field("reveal_answer", &self.reveal_answer)
            .field("fixed_day", &self.fixed_day)
            .finish_non_exhaustive()
    }
}

impl GameServer {
    /// Creates a server over `roster`, answering for the current UTC day.
    pub fn new(roster: impl RosterProvider + 'static) -> Self {
        info!("Creating game server");
        Self {
            roster: Arc::new(roster),
            reveal_answer: true,
            fixed_day: None,
        }
    }

    /// Enables or disables `GET /game`.
    #[must_use]
    pub fn with_reveal_answer(mut self, reveal_answer: bool) -> Self {
        self.reveal_answer = reveal_answer;
        self
    }

    /// Pins the puzzle day instead of reading the clock.
    #[must_use]
    pub fn with_fixed_day(mut self, day: NaiveDate) -> Self {
        self.fixed_day = Some(day);
        self
    }

    /// Puzzle day: the pinned day, or today in UTC.
    pub fn today(&self) -> NaiveDate {
        self.fixed_day.unwrap_or_else(utc_today)
    }

    /// Builds the router.
    pub fn router(self) -> Router {
        Router::new()
            .route("/drivers", get(list_drivers))
            .route("/game", get(reveal_target).post(submit_guess))
            .layer(ServiceBuilder::new().map_request(|req: Request<Body>| {
                debug!(method = %req.method(), uri = %req.uri(), "Incoming HTTP request");
                req
            }))
            .with_state(self)
    }

    /// Binds `host:port` and serves until the process exits.
    ///
    /// # Errors
    ///
    /// Returns an error if the address cannot be bound or the server fails.
    #[instrument(skip(self))]
    pub async fn serve(self, host: &str, port: u16) -> anyhow::Result<()> {
        if self.reveal_answer {
            warn!("GET /game reveals today's answer to any caller");
        }

        let listener = tokio::net::TcpListener::bind((host, port)).await?;
        info!("Server ready at http://{}:{}/", host, port);

        axum::serve(listener, self.router()).await?;
        Ok(())
    }
}

/// `GET /drivers`
#[instrument(skip(server))]
async fn list_drivers(State(server): State<GameServer>) -> Result<Json<Vec<String>>, ApiError> {
    let roster = server.roster.roster().await?;
    let names = roster.shuffled_names(&mut rand::rng());
    debug!(count = names.len(), "Listing driver names");
    Ok(Json(names))
}

/// `GET /game`
#[instrument(skip(server))]
async fn reveal_target(State(server): State<GameServer>) -> Result<Json<String>, ApiError> {
    if !server.reveal_answer {
        return Err(ApiError::AnswerHidden);
    }

    let roster = server.roster.roster().await?;
    let target = select_target(&roster, server.today())?;
    info!("Answer revealed");
    Ok(Json(target.name().clone()))
}

/// `POST /game`
#[instrument(skip(server, request), fields(guess = %request.name))]
async fn submit_guess(
    State(server): State<GameServer>,
    Json(request): Json<GuessRequest>,
) -> Result<Json<GuessResult>, ApiError> {
    let roster = server.roster.roster().await?;
    let result = judge_guess(&roster, &request.name, server.today())?;
    info!(is_correct = result.is_correct, "Guess judged");
    Ok(Json(result))
}
