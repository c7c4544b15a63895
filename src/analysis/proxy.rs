//! Analysis proxy endpoint logic.
//!
//! Turns the query parameters of a proxy request into at most one upstream
//! call and a JSON response. Transport-specific code lives in the
//! `qipu-proxy` binary; this module only maps queries to statuses and
//! bodies.

use log::{info, warn};
use serde_json::{json, Value};

use super::extract::extract_moves;
use super::upstream::{Upstream, UpstreamError, UpstreamRequest};
use crate::protocol::position::{validate_position, PositionError};

/// Decoded proxy query parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProxyQuery {
    pub fen: Option<String>,
    pub game_id: Option<String>,
}

impl ProxyQuery {
    /// Decodes a URL query string (`fen=...&gameId=...`). Empty values count
    /// as absent.
    pub fn from_query_string(query: &str) -> Self {
        let mut result = ProxyQuery::default();
        for (key, value) in form_urlencoded::parse(query.as_bytes()) {
            if value.trim().is_empty() {
                continue;
            }
            match key.as_ref() {
                "fen" => result.fen = Some(value.into_owned()),
                "gameId" => result.game_id = Some(value.into_owned()),
                _ => {}
            }
        }
        result
    }
}

/// Errors a proxy request can fail with.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProxyError {
    #[error("FEN string or gameId is required")]
    MissingInput,

    #[error("Invalid FEN string: {0}")]
    InvalidPosition(#[from] PositionError),

    #[error("ChessDB API error: {0}")]
    UpstreamStatus(u16),

    #[error("Failed to fetch from ChessDB API")]
    UpstreamUnavailable,
}

impl ProxyError {
    /// HTTP status code reported for this error.
    pub fn status(&self) -> u16 {
        match self {
            ProxyError::MissingInput | ProxyError::InvalidPosition(_) => 400,
            ProxyError::UpstreamStatus(_) | ProxyError::UpstreamUnavailable => 500,
        }
    }
}

impl From<UpstreamError> for ProxyError {
    fn from(e: UpstreamError) -> Self {
        match e {
            UpstreamError::Status(code) => ProxyError::UpstreamStatus(code),
            UpstreamError::Transport(_) => ProxyError::UpstreamUnavailable,
        }
    }
}

/// A proxy response ready to be serialized.
#[derive(Debug, Clone, PartialEq)]
pub struct ProxyResponse {
    pub status: u16,
    pub body: Value,
}

impl ProxyResponse {
    fn ok(body: Value) -> Self {
        ProxyResponse { status: 200, body }
    }

    fn error(e: &ProxyError) -> Self {
        ProxyResponse {
            status: e.status(),
            body: json!({ "error": e.to_string() }),
        }
    }
}

/// Forwards analysis queries to an upstream service.
pub struct AnalysisProxy<U> {
    upstream: U,
}

impl<U: Upstream> AnalysisProxy<U> {
    pub fn new(upstream: U) -> Self {
        AnalysisProxy { upstream }
    }

    /// Validates `fen` and fetches every known move for it.
    pub fn query_position(&self, fen: &str) -> Result<String, ProxyError> {
        validate_position(fen)?;
        let request = UpstreamRequest::QueryAll {
            board: fen.to_string(),
        };
        self.fetch(&request)
    }

    /// Fetches the record for `game_id` and extracts its move list.
    pub fn query_game(&self, game_id: &str) -> Result<(String, Vec<String>), ProxyError> {
        let request = UpstreamRequest::Query {
            game_id: game_id.to_string(),
        };
        let data = self.fetch(&request)?;
        let moves = extract_moves(&data);
        Ok((data, moves))
    }

    /// Handles one proxy request. `fen` takes precedence over `gameId`.
    pub fn handle(&self, query: &ProxyQuery) -> ProxyResponse {
        let result = match (&query.fen, &query.game_id) {
            (Some(fen), _) => self
                .query_position(fen)
                .map(|data| json!({ "data": data })),
            (None, Some(game_id)) => self
                .query_game(game_id)
                .map(|(data, moves)| json!({ "data": data, "moves": moves })),
            (None, None) => Err(ProxyError::MissingInput),
        };

        match result {
            Ok(body) => ProxyResponse::ok(body),
            Err(e) => {
                info!("proxy request rejected with {}: {}", e.status(), e);
                ProxyResponse::error(&e)
            }
        }
    }

    fn fetch(&self, request: &UpstreamRequest) -> Result<String, ProxyError> {
        self.upstream.fetch(request).map_err(|e| {
            warn!("{} request failed: {}", request.action(), e);
            ProxyError::from(e)
        })
    }
}
