//! Cloud analysis service client.
//!
//! The proxy forwards each request to the ChessDB query endpoint exactly
//! once. The `Upstream` trait is the seam between the proxy logic and the
//! network so the former can be exercised without one.

use log::debug;

/// Default ChessDB query endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://www.chessdb.cn/chessdb.php";

/// One outbound request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpstreamRequest {
    /// All known moves and scores for a position string.
    QueryAll { board: String },
    /// The stored record for an identifier.
    Query { game_id: String },
}

impl UpstreamRequest {
    /// Returns the `action` query parameter value.
    pub fn action(&self) -> &'static str {
        match self {
            UpstreamRequest::QueryAll { .. } => "queryall",
            UpstreamRequest::Query { .. } => "query",
        }
    }

    /// Returns the `board` query parameter value.
    pub fn board(&self) -> &str {
        match self {
            UpstreamRequest::QueryAll { board } => board,
            UpstreamRequest::Query { game_id } => game_id,
        }
    }
}

/// Errors from the outbound request.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UpstreamError {
    #[error("upstream returned status {0}")]
    Status(u16),

    #[error("upstream request failed: {0}")]
    Transport(String),
}

/// Something that can answer analysis requests with a raw text body.
pub trait Upstream {
    fn fetch(&self, request: &UpstreamRequest) -> Result<String, UpstreamError>;
}

impl<T: Upstream + ?Sized> Upstream for &T {
    fn fetch(&self, request: &UpstreamRequest) -> Result<String, UpstreamError> {
        (**self).fetch(request)
    }
}

impl<T: Upstream + ?Sized> Upstream for Box<T> {
    fn fetch(&self, request: &UpstreamRequest) -> Result<String, UpstreamError> {
        (**self).fetch(request)
    }
}

/// Blocking HTTP client for the ChessDB endpoint.
pub struct HttpUpstream {
    agent: ureq::Agent,
    endpoint: String,
}

impl HttpUpstream {
    pub fn new(endpoint: impl Into<String>) -> Self {
        HttpUpstream {
            agent: ureq::Agent::new(),
            endpoint: endpoint.into(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl Upstream for HttpUpstream {
    fn fetch(&self, request: &UpstreamRequest) -> Result<String, UpstreamError> {
        debug!(
            "GET {} action={} board={}",
            self.endpoint,
            request.action(),
            request.board()
        );
        let response = self
            .agent
            .get(&self.endpoint)
            .query("action", request.action())
            .query("board", request.board())
            .call();

        match response {
            Ok(response) => response
                .into_string()
                .map_err(|e| UpstreamError::Transport(e.to_string())),
            Err(ureq::Error::Status(code, _)) => Err(UpstreamError::Status(code)),
            Err(ureq::Error::Transport(e)) => Err(UpstreamError::Transport(e.to_string())),
        }
    }
}
