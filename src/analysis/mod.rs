//! Position analysis through the ChessDB cloud service.
//!
//! The proxy validates a query, forwards a single request upstream and
//! wraps the raw answer in JSON.

pub mod extract;
pub mod proxy;
pub mod upstream;

pub use extract::extract_moves;
pub use proxy::{AnalysisProxy, ProxyError, ProxyQuery, ProxyResponse};
pub use upstream::{HttpUpstream, Upstream, UpstreamError, UpstreamRequest, DEFAULT_ENDPOINT};
