//! HTTP proxy in front of the ChessDB analysis service.
//!
//! Serves a single GET route. Each request is validated and forwarded
//! upstream at most once; requests are handled one at a time.
//!
//! Usage:
//!   qipu-proxy [--host 127.0.0.1] [--port 3000] [--route /api/chessdb]
//!
//! Query parameters:
//!   fen=<position>   forward a queryall request, respond `{ "data" }`
//!   gameId=<id>      forward a query request, respond `{ "data", "moves" }`

use clap::Parser;
use log::{debug, info, warn};
use serde_json::json;
use tiny_http::{Header, Method, Response, Server};

use qipu::analysis::{AnalysisProxy, HttpUpstream, ProxyQuery, ProxyResponse, Upstream};
use qipu::config::{init_logging, ProxyArgs};

fn main() -> anyhow::Result<()> {
    let args = ProxyArgs::parse();
    init_logging(args.log_level);

    let address = args.address();
    let server = Server::http(&address)
        .map_err(|e| anyhow::anyhow!("failed to bind {}: {}", address, e))?;
    let upstream = HttpUpstream::new(args.endpoint.clone());
    info!("proxy listening at {address}, forwarding to {}", upstream.endpoint());

    let proxy = AnalysisProxy::new(upstream);

    for request in server.incoming_requests() {
        debug!("{} {}", request.method(), request.url());
        let response = route(&proxy, &args.route, request.method(), request.url());

        let json = Header::from_bytes(&b"Content-Type"[..], &b"application/json"[..]);
        let mut reply =
            Response::from_string(response.body.to_string()).with_status_code(response.status);
        if let Ok(header) = json {
            reply = reply.with_header(header);
        }
        if let Err(e) = request.respond(reply) {
            warn!("failed to send response: {e}");
        }
    }

    Ok(())
}

/// Maps a request line to a proxy response.
fn route<U: Upstream>(
    proxy: &AnalysisProxy<U>,
    prefix: &str,
    method: &Method,
    url: &str,
) -> ProxyResponse {
    let (path, query) = url.split_once('?').unwrap_or((url, ""));

    if path != prefix {
        return ProxyResponse {
            status: 404,
            body: json!({ "error": "Not found" }),
        };
    }
    if *method != Method::Get {
        return ProxyResponse {
            status: 405,
            body: json!({ "error": "Method not allowed" }),
        };
    }

    proxy.handle(&ProxyQuery::from_query_string(query))
}
