// Connection handling module
// Serves a single TCP connection to completion

use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::{Duration, Instant};

use hyper::body::{Body, Incoming};
use hyper::header;
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper::{Request, Response};
use hyper_util::rt::{TokioIo, TokioTimer};
use tokio::net::TcpStream;

use crate::config::AppState;
use crate::handler;
use crate::http::{self, ResponseBody};
use crate::logger::{self, AccessLogEntry};

/// Serve one connection, returning once it is closed.
///
/// Keep-alive is off, so each connection carries exactly one request and
/// the accept loop moves on as soon as that response is written. Only the
/// request head is under a deadline; a response body takes as long as the
/// client needs to read it.
pub async fn serve_connection(stream: TcpStream, peer_addr: SocketAddr, state: &Arc<AppState>) {
    let header_timeout = state.config.performance.header_read_timeout;

    let mut builder = http1::Builder::new();
    builder.keep_alive(false);

    if header_timeout > 0 {
        let deadline = Duration::from_secs(header_timeout);
        // A client that never sends a byte must not hold the loop either
        if tokio::time::timeout(deadline, stream.readable()).await.is_err() {
            logger::log_warning(&format!(
                "Connection from {peer_addr} sent nothing within {header_timeout} seconds"
            ));
            return;
        }
        // hyper only enforces the header deadline when a timer is installed
        builder.timer(TokioTimer::new()).header_read_timeout(deadline);
    }

    let io = TokioIo::new(stream);

    let service_state = Arc::clone(state);
    let conn = builder.serve_connection(
        io,
        service_fn(move |req| respond(req, peer_addr, Arc::clone(&service_state))),
    );

    if let Err(err) = conn.await {
        logger::log_connection_error(&peer_addr, &err);
    }
}

/// Run the file handler, then the response hooks, then access logging
async fn respond(
    req: Request<Incoming>,
    peer_addr: SocketAddr,
    state: Arc<AppState>,
) -> Result<Response<ResponseBody>, Infallible> {
    let started = Instant::now();
    let (parts, body) = req.into_parts();
    let mut entry = state
        .access_log()
        .then(|| AccessLogEntry::from_request(&peer_addr, &parts));

    let response = handler::handle_request(Request::from_parts(parts, body), Arc::clone(&state)).await?;
    let response = http::allow_any_origin(response);

    if let Some(entry) = entry.as_mut() {
        let body_bytes = response
            .body()
            .size_hint()
            .exact()
            .or_else(|| content_length(&response))
            .unwrap_or(0);
        entry.complete(response.status().as_u16(), body_bytes, started.elapsed());
        logger::log_access(entry, &state.config.logging.access_log_format);
    }

    Ok(response)
}

/// Declared length of a streamed body
fn content_length(response: &Response<ResponseBody>) -> Option<u64> {
    response
        .headers()
        .get(header::CONTENT_LENGTH)?
        .to_str()
        .ok()?
        .parse()
        .ok()
}
