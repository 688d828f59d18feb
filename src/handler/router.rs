//! Request dispatch module
//!
//! Entry point for HTTP request processing: method validation, then the
//! static file handler for everything else.

use crate::config::AppState;
use crate::handler::static_files;
use crate::http::{self, ResponseBody};
use crate::logger;
use hyper::header::{self, HeaderValue};
use hyper::http::request::Parts;
use hyper::{Method, Request, Response};
use std::convert::Infallible;
use std::sync::Arc;

/// Request context encapsulating information needed for request processing
pub struct RequestContext<'a> {
    /// Raw (still percent-encoded) request path
    pub path: &'a str,
    pub query: Option<&'a str>,
    pub is_head: bool,
    pub if_modified_since: Option<&'a str>,
    pub has_if_none_match: bool,
}

impl<'a> RequestContext<'a> {
    pub fn from_parts(parts: &'a Parts) -> Self {
        Self {
            path: parts.uri.path(),
            query: parts.uri.query(),
            is_head: parts.method == Method::HEAD,
            if_modified_since: parts
                .headers
                .get(header::IF_MODIFIED_SINCE)
                .and_then(|v| v.to_str().ok()),
            has_if_none_match: parts.headers.contains_key(header::IF_NONE_MATCH),
        }
    }
}

/// Main entry point for HTTP request handling
///
/// The request body is never read; GET and HEAD carry none worth looking at.
pub async fn handle_request<B>(
    req: Request<B>,
    state: Arc<AppState>,
) -> Result<Response<ResponseBody>, Infallible> {
    let (parts, _body) = req.into_parts();

    let response = match check_http_method(&parts.method) {
        Some(resp) => resp,
        None => {
            let ctx = RequestContext::from_parts(&parts);
            static_files::serve_path(&ctx, state.root()).await
        }
    };

    Ok(with_server_header(response, &state.config.http.server_name))
}

/// Check HTTP method and return 501 for anything but GET/HEAD
fn check_http_method(method: &Method) -> Option<Response<ResponseBody>> {
    match *method {
        Method::GET | Method::HEAD => None,
        _ => {
            logger::log_warning(&format!("Unsupported method: {method}"));
            Some(http::build_501_response(method))
        }
    }
}

fn with_server_header(
    mut response: Response<ResponseBody>,
    server_name: &str,
) -> Response<ResponseBody> {
    if let Ok(value) = HeaderValue::from_str(server_name) {
        response.headers_mut().insert(header::SERVER, value);
    }
    response
}
