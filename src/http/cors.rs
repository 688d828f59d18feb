//! Cross-origin response hook
//!
//! Runs on every response the service returns, after the handler has built
//! it and before hyper writes the head. Requests hyper rejects while parsing
//! (400, 431) never reach the service and go out without it.

use hyper::header::{HeaderValue, ACCESS_CONTROL_ALLOW_ORIGIN};
use hyper::Response;

/// Permit cross-origin reads from any origin
pub fn allow_any_origin<B>(mut response: Response<B>) -> Response<B> {
    response
        .headers_mut()
        .insert(ACCESS_CONTROL_ALLOW_ORIGIN, HeaderValue::from_static("*"));
    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use hyper::StatusCode;

    #[test]
    fn test_added_for_any_status() {
        for status in [StatusCode::OK, StatusCode::NOT_FOUND, StatusCode::NOT_IMPLEMENTED] {
            let mut response = Response::new(());
            *response.status_mut() = status;
            let response = allow_any_origin(response);
            assert_eq!(response.headers()[ACCESS_CONTROL_ALLOW_ORIGIN], "*");
        }
    }

    #[test]
    fn test_replaces_existing_value() {
        let response = Response::builder()
            .header(ACCESS_CONTROL_ALLOW_ORIGIN, "https://example.com")
            .body(())
            .unwrap();
        let response = allow_any_origin(response);

        let values: Vec<_> = response
            .headers()
            .get_all(ACCESS_CONTROL_ALLOW_ORIGIN)
            .iter()
            .collect();
        assert_eq!(values, ["*"]);
    }
}
