//! HTTP response building module
//!
//! Provides builders for the responses the file server sends.

use super::body::{self, ResponseBody};
use hyper::header;
use hyper::{Response, StatusCode};

/// Build 200 response carrying a file
///
/// `content_length` is the full file size, also for HEAD where `body` is empty.
pub fn build_file_response(
    body: ResponseBody,
    content_length: u64,
    content_type: &str,
    last_modified: &str,
) -> Response<ResponseBody> {
    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, content_type)
        .header(header::CONTENT_LENGTH, content_length)
        .header(header::LAST_MODIFIED, last_modified)
        .body(body)
        .unwrap_or_else(|e| {
            log_build_error("200", &e);
            Response::new(body::empty())
        })
}

/// Build generic HTML response
pub fn build_html_response(content: String, is_head: bool) -> Response<ResponseBody> {
    let content_length = content.len();
    let body = if is_head { body::empty() } else { body::full(content) };

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, "text/html; charset=utf-8")
        .header(header::CONTENT_LENGTH, content_length)
        .body(body)
        .unwrap_or_else(|e| {
            log_build_error("HTML", &e);
            Response::new(body::empty())
        })
}

/// Build 304 Not Modified response
pub fn build_304_response(last_modified: &str) -> Response<ResponseBody> {
    Response::builder()
        .status(StatusCode::NOT_MODIFIED)
        .header(header::LAST_MODIFIED, last_modified)
        .body(body::empty())
        .unwrap_or_else(|e| {
            log_build_error("304", &e);
            Response::new(body::empty())
        })
}

/// Build 301 redirect, used to add the trailing slash to directory URLs
pub fn build_301_response(location: &str) -> Response<ResponseBody> {
    Response::builder()
        .status(StatusCode::MOVED_PERMANENTLY)
        .header(header::LOCATION, location)
        .header(header::CONTENT_LENGTH, 0)
        .body(body::empty())
        .unwrap_or_else(|e| {
            log_build_error("301", &e);
            Response::new(body::empty())
        })
}

/// Build 404 Not Found response
pub fn build_404_response(message: &str, is_head: bool) -> Response<ResponseBody> {
    build_error_response(StatusCode::NOT_FOUND, message, is_head)
}

/// Build 501 Not Implemented response for methods other than GET/HEAD
pub fn build_501_response(method: &hyper::Method) -> Response<ResponseBody> {
    let mut response = build_error_response(
        StatusCode::NOT_IMPLEMENTED,
        &format!("Unsupported method ('{method}')"),
        false,
    );
    response
        .headers_mut()
        .insert(header::ALLOW, header::HeaderValue::from_static("GET, HEAD"));
    response
}

/// Build an error response with a small HTML page describing it
pub fn build_error_response(
    status: StatusCode,
    message: &str,
    is_head: bool,
) -> Response<ResponseBody> {
    let page = error_page(status, message);
    let content_length = page.len();
    let body = if is_head { body::empty() } else { body::full(page) };

    Response::builder()
        .status(status)
        .header(header::CONTENT_TYPE, "text/html; charset=utf-8")
        .header(header::CONTENT_LENGTH, content_length)
        .body(body)
        .unwrap_or_else(|e| {
            log_build_error(status.as_str(), &e);
            let mut fallback = Response::new(body::empty());
            *fallback.status_mut() = status;
            fallback
        })
}

fn error_page(status: StatusCode, message: &str) -> String {
    let code = status.as_u16();
    let reason = status.canonical_reason().unwrap_or("Error");
    format!(
        "<!DOCTYPE html>\n\
         <html lang=\"en\">\n\
         <head>\n\
         <meta charset=\"utf-8\">\n\
         <title>{code} {reason}</title>\n\
         </head>\n\
         <body>\n\
         <h1>{code} {reason}</h1>\n\
         <p>{}</p>\n\
         </body>\n\
         </html>\n",
        escape_html(message)
    )
}

/// Escape text for inclusion in HTML content or a quoted attribute
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#x27;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Log response build error
fn log_build_error(status: &str, error: &hyper::http::Error) {
    crate::logger::log_error(&format!("Failed to build {status} response: {error}"));
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;

    async fn body_string(response: Response<ResponseBody>) -> String {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_file_length_independent_of_body() {
        let response = build_file_response(
            body::empty(),
            5,
            "text/plain",
            "Sun, 06 Nov 1994 08:49:37 GMT",
        );
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[header::CONTENT_LENGTH], "5");
        assert_eq!(body_string(response).await, "");
    }

    #[tokio::test]
    async fn test_error_page_escapes_message() {
        let response = build_404_response("No <such> file", false);
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body = body_string(response).await;
        assert!(body.contains("<h1>404 Not Found</h1>"));
        assert!(body.contains("No &lt;such&gt; file"));
    }

    #[test]
    fn test_501_lists_allowed_methods() {
        let response = build_501_response(&hyper::Method::POST);
        assert_eq!(response.status(), StatusCode::NOT_IMPLEMENTED);
        assert_eq!(response.headers()[header::ALLOW], "GET, HEAD");
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html("a&b \"c\" 'd'"), "a&amp;b &quot;c&quot; &#x27;d&#x27;");
        assert_eq!(escape_html("plain.txt"), "plain.txt");
    }
}
