//! Static file serving module
//!
//! Maps URL paths under the document root, serves files, index pages and
//! directory listings.

use crate::handler::listing;
use crate::handler::router::RequestContext;
use crate::http::{self, body, cache, mime, ResponseBody};
use crate::logger;
use hyper::Response;
use std::fs::Metadata;
use std::path::{Component, Path, PathBuf};
use std::time::SystemTime;
use tokio::fs;

/// Files served in place of a directory listing, in order of preference
pub const INDEX_FILES: [&str; 2] = ["index.html", "index.htm"];

const NOT_FOUND: &str = "File not found";

/// Translate a URL path into a filesystem path under `root`
///
/// The path is percent-decoded and split on `/`; empty, `.` and `..`
/// segments are dropped, as is anything that is not a single plain path
/// component on this platform. Returns `None` for paths that do not decode
/// to UTF-8.
pub fn translate_path(root: &Path, url_path: &str) -> Option<PathBuf> {
    let decoded = urlencoding::decode(url_path).ok()?;

    let mut fs_path = root.to_path_buf();
    for segment in decoded.split('/') {
        let mut components = Path::new(segment).components();
        if let (Some(Component::Normal(name)), None) = (components.next(), components.next()) {
            fs_path.push(name);
        }
    }
    Some(fs_path)
}

/// Serve whatever the request path names under `root`
pub async fn serve_path(ctx: &RequestContext<'_>, root: &Path) -> Response<ResponseBody> {
    let Some(fs_path) = translate_path(root, ctx.path) else {
        logger::log_warning(&format!("Undecodable request path: {}", ctx.path));
        return http::build_404_response(NOT_FOUND, ctx.is_head);
    };

    // Missing paths are the common 404, not worth a log line
    let Ok(metadata) = fs::metadata(&fs_path).await else {
        return http::build_404_response(NOT_FOUND, ctx.is_head);
    };

    if metadata.is_dir() {
        return serve_directory(ctx, &fs_path).await;
    }

    if ctx.path.ends_with('/') {
        return http::build_404_response(NOT_FOUND, ctx.is_head);
    }

    serve_file(ctx, &fs_path, &metadata).await
}

/// Serve a directory: redirect to the slash form, then index file or listing
async fn serve_directory(ctx: &RequestContext<'_>, dir: &Path) -> Response<ResponseBody> {
    if !ctx.path.ends_with('/') {
        let location = match ctx.query {
            Some(q) => format!("{}/?{q}", ctx.path),
            None => format!("{}/", ctx.path),
        };
        return http::build_301_response(&location);
    }

    for index_file in INDEX_FILES {
        let index_path = dir.join(index_file);
        if let Ok(metadata) = fs::metadata(&index_path).await {
            if metadata.is_file() {
                return serve_file(ctx, &index_path, &metadata).await;
            }
        }
    }

    listing::serve_listing(ctx, dir).await
}

/// Serve a single file with `Content-Type` and `Last-Modified`
///
/// The body is streamed from disk; `Content-Length` comes from `metadata`.
async fn serve_file(
    ctx: &RequestContext<'_>,
    file_path: &Path,
    metadata: &Metadata,
) -> Response<ResponseBody> {
    let modified = metadata.modified().unwrap_or_else(|_| SystemTime::now());
    let last_modified = cache::format_http_date(modified);

    if cache::is_not_modified(ctx.if_modified_since, ctx.has_if_none_match, modified) {
        return http::build_304_response(&last_modified);
    }

    let length = metadata.len();
    let content = if ctx.is_head {
        body::empty()
    } else {
        match fs::File::open(file_path).await {
            Ok(file) => body::file_stream(file, length),
            Err(e) => {
                logger::log_error(&format!(
                    "Failed to open file '{}': {e}",
                    file_path.display()
                ));
                return http::build_404_response(NOT_FOUND, false);
            }
        }
    };

    http::build_file_response(
        content,
        length,
        mime::content_type_for(file_path),
        &last_modified,
    )
}
