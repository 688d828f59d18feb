//! Directory listing module
//!
//! Renders an HTML index of a directory that has no index file.

use crate::handler::router::RequestContext;
use crate::http::{self, response::escape_html, ResponseBody};
use crate::logger;
use hyper::Response;
use std::fmt::Write;
use std::fs::FileType;
use std::io;
use std::path::Path;
use tokio::fs;

/// One entry of a directory listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingEntry {
    pub name: String,
    /// Directory, or a symlink resolving to one
    pub is_dir: bool,
    pub is_symlink: bool,
}

impl ListingEntry {
    /// Text shown for the entry: `/` marks directories, `@` symlinks
    fn display_name(&self) -> String {
        if self.is_symlink {
            format!("{}@", self.name)
        } else if self.is_dir {
            format!("{}/", self.name)
        } else {
            self.name.clone()
        }
    }

    fn href(&self) -> String {
        let encoded = urlencoding::encode(&self.name);
        if self.is_dir {
            format!("{encoded}/")
        } else {
            encoded.into_owned()
        }
    }
}

/// Serve the listing for `dir`, requested as `ctx.path`
pub async fn serve_listing(ctx: &RequestContext<'_>, dir: &Path) -> Response<ResponseBody> {
    let entries = match read_entries(dir).await {
        Ok(entries) => entries,
        Err(e) => {
            logger::log_warning(&format!(
                "Cannot list directory '{}': {e}",
                dir.display()
            ));
            return http::build_404_response("No permission to list directory", ctx.is_head);
        }
    };

    let display_path = urlencoding::decode(ctx.path)
        .map_or_else(|_| ctx.path.to_string(), std::borrow::Cow::into_owned);

    http::build_html_response(render_listing(&display_path, &entries), ctx.is_head)
}

/// Read directory entries sorted case-insensitively by name
pub async fn read_entries(dir: &Path) -> io::Result<Vec<ListingEntry>> {
    let mut reader = fs::read_dir(dir).await?;
    let mut entries = Vec::new();

    while let Some(entry) = reader.next_entry().await? {
        let name = entry.file_name().to_string_lossy().into_owned();
        let file_type = entry.file_type().await;
        entries.push(describe_entry(name, &entry.path(), file_type).await);
    }

    entries.sort_by_cached_key(|e| e.name.to_lowercase());
    Ok(entries)
}

/// Classify one entry from its (unfollowed) file type
///
/// An entry whose type cannot be read is listed as a plain file.
async fn describe_entry(
    name: String,
    path: &Path,
    file_type: io::Result<FileType>,
) -> ListingEntry {
    let (is_dir, is_symlink) = match file_type {
        // Follow symlinks so a link to a directory still gets a trailing slash
        Ok(ft) if ft.is_symlink() => {
            let target_is_dir = fs::metadata(path).await.is_ok_and(|m| m.is_dir());
            (target_is_dir, true)
        }
        Ok(ft) => (ft.is_dir(), false),
        Err(e) => {
            logger::log_warning(&format!("Cannot stat '{}': {e}", path.display()));
            (false, false)
        }
    };

    ListingEntry {
        name,
        is_dir,
        is_symlink,
    }
}

/// Render the listing page
pub fn render_listing(display_path: &str, entries: &[ListingEntry]) -> String {
    let title = format!("Directory listing for {}", escape_html(display_path));

    let mut html = String::new();
    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    html.push_str("<meta charset=\"utf-8\">\n");
    let _ = writeln!(html, "<title>{title}</title>");
    html.push_str("</head>\n<body>\n");
    let _ = writeln!(html, "<h1>{title}</h1>");
    html.push_str("<hr>\n<ul>\n");
    for entry in entries {
        let _ = writeln!(
            html,
            "<li><a href=\"{}\">{}</a></li>",
            escape_html(&entry.href()),
            escape_html(&entry.display_name())
        );
    }
    html.push_str("</ul>\n<hr>\n</body>\n</html>\n");
    html
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(name: &str, is_dir: bool, is_symlink: bool) -> ListingEntry {
        ListingEntry {
            name: name.to_string(),
            is_dir,
            is_symlink,
        }
    }

    #[test]
    fn test_render_marks_and_links() {
        let html = render_listing(
            "/assets/",
            &[
                entry("img", true, false),
                entry("my file.txt", false, false),
                entry("latest", true, true),
            ],
        );

        assert!(html.contains("<title>Directory listing for /assets/</title>"));
        assert!(html.contains("<li><a href=\"img/\">img/</a></li>"));
        assert!(html.contains("<li><a href=\"my%20file.txt\">my file.txt</a></li>"));
        assert!(html.contains("<li><a href=\"latest/\">latest@</a></li>"));
    }

    #[test]
    fn test_render_escapes_names() {
        let html = render_listing("/<x>/", &[entry("a<b>&c", false, false)]);
        assert!(html.contains("Directory listing for /&lt;x&gt;/"));
        assert!(html.contains(">a&lt;b&gt;&amp;c</a>"));
        assert!(!html.contains("a<b>"));
    }

    #[tokio::test]
    async fn test_read_entries_sorted() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("beta.txt"), "").unwrap();
        std::fs::write(dir.path().join("Alpha.txt"), "").unwrap();
        std::fs::create_dir(dir.path().join("gamma")).unwrap();

        let entries = read_entries(dir.path()).await.unwrap();
        let names: Vec<_> = entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, ["Alpha.txt", "beta.txt", "gamma"]);
        assert!(entries[2].is_dir);
        assert!(!entries[0].is_dir);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_read_entries_symlink() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("real")).unwrap();
        std::os::unix::fs::symlink(dir.path().join("real"), dir.path().join("link")).unwrap();

        let entries = read_entries(dir.path()).await.unwrap();
        assert_eq!(entries[0], entry("link", true, true));
        assert_eq!(entries[1], entry("real", true, false));
    }

    #[tokio::test]
    async fn test_unreadable_entry_listed_as_file() {
        let dir = tempfile::tempdir().unwrap();
        let gone = dir.path().join("gone");

        let described = describe_entry(
            "gone".to_string(),
            &gone,
            Err(io::Error::from(io::ErrorKind::NotFound)),
        )
        .await;
        assert_eq!(described, entry("gone", false, false));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_dangling_symlink_keeps_listing() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("a.txt"), "a").unwrap();
        std::os::unix::fs::symlink(dir.path().join("missing"), dir.path().join("broken")).unwrap();

        let entries = read_entries(dir.path()).await.unwrap();
        assert_eq!(entries, [entry("a.txt", false, false), entry("broken", false, true)]);

        let html = render_listing("/", &entries);
        assert!(html.contains("<li><a href=\"broken\">broken@</a></li>"));
    }
}
