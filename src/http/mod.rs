//! HTTP protocol layer module
//!
//! Provides HTTP protocol-related base functionality, decoupled from the file handler.

pub mod body;
pub mod cache;
pub mod cors;
pub mod mime;
pub mod response;

// Re-export commonly used items
pub use body::ResponseBody;
pub use cors::allow_any_origin;
pub use response::{
    build_301_response, build_304_response, build_404_response, build_501_response,
    build_file_response, build_html_response,
};
