//! HTTP protocol layer module
//!
//! Response builders and urlencoded input parsing, decoupled from the blog
//! business logic in `handler`.

pub mod form;
pub mod response;

// Re-export commonly used builders
pub use response::{
    build_400_response, build_413_response, build_500_response, build_css_response,
    build_html_response, build_not_found_response, build_redirect_response,
};
