//! Static asset serving module
//!
//! Serves files under the public prefix verbatim. Resolved paths are
//! canonicalized and clamped to the assets root so crafted paths cannot
//! escape it.

use crate::http;
use crate::logger;
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;
use std::path::Path;
use tokio::fs;

/// Serve one asset addressed relative to the public directory.
pub async fn serve_asset(public_dir: &str, asset_path: &str) -> Response<Full<Bytes>> {
    match load_asset(public_dir, asset_path).await {
        Some(data) => http::build_css_response(data),
        None => http::build_not_found_response("Not Found"),
    }
}

/// Load an asset, refusing paths that resolve outside the public directory.
async fn load_asset(public_dir: &str, asset_path: &str) -> Option<Vec<u8>> {
    let root = match Path::new(public_dir).canonicalize() {
        Ok(p) => p,
        Err(e) => {
            logger::log_warning(&format!(
                "Public directory not found or inaccessible '{public_dir}': {e}"
            ));
            return None;
        }
    };

    let requested = root.join(asset_path.trim_start_matches('/'));

    // File not found is common (404), no need to log at warning level
    let Ok(canonical) = requested.canonicalize() else {
        return None;
    };
    if !canonical.starts_with(&root) {
        logger::log_warning(&format!(
            "Path traversal attempt blocked: {} -> {}",
            asset_path,
            canonical.display()
        ));
        return None;
    }

    match fs::read(&canonical).await {
        Ok(content) => Some(content),
        Err(e) => {
            logger::log_error(&format!(
                "Failed to read asset '{}': {e}",
                canonical.display()
            ));
            None
        }
    }
}
