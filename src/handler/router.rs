//! Request routing dispatch module
//!
//! Entry point for HTTP request processing: collects the request body where
//! one is expected, then dispatches on path and method.

use crate::config::AppState;
use crate::handler::{pages, static_files};
use crate::http;
use crate::logger;
use http_body_util::{BodyExt, Full};
use hyper::body::Bytes;
use hyper::{Method, Request, Response};
use std::convert::Infallible;
use std::sync::Arc;

/// Main entry point for HTTP request handling
pub async fn handle_request(
    req: Request<hyper::body::Incoming>,
    state: Arc<AppState>,
) -> Result<Response<Full<Bytes>>, Infallible> {
    if state.config.logging.access_log {
        logger::log_request(req.method(), req.uri());
    }

    // Reject oversized bodies up front via Content-Length
    if let Some(resp) = check_body_size(&req, state.config.http.max_body_size) {
        return Ok(resp);
    }

    let (parts, body) = req.into_parts();

    // Only the create route consumes a body; buffering it here keeps
    // `dispatch` free of the connection-bound body type.
    let body_bytes = if parts.method == Method::POST {
        match body.collect().await {
            Ok(collected) => collected.to_bytes(),
            Err(e) => {
                logger::log_error(&format!("Failed to read request body: {e}"));
                return Ok(http::build_500_response("Internal Server Error"));
            }
        }
    } else {
        Bytes::new()
    };

    Ok(dispatch(
        &parts.method,
        parts.uri.path(),
        parts.uri.query(),
        &body_bytes,
        &state,
    )
    .await)
}

/// Validate Content-Length header and return 413 if exceeded
fn check_body_size(
    req: &Request<hyper::body::Incoming>,
    max_body_size: u64,
) -> Option<Response<Full<Bytes>>> {
    let content_length = req.headers().get("content-length")?;
    content_length.to_str().map_or_else(
        |_| {
            logger::log_warning("Content-Length header contains non-ASCII characters");
            None
        },
        |size_str| match size_str.parse::<u64>() {
            Ok(size) if size > max_body_size => {
                logger::log_error(&format!(
                    "Request body too large: {size} bytes (max: {max_body_size})"
                ));
                Some(http::build_413_response())
            }
            Err(_) => {
                logger::log_warning(&format!(
                    "Invalid Content-Length value: '{size_str}', skipping size check"
                ));
                None
            }
            _ => None,
        },
    )
}

/// Route a request to its handler.
///
/// `/post` and `/delete` deliberately accept any method; only `/create`
/// dispatches on it, so a PUT to `/create` falls through to 404.
pub async fn dispatch(
    method: &Method,
    path: &str,
    query: Option<&str>,
    body: &[u8],
    state: &AppState,
) -> Response<Full<Bytes>> {
    if let Some(asset_path) = path.strip_prefix("/public/") {
        return static_files::serve_asset(&state.config.blog.public_dir, asset_path).await;
    }

    match path {
        "/home" if *method == Method::GET => pages::home(state).await,
        "/post" => pages::view(state, query).await,
        "/create" if *method == Method::GET => pages::create_form(),
        "/create" if *method == Method::POST => pages::create(state, body).await,
        "/delete" => pages::delete(state, query).await,
        _ => http::build_not_found_response("Not Found"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use tempfile::TempDir;

    struct TestServer {
        state: AppState,
        // Held so the directories outlive the state borrowing them.
        _posts: TempDir,
        _public: TempDir,
    }

    fn test_server() -> TestServer {
        let posts = tempfile::tempdir().unwrap();
        let public = tempfile::tempdir().unwrap();

        let mut config = Config::load_from("no-such-config-file").unwrap();
        config.blog.posts_dir = posts.path().to_string_lossy().into_owned();
        config.blog.public_dir = public.path().to_string_lossy().into_owned();
        config.logging.access_log = false;

        TestServer {
            state: AppState::new(config),
            _posts: posts,
            _public: public,
        }
    }

    async fn get(state: &AppState, path: &str, query: Option<&str>) -> Response<Full<Bytes>> {
        dispatch(&Method::GET, path, query, &[], state).await
    }

    async fn body_text(resp: Response<Full<Bytes>>) -> String {
        let bytes = resp.into_body().collect().await.unwrap().to_bytes();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_unmatched_path_is_404_not_found() {
        let srv = test_server();
        let resp = get(&srv.state, "/nonexistent", None).await;
        assert_eq!(resp.status(), 404);
        assert_eq!(body_text(resp).await, "Not Found");
    }

    #[tokio::test]
    async fn test_home_lists_nothing_when_empty() {
        let srv = test_server();
        let resp = get(&srv.state, "/home", None).await;
        assert_eq!(resp.status(), 200);
        let html = body_text(resp).await;
        assert!(html.contains("<ul></ul>"));
    }

    #[tokio::test]
    async fn test_home_requires_get() {
        let srv = test_server();
        let resp = dispatch(&Method::POST, "/home", None, &[], &srv.state).await;
        assert_eq!(resp.status(), 404);
    }

    #[tokio::test]
    async fn test_create_form_is_served() {
        let srv = test_server();
        let resp = get(&srv.state, "/create", None).await;
        assert_eq!(resp.status(), 200);
        assert!(body_text(resp).await.contains("<form"));
    }

    #[tokio::test]
    async fn test_create_rejects_other_methods() {
        let srv = test_server();
        let resp = dispatch(&Method::PUT, "/create", None, &[], &srv.state).await;
        assert_eq!(resp.status(), 404);
        assert_eq!(body_text(resp).await, "Not Found");
    }

    #[tokio::test]
    async fn test_create_view_delete_scenario() {
        let srv = test_server();

        // POST /create redirects home
        let resp = dispatch(
            &Method::POST,
            "/create",
            None,
            b"title=Hello&author=Amy&content=World",
            &srv.state,
        )
        .await;
        assert_eq!(resp.status(), 302);
        assert_eq!(resp.headers()["Location"], "/home");

        // /home now links to the new post
        let html = body_text(get(&srv.state, "/home", None).await).await;
        let id = srv.state.store.list().await.unwrap().pop().unwrap();
        assert!(html.contains(&format!("/post?id={id}")));

        // The post page shows the submitted fields
        let query = format!("id={id}");
        let html = body_text(get(&srv.state, "/post", Some(&query)).await).await;
        for expected in ["Hello", "Amy", "World"] {
            assert!(html.contains(expected));
        }

        // Deleting it redirects home and the post is gone
        let resp = get(&srv.state, "/delete", Some(&query)).await;
        assert_eq!(resp.status(), 302);

        let resp = get(&srv.state, "/post", Some(&query)).await;
        assert_eq!(resp.status(), 404);
        assert_eq!(body_text(resp).await, "Post Not Found");
        assert!(srv.state.store.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_view_unknown_id_is_post_not_found() {
        let srv = test_server();
        let resp = get(&srv.state, "/post", Some("id=1700000000000")).await;
        assert_eq!(resp.status(), 404);
        assert_eq!(body_text(resp).await, "Post Not Found");
    }

    #[tokio::test]
    async fn test_view_without_id_is_post_not_found() {
        let srv = test_server();
        let resp = get(&srv.state, "/post", None).await;
        assert_eq!(resp.status(), 404);
        assert_eq!(body_text(resp).await, "Post Not Found");
    }

    #[tokio::test]
    async fn test_create_with_missing_field_is_400() {
        let srv = test_server();
        let resp = dispatch(
            &Method::POST,
            "/create",
            None,
            b"title=Hello&author=Amy",
            &srv.state,
        )
        .await;
        assert_eq!(resp.status(), 400);
        assert_eq!(body_text(resp).await, "Missing required field: content");
        assert!(srv.state.store.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_delete_unknown_id_is_500() {
        let srv = test_server();
        let resp = get(&srv.state, "/delete", Some("id=1700000000000")).await;
        assert_eq!(resp.status(), 500);
        assert_eq!(body_text(resp).await, "Error deleting post");
    }

    #[tokio::test]
    async fn test_delete_accepts_any_method() {
        let srv = test_server();
        let post = crate::store::Post {
            title: "t".to_string(),
            author: "a".to_string(),
            content: "c".to_string(),
        };
        let id = srv.state.store.create(&post).await.unwrap();

        let query = format!("id={id}");
        let resp = dispatch(&Method::PUT, "/delete", Some(&query), &[], &srv.state).await;
        assert_eq!(resp.status(), 302);
    }

    #[tokio::test]
    async fn test_public_asset_roundtrip() {
        let srv = test_server();
        let css = b"body { color: red; }";
        std::fs::write(
            std::path::Path::new(&srv.state.config.blog.public_dir).join("style.css"),
            css,
        )
        .unwrap();

        let resp = get(&srv.state, "/public/style.css", None).await;
        assert_eq!(resp.status(), 200);
        assert_eq!(resp.headers()["Content-Type"], "text/css");
        assert_eq!(body_text(resp).await, String::from_utf8_lossy(css));
    }

    #[tokio::test]
    async fn test_public_missing_asset_is_404() {
        let srv = test_server();
        let resp = get(&srv.state, "/public/missing.css", None).await;
        assert_eq!(resp.status(), 404);
        assert_eq!(body_text(resp).await, "Not Found");
    }
}
