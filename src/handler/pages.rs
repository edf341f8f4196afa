//! Blog page handlers
//!
//! Glue between router, store, and renderer. Maps store and form failures
//! onto the plain-text error responses of the HTTP contract.

use crate::config::AppState;
use crate::http::{self, form};
use crate::logger;
use crate::render;
use crate::store::{Post, StoreError};
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;
use std::collections::HashMap;

/// GET /home — list all posts.
pub async fn home(state: &AppState) -> Response<Full<Bytes>> {
    match state.store.list().await {
        Ok(ids) => http::build_html_response(render::home_page(&ids)),
        Err(e) => {
            logger::log_error(&format!("Failed to list posts: {e}"));
            http::build_500_response("Internal Server Error")
        }
    }
}

/// /post?id=<id> — render one post. Any method is accepted.
///
/// A missing id parameter behaves like an unknown id.
pub async fn view(state: &AppState, query: Option<&str>) -> Response<Full<Bytes>> {
    let Some(id) = form::query_id(query) else {
        return http::build_not_found_response("Post Not Found");
    };

    match state.store.get(&id).await {
        Ok(post) => http::build_html_response(render::post_page(&post, &id)),
        Err(StoreError::NotFound) => http::build_not_found_response("Post Not Found"),
        Err(e) => {
            logger::log_error(&format!("Failed to read post {id}: {e}"));
            http::build_500_response("Internal Server Error")
        }
    }
}

/// GET /create — the submission form.
pub fn create_form() -> Response<Full<Bytes>> {
    http::build_html_response(render::create_page())
}

/// POST /create — store a new post and bounce back to the list.
pub async fn create(state: &AppState, body: &[u8]) -> Response<Full<Bytes>> {
    let fields = form::parse_pairs(body);
    let post = match build_post(&fields) {
        Ok(post) => post,
        Err(e) => return http::build_400_response(e.to_string()),
    };

    match state.store.create(&post).await {
        Ok(_id) => http::build_redirect_response("/home"),
        Err(e) => {
            logger::log_error(&format!("Failed to create post: {e}"));
            http::build_500_response("Error creating post")
        }
    }
}

fn build_post(fields: &HashMap<String, String>) -> Result<Post, form::FormError> {
    Ok(Post {
        title: form::required(fields, "title")?.to_string(),
        author: form::required(fields, "author")?.to_string(),
        content: form::required(fields, "content")?.to_string(),
    })
}

/// /delete?id=<id> — remove a post and bounce back to the list. Any method
/// is accepted; deleting an absent post reports the same error as any other
/// removal failure.
pub async fn delete(state: &AppState, query: Option<&str>) -> Response<Full<Bytes>> {
    let Some(id) = form::query_id(query) else {
        return http::build_500_response("Error deleting post");
    };

    match state.store.delete(&id).await {
        Ok(()) => http::build_redirect_response("/home"),
        Err(e) => {
            logger::log_error(&format!("Failed to delete post {id}: {e}"));
            http::build_500_response("Error deleting post")
        }
    }
}
