//! HTML page rendering module
//!
//! Pure functions assembling the three pages the server offers. All
//! interpolated post fields and ids are HTML-escaped; pages share a single
//! stylesheet served from the public prefix.

use crate::store::Post;
use htmlescape::{encode_attribute, encode_minimal};
use std::fmt::Write;

const STYLESHEET_LINK: &str =
    r#"<link rel="stylesheet" type="text/css" href="/public/style.css">"#;

/// Render the home page: one list item per post id, linking to the post.
///
/// The list deliberately shows ids rather than titles; resolving titles
/// would cost one read per post on every listing.
pub fn home_page(ids: &[String]) -> String {
    let mut items = String::new();
    for id in ids {
        let _ = write!(
            items,
            r#"<li><a href="/post?id={}">{}</a></li>"#,
            encode_attribute(id),
            encode_minimal(id)
        );
    }

    format!(
        r#"<!DOCTYPE html>
<html>
<head>
  <title>Blog</title>
  {STYLESHEET_LINK}
</head>
<body>
  <h1>Welcome to the Blog!</h1>
  <ul>{items}</ul>
  <a href="/create">Create a New Post</a>
</body>
</html>
"#
    )
}

/// Render a single post with links back home and to its delete route.
pub fn post_page(post: &Post, id: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
<head>
  <title>{title}</title>
  {STYLESHEET_LINK}
</head>
<body>
  <h1>{title}</h1>
  <p>Author: {author}</p>
  <p>{content}</p>
  <a href="/home">Back to Home</a>
  <br>
  <a href="/delete?id={id_attr}">Delete Post</a>
</body>
</html>
"#,
        title = encode_minimal(&post.title),
        author = encode_minimal(&post.author),
        content = encode_minimal(&post.content),
        id_attr = encode_attribute(id),
    )
}

/// Render the creation form. Field presence is enforced client-side via
/// `required` and again server-side on submission.
pub fn create_page() -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
<head>
  <title>Create a New Post</title>
  {STYLESHEET_LINK}
</head>
<body>
  <h1>Create a New Post</h1>
  <form method="POST" action="/create" class="form-body">
    <label for="title">Title:</label>
    <input type="text" id="title" name="title" required>
    <br>
    <label for="author">Author:</label>
    <input type="text" id="author" name="author" required>
    <br>
    <label for="content">Content:</label>
    <textarea id="content" name="content" required></textarea>
    <br>
    <button type="submit">Create Post</button>
  </form>
  <br>
  <a href="/home">Back to Home</a>
</body>
</html>
"#
    )
}
