// Application state module
// Bundles the loaded configuration with the shared post store

use super::types::Config;
use crate::store::PostStore;

/// Application state shared across connection tasks.
///
/// Configuration is fixed for the lifetime of the process; the store is the
/// only component touching shared resources, and it owns no in-memory state.
pub struct AppState {
    pub config: Config,
    pub store: PostStore,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let store = PostStore::new(&config.blog.posts_dir);
        Self { config, store }
    }
}
