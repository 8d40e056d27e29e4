//! Shared handler state.

use liftoff_client::Fetcher;
use liftoff_core::SharedState;

/// State shared by every request handler.
#[derive(Debug, Clone)]
pub struct AppState {
    pub fetcher: Fetcher,
}

impl AppState {
    pub fn new(fetcher: Fetcher) -> Self {
        Self { fetcher }
    }

    /// The cached articles the fetcher writes to.
    pub fn cache(&self) -> &SharedState {
        self.fetcher.state()
    }
}
