//! Application state for the web layer.

use std::sync::Arc;

use crate::mbta::MbtaClient;
use crate::resolver::Resolver;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Resolution pipeline over the cached MBTA client
    pub resolver: Arc<Resolver<MbtaClient>>,
}

impl AppState {
    /// Create a new app state.
    pub fn new(resolver: Resolver<MbtaClient>) -> Self {
        Self {
            resolver: Arc::new(resolver),
        }
    }
}
