use std::sync::Arc;

use crate::settings::Settings;

/// Application state shared with the web handlers
#[derive(Debug, Clone)]
pub struct AppState {
    /// Global application settings
    pub config: Arc<Settings>,
}

impl AppState {
    /// Create a new AppState instance
    pub fn new(config: Arc<Settings>) -> Self {
        Self { config }
    }

    /// Path of the published document
    pub fn output_path(&self) -> &str {
        &self.config.output_path
    }
}
