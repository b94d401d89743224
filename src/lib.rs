pub mod error;
pub mod generator;
pub mod interfaces;
pub mod models;
pub mod parser;
pub mod settings;
pub mod utils;
#[cfg(feature = "web-api")]
pub mod web_handlers;

// Re-export the main types for easier access
pub use error::AggregatorError;
pub use interfaces::{Aggregator, CycleReport};
pub use models::{ProxyGroup, ProxyRecord, TemplateDocument};
pub use settings::Settings;
