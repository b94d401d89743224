//! Core data models
//!
//! Typed views over the YAML documents the aggregator reads and writes. Each
//! model keeps the original mapping, so fields the aggregator does not care
//! about are written back exactly as they were read.

pub mod app_state;
pub mod proxy;
pub mod proxy_group;
pub mod template;

pub use app_state::AppState;
pub use proxy::ProxyRecord;
pub use proxy_group::ProxyGroup;
pub use template::TemplateDocument;
