//! Runtime configuration
//!
//! Settings are read from `PROXY_*` environment variables once at startup and
//! passed around behind an `Arc`.

pub mod settings_struct;

pub use settings_struct::Settings;
