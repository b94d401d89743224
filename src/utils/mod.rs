pub mod file;
pub mod http_std;
pub mod matcher;
pub mod string;

// Re-export common utilities
pub use file::write_file_atomic;
pub use http_std::{HttpFetcher, SourceFetcher};
pub use matcher::{compile_patterns, matches_any};
