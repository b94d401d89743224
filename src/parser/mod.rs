pub mod filter;
pub mod source;

pub use filter::ProxyFilter;
pub use source::parse_source;
