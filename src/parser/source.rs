use serde_yaml::Value;

use crate::error::{AggregatorError, Result};

/// Parse the raw text of a published proxy source
///
/// Any valid YAML document is accepted here; whether it actually carries a
/// `proxies` list is decided by the filter.
pub fn parse_source(url: &str, content: &str) -> Result<Value> {
    serde_yaml::from_str(content).map_err(|source| AggregatorError::SourceParse {
        url: url.to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_source() {
        let doc = parse_source("http://a", "proxies:\n  - {name: A, type: vmess}\n").unwrap();
        assert!(doc.get("proxies").is_some());
    }

    #[test]
    fn test_parse_source_error_names_url() {
        let err = parse_source("http://bad.example/clash.yml", "proxies: [").unwrap_err();
        assert!(err.is_source_error());
        assert!(err.to_string().contains("http://bad.example/clash.yml"));
    }
}
