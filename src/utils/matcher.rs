use log::warn;
use regex::Regex;

/// Compile a list of regex patterns, skipping the ones that fail to compile
///
/// # Arguments
/// * `patterns` - The raw pattern strings
///
/// # Returns
/// * The successfully compiled patterns, in input order
pub fn compile_patterns<S: AsRef<str>>(patterns: &[S]) -> Vec<Regex> {
    patterns
        .iter()
        .filter_map(|pattern| match Regex::new(pattern.as_ref()) {
            Ok(re) => Some(re),
            Err(e) => {
                warn!("Ignoring invalid pattern '{}': {}", pattern.as_ref(), e);
                None
            }
        })
        .collect()
}

/// Check whether any pattern is found anywhere in the text
///
/// Matching is case-sensitive and unanchored.
pub fn matches_any(patterns: &[Regex], text: &str) -> bool {
    patterns.iter().any(|re| re.is_match(text))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compile_patterns_skips_invalid() {
        let patterns = compile_patterns(&[".*AD", "(", "机场"]);
        assert_eq!(patterns.len(), 2);
        assert_eq!(patterns[0].as_str(), ".*AD");
        assert_eq!(patterns[1].as_str(), "机场");
    }

    #[test]
    fn test_matches_any() {
        let patterns = compile_patterns(&[".*AD", "机场"]);
        assert!(matches_any(&patterns, "Free AD node"));
        assert!(matches_any(&patterns, "某机场-01"));
        assert!(!matches_any(&patterns, "Tokyo 01"));
        // Case sensitive
        assert!(!matches_any(&patterns, "free ad"));
    }

    #[test]
    fn test_matches_any_empty() {
        assert!(!matches_any(&[], "anything"));
    }
}
