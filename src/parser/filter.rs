use std::collections::HashSet;

use log::debug;
use regex::Regex;
use serde_yaml::Value;

use crate::models::ProxyRecord;
use crate::settings::Settings;
use crate::utils::matcher::{compile_patterns, matches_any};

/// Type and name rules deciding which published proxies are kept
#[derive(Debug, Clone)]
pub struct ProxyFilter {
    allowed_types: HashSet<String>,
    exclude: Vec<Regex>,
    include: Vec<Regex>,
    max_count: usize,
}

impl ProxyFilter {
    pub fn new(
        allowed_types: impl IntoIterator<Item = String>,
        exclude: Vec<Regex>,
        include: Vec<Regex>,
        max_count: usize,
    ) -> Self {
        ProxyFilter {
            allowed_types: allowed_types.into_iter().collect(),
            exclude,
            include,
            max_count,
        }
    }

    /// Build the filter from settings, dropping patterns that fail to compile
    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(
            settings.type_filter.iter().cloned(),
            compile_patterns(&settings.name_exclude_filter),
            compile_patterns(&settings.name_filter),
            settings.source_num,
        )
    }

    /// Whether include patterns are active (and the count cap therefore is not)
    pub fn has_include(&self) -> bool {
        !self.include.is_empty()
    }

    /// Select the proxies of one source document
    ///
    /// Records are checked in order: type allow-list, exclude patterns, then
    /// either include patterns or the count cap. The cap is counted per call,
    /// so every source may contribute up to `max_count` proxies.
    pub fn filter(&self, document: &Value) -> Vec<ProxyRecord> {
        let mut kept = Vec::new();
        let Some(proxies) = document.get("proxies").and_then(Value::as_sequence) else {
            return kept;
        };

        for value in proxies {
            let Some(record) = ProxyRecord::from_value(value) else {
                continue;
            };
            if !record.has_name_field() {
                continue;
            }
            // Non-string names match as empty and are renamed on merge
            let name = record.name.as_deref().unwrap_or_default();

            if !self.allowed_types.contains(&record.proxy_type) {
                debug!("Filtered (type {}): name={}", record.proxy_type, name);
                continue;
            }

            if matches_any(&self.exclude, name) {
                debug!("Filtered (excluded pattern matched): name={}", name);
                continue;
            }

            if self.has_include() {
                if matches_any(&self.include, name) {
                    debug!("Included (pattern matched): name={}", name);
                    kept.push(record);
                }
            } else if kept.len() < self.max_count {
                kept.push(record);
            } else {
                debug!("Filtered (count limit reached): name={}", name);
            }
        }

        debug!("Kept {} of {} proxies", kept.len(), proxies.len());
        kept
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn types(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    fn doc(yaml: &str) -> Value {
        serde_yaml::from_str(yaml).unwrap()
    }

    fn names(records: &[ProxyRecord]) -> Vec<&str> {
        records.iter().filter_map(|r| r.name.as_deref()).collect()
    }

    fn numbered(count: usize) -> Value {
        let proxies = (0..count)
            .map(|i| ProxyRecord::new("vmess", &format!("node-{}", i)).to_value())
            .collect();
        let mut map = serde_yaml::Mapping::new();
        map.insert(Value::from("proxies"), Value::Sequence(proxies));
        Value::Mapping(map)
    }

    #[test]
    fn test_missing_or_invalid_proxies() {
        let filter = ProxyFilter::new(types(&["vmess"]), vec![], vec![], 10);
        assert!(filter.filter(&doc("port: 7890")).is_empty());
        assert!(filter.filter(&doc("proxies: not-a-list")).is_empty());
        assert!(filter.filter(&doc("- a")).is_empty());
    }

    #[test]
    fn test_type_filter_and_malformed_records() {
        let filter = ProxyFilter::new(types(&["vmess", "vless"]), vec![], vec![], 10);
        let kept = filter.filter(&doc(
            r#"
proxies:
  - {type: vmess, name: A}
  - {type: ss, name: B}
  - {type: vless, name: A}
  - {type: vmess}
  - {name: C}
  - plain string
  - {type: VMESS, name: D}
"#,
        ));
        assert_eq!(names(&kept), vec!["A", "A"]);
        assert_eq!(kept[0].proxy_type, "vmess");
        assert_eq!(kept[1].proxy_type, "vless");
    }

    #[test]
    fn test_non_string_name_is_kept_unnamed() {
        let filter = ProxyFilter::new(types(&["vmess"]), vec![], compile_patterns(&[".*"]), 10);
        let kept = filter.filter(&doc(
            r#"
proxies:
  - {type: vmess, name: 123}
  - {type: vmess, name: '123'}
"#,
        ));
        assert_eq!(kept.len(), 2);
        assert_eq!(kept[0].name, None);
        assert_eq!(kept[1].name.as_deref(), Some("123"));
    }

    #[test]
    fn test_cap_per_call_preserves_order() {
        let filter = ProxyFilter::new(types(&["vmess"]), vec![], vec![], 3);
        let kept = filter.filter(&numbered(5));
        assert_eq!(names(&kept), vec!["node-0", "node-1", "node-2"]);

        // The counter does not carry over between calls
        let again = filter.filter(&numbered(2));
        assert_eq!(names(&again), vec!["node-0", "node-1"]);
    }

    #[test]
    fn test_cap_ignored_with_include() {
        let filter = ProxyFilter::new(types(&["vmess"]), vec![], compile_patterns(&[".*"]), 2);
        assert_eq!(filter.filter(&numbered(5)).len(), 5);
    }

    #[test]
    fn test_include_selects_matching() {
        let filter = ProxyFilter::new(types(&["vmess"]), vec![], compile_patterns(&["-[13]$"]), 0);
        let kept = filter.filter(&numbered(5));
        assert_eq!(names(&kept), vec!["node-1", "node-3"]);
    }

    #[test]
    fn test_exclude_beats_include() {
        let filter = ProxyFilter::new(
            types(&["trojan"]),
            compile_patterns(&[".*AD"]),
            compile_patterns(&["Free"]),
            10,
        );
        let kept = filter.filter(&doc(
            r#"
proxies:
  - {type: trojan, name: "Free AD"}
  - {type: trojan, name: "Free JP"}
"#,
        ));
        assert_eq!(names(&kept), vec!["Free JP"]);
    }

    #[test]
    fn test_from_settings_defaults() {
        let filter = ProxyFilter::from_settings(&Settings::default());
        assert!(filter.has_include());
        let kept = filter.filter(&doc(
            r#"
proxies:
  - {type: vmess, name: "某机场 01"}
  - {type: vless, name: "HK 01"}
  - {type: trojan, name: "Buy AD"}
  - {type: ss, name: "US 01"}
"#,
        ));
        assert_eq!(names(&kept), vec!["HK 01"]);
    }
}
