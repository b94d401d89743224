use std::collections::HashSet;

use serde_yaml::{Mapping, Value};

use crate::error::{AggregatorError, Result};
use crate::models::{ProxyGroup, ProxyRecord};

const KEY_PROXIES: &str = "proxies";
const KEY_PROXY_GROUPS: &str = "proxy-groups";

/// The skeleton Clash document that live proxies are injected into
///
/// Key order of the template is preserved when it is written back out.
#[derive(Debug, Clone, PartialEq)]
pub struct TemplateDocument {
    root: Mapping,
}

impl TemplateDocument {
    /// Parse a template from YAML text
    ///
    /// `path` is only used for error messages.
    pub fn from_str(content: &str, path: &str) -> Result<Self> {
        let value: Value =
            serde_yaml::from_str(content).map_err(|e| AggregatorError::TemplateParse {
                path: path.to_string(),
                reason: e.to_string(),
            })?;
        match value {
            Value::Mapping(root) => Ok(TemplateDocument { root }),
            _ => Err(AggregatorError::TemplateParse {
                path: path.to_string(),
                reason: "root is not a mapping".to_string(),
            }),
        }
    }

    /// Load and parse a template file
    pub async fn load(path: &str) -> Result<Self> {
        let content =
            tokio::fs::read_to_string(path)
                .await
                .map_err(|source| AggregatorError::TemplateRead {
                    path: path.to_string(),
                    source,
                })?;
        Self::from_str(&content, path)
    }

    /// Replace the `proxies` list, inserting it if the template has none
    pub fn set_proxies(&mut self, proxies: &[ProxyRecord]) {
        let seq = proxies.iter().map(ProxyRecord::to_value).collect();
        self.root
            .insert(Value::from(KEY_PROXIES), Value::Sequence(seq));
    }

    /// The current `proxies` list as raw values
    pub fn proxies(&self) -> &[Value] {
        self.root
            .get(KEY_PROXIES)
            .and_then(Value::as_sequence)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// All well-formed proxy groups of the template
    pub fn proxy_groups(&self) -> Vec<ProxyGroup> {
        self.root
            .get(KEY_PROXY_GROUPS)
            .and_then(Value::as_sequence)
            .map(|seq| seq.iter().filter_map(ProxyGroup::from_value).collect())
            .unwrap_or_default()
    }

    /// Overwrite the members of every group named in `apply_groups`
    ///
    /// Every matching group receives the same full list. Other groups are left
    /// as they were parsed. Returns the number of groups rewritten.
    pub fn apply_group_proxies(&mut self, apply_groups: &HashSet<String>, names: &[String]) -> usize {
        let Some(Value::Sequence(groups)) = self.root.get_mut(KEY_PROXY_GROUPS) else {
            return 0;
        };

        let mut rewritten = 0;
        for group in groups.iter_mut() {
            let Some(map) = group.as_mapping_mut() else {
                continue;
            };
            let selected = map
                .get("name")
                .and_then(Value::as_str)
                .is_some_and(|name| apply_groups.contains(name));
            if selected {
                ProxyGroup::set_members(map, names);
                rewritten += 1;
            }
        }
        rewritten
    }

    /// Serialize the document to YAML
    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(&self.root)?)
    }
}
