use serde_yaml::{Mapping, Value};

/// A `proxy-groups` entry of a Clash template
#[derive(Debug, Clone, PartialEq)]
pub struct ProxyGroup {
    /// Name of the proxy group
    pub name: String,
    /// Member proxy names
    pub proxies: Vec<String>,
}

impl ProxyGroup {
    /// Read a group from a YAML value
    ///
    /// Returns `None` unless the value is a mapping with a string `name`.
    /// Non-string members of `proxies` are ignored.
    pub fn from_value(value: &Value) -> Option<Self> {
        let map = value.as_mapping()?;
        let name = map.get("name")?.as_str()?.to_string();
        let proxies = map
            .get("proxies")
            .and_then(Value::as_sequence)
            .map(|seq| {
                seq.iter()
                    .filter_map(Value::as_str)
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();
        Some(ProxyGroup { name, proxies })
    }

    /// Overwrite the `proxies` member list of a raw group mapping
    pub fn set_members(map: &mut Mapping, names: &[String]) {
        let members = names.iter().cloned().map(Value::String).collect();
        map.insert(Value::from("proxies"), Value::Sequence(members));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_value() {
        let value: Value = serde_yaml::from_str(
            r#"
name: Auto
type: url-test
proxies: [A, B, 3]
url: http://www.gstatic.com/generate_204
"#,
        )
        .unwrap();
        let group = ProxyGroup::from_value(&value).unwrap();
        assert_eq!(group.name, "Auto");
        assert_eq!(group.proxies, vec!["A", "B"]);
    }

    #[test]
    fn test_from_value_without_name() {
        let value: Value = serde_yaml::from_str("type: select").unwrap();
        assert!(ProxyGroup::from_value(&value).is_none());
    }

    #[test]
    fn test_set_members_keeps_key_position() {
        let mut value: Value =
            serde_yaml::from_str("name: Auto\nproxies: [old]\ntype: select").unwrap();
        let map = value.as_mapping_mut().unwrap();
        ProxyGroup::set_members(map, &["A".to_string(), "B".to_string()]);
        assert_eq!(
            serde_yaml::to_string(&value).unwrap(),
            "name: Auto\nproxies:\n- A\n- B\ntype: select\n"
        );
    }
}
