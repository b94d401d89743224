use serde::{Serialize, Serializer};
use serde_yaml::{Mapping, Value};

/// A single proxy entry from a Clash `proxies` list
///
/// The record keeps the original mapping so that protocol specific fields
/// (server, port, uuid, ws-opts, ...) are written back untouched; only `name`
/// and `type` are lifted into typed fields.
#[derive(Debug, Clone, PartialEq)]
pub struct ProxyRecord {
    /// Display name, `None` unless the source carried a string name
    pub name: Option<String>,
    /// Protocol type such as `vmess` or `trojan`
    pub proxy_type: String,
    fields: Mapping,
}

impl ProxyRecord {
    /// Create a record with just a type and a name
    pub fn new(proxy_type: &str, name: &str) -> Self {
        let mut fields = Mapping::new();
        fields.insert(Value::from("name"), Value::from(name));
        fields.insert(Value::from("type"), Value::from(proxy_type));
        ProxyRecord {
            name: Some(name.to_string()),
            proxy_type: proxy_type.to_string(),
            fields,
        }
    }

    /// Validate a YAML value as a proxy record
    ///
    /// Returns `None` unless the value is a mapping with a string `type`.
    pub fn from_value(value: &Value) -> Option<Self> {
        let fields = value.as_mapping()?;
        let proxy_type = fields.get("type")?.as_str()?.to_string();
        let name = fields
            .get("name")
            .and_then(Value::as_str)
            .map(str::to_string);
        Some(ProxyRecord {
            name,
            proxy_type,
            fields: fields.clone(),
        })
    }

    /// Whether the source mapping has a `name` key at all, of any type
    pub fn has_name_field(&self) -> bool {
        self.fields.contains_key("name")
    }

    /// The name if it is present and non-empty
    pub fn usable_name(&self) -> Option<&str> {
        self.name.as_deref().filter(|name| !name.is_empty())
    }

    /// Assign a new name to the record
    pub fn set_name(&mut self, name: String) {
        self.fields
            .insert(Value::from("name"), Value::String(name.clone()));
        self.name = Some(name);
    }

    /// Look up any field of the underlying mapping
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// Convert back into a YAML value
    pub fn to_value(&self) -> Value {
        Value::Mapping(self.fields.clone())
    }
}

impl Serialize for ProxyRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.fields.serialize(serializer)
    }
}
