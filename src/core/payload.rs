use serde::de::DeserializeOwned;
use serde_json::Value;

/// The two response shapes the exchange uses: a record or list wrapped under an
/// endpoint-specific key (`reqAlphabetical`, `reqSymbolInfo`, ...), or the bare payload.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    /// The payload was found under `key`.
    Nested {
        /// The key the payload was found under.
        key: String,
        /// The unwrapped payload.
        value: Value,
    },
    /// The body itself is the payload.
    Bare(Value),
}

impl Payload {
    /// Decides the shape of `body` with respect to `key`.
    #[must_use]
    pub fn resolve(body: Value, key: &str) -> Self {
        match body {
            Value::Object(mut map) if map.contains_key(key) => {
                let value = map.remove(key).unwrap_or(Value::Null);
                Payload::Nested {
                    key: key.to_string(),
                    value,
                }
            }
            other => Payload::Bare(other),
        }
    }

    #[must_use]
    pub fn is_nested(&self) -> bool {
        matches!(self, Payload::Nested { .. })
    }

    /// The payload value regardless of shape.
    #[must_use]
    pub fn into_value(self) -> Value {
        match self {
            Payload::Nested { value, .. } | Payload::Bare(value) => value,
        }
    }

    /// Interprets the payload as a list of `T`.
    ///
    /// A `null` payload is an empty list; elements that do not decode as `T` are skipped.
    /// A payload that is neither a list nor `null` yields `None`.
    #[must_use]
    pub fn into_list<T: DeserializeOwned>(self) -> Option<Vec<T>> {
        match self.into_value() {
            Value::Array(items) => Some(
                items
                    .into_iter()
                    .filter_map(|v| serde_json::from_value(v).ok())
                    .collect(),
            ),
            Value::Null => Some(Vec::new()),
            _ => None,
        }
    }
}
