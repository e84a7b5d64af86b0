use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Identifier a node hands back when a subscription is opened.
///
/// Nodes use either integers or opaque strings; both are kept verbatim so the
/// id can be echoed back in the unsubscribe call.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SubscriptionId {
    Number(u64),
    Text(String),
}

impl SubscriptionId {
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Number(number) => number.as_u64().map(SubscriptionId::Number),
            Value::String(text) => Some(SubscriptionId::Text(text.clone())),
            _ => None,
        }
    }

    pub fn to_value(&self) -> Value {
        match self {
            SubscriptionId::Number(number) => Value::from(*number),
            SubscriptionId::Text(text) => Value::from(text.as_str()),
        }
    }
}

impl fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SubscriptionId::Number(number) => write!(f, "{number}"),
            SubscriptionId::Text(text) => f.write_str(text),
        }
    }
}

impl From<u64> for SubscriptionId {
    fn from(value: u64) -> Self {
        SubscriptionId::Number(value)
    }
}

impl From<&str> for SubscriptionId {
    fn from(value: &str) -> Self {
        SubscriptionId::Text(value.to_owned())
    }
}

impl From<String> for SubscriptionId {
    fn from(value: String) -> Self {
        SubscriptionId::Text(value)
    }
}
