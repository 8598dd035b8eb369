//! Tagged ledger values
//!
//! Every ledger entry is one of three shapes. The shape decides how
//! [`Lock::add`](super::Lock::add) combines a new value with the stored one:
//!
//! | stored \ new | Mapping       | Sequence  | Scalar    |
//! |--------------|---------------|-----------|-----------|
//! | Mapping      | shallow merge | overwrite | overwrite |
//! | Sequence     | overwrite     | overwrite | overwrite |
//! | Scalar       | overwrite     | overwrite | overwrite |

use serde_json::{Map, Value};

/// A value stored under one ledger key
#[derive(Debug, Clone, PartialEq)]
pub enum LedgerValue {
    /// Any non-container JSON value (string, number, bool, null)
    Scalar(Value),
    /// Ordered string-keyed mapping
    Mapping(Map<String, Value>),
    /// Ordered list
    Sequence(Vec<Value>),
}

impl LedgerValue {
    /// Combine `self` (the stored value) with `incoming` following the merge table
    pub fn merge(self, incoming: LedgerValue) -> LedgerValue {
        match (self, incoming) {
            (LedgerValue::Mapping(mut stored), LedgerValue::Mapping(new)) => {
                for (key, value) in new {
                    stored.insert(key, value);
                }
                LedgerValue::Mapping(stored)
            }
            (_, incoming) => incoming,
        }
    }

    pub fn as_mapping(&self) -> Option<&Map<String, Value>> {
        match self {
            LedgerValue::Mapping(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_sequence(&self) -> Option<&[Value]> {
        match self {
            LedgerValue::Sequence(items) => Some(items),
            _ => None,
        }
    }
}

impl From<Value> for LedgerValue {
    fn from(value: Value) -> Self {
        match value {
            Value::Object(map) => LedgerValue::Mapping(map),
            Value::Array(items) => LedgerValue::Sequence(items),
            scalar => LedgerValue::Scalar(scalar),
        }
    }
}

impl From<LedgerValue> for Value {
    fn from(value: LedgerValue) -> Self {
        match value {
            LedgerValue::Scalar(scalar) => scalar,
            LedgerValue::Mapping(map) => Value::Object(map),
            LedgerValue::Sequence(items) => Value::Array(items),
        }
    }
}

impl From<Map<String, Value>> for LedgerValue {
    fn from(map: Map<String, Value>) -> Self {
        LedgerValue::Mapping(map)
    }
}

impl From<Vec<String>> for LedgerValue {
    fn from(items: Vec<String>) -> Self {
        LedgerValue::Sequence(items.into_iter().map(Value::String).collect())
    }
}

impl From<&str> for LedgerValue {
    fn from(text: &str) -> Self {
        LedgerValue::Scalar(Value::String(text.to_string()))
    }
}
