//! Key/value data mappings and their merge into request data.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One row of the element's data-mapping table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataMapping {
    /// Request-data key to set.
    pub key: String,
    /// Value to store under the key.
    pub value: Value,
}

impl DataMapping {
    /// Creates a mapping entry.
    #[must_use]
    pub fn new(key: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// Merges mappings into request data.
///
/// Existing keys keep their position and take the mapped value; new keys
/// are appended in mapping order. A later mapping for the same key wins.
/// Keys are matched after trimming surrounding whitespace.
pub fn merge_request_data(data: &mut Map<String, Value>, mappings: &[DataMapping]) {
    for mapping in mappings {
        data.insert(mapping.key.trim().to_owned(), mapping.value.clone());
    }
}
