use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::field::FieldKey;

/// A record fetched from the member store. Immutable once fetched; shared
/// between the gateway and the session as `Arc<EntityRecord>`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityRecord {
    pub id: String,
    #[serde(flatten)]
    pub fields: BTreeMap<FieldKey, String>,
}

impl EntityRecord {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            fields: BTreeMap::new(),
        }
    }

    /// Builder-style setter used when assembling records by hand.
    #[must_use]
    pub fn with(mut self, key: FieldKey, value: impl Into<String>) -> Self {
        self.fields.insert(key, value.into());
        self
    }

    pub fn value(&self, key: FieldKey) -> Option<&str> {
        self.fields.get(&key).map(String::as_str)
    }

    /// "First Last" for list display, falling back to the record id.
    pub fn display_name(&self) -> String {
        let name = [FieldKey::FirstName, FieldKey::LastName]
            .into_iter()
            .filter_map(|key| self.value(key))
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(" ");
        if name.is_empty() {
            self.id.clone()
        } else {
            name
        }
    }
}
