use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Member attributes that can be placed into a generated table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKey {
    MemberNo,
    FirstName,
    LastName,
    NationalId,
    Phone,
    Email,
    City,
    District,
    Occupation,
    JoinedAt,
    DuesStatus,
}

impl FieldKey {
    pub const ALL: [FieldKey; 11] = [
        FieldKey::MemberNo,
        FieldKey::FirstName,
        FieldKey::LastName,
        FieldKey::NationalId,
        FieldKey::Phone,
        FieldKey::Email,
        FieldKey::City,
        FieldKey::District,
        FieldKey::Occupation,
        FieldKey::JoinedAt,
        FieldKey::DuesStatus,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            FieldKey::MemberNo => "member_no",
            FieldKey::FirstName => "first_name",
            FieldKey::LastName => "last_name",
            FieldKey::NationalId => "national_id",
            FieldKey::Phone => "phone",
            FieldKey::Email => "email",
            FieldKey::City => "city",
            FieldKey::District => "district",
            FieldKey::Occupation => "occupation",
            FieldKey::JoinedAt => "joined_at",
            FieldKey::DuesStatus => "dues_status",
        }
    }
}

impl fmt::Display for FieldKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("Unknown field key: {0}")]
pub struct UnknownFieldKey(pub String);

impl FromStr for FieldKey {
    type Err = UnknownFieldKey;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FieldKey::ALL
            .into_iter()
            .find(|key| key.as_str() == s)
            .ok_or_else(|| UnknownFieldKey(s.to_string()))
    }
}

/// One selectable field with its display label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldEntry {
    pub key: FieldKey,
    pub label: String,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CatalogError {
    #[error("Field catalog is empty")]
    Empty,
    #[error("Field {0} appears more than once in the catalog")]
    DuplicateKey(FieldKey),
}

/// Ordered list of fields an author may pick into a table.
///
/// The order is the order shown in the field picker; table column order is
/// decided by the author's selection order, not by the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldCatalog {
    entries: Vec<FieldEntry>,
}

impl FieldCatalog {
    pub fn new(entries: Vec<FieldEntry>) -> Result<Self, CatalogError> {
        if entries.is_empty() {
            return Err(CatalogError::Empty);
        }
        for (i, entry) in entries.iter().enumerate() {
            if entries[..i].iter().any(|prev| prev.key == entry.key) {
                return Err(CatalogError::DuplicateKey(entry.key));
            }
        }
        Ok(Self { entries })
    }

    /// The stock member catalog with Turkish labels.
    pub fn default_members() -> Self {
        let labels = [
            (FieldKey::MemberNo, "Üye No"),
            (FieldKey::FirstName, "Ad"),
            (FieldKey::LastName, "Soyad"),
            (FieldKey::NationalId, "TC Kimlik No"),
            (FieldKey::Phone, "Telefon"),
            (FieldKey::Email, "E-posta"),
            (FieldKey::City, "İl"),
            (FieldKey::District, "İlçe"),
            (FieldKey::Occupation, "Meslek"),
            (FieldKey::JoinedAt, "Üyelik Tarihi"),
            (FieldKey::DuesStatus, "Aidat Durumu"),
        ];
        Self {
            entries: labels
                .into_iter()
                .map(|(key, label)| FieldEntry {
                    key,
                    label: label.to_string(),
                })
                .collect(),
        }
    }

    pub fn entries(&self) -> &[FieldEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&FieldEntry> {
        self.entries.get(index)
    }

    pub fn contains(&self, key: FieldKey) -> bool {
        self.entries.iter().any(|entry| entry.key == key)
    }

    /// Display label for `key`; falls back to the key name for fields outside the catalog.
    pub fn label(&self, key: FieldKey) -> &str {
        self.entries
            .iter()
            .find(|entry| entry.key == key)
            .map_or(key.as_str(), |entry| entry.label.as_str())
    }
}

impl Default for FieldCatalog {
    fn default() -> Self {
        Self::default_members()
    }
}
