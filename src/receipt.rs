// 🧾 Receipt Model - What a client submits for scoring
// Fields stay raw strings; the points calculator parses them lazily.

use crate::error::ReceiptIdError;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use uuid::Uuid;

// ============================================================================
// ITEM
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Item {
    /// Free-form description as printed on the receipt
    #[serde(deserialize_with = "null_as_default")]
    pub short_description: String,

    /// Decimal string, e.g. "6.49"
    #[serde(deserialize_with = "null_as_default")]
    pub price: String,
}

impl Item {
    pub fn new(short_description: impl Into<String>, price: impl Into<String>) -> Self {
        Item {
            short_description: short_description.into(),
            price: price.into(),
        }
    }
}

// ============================================================================
// RECEIPT
// ============================================================================

/// A receipt as submitted to `POST /receipts/process`
///
/// Missing or null fields decode to empty values; the calculator treats
/// those the same way as any other unparsable field.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Receipt {
    #[serde(deserialize_with = "null_as_default")]
    pub retailer: String,

    /// Calendar date, "YYYY-MM-DD"
    #[serde(deserialize_with = "null_as_default")]
    pub purchase_date: String,

    /// 24h clock, "HH:MM"
    #[serde(deserialize_with = "null_as_default")]
    pub purchase_time: String,

    /// A null entry in the list becomes an empty item
    #[serde(deserialize_with = "null_items_as_default")]
    pub items: Vec<Item>,

    /// Decimal string, e.g. "35.35"
    #[serde(deserialize_with = "null_as_default")]
    pub total: String,
}

impl Receipt {
    /// Parse a receipt from its JSON representation. A bare `null` is an empty receipt.
    pub fn from_json(bytes: &[u8]) -> serde_json::Result<Self> {
        Ok(serde_json::from_slice::<Option<Receipt>>(bytes)?.unwrap_or_default())
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn null_items_as_default<'de, D>(deserializer: D) -> Result<Vec<Item>, D::Error>
where
    D: Deserializer<'de>,
{
    let items: Option<Vec<Option<Item>>> = Option::deserialize(deserializer)?;
    Ok(items
        .unwrap_or_default()
        .into_iter()
        .map(Option::unwrap_or_default)
        .collect())
}

// ============================================================================
// RECEIPT ID
// ============================================================================

/// Opaque identifier handed out by the process endpoint
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReceiptId(String);

impl ReceiptId {
    /// Fresh random identifier (UUID v4)
    pub fn generate() -> Self {
        ReceiptId(Uuid::new_v4().to_string())
    }

    /// Validate an identifier taken from a request path.
    /// Must be non-empty with no whitespace.
    pub fn parse(raw: &str) -> Result<Self, ReceiptIdError> {
        if raw.is_empty() {
            return Err(ReceiptIdError::Empty);
        }
        if raw.chars().any(char::is_whitespace) {
            return Err(ReceiptIdError::Whitespace(raw.to_string()));
        }
        Ok(ReceiptId(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ReceiptId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ============================================================================
// TESTS
// ============================================================================
