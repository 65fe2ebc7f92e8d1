//! Physical constant lookup table.
//!
//! The table maps camelCase keys (`speedOfLight`, `plancksConstant`, ...) to
//! [`ConstantEntry`] records. It is loaded once and never mutated, so an
//! `Arc<ConstantTable>` can be read from any number of requests without
//! locking.
//!
//! The builtin dataset is embedded at compile time; a deployment may supply
//! its own JSON file of the same shape:
//!
//! ```json
//! { "speedOfLight": { "name": "Speed of light in vacuum", "value": 299792458, "unit": "m/s", "symbol": "c" } }
//! ```

use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use std::sync::LazyLock;
use thiserror::Error;

const BUILTIN_JSON: &str = include_str!("physical_constants.json");

static BUILTIN: LazyLock<ConstantTable> = LazyLock::new(|| {
    ConstantTable::from_json(BUILTIN_JSON).expect("embedded constants table is valid")
});

/// Errors raised by the constants table.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConstantError {
    #[error("Constant with key \"{0}\" not found")]
    NotFound(String),

    #[error("Duplicate constant key: {0}")]
    DuplicateKey(String),

    #[error("Invalid constant \"{key}\": {reason}")]
    InvalidEntry { key: String, reason: String },

    #[error("Malformed constants data: {0}")]
    Malformed(String),
}

/// A single physical constant.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConstantEntry {
    pub key: String,
    pub display_name: String,
    pub value: f64,
    pub unit: String,
    pub symbol: String,
}

impl ConstantEntry {
    /// `"<value> <unit>"`, the form handed back to the model.
    ///
    /// Very large and very small magnitudes use scientific notation.
    pub fn value_with_unit(&self) -> String {
        let magnitude = self.value.abs();
        if magnitude == 0.0 || (1e-3..1e9).contains(&magnitude) {
            format!("{} {}", self.value, self.unit)
        } else {
            format!("{:e} {}", self.value, self.unit)
        }
    }
}

/// On-disk shape of one entry (the key lives in the enclosing object).
#[derive(Debug, Deserialize)]
struct RawConstant {
    name: String,
    value: f64,
    unit: String,
    #[serde(default)]
    symbol: String,
}

/// Ordered key/entry pairs, keeping duplicates so they can be rejected.
struct RawTable(Vec<(String, RawConstant)>);

impl<'de> Deserialize<'de> for RawTable {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct RawTableVisitor;

        impl<'de> Visitor<'de> for RawTableVisitor {
            type Value = RawTable;

            fn expecting(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
                f.write_str("an object mapping constant keys to entries")
            }

            fn visit_map<A>(self, mut map: A) -> Result<RawTable, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some((key, value)) = map.next_entry::<String, RawConstant>()? {
                    entries.push((key, value));
                }
                Ok(RawTable(entries))
            }
        }

        deserializer.deserialize_map(RawTableVisitor)
    }
}

/// Read-only table of physical constants.
#[derive(Debug, Clone, Default)]
pub struct ConstantTable {
    entries: BTreeMap<String, ConstantEntry>,
}

impl ConstantTable {
    /// The embedded dataset, parsed on first use.
    pub fn builtin() -> &'static ConstantTable {
        &BUILTIN
    }

    /// Parse a table from JSON, rejecting duplicate keys and non-finite values.
    pub fn from_json(json: &str) -> Result<Self, ConstantError> {
        let raw: RawTable =
            serde_json::from_str(json).map_err(|e| ConstantError::Malformed(e.to_string()))?;

        let mut entries = BTreeMap::new();
        for (key, raw) in raw.0 {
            if key.trim().is_empty() {
                return Err(ConstantError::InvalidEntry {
                    key,
                    reason: "key is empty".to_string(),
                });
            }
            if !raw.value.is_finite() {
                return Err(ConstantError::InvalidEntry {
                    key,
                    reason: "value is not finite".to_string(),
                });
            }
            if entries.contains_key(&key) {
                return Err(ConstantError::DuplicateKey(key));
            }
            let entry = ConstantEntry {
                key: key.clone(),
                display_name: raw.name,
                value: raw.value,
                unit: raw.unit,
                symbol: raw.symbol,
            };
            entries.insert(key, entry);
        }

        Ok(Self { entries })
    }

    /// Look up a constant by key. Keys are case-sensitive.
    pub fn lookup(&self, key: &str) -> Result<&ConstantEntry, ConstantError> {
        self.entries
            .get(key)
            .ok_or_else(|| ConstantError::NotFound(key.to_string()))
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// All keys in sorted order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(|k| k.as_str())
    }

    pub fn entries(&self) -> impl Iterator<Item = &ConstantEntry> {
        self.entries.values()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
