//! Cart envelope encoding, schema migration, and boot rehydration.
//!
//! The persisted form is `{"schemaVersion": N, "items": [...]}` under a single storage key.
//! Rehydration is total: whatever the backing store holds, it produces a usable list of lines and,
//! when something had to be discarded, a [`HydrationError`] describing why.

use leptos::logging;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use storefront_host::KeyValueStore;
use thiserror::Error;

use crate::model::{CartLine, CART_SCHEMA_VERSION};

const SCHEMA_VERSION_FIELD: &str = "schemaVersion";
const ITEMS_FIELD: &str = "items";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
/// Versioned wrapper written to durable storage.
pub struct CartEnvelope {
    /// Schema version of `items`.
    pub schema_version: u32,
    /// Persisted cart lines in insertion order.
    pub items: Vec<CartLine>,
}

impl CartEnvelope {
    /// Wraps `items` at the current schema version.
    pub fn current(items: &[CartLine]) -> Self {
        Self {
            schema_version: CART_SCHEMA_VERSION,
            items: items.to_vec(),
        }
    }
}

/// One forward migration step over the raw envelope object.
///
/// Steps upgrade from `from_version` to `from_version + 1` and must be total: they repair or
/// default whatever they cannot interpret rather than failing.
pub struct CartMigration {
    /// Version this step upgrades from.
    pub from_version: u64,
    /// Pure transformation of the envelope object.
    pub migrate: fn(Map<String, Value>) -> Map<String, Value>,
}

/// Ordered migration steps, one per schema version below [`CART_SCHEMA_VERSION`].
pub const CART_MIGRATIONS: &[CartMigration] = &[CartMigration {
    from_version: 0,
    migrate: default_missing_items,
}];

fn default_missing_items(mut envelope: Map<String, Value>) -> Map<String, Value> {
    if matches!(envelope.get(ITEMS_FIELD), None | Some(Value::Null)) {
        envelope.insert(ITEMS_FIELD.to_string(), Value::Array(Vec::new()));
    }
    envelope
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
/// Reasons persisted cart data could not be adopted in full.
pub enum HydrationError {
    /// The backing store read failed.
    #[error("cart storage read failed: {0}")]
    Storage(String),
    /// The stored text is not JSON.
    #[error("cart storage holds malformed data: {0}")]
    Malformed(String),
    /// The stored envelope was written by a newer schema.
    #[error("cart schema version {found} is newer than supported version {current}")]
    UnsupportedVersion {
        /// Version found in storage.
        found: u64,
        /// Version this build understands.
        current: u32,
    },
    /// No migration step upgrades from this version.
    #[error("no cart migration from schema version {0}")]
    MissingMigration(u64),
    /// The envelope does not have the expected structure.
    #[error("cart envelope has an invalid shape: {0}")]
    InvalidShape(String),
    /// Some lines failed validation and were dropped.
    #[error("{discarded} persisted cart line(s) failed validation and were dropped")]
    InvalidLines {
        /// Number of dropped lines.
        discarded: usize,
    },
}

#[derive(Debug, Clone, PartialEq, Default)]
/// Result of rehydrating the cart from storage.
pub struct Rehydrated {
    /// Lines to adopt as the initial cart.
    pub items: Vec<CartLine>,
    /// Set when any stored data could not be adopted.
    pub error: Option<HydrationError>,
}

impl Rehydrated {
    fn failed(error: HydrationError) -> Self {
        logging::warn!("cart rehydration fell back to an empty cart: {error}");
        Self {
            items: Vec::new(),
            error: Some(error),
        }
    }
}

/// Serializes `items` as a current-version envelope.
///
/// # Errors
///
/// Returns an error when JSON serialization fails.
pub fn encode_envelope(items: &[CartLine]) -> Result<String, String> {
    serde_json::to_string(&CartEnvelope::current(items)).map_err(|e| e.to_string())
}

/// Upgrades a raw envelope object from `from_version` to [`CART_SCHEMA_VERSION`].
///
/// # Errors
///
/// Returns [`HydrationError::UnsupportedVersion`] for versions newer than current and
/// [`HydrationError::MissingMigration`] when `migrations` has no step for an intermediate version.
pub fn migrate_envelope(
    mut envelope: Map<String, Value>,
    from_version: u64,
    migrations: &[CartMigration],
) -> Result<Map<String, Value>, HydrationError> {
    let current = u64::from(CART_SCHEMA_VERSION);
    if from_version > current {
        return Err(HydrationError::UnsupportedVersion {
            found: from_version,
            current: CART_SCHEMA_VERSION,
        });
    }

    let mut version = from_version;
    while version < current {
        let step = migrations
            .iter()
            .find(|step| step.from_version == version)
            .ok_or(HydrationError::MissingMigration(version))?;
        envelope = (step.migrate)(envelope);
        version += 1;
        logging::log!("migrated cart envelope to schema version {version}");
    }

    envelope.insert(SCHEMA_VERSION_FIELD.to_string(), Value::from(current));
    Ok(envelope)
}

/// Decodes, migrates, and validates stored cart text. Never fails; see [`Rehydrated`].
pub fn decode_cart(raw: &str) -> Rehydrated {
    decode_cart_with(raw, CART_MIGRATIONS)
}

fn decode_cart_with(raw: &str, migrations: &[CartMigration]) -> Rehydrated {
    let root = match serde_json::from_str::<Value>(raw) {
        Ok(Value::Object(root)) => match lift_legacy_layout(root) {
            Ok(root) => root,
            Err(err) => return Rehydrated::failed(err),
        },
        Ok(_) => {
            return Rehydrated::failed(HydrationError::InvalidShape(
                "root is not an object".to_string(),
            ))
        }
        Err(err) => return Rehydrated::failed(HydrationError::Malformed(err.to_string())),
    };

    let envelope = match persisted_version(&root)
        .and_then(|version| migrate_envelope(root, version, migrations))
    {
        Ok(envelope) => envelope,
        Err(err) => return Rehydrated::failed(err),
    };

    let Some(Value::Array(raw_lines)) = envelope.get(ITEMS_FIELD) else {
        return Rehydrated::failed(HydrationError::InvalidShape(
            "items is not an array".to_string(),
        ));
    };

    let (items, discarded) = validate_lines(raw_lines);
    let error = (discarded > 0).then(|| {
        let error = HydrationError::InvalidLines { discarded };
        logging::warn!("cart rehydration kept {} line(s): {error}", items.len());
        error
    });
    Rehydrated { items, error }
}

/// Reads the cart from `store` under `key` and rehydrates it.
///
/// An absent key yields an empty cart with no error.
pub async fn rehydrate_cart<S: KeyValueStore + ?Sized>(store: &S, key: &str) -> Rehydrated {
    match store.load_raw(key).await {
        Ok(None) => Rehydrated::default(),
        Ok(Some(raw)) => decode_cart(&raw),
        Err(err) => Rehydrated::failed(HydrationError::Storage(err)),
    }
}

/// Rewrites `{"state": {...}, "version": N}` (the layout of earlier storefront builds) into the
/// flat envelope shape. Objects that already carry `schemaVersion`, or carry no `state`, pass
/// through unchanged.
fn lift_legacy_layout(mut root: Map<String, Value>) -> Result<Map<String, Value>, HydrationError> {
    if root.contains_key(SCHEMA_VERSION_FIELD) {
        return Ok(root);
    }
    let mut lifted = match root.remove("state") {
        None => return Ok(root),
        Some(Value::Object(state)) => state,
        Some(_) => {
            return Err(HydrationError::InvalidShape(
                "state is not an object".to_string(),
            ))
        }
    };

    lifted.remove(SCHEMA_VERSION_FIELD);
    let version = root.remove("version").unwrap_or_else(|| Value::from(0));
    lifted.insert(SCHEMA_VERSION_FIELD.to_string(), version);
    Ok(lifted)
}

fn persisted_version(root: &Map<String, Value>) -> Result<u64, HydrationError> {
    match root.get(SCHEMA_VERSION_FIELD) {
        None => Ok(0),
        Some(value) => value.as_u64().ok_or_else(|| {
            HydrationError::InvalidShape(format!("schemaVersion {value} is not a version number"))
        }),
    }
}

/// Decodes each line on its own, drops the ones that fail, and merges repeated product ids.
///
/// A repeat whose merged quantity would overflow is dropped too.
fn validate_lines(raw_lines: &[Value]) -> (Vec<CartLine>, usize) {
    let mut items: Vec<CartLine> = Vec::with_capacity(raw_lines.len());
    let mut discarded = 0;

    for (index, raw_line) in raw_lines.iter().enumerate() {
        let line = match serde_json::from_value::<CartLine>(raw_line.clone()) {
            Ok(line) if line.quantity >= 1 => line,
            Ok(_) => {
                logging::warn!("dropping persisted cart line {index}: quantity is zero");
                discarded += 1;
                continue;
            }
            Err(err) => {
                logging::warn!("dropping persisted cart line {index}: {err}");
                discarded += 1;
                continue;
            }
        };

        match items.iter_mut().find(|kept| kept.id() == line.id()) {
            Some(kept) => match kept.quantity.checked_add(line.quantity) {
                Some(quantity) => kept.quantity = quantity,
                None => {
                    logging::warn!(
                        "dropping persisted cart line {index}: merged quantity for product {} overflows",
                        line.id()
                    );
                    discarded += 1;
                }
            },
            None => items.push(line),
        }
    }

    (items, discarded)
}
