//! Light/dark theme preference stored next to the cart.

use leptos::logging;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use storefront_host::{save_json_with, KeyValueStore};

pub const THEME_STORAGE_KEY: &str = "theme-storage";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemePreference {
    #[default]
    Light,
    Dark,
}

impl ThemePreference {
    pub fn toggle(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    /// Value for the document root's `data-theme` attribute.
    pub fn as_attribute(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }
}

/// Loads the stored theme, falling back to [`ThemePreference::Light`] when absent or unreadable.
///
/// Accepts both the bare value (`"dark"`) and the older wrapped layout
/// (`{"state":{"theme":"dark"},"version":0}`).
pub async fn load_theme<S: KeyValueStore + ?Sized>(store: &S) -> ThemePreference {
    let raw = match store.load_raw(THEME_STORAGE_KEY).await {
        Ok(Some(raw)) => raw,
        Ok(None) => return ThemePreference::default(),
        Err(err) => {
            logging::warn!("theme load failed: {err}");
            return ThemePreference::default();
        }
    };

    match decode_theme(&raw) {
        Some(theme) => theme,
        None => {
            logging::warn!("theme value unreadable, using light");
            ThemePreference::default()
        }
    }
}

fn decode_theme(raw: &str) -> Option<ThemePreference> {
    let value: Value = serde_json::from_str(raw).ok()?;
    let value = match value {
        Value::Object(mut root) => root
            .remove("state")
            .and_then(|state| state.get("theme").cloned())?,
        other => other,
    };
    serde_json::from_value(value).ok()
}

/// Stores the theme as a bare JSON string.
///
/// # Errors
///
/// Returns an error when the backing store rejects the write.
pub async fn save_theme<S: KeyValueStore + ?Sized>(
    store: &S,
    theme: ThemePreference,
) -> Result<(), String> {
    save_json_with(store, THEME_STORAGE_KEY, &theme).await
}

#[cfg(test)]
mod tests {
    use futures::executor::block_on;
    use pretty_assertions::assert_eq;
    use storefront_host::{MemoryKeyValueStore, NoopKeyValueStore};

    use super::*;

    #[test]
    fn toggle_flips_between_variants() {
        assert_eq!(ThemePreference::Light.toggle(), ThemePreference::Dark);
        assert_eq!(ThemePreference::Dark.toggle().toggle(), ThemePreference::Dark);
        assert_eq!(ThemePreference::Dark.as_attribute(), "dark");
    }

    #[test]
    fn saved_theme_loads_back() {
        let store = MemoryKeyValueStore::default();
        block_on(save_theme(&store, ThemePreference::Dark)).expect("save");

        assert_eq!(store.raw(THEME_STORAGE_KEY).as_deref(), Some("\"dark\""));
        assert_eq!(block_on(load_theme(&store)), ThemePreference::Dark);
    }

    #[test]
    fn wrapped_layout_is_accepted() {
        let store = MemoryKeyValueStore::default();
        store.insert_raw(THEME_STORAGE_KEY, r#"{"state":{"theme":"dark"},"version":0}"#);

        assert_eq!(block_on(load_theme(&store)), ThemePreference::Dark);
    }

    #[test]
    fn unreadable_or_absent_values_fall_back_to_light() {
        assert_eq!(block_on(load_theme(&NoopKeyValueStore)), ThemePreference::Light);

        for raw in ["", "\"sepia\"", "{\"state\":{}}", "42", "{"] {
            let store = MemoryKeyValueStore::default();
            store.insert_raw(THEME_STORAGE_KEY, raw);
            assert_eq!(block_on(load_theme(&store)), ThemePreference::Light, "raw: {raw}");
        }
    }

    #[test]
    fn theme_key_is_separate_from_cart_key() {
        let store = MemoryKeyValueStore::default();
        block_on(save_theme(&store, ThemePreference::Dark)).expect("save");
        assert_eq!(store.keys(), vec![THEME_STORAGE_KEY.to_string()]);
        assert_ne!(THEME_STORAGE_KEY, crate::model::CART_STORAGE_KEY);
    }
}
