//! Shared JS interop helpers for browser adapters.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::JsValue;

#[cfg(target_arch = "wasm32")]
pub(crate) fn js_error_to_string(err: JsValue) -> String {
    if let Some(text) = err.as_string() {
        return text;
    }
    if let Ok(message) = js_sys::Reflect::get(&err, &JsValue::from_str("message")) {
        if let Some(text) = message.as_string() {
            return text;
        }
    }
    format!("{err:?}")
}

#[cfg(target_arch = "wasm32")]
pub(crate) fn describe_js_error(operation: &str, err: JsValue) -> String {
    format!("{operation} failed: {}", js_error_to_string(err))
}
