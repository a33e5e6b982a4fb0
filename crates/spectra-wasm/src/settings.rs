//! Settings bindings.
//!
//! Settings cross the boundary as plain objects with camelCase keys and
//! string enum values, e.g. `{ center: "centerPixel", shift: "shifted" }`.

use spectra_core::Settings;
use wasm_bindgen::prelude::*;

/// Default settings as a plain object.
#[wasm_bindgen]
pub fn default_settings() -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(&Settings::default()).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Effective dark-theme flag for a settings object.
///
/// `system_dark` is the host's `prefers-color-scheme: dark` result, used
/// when the coloring preference is `"system"`.
#[wasm_bindgen]
pub fn effective_dark(settings: JsValue, system_dark: bool) -> Result<bool, JsValue> {
    let settings: Settings = serde_wasm_bindgen::from_value(settings)
        .map_err(|e| JsValue::from_str(&format!("Invalid settings: {}", e)))?;
    Ok(settings.coloring.resolve(system_dark))
}
