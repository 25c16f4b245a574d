use wasm_bindgen::prelude::*;

use crate::config::ConvertOptions;

#[wasm_bindgen]
pub fn convert_hud(json: &str) -> Result<String, JsValue> {
    crate::convert_json(json, &ConvertOptions::new())
        .map_err(|e| JsValue::from_str(&e.to_string()))
}
