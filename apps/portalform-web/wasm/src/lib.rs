//! Portalform - client-side validation and submission UX for the student
//! portal forms.
//!
//! Compiled to WebAssembly. The hosting page calls [`boot`] once the
//! document is interactive; troubleshooting deployments call [`boot_debug`]
//! instead, never both.

use wasm_bindgen::prelude::*;

pub mod bootstrap;
pub mod bypass;
pub mod decoration;
pub mod progress_tracker;
pub mod validator;

pub use progress_tracker::ProgressTracker;
pub use validator::FormValidator;

#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    web_sys::console::log_1(&"Portalform WASM initialized".into());
}

fn page() -> Result<(web_sys::Window, web_sys::Document), JsValue> {
    let window =
        web_sys::window().ok_or_else(|| JsValue::from_str("No window object available"))?;
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("No document object available"))?;
    Ok((window, document))
}

/// Wire validators for the known forms, the review-route progress tracker,
/// and auto-dismiss for success flash messages. Call once the document is
/// ready.
#[wasm_bindgen]
pub fn boot() -> Result<(), JsValue> {
    let (window, document) = page()?;
    bootstrap::wire_page(&window, &document)
}

/// Troubleshooting entry: field values are logged and every submission is
/// allowed. Mutually exclusive with [`boot`].
#[wasm_bindgen(js_name = bootDebug)]
pub fn boot_debug() -> Result<(), JsValue> {
    let (_, document) = page()?;
    bypass::attach(&document)
}

/// Restore a form's submit control after a cancelled round-trip, e.g. a
/// back-navigation onto a page left in the busy state.
#[wasm_bindgen(js_name = resetSubmitState)]
pub fn reset_submit_state(form_id: &str) -> Result<(), JsValue> {
    let (_, document) = page()?;
    validator::reset_submit_state(&document, form_id)
}
