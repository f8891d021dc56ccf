//! Inline field decoration: `error`/`success` marker classes plus the
//! `.field-error` message node appended to the field's container.
//!
//! Every evaluation clears the previous decoration first, so repeated
//! validation of the same field never stacks message nodes.

use wasm_bindgen::JsValue;
use web_sys::{Document, HtmlInputElement};

/// Marker class for a rejected field.
pub const ERROR_CLASS: &str = "error";

/// Marker class for an accepted field.
pub const SUCCESS_CLASS: &str = "success";

/// Class of the message node placed under the field.
pub const FIELD_ERROR_CLASS: &str = "field-error";

const FIELD_ERROR_SELECTOR: &str = ".field-error";

/// Mark a field invalid and append its message as the container's last child.
pub fn mark_invalid(
    document: &Document,
    input: &HtmlInputElement,
    message: &str,
) -> Result<(), JsValue> {
    input.class_list().add_1(ERROR_CLASS)?;
    input.class_list().remove_1(SUCCESS_CLASS)?;

    if let Some(container) = input.parent_element() {
        let node = document.create_element("div")?;
        node.set_class_name(FIELD_ERROR_CLASS);
        node.set_text_content(Some(message));
        container.append_child(&node)?;
    }
    Ok(())
}

/// Mark a field valid.
pub fn mark_valid(input: &HtmlInputElement) -> Result<(), JsValue> {
    input.class_list().add_1(SUCCESS_CLASS)?;
    input.class_list().remove_1(ERROR_CLASS)?;
    Ok(())
}

/// Remove both marker classes and any message node. Safe to call repeatedly
/// and on undecorated fields.
pub fn clear(input: &HtmlInputElement) -> Result<(), JsValue> {
    input.class_list().remove_2(ERROR_CLASS, SUCCESS_CLASS)?;

    if let Some(container) = input.parent_element() {
        if let Some(node) = container.query_selector(FIELD_ERROR_SELECTOR)? {
            node.remove();
        }
    }
    Ok(())
}
