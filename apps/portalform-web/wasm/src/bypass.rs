//! Diagnostic submit bypass.
//!
//! Troubleshooting variant of the validator: logs the credential fields and
//! always lets the submission through. A deployment activates either this
//! module (via `bootDebug`) or the validator (via `boot`); loading both
//! would attach two submit listeners to the same form.

use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{console, Document, Event, HtmlInputElement};

use crate::bootstrap::STUDENT_FORM_ID;

/// Attach the bypass submit listener to the student form.
pub fn attach(document: &Document) -> Result<(), JsValue> {
    console::log_1(&"Validation script loaded - VALIDATION DISABLED".into());

    let Some(form) = document.get_element_by_id(STUDENT_FORM_ID) else {
        console::log_1(&"Form not found".into());
        return Ok(());
    };
    console::log_1(&"Form found".into());

    let doc = document.clone();
    let on_submit = Closure::wrap(Box::new(move |_event: Event| {
        console::log_1(&"Form submission detected - ALLOWING ALL SUBMISSIONS".into());

        let matricola = field_value(&doc, "matricola");
        let password = field_value(&doc, "password");

        console::log_1(&format!("Matricola: {}", matricola).into());
        console::log_1(&format!("Password length: {}", password.chars().count()).into());
        console::log_1(&"Form validation BYPASSED - allowing submission".into());
    }) as Box<dyn FnMut(Event)>);
    form.add_event_listener_with_callback("submit", on_submit.as_ref().unchecked_ref())?;
    on_submit.forget();

    Ok(())
}

fn field_value(document: &Document, id: &str) -> String {
    document
        .get_element_by_id(id)
        .and_then(|element| element.dyn_into::<HtmlInputElement>().ok())
        .map(|input| input.value().trim().to_string())
        .unwrap_or_default()
}
