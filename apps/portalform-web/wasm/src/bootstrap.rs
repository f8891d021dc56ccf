//! Page wiring.
//!
//! One explicit entry point attaches everything the page needs: validators
//! for the two known forms, the review-route progress tracker, and the
//! auto-dismiss timers for success flash messages. No module-level state;
//! each form gets its own validator instance.

use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, HtmlElement, Window};

use crate::progress_tracker::ProgressTracker;
use crate::validator::FormValidator;

/// Id of the student credential form.
pub const STUDENT_FORM_ID: &str = "studentForm";

/// Id of the admin login form.
pub const ADMIN_FORM_ID: &str = "adminForm";

/// Route on which the extraction review page shows the progress bar.
pub const REVIEW_PATH: &str = "/revisar";

const FLASH_DISMISS_MS: i32 = 5_000;
const FLASH_FADE_MS: i32 = 300;

/// Attach all page behavior. Missing elements degrade to no-ops.
pub fn wire_page(window: &Window, document: &Document) -> Result<(), JsValue> {
    if FormValidator::attach(document, STUDENT_FORM_ID)?.is_some()
        && window.location().pathname()? == REVIEW_PATH
    {
        let tracker = ProgressTracker::new(document);
        tracker.start_simulation(window)?;
    }

    FormValidator::attach(document, ADMIN_FORM_ID)?;

    dismiss_success_flashes(window, document)?;

    Ok(())
}

/// Schedule the fade-and-remove timers for every success flash message.
fn dismiss_success_flashes(window: &Window, document: &Document) -> Result<(), JsValue> {
    let alerts = document.query_selector_all(".alert")?;
    for index in 0..alerts.length() {
        let Some(alert) = alerts
            .get(index)
            .and_then(|node| node.dyn_into::<HtmlElement>().ok())
        else {
            continue;
        };
        if !alert.class_list().contains("alert-success") {
            continue;
        }
        schedule_dismiss(window, &alert)?;
    }
    Ok(())
}

/// Fire-and-forget: fade the banner after the dismiss delay, remove it once
/// the fade has played out. No cancellation hook once scheduled.
fn schedule_dismiss(window: &Window, alert: &HtmlElement) -> Result<(), JsValue> {
    let window_for_fade = window.clone();
    let element = alert.clone();

    let fade = Closure::once(Box::new(move || {
        let _ = element.style().set_property("opacity", "0");

        let element_for_removal = element.clone();
        let remove = Closure::once(Box::new(move || {
            element_for_removal.remove();
        }) as Box<dyn FnOnce()>);
        let _ = window_for_fade.set_timeout_with_callback_and_timeout_and_arguments_0(
            remove.as_ref().unchecked_ref(),
            FLASH_FADE_MS,
        );
        remove.forget();
    }) as Box<dyn FnOnce()>);

    window.set_timeout_with_callback_and_timeout_and_arguments_0(
        fade.as_ref().unchecked_ref(),
        FLASH_DISMISS_MS,
    )?;
    fade.forget();

    Ok(())
}

// WASM-specific tests that run in a browser environment
#[cfg(test)]
#[cfg(target_arch = "wasm32")]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn document() -> Document {
        web_sys::window().unwrap().document().unwrap()
    }

    #[wasm_bindgen_test]
    fn test_wire_page_on_empty_document_is_a_no_op() {
        let window = web_sys::window().unwrap();
        wire_page(&window, &document()).unwrap();
    }

    #[wasm_bindgen_test]
    fn test_wire_page_attaches_validator_to_student_form() {
        let document = document();
        let window = web_sys::window().unwrap();

        let form: web_sys::HtmlFormElement = document
            .create_element("form")
            .unwrap()
            .dyn_into()
            .unwrap();
        form.set_id(STUDENT_FORM_ID);

        let input: web_sys::HtmlInputElement = document
            .create_element("input")
            .unwrap()
            .dyn_into()
            .unwrap();
        input.set_name("matricola");
        input.set_attribute("required", "").unwrap();
        form.append_child(&input).unwrap();
        document.body().unwrap().append_child(&form).unwrap();

        wire_page(&window, &document).unwrap();

        // The wired blur listener decorates the empty required field.
        input
            .dispatch_event(&web_sys::Event::new("blur").unwrap())
            .unwrap();
        assert!(input.class_list().contains("error"));

        form.remove();
    }

    #[wasm_bindgen_test]
    fn test_success_flashes_survive_until_the_timer_fires() {
        let document = document();
        let window = web_sys::window().unwrap();

        let flash: HtmlElement = document
            .create_element("div")
            .unwrap()
            .dyn_into()
            .unwrap();
        flash.set_class_name("alert alert-success");
        document.body().unwrap().append_child(&flash).unwrap();

        wire_page(&window, &document).unwrap();

        // Scheduling is asynchronous; the flash is still present right away.
        assert!(flash.is_connected());
        assert_ne!(flash.style().get_property_value("opacity").unwrap(), "0");

        flash.remove();
    }

    #[wasm_bindgen_test]
    fn test_error_flashes_are_not_scheduled_for_dismissal() {
        let document = document();
        let window = web_sys::window().unwrap();

        let flash: HtmlElement = document
            .create_element("div")
            .unwrap()
            .dyn_into()
            .unwrap();
        flash.set_class_name("alert alert-danger");
        document.body().unwrap().append_child(&flash).unwrap();

        wire_page(&window, &document).unwrap();
        assert!(flash.is_connected());

        flash.remove();
    }
}
