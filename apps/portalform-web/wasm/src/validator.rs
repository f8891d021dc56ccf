//! Per-form validation behavior.
//!
//! A [`FormValidator`] binds to one form by id and owns that form's error
//! state: blur re-validates a field, input clears its decoration, submit
//! re-validates everything and either blocks with a banner or switches the
//! submit control into the busy state and lets the browser submit.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use chrono::Utc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{
    console, Document, Element, Event, HtmlButtonElement, HtmlFormElement, HtmlInputElement,
    ScrollBehavior, ScrollIntoViewOptions, ScrollLogicalPosition,
};

use portalform_core::{evaluate_field, FieldOutcome};

use crate::decoration;

/// Banner text shown above the form when submission is blocked.
pub const GENERAL_ERROR_MESSAGE: &str = "Por favor, corrige los errores en el formulario";

/// Id of the optional external progress indicator activated on submit.
pub const LOADING_INDICATOR_ID: &str = "loadingIndicator";

const GENERAL_ERROR_SELECTOR: &str = ".form-general-error";
const SUBMIT_BUTTON_SELECTOR: &str = "button[type=\"submit\"]";
const ORIGINAL_TEXT_KEY: &str = "originalText";

const BUSY_BUTTON_HTML: &str =
    "<span class=\"spinner-border spinner-border-sm\" role=\"status\"></span> Procesando...";

/// Validation behavior attached to one form.
pub struct FormValidator {
    inner: Rc<ValidatorInner>,
}

struct ValidatorInner {
    document: Document,
    form: HtmlFormElement,
    errors: RefCell<HashMap<String, String>>,
}

impl FormValidator {
    /// Attach to the form with the given id.
    ///
    /// A missing id, or an element that is not a form, degrades to
    /// `Ok(None)`: the page keeps working without validation.
    pub fn attach(document: &Document, form_id: &str) -> Result<Option<Self>, JsValue> {
        let Some(element) = document.get_element_by_id(form_id) else {
            return Ok(None);
        };
        let form: HtmlFormElement = match element.dyn_into() {
            Ok(form) => form,
            Err(_) => return Ok(None),
        };

        let inner = Rc::new(ValidatorInner {
            document: document.clone(),
            form,
            errors: RefCell::new(HashMap::new()),
        });

        {
            let state = Rc::clone(&inner);
            let on_submit = Closure::wrap(Box::new(move |event: Event| {
                state.handle_submit(&event);
            }) as Box<dyn FnMut(Event)>);
            inner
                .form
                .add_event_listener_with_callback("submit", on_submit.as_ref().unchecked_ref())?;
            on_submit.forget();
        }

        inner.bind_realtime()?;

        Ok(Some(Self { inner }))
    }

    /// Snapshot of the current error messages, keyed by field name.
    pub fn error_messages(&self) -> HashMap<String, String> {
        self.inner.errors.borrow().clone()
    }
}

impl ValidatorInner {
    /// Wire blur (validate) and input (clear) listeners on every required input.
    fn bind_realtime(self: &Rc<Self>) -> Result<(), JsValue> {
        for input in required_inputs(&self.form)? {
            let state = Rc::clone(self);
            let field = input.clone();
            let on_blur = Closure::wrap(Box::new(move |_event: Event| {
                state.validate_field(&field);
            }) as Box<dyn FnMut(Event)>);
            input.add_event_listener_with_callback("blur", on_blur.as_ref().unchecked_ref())?;
            on_blur.forget();

            let state = Rc::clone(self);
            let field = input.clone();
            let on_input = Closure::wrap(Box::new(move |_event: Event| {
                state.clear_field(&field);
            }) as Box<dyn FnMut(Event)>);
            input.add_event_listener_with_callback("input", on_input.as_ref().unchecked_ref())?;
            on_input.forget();
        }
        Ok(())
    }

    /// Run the field's rule and reflect the outcome in the DOM.
    /// Returns whether the field lets the form submit.
    fn validate_field(&self, input: &HtmlInputElement) -> bool {
        let name = input.name();
        let value = input.value();

        // Clean slate so re-validation never stacks decoration.
        self.clear_field(input);

        match evaluate_field(&name, &value, Utc::now()) {
            FieldOutcome::Accepted => {
                let _ = decoration::mark_valid(input);
                true
            }
            FieldOutcome::Skipped => true,
            FieldOutcome::Rejected(error) => {
                let message = error.to_string();
                let _ = decoration::mark_invalid(&self.document, input, &message);
                self.errors.borrow_mut().insert(name, message);
                false
            }
        }
    }

    /// Drop a field's decoration and stored message without re-running rules.
    fn clear_field(&self, input: &HtmlInputElement) {
        let _ = decoration::clear(input);
        self.errors.borrow_mut().remove(&input.name());
    }

    fn handle_submit(&self, event: &Event) {
        console::log_1(&"Form submit triggered".into());

        let inputs = required_inputs(&self.form).unwrap_or_default();
        console::log_1(&format!("Found inputs: {}", inputs.len()).into());

        let mut all_valid = true;
        for input in &inputs {
            let field_valid = self.validate_field(input);
            console::log_1(
                &format!(
                    "Field {}: {}",
                    input.name(),
                    if field_valid { "valid" } else { "invalid" }
                )
                .into(),
            );
            all_valid &= field_valid;
        }

        console::log_1(&format!("Overall form valid: {}", all_valid).into());

        if !all_valid {
            event.prevent_default();
            if let Ok(snapshot) = serde_json::to_string(&*self.errors.borrow()) {
                console::log_1(&format!("Validation errors: {}", snapshot).into());
            }
            let _ = self.show_general_error(GENERAL_ERROR_MESSAGE);
            return;
        }

        // Valid: decorate the in-flight state and let the browser submit.
        let _ = self.show_loading_indicator();
    }

    /// Render the single page-level banner, replacing any prior instance,
    /// and scroll it into view.
    fn show_general_error(&self, message: &str) -> Result<(), JsValue> {
        if let Some(existing) = self.document.query_selector(GENERAL_ERROR_SELECTOR)? {
            existing.remove();
        }

        let banner = self.document.create_element("div")?;
        banner.set_class_name("form-general-error alert alert-danger");
        banner.set_inner_html(&format!(
            "<i class=\"fas fa-exclamation-triangle\"></i> {}",
            message
        ));

        self.form
            .insert_before(&banner, self.form.first_child().as_ref())?;

        let options = ScrollIntoViewOptions::new();
        options.set_behavior(ScrollBehavior::Smooth);
        options.set_block(ScrollLogicalPosition::Center);
        banner.scroll_into_view_with_scroll_into_view_options(&options);

        Ok(())
    }

    /// Switch the submit control into the busy state and activate the
    /// external progress indicator when the page has one.
    fn show_loading_indicator(&self) -> Result<(), JsValue> {
        if let Some(button) = submit_button(&self.form)? {
            let original = button.inner_html();
            button.dataset().set(ORIGINAL_TEXT_KEY, &original)?;
            button.set_inner_html(BUSY_BUTTON_HTML);
            button.set_disabled(true);
        }

        if let Some(indicator) = self.document.get_element_by_id(LOADING_INDICATOR_ID) {
            indicator.class_list().add_1("active")?;
        }
        Ok(())
    }
}

/// Restore a form's submit control from the busy state.
///
/// No-op when the form is missing or the button never entered the busy
/// state (nothing was remembered to restore).
pub fn reset_submit_state(document: &Document, form_id: &str) -> Result<(), JsValue> {
    let Some(form) = document.get_element_by_id(form_id) else {
        return Ok(());
    };

    if let Some(button) = submit_button(&form)? {
        if let Some(original) = button.dataset().get(ORIGINAL_TEXT_KEY) {
            button.set_inner_html(&original);
            button.set_disabled(false);
        }
    }

    if let Some(indicator) = document.get_element_by_id(LOADING_INDICATOR_ID) {
        indicator.class_list().remove_1("active")?;
    }
    Ok(())
}

/// The form's required inputs, in document order.
fn required_inputs(form: &HtmlFormElement) -> Result<Vec<HtmlInputElement>, JsValue> {
    let nodes = form.query_selector_all("input[required]")?;
    let mut inputs = Vec::with_capacity(nodes.length() as usize);
    for index in 0..nodes.length() {
        if let Some(input) = nodes
            .get(index)
            .and_then(|node| node.dyn_into::<HtmlInputElement>().ok())
        {
            inputs.push(input);
        }
    }
    Ok(inputs)
}

fn submit_button(root: &Element) -> Result<Option<HtmlButtonElement>, JsValue> {
    Ok(root
        .query_selector(SUBMIT_BUTTON_SELECTOR)?
        .and_then(|element| element.dyn_into::<HtmlButtonElement>().ok()))
}

// WASM-specific tests that run in a browser environment
#[cfg(test)]
#[cfg(target_arch = "wasm32")]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;
    use web_sys::EventInit;

    wasm_bindgen_test_configure!(run_in_browser);

    fn document() -> Document {
        web_sys::window().unwrap().document().unwrap()
    }

    /// Build a form with one required input and a submit button, attached to
    /// the body so page-level selectors see it.
    fn form_fixture(form_id: &str, field_name: &str, value: &str) -> (HtmlFormElement, HtmlInputElement) {
        let document = document();
        let form: HtmlFormElement = document
            .create_element("form")
            .unwrap()
            .dyn_into()
            .unwrap();
        form.set_id(form_id);

        let container = document.create_element("div").unwrap();
        let input: HtmlInputElement = document
            .create_element("input")
            .unwrap()
            .dyn_into()
            .unwrap();
        input.set_name(field_name);
        input.set_value(value);
        input.set_attribute("required", "").unwrap();
        container.append_child(&input).unwrap();
        form.append_child(&container).unwrap();

        let button: HtmlButtonElement = document
            .create_element("button")
            .unwrap()
            .dyn_into()
            .unwrap();
        button.set_type("submit");
        button.set_inner_html("Enviar");
        form.append_child(&button).unwrap();

        document.body().unwrap().append_child(&form).unwrap();
        (form, input)
    }

    fn cancelable_submit() -> Event {
        let init = EventInit::new();
        init.set_bubbles(true);
        init.set_cancelable(true);
        Event::new_with_event_init_dict("submit", &init).unwrap()
    }

    #[wasm_bindgen_test]
    fn test_attach_missing_form_is_a_no_op() {
        let validator = FormValidator::attach(&document(), "noSuchForm").unwrap();
        assert!(validator.is_none());
    }

    #[wasm_bindgen_test]
    fn test_attach_non_form_element_is_a_no_op() {
        let document = document();
        let div = document.create_element("div").unwrap();
        div.set_id("notAForm");
        document.body().unwrap().append_child(&div).unwrap();

        let validator = FormValidator::attach(&document, "notAForm").unwrap();
        assert!(validator.is_none());

        div.remove();
    }

    #[wasm_bindgen_test]
    fn test_field_error_then_success_round_trip() {
        let (form, input) = form_fixture("roundTripForm", "matricola", "12345");
        let validator = FormValidator::attach(&document(), "roundTripForm")
            .unwrap()
            .unwrap();

        assert!(!validator.inner.validate_field(&input));
        assert!(input.class_list().contains(decoration::ERROR_CLASS));
        assert_eq!(
            validator.error_messages().get("matricola").unwrap(),
            "La matrícula debe tener entre 6 y 8 dígitos"
        );

        input.set_value("1234567");
        assert!(validator.inner.validate_field(&input));
        assert!(input.class_list().contains(decoration::SUCCESS_CLASS));
        assert!(!input.class_list().contains(decoration::ERROR_CLASS));
        assert!(validator.error_messages().is_empty());

        form.remove();
    }

    #[wasm_bindgen_test]
    fn test_input_event_clears_decoration_without_revalidating() {
        let (form, input) = form_fixture("clearOnInputForm", "matricola", "");
        let validator = FormValidator::attach(&document(), "clearOnInputForm")
            .unwrap()
            .unwrap();

        validator.inner.validate_field(&input);
        assert!(input.class_list().contains(decoration::ERROR_CLASS));

        // Still invalid, but typing must clear the decoration immediately.
        input.dispatch_event(&Event::new("input").unwrap()).unwrap();
        assert!(!input.class_list().contains(decoration::ERROR_CLASS));
        assert!(validator.error_messages().is_empty());

        form.remove();
    }

    #[wasm_bindgen_test]
    fn test_blur_event_runs_validation() {
        let (form, input) = form_fixture("blurForm", "password", "ab");
        FormValidator::attach(&document(), "blurForm").unwrap().unwrap();

        input.dispatch_event(&Event::new("blur").unwrap()).unwrap();
        assert!(input.class_list().contains(decoration::ERROR_CLASS));

        form.remove();
    }

    #[wasm_bindgen_test]
    fn test_invalid_submit_is_blocked_with_one_banner() {
        let (form, _input) = form_fixture("blockedForm", "matricola", "12345");
        FormValidator::attach(&document(), "blockedForm")
            .unwrap()
            .unwrap();

        // dispatch_event returns false when a listener prevented the default.
        let allowed = form.dispatch_event(&cancelable_submit()).unwrap();
        assert!(!allowed);

        // A second attempt replaces the banner instead of stacking one.
        form.dispatch_event(&cancelable_submit()).unwrap();
        let banners = document().query_selector_all(".form-general-error").unwrap();
        assert_eq!(banners.length(), 1);

        form.remove();
    }

    #[wasm_bindgen_test]
    fn test_valid_submit_enters_busy_state_and_reset_restores_it() {
        let (form, _input) = form_fixture("busyForm", "matricola", "1234567");
        let document = document();

        let indicator = document.create_element("div").unwrap();
        indicator.set_id(LOADING_INDICATOR_ID);
        document.body().unwrap().append_child(&indicator).unwrap();

        FormValidator::attach(&document, "busyForm").unwrap().unwrap();

        let allowed = form.dispatch_event(&cancelable_submit()).unwrap();
        assert!(allowed);

        let button: HtmlButtonElement = form
            .query_selector("button[type=\"submit\"]")
            .unwrap()
            .unwrap()
            .dyn_into()
            .unwrap();
        assert!(button.disabled());
        assert!(button.inner_html().contains("Procesando..."));
        assert_eq!(button.dataset().get("originalText").unwrap(), "Enviar");
        assert!(indicator.class_list().contains("active"));

        reset_submit_state(&document, "busyForm").unwrap();
        assert!(!button.disabled());
        assert_eq!(button.inner_html(), "Enviar");
        assert!(!indicator.class_list().contains("active"));

        form.remove();
        indicator.remove();
    }

    #[wasm_bindgen_test]
    fn test_optional_expiry_field_does_not_block_submission() {
        let (form, input) = form_fixture("expiryForm", "vencimiento_licencia", "");
        let validator = FormValidator::attach(&document(), "expiryForm")
            .unwrap()
            .unwrap();

        assert!(validator.inner.validate_field(&input));
        // Empty optional field passes without any decoration.
        assert!(!input.class_list().contains(decoration::SUCCESS_CLASS));
        assert!(!input.class_list().contains(decoration::ERROR_CLASS));

        form.remove();
    }

    #[wasm_bindgen_test]
    fn test_reset_without_busy_state_is_a_no_op() {
        let (form, _input) = form_fixture("idleForm", "matricola", "1234567");
        let document = document();

        reset_submit_state(&document, "idleForm").unwrap();
        let button: HtmlButtonElement = form
            .query_selector("button[type=\"submit\"]")
            .unwrap()
            .unwrap()
            .dyn_into()
            .unwrap();
        assert!(!button.disabled());
        assert_eq!(button.inner_html(), "Enviar");

        reset_submit_state(&document, "noSuchForm").unwrap();

        form.remove();
    }
}
