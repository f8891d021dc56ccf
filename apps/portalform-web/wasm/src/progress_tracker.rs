//! DOM driver for the progress simulation.
//!
//! Resolves the progress bar's fill and text elements (each optional) and
//! advances a [`ProgressSimulation`] on a fixed 1000 ms interval with
//! randomized increments. The interval handle lives in the tracker, and the
//! tick closure clears it when the simulation completes; one timer per
//! tracker, no restart.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, HtmlElement, Window};

use portalform_core::progress::{ProgressSimulation, MAX_TICK_INCREMENT, TICK_INTERVAL_MS};

/// Id of the bar-fill element whose width tracks the percentage.
pub const PROGRESS_FILL_ID: &str = "progressFill";

/// Id of the status text element.
pub const PROGRESS_TEXT_ID: &str = "progressText";

/// Paints simulated progress onto the page.
#[derive(Clone)]
pub struct ProgressTracker {
    fill: Option<HtmlElement>,
    text: Option<Element>,
    interval: Rc<Cell<Option<i32>>>,
}

impl ProgressTracker {
    /// Resolve the progress elements. Either may be missing; painting then
    /// silently skips that channel.
    pub fn new(document: &Document) -> Self {
        let fill = document
            .get_element_by_id(PROGRESS_FILL_ID)
            .and_then(|element| element.dyn_into::<HtmlElement>().ok());
        let text = document.get_element_by_id(PROGRESS_TEXT_ID);

        Self {
            fill,
            text,
            interval: Rc::new(Cell::new(None)),
        }
    }

    /// Paint a percentage and, when non-empty, a status line.
    pub fn update(&self, percent: f64, message: &str) {
        if let Some(fill) = &self.fill {
            let _ = fill.style().set_property("width", &format!("{}%", percent));
        }
        if let Some(text) = &self.text {
            if !message.is_empty() {
                text.set_text_content(Some(message));
            }
        }
    }

    /// Whether the simulation timer is currently registered.
    pub fn is_running(&self) -> bool {
        self.interval.get().is_some()
    }

    /// Start the simulation timer. A tracker drives at most one timer:
    /// calling this again while it runs is a no-op.
    pub fn start_simulation(&self, window: &Window) -> Result<(), JsValue> {
        if self.interval.get().is_some() {
            return Ok(());
        }

        let simulation = Rc::new(RefCell::new(ProgressSimulation::new()));
        let painter = self.clone();
        let window_for_tick = window.clone();

        let tick = Closure::wrap(Box::new(move || {
            let increment = js_sys::Math::random() * MAX_TICK_INCREMENT;
            let update = simulation.borrow_mut().tick(increment);
            if let Some(update) = update {
                painter.update(update.percent, update.message);
                if update.completed {
                    if let Some(id) = painter.interval.take() {
                        window_for_tick.clear_interval_with_handle(id);
                    }
                }
            }
        }) as Box<dyn FnMut()>);

        let id = window.set_interval_with_callback_and_timeout_and_arguments_0(
            tick.as_ref().unchecked_ref(),
            TICK_INTERVAL_MS,
        )?;
        self.interval.set(Some(id));
        tick.forget();

        Ok(())
    }
}
