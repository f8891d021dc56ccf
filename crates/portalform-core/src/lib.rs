//! Portalform core - validation rules and progress simulation for the
//! student portal forms.
//!
//! Pure logic only: no DOM types, no timers. The `portalform-wasm` crate
//! binds these rules to a live page.

pub mod error;
pub mod progress;
pub mod rules;

pub use error::FieldError;
pub use progress::{ProgressSimulation, ProgressUpdate};
pub use rules::{evaluate_field, FieldOutcome, FieldRule};
