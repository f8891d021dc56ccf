//! Cosmetic progress simulation.
//!
//! Models the indeterminate extraction animation as an explicit state
//! machine: the driver supplies one increment per timer tick, the
//! simulation advances monotonically and completes at 100% exactly once.
//! It is a visual effect only, not instrumented against real work.

use serde::Serialize;

/// Status lines shown while the simulated extraction advances, in phase order.
pub const PHASE_MESSAGES: [&str; 5] = [
    "Conectando al portal universitario...",
    "Autenticando credenciales...",
    "Extrayendo datos personales...",
    "Procesando horarios académicos...",
    "Finalizando extracción...",
];

/// Shown when the computed phase index falls outside the table.
pub const FALLBACK_MESSAGE: &str = "Procesando...";

/// Shown once the simulation reaches 100%.
pub const COMPLETED_MESSAGE: &str = "Completado";

/// Upper bound (exclusive) of one randomized tick increment, in percent.
pub const MAX_TICK_INCREMENT: f64 = 15.0;

/// Cadence of the driving timer, in milliseconds.
pub const TICK_INTERVAL_MS: i32 = 1_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SimulationState {
    Running,
    Completed,
}

/// One advance of the simulation, ready to paint.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ProgressUpdate {
    /// Percentage to paint, 0-100.
    pub percent: f64,
    /// Status line to show next to the bar.
    pub message: &'static str,
    /// True exactly once, on the terminal tick.
    pub completed: bool,
}

/// Monotone progress state machine, terminal at 100%.
#[derive(Debug, Clone)]
pub struct ProgressSimulation {
    percent: f64,
    state: SimulationState,
}

impl ProgressSimulation {
    pub fn new() -> Self {
        Self {
            percent: 0.0,
            state: SimulationState::Running,
        }
    }

    /// Current percentage, 0-100.
    pub fn percent(&self) -> f64 {
        self.percent
    }

    /// Whether the terminal state has been reached.
    pub fn is_completed(&self) -> bool {
        self.state == SimulationState::Completed
    }

    /// Advance by `increment` percent; negative or NaN increments count as 0.
    ///
    /// Returns the update to paint, or `None` once the terminal state was
    /// reached on an earlier tick. The terminal update (`completed: true`)
    /// is produced exactly once.
    pub fn tick(&mut self, increment: f64) -> Option<ProgressUpdate> {
        if self.is_completed() {
            return None;
        }

        self.percent += increment.max(0.0);

        if self.percent >= 100.0 {
            self.percent = 100.0;
            self.state = SimulationState::Completed;
            return Some(ProgressUpdate {
                percent: 100.0,
                message: COMPLETED_MESSAGE,
                completed: true,
            });
        }

        Some(ProgressUpdate {
            percent: self.percent,
            message: status_message(self.percent),
            completed: false,
        })
    }
}

impl Default for ProgressSimulation {
    fn default() -> Self {
        Self::new()
    }
}

/// Status line for a percentage: indexed as `floor(percent / 100 * phases)`,
/// with a generic fallback for out-of-range indexes.
pub fn status_message(percent: f64) -> &'static str {
    let index = ((percent / 100.0) * PHASE_MESSAGES.len() as f64).floor();
    if index >= 0.0 && (index as usize) < PHASE_MESSAGES.len() {
        PHASE_MESSAGES[index as usize]
    } else {
        FALLBACK_MESSAGE
    }
}
