pub mod controller;
pub mod state;

pub use controller::{StopOutcome, TimerController, TimerSnapshot};
pub use state::{FinishedPause, PauseTimer, TimerStatus};
