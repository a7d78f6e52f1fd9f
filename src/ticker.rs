use crate::timer::TimerStatus;
use std::time::Duration;

/// Tick interval while a break is running, in milliseconds
pub const TICK_MS: u64 = 1000;

/// How long the event loop may wait before the next tick; `None` means no tick is due
pub fn tick_interval(status: TimerStatus) -> Option<Duration> {
    match status {
        TimerStatus::Running => Some(Duration::from_millis(TICK_MS)),
        TimerStatus::Idle => None,
    }
}
