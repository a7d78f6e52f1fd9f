use crate::domain::{elapsed_seconds, ActivePause};
use crate::error::{PauseError, PauseResult};
use chrono::{DateTime, Utc};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerStatus {
    Idle,
    Running,
}

impl Default for TimerStatus {
    fn default() -> Self {
        TimerStatus::Idle
    }
}

/// Start and end of a break that was just stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FinishedPause {
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub duration_seconds: u64,
}

/// In-memory state of the break stopwatch.
///
/// Elapsed time is always re-derived from the wall-clock distance to
/// `started_at`, never accumulated tick by tick.
#[derive(Debug, Clone, Default)]
pub struct PauseTimer {
    status: TimerStatus,
    started_at: Option<DateTime<Utc>>,
    elapsed_seconds: u64,
}

impl PauseTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild the timer after a restart from the persisted active pause
    pub fn recover(active: Option<&ActivePause>, now: DateTime<Utc>) -> Self {
        match active {
            Some(active) => Self {
                status: TimerStatus::Running,
                started_at: Some(active.start_time),
                elapsed_seconds: elapsed_seconds(active.start_time, now),
            },
            None => Self::new(),
        }
    }

    pub fn status(&self) -> TimerStatus {
        self.status
    }

    pub fn is_running(&self) -> bool {
        self.status == TimerStatus::Running
    }

    pub fn started_at(&self) -> Option<DateTime<Utc>> {
        self.started_at
    }

    /// Seconds as of the last start, recover or tick
    pub fn elapsed_seconds(&self) -> u64 {
        self.elapsed_seconds
    }

    /// IDLE -> RUNNING; returns the document to persist
    pub fn start(&mut self, now: DateTime<Utc>) -> PauseResult<ActivePause> {
        if self.is_running() {
            return Err(PauseError::AlreadyRunning);
        }
        self.status = TimerStatus::Running;
        self.started_at = Some(now);
        self.elapsed_seconds = 0;
        Ok(ActivePause { start_time: now })
    }

    /// Refresh the elapsed counter; no-op while idle
    pub fn tick(&mut self, now: DateTime<Utc>) -> u64 {
        if let (TimerStatus::Running, Some(started_at)) = (self.status, self.started_at) {
            self.elapsed_seconds = elapsed_seconds(started_at, now);
        }
        self.elapsed_seconds
    }

    /// RUNNING -> IDLE, measuring the final duration at `now`
    pub fn stop(&mut self, now: DateTime<Utc>) -> PauseResult<FinishedPause> {
        let started_at = match (self.status, self.started_at) {
            (TimerStatus::Running, Some(started_at)) => started_at,
            _ => return Err(PauseError::NotRunning),
        };
        self.cancel();

        Ok(FinishedPause {
            start_time: started_at,
            end_time: now,
            duration_seconds: elapsed_seconds(started_at, now),
        })
    }

    pub fn cancel(&mut self) {
        *self = Self::default();
    }
}
