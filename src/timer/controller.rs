use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{error, info, warn};

use crate::{
    domain::{ActivePause, PauseRecord, Rates},
    error::{PauseError, PauseResult},
    persistence::{
        clear_active_pause, load_active_pause, save_active_pause, KeyValueStore, PauseRecordStore,
    },
};

use super::{FinishedPause, PauseTimer, TimerStatus};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerSnapshot {
    pub status: TimerStatus,
    pub started_at: Option<DateTime<Utc>>,
    pub elapsed_seconds: u64,
}

/// What happened to a break when it was stopped
#[derive(Debug)]
pub enum StopOutcome {
    /// Shorter than a second, nothing recorded
    Discarded(FinishedPause),
    Recorded(PauseRecord),
    /// The record was built but the history log could not be written
    NotSaved { record: PauseRecord, error: PauseError },
}

/// Drives the break stopwatch and keeps the active-pause document in sync
pub struct TimerController {
    timer: PauseTimer,
    store: Arc<dyn KeyValueStore>,
}

impl TimerController {
    /// Cold start: resume a break left running by a previous session, if any
    pub fn load(store: Arc<dyn KeyValueStore>, now: DateTime<Utc>) -> Self {
        let timer = match load_active_pause(store.as_ref()) {
            Ok(Some(active)) => {
                let timer = PauseTimer::recover(Some(&active), now);
                info!(
                    started_at = %active.start_time,
                    elapsed = timer.elapsed_seconds(),
                    "recovered running pause"
                );
                timer
            }
            Ok(None) => PauseTimer::new(),
            Err(e) => {
                warn!("could not recover active pause, starting idle: {}", e);
                PauseTimer::new()
            }
        };

        Self { timer, store }
    }

    pub fn snapshot(&self) -> TimerSnapshot {
        TimerSnapshot {
            status: self.timer.status(),
            started_at: self.timer.started_at(),
            elapsed_seconds: self.timer.elapsed_seconds(),
        }
    }

    pub fn status(&self) -> TimerStatus {
        self.timer.status()
    }

    pub fn is_running(&self) -> bool {
        self.timer.is_running()
    }

    /// Money accumulated by the running break at the current rate
    pub fn value_so_far(&self, rates: &Rates) -> f64 {
        self.timer.elapsed_seconds() as f64 * rates.per_second
    }

    /// Begin a break. Failing to persist it only costs restart recovery.
    pub fn start(&mut self, now: DateTime<Utc>) -> PauseResult<ActivePause> {
        let active = self.timer.start(now)?;

        match save_active_pause(self.store.as_ref(), &active) {
            Ok(()) => info!(started_at = %active.start_time, "pause started"),
            Err(e) => warn!("pause started but could not be persisted: {}", e),
        }

        Ok(active)
    }

    pub fn tick(&mut self, now: DateTime<Utc>) -> u64 {
        self.timer.tick(now)
    }

    /// End the running break and commit it to the history log.
    ///
    /// The timer is idle afterwards whatever storage does; only the history
    /// write failure is reported back, inside the outcome.
    pub fn stop(
        &mut self,
        now: DateTime<Utc>,
        rates: &Rates,
        records: &PauseRecordStore,
    ) -> PauseResult<StopOutcome> {
        let finished = self.timer.stop(now)?;

        let record =
            PauseRecord::finalize(finished.start_time, finished.end_time, rates.per_second);
        let outcome = match record {
            None => {
                info!(
                    seconds = finished.duration_seconds,
                    "pause shorter than a second, discarded"
                );
                StopOutcome::Discarded(finished)
            }
            Some(record) => match records.append(record.clone()) {
                Ok(()) => StopOutcome::Recorded(record),
                Err(error) => {
                    error!("could not save pause to history: {}", error);
                    StopOutcome::NotSaved { record, error }
                }
            },
        };

        // A leftover entry resurfaces as a running pause on the next cold start
        if let Err(e) = clear_active_pause(self.store.as_ref()) {
            warn!("could not clear active pause: {}", e);
        }

        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{format_currency, Configuration};
    use crate::persistence::kv::{MemoryStore, ACTIVE_PAUSE_KEY};
    use chrono::{Duration, TimeZone};

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 10, 14, 0, 0).unwrap()
    }

    fn rates() -> Rates {
        Configuration::new(3080.0, 8.0).unwrap().rates().unwrap()
    }

    fn setup() -> (Arc<MemoryStore>, TimerController, PauseRecordStore) {
        let memory = Arc::new(MemoryStore::new());
        let controller = TimerController::load(memory.clone(), t0());
        let records = PauseRecordStore::new(memory.clone());
        (memory, controller, records)
    }

    #[test]
    fn test_start_persists_active_pause() {
        let (memory, mut controller, _) = setup();
        controller.start(t0()).unwrap();

        assert!(controller.is_running());
        let active = load_active_pause(memory.as_ref()).unwrap();
        assert_eq!(active, Some(ActivePause { start_time: t0() }));
    }

    #[test]
    fn test_start_survives_write_failure() {
        let (memory, mut controller, _) = setup();
        memory.set_failures(false, true, false);

        controller.start(t0()).unwrap();
        assert!(controller.is_running());
        assert!(memory.raw(ACTIVE_PAUSE_KEY).is_none());
    }

    #[test]
    fn test_reference_break_is_recorded() {
        let (memory, mut controller, records) = setup();
        controller.start(t0()).unwrap();
        controller.tick(t0() + Duration::seconds(60));

        let outcome = controller
            .stop(t0() + Duration::seconds(120), &rates(), &records)
            .unwrap();

        let record = match outcome {
            StopOutcome::Recorded(record) => record,
            other => panic!("expected a recorded pause, got {:?}", other),
        };
        assert_eq!(record.duration_seconds, 120);
        assert!((record.value_earned - 0.583).abs() < 0.001);
        assert_eq!(format_currency(record.value_earned), "R$ 0,58");

        assert_eq!(records.list().unwrap(), vec![record]);
        assert!(memory.raw(ACTIVE_PAUSE_KEY).is_none());
        assert_eq!(controller.snapshot().status, TimerStatus::Idle);
        assert_eq!(controller.snapshot().elapsed_seconds, 0);
    }

    #[test]
    fn test_same_second_stop_records_nothing() {
        let (memory, mut controller, records) = setup();
        controller.start(t0()).unwrap();

        let outcome = controller
            .stop(t0() + Duration::milliseconds(700), &rates(), &records)
            .unwrap();

        assert!(matches!(outcome, StopOutcome::Discarded(_)));
        assert!(records.list().unwrap().is_empty());
        assert!(memory.raw(ACTIVE_PAUSE_KEY).is_none());
        assert!(!controller.is_running());
    }

    #[test]
    fn test_stop_while_idle_fails() {
        let (_, mut controller, records) = setup();
        assert!(matches!(
            controller.stop(t0(), &rates(), &records),
            Err(PauseError::NotRunning)
        ));
    }

    #[test]
    fn test_history_write_failure_still_goes_idle() {
        let (memory, mut controller, records) = setup();
        controller.start(t0()).unwrap();
        memory.set_failures(false, true, false);

        let outcome = controller
            .stop(t0() + Duration::seconds(30), &rates(), &records)
            .unwrap();

        assert!(matches!(outcome, StopOutcome::NotSaved { .. }));
        assert!(!controller.is_running());
        assert!(memory.raw(ACTIVE_PAUSE_KEY).is_none());
    }

    #[test]
    fn test_failed_cleanup_leaves_phantom_pause() {
        let (memory, mut controller, records) = setup();
        controller.start(t0()).unwrap();
        memory.set_failures(false, false, true);

        let outcome = controller
            .stop(t0() + Duration::seconds(30), &rates(), &records)
            .unwrap();
        assert!(matches!(outcome, StopOutcome::Recorded(_)));
        assert!(!controller.is_running());

        memory.set_failures(false, false, false);
        let reloaded = TimerController::load(memory.clone(), t0() + Duration::seconds(40));
        assert!(reloaded.is_running());
        assert_eq!(reloaded.snapshot().elapsed_seconds, 40);
    }

    #[test]
    fn test_cold_start_recovers_elapsed_time() {
        let memory = Arc::new(MemoryStore::new());
        let started = t0() - Duration::seconds(600);
        save_active_pause(memory.as_ref(), &ActivePause { start_time: started }).unwrap();

        let controller = TimerController::load(memory, t0());
        let snapshot = controller.snapshot();
        assert_eq!(snapshot.status, TimerStatus::Running);
        assert_eq!(snapshot.started_at, Some(started));
        assert_eq!(snapshot.elapsed_seconds, 600);
        assert!((controller.value_so_far(&rates()) - 600.0 * rates().per_second).abs() < 1e-9);
    }

    #[test]
    fn test_recovered_pause_can_be_stopped() {
        let memory = Arc::new(MemoryStore::new());
        save_active_pause(memory.as_ref(), &ActivePause { start_time: t0() }).unwrap();
        let records = PauseRecordStore::new(memory.clone());

        let mut controller = TimerController::load(memory.clone(), t0() + Duration::seconds(90));
        let outcome = controller
            .stop(t0() + Duration::seconds(95), &rates(), &records)
            .unwrap();

        let record = match outcome {
            StopOutcome::Recorded(record) => record,
            other => panic!("expected a recorded pause, got {:?}", other),
        };
        assert_eq!(record.start_time, t0());
        assert_eq!(record.duration_seconds, 95);
    }

    #[test]
    fn test_unreadable_active_pause_starts_idle() {
        let memory = Arc::new(MemoryStore::with_entry(ACTIVE_PAUSE_KEY, "not json"));
        let controller = TimerController::load(memory, t0());
        assert_eq!(controller.status(), TimerStatus::Idle);
    }
}
