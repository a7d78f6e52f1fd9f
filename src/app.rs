use crate::domain::{
    format_duration, Category, ConfigState, Configuration, PauseRecord, Rates, Screen,
};
use crate::error::PauseError;
use crate::persistence::{load_config, save_config, KeyValueStore, PauseRecordStore};
use crate::timer::{StopOutcome, TimerController};
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Non-fatal problem shown to the user until dismissed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    pub title: String,
    pub message: String,
}

/// Overlay drawn on top of the current screen
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Modal {
    Alert(Alert),
    CategoryPicker { record_id: String, selected: usize },
    ConfirmDelete { record_id: String },
}

/// Input form state for the configuration screen
#[derive(Debug, Clone, Default)]
pub struct ConfigForm {
    pub salary: String,
    pub hours: String,
    pub editing_field: usize, // 0 = salary, 1 = hours
}

impl ConfigForm {
    fn from_config(config: &ConfigState) -> Self {
        match config.configuration() {
            Some(c) => Self {
                salary: c.monthly_salary.to_string(),
                hours: c.hours_per_day.to_string(),
                editing_field: 0,
            },
            None => Self::default(),
        }
    }

    fn active_field_mut(&mut self) -> &mut String {
        if self.editing_field == 0 {
            &mut self.salary
        } else {
            &mut self.hours
        }
    }
}

/// Main application state
pub struct AppState {
    pub screen: Screen,
    pub config: ConfigState,
    pub timer: TimerController,
    pub history: Vec<PauseRecord>,
    pub selected_index: usize,
    pub config_form: ConfigForm,
    pub modal: Option<Modal>,
    records: PauseRecordStore,
    store: Arc<dyn KeyValueStore>,
}

impl AppState {
    pub fn new(store: Arc<dyn KeyValueStore>, now: DateTime<Utc>) -> Self {
        let config = load_config(store.as_ref()).unwrap_or_else(|e| {
            warn!("could not load configuration: {}", e);
            ConfigState::Unconfigured
        });

        let screen = if config.is_configured() {
            Screen::Timer
        } else {
            Screen::Config
        };

        let config_form = ConfigForm::from_config(&config);

        Self {
            screen,
            config,
            timer: TimerController::load(store.clone(), now),
            history: Vec::new(),
            selected_index: 0,
            config_form,
            modal: None,
            records: PauseRecordStore::new(store.clone()),
            store,
        }
    }

    pub fn rates(&self) -> Option<Rates> {
        self.config.configuration().and_then(|c| c.rates().ok())
    }

    fn alert(&mut self, title: &str, message: impl Into<String>) {
        self.modal = Some(Modal::Alert(Alert {
            title: title.to_string(),
            message: message.into(),
        }));
    }

    pub fn dismiss_modal(&mut self) {
        self.modal = None;
    }

    // Navigation

    /// Timer needs a configuration; without one the user lands on the config screen
    pub fn go_to_timer(&mut self) {
        if self.config.is_configured() {
            self.screen = Screen::Timer;
        } else {
            self.go_to_config();
        }
    }

    pub fn go_to_history(&mut self) {
        self.screen = Screen::History;
        self.selected_index = 0;
        self.reload_history();
    }

    pub fn go_to_config(&mut self) {
        self.config_form = ConfigForm::from_config(&self.config);
        self.screen = Screen::Config;
    }

    // Configuration screen

    pub fn config_form_toggle_field(&mut self) {
        self.config_form.editing_field = (self.config_form.editing_field + 1) % 2;
    }

    pub fn config_form_add_char(&mut self, c: char) {
        if c.is_ascii_digit() || c == ',' || c == '.' {
            self.config_form.active_field_mut().push(c);
        }
    }

    pub fn config_form_backspace(&mut self) {
        self.config_form.active_field_mut().pop();
    }

    /// Validate and save the form; stays on the screen with an alert on failure
    pub fn submit_config(&mut self) {
        let form = &self.config_form;
        let config = match Configuration::from_input(&form.salary, &form.hours) {
            Ok(config) => config,
            Err(PauseError::InvalidConfig(message)) => {
                self.alert("Attention", capitalize(&message));
                return;
            }
            Err(e) => {
                self.alert("Attention", e.to_string());
                return;
            }
        };

        if let Err(e) = save_config(self.store.as_ref(), &config) {
            warn!("could not save configuration: {}", e);
            self.alert("Error", "Could not save your settings. Please try again.");
            return;
        }

        self.config = ConfigState::Configured(config);
        self.go_to_timer();
    }

    // Timer screen

    /// Start a break when idle, stop and record it when running
    pub fn toggle_timer(&mut self, now: DateTime<Utc>) {
        if !self.timer.is_running() {
            if let Err(e) = self.timer.start(now) {
                warn!("could not start pause: {}", e);
            }
            return;
        }

        let Some(rates) = self.rates() else {
            self.alert("Attention", "Set your salary and daily hours before finishing a break.");
            self.go_to_config();
            return;
        };

        match self.timer.stop(now, &rates, &self.records) {
            Ok(StopOutcome::Recorded(record)) => {
                info!(id = %record.id, seconds = record.duration_seconds, "break finished");
            }
            Ok(StopOutcome::Discarded(finished)) => {
                debug!(started_at = %finished.start_time, "break under a second, not recorded");
            }
            Ok(StopOutcome::NotSaved { record, error }) => {
                self.alert(
                    "Error",
                    format!(
                        "Could not save this {} break to your history: {}",
                        format_duration(record.duration_seconds),
                        error
                    ),
                );
            }
            Err(e) => warn!("could not stop pause: {}", e),
        }
    }

    pub fn tick(&mut self, now: DateTime<Utc>) {
        if self.timer.is_running() {
            self.timer.tick(now);
        }
    }

    // History screen

    pub fn reload_history(&mut self) {
        let (records, error) = self.records.list_or_empty();
        self.history = records;
        if error.is_some() {
            self.alert("Error", "Could not load your break history.");
        }
        if self.selected_index >= self.history.len() {
            self.selected_index = self.history.len().saturating_sub(1);
        }
    }

    pub fn selected_record(&self) -> Option<&PauseRecord> {
        self.history.get(self.selected_index)
    }

    pub fn move_selection_up(&mut self) {
        self.selected_index = self.selected_index.saturating_sub(1);
    }

    pub fn move_selection_down(&mut self) {
        if self.selected_index + 1 < self.history.len() {
            self.selected_index += 1;
        }
    }

    pub fn open_category_picker(&mut self) {
        let Some(record) = self.selected_record() else {
            return;
        };
        let record_id = record.id.clone();
        let selected = Category::all()
            .iter()
            .position(|c| *c == record.category)
            .unwrap_or(0);
        self.modal = Some(Modal::CategoryPicker { record_id, selected });
    }

    pub fn picker_move(&mut self, down: bool) {
        if let Some(Modal::CategoryPicker { selected, .. }) = &mut self.modal {
            let count = Category::all().len();
            *selected = if down {
                (*selected + 1) % count
            } else {
                (*selected + count - 1) % count
            };
        }
    }

    pub fn confirm_category(&mut self) {
        let Some(Modal::CategoryPicker { record_id, selected }) = self.modal.take() else {
            return;
        };
        let category = Category::all()[selected.min(Category::all().len() - 1)];

        if let Err(e) = self.records.set_category(&record_id, category) {
            warn!("could not update category: {}", e);
            self.alert("Error", "Could not update the category.");
            return;
        }
        self.reload_history();
    }

    pub fn request_delete(&mut self) {
        if let Some(record_id) = self.selected_record().map(|r| r.id.clone()) {
            self.modal = Some(Modal::ConfirmDelete { record_id });
        }
    }

    pub fn confirm_delete(&mut self) {
        let Some(Modal::ConfirmDelete { record_id }) = self.modal.take() else {
            return;
        };

        if let Err(e) = self.records.remove(&record_id) {
            warn!("could not delete pause: {}", e);
            self.alert("Error", "Could not delete this break.");
            return;
        }
        self.reload_history();
    }
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ActivePause;
    use crate::persistence::kv::{MemoryStore, ACTIVE_PAUSE_KEY, CONFIG_KEY, PAUSES_KEY};
    use crate::persistence::{save_active_pause, save_config};
    use chrono::{Duration, TimeZone};

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 10, 14, 0, 0).unwrap()
    }

    fn configured_store() -> Arc<MemoryStore> {
        let memory = Arc::new(MemoryStore::new());
        save_config(memory.as_ref(), &Configuration::new(3080.0, 8.0).unwrap()).unwrap();
        memory
    }

    fn app_with_breaks(memory: Arc<MemoryStore>, count: i64) -> AppState {
        let mut app = AppState::new(memory, t0());
        for i in 0..count {
            let start = t0() + Duration::minutes(i * 10);
            app.toggle_timer(start);
            app.toggle_timer(start + Duration::seconds(60 + i));
        }
        app
    }

    fn type_text(app: &mut AppState, text: &str) {
        for c in text.chars() {
            app.config_form_add_char(c);
        }
    }

    #[test]
    fn test_cold_start_without_config_shows_config_screen() {
        let app = AppState::new(Arc::new(MemoryStore::new()), t0());
        assert_eq!(app.screen, Screen::Config);
        assert!(!app.config.is_configured());
        assert!(app.rates().is_none());
    }

    #[test]
    fn test_cold_start_with_config_shows_timer() {
        let app = AppState::new(configured_store(), t0());
        assert_eq!(app.screen, Screen::Timer);
        assert_eq!(app.config_form.salary, "3080");
        assert!((app.rates().unwrap().hourly - 17.5).abs() < 1e-9);
    }

    #[test]
    fn test_unreadable_config_falls_back_to_config_screen() {
        let memory = Arc::new(MemoryStore::with_entry(CONFIG_KEY, "garbage"));
        let app = AppState::new(memory, t0());
        assert_eq!(app.screen, Screen::Config);
    }

    #[test]
    fn test_timer_requires_configuration() {
        let mut app = AppState::new(Arc::new(MemoryStore::new()), t0());
        app.go_to_timer();
        assert_eq!(app.screen, Screen::Config);
    }

    #[test]
    fn test_submit_invalid_config_alerts() {
        let mut app = AppState::new(Arc::new(MemoryStore::new()), t0());
        type_text(&mut app, "3000");
        app.config_form_toggle_field();
        type_text(&mut app, "30");
        app.submit_config();

        assert_eq!(app.screen, Screen::Config);
        assert!(matches!(&app.modal, Some(Modal::Alert(a)) if a.title == "Attention"));
    }

    #[test]
    fn test_config_form_ignores_letters() {
        let mut app = AppState::new(Arc::new(MemoryStore::new()), t0());
        type_text(&mut app, "3a0x0,5");
        assert_eq!(app.config_form.salary, "300,5");
        app.config_form_backspace();
        assert_eq!(app.config_form.salary, "300,");
    }

    #[test]
    fn test_submit_valid_config_saves_and_opens_timer() {
        let memory = Arc::new(MemoryStore::new());
        let mut app = AppState::new(memory.clone(), t0());
        type_text(&mut app, "3080,00");
        app.config_form_toggle_field();
        type_text(&mut app, "8");
        app.submit_config();

        assert_eq!(app.screen, Screen::Timer);
        assert!(app.modal.is_none());
        assert!(memory.raw(CONFIG_KEY).is_some());
    }

    #[test]
    fn test_config_save_failure_keeps_screen() {
        let memory = Arc::new(MemoryStore::new());
        let mut app = AppState::new(memory.clone(), t0());
        memory.set_failures(false, true, false);
        type_text(&mut app, "3080");
        app.config_form_toggle_field();
        type_text(&mut app, "8");
        app.submit_config();

        assert_eq!(app.screen, Screen::Config);
        assert!(!app.config.is_configured());
        assert!(matches!(&app.modal, Some(Modal::Alert(a)) if a.title == "Error"));
    }

    #[test]
    fn test_toggle_records_breaks_newest_first() {
        let mut app = app_with_breaks(configured_store(), 2);
        app.go_to_history();

        assert_eq!(app.screen, Screen::History);
        assert_eq!(app.history.len(), 2);
        assert_eq!(app.history[0].duration_seconds, 61);
        assert_eq!(app.history[1].duration_seconds, 60);
    }

    #[test]
    fn test_history_write_failure_alerts() {
        let memory = configured_store();
        let mut app = AppState::new(memory.clone(), t0());
        app.toggle_timer(t0());
        memory.set_failures(false, true, false);
        app.toggle_timer(t0() + Duration::seconds(45));

        assert!(!app.timer.is_running());
        let Some(Modal::Alert(alert)) = &app.modal else {
            panic!("expected an alert, got {:?}", app.modal);
        };
        assert_eq!(alert.title, "Error");
        assert!(alert.message.contains("00:00:45"));
        assert!(alert.message.contains("'pauses'"));
        assert!(alert.message.contains("write refused"));
    }

    #[test]
    fn test_sub_second_break_is_silently_dropped() {
        let memory = configured_store();
        let mut app = AppState::new(memory.clone(), t0());
        app.toggle_timer(t0());
        app.toggle_timer(t0() + Duration::milliseconds(400));

        assert!(!app.timer.is_running());
        assert!(app.modal.is_none());
        app.go_to_history();
        assert!(app.history.is_empty());
    }

    #[test]
    fn test_tick_refreshes_running_timer() {
        let mut app = AppState::new(configured_store(), t0());
        app.tick(t0() + Duration::seconds(5));
        assert_eq!(app.timer.snapshot().elapsed_seconds, 0);

        app.toggle_timer(t0());
        app.tick(t0() + Duration::seconds(5));
        assert_eq!(app.timer.snapshot().elapsed_seconds, 5);
    }

    #[test]
    fn test_recovered_pause_without_config_cannot_be_stopped_yet() {
        let memory = Arc::new(MemoryStore::new());
        save_active_pause(memory.as_ref(), &ActivePause { start_time: t0() }).unwrap();
        let mut app = AppState::new(memory.clone(), t0() + Duration::seconds(30));

        assert!(app.timer.is_running());
        app.toggle_timer(t0() + Duration::seconds(40));
        assert!(app.timer.is_running());
        assert_eq!(app.screen, Screen::Config);
        assert!(memory.raw(ACTIVE_PAUSE_KEY).is_some());
    }

    #[test]
    fn test_category_picker_updates_record() {
        let mut app = app_with_breaks(configured_store(), 2);
        app.go_to_history();
        app.move_selection_down();

        app.open_category_picker();
        app.picker_move(true);
        app.picker_move(true);
        app.confirm_category();

        assert!(app.modal.is_none());
        assert_eq!(app.history[1].category, Category::Coffee);
        assert_eq!(app.history[0].category, Category::Uncategorized);
    }

    #[test]
    fn test_picker_wraps_around() {
        let mut app = app_with_breaks(configured_store(), 1);
        app.go_to_history();
        app.open_category_picker();
        app.picker_move(false);
        assert!(matches!(
            app.modal,
            Some(Modal::CategoryPicker { selected: 6, .. })
        ));
    }

    #[test]
    fn test_delete_requires_confirmation() {
        let mut app = app_with_breaks(configured_store(), 2);
        app.go_to_history();
        let doomed = app.history[0].id.clone();

        app.request_delete();
        app.dismiss_modal();
        assert_eq!(app.history.len(), 2);

        app.request_delete();
        app.confirm_delete();
        assert_eq!(app.history.len(), 1);
        assert!(app.history.iter().all(|r| r.id != doomed));
        assert_eq!(app.selected_index, 0);
    }

    #[test]
    fn test_deleting_last_row_clamps_selection() {
        let mut app = app_with_breaks(configured_store(), 2);
        app.go_to_history();
        app.move_selection_down();
        app.request_delete();
        app.confirm_delete();
        assert_eq!(app.selected_index, 0);
        assert!(app.selected_record().is_some());
    }

    #[test]
    fn test_unreadable_history_alerts_and_shows_empty() {
        let memory = configured_store();
        memory.set(PAUSES_KEY, "[{").unwrap();
        let mut app = AppState::new(memory, t0());
        app.go_to_history();

        assert!(app.history.is_empty());
        assert!(matches!(&app.modal, Some(Modal::Alert(_))));
        app.open_category_picker();
        assert!(matches!(&app.modal, Some(Modal::Alert(_))));
    }

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("enter a value"), "Enter a value");
        assert_eq!(capitalize(""), "");
    }
}
