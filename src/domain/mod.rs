pub mod config;
pub mod enums;
pub mod format;
pub mod record;

pub use config::{ConfigState, Configuration, Rates};
pub use enums::{Category, Screen};
pub use format::{
    format_currency, format_date_time, format_duration, format_optional_currency, format_percent,
};
pub use record::{elapsed_seconds, ActivePause, PauseRecord};
