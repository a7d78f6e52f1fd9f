pub mod generator;
pub mod stats;

pub use generator::generate_report;
pub use stats::{daily_summary, monthly_summary, percent_of_workday_rested, Summary};
