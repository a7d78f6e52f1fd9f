use crate::error::{PauseError, PauseResult};
use serde::{Deserialize, Serialize};

/// Average number of working days in a month used for rate conversion
pub const WORKING_DAYS_PER_MONTH: f64 = 22.0;

/// Seconds in an hour
pub const SECONDS_PER_HOUR: f64 = 3600.0;

/// Salary and workday settings supplied by the user
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Configuration {
    #[serde(alias = "salarioMensal")]
    pub monthly_salary: f64,
    #[serde(alias = "horasPorDia")]
    pub hours_per_day: f64,
}

/// Earnings rates derived from a configuration
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rates {
    pub hourly: f64,
    pub per_second: f64,
}

impl Configuration {
    /// Build a validated configuration
    pub fn new(monthly_salary: f64, hours_per_day: f64) -> PauseResult<Self> {
        let config = Self {
            monthly_salary,
            hours_per_day,
        };
        config.validate()?;
        Ok(config)
    }

    /// Build a configuration from raw user input ("3000,50", " 8 ")
    pub fn from_input(salary: &str, hours: &str) -> PauseResult<Self> {
        let monthly_salary = parse_amount(salary)
            .ok_or_else(|| PauseError::invalid_config("enter a valid monthly salary"))?;
        let hours_per_day = parse_amount(hours)
            .ok_or_else(|| PauseError::invalid_config("enter a valid number of hours per day"))?;
        Self::new(monthly_salary, hours_per_day)
    }

    /// Check salary is positive and hours fall in (0, 24]
    pub fn validate(&self) -> PauseResult<()> {
        if !self.monthly_salary.is_finite() || self.monthly_salary <= 0.0 {
            return Err(PauseError::invalid_config(
                "monthly salary must be greater than zero",
            ));
        }
        if !self.hours_per_day.is_finite() || self.hours_per_day <= 0.0 || self.hours_per_day > 24.0
        {
            return Err(PauseError::invalid_config(
                "hours per day must be greater than zero and at most 24",
            ));
        }
        Ok(())
    }

    pub fn rates(&self) -> PauseResult<Rates> {
        compute_rates(self)
    }
}

/// Derive hourly and per-second earnings from a configuration
pub fn compute_rates(config: &Configuration) -> PauseResult<Rates> {
    config.validate()?;
    let hourly = config.monthly_salary / (WORKING_DAYS_PER_MONTH * config.hours_per_day);
    Ok(Rates {
        hourly,
        per_second: hourly / SECONDS_PER_HOUR,
    })
}

/// Parse a user-typed decimal, accepting a comma as decimal separator
pub fn parse_amount(input: &str) -> Option<f64> {
    let normalized = input.trim().replacen(',', ".", 1);
    if normalized.is_empty() {
        return None;
    }
    normalized.parse::<f64>().ok().filter(|value| value.is_finite())
}

/// Whether the user has configured salary and hours yet
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ConfigState {
    Unconfigured,
    Configured(Configuration),
}

impl ConfigState {
    pub fn configuration(&self) -> Option<&Configuration> {
        match self {
            ConfigState::Unconfigured => None,
            ConfigState::Configured(config) => Some(config),
        }
    }

    pub fn is_configured(&self) -> bool {
        matches!(self, ConfigState::Configured(_))
    }
}
