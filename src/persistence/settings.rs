use super::kv::{read_json, write_json, KeyValueStore, CONFIG_KEY};
use crate::domain::{ConfigState, Configuration};
use crate::error::PauseResult;
use tracing::{info, warn};

/// Load the salary configuration; a stored document that no longer validates counts as absent
pub fn load_config(store: &dyn KeyValueStore) -> PauseResult<ConfigState> {
    let config: Option<Configuration> = read_json(store, CONFIG_KEY)?;
    Ok(match config {
        Some(config) => match config.validate() {
            Ok(()) => {
                info!(
                    salary = config.monthly_salary,
                    hours = config.hours_per_day,
                    "configuration loaded"
                );
                ConfigState::Configured(config)
            }
            Err(e) => {
                warn!("ignoring stored configuration: {}", e);
                ConfigState::Unconfigured
            }
        },
        None => {
            info!("no configuration stored yet");
            ConfigState::Unconfigured
        }
    })
}

/// Validate and persist the salary configuration
pub fn save_config(store: &dyn KeyValueStore, config: &Configuration) -> PauseResult<()> {
    config.validate()?;
    write_json(store, CONFIG_KEY, config)?;
    info!(salary = config.monthly_salary, hours = config.hours_per_day, "configuration saved");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PauseError;
    use crate::persistence::kv::MemoryStore;

    #[test]
    fn test_load_missing_config() {
        let store = MemoryStore::new();
        assert_eq!(load_config(&store).unwrap(), ConfigState::Unconfigured);
    }

    #[test]
    fn test_save_and_load_config() {
        let store = MemoryStore::new();
        let config = Configuration::new(3080.0, 8.0).unwrap();

        save_config(&store, &config).unwrap();
        assert_eq!(load_config(&store).unwrap(), ConfigState::Configured(config));
    }

    #[test]
    fn test_save_rejects_invalid_config_before_writing() {
        let store = MemoryStore::new();
        let bad = Configuration {
            monthly_salary: 3000.0,
            hours_per_day: 0.0,
        };

        let err = save_config(&store, &bad).unwrap_err();
        assert!(matches!(err, PauseError::InvalidConfig(_)));
        assert!(store.raw(CONFIG_KEY).is_none());
    }

    #[test]
    fn test_load_legacy_config() {
        let store =
            MemoryStore::with_entry(CONFIG_KEY, r#"{"salarioMensal":3000,"horasPorDia":6}"#);
        let state = load_config(&store).unwrap();
        assert_eq!(state.configuration().map(|c| c.hours_per_day), Some(6.0));
    }

    #[test]
    fn test_out_of_range_stored_config_is_unconfigured() {
        let store = MemoryStore::with_entry(CONFIG_KEY, r#"{"monthlySalary":-1,"hoursPerDay":8}"#);
        assert_eq!(load_config(&store).unwrap(), ConfigState::Unconfigured);
    }

    #[test]
    fn test_read_failure_is_reported() {
        let store = MemoryStore::new();
        store.set_failures(true, false, false);
        assert!(matches!(load_config(&store), Err(PauseError::StorageRead { .. })));
    }
}
