use super::enums::Category;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::{NoContext, Timestamp, Uuid};

/// A break that is currently running, persisted so it survives restarts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivePause {
    pub start_time: DateTime<Utc>,
}

/// A completed break stored in the history log
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PauseRecord {
    pub id: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub duration_seconds: u64,
    pub value_earned: f64,
    /// Only field that changes after creation
    #[serde(default, with = "nullable_category")]
    pub category: Category,
}

impl PauseRecord {
    /// Build the history entry for a break that ran from `start` to `end`.
    ///
    /// Returns `None` when less than a whole second elapsed.
    pub fn finalize(
        start_time: DateTime<Utc>,
        end_time: DateTime<Utc>,
        per_second_rate: f64,
    ) -> Option<Self> {
        let duration_seconds = elapsed_seconds(start_time, end_time);
        if duration_seconds == 0 {
            return None;
        }

        Some(Self {
            id: record_id(end_time),
            start_time,
            end_time,
            duration_seconds,
            value_earned: duration_seconds as f64 * per_second_rate,
            category: Category::Uncategorized,
        })
    }
}

/// Whole seconds between two instants, floored and never negative
pub fn elapsed_seconds(start: DateTime<Utc>, now: DateTime<Utc>) -> u64 {
    let millis = (now - start).num_milliseconds();
    if millis <= 0 {
        0
    } else {
        (millis / 1000) as u64
    }
}

/// Time-ordered identifier derived from the instant a record was created
fn record_id(created_at: DateTime<Utc>) -> String {
    let seconds = created_at.timestamp().max(0) as u64;
    let ts = Timestamp::from_unix(NoContext, seconds, created_at.timestamp_subsec_nanos());
    Uuid::new_v7(ts).to_string()
}

/// `null` on the wire means uncategorized
mod nullable_category {
    use super::Category;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S: Serializer>(category: &Category, serializer: S) -> Result<S::Ok, S::Error> {
        match category {
            Category::Uncategorized => serializer.serialize_none(),
            other => other.serialize(serializer),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Category, D::Error> {
        Ok(Option::<Category>::deserialize(deserializer)?.unwrap_or_default())
    }
}
