pub mod requests;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub const MIN_SEARCH_HOURS: u32 = 1;
pub const MAX_SEARCH_HOURS: u32 = 8;

/// A standing request by one user to be told when a matching queue appears.
/// Each record corresponds to a DynamoDB item keyed by `user_id`; the
/// in-memory registry is the authority and the table is a durable mirror.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct QueueSearch {
    /// Distinguishes this search from earlier ones by the same user, so a
    /// stale expiration timer can never remove a restarted search.
    pub search_id: String,
    pub user_id: String,
    pub guild_id: String,
    pub game_name: String,
    pub game_mode: Option<String>,
    /// Requested duration in whole hours, within `[MIN_SEARCH_HOURS, MAX_SEARCH_HOURS]`.
    pub search_time: u32,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
}

impl QueueSearch {
    /// Builds a search starting now. Game name and mode are lowercased so
    /// matching against queue criteria is case-insensitive.
    pub fn new(
        user_id: &str,
        guild_id: &str,
        game_name: &str,
        game_mode: Option<&str>,
        search_time: u32,
    ) -> Self {
        let start_time = Utc::now();

        QueueSearch {
            search_id: Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            guild_id: guild_id.to_string(),
            game_name: game_name.to_lowercase(),
            game_mode: game_mode.map(|mode| mode.to_lowercase()),
            search_time,
            start_time,
            end_time: start_time + Duration::hours(search_time as i64),
        }
    }
}

/// Aggregate counters maintained in the store out of band (stream processor);
/// this crate only reads them.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct SearchStatistics {
    pub recent_count: u64,
    pub total_count: u64,
}
