use serde::{Deserialize, Serialize};

use crate::models::queue::Queue;

/// All open queues partitioned by game, truncated to fit inside a single
/// chat message. The caps and the omitted counts are part of the contract.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct GameSummary {
    pub games: Vec<GameGroup>,
    pub omitted_games: usize,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GameGroup {
    pub game_name: String,
    pub queues: Vec<Queue>,
    pub omitted_queues: usize,
}

/// Queue and player totals for one guild.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct GuildStatistics {
    pub queue_count: usize,
    pub player_count: usize,
}
