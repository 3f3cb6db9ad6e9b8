pub mod requests;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An open player group waiting to fill up for a game.
/// Queues are session-scoped: they live only in the registry and are not
/// persisted across a process restart.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Queue {
    pub id: String,
    pub guild_id: String,
    pub owner_id: String,
    pub game_name: String,
    pub max_players: u32,
    pub players: Vec<String>,
    pub created_at: DateTime<Utc>,
}

impl Queue {
    /// Creates a queue with a fresh identifier and the owner as its first
    /// player. The owner stays in `players` for the queue's whole lifetime.
    pub fn new(guild_id: &str, owner_id: &str, game_name: &str, max_players: u32) -> Self {
        Queue {
            id: Uuid::new_v4().to_string(),
            guild_id: guild_id.to_string(),
            owner_id: owner_id.to_string(),
            game_name: game_name.to_string(),
            max_players,
            players: vec![owner_id.to_string()],
            created_at: Utc::now(),
        }
    }

    pub fn player_count(&self) -> usize {
        self.players.len()
    }

    pub fn is_full(&self) -> bool {
        self.players.len() >= self.max_players as usize
    }

    pub fn contains_player(&self, user_id: &str) -> bool {
        self.players.iter().any(|p| p == user_id)
    }
}

/// Outcome of removing one user from every queue of a guild. The three lists
/// are disjoint: a queue either stayed open without the user, was closed and
/// dropped from the registry, or could not be processed.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct LeaveReport {
    pub left: Vec<Queue>,
    pub closed: Vec<Queue>,
    pub failures: Vec<LeaveFailure>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LeaveFailure {
    pub queue_id: String,
    pub reason: String,
}
