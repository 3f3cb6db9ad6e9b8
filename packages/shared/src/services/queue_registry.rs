use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::models::queue::{LeaveFailure, LeaveReport, Queue};
use crate::services::errors::queue_registry_errors::QueueRegistryError;

enum LeaveOutcome {
    Left(Queue),
    Closed(Queue),
}

/// Authoritative table of open queues. Queues are ephemeral: they exist only
/// here and are gone after a restart. No `.await` happens while the table
/// guard is held, so every operation is atomic with respect to the table.
#[derive(Clone, Default)]
pub struct QueueRegistry {
    queues: Arc<Mutex<HashMap<String, Queue>>>,
}

impl QueueRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a queue under its own id and returns that id.
    pub async fn register(&self, queue: Queue) -> Result<String, QueueRegistryError> {
        if queue.max_players == 0 {
            return Err(QueueRegistryError::ValidationError(
                "max players must be at least 1".to_string(),
            ));
        }
        if queue.players.is_empty() {
            return Err(QueueRegistryError::ValidationError(
                "a queue cannot be registered without players".to_string(),
            ));
        }
        if queue.players.len() > queue.max_players as usize {
            return Err(QueueRegistryError::ValidationError(format!(
                "queue holds {} players but its capacity is {}",
                queue.players.len(),
                queue.max_players
            )));
        }
        if !queue.contains_player(&queue.owner_id) {
            return Err(QueueRegistryError::ValidationError(
                "owner must be one of the queue's players".to_string(),
            ));
        }

        let mut queues = self.queues.lock().await;
        if queues.contains_key(&queue.id) {
            return Err(QueueRegistryError::DuplicateId);
        }

        let id = queue.id.clone();
        info!(
            "Registered queue {} for game '{}' in guild {} (capacity {})",
            id, queue.game_name, queue.guild_id, queue.max_players
        );
        queues.insert(id.clone(), queue);

        Ok(id)
    }

    /// Adds a user to an open queue, enforcing capacity and uniqueness.
    pub async fn join(&self, queue_id: &str, user_id: &str) -> Result<Queue, QueueRegistryError> {
        let mut queues = self.queues.lock().await;
        let queue = queues
            .get_mut(queue_id)
            .ok_or(QueueRegistryError::NotFound)?;

        if queue.contains_player(user_id) {
            return Err(QueueRegistryError::AlreadyJoined);
        }
        if queue.is_full() {
            return Err(QueueRegistryError::QueueFull);
        }

        queue.players.push(user_id.to_string());
        info!(
            "User {} joined queue {} ({}/{} players)",
            user_id,
            queue_id,
            queue.player_count(),
            queue.max_players
        );

        Ok(queue.clone())
    }

    /// Removes a user from every queue of a guild they are part of.
    ///
    /// A queue whose owner leaves is closed even if other players remain:
    /// ownership is not transferable. A queue that would be left empty is
    /// closed as well. Queues are processed independently, so one failure
    /// never stops the rest; failures come back in the report.
    pub async fn leave(&self, guild_id: &str, user_id: &str) -> LeaveReport {
        let mut queues = self.queues.lock().await;

        let mut matching: Vec<(chrono::DateTime<chrono::Utc>, String)> = queues
            .values()
            .filter(|queue| queue.guild_id == guild_id && queue.contains_player(user_id))
            .map(|queue| (queue.created_at, queue.id.clone()))
            .collect();
        matching.sort();

        debug!(
            "User {} leaving {} queue(s) in guild {}",
            user_id,
            matching.len(),
            guild_id
        );

        let mut report = LeaveReport::default();
        for (_, queue_id) in matching {
            match Self::remove_player(&mut queues, &queue_id, user_id) {
                Ok(LeaveOutcome::Left(queue)) => report.left.push(queue),
                Ok(LeaveOutcome::Closed(queue)) => {
                    info!("Queue {} closed after user {} left", queue.id, user_id);
                    report.closed.push(queue);
                }
                Err(e) => {
                    warn!(
                        "Failed to remove user {} from queue {}: {}",
                        user_id, queue_id, e
                    );
                    report.failures.push(LeaveFailure {
                        queue_id,
                        reason: e.to_string(),
                    });
                }
            }
        }

        report
    }

    fn remove_player(
        queues: &mut HashMap<String, Queue>,
        queue_id: &str,
        user_id: &str,
    ) -> Result<LeaveOutcome, QueueRegistryError> {
        let queue = queues
            .get_mut(queue_id)
            .ok_or(QueueRegistryError::NotFound)?;

        if queue.players.len() > queue.max_players as usize {
            return Err(QueueRegistryError::InvariantViolation(format!(
                "queue {} holds {} players but its capacity is {}",
                queue_id,
                queue.players.len(),
                queue.max_players
            )));
        }
        if !queue.contains_player(user_id) {
            return Err(QueueRegistryError::InvariantViolation(format!(
                "user {} is not in queue {}",
                user_id, queue_id
            )));
        }

        queue.players.retain(|player| player != user_id);

        if queue.owner_id == user_id || queue.players.is_empty() {
            let queue = queues
                .remove(queue_id)
                .ok_or(QueueRegistryError::NotFound)?;
            Ok(LeaveOutcome::Closed(queue))
        } else {
            Ok(LeaveOutcome::Left(queue.clone()))
        }
    }

    pub async fn get(&self, queue_id: &str) -> Option<Queue> {
        self.queues.lock().await.get(queue_id).cloned()
    }

    /// Snapshot of one guild's queues, oldest first.
    pub async fn list_by_guild(&self, guild_id: &str) -> Vec<Queue> {
        let queues = self.queues.lock().await;
        let mut snapshot: Vec<Queue> = queues
            .values()
            .filter(|queue| queue.guild_id == guild_id)
            .cloned()
            .collect();
        snapshot.sort_by_key(|queue| queue.created_at);
        snapshot
    }

    /// Snapshot of every open queue, oldest first.
    pub async fn list_all(&self) -> Vec<Queue> {
        let queues = self.queues.lock().await;
        let mut snapshot: Vec<Queue> = queues.values().cloned().collect();
        snapshot.sort_by_key(|queue| queue.created_at);
        snapshot
    }

    pub async fn count_players(&self, guild_id: &str) -> usize {
        let queues = self.queues.lock().await;
        queues
            .values()
            .filter(|queue| queue.guild_id == guild_id)
            .map(|queue| queue.player_count())
            .sum()
    }

    /// Inserts a queue without validation so tests can seed corrupt state.
    #[cfg(test)]
    pub(crate) async fn insert_unchecked(&self, queue: Queue) {
        self.queues.lock().await.insert(queue.id.clone(), queue);
    }
}
