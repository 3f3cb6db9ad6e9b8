use std::collections::HashMap;

use crate::models::summary::{GameGroup, GameSummary, GuildStatistics};
use crate::services::queue_registry::QueueRegistry;

/// Chat messages have a hard size limit, so the summary never renders more
/// than this many games, nor more than `MAX_QUEUES_PER_GAME` queues each.
pub const MAX_GAMES_PER_SUMMARY: usize = 10;
pub const MAX_QUEUES_PER_GAME: usize = 5;

/// Read-only projections over queue registry snapshots. Holds no state of
/// its own and never mutates the registry.
#[derive(Clone)]
pub struct QueueSummaryService {
    queue_registry: QueueRegistry,
}

impl QueueSummaryService {
    pub fn new(queue_registry: QueueRegistry) -> Self {
        QueueSummaryService { queue_registry }
    }

    /// Groups every open queue by game, oldest queue first within a group and
    /// groups ordered by their oldest queue. Truncates to the summary caps
    /// and reports how much was cut.
    pub async fn game_summary(&self) -> GameSummary {
        let queues = self.queue_registry.list_all().await;

        // Games are keyed case-insensitively; the first-seen spelling is kept
        // for display.
        let mut group_index: HashMap<String, usize> = HashMap::new();
        let mut groups: Vec<GameGroup> = Vec::new();

        for queue in queues {
            let key = queue.game_name.to_lowercase();
            match group_index.get(&key) {
                Some(&index) => groups[index].queues.push(queue),
                None => {
                    group_index.insert(key, groups.len());
                    groups.push(GameGroup {
                        game_name: queue.game_name.clone(),
                        queues: vec![queue],
                        omitted_queues: 0,
                    });
                }
            }
        }

        let omitted_games = groups.len().saturating_sub(MAX_GAMES_PER_SUMMARY);
        groups.truncate(MAX_GAMES_PER_SUMMARY);

        for group in &mut groups {
            group.omitted_queues = group.queues.len().saturating_sub(MAX_QUEUES_PER_GAME);
            group.queues.truncate(MAX_QUEUES_PER_GAME);
        }

        GameSummary {
            games: groups,
            omitted_games,
        }
    }

    pub async fn guild_statistics(&self, guild_id: &str) -> GuildStatistics {
        GuildStatistics {
            queue_count: self.queue_registry.list_by_guild(guild_id).await.len(),
            player_count: self.queue_registry.count_players(guild_id).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::queue::Queue;
    use chrono::{Duration, Utc};

    async fn registry_with_games(games: &[&str]) -> QueueRegistry {
        let registry = QueueRegistry::new();
        let base = Utc::now();
        for (i, game) in games.iter().enumerate() {
            let mut queue = Queue::new("guild-1", &format!("owner-{}", i), game, 5);
            // Spread creation times so ordering is deterministic
            queue.created_at = base + Duration::seconds(i as i64);
            registry.register(queue).await.unwrap();
        }
        registry
    }

    #[tokio::test]
    async fn test_game_summary_groups_by_game() {
        let registry = registry_with_games(&["Valorant", "Chess", "Valorant"]).await;
        let service = QueueSummaryService::new(registry);

        let summary = service.game_summary().await;

        assert_eq!(summary.games.len(), 2);
        assert_eq!(summary.omitted_games, 0);
        assert_eq!(summary.games[0].game_name, "Valorant");
        assert_eq!(summary.games[0].queues.len(), 2);
        assert_eq!(summary.games[1].game_name, "Chess");
    }

    #[tokio::test]
    async fn test_game_summary_groups_case_insensitively() {
        let registry = registry_with_games(&["Valorant", "VALORANT", "valorant"]).await;
        let service = QueueSummaryService::new(registry);

        let summary = service.game_summary().await;

        assert_eq!(summary.games.len(), 1);
        assert_eq!(summary.games[0].game_name, "Valorant");
        assert_eq!(summary.games[0].queues.len(), 3);
    }

    #[tokio::test]
    async fn test_game_summary_truncates_to_ten_games() {
        let games: Vec<String> = (0..12).map(|i| format!("Game {:02}", i)).collect();
        let names: Vec<&str> = games.iter().map(String::as_str).collect();
        let registry = registry_with_games(&names).await;
        let service = QueueSummaryService::new(registry);

        let summary = service.game_summary().await;

        assert_eq!(summary.games.len(), 10);
        assert_eq!(summary.omitted_games, 2);
        // First-created games survive the cut
        assert_eq!(summary.games[0].game_name, "Game 00");
        assert_eq!(summary.games[9].game_name, "Game 09");
    }

    #[tokio::test]
    async fn test_game_summary_truncates_queues_within_game() {
        let games = ["Valorant"; 7];
        let registry = registry_with_games(&games).await;
        let service = QueueSummaryService::new(registry);

        let summary = service.game_summary().await;

        assert_eq!(summary.games.len(), 1);
        assert_eq!(summary.games[0].queues.len(), 5);
        assert_eq!(summary.games[0].omitted_queues, 2);
    }

    #[tokio::test]
    async fn test_game_summary_empty_registry() {
        let service = QueueSummaryService::new(QueueRegistry::new());

        let summary = service.game_summary().await;

        assert!(summary.games.is_empty());
        assert_eq!(summary.omitted_games, 0);
    }

    #[tokio::test]
    async fn test_guild_statistics_counts_queues_and_players() {
        let registry = QueueRegistry::new();
        let queue = Queue::new("guild-1", "owner-1", "Valorant", 5);
        let id = registry.register(queue).await.unwrap();
        registry.join(&id, "player-2").await.unwrap();
        registry
            .register(Queue::new("guild-1", "owner-2", "Chess", 2))
            .await
            .unwrap();
        registry
            .register(Queue::new("guild-2", "owner-3", "Chess", 2))
            .await
            .unwrap();

        let service = QueueSummaryService::new(registry);
        let statistics = service.guild_statistics("guild-1").await;

        assert_eq!(statistics.queue_count, 2);
        assert_eq!(statistics.player_count, 3);
    }

    #[tokio::test]
    async fn test_summary_does_not_mutate_registry() {
        let registry = registry_with_games(&["Valorant"; 7]).await;
        let service = QueueSummaryService::new(registry.clone());

        service.game_summary().await;

        assert_eq!(registry.list_all().await.len(), 7);
    }
}
