use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use tokio::sync::Mutex;
use tracing::{info, warn};

use crate::models::search::{QueueSearch, SearchStatistics, MAX_SEARCH_HOURS, MIN_SEARCH_HOURS};
use crate::repositories::search_repository::SearchRepository;
use crate::services::errors::search_registry_errors::SearchRegistryError;

/// Authoritative table of active searches, at most one per user. The store
/// is a durable mirror only: every save/remove against it is best-effort and
/// never changes the outcome of the in-memory transition.
#[derive(Clone)]
pub struct SearchRegistry {
    searches: Arc<Mutex<HashMap<String, QueueSearch>>>,
    repository: Arc<dyn SearchRepository>,
}

impl SearchRegistry {
    pub fn new(repository: Arc<dyn SearchRepository>) -> Self {
        SearchRegistry {
            searches: Arc::new(Mutex::new(HashMap::new())),
            repository,
        }
    }

    /// Starts a search for a user who does not have one yet. The search is
    /// live in memory as soon as this returns, whether or not the durable
    /// save succeeded.
    pub async fn start_search(
        &self,
        user_id: &str,
        guild_id: &str,
        game_name: &str,
        game_mode: Option<&str>,
        search_time: u32,
    ) -> Result<QueueSearch, SearchRegistryError> {
        if !(MIN_SEARCH_HOURS..=MAX_SEARCH_HOURS).contains(&search_time) {
            return Err(SearchRegistryError::ValidationError(format!(
                "search time must be between {} and {} hours",
                MIN_SEARCH_HOURS, MAX_SEARCH_HOURS
            )));
        }

        let search = QueueSearch::new(user_id, guild_id, game_name, game_mode, search_time);
        {
            let mut searches = self.searches.lock().await;
            if searches.contains_key(user_id) {
                return Err(SearchRegistryError::AlreadySearching);
            }
            searches.insert(user_id.to_string(), search.clone());
        }

        info!(
            "User {} started searching for '{}' in guild {} ({}h)",
            user_id, search.game_name, guild_id, search_time
        );
        self.schedule_expiration(&search);

        if let Err(e) = self.repository.save_search(&search).await {
            warn!("Failed to persist search for user {}: {}", user_id, e);
        }

        Ok(search)
    }

    /// Cancels a user's active search and returns it. The pending expiration
    /// timer finds a different search id (or none) and does nothing.
    pub async fn cancel_search(&self, user_id: &str) -> Result<QueueSearch, SearchRegistryError> {
        let search = {
            let mut searches = self.searches.lock().await;
            searches
                .remove(user_id)
                .ok_or(SearchRegistryError::NotFound)?
        };

        info!(
            "User {} cancelled their search for '{}'",
            user_id, search.game_name
        );

        if let Err(e) = self.repository.remove_search(user_id).await {
            warn!(
                "Failed to remove cancelled search for user {} from store: {}",
                user_id, e
            );
        }

        Ok(search)
    }

    pub async fn get_active(&self, user_id: &str) -> Option<QueueSearch> {
        self.searches.lock().await.get(user_id).cloned()
    }

    pub async fn statistics(&self) -> Result<SearchStatistics, SearchRegistryError> {
        self.repository
            .get_statistics()
            .await
            .map_err(SearchRegistryError::from)
    }

    /// Schedules the one-shot removal at `end_time`. The task re-checks the
    /// search id before touching the table: if the user cancelled and started
    /// a new search in the meantime, this timer belongs to the old one and
    /// must have no effect.
    fn schedule_expiration(&self, search: &QueueSearch) {
        let searches = Arc::clone(&self.searches);
        let repository = Arc::clone(&self.repository);
        let user_id = search.user_id.clone();
        let search_id = search.search_id.clone();
        let end_time = search.end_time;

        tokio::spawn(async move {
            let wait = (end_time - Utc::now())
                .to_std()
                .unwrap_or(std::time::Duration::ZERO);
            tokio::time::sleep(wait).await;

            let expired = {
                let mut searches = searches.lock().await;
                match searches.get(&user_id) {
                    Some(current) if current.search_id == search_id => searches.remove(&user_id),
                    _ => None,
                }
            };

            if let Some(search) = expired {
                info!(
                    "Search by user {} for '{}' expired after {}h",
                    search.user_id, search.game_name, search.search_time
                );
                if let Err(e) = repository.remove_search(&search.user_id).await {
                    warn!(
                        "Failed to remove expired search for user {} from store: {}",
                        search.user_id, e
                    );
                }
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::search_repository::tests::MockSearchRepository;
    use std::time::Duration;
    use test_case::test_case;

    fn registry_with(repository: MockSearchRepository) -> SearchRegistry {
        SearchRegistry::new(Arc::new(repository))
    }

    /// Lets spawned expiration tasks run after the test clock moved.
    async fn drain_timers() {
        for _ in 0..10 {
            tokio::task::yield_now().await;
        }
    }

    #[tokio::test]
    async fn test_start_search_normalizes_and_times_correctly() {
        let registry = registry_with(MockSearchRepository::new());

        let search = registry
            .start_search("user-1", "guild-1", "Valorant", Some("Ranked"), 2)
            .await
            .unwrap();

        assert_eq!(search.game_name, "valorant");
        assert_eq!(search.game_mode, Some("ranked".to_string()));
        assert_eq!((search.end_time - search.start_time).num_seconds(), 7200);

        let active = registry.get_active("user-1").await.unwrap();
        assert_eq!(active.search_id, search.search_id);
    }

    #[tokio::test]
    async fn test_start_search_rejects_second_search() {
        let registry = registry_with(MockSearchRepository::new());
        registry
            .start_search("user-1", "guild-1", "Valorant", None, 2)
            .await
            .unwrap();

        let result = registry
            .start_search("user-1", "guild-1", "Chess", None, 1)
            .await;

        assert!(matches!(result, Err(SearchRegistryError::AlreadySearching)));

        // The original search is untouched
        let active = registry.get_active("user-1").await.unwrap();
        assert_eq!(active.game_name, "valorant");
    }

    #[test_case(0)]
    #[test_case(9)]
    #[tokio::test]
    async fn test_start_search_rejects_out_of_range_hours(hours: u32) {
        let registry = registry_with(MockSearchRepository::new());

        let result = registry
            .start_search("user-1", "guild-1", "Valorant", None, hours)
            .await;

        assert!(matches!(
            result,
            Err(SearchRegistryError::ValidationError(_))
        ));
        assert!(registry.get_active("user-1").await.is_none());
    }

    #[tokio::test]
    async fn test_start_search_survives_store_failure() {
        let registry = registry_with(MockSearchRepository::new().with_failing_save());

        let result = registry
            .start_search("user-1", "guild-1", "Valorant", None, 2)
            .await;

        // The durable write failed but the search is live in memory
        assert!(result.is_ok());
        assert!(registry.get_active("user-1").await.is_some());
    }

    #[tokio::test]
    async fn test_cancel_search_returns_removed_search() {
        let repository = MockSearchRepository::new();
        let registry = registry_with(repository.clone());
        registry
            .start_search("user-1", "guild-1", "Valorant", None, 2)
            .await
            .unwrap();

        let cancelled = registry.cancel_search("user-1").await.unwrap();

        assert_eq!(cancelled.game_name, "valorant");
        assert!(registry.get_active("user-1").await.is_none());
        assert_eq!(repository.removed_users(), vec!["user-1".to_string()]);
    }

    #[tokio::test]
    async fn test_cancel_without_search_is_not_found() {
        let registry = registry_with(MockSearchRepository::new());

        let result = registry.cancel_search("user-1").await;

        assert!(matches!(result, Err(SearchRegistryError::NotFound)));
    }

    #[tokio::test]
    async fn test_cancel_search_survives_store_failure() {
        let registry = registry_with(MockSearchRepository::new().with_failing_remove());
        registry
            .start_search("user-1", "guild-1", "Valorant", None, 2)
            .await
            .unwrap();

        let result = registry.cancel_search("user-1").await;

        assert!(result.is_ok());
        assert!(registry.get_active("user-1").await.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_search_expires_at_end_time() {
        let repository = MockSearchRepository::new();
        let registry = registry_with(repository.clone());
        registry
            .start_search("user-1", "guild-1", "Valorant", None, 2)
            .await
            .unwrap();

        drain_timers().await;
        tokio::time::advance(Duration::from_secs(2 * 3600 + 1)).await;
        drain_timers().await;

        assert!(registry.get_active("user-1").await.is_none());
        assert_eq!(repository.removed_users(), vec!["user-1".to_string()]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_search_is_present_before_end_time() {
        let registry = registry_with(MockSearchRepository::new());
        registry
            .start_search("user-1", "guild-1", "Valorant", None, 2)
            .await
            .unwrap();

        tokio::time::advance(Duration::from_secs(3600)).await;
        drain_timers().await;

        assert!(registry.get_active("user-1").await.is_some());
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_prevents_expiration_effects() {
        let repository = MockSearchRepository::new();
        let registry = registry_with(repository.clone());
        registry
            .start_search("user-1", "guild-1", "Valorant", None, 2)
            .await
            .unwrap();

        registry.cancel_search("user-1").await.unwrap();

        tokio::time::advance(Duration::from_secs(3 * 3600)).await;
        drain_timers().await;

        // Only the cancellation touched the store; the stale timer did nothing
        assert_eq!(repository.removed_users(), vec!["user-1".to_string()]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_stale_timer_does_not_clobber_restarted_search() {
        let registry = registry_with(MockSearchRepository::new());
        registry
            .start_search("user-1", "guild-1", "Valorant", None, 2)
            .await
            .unwrap();
        registry.cancel_search("user-1").await.unwrap();

        let restarted = registry
            .start_search("user-1", "guild-1", "Chess", None, 8)
            .await
            .unwrap();

        // First search's timer fires here; identity check must protect the new one
        drain_timers().await;
        tokio::time::advance(Duration::from_secs(2 * 3600 + 1)).await;
        drain_timers().await;

        let active = registry.get_active("user-1").await.unwrap();
        assert_eq!(active.search_id, restarted.search_id);

        // The restarted search still expires on its own schedule
        tokio::time::advance(Duration::from_secs(6 * 3600)).await;
        drain_timers().await;
        assert!(registry.get_active("user-1").await.is_none());
    }

    #[tokio::test]
    async fn test_statistics_passes_through_store() {
        let repository = MockSearchRepository::new().with_statistics(SearchStatistics {
            recent_count: 3,
            total_count: 42,
        });
        let registry = registry_with(repository);

        let statistics = registry.statistics().await.unwrap();

        assert_eq!(statistics.recent_count, 3);
        assert_eq!(statistics.total_count, 42);
    }
}
