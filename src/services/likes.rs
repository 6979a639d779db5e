use chrono::Utc;
use serde::Serialize;
use std::sync::Arc;

use crate::models::PairState;
use crate::services::identity::IdentityProvider;
use crate::services::store::LikeStore;

/// Result of a like action
///
/// `NotMutual` also covers store failures: a caller cannot tell a genuine
/// one-sided like from a like that was never recorded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum LikeOutcome {
    NotAuthenticated,
    NotMutual,
    Mutual { matched_user_id: String },
}

impl LikeOutcome {
    pub fn is_mutual(&self) -> bool {
        matches!(self, LikeOutcome::Mutual { .. })
    }

    pub fn matched_user_id(&self) -> Option<&str> {
        match self {
            LikeOutcome::Mutual { matched_user_id } => Some(matched_user_id),
            _ => None,
        }
    }
}

/// Like/match state machine over a [`LikeStore`]
///
/// Per unordered pair: `NoInteraction -> OneSidedLike -> Matched`, with
/// `Matched` terminal. Store failures never propagate: they are logged and
/// degrade to "not mutual" or empty lists.
#[derive(Clone)]
pub struct LikeService {
    store: Arc<dyn LikeStore>,
}

impl LikeService {
    pub fn new(store: Arc<dyn LikeStore>) -> Self {
        Self { store }
    }

    /// Record that the current user likes `target_id`
    ///
    /// The like write, reciprocal check and match creation happen as one
    /// atomic store operation. Only the like that creates the match reports
    /// `Mutual`; replays after that report `NotMutual`.
    pub async fn record_like(&self, identity: &dyn IdentityProvider, target_id: &str) -> LikeOutcome {
        let Some(viewer_id) = identity.current_user_id() else {
            tracing::debug!("Ignoring like for {}: not signed in", target_id);
            return LikeOutcome::NotAuthenticated;
        };

        if viewer_id == target_id {
            tracing::warn!("Ignoring self-like from {}", viewer_id);
            return LikeOutcome::NotMutual;
        }

        match self.store.like_and_match(&viewer_id, target_id, Utc::now()).await {
            Ok(true) => {
                tracing::info!("Mutual match between {} and {}", viewer_id, target_id);
                LikeOutcome::Mutual {
                    matched_user_id: target_id.to_string(),
                }
            }
            Ok(false) => {
                tracing::debug!("Recorded like: {} -> {}", viewer_id, target_id);
                LikeOutcome::NotMutual
            }
            Err(e) => {
                tracing::error!("Failed to record like {} -> {}: {}", viewer_id, target_id, e);
                LikeOutcome::NotMutual
            }
        }
    }

    /// Ids `user_id` has liked; empty on store failure
    pub async fn liked_ids(&self, user_id: &str) -> Vec<String> {
        self.store.list_liked(user_id).await.unwrap_or_else(|e| {
            tracing::warn!("Failed to fetch liked ids for {}, treating as none: {}", user_id, e);
            vec![]
        })
    }

    /// Ids `user_id` is matched with; empty on store failure
    pub async fn matched_ids(&self, user_id: &str) -> Vec<String> {
        self.store.list_matched(user_id).await.unwrap_or_else(|e| {
            tracing::warn!("Failed to fetch matched ids for {}, treating as none: {}", user_id, e);
            vec![]
        })
    }

    /// Current state of the pair, seen from either side
    ///
    /// A match entry wins. Otherwise the first existing like direction,
    /// checking `a -> b` before `b -> a`. Store failures read as
    /// `NoInteraction`.
    pub async fn pair_state(&self, a: &str, b: &str) -> PairState {
        if self.matched_ids(a).await.iter().any(|id| id == b) {
            return PairState::Matched;
        }

        for (liker, target) in [(a, b), (b, a)] {
            match self.store.get_like(liker, target).await {
                Ok(true) => {
                    return PairState::OneSidedLike {
                        liker: liker.to_string(),
                    }
                }
                Ok(false) => {}
                Err(e) => {
                    tracing::warn!("Failed to read like {} -> {}: {}", liker, target, e);
                }
            }
        }

        PairState::NoInteraction
    }

    pub async fn health_check(&self) -> bool {
        self.store.health_check().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::identity::StaticIdentity;
    use crate::services::memory::InMemoryStore;
    use crate::services::store::testing::UnreachableStore;

    fn create_service() -> (LikeService, Arc<InMemoryStore>) {
        let store = Arc::new(InMemoryStore::new());
        (LikeService::new(store.clone()), store)
    }

    #[tokio::test]
    async fn test_anonymous_like_is_noop() {
        let (service, store) = create_service();

        let outcome = service.record_like(&StaticIdentity::anonymous(), "b").await;

        assert_eq!(outcome, LikeOutcome::NotAuthenticated);
        assert!(!outcome.is_mutual());
        assert!(store.list_liked("b").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_one_sided_then_mutual() {
        let (service, _) = create_service();
        let alice = StaticIdentity::signed_in("alice");
        let bob = StaticIdentity::signed_in("bob");

        assert_eq!(service.pair_state("alice", "bob").await, PairState::NoInteraction);

        assert_eq!(service.record_like(&alice, "bob").await, LikeOutcome::NotMutual);
        assert_eq!(
            service.pair_state("bob", "alice").await,
            PairState::OneSidedLike { liker: "alice".to_string() }
        );

        let outcome = service.record_like(&bob, "alice").await;
        assert!(outcome.is_mutual());
        assert_eq!(outcome.matched_user_id(), Some("alice"));

        assert_eq!(service.pair_state("alice", "bob").await, PairState::Matched);
        assert_eq!(service.matched_ids("alice").await, vec!["bob"]);
        assert_eq!(service.matched_ids("bob").await, vec!["alice"]);
    }

    #[tokio::test]
    async fn test_matched_is_terminal_and_reported_once_per_pair() {
        let (service, store) = create_service();
        let alice = StaticIdentity::signed_in("alice");
        let bob = StaticIdentity::signed_in("bob");

        service.record_like(&alice, "bob").await;
        service.record_like(&bob, "alice").await;

        // Replaying a like neither duplicates nor removes the match
        assert_eq!(service.record_like(&alice, "bob").await, LikeOutcome::NotMutual);

        assert_eq!(store.match_records("alice").await.len(), 1);
        assert_eq!(service.pair_state("alice", "bob").await, PairState::Matched);
    }

    #[tokio::test]
    async fn test_self_like_ignored() {
        let (service, store) = create_service();

        let outcome = service.record_like(&StaticIdentity::signed_in("me"), "me").await;

        assert_eq!(outcome, LikeOutcome::NotMutual);
        assert!(store.list_liked("me").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_store_failures_degrade() {
        let service = LikeService::new(Arc::new(UnreachableStore));

        let outcome = service.record_like(&StaticIdentity::signed_in("a"), "b").await;

        assert_eq!(outcome, LikeOutcome::NotMutual);
        assert!(service.liked_ids("a").await.is_empty());
        assert!(service.matched_ids("a").await.is_empty());
        assert_eq!(service.pair_state("a", "b").await, PairState::NoInteraction);
        assert!(!service.health_check().await);
    }
}
