use std::sync::Arc;
use std::time::Duration;

use crate::core::{ExclusionSet, RankingSession, Ranker};
use crate::models::ScoredCandidate;
use crate::services::likes::LikeService;
use crate::services::store::ProfileStore;

/// Builds ranked candidate queues and owns each viewer's ranking session
///
/// Sessions live in a bounded, idle-expiring cache keyed by viewer id. Only
/// the viewer's own requests touch their session.
pub struct CandidateService {
    profiles: Arc<dyn ProfileStore>,
    likes: LikeService,
    ranker: Ranker,
    sessions: moka::future::Cache<String, RankingSession>,
}

impl CandidateService {
    pub fn new(
        profiles: Arc<dyn ProfileStore>,
        likes: LikeService,
        ranker: Ranker,
        session_capacity: u64,
        session_idle_secs: u64,
    ) -> Self {
        let sessions = moka::future::CacheBuilder::new(session_capacity)
            .time_to_idle(Duration::from_secs(session_idle_secs))
            .build();

        Self {
            profiles,
            likes,
            ranker,
            sessions,
        }
    }

    /// Liked ids, matched ids and the viewer, fetched concurrently
    ///
    /// Lookup failures contribute nothing, so more candidates are shown
    /// rather than fewer.
    pub async fn exclusion_set(&self, viewer_id: &str) -> ExclusionSet {
        let (liked, matched) = tokio::join!(
            self.likes.liked_ids(viewer_id),
            self.likes.matched_ids(viewer_id),
        );

        let exclusions = ExclusionSet::for_viewer(viewer_id, &liked, &matched);
        tracing::debug!("Excluding {} ids for viewer {}", exclusions.len(), viewer_id);
        exclusions
    }

    /// Rank the full profile pool for a viewer
    pub async fn rank_for(&self, viewer_id: &str) -> Vec<ScoredCandidate> {
        let (viewer, pool, exclusions) = tokio::join!(
            self.profiles.get(viewer_id),
            self.profiles.get_all(),
            self.exclusion_set(viewer_id),
        );

        let viewer = viewer.unwrap_or_else(|e| {
            tracing::warn!("Failed to load profile for {}, ranking disabled: {}", viewer_id, e);
            None
        });

        let pool = match pool {
            Ok(pool) => pool,
            Err(e) => {
                tracing::error!("Failed to load candidate pool for {}: {}", viewer_id, e);
                vec![]
            }
        };

        let total = pool.len();
        let ranked = self.ranker.rank(viewer.as_ref(), pool, &exclusions);

        tracing::info!(
            "Ranked {} candidates for {} (from {} profiles)",
            ranked.len(),
            viewer_id,
            total
        );

        ranked
    }

    /// Rebuild the viewer's session from scratch
    pub async fn reload(&self, viewer_id: &str) -> RankingSession {
        let session = RankingSession::new(viewer_id, self.rank_for(viewer_id).await);
        self.sessions.insert(viewer_id.to_string(), session.clone()).await;
        session
    }

    /// The viewer's session, loading one if none is live
    pub async fn session(&self, viewer_id: &str) -> RankingSession {
        match self.sessions.get(viewer_id).await {
            Some(session) => session,
            None => self.reload(viewer_id).await,
        }
    }

    /// Skip the current candidate
    pub async fn skip(&self, viewer_id: &str) -> RankingSession {
        let mut session = self.session(viewer_id).await;
        session.advance();
        self.sessions.insert(viewer_id.to_string(), session.clone()).await;
        session
    }

    /// Take `target_id` out of the viewer's remaining queue after a like
    pub async fn mark_liked(&self, viewer_id: &str, target_id: &str) {
        if let Some(mut session) = self.sessions.get(viewer_id).await {
            if session.mark_liked(target_id) {
                self.sessions.insert(viewer_id.to_string(), session).await;
            }
        }
    }

    /// Drop the viewer's session, e.g. after their profile changes
    pub async fn invalidate(&self, viewer_id: &str) {
        self.sessions.invalidate(viewer_id).await;
    }

    pub async fn health_check(&self) -> bool {
        self.profiles.health_check().await
    }
}
