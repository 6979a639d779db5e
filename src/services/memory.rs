use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;
use tokio::sync::{Mutex, RwLock};

use crate::models::{MatchRecord, Profile, ProfileUpdate};
use crate::services::store::{LikeStore, ProfileStore, StoreError};

/// Likes and matches, guarded together so compound operations are atomic
#[derive(Debug, Default)]
struct LikeGraph {
    /// liker -> liked -> created_at
    likes: BTreeMap<String, BTreeMap<String, DateTime<Utc>>>,
    /// user -> matched user -> entry stored under user
    matches: BTreeMap<String, BTreeMap<String, MatchRecord>>,
}

impl LikeGraph {
    fn put_like(&mut self, liker: &str, target: &str, at: DateTime<Utc>) {
        self.likes
            .entry(liker.to_string())
            .or_default()
            .insert(target.to_string(), at);
    }

    fn has_like(&self, liker: &str, target: &str) -> bool {
        self.likes
            .get(liker)
            .is_some_and(|liked| liked.contains_key(target))
    }

    fn is_matched(&self, a: &str, b: &str) -> bool {
        self.matches
            .get(a)
            .is_some_and(|matched| matched.contains_key(b))
    }

    /// Returns whether a new pair was written
    fn put_match_pair(&mut self, a: &str, b: &str, at: DateTime<Utc>) -> bool {
        if self.is_matched(a, b) {
            return false;
        }

        let match_id = uuid::Uuid::new_v4();
        for (user, other) in [(a, b), (b, a)] {
            self.matches.entry(user.to_string()).or_default().insert(
                other.to_string(),
                MatchRecord {
                    match_id,
                    user_id: user.to_string(),
                    matched_user_id: other.to_string(),
                    matched_at: at,
                },
            );
        }
        true
    }
}

/// In-process profile and like/match store
///
/// Used for local runs (`storage.backend = "memory"`) and tests. Profiles
/// come back from `get_all` ordered by id.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    profiles: RwLock<BTreeMap<String, Profile>>,
    graph: Mutex<LikeGraph>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the store with profiles
    pub async fn with_profiles(profiles: impl IntoIterator<Item = Profile>) -> Self {
        let store = Self::new();
        {
            let mut map = store.profiles.write().await;
            for profile in profiles {
                map.insert(profile.user_id.clone(), profile);
            }
        }
        store
    }

    /// Match entries stored under `uid`
    pub async fn match_records(&self, uid: &str) -> Vec<MatchRecord> {
        let graph = self.graph.lock().await;
        graph
            .matches
            .get(uid)
            .map(|matched| matched.values().cloned().collect())
            .unwrap_or_default()
    }

    /// Timestamp of Like(liker -> target), if any
    pub async fn like_timestamp(&self, liker: &str, target: &str) -> Option<DateTime<Utc>> {
        let graph = self.graph.lock().await;
        graph.likes.get(liker).and_then(|liked| liked.get(target)).copied()
    }
}

#[async_trait]
impl ProfileStore for InMemoryStore {
    async fn get(&self, id: &str) -> Result<Option<Profile>, StoreError> {
        Ok(self.profiles.read().await.get(id).cloned())
    }

    async fn get_all(&self) -> Result<Vec<Profile>, StoreError> {
        Ok(self.profiles.read().await.values().cloned().collect())
    }

    async fn put(&self, id: &str, profile: &Profile) -> Result<(), StoreError> {
        if profile.user_id != id {
            return Err(StoreError::Rejected(format!(
                "profile for {} stored under id {}",
                profile.user_id, id
            )));
        }
        self.profiles.write().await.insert(id.to_string(), profile.clone());
        Ok(())
    }

    async fn update(&self, id: &str, update: &ProfileUpdate) -> Result<(), StoreError> {
        let mut profiles = self.profiles.write().await;
        let profile = profiles
            .get_mut(id)
            .ok_or_else(|| StoreError::NotFound(format!("Profile not found for user {}", id)))?;
        update.apply_to(profile);
        Ok(())
    }
}

#[async_trait]
impl LikeStore for InMemoryStore {
    async fn put_like(&self, liker: &str, target: &str, at: DateTime<Utc>) -> Result<(), StoreError> {
        self.graph.lock().await.put_like(liker, target, at);
        Ok(())
    }

    async fn get_like(&self, liker: &str, target: &str) -> Result<bool, StoreError> {
        Ok(self.graph.lock().await.has_like(liker, target))
    }

    async fn list_liked(&self, uid: &str) -> Result<Vec<String>, StoreError> {
        let graph = self.graph.lock().await;
        Ok(graph
            .likes
            .get(uid)
            .map(|liked| liked.keys().cloned().collect())
            .unwrap_or_default())
    }

    async fn put_match_pair(&self, a: &str, b: &str, at: DateTime<Utc>) -> Result<(), StoreError> {
        self.graph.lock().await.put_match_pair(a, b, at);
        Ok(())
    }

    async fn list_matched(&self, uid: &str) -> Result<Vec<String>, StoreError> {
        let graph = self.graph.lock().await;
        Ok(graph
            .matches
            .get(uid)
            .map(|matched| matched.keys().cloned().collect())
            .unwrap_or_default())
    }

    async fn like_and_match(&self, liker: &str, target: &str, at: DateTime<Utc>) -> Result<bool, StoreError> {
        let mut graph = self.graph.lock().await;
        graph.put_like(liker, target, at);

        if graph.has_like(target, liker) {
            return Ok(graph.put_match_pair(liker, target, at));
        }

        Ok(false)
    }
}
