use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::models::{Profile, ProfileUpdate};

/// Errors surfaced by any backing store
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Store unavailable: {0}")]
    Unavailable(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Write rejected: {0}")]
    Rejected(String),
}

/// Profile documents keyed by user id
#[async_trait]
pub trait ProfileStore: Send + Sync {
    async fn get(&self, id: &str) -> Result<Option<Profile>, StoreError>;

    /// Every stored profile, in a stable order
    async fn get_all(&self) -> Result<Vec<Profile>, StoreError>;

    /// Create or replace a profile
    async fn put(&self, id: &str, profile: &Profile) -> Result<(), StoreError>;

    /// Apply a partial update; `NotFound` if there is no such profile
    async fn update(&self, id: &str, update: &ProfileUpdate) -> Result<(), StoreError>;

    async fn health_check(&self) -> bool {
        true
    }
}

/// Like edges and the symmetric match entries derived from them
#[async_trait]
pub trait LikeStore: Send + Sync {
    /// Upsert Like(liker -> target); replaying only refreshes the timestamp
    async fn put_like(&self, liker: &str, target: &str, at: DateTime<Utc>) -> Result<(), StoreError>;

    async fn get_like(&self, liker: &str, target: &str) -> Result<bool, StoreError>;

    /// Ids `uid` has liked
    async fn list_liked(&self, uid: &str) -> Result<Vec<String>, StoreError>;

    /// Write both match entries or neither. Existing pairs are left as-is.
    async fn put_match_pair(&self, a: &str, b: &str, at: DateTime<Utc>) -> Result<(), StoreError>;

    /// Ids `uid` is matched with
    async fn list_matched(&self, uid: &str) -> Result<Vec<String>, StoreError>;

    /// Upsert Like(liker -> target) and, if Like(target -> liker) exists,
    /// create the match pair, all as one atomic step.
    ///
    /// Returns `true` only for the call that created the match, so each pair
    /// reports its mutual match once.
    async fn like_and_match(&self, liker: &str, target: &str, at: DateTime<Utc>) -> Result<bool, StoreError>;

    async fn health_check(&self) -> bool {
        true
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;

    /// Like store that rejects every call
    pub struct UnreachableStore;

    #[async_trait]
    impl LikeStore for UnreachableStore {
        async fn put_like(&self, _: &str, _: &str, _: DateTime<Utc>) -> Result<(), StoreError> {
            Err(StoreError::Unavailable("offline".into()))
        }
        async fn get_like(&self, _: &str, _: &str) -> Result<bool, StoreError> {
            Err(StoreError::Unavailable("offline".into()))
        }
        async fn list_liked(&self, _: &str) -> Result<Vec<String>, StoreError> {
            Err(StoreError::Unavailable("offline".into()))
        }
        async fn put_match_pair(&self, _: &str, _: &str, _: DateTime<Utc>) -> Result<(), StoreError> {
            Err(StoreError::Unavailable("offline".into()))
        }
        async fn list_matched(&self, _: &str) -> Result<Vec<String>, StoreError> {
            Err(StoreError::Unavailable("offline".into()))
        }
        async fn like_and_match(&self, _: &str, _: &str, _: DateTime<Utc>) -> Result<bool, StoreError> {
            Err(StoreError::Unavailable("offline".into()))
        }
        async fn health_check(&self) -> bool {
            false
        }
    }
}
