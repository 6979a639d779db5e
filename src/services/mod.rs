// Service exports
pub mod appwrite;
pub mod cache;
pub mod candidates;
pub mod identity;
pub mod likes;
pub mod memory;
pub mod postgres;
pub mod store;

pub use appwrite::{AppwriteProfileStore, AppwriteError};
pub use cache::{CacheManager, CacheKey, CacheError, CachedProfileStore};
pub use candidates::CandidateService;
pub use identity::{AuthError, BearerIdentity, IdentityProvider, StaticIdentity, TokenVerifier};
pub use likes::{LikeOutcome, LikeService};
pub use memory::InMemoryStore;
pub use postgres::{PostgresError, PostgresLikeStore};
pub use store::{LikeStore, ProfileStore, StoreError};
