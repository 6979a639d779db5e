//! studyBUddy - study-partner matching service
//!
//! This library ranks candidate study partners for a viewer and runs the
//! like/match state machine between students.
//!
//! - [`core`] holds the pure ranking pipeline: label normalization,
//!   exclusion, the strong-match working set, scoring and per-viewer
//!   ranking sessions.
//! - [`services`] holds the store contracts, their adapters (in-memory,
//!   Appwrite, cached, PostgreSQL) and the like/candidate services.
//! - [`routes`] exposes both over HTTP.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use crate::core::{ExclusionSet, Ranker, RankingSession, normalize::{normalize, labels_match}};
pub use crate::models::{Profile, ProfileUpdate, PairState, ScoredCandidate, ScoreBreakdown, ScoringWeights};
pub use crate::services::{LikeOutcome, LikeService, CandidateService};
