// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{Profile, ProfileUpdate, MatchRecord, PairState, ScoreBreakdown, ScoredCandidate, ScoringWeights};
pub use requests::{RecordLikeRequest, PutProfileRequest, UpdateProfileRequest};
pub use responses::{CandidatesResponse, CurrentCandidateResponse, LikeResponse, IdListResponse, HealthResponse, ErrorResponse};
