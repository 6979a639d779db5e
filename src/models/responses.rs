use serde::{Deserialize, Serialize};
use crate::models::domain::ScoredCandidate;

/// Response for the candidate reload endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CandidatesResponse {
    pub candidates: Vec<ScoredCandidate>,
    pub cursor: usize,
    pub total_results: usize,
}

/// Response for the current-candidate endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentCandidateResponse {
    pub candidate: Option<ScoredCandidate>,
    pub cursor: usize,
    pub remaining: usize,
}

/// Like outcome
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LikeResponse {
    pub mutual: bool,
    #[serde(rename = "matchedUserId")]
    pub matched_user_id: Option<String>,
}

/// List of user ids (liked or matched)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdListResponse {
    #[serde(rename = "userId")]
    pub user_id: String,
    pub ids: Vec<String>,
    pub count: usize,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}
