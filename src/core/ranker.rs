use crate::models::{Profile, ScoredCandidate, ScoringWeights};
use crate::core::{
    exclusion::ExclusionSet,
    filters::{apply_exclusions, working_set},
    scoring::calculate_affinity,
};

/// Main ranking orchestrator - implements the candidate pipeline
///
/// # Pipeline Stages
/// 1. Exclusion filtering (liked, matched, self)
/// 2. Strong-match narrowing with fallback to the remaining pool
/// 3. Affinity scoring
/// 4. Stable descending sort
#[derive(Debug, Clone)]
pub struct Ranker {
    weights: ScoringWeights,
}

impl Ranker {
    pub fn new(weights: ScoringWeights) -> Self {
        Self { weights }
    }

    pub fn with_default_weights() -> Self {
        Self {
            weights: ScoringWeights::default(),
        }
    }

    /// Rank a candidate pool for a viewer
    ///
    /// # Arguments
    /// * `viewer` - The viewer's profile, if it could be loaded
    /// * `pool` - All profiles, possibly including the viewer
    /// * `exclusions` - Ids to drop before ranking
    ///
    /// # Returns
    /// Candidates in descending score order; ties keep pool order. Without a
    /// viewer profile the exclusion-filtered pool comes back in pool order,
    /// unscored.
    pub fn rank(
        &self,
        viewer: Option<&Profile>,
        pool: Vec<Profile>,
        exclusions: &ExclusionSet,
    ) -> Vec<ScoredCandidate> {
        let remaining = apply_exclusions(pool, exclusions);

        let Some(viewer) = viewer else {
            tracing::debug!("No viewer profile, returning {} unranked candidates", remaining.len());
            return remaining.into_iter().map(ScoredCandidate::unranked).collect();
        };

        let mut scored: Vec<ScoredCandidate> = working_set(viewer, remaining)
            .into_iter()
            .map(|profile| {
                let (score, breakdown) = calculate_affinity(viewer, &profile, &self.weights);
                ScoredCandidate {
                    profile,
                    score,
                    breakdown,
                }
            })
            .collect();

        // sort_by is stable, so equal scores keep pool order
        scored.sort_by(|a, b| b.score.cmp(&a.score));

        scored
    }
}

impl Default for Ranker {
    fn default() -> Self {
        Self::with_default_weights()
    }
}
