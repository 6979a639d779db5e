use crate::models::{Profile, ScoreBreakdown, ScoringWeights};
use crate::core::normalize::{count_shared, labels_match, shared_slots};

/// Calculate a candidate's affinity score for a viewer
///
/// Scoring formula (default weights):
/// score = (
///     6 * major_match +            # normalized containment, either way
///     4 * shared_courses +         # viewer courses matching any candidate course
///     3 * same_year +              # case-insensitive equality
///     2 * shared_slots             # availability set intersection
/// )
pub fn calculate_affinity(
    viewer: &Profile,
    candidate: &Profile,
    weights: &ScoringWeights,
) -> (u32, ScoreBreakdown) {
    let breakdown = ScoreBreakdown {
        major_match: labels_match(&viewer.major, &candidate.major),
        shared_courses: count_shared(&viewer.courses, &candidate.courses) as u32,
        same_year: same_year(&viewer.year, &candidate.year),
        shared_slots: shared_slots(&viewer.availability, &candidate.availability) as u32,
    };

    (weigh(&breakdown, weights), breakdown)
}

/// Combine a breakdown into a total score
#[inline]
pub fn weigh(breakdown: &ScoreBreakdown, weights: &ScoringWeights) -> u32 {
    let mut score = 0;
    if breakdown.major_match {
        score += weights.major;
    }
    score += weights.course * breakdown.shared_courses;
    if breakdown.same_year {
        score += weights.year;
    }
    score += weights.slot * breakdown.shared_slots;
    score
}

#[inline]
fn same_year(a: &str, b: &str) -> bool {
    // Plain case-insensitive equality; two blank years count as equal
    a.to_lowercase() == b.to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_profile(major: &str, year: &str, courses: &[&str], availability: &str) -> Profile {
        let mut profile = Profile::new("test_user", "Test User");
        profile.major = major.to_string();
        profile.year = year.to_string();
        profile.courses = courses.iter().map(|c| c.to_string()).collect();
        profile.availability = availability.to_string();
        profile
    }

    #[test]
    fn test_full_affinity() {
        let viewer = create_test_profile("Computer Science", "Junior", &["CS501", "MA242"], "Mon AM, Tue PM");
        let candidate = create_test_profile("computer science", "junior", &["cs-501", "ma 242"], "tue pm");

        let (score, breakdown) = calculate_affinity(&viewer, &candidate, &ScoringWeights::default());

        assert!(breakdown.major_match);
        assert_eq!(breakdown.shared_courses, 2);
        assert!(breakdown.same_year);
        assert_eq!(breakdown.shared_slots, 1);
        assert_eq!(score, 6 + 8 + 3 + 2);
    }

    #[test]
    fn test_no_overlap_scores_zero() {
        let viewer = create_test_profile("Physics", "Senior", &["PY211"], "Mon AM");
        let candidate = create_test_profile("History", "Freshman", &["HI101"], "Fri PM");

        let (score, _) = calculate_affinity(&viewer, &candidate, &ScoringWeights::default());

        assert_eq!(score, 0);
    }

    #[test]
    fn test_year_equality_is_case_insensitive() {
        assert!(same_year("", ""));
        assert!(!same_year("Junior ", "Junior"));
        assert!(same_year("Junior", "JUNIOR"));
        assert!(!same_year("Junior", "Senior"));
    }

    #[test]
    fn test_custom_weights() {
        let weights = ScoringWeights { major: 10, course: 1, year: 0, slot: 0 };
        let breakdown = ScoreBreakdown {
            major_match: true,
            shared_courses: 3,
            same_year: true,
            shared_slots: 4,
        };

        assert_eq!(weigh(&breakdown, &weights), 13);
    }
}
