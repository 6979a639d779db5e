use crate::core::exclusion::ExclusionSet;
use crate::core::normalize::{count_shared, labels_match};
use crate::models::Profile;

/// Drop every profile whose id is in the exclusion set
#[inline]
pub fn apply_exclusions(pool: Vec<Profile>, exclusions: &ExclusionSet) -> Vec<Profile> {
    pool.into_iter()
        .filter(|profile| !exclusions.contains(&profile.user_id))
        .collect()
}

/// A strong match shares the viewer's major or at least one course
#[inline]
pub fn is_strong_match(viewer: &Profile, candidate: &Profile) -> bool {
    labels_match(&viewer.major, &candidate.major)
        || count_shared(&viewer.courses, &candidate.courses) > 0
}

/// Narrow the pool to strong matches, falling back to the whole pool
///
/// Never empties a non-empty pool. Relative order is preserved.
pub fn working_set(viewer: &Profile, pool: Vec<Profile>) -> Vec<Profile> {
    let (strong, rest): (Vec<Profile>, Vec<Profile>) = pool
        .into_iter()
        .partition(|candidate| is_strong_match(viewer, candidate));

    if strong.is_empty() {
        rest
    } else {
        strong
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_profile(id: &str, major: &str, courses: &[&str]) -> Profile {
        let mut profile = Profile::new(id, format!("User {}", id));
        profile.major = major.to_string();
        profile.courses = courses.iter().map(|c| c.to_string()).collect();
        profile
    }

    #[test]
    fn test_exclusions_removed() {
        let pool = vec![
            create_test_profile("a", "Math", &[]),
            create_test_profile("b", "Math", &[]),
        ];
        let exclusions = ExclusionSet::from_ids(["a"]);

        let filtered = apply_exclusions(pool, &exclusions);

        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].user_id, "b");
    }

    #[test]
    fn test_strong_match_by_major_or_course() {
        let viewer = create_test_profile("me", "Biology", &["BI108"]);

        assert!(is_strong_match(&viewer, &create_test_profile("1", "biology", &[])));
        assert!(is_strong_match(&viewer, &create_test_profile("2", "History", &["bi-108"])));
        assert!(!is_strong_match(&viewer, &create_test_profile("3", "History", &["HI101"])));
    }

    #[test]
    fn test_empty_major_is_not_strong() {
        let viewer = create_test_profile("me", "", &[]);
        assert!(!is_strong_match(&viewer, &create_test_profile("1", "", &[])));
    }

    #[test]
    fn test_working_set_prefers_strong_matches() {
        let viewer = create_test_profile("me", "Physics", &[]);
        let pool = vec![
            create_test_profile("1", "History", &[]),
            create_test_profile("2", "Physics", &[]),
        ];

        let set = working_set(&viewer, pool);

        assert_eq!(set.len(), 1);
        assert_eq!(set[0].user_id, "2");
    }

    #[test]
    fn test_working_set_falls_back_to_pool() {
        let viewer = create_test_profile("me", "Physics", &[]);
        let pool = vec![
            create_test_profile("1", "History", &[]),
            create_test_profile("2", "Art", &[]),
        ];

        let set = working_set(&viewer, pool);

        assert_eq!(set.len(), 2);
        assert_eq!(set[0].user_id, "1");
    }
}
