use serde::{Deserialize, Serialize};

/// Student profile with the academic attributes used for matching
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    #[serde(rename = "userId")]
    pub user_id: String,
    pub name: String,
    #[serde(default)]
    pub major: String,
    #[serde(default)]
    pub year: String,
    #[serde(default)]
    pub courses: Vec<String>,
    /// Comma-separated slot labels, e.g. "Mon AM, Wed PM"
    #[serde(default)]
    pub availability: String,
    #[serde(rename = "studyPreferences", default)]
    pub study_preferences: Vec<String>,
    #[serde(default)]
    pub bio: String,
    #[serde(rename = "darkMode", default)]
    pub dark_mode: bool,
    #[serde(rename = "profileComplete", default)]
    pub profile_complete: bool,
}

impl Profile {
    /// Create an otherwise empty profile for a freshly signed-up user
    pub fn new(user_id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            name: name.into(),
            major: String::new(),
            year: String::new(),
            courses: Vec::new(),
            availability: String::new(),
            study_preferences: Vec::new(),
            bio: String::new(),
            dark_mode: false,
            profile_complete: false,
        }
    }
}

/// Partial profile update. Absent fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProfileUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub major: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub courses: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub availability: Option<String>,
    #[serde(rename = "studyPreferences", default, skip_serializing_if = "Option::is_none")]
    pub study_preferences: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(rename = "darkMode", default, skip_serializing_if = "Option::is_none")]
    pub dark_mode: Option<bool>,
    #[serde(rename = "profileComplete", default, skip_serializing_if = "Option::is_none")]
    pub profile_complete: Option<bool>,
}

impl ProfileUpdate {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Apply the present fields onto an existing profile
    pub fn apply_to(&self, profile: &mut Profile) {
        if let Some(name) = &self.name {
            profile.name = name.clone();
        }
        if let Some(major) = &self.major {
            profile.major = major.clone();
        }
        if let Some(year) = &self.year {
            profile.year = year.clone();
        }
        if let Some(courses) = &self.courses {
            profile.courses = courses.clone();
        }
        if let Some(availability) = &self.availability {
            profile.availability = availability.clone();
        }
        if let Some(prefs) = &self.study_preferences {
            profile.study_preferences = prefs.clone();
        }
        if let Some(bio) = &self.bio {
            profile.bio = bio.clone();
        }
        if let Some(dark_mode) = self.dark_mode {
            profile.dark_mode = dark_mode;
        }
        if let Some(complete) = self.profile_complete {
            profile.profile_complete = complete;
        }
    }
}

/// One side of a mutual match, stored under `user_id`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchRecord {
    #[serde(rename = "matchId")]
    pub match_id: uuid::Uuid,
    #[serde(rename = "userId")]
    pub user_id: String,
    #[serde(rename = "matchedUserId")]
    pub matched_user_id: String,
    #[serde(rename = "matchedAt")]
    pub matched_at: chrono::DateTime<chrono::Utc>,
}

/// Derived interaction state for an unordered pair of users
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum PairState {
    NoInteraction,
    OneSidedLike { liker: String },
    Matched,
}

/// Per-attribute contributions to a candidate's affinity score
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    #[serde(rename = "majorMatch")]
    pub major_match: bool,
    #[serde(rename = "sharedCourses")]
    pub shared_courses: u32,
    #[serde(rename = "sameYear")]
    pub same_year: bool,
    #[serde(rename = "sharedSlots")]
    pub shared_slots: u32,
}

/// Ranked candidate result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredCandidate {
    pub profile: Profile,
    pub score: u32,
    pub breakdown: ScoreBreakdown,
}

impl ScoredCandidate {
    /// Wrap a profile without scoring it
    pub fn unranked(profile: Profile) -> Self {
        Self {
            profile,
            score: 0,
            breakdown: ScoreBreakdown::default(),
        }
    }

    pub fn user_id(&self) -> &str {
        &self.profile.user_id
    }
}

/// Scoring weights
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoringWeights {
    pub major: u32,
    pub course: u32,
    pub year: u32,
    pub slot: u32,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            major: 6,
            course: 4,
            year: 3,
            slot: 2,
        }
    }
}
