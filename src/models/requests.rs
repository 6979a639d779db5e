use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::domain::{Profile, ProfileUpdate};

/// Request to like a candidate
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RecordLikeRequest {
    #[validate(length(min = 1))]
    #[serde(alias = "target_user_id", rename = "targetUserId")]
    pub target_user_id: String,
}

/// Request to create or replace the caller's profile
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct PutProfileRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(length(max = 200))]
    #[serde(default)]
    pub major: String,
    #[validate(length(max = 50))]
    #[serde(default)]
    pub year: String,
    #[validate(length(max = 50))]
    #[serde(default)]
    pub courses: Vec<String>,
    #[validate(length(max = 500))]
    #[serde(default)]
    pub availability: String,
    #[serde(rename = "studyPreferences", default)]
    pub study_preferences: Vec<String>,
    #[validate(length(max = 2000))]
    #[serde(default)]
    pub bio: String,
    #[serde(rename = "darkMode", default)]
    pub dark_mode: bool,
    #[serde(rename = "profileComplete", default)]
    pub profile_complete: bool,
}

impl PutProfileRequest {
    pub fn into_profile(self, user_id: &str) -> Profile {
        Profile {
            user_id: user_id.to_string(),
            name: self.name,
            major: self.major,
            year: self.year,
            courses: self.courses,
            availability: self.availability,
            study_preferences: self.study_preferences,
            bio: self.bio,
            dark_mode: self.dark_mode,
            profile_complete: self.profile_complete,
        }
    }
}

/// Request to partially update the caller's profile
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateProfileRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,
    #[validate(length(max = 200))]
    pub major: Option<String>,
    #[validate(length(max = 50))]
    pub year: Option<String>,
    #[validate(length(max = 50))]
    pub courses: Option<Vec<String>>,
    #[validate(length(max = 500))]
    pub availability: Option<String>,
    #[serde(rename = "studyPreferences")]
    pub study_preferences: Option<Vec<String>>,
    #[validate(length(max = 2000))]
    pub bio: Option<String>,
    #[serde(rename = "darkMode")]
    pub dark_mode: Option<bool>,
    #[serde(rename = "profileComplete")]
    pub profile_complete: Option<bool>,
}

impl From<UpdateProfileRequest> for ProfileUpdate {
    fn from(req: UpdateProfileRequest) -> Self {
        ProfileUpdate {
            name: req.name,
            major: req.major,
            year: req.year,
            courses: req.courses,
            availability: req.availability,
            study_preferences: req.study_preferences,
            bio: req.bio,
            dark_mode: req.dark_mode,
            profile_complete: req.profile_complete,
        }
    }
}
