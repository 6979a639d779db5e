use crate::models::{Profile, ProfileUpdate};
use crate::services::store::{ProfileStore, StoreError};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde_json::{json, Value};
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur when interacting with Appwrite
#[derive(Debug, Error)]
pub enum AppwriteError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("API returned error: {0}")]
    ApiError(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Unauthorized: invalid API key or project")]
    Unauthorized,

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),
}

impl From<AppwriteError> for StoreError {
    fn from(err: AppwriteError) -> Self {
        match err {
            AppwriteError::NotFound(msg) => StoreError::NotFound(msg),
            AppwriteError::InvalidResponse(msg) => StoreError::Rejected(msg),
            other => StoreError::Unavailable(other.to_string()),
        }
    }
}

/// Profile store backed by an Appwrite document collection
///
/// One document per user, with the user id as the document id:
/// - `get` reads a single document
/// - `get_all` lists the collection
/// - `put` creates the document, or replaces its data if it already exists
/// - `update` patches only the fields present in the update
pub struct AppwriteProfileStore {
    base_url: String,
    api_key: String,
    project_id: String,
    database_id: String,
    collection_id: String,
    list_limit: u32,
    client: Client,
}

impl AppwriteProfileStore {
    /// Create a new Appwrite profile store
    pub fn new(
        base_url: String,
        api_key: String,
        project_id: String,
        database_id: String,
        collection_id: String,
        list_limit: u32,
    ) -> Result<Self, AppwriteError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?;

        Ok(Self {
            base_url,
            api_key,
            project_id,
            database_id,
            collection_id,
            list_limit,
            client,
        })
    }

    fn documents_url(&self) -> String {
        format!(
            "{}/databases/{}/collections/{}/documents",
            self.base_url.trim_end_matches('/'),
            self.database_id,
            self.collection_id
        )
    }

    fn document_url(&self, id: &str) -> String {
        format!("{}/{}", self.documents_url(), urlencoding::encode(id))
    }

    fn authorized(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        builder
            .header("X-Appwrite-Key", &self.api_key)
            .header("X-Appwrite-Project", &self.project_id)
    }

    /// Map a non-success status to an error, reading the body for context
    async fn check_status(
        response: reqwest::Response,
        action: &str,
    ) -> Result<reqwest::Response, AppwriteError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "Unable to read body".to_string());

        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(AppwriteError::Unauthorized),
            StatusCode::NOT_FOUND => Err(AppwriteError::NotFound(format!("{}: {}", action, body))),
            _ => {
                tracing::error!("Failed to {}: {} - {}", action, status, body);
                Err(AppwriteError::ApiError(format!("Failed to {}: {}", action, status)))
            }
        }
    }

    /// Extract a profile from an Appwrite document
    fn parse_profile(doc: &Value) -> Result<Profile, AppwriteError> {
        let data = doc.get("data").unwrap_or(doc);

        serde_json::from_value(data.clone())
            .map_err(|e| AppwriteError::InvalidResponse(format!("Failed to parse profile: {}", e)))
    }

    /// Fetch a single profile by user id
    pub async fn fetch_profile(&self, user_id: &str) -> Result<Option<Profile>, AppwriteError> {
        tracing::debug!("Fetching profile for user: {}", user_id);

        let response = self
            .authorized(self.client.get(self.document_url(user_id)))
            .send()
            .await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }

        let response = Self::check_status(response, "fetch profile").await?;
        let json: Value = response.json().await?;

        Self::parse_profile(&json).map(Some)
    }

    /// Page query for documents after `cursor`, ordered by document id
    fn page_queries(&self, cursor: Option<&str>) -> Vec<String> {
        let mut queries = vec![
            format!("limit({})", self.list_limit),
            "orderAsc(\"$id\")".to_string(),
        ];
        if let Some(cursor) = cursor {
            queries.push(format!("cursorAfter(\"{}\")", cursor));
        }
        queries
    }

    /// List every profile document in the collection
    ///
    /// Pages through the collection `list_limit` documents at a time until a
    /// short page comes back or `total` documents have been read.
    pub async fn list_profiles(&self) -> Result<Vec<Profile>, AppwriteError> {
        let mut profiles = Vec::new();
        let mut cursor: Option<String> = None;
        let mut seen: u64 = 0;

        loop {
            let queries_json = serde_json::to_string(&self.page_queries(cursor.as_deref()))
                .map_err(|e| AppwriteError::InvalidResponse(e.to_string()))?;

            let full_url = format!(
                "{}?query={}",
                self.documents_url(),
                urlencoding::encode(&queries_json)
            );

            let response = self.authorized(self.client.get(&full_url)).send().await?;
            let response = Self::check_status(response, "list profiles").await?;

            let json: Value = response.json().await?;

            let total = json.get("total").and_then(|t| t.as_u64()).unwrap_or(0);

            let documents = json
                .get("documents")
                .and_then(|d| d.as_array())
                .ok_or_else(|| AppwriteError::InvalidResponse("Missing documents array".into()))?;

            seen += documents.len() as u64;

            // Skip malformed documents instead of failing the whole pool
            profiles.extend(documents.iter().filter_map(|doc| match Self::parse_profile(doc) {
                Ok(profile) => Some(profile),
                Err(e) => {
                    tracing::warn!("Skipping profile document: {}", e);
                    None
                }
            }));

            let next_cursor = documents
                .last()
                .and_then(|doc| doc.get("$id"))
                .and_then(|id| id.as_str())
                .map(str::to_string);

            let short_page = (documents.len() as u64) < u64::from(self.list_limit);
            if short_page || seen >= total {
                tracing::debug!("Listed {} profiles (total: {})", profiles.len(), total);
                break;
            }

            match next_cursor {
                Some(next) => cursor = Some(next),
                None => {
                    tracing::warn!(
                        "Profile page without document ids, stopping after {} of {}",
                        seen,
                        total
                    );
                    break;
                }
            }
        }

        Ok(profiles)
    }

    /// Create the profile document, replacing its data on conflict
    pub async fn upsert_profile(&self, user_id: &str, profile: &Profile) -> Result<(), AppwriteError> {
        let payload = json!({
            "documentId": user_id,
            "data": profile,
        });

        let response = self
            .authorized(self.client.post(self.documents_url()))
            .json(&payload)
            .send()
            .await?;

        if response.status() == StatusCode::CONFLICT {
            tracing::debug!("Profile {} exists, replacing data", user_id);
            let response = self
                .authorized(self.client.patch(self.document_url(user_id)))
                .json(&json!({ "data": profile }))
                .send()
                .await?;
            Self::check_status(response, "replace profile").await?;
            return Ok(());
        }

        Self::check_status(response, "create profile").await?;
        tracing::debug!("Created profile document for {}", user_id);
        Ok(())
    }

    /// Patch the fields present in `update`
    pub async fn patch_profile(&self, user_id: &str, update: &ProfileUpdate) -> Result<(), AppwriteError> {
        let response = self
            .authorized(self.client.patch(self.document_url(user_id)))
            .json(&json!({ "data": update }))
            .send()
            .await?;

        Self::check_status(response, "update profile").await?;
        Ok(())
    }

    /// Health check: the collection is reachable with our credentials
    pub async fn ping(&self) -> Result<(), AppwriteError> {
        let url = format!(
            "{}?query={}",
            self.documents_url(),
            urlencoding::encode(r#"["limit(1)"]"#)
        );
        let response = self.authorized(self.client.get(&url)).send().await?;
        Self::check_status(response, "reach profile collection").await?;
        Ok(())
    }
}

#[async_trait]
impl ProfileStore for AppwriteProfileStore {
    async fn get(&self, id: &str) -> Result<Option<Profile>, StoreError> {
        Ok(self.fetch_profile(id).await?)
    }

    async fn get_all(&self) -> Result<Vec<Profile>, StoreError> {
        Ok(self.list_profiles().await?)
    }

    async fn put(&self, id: &str, profile: &Profile) -> Result<(), StoreError> {
        Ok(self.upsert_profile(id, profile).await?)
    }

    async fn update(&self, id: &str, update: &ProfileUpdate) -> Result<(), StoreError> {
        Ok(self.patch_profile(id, update).await?)
    }

    async fn health_check(&self) -> bool {
        self.ping().await.is_ok()
    }
}
