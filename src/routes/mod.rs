// Route exports
pub mod candidates;
pub mod likes;
pub mod profiles;

use actix_web::{http::header, web, HttpRequest, HttpResponse, Responder};
use std::sync::Arc;

use crate::models::{ErrorResponse, HealthResponse};
use crate::services::{BearerIdentity, CandidateService, IdentityProvider, LikeService, ProfileStore, TokenVerifier};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub profiles: Arc<dyn ProfileStore>,
    pub likes: LikeService,
    pub candidates: Arc<CandidateService>,
    pub verifier: Arc<TokenVerifier>,
}

impl AppState {
    /// Identity carried by the request's bearer token
    pub fn identity(&self, req: &HttpRequest) -> BearerIdentity {
        let header = req
            .headers()
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok());

        BearerIdentity::from_header(header, &self.verifier)
    }

    /// The signed-in user's id, or a 401 response
    pub fn require_user(&self, req: &HttpRequest) -> Result<String, HttpResponse> {
        self.identity(req).current_user_id().ok_or_else(|| {
            HttpResponse::Unauthorized().json(ErrorResponse {
                error: "Not authenticated".to_string(),
                message: "A valid bearer token is required".to_string(),
                status_code: 401,
            })
        })
    }
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            .route("/health", web::get().to(health_check))
            .configure(candidates::configure)
            .configure(likes::configure)
            .configure(profiles::configure),
    );
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let (profiles_healthy, likes_healthy) =
        tokio::join!(state.candidates.health_check(), state.likes.health_check());

    let status = if profiles_healthy && likes_healthy { "healthy" } else { "degraded" };

    HttpResponse::Ok().json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}


#[cfg(test)]
mod tests {
    use super::testing::*;
    use super::*;
    use actix_web::{test, App};

    #[actix_web::test]
    async fn test_health_check() {
        let state = state_with(vec![]).await;
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state))
                .configure(configure_routes),
        )
        .await;

        let req = test::TestRequest::get().uri("/api/v1/health").to_request();
        let body: HealthResponse = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body.status, "healthy");
    }

    #[actix_web::test]
    async fn test_require_user() {
        let state = state_with(vec![]).await;

        let req = test::TestRequest::default().insert_header(bearer("alice")).to_http_request();
        assert_eq!(state.require_user(&req).unwrap(), "alice");

        let req = test::TestRequest::default()
            .insert_header((header::AUTHORIZATION, "Bearer not-a-token"))
            .to_http_request();
        let response = state.require_user(&req).unwrap_err();
        assert_eq!(response.status(), actix_web::http::StatusCode::UNAUTHORIZED);
    }
}
