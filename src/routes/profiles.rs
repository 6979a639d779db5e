use actix_web::{web, HttpRequest, HttpResponse, Responder};
use validator::Validate;

use crate::models::{ErrorResponse, ProfileUpdate, PutProfileRequest, UpdateProfileRequest};
use crate::routes::AppState;
use crate::services::StoreError;

/// Configure profile routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/profile")
            .route(web::get().to(get_profile))
            .route(web::put().to(put_profile))
            .route(web::patch().to(update_profile)),
    );
}

fn store_error_response(err: StoreError) -> HttpResponse {
    match err {
        StoreError::NotFound(message) => HttpResponse::NotFound().json(ErrorResponse {
            error: "Profile not found".to_string(),
            message,
            status_code: 404,
        }),
        StoreError::Rejected(message) => HttpResponse::BadRequest().json(ErrorResponse {
            error: "Profile rejected".to_string(),
            message,
            status_code: 400,
        }),
        StoreError::Unavailable(message) => HttpResponse::ServiceUnavailable().json(ErrorResponse {
            error: "Profile store unavailable".to_string(),
            message,
            status_code: 503,
        }),
    }
}

fn validation_error_response(errors: validator::ValidationErrors) -> HttpResponse {
    HttpResponse::BadRequest().json(ErrorResponse {
        error: "Validation failed".to_string(),
        message: errors.to_string(),
        status_code: 400,
    })
}

/// The caller's profile
///
/// GET /api/v1/profile
async fn get_profile(state: web::Data<AppState>, req: HttpRequest) -> impl Responder {
    let user_id = match state.require_user(&req) {
        Ok(id) => id,
        Err(response) => return response,
    };

    match state.profiles.get(&user_id).await {
        Ok(Some(profile)) => HttpResponse::Ok().json(profile),
        Ok(None) => store_error_response(StoreError::NotFound(format!(
            "No profile for user {}",
            user_id
        ))),
        Err(e) => {
            tracing::error!("Failed to fetch profile for {}: {}", user_id, e);
            store_error_response(e)
        }
    }
}

/// Create or replace the caller's profile
///
/// PUT /api/v1/profile
async fn put_profile(
    state: web::Data<AppState>,
    body: web::Json<PutProfileRequest>,
    req: HttpRequest,
) -> impl Responder {
    let user_id = match state.require_user(&req) {
        Ok(id) => id,
        Err(response) => return response,
    };

    if let Err(errors) = body.validate() {
        return validation_error_response(errors);
    }

    let profile = body.into_inner().into_profile(&user_id);

    match state.profiles.put(&user_id, &profile).await {
        Ok(()) => {
            // The viewer's own attributes drive scoring
            state.candidates.invalidate(&user_id).await;
            tracing::info!("Saved profile for {}", user_id);
            HttpResponse::Ok().json(profile)
        }
        Err(e) => {
            tracing::error!("Failed to save profile for {}: {}", user_id, e);
            store_error_response(e)
        }
    }
}

/// Partially update the caller's profile
///
/// PATCH /api/v1/profile
///
/// Request body: any subset of the profile fields, e.g.
/// ```json
/// { "darkMode": true, "profileComplete": true }
/// ```
async fn update_profile(
    state: web::Data<AppState>,
    body: web::Json<UpdateProfileRequest>,
    req: HttpRequest,
) -> impl Responder {
    let user_id = match state.require_user(&req) {
        Ok(id) => id,
        Err(response) => return response,
    };

    if let Err(errors) = body.validate() {
        return validation_error_response(errors);
    }

    let update = ProfileUpdate::from(body.into_inner());
    if update.is_empty() {
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Empty update".to_string(),
            message: "At least one profile field is required".to_string(),
            status_code: 400,
        });
    }

    if let Err(e) = state.profiles.update(&user_id, &update).await {
        tracing::warn!("Failed to update profile for {}: {}", user_id, e);
        return store_error_response(e);
    }

    state.candidates.invalidate(&user_id).await;

    match state.profiles.get(&user_id).await {
        Ok(Some(profile)) => HttpResponse::Ok().json(profile),
        Ok(None) => HttpResponse::NoContent().finish(),
        Err(e) => {
            tracing::warn!("Updated profile for {} but could not read it back: {}", user_id, e);
            HttpResponse::NoContent().finish()
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::models::Profile;
    use crate::routes::configure_routes;
    use crate::routes::testing::*;
    use actix_web::http::StatusCode;
    use actix_web::{test, web, App};
    use serde_json::json;

    #[actix_web::test]
    async fn test_put_then_patch_profile() {
        let state = state_with(vec![]).await;
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state))
                .configure(configure_routes),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/api/v1/profile")
            .insert_header(bearer("alice"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        let req = test::TestRequest::put()
            .uri("/api/v1/profile")
            .insert_header(bearer("alice"))
            .set_json(json!({
                "name": "Alice",
                "major": "Biology",
                "year": "Junior",
                "courses": ["BI108"],
                "availability": "Mon AM, Thu PM"
            }))
            .to_request();
        let profile: Profile = test::call_and_read_body_json(&app, req).await;
        assert_eq!(profile.user_id, "alice");
        assert_eq!(profile.major, "Biology");
        assert!(!profile.dark_mode);

        let req = test::TestRequest::patch()
            .uri("/api/v1/profile")
            .insert_header(bearer("alice"))
            .set_json(json!({ "darkMode": true, "profileComplete": true }))
            .to_request();
        let profile: Profile = test::call_and_read_body_json(&app, req).await;
        assert!(profile.dark_mode);
        assert!(profile.profile_complete);
        assert_eq!(profile.courses, vec!["BI108".to_string()]);
    }

    #[actix_web::test]
    async fn test_patch_missing_profile_is_not_found() {
        let state = state_with(vec![]).await;
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state))
                .configure(configure_routes),
        )
        .await;

        let req = test::TestRequest::patch()
            .uri("/api/v1/profile")
            .insert_header(bearer("ghost"))
            .set_json(json!({ "darkMode": true }))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn test_empty_patch_rejected() {
        let state = state_with(vec![profile("alice", "Biology", &[])]).await;
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state))
                .configure(configure_routes),
        )
        .await;

        let req = test::TestRequest::patch()
            .uri("/api/v1/profile")
            .insert_header(bearer("alice"))
            .set_json(json!({}))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn test_profile_change_resets_session() {
        let state = state_with(vec![
            profile("me", "Physics", &[]),
            profile("p1", "Physics", &[]),
            profile("h1", "History", &[]),
        ])
        .await;
        let candidates = state.candidates.clone();
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state))
                .configure(configure_routes),
        )
        .await;

        let session = candidates.session("me").await;
        assert_eq!(session.current().map(|c| c.user_id()), Some("p1"));

        let req = test::TestRequest::patch()
            .uri("/api/v1/profile")
            .insert_header(bearer("me"))
            .set_json(json!({ "major": "History" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert!(resp.status().is_success());

        let session = candidates.session("me").await;
        assert_eq!(session.current().map(|c| c.user_id()), Some("h1"));
    }

    #[actix_web::test]
    async fn test_profile_requires_identity() {
        let state = state_with(vec![]).await;
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state))
                .configure(configure_routes),
        )
        .await;

        let req = test::TestRequest::get().uri("/api/v1/profile").to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }
}
