use actix_web::{web, HttpRequest, HttpResponse, Responder};
use validator::Validate;

use crate::models::{ErrorResponse, IdListResponse, LikeResponse, RecordLikeRequest};
use crate::routes::AppState;
use crate::services::IdentityProvider;

/// Configure like and match routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .service(
            web::resource("/likes")
                .route(web::post().to(record_like))
                .route(web::get().to(get_liked)),
        )
        .route("/matches", web::get().to(get_matched));
}

/// Record a like
///
/// POST /api/v1/likes
///
/// Request body:
/// ```json
/// { "targetUserId": "string" }
/// ```
///
/// Without a signed-in user the like is dropped and reported as not mutual.
async fn record_like(
    state: web::Data<AppState>,
    req: web::Json<RecordLikeRequest>,
    http_req: HttpRequest,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Validation failed".to_string(),
            message: errors.to_string(),
            status_code: 400,
        });
    }

    let identity = state.identity(&http_req);
    let outcome = state.likes.record_like(&identity, &req.target_user_id).await;

    if let Some(viewer_id) = identity.current_user_id() {
        state.candidates.mark_liked(&viewer_id, &req.target_user_id).await;
    }

    HttpResponse::Ok().json(LikeResponse {
        mutual: outcome.is_mutual(),
        matched_user_id: outcome.matched_user_id().map(str::to_string),
    })
}

/// Ids the caller has liked
///
/// GET /api/v1/likes
async fn get_liked(state: web::Data<AppState>, req: HttpRequest) -> impl Responder {
    let user_id = match state.require_user(&req) {
        Ok(id) => id,
        Err(response) => return response,
    };

    let ids = state.likes.liked_ids(&user_id).await;

    HttpResponse::Ok().json(IdListResponse {
        count: ids.len(),
        user_id,
        ids,
    })
}

/// Ids the caller is matched with
///
/// GET /api/v1/matches
async fn get_matched(state: web::Data<AppState>, req: HttpRequest) -> impl Responder {
    let user_id = match state.require_user(&req) {
        Ok(id) => id,
        Err(response) => return response,
    };

    let ids = state.likes.matched_ids(&user_id).await;

    HttpResponse::Ok().json(IdListResponse {
        count: ids.len(),
        user_id,
        ids,
    })
}
