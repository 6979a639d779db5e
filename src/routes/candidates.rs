use actix_web::{web, HttpRequest, HttpResponse, Responder};

use crate::core::RankingSession;
use crate::models::{CandidatesResponse, CurrentCandidateResponse};
use crate::routes::AppState;

/// Configure candidate queue routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/candidates/reload", web::post().to(reload_candidates))
        .route("/candidates/current", web::get().to(current_candidate))
        .route("/candidates/skip", web::post().to(skip_candidate));
}

fn current_response(session: &RankingSession) -> CurrentCandidateResponse {
    CurrentCandidateResponse {
        candidate: session.current().cloned(),
        cursor: session.cursor(),
        remaining: session.remaining(),
    }
}

/// Rebuild the caller's ranked queue
///
/// POST /api/v1/candidates/reload
async fn reload_candidates(state: web::Data<AppState>, req: HttpRequest) -> impl Responder {
    let viewer_id = match state.require_user(&req) {
        Ok(id) => id,
        Err(response) => return response,
    };

    let session = state.candidates.reload(&viewer_id).await;

    HttpResponse::Ok().json(CandidatesResponse {
        candidates: session.queue().to_vec(),
        cursor: session.cursor(),
        total_results: session.queue().len(),
    })
}

/// Candidate under the caller's cursor
///
/// GET /api/v1/candidates/current
async fn current_candidate(state: web::Data<AppState>, req: HttpRequest) -> impl Responder {
    let viewer_id = match state.require_user(&req) {
        Ok(id) => id,
        Err(response) => return response,
    };

    let session = state.candidates.session(&viewer_id).await;
    HttpResponse::Ok().json(current_response(&session))
}

/// Pass on the current candidate
///
/// POST /api/v1/candidates/skip
async fn skip_candidate(state: web::Data<AppState>, req: HttpRequest) -> impl Responder {
    let viewer_id = match state.require_user(&req) {
        Ok(id) => id,
        Err(response) => return response,
    };

    let session = state.candidates.skip(&viewer_id).await;
    tracing::debug!("{} skipped to position {}", viewer_id, session.cursor());

    HttpResponse::Ok().json(current_response(&session))
}

#[cfg(test)]
mod tests {
    use crate::routes::configure_routes;
    use crate::routes::testing::*;
    use actix_web::http::StatusCode;
    use actix_web::{test, web, App};
    use serde_json::Value;

    async fn seeded_state() -> crate::routes::AppState {
        state_with(vec![
            profile("me", "Computer Science", &["CS501"]),
            profile("cs", "CS", &["CS-501"]),
            profile("bio", "Biology", &[]),
            profile("cs2", "computer science", &[]),
        ])
        .await
    }

    #[actix_web::test]
    async fn test_reload_returns_ranked_queue() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(seeded_state().await))
                .configure(configure_routes),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/v1/candidates/reload")
            .insert_header(bearer("me"))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;

        let ids: Vec<&str> = body["candidates"]
            .as_array()
            .unwrap()
            .iter()
            .map(|c| c["profile"]["userId"].as_str().unwrap())
            .collect();

        // "bio" is not a strong match, so the working set drops it.
        // cs2 shares the major (6 + 3 for matching blank years), cs only
        // the course (4 + 3).
        assert_eq!(ids, vec!["cs2", "cs"]);
        assert_eq!(body["total_results"], 2);
        assert_eq!(body["cursor"], 0);
        assert_eq!(body["candidates"][0]["score"], 9);
        assert_eq!(body["candidates"][1]["score"], 7);
    }

    #[actix_web::test]
    async fn test_current_and_skip() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(seeded_state().await))
                .configure(configure_routes),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/api/v1/candidates/current")
            .insert_header(bearer("me"))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["candidate"]["profile"]["userId"], "cs2");
        assert_eq!(body["remaining"], 2);

        let req = test::TestRequest::post()
            .uri("/api/v1/candidates/skip")
            .insert_header(bearer("me"))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["candidate"]["profile"]["userId"], "cs");
        assert_eq!(body["cursor"], 1);

        let req = test::TestRequest::post()
            .uri("/api/v1/candidates/skip")
            .insert_header(bearer("me"))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert!(body["candidate"].is_null());
        assert_eq!(body["remaining"], 0);
    }

    #[actix_web::test]
    async fn test_candidates_require_identity() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(seeded_state().await))
                .configure(configure_routes),
        )
        .await;

        let req = test::TestRequest::post().uri("/api/v1/candidates/reload").to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }
}
