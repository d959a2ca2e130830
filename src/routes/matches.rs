use crate::config::MatchingSettings;
use crate::core::Matcher;
use crate::models::{
    ErrorResponse, FindMatchesRequest, FindMatchesResponse, HealthResponse, MatchDetailQuery,
    MatchedTrip, Trip, UserProfile,
};
use crate::services::{OpenBetaClient, PostgresClient, PostgresError};
use actix_web::{web, HttpResponse, Responder};
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub postgres: Arc<PostgresClient>,
    pub openbeta: Arc<OpenBetaClient>,
    pub matcher: Matcher,
    pub matching: MatchingSettings,
    pub openbeta_search_limit: u32,
}

/// Configure all match-related routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health_check))
        .route("/matches/find", web::post().to(find_matches))
        .route("/matches/{user_id}/detail", web::get().to(match_detail));
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let pg_healthy = state.postgres.health_check().await.unwrap_or(false);

    let status = if pg_healthy { "healthy" } else { "degraded" };

    HttpResponse::Ok().json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

fn not_found(message: impl Into<String>) -> HttpResponse {
    HttpResponse::NotFound().json(ErrorResponse {
        error: "not_found".to_string(),
        message: message.into(),
        status_code: 404,
    })
}

fn store_failure(context: &str, err: PostgresError) -> HttpResponse {
    tracing::error!("{}: {}", context, err);
    HttpResponse::InternalServerError().json(ErrorResponse {
        error: context.to_string(),
        message: err.to_string(),
        status_code: 500,
    })
}

/// Load the viewer and resolve which of their trips to match on
///
/// With an explicit trip id the trip must exist and belong to the viewer;
/// both failure modes surface as the same 404. Without one, the viewer's
/// soonest upcoming active trip is used.
async fn load_viewer_and_trip(
    state: &AppState,
    viewer_id: Uuid,
    trip_id: Option<Uuid>,
) -> Result<(UserProfile, Trip), HttpResponse> {
    let viewer = match state.postgres.get_user(viewer_id).await {
        Ok(viewer) => viewer,
        Err(PostgresError::NotFound(message)) => return Err(not_found(message)),
        Err(e) => return Err(store_failure("Failed to fetch viewer", e)),
    };

    let trip = match trip_id {
        Some(trip_id) => match state.postgres.get_owned_trip(trip_id, viewer.id).await {
            Ok(trip) => trip,
            Err(PostgresError::NotFound(message)) => return Err(not_found(message)),
            Err(e) => return Err(store_failure("Failed to fetch trip", e)),
        },
        None => {
            let today = chrono::Utc::now().date_naive();
            match state.postgres.next_upcoming_trip(viewer.id, today).await {
                Ok(Some(trip)) => trip,
                Ok(None) => return Err(not_found("No upcoming trips")),
                Err(e) => return Err(store_failure("Failed to resolve trip", e)),
            }
        }
    };

    Ok((viewer, trip))
}

/// Find matches endpoint
///
/// POST /api/v1/matches/find
///
/// Request body:
/// ```json
/// {
///   "viewerId": "uuid",
///   "tripId": "uuid",
///   "limit": 10
/// }
/// ```
async fn find_matches(
    state: web::Data<AppState>,
    req: web::Json<FindMatchesRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for find_matches request: {:?}", errors);
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Validation failed".to_string(),
            message: errors.to_string(),
            status_code: 400,
        });
    }

    // Over-large limits are clamped, not rejected
    let limit = req.limit.min(state.matching.max_limit) as usize;

    tracing::info!("Finding matches for viewer: {}, limit: {}", req.viewer_id, limit);

    let (viewer, trip) = match load_viewer_and_trip(&state, req.viewer_id, req.trip_id).await {
        Ok(resolved) => resolved,
        Err(response) => return response,
    };

    // Exclusions are computed before candidate retrieval and reused for the
    // in-engine eligibility check; match results are never cached so a new
    // block takes effect on the next request.
    let exclusions = match state.postgres.get_exclusions(viewer.id).await {
        Ok(exclusions) => exclusions,
        Err(e) => return store_failure("Failed to fetch blocks", e),
    };

    let candidates = match state.postgres.find_candidates(viewer.id, &trip, &exclusions).await {
        Ok(candidates) => candidates,
        Err(e) => return store_failure("Failed to query candidates", e),
    };

    tracing::debug!(
        "Found {} candidates for trip {} ({} excluded users)",
        candidates.len(),
        trip.id,
        exclusions.len()
    );

    let outcome = state
        .matcher
        .find_matches(&viewer, &trip, candidates, &exclusions, limit);

    if let Some(top) = outcome.matches.first() {
        let avg: f64 = outcome.matches.iter().map(|m| m.score as f64).sum::<f64>()
            / outcome.matches.len() as f64;
        tracing::info!(
            "Generated {} matches for trip {}. Avg score: {:.1}, Top score: {}",
            outcome.matches.len(),
            trip.id,
            avg,
            top.score
        );
    } else {
        tracing::info!("No matches found for trip {}", trip.id);
    }

    HttpResponse::Ok().json(FindMatchesResponse {
        trip: MatchedTrip::from(&trip),
        matches: outcome.matches,
        total_candidates: outcome.total_candidates,
    })
}

/// Get detailed match info for a specific user
///
/// GET /api/v1/matches/{user_id}/detail?viewerId={uuid}&trip={uuid}
async fn match_detail(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    query: web::Query<MatchDetailQuery>,
) -> impl Responder {
    let matched_user_id = path.into_inner();

    let (viewer, trip) = match load_viewer_and_trip(&state, query.viewer_id, query.trip).await {
        Ok(resolved) => resolved,
        Err(response) => return response,
    };

    let exclusions = match state.postgres.get_exclusions(viewer.id).await {
        Ok(exclusions) => exclusions,
        Err(e) => return store_failure("Failed to fetch blocks", e),
    };

    let candidates = match state.postgres.find_candidates(viewer.id, &trip, &exclusions).await {
        Ok(candidates) => candidates,
        Err(e) => return store_failure("Failed to query candidates", e),
    };

    let outcome = state.matcher.find_matches(
        &viewer,
        &trip,
        candidates,
        &exclusions,
        state.matching.max_limit as usize,
    );

    match outcome
        .matches
        .into_iter()
        .find(|m| m.user.id == matched_user_id)
    {
        Some(matched) => HttpResponse::Ok().json(matched),
        None => not_found("Match not found"),
    }
}
