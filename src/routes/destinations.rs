use crate::models::{DestinationSearchQuery, ErrorResponse};
use crate::routes::matches::AppState;
use actix_web::{web, HttpResponse, Responder};

/// Configure destination catalog routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/destinations/search", web::get().to(search_destinations));
}

/// Search the OpenBeta catalog for climbing areas
///
/// GET /api/v1/destinations/search?q={name}
async fn search_destinations(
    state: web::Data<AppState>,
    query: web::Query<DestinationSearchQuery>,
) -> impl Responder {
    let q = query.q.trim();

    if q.len() < 2 {
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "invalid_query".to_string(),
            message: "Search query must be at least 2 characters".to_string(),
            status_code: 400,
        });
    }

    match state.openbeta.search_areas(q, state.openbeta_search_limit).await {
        Ok(results) => HttpResponse::Ok().json(serde_json::json!({
            "query": q,
            "count": results.len(),
            "results": results,
        })),
        Err(e) => {
            tracing::error!("Destination search failed for '{}': {}", q, e);
            HttpResponse::BadGateway().json(ErrorResponse {
                error: "catalog_unavailable".to_string(),
                message: e.to_string(),
                status_code: 502,
            })
        }
    }
}
