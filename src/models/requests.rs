use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Request to find partner matches for a trip
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct FindMatchesRequest {
    #[serde(alias = "viewer_id", rename = "viewerId")]
    pub viewer_id: Uuid,
    /// Omitted -> the viewer's soonest upcoming active trip is used
    #[serde(default)]
    #[serde(alias = "trip_id", rename = "tripId")]
    pub trip_id: Option<Uuid>,
    #[validate(range(min = 1))]
    #[serde(default = "default_limit")]
    pub limit: u16,
}

fn default_limit() -> u16 {
    10
}

/// Query parameters for the match detail endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct MatchDetailQuery {
    #[serde(alias = "viewer_id", rename = "viewerId")]
    pub viewer_id: Uuid,
    #[serde(default)]
    pub trip: Option<Uuid>,
}

/// Query parameters for destination catalog search
#[derive(Debug, Clone, Deserialize)]
pub struct DestinationSearchQuery {
    pub q: String,
}
