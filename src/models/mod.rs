// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{
    AvailabilitySlot, Candidate, Discipline, DisciplineProfile, MatchedTrip, MatchedUser,
    OverlapWindow, PairScore, RiskTolerance, ScoredMatch, TimeBlock, Trip, UserProfile,
};
pub use requests::{DestinationSearchQuery, FindMatchesRequest, MatchDetailQuery};
pub use responses::{ErrorResponse, FindMatchesResponse, HealthResponse};
