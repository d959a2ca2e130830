use crate::core::overlap::dates_intersect;
use crate::core::privacy::ExclusionSet;
use crate::models::{Trip, UserProfile};
use uuid::Uuid;

/// Check that a candidate may be scored against the viewer at all
///
/// The repository query already applies these conditions; they are
/// re-checked here so the exclusion guarantees hold even if candidates
/// arrive from another path.
#[inline]
pub fn is_eligible_candidate(
    profile: &UserProfile,
    viewer_id: Uuid,
    exclusions: &ExclusionSet,
) -> bool {
    profile.id != viewer_id
        && !exclusions.excludes(&profile.id)
        && profile.profile_visible
        && profile.email_verified
}

/// Check that a candidate trip can be paired with the viewer's trip
///
/// Same destination is a hard precondition, not a scoring reward: a trip
/// to a different destination is never a candidate trip, regardless of
/// date overlap.
#[inline]
pub fn is_candidate_trip(viewer_trip: &Trip, trip: &Trip) -> bool {
    trip.is_active
        && trip.destination_id == viewer_trip.destination_id
        && dates_intersect(
            viewer_trip.start_date,
            viewer_trip.end_date,
            trip.start_date,
            trip.end_date,
        )
}

/// Select which of a candidate's trips to score against the viewer's
///
/// Among eligible trips the one starting earliest wins, matching the
/// store's start-date ordering.
pub fn select_candidate_trip<'a>(viewer_trip: &Trip, trips: &'a [Trip]) -> Option<&'a Trip> {
    trips
        .iter()
        .filter(|t| is_candidate_trip(viewer_trip, t))
        .min_by_key(|t| t.start_date)
}
