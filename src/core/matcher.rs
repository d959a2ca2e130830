use crate::core::filters::{is_eligible_candidate, select_candidate_trip};
use crate::core::privacy::ExclusionSet;
use crate::core::scoring::score_pair;
use crate::models::{Candidate, MatchedTrip, MatchedUser, ScoredMatch, Trip, UserProfile};

/// Matches must score strictly above this to be surfaced
pub const MIN_SCORE_THRESHOLD: i32 = 20;

/// Result of one matching request
#[derive(Debug)]
pub struct MatchOutcome {
    pub matches: Vec<ScoredMatch>,
    pub total_candidates: usize,
}

/// Match assembler - orchestrates one matching request
///
/// # Pipeline
/// 1. Eligibility re-check (self, exclusion set, visibility, verification)
/// 2. Candidate trip selection (active, same destination, overlapping dates)
/// 3. Pairwise scoring
/// 4. Threshold filter (score > 20)
/// 5. Sort by score descending, candidate id ascending on ties
/// 6. Truncate to limit
#[derive(Debug, Clone, Copy, Default)]
pub struct Matcher;

impl Matcher {
    pub fn new() -> Self {
        Self
    }

    /// Rank eligible candidates against the viewer's trip
    ///
    /// The exclusion set is applied before any scoring; the caller is
    /// expected to have already passed it to candidate retrieval as well.
    /// `limit` arrives pre-clamped to the application maximum.
    pub fn find_matches(
        &self,
        viewer: &UserProfile,
        viewer_trip: &Trip,
        candidates: Vec<Candidate>,
        exclusions: &ExclusionSet,
        limit: usize,
    ) -> MatchOutcome {
        let total_candidates = candidates.len();

        let mut matches: Vec<ScoredMatch> = candidates
            .into_iter()
            .filter(|c| is_eligible_candidate(&c.profile, viewer.id, exclusions))
            .filter_map(|candidate| {
                let candidate_trip = select_candidate_trip(viewer_trip, &candidate.trips)?;
                let score = score_pair(viewer, viewer_trip, &candidate.profile, candidate_trip);

                if score.total <= MIN_SCORE_THRESHOLD {
                    return None;
                }

                // Candidate filtering guarantees at least one shared day;
                // drop the pair if dirty data ever breaks that.
                let overlap = score.overlap?;

                Some(ScoredMatch {
                    user: MatchedUser::from(&candidate.profile),
                    trip: MatchedTrip::from(candidate_trip),
                    score: score.total,
                    reasons: score.reasons,
                    overlap,
                })
            })
            .collect();

        matches.sort_by(|a, b| {
            b.score
                .cmp(&a.score)
                .then_with(|| a.user.id.cmp(&b.user.id))
        });

        matches.truncate(limit);

        MatchOutcome {
            matches,
            total_candidates,
        }
    }
}
