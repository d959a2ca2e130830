// Core algorithm exports
pub mod filters;
pub mod matcher;
pub mod overlap;
pub mod privacy;
pub mod scoring;

pub use filters::{is_candidate_trip, is_eligible_candidate, select_candidate_trip};
pub use matcher::{MatchOutcome, Matcher, MIN_SCORE_THRESHOLD};
pub use overlap::{date_overlap, dates_intersect, grade_overlap_ratio};
pub use privacy::ExclusionSet;
pub use scoring::score_pair;
