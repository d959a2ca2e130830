//! Cragmatch Algo - partner matching service for the Cragmatch climbing app
//!
//! This library provides the matching engine that ranks compatible climbing
//! partners for a user's trip: a precomputed block-exclusion set, a pure
//! six-factor pairwise scorer with human-readable reasons, and an assembler
//! that filters, sorts and truncates the ranked result.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use core::{score_pair, ExclusionSet, MatchOutcome, Matcher, MIN_SCORE_THRESHOLD};
pub use models::{
    Candidate, Discipline, DisciplineProfile, FindMatchesRequest, FindMatchesResponse, PairScore,
    RiskTolerance, ScoredMatch, TimeBlock, Trip, UserProfile,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_exports() {
        let matcher = Matcher::new();
        let _ = matcher;
        assert_eq!(MIN_SCORE_THRESHOLD, 20);
    }
}
