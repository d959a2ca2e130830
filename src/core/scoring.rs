use crate::core::overlap::{date_overlap, grade_overlap_ratio};
use crate::models::{Discipline, PairScore, TimeBlock, Trip, UserProfile};
use chrono::NaiveDate;
use std::collections::HashSet;

/// Score one viewer-trip/candidate-trip pair
///
/// The total is the sum of six independent sub-scores:
///
/// ```text
/// location      0..30    crag overlap at the shared destination
/// date overlap  0..20    4 points per shared day, capped
/// discipline    0..20    shared trip preference, backed by profiles
/// grade         0..15    comfort-range overlap for the graded discipline
/// risk         -10..10   risk tolerance distance
/// availability  0..5     shared (date, time block) slots
/// ```
///
/// Pure function of its inputs: no side effects, deterministic, and
/// defensive against dirty data (inverted or zero-width grade ranges,
/// non-positive overlaps) — it clamps instead of failing so one malformed
/// profile cannot take down matching for everyone else.
pub fn score_pair(
    viewer: &UserProfile,
    viewer_trip: &Trip,
    candidate: &UserProfile,
    candidate_trip: &Trip,
) -> PairScore {
    let mut reasons = Vec::new();

    // 1. Location (30 points)
    let location = score_location(viewer_trip, candidate_trip);
    if location > 0 {
        reasons.push(format!("Both in {}", viewer_trip.destination_name));
    }

    // 2. Date overlap (20 points)
    let overlap = date_overlap(
        viewer_trip.start_date,
        viewer_trip.end_date,
        candidate_trip.start_date,
        candidate_trip.end_date,
    );
    let date_score = overlap
        .map(|w| (w.days.clamp(0, 20) as i32 * 4).min(20))
        .unwrap_or(0);
    if date_score > 0 {
        if let Some(w) = &overlap {
            reasons.push(format!("{} day overlap", w.days));
        }
    }

    // 3. Discipline (20 points)
    let (discipline_score, shared_disciplines) =
        score_discipline(viewer, viewer_trip, candidate, candidate_trip);
    if !shared_disciplines.is_empty() {
        let names: Vec<&str> = shared_disciplines.iter().map(|d| d.as_str()).collect();
        reasons.push(format!("Both climb {}", names.join(", ")));
    }

    // 4. Grade compatibility (15 points)
    let grade = score_grade(viewer, candidate, &shared_disciplines);
    if grade > 10 {
        reasons.push("Similar grades".to_string());
    }

    // 5. Risk tolerance (-10 to 10)
    let risk = score_risk_tolerance(viewer, candidate);
    if risk == 10 {
        reasons.push("Same risk tolerance".to_string());
    }

    // 6. Availability (5 points)
    let availability = score_availability(viewer_trip, candidate_trip);

    let total = location + date_score + discipline_score + grade + risk + availability;

    PairScore {
        location,
        date_overlap: date_score,
        discipline: discipline_score,
        grade,
        risk,
        availability,
        total,
        reasons,
        overlap,
        shared_disciplines,
    }
}

/// Location sub-score (0-30)
///
/// Destination equality is enforced by candidate filtering, so this only
/// grades crag preference alignment: overlapping crag picks 30, either
/// side flexible 25, same destination but disjoint crags 20. Different
/// destinations score 0 in case a pair ever slips past the filter.
fn score_location(viewer_trip: &Trip, candidate_trip: &Trip) -> i32 {
    if viewer_trip.destination_id != candidate_trip.destination_id {
        return 0;
    }

    if viewer_trip.preferred_crags.is_empty() || candidate_trip.preferred_crags.is_empty() {
        return 25;
    }

    let mine: HashSet<_> = viewer_trip.preferred_crags.iter().collect();
    if candidate_trip.preferred_crags.iter().any(|c| mine.contains(c)) {
        return 30;
    }

    20
}

/// Discipline sub-score (0-20) plus the shared discipline list for reasons
/// and grade scoring
///
/// 20 when both trips want a discipline both users actually have a profile
/// for; 5 when the trips agree on paper but neither profile backs it up.
/// Returned lists are sorted by discipline name so downstream selection is
/// deterministic.
fn score_discipline(
    viewer: &UserProfile,
    viewer_trip: &Trip,
    candidate: &UserProfile,
    candidate_trip: &Trip,
) -> (i32, Vec<Discipline>) {
    let candidate_wants: HashSet<_> = candidate_trip.preferred_disciplines.iter().collect();
    let mut trip_shared: Vec<Discipline> = viewer_trip
        .preferred_disciplines
        .iter()
        .filter(|d| candidate_wants.contains(d))
        .copied()
        .collect();
    trip_shared.sort_by_key(|d| d.as_str());
    trip_shared.dedup();

    if trip_shared.is_empty() {
        return (0, vec![]);
    }

    let my_profiles: HashSet<Discipline> =
        viewer.disciplines.iter().map(|p| p.discipline).collect();
    let their_profiles: HashSet<Discipline> =
        candidate.disciplines.iter().map(|p| p.discipline).collect();

    let profile_backed: Vec<Discipline> = trip_shared
        .iter()
        .filter(|d| my_profiles.contains(d) && their_profiles.contains(d))
        .copied()
        .collect();

    if !profile_backed.is_empty() {
        (20, profile_backed)
    } else {
        (5, trip_shared)
    }
}

/// Grade compatibility sub-score (0-15)
///
/// Evaluated for the first shared discipline only (lexicographically
/// smallest name). Score is the comfort-range overlap ratio scaled to 15
/// and floored; pairs where either side lacks the profile score 0.
fn score_grade(viewer: &UserProfile, candidate: &UserProfile, shared: &[Discipline]) -> i32 {
    let Some(&discipline) = shared.first() else {
        return 0;
    };

    let (Some(mine), Some(theirs)) = (
        viewer.discipline_profile(discipline),
        candidate.discipline_profile(discipline),
    ) else {
        return 0;
    };

    let ratio = grade_overlap_ratio(
        mine.grade_min_score,
        mine.grade_max_score,
        theirs.grade_min_score,
        theirs.grade_max_score,
    );

    ((15.0 * ratio) as i32).clamp(0, 15)
}

/// Risk tolerance sub-score (-10 to 10)
///
/// Exact match 10, one step apart 3, conservative vs aggressive -10.
fn score_risk_tolerance(viewer: &UserProfile, candidate: &UserProfile) -> i32 {
    let diff = (viewer.risk_tolerance.level() - candidate.risk_tolerance.level()).abs();

    match diff {
        0 => 10,
        1 => 3,
        _ => -10,
    }
}

/// Availability sub-score (0-5)
///
/// One point per shared (date, time block) slot, rest days excluded from
/// both sides, capped at 5.
fn score_availability(viewer_trip: &Trip, candidate_trip: &Trip) -> i32 {
    let mine: HashSet<(NaiveDate, TimeBlock)> = viewer_trip
        .availability
        .iter()
        .filter(|a| a.time_block != TimeBlock::Rest)
        .map(|a| (a.date, a.time_block))
        .collect();

    let shared: HashSet<(NaiveDate, TimeBlock)> = candidate_trip
        .availability
        .iter()
        .filter(|a| a.time_block != TimeBlock::Rest)
        .map(|a| (a.date, a.time_block))
        .filter(|slot| mine.contains(slot))
        .collect();

    (shared.len() as i32).min(5)
}
