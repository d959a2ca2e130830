// Unit tests for Cragmatch Algo

use chrono::NaiveDate;
use cragmatch_algo::core::{
    overlap::{date_overlap, dates_intersect, grade_overlap_ratio},
    privacy::ExclusionSet,
    scoring::score_pair,
};
use cragmatch_algo::models::{
    AvailabilitySlot, Discipline, DisciplineProfile, RiskTolerance, TimeBlock, Trip, UserProfile,
};
use uuid::Uuid;

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

fn user(risk: RiskTolerance, disciplines: Vec<DisciplineProfile>) -> UserProfile {
    UserProfile {
        id: Uuid::new_v4(),
        display_name: "Test User".to_string(),
        bio: None,
        home_location: "Boulder, CO".to_string(),
        risk_tolerance: risk,
        profile_visible: true,
        email_verified: true,
        disciplines,
    }
}

fn sport_profile(min: i32, max: i32) -> DisciplineProfile {
    DisciplineProfile {
        discipline: Discipline::Sport,
        grade_min_score: min,
        grade_max_score: max,
    }
}

fn trip(dest: Uuid, start: NaiveDate, end: NaiveDate) -> Trip {
    Trip {
        id: Uuid::new_v4(),
        user_id: Uuid::new_v4(),
        destination_id: dest,
        destination_name: "Red River Gorge".to_string(),
        start_date: start,
        end_date: end,
        is_active: true,
        preferred_disciplines: vec![Discipline::Sport],
        preferred_crags: vec![],
        availability: vec![],
    }
}

#[test]
fn test_date_overlap_is_inclusive_on_both_ends() {
    let window = date_overlap(d(2026, 3, 10), d(2026, 3, 15), d(2026, 3, 15), d(2026, 3, 20))
        .expect("single shared day counts as overlap");
    assert_eq!(window.days, 1);

    assert!(dates_intersect(
        d(2026, 3, 10),
        d(2026, 3, 15),
        d(2026, 3, 15),
        d(2026, 3, 20)
    ));
    assert!(!dates_intersect(
        d(2026, 3, 10),
        d(2026, 3, 14),
        d(2026, 3, 15),
        d(2026, 3, 20)
    ));
}

#[test]
fn test_one_day_overlap_scores_four_points() {
    let dest = Uuid::new_v4();
    let viewer = user(RiskTolerance::Balanced, vec![]);
    let candidate = user(RiskTolerance::Balanced, vec![]);

    let score = score_pair(
        &viewer,
        &trip(dest, d(2026, 3, 10), d(2026, 3, 15)),
        &candidate,
        &trip(dest, d(2026, 3, 15), d(2026, 3, 20)),
    );

    assert_eq!(score.date_overlap, 4);
}

#[test]
fn test_grade_ratio_guards() {
    // Disjoint, zero-width and inverted ranges all come back finite
    assert_eq!(grade_overlap_ratio(10, 20, 30, 40), 0.0);
    assert_eq!(grade_overlap_ratio(50, 50, 50, 50), 0.0);
    let inverted = grade_overlap_ratio(60, 50, 40, 70);
    assert!((0.0..=1.0).contains(&inverted));
}

#[test]
fn test_risk_penalty_applies_even_on_otherwise_perfect_pairs() {
    let dest = Uuid::new_v4();
    let viewer = user(RiskTolerance::Conservative, vec![sport_profile(50, 60)]);
    let candidate = user(RiskTolerance::Aggressive, vec![sport_profile(50, 60)]);

    let score = score_pair(
        &viewer,
        &trip(dest, d(2026, 1, 16), d(2026, 1, 20)),
        &candidate,
        &trip(dest, d(2026, 1, 16), d(2026, 1, 20)),
    );

    assert_eq!(score.risk, -10);
    // 25 location + 20 date + 20 discipline + 15 grade - 10 risk + 0 availability
    assert_eq!(score.total, 70);
}

#[test]
fn test_reasons_follow_evaluation_order() {
    let dest = Uuid::new_v4();
    let viewer = user(RiskTolerance::Balanced, vec![sport_profile(50, 60)]);
    let candidate = user(RiskTolerance::Balanced, vec![sport_profile(50, 60)]);

    let score = score_pair(
        &viewer,
        &trip(dest, d(2026, 1, 16), d(2026, 1, 20)),
        &candidate,
        &trip(dest, d(2026, 1, 18), d(2026, 1, 25)),
    );

    assert_eq!(
        score.reasons,
        vec![
            "Both in Red River Gorge".to_string(),
            "3 day overlap".to_string(),
            "Both climb sport".to_string(),
            "Similar grades".to_string(),
            "Same risk tolerance".to_string(),
        ]
    );
}

#[test]
fn test_availability_reason_is_never_emitted() {
    let dest = Uuid::new_v4();
    let viewer = user(RiskTolerance::Balanced, vec![]);
    let candidate = user(RiskTolerance::Balanced, vec![]);

    let mut mine = trip(dest, d(2026, 1, 16), d(2026, 1, 20));
    let mut theirs = trip(dest, d(2026, 1, 16), d(2026, 1, 20));
    mine.availability = vec![AvailabilitySlot {
        date: d(2026, 1, 17),
        time_block: TimeBlock::Morning,
    }];
    theirs.availability = mine.availability.clone();

    let score = score_pair(&viewer, &mine, &candidate, &theirs);

    assert_eq!(score.availability, 1);
    assert!(score.reasons.iter().all(|r| !r.contains("availab")));
}

#[test]
fn test_scorer_is_pure() {
    let dest = Uuid::new_v4();
    let viewer = user(RiskTolerance::Balanced, vec![sport_profile(50, 60)]);
    let candidate = user(RiskTolerance::Balanced, vec![sport_profile(55, 70)]);
    let mine = trip(dest, d(2026, 1, 16), d(2026, 1, 20));
    let theirs = trip(dest, d(2026, 1, 18), d(2026, 1, 25));

    let first = score_pair(&viewer, &mine, &candidate, &theirs);
    let second = score_pair(&viewer, &mine, &candidate, &theirs);

    assert_eq!(first, second);
}

#[test]
fn test_exclusion_set_is_symmetric() {
    let viewer = Uuid::new_v4();
    let other = Uuid::new_v4();

    let viewer_blocked = ExclusionSet::for_viewer(viewer, &[(viewer, other)]);
    let other_blocked = ExclusionSet::for_viewer(viewer, &[(other, viewer)]);

    assert!(viewer_blocked.excludes(&other));
    assert!(other_blocked.excludes(&other));
}
