// Integration tests for Cragmatch Algo - matcher pipeline over in-memory data

use chrono::NaiveDate;
use cragmatch_algo::core::{ExclusionSet, Matcher};
use cragmatch_algo::models::{
    AvailabilitySlot, Candidate, Discipline, DisciplineProfile, RiskTolerance, TimeBlock, Trip,
    UserProfile,
};
use uuid::Uuid;

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

fn user(name: &str, risk: RiskTolerance) -> UserProfile {
    UserProfile {
        id: Uuid::new_v4(),
        display_name: name.to_string(),
        bio: Some("Psyched to climb".to_string()),
        home_location: "Lexington, KY".to_string(),
        risk_tolerance: risk,
        profile_visible: true,
        email_verified: true,
        disciplines: vec![DisciplineProfile {
            discipline: Discipline::Sport,
            grade_min_score: 50,
            grade_max_score: 60,
        }],
    }
}

fn trip(owner: &UserProfile, dest: Uuid, start: NaiveDate, end: NaiveDate) -> Trip {
    Trip {
        id: Uuid::new_v4(),
        user_id: owner.id,
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

fn candidate(profile: UserProfile, trips: Vec<Trip>) -> Candidate {
    Candidate { profile, trips }
}

#[test]
fn test_end_to_end_red_river_gorge_scenario() {
    let matcher = Matcher::new();
    let dest = Uuid::new_v4();

    let viewer = user("Viewer", RiskTolerance::Balanced);
    let mut viewer_trip = trip(&viewer, dest, d(2026, 1, 16), d(2026, 1, 20));

    let partner = user("Partner", RiskTolerance::Balanced);
    let mut partner_trip = trip(&partner, dest, d(2026, 1, 18), d(2026, 1, 25));

    for day in [18, 19] {
        viewer_trip.availability.push(AvailabilitySlot {
            date: d(2026, 1, day),
            time_block: TimeBlock::FullDay,
        });
        partner_trip.availability.push(AvailabilitySlot {
            date: d(2026, 1, day),
            time_block: TimeBlock::FullDay,
        });
    }

    let outcome = matcher.find_matches(
        &viewer,
        &viewer_trip,
        vec![candidate(partner.clone(), vec![partner_trip])],
        &ExclusionSet::empty(),
        10,
    );

    assert_eq!(outcome.matches.len(), 1);
    let matched = &outcome.matches[0];

    // 25 location + 12 date + 20 discipline + 15 grade + 10 risk + 2 availability
    assert_eq!(matched.score, 84);
    assert_eq!(matched.user.id, partner.id);
    assert_eq!(matched.overlap.start, d(2026, 1, 18));
    assert_eq!(matched.overlap.end, d(2026, 1, 20));
    assert_eq!(matched.overlap.days, 3);

    for expected in [
        "Both in Red River Gorge",
        "3 day overlap",
        "Both climb sport",
        "Same risk tolerance",
    ] {
        assert!(
            matched.reasons.iter().any(|r| r == expected),
            "missing reason: {}",
            expected
        );
    }
}

#[test]
fn test_blocks_exclude_in_both_directions() {
    let matcher = Matcher::new();
    let dest = Uuid::new_v4();

    let alice = user("Alice", RiskTolerance::Balanced);
    let bob = user("Bob", RiskTolerance::Balanced);
    let alice_trip = trip(&alice, dest, d(2026, 1, 16), d(2026, 1, 20));
    let bob_trip = trip(&bob, dest, d(2026, 1, 16), d(2026, 1, 20));

    // Alice blocked Bob; the pair must vanish from both viewpoints
    let block = (alice.id, bob.id);

    let alice_exclusions = ExclusionSet::for_viewer(alice.id, &[block]);
    let outcome = matcher.find_matches(
        &alice,
        &alice_trip,
        vec![candidate(bob.clone(), vec![bob_trip.clone()])],
        &alice_exclusions,
        10,
    );
    assert!(outcome.matches.is_empty());

    let bob_exclusions = ExclusionSet::for_viewer(bob.id, &[block]);
    let outcome = matcher.find_matches(
        &bob,
        &bob_trip,
        vec![candidate(alice.clone(), vec![alice_trip])],
        &bob_exclusions,
        10,
    );
    assert!(outcome.matches.is_empty());
}

#[test]
fn test_destination_gating_holds_for_all_surfaced_matches() {
    let matcher = Matcher::new();
    let dest = Uuid::new_v4();
    let other_dest = Uuid::new_v4();

    let viewer = user("Viewer", RiskTolerance::Balanced);
    let viewer_trip = trip(&viewer, dest, d(2026, 1, 16), d(2026, 1, 20));

    // A candidate whose only overlapping trip is elsewhere, and one with
    // trips both elsewhere and at the right destination
    let traveler = user("Traveler", RiskTolerance::Balanced);
    let traveler_wrong = trip(&traveler, other_dest, d(2026, 1, 16), d(2026, 1, 20));

    let local = user("Local", RiskTolerance::Balanced);
    let local_wrong = trip(&local, other_dest, d(2026, 1, 16), d(2026, 1, 20));
    let local_right = trip(&local, dest, d(2026, 1, 17), d(2026, 1, 22));

    let outcome = matcher.find_matches(
        &viewer,
        &viewer_trip,
        vec![
            candidate(traveler, vec![traveler_wrong]),
            candidate(local.clone(), vec![local_wrong, local_right.clone()]),
        ],
        &ExclusionSet::empty(),
        10,
    );

    assert_eq!(outcome.matches.len(), 1);
    assert_eq!(outcome.matches[0].user.id, local.id);
    assert_eq!(outcome.matches[0].trip.destination_id, dest);
    assert_eq!(outcome.matches[0].trip.id, local_right.id);
}

#[test]
fn test_all_matches_clear_threshold_and_sort_descending() {
    let matcher = Matcher::new();
    let dest = Uuid::new_v4();
    let viewer = user("Viewer", RiskTolerance::Balanced);
    let viewer_trip = trip(&viewer, dest, d(2026, 1, 10), d(2026, 1, 20));

    let candidates: Vec<Candidate> = (0..12)
        .map(|i| {
            let risk = match i % 3 {
                0 => RiskTolerance::Conservative,
                1 => RiskTolerance::Balanced,
                _ => RiskTolerance::Aggressive,
            };
            let u = user(&format!("User {}", i), risk);
            // Stagger starts so overlaps (and scores) vary
            let t = trip(&u, dest, d(2026, 1, 10 + (i % 10)), d(2026, 1, 22));
            candidate(u, vec![t])
        })
        .collect();

    let outcome = matcher.find_matches(&viewer, &viewer_trip, candidates, &ExclusionSet::empty(), 50);

    assert!(!outcome.matches.is_empty());
    for m in &outcome.matches {
        assert!(m.score > 20, "surfaced match at threshold: {}", m.score);
    }
    for pair in outcome.matches.windows(2) {
        assert!(pair[0].score >= pair[1].score, "matches not sorted by score");
    }
}

#[test]
fn test_identical_inputs_yield_identical_output() {
    let matcher = Matcher::new();
    let dest = Uuid::new_v4();
    let viewer = user("Viewer", RiskTolerance::Balanced);
    let viewer_trip = trip(&viewer, dest, d(2026, 1, 16), d(2026, 1, 20));

    let candidates: Vec<Candidate> = (0..8)
        .map(|i| {
            let u = user(&format!("User {}", i), RiskTolerance::Balanced);
            let t = trip(&u, dest, d(2026, 1, 14 + i), d(2026, 1, 24));
            candidate(u, vec![t])
        })
        .collect();

    let first = matcher.find_matches(
        &viewer,
        &viewer_trip,
        candidates.clone(),
        &ExclusionSet::empty(),
        10,
    );
    let second = matcher.find_matches(&viewer, &viewer_trip, candidates, &ExclusionSet::empty(), 10);

    assert_eq!(first.matches, second.matches);
}

#[test]
fn test_limit_is_enforced() {
    let matcher = Matcher::new();
    let dest = Uuid::new_v4();
    let viewer = user("Viewer", RiskTolerance::Balanced);
    let viewer_trip = trip(&viewer, dest, d(2026, 1, 16), d(2026, 1, 20));

    let candidates: Vec<Candidate> = (0..80)
        .map(|i| {
            let u = user(&format!("User {}", i), RiskTolerance::Balanced);
            let t = trip(&u, dest, d(2026, 1, 16), d(2026, 1, 20));
            candidate(u, vec![t])
        })
        .collect();

    // The route layer clamps requested limits to the application maximum
    // before invoking the engine; the engine then truncates exactly.
    let requested: usize = 1000;
    let max_limit: usize = 50;
    let outcome = matcher.find_matches(
        &viewer,
        &viewer_trip,
        candidates,
        &ExclusionSet::empty(),
        requested.min(max_limit),
    );

    assert_eq!(outcome.matches.len(), 50);
    assert_eq!(outcome.total_candidates, 80);
}

#[test]
fn test_no_candidates_is_an_empty_result_not_an_error() {
    let matcher = Matcher::new();
    let dest = Uuid::new_v4();
    let viewer = user("Viewer", RiskTolerance::Balanced);
    let viewer_trip = trip(&viewer, dest, d(2026, 1, 16), d(2026, 1, 20));

    let outcome =
        matcher.find_matches(&viewer, &viewer_trip, vec![], &ExclusionSet::empty(), 10);

    assert!(outcome.matches.is_empty());
    assert_eq!(outcome.total_candidates, 0);
}
