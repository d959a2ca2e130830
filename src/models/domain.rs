use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Climbing styles a user or trip can declare
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Discipline {
    Sport,
    Trad,
    Bouldering,
    Multipitch,
    Gym,
}

impl Discipline {
    pub fn as_str(&self) -> &'static str {
        match self {
            Discipline::Sport => "sport",
            Discipline::Trad => "trad",
            Discipline::Bouldering => "bouldering",
            Discipline::Multipitch => "multipitch",
            Discipline::Gym => "gym",
        }
    }
}

impl fmt::Display for Discipline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Discipline {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "sport" => Ok(Discipline::Sport),
            "trad" => Ok(Discipline::Trad),
            "bouldering" => Ok(Discipline::Bouldering),
            "multipitch" => Ok(Discipline::Multipitch),
            "gym" => Ok(Discipline::Gym),
            other => Err(format!("unknown discipline: {}", other)),
        }
    }
}

/// Risk tolerance declared on a user's profile
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskTolerance {
    Conservative,
    #[default]
    Balanced,
    Aggressive,
}

impl RiskTolerance {
    /// Ordinal position used for pairwise distance (conservative=0 .. aggressive=2)
    pub fn level(&self) -> i32 {
        match self {
            RiskTolerance::Conservative => 0,
            RiskTolerance::Balanced => 1,
            RiskTolerance::Aggressive => 2,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RiskTolerance::Conservative => "conservative",
            RiskTolerance::Balanced => "balanced",
            RiskTolerance::Aggressive => "aggressive",
        }
    }
}

impl FromStr for RiskTolerance {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "conservative" => Ok(RiskTolerance::Conservative),
            "balanced" => Ok(RiskTolerance::Balanced),
            "aggressive" => Ok(RiskTolerance::Aggressive),
            other => Err(format!("unknown risk tolerance: {}", other)),
        }
    }
}

/// Part of a climbing day a trip owner is available for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeBlock {
    Morning,
    Afternoon,
    FullDay,
    Rest,
}

impl FromStr for TimeBlock {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "morning" => Ok(TimeBlock::Morning),
            "afternoon" => Ok(TimeBlock::Afternoon),
            "full_day" => Ok(TimeBlock::FullDay),
            "rest" => Ok(TimeBlock::Rest),
            other => Err(format!("unknown time block: {}", other)),
        }
    }
}

/// One day-part of a trip's availability calendar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AvailabilitySlot {
    pub date: NaiveDate,
    pub time_block: TimeBlock,
}

/// Per-discipline grade comfort range on a user's profile
///
/// Grade scores are on the app's normalized 0-100 scale so ranges are
/// comparable across grading systems. min <= max is enforced upstream;
/// the scorer tolerates violations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisciplineProfile {
    pub discipline: Discipline,
    #[serde(rename = "gradeMinScore")]
    pub grade_min_score: i32,
    #[serde(rename = "gradeMaxScore")]
    pub grade_max_score: i32,
}

/// User profile fields the engine reads
#[derive(Debug, Clone, PartialEq)]
pub struct UserProfile {
    pub id: Uuid,
    pub display_name: String,
    pub bio: Option<String>,
    pub home_location: String,
    pub risk_tolerance: RiskTolerance,
    pub profile_visible: bool,
    pub email_verified: bool,
    pub disciplines: Vec<DisciplineProfile>,
}

impl UserProfile {
    pub fn discipline_profile(&self, discipline: Discipline) -> Option<&DisciplineProfile> {
        self.disciplines.iter().find(|p| p.discipline == discipline)
    }
}

/// A planned climbing trip
#[derive(Debug, Clone, PartialEq)]
pub struct Trip {
    pub id: Uuid,
    pub user_id: Uuid,
    pub destination_id: Uuid,
    pub destination_name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub is_active: bool,
    pub preferred_disciplines: Vec<Discipline>,
    /// Empty means the owner is flexible about where to climb
    pub preferred_crags: Vec<Uuid>,
    pub availability: Vec<AvailabilitySlot>,
}

/// A candidate user together with their trips eligible for pairing
#[derive(Debug, Clone)]
pub struct Candidate {
    pub profile: UserProfile,
    pub trips: Vec<Trip>,
}

/// Inclusive date window shared by two trips
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverlapWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub days: i64,
}

/// Composite result of scoring one viewer-trip/candidate-trip pair
///
/// All six sub-scores are kept alongside the total so callers and tests can
/// inspect the breakdown without re-deriving it.
#[derive(Debug, Clone, PartialEq)]
pub struct PairScore {
    pub location: i32,
    pub date_overlap: i32,
    pub discipline: i32,
    pub grade: i32,
    pub risk: i32,
    pub availability: i32,
    pub total: i32,
    pub reasons: Vec<String>,
    pub overlap: Option<OverlapWindow>,
    pub shared_disciplines: Vec<Discipline>,
}

/// Public projection of a matched user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchedUser {
    pub id: Uuid,
    #[serde(rename = "displayName")]
    pub display_name: String,
    pub bio: Option<String>,
    #[serde(rename = "homeLocation")]
    pub home_location: String,
    #[serde(rename = "riskTolerance")]
    pub risk_tolerance: RiskTolerance,
    pub disciplines: Vec<DisciplineProfile>,
}

impl From<&UserProfile> for MatchedUser {
    fn from(profile: &UserProfile) -> Self {
        Self {
            id: profile.id,
            display_name: profile.display_name.clone(),
            bio: profile.bio.clone(),
            home_location: profile.home_location.clone(),
            risk_tolerance: profile.risk_tolerance,
            disciplines: profile.disciplines.clone(),
        }
    }
}

/// Public projection of the trip a match was paired on
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchedTrip {
    pub id: Uuid,
    #[serde(rename = "destinationId")]
    pub destination_id: Uuid,
    #[serde(rename = "destinationName")]
    pub destination_name: String,
    #[serde(rename = "startDate")]
    pub start_date: NaiveDate,
    #[serde(rename = "endDate")]
    pub end_date: NaiveDate,
    #[serde(rename = "preferredDisciplines")]
    pub preferred_disciplines: Vec<Discipline>,
}

impl From<&Trip> for MatchedTrip {
    fn from(trip: &Trip) -> Self {
        Self {
            id: trip.id,
            destination_id: trip.destination_id,
            destination_name: trip.destination_name.clone(),
            start_date: trip.start_date,
            end_date: trip.end_date,
            preferred_disciplines: trip.preferred_disciplines.clone(),
        }
    }
}

/// One entry of the ranked match list handed to the caller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredMatch {
    pub user: MatchedUser,
    pub trip: MatchedTrip,
    pub score: i32,
    pub reasons: Vec<String>,
    #[serde(rename = "overlapDates")]
    pub overlap: OverlapWindow,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn discipline_round_trips_through_str() {
        for d in [
            Discipline::Sport,
            Discipline::Trad,
            Discipline::Bouldering,
            Discipline::Multipitch,
            Discipline::Gym,
        ] {
            assert_eq!(d.as_str().parse::<Discipline>(), Ok(d));
        }
        assert!("aid".parse::<Discipline>().is_err());
    }

    #[test]
    fn risk_tolerance_levels_are_ordered() {
        assert_eq!(RiskTolerance::Conservative.level(), 0);
        assert_eq!(RiskTolerance::Balanced.level(), 1);
        assert_eq!(RiskTolerance::Aggressive.level(), 2);
    }

    #[test]
    fn unknown_risk_tolerance_falls_back_to_balanced_default() {
        let parsed: RiskTolerance = "bold".parse().unwrap_or_default();
        assert_eq!(parsed, RiskTolerance::Balanced);
    }

    #[test]
    fn time_block_parses_snake_case() {
        assert_eq!("full_day".parse::<TimeBlock>(), Ok(TimeBlock::FullDay));
        assert_eq!("rest".parse::<TimeBlock>(), Ok(TimeBlock::Rest));
    }
}
