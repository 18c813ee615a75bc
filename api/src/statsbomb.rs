//! StatsBomb open-data wire types: serde shapes for the JSON files under
//! `data/competitions.json`, `data/matches/{competition}/{season}.json` and
//! `data/events/{match}.json`. Mapped to domain types in client.rs.
use serde::Deserialize;

// ---------------------------------------------------------------------------
// Competitions
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize, Default, Clone)]
pub struct SbCompetition {
    pub competition_id: u32,
    pub season_id: u32,
    #[serde(default)]
    pub country_name: String,
    #[serde(default)]
    pub competition_name: String,
    #[serde(default)]
    pub season_name: String,
}

// ---------------------------------------------------------------------------
// Matches
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize, Default, Clone)]
pub struct SbMatch {
    pub match_id: u32,
    /// "YYYY-MM-DD"
    pub match_date: String,
    pub kick_off: Option<String>,
    pub home_team: SbHomeTeam,
    pub away_team: SbAwayTeam,
    pub home_score: Option<u16>,
    pub away_score: Option<u16>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct SbHomeTeam {
    pub home_team_name: String,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct SbAwayTeam {
    pub away_team_name: String,
}

// ---------------------------------------------------------------------------
// Events
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize, Default, Clone)]
pub struct SbEvent {
    #[serde(default)]
    pub index: u32,
    #[serde(default)]
    pub period: u8,
    #[serde(default)]
    pub minute: u16,
    #[serde(default)]
    pub second: u8,
    #[serde(rename = "type")]
    pub event_type: SbNamed,
    pub team: Option<SbNamed>,
    pub player: Option<SbNamed>,
    /// [x, y] on most events; absent for tactical shifts, half starts etc.
    pub location: Option<Vec<f64>>,
    pub shot: Option<SbShot>,
    pub pass: Option<SbPass>,
}

/// The `{ "id": .., "name": .. }` pair StatsBomb uses for every lookup value.
#[derive(Debug, Deserialize, Default, Clone)]
pub struct SbNamed {
    pub id: u32,
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct SbShot {
    pub statsbomb_xg: Option<f64>,
    pub outcome: Option<SbNamed>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct SbPass {
    /// Only present (and then always `true`) on passes that led to a goal.
    pub goal_assist: Option<bool>,
}
