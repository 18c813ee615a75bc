pub mod client;
pub mod statsbomb;

use chrono::NaiveDate;

// ---------------------------------------------------------------------------
// Domain types, independent of the StatsBomb wire format
// ---------------------------------------------------------------------------

/// StatsBomb pitch length in its own coordinate units.
pub const PITCH_LENGTH: f64 = 120.0;
/// StatsBomb pitch width in its own coordinate units.
pub const PITCH_WIDTH: f64 = 80.0;

/// One (competition, season) row from the competitions catalog.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Competition {
    pub competition_id: u32,
    pub season_id: u32,
    pub country_name: String,
    pub competition_name: String,
    pub season_name: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Match {
    pub match_id: u32,
    pub match_date: NaiveDate,
    pub kick_off: Option<String>,
    pub home_team: String,
    pub away_team: String,
    pub home_score: Option<u16>,
    pub away_score: Option<u16>,
}

impl Match {
    /// "Barcelona 3 - 0 Real Madrid" when both scores are known.
    pub fn scoreline(&self) -> Option<String> {
        let (home, away) = (self.home_score?, self.away_score?);
        Some(format!("{} {home} - {away} {}", self.home_team, self.away_team))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    pub id: u32,
    pub name: String,
}

/// A point in StatsBomb pitch units: x along the 120-long axis, y across the
/// 80-wide axis, origin at the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Location {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Shot {
    pub outcome: Option<String>,
    pub xg: Option<f64>,
}

impl Shot {
    pub fn is_goal(&self) -> bool {
        self.outcome.as_deref() == Some("Goal")
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Pass {
    pub goal_assist: bool,
}

/// Type-specific payload. The event type decides which fields exist.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum EventDetail {
    Shot(Shot),
    Pass(Pass),
    #[default]
    Other,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Event {
    /// Position of the event within the match, 1-based.
    pub index: u32,
    pub period: u8,
    pub minute: u16,
    pub second: u8,
    pub type_name: String,
    pub player: Option<Player>,
    pub team: Option<String>,
    pub location: Option<Location>,
    pub detail: EventDetail,
}

impl Event {
    pub fn player_id(&self) -> Option<u32> {
        self.player.as_ref().map(|p| p.id)
    }

    pub fn shot(&self) -> Option<&Shot> {
        match &self.detail {
            EventDetail::Shot(shot) => Some(shot),
            _ => None,
        }
    }

    pub fn pass(&self) -> Option<&Pass> {
        match &self.detail {
            EventDetail::Pass(pass) => Some(pass),
            _ => None,
        }
    }

    pub fn is_shot(&self) -> bool {
        self.shot().is_some()
    }
}
