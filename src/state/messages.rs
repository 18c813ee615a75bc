use crate::state::network::LoadingState;
use crossterm::event::KeyEvent;
use statsbomb_api::{Competition, Event, Match};
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NetworkRequest {
    LoadCompetitions,
    LoadMatches { competition_id: u32, season_id: u32 },
    LoadEvents { match_id: u32 },
}

#[derive(Debug)]
pub enum NetworkResponse {
    LoadingStateChanged { loading_state: LoadingState },
    CompetitionsLoaded { competitions: Arc<Vec<Competition>> },
    MatchesLoaded { competition_id: u32, season_id: u32, matches: Arc<Vec<Match>> },
    EventsLoaded { match_id: u32, events: Arc<Vec<Event>> },
    Error { request: NetworkRequest, message: String },
}

#[derive(Debug, Clone)]
pub enum UiEvent {
    KeyPressed(KeyEvent),
    Resize,
    AppStarted,
}
