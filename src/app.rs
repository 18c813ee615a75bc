use crate::state::analysis::{Analysis, analyze};
use crate::state::app_settings::AppSettings;
use crate::state::app_state::AppState;
use crate::state::messages::NetworkRequest;
use crate::state::selection::season_options;
use chrono::Local;
use log::{debug, info, warn};
use statsbomb_api::{Competition, Event, Match};

#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub enum MenuItem {
    #[default]
    Statistics,
    ShotMap,
    Heatmap,
    Help,
}

impl MenuItem {
    pub fn next(self) -> Self {
        match self {
            MenuItem::Statistics => MenuItem::ShotMap,
            MenuItem::ShotMap => MenuItem::Heatmap,
            MenuItem::Heatmap | MenuItem::Help => MenuItem::Statistics,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            MenuItem::Statistics | MenuItem::Help => MenuItem::Heatmap,
            MenuItem::ShotMap => MenuItem::Statistics,
            MenuItem::Heatmap => MenuItem::ShotMap,
        }
    }
}

/// Which pane receives j/k and Enter.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub enum Focus {
    #[default]
    Seasons,
    Matches,
    Main,
}

impl Focus {
    pub fn next(self) -> Self {
        match self {
            Focus::Seasons => Focus::Matches,
            Focus::Matches => Focus::Main,
            Focus::Main => Focus::Seasons,
        }
    }
}

pub struct App {
    pub settings: AppSettings,
    pub state: AppState,
}

impl App {
    pub fn new() -> Self {
        let mut app = Self::with_settings(AppSettings::load());

        if let Some(level) = app.settings.log_level {
            log::set_max_level(level);
            tui_logger::set_default_level(level);
        }
        // Settings problems are found before the level above is known.
        for warning in app.settings.warnings.drain(..) {
            warn!("{warning}");
        }

        app
    }

    pub fn with_settings(settings: AppSettings) -> Self {
        Self { state: AppState::new(), settings }
    }

    // -----------------------------------------------------------------------
    // Network response handlers, called from main_ui_loop. Each returns the
    // next request of the cascade, if there is one.
    // -----------------------------------------------------------------------

    pub fn on_competitions_loaded(&mut self, competitions: &[Competition]) -> Option<NetworkRequest> {
        self.state.last_error = None;
        let seasons = season_options(competitions, &self.settings.country, self.settings.competition_id);
        info!(
            "{} seasons for competition {} in {}",
            seasons.len(),
            self.settings.competition_id,
            self.settings.country
        );
        self.state.analysis = None;
        let (competition_id, season_id) = self.state.selection.load_seasons(seasons)?;
        Some(NetworkRequest::LoadMatches { competition_id, season_id })
    }

    pub fn on_matches_loaded(
        &mut self,
        competition_id: u32,
        season_id: u32,
        matches: &[Match],
    ) -> Option<NetworkRequest> {
        let key = (competition_id, season_id);
        if !self.state.selection.is_current_season(key) {
            debug!("dropping match list for {competition_id}/{season_id}: no longer selected");
            return None;
        }
        self.state.last_error = None;
        self.state.analysis = None;
        let Some(match_id) = self.state.selection.load_matches(key, matches) else {
            info!("no matches for {competition_id}/{season_id}");
            return None;
        };
        Some(NetworkRequest::LoadEvents { match_id })
    }

    pub fn on_events_loaded(&mut self, match_id: u32, events: &[Event]) {
        if self.state.selection.current_match_id() != Some(match_id) {
            debug!("dropping events for match {match_id}: no longer selected");
            return;
        }
        self.state.last_error = None;
        let analysis = analyze(match_id, events, self.settings.player_id);
        if let Analysis::NoActivity { .. } = analysis {
            info!("player {} has no events in match {match_id}", self.settings.player_id);
        }
        self.state.analysis = Some(analysis);
        self.state.statistics.scroll_offset = 0;
        self.state.last_loaded_at = Some(Local::now().format("%H:%M").to_string());
    }

    /// Record a failed request so that selecting the same choice again
    /// retries it.
    pub fn on_error(&mut self, request: NetworkRequest, message: String) {
        let selection = &mut self.state.selection;
        match request {
            NetworkRequest::LoadCompetitions => selection.catalog_failed = true,
            NetworkRequest::LoadMatches { competition_id, season_id } => {
                selection.season_failed((competition_id, season_id))
            }
            NetworkRequest::LoadEvents { match_id } => selection.match_failed(match_id),
        }
        self.state.last_error = Some(message);
    }

    // -----------------------------------------------------------------------
    // Tab management
    // -----------------------------------------------------------------------

    pub fn update_tab(&mut self, next: MenuItem) {
        if self.state.active_tab == next {
            return;
        }
        self.state.previous_tab = self.state.active_tab;
        self.state.active_tab = next;
    }

    pub fn next_tab(&mut self) {
        self.update_tab(self.state.active_tab.next());
    }

    pub fn prev_tab(&mut self) {
        self.update_tab(self.state.active_tab.prev());
    }

    pub fn exit_help(&mut self) {
        if self.state.active_tab == MenuItem::Help {
            self.state.active_tab = self.state.previous_tab;
        }
    }

    pub fn toggle_show_logs(&mut self) {
        self.state.show_logs = !self.state.show_logs;
    }

    pub fn toggle_full_screen(&mut self) {
        self.settings.full_screen = !self.settings.full_screen;
    }

    // -----------------------------------------------------------------------
    // Sidebar navigation, delegated to SelectionState
    // -----------------------------------------------------------------------

    pub fn cycle_focus(&mut self) {
        self.state.focus = self.state.focus.next();
    }

    pub fn cursor_down(&mut self) {
        match self.state.focus {
            Focus::Seasons => self.state.selection.seasons.cursor_down(),
            Focus::Matches => self.state.selection.matches.cursor_down(),
            Focus::Main => {
                let rows = self.state.table_rows();
                self.state.statistics.scroll_down(rows);
            }
        }
    }

    pub fn cursor_up(&mut self) {
        match self.state.focus {
            Focus::Seasons => self.state.selection.seasons.cursor_up(),
            Focus::Matches => self.state.selection.matches.cursor_up(),
            Focus::Main => self.state.statistics.scroll_up(),
        }
    }

    /// Commit the highlighted season or match. Returns the fetch it implies.
    pub fn commit_selection(&mut self) -> Option<NetworkRequest> {
        let selection = &mut self.state.selection;
        if self.state.focus == Focus::Seasons && !selection.catalog_loaded && selection.catalog_failed {
            selection.catalog_failed = false;
            return Some(NetworkRequest::LoadCompetitions);
        }

        let request = match self.state.focus {
            Focus::Seasons => self
                .state
                .selection
                .commit_season()
                .map(|(competition_id, season_id)| NetworkRequest::LoadMatches { competition_id, season_id }),
            Focus::Matches => self
                .state
                .selection
                .commit_match()
                .map(|match_id| NetworkRequest::LoadEvents { match_id }),
            Focus::Main => None,
        }?;
        self.state.analysis = None;
        if let NetworkRequest::LoadMatches { .. } = request {
            self.state.focus = Focus::Matches;
        }
        Some(request)
    }

    /// Header name for the tracked player: provider name once known.
    pub fn player_label(&self) -> String {
        match &self.state.analysis {
            Some(Analysis::Report(report)) => report
                .player_name
                .clone()
                .unwrap_or_else(|| format!("player {}", self.settings.player_id)),
            _ => format!("player {}", self.settings.player_id),
        }
    }
}
