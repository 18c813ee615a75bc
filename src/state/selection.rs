use statsbomb_api::{Competition, Match};

use crate::state::cache::SeasonKey;

#[derive(Debug, Clone, PartialEq)]
pub struct SeasonOption {
    pub competition_id: u32,
    pub season_id: u32,
    pub name: String,
}

impl SeasonOption {
    pub fn key(&self) -> SeasonKey {
        (self.competition_id, self.season_id)
    }
}

/// A match as offered in the sidebar. The key travels with the label so
/// a choice never has to be resolved back from its display string.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchOption {
    pub match_id: u32,
    pub label: String,
    pub scoreline: Option<String>,
}

/// Seasons of one competition in one country, unique by display name in
/// first-appearance order. Each name resolves to the first row carrying it.
pub fn season_options(competitions: &[Competition], country: &str, competition_id: u32) -> Vec<SeasonOption> {
    let mut out: Vec<SeasonOption> = Vec::new();
    for c in competitions
        .iter()
        .filter(|c| c.country_name == country && c.competition_id == competition_id)
    {
        if out.iter().any(|s| s.name == c.season_name) {
            continue;
        }
        out.push(SeasonOption {
            competition_id: c.competition_id,
            season_id: c.season_id,
            name: c.season_name.clone(),
        });
    }
    out
}

/// Matches in chronological order, labelled "home vs away (date)".
pub fn match_options(matches: &[Match]) -> Vec<MatchOption> {
    let mut sorted: Vec<&Match> = matches.iter().collect();
    // Stable: same-day matches keep provider order.
    sorted.sort_by_key(|m| m.match_date);
    sorted
        .into_iter()
        .map(|m| MatchOption {
            match_id: m.match_id,
            label: match_label(m),
            scoreline: m.scoreline(),
        })
        .collect()
}

pub fn match_label(m: &Match) -> String {
    format!("{} vs {} ({})", m.home_team, m.away_team, m.match_date.format("%Y-%m-%d"))
}

/// A list with a moving cursor and a separately committed choice.
#[derive(Debug, Clone)]
pub struct Picker<T> {
    pub options: Vec<T>,
    pub cursor: usize,
    pub selected: Option<usize>,
    /// The fetch behind the committed option failed; committing it again
    /// re-issues the request.
    pub failed: bool,
}

impl<T> Default for Picker<T> {
    fn default() -> Self {
        Self { options: Vec::new(), cursor: 0, selected: None, failed: false }
    }
}

impl<T> Picker<T> {
    /// Replace the options and commit the first one, if any.
    pub fn load(&mut self, options: Vec<T>) {
        self.selected = if options.is_empty() { None } else { Some(0) };
        self.cursor = 0;
        self.failed = false;
        self.options = options;
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn cursor_down(&mut self) {
        let max = self.options.len().saturating_sub(1);
        if self.cursor < max {
            self.cursor += 1;
        }
    }

    pub fn cursor_up(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    /// Commit the option under the cursor. Returns it when the choice changed,
    /// or when it is the current choice and its last load failed.
    pub fn commit(&mut self) -> Option<&T> {
        if self.cursor >= self.options.len() {
            return None;
        }
        if self.selected == Some(self.cursor) && !self.failed {
            return None;
        }
        self.selected = Some(self.cursor);
        self.failed = false;
        self.options.get(self.cursor)
    }

    pub fn mark_failed(&mut self) {
        if self.selected.is_some() {
            self.failed = true;
        }
    }

    pub fn current(&self) -> Option<&T> {
        self.selected.and_then(|i| self.options.get(i))
    }
}

/// The season → match cascade.
#[derive(Debug, Default)]
pub struct SelectionState {
    pub seasons: Picker<SeasonOption>,
    pub matches: Picker<MatchOption>,
    /// True once the competitions catalog has been received.
    pub catalog_loaded: bool,
    /// The last catalog fetch failed.
    pub catalog_failed: bool,
    /// True once the match list of the committed season has been received,
    /// even when it is empty.
    pub matches_loaded: bool,
}

impl SelectionState {
    /// Install the season catalog. Returns the key whose matches should be
    /// loaded next, or None when the catalog is empty.
    pub fn load_seasons(&mut self, seasons: Vec<SeasonOption>) -> Option<SeasonKey> {
        self.catalog_loaded = true;
        self.catalog_failed = false;
        self.seasons.load(seasons);
        self.matches.clear();
        self.matches_loaded = false;
        self.current_season().map(SeasonOption::key)
    }

    /// Install the match list for `key`. Returns the match to analyse next.
    /// Lists for a season that is no longer selected are dropped.
    pub fn load_matches(&mut self, key: SeasonKey, matches: &[Match]) -> Option<u32> {
        if !self.is_current_season(key) {
            return None;
        }
        self.matches_loaded = true;
        self.matches.load(match_options(matches));
        self.current_match_id()
    }

    pub fn is_current_season(&self, key: SeasonKey) -> bool {
        self.current_season().map(SeasonOption::key) == Some(key)
    }

    pub fn commit_season(&mut self) -> Option<SeasonKey> {
        let key = self.seasons.commit().map(SeasonOption::key)?;
        self.matches.clear();
        self.matches_loaded = false;
        Some(key)
    }

    /// Record a failed match-list fetch. Failures for a season that is no
    /// longer committed are ignored.
    pub fn season_failed(&mut self, key: SeasonKey) {
        if self.is_current_season(key) {
            self.seasons.mark_failed();
        }
    }

    pub fn match_failed(&mut self, match_id: u32) {
        if self.current_match_id() == Some(match_id) {
            self.matches.mark_failed();
        }
    }

    pub fn commit_match(&mut self) -> Option<u32> {
        self.matches.commit().map(|m| m.match_id)
    }

    pub fn current_season(&self) -> Option<&SeasonOption> {
        self.seasons.current()
    }

    pub fn current_match(&self) -> Option<&MatchOption> {
        self.matches.current()
    }

    pub fn current_match_id(&self) -> Option<u32> {
        self.current_match().map(|m| m.match_id)
    }
}
