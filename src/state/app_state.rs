use crate::app::{Focus, MenuItem};
use crate::state::analysis::Analysis;
use crate::state::selection::SelectionState;

// ---------------------------------------------------------------------------
// Per-view state
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct StatisticsState {
    /// First visible table row.
    pub scroll_offset: u16,
}

impl StatisticsState {
    pub fn scroll_down(&mut self, row_count: usize) {
        let max = row_count.saturating_sub(1) as u16;
        self.scroll_offset = (self.scroll_offset + 1).min(max);
    }

    pub fn scroll_up(&mut self) {
        self.scroll_offset = self.scroll_offset.saturating_sub(1);
    }
}

// ---------------------------------------------------------------------------
// Root app state
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct AppState {
    pub active_tab: MenuItem,
    pub previous_tab: MenuItem,
    pub focus: Focus,
    pub show_logs: bool,
    pub last_error: Option<String>,
    /// "HH:MM" of the last analysis refresh.
    pub last_loaded_at: Option<String>,
    pub selection: SelectionState,
    /// Analysis of the committed match; None while its events are loading.
    pub analysis: Option<Analysis>,
    pub statistics: StatisticsState,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Row count of the statistics table, 0 when there is nothing to show.
    pub fn table_rows(&self) -> usize {
        match &self.analysis {
            Some(Analysis::Report(report)) => report.table.rows.len(),
            _ => 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_scroll_is_clamped_to_rows() {
        let mut stats = StatisticsState::default();
        stats.scroll_up();
        assert_eq!(stats.scroll_offset, 0);
        for _ in 0..10 {
            stats.scroll_down(3);
        }
        assert_eq!(stats.scroll_offset, 2);
        stats.scroll_down(0);
        assert_eq!(stats.scroll_offset, 0);
    }
}
