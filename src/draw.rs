use log::error;
use tui::backend::Backend;
use tui::layout::{Alignment, Constraint, Layout, Rect};
use tui::style::{Color, Modifier, Style};
use tui::text::{Line, Span};
use tui::widgets::{Block, BorderType, Borders, Clear, Paragraph, Row, Table, Tabs};
use tui::{Frame, Terminal};
use tui_logger::TuiLoggerWidget;

use crate::app::{App, Focus, MenuItem};
use crate::components::heatmap::Heatmap;
use crate::components::shot_map::ShotMap;
use crate::state::analysis::{Analysis, PlayerReport, TableColumn};
use crate::state::network::{ERROR_CHAR, LoadingState};
use crate::state::selection::Picker;
use crate::ui::layout::{HEADER_HEIGHT, LayoutAreas};

static TABS: &[&str; 3] = &["Statistics", "Shot Map", "Heatmap"];

static HELP_LINES: &[(&str, &str)] = &[
    ("q / Ctrl-C", "quit"),
    ("Tab", "cycle focus: seasons, matches, main view"),
    ("j / k, arrows", "move the cursor or scroll the table"),
    ("Enter", "select the highlighted season or match"),
    ("1 / 2 / 3", "statistics, shot map, heatmap"),
    ("h / l", "previous / next view"),
    ("f", "toggle full screen"),
    ("\"", "toggle logs"),
    ("?", "this help, Esc to leave"),
];

pub fn draw<B>(terminal: &mut Terminal<B>, app: &App, loading: LoadingState)
where
    B: Backend,
{
    let current_size = terminal.size().unwrap_or_default();
    if current_size.width <= 10 || current_size.height <= 10 {
        return;
    }

    let mut layout = LayoutAreas::new(current_size);

    let result = terminal.draw(|f| {
        layout.update(f.area(), app.settings.full_screen);

        if !app.settings.full_screen {
            draw_header(f, layout.header, app);
            draw_sidebar(f, layout.sidebar, app);
            draw_tabs(f, layout.tab_bar, app);
        }

        match app.state.active_tab {
            MenuItem::Help => draw_help(f, layout.main),
            tab => draw_main(f, layout.main, app, tab),
        }

        if app.state.show_logs {
            draw_logs(f, layout.main);
        }

        draw_loading_spinner(f, f.area(), app, loading);
    });

    if let Err(e) = result {
        error!("failed to draw frame: {e}");
    }
}

pub fn default_border<'a>(color: Color) -> Block<'a> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(color))
}

fn draw_header(f: &mut Frame, area: Rect, app: &App) {
    let title = Line::from(vec![
        Span::styled(
            " Player Analysis Dashboard ",
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        ),
        Span::styled(app.player_label(), Style::default().fg(Color::Cyan)),
    ]);

    let mut source = format!(" StatsBomb Open Data · {}", app.settings.country);
    if let Some(at) = &app.state.last_loaded_at {
        source.push_str(&format!(" · updated {at}"));
    }

    f.render_widget(
        Paragraph::new(vec![title, Line::from(source)]).style(Style::default().fg(Color::Gray)),
        area,
    );
}

fn draw_sidebar(f: &mut Frame, area: Rect, app: &App) {
    let block = default_border(Color::DarkGray).title(" Filters ");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let selection = &app.state.selection;
    let season_rows = (selection.seasons.options.len() as u16 + 2).min((inner.height / 3).max(3));
    let [seasons_area, matches_area] =
        Layout::vertical([Constraint::Length(season_rows), Constraint::Fill(1)]).areas(inner);

    let season_names: Vec<&str> = selection.seasons.options.iter().map(|s| s.name.as_str()).collect();
    let seasons_empty = if selection.catalog_loaded {
        "No seasons"
    } else if selection.catalog_failed {
        "Failed to load"
    } else {
        "Loading..."
    };
    draw_picker(
        f,
        seasons_area,
        " Season ",
        &selection.seasons,
        &season_names,
        app.state.focus == Focus::Seasons,
        seasons_empty,
    );

    let match_labels: Vec<&str> = selection.matches.options.iter().map(|m| m.label.as_str()).collect();
    let matches_empty = if selection.matches_loaded {
        "No matches"
    } else if selection.seasons.failed {
        "Failed to load"
    } else if selection.current_season().is_some() {
        "Loading..."
    } else {
        ""
    };
    draw_picker(
        f,
        matches_area,
        " Match ",
        &selection.matches,
        &match_labels,
        app.state.focus == Focus::Matches,
        matches_empty,
    );
}

fn draw_picker<T>(
    f: &mut Frame,
    area: Rect,
    title: &str,
    picker: &Picker<T>,
    labels: &[&str],
    focused: bool,
    empty: &str,
) {
    let color = if focused { Color::Cyan } else { Color::DarkGray };
    let block = default_border(color).title(title.to_string());
    let inner = block.inner(area);
    f.render_widget(block, area);

    if labels.is_empty() {
        f.render_widget(Paragraph::new(empty.to_string()).style(Style::default().fg(Color::DarkGray)), inner);
        return;
    }

    // Keep the cursor on screen.
    let visible = inner.height.max(1) as usize;
    let offset = picker.cursor.saturating_sub(visible - 1);

    let lines: Vec<Line> = labels
        .iter()
        .enumerate()
        .skip(offset)
        .take(visible)
        .map(|(idx, label)| {
            let marker = if focused && idx == picker.cursor { ">" } else { " " };
            let style = if picker.selected == Some(idx) {
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::Gray)
            };
            Line::from(Span::styled(format!("{marker} {label}"), style))
        })
        .collect();

    f.render_widget(Paragraph::new(lines), inner);
}

fn draw_tabs(f: &mut Frame, tab_bar: [Rect; 2], app: &App) {
    let style = Style::default().fg(Color::White);
    let border_type = BorderType::Rounded;

    let tab_index = match app.state.active_tab {
        MenuItem::Statistics => 0,
        MenuItem::ShotMap => 1,
        MenuItem::Heatmap => 2,
        MenuItem::Help => 0,
    };

    let titles: Vec<Line> = TABS.iter().map(|t| Line::from(*t)).collect();
    let tabs = Tabs::new(titles)
        .block(
            Block::default()
                .borders(Borders::LEFT | Borders::BOTTOM | Borders::TOP)
                .border_type(border_type),
        )
        .highlight_style(Style::default().add_modifier(Modifier::UNDERLINED))
        .select(tab_index)
        .style(style);
    f.render_widget(tabs, tab_bar[0]);

    let help = Paragraph::new("Help: ? ")
        .alignment(Alignment::Right)
        .block(
            Block::default()
                .borders(Borders::RIGHT | Borders::BOTTOM | Borders::TOP)
                .border_type(border_type),
        )
        .style(style);
    f.render_widget(help, tab_bar[1]);
}

fn draw_main(f: &mut Frame, area: Rect, app: &App, tab: MenuItem) {
    let selection = &app.state.selection;
    let error_rows = u16::from(app.state.last_error.is_some());
    let [subheader, error_area, body] = Layout::vertical([
        Constraint::Length(2),
        Constraint::Length(error_rows),
        Constraint::Fill(1),
    ])
    .areas(area);

    if let Some(current) = selection.current_match() {
        let lines = vec![
            Line::from(Span::styled(
                format!(" Match analysis: {}", current.label),
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from(format!(" {}", current.scoreline.as_deref().unwrap_or(""))),
        ];
        f.render_widget(Paragraph::new(lines), subheader);
    }

    if let Some(message) = &app.state.last_error {
        f.render_widget(
            Paragraph::new(format!(" Error: {message}")).style(Style::default().fg(Color::Red)),
            error_area,
        );
    }

    if !selection.catalog_loaded {
        let msg = if selection.catalog_failed {
            "Could not load competitions. Press Enter in the season list to retry."
        } else {
            "Loading competitions..."
        };
        return draw_placeholder(f, body, msg);
    }
    if selection.seasons.options.is_empty() {
        let msg = format!(
            "No seasons for competition {} in {}.",
            app.settings.competition_id, app.settings.country
        );
        return draw_placeholder(f, body, &msg);
    }
    if selection.current_match().is_none() {
        let msg = if selection.seasons.failed {
            "Could not load matches. Press Enter on the season to retry."
        } else if selection.matches_loaded {
            "No matches in this season."
        } else {
            "Loading matches..."
        };
        return draw_placeholder(f, body, msg);
    }

    let report = match &app.state.analysis {
        None if selection.matches.failed => {
            return draw_placeholder(f, body, "Could not load match events. Press Enter on the match to retry.");
        }
        None => return draw_placeholder(f, body, "Loading match events..."),
        Some(Analysis::NoActivity { .. }) => {
            let msg = format!("No activity for {} in this match.", app.player_label());
            return draw_warning(f, body, &msg);
        }
        Some(Analysis::Report(report)) => report,
    };

    match tab {
        MenuItem::ShotMap => draw_shot_map(f, body, report),
        MenuItem::Heatmap => draw_heatmap(f, body, report),
        _ => draw_statistics(f, body, app, report),
    }
}

fn draw_statistics(f: &mut Frame, area: Rect, app: &App, report: &PlayerReport) {
    let [tiles, table_area] = Layout::vertical([Constraint::Length(3), Constraint::Fill(1)]).areas(area);

    let metrics = &report.metrics;
    let values = [
        ("Goals", metrics.goals.to_string()),
        ("Assists", metrics.assists.to_string()),
        ("Shots", metrics.shots.to_string()),
        ("xG", format!("{:.2}", metrics.xg)),
    ];
    let tile_areas: [Rect; 4] = Layout::horizontal([Constraint::Ratio(1, 4); 4]).areas(tiles);
    for ((title, value), tile) in values.into_iter().zip(tile_areas) {
        let widget = Paragraph::new(Span::styled(value, Style::default().add_modifier(Modifier::BOLD)))
            .alignment(Alignment::Center)
            .block(default_border(Color::DarkGray).title(format!(" {title} ")));
        f.render_widget(widget, tile);
    }

    let table = &report.table;
    let header = Row::new(table.columns.iter().map(|c| c.label()))
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD));
    let rows = table
        .rows
        .iter()
        .skip(app.state.statistics.scroll_offset as usize)
        .map(|row| Row::new(row.iter().map(|cell| cell.clone().unwrap_or_default())));
    let widths: Vec<Constraint> = table.columns.iter().map(column_width).collect();

    let border_color = if app.state.focus == Focus::Main { Color::Cyan } else { Color::White };
    let widget = Table::new(rows, widths)
        .header(header)
        .column_spacing(2)
        .block(default_border(border_color).title(format!(" Events ({}) ", table.rows.len())));
    f.render_widget(widget, table_area);
}

fn column_width(column: &TableColumn) -> Constraint {
    match column {
        TableColumn::Minute => Constraint::Length(6),
        TableColumn::Type => Constraint::Length(18),
        TableColumn::Location => Constraint::Length(14),
        TableColumn::ShotOutcome => Constraint::Fill(1),
    }
}

fn draw_shot_map(f: &mut Frame, area: Rect, report: &PlayerReport) {
    let block = default_border(Color::White).title(format!(" Shot Map ({}) ", report.shots.len()));
    let inner = block.inner(area);
    f.render_widget(block, area);

    if report.shots.is_empty() {
        return f.render_widget(centered("No shots."), inner);
    }

    let [pitch_area, legend] = Layout::vertical([Constraint::Fill(1), Constraint::Length(1)]).areas(inner);
    f.render_widget(ShotMap { shots: &report.shots }, pitch_area);
    f.render_widget(
        Paragraph::new(Line::from(vec![
            Span::styled("● goal  ", Style::default().fg(Color::Yellow)),
            Span::styled("● no goal  ", Style::default().fg(Color::Red)),
            Span::raw("marker size grows with xG"),
        ]))
        .alignment(Alignment::Center),
        legend,
    );
}

fn draw_heatmap(f: &mut Frame, area: Rect, report: &PlayerReport) {
    let block = default_border(Color::White).title(format!(" Heatmap ({} actions) ", report.actions.len()));
    let inner = block.inner(area);
    f.render_widget(block, area);

    if report.actions.is_empty() {
        return f.render_widget(centered("No located actions."), inner);
    }
    f.render_widget(Heatmap { points: &report.actions }, inner);
}

fn draw_help(f: &mut Frame, area: Rect) {
    let block = default_border(Color::White).title(" Help ");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let lines: Vec<Line> = HELP_LINES
        .iter()
        .map(|(keys, action)| {
            Line::from(vec![
                Span::styled(format!(" {keys:<16}"), Style::default().fg(Color::Cyan)),
                Span::raw(*action),
            ])
        })
        .collect();
    f.render_widget(Paragraph::new(lines), inner);
}

fn draw_logs(f: &mut Frame, area: Rect) {
    f.render_widget(Clear, area);
    let logs = TuiLoggerWidget::default()
        .block(default_border(Color::White).title(" Logs "))
        .style_error(Style::default().fg(Color::Red))
        .style_warn(Style::default().fg(Color::Yellow))
        .style_info(Style::default().fg(Color::Cyan))
        .style_debug(Style::default().fg(Color::Green));
    f.render_widget(logs, area);
}

fn centered(msg: &str) -> Paragraph<'_> {
    Paragraph::new(msg)
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center)
}

fn draw_placeholder(f: &mut Frame, area: Rect, msg: &str) {
    let block = default_border(Color::DarkGray);
    let inner = block.inner(area);
    f.render_widget(block, area);
    f.render_widget(centered(msg), inner);
}

fn draw_warning(f: &mut Frame, area: Rect, msg: &str) {
    let block = default_border(Color::Yellow).title(" No activity ");
    let inner = block.inner(area);
    f.render_widget(block, area);
    f.render_widget(
        Paragraph::new(msg).style(Style::default().fg(Color::Yellow)).alignment(Alignment::Center),
        inner,
    );
}

fn draw_loading_spinner(f: &mut Frame, area: Rect, app: &App, loading: LoadingState) {
    if !loading.is_loading && loading.spinner_char != ERROR_CHAR {
        return;
    }
    let style = match loading.spinner_char {
        ERROR_CHAR => Style::default().fg(Color::Red),
        _ => Style::default().fg(Color::White),
    };
    let spinner = Paragraph::new(loading.spinner_char.to_string())
        .alignment(Alignment::Right)
        .style(style);
    let area = if app.settings.full_screen {
        Rect::new(area.width.saturating_sub(3), area.height.saturating_sub(2), 1, 1)
    } else {
        Rect::new(area.width.saturating_sub(11), HEADER_HEIGHT + 1, 1, 1)
    };
    f.render_widget(spinner, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::app_settings::AppSettings;
    use crate::state::messages::NetworkRequest;
    use chrono::NaiveDate;
    use statsbomb_api::{Competition, Match};
    use tui::backend::TestBackend;

    fn app_with_season() -> App {
        let mut app = App::with_settings(AppSettings::default());
        app.on_competitions_loaded(&[Competition {
            competition_id: 11,
            season_id: 37,
            country_name: "Spain".into(),
            competition_name: "La Liga".into(),
            season_name: "2004/2005".into(),
        }]);
        app
    }

    fn screen(app: &App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(160, 40)).unwrap();
        draw(&mut terminal, app, LoadingState::default());
        let buf = terminal.backend().buffer();
        (0..buf.area.height)
            .map(|y| (0..buf.area.width).map(|x| buf[(x, y)].symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn empty_season_shows_no_matches_instead_of_loading() {
        let mut app = app_with_season();
        app.on_matches_loaded(11, 37, &[]);
        let text = screen(&app);
        assert!(text.contains("No matches in this season."));
        assert!(text.contains("No matches"));
        assert!(!text.contains("Loading"));
    }

    #[test]
    fn failed_events_fetch_shows_a_retry_hint() {
        let mut app = app_with_season();
        app.on_matches_loaded(
            11,
            37,
            &[Match {
                match_id: 301,
                match_date: NaiveDate::from_ymd_opt(2005, 10, 22).unwrap(),
                kick_off: None,
                home_team: "Barcelona".into(),
                away_team: "Real Madrid".into(),
                home_score: None,
                away_score: None,
            }],
        );
        app.on_error(NetworkRequest::LoadEvents { match_id: 301 }, "Not found: events/301.json".into());
        let text = screen(&app);
        assert!(text.contains("Error: Not found: events/301.json"));
        assert!(text.contains("Press Enter on the match to retry."));
        assert!(!text.contains("Loading match events..."));
    }

    #[test]
    fn pending_match_list_shows_loading() {
        let text = screen(&app_with_season());
        assert!(text.contains("Loading matches..."));
    }
}
