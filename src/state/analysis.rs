use statsbomb_api::{Event, Location};

/// Marker size per unit of xG on the shot map.
pub const SHOT_SIZE_PER_XG: f64 = 500.0;
/// Marker size of a zero-xG shot.
pub const SHOT_SIZE_MIN: f64 = 100.0;

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PlayerMetrics {
    pub goals: usize,
    pub assists: usize,
    pub shots: usize,
    pub xg: f64,
}

impl PlayerMetrics {
    pub fn from_events(events: &[Event]) -> Self {
        let mut metrics = Self::default();
        for event in events {
            if let Some(shot) = event.shot() {
                metrics.shots += 1;
                metrics.xg += shot.xg.unwrap_or(0.0);
                if shot.is_goal() {
                    metrics.goals += 1;
                }
            }
            if event.pass().is_some_and(|p| p.goal_assist) {
                metrics.assists += 1;
            }
        }
        metrics
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableColumn {
    Minute,
    Type,
    Location,
    ShotOutcome,
}

impl TableColumn {
    pub const ALL: [TableColumn; 4] =
        [TableColumn::Minute, TableColumn::Type, TableColumn::Location, TableColumn::ShotOutcome];

    pub fn label(&self) -> &'static str {
        match self {
            TableColumn::Minute => "minute",
            TableColumn::Type => "type",
            TableColumn::Location => "location",
            TableColumn::ShotOutcome => "shot_outcome",
        }
    }

    fn cell(&self, event: &Event) -> Option<String> {
        match self {
            TableColumn::Minute => Some(event.minute.to_string()),
            TableColumn::Type => Some(event.type_name.clone()).filter(|t| !t.is_empty()),
            TableColumn::Location => event.location.map(|l| format!("({:.1}, {:.1})", l.x, l.y)),
            TableColumn::ShotOutcome => event.shot().and_then(|s| s.outcome.clone()),
        }
    }
}

/// The player's events projected to display columns. Columns with no value
/// in any row are dropped; surviving columns keep their empty cells.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DisplayTable {
    pub columns: Vec<TableColumn>,
    pub rows: Vec<Vec<Option<String>>>,
}

impl DisplayTable {
    pub fn from_events(events: &[Event]) -> Self {
        let full: Vec<Vec<Option<String>>> = events
            .iter()
            .map(|e| TableColumn::ALL.iter().map(|c| c.cell(e)).collect())
            .collect();

        let keep: Vec<usize> = (0..TableColumn::ALL.len())
            .filter(|&i| full.iter().any(|row| row[i].is_some()))
            .collect();

        Self {
            columns: keep.iter().map(|&i| TableColumn::ALL[i]).collect(),
            rows: full
                .into_iter()
                .map(|row| keep.iter().map(|&i| row[i].clone()).collect())
                .collect(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShotPoint {
    pub x: f64,
    pub y: f64,
    pub xg: f64,
    /// Marker size: `xg * SHOT_SIZE_PER_XG + SHOT_SIZE_MIN`.
    pub size: f64,
    pub is_goal: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActionPoint {
    pub x: f64,
    pub y: f64,
}

impl From<Location> for ActionPoint {
    fn from(l: Location) -> Self {
        Self { x: l.x, y: l.y }
    }
}

pub fn shot_marker_size(xg: f64) -> f64 {
    xg * SHOT_SIZE_PER_XG + SHOT_SIZE_MIN
}

/// Located shots, decomposed into plottable coordinates.
pub fn project_shots(events: &[Event]) -> Vec<ShotPoint> {
    events
        .iter()
        .filter_map(|e| {
            let shot = e.shot()?;
            let loc = e.location?;
            let xg = shot.xg.unwrap_or(0.0);
            Some(ShotPoint {
                x: loc.x,
                y: loc.y,
                xg,
                size: shot_marker_size(xg),
                is_goal: shot.is_goal(),
            })
        })
        .collect()
}

/// Every located action, for the density heatmap.
pub fn project_actions(events: &[Event]) -> Vec<ActionPoint> {
    events.iter().filter_map(|e| e.location).map(ActionPoint::from).collect()
}

pub fn player_events(events: &[Event], player_id: u32) -> Vec<Event> {
    events
        .iter()
        .filter(|e| e.player_id() == Some(player_id))
        .cloned()
        .collect()
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlayerReport {
    pub match_id: u32,
    pub player_name: Option<String>,
    pub events: Vec<Event>,
    pub metrics: PlayerMetrics,
    pub table: DisplayTable,
    pub shots: Vec<ShotPoint>,
    pub actions: Vec<ActionPoint>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Analysis {
    /// The player has no events in this match.
    NoActivity { match_id: u32 },
    Report(Box<PlayerReport>),
}

pub fn analyze(match_id: u32, events: &[Event], player_id: u32) -> Analysis {
    let subset = player_events(events, player_id);
    if subset.is_empty() {
        return Analysis::NoActivity { match_id };
    }

    let player_name = subset
        .iter()
        .filter_map(|e| e.player.as_ref())
        .map(|p| p.name.clone())
        .find(|name| !name.is_empty());

    Analysis::Report(Box::new(PlayerReport {
        match_id,
        player_name,
        metrics: PlayerMetrics::from_events(&subset),
        table: DisplayTable::from_events(&subset),
        shots: project_shots(&subset),
        actions: project_actions(&subset),
        events: subset,
    }))
}
