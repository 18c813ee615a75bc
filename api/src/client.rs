use crate::statsbomb::{SbCompetition, SbEvent, SbMatch};
use crate::{Competition, Event, EventDetail, Location, Match, Pass, Player, Shot};
use chrono::NaiveDate;
use log::debug;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

pub type ApiResult<T> = Result<T, ApiError>;

pub const OPEN_DATA_URL: &str = "https://raw.githubusercontent.com/statsbomb/open-data/master/data";

/// Where the open-data JSON files come from. Both sources share the layout of
/// the `data/` directory in the statsbomb/open-data repository.
#[derive(Debug, Clone, PartialEq)]
pub enum DataSource {
    Remote { base_url: String },
    Local { root: PathBuf },
}

impl Default for DataSource {
    fn default() -> Self {
        DataSource::Remote { base_url: OPEN_DATA_URL.to_string() }
    }
}

impl fmt::Display for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataSource::Remote { base_url } => write!(f, "{base_url}"),
            DataSource::Local { root } => write!(f, "{}", root.display()),
        }
    }
}

/// StatsBomb open-data client.
#[derive(Debug, Clone)]
pub struct StatsBombApi {
    client: Client,
    source: DataSource,
    timeout: Duration,
}

impl Default for StatsBombApi {
    fn default() -> Self {
        Self::with_source(DataSource::default())
    }
}

#[derive(Debug)]
pub enum ApiError {
    Network(reqwest::Error, String),
    Api(reqwest::Error, String),
    Parsing(String, String),
    NotFound(String),
    Io(std::io::Error, String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Network(e, url) => write!(f, "Network error for {url}: {e}"),
            ApiError::Api(e, url) => write!(f, "API error for {url}: {e}"),
            ApiError::Parsing(e, src) => write!(f, "Parse error for {src}: {e}"),
            ApiError::NotFound(what) => write!(f, "Not found: {what}"),
            ApiError::Io(e, path) => write!(f, "Could not read {path}: {e}"),
        }
    }
}

impl std::error::Error for ApiError {}

impl StatsBombApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_source(source: DataSource) -> Self {
        Self {
            client: Client::builder()
                .user_agent("pitchside/0.1 (terminal match dashboard)")
                .build()
                .unwrap_or_default(),
            source,
            timeout: Duration::from_secs(30),
        }
    }

    pub fn source(&self) -> &DataSource {
        &self.source
    }

    /// Every (competition, season) pair in the open-data catalog.
    pub async fn fetch_competitions(&self) -> ApiResult<Vec<Competition>> {
        let raw: Vec<SbCompetition> = self.load("competitions.json").await?;
        Ok(raw.into_iter().map(map_competition).collect())
    }

    /// Matches of one competition season, in provider order.
    pub async fn fetch_matches(&self, competition_id: u32, season_id: u32) -> ApiResult<Vec<Match>> {
        let path = format!("matches/{competition_id}/{season_id}.json");
        let raw: Vec<SbMatch> = self.load(&path).await?;
        raw.into_iter().map(|m| map_match(m, &path)).collect()
    }

    /// Full event stream of one match, in provider order.
    pub async fn fetch_events(&self, match_id: u32) -> ApiResult<Vec<Event>> {
        let raw: Vec<SbEvent> = self.load(&format!("events/{match_id}.json")).await?;
        Ok(raw.into_iter().map(map_event).collect())
    }

    async fn load<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        match &self.source {
            DataSource::Remote { base_url } => {
                let url = format!("{}/{path}", base_url.trim_end_matches('/'));
                self.get(&url).await
            }
            DataSource::Local { root } => {
                let file = root.join(path);
                let display = file.display().to_string();
                debug!("reading {display}");
                let content = std::fs::read_to_string(&file).map_err(|e| {
                    if e.kind() == std::io::ErrorKind::NotFound {
                        ApiError::NotFound(display.clone())
                    } else {
                        ApiError::Io(e, display.clone())
                    }
                })?;
                serde_json::from_str(&content).map_err(|e| ApiError::Parsing(e.to_string(), display))
            }
        }
    }

    async fn get<T: DeserializeOwned>(&self, url: &str) -> ApiResult<T> {
        debug!("GET {url}");
        let response = self
            .client
            .get(url)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| ApiError::Network(e, url.to_owned()))?;

        match response.error_for_status() {
            Ok(res) => res
                .json::<T>()
                .await
                .map_err(|e| ApiError::Parsing(e.to_string(), url.to_owned())),
            Err(e) => {
                if e.status() == Some(StatusCode::NOT_FOUND) {
                    Err(ApiError::NotFound(url.to_owned()))
                } else {
                    Err(ApiError::Api(e, url.to_owned()))
                }
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Mapping: StatsBomb wire types → clean domain types
// ---------------------------------------------------------------------------

fn map_competition(c: SbCompetition) -> Competition {
    Competition {
        competition_id: c.competition_id,
        season_id: c.season_id,
        country_name: c.country_name,
        competition_name: c.competition_name,
        season_name: c.season_name,
    }
}

fn map_match(m: SbMatch, source: &str) -> ApiResult<Match> {
    let match_date = NaiveDate::parse_from_str(&m.match_date, "%Y-%m-%d").map_err(|e| {
        ApiError::Parsing(format!("match {} has bad date {:?}: {e}", m.match_id, m.match_date), source.to_owned())
    })?;
    Ok(Match {
        match_id: m.match_id,
        match_date,
        kick_off: m.kick_off,
        home_team: m.home_team.home_team_name,
        away_team: m.away_team.away_team_name,
        home_score: m.home_score,
        away_score: m.away_score,
    })
}

fn map_event(e: SbEvent) -> Event {
    let detail = match e.event_type.name.as_str() {
        "Shot" => {
            let shot = e.shot.unwrap_or_default();
            EventDetail::Shot(Shot {
                outcome: shot.outcome.map(|o| o.name),
                xg: shot.statsbomb_xg,
            })
        }
        "Pass" => EventDetail::Pass(Pass {
            goal_assist: e.pass.and_then(|p| p.goal_assist).unwrap_or(false),
        }),
        _ => EventDetail::Other,
    };

    Event {
        index: e.index,
        period: e.period,
        minute: e.minute,
        second: e.second,
        type_name: e.event_type.name,
        player: e.player.map(|p| Player { id: p.id, name: p.name }),
        team: e.team.map(|t| t.name),
        location: e.location.as_deref().and_then(map_location),
        detail,
    }
}

/// Wire locations are `[x, y]`. Extra coordinates are ignored; anything
/// shorter, or non-finite, is treated as absent.
fn map_location(coords: &[f64]) -> Option<Location> {
    match coords {
        [x, y, ..] if x.is_finite() && y.is_finite() => Some(Location { x: *x, y: *y }),
        _ => None,
    }
}
