use crate::state::cache::DataCache;
use crate::state::messages::{NetworkRequest, NetworkResponse};
use log::{debug, error, info};
use statsbomb_api::client::{ApiError, StatsBombApi};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tokio::sync::mpsc;

const SPINNER_CHARS: [char; 10] = ['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧', '⠇', '⠏'];
pub const ERROR_CHAR: char = '!';

#[derive(Debug, Copy, Clone)]
pub struct LoadingState {
    pub is_loading: bool,
    pub spinner_char: char,
}

impl Default for LoadingState {
    fn default() -> Self {
        Self { is_loading: false, spinner_char: ' ' }
    }
}

/// Serves requests one at a time, in the order they were sent. Owns the
/// fetch cache, so nothing else can observe it half-filled.
pub struct NetworkWorker {
    client: StatsBombApi,
    cache: DataCache,
    requests: mpsc::Receiver<NetworkRequest>,
    responses: mpsc::Sender<NetworkResponse>,
    is_loading: Arc<AtomicBool>,
}

impl NetworkWorker {
    pub fn new(
        client: StatsBombApi,
        requests: mpsc::Receiver<NetworkRequest>,
        responses: mpsc::Sender<NetworkResponse>,
    ) -> Self {
        Self {
            client,
            cache: DataCache::default(),
            requests,
            responses,
            is_loading: Arc::new(AtomicBool::new(false)),
        }
    }

    pub async fn run(mut self) {
        while let Some(request) = self.requests.recv().await {
            self.start_loading_animation().await;

            let result = match request {
                NetworkRequest::LoadCompetitions => self.handle_load_competitions().await,
                NetworkRequest::LoadMatches { competition_id, season_id } => {
                    self.handle_load_matches(competition_id, season_id).await
                }
                NetworkRequest::LoadEvents { match_id } => self.handle_load_events(match_id).await,
            };

            debug!("network request complete");
            self.stop_loading_animation(result.is_ok()).await;

            let response = result.unwrap_or_else(|err| {
                error!("{err}");
                NetworkResponse::Error { request, message: err.to_string() }
            });

            if let Err(e) = self.responses.send(response).await {
                error!("Failed to send network response: {e}");
                break;
            }
        }
    }

    async fn handle_load_competitions(&mut self) -> Result<NetworkResponse, ApiError> {
        let competitions = match self.cache.competitions.get(&()) {
            Some(hit) => hit,
            None => {
                debug!("loading competitions catalog");
                let fetched = self.client.fetch_competitions().await?;
                info!("{} competition seasons in catalog", fetched.len());
                self.cache.competitions.insert((), fetched)
            }
        };
        Ok(NetworkResponse::CompetitionsLoaded { competitions })
    }

    async fn handle_load_matches(
        &mut self,
        competition_id: u32,
        season_id: u32,
    ) -> Result<NetworkResponse, ApiError> {
        let key = (competition_id, season_id);
        let matches = match self.cache.matches.get(&key) {
            Some(hit) => {
                debug!("matches for {competition_id}/{season_id} served from cache");
                hit
            }
            None => {
                debug!("loading matches for {competition_id}/{season_id}");
                let fetched = self.client.fetch_matches(competition_id, season_id).await?;
                self.cache.matches.insert(key, fetched)
            }
        };
        Ok(NetworkResponse::MatchesLoaded { competition_id, season_id, matches })
    }

    async fn handle_load_events(&mut self, match_id: u32) -> Result<NetworkResponse, ApiError> {
        let events = match self.cache.events.get(&match_id) {
            Some(hit) => {
                debug!("events for match {match_id} served from cache");
                hit
            }
            None => {
                debug!("loading events for match {match_id}");
                let fetched = self.client.fetch_events(match_id).await?;
                info!("match {match_id}: {} events", fetched.len());
                self.cache.events.insert(match_id, fetched)
            }
        };
        let (hits, misses) = self.cache.events.stats();
        debug!("event cache: {} entries, {hits} hits, {misses} misses", self.cache.events.len());
        Ok(NetworkResponse::EventsLoaded { match_id, events })
    }

    async fn start_loading_animation(&self) {
        self.is_loading.store(true, Ordering::Relaxed);

        let mut loading_state =
            LoadingState { is_loading: true, spinner_char: SPINNER_CHARS[0] };
        let _ = self
            .responses
            .send(NetworkResponse::LoadingStateChanged { loading_state })
            .await;

        let responses = self.responses.clone();
        let is_loading = self.is_loading.clone();

        tokio::spawn(async move {
            let mut spinner_index = 1;
            let mut interval = tokio::time::interval(Duration::from_millis(33));
            loop {
                interval.tick().await;
                if !is_loading.load(Ordering::Relaxed) {
                    break;
                }
                loading_state.spinner_char = SPINNER_CHARS[spinner_index];
                spinner_index = (spinner_index + 1) % SPINNER_CHARS.len();
                let _ = responses
                    .send(NetworkResponse::LoadingStateChanged { loading_state })
                    .await;
            }
        });
    }

    async fn stop_loading_animation(&self, is_ok: bool) {
        self.is_loading.store(false, Ordering::Relaxed);
        tokio::time::sleep(Duration::from_millis(15)).await;

        let spinner_char = if is_ok { ' ' } else { ERROR_CHAR };
        let _ = self
            .responses
            .send(NetworkResponse::LoadingStateChanged {
                loading_state: LoadingState { is_loading: false, spinner_char },
            })
            .await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use statsbomb_api::client::DataSource;

    const COMPETITIONS: &str = r#"[
        {"competition_id": 11, "season_id": 37, "country_name": "Spain",
         "competition_name": "La Liga", "season_name": "2004/2005"}
    ]"#;

    fn local_worker(name: &str) -> (NetworkWorker, std::path::PathBuf) {
        let root = std::env::temp_dir().join(format!("pitchside-{name}-{}", std::process::id()));
        std::fs::create_dir_all(&root).unwrap();
        std::fs::write(root.join("competitions.json"), COMPETITIONS).unwrap();
        let (_req_tx, req_rx) = mpsc::channel(4);
        let (resp_tx, _resp_rx) = mpsc::channel(4);
        let client = StatsBombApi::with_source(DataSource::Local { root: root.clone() });
        (NetworkWorker::new(client, req_rx, resp_tx), root)
    }

    #[tokio::test]
    async fn competitions_are_fetched_once_then_cached() {
        let (mut worker, root) = local_worker("cache");

        let first = worker.handle_load_competitions().await.unwrap();
        // Removing the source proves the second answer comes from the cache.
        std::fs::remove_dir_all(&root).unwrap();
        let second = worker.handle_load_competitions().await.unwrap();

        match (first, second) {
            (
                NetworkResponse::CompetitionsLoaded { competitions: a },
                NetworkResponse::CompetitionsLoaded { competitions: b },
            ) => assert!(Arc::ptr_eq(&a, &b)),
            other => panic!("unexpected responses: {other:?}"),
        }
    }

    #[tokio::test]
    async fn failed_fetches_are_not_cached() {
        let (mut worker, root) = local_worker("miss");
        assert!(worker.handle_load_events(42).await.is_err());
        assert_eq!(worker.cache.events.len(), 0);

        std::fs::create_dir_all(root.join("events")).unwrap();
        std::fs::write(root.join("events/42.json"), "[]").unwrap();
        assert!(worker.handle_load_events(42).await.is_ok());
        assert_eq!(worker.cache.events.len(), 1);

        let _ = std::fs::remove_dir_all(root);
    }
}
