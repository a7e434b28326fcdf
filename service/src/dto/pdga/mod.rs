mod api_player;
mod get_competition;
mod round;

pub use get_competition::{CompetitionInfo, EventListing, RoundLabel, RoundLabelInfo};

use async_trait::async_trait;
use log::{debug, info, warn};
use std::time::Duration;

use crate::dto::{Division, RawResult};
use crate::error::ProviderError;
use get_competition::CompetitionInfoResponse;
use round::ApiRes;

pub const PDGA_LIVE_API: &str = "https://www.pdga.com/apps/tournament/live-api";
pub const PDGA_EVENT_API: &str = "https://api.pdga.com/services/json/event";

/// Rounds tried when the event info has no round list.
pub const FALLBACK_ROUNDS: [u8; 4] = [4, 3, 2, 1];

#[async_trait]
pub trait ResultsProvider: Send + Sync {
    async fn fetch_round(
        &self,
        tourn_id: u32,
        division: Division,
        round: u8,
    ) -> Result<Vec<RawResult>, ProviderError>;

    async fn competition_info(&self, tourn_id: u32) -> Result<CompetitionInfo, ProviderError>;

    async fn lookup_tournament_id(
        &self,
        name: &str,
        year: i32,
    ) -> Result<Option<EventListing>, ProviderError>;

    /// Round numbers to try, latest first, falling back to a guess when the
    /// event info is missing or has no round list.
    async fn round_candidates(&self, tourn_id: u32, live: bool) -> Vec<u8> {
        let rounds = match self.competition_info(tourn_id).await {
            Ok(info) if live => info.live_round_candidates(),
            Ok(info) => info.final_round_candidates(),
            Err(e) => {
                warn!("Unable to get event info for {tourn_id}, guessing rounds: {e}");
                vec![]
            }
        };
        if rounds.is_empty() {
            FALLBACK_ROUNDS.to_vec()
        } else {
            rounds
        }
    }

    /// Current round of a live event: the latest round anyone has scores in.
    /// Unlike final results a round that fails to load fails the fetch.
    async fn fetch_latest(&self, tourn_id: u32, division: Division) -> Result<Vec<RawResult>, ProviderError> {
        for round in self.round_candidates(tourn_id, true).await {
            let scores = self.fetch_round(tourn_id, division, round).await?;
            if !scores.is_empty() {
                debug!("Using round {round} as current for {division}");
                return Ok(scores);
            }
        }
        Ok(vec![])
    }

    /// Latest round where anyone has completed. A round that fails to load is
    /// skipped, an event with no completed round gives an empty list.
    async fn fetch_final(&self, tourn_id: u32, division: Division) -> Result<Vec<RawResult>, ProviderError> {
        let rounds = self.round_candidates(tourn_id, false).await;

        for round in rounds {
            match self.fetch_round(tourn_id, division, round).await {
                Ok(scores) if scores.iter().any(|s| s.completed) => {
                    debug!("Using round {round} as final for {division}");
                    return Ok(scores);
                }
                Ok(_) => debug!("Round {round} of {tourn_id} has no completed {division} players"),
                Err(e) => warn!("Unable to get round {round} for {division} from PDGA: {e}"),
            }
        }
        Ok(vec![])
    }
}

pub struct PdgaClient {
    http: reqwest::Client,
    live_api: String,
    event_api: String,
}

impl Default for PdgaClient {
    fn default() -> Self {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(15))
            .build()
            .unwrap_or_default();
        Self::new(http)
    }
}

impl PdgaClient {
    pub fn new(http: reqwest::Client) -> Self {
        Self {
            http,
            live_api: PDGA_LIVE_API.to_string(),
            event_api: PDGA_EVENT_API.to_string(),
        }
    }

    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
        url: String,
    ) -> Result<T, ProviderError> {
        let resp = request
            .send()
            .await
            .map_err(|source| ProviderError::Unavailable {
                url: url.clone(),
                source,
            })?;
        if !resp.status().is_success() {
            return Err(ProviderError::BadStatus {
                url,
                status: resp.status().as_u16(),
            });
        }
        resp.json()
            .await
            .map_err(|source| ProviderError::Malformed { url, source })
    }
}

#[async_trait]
impl ResultsProvider for PdgaClient {
    async fn fetch_round(
        &self,
        tourn_id: u32,
        division: Division,
        round: u8,
    ) -> Result<Vec<RawResult>, ProviderError> {
        let url = format!(
            "{}/live_results_fetch_round.php?TournID={tourn_id}&Division={division}&Round={round}",
            self.live_api
        );
        let resp: ApiRes = self.get_json(self.http.get(&url), url.clone()).await?;
        let scores = resp.into_raw_results();
        debug!("Got {} {division} scores from {url}", scores.len());
        Ok(scores)
    }

    async fn competition_info(&self, tourn_id: u32) -> Result<CompetitionInfo, ProviderError> {
        let url = format!(
            "{}/live_results_fetch_event.php?TournID={tourn_id}",
            self.live_api
        );
        let resp: CompetitionInfoResponse = self.get_json(self.http.get(&url), url.clone()).await?;
        Ok(CompetitionInfo::from_api(tourn_id, resp.data))
    }

    async fn lookup_tournament_id(
        &self,
        name: &str,
        year: i32,
    ) -> Result<Option<EventListing>, ProviderError> {
        let start = format!("{year}-01-01");
        let end = format!("{year}-12-31");
        let request = self
            .http
            .get(&self.event_api)
            .query(&[
                ("tier", "ES,NT,M"),
                ("start_date", start.as_str()),
                ("end_date", end.as_str()),
                ("limit", "100"),
            ])
            .header(reqwest::header::COOKIE, "session_name=sessid");
        let events: Vec<EventListing> = self.get_json(request, self.event_api.clone()).await?;
        let found = get_competition::find_event(&events, name).cloned();
        match &found {
            Some(event) => info!("Found: {} -> TournID {}", event.name, event.tournament_id),
            None => info!("No match found for '{name}'"),
        }
        Ok(found)
    }
}
