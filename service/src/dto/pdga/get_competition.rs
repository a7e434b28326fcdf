use itertools::Itertools;
use log::warn;
use rocket_okapi::okapi::schemars::{self, JsonSchema};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashMap;

use super::api_player::serde_things::flexible_number;

#[derive(Deserialize, Debug)]
pub(crate) struct CompetitionInfoResponse {
    pub(crate) data: ApiCompetitionInfo,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "PascalCase")]
struct ApiRoundLabelInfo {
    #[serde(rename = "Number", deserialize_with = "flexible_number")]
    round_number: u8,
    #[serde(default)]
    label: String,
}

impl From<&ApiRoundLabelInfo> for RoundLabel {
    fn from(info: &ApiRoundLabelInfo) -> Self {
        let label = info.label.to_lowercase();
        if label.contains("round") {
            RoundLabel::Round(info.round_number)
        } else {
            match label.as_str() {
                "finals" | "final" => RoundLabel::Final,
                "playoff" | "playoffs" => RoundLabel::Playoff,
                _ => {
                    warn!("Unknown round label: {}", label);
                    RoundLabel::Other
                }
            }
        }
    }
}

#[derive(Debug, PartialEq, Clone)]
pub enum RoundLabel {
    Final,
    Playoff,
    Round(u8),
    Other,
}

/// `round_number` is what the live api expects in `Round=`. The number inside a
/// label is arbitrary.
#[derive(Debug, PartialEq, Clone)]
pub struct RoundLabelInfo {
    pub round_number: u8,
    pub label: RoundLabel,
}

impl From<&ApiRoundLabelInfo> for RoundLabelInfo {
    fn from(info: &ApiRoundLabelInfo) -> Self {
        Self {
            round_number: info.round_number,
            label: info.into(),
        }
    }
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct ApiCompetitionInfo {
    #[serde(rename = "SimpleName")]
    name: String,
    #[serde(rename = "RoundsList", default, deserialize_with = "flatten_round_labels")]
    round_labels: Vec<ApiRoundLabelInfo>,
    #[serde(default)]
    highest_completed_round: Option<u8>,
}

fn flatten_round_labels<'de, D>(deserializer: D) -> Result<Vec<ApiRoundLabelInfo>, D::Error>
where
    D: Deserializer<'de>,
{
    let map: HashMap<String, ApiRoundLabelInfo> = Deserialize::deserialize(deserializer)?;
    Ok(map.into_values().collect())
}

#[derive(Debug, PartialEq, Clone)]
pub struct CompetitionInfo {
    pub name: String,
    pub competition_id: u32,
    pub rounds: Vec<RoundLabelInfo>,
    pub highest_completed_round: Option<u8>,
}

impl CompetitionInfo {
    pub(crate) fn from_api(competition_id: u32, info: ApiCompetitionInfo) -> Self {
        let rounds = info
            .round_labels
            .iter()
            .map(RoundLabelInfo::from)
            .sorted_by_key(|r| r.round_number)
            .collect_vec();
        Self {
            name: info.name,
            competition_id,
            rounds,
            highest_completed_round: info.highest_completed_round,
        }
    }

    /// Scoring rounds, latest first. Playoff holes only cover the tied players
    /// so they never stand in for a full round.
    fn scoring_rounds(&self) -> impl Iterator<Item = u8> + '_ {
        self.rounds
            .iter()
            .filter(|r| r.label != RoundLabel::Playoff)
            .map(|r| r.round_number)
            .sorted_by(|a, b| b.cmp(a))
            .dedup()
    }

    /// Rounds to try for final results, latest first.
    pub fn final_round_candidates(&self) -> Vec<u8> {
        self.scoring_rounds().collect_vec()
    }

    /// Rounds to try for live results, latest first. Nothing past the round
    /// after the highest completed one can have started.
    pub fn live_round_candidates(&self) -> Vec<u8> {
        match self.highest_completed_round {
            Some(done) => self
                .scoring_rounds()
                .filter(|&r| r <= done.saturating_add(1))
                .collect_vec(),
            None => self.scoring_rounds().collect_vec(),
        }
    }
}

/// An event from the PDGA event search.
#[derive(Deserialize, Serialize, JsonSchema, Debug, Clone, PartialEq)]
pub struct EventListing {
    #[serde(default)]
    pub name: String,
    #[serde(deserialize_with = "flexible_number")]
    pub tournament_id: u32,
}

/// First event whose name contains `name`, ignoring case.
pub(crate) fn find_event<'a>(events: &'a [EventListing], name: &str) -> Option<&'a EventListing> {
    let name_lower = name.to_lowercase();
    events
        .iter()
        .find(|e| e.name.to_lowercase().contains(&name_lower))
}
