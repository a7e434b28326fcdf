use super::{schemars, JsonSchema};
use serde::{Deserialize, Serialize};

/// Body of a scoring trigger.
#[derive(Debug, JsonSchema, Serialize, Deserialize, Clone)]
pub struct ScoreRequest {
    /// PDGA tournament id, falls back to the schedule entry
    #[serde(default)]
    pub tourn_id: Option<u32>,
    pub event_name: String,
    /// Live round to score, defaults to the latest round with scores. Ignored for final results
    #[serde(default)]
    pub round: Option<u8>,
    #[serde(default, rename = "final")]
    pub final_results: bool,
    #[serde(default)]
    pub skip_discord: bool,
    #[serde(default)]
    pub skip_sheets: bool,
    /// Run the scoring before responding instead of in the background
    #[serde(default)]
    pub wait: bool,
}

#[derive(Debug, JsonSchema, Serialize, Deserialize, Clone, PartialEq)]
pub struct ScoreResponse {
    pub event_name: String,
    pub tourn_id: u32,
    pub mode: String,
    pub status: String,
    #[serde(default)]
    pub report: Vec<String>,
}
