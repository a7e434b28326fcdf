mod forms;
pub mod pdga;

pub use forms::*;
pub use pdga::{CompetitionInfo, EventListing, PdgaClient, ResultsProvider};

use rocket_okapi::okapi::schemars::{self, JsonSchema};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use strum_macros::{Display, EnumString};

#[derive(
    Serialize,
    Deserialize,
    JsonSchema,
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Display,
    EnumString,
)]
#[strum(ascii_case_insensitive)]
pub enum Division {
    MPO,
    FPO,
}

impl Division {
    pub const ALL: [Division; 2] = [Division::MPO, Division::FPO];
}

/// One player's state in a division, as reported by the results provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResult {
    pub name: String,
    pub first_name: String,
    pub last_name: String,
    /// Running place, always >= 1
    pub place: u16,
    pub to_par: i16,
    /// Cumulative strokes
    pub total: u16,
    pub completed: bool,
}

pub type ResultsByDivision = BTreeMap<Division, Vec<RawResult>>;

#[derive(Serialize, Deserialize, JsonSchema, Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum EventType {
    Individual,
    Full,
}

#[derive(Serialize, Deserialize, JsonSchema, Debug, Clone, Copy, PartialEq, Eq, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Special {
    Double,
    Womens,
}

#[derive(Serialize, Deserialize, JsonSchema, Debug, Clone, PartialEq)]
pub struct Event {
    pub name: String,
    #[serde(default)]
    pub id: Option<u32>,
    #[serde(rename = "type")]
    pub event_type: EventType,
    #[serde(default)]
    pub special: Option<Special>,
    #[serde(default)]
    pub dates: Option<String>,
}

impl Event {
    /// An event that is not on the schedule. It is scored as individual only.
    pub fn unscheduled(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            id: None,
            event_type: EventType::Individual,
            special: None,
            dates: None,
        }
    }

    pub fn is_double(&self) -> bool {
        self.special == Some(Special::Double)
    }

    pub fn has_mini_game(&self) -> bool {
        self.event_type == EventType::Full
    }
}
