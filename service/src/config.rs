// League configuration: roster, schedule and rule constants from a TOML file,
// credentials from the environment.

use itertools::Itertools;
use log::warn;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::dto::{Division, Event};
use crate::error::ConfigError;
use crate::scoring::TieBreak;

pub const DEFAULT_CONFIG_PATH: &str = "config/league.toml";

#[derive(Debug, Clone, Deserialize)]
pub struct LeagueConfig {
    pub teams: Vec<TeamRoster>,
    #[serde(default)]
    pub schedule: Vec<Event>,
    #[serde(default)]
    pub rules: Rules,
    #[serde(default)]
    pub sheets: SheetLayout,
}

/// One fantasy team. Team order in the file is the spreadsheet column order.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct TeamRoster {
    pub name: String,
    #[serde(default)]
    pub players: BTreeMap<Division, Vec<String>>,
}

impl TeamRoster {
    pub fn players_in(&self, division: Division) -> &[String] {
        self.players.get(&division).map(Vec::as_slice).unwrap_or_default()
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct Rules {
    /// Bonus by mini-game rank, index 0 is rank 1. Ranks past the end get 0.
    pub mini_game_bonus: Vec<u32>,
    /// Players per division counted in the mini-game
    pub top_n: usize,
    /// Strokes added to the worst real subtotal for a short roster
    pub weak_roster_penalty: u32,
    /// Subtotal used when no team has a real subtotal in a division
    pub missing_division_fallback: u32,
    pub tie_break: TieBreak,
}

impl Default for Rules {
    fn default() -> Self {
        Self {
            mini_game_bonus: vec![10, 7, 5, 3],
            top_n: 3,
            weak_roster_penalty: 3,
            missing_division_fallback: 999,
            tie_break: TieBreak::default(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct SheetLayout {
    pub worksheet: String,
    /// Column of the first team, the rest follow in roster order
    pub first_team_column: char,
}

impl Default for SheetLayout {
    fn default() -> Self {
        Self {
            worksheet: "SEASON SCORE".to_string(),
            first_team_column: 'B',
        }
    }
}

impl LeagueConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ConfigError::FileNotFound {
                path: path.to_path_buf(),
            });
        }
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&contents)
    }

    /// Reads `.env`, then loads the file named by `LEAGUE_CONFIG` or the default path.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        let path = std::env::var("LEAGUE_CONFIG")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_CONFIG_PATH));
        Self::load(path)
    }

    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(contents).map_err(|source| ConfigError::ParseError { source })?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.teams.is_empty() {
            return Err(ConfigError::invalid("teams", "at least one team is required"));
        }
        if let Some(name) = self.teams.iter().map(|t| &t.name).duplicates().next() {
            return Err(ConfigError::invalid("teams", format!("duplicate team `{name}`")));
        }
        for team in &self.teams {
            if team.name.trim().is_empty() {
                return Err(ConfigError::invalid("teams.name", "team name is empty"));
            }
            if team.players.values().flatten().any(|p| p.trim().is_empty()) {
                return Err(ConfigError::invalid(
                    "teams.players",
                    format!("team `{}` has an empty player name", team.name),
                ));
            }
        }
        if let Some(name) = self.schedule.iter().map(|e| e.name.to_lowercase()).duplicates().next() {
            return Err(ConfigError::invalid("schedule", format!("duplicate event `{name}`")));
        }
        if self.rules.top_n == 0 {
            return Err(ConfigError::invalid("rules.top_n", "must be at least 1"));
        }
        if !self.sheets.first_team_column.is_ascii_uppercase() {
            return Err(ConfigError::invalid("sheets.first_team_column", "must be a letter A-Z"));
        }
        let last = self.sheets.first_team_column as usize - 'A' as usize + self.teams.len();
        if last > 26 {
            warn!("Team columns run past Z, the sheet update will be skipped");
        }
        Ok(())
    }

    pub fn team_names(&self) -> Vec<&str> {
        self.teams.iter().map(|t| t.name.as_str()).collect_vec()
    }

    /// Schedule entry by name, ignoring case.
    pub fn event(&self, name: &str) -> Option<&Event> {
        let name = name.trim().to_lowercase();
        self.schedule.iter().find(|e| e.name.to_lowercase() == name)
    }
}

/// Secrets for the publishing side, all optional.
#[derive(Debug, Clone, Default)]
pub struct Credentials {
    pub discord_webhook: Option<String>,
    pub sheets_id: Option<String>,
    pub sheets_token: Option<String>,
}

impl Credentials {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        let var = |key: &str| std::env::var(key).ok().filter(|v| !v.trim().is_empty());
        Self {
            discord_webhook: var("DISCORD_WEBHOOK"),
            sheets_id: var("GOOGLE_SHEETS_ID"),
            sheets_token: var("GOOGLE_SHEETS_TOKEN"),
        }
    }
}
