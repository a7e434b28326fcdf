pub mod matcher;
pub mod mini_game;
pub mod placement;

pub use matcher::{ExactMatch, FuzzyMatch, MatchStrategy};
pub use mini_game::{calculate_mini_game, DivisionSubtotal, MiniGameEntry, TieBreak};
pub use placement::placement_points;

use log::debug;
use std::collections::BTreeMap;

use crate::config::LeagueConfig;
use crate::dto::{Division, Event, RawResult, ResultsByDivision};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayerRecord {
    pub place: u16,
    pub to_par: i16,
    pub total: u16,
    pub points: u8,
    pub completed: bool,
}

impl PlayerRecord {
    pub fn from_result(result: &RawResult, division: Division) -> Self {
        Self {
            place: result.place,
            to_par: result.to_par,
            total: result.total,
            points: placement_points(result.place, division),
            completed: result.completed,
        }
    }
}

/// A team's matched players per division, in roster order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeamResult {
    pub team: String,
    divisions: BTreeMap<Division, Vec<(String, PlayerRecord)>>,
    total_placement_points: u32,
}

impl TeamResult {
    pub fn new(team: impl Into<String>) -> Self {
        Self {
            team: team.into(),
            divisions: BTreeMap::new(),
            total_placement_points: 0,
        }
    }

    fn insert(&mut self, division: Division, player: String, record: PlayerRecord) {
        self.total_placement_points += record.points as u32;
        self.divisions.entry(division).or_default().push((player, record));
    }

    pub fn players(&self, division: Division) -> &[(String, PlayerRecord)] {
        self.divisions.get(&division).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn get(&self, division: Division, player: &str) -> Option<&PlayerRecord> {
        self.players(division)
            .iter()
            .find(|(name, _)| name == player)
            .map(|(_, record)| record)
    }

    pub fn total_placement_points(&self) -> u32 {
        self.total_placement_points
    }

    pub fn matched_players(&self) -> usize {
        self.divisions.values().map(Vec::len).sum()
    }
}

/// Everything one run produces.
#[derive(Debug, Clone, PartialEq)]
pub struct Standings {
    pub event: Event,
    pub is_live: bool,
    /// Roster order
    pub teams: Vec<TeamResult>,
    /// Rank order, `None` when the event has no mini-game
    pub mini_game: Option<Vec<MiniGameEntry>>,
    /// Players per division counted in the mini-game
    pub top_n: usize,
}

impl Standings {
    pub fn mini_game_entry(&self, team: &str) -> Option<&MiniGameEntry> {
        self.mini_game.as_ref()?.iter().find(|e| e.team == team)
    }
}

pub fn calculate_individual_points(
    config: &LeagueConfig,
    results: &ResultsByDivision,
    strategy: &dyn MatchStrategy,
) -> Vec<TeamResult> {
    config
        .teams
        .iter()
        .map(|roster| {
            let mut team = TeamResult::new(roster.name.clone());
            for division in Division::ALL {
                let scores = results.get(&division).map(Vec::as_slice).unwrap_or_default();
                for player in roster.players_in(division) {
                    match strategy.find(player, scores) {
                        Some(result) => {
                            team.insert(division, player.clone(), PlayerRecord::from_result(result, division))
                        }
                        None => debug!("{player} ({division}, {}) not in the field", roster.name),
                    }
                }
            }
            team
        })
        .collect()
}

pub fn score_event(
    config: &LeagueConfig,
    event: &Event,
    results: &ResultsByDivision,
    is_live: bool,
    strategy: &dyn MatchStrategy,
) -> Standings {
    let teams = calculate_individual_points(config, results, strategy);
    let mini_game = event
        .has_mini_game()
        .then(|| calculate_mini_game(&teams, &config.rules, event.is_double()));
    Standings {
        event: event.clone(),
        is_live,
        teams,
        mini_game,
        top_n: config.rules.top_n,
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::dto::{EventType, Special};

    pub(crate) fn raw(name: &str, place: u16, to_par: i16, total: u16) -> RawResult {
        let (first, last) = name.split_once(' ').unwrap_or((name, ""));
        RawResult {
            name: name.to_string(),
            first_name: first.to_string(),
            last_name: last.to_string(),
            place,
            to_par,
            total,
            completed: true,
        }
    }

    pub(crate) fn league() -> LeagueConfig {
        LeagueConfig::from_toml_str(
            r#"
[[teams]]
name = "Scoober Steves"
[teams.players]
MPO = ["Gannon Buhr", "Ricky Wysocki", "Chris Dickerson"]
FPO = ["Evelina Salonen", "Cat Allen"]

[[teams]]
name = "Neil's Nukes"
[teams.players]
MPO = ["Paul McBeth", "Simon Lizotte", "Austin Turner"]
FPO = ["Kat Mertsch", "Sofia Donnecke", "Anneli Tougjas Manniste"]
"#,
        )
        .unwrap()
    }

    pub(crate) fn results() -> ResultsByDivision {
        BTreeMap::from([
            (
                Division::MPO,
                vec![
                    raw("Gannon Buhr", 1, -20, 180),
                    raw("Paul McBeth", 2, -18, 182),
                    raw("Simon Lizotte", 5, -15, 185),
                    raw("Ricky Wysocki", 9, -12, 188),
                    raw("Chris Dickerson", 17, -8, 192),
                    raw("Austin Turner", 30, -2, 198),
                ],
            ),
            (
                Division::FPO,
                vec![
                    raw("Kat Mertsch", 1, -10, 190),
                    raw("Evelina Salonen", 4, -7, 193),
                    raw("Sofia Donnecke", 13, 0, 200),
                    raw("Anneli Tougjas", 12, -1, 199),
                ],
            ),
        ])
    }

    fn event(event_type: EventType, special: Option<Special>) -> Event {
        Event {
            name: "Test Open".to_string(),
            id: Some(1),
            event_type,
            special,
            dates: None,
        }
    }

    #[test]
    fn alice_wins() {
        let config = LeagueConfig::from_toml_str(
            r#"
[[teams]]
name = "A Team"
[teams.players]
MPO = ["Alice A"]
"#,
        )
        .unwrap();
        let results = BTreeMap::from([(Division::MPO, vec![raw("Alice A", 1, -5, 54)])]);
        let teams = calculate_individual_points(&config, &results, &FuzzyMatch);
        let record = teams[0].get(Division::MPO, "Alice A").unwrap();
        assert_eq!(record.place, 1);
        assert_eq!(record.points, 7);
    }

    #[test]
    fn records_and_totals() {
        let teams = calculate_individual_points(&league(), &results(), &FuzzyMatch);
        assert_eq!(teams[0].team, "Scoober Steves");
        // Buhr 7, Wysocki 1, Dickerson 0, Salonen 2, Allen missing
        assert_eq!(teams[0].total_placement_points(), 10);
        assert_eq!(teams[0].matched_players(), 4);
        assert!(teams[0].get(Division::FPO, "Cat Allen").is_none());

        // McBeth 4, Lizotte 2, Turner 0, Mertsch 7, Donnecke 0, Tougjas Manniste 1
        assert_eq!(teams[1].total_placement_points(), 14);
        assert_eq!(teams[1].get(Division::FPO, "Anneli Tougjas Manniste").unwrap().place, 12);
        assert_eq!(teams[1].get(Division::FPO, "Sofia Donnecke").unwrap().points, 0);
    }

    #[test]
    fn total_equals_sum_of_records() {
        let teams = calculate_individual_points(&league(), &results(), &FuzzyMatch);
        for team in &teams {
            let sum: u32 = Division::ALL
                .iter()
                .flat_map(|d| team.players(*d))
                .map(|(_, r)| r.points as u32)
                .sum();
            assert_eq!(sum, team.total_placement_points());
        }
    }

    #[test]
    fn matching_is_idempotent() {
        let first = calculate_individual_points(&league(), &results(), &FuzzyMatch);
        let second = calculate_individual_points(&league(), &results(), &FuzzyMatch);
        assert_eq!(first, second);
    }

    #[test]
    fn strategy_is_pluggable() {
        let teams = calculate_individual_points(&league(), &results(), &ExactMatch);
        assert!(teams[1].get(Division::FPO, "Anneli Tougjas Manniste").is_none());
        assert_eq!(teams[1].total_placement_points(), 13);
    }

    #[test]
    fn empty_results_score_nothing() {
        let teams = calculate_individual_points(&league(), &ResultsByDivision::new(), &FuzzyMatch);
        assert!(teams.iter().all(|t| t.total_placement_points() == 0 && t.matched_players() == 0));
    }

    #[test]
    fn individual_event_has_no_mini_game() {
        let standings = score_event(
            &league(),
            &event(EventType::Individual, Some(Special::Double)),
            &results(),
            true,
            &FuzzyMatch,
        );
        assert!(standings.mini_game.is_none());
        assert!(standings.mini_game_entry("Sage").is_none());
    }

    #[test]
    fn full_event_runs_mini_game() {
        let standings = score_event(
            &league(),
            &event(EventType::Full, Some(Special::Double)),
            &results(),
            false,
            &FuzzyMatch,
        );
        let mini_game = standings.mini_game.as_ref().unwrap();
        assert_eq!(mini_game.len(), 2);
        // Steves: MPO 180+188+192, FPO short so 589 + 3. Nukes: MPO 182+185+198, FPO 190+200+199
        let steves = standings.mini_game_entry("Scoober Steves").unwrap();
        assert_eq!(steves.combined_score, 560 + 592);
        assert_eq!(steves.rank, 1);
        assert_eq!(steves.bonus, 20);
        let nukes = standings.mini_game_entry("Neil's Nukes").unwrap();
        assert_eq!(nukes.combined_score, 565 + 589);
        assert_eq!(nukes.rank, 2);
        assert_eq!(nukes.bonus, 14);
    }
}
