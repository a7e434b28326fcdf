use itertools::Itertools;
use serde::Deserialize;
use std::collections::BTreeMap;

use super::TeamResult;
use crate::config::Rules;
use crate::dto::Division;

pub const PENALTY_LABEL: &str = "(penalty)";

/// How teams with equal combined scores are ranked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TieBreak {
    /// Equal scores share the better rank (1, 2, 2, 4), listed in roster order
    #[default]
    Shared,
    /// Rank is the position, equal scores keep roster order
    RosterOrder,
    /// Rank is the position, equal scores ordered by team name
    Alphabetical,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DivisionSubtotal {
    pub score: u32,
    pub players: Vec<String>,
    pub penalized: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MiniGameEntry {
    pub team: String,
    pub combined_score: u32,
    pub subtotals: BTreeMap<Division, DivisionSubtotal>,
    pub rank: usize,
    pub bonus: u32,
}

impl MiniGameEntry {
    pub fn subtotal(&self, division: Division) -> Option<&DivisionSubtotal> {
        self.subtotals.get(&division)
    }
}

/// Sum of the `top_n` lowest totals, or `None` if the team has fewer players.
fn top_n_subtotal(team: &TeamResult, division: Division, top_n: usize) -> Option<(u32, Vec<String>)> {
    let players = team.players(division);
    if players.len() < top_n {
        return None;
    }
    let top = players
        .iter()
        .sorted_by_key(|(_, record)| record.total)
        .take(top_n)
        .collect_vec();
    let score = top.iter().map(|(_, record)| record.total as u32).sum();
    Some((score, top.into_iter().map(|(name, _)| name.clone()).collect_vec()))
}

pub fn bonus_for_rank(rank: usize, rules: &Rules, double: bool) -> u32 {
    let bonus = rank
        .checked_sub(1)
        .and_then(|i| rules.mini_game_bonus.get(i))
        .copied()
        .unwrap_or(0);
    if double {
        bonus * 2
    } else {
        bonus
    }
}

fn subtotals_for_division(teams: &[TeamResult], division: Division, rules: &Rules) -> Vec<DivisionSubtotal> {
    let real = teams
        .iter()
        .map(|team| top_n_subtotal(team, division, rules.top_n))
        .collect_vec();
    let substitute = real
        .iter()
        .flatten()
        .map(|(score, _)| *score)
        .max()
        .map(|worst| worst + rules.weak_roster_penalty)
        .unwrap_or(rules.missing_division_fallback);

    real.into_iter()
        .map(|subtotal| match subtotal {
            Some((score, players)) => DivisionSubtotal {
                score,
                players,
                penalized: false,
            },
            None => DivisionSubtotal {
                score: substitute,
                players: vec![PENALTY_LABEL.to_string()],
                penalized: true,
            },
        })
        .collect_vec()
}

/// Ranks teams on their best `top_n` stroke totals per division. Returned in rank order.
pub fn calculate_mini_game(teams: &[TeamResult], rules: &Rules, double: bool) -> Vec<MiniGameEntry> {
    let mut per_division = Division::ALL
        .iter()
        .map(|&division| (division, subtotals_for_division(teams, division, rules).into_iter()))
        .collect_vec();

    let unranked = teams
        .iter()
        .map(|team| {
            let subtotals: BTreeMap<Division, DivisionSubtotal> = per_division
                .iter_mut()
                .filter_map(|(division, subtotals)| subtotals.next().map(|s| (*division, s)))
                .collect();
            MiniGameEntry {
                team: team.team.clone(),
                combined_score: subtotals.values().map(|s| s.score).sum(),
                subtotals,
                rank: 0,
                bonus: 0,
            }
        })
        .collect_vec();

    // sorts are stable, equal keys stay in roster order
    let ordered = match rules.tie_break {
        TieBreak::Alphabetical => unranked
            .into_iter()
            .sorted_by(|a, b| a.combined_score.cmp(&b.combined_score).then_with(|| a.team.cmp(&b.team)))
            .collect_vec(),
        TieBreak::Shared | TieBreak::RosterOrder => unranked
            .into_iter()
            .sorted_by_key(|e| e.combined_score)
            .collect_vec(),
    };

    let mut ranked: Vec<MiniGameEntry> = Vec::with_capacity(ordered.len());
    for (i, mut entry) in ordered.into_iter().enumerate() {
        entry.rank = match (rules.tie_break, ranked.last()) {
            (TieBreak::Shared, Some(prev)) if prev.combined_score == entry.combined_score => prev.rank,
            _ => i + 1,
        };
        entry.bonus = bonus_for_rank(entry.rank, rules, double);
        ranked.push(entry);
    }
    ranked
}
