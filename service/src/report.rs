//! Text rendering of [`Standings`] for the chat channel and the terminal, and
//! the numeric row written to the season sheet.

use chrono::NaiveDateTime;
use itertools::Itertools;

use crate::dto::Division;
use crate::scoring::{MiniGameEntry, Standings, TeamResult};

pub fn format_score(to_par: i16) -> String {
    match to_par {
        0 => "E".to_string(),
        n if n > 0 => format!("+{n}"),
        n => n.to_string(),
    }
}

fn status(standings: &Standings) -> &'static str {
    if standings.is_live {
        "🔴 LIVE"
    } else {
        "✅ FINAL"
    }
}

fn rank_marker(rank: usize) -> String {
    match rank {
        1 => "🥇".to_string(),
        2 => "🥈".to_string(),
        3 => "🥉".to_string(),
        n => format!("#{n}"),
    }
}

/// Highest placement total first, equal totals keep roster order.
fn by_placement_points(standings: &Standings) -> Vec<&TeamResult> {
    standings
        .teams
        .iter()
        .sorted_by(|a, b| b.total_placement_points().cmp(&a.total_placement_points()))
        .collect_vec()
}

fn notable_players(team: &TeamResult) -> String {
    let notables = Division::ALL
        .iter()
        .flat_map(|&division| team.players(division))
        .filter(|(_, record)| record.points > 0)
        .map(|(player, record)| {
            format!(
                "{player} (#{}, {}, +{}pts)",
                record.place,
                format_score(record.to_par),
                record.points
            )
        })
        .collect_vec();
    if notables.is_empty() {
        "no points yet".to_string()
    } else {
        notables.join(", ")
    }
}

fn mini_game_line(entry: &MiniGameEntry) -> String {
    let divisions = Division::ALL
        .iter()
        .filter_map(|&division| {
            entry
                .subtotal(division)
                .map(|s| format!("{division}: {} [{}]", s.score, s.players.join(", ")))
        })
        .join(" | ");
    format!(
        "{} **{}** - {} total ({divisions}) → **{} pts**",
        rank_marker(entry.rank),
        entry.team,
        entry.combined_score,
        entry.bonus
    )
}

/// Chat message lines: header, placement leaderboard, mini-game leaderboard
/// when the event has one, and the update time.
pub fn build_report(standings: &Standings, updated: NaiveDateTime) -> Vec<String> {
    let mut lines = vec![
        format!(
            "## 🥏 Fantasy Disc Golf - {} ({})",
            standings.event.name,
            status(standings)
        ),
        String::new(),
        "### 📊 Individual Placement Points".to_string(),
    ];

    lines.extend(by_placement_points(standings).into_iter().map(|team| {
        format!(
            "**{}**: {} pts - {}",
            team.team,
            team.total_placement_points(),
            notable_players(team)
        )
    }));

    if let Some(mini_game) = &standings.mini_game {
        lines.push(String::new());
        lines.push(format!(
            "### 🏆 Team Mini-Game (Top {n} {} + Top {n} {})",
            Division::MPO,
            Division::FPO,
            n = standings.top_n
        ));
        lines.extend(
            mini_game
                .iter()
                .sorted_by_key(|e| e.rank)
                .map(mini_game_line),
        );
    }

    lines.push(String::new());
    lines.push(format!("_Updated: {}_", updated.format("%b %d %I:%M %p")));
    lines
}

pub fn render(lines: &[String]) -> String {
    lines.join("\n")
}

/// Longer per-player listing for the terminal.
pub fn terminal_summary(standings: &Standings) -> Vec<String> {
    let mut lines = vec![
        "=".repeat(60),
        format!("  {} - FANTASY RESULTS", standings.event.name.to_uppercase()),
        "=".repeat(60),
        "📍 Individual Placement Points:".to_string(),
    ];
    for team in by_placement_points(standings) {
        lines.push(format!("  {}: {} pts", team.team, team.total_placement_points()));
        for division in Division::ALL {
            for (player, record) in team.players(division).iter().sorted_by_key(|(_, r)| r.place) {
                let flag = if record.completed { "✓" } else { "~" };
                lines.push(format!(
                    "    {flag} [{division}] {player}: #{} ({}) → {} pts",
                    record.place,
                    format_score(record.to_par),
                    record.points
                ));
            }
        }
    }
    if let Some(mini_game) = &standings.mini_game {
        lines.push("🏆 Team Mini-Game:".to_string());
        for entry in mini_game.iter().sorted_by_key(|e| e.rank) {
            lines.push(format!(
                "  #{} {}: {} combined → {} pts",
                entry.rank, entry.team, entry.combined_score, entry.bonus
            ));
        }
    }
    lines
}

/// Placement points plus mini-game bonus per team, in roster order.
pub fn sheet_row(standings: &Standings) -> Vec<u32> {
    standings
        .teams
        .iter()
        .map(|team| {
            team.total_placement_points()
                + standings
                    .mini_game_entry(&team.team)
                    .map(|e| e.bonus)
                    .unwrap_or(0)
        })
        .collect_vec()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dto::{Event, EventType};
    use crate::scoring::tests::{league, results};
    use crate::scoring::{score_event, FuzzyMatch};
    use chrono::NaiveDate;

    fn updated() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 3, 1)
            .unwrap()
            .and_hms_opt(18, 5, 0)
            .unwrap()
    }

    fn standings(event_type: EventType, is_live: bool) -> Standings {
        let event = Event {
            name: "Supreme Flight Open".to_string(),
            id: Some(101154),
            event_type,
            special: None,
            dates: None,
        };
        score_event(&league(), &event, &results(), is_live, &FuzzyMatch)
    }

    #[test]
    fn to_par_formatting() {
        assert_eq!(format_score(0), "E");
        assert_eq!(format_score(3), "+3");
        assert_eq!(format_score(-12), "-12");
    }

    #[test]
    fn individual_report() {
        let lines = build_report(&standings(EventType::Individual, true), updated());
        assert_eq!(lines[0], "## 🥏 Fantasy Disc Golf - Supreme Flight Open (🔴 LIVE)");
        assert_eq!(lines[2], "### 📊 Individual Placement Points");
        assert_eq!(
            lines[3],
            "**Neil's Nukes**: 14 pts - Paul McBeth (#2, -18, +4pts), Simon Lizotte (#5, -15, +2pts), \
             Kat Mertsch (#1, -10, +7pts), Anneli Tougjas Manniste (#12, -1, +1pts)"
        );
        assert_eq!(
            lines[4],
            "**Scoober Steves**: 10 pts - Gannon Buhr (#1, -20, +7pts), Ricky Wysocki (#9, -12, +1pts), \
             Evelina Salonen (#4, -7, +2pts)"
        );
        assert!(!lines.iter().any(|l| l.contains("Mini-Game")));
        assert_eq!(lines.last().unwrap(), "_Updated: Mar 01 06:05 PM_");
    }

    #[test]
    fn full_report_lists_mini_game_by_rank() {
        let lines = build_report(&standings(EventType::Full, false), updated());
        assert!(lines[0].ends_with("(✅ FINAL)"));
        let heading = lines.iter().position(|l| l.starts_with("### 🏆")).unwrap();
        assert_eq!(lines[heading], "### 🏆 Team Mini-Game (Top 3 MPO + Top 3 FPO)");
        assert_eq!(
            lines[heading + 1],
            "🥇 **Scoober Steves** - 1152 total (MPO: 560 [Gannon Buhr, Ricky Wysocki, Chris Dickerson] | \
             FPO: 592 [(penalty)]) → **10 pts**"
        );
        assert!(lines[heading + 2].starts_with("🥈 **Neil's Nukes** - 1154 total"));
    }

    #[test]
    fn mini_game_heading_follows_top_n() {
        let mut config = league();
        config.rules.top_n = 2;
        let event = Event {
            name: "European Open".to_string(),
            id: Some(88276),
            event_type: EventType::Full,
            special: None,
            dates: None,
        };
        let lines = build_report(&score_event(&config, &event, &results(), false, &FuzzyMatch), updated());
        assert!(lines.contains(&"### 🏆 Team Mini-Game (Top 2 MPO + Top 2 FPO)".to_string()));
    }

    #[test]
    fn team_without_points() {
        let mut standings = standings(EventType::Individual, true);
        standings.teams[0] = TeamResult::new("Sage");
        let lines = build_report(&standings, updated());
        assert!(lines.contains(&"**Sage**: 0 pts - no points yet".to_string()));
    }

    #[test]
    fn summary_sorts_players_by_place() {
        let lines = terminal_summary(&standings(EventType::Full, false));
        assert_eq!(lines[1], "  SUPREME FLIGHT OPEN - FANTASY RESULTS");
        let nukes = lines.iter().position(|l| l == "  Neil's Nukes: 14 pts").unwrap();
        assert_eq!(lines[nukes + 1], "    ✓ [MPO] Paul McBeth: #2 (-18) → 4 pts");
        assert_eq!(lines[nukes + 4], "    ✓ [FPO] Kat Mertsch: #1 (-10) → 7 pts");
        assert_eq!(lines[nukes + 5], "    ✓ [FPO] Anneli Tougjas Manniste: #12 (-1) → 1 pts");
        assert!(lines.contains(&"  #1 Scoober Steves: 1152 combined → 10 pts".to_string()));
    }

    #[test]
    fn row_adds_bonus_in_roster_order() {
        assert_eq!(sheet_row(&standings(EventType::Individual, false)), vec![10, 14]);
        assert_eq!(sheet_row(&standings(EventType::Full, false)), vec![20, 21]);
    }
}
