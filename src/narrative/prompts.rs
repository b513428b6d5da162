//! Prompt text for the narrative generators.
//!
//! Prompts are plain sections of pre-formatted league data followed by the
//! exact JSON shape the answer must take.

use std::collections::HashMap;

use crate::constants::prompt_limits::{BENCH_PER_ROSTER, MAX_ROSTERS, STARTERS_PER_ROSTER};
use crate::site::{LeagueTarget, MatchupPair};
use crate::sleeper::league::fallback_team_name;
use crate::sleeper::{League, PlayerDirectory};

pub const POWER_RANKINGS_SYSTEM_PROMPT: &str = "You are an expert fantasy football analyst writing weekly power rankings. \
Use the rosters and records you are given together with current NFL context \
(injuries, depth charts, recent usage). Rank every team exactly once. \
Keep summaries short and grounded, and feel free to roast questionable roster decisions. \
Answer with a single JSON object and nothing else.";

pub const MATCHUP_PREDICTIONS_SYSTEM_PROMPT: &str = "You are a sharp, slightly spicy fantasy football analyst. \
Given the week's matchups, team ranks and rosters, predict the winner of every matchup with a punchy reason, \
then pick one 'spicy matchup of the week' where an upset is live. \
Answer with a single JSON object and nothing else.";

const POWER_RANKINGS_SHAPE: &str = r#"{"rankings":[{"roster_id":1,"team_name":"...","rank":1,"summary":"...","analysis":{"key_players":[{"name":"...","note":"..."}],"bench_potential":"...","make_or_break":"..."}}]}"#;

const MATCHUP_PREDICTIONS_SHAPE: &str = r#"{"predictions":[{"home_roster_id":1,"away_roster_id":2,"predicted_winner_roster_id":1,"reasoning":"..."}],"spicy_matchup":{"home_roster_id":1,"away_roster_id":2,"why":"..."}}"#;

fn team_name(names: &HashMap<u32, String>, roster_id: u32) -> String {
    names
        .get(&roster_id)
        .cloned()
        .unwrap_or_else(|| fallback_team_name(roster_id))
}

/// One line per roster: "Name (POS - TEAM), ..." for every rostered player.
fn format_full_rosters(league: &League, directory: &PlayerDirectory) -> String {
    let mut s = String::new();
    for roster in &league.rosters {
        let players: Vec<String> = roster
            .player_ids()
            .iter()
            .map(|id| directory.resolve_or_id(id).label())
            .collect();
        s.push_str(&format!("- roster_id={}: {}\n", roster.roster_id, players.join(", ")));
    }
    s
}

/// Starters first, then the first few bench players, capped per roster.
fn format_lineups(league: &League, directory: &PlayerDirectory) -> String {
    let mut s = String::new();
    for roster in league.rosters.iter().take(MAX_ROSTERS) {
        let starters = roster
            .starter_ids()
            .iter()
            .take(STARTERS_PER_ROSTER)
            .map(|id| format!("STARTER: {}", directory.resolve_or_id(id).label()));
        let bench = roster
            .bench_ids()
            .into_iter()
            .take(BENCH_PER_ROSTER)
            .map(|id| format!("BENCH: {}", directory.resolve_or_id(id).label()));
        let lines: Vec<String> = starters.chain(bench).collect();
        s.push_str(&format!("- roster_id={}: {}\n", roster.roster_id, lines.join(", ")));
    }
    s
}

pub fn build_power_rankings_prompt(
    target: &LeagueTarget,
    league: &League,
    directory: &PlayerDirectory,
) -> String {
    let mut prompt = String::with_capacity(4096);

    prompt.push_str(&format!(
        "## LEAGUE\nSeason: {} Week: {}\n\n",
        target.season, target.week
    ));

    prompt.push_str("## TEAMS (roster_id: owner / team name)\n");
    for team in league.teams() {
        prompt.push_str(&format!(
            "- roster_id={}: {} / {}\n",
            team.roster_id, team.owner_display_name, team.team_name
        ));
    }
    prompt.push('\n');

    prompt.push_str("## RECORDS (wins-losses-ties, points for, points against)\n");
    for roster in &league.rosters {
        let record = roster.record();
        prompt.push_str(&format!(
            "- roster_id={}: {}-{}-{}, PF {:.2}, PA {:.2}\n",
            roster.roster_id,
            record.wins,
            record.losses,
            record.ties,
            record.points_for(),
            record.points_against(),
        ));
    }
    prompt.push('\n');

    prompt.push_str("## ROSTERS (Name (POS - NFL team))\n");
    prompt.push_str(&format_full_rosters(league, directory));
    prompt.push('\n');

    prompt.push_str("## OUTPUT\nRespond with JSON only, in exactly this shape:\n");
    prompt.push_str(POWER_RANKINGS_SHAPE);
    prompt
}

pub fn build_matchup_predictions_prompt(
    target: &LeagueTarget,
    league: &League,
    pairs: &[MatchupPair],
    ranks: &HashMap<u32, u32>,
    directory: &PlayerDirectory,
) -> String {
    let names = league.team_names_by_roster();
    let mut prompt = String::with_capacity(4096);

    prompt.push_str(&format!(
        "## SEASON {} WEEK {}\n\n",
        target.season, target.week
    ));

    prompt.push_str("## RANKS (lower is better)\n");
    let mut ranked: Vec<(u32, Option<u32>)> = league
        .sorted_roster_ids()
        .into_iter()
        .map(|id| (id, ranks.get(&id).copied()))
        .collect();
    ranked.sort_by_key(|(id, rank)| (rank.unwrap_or(u32::MAX), *id));
    for (roster_id, rank) in ranked {
        let rank = rank.map_or_else(|| "unranked".to_string(), |r| r.to_string());
        prompt.push_str(&format!(
            "- roster_id={}: rank={} team={}\n",
            roster_id,
            rank,
            team_name(&names, roster_id)
        ));
    }
    prompt.push('\n');

    prompt.push_str("## MATCHUPS\n");
    for pair in pairs {
        prompt.push_str(&format!(
            "- {} ({}) vs {} ({})\n",
            pair.home_roster_id,
            team_name(&names, pair.home_roster_id),
            pair.away_roster_id,
            team_name(&names, pair.away_roster_id),
        ));
    }
    prompt.push('\n');

    prompt.push_str("## ROSTERS (starters, then notable bench)\n");
    prompt.push_str(&format_lineups(league, directory));
    prompt.push('\n');

    prompt.push_str(
        "## GUIDELINES\n\
         Favor the better rank but allow upsets. Give every matchup a clear reason. \
         The spicy matchup must be one of the matchups above.\n\n",
    );
    prompt.push_str("## OUTPUT\nRespond with JSON only, in exactly this shape:\n");
    prompt.push_str(MATCHUP_PREDICTIONS_SHAPE);
    prompt
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sleeper::league::fixtures::sample_league;
    use crate::sleeper::player_directory::fixtures::sample_directory;

    #[test]
    fn test_power_rankings_prompt_sections() {
        let target = LeagueTarget::new("L1", 2025, 3);
        let prompt = build_power_rankings_prompt(&target, &sample_league(), &sample_directory());
        assert!(prompt.contains("Season: 2025 Week: 3"));
        assert!(prompt.contains("- roster_id=1: alpha / Alpha Dogs"));
        assert!(prompt.contains("- roster_id=2: 2-0-0, PF 190.00, PA 0.00"));
        assert!(prompt.contains("- roster_id=1: Josh Allen (QB - BUF), Puka Nacua (WR - LAR)"));
        assert!(prompt.ends_with(POWER_RANKINGS_SHAPE));
    }

    #[test]
    fn test_matchup_prompt_orders_ranks() {
        let target = LeagueTarget::new("L1", 2025, 3);
        let pairs = vec![MatchupPair {
            home_roster_id: 1,
            away_roster_id: 4,
        }];
        let ranks = HashMap::from([(3, 1), (1, 2)]);
        let prompt =
            build_matchup_predictions_prompt(&target, &sample_league(), &pairs, &ranks, &sample_directory());

        let first = prompt.find("roster_id=3: rank=1").unwrap();
        let second = prompt.find("roster_id=1: rank=2").unwrap();
        let unranked = prompt.find("roster_id=2: rank=unranked").unwrap();
        assert!(first < second && second < unranked);
        assert!(prompt.contains("- 1 (Alpha Dogs) vs 4 (Team 4)"));
        assert!(prompt.contains("STARTER: Josh Allen (QB - BUF), BENCH: Puka Nacua (WR - LAR)"));
    }
}
