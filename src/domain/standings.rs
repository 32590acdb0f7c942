//! Season standings derived from match results.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::{Match, Team};

/// One row of the standings table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Standing {
    #[schema(example = 1)]
    pub team_id: i64,
    #[schema(example = "Minsk Bisons")]
    pub team_name: String,
    #[schema(example = 12)]
    pub played: u32,
    #[schema(example = 9)]
    pub wins: u32,
    #[schema(example = 3)]
    pub losses: u32,
    #[schema(example = 1010)]
    pub points_for: i64,
    #[schema(example = 950)]
    pub points_against: i64,
}

impl Standing {
    fn new(team_id: i64, team_name: String) -> Self {
        Self {
            team_id,
            team_name,
            played: 0,
            wins: 0,
            losses: 0,
            points_for: 0,
            points_against: 0,
        }
    }

    pub fn point_diff(&self) -> i64 {
        self.points_for - self.points_against
    }

    fn record(&mut self, scored: i32, conceded: i32) {
        self.played += 1;
        self.points_for += i64::from(scored);
        self.points_against += i64::from(conceded);
        if scored > conceded {
            self.wins += 1;
        } else {
            self.losses += 1;
        }
    }
}

/// Build the standings for one season's matches.
///
/// Only decided matches count; level scores (including an unplayed 0-0)
/// are skipped. Every team that appears in a counted match gets a row.
/// Rows are ordered by wins, then point differential, then name.
pub fn compute_standings(teams: &[Team], matches: &[Match]) -> Vec<Standing> {
    let names: HashMap<i64, &str> = teams.iter().map(|t| (t.id, t.name.as_str())).collect();
    let mut table: HashMap<i64, Standing> = HashMap::new();

    for m in matches.iter().filter(|m| m.winner().is_some()) {
        row(&mut table, &names, m.home_team_id).record(m.home_team_score, m.away_team_score);
        row(&mut table, &names, m.away_team_id).record(m.away_team_score, m.home_team_score);
    }

    let mut rows: Vec<Standing> = table.into_values().collect();
    rows.sort_by(|a, b| {
        b.wins
            .cmp(&a.wins)
            .then_with(|| b.point_diff().cmp(&a.point_diff()))
            .then_with(|| a.team_name.cmp(&b.team_name))
    });
    rows
}

fn row<'a>(
    table: &'a mut HashMap<i64, Standing>,
    names: &HashMap<i64, &str>,
    team_id: i64,
) -> &'a mut Standing {
    table.entry(team_id).or_insert_with(|| {
        let name = names
            .get(&team_id)
            .map(|n| n.to_string())
            .unwrap_or_else(|| format!("Team {}", team_id));
        Standing::new(team_id, name)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn team(id: i64, name: &str) -> Team {
        Team {
            id,
            name: name.to_string(),
        }
    }

    fn game(id: i64, home: i64, away: i64, home_score: i32, away_score: i32) -> Match {
        Match {
            id,
            season_id: 1,
            date: NaiveDate::from_ymd_opt(2024, 11, 1).unwrap(),
            home_team_id: home,
            away_team_id: away,
            home_team_score: home_score,
            away_team_score: away_score,
        }
    }

    #[test]
    fn test_wins_and_losses_are_counted() {
        let teams = vec![team(1, "Bisons"), team(2, "Eagles")];
        let matches = vec![game(1, 1, 2, 90, 80), game(2, 2, 1, 70, 75)];

        let table = compute_standings(&teams, &matches);

        assert_eq!(table.len(), 2);
        assert_eq!(table[0].team_name, "Bisons");
        assert_eq!((table[0].wins, table[0].losses), (2, 0));
        assert_eq!((table[0].points_for, table[0].points_against), (165, 150));
        assert_eq!((table[1].wins, table[1].losses), (0, 2));
    }

    #[test]
    fn test_unplayed_matches_are_skipped() {
        let teams = vec![team(1, "Bisons"), team(2, "Eagles")];
        let matches = vec![game(1, 1, 2, 0, 0)];

        assert!(compute_standings(&teams, &matches).is_empty());
    }

    #[test]
    fn test_point_differential_breaks_ties() {
        let teams = vec![team(1, "A"), team(2, "B"), team(3, "C"), team(4, "D")];
        let matches = vec![game(1, 1, 3, 100, 99), game(2, 2, 4, 100, 70)];

        let table = compute_standings(&teams, &matches);

        assert_eq!(table[0].team_id, 2);
        assert_eq!(table[1].team_id, 1);
    }

    #[test]
    fn test_name_breaks_full_ties() {
        let teams = vec![team(1, "Zeta"), team(2, "Alpha")];
        let matches = vec![game(1, 1, 2, 80, 80)];
        assert!(compute_standings(&teams, &matches).is_empty());

        let teams = vec![team(1, "Zeta"), team(2, "Alpha"), team(3, "X"), team(4, "Y")];
        let matches = vec![game(1, 1, 3, 80, 70), game(2, 2, 4, 80, 70)];
        let table = compute_standings(&teams, &matches);
        assert_eq!(table[0].team_name, "Alpha");
        assert_eq!(table[1].team_name, "Zeta");
    }

    #[test]
    fn test_unknown_team_gets_placeholder_name() {
        let matches = vec![game(1, 7, 8, 60, 50)];
        let table = compute_standings(&[], &matches);
        assert_eq!(table[0].team_name, "Team 7");
    }
}
