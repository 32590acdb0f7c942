//! Match entity: one game between two teams within a season.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::Season;
use crate::errors::{AppError, AppResult};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Match {
    pub id: i64,
    pub season_id: i64,
    pub date: NaiveDate,
    pub home_team_id: i64,
    pub away_team_id: i64,
    pub home_team_score: i32,
    pub away_team_score: i32,
}

impl Match {
    /// Id of the team that won, `None` while scores are level.
    pub fn winner(&self) -> Option<i64> {
        use std::cmp::Ordering;

        match self.home_team_score.cmp(&self.away_team_score) {
            Ordering::Greater => Some(self.home_team_id),
            Ordering::Less => Some(self.away_team_id),
            Ordering::Equal => None,
        }
    }
}

/// Data for creating or replacing a match. Missing scores become 0.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMatch {
    pub season_id: i64,
    pub date: NaiveDate,
    pub home_team_id: i64,
    pub away_team_id: i64,
    pub home_team_score: Option<i32>,
    pub away_team_score: Option<i32>,
}

impl NewMatch {
    /// Check the rules that only need the resolved season.
    pub fn validate_against(&self, season: &Season) -> AppResult<()> {
        validate_teams(self.home_team_id, self.away_team_id)?;
        if !season.contains(self.date) {
            return Err(AppError::validation(
                "Match date must be within the season dates.",
            ));
        }
        validate_scores(self.home_score(), self.away_score())
    }

    pub fn home_score(&self) -> i32 {
        self.home_team_score.unwrap_or(0)
    }

    pub fn away_score(&self) -> i32 {
        self.away_team_score.unwrap_or(0)
    }
}

pub fn validate_teams(home_team_id: i64, away_team_id: i64) -> AppResult<()> {
    if home_team_id == away_team_id {
        return Err(AppError::validation("Home and away teams must be different."));
    }
    Ok(())
}

pub fn validate_scores(home_score: i32, away_score: i32) -> AppResult<()> {
    if home_score < 0 || away_score < 0 {
        return Err(AppError::validation("Scores must not be negative."));
    }
    Ok(())
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MatchResponse {
    #[schema(example = 10)]
    pub id: i64,
    #[schema(example = 1)]
    pub season_id: i64,
    #[schema(value_type = String, format = Date, example = "2024-11-02")]
    pub date: NaiveDate,
    #[schema(example = 1)]
    pub home_team_id: i64,
    #[schema(example = 2)]
    pub away_team_id: i64,
    #[schema(example = 88)]
    pub home_team_score: i32,
    #[schema(example = 84)]
    pub away_team_score: i32,
}

impl From<Match> for MatchResponse {
    fn from(m: Match) -> Self {
        Self {
            id: m.id,
            season_id: m.season_id,
            date: m.date,
            home_team_id: m.home_team_id,
            away_team_id: m.away_team_id,
            home_team_score: m.home_team_score,
            away_team_score: m.away_team_score,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn season() -> Season {
        Season {
            id: 1,
            name: "2024/25".to_string(),
            start_date: date(2024, 10, 1),
            end_date: date(2025, 6, 30),
        }
    }

    fn new_match(home: i64, away: i64, on: NaiveDate) -> NewMatch {
        NewMatch {
            season_id: 1,
            date: on,
            home_team_id: home,
            away_team_id: away,
            home_team_score: None,
            away_team_score: None,
        }
    }

    #[test]
    fn test_same_team_rejected() {
        let err = new_match(3, 3, date(2024, 11, 1))
            .validate_against(&season())
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(ref m) if m.contains("different")));
    }

    #[test]
    fn test_date_outside_season_rejected() {
        let err = new_match(1, 2, date(2025, 7, 1))
            .validate_against(&season())
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(ref m) if m.contains("within the season")));
    }

    #[test]
    fn test_negative_score_rejected() {
        let mut m = new_match(1, 2, date(2024, 11, 1));
        m.away_team_score = Some(-1);
        assert!(m.validate_against(&season()).is_err());
    }

    #[test]
    fn test_missing_scores_default_to_zero() {
        let m = new_match(1, 2, date(2024, 11, 1));
        assert!(m.validate_against(&season()).is_ok());
        assert_eq!((m.home_score(), m.away_score()), (0, 0));
    }

    #[test]
    fn test_winner() {
        let mut m = Match {
            id: 1,
            season_id: 1,
            date: date(2024, 11, 1),
            home_team_id: 1,
            away_team_id: 2,
            home_team_score: 90,
            away_team_score: 80,
        };
        assert_eq!(m.winner(), Some(1));
        m.away_team_score = 95;
        assert_eq!(m.winner(), Some(2));
        m.away_team_score = 90;
        assert_eq!(m.winner(), None);
    }
}
