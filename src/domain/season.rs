//! Season entity.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::errors::{AppError, AppResult};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Season {
    pub id: i64,
    pub name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl Season {
    /// Whether `date` falls inside the season, both ends inclusive.
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start_date && date <= self.end_date
    }
}

/// Data for creating or replacing a season.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSeason {
    pub name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl NewSeason {
    pub fn validate_dates(&self) -> AppResult<()> {
        if self.end_date < self.start_date {
            return Err(AppError::validation(
                "Season endDate must not be before startDate.",
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SeasonResponse {
    #[schema(example = 1)]
    pub id: i64,
    #[schema(example = "2024/25")]
    pub name: String,
    #[schema(value_type = String, format = Date, example = "2024-10-01")]
    pub start_date: NaiveDate,
    #[schema(value_type = String, format = Date, example = "2025-06-30")]
    pub end_date: NaiveDate,
}

impl From<Season> for SeasonResponse {
    fn from(season: Season) -> Self {
        Self {
            id: season.id,
            name: season.name,
            start_date: season.start_date,
            end_date: season.end_date,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_contains_is_inclusive() {
        let season = Season {
            id: 1,
            name: "2024/25".to_string(),
            start_date: date(2024, 10, 1),
            end_date: date(2025, 6, 30),
        };

        assert!(season.contains(date(2024, 10, 1)));
        assert!(season.contains(date(2025, 6, 30)));
        assert!(!season.contains(date(2024, 9, 30)));
        assert!(!season.contains(date(2025, 7, 1)));
    }

    #[test]
    fn test_end_before_start_rejected() {
        let season = NewSeason {
            name: "Backwards".to_string(),
            start_date: date(2025, 1, 2),
            end_date: date(2025, 1, 1),
        };
        assert!(matches!(season.validate_dates(), Err(AppError::Validation(_))));
    }

    #[test]
    fn test_single_day_season_allowed() {
        let season = NewSeason {
            name: "Cup day".to_string(),
            start_date: date(2025, 1, 1),
            end_date: date(2025, 1, 1),
        };
        assert!(season.validate_dates().is_ok());
    }
}
