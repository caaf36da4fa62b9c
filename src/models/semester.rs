use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::models::EntityId;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Semester {
    #[serde(default)]
    pub id: EntityId,
    #[serde(alias = "code")]
    pub semester_code: String,
    #[serde(default)]
    pub academic_year: Option<i32>,
    pub start_date: String,
    pub end_date: String,
}

impl Semester {
    pub fn start(&self) -> Result<NaiveDate, AppError> {
        parse_date(&self.start_date)
    }

    pub fn end(&self) -> Result<NaiveDate, AppError> {
        parse_date(&self.end_date)
    }

    pub fn validate_dates(&self) -> Result<(), AppError> {
        validate_date_range(&self.start_date, &self.end_date)
    }

    /// Inclusive on both ends.
    pub fn contains(&self, date: NaiveDate) -> Result<bool, AppError> {
        Ok(self.start()? <= date && date <= self.end()?)
    }
}

pub fn validate_date_range(start: &str, end: &str) -> Result<(), AppError> {
    let start = parse_date(start)?;
    let end = parse_date(end)?;
    if start >= end {
        return Err(AppError::Validation(
            "Start date must be before end date".to_string(),
        ));
    }
    Ok(())
}

/// Accepts plain dates and the backend's `YYYY-MM-DDThh:mm:ss` timestamps;
/// only the calendar date is kept.
pub fn parse_date(raw: &str) -> Result<NaiveDate, AppError> {
    let date_part = raw.trim().get(..10).unwrap_or(raw.trim());
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d")
        .map_err(|_| AppError::Validation(format!("Invalid date: {}", raw)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn semester(start: &str, end: &str) -> Semester {
        Semester {
            id: EntityId::from(1),
            semester_code: "FALL2025".to_string(),
            academic_year: Some(2025),
            start_date: start.to_string(),
            end_date: end.to_string(),
        }
    }

    #[test]
    fn test_validate_dates() {
        assert!(semester("2025-09-01", "2025-12-20").validate_dates().is_ok());
        assert!(matches!(
            semester("2025-12-20", "2025-09-01").validate_dates(),
            Err(AppError::Validation(_))
        ));
        assert!(semester("2025-09-01", "2025-09-01").validate_dates().is_err());
    }

    #[test]
    fn test_contains_accepts_timestamps() {
        let s = semester("2025-09-01T00:00:00", "2025-12-20T00:00:00");
        let inside = NaiveDate::from_ymd_opt(2025, 12, 20).unwrap();
        let outside = NaiveDate::from_ymd_opt(2026, 1, 5).unwrap();
        assert!(s.contains(inside).unwrap());
        assert!(!s.contains(outside).unwrap());
    }

    #[test]
    fn test_parse_date_rejects_garbage() {
        assert!(parse_date("soon").is_err());
    }
}
