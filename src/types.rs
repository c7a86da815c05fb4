//! Shared types used across modules
//!
//! The record itself plus the small enums that drive sorting.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::str::FromStr;

use crate::error::InputError;

/// One student's name/age/grade tuple
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudentRecord {
    pub name: String,
    pub age: u32,
    pub grade: f64,
}

impl StudentRecord {
    pub fn new(name: impl Into<String>, age: u32, grade: f64) -> Self {
        Self {
            name: name.into(),
            age,
            grade,
        }
    }

    /// Case-insensitive exact name comparison used by update and delete
    pub fn name_matches(&self, target: &str) -> bool {
        self.name.to_lowercase() == target.to_lowercase()
    }
}

/// Format a grade so it survives a write/read cycle and keeps a decimal
/// point for whole numbers (`7.0`, not `7`).
pub fn format_grade(grade: f64) -> String {
    format!("{:?}", grade)
}

/// Field a sorted view is ordered by
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    Name,
    Age,
    Grade,
}

impl SortKey {
    /// Compare two records on this key
    pub fn compare(&self, a: &StudentRecord, b: &StudentRecord) -> Ordering {
        match self {
            SortKey::Name => a.name.cmp(&b.name),
            SortKey::Age => a.age.cmp(&b.age),
            SortKey::Grade => a.grade.total_cmp(&b.grade),
        }
    }
}

impl FromStr for SortKey {
    type Err = InputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "name" => Ok(SortKey::Name),
            "age" => Ok(SortKey::Age),
            "grade" => Ok(SortKey::Grade),
            other => Err(InputError::InvalidSortKey(other.to_string())),
        }
    }
}

/// Direction of a sorted view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Ascending,
    Descending,
}

impl SortOrder {
    /// Only `desc` sorts descending; blank or anything else is ascending
    pub fn from_answer(s: &str) -> Self {
        if s.trim().eq_ignore_ascii_case("desc") {
            SortOrder::Descending
        } else {
            SortOrder::Ascending
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_grade_keeps_decimal_point() {
        assert_eq!(format_grade(7.0), "7.0");
        assert_eq!(format_grade(8.5), "8.5");
        assert_eq!(format_grade(9.25), "9.25");
    }

    #[test]
    fn test_name_matches_ignores_case() {
        let record = StudentRecord::new("Bob", 21, 7.0);
        assert!(record.name_matches("BOB"));
        assert!(record.name_matches("bob"));
        assert!(!record.name_matches("bo"));
    }

    #[test]
    fn test_sort_key_parse() {
        assert_eq!("Name".parse::<SortKey>().unwrap(), SortKey::Name);
        assert_eq!(" age ".parse::<SortKey>().unwrap(), SortKey::Age);
        assert_eq!("GRADE".parse::<SortKey>().unwrap(), SortKey::Grade);
        assert!("height".parse::<SortKey>().is_err());
    }

    #[test]
    fn test_sort_order_only_desc_is_descending() {
        assert_eq!(SortOrder::from_answer(""), SortOrder::Ascending);
        assert_eq!(SortOrder::from_answer("asc"), SortOrder::Ascending);
        assert_eq!(SortOrder::from_answer("DESC"), SortOrder::Descending);
        assert_eq!(SortOrder::from_answer(" desc "), SortOrder::Descending);
        assert_eq!(SortOrder::from_answer("ascending"), SortOrder::Ascending);
        assert_eq!(SortOrder::from_answer("up"), SortOrder::Ascending);
    }
}
