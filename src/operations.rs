//! List operations over loaded records
//!
//! Pure functions shared by the interactive menu and the one-shot
//! commands. Nothing here touches the filesystem.

use serde::Serialize;

use crate::types::{SortKey, SortOrder, StudentRecord};

/// Case-insensitive substring search on the name. A blank query matches
/// nothing; callers reject it before getting here.
pub fn search<'a>(records: &'a [StudentRecord], query: &str) -> Vec<&'a StudentRecord> {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return Vec::new();
    }
    records
        .iter()
        .filter(|r| r.name.to_lowercase().contains(&query))
        .collect()
}

/// Index of the first record whose name equals `target`, ignoring case
pub fn find_exact(records: &[StudentRecord], target: &str) -> Option<usize> {
    let target = target.trim();
    records.iter().position(|r| r.name_matches(target))
}

/// Replacement values for an update. `None` keeps the current value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordUpdate {
    pub name: Option<String>,
    pub age: Option<u32>,
    pub grade: Option<f64>,
}

impl RecordUpdate {
    pub fn apply(self, record: &mut StudentRecord) {
        if let Some(name) = self.name {
            record.name = name;
        }
        if let Some(age) = self.age {
            record.age = age;
        }
        if let Some(grade) = self.grade {
            record.grade = grade;
        }
    }
}

/// Update the first exact match. Returns the updated record.
pub fn update_first(
    records: &mut [StudentRecord],
    target: &str,
    update: RecordUpdate,
) -> Option<StudentRecord> {
    let idx = find_exact(records, target)?;
    update.apply(&mut records[idx]);
    Some(records[idx].clone())
}

/// Remove the first exact match and return it
pub fn delete_first(records: &mut Vec<StudentRecord>, target: &str) -> Option<StudentRecord> {
    let idx = find_exact(records, target)?;
    Some(records.remove(idx))
}

/// Stable sort on `key`. Equal records keep file order in both directions.
pub fn sort_records(records: &mut [StudentRecord], key: SortKey, order: SortOrder) {
    match order {
        SortOrder::Ascending => records.sort_by(|a, b| key.compare(a, b)),
        SortOrder::Descending => records.sort_by(|a, b| key.compare(b, a)),
    }
}

/// Aggregate figures over a non-empty record list
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Statistics {
    pub count: usize,
    pub average_age: f64,
    pub average_grade: f64,
    pub top: StudentRecord,
    pub lowest: StudentRecord,
}

/// `None` for an empty list. Ties on top/lowest grade go to the earliest
/// record.
pub fn statistics(records: &[StudentRecord]) -> Option<Statistics> {
    let first = records.first()?;
    let count = records.len();

    let mut top = first;
    let mut lowest = first;
    let mut age_sum = 0u64;
    let mut grade_sum = 0.0;

    for record in records {
        age_sum += u64::from(record.age);
        grade_sum += record.grade;
        if record.grade > top.grade {
            top = record;
        }
        if record.grade < lowest.grade {
            lowest = record;
        }
    }

    Some(Statistics {
        count,
        average_age: age_sum as f64 / count as f64,
        average_grade: grade_sum / count as f64,
        top: top.clone(),
        lowest: lowest.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<StudentRecord> {
        vec![
            StudentRecord::new("Alice", 20, 8.5),
            StudentRecord::new("bob", 21, 7.0),
        ]
    }

    #[test]
    fn test_search_is_case_insensitive_substring() {
        let records = sample();
        let found = search(&records, "A");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name, "Alice");

        let found = search(&records, "O");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name, "bob");

        assert!(search(&records, "zed").is_empty());
        assert!(search(&records, "  ").is_empty());
    }

    #[test]
    fn test_delete_first_exact_match() {
        let mut records = sample();
        let removed = delete_first(&mut records, "BOB").unwrap();
        assert_eq!(removed.name, "bob");
        assert_eq!(records, vec![StudentRecord::new("Alice", 20, 8.5)]);
    }

    #[test]
    fn test_delete_requires_exact_name() {
        let mut records = sample();
        assert!(delete_first(&mut records, "bo").is_none());
        assert_eq!(records.len(), 2);
    }

    #[test]
    fn test_duplicates_only_first_is_affected() {
        let mut records = vec![
            StudentRecord::new("Sam", 18, 6.0),
            StudentRecord::new("sam", 19, 7.0),
        ];

        let update = RecordUpdate {
            grade: Some(9.0),
            ..Default::default()
        };
        let updated = update_first(&mut records, "SAM", update).unwrap();
        assert_eq!(updated, StudentRecord::new("Sam", 18, 9.0));
        assert_eq!(records[1], StudentRecord::new("sam", 19, 7.0));

        delete_first(&mut records, "sam");
        assert_eq!(records, vec![StudentRecord::new("sam", 19, 7.0)]);
    }

    #[test]
    fn test_update_keeps_unspecified_fields() {
        let mut records = sample();
        let update = RecordUpdate {
            name: Some("Alicia".into()),
            ..Default::default()
        };
        update_first(&mut records, "alice", update).unwrap();
        assert_eq!(records[0], StudentRecord::new("Alicia", 20, 8.5));
    }

    #[test]
    fn test_update_missing_name() {
        let mut records = sample();
        assert!(update_first(&mut records, "Zed", RecordUpdate::default()).is_none());
        assert_eq!(records, sample());
    }

    #[test]
    fn test_sort_by_each_key() {
        let mut records = vec![
            StudentRecord::new("Carol", 19, 9.0),
            StudentRecord::new("Alice", 20, 8.5),
            StudentRecord::new("Bob", 21, 7.0),
        ];

        sort_records(&mut records, SortKey::Name, SortOrder::Ascending);
        let names: Vec<_> = records.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, ["Alice", "Bob", "Carol"]);

        sort_records(&mut records, SortKey::Age, SortOrder::Descending);
        let ages: Vec<_> = records.iter().map(|r| r.age).collect();
        assert_eq!(ages, [21, 20, 19]);

        sort_records(&mut records, SortKey::Grade, SortOrder::Ascending);
        let grades: Vec<_> = records.iter().map(|r| r.grade).collect();
        assert_eq!(grades, [7.0, 8.5, 9.0]);
    }

    #[test]
    fn test_sort_is_stable_descending() {
        let mut records = vec![
            StudentRecord::new("First", 20, 8.0),
            StudentRecord::new("Low", 18, 5.0),
            StudentRecord::new("Second", 21, 8.0),
        ];
        sort_records(&mut records, SortKey::Grade, SortOrder::Descending);
        let names: Vec<_> = records.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, ["First", "Second", "Low"]);
    }

    #[test]
    fn test_name_sort_is_case_sensitive() {
        let mut records = vec![
            StudentRecord::new("bob", 21, 7.0),
            StudentRecord::new("Alice", 20, 8.5),
            StudentRecord::new("Carl", 22, 6.0),
        ];
        sort_records(&mut records, SortKey::Name, SortOrder::Ascending);
        let names: Vec<_> = records.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, ["Alice", "Carl", "bob"]);
    }

    #[test]
    fn test_statistics() {
        let records = vec![
            StudentRecord::new("Alice", 20, 8.5),
            StudentRecord::new("bob", 21, 7.0),
            StudentRecord::new("Carol", 22, 8.5),
        ];
        let stats = statistics(&records).unwrap();
        assert_eq!(stats.count, 3);
        assert!((stats.average_age - 21.0).abs() < 1e-9);
        assert!((stats.average_grade - 8.0).abs() < 1e-9);
        // Tie on 8.5 goes to the first record
        assert_eq!(stats.top.name, "Alice");
        assert_eq!(stats.lowest.name, "bob");
    }

    #[test]
    fn test_statistics_empty() {
        assert!(statistics(&[]).is_none());
    }
}
