//! Integrity Checker
//!
//! Decides whether a career or category may be deleted. References are by
//! name, compared case-insensitively. Callers reload the dependent stores
//! from disk before asking, since another process may have written them.

use crate::error::{RecordsError, RecordsResult};
use crate::types::{names_match, Career, Category, Student};

/// Students enrolled in `career`
pub fn career_dependents<'a>(career: &Career, students: &'a [Student]) -> Vec<&'a Student> {
    students
        .iter()
        .filter(|s| names_match(&s.career, &career.name))
        .collect()
}

/// Careers filed under `category`
pub fn category_dependents<'a>(category: &Category, careers: &'a [Career]) -> Vec<&'a Career> {
    careers
        .iter()
        .filter(|c| {
            c.category
                .as_deref()
                .is_some_and(|name| names_match(name, &category.name))
        })
        .collect()
}

/// Fails with `Blocked` while any student references `career`
pub fn ensure_career_deletable(career: &Career, students: &[Student]) -> RecordsResult<()> {
    let dependents = career_dependents(career, students);
    if dependents.is_empty() {
        return Ok(());
    }

    log::warn!(
        "[integrity] Refusing to delete career '{}': {} student(s) enrolled",
        career.name,
        dependents.len()
    );
    Err(RecordsError::Blocked(format!(
        "Cannot delete career '{}': {} student(s) are still enrolled in it.",
        career.name,
        dependents.len()
    )))
}

/// Fails with `Blocked` while any career references `category`
pub fn ensure_category_deletable(category: &Category, careers: &[Career]) -> RecordsResult<()> {
    let dependents = category_dependents(category, careers);
    if dependents.is_empty() {
        return Ok(());
    }

    log::warn!(
        "[integrity] Refusing to delete category '{}': {} career(s) reference it",
        category.name,
        dependents.len()
    );
    Err(RecordsError::Blocked(format!(
        "Cannot delete category '{}': {} career(s) still belong to it.",
        category.name,
        dependents.len()
    )))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn student(id: u64, career: &str) -> Student {
        Student {
            id,
            name: format!("student-{}", id),
            career: career.to_string(),
        }
    }

    fn career(id: u64, name: &str, category: Option<&str>) -> Career {
        Career {
            id,
            name: name.to_string(),
            duration: None,
            description: None,
            category: category.map(str::to_string),
            emoji: None,
        }
    }

    #[test]
    fn test_career_dependents_match_case_insensitively() {
        let cs = career(1, "CS", None);
        let students = vec![student(1, "cs"), student(2, "Law"), student(3, "Cs")];

        let ids: Vec<u64> = career_dependents(&cs, &students).iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![1, 3]);
        assert!(matches!(
            ensure_career_deletable(&cs, &students),
            Err(RecordsError::Blocked(_))
        ));
    }

    #[test]
    fn test_career_without_students_is_deletable() {
        let cs = career(1, "CS", None);
        assert!(ensure_career_deletable(&cs, &[student(1, "CSE")]).is_ok());
        assert!(ensure_career_deletable(&cs, &[]).is_ok());
    }

    #[test]
    fn test_category_dependents_skip_uncategorised_careers() {
        let eng = Category {
            id: 1,
            name: "Eng".to_string(),
            description: None,
        };
        let careers = vec![
            career(1, "CS", Some("eng")),
            career(2, "Law", None),
            career(3, "Art", Some("Arts")),
        ];

        assert_eq!(category_dependents(&eng, &careers).len(), 1);

        let err = ensure_category_deletable(&eng, &careers).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Cannot delete category 'Eng': 1 career(s) still belong to it."
        );
        assert!(ensure_category_deletable(&eng, &careers[1..]).is_ok());
    }
}
