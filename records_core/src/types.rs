//! Record Types
//!
//! The three academic record kinds plus the drafts clients submit to create
//! them. Records reference each other by name, never by id.

use crate::error::{RecordsError, RecordsResult};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

// ============================================================
// RECORD TRAITS
// ============================================================

/// A record kept in an [`EntityStore`](crate::store::EntityStore)
pub trait Record: Serialize + DeserializeOwned + Clone {
    /// Human-readable kind, used in messages and logs
    const KIND: &'static str;

    fn id(&self) -> u64;

    fn name(&self) -> &str;

    /// Field matched by `list` filtering (`career` for students, `name` otherwise)
    fn filter_key(&self) -> Option<&str>;
}

/// Unvalidated input for creating a record
pub trait Draft {
    type Output: Record;

    /// Checks that required fields are present and non-empty
    fn validate(&self) -> RecordsResult<()>;

    /// Name that must be unique in the target store, if the kind enforces it
    fn unique_name(&self) -> Option<&str>;

    /// Builds the record. Only called after `validate` succeeded.
    fn into_record(self, id: u64) -> Self::Output;
}

/// Case-insensitive name comparison used for uniqueness, filters and references
pub fn names_match(a: &str, b: &str) -> bool {
    a.to_lowercase() == b.to_lowercase()
}

fn is_present(field: &Option<String>) -> bool {
    field.as_deref().is_some_and(|s| !s.is_empty())
}

// ============================================================
// STUDENT
// ============================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Student {
    pub id: u64,
    pub name: String,
    /// Name of the career the student is enrolled in
    pub career: String,
}

impl Record for Student {
    const KIND: &'static str = "Student";

    fn id(&self) -> u64 {
        self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn filter_key(&self) -> Option<&str> {
        Some(&self.career)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentDraft {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub career: Option<String>,
}

impl StudentDraft {
    pub fn new(name: &str, career: &str) -> Self {
        Self {
            name: Some(name.to_string()),
            career: Some(career.to_string()),
        }
    }
}

impl Draft for StudentDraft {
    type Output = Student;

    fn validate(&self) -> RecordsResult<()> {
        if !is_present(&self.name) || !is_present(&self.career) {
            return Err(RecordsError::Validation(
                "Missing required fields: name and career.".to_string(),
            ));
        }
        Ok(())
    }

    fn unique_name(&self) -> Option<&str> {
        None
    }

    fn into_record(self, id: u64) -> Student {
        Student {
            id,
            name: self.name.unwrap_or_default(),
            career: self.career.unwrap_or_default(),
        }
    }
}

// ============================================================
// CAREER
// ============================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Career {
    pub id: u64,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Name of the category this career belongs to
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emoji: Option<String>,
}

impl Record for Career {
    const KIND: &'static str = "Career";

    fn id(&self) -> u64 {
        self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn filter_key(&self) -> Option<&str> {
        Some(&self.name)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CareerDraft {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emoji: Option<String>,
}

impl CareerDraft {
    pub fn new(name: &str) -> Self {
        Self {
            name: Some(name.to_string()),
            ..Default::default()
        }
    }

    pub fn with_category(mut self, category: &str) -> Self {
        self.category = Some(category.to_string());
        self
    }
}

impl Draft for CareerDraft {
    type Output = Career;

    fn validate(&self) -> RecordsResult<()> {
        if !is_present(&self.name) {
            return Err(RecordsError::Validation(
                "Missing required field: name.".to_string(),
            ));
        }
        Ok(())
    }

    fn unique_name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    fn into_record(self, id: u64) -> Career {
        Career {
            id,
            name: self.name.unwrap_or_default(),
            duration: self.duration,
            description: self.description,
            category: self.category,
            emoji: self.emoji,
        }
    }
}

// ============================================================
// CATEGORY
// ============================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: u64,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Record for Category {
    const KIND: &'static str = "Category";

    fn id(&self) -> u64 {
        self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn filter_key(&self) -> Option<&str> {
        Some(&self.name)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryDraft {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl CategoryDraft {
    pub fn new(name: &str) -> Self {
        Self {
            name: Some(name.to_string()),
            description: None,
        }
    }

    pub fn with_description(mut self, description: &str) -> Self {
        self.description = Some(description.to_string());
        self
    }
}

impl Draft for CategoryDraft {
    type Output = Category;

    fn validate(&self) -> RecordsResult<()> {
        if !is_present(&self.name) {
            return Err(RecordsError::Validation(
                "Missing required field: name.".to_string(),
            ));
        }
        Ok(())
    }

    fn unique_name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    fn into_record(self, id: u64) -> Category {
        Category {
            id,
            name: self.name.unwrap_or_default(),
            description: self.description,
        }
    }
}
