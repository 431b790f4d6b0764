//! Record types and the field validation shared by create and update.
//!
//! A [`Record`] is always handed out by value. The store keeps the only
//! authoritative copy, so mutating a returned record never affects stored
//! state.

use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};
use validator::ValidateEmail;

use crate::error::{Error, Result};

/// Inclusive range of accepted ages.
pub const AGE_RANGE: RangeInclusive<u32> = 16..=120;

/// A stored student record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub id: u64,
    pub name: String,
    pub age: u32,
    pub email: String,
}

/// Field values for a record that has not been assigned an id yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewRecord {
    pub name: String,
    pub age: u32,
    pub email: String,
}

impl NewRecord {
    pub fn new(name: impl Into<String>, age: u32, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            age,
            email: email.into(),
        }
    }

    pub fn validate(&self) -> Result<()> {
        validate_fields(Some(&self.name), Some(self.age), Some(&self.email))
    }

    pub(crate) fn into_record(self, id: u64) -> Record {
        Record {
            id,
            name: self.name,
            age: self.age,
            email: self.email,
        }
    }
}

/// A partial update.
///
/// Each field is either provided (`Some`) or absent (`None`). A provided
/// empty string is a value like any other and is validated as such; it
/// never means "leave unchanged".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecordPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl RecordPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_age(mut self, age: u32) -> Self {
        self.age = Some(age);
        self
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    /// Whether no field is provided.
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.age.is_none() && self.email.is_none()
    }

    /// Validate only the provided fields.
    pub fn validate(&self) -> Result<()> {
        validate_fields(self.name.as_deref(), self.age, self.email.as_deref())
    }

    /// Build the merged record: provided fields win, absent fields keep the
    /// value from `current`, and the id never changes.
    pub fn apply(&self, current: &Record) -> Record {
        Record {
            id: current.id,
            name: self.name.clone().unwrap_or_else(|| current.name.clone()),
            age: self.age.unwrap_or(current.age),
            email: self.email.clone().unwrap_or_else(|| current.email.clone()),
        }
    }
}

/// The one validation routine behind both create and update. `None` means
/// the field is not being written and is skipped.
pub fn validate_fields(name: Option<&str>, age: Option<u32>, email: Option<&str>) -> Result<()> {
    if let Some(name) = name
        && name.trim().is_empty()
    {
        return Err(Error::validation("name must not be empty"));
    }
    if let Some(age) = age
        && !AGE_RANGE.contains(&age)
    {
        return Err(Error::validation(format!(
            "age must be between {} and {}, got {age}",
            AGE_RANGE.start(),
            AGE_RANGE.end()
        )));
    }
    if let Some(email) = email
        && !(email.validate_email() && has_dotted_domain(email))
    {
        return Err(Error::validation(format!(
            "email is not a valid address: {email:?}"
        )));
    }
    Ok(())
}

/// Single-label domains such as `localhost` are not deliverable addresses.
fn has_dotted_domain(email: &str) -> bool {
    email
        .rsplit_once('@')
        .is_some_and(|(_, domain)| domain.contains('.'))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Record {
        Record {
            id: 3,
            name: "Ada".into(),
            age: 36,
            email: "ada@example.com".into(),
        }
    }

    #[test]
    fn accepts_valid_fields() {
        assert!(NewRecord::new("Jo", 20, "a@b.com").validate().is_ok());
        assert!(NewRecord::new("Jo", 16, "a@b.com").validate().is_ok());
        assert!(NewRecord::new("Jo", 120, "a@b.com").validate().is_ok());
    }

    #[test]
    fn rejects_empty_name() {
        let err = NewRecord::new("", 20, "a@b.com").validate().unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
        assert!(NewRecord::new("   ", 20, "a@b.com").validate().is_err());
    }

    #[test]
    fn rejects_age_outside_range() {
        for age in [0, 15, 121, 500] {
            let err = NewRecord::new("Jo", age, "a@b.com").validate().unwrap_err();
            assert!(matches!(err, Error::Validation(ref m) if m.contains("age")));
        }
    }

    #[test]
    fn rejects_malformed_email() {
        for email in [
            "not-an-email",
            "",
            "@example.com",
            "jo@",
            "a@b",
            "jo@localhost",
        ] {
            let err = NewRecord::new("Jo", 20, email).validate().unwrap_err();
            assert!(matches!(err, Error::Validation(ref m) if m.contains("email")));
        }
    }

    #[test]
    fn empty_patch_is_valid_and_changes_nothing() {
        let patch = RecordPatch::new();
        assert!(patch.is_empty());
        assert!(patch.validate().is_ok());
        assert_eq!(patch.apply(&sample()), sample());
    }

    #[test]
    fn patch_validates_only_provided_fields() {
        assert!(RecordPatch::new().with_age(40).validate().is_ok());
        assert!(RecordPatch::new().with_age(10).validate().is_err());
        // An explicitly provided empty string is a value, not "absent".
        assert!(RecordPatch::new().with_name("").validate().is_err());
        assert!(RecordPatch::new().with_email("").validate().is_err());
    }

    #[test]
    fn patch_merges_field_by_field() {
        let current = sample();
        let merged = RecordPatch::new().with_email("ada@lovelace.org").apply(&current);
        assert_eq!(merged.id, current.id);
        assert_eq!(merged.name, current.name);
        assert_eq!(merged.age, current.age);
        assert_eq!(merged.email, "ada@lovelace.org");
    }

    #[test]
    fn patch_deserializes_missing_and_null_as_absent() {
        let patch: RecordPatch = serde_json::from_str(r#"{"age": 30, "email": null}"#).unwrap();
        assert_eq!(patch.age, Some(30));
        assert!(patch.name.is_none());
        assert!(patch.email.is_none());

        let patch: RecordPatch = serde_json::from_str(r#"{"name": ""}"#).unwrap();
        assert_eq!(patch.name.as_deref(), Some(""));
    }
}
