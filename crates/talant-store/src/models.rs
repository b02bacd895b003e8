//! Domain model persisted in the profile document.
//!
//! Field names on the wire follow the document format shared with the web
//! frontend (`user_id`, `jobtype`), so the structs rename where Rust naming
//! differs.

use serde::{Deserialize, Serialize};
use talant_shared::{OwnerId, ProfileId};

use crate::error::{Result, StoreError};

// ---------------------------------------------------------------------------
// ProfileRecord
// ---------------------------------------------------------------------------

/// One owner's submitted profile.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProfileRecord {
    /// Assigned at creation, never changes.
    pub id: ProfileId,
    /// Authenticated creator. At most one record per owner.
    #[serde(rename = "user_id")]
    pub owner_id: OwnerId,
    pub name: String,
    pub gender: String,
    /// Free text, usually a number. See [`parse_age`].
    pub age: String,
    pub job: String,
    pub school: String,
    /// Comma-separated skill tokens.
    pub skills: String,
    /// `photos/<file>` under the attachment root, or empty.
    #[serde(default)]
    pub photo: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub position: String,
    #[serde(default)]
    pub salary: String,
    #[serde(default)]
    pub experience: String,
    #[serde(default, rename = "jobtype")]
    pub job_type: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
}

impl ProfileRecord {
    pub(crate) fn new(owner_id: OwnerId, fields: ProfileFields) -> Self {
        let mut record = Self {
            id: ProfileId::new(),
            owner_id,
            name: String::new(),
            gender: String::new(),
            age: String::new(),
            job: String::new(),
            school: String::new(),
            skills: String::new(),
            photo: String::new(),
            city: String::new(),
            position: String::new(),
            salary: String::new(),
            experience: String::new(),
            job_type: String::new(),
            description: String::new(),
        };
        record.apply(fields);
        record
    }

    /// Replace every editable field. `id`, `owner_id` and `photo` are kept.
    pub(crate) fn apply(&mut self, fields: ProfileFields) {
        let ProfileFields {
            name,
            gender,
            age,
            job,
            school,
            skills,
            city,
            position,
            salary,
            experience,
            job_type,
            description,
        } = fields;

        self.name = name;
        self.gender = gender;
        self.age = age;
        self.job = job;
        self.school = school;
        self.skills = skills;
        self.city = city;
        self.position = position;
        self.salary = salary;
        self.experience = experience;
        self.job_type = job_type;
        self.description = description;
    }

    pub fn has_photo(&self) -> bool {
        !self.photo.is_empty()
    }

    /// Age parsed with [`parse_age`].
    pub fn age_years(&self) -> i64 {
        parse_age(&self.age)
    }

    /// Trimmed, non-blank skill tokens in their original case.
    pub fn skill_tokens(&self) -> impl Iterator<Item = &str> {
        split_tokens(&self.skills)
    }
}

// ---------------------------------------------------------------------------
// ProfileFields
// ---------------------------------------------------------------------------

/// Editable part of a profile, as submitted by create and update requests.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ProfileFields {
    pub name: String,
    pub gender: String,
    pub age: String,
    pub job: String,
    pub school: String,
    pub skills: String,
    pub city: String,
    pub position: String,
    pub salary: String,
    pub experience: String,
    #[serde(rename = "jobtype")]
    pub job_type: String,
    pub description: String,
}

impl ProfileFields {
    /// Every required field must be non-blank. The error names all missing
    /// fields at once.
    pub fn validate(&self) -> Result<()> {
        let required = [
            ("name", &self.name),
            ("age", &self.age),
            ("job", &self.job),
            ("school", &self.school),
            ("gender", &self.gender),
            ("skills", &self.skills),
        ];

        let missing: Vec<&str> = required
            .iter()
            .filter(|(_, value)| value.trim().is_empty())
            .map(|(field, _)| *field)
            .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(StoreError::Validation(format!(
                "missing required fields: {}",
                missing.join(" ")
            )))
        }
    }
}

// ---------------------------------------------------------------------------
// Parsing helpers
// ---------------------------------------------------------------------------

/// Lenient integer parse: anything that is not a plain integer counts as 0.
///
/// Age filtering and age bucketing both depend on this, so malformed ages
/// are searchable as 0 and land in the youngest bucket.
pub fn parse_age(age: &str) -> i64 {
    age.parse::<i64>().unwrap_or(0)
}

/// Split a comma-separated list into trimmed, non-blank tokens.
pub fn split_tokens(list: &str) -> impl Iterator<Item = &str> {
    list.split(',').map(str::trim).filter(|t| !t.is_empty())
}
