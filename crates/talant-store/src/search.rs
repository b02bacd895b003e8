//! Faceted search over a snapshot of profiles.
//!
//! Every criterion is optional and they combine with AND. Blank strings are
//! treated as absent so query strings from HTML forms can be passed through
//! unchanged.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::models::{parse_age, split_tokens, ProfileRecord};
use crate::store::ProfileStore;

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct SearchCriteria {
    /// Free text matched against name, job, school, skills and description.
    pub query: Option<String>,
    /// Exact, case-sensitive.
    pub gender: Option<String>,
    pub min_age: Option<i64>,
    pub max_age: Option<i64>,
    pub job: Option<String>,
    pub city: Option<String>,
    /// Comma-separated tokens that must all appear in the record's skills.
    pub skills: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SearchResult {
    pub count: usize,
    pub results: Vec<ProfileRecord>,
}

impl SearchCriteria {
    pub fn matches(&self, record: &ProfileRecord) -> bool {
        if let Some(query) = present(&self.query) {
            let haystack = [
                record.name.as_str(),
                record.job.as_str(),
                record.school.as_str(),
                record.skills.as_str(),
                record.description.as_str(),
            ]
            .join(" ")
            .to_lowercase();
            if !haystack.contains(&query.to_lowercase()) {
                return false;
            }
        }

        if let Some(gender) = present(&self.gender) {
            if record.gender != gender {
                return false;
            }
        }

        if self.min_age.is_some() || self.max_age.is_some() {
            let age = parse_age(&record.age);
            if self.min_age.is_some_and(|min| age < min) {
                return false;
            }
            if self.max_age.is_some_and(|max| age > max) {
                return false;
            }
        }

        if let Some(job) = present(&self.job) {
            if !contains_ci(&record.job, job) {
                return false;
            }
        }

        if let Some(city) = present(&self.city) {
            if !contains_ci(&record.city, city) {
                return false;
            }
        }

        if let Some(required) = present(&self.skills) {
            let have = record.skills.to_lowercase();
            if !split_tokens(required).all(|token| have.contains(&token.to_lowercase())) {
                return false;
            }
        }

        true
    }
}

/// Records matching every supplied criterion, in their original order.
pub fn filter(records: &[ProfileRecord], criteria: &SearchCriteria) -> SearchResult {
    let results: Vec<ProfileRecord> = records
        .iter()
        .filter(|r| criteria.matches(r))
        .cloned()
        .collect();

    SearchResult {
        count: results.len(),
        results,
    }
}

impl ProfileStore {
    pub fn search(&self, criteria: &SearchCriteria) -> Result<SearchResult> {
        self.read(|records| filter(records, criteria))
    }
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.trim().is_empty())
}

fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}
