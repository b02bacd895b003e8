//! Aggregate counts over a snapshot of profiles.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::models::{parse_age, ProfileRecord};
use crate::store::ProfileStore;

pub const UNDER_18: &str = "under_18";
pub const AGE_18_24: &str = "18_24";
pub const AGE_25_34: &str = "25_34";
pub const AGE_35_44: &str = "35_44";
pub const AGE_45_54: &str = "45_54";
pub const AGE_55_PLUS: &str = "55_plus";

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Stats {
    pub total: usize,
    pub gender_counts: BTreeMap<String, usize>,
    pub age_group_counts: BTreeMap<String, usize>,
    pub job_counts: BTreeMap<String, usize>,
    pub skill_counts: BTreeMap<String, usize>,
    pub with_photo: usize,
}

/// Bucket for an age string. Unparseable ages count as 0.
pub fn age_group(age: &str) -> &'static str {
    match parse_age(age) {
        i64::MIN..=17 => UNDER_18,
        18..=24 => AGE_18_24,
        25..=34 => AGE_25_34,
        35..=44 => AGE_35_44,
        45..=54 => AGE_45_54,
        _ => AGE_55_PLUS,
    }
}

pub fn compute(records: &[ProfileRecord]) -> Stats {
    let mut stats = Stats {
        total: records.len(),
        ..Default::default()
    };

    for record in records {
        *stats.gender_counts.entry(record.gender.clone()).or_default() += 1;
        *stats
            .age_group_counts
            .entry(age_group(&record.age).to_string())
            .or_default() += 1;
        *stats.job_counts.entry(record.job.clone()).or_default() += 1;

        for skill in record.skill_tokens() {
            *stats.skill_counts.entry(skill.to_string()).or_default() += 1;
        }

        if record.has_photo() {
            stats.with_photo += 1;
        }
    }

    stats
}

impl ProfileStore {
    pub fn stats(&self) -> Result<Stats> {
        self.read(compute)
    }
}
