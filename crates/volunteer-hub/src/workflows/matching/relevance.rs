use std::collections::{BTreeMap, BTreeSet};
use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::workflows::normalizer::normalize_key;

/// Static mapping from task domain to the skills considered useful for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelevanceTable {
    domains: BTreeMap<String, BTreeSet<String>>,
}

const STANDARD_TABLE: [(&str, &[&str]); 7] = [
    ("technology", &["coding", "design", "teaching"]),
    ("social media", &["social media", "writing", "design"]),
    ("education", &["teaching", "writing", "leadership"]),
    ("creative", &["design", "writing", "social media"]),
    ("on-ground", &["leadership", "event management"]),
    ("management", &["leadership", "event management", "fundraising"]),
    ("fundraising", &["fundraising", "leadership", "writing"]),
];

impl RelevanceTable {
    pub fn standard() -> Self {
        let mut table = Self::empty();
        for (domain, skills) in STANDARD_TABLE {
            for skill in skills {
                table.insert(domain, skill);
            }
        }
        table
    }

    pub fn empty() -> Self {
        Self {
            domains: BTreeMap::new(),
        }
    }

    pub fn insert(&mut self, domain: &str, skill: &str) {
        let domain = normalize_key(domain);
        let skill = normalize_key(skill);
        if domain.is_empty() || skill.is_empty() {
            return;
        }
        self.domains.entry(domain).or_default().insert(skill);
    }

    /// Skills relevant to `domain`, compared case-insensitively. Unknown domains yield `None`.
    pub fn relevant_skills(&self, domain: &str) -> Option<&BTreeSet<String>> {
        self.domains.get(&normalize_key(domain))
    }

    pub fn domains(&self) -> impl Iterator<Item = &str> {
        self.domains.keys().map(String::as_str)
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, csv::Error> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    /// Load a table from `domain,skill` rows, one pair per row.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, csv::Error> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);
        let mut table = Self::empty();

        for row in csv_reader.deserialize::<RelevanceRow>() {
            let row = row?;
            table.insert(&row.domain, &row.skill);
        }

        Ok(table)
    }
}

impl Default for RelevanceTable {
    fn default() -> Self {
        Self::standard()
    }
}

#[derive(Debug, Deserialize)]
struct RelevanceRow {
    domain: String,
    skill: String,
}
