//! Outcome log of a sync run.

use chrono::{DateTime, Utc};
use std::fmt;

/// What happened to a single entity during reconciliation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
    Created,
    Updated,
    Unchanged,
}

impl Outcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            Outcome::Created => "Created",
            Outcome::Updated => "Updated",
            Outcome::Unchanged => "Unchanged",
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kind of entity a [`SyncEntry`] refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Region,
    Country,
}

/// One line of the sync log: `(entity name, outcome)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncEntry {
    pub kind: EntityKind,
    pub name: String,
    pub outcome: Outcome,
}

impl SyncEntry {
    pub fn region_created(name: impl Into<String>) -> Self {
        Self {
            kind: EntityKind::Region,
            name: name.into(),
            outcome: Outcome::Created,
        }
    }

    pub fn country(name: impl Into<String>, outcome: Outcome) -> Self {
        Self {
            kind: EntityKind::Country,
            name: name.into(),
            outcome,
        }
    }
}

impl fmt::Display for SyncEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            EntityKind::Region => write!(f, "Region: {} - {}", self.name, self.outcome),
            EntityKind::Country => write!(f, "{} - {}", self.name, self.outcome),
        }
    }
}

/// Ordered outcome log of a completed sync run.
///
/// Entries appear in record order. A record whose region did not exist yet
/// contributes a region entry immediately before its country entry.
#[derive(Debug, Clone)]
pub struct SyncReport {
    pub entries: Vec<SyncEntry>,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

impl SyncReport {
    pub fn countries(&self) -> impl Iterator<Item = &SyncEntry> {
        self.entries
            .iter()
            .filter(|e| e.kind == EntityKind::Country)
    }

    pub fn regions_created(&self) -> usize {
        self.entries
            .iter()
            .filter(|e| e.kind == EntityKind::Region)
            .count()
    }

    pub fn created(&self) -> usize {
        self.count_countries(Outcome::Created)
    }

    pub fn updated(&self) -> usize {
        self.count_countries(Outcome::Updated)
    }

    pub fn unchanged(&self) -> usize {
        self.count_countries(Outcome::Unchanged)
    }

    fn count_countries(&self, outcome: Outcome) -> usize {
        self.countries().filter(|e| e.outcome == outcome).count()
    }
}
