/// Bounded most-recently-used store of copied contributions
use crate::contribution::{Contribution, ContributionId, StoredRecord};
use serde::{Deserialize, Serialize};

pub const DEFAULT_CAPACITY: usize = 10;

/// What to do with the stored content when an already-known id is used again
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DuplicatePolicy {
    /// Keep the first-seen content, only move it to the front
    #[default]
    KeepFirstSeen,
    /// Replace the stored content with the newly supplied one
    Refresh,
}

/// Result of a single `record_use`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordOutcome {
    Promoted,
    Inserted { evicted: Vec<Contribution> },
}

/// Ordered, deduplicated, capacity-bounded list, most recent first
#[derive(Debug, Clone, PartialEq)]
pub struct RecencyStore {
    capacity: usize,
    policy: DuplicatePolicy,
    entries: Vec<Contribution>,
}

impl RecencyStore {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Capacity is clamped to at least one entry
    pub fn with_capacity(capacity: usize) -> Self {
        RecencyStore {
            capacity: capacity.max(1),
            policy: DuplicatePolicy::default(),
            entries: Vec::new(),
        }
    }

    pub fn with_policy(mut self, policy: DuplicatePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Rebuild a store from persisted records, oldest last
    ///
    /// The first occurrence of an id wins and anything past capacity is
    /// dropped, so a snapshot written with a larger capacity still loads.
    pub fn from_snapshot(records: Vec<Contribution>, capacity: usize, policy: DuplicatePolicy) -> Self {
        let mut store = RecencyStore::with_capacity(capacity).with_policy(policy);

        for record in records {
            if store.entries.len() == store.capacity {
                break;
            }
            if !store.contains(&record.id) {
                store.entries.push(record);
            }
        }

        store
    }

    /// Move the contribution to the front, inserting it if it is new
    pub fn record_use(&mut self, contribution: Contribution) -> RecordOutcome {
        if let Some(position) = self.position(&contribution.id) {
            let existing = self.entries.remove(position);
            let kept = match self.policy {
                DuplicatePolicy::KeepFirstSeen => existing,
                DuplicatePolicy::Refresh => contribution,
            };
            self.entries.insert(0, kept);
            log::debug!("Promoted {} from position {}", self.entries[0].id, position);
            return RecordOutcome::Promoted;
        }

        self.entries.insert(0, contribution);
        let evicted = if self.entries.len() > self.capacity {
            self.entries.split_off(self.capacity)
        } else {
            Vec::new()
        };

        log::debug!(
            "Inserted {} ({} entries, {} evicted)",
            self.entries[0].id,
            self.entries.len(),
            evicted.len()
        );
        RecordOutcome::Inserted { evicted }
    }

    /// Snapshot of the entries, most recent first
    pub fn to_list(&self) -> Vec<Contribution> {
        self.entries.clone()
    }

    pub fn contains(&self, id: &ContributionId) -> bool {
        self.position(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    fn position(&self, id: &ContributionId) -> Option<usize> {
        self.entries.iter().position(|c| &c.id == id)
    }
}

impl Default for RecencyStore {
    fn default() -> Self {
        Self::new()
    }
}

/// Decode the persisted history value, skipping records that do not parse
///
/// Returns the decoded contributions and the number of skipped records.
pub fn decode_snapshot(value: serde_json::Value) -> (Vec<Contribution>, usize) {
    let serde_json::Value::Array(items) = value else {
        return (Vec::new(), 1);
    };

    let mut skipped = 0;
    let records = items
        .into_iter()
        .filter_map(|item| match serde_json::from_value::<StoredRecord>(item) {
            Ok(record) => Some(record.into_contribution()),
            Err(e) => {
                log::warn!("Skipping unreadable history record: {}", e);
                skipped += 1;
                None
            }
        })
        .collect();

    (records, skipped)
}
