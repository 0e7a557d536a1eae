//! # Subscriber identity and membership set.
//!
//! [`SubscriberId`] is the opaque handle a transport uses for one recipient
//! (numeric chat ids, usernames — the core never looks inside). A
//! [`SubscriberSet`] is the duplicate-free membership collection the store
//! persists and the scheduler snapshots each tick.
//!
//! Both serialize transparently: the set round-trips as a plain JSON array of
//! id strings, losslessly for any set including the empty one.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Opaque subscriber identity supplied by the transport context.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SubscriberId(String);

impl SubscriberId {
    /// Creates an id from any transport handle.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the handle as text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for SubscriberId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for SubscriberId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<i64> for SubscriberId {
    fn from(id: i64) -> Self {
        Self(id.to_string())
    }
}

impl std::fmt::Display for SubscriberId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Duplicate-free, ordered set of subscriber identities.
///
/// Ordering is lexicographic over the id text; it exists only to keep the
/// persisted file stable across rewrites.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SubscriberSet {
    ids: BTreeSet<SubscriberId>,
}

impl SubscriberSet {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts `id`; returns `true` if it was not already a member.
    pub fn insert(&mut self, id: SubscriberId) -> bool {
        self.ids.insert(id)
    }

    /// Removes `id`; returns `true` if it was a member.
    pub fn remove(&mut self, id: &SubscriberId) -> bool {
        self.ids.remove(id)
    }

    /// Membership check.
    pub fn contains(&self, id: &SubscriberId) -> bool {
        self.ids.contains(id)
    }

    /// Number of members.
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Whether the set has no members.
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Iterates members in id order.
    pub fn iter(&self) -> impl Iterator<Item = &SubscriberId> {
        self.ids.iter()
    }
}

impl FromIterator<SubscriberId> for SubscriberSet {
    fn from_iter<I: IntoIterator<Item = SubscriberId>>(iter: I) -> Self {
        Self {
            ids: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for SubscriberSet {
    type Item = SubscriberId;
    type IntoIter = std::collections::btree_set::IntoIter<SubscriberId>;

    fn into_iter(self) -> Self::IntoIter {
        self.ids.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_deduplicates() {
        let mut set = SubscriberSet::new();
        assert!(set.insert("42".into()));
        assert!(!set.insert("42".into()));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_json_round_trip_including_empty() {
        for ids in [vec![], vec!["1", "2", "3"]] {
            let set: SubscriberSet = ids.into_iter().map(SubscriberId::from).collect();
            let json = serde_json::to_string(&set).expect("serialize");
            let back: SubscriberSet = serde_json::from_str(&json).expect("deserialize");
            assert_eq!(back, set);
        }
    }

    #[test]
    fn test_serializes_as_plain_array() {
        let set: SubscriberSet = ["7", "9"].into_iter().map(SubscriberId::from).collect();
        assert_eq!(
            serde_json::to_string(&set).expect("serialize"),
            r#"["7","9"]"#
        );
    }
}
