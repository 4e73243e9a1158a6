//! Filtering, grouping, and summary queries.

use eventline_core::EventRecord;
use eventline_store::EventStore;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

/// All events for one user, with their count.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserEvents {
    /// The queried user id (echoed back even when no events match).
    pub user_id: String,
    /// Matching records in insertion order.
    pub events: Vec<EventRecord>,
    /// `events.len()`, precomputed for the transport layer.
    pub count: usize,
}

/// Per-user entry in the user directory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserActivity {
    /// Number of records for this user.
    pub event_count: usize,
    /// Distinct event types this user produced.
    pub event_types: BTreeSet<String>,
}

/// The single most frequent user by record count.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MostActiveUser {
    /// Winning user id. Ties resolve to an arbitrary winner.
    pub user_id: String,
    /// That user's record count.
    pub event_count: usize,
}

/// Store-wide summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreStats {
    /// Total record count.
    pub total_events: usize,
    /// Distinct user count.
    pub unique_users: usize,
    /// Distinct event types, sorted.
    pub event_types: Vec<String>,
    /// Absent when the store is empty.
    pub most_active_user: Option<MostActiveUser>,
}

/// Stateless query facade over a shared `EventStore`.
///
/// Clone is cheap (one `Arc` clone); clones see the same data.
#[derive(Clone)]
pub struct QueryEngine {
    store: Arc<EventStore>,
}

impl QueryEngine {
    /// Create a facade over a shared store.
    pub fn new(store: Arc<EventStore>) -> Self {
        Self { store }
    }

    /// Records matching the given exact-equality filters, in insertion
    /// order. `None` filters match everything; both filters together
    /// intersect.
    pub fn filter_events(
        &self,
        user_id: Option<&str>,
        event_type: Option<&str>,
    ) -> Vec<EventRecord> {
        self.store
            .all()
            .into_iter()
            .filter(|rec| user_id.map_or(true, |u| rec.user_id == u))
            .filter(|rec| event_type.map_or(true, |t| rec.event_type == t))
            .collect()
    }

    /// All records for one user, with their count.
    pub fn events_for_user(&self, user_id: &str) -> UserEvents {
        let events = self.filter_events(Some(user_id), None);
        UserEvents {
            user_id: user_id.to_string(),
            count: events.len(),
            events,
        }
    }

    /// Distinct users with per-user count and distinct event types.
    ///
    /// The map is unordered over users; callers must treat it as a set.
    pub fn list_users(&self) -> HashMap<String, UserActivity> {
        let mut users: HashMap<String, UserActivity> = HashMap::new();
        for rec in self.store.all() {
            let entry = users.entry(rec.user_id).or_insert_with(|| UserActivity {
                event_count: 0,
                event_types: BTreeSet::new(),
            });
            entry.event_count += 1;
            entry.event_types.insert(rec.event_type);
        }
        users
    }

    /// Distinct event types with their record counts.
    pub fn list_event_types(&self) -> HashMap<String, usize> {
        let mut counts: HashMap<String, usize> = HashMap::new();
        for rec in self.store.all() {
            *counts.entry(rec.event_type).or_insert(0) += 1;
        }
        counts
    }

    /// Store-wide summary.
    ///
    /// An empty store yields zeroed totals and no most-active user.
    /// When several users share the maximum count, any one of them may
    /// win; callers must not rely on a stable tie-break.
    pub fn stats(&self) -> StoreStats {
        let records = self.store.all();
        let total_events = records.len();

        let mut user_counts: HashMap<&str, usize> = HashMap::new();
        let mut event_types: BTreeSet<&str> = BTreeSet::new();
        for rec in &records {
            *user_counts.entry(rec.user_id.as_str()).or_insert(0) += 1;
            event_types.insert(rec.event_type.as_str());
        }

        let most_active_user = user_counts
            .iter()
            .max_by_key(|(_, count)| **count)
            .map(|(user, count)| MostActiveUser {
                user_id: (*user).to_string(),
                event_count: *count,
            });

        StoreStats {
            total_events,
            unique_users: user_counts.len(),
            event_types: event_types.into_iter().map(str::to_string).collect(),
            most_active_user,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use eventline_core::EventRecord;
    use eventline_store::MemorySnapshotStore;
    use proptest::prelude::*;

    fn rec(user: &str, ty: &str, ts: &str) -> EventRecord {
        EventRecord::new(user, ty, ts, "stamp")
    }

    fn setup(records: Vec<EventRecord>) -> QueryEngine {
        let store = Arc::new(EventStore::open(Box::new(MemorySnapshotStore::new())));
        store.append_batch(records).unwrap();
        QueryEngine::new(store)
    }

    // =========================================================================
    // Filtering
    // =========================================================================

    #[test]
    fn no_filters_returns_everything_in_order() {
        let engine = setup(vec![rec("a", "x", "1"), rec("b", "y", "2"), rec("a", "x", "3")]);
        let all = engine.filter_events(None, None);
        let stamps: Vec<_> = all.iter().map(|r| r.event_timestamp.as_str()).collect();
        assert_eq!(stamps, ["1", "2", "3"]);
    }

    #[test]
    fn user_filter_is_exact_equality() {
        let engine = setup(vec![rec("alice", "x", "1"), rec("alice2", "x", "2")]);
        let hits = engine.filter_events(Some("alice"), None);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].user_id, "alice");
    }

    #[test]
    fn both_filters_intersect() {
        let engine = setup(vec![
            rec("a", "click", "1"),
            rec("a", "view", "2"),
            rec("b", "click", "3"),
        ]);
        let hits = engine.filter_events(Some("a"), Some("click"));
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].event_timestamp, "1");
    }

    #[test]
    fn no_match_yields_empty() {
        let engine = setup(vec![rec("a", "click", "1")]);
        assert!(engine.filter_events(Some("nobody"), None).is_empty());
    }

    #[test]
    fn events_for_user_keeps_order_and_counts() {
        let engine = setup(vec![
            rec("A", "login", "1"),
            rec("B", "login", "2"),
            rec("A", "click", "3"),
        ]);
        let result = engine.events_for_user("A");
        assert_eq!(result.user_id, "A");
        assert_eq!(result.count, 2);
        let stamps: Vec<_> = result.events.iter().map(|r| r.event_timestamp.as_str()).collect();
        assert_eq!(stamps, ["1", "3"]);
    }

    #[test]
    fn events_for_unknown_user_is_empty_with_zero_count() {
        let engine = setup(vec![rec("A", "login", "1")]);
        let result = engine.events_for_user("Z");
        assert_eq!(result.count, 0);
        assert!(result.events.is_empty());
    }

    // =========================================================================
    // Grouping
    // =========================================================================

    #[test]
    fn list_users_groups_counts_and_types() {
        let engine = setup(vec![
            rec("a", "click", "1"),
            rec("a", "view", "2"),
            rec("a", "click", "3"),
            rec("b", "view", "4"),
        ]);
        let users = engine.list_users();
        assert_eq!(users.len(), 2);

        let a = &users["a"];
        assert_eq!(a.event_count, 3);
        assert_eq!(
            a.event_types.iter().collect::<Vec<_>>(),
            ["click", "view"]
        );

        let b = &users["b"];
        assert_eq!(b.event_count, 1);
        assert_eq!(b.event_types.iter().collect::<Vec<_>>(), ["view"]);
    }

    #[test]
    fn list_event_types_counts_per_type() {
        let engine = setup(vec![
            rec("a", "click", "1"),
            rec("b", "click", "2"),
            rec("c", "view", "3"),
        ]);
        let types = engine.list_event_types();
        assert_eq!(types.len(), 2);
        assert_eq!(types["click"], 2);
        assert_eq!(types["view"], 1);
    }

    // =========================================================================
    // Stats
    // =========================================================================

    #[test]
    fn empty_store_yields_zeroed_stats() {
        let engine = setup(vec![]);
        let stats = engine.stats();
        assert_eq!(stats.total_events, 0);
        assert_eq!(stats.unique_users, 0);
        assert!(stats.event_types.is_empty());
        assert!(stats.most_active_user.is_none());
    }

    #[test]
    fn strict_maximum_user_wins() {
        let engine = setup(vec![
            rec("alice", "click", "1"),
            rec("alice", "view", "2"),
            rec("bob", "click", "3"),
        ]);
        let stats = engine.stats();
        assert_eq!(stats.total_events, 3);
        assert_eq!(stats.unique_users, 2);
        assert_eq!(stats.event_types, ["click", "view"]);
        let most = stats.most_active_user.unwrap();
        assert_eq!(most.user_id, "alice");
        assert_eq!(most.event_count, 2);
    }

    #[test]
    fn tied_users_yield_some_winner() {
        let engine = setup(vec![rec("a", "x", "1"), rec("b", "x", "2")]);
        let most = engine.stats().most_active_user.unwrap();
        // Tie-break is undefined; either user is acceptable.
        assert!(most.user_id == "a" || most.user_id == "b");
        assert_eq!(most.event_count, 1);
    }

    // =========================================================================
    // Properties
    // =========================================================================

    proptest! {
        /// Per-type counts always sum to the total event count.
        #[test]
        fn type_counts_conserve_total(
            events in prop::collection::vec(("[a-d]", "[w-z]"), 0..40)
        ) {
            let records = events
                .iter()
                .enumerate()
                .map(|(i, (user, ty))| rec(user, ty, &i.to_string()))
                .collect();
            let engine = setup(records);

            let total: usize = engine.list_event_types().values().sum();
            prop_assert_eq!(total, events.len());

            let by_user: usize = engine.list_users().values().map(|u| u.event_count).sum();
            prop_assert_eq!(by_user, events.len());
        }
    }
}
