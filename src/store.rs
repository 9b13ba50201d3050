//! In-memory accumulation of extracted task events.
//!
//! The store is append-only and preserves extraction order. It performs no
//! deduplication and no validation beyond what the extractor already
//! guarantees; aggregation reads it without mutating it.

use std::collections::BTreeMap;

use crate::event::TaskEvent;

/// Ordered collection of task events for one log file.
#[derive(Debug, Default)]
pub struct EventStore {
    events: Vec<TaskEvent>,
}

impl EventStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an event; insertion order is the log's line order.
    pub fn push(&mut self, event: TaskEvent) {
        self.events.push(event);
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// All events, in insertion order.
    pub fn events(&self) -> &[TaskEvent] {
        &self.events
    }

    /// Group events by stage id, ascending.
    ///
    /// The `-1` unknown-stage bucket is a legitimate group and sorts first.
    /// Within a group, events keep insertion order.
    pub fn by_stage(&self) -> BTreeMap<i64, Vec<&TaskEvent>> {
        let mut groups: BTreeMap<i64, Vec<&TaskEvent>> = BTreeMap::new();
        for event in &self.events {
            groups.entry(event.stage_id).or_default().push(event);
        }
        groups
    }
}

impl Extend<TaskEvent> for EventStore {
    fn extend<I: IntoIterator<Item = TaskEvent>>(&mut self, iter: I) {
        self.events.extend(iter);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::{TaskEventKind, UNKNOWN_ID};

    fn event(task_id: i64, stage_id: i64) -> TaskEvent {
        TaskEvent {
            task_id,
            stage_id,
            kind: TaskEventKind::End,
            launch_time: Some(0),
            finish_time: Some(1),
        }
    }

    #[test]
    fn preserves_insertion_order() {
        let mut store = EventStore::new();
        store.push(event(2, 0));
        store.push(event(1, 1));
        store.push(event(3, 0));

        let ids: Vec<i64> = store.events().iter().map(|e| e.task_id).collect();
        assert_eq!(ids, vec![2, 1, 3]);
    }

    #[test]
    fn groups_by_ascending_stage_id() {
        let mut store = EventStore::new();
        store.push(event(1, 5));
        store.push(event(2, UNKNOWN_ID));
        store.push(event(3, 0));
        store.push(event(4, 5));

        let groups = store.by_stage();
        let stage_ids: Vec<i64> = groups.keys().copied().collect();
        assert_eq!(stage_ids, vec![UNKNOWN_ID, 0, 5]);

        let stage5: Vec<i64> = groups[&5].iter().map(|e| e.task_id).collect();
        assert_eq!(stage5, vec![1, 4]);
    }

    #[test]
    fn empty_store_has_no_groups() {
        let store = EventStore::new();
        assert!(store.is_empty());
        assert!(store.by_stage().is_empty());
    }
}
