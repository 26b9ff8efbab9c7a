//! Append-only in-memory record store.

use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use parking_lot::RwLock;
use tracing::info;

use crate::models::Record;

/// Source of "today" for stamping new records.
pub trait Clock: Send + Sync {
    /// Current calendar date.
    fn today(&self) -> NaiveDate;
}

/// Clock backed by the system time, reporting the UTC date.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Utc::now().date_naive()
    }
}

/// Clock pinned to a single date.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

/// Thread-safe ordered collection of records.
///
/// Clones share the same underlying collection, so one store can back
/// several access-layer handles. Records are never updated or removed.
pub struct Store<T: Record> {
    inner: Arc<RwLock<Inner<T>>>,
}

struct Inner<T> {
    records: Vec<T>,
    clock: Arc<dyn Clock>,
}

impl<T: Record> Clone for Store<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T: Record> Default for Store<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Record> Store<T> {
    /// Empty store stamped by the system clock.
    pub fn new() -> Self {
        Self::with_clock(SystemClock)
    }

    /// Empty store stamped by the given clock.
    pub fn with_clock(clock: impl Clock + 'static) -> Self {
        Self::seeded(Vec::new(), clock)
    }

    /// Store pre-populated with existing records, kept in the given order.
    pub fn seeded(records: Vec<T>, clock: impl Clock + 'static) -> Self {
        Self {
            inner: Arc::new(RwLock::new(Inner {
                records,
                clock: Arc::new(clock),
            })),
        }
    }

    /// Assign `id = len + 1` and today's date, then append.
    pub fn append(&self, draft: T::Draft) -> T {
        let mut inner = self.inner.write();
        let id = inner.records.len() as u64 + 1;
        let today = inner.clock.today();
        let record = T::assemble(id, today, draft);
        inner.records.push(record.clone());
        info!(id, total = inner.records.len(), "Record appended");
        record
    }

    /// Copy of every record in insertion order.
    pub fn snapshot(&self) -> Vec<T> {
        self.inner.read().records.clone()
    }

    /// Copy of the records accepted by `predicate`, in insertion order.
    pub fn filtered(&self, predicate: impl Fn(&T) -> bool) -> Vec<T> {
        self.inner
            .read()
            .records
            .iter()
            .filter(|record| predicate(record))
            .cloned()
            .collect()
    }

    /// Number of stored records.
    pub fn len(&self) -> usize {
        self.inner.read().records.len()
    }

    /// Whether nothing has been stored yet.
    pub fn is_empty(&self) -> bool {
        self.inner.read().records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{NewResource, Resource};

    fn clock() -> FixedClock {
        FixedClock(NaiveDate::from_ymd_opt(2026, 2, 16).unwrap())
    }

    fn draft(name: &str) -> NewResource {
        NewResource {
            item_name: name.to_string(),
            category: "Books".to_string(),
            description: "used".to_string(),
            availability: "Available".to_string(),
            price: 100,
            location: "Library".to_string(),
            image: None,
        }
    }

    #[test]
    fn append_assigns_sequential_ids_and_date() {
        let store: Store<Resource> = Store::with_clock(clock());
        let first = store.append(draft("One"));
        let second = store.append(draft("Two"));

        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
        assert_eq!(second.date_posted, clock().0);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn snapshot_is_detached_from_later_appends() {
        let store: Store<Resource> = Store::with_clock(clock());
        store.append(draft("One"));
        let snapshot = store.snapshot();
        store.append(draft("Two"));

        assert_eq!(snapshot.len(), 1);
        assert_eq!(store.snapshot().len(), 2);
    }

    #[test]
    fn clones_share_records() {
        let store: Store<Resource> = Store::with_clock(clock());
        let handle = store.clone();
        handle.append(draft("Shared"));

        assert!(!store.is_empty());
        assert_eq!(store.snapshot()[0].item_name, "Shared");
    }

    #[test]
    fn filtered_preserves_insertion_order() {
        let store: Store<Resource> = Store::with_clock(clock());
        for name in ["c", "a", "b", "a2"] {
            store.append(draft(name));
        }
        let names: Vec<_> = store
            .filtered(|record| record.item_name.starts_with('a'))
            .into_iter()
            .map(|record| record.item_name)
            .collect();
        assert_eq!(names, vec!["a", "a2"]);
    }
}
