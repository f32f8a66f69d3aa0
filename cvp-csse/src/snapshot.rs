use crate::case_set::CaseSet;
use std::sync::OnceLock;

/// Process-wide single-slot cache for the fetched snapshot.
///
/// Replaces framework-level memoization with an explicit object: the slot
/// is populated at most once per process and handed into the render
/// pipeline by reference. There is no invalidation; a new snapshot means a
/// new process.
#[derive(Debug, Default)]
pub struct SnapshotCache {
    slot: OnceLock<CaseSet>,
}

impl SnapshotCache {
    pub const fn new() -> Self {
        SnapshotCache {
            slot: OnceLock::new(),
        }
    }

    /// The cached snapshot, if populated.
    pub fn get(&self) -> Option<&CaseSet> {
        self.slot.get()
    }

    /// Populate the slot. The first write wins; later calls return the
    /// already-cached snapshot unchanged.
    pub fn populate(&self, case_set: CaseSet) -> &CaseSet {
        self.slot.get_or_init(|| case_set)
    }

    /// Return the cached snapshot, running `fetch` only on the first call.
    /// A failed fetch leaves the slot empty so a later call may retry.
    pub fn get_or_populate_with<E, F>(&self, fetch: F) -> Result<&CaseSet, E>
    where
        F: FnOnce() -> Result<CaseSet, E>,
    {
        if let Some(cached) = self.slot.get() {
            return Ok(cached);
        }
        let fetched = fetch()?;
        Ok(self.slot.get_or_init(|| fetched))
    }
}

#[cfg(test)]
mod tests {
    use super::SnapshotCache;
    use crate::case_set::CaseSet;
    use crate::case_table::{CaseTable, FetchError};

    fn sample_set(count: i64) -> CaseSet {
        let body = format!(
            "Province/State,Country/Region,Lat,Long,1/22/20\n,Chile,-35.0,-71.0,{}\n",
            count
        );
        let table = CaseTable::parse_csv(&body).unwrap();
        CaseSet::from_tables(table.clone(), table.clone(), table).unwrap()
    }

    #[test]
    fn test_first_population_wins() {
        let cache = SnapshotCache::new();
        assert!(cache.get().is_none());
        let first = cache.populate(sample_set(1)).clone();
        let second = cache.populate(sample_set(2)).clone();
        assert_eq!(first, second);
    }

    #[test]
    fn test_fetch_runs_only_once() {
        let cache = SnapshotCache::new();
        let mut calls = 0;
        for _ in 0..3 {
            cache
                .get_or_populate_with(|| -> Result<_, FetchError> {
                    calls += 1;
                    Ok(sample_set(7))
                })
                .unwrap();
        }
        assert_eq!(calls, 1);
    }

    #[test]
    fn test_fetch_error_leaves_slot_empty() {
        let cache = SnapshotCache::new();
        let result = cache.get_or_populate_with(|| Err(FetchError::EmptyResponse));
        assert!(result.is_err());
        assert!(cache.get().is_none());
    }
}
