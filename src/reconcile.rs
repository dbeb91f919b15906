//! Entity reconciliation: keeps a tracked collection in step with the
//! entities a provider reports each tick.
//!
//! A pass marks every tracked entity dead, revives the ones re-observed,
//! appends arrivals and prunes whatever stayed dead. Matching is done through
//! an id index, so a pass is linear in the size of both collections.

use std::collections::HashMap;
use std::hash::Hash;

/// One entity tracked by a tab, keyed by a stable id.
#[derive(Debug, Clone, PartialEq)]
pub struct TrackedEntity<K, T> {
    pub id: K,
    pub payload: T,
    /// Set during a reconciliation pass when the id was re-observed.
    pub alive: bool,
}

impl<K, T> TrackedEntity<K, T> {
    pub fn new(id: K, payload: T) -> Self {
        Self {
            id,
            payload,
            alive: true,
        }
    }
}

/// Counts produced by one reconciliation pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReconcileStats {
    pub arrived: usize,
    pub departed: usize,
    pub retained: usize,
}

impl ReconcileStats {
    /// Returns true if the pass changed the set of tracked ids.
    pub fn changed(&self) -> bool {
        self.arrived > 0 || self.departed > 0
    }
}

/// Reconciles `tracked` against the freshly observed `current` set.
///
/// * ids in both: `update` is called with the surviving payload and the new raw value.
/// * ids only in `current`: `create` builds a payload and the entity is appended.
/// * ids only in `tracked`: removed.
///
/// Duplicate ids in `current` are folded into their first occurrence, so the
/// result never holds an id twice. Survivors keep their relative order and
/// arrivals follow in observation order.
pub fn reconcile<K, T, R, C, U>(
    tracked: &mut Vec<TrackedEntity<K, T>>,
    current: Vec<(K, R)>,
    mut create: C,
    mut update: U,
) -> ReconcileStats
where
    K: Eq + Hash + Clone,
    C: FnMut(&K, R) -> T,
    U: FnMut(&mut T, R),
{
    for entity in tracked.iter_mut() {
        entity.alive = false;
    }

    let mut index: HashMap<K, usize> = tracked
        .iter()
        .enumerate()
        .map(|(i, e)| (e.id.clone(), i))
        .collect();

    let before = tracked.len();
    let mut stats = ReconcileStats::default();

    for (id, raw) in current {
        match index.get(&id) {
            Some(&i) => {
                let entity = &mut tracked[i];
                // Already seen in this pass.
                if entity.alive {
                    continue;
                }
                entity.alive = true;
                update(&mut entity.payload, raw);
                stats.retained += 1;
            }
            None => {
                let payload = create(&id, raw);
                index.insert(id.clone(), tracked.len());
                tracked.push(TrackedEntity::new(id, payload));
                stats.arrived += 1;
            }
        }
    }

    tracked.retain(|e| e.alive);
    stats.departed = before - stats.retained;
    stats
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::collections::HashSet;

    fn tracked_ids<K: Clone, T>(tracked: &[TrackedEntity<K, T>]) -> Vec<K> {
        tracked.iter().map(|e| e.id.clone()).collect()
    }

    fn observe(ids: &[u32]) -> Vec<(u32, u64)> {
        ids.iter().map(|&id| (id, u64::from(id) * 10)).collect()
    }

    fn run(tracked: &mut Vec<TrackedEntity<u32, u64>>, ids: &[u32]) -> ReconcileStats {
        reconcile(tracked, observe(ids), |_, raw| raw, |p, raw| *p = raw)
    }

    #[test]
    fn test_reconcile_lifecycle() {
        let mut tracked = Vec::new();
        run(&mut tracked, &[1, 2, 3]);

        let stats = run(&mut tracked, &[2, 3, 4]);

        let ids: HashSet<u32> = tracked_ids(&tracked).into_iter().collect();
        assert_eq!(ids, HashSet::from([2, 3, 4]));
        assert_eq!(stats.arrived, 1);
        assert_eq!(stats.departed, 1);
        assert_eq!(stats.retained, 2);
        assert!(stats.changed());
    }

    #[test]
    fn test_reconcile_is_idempotent() {
        let mut tracked = Vec::new();
        run(&mut tracked, &[5, 6, 7]);
        let first = tracked_ids(&tracked);

        let stats = run(&mut tracked, &[5, 6, 7]);

        assert_eq!(tracked_ids(&tracked), first);
        assert!(tracked.iter().all(|e| e.alive));
        assert!(!stats.changed());
    }

    #[test]
    fn test_reconcile_updates_survivors_only() {
        let mut tracked = vec![TrackedEntity::new(1u32, 0u64)];
        let mut created = Vec::new();
        reconcile(
            &mut tracked,
            vec![(1, 100), (2, 200)],
            |id, raw| {
                created.push(*id);
                raw
            },
            |p, raw| *p += raw,
        );

        assert_eq!(created, vec![2]);
        assert_eq!(tracked[0].payload, 100);
        assert_eq!(tracked[1].payload, 200);
    }

    #[test]
    fn test_reconcile_folds_duplicate_ids() {
        let mut tracked = vec![TrackedEntity::new(1u32, 0u64)];

        run(&mut tracked, &[1, 1, 9, 9, 9]);

        assert_eq!(tracked_ids(&tracked), vec![1, 9]);
        assert_eq!(tracked[0].payload, 10);
    }

    #[test]
    fn test_reconcile_empty_current_prunes_everything() {
        let mut tracked = Vec::new();
        run(&mut tracked, &[1, 2]);

        let stats = run(&mut tracked, &[]);

        assert!(tracked.is_empty());
        assert_eq!(stats.departed, 2);
    }

    #[test]
    fn test_reconcile_string_ids() {
        let mut tracked: Vec<TrackedEntity<String, u8>> = Vec::new();
        let observed = |names: &[&str]| -> Vec<(String, u8)> {
            names.iter().map(|n| (n.to_string(), 0)).collect()
        };

        reconcile(&mut tracked, observed(&["sda", "nvme0n1"]), |_, r| r, |_, _| {});
        reconcile(&mut tracked, observed(&["nvme0n1", "sdb"]), |_, r| r, |_, _| {});

        assert_eq!(tracked_ids(&tracked), vec!["nvme0n1", "sdb"]);
    }

    proptest! {
        #[test]
        fn prop_reconcile_matches_observed_set(
            first in proptest::collection::vec(0u32..40, 0..30),
            second in proptest::collection::vec(0u32..40, 0..30),
        ) {
            let mut tracked = Vec::new();
            run(&mut tracked, &first);
            run(&mut tracked, &second);

            let ids = tracked_ids(&tracked);
            let unique: HashSet<u32> = ids.iter().copied().collect();
            let expected: HashSet<u32> = second.iter().copied().collect();
            prop_assert_eq!(unique.len(), ids.len());
            prop_assert_eq!(unique, expected);
            prop_assert!(tracked.iter().all(|e| e.alive));
        }
    }
}
