//! Property tests: insertion order, selection complement and reorder.

use std::collections::BTreeSet;
use std::sync::Arc;

use porenet_core::RegenMode;
use porenet_models::{ModelArgs, Models, ObjectRef, RegenRequest, Registry};
use porenet_test_utils::fixtures::ConstModel;
use porenet_test_utils::linear_network;
use proptest::prelude::*;

fn mode_from(i: u8) -> RegenMode {
    RegenMode::ALL[(i % 4) as usize]
}

/// Distinct property names with a policy each, in random insertion order.
fn arb_entries() -> impl Strategy<Value = Vec<(String, RegenMode)>> {
    prop::collection::btree_map("[a-h]{1,3}", 0u8..4, 1..10)
        .prop_map(|map| {
            map.into_iter()
                .map(|(name, m)| (format!("pore.{name}"), mode_from(m)))
                .collect::<Vec<_>>()
        })
        .prop_shuffle()
}

fn populated(entries: &[(String, RegenMode)]) -> (std::rc::Rc<Registry>, ObjectRef) {
    let registry = Registry::new();
    let net = linear_network(&registry, "net", 2).unwrap();
    for (name, mode) in entries {
        net.add_model(name, ConstModel::shared("test.const"), *mode, ModelArgs::new())
            .unwrap();
    }
    (registry, net)
}

proptest! {
    #[test]
    fn iteration_follows_insertion(entries in arb_entries()) {
        let (_registry, net) = populated(&entries);
        let expected: Vec<String> = entries.iter().map(|(n, _)| n.clone()).collect();
        prop_assert_eq!(net.models().keys(), expected);
    }

    #[test]
    fn inclusive_and_exclude_partition_the_eligible_set(
        entries in arb_entries(),
        picks in prop::collection::vec(any::<bool>(), 10),
    ) {
        let (_registry, net) = populated(&entries);
        let named: Vec<String> = entries
            .iter()
            .zip(&picks)
            .filter(|(_, pick)| **pick)
            .map(|((n, _), _)| n.clone())
            .collect();
        prop_assume!(!named.is_empty());

        let inclusive = net.regenerate(RegenRequest::only(named.clone())).unwrap();
        let exclude = net.regenerate(RegenRequest::exclude(named.clone())).unwrap();

        let named_set: BTreeSet<&String> = named.iter().collect();
        let expected_inclusive: Vec<String> = entries
            .iter()
            .filter(|(n, m)| named_set.contains(n) && !m.is_frozen())
            .map(|(n, _)| n.clone())
            .collect();
        let expected_exclude: Vec<String> = entries
            .iter()
            .filter(|(n, m)| !named_set.contains(n) && !m.is_frozen())
            .map(|(n, _)| n.clone())
            .collect();
        prop_assert_eq!(&inclusive.regenerated, &expected_inclusive);
        prop_assert_eq!(&exclude.regenerated, &expected_exclude);
    }

    #[test]
    fn reorder_places_moved_keys_and_keeps_the_rest(
        entries in arb_entries(),
        picks in prop::collection::vec((any::<bool>(), 0usize..12), 10),
    ) {
        let models = Models::new();
        for (name, mode) in &entries {
            let entry = porenet_models::ModelEntry::new(
                ConstModel::shared("test.const"),
                name.as_str(),
                *mode,
                &ModelArgs::new(),
            )
            .unwrap();
            models.insert(name, entry);
        }

        // one target index per moved key, no two keys on the same index
        let mut used = BTreeSet::new();
        let moves: Vec<(String, usize)> = entries
            .iter()
            .zip(&picks)
            .filter(|(_, (pick, index))| *pick && used.insert(*index))
            .map(|((n, _), (_, index))| (n.clone(), *index))
            .collect();

        let before = models.keys();
        models.reorder(moves.clone()).unwrap();
        let after = models.keys();

        prop_assert_eq!(after.len(), before.len());
        let moved: BTreeSet<&String> = moves.iter().map(|(n, _)| n).collect();
        let rest_before: Vec<&String> = before.iter().filter(|n| !moved.contains(n)).collect();
        let rest_after: Vec<&String> = after.iter().filter(|n| !moved.contains(n)).collect();
        prop_assert_eq!(rest_before, rest_after);

        // Applying the inserts in ascending index order puts every key whose
        // target was in range at exactly that index.
        let mut sorted = moves.clone();
        sorted.sort_by_key(|(_, index)| *index);
        let mut expected: Vec<String> = before.iter().filter(|n| !moved.contains(n)).cloned().collect();
        for (name, index) in sorted {
            let at = index.min(expected.len());
            expected.insert(at, name);
        }
        prop_assert_eq!(after, expected);
    }
}

#[test]
fn reorder_example_from_three_keys() {
    let models = Models::new();
    for name in ["pore.seed", "throat.seed", "throat.length"] {
        let entry = porenet_models::ModelEntry::new(
            Arc::new(ConstModel::new("test.const")),
            name,
            RegenMode::Normal,
            &ModelArgs::new(),
        )
        .unwrap();
        models.insert(name, entry);
    }
    models
        .reorder([("pore.seed", 1), ("throat.length", 0)])
        .unwrap();
    assert_eq!(
        models.keys(),
        vec!["throat.length", "pore.seed", "throat.seed"]
    );
}
