use std::collections::BTreeMap;

use pod_readiness::{ReadinessStore, ReporterKey};
use proptest::prelude::*;

fn writes() -> impl Strategy<Value = Vec<(Option<String>, bool)>> {
    prop::collection::vec((prop::option::of("[a-d]"), any::<bool>()), 0..40)
}

fn key_of(name: &Option<String>) -> ReporterKey {
    ReporterKey::resolve(name.as_deref()).unwrap()
}

proptest! {
    #[test]
    fn aggregate_is_and_of_last_value_per_key(ops in writes()) {
        let store = ReadinessStore::with_keys();
        let mut expected: BTreeMap<String, bool> = BTreeMap::new();

        for (name, value) in &ops {
            let key = key_of(name);
            expected.insert(key.as_str().to_owned(), *value);
            let snap = store.report(key, *value);
            prop_assert_eq!(snap.ready, expected.values().all(|v| *v));
        }

        let snap = store.snapshot();
        prop_assert_eq!(&snap.reporters, &expected);
        prop_assert_eq!(snap.ready, expected.values().all(|v| *v));
    }

    #[test]
    fn replaying_writes_reproduces_state(ops in writes()) {
        let first = ReadinessStore::with_keys();
        let second = ReadinessStore::with_keys();
        for (name, value) in &ops {
            first.report(key_of(name), *value);
        }
        for (name, value) in &ops {
            second.report(key_of(name), *value);
        }
        prop_assert_eq!(first.snapshot(), second.snapshot());
    }

    #[test]
    fn direct_mode_tracks_last_write(ops in writes()) {
        let store = ReadinessStore::direct();
        for (name, value) in &ops {
            store.report(key_of(name), *value);
        }
        let expected = ops.last().map(|(_, v)| *v).unwrap_or(true);
        let snap = store.snapshot();
        prop_assert_eq!(snap.ready, expected);
        prop_assert!(snap.reporters.is_empty());
    }
}
