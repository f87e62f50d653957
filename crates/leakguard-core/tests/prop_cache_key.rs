//! Property tests for cache key derivation
//!
//! Two logical requests collide exactly when their URL and parameters
//! match, regardless of the order parameters were assembled in.

use proptest::prelude::*;
use serde_json::{Map, Value};

use leakguard_core::CacheStore;

fn object_from<'a>(pairs: impl Iterator<Item = (&'a String, &'a i64)>) -> Value {
    let map: Map<String, Value> = pairs
        .map(|(k, v)| (k.clone(), Value::Number((*v).into())))
        .collect();
    Value::Object(map)
}

proptest! {
    #[test]
    fn key_is_insertion_order_independent(
        params in prop::collection::btree_map("[a-z]{1,8}", 0i64..1000, 1..6)
    ) {
        let forward = object_from(params.iter());
        let reversed = object_from(params.iter().rev());

        prop_assert_eq!(
            CacheStore::cache_key("/cases", Some(&forward)),
            CacheStore::cache_key("/cases", Some(&reversed))
        );
    }

    #[test]
    fn key_separates_distinct_parameters(
        params in prop::collection::btree_map("[a-z]{1,8}", 0i64..1000, 1..6),
        bump in 1i64..100
    ) {
        let original = object_from(params.iter());

        let mut changed = params.clone();
        let first_key = changed.keys().next().cloned().unwrap();
        *changed.get_mut(&first_key).unwrap() += bump;
        let changed = object_from(changed.iter());

        prop_assert_ne!(
            CacheStore::cache_key("/cases", Some(&original)),
            CacheStore::cache_key("/cases", Some(&changed))
        );
    }

    #[test]
    fn key_separates_distinct_urls(
        params in prop::collection::btree_map("[a-z]{1,8}", 0i64..1000, 0..4)
    ) {
        let payload = object_from(params.iter());

        prop_assert_ne!(
            CacheStore::cache_key("/cases", Some(&payload)),
            CacheStore::cache_key("/coatings", Some(&payload))
        );
    }
}
