//! Property-Based Tests for Cache Module
//!
//! Uses proptest to check storage, expiry and key canonicalization, plus the
//! sliding-window budget that gates cache population.

use proptest::prelude::*;
use serde_json::{json, Value};
use std::collections::{BTreeMap, HashMap};
use std::time::Duration;
use tokio::time::Instant;

use crate::cache::{ApiRequest, CacheStore, Lookup};
use crate::limiter::{Admission, SlidingWindow};

// == Strategies ==
/// Generates cache keys shaped like canonical request keys
fn key_strategy() -> impl Strategy<Value = String> {
    "/[a-z]{1,12}(/[0-9]{1,4})?"
}

/// Generates JSON payloads with a collection field
fn payload_strategy() -> impl Strategy<Value = Value> {
    prop::collection::vec(0u32..10_000, 0..8).prop_map(|ids| json!({ "matches": ids }))
}

/// Generates query parameters with distinct names
fn params_strategy() -> impl Strategy<Value = HashMap<String, String>> {
    prop::collection::hash_map("[a-zA-Z]{1,10}", "[A-Z0-9]{1,8}", 0..6)
}

/// Generates parameters full of characters that mean something in a query
fn reserved_params_strategy() -> impl Strategy<Value = BTreeMap<String, String>> {
    prop::collection::btree_map("[a-c&=% +]{1,4}", "[a-c0-9&=% +?#]{1,6}", 0..5)
}

/// Generates a cache operation sequence
#[derive(Debug, Clone)]
enum CacheOp {
    Set { key: String, ttl_ms: u64 },
    Lookup { key: String },
    Advance { ms: u64 },
}

fn cache_op_strategy() -> impl Strategy<Value = CacheOp> {
    prop_oneof![
        (key_strategy(), 1u64..5_000).prop_map(|(key, ttl_ms)| CacheOp::Set { key, ttl_ms }),
        key_strategy().prop_map(|key| CacheOp::Lookup { key }),
        (0u64..3_000).prop_map(|ms| CacheOp::Advance { ms }),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    // Storing then reading before expiry returns the stored value.
    #[test]
    fn prop_fresh_roundtrip(
        key in key_strategy(),
        value in payload_strategy(),
        ttl_ms in 1u64..1_000_000,
    ) {
        let mut store = CacheStore::new();
        let now = Instant::now();

        store.set_at(key.clone(), value.clone(), Duration::from_millis(ttl_ms), now);

        prop_assert_eq!(store.lookup_at(&key, now), Lookup::Fresh(value));
    }

    // An entry is valid strictly before its TTL and absent from then on.
    #[test]
    fn prop_expiry_boundary(
        key in key_strategy(),
        value in payload_strategy(),
        ttl_ms in 1u64..1_000_000,
        extra_ms in 0u64..1_000_000,
    ) {
        let mut store = CacheStore::new();
        let now = Instant::now();
        let ttl = Duration::from_millis(ttl_ms);

        store.set_at(key.clone(), value.clone(), ttl, now);
        let before = now + ttl - Duration::from_millis(1);
        prop_assert_eq!(store.lookup_at(&key, before), Lookup::Fresh(value.clone()));

        let after = now + ttl + Duration::from_millis(extra_ms);
        prop_assert_eq!(store.lookup_at(&key, after), Lookup::Expired(value.clone()));
        prop_assert_eq!(store.lookup_at(&key, after), Lookup::Expired(value));
        prop_assert_eq!(store.get_at(&key, after), None);
        prop_assert_eq!(store.lookup_at(&key, after), Lookup::Missing);
    }

    // The second write wins regardless of either TTL.
    #[test]
    fn prop_overwrite_semantics(
        key in key_strategy(),
        value1 in payload_strategy(),
        value2 in payload_strategy(),
        ttl1_ms in 1u64..1_000_000,
        ttl2_ms in 1u64..1_000_000,
    ) {
        let mut store = CacheStore::new();
        let now = Instant::now();

        store.set_at(key.clone(), value1, Duration::from_millis(ttl1_ms), now);
        store.set_at(key.clone(), value2.clone(), Duration::from_millis(ttl2_ms), now);

        prop_assert_eq!(store.lookup_at(&key, now), Lookup::Fresh(value2));
        prop_assert_eq!(store.len(), 1);
    }

    // Hits and misses always add up to the number of lookups, and the store
    // never returns a value whose TTL has run out.
    #[test]
    fn prop_statistics_and_expiry(ops in prop::collection::vec(cache_op_strategy(), 1..60)) {
        let mut store = CacheStore::new();
        let mut now = Instant::now();
        let mut expiries: HashMap<String, Instant> = HashMap::new();
        let mut lookups = 0u64;

        for op in ops {
            match op {
                CacheOp::Set { key, ttl_ms } => {
                    let ttl = Duration::from_millis(ttl_ms);
                    store.set_at(key.clone(), json!(ttl_ms), ttl, now);
                    expiries.insert(key, now + ttl);
                }
                CacheOp::Lookup { key } => {
                    lookups += 1;
                    let fresh = store.lookup_at(&key, now).fresh().is_some();
                    let expected = expiries.get(&key).is_some_and(|exp| now < *exp);
                    prop_assert_eq!(fresh, expected, "key {}", key);
                }
                CacheOp::Advance { ms } => now += Duration::from_millis(ms),
            }
        }

        let stats = store.stats();
        prop_assert_eq!(stats.hits + stats.misses, lookups);
        prop_assert_eq!(stats.total_entries, store.len());
    }

    // Parameter insertion order never changes the cache key.
    #[test]
    fn prop_key_is_order_independent(params in params_strategy()) {
        let mut pairs: Vec<(String, String)> = params.into_iter().collect();
        let forward = ApiRequest::new("/matches").unwrap().with_params(pairs.clone());
        pairs.reverse();
        let backward = ApiRequest::new("/matches").unwrap().with_params(pairs);

        prop_assert_eq!(forward.cache_key(), backward.cache_key());
    }

    // Requests differing in one parameter value never share a key.
    #[test]
    fn prop_distinct_requests_do_not_collide(
        params in params_strategy(),
        name in "[a-zA-Z]{1,10}",
        v1 in "[A-Z0-9]{1,8}",
        v2 in "[A-Z0-9]{1,8}",
    ) {
        prop_assume!(v1 != v2);
        let base = ApiRequest::new("/matches").unwrap().with_params(params);
        let a = base.clone().with_param(&name, &v1);
        let b = base.with_param(&name, &v2);

        prop_assert_ne!(a.cache_key(), b.cache_key());
    }

    // Two requests share a key exactly when they forward the same parameters,
    // even when names and values contain `&`, `=`, `%` or spaces.
    #[test]
    fn prop_key_identifies_params(
        a in reserved_params_strategy(),
        b in reserved_params_strategy(),
    ) {
        let ra = ApiRequest::new("/matches").unwrap().with_params(a);
        let rb = ApiRequest::new("/matches").unwrap().with_params(b);

        prop_assert_eq!(ra.params() == rb.params(), ra.cache_key() == rb.cache_key());
    }

    // A key parsed back as an endpoint yields the request it came from.
    #[test]
    fn prop_key_parses_back(params in reserved_params_strategy()) {
        let request = ApiRequest::new("/matches").unwrap().with_params(params);

        prop_assert_eq!(ApiRequest::new(&request.cache_key()).unwrap(), request);
    }

    // No trailing window ever holds more than `max_requests` admissions.
    #[test]
    fn prop_sliding_window_budget(
        max_requests in 1usize..15,
        gaps_ms in prop::collection::vec(0u64..20_000, 1..120),
    ) {
        let window = Duration::from_millis(60_000);
        let limiter = SlidingWindow::new(max_requests, window);
        let mut now = Instant::now();
        let mut admitted: Vec<Instant> = Vec::new();

        for gap in gaps_ms {
            now += Duration::from_millis(gap);
            let in_window = admitted.iter().filter(|t| now - **t < window).count();

            let decision = limiter.admit_at(now);
            let expected = if in_window < max_requests {
                Admission::Admitted
            } else {
                Admission::Rejected
            };
            prop_assert_eq!(decision, expected);

            if decision == Admission::Admitted {
                admitted.push(now);
            }
            let after = admitted.iter().filter(|t| now - **t < window).count();
            prop_assert!(after <= max_requests);
        }
    }
}
