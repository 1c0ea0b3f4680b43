//! Resolution must be total: no scenario record, however malformed its
//! snapshot, may fail to load.

use lbp_resolve::load_scenario;
use lbp_schema::ScenarioRecord;
use proptest::prelude::*;
use serde_json::Value;

/// Arbitrary JSON values a few levels deep, biased toward the shapes that
/// appear in real snapshots (objects with string/number leaves).
fn arb_json() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<f64>().prop_map(|n| serde_json::Number::from_f64(n)
            .map(Value::Number)
            .unwrap_or(Value::Null)),
        "[a-z0-9-]{0,12}".prop_map(Value::String),
    ];
    leaf.prop_recursive(3, 64, 8, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(Value::Array),
            prop::collection::hash_map("[a-z_]{1,20}", inner, 0..6).prop_map(|m| {
                Value::Object(m.into_iter().collect())
            }),
        ]
    })
}

proptest! {
    #[test]
    fn load_scenario_is_total_over_arbitrary_snapshots(snapshot in arb_json()) {
        let mut record = ScenarioRecord::named("fuzz");
        record.payload_snapshot = Some(snapshot);

        let request = load_scenario(Some(&record)).expect("a present record always loads");

        // Structural invariants hold whatever the snapshot contained
        prop_assert!(request.runtime.bandwidth_hz.is_some());
        prop_assert_eq!(request.runtime.uplink.elevation_deg, None);
        prop_assert_eq!(request.runtime.downlink.elevation_deg, None);
        prop_assert!(request.overrides.is_none());
    }

    #[test]
    fn resolved_interference_never_hides_present_ratios(snapshot in arb_json()) {
        let mut record = ScenarioRecord::named("fuzz");
        record.payload_snapshot = Some(snapshot);
        let request = load_scenario(Some(&record)).expect("a present record always loads");

        for block in [
            &request.runtime.uplink.interference,
            &request.runtime.downlink.interference,
        ] {
            if block.has_ratio() {
                prop_assert!(block.applied);
            }
        }
    }
}
