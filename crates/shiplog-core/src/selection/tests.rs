use super::*;
use proptest::prelude::*;

fn g(n: u8) -> GenId {
    GenId::new(n)
}

fn universe() -> Vec<GenId> {
    vec![g(1), g(2), g(3)]
}

#[test]
fn initial_state_is_empty() {
    let sel = Selection::new(universe());
    assert_eq!(sel.target(), 0);
    assert!(sel.active().is_empty());
}

#[test]
fn toggle_with_zero_target_is_a_noop() {
    let mut sel = Selection::new(universe());
    let change = sel.toggle(g(1));
    assert!(change.is_noop());
    assert!(sel.active().is_empty());
}

#[test]
fn toggle_at_capacity_evicts_oldest() {
    let mut sel = Selection::new(universe());
    sel.set_target(2, None);

    assert_eq!(sel.toggle(g(1)).activated, vec![g(1)]);
    assert_eq!(sel.toggle(g(2)).activated, vec![g(2)]);
    assert_eq!(sel.active(), [g(1), g(2)]);

    let change = sel.toggle(g(3));
    assert_eq!(change.activated, vec![g(3)]);
    assert_eq!(change.deactivated, vec![g(1)]);
    assert_eq!(sel.active(), [g(2), g(3)]);
}

#[test]
fn toggle_removes_active_member() {
    let mut sel = Selection::new(universe());
    sel.set_target(2, None);
    sel.toggle(g(1));
    sel.toggle(g(2));

    let change = sel.toggle(g(1));
    assert_eq!(change.deactivated, vec![g(1)]);
    assert!(change.activated.is_empty());
    assert_eq!(sel.active(), [g(2)]);
}

#[test]
fn target_shrink_trims_oldest_first() {
    let mut sel = Selection::new(universe());
    sel.set_target(3, None);
    sel.toggle(g(2));
    sel.toggle(g(3));
    sel.toggle(g(1));

    let change = sel.set_target(1, None);
    assert_eq!(change.deactivated, vec![g(2), g(3)]);
    assert_eq!(sel.active(), [g(1)]);
}

#[test]
fn target_shrink_retains_preferred_member() {
    let mut sel = Selection::new(universe());
    sel.set_target(3, None);
    sel.toggle(g(1));
    sel.toggle(g(2));
    sel.toggle(g(3));

    let change = sel.set_target(1, Some(g(1)));
    assert_eq!(sel.active(), [g(1)]);
    assert_eq!(change.deactivated, vec![g(2), g(3)]);
}

#[test]
fn target_growth_does_not_auto_activate() {
    let mut sel = Selection::new(universe());
    sel.set_target(1, None);
    sel.toggle(g(2));

    let change = sel.set_target(3, None);
    assert!(change.deactivated.is_empty());
    assert!(change.activated.is_empty());
    assert!(change.target_changed);
    assert_eq!(sel.active(), [g(2)]);
}

#[test]
fn target_clamps_to_universe() {
    let mut sel = Selection::new(universe());
    sel.set_target(9, None);
    assert_eq!(sel.target(), 3);
}

#[test]
fn unknown_id_is_ignored() {
    let mut sel = Selection::new(universe());
    sel.set_target(2, None);
    assert!(sel.toggle(g(7)).is_noop());
}

#[test]
fn inference_matches_gen_submaps() {
    let json = r#"{"gen1":{"kw":"120"},"gen3":{"rpm":"1500"},"port":{"rpm":"900"}}"#;
    let entry: Value = serde_json::from_str(json).unwrap();

    let mut sel = Selection::new(universe());
    let change = sel.infer_from_entry(&entry);

    assert_eq!(sel.target(), 2);
    assert_eq!(sel.active(), [g(1), g(3)]);
    assert_eq!(change.activated, vec![g(1), g(3)]);
}

#[test]
fn inference_replaces_prior_toggles() {
    let json = r#"{"gen2":{"kw":"80"}}"#;
    let entry: Value = serde_json::from_str(json).unwrap();

    let mut sel = Selection::new(universe());
    sel.set_target(2, None);
    sel.toggle(g(1));
    sel.toggle(g(3));

    let change = sel.infer_from_entry(&entry);
    assert_eq!(sel.target(), 1);
    assert_eq!(sel.active(), [g(2)]);
    assert_eq!(change.activated, vec![g(2)]);
    assert_eq!(change.deactivated, vec![g(1), g(3)]);
}

#[test]
fn empty_gen_submap_does_not_activate() {
    let json = r#"{"gen1":{},"gen2":{"kw":"80"}}"#;
    let entry: Value = serde_json::from_str(json).unwrap();

    let mut sel = Selection::new(universe());
    sel.infer_from_entry(&entry);
    assert_eq!(sel.active(), [g(2)]);
}

#[test]
fn active_sorted_is_ascending_regardless_of_activation_order() {
    let mut sel = Selection::new(universe());
    sel.set_target(3, None);
    sel.toggle(g(3));
    sel.toggle(g(1));
    assert_eq!(sel.active(), [g(3), g(1)]);
    assert_eq!(sel.active_sorted(), [g(1), g(3)]);
}

///
/// Invariant: |active| ≤ target and active ⊆ universe after any sequence
/// of transitions.
///

#[derive(Clone, Debug)]
enum Op {
    SetTarget(usize, Option<u8>),
    Toggle(u8),
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0usize..5, proptest::option::of(1u8..5)).prop_map(|(t, p)| Op::SetTarget(t, p)),
        (1u8..5).prop_map(Op::Toggle),
    ]
}

proptest! {
    #[test]
    fn transitions_preserve_invariants(ops in proptest::collection::vec(op_strategy(), 0..40)) {
        let mut sel = Selection::new(universe());

        for op in ops {
            match op {
                Op::SetTarget(t, p) => {
                    sel.set_target(t, p.map(GenId::new));
                }
                Op::Toggle(n) => {
                    sel.toggle(GenId::new(n));
                }
            }

            prop_assert!(sel.active().len() <= sel.target());
            for id in sel.active() {
                prop_assert!(sel.universe().contains(id));
            }
        }
    }
}
