//! Hand-computed repertoires on small logic networks, whole versus cut.
//!
//! Network used throughout (tables indexed by `[s0, s1, s2]`):
//!
//! ```text
//! n0 ← s1          (copy)
//! n1 ← coin        (0.5 regardless of state)
//! n2 ← s0 OR s1
//! ```

use causal_repertoire::{
    Direction, Network, NetworkState, Repertoire, RepertoireCache, RepertoireError, Subsystem,
};
use ndarray::{ArrayD, IxDyn};

const EPS: f64 = 1e-12;

// ─── helpers ─────────────────────────────────────────────────────────────────

fn table(f: impl Fn(usize, usize, usize) -> f64) -> ArrayD<f64> {
    ArrayD::from_shape_fn(IxDyn(&[2, 2, 2]), |ix| f(ix[0], ix[1], ix[2]))
}

fn logic_network() -> Network {
    Network::new(vec![
        table(|_, s1, _| s1 as f64),
        table(|_, _, _| 0.5),
        table(|s0, s1, _| if s0 == 1 || s1 == 1 { 1.0 } else { 0.0 }),
    ])
    .unwrap()
}

fn subsystem<'a>(net: &'a Network, nodes: &[usize], current: &[u8], past: &[u8]) -> Subsystem<'a> {
    Subsystem::new(
        nodes,
        NetworkState::new(current).unwrap(),
        NetworkState::new(past).unwrap(),
        net,
    )
    .unwrap()
}

fn assert_entries(r: &Repertoire, shape: &[usize], entries: &[(&[usize], f64)]) {
    assert_eq!(r.shape(), shape);
    for &(index, want) in entries {
        let got = r.get(index).unwrap();
        assert!((got - want).abs() < EPS, "at {index:?}: got {got}, want {want}");
    }
}

// ─── cause ───────────────────────────────────────────────────────────────────

#[test]
fn or_gate_on_in_whole_system() {
    let net = logic_network();
    let s = subsystem(&net, &[0, 1, 2], &[0, 0, 1], &[0, 0, 0]);
    // n1 is averaged: P(n2 ON | s0=0) = 0.5, P(n2 ON | s0=1) = 1.
    let r = s.cause_repertoire(&[2], &[0]).unwrap();
    assert_entries(
        &r,
        &[2, 1, 1],
        &[(&[0, 0, 0], 1.0 / 3.0), (&[1, 0, 0], 2.0 / 3.0)],
    );
}

#[test]
fn or_gate_on_with_external_input_off() {
    let net = logic_network();
    // n1 external, OFF in the past: n2 ON means n0 was ON.
    let s = subsystem(&net, &[0, 2], &[0, 0, 1], &[0, 0, 0]);
    let r = s.cause_repertoire(&[2], &[0]).unwrap();
    assert_entries(&r, &[2, 1, 1], &[(&[0, 0, 0], 0.0), (&[1, 0, 0], 1.0)]);
}

#[test]
fn or_gate_on_with_external_input_on() {
    let net = logic_network();
    // n1 external, ON in the past: n2 says nothing about n0.
    let s = subsystem(&net, &[0, 2], &[0, 0, 1], &[0, 1, 0]);
    let r = s.cause_repertoire(&[2], &[0]).unwrap();
    assert_entries(&r, &[2, 1, 1], &[(&[0, 0, 0], 0.5), (&[1, 0, 0], 0.5)]);
}

#[test]
fn two_node_mechanism_multiplies_constraints() {
    let net = logic_network();
    // n0 OFF says s1 was 0; n2 ON alone favours s1 = 1 two to one.
    let s = subsystem(&net, &[0, 1, 2], &[0, 0, 1], &[0, 0, 0]);
    let r = s.cause_repertoire(&[0, 2], &[1]).unwrap();
    assert_entries(&r, &[1, 2, 1], &[(&[0, 0, 0], 1.0), (&[0, 1, 0], 0.0)]);

    let r = s.cause_repertoire(&[2], &[1]).unwrap();
    assert_entries(
        &r,
        &[1, 2, 1],
        &[(&[0, 0, 0], 1.0 / 3.0), (&[0, 1, 0], 2.0 / 3.0)],
    );
}

#[test]
fn impossible_mechanism_state_is_left_unnormalized() {
    let net = logic_network();
    // n2 ON now, but both its inputs are external and were OFF.
    let s = subsystem(&net, &[2], &[0, 0, 1], &[0, 0, 0]);
    let r = s.cause_repertoire(&[2], &[2]).unwrap();
    assert!(r.is_zero());
    assert_eq!(r.shape(), &[1, 1, 2]);
    assert_eq!(r.total(), 0.0);
}

// ─── effect ──────────────────────────────────────────────────────────────────

#[test]
fn effect_over_two_purview_nodes_is_a_product() {
    let net = logic_network();
    let s = subsystem(&net, &[0, 1, 2], &[0, 1, 0], &[0, 0, 0]);
    let r = s.effect_repertoire(&[1], &[0, 2]).unwrap();
    assert_entries(
        &r,
        &[2, 1, 2],
        &[
            (&[1, 0, 1], 1.0),
            (&[1, 0, 0], 0.0),
            (&[0, 0, 1], 0.0),
            (&[0, 0, 0], 0.0),
        ],
    );

    let s = subsystem(&net, &[0, 1, 2], &[0, 0, 0], &[0, 0, 0]);
    let r = s.effect_repertoire(&[1], &[0, 2]).unwrap();
    assert_entries(
        &r,
        &[2, 1, 2],
        &[
            (&[0, 0, 0], 0.5),
            (&[0, 0, 1], 0.5),
            (&[1, 0, 0], 0.0),
            (&[1, 0, 1], 0.0),
        ],
    );
}

#[test]
fn effect_of_coin_node_is_uniform() {
    let net = logic_network();
    let s = subsystem(&net, &[0, 1, 2], &[1, 1, 1], &[0, 0, 0]);
    let mechanisms: [&[usize]; 4] = [&[], &[0], &[1, 2], &[0, 1, 2]];
    for mechanism in mechanisms {
        let r = s.effect_repertoire(mechanism, &[1]).unwrap();
        assert_entries(&r, &[1, 2, 1], &[(&[0, 0, 0], 0.5), (&[0, 1, 0], 0.5)]);
    }
}

#[test]
fn effect_fixes_external_nodes_at_current_state() {
    let net = logic_network();
    // n1 external and ON now: n2 is ON next regardless of the mechanism.
    let whole_cut = subsystem(&net, &[0, 2], &[0, 1, 0], &[0, 0, 0]);
    let r = whole_cut.unconstrained_effect_repertoire(&[2]).unwrap();
    assert_entries(&r, &[1, 1, 2], &[(&[0, 0, 0], 0.0), (&[0, 0, 1], 1.0)]);

    // Inside the subsystem and unconstrained, n1 is averaged instead.
    let whole = subsystem(&net, &[0, 1, 2], &[0, 1, 0], &[0, 0, 0]);
    let r = whole.effect_repertoire(&[0], &[2]).unwrap();
    assert_entries(&r, &[1, 1, 2], &[(&[0, 0, 0], 0.5), (&[0, 0, 1], 0.5)]);
}

// ─── two-node copy ───────────────────────────────────────────────────────────

#[test]
fn copy_node_on_implies_source_was_on() {
    let net = Network::new(vec![
        ArrayD::from_elem(IxDyn(&[2, 2]), 0.5),
        ArrayD::from_shape_fn(IxDyn(&[2, 2]), |ix| ix[0] as f64),
    ])
    .unwrap();
    let s = subsystem(&net, &[0, 1], &[0, 1], &[0, 0]);
    let r = s.cause_repertoire(&[1], &[0]).unwrap();
    assert_entries(&r, &[2, 1], &[(&[0, 0], 0.0), (&[1, 0], 1.0)]);
}

// ─── cache and validation ────────────────────────────────────────────────────

#[test]
fn cache_agrees_with_direct_computation() {
    let net = logic_network();
    let s = subsystem(&net, &[0, 1, 2], &[0, 1, 1], &[1, 0, 0]);
    let mut cache = RepertoireCache::with_capacity(&s, 4);
    for direction in [Direction::Cause, Direction::Effect] {
        for _ in 0..2 {
            let cached = cache.repertoire(direction, &[1, 2], &[0, 2]).unwrap();
            assert_eq!(cached, s.repertoire(direction, &[1, 2], &[0, 2]).unwrap());
        }
    }
    assert_eq!(cache.hits(), 2);
    assert_eq!(cache.misses(), 2);
}

#[test]
fn malformed_inputs_fail_fast() {
    let net = logic_network();
    assert_eq!(
        Subsystem::new(
            &[0],
            NetworkState::new(&[0, 0]).unwrap(),
            NetworkState::new(&[0, 0, 0]).unwrap(),
            &net,
        )
        .unwrap_err(),
        RepertoireError::StateLength { expected: 3, found: 2 }
    );
    assert_eq!(
        NetworkState::new(&[0, 1, 7]).unwrap_err(),
        RepertoireError::NonBinaryState { index: 2, value: 7 }
    );

    let s = subsystem(&net, &[0, 2], &[0, 0, 0], &[0, 0, 0]);
    assert_eq!(
        s.effect_repertoire(&[1], &[0]).unwrap_err(),
        RepertoireError::MechanismOutsideSubsystem { index: 1 }
    );
    assert_eq!(
        s.cause_repertoire(&[0], &[3]).unwrap_err(),
        RepertoireError::NodeOutOfRange { index: 3, size: 3 }
    );
}
