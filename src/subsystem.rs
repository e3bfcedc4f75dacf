/*
 * This source code is licensed under the Business Source License 1.1.
 * See LICENSE in the root directory for full details.
 */

//! Candidate subsystems and their cause/effect repertoires.
//!
//! A [`Subsystem`] is a set of network nodes together with the network-wide
//! current and past states. Nodes outside the set are *external*: they act as
//! fixed boundary conditions, observed in their past state for causes and in
//! their current state for effects. Nodes inside the set that are not being
//! conditioned on are marginalized out under a uniform prior.
//!
//! # Cause repertoire
//!
//! ```text
//! p(purview_{t-1} | mechanism_t) ∝ Π_{m ∈ mechanism} p(m_t | purview_{t-1}, ext_{t-1})
//! ```
//!
//! Each mechanism node's table is conditioned on the node's observed current
//! value, reduced to the purview axes, and multiplied in. The product is then
//! normalized.
//!
//! # Effect repertoire
//!
//! ```text
//! p(purview_{t+1} | mechanism_t) = Π_{p ∈ purview} p(p_{t+1} | mechanism_t, ext_t)
//! ```
//!
//! Each purview node's table is laid out over `2n` axes (n current, n next),
//! the in-subsystem non-mechanism nodes are marginalized out of the current
//! block, the factors are multiplied, and finally the mechanism and external
//! nodes are fixed at their current values. No normalization is needed: every
//! factor is a conditional distribution.
//!
//! # Empty inputs
//!
//! The two directions treat empty inputs differently, and this is kept:
//!
//! - cause, empty purview → [`Repertoire::empty`];
//! - cause, empty mechanism → the max-entropy distribution over the purview;
//! - effect has no shortcuts. An empty purview yields an all-singleton
//!   tensor holding `1.0` (one degenerate joint state), and an empty mechanism
//!   simply marginalizes every subsystem node.
//!
//! # Invariants
//!
//! - **Immutable**: no mutation API; repeated calls return bit-identical
//!   tensors.
//! - **Axis order**: every tensor axis is a network node index.
//! - **Exact**: tensors are `O(2^n)`; nothing is sampled or truncated.

use alloc::vec::Vec;
use core::hash::{Hash, Hasher};

use ndarray::{ArrayD, Axis, IxDyn};
use tracing::{debug, trace};

use crate::error::{RepertoireError, Result};
use crate::network::{Network, Node};
use crate::repertoire::{Direction, Repertoire};
use crate::state::NetworkState;
use crate::tensor::{
    broadcast_mul, condition, marginalize_out, max_entropy_distribution, membership, normalize,
    purview_shape,
};

// ─── Subsystem ───────────────────────────────────────────────────────────────

/// A candidate set of nodes in a fixed current and past network state.
#[derive(Clone, Debug)]
pub struct Subsystem<'a> {
    /// Sorted, deduplicated node indices.
    nodes: Vec<usize>,
    /// Membership mask over all network nodes.
    inside: Vec<bool>,
    /// Network nodes not in `nodes`, sorted.
    external_nodes: Vec<usize>,
    current_state: NetworkState,
    past_state: NetworkState,
    network: &'a Network,
}

impl<'a> Subsystem<'a> {
    /// Build a subsystem over `nodes` of `network`.
    ///
    /// Both states must have one entry per network node and every index in
    /// `nodes` must address a network node. Duplicate indices are ignored.
    pub fn new(
        nodes: &[usize],
        current_state: NetworkState,
        past_state: NetworkState,
        network: &'a Network,
    ) -> Result<Self> {
        let size = network.size();
        current_state.check_len(size)?;
        past_state.check_len(size)?;

        let nodes = sorted_set(nodes, network)?;
        let inside = membership(&nodes, size);
        let external_nodes: Vec<usize> = (0..size).filter(|&i| !inside[i]).collect();

        debug!(
            size = nodes.len(),
            external = external_nodes.len(),
            current = %current_state,
            past = %past_state,
            "built subsystem"
        );

        Ok(Self {
            nodes,
            inside,
            external_nodes,
            current_state,
            past_state,
            network,
        })
    }

    // ── Accessors ────────────────────────────────────────────────────────

    /// Node indices in the subsystem, ascending.
    pub fn nodes(&self) -> &[usize] {
        &self.nodes
    }

    /// Network node indices outside the subsystem, ascending.
    pub fn external_nodes(&self) -> &[usize] {
        &self.external_nodes
    }

    /// `true` if node `index` belongs to the subsystem.
    pub fn contains(&self, index: usize) -> bool {
        self.inside.get(index).copied().unwrap_or(false)
    }

    /// Number of nodes in the subsystem.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// `true` if the subsystem has no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Network-wide state at the current step.
    pub fn current_state(&self) -> &NetworkState {
        &self.current_state
    }

    /// Network-wide state at the previous step.
    pub fn past_state(&self) -> &NetworkState {
        &self.past_state
    }

    /// The network this subsystem is drawn from.
    pub fn network(&self) -> &'a Network {
        self.network
    }

    // ── Repertoires ──────────────────────────────────────────────────────

    /// Repertoire in the given direction.
    pub fn repertoire(
        &self,
        direction: Direction,
        mechanism: &[usize],
        purview: &[usize],
    ) -> Result<Repertoire> {
        match direction {
            Direction::Cause => self.cause_repertoire(mechanism, purview),
            Direction::Effect => self.effect_repertoire(mechanism, purview),
        }
    }

    /// Distribution over the purview's past states given the mechanism's
    /// current state, with external nodes fixed at their past state.
    ///
    /// Returns [`Repertoire::empty`] for an empty purview and the max-entropy
    /// distribution for an empty mechanism. If the mechanism state has zero
    /// probability the all-zero tensor is returned unnormalized.
    pub fn cause_repertoire(&self, mechanism: &[usize], purview: &[usize]) -> Result<Repertoire> {
        let mechanism = self.check_mechanism(mechanism)?;
        let purview = sorted_set(purview, self.network)?;
        trace!(?mechanism, ?purview, "cause repertoire");

        if purview.is_empty() {
            return Ok(Repertoire::empty());
        }
        if mechanism.is_empty() {
            return Ok(Repertoire::from_array(max_entropy_distribution(
                &purview,
                self.network,
            )));
        }

        let in_purview = membership(&purview, self.network.size());
        let mut joint = ArrayD::<f64>::ones(IxDyn(&purview_shape(&in_purview)));
        for node in mechanism.iter().map(|&m| &self.network.nodes()[m]) {
            let mut factor = self.observed_tpm(node);
            for x in (0..self.network.size()).filter(|&x| !in_purview[x]) {
                factor = if self.inside[x] {
                    marginalize_out(x, &factor)
                } else {
                    condition(&factor, x, usize::from(self.past_state[x]))
                };
            }
            joint = broadcast_mul(&joint, &factor)?;
        }

        let joint = normalize(joint);
        if joint.iter().all(|&p| p == 0.0) {
            debug!(?mechanism, ?purview, "mechanism state has zero probability");
        }
        Ok(Repertoire::from_array(joint))
    }

    /// Distribution over the purview's next states given the mechanism's
    /// current state, with external nodes fixed at their current state.
    ///
    /// No empty-input shortcuts; see the module docs.
    pub fn effect_repertoire(&self, mechanism: &[usize], purview: &[usize]) -> Result<Repertoire> {
        let mechanism = self.check_mechanism(mechanism)?;
        let purview = sorted_set(purview, self.network)?;
        trace!(?mechanism, ?purview, "effect repertoire");

        let n = self.network.size();
        let in_mechanism = membership(&mechanism, n);

        // Axes 0..n: current state. Axes n..2n: next state.
        let mut joint = ArrayD::<f64>::ones(IxDyn(&alloc::vec![1usize; 2 * n]));
        for node in purview.iter().map(|&p| &self.network.nodes()[p]) {
            let mut factor = forward_tpm(node, n)?;
            for &x in self.nodes.iter().filter(|&&x| !in_mechanism[x]) {
                factor = marginalize_out(x, &factor);
            }
            joint = broadcast_mul(&joint, &factor)?;
        }

        // Mechanism and external nodes are observed now.
        for x in (0..n).filter(|&x| in_mechanism[x] || !self.inside[x]) {
            joint = condition(&joint, x, usize::from(self.current_state[x]));
        }

        // Every current-state axis is now singleton; drop them.
        for _ in 0..n {
            joint = joint.index_axis_move(Axis(0), 0);
        }
        Ok(Repertoire::from_array(joint))
    }

    /// Cause repertoire of the empty mechanism.
    #[doc(alias = "uc_cause_repertoire")]
    pub fn unconstrained_cause_repertoire(&self, purview: &[usize]) -> Result<Repertoire> {
        self.cause_repertoire(&[], purview)
    }

    /// Effect repertoire of the empty mechanism.
    pub fn unconstrained_effect_repertoire(&self, purview: &[usize]) -> Result<Repertoire> {
        self.effect_repertoire(&[], purview)
    }

    // ── Internal helpers ─────────────────────────────────────────────────

    /// Validate a mechanism: in range and inside the subsystem.
    fn check_mechanism(&self, mechanism: &[usize]) -> Result<Vec<usize>> {
        let mechanism = sorted_set(mechanism, self.network)?;
        if let Some(&index) = mechanism.iter().find(|&&m| !self.inside[m]) {
            return Err(RepertoireError::MechanismOutsideSubsystem { index });
        }
        Ok(mechanism)
    }

    /// `node`'s table conditioned on its observed current value: the ON
    /// probabilities if it is ON now, the OFF probabilities otherwise.
    fn observed_tpm(&self, node: &Node) -> ArrayD<f64> {
        if self.current_state.is_on(node.index()) {
            node.tpm().clone()
        } else {
            node.tpm().mapv(|p| 1.0 - p)
        }
    }
}

/// `node`'s table over `2n` axes: the full current-state block, then a
/// next-state block that is singleton except on `node`'s own axis, which holds
/// the OFF probability at 0 and the ON probability at 1.
fn forward_tpm(node: &Node, n: usize) -> Result<ArrayD<f64>> {
    let on = node.tpm();
    let off = on.mapv(|p| 1.0 - p);
    let mut table = ndarray::stack(Axis(n), &[off.view(), on.view()]).map_err(|_| {
        RepertoireError::IncompatibleShapes {
            left: off.shape().to_vec(),
            right: on.shape().to_vec(),
        }
    })?;
    for i in (0..n).filter(|&i| i != node.index()) {
        table = table.insert_axis(Axis(n + i));
    }
    Ok(table)
}

/// Validate node indices and return them sorted and deduplicated.
fn sorted_set(indices: &[usize], network: &Network) -> Result<Vec<usize>> {
    for &i in indices {
        network.check_index(i)?;
    }
    let mut set = indices.to_vec();
    set.sort_unstable();
    set.dedup();
    Ok(set)
}

// ─── Equality and hashing ────────────────────────────────────────────────────

impl PartialEq for Subsystem<'_> {
    /// Equal node sets, equal current states, equal past states, equal networks.
    fn eq(&self, other: &Self) -> bool {
        self.nodes == other.nodes
            && self.current_state == other.current_state
            && self.past_state == other.past_state
            && (core::ptr::eq(self.network, other.network) || self.network == other.network)
    }
}

impl Eq for Subsystem<'_> {}

impl Hash for Subsystem<'_> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.nodes.hash(state);
        self.current_state.as_bytes().hash(state);
        self.past_state.as_bytes().hash(state);
        self.network.hash(state);
    }
}

impl core::fmt::Display for Subsystem<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "Subsystem({:?}, current={}, past={})",
            self.nodes, self.current_state, self.past_state
        )
    }
}

// ─── Tests ──────────────────────────────────────────────────────────────────
