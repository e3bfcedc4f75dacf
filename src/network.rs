/*
 * This source code is licensed under the Business Source License 1.1.
 * See LICENSE in the root directory for full details.
 */

//! Binary networks and their per-node transition probability tables.
//!
//! # Layout
//!
//! A network of `n` nodes stores, for every node, an n-axis table of shape
//! `(2, 2, ..., 2)`. Axis `i` is indexed by the current state of node `i`, and
//! each entry is the probability that the owning node is ON at the next step.
//! Axis order is pinned to node order everywhere in the crate.
//!
//! # Invariants
//!
//! - **Immutable**: no mutation API after construction.
//! - **Validated**: every table has exactly `n` length-2 axes and holds
//!   finite probabilities; entries within the configured tolerance of the unit
//!   interval are clamped onto it.
//! - **Hashable**: `Eq` is sound because NaN is rejected at construction.

use alloc::vec;
use alloc::vec::Vec;
use core::hash::{Hash, Hasher};

use ndarray::{ArrayD, Axis};

use crate::config::NetworkConfig;
use crate::error::{RepertoireError, Result};

// ─── Node ────────────────────────────────────────────────────────────────────

/// One network node: its index and its transition probability table.
#[derive(Clone, Debug, PartialEq)]
pub struct Node {
    index: usize,
    tpm: ArrayD<f64>,
}

impl Node {
    /// Position of this node in network order (also its axis in every table).
    pub fn index(&self) -> usize {
        self.index
    }

    /// `P(ON at t+1 | network state at t)`, one length-2 axis per network node.
    pub fn tpm(&self) -> &ArrayD<f64> {
        &self.tpm
    }
}

impl Eq for Node {}

impl Hash for Node {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.index.hash(state);
        self.tpm.shape().hash(state);
        for &p in self.tpm.iter() {
            // -0.0 == 0.0, so both must hash alike.
            (p + 0.0).to_bits().hash(state);
        }
    }
}

impl core::fmt::Display for Node {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "n{}", self.index)
    }
}

// ─── Network ─────────────────────────────────────────────────────────────────

/// An immutable set of binary nodes with their transition tables.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Network {
    nodes: Vec<Node>,
}

impl Network {
    /// Build a network from one table per node, validated with the default
    /// [`NetworkConfig`].
    ///
    /// `tpms[i]` is the table of node `i` and must have shape `(2,)*n`.
    pub fn new(tpms: Vec<ArrayD<f64>>) -> Result<Self> {
        Self::with_config(tpms, &NetworkConfig::default())
    }

    /// Build a network from one table per node under an explicit configuration.
    pub fn with_config(tpms: Vec<ArrayD<f64>>, config: &NetworkConfig) -> Result<Self> {
        let size = tpms.len();
        if size == 0 {
            return Err(RepertoireError::EmptyNetwork);
        }
        if size > config.max_size {
            return Err(RepertoireError::NetworkTooLarge {
                size,
                max: config.max_size,
            });
        }

        let expected = vec![2usize; size];
        let tol = config.probability_tolerance;
        let mut nodes = Vec::with_capacity(size);
        for (index, mut tpm) in tpms.into_iter().enumerate() {
            if tpm.shape() != expected.as_slice() {
                return Err(RepertoireError::TpmShape {
                    node: index,
                    expected: expected.clone(),
                    found: tpm.shape().to_vec(),
                });
            }
            if let Some(&value) = tpm
                .iter()
                .find(|&&p| !p.is_finite() || p < -tol || p > 1.0 + tol)
            {
                return Err(RepertoireError::TpmValueOutOfRange { node: index, value });
            }
            tpm.mapv_inplace(|p| p.clamp(0.0, 1.0));
            nodes.push(Node { index, tpm });
        }

        Ok(Self { nodes })
    }

    /// Build a network from a single state-by-node table.
    ///
    /// `tpm` has shape `(2,)*n + (n,)`: the leading axes index the current
    /// network state and the last axis selects the node whose ON probability
    /// is stored.
    pub fn from_state_by_node(tpm: &ArrayD<f64>) -> Result<Self> {
        let Some(&size) = tpm.shape().last() else {
            return Err(RepertoireError::EmptyNetwork);
        };
        let last = Axis(tpm.ndim() - 1);
        let tpms = (0..size)
            .map(|i| tpm.index_axis(last, i).to_owned())
            .collect();
        Self::new(tpms)
    }

    /// Number of nodes.
    pub fn size(&self) -> usize {
        self.nodes.len()
    }

    /// All nodes in index order.
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Node `index`, or `None` if out of range.
    pub fn node(&self, index: usize) -> Option<&Node> {
        self.nodes.get(index)
    }

    /// Fail with [`RepertoireError::NodeOutOfRange`] unless `index` addresses a node.
    pub(crate) fn check_index(&self, index: usize) -> Result<()> {
        if index >= self.size() {
            return Err(RepertoireError::NodeOutOfRange {
                index,
                size: self.size(),
            });
        }
        Ok(())
    }
}

// ─── Tests ──────────────────────────────────────────────────────────────────
