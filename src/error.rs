/*
 * This source code is licensed under the Business Source License 1.1.
 * See LICENSE in the root directory for full details.
 */

//! Validation errors.
//!
//! Malformed input is a programmer error, not a runtime condition: every
//! variant is raised at construction or call time and nothing is retried.
//! The two degenerate results (empty purview, zero-probability mechanism
//! state) are values, not errors; see [`crate::repertoire::Repertoire`].

use alloc::vec::Vec;

use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T> = core::result::Result<T, RepertoireError>;

/// Everything that can go wrong when building networks and subsystems or
/// requesting repertoires.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RepertoireError {
    /// A network needs at least one node.
    #[error("network has no nodes")]
    EmptyNetwork,

    /// The network exceeds [`crate::config::NetworkConfig::max_size`].
    #[error("network of {size} nodes exceeds the configured maximum of {max}")]
    NetworkTooLarge {
        /// Requested node count.
        size: usize,
        /// Configured maximum.
        max: usize,
    },

    /// A transition table does not have one length-2 axis per network node.
    #[error("tpm of node {node} has shape {found:?}, expected {expected:?}")]
    TpmShape {
        /// Node whose table is malformed.
        node: usize,
        /// Shape the table must have.
        expected: Vec<usize>,
        /// Shape that was supplied.
        found: Vec<usize>,
    },

    /// A transition table entry is not a probability.
    #[error("tpm of node {node} holds {value}, which is not a probability")]
    TpmValueOutOfRange {
        /// Node whose table is malformed.
        node: usize,
        /// Offending entry.
        value: f64,
    },

    /// A state vector does not have one entry per network node.
    #[error("state has {found} entries, network has {expected} nodes")]
    StateLength {
        /// Network size.
        expected: usize,
        /// Supplied length.
        found: usize,
    },

    /// A state vector entry is neither 0 nor 1.
    #[error("state entry {index} is {value}, expected 0 or 1")]
    NonBinaryState {
        /// Position in the state vector.
        index: usize,
        /// Offending value.
        value: u8,
    },

    /// A node index does not address a network node.
    #[error("node index {index} out of range for network of {size} nodes")]
    NodeOutOfRange {
        /// Offending index.
        index: usize,
        /// Network size.
        size: usize,
    },

    /// A mechanism node is not part of the subsystem.
    #[error("mechanism node {index} is not in the subsystem")]
    MechanismOutsideSubsystem {
        /// Offending index.
        index: usize,
    },

    /// Two tensors cannot be broadcast against each other.
    #[error("cannot broadcast shape {left:?} against {right:?}")]
    IncompatibleShapes {
        /// Left operand shape.
        left: Vec<usize>,
        /// Right operand shape.
        right: Vec<usize>,
    },
}
