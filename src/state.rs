/*
 * This source code is licensed under the Business Source License 1.1.
 * See LICENSE in the root directory for full details.
 */

//! Frozen binary network states.
//!
//! A [`NetworkState`] is validated once and has no mutation API afterwards,
//! so a [`crate::subsystem::Subsystem`] built on it can be used as a hash key.
//! Its raw bytes are what the subsystem hashes.

use alloc::boxed::Box;
use alloc::vec::Vec;

use crate::error::{RepertoireError, Result};

/// One binary value per network node, in network node order.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "Vec<u8>", into = "Vec<u8>"))]
pub struct NetworkState(Box<[u8]>);

impl NetworkState {
    /// Validate and freeze a state vector. Every entry must be 0 or 1.
    pub fn new(values: &[u8]) -> Result<Self> {
        if let Some((index, &value)) = values.iter().enumerate().find(|&(_, &v)| v > 1) {
            return Err(RepertoireError::NonBinaryState { index, value });
        }
        Ok(Self(values.into()))
    }

    /// The all-off state of `size` nodes.
    pub fn zeros(size: usize) -> Self {
        Self(alloc::vec![0u8; size].into_boxed_slice())
    }

    /// Number of nodes the state covers.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// `true` for the state of a zero-node network.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Value of node `index`, or `None` past the end.
    pub fn get(&self, index: usize) -> Option<u8> {
        self.0.get(index).copied()
    }

    /// `true` if node `index` is ON. Out-of-range indices read as OFF.
    pub fn is_on(&self, index: usize) -> bool {
        self.get(index) == Some(1)
    }

    /// Raw state bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Check that the state matches a network of `size` nodes.
    pub(crate) fn check_len(&self, size: usize) -> Result<()> {
        if self.len() != size {
            return Err(RepertoireError::StateLength {
                expected: size,
                found: self.len(),
            });
        }
        Ok(())
    }
}

impl core::ops::Index<usize> for NetworkState {
    type Output = u8;

    fn index(&self, index: usize) -> &u8 {
        &self.0[index]
    }
}

impl TryFrom<Vec<u8>> for NetworkState {
    type Error = RepertoireError;

    fn try_from(values: Vec<u8>) -> Result<Self> {
        Self::new(&values)
    }
}

impl From<NetworkState> for Vec<u8> {
    fn from(state: NetworkState) -> Self {
        state.0.into_vec()
    }
}

impl core::fmt::Display for NetworkState {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str("[")?;
        for (i, v) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{v}")?;
        }
        f.write_str("]")
    }
}
