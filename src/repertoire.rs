/*
 * This source code is licensed under the Business Source License 1.1.
 * See LICENSE in the root directory for full details.
 */

//! Repertoires: distributions over the joint states of a purview.
//!
//! A [`Repertoire`] spans every network axis (length 2 on purview axes, 1
//! elsewhere) so that repertoires over the same purview, computed under
//! different subsystem boundaries, line up element by element. Comparing
//! repertoires over different purviews is meaningless.
//!
//! Two results are not proper distributions and callers must check for them:
//!
//! - [`Repertoire::is_empty`]: the cause repertoire of an empty purview.
//! - [`Repertoire::is_zero`]: a mechanism state with zero probability under
//!   the boundary conditions; the tensor is left unnormalized.

use alloc::vec::Vec;

use ndarray::{ArrayD, IxDyn};

/// Which way in time a repertoire looks.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Direction {
    /// Past purview states given the mechanism's current state.
    Cause,
    /// Next purview states given the mechanism's current state.
    Effect,
}

impl core::fmt::Display for Direction {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Cause => f.write_str("cause"),
            Self::Effect => f.write_str("effect"),
        }
    }
}

/// A cause or effect repertoire.
#[derive(Clone, Debug, PartialEq)]
pub struct Repertoire {
    values: ArrayD<f64>,
}

impl Repertoire {
    pub(crate) fn from_array(values: ArrayD<f64>) -> Self {
        Self { values }
    }

    /// The sentinel returned for an empty purview: one axis of length zero.
    pub fn empty() -> Self {
        Self {
            values: ArrayD::zeros(IxDyn(&[0])),
        }
    }

    /// `true` for the empty-purview sentinel.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// `true` if every entry is zero: the mechanism state is impossible under
    /// the subsystem's boundary conditions.
    pub fn is_zero(&self) -> bool {
        !self.is_empty() && self.values.iter().all(|&p| p == 0.0)
    }

    /// Sum over all entries. 1 for a proper distribution.
    pub fn total(&self) -> f64 {
        self.values.sum()
    }

    /// Axis lengths, one per network node.
    pub fn shape(&self) -> &[usize] {
        self.values.shape()
    }

    /// Number of axes.
    pub fn ndim(&self) -> usize {
        self.values.ndim()
    }

    /// Nodes the repertoire distinguishes (axes of length 2), in order.
    pub fn purview(&self) -> Vec<usize> {
        self.shape()
            .iter()
            .enumerate()
            .filter(|&(_, &len)| len == 2)
            .map(|(i, _)| i)
            .collect()
    }

    /// Entry at a full-rank index (0 on singleton axes), or `None` if out of range.
    pub fn get(&self, index: &[usize]) -> Option<f64> {
        self.values.get(index).copied()
    }

    /// Underlying tensor.
    pub fn as_array(&self) -> &ArrayD<f64> {
        &self.values
    }

    /// Consume into the underlying tensor.
    pub fn into_array(self) -> ArrayD<f64> {
        self.values
    }
}

impl From<Repertoire> for ArrayD<f64> {
    fn from(r: Repertoire) -> Self {
        r.into_array()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;
    use alloc::vec;
    use ndarray::array;

    #[test]
    fn test_empty_sentinel() {
        let r = Repertoire::empty();
        assert!(r.is_empty());
        assert!(!r.is_zero());
        assert_eq!(r.shape(), &[0]);
        assert_eq!(r.total(), 0.0);
        assert!(r.purview().is_empty());
    }

    #[test]
    fn test_zero_repertoire() {
        let r = Repertoire::from_array(ArrayD::zeros(IxDyn(&[1, 2])));
        assert!(r.is_zero());
        assert!(!r.is_empty());
    }

    #[test]
    fn test_accessors() {
        let r = Repertoire::from_array(array![[0.25, 0.75]].into_dyn());
        assert_eq!(r.ndim(), 2);
        assert_eq!(r.purview(), vec![1]);
        assert_eq!(r.get(&[0, 1]), Some(0.75));
        assert_eq!(r.get(&[1, 0]), None);
        assert_eq!(r.total(), 1.0);
        assert_eq!(r.clone().into_array(), *r.as_array());
    }

    #[test]
    fn test_direction_display() {
        assert_eq!(Direction::Cause.to_string(), "cause");
        assert_eq!(Direction::Effect.to_string(), "effect");
    }
}
