/*
 * This source code is licensed under the Business Source License 1.1.
 * See LICENSE in the root directory for full details.
 */

//! Axis-indexed tensor algebra over binary node states.
//!
//! Every tensor here has one axis per network node, in node order (the effect
//! repertoire temporarily uses two such blocks). An axis has length 2 while its
//! node still distinguishes OFF from ON and length 1 once the node has been
//! marginalized out, conditioned on, or was never part of the purview.
//! Length-1 axes broadcast against length-2 axes in [`broadcast_mul`].
//!
//! # Invariants
//!
//! - Operations never drop or reorder axes; they only shrink an axis to 1.
//! - [`marginalize_out`] and [`condition`] are no-ops on a length-1 axis, so
//!   applying either twice equals applying it once.
//! - Marginalization on different axes commutes.

use alloc::vec::Vec;

use ndarray::{ArrayD, Axis, IxDyn};

use crate::error::{RepertoireError, Result};
use crate::network::Network;

/// Collapse `node`'s axis to length 1 by averaging its slices.
///
/// This is the uniform (maximum-entropy) prior over the node's value. All
/// other axes are left unchanged.
///
/// # Panics
///
/// If `node >= tensor.ndim()`.
pub fn marginalize_out(node: usize, tensor: &ArrayD<f64>) -> ArrayD<f64> {
    let axis = Axis(node);
    let len = tensor.len_of(axis);
    if len == 1 {
        return tensor.clone();
    }
    let mut summed = tensor.sum_axis(axis);
    summed /= len as f64;
    summed.insert_axis(axis)
}

/// Uniform distribution over the joint states of `purview`.
///
/// The result has one axis per network node: length 2 on purview axes, 1
/// elsewhere, every entry `1 / 2^|purview|`. An empty purview gives a single
/// entry of `1.0`.
pub fn max_entropy_distribution(purview: &[usize], network: &Network) -> ArrayD<f64> {
    let mask = membership(purview, network.size());
    let shape = purview_shape(&mask);
    let states: usize = shape.iter().product();
    ArrayD::from_elem(IxDyn(&shape), 1.0 / states as f64)
}

/// Keep only the slice of `axis` at `value`, leaving a length-1 axis.
///
/// A length-1 axis is returned untouched: there is nothing left to condition.
///
/// # Panics
///
/// If `axis >= tensor.ndim()` or `value` is out of range on a length-2 axis.
pub fn condition(tensor: &ArrayD<f64>, axis: usize, value: usize) -> ArrayD<f64> {
    let axis = Axis(axis);
    if tensor.len_of(axis) == 1 {
        return tensor.clone();
    }
    tensor.index_axis(axis, value).to_owned().insert_axis(axis)
}

/// Elementwise product of two same-rank tensors, broadcasting length-1 axes.
pub fn broadcast_mul(a: &ArrayD<f64>, b: &ArrayD<f64>) -> Result<ArrayD<f64>> {
    let incompatible = || RepertoireError::IncompatibleShapes {
        left: a.shape().to_vec(),
        right: b.shape().to_vec(),
    };
    if a.ndim() != b.ndim() {
        return Err(incompatible());
    }
    let mut shape = Vec::with_capacity(a.ndim());
    for (&x, &y) in a.shape().iter().zip(b.shape()) {
        if x == y || y == 1 {
            shape.push(x);
        } else if x == 1 {
            shape.push(y);
        } else {
            return Err(incompatible());
        }
    }
    let dim = IxDyn(&shape);
    let aa = a.broadcast(dim.clone()).ok_or_else(incompatible)?;
    let bb = b.broadcast(dim).ok_or_else(incompatible)?;
    Ok(&aa * &bb)
}

/// Divide `tensor` by its total so it sums to 1.
///
/// A tensor that sums to exactly zero is returned unchanged.
pub fn normalize(mut tensor: ArrayD<f64>) -> ArrayD<f64> {
    let total = tensor.sum();
    if total != 0.0 {
        tensor /= total;
    }
    tensor
}

/// Axis lengths for a purview: 2 where `mask` is set, 1 elsewhere.
pub fn purview_shape(mask: &[bool]) -> Vec<usize> {
    mask.iter().map(|&inside| if inside { 2 } else { 1 }).collect()
}

/// Membership mask of length `size` for a set of node indices.
///
/// Indices must already be validated against `size`; out-of-range entries
/// are ignored.
pub(crate) fn membership(nodes: &[usize], size: usize) -> Vec<bool> {
    let mut mask = alloc::vec![false; size];
    for &i in nodes {
        if let Some(slot) = mask.get_mut(i) {
            *slot = true;
        }
    }
    mask
}
