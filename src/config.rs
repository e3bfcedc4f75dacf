/*
 * This source code is licensed under the Business Source License 1.1.
 * See LICENSE in the root directory for full details.
 */

//! Network validation settings.

/// Largest network accepted by default.
///
/// The effect repertoire builds `2n`-axis tensors with `2^(n+1)` entries per
/// purview node, so memory, not time, is what gives out first.
pub const DEFAULT_MAX_SIZE: usize = 24;

/// Slack allowed around `[0.0, 1.0]` when validating transition tables.
pub const DEFAULT_PROBABILITY_TOLERANCE: f64 = 1e-12;

/// Configuration for [`crate::network::Network::with_config`].
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NetworkConfig {
    /// Table entries must lie in `[-tol, 1 + tol]`. Default: 1e-12.
    pub probability_tolerance: f64,

    /// Maximum number of nodes. Default: [`DEFAULT_MAX_SIZE`].
    pub max_size: usize,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            probability_tolerance: DEFAULT_PROBABILITY_TOLERANCE,
            max_size: DEFAULT_MAX_SIZE,
        }
    }
}
