//! # causal-repertoire
//!
//! Exact cause and effect repertoires for discrete, binary-state causal
//! networks.
//!
//! ---
//!
//! ## What a repertoire is
//!
//! Pick a set of nodes in a network (a *mechanism*) and look at its state
//! right now. That observation constrains what another set of nodes (a
//! *purview*) must have looked like one step ago, and what it is likely to
//! look like one step from now. The **cause repertoire** is the first of those
//! distributions and the **effect repertoire** is the second.
//!
//! Both are computed inside a **subsystem**: a candidate set of nodes plus the
//! network-wide current and past states. Nodes outside the subsystem are
//! fixed boundary conditions. Nodes inside it that are not being conditioned
//! on are averaged away under a uniform prior.
//!
//! Everything is exact tensor arithmetic over the full joint state space, so
//! cost grows as `2^n` in the network size.
//!
//! ---
//!
//! ## The pipeline
//!
//! ```text
//! per-node tables → Network ─┐
//!                            ├→ Subsystem → cause_repertoire / effect_repertoire → Repertoire
//! NetworkState (now, past) ──┘        ↑
//!                              RepertoireCache (memoisation)
//! ```
//!
//! ## Module overview
//!
//! | Module | Key types | What it does |
//! |--------|-----------|--------------|
//! | [`network`] | [`Network`], [`Node`] | Validated, immutable per-node transition tables |
//! | [`state`] | [`NetworkState`] | Frozen binary state vectors |
//! | [`subsystem`] | [`Subsystem`] | Cause and effect repertoires under boundary conditions |
//! | [`repertoire`] | [`Repertoire`], [`Direction`] | Result type, including the empty-purview sentinel |
//! | [`tensor`] | [`marginalize_out`], [`max_entropy_distribution`] | Axis-indexed conditioning and marginalization |
//! | [`cache`] | [`RepertoireCache`] | Bounded per-subsystem memoisation |
//! | [`config`] | [`NetworkConfig`] | Validation tolerance and network size guard |
//! | [`error`] | [`RepertoireError`] | Validation errors |
//!
//! ## Example
//!
//! ```rust
//! use causal_repertoire::{Network, NetworkState, Subsystem};
//! use ndarray::{array, ArrayD, IxDyn};
//!
//! // n0 is a fair coin; n1 copies n0.
//! let network = Network::new(vec![
//!     ArrayD::from_elem(IxDyn(&[2, 2]), 0.5),
//!     array![[0.0, 0.0], [1.0, 1.0]].into_dyn(),
//! ])?;
//! let subsystem = Subsystem::new(
//!     &[0, 1],
//!     NetworkState::new(&[0, 1])?,
//!     NetworkState::new(&[0, 0])?,
//!     &network,
//! )?;
//!
//! // n1 is ON now, so n0 must have been ON.
//! let cause = subsystem.cause_repertoire(&[1], &[0])?;
//! assert_eq!(cause.get(&[1, 0]), Some(1.0));
//! # Ok::<(), causal_repertoire::RepertoireError>(())
//! ```
//!
//! ## `no_std`
//!
//! With default features off the crate is `#![no_std]` and needs only `alloc`.
//! The `std` feature (on by default) enables the standard library in
//! `ndarray`, `thiserror` and `tracing`. Enable `serde` for serialisation of
//! [`NetworkConfig`], [`NetworkState`] and [`Direction`], and `python-ffi` for
//! Python bindings.
//!
//! ## Logging
//!
//! The crate emits `tracing` events at `debug` and `trace` level and never
//! installs a subscriber.
//!
//! ## License
//!
//! Business Source License 1.1.

#![cfg_attr(not(any(feature = "std", feature = "python-ffi")), no_std)]
#![deny(unsafe_code)]
#![deny(missing_docs)]
#![cfg_attr(docsrs, feature(doc_cfg))]

extern crate alloc;

pub mod cache;
pub mod config;
pub mod error;
pub mod network;
pub mod repertoire;
pub mod state;
pub mod subsystem;
pub mod tensor;

#[cfg(feature = "python-ffi")]
pub mod ffi;

pub use cache::RepertoireCache;
pub use config::NetworkConfig;
pub use error::{RepertoireError, Result};
pub use network::{Network, Node};
pub use repertoire::{Direction, Repertoire};
pub use state::NetworkState;
pub use subsystem::Subsystem;
pub use tensor::{marginalize_out, max_entropy_distribution};
