//! Python FFI bindings via PyO3.
//!
//! Tables cross the boundary as flat row-major lists of length `2^n`, and
//! repertoires come back as `(shape, values)` with values in row-major order.
//! For anything beyond that, use the Rust API directly.
//!
//! # Building the Python extension
//!
//! ```bash
//! pip install maturin
//! maturin develop --features python-ffi
//! ```
//!
//! # Usage
//!
//! ```python
//! from causal_repertoire import Network, Subsystem
//!
//! # n0 is a fair coin, n1 copies n0. Index order: [s0, s1].
//! net = Network([[0.5, 0.5, 0.5, 0.5], [0.0, 0.0, 1.0, 1.0]])
//! sub = Subsystem(net, nodes=[0, 1], current_state=[0, 1], past_state=[0, 0])
//! shape, values = sub.cause_repertoire(mechanism=[1], purview=[0])
//! print(shape, values)  # [2, 1] [0.0, 1.0]
//! ```

#![allow(non_snake_case)]

use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

use ndarray::{ArrayD, IxDyn};

use crate::error::RepertoireError;
use crate::network::Network;
use crate::repertoire::Repertoire;
use crate::state::NetworkState;
use crate::subsystem::Subsystem;

fn to_py_err(e: RepertoireError) -> PyErr {
    PyValueError::new_err(e.to_string())
}

fn into_py_repertoire(r: Repertoire) -> (Vec<usize>, Vec<f64>) {
    let shape = r.shape().to_vec();
    let values = r.as_array().iter().copied().collect();
    (shape, values)
}

// ── Network ───────────────────────────────────────────────────────────────────

/// A binary network, one flat transition table per node.
///
/// Args:
///     tpms: list of n lists, each of length 2**n. Entry k of table i is
///           P(node i ON next | current state k), with node 0 as the most
///           significant bit of k.
#[pyclass(name = "Network")]
#[derive(Clone)]
pub struct PyNetwork {
    inner: Network,
}

#[pymethods]
impl PyNetwork {
    /// Create a network from flat per-node tables.
    #[new]
    pub fn new(tpms: Vec<Vec<f64>>) -> PyResult<Self> {
        let shape = vec![2usize; tpms.len()];
        let tables = tpms
            .into_iter()
            .enumerate()
            .map(|(node, flat)| {
                let found = vec![flat.len()];
                ArrayD::from_shape_vec(IxDyn(&shape), flat).map_err(|_| {
                    RepertoireError::TpmShape {
                        node,
                        expected: shape.clone(),
                        found,
                    }
                })
            })
            .collect::<Result<Vec<_>, _>>()
            .map_err(to_py_err)?;
        let inner = Network::new(tables).map_err(to_py_err)?;
        Ok(Self { inner })
    }

    /// Number of nodes.
    #[getter]
    pub fn size(&self) -> usize {
        self.inner.size()
    }

    /// Python repr string.
    pub fn __repr__(&self) -> String {
        format!("Network(size={})", self.inner.size())
    }
}

// ── Subsystem ─────────────────────────────────────────────────────────────────

/// A candidate subsystem of a network in fixed current and past states.
#[pyclass(name = "Subsystem")]
pub struct PySubsystem {
    network: Network,
    nodes: Vec<usize>,
    current_state: NetworkState,
    past_state: NetworkState,
}

impl PySubsystem {
    fn with_subsystem<T>(
        &self,
        f: impl FnOnce(&Subsystem<'_>) -> Result<T, RepertoireError>,
    ) -> PyResult<T> {
        let subsystem = Subsystem::new(
            &self.nodes,
            self.current_state.clone(),
            self.past_state.clone(),
            &self.network,
        )
        .map_err(to_py_err)?;
        f(&subsystem).map_err(to_py_err)
    }
}

#[pymethods]
impl PySubsystem {
    /// Create a subsystem.
    ///
    /// Args:
    ///     network:       the Network the nodes belong to
    ///     nodes:         node indices in the subsystem
    ///     current_state: n values in {0, 1}
    ///     past_state:    n values in {0, 1}
    #[new]
    pub fn new(
        network: PyRef<'_, PyNetwork>,
        nodes: Vec<usize>,
        current_state: Vec<u8>,
        past_state: Vec<u8>,
    ) -> PyResult<Self> {
        let current_state = NetworkState::new(&current_state).map_err(to_py_err)?;
        let past_state = NetworkState::new(&past_state).map_err(to_py_err)?;
        let inner = network.inner.clone();
        // Validate once up front so errors surface at construction.
        let nodes = Subsystem::new(&nodes, current_state.clone(), past_state.clone(), &inner)
            .map_err(to_py_err)?
            .nodes()
            .to_vec();
        Ok(Self {
            network: inner,
            nodes,
            current_state,
            past_state,
        })
    }

    /// Cause repertoire as `(shape, values)`. An empty purview gives `([0], [])`.
    pub fn cause_repertoire(
        &self,
        mechanism: Vec<usize>,
        purview: Vec<usize>,
    ) -> PyResult<(Vec<usize>, Vec<f64>)> {
        self.with_subsystem(|s| s.cause_repertoire(&mechanism, &purview))
            .map(into_py_repertoire)
    }

    /// Effect repertoire as `(shape, values)`.
    pub fn effect_repertoire(
        &self,
        mechanism: Vec<usize>,
        purview: Vec<usize>,
    ) -> PyResult<(Vec<usize>, Vec<f64>)> {
        self.with_subsystem(|s| s.effect_repertoire(&mechanism, &purview))
            .map(into_py_repertoire)
    }

    /// Cause repertoire of the empty mechanism.
    pub fn unconstrained_cause_repertoire(
        &self,
        purview: Vec<usize>,
    ) -> PyResult<(Vec<usize>, Vec<f64>)> {
        self.with_subsystem(|s| s.unconstrained_cause_repertoire(&purview))
            .map(into_py_repertoire)
    }

    /// Effect repertoire of the empty mechanism.
    pub fn unconstrained_effect_repertoire(
        &self,
        purview: Vec<usize>,
    ) -> PyResult<(Vec<usize>, Vec<f64>)> {
        self.with_subsystem(|s| s.unconstrained_effect_repertoire(&purview))
            .map(into_py_repertoire)
    }

    /// Python repr string.
    pub fn __repr__(&self) -> String {
        format!(
            "Subsystem({:?}, current={}, past={})",
            self.nodes, self.current_state, self.past_state
        )
    }
}

// ── Module entry point ────────────────────────────────────────────────────────

/// Cause and effect repertoires for binary causal networks.
#[pymodule]
pub fn causal_repertoire(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PyNetwork>()?;
    m.add_class::<PySubsystem>()?;
    m.add("__version__", env!("CARGO_PKG_VERSION"))?;
    Ok(())
}
