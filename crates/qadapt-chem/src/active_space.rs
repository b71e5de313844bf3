//! Molecular-orbital integrals and frozen-core active spaces.

use nalgebra::DMatrix;
use ndarray::{Array2, Array4};
use tracing::debug;

use crate::error::{ChemError, ChemResult};
use crate::integrals::AoIntegrals;

/// Partition of the spatial MOs into frozen core and active orbitals.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveSpace {
    /// Doubly occupied orbitals folded into the core energy.
    pub core: Vec<usize>,
    /// Orbitals kept in the qubit Hamiltonian.
    pub active: Vec<usize>,
    /// Electrons distributed over the active orbitals.
    pub electrons: usize,
}

impl ActiveSpace {
    /// Choose the active window.
    ///
    /// `(electrons - active_electrons) / 2` lowest orbitals become core; the
    /// next `active_orbitals` orbitals are active. Omitted values mean all
    /// electrons and all remaining orbitals.
    pub fn select(
        electrons: usize,
        n_orbitals: usize,
        active_electrons: Option<usize>,
        active_orbitals: Option<usize>,
    ) -> ChemResult<Self> {
        let active_electrons = active_electrons.unwrap_or(electrons);
        if active_electrons == 0 || active_electrons > electrons {
            return Err(ChemError::InvalidActiveSpace(format!(
                "active_electrons = {active_electrons} must be in 1..={electrons}"
            )));
        }
        let frozen = electrons - active_electrons;
        if frozen % 2 != 0 {
            return Err(ChemError::InvalidActiveSpace(format!(
                "{frozen} core electrons cannot fill doubly occupied orbitals"
            )));
        }
        let n_core = frozen / 2;
        let available = n_orbitals.saturating_sub(n_core);
        let n_active = active_orbitals.unwrap_or(available);
        if n_active == 0 || n_active > available {
            return Err(ChemError::InvalidActiveSpace(format!(
                "active_orbitals = {n_active} must be in 1..={available} ({n_core} core)"
            )));
        }
        if 2 * n_active < active_electrons {
            return Err(ChemError::InvalidActiveSpace(format!(
                "{n_active} orbitals cannot hold {active_electrons} electrons"
            )));
        }
        Ok(Self {
            core: (0..n_core).collect(),
            active: (n_core..n_core + n_active).collect(),
            electrons: active_electrons,
        })
    }

    /// Number of qubits (spin orbitals) of the active space.
    pub fn n_qubits(&self) -> usize {
        2 * self.active.len()
    }
}

/// MO integrals restricted to an active space.
#[derive(Debug, Clone)]
pub struct ActiveIntegrals {
    /// Nuclear repulsion plus frozen-core energy.
    pub core_energy: f64,
    /// Effective one-electron integrals `h'_uv`.
    pub one_body: Array2<f64>,
    /// Two-electron integrals `(uv|wx)` in chemists' notation.
    pub two_body: Array4<f64>,
}

/// Full MO-basis integrals `(Cᵀ H C, (pq|rs))`.
pub fn mo_integrals(ints: &AoIntegrals, c: &DMatrix<f64>) -> (Array2<f64>, Array4<f64>) {
    let n = ints.n_basis();
    let h_mo = c.transpose() * ints.core_hamiltonian() * c;
    let one = Array2::from_shape_fn((n, n), |(p, q)| h_mo[(p, q)]);

    // Four quarter transformations, one index at a time.
    let mut t = ints.eri.clone();
    for axis in 0..4 {
        let mut next = Array4::<f64>::zeros((n, n, n, n));
        for ((i, j, k, l), out) in next.indexed_iter_mut() {
            let idx = [i, j, k, l];
            let mut acc = 0.0;
            for mu in 0..n {
                let mut src = idx;
                src[axis] = mu;
                acc += c[(mu, idx[axis])] * t[src];
            }
            *out = acc;
        }
        t = next;
    }
    (one, t)
}

/// Fold the core orbitals into a constant and an effective one-body term.
///
/// ```text
/// E_core = E_nuc + Σ_i (2 h_ii + Σ_j (2(ii|jj) - (ij|ji)))
/// h'_uv  = h_uv + Σ_i (2(uv|ii) - (ui|iv))
/// ```
pub fn reduce(
    one: &Array2<f64>,
    two: &Array4<f64>,
    nuclear_repulsion: f64,
    space: &ActiveSpace,
) -> ActiveIntegrals {
    let mut core_energy = nuclear_repulsion;
    for &i in &space.core {
        core_energy += 2.0 * one[[i, i]];
        for &j in &space.core {
            core_energy += 2.0 * two[[i, i, j, j]] - two[[i, j, j, i]];
        }
    }

    let n = space.active.len();
    let act = &space.active;
    let one_body = Array2::from_shape_fn((n, n), |(u, v)| {
        let (pu, pv) = (act[u], act[v]);
        let mut h = one[[pu, pv]];
        for &i in &space.core {
            h += 2.0 * two[[pu, pv, i, i]] - two[[pu, i, i, pv]];
        }
        h
    });
    let two_body =
        Array4::from_shape_fn((n, n, n, n), |(u, v, w, x)| two[[act[u], act[v], act[w], act[x]]]);

    debug!(
        n_core = space.core.len(),
        n_active = n,
        core_energy,
        "reduced integrals to active space"
    );

    ActiveIntegrals {
        core_energy,
        one_body,
        two_body,
    }
}
