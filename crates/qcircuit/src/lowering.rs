//! Hamiltonian lowering: turning `exp(-i·angle·H)` into Pauli rotations.
//!
//! Two policies are offered.
//!
//! # Diagonal
//!
//! When every term is built from I and Z only, all terms commute and
//!
//!   exp(-i·angle·H) = ∏_k exp(-i·angle·c_k·P_k)
//!
//! holds exactly, so one rotation per term suffices.
//!
//! # First-order Trotter
//!
//!   exp(-i·angle·H) ≈ [∏_k exp(-i·angle·c_k·P_k / r)]^r
//!
//! Error: O(angle² / r).
//!
//! Both passes build and check every gate before touching the circuit, so a
//! failing call leaves the circuit unchanged. A term with no qubits is a
//! constant offset and lowers to a zero-operand rotation (a global phase).

use tracing::debug;

use crate::circuit::Circuit;
use crate::error::{IrError, IrResult};
use crate::factory;
use crate::gate::{Gate, QuantumGate};
use crate::hamiltonian::Hamiltonian;

/// Repeat count used when the caller passes `num_repeats == 0`:
/// `ceil(angle · qubit_count · 100)`, never less than 1.
pub fn default_repeat_count(angle: f64, qubit_count: u32) -> u32 {
    let raw = (angle * f64::from(qubit_count) * 100.0).ceil();
    if raw.is_nan() || raw < 1.0 {
        1
    } else {
        // `as` saturates at u32::MAX
        raw as u32
    }
}

impl Circuit {
    /// Append `exp(-i·angle·H)` for a diagonal Hamiltonian: one
    /// [`pauli_rotation`](factory::pauli_rotation) per term with angle
    /// `coef · angle`, in term order.
    ///
    /// Fails with [`IrError::NonDiagonalTerm`] if any term contains X or Y.
    pub fn add_diagonal_hamiltonian_rotation_gate(
        &mut self,
        hamiltonian: &Hamiltonian,
        angle: f64,
    ) -> IrResult<&mut Self> {
        debug!(
            n_terms = hamiltonian.n_terms(),
            angle, "lowering diagonal Hamiltonian"
        );
        let gates = self.term_rotations(hamiltonian, angle)?;
        if let Some(term) = gates.iter().position(|g| !g.is_diagonal()) {
            return Err(IrError::NonDiagonalTerm { term });
        }
        self.extend_unchecked(gates.into_iter().map(|g| Box::new(g) as Box<dyn QuantumGate>));
        Ok(self)
    }

    /// Append a first-order Trotter approximation of `exp(-i·angle·H)`.
    ///
    /// Each of the `r` repetitions applies one rotation per term, in term
    /// order, with angle `angle · coef / r`. `num_repeats == 0` selects
    /// [`default_repeat_count`] for `hamiltonian.qubit_count()`.
    pub fn add_hamiltonian_rotation_gate(
        &mut self,
        hamiltonian: &Hamiltonian,
        angle: f64,
        num_repeats: u32,
    ) -> IrResult<&mut Self> {
        let repeats = if num_repeats == 0 {
            default_repeat_count(angle, hamiltonian.qubit_count())
        } else {
            num_repeats
        };
        debug!(
            n_terms = hamiltonian.n_terms(),
            repeats,
            angle,
            "lowering Hamiltonian with first-order Trotter"
        );

        let slice = self.term_rotations(hamiltonian, angle / f64::from(repeats))?;
        let mut gates: Vec<Box<dyn QuantumGate>> =
            Vec::with_capacity(slice.len() * repeats as usize);
        for _ in 0..repeats {
            gates.extend(
                slice
                    .iter()
                    .map(|g| Box::new(g.clone()) as Box<dyn QuantumGate>),
            );
        }
        self.extend_unchecked(gates);
        Ok(self)
    }

    /// One rotation per term with angle `coef · scale`, each validated
    /// against the Hamiltonian and against this circuit's register.
    fn term_rotations(&self, hamiltonian: &Hamiltonian, scale: f64) -> IrResult<Vec<Gate>> {
        hamiltonian
            .terms()
            .iter()
            .enumerate()
            .map(|(k, term)| {
                term.validate(k, hamiltonian.qubit_count())?;
                let coef = term.real_coef(k)?;
                let gate = factory::pauli_rotation(
                    term.index_list().iter().copied(),
                    term.pauli_id_list().iter().copied(),
                    coef * scale,
                )?;
                self.check_qubits(&gate)?;
                Ok(gate)
            })
            .collect()
    }
}
