//! Circuit container: gate ownership, mutation and execution.

use std::fmt;

use num_complex::Complex64;
use tracing::trace;

use crate::error::{IrError, IrResult};
use crate::factory;
use crate::gate::QuantumGate;
use crate::hamiltonian::PauliTerm;
use crate::pauli::PauliId;
use crate::qubit::QubitId;
use crate::state::QuantumState;

/// An ordered sequence of gates over a fixed number of qubits.
///
/// The circuit owns every gate it holds. Every qubit a gate touches is
/// checked against [`qubit_count`](Self::qubit_count) when the gate is
/// inserted, so the analysis passes and execution can rely on it.
#[derive(Debug)]
pub struct Circuit {
    /// Width of the register, fixed at construction.
    qubit_count: u32,
    /// Gates in application order.
    gates: Vec<Box<dyn QuantumGate>>,
}

impl Circuit {
    /// Create an empty circuit on `qubit_count` qubits.
    ///
    /// Fails with [`IrError::EmptyRegister`] when `qubit_count` is 0.
    pub fn new(qubit_count: u32) -> IrResult<Self> {
        if qubit_count == 0 {
            return Err(IrError::EmptyRegister);
        }
        Ok(Self {
            qubit_count,
            gates: vec![],
        })
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Number of qubits.
    pub fn qubit_count(&self) -> u32 {
        self.qubit_count
    }

    /// The gates in application order.
    pub fn gates(&self) -> &[Box<dyn QuantumGate>] {
        &self.gates
    }

    /// The gate at `index`, if any.
    pub fn gate(&self, index: usize) -> Option<&dyn QuantumGate> {
        self.gates.get(index).map(|g| g.as_ref())
    }

    /// Number of gates.
    pub fn gate_count(&self) -> usize {
        self.gates.len()
    }

    /// True if the circuit holds no gates.
    pub fn is_empty(&self) -> bool {
        self.gates.is_empty()
    }

    // =========================================================================
    // Mutation
    // =========================================================================

    /// Append `gate`, taking ownership.
    pub fn add_gate(&mut self, gate: Box<dyn QuantumGate>) -> IrResult<&mut Self> {
        self.check_qubits(gate.as_ref())?;
        self.gates.push(gate);
        Ok(self)
    }

    /// Insert `gate` before position `index` (`index == gate_count()` appends).
    pub fn add_gate_at(&mut self, gate: Box<dyn QuantumGate>, index: usize) -> IrResult<&mut Self> {
        self.check_insert_index(index)?;
        self.check_qubits(gate.as_ref())?;
        self.gates.insert(index, gate);
        Ok(self)
    }

    /// Append a deep copy of `gate`; the caller keeps the original.
    pub fn add_gate_copy(&mut self, gate: &dyn QuantumGate) -> IrResult<&mut Self> {
        self.add_gate(gate.copy())
    }

    /// Insert a deep copy of `gate` before position `index`.
    pub fn add_gate_copy_at(&mut self, gate: &dyn QuantumGate, index: usize) -> IrResult<&mut Self> {
        self.check_insert_index(index)?;
        self.add_gate_at(gate.copy(), index)
    }

    /// Remove and drop the gate at `index`. Later gates shift down by one.
    pub fn remove_gate(&mut self, index: usize) -> IrResult<()> {
        if index >= self.gates.len() {
            return Err(IrError::IndexOutOfRange {
                index,
                len: self.gates.len(),
            });
        }
        self.gates.remove(index);
        Ok(())
    }

    /// Independent deep copy of the circuit and all of its gates.
    pub fn copy(&self) -> Self {
        self.clone()
    }

    /// Append pre-validated gates in one go.
    pub(crate) fn extend_unchecked(&mut self, gates: impl IntoIterator<Item = Box<dyn QuantumGate>>) {
        self.gates.extend(gates);
    }

    fn check_insert_index(&self, index: usize) -> IrResult<()> {
        if index > self.gates.len() {
            return Err(IrError::IndexOutOfRange {
                index,
                len: self.gates.len(),
            });
        }
        Ok(())
    }

    /// Every operand of `gate` must lie inside the register.
    pub(crate) fn check_qubits(&self, gate: &dyn QuantumGate) -> IrResult<()> {
        let operands = gate
            .target_qubit_list()
            .iter()
            .chain(gate.control_qubit_list());
        for &qubit in operands {
            if qubit.0 >= self.qubit_count {
                return Err(IrError::QubitOutOfRange {
                    qubit,
                    qubit_count: self.qubit_count,
                    gate_name: Some(gate.name().to_string()),
                });
            }
        }
        Ok(())
    }

    // =========================================================================
    // Execution
    // =========================================================================

    /// Apply every gate to `state`, first to last.
    pub fn update_quantum_state(&self, state: &mut dyn QuantumState) -> IrResult<()> {
        self.update_quantum_state_range(state, 0, self.gates.len())
    }

    /// Apply the gates in `[start, end)` to `state`, in order.
    pub fn update_quantum_state_range(
        &self,
        state: &mut dyn QuantumState,
        start: usize,
        end: usize,
    ) -> IrResult<()> {
        if start > end || end > self.gates.len() {
            return Err(IrError::InvalidRange {
                start,
                end,
                len: self.gates.len(),
            });
        }
        let available = state.qubit_count();
        if available < self.qubit_count {
            return Err(IrError::StateQubitMismatch {
                required: self.qubit_count,
                available,
            });
        }

        trace!(start, end, qubit_count = self.qubit_count, "applying circuit range");
        for gate in &self.gates[start..end] {
            gate.update_quantum_state(state)?;
        }
        Ok(())
    }

    // =========================================================================
    // Named gates
    // =========================================================================

    /// Append an X gate.
    pub fn add_x_gate(&mut self, target: QubitId) -> IrResult<&mut Self> {
        self.add_gate(Box::new(factory::x(target)))
    }

    /// Append a Y gate.
    pub fn add_y_gate(&mut self, target: QubitId) -> IrResult<&mut Self> {
        self.add_gate(Box::new(factory::y(target)))
    }

    /// Append a Z gate.
    pub fn add_z_gate(&mut self, target: QubitId) -> IrResult<&mut Self> {
        self.add_gate(Box::new(factory::z(target)))
    }

    /// Append a Hadamard gate.
    pub fn add_h_gate(&mut self, target: QubitId) -> IrResult<&mut Self> {
        self.add_gate(Box::new(factory::h(target)))
    }

    /// Append an S gate.
    pub fn add_s_gate(&mut self, target: QubitId) -> IrResult<&mut Self> {
        self.add_gate(Box::new(factory::s(target)))
    }

    /// Append an S-dagger gate.
    pub fn add_sdag_gate(&mut self, target: QubitId) -> IrResult<&mut Self> {
        self.add_gate(Box::new(factory::sdag(target)))
    }

    /// Append a T gate.
    pub fn add_t_gate(&mut self, target: QubitId) -> IrResult<&mut Self> {
        self.add_gate(Box::new(factory::t(target)))
    }

    /// Append a T-dagger gate.
    pub fn add_tdag_gate(&mut self, target: QubitId) -> IrResult<&mut Self> {
        self.add_gate(Box::new(factory::tdag(target)))
    }

    /// Append a sqrt(X) gate.
    pub fn add_sqrt_x_gate(&mut self, target: QubitId) -> IrResult<&mut Self> {
        self.add_gate(Box::new(factory::sqrt_x(target)))
    }

    /// Append a sqrt(X)-dagger gate.
    pub fn add_sqrt_xdag_gate(&mut self, target: QubitId) -> IrResult<&mut Self> {
        self.add_gate(Box::new(factory::sqrt_xdag(target)))
    }

    /// Append a sqrt(Y) gate.
    pub fn add_sqrt_y_gate(&mut self, target: QubitId) -> IrResult<&mut Self> {
        self.add_gate(Box::new(factory::sqrt_y(target)))
    }

    /// Append a sqrt(Y)-dagger gate.
    pub fn add_sqrt_ydag_gate(&mut self, target: QubitId) -> IrResult<&mut Self> {
        self.add_gate(Box::new(factory::sqrt_ydag(target)))
    }

    /// Append a projection onto |0⟩.
    pub fn add_p0_gate(&mut self, target: QubitId) -> IrResult<&mut Self> {
        self.add_gate(Box::new(factory::p0(target)))
    }

    /// Append a projection onto |1⟩.
    pub fn add_p1_gate(&mut self, target: QubitId) -> IrResult<&mut Self> {
        self.add_gate(Box::new(factory::p1(target)))
    }

    /// Append a CNOT gate.
    pub fn add_cnot_gate(&mut self, control: QubitId, target: QubitId) -> IrResult<&mut Self> {
        self.add_gate(Box::new(factory::cnot(control, target)?))
    }

    /// Append a CZ gate.
    pub fn add_cz_gate(&mut self, control: QubitId, target: QubitId) -> IrResult<&mut Self> {
        self.add_gate(Box::new(factory::cz(control, target)?))
    }

    /// Append a SWAP gate.
    pub fn add_swap_gate(&mut self, q1: QubitId, q2: QubitId) -> IrResult<&mut Self> {
        self.add_gate(Box::new(factory::swap(q1, q2)?))
    }

    /// Append an X rotation.
    pub fn add_rx_gate(&mut self, target: QubitId, angle: f64) -> IrResult<&mut Self> {
        self.add_gate(Box::new(factory::rx(target, angle)))
    }

    /// Append a Y rotation.
    pub fn add_ry_gate(&mut self, target: QubitId, angle: f64) -> IrResult<&mut Self> {
        self.add_gate(Box::new(factory::ry(target, angle)))
    }

    /// Append a Z rotation.
    pub fn add_rz_gate(&mut self, target: QubitId, angle: f64) -> IrResult<&mut Self> {
        self.add_gate(Box::new(factory::rz(target, angle)))
    }

    /// Append a U1 gate.
    pub fn add_u1_gate(&mut self, target: QubitId, lambda: f64) -> IrResult<&mut Self> {
        self.add_gate(Box::new(factory::u1(target, lambda)))
    }

    /// Append a U2 gate.
    pub fn add_u2_gate(&mut self, target: QubitId, phi: f64, lambda: f64) -> IrResult<&mut Self> {
        self.add_gate(Box::new(factory::u2(target, phi, lambda)))
    }

    /// Append a U3 gate.
    pub fn add_u3_gate(
        &mut self,
        target: QubitId,
        theta: f64,
        phi: f64,
        lambda: f64,
    ) -> IrResult<&mut Self> {
        self.add_gate(Box::new(factory::u3(target, theta, phi, lambda)))
    }

    /// Append an arbitrary dense matrix gate on `targets`.
    pub fn add_dense_matrix_gate(
        &mut self,
        targets: &[QubitId],
        matrix: Vec<Complex64>,
    ) -> IrResult<&mut Self> {
        self.add_gate(Box::new(factory::dense_matrix(targets.iter().copied(), matrix)?))
    }

    /// Append a Pauli string, `paulis[j]` on `targets[j]`.
    pub fn add_multi_pauli_gate(
        &mut self,
        targets: &[QubitId],
        paulis: &[PauliId],
    ) -> IrResult<&mut Self> {
        self.add_gate(Box::new(factory::pauli(
            targets.iter().copied(),
            paulis.iter().copied(),
        )?))
    }

    /// Append the Pauli string of `term`, ignoring its coefficient.
    pub fn add_multi_pauli_gate_from_term(&mut self, term: &PauliTerm) -> IrResult<&mut Self> {
        self.add_multi_pauli_gate(term.index_list(), term.pauli_id_list())
    }

    /// Append exp(-iθ/2 · P) for the Pauli string `paulis` on `targets`.
    pub fn add_multi_pauli_rotation_gate(
        &mut self,
        targets: &[QubitId],
        paulis: &[PauliId],
        angle: f64,
    ) -> IrResult<&mut Self> {
        self.add_gate(Box::new(factory::pauli_rotation(
            targets.iter().copied(),
            paulis.iter().copied(),
            angle,
        )?))
    }

    /// Append a rotation about the Pauli string of `term`, using its real
    /// coefficient as the angle.
    pub fn add_multi_pauli_rotation_gate_from_term(
        &mut self,
        term: &PauliTerm,
    ) -> IrResult<&mut Self> {
        let angle = term.real_coef(0)?;
        self.add_multi_pauli_rotation_gate(term.index_list(), term.pauli_id_list(), angle)
    }
}

impl Clone for Circuit {
    fn clone(&self) -> Self {
        Self {
            qubit_count: self.qubit_count,
            gates: self.gates.clone(),
        }
    }
}

impl fmt::Display for Circuit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.summary())
    }
}
