//! Gate factory.
//!
//! Free functions mapping a gate kind and its operands to a [`Gate`].
//! Fixed-arity named gates cannot be malformed apart from repeated operands,
//! so only the multi-operand constructors return [`IrResult`].

use num_complex::Complex64;

use crate::error::IrResult;
use crate::gate::{Gate, GateKind, StandardGate};
use crate::pauli::PauliId;
use crate::qubit::QubitId;

fn one_qubit(gate: StandardGate, target: QubitId) -> Gate {
    Gate::single_target(gate, target)
}

/// Identity gate.
pub fn identity(target: QubitId) -> Gate {
    one_qubit(StandardGate::I, target)
}

/// Pauli-X gate.
pub fn x(target: QubitId) -> Gate {
    one_qubit(StandardGate::X, target)
}

/// Pauli-Y gate.
pub fn y(target: QubitId) -> Gate {
    one_qubit(StandardGate::Y, target)
}

/// Pauli-Z gate.
pub fn z(target: QubitId) -> Gate {
    one_qubit(StandardGate::Z, target)
}

/// Hadamard gate.
pub fn h(target: QubitId) -> Gate {
    one_qubit(StandardGate::H, target)
}

/// S gate.
pub fn s(target: QubitId) -> Gate {
    one_qubit(StandardGate::S, target)
}

/// S-dagger gate.
pub fn sdag(target: QubitId) -> Gate {
    one_qubit(StandardGate::Sdag, target)
}

/// T gate.
pub fn t(target: QubitId) -> Gate {
    one_qubit(StandardGate::T, target)
}

/// T-dagger gate.
pub fn tdag(target: QubitId) -> Gate {
    one_qubit(StandardGate::Tdag, target)
}

/// sqrt(X) gate.
pub fn sqrt_x(target: QubitId) -> Gate {
    one_qubit(StandardGate::SqrtX, target)
}

/// sqrt(X)-dagger gate.
pub fn sqrt_xdag(target: QubitId) -> Gate {
    one_qubit(StandardGate::SqrtXdag, target)
}

/// sqrt(Y) gate.
pub fn sqrt_y(target: QubitId) -> Gate {
    one_qubit(StandardGate::SqrtY, target)
}

/// sqrt(Y)-dagger gate.
pub fn sqrt_ydag(target: QubitId) -> Gate {
    one_qubit(StandardGate::SqrtYdag, target)
}

/// Projection onto |0⟩ (not normalizing).
pub fn p0(target: QubitId) -> Gate {
    one_qubit(StandardGate::P0, target)
}

/// Projection onto |1⟩ (not normalizing).
pub fn p1(target: QubitId) -> Gate {
    one_qubit(StandardGate::P1, target)
}

/// X rotation exp(-iθ/2·X).
pub fn rx(target: QubitId, angle: f64) -> Gate {
    one_qubit(StandardGate::Rx(angle), target)
}

/// Y rotation exp(-iθ/2·Y).
pub fn ry(target: QubitId, angle: f64) -> Gate {
    one_qubit(StandardGate::Ry(angle), target)
}

/// Z rotation exp(-iθ/2·Z).
pub fn rz(target: QubitId, angle: f64) -> Gate {
    one_qubit(StandardGate::Rz(angle), target)
}

/// U1(λ) phase gate.
pub fn u1(target: QubitId, lambda: f64) -> Gate {
    one_qubit(StandardGate::U1(lambda), target)
}

/// U2(φ, λ) gate.
pub fn u2(target: QubitId, phi: f64, lambda: f64) -> Gate {
    one_qubit(StandardGate::U2(phi, lambda), target)
}

/// U3(θ, φ, λ) gate.
pub fn u3(target: QubitId, theta: f64, phi: f64, lambda: f64) -> Gate {
    one_qubit(StandardGate::U3(theta, phi, lambda), target)
}

/// Controlled-NOT.
pub fn cnot(control: QubitId, target: QubitId) -> IrResult<Gate> {
    Gate::new(
        GateKind::Standard(StandardGate::CNOT),
        vec![target],
        vec![control],
    )
}

/// Controlled-Z.
pub fn cz(control: QubitId, target: QubitId) -> IrResult<Gate> {
    Gate::new(
        GateKind::Standard(StandardGate::CZ),
        vec![target],
        vec![control],
    )
}

/// SWAP.
pub fn swap(q1: QubitId, q2: QubitId) -> IrResult<Gate> {
    Gate::new(GateKind::Standard(StandardGate::Swap), vec![q1, q2], vec![])
}

/// Arbitrary dense matrix on `targets` (row-major, `2^k × 2^k`).
pub fn dense_matrix(
    targets: impl IntoIterator<Item = QubitId>,
    matrix: Vec<Complex64>,
) -> IrResult<Gate> {
    Gate::new(
        GateKind::DenseMatrix(matrix),
        targets.into_iter().collect(),
        vec![],
    )
}

/// Tensor product of Pauli operators, `paulis[j]` acting on `targets[j]`.
pub fn pauli(
    targets: impl IntoIterator<Item = QubitId>,
    paulis: impl IntoIterator<Item = PauliId>,
) -> IrResult<Gate> {
    Gate::new(
        GateKind::Pauli(paulis.into_iter().collect()),
        targets.into_iter().collect(),
        vec![],
    )
}

/// Pauli rotation exp(-iθ/2 · P), `paulis[j]` acting on `targets[j]`.
pub fn pauli_rotation(
    targets: impl IntoIterator<Item = QubitId>,
    paulis: impl IntoIterator<Item = PauliId>,
    angle: f64,
) -> IrResult<Gate> {
    Gate::new(
        GateKind::PauliRotation {
            paulis: paulis.into_iter().collect(),
            angle,
        },
        targets.into_iter().collect(),
        vec![],
    )
}
