//! Quantum gate types.
//!
//! [`QuantumGate`] is the capability surface a [`Circuit`](crate::Circuit)
//! relies on: operand lists, a state update, a deep copy and three boolean
//! predicates. [`Gate`] is the implementation produced by
//! [`factory`](crate::factory); other crates can bring their own.

use num_complex::Complex64;
use rustc_hash::FxHashSet;
use serde::Serialize;
use std::f64::consts::{FRAC_1_SQRT_2, FRAC_PI_2, FRAC_PI_4};
use std::fmt;

use crate::error::{IrError, IrResult};
use crate::pauli::PauliId;
use crate::qubit::QubitId;
use crate::state::QuantumState;

/// Off-diagonal magnitude treated as zero when classifying dense matrices.
const DIAGONAL_TOLERANCE: f64 = 1e-12;

/// Widest Pauli string [`GateKind::matrix`] will expand into a dense matrix.
pub const MAX_MATRIX_QUBITS: u32 = 10;

/// An operation acting on target qubits, optionally conditioned on controls.
pub trait QuantumGate: fmt::Debug + Send + Sync {
    /// Short name of the gate.
    fn name(&self) -> &str;

    /// Qubits the gate acts on, in matrix bit order.
    fn target_qubit_list(&self) -> &[QubitId];

    /// Qubits that must all be |1⟩ for the gate to act.
    fn control_qubit_list(&self) -> &[QubitId];

    /// Apply the gate to `state` in place.
    fn update_quantum_state(&self, state: &mut dyn QuantumState) -> IrResult<()>;

    /// Independent deep copy.
    fn copy(&self) -> Box<dyn QuantumGate>;

    /// Whether the gate is an element of the Clifford group.
    fn is_clifford(&self) -> bool;

    /// Whether the gate has the Gaussian property.
    fn is_gaussian(&self) -> bool;

    /// Whether the gate is diagonal in the computational basis.
    fn is_diagonal(&self) -> bool;

    /// Numeric parameters (rotation angles). Empty for fixed gates.
    fn parameters(&self) -> Vec<f64> {
        Vec::new()
    }

    /// Number of qubits touched: targets plus controls.
    fn num_qubits(&self) -> usize {
        self.target_qubit_list().len() + self.control_qubit_list().len()
    }
}

impl Clone for Box<dyn QuantumGate> {
    fn clone(&self) -> Self {
        self.copy()
    }
}

/// Named gates with fixed arity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum StandardGate {
    // Single-qubit Pauli gates
    /// Identity gate.
    I,
    /// Pauli-X gate.
    X,
    /// Pauli-Y gate.
    Y,
    /// Pauli-Z gate.
    Z,

    // Single-qubit Clifford gates
    /// Hadamard gate.
    H,
    /// S gate (sqrt(Z)).
    S,
    /// S-dagger gate.
    Sdag,
    /// sqrt(X) gate.
    SqrtX,
    /// sqrt(X)-dagger gate.
    SqrtXdag,
    /// sqrt(Y) gate.
    SqrtY,
    /// sqrt(Y)-dagger gate.
    SqrtYdag,

    // Non-Clifford phase gates
    /// T gate (fourth root of Z).
    T,
    /// T-dagger gate.
    Tdag,

    // Projections
    /// Projection onto |0⟩.
    P0,
    /// Projection onto |1⟩.
    P1,

    // Rotations
    /// Rotation around X axis, exp(-iθ/2·X).
    Rx(f64),
    /// Rotation around Y axis, exp(-iθ/2·Y).
    Ry(f64),
    /// Rotation around Z axis, exp(-iθ/2·Z).
    Rz(f64),
    /// Phase gate U1(λ) = diag(1, e^{iλ}).
    U1(f64),
    /// U2(φ, λ) = U3(π/2, φ, λ).
    U2(f64, f64),
    /// Universal single-qubit gate U3(θ, φ, λ).
    U3(f64, f64, f64),

    // Two-qubit gates
    /// Controlled-X: one control, one target.
    CNOT,
    /// Controlled-Z: one control, one target.
    CZ,
    /// SWAP: two targets.
    Swap,
}

impl StandardGate {
    /// Get the name of this gate.
    #[inline]
    pub fn name(&self) -> &'static str {
        match self {
            StandardGate::I => "id",
            StandardGate::X => "x",
            StandardGate::Y => "y",
            StandardGate::Z => "z",
            StandardGate::H => "h",
            StandardGate::S => "s",
            StandardGate::Sdag => "sdg",
            StandardGate::SqrtX => "sx",
            StandardGate::SqrtXdag => "sxdg",
            StandardGate::SqrtY => "sy",
            StandardGate::SqrtYdag => "sydg",
            StandardGate::T => "t",
            StandardGate::Tdag => "tdg",
            StandardGate::P0 => "p0",
            StandardGate::P1 => "p1",
            StandardGate::Rx(_) => "rx",
            StandardGate::Ry(_) => "ry",
            StandardGate::Rz(_) => "rz",
            StandardGate::U1(_) => "u1",
            StandardGate::U2(_, _) => "u2",
            StandardGate::U3(_, _, _) => "u3",
            StandardGate::CNOT => "cx",
            StandardGate::CZ => "cz",
            StandardGate::Swap => "swap",
        }
    }

    /// Number of target qubits (controls excluded).
    #[inline]
    pub fn num_targets(&self) -> u32 {
        match self {
            StandardGate::Swap => 2,
            _ => 1,
        }
    }

    /// Number of control qubits.
    #[inline]
    pub fn num_controls(&self) -> u32 {
        match self {
            StandardGate::CNOT | StandardGate::CZ => 1,
            _ => 0,
        }
    }

    /// Clifford-group membership.
    pub fn is_clifford(&self) -> bool {
        matches!(
            self,
            StandardGate::I
                | StandardGate::X
                | StandardGate::Y
                | StandardGate::Z
                | StandardGate::H
                | StandardGate::S
                | StandardGate::Sdag
                | StandardGate::SqrtX
                | StandardGate::SqrtXdag
                | StandardGate::SqrtY
                | StandardGate::SqrtYdag
                | StandardGate::CNOT
                | StandardGate::CZ
                | StandardGate::Swap
        )
    }

    /// Every named unitary is Gaussian; the non-unitary projections are not.
    pub fn is_gaussian(&self) -> bool {
        !matches!(self, StandardGate::P0 | StandardGate::P1)
    }

    /// Diagonal in the computational basis.
    pub fn is_diagonal(&self) -> bool {
        matches!(
            self,
            StandardGate::I
                | StandardGate::Z
                | StandardGate::S
                | StandardGate::Sdag
                | StandardGate::T
                | StandardGate::Tdag
                | StandardGate::P0
                | StandardGate::P1
                | StandardGate::Rz(_)
                | StandardGate::U1(_)
                | StandardGate::CZ
        )
    }

    /// Get parameters of this gate.
    pub fn parameters(&self) -> Vec<f64> {
        match *self {
            StandardGate::Rx(p) | StandardGate::Ry(p) | StandardGate::Rz(p) | StandardGate::U1(p) => {
                vec![p]
            }
            StandardGate::U2(phi, lambda) => vec![phi, lambda],
            StandardGate::U3(theta, phi, lambda) => vec![theta, phi, lambda],
            _ => vec![],
        }
    }

    /// Row-major matrix acting on the target qubits.
    pub fn matrix(&self) -> Vec<Complex64> {
        let zero = c(0.0, 0.0);
        let one = c(1.0, 0.0);
        let i = c(0.0, 1.0);
        let half = 0.5;
        match *self {
            StandardGate::I => PauliId::I.matrix().to_vec(),
            StandardGate::X => PauliId::X.matrix().to_vec(),
            StandardGate::Y => PauliId::Y.matrix().to_vec(),
            StandardGate::Z => PauliId::Z.matrix().to_vec(),
            StandardGate::H => {
                let h = c(FRAC_1_SQRT_2, 0.0);
                vec![h, h, h, -h]
            }
            StandardGate::S => vec![one, zero, zero, i],
            StandardGate::Sdag => vec![one, zero, zero, -i],
            StandardGate::T => vec![one, zero, zero, Complex64::from_polar(1.0, FRAC_PI_4)],
            StandardGate::Tdag => vec![one, zero, zero, Complex64::from_polar(1.0, -FRAC_PI_4)],
            StandardGate::SqrtX => vec![
                c(half, half),
                c(half, -half),
                c(half, -half),
                c(half, half),
            ],
            StandardGate::SqrtXdag => vec![
                c(half, -half),
                c(half, half),
                c(half, half),
                c(half, -half),
            ],
            StandardGate::SqrtY => vec![
                c(half, half),
                c(-half, -half),
                c(half, half),
                c(half, half),
            ],
            StandardGate::SqrtYdag => vec![
                c(half, -half),
                c(half, -half),
                c(-half, half),
                c(half, -half),
            ],
            StandardGate::P0 => vec![one, zero, zero, zero],
            StandardGate::P1 => vec![zero, zero, zero, one],
            StandardGate::Rx(theta) => {
                let (s, co) = (theta / 2.0).sin_cos();
                vec![c(co, 0.0), c(0.0, -s), c(0.0, -s), c(co, 0.0)]
            }
            StandardGate::Ry(theta) => {
                let (s, co) = (theta / 2.0).sin_cos();
                vec![c(co, 0.0), c(-s, 0.0), c(s, 0.0), c(co, 0.0)]
            }
            StandardGate::Rz(theta) => vec![
                Complex64::from_polar(1.0, -theta / 2.0),
                zero,
                zero,
                Complex64::from_polar(1.0, theta / 2.0),
            ],
            StandardGate::U1(lambda) => vec![one, zero, zero, Complex64::from_polar(1.0, lambda)],
            StandardGate::U2(phi, lambda) => u3_matrix(FRAC_PI_2, phi, lambda),
            StandardGate::U3(theta, phi, lambda) => u3_matrix(theta, phi, lambda),
            StandardGate::CNOT => PauliId::X.matrix().to_vec(),
            StandardGate::CZ => PauliId::Z.matrix().to_vec(),
            StandardGate::Swap => {
                let mut m = vec![zero; 16];
                m[0] = one;
                m[4 + 2] = one;
                m[8 + 1] = one;
                m[15] = one;
                m
            }
        }
    }
}

#[inline]
fn c(re: f64, im: f64) -> Complex64 {
    Complex64::new(re, im)
}

fn u3_matrix(theta: f64, phi: f64, lambda: f64) -> Vec<Complex64> {
    let (s, co) = (theta / 2.0).sin_cos();
    vec![
        c(co, 0.0),
        -Complex64::from_polar(s, lambda),
        Complex64::from_polar(s, phi),
        Complex64::from_polar(co, phi + lambda),
    ]
}

/// Tensor product of Pauli operators; bit `j` of a row/column index selects
/// the basis state of `paulis[j]`.
fn pauli_tensor(paulis: &[PauliId]) -> IrResult<Vec<Complex64>> {
    let width = u32::try_from(paulis.len()).unwrap_or(u32::MAX);
    if width > MAX_MATRIX_QUBITS {
        return Err(IrError::TooManyQubits {
            requested: width,
            max: MAX_MATRIX_QUBITS,
        });
    }
    let dim = 1usize << width;
    let factors: Vec<[Complex64; 4]> = paulis.iter().map(|p| p.matrix()).collect();
    let mut out = vec![c(0.0, 0.0); dim * dim];
    for row in 0..dim {
        for col in 0..dim {
            let mut entry = c(1.0, 0.0);
            for (j, m) in factors.iter().enumerate() {
                entry *= m[((row >> j) & 1) * 2 + ((col >> j) & 1)];
                if entry == c(0.0, 0.0) {
                    break;
                }
            }
            out[row * dim + col] = entry;
        }
    }
    Ok(out)
}

/// The operation a [`Gate`] performs on its targets.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum GateKind {
    /// A named gate.
    Standard(StandardGate),
    /// Tensor product of Pauli operators, one per target.
    Pauli(Vec<PauliId>),
    /// exp(-iθ/2 · P) for a Pauli string P, one id per target.
    PauliRotation {
        /// Pauli id per target qubit.
        paulis: Vec<PauliId>,
        /// Rotation angle θ.
        angle: f64,
    },
    /// Arbitrary row-major 2^k × 2^k matrix.
    DenseMatrix(Vec<Complex64>),
}

impl GateKind {
    /// Get the name of this gate.
    #[inline]
    pub fn name(&self) -> &'static str {
        match self {
            GateKind::Standard(g) => g.name(),
            GateKind::Pauli(_) => "pauli",
            GateKind::PauliRotation { .. } => "pauli_rotation",
            GateKind::DenseMatrix(_) => "dense_matrix",
        }
    }

    /// Row-major matrix acting on the target qubits.
    ///
    /// Pauli strings wider than [`MAX_MATRIX_QUBITS`] fail with
    /// [`IrError::TooManyQubits`]; execution never needs their matrix.
    pub fn matrix(&self) -> IrResult<Vec<Complex64>> {
        match self {
            GateKind::Standard(g) => Ok(g.matrix()),
            GateKind::Pauli(paulis) => pauli_tensor(paulis),
            GateKind::PauliRotation { paulis, angle } => {
                let (s, co) = (angle / 2.0).sin_cos();
                let minus_i_sin = c(0.0, -s);
                let mut m: Vec<Complex64> = pauli_tensor(paulis)?
                    .into_iter()
                    .map(|p| minus_i_sin * p)
                    .collect();
                let dim = 1usize << paulis.len();
                for k in 0..dim {
                    m[k * dim + k] += co;
                }
                Ok(m)
            }
            GateKind::DenseMatrix(m) => Ok(m.clone()),
        }
    }
}

/// A gate instance: an operation bound to its operand qubits.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Gate {
    /// The operation.
    kind: GateKind,
    /// Target qubits in matrix bit order.
    targets: Vec<QubitId>,
    /// Control qubits.
    controls: Vec<QubitId>,
    /// Optional label for the gate.
    #[serde(skip_serializing_if = "Option::is_none")]
    label: Option<String>,
}

impl Gate {
    /// Bind `kind` to its operands, checking arity and distinctness.
    ///
    /// An empty Pauli string is accepted: it is the identity, or a global
    /// phase when rotated.
    pub(crate) fn new(
        kind: GateKind,
        targets: Vec<QubitId>,
        controls: Vec<QubitId>,
    ) -> IrResult<Self> {
        let name = kind.name();
        let pauli_string = matches!(kind, GateKind::Pauli(_) | GateKind::PauliRotation { .. });
        if targets.is_empty() && !pauli_string {
            return Err(IrError::NoQubits {
                gate_name: name.to_string(),
            });
        }

        let expected_targets = match &kind {
            GateKind::Standard(g) => g.num_targets() as usize,
            GateKind::Pauli(paulis) | GateKind::PauliRotation { paulis, .. } => paulis.len(),
            GateKind::DenseMatrix(m) => {
                // 4^k entries for k targets
                let expected = 1usize
                    .checked_shl(2 * targets.len() as u32)
                    .unwrap_or(usize::MAX);
                if m.len() != expected {
                    return Err(IrError::InvalidMatrix {
                        expected,
                        got: m.len(),
                    });
                }
                targets.len()
            }
        };
        if targets.len() != expected_targets {
            return Err(IrError::QubitCountMismatch {
                gate_name: name.to_string(),
                expected: expected_targets as u32,
                got: targets.len() as u32,
            });
        }

        let mut seen = FxHashSet::default();
        for &q in targets.iter().chain(&controls) {
            if !seen.insert(q) {
                return Err(IrError::DuplicateQubit {
                    qubit: q,
                    gate_name: Some(name.to_string()),
                });
            }
        }

        Ok(Self {
            kind,
            targets,
            controls,
            label: None,
        })
    }

    /// Named one-target gate. A single operand cannot repeat.
    pub(crate) fn single_target(gate: StandardGate, target: QubitId) -> Self {
        debug_assert_eq!(gate.num_targets() + gate.num_controls(), 1);
        Self {
            kind: GateKind::Standard(gate),
            targets: vec![target],
            controls: vec![],
            label: None,
        }
    }

    /// Add a label to the gate.
    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// The operation this gate performs.
    pub fn kind(&self) -> &GateKind {
        &self.kind
    }

    /// Optional label.
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// Row-major matrix acting on the target qubits.
    pub fn matrix(&self) -> IrResult<Vec<Complex64>> {
        self.kind.matrix()
    }
}

impl QuantumGate for Gate {
    fn name(&self) -> &str {
        self.kind.name()
    }

    fn target_qubit_list(&self) -> &[QubitId] {
        &self.targets
    }

    fn control_qubit_list(&self) -> &[QubitId] {
        &self.controls
    }

    fn update_quantum_state(&self, state: &mut dyn QuantumState) -> IrResult<()> {
        match &self.kind {
            GateKind::Standard(g) => {
                state.apply_matrix(&self.targets, &self.controls, &g.matrix())
            }
            GateKind::Pauli(paulis) => state.apply_pauli(&self.targets, &self.controls, paulis),
            GateKind::PauliRotation { paulis, angle } => {
                state.apply_pauli_rotation(&self.targets, &self.controls, paulis, *angle)
            }
            GateKind::DenseMatrix(m) => state.apply_matrix(&self.targets, &self.controls, m),
        }
    }

    fn copy(&self) -> Box<dyn QuantumGate> {
        Box::new(self.clone())
    }

    fn is_clifford(&self) -> bool {
        match &self.kind {
            GateKind::Standard(g) => g.is_clifford(),
            GateKind::Pauli(_) => true,
            GateKind::PauliRotation { .. } | GateKind::DenseMatrix(_) => false,
        }
    }

    fn is_gaussian(&self) -> bool {
        match &self.kind {
            GateKind::Standard(g) => g.is_gaussian(),
            GateKind::Pauli(_) | GateKind::PauliRotation { .. } | GateKind::DenseMatrix(_) => false,
        }
    }

    fn is_diagonal(&self) -> bool {
        match &self.kind {
            GateKind::Standard(g) => g.is_diagonal(),
            GateKind::Pauli(paulis) | GateKind::PauliRotation { paulis, .. } => {
                paulis.iter().all(|p| p.is_diagonal())
            }
            GateKind::DenseMatrix(m) => {
                let dim = 1usize << self.targets.len();
                m.iter()
                    .enumerate()
                    .filter(|(k, _)| k / dim != k % dim)
                    .all(|(_, v)| v.norm() <= DIAGONAL_TOLERANCE)
            }
        }
    }

    fn parameters(&self) -> Vec<f64> {
        match &self.kind {
            GateKind::Standard(g) => g.parameters(),
            GateKind::PauliRotation { angle, .. } => vec![*angle],
            GateKind::Pauli(_) | GateKind::DenseMatrix(_) => vec![],
        }
    }
}

impl fmt::Display for Gate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind.name())?;
        let params = self.parameters();
        if !params.is_empty() {
            let rendered: Vec<String> = params.iter().map(ToString::to_string).collect();
            write!(f, "({})", rendered.join(", "))?;
        }
        for q in &self.controls {
            write!(f, " @{q}")?;
        }
        for q in &self.targets {
            write!(f, " {q}")?;
        }
        Ok(())
    }
}
