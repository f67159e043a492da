//! Error types for the circuit crate.

use crate::qubit::QubitId;
use thiserror::Error;

/// Errors that can occur in circuit operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum IrError {
    /// Gate position outside the gate list.
    #[error("Gate index {index} out of range for circuit with {len} gates")]
    IndexOutOfRange {
        /// The requested position.
        index: usize,
        /// Current number of gates.
        len: usize,
    },

    /// Execution range is not a sub-range of the gate list.
    #[error("Invalid gate range [{start}, {end}) for circuit with {len} gates")]
    InvalidRange {
        /// First gate to apply.
        start: usize,
        /// One past the last gate to apply.
        end: usize,
        /// Current number of gates.
        len: usize,
    },

    /// Qubit index beyond the register.
    #[error("Qubit {qubit} out of range for {qubit_count} qubits{}", format_gate_context(.gate_name))]
    QubitOutOfRange {
        /// The offending qubit.
        qubit: QubitId,
        /// Size of the register.
        qubit_count: u32,
        /// Optional gate name for context.
        gate_name: Option<String>,
    },

    /// Duplicate qubit in a gate's operands.
    #[error("Duplicate qubit {qubit} in operation{}", format_gate_context(.gate_name))]
    DuplicateQubit {
        /// The duplicate qubit.
        qubit: QubitId,
        /// Optional gate name for context.
        gate_name: Option<String>,
    },

    /// Gate requires a different number of qubits.
    #[error("Gate '{gate_name}' requires {expected} qubits, got {got}")]
    QubitCountMismatch {
        /// Name of the gate.
        gate_name: String,
        /// Expected number of qubits.
        expected: u32,
        /// Actual number of qubits provided.
        got: u32,
    },

    /// Gate constructed without any qubit operand.
    #[error("Gate '{gate_name}' acts on no qubits")]
    NoQubits {
        /// Name of the gate.
        gate_name: String,
    },

    /// Matrix does not have the dimension its qubit count implies.
    #[error("Matrix has {got} entries, expected {expected}")]
    InvalidMatrix {
        /// Expected number of entries.
        expected: usize,
        /// Actual number of entries.
        got: usize,
    },

    /// A rotation built for diagonal lowering is not diagonal.
    #[error("Hamiltonian term {term} is not diagonal in the computational basis")]
    NonDiagonalTerm {
        /// Position of the term in the Hamiltonian.
        term: usize,
    },

    /// A Hamiltonian term cannot be turned into a gate.
    #[error("Malformed Hamiltonian term {term}: {reason}")]
    MalformedTerm {
        /// Position of the term in the Hamiltonian.
        term: usize,
        /// What is wrong with it.
        reason: String,
    },

    /// Numeric Pauli id outside 0..=3.
    #[error("Invalid Pauli id {0}, expected 0 (I), 1 (X), 2 (Y) or 3 (Z)")]
    InvalidPauliId(u32),

    /// Pauli string that does not parse.
    #[error("Invalid Pauli string: {0}")]
    InvalidPauliString(String),

    /// State has fewer qubits than the circuit addresses.
    #[error("Circuit needs {required} qubits but state only has {available}")]
    StateQubitMismatch {
        /// Qubits the circuit addresses.
        required: u32,
        /// Qubits the state holds.
        available: u32,
    },

    /// Amplitude vector length is not a power of two.
    #[error("State dimension {0} is not a non-zero power of two")]
    InvalidStateDimension(usize),

    /// Circuit created without any qubit.
    #[error("Circuit must have at least one qubit")]
    EmptyRegister,

    /// Register too wide to hold as dense amplitudes or a dense matrix.
    #[error("{requested} qubits requested, at most {max} supported")]
    TooManyQubits {
        /// Qubits asked for.
        requested: u32,
        /// Largest supported width.
        max: u32,
    },
}

/// Helper function to format optional gate context.
#[allow(clippy::ref_option)]
fn format_gate_context(gate_name: &Option<String>) -> String {
    match gate_name {
        Some(name) => format!(" (gate: {name})"),
        None => String::new(),
    }
}

/// Result type for circuit operations.
pub type IrResult<T> = Result<T, IrError>;
