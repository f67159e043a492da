//! Quantum circuit intermediate representation.
//!
//! This crate holds an ordered list of gates over a fixed register and offers
//! the passes that operate on it:
//!
//! - **Mutation**: append, insert, copy-insert and remove gates on a
//!   [`Circuit`], with every qubit checked against the register width
//! - **Execution**: apply all gates, or a sub-range, to any [`QuantumState`]
//! - **Analysis**: depth, Clifford and Gaussian classification, and a
//!   [`CircuitSummary`] report
//! - **Lowering**: turn `exp(-i·angle·H)` for a [`Hamiltonian`] into Pauli
//!   rotations, either exactly (diagonal Hamiltonians) or by first-order
//!   Trotterization
//!
//! Gates are open: anything implementing [`QuantumGate`] can be placed in a
//! circuit. The [`factory`] module builds the standard set as [`Gate`] values,
//! and [`StateVector`] is a dense reference state to run circuits on.
//!
//! # Example: Bell state
//!
//! ```rust
//! use qcircuit::{Circuit, QubitId, StateVector};
//!
//! let mut circuit = Circuit::new(2)?;
//! circuit.add_h_gate(QubitId(0))?;
//! circuit.add_cnot_gate(QubitId(0), QubitId(1))?;
//!
//! assert_eq!(circuit.calculate_depth(), 2);
//! assert!(circuit.is_clifford());
//!
//! let mut state = StateVector::new(2)?;
//! circuit.update_quantum_state(&mut state)?;
//! assert!((state.probabilities()[3] - 0.5).abs() < 1e-12);
//! # Ok::<(), qcircuit::IrError>(())
//! ```
//!
//! # Example: Trotterized evolution
//!
//! ```rust
//! use qcircuit::{Circuit, Hamiltonian, PauliTerm};
//!
//! let h = Hamiltonian::from_terms(2, vec![PauliTerm::zz(0, 1, 1.0), PauliTerm::x(0, 0.5)]);
//! let mut circuit = Circuit::new(2)?;
//! circuit.add_hamiltonian_rotation_gate(&h, 0.3, 4)?;
//! assert_eq!(circuit.gate_count(), 8);
//! # Ok::<(), qcircuit::IrError>(())
//! ```

pub mod analysis;
pub mod circuit;
pub mod error;
pub mod factory;
pub mod gate;
pub mod hamiltonian;
pub mod lowering;
pub mod pauli;
pub mod qubit;
pub mod state;

pub use analysis::CircuitSummary;
pub use circuit::Circuit;
pub use error::{IrError, IrResult};
pub use gate::{Gate, GateKind, QuantumGate, StandardGate};
pub use hamiltonian::{Hamiltonian, PauliTerm};
pub use lowering::default_repeat_count;
pub use pauli::PauliId;
pub use qubit::QubitId;
pub use state::{QuantumState, StateVector};
