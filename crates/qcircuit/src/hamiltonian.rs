//! Hamiltonian data structures.
//!
//! A Hamiltonian is a sum of weighted Pauli strings:
//!
//!   H = Σ_k  c_k · P_k
//!
//! where each P_k is a tensor product of single-qubit Pauli operators on the
//! qubits listed in the term's index list.
//!
//! # Example
//!
//! ```rust
//! use qcircuit::hamiltonian::{Hamiltonian, PauliTerm};
//!
//! // H = -1.0·Z₀Z₁  +  0.5·X₀
//! let mut h = Hamiltonian::new(2);
//! h.add_term(PauliTerm::zz(0, 1, -1.0));
//! h.add_term(PauliTerm::parse(0.5, "X 0")?);
//! assert_eq!(h.n_terms(), 2);
//! assert!(!h.is_diagonal());
//! # Ok::<(), qcircuit::IrError>(())
//! ```

use num_complex::Complex64;
use serde::{Deserialize, Serialize};

use crate::error::{IrError, IrResult};
use crate::pauli::PauliId;
use crate::qubit::QubitId;

/// Imaginary parts up to this magnitude are treated as rounding noise.
const REAL_COEF_TOLERANCE: f64 = 1e-12;

/// A single weighted Pauli string: `coef · ⊗_j paulis[j] on indices[j]`.
///
/// Construction does not validate the term; lowering passes do, at the
/// point the term is consumed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PauliTerm {
    /// Qubits the term acts on.
    index_list: Vec<QubitId>,
    /// Pauli id per entry of `index_list`.
    pauli_id_list: Vec<PauliId>,
    /// Complex weight.
    coef: Complex64,
}

impl PauliTerm {
    /// Create a term from parallel index and Pauli-id lists.
    pub fn new(
        coef: impl Into<Complex64>,
        index_list: Vec<QubitId>,
        pauli_id_list: Vec<PauliId>,
    ) -> Self {
        Self {
            index_list,
            pauli_id_list,
            coef: coef.into(),
        }
    }

    /// Create a term from `(qubit, pauli)` pairs.
    pub fn from_ops(
        coef: impl Into<Complex64>,
        ops: impl IntoIterator<Item = (u32, PauliId)>,
    ) -> Self {
        let (index_list, pauli_id_list) = ops.into_iter().map(|(q, p)| (QubitId(q), p)).unzip();
        Self::new(coef, index_list, pauli_id_list)
    }

    /// Parse a whitespace-separated list of `<pauli> <index>` pairs, e.g.
    /// `"X 0 Z 3"`.
    pub fn parse(coef: impl Into<Complex64>, text: &str) -> IrResult<Self> {
        let tokens: Vec<&str> = text.split_whitespace().collect();
        if tokens.len() % 2 != 0 {
            return Err(IrError::InvalidPauliString(format!(
                "expected '<pauli> <index>' pairs in '{text}'"
            )));
        }
        let mut ops = Vec::with_capacity(tokens.len() / 2);
        for pair in tokens.chunks_exact(2) {
            let pauli: PauliId = pair[0].parse()?;
            let index: u32 = pair[1].parse().map_err(|_| {
                IrError::InvalidPauliString(format!("invalid qubit index '{}'", pair[1]))
            })?;
            ops.push((index, pauli));
        }
        Ok(Self::from_ops(coef, ops))
    }

    /// Shorthand: single-qubit X term.
    pub fn x(qubit: u32, coef: f64) -> Self {
        Self::from_ops(coef, [(qubit, PauliId::X)])
    }

    /// Shorthand: single-qubit Z term.
    pub fn z(qubit: u32, coef: f64) -> Self {
        Self::from_ops(coef, [(qubit, PauliId::Z)])
    }

    /// Shorthand: ZZ coupling term.
    pub fn zz(q0: u32, q1: u32, coef: f64) -> Self {
        Self::from_ops(coef, [(q0, PauliId::Z), (q1, PauliId::Z)])
    }

    /// Qubits the term acts on.
    pub fn index_list(&self) -> &[QubitId] {
        &self.index_list
    }

    /// Pauli id per qubit in [`index_list`](Self::index_list).
    pub fn pauli_id_list(&self) -> &[PauliId] {
        &self.pauli_id_list
    }

    /// The complex weight.
    pub fn coef(&self) -> Complex64 {
        self.coef
    }

    /// True if every operator is the identity (or there are none).
    pub fn is_identity(&self) -> bool {
        self.pauli_id_list.iter().all(|p| *p == PauliId::I)
    }

    /// True if every operator is I or Z.
    pub fn is_diagonal(&self) -> bool {
        self.pauli_id_list.iter().all(|p| p.is_diagonal())
    }

    /// The highest qubit index referenced, or `None` for an empty term.
    pub fn max_qubit(&self) -> Option<QubitId> {
        self.index_list.iter().copied().max()
    }

    /// The coefficient as a real rotation weight.
    ///
    /// `term` is the term's position, used for error context.
    pub fn real_coef(&self, term: usize) -> IrResult<f64> {
        if self.coef.im.abs() > REAL_COEF_TOLERANCE {
            return Err(IrError::MalformedTerm {
                term,
                reason: format!("coefficient {} is not real", self.coef),
            });
        }
        Ok(self.coef.re)
    }

    /// Check the term can be applied to a `qubit_count`-qubit register.
    ///
    /// A term with no qubits is a constant offset and always passes.
    ///
    /// `term` is the term's position, used for error context.
    pub fn validate(&self, term: usize, qubit_count: u32) -> IrResult<()> {
        if self.index_list.len() != self.pauli_id_list.len() {
            return Err(IrError::MalformedTerm {
                term,
                reason: format!(
                    "{} qubit indices but {} Pauli ids",
                    self.index_list.len(),
                    self.pauli_id_list.len()
                ),
            });
        }
        if let Some(&qubit) = self.index_list.iter().find(|q| q.0 >= qubit_count) {
            return Err(IrError::QubitOutOfRange {
                qubit,
                qubit_count,
                gate_name: None,
            });
        }
        Ok(())
    }
}

/// A sum-of-Pauli-strings Hamiltonian on a fixed number of qubits.
///
/// H = Σ_k  c_k · P_k
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hamiltonian {
    qubit_count: u32,
    terms: Vec<PauliTerm>,
}

impl Hamiltonian {
    /// Create an empty Hamiltonian on `qubit_count` qubits.
    pub fn new(qubit_count: u32) -> Self {
        Self {
            qubit_count,
            terms: vec![],
        }
    }

    /// Create from a list of terms.
    pub fn from_terms(qubit_count: u32, terms: Vec<PauliTerm>) -> Self {
        Self { qubit_count, terms }
    }

    /// Append a term.
    pub fn add_term(&mut self, term: PauliTerm) -> &mut Self {
        self.terms.push(term);
        self
    }

    /// Number of qubits the Hamiltonian is defined on.
    pub fn qubit_count(&self) -> u32 {
        self.qubit_count
    }

    /// All terms.
    pub fn terms(&self) -> &[PauliTerm] {
        &self.terms
    }

    /// Number of terms.
    pub fn n_terms(&self) -> usize {
        self.terms.len()
    }

    /// Σ |c_k|, an upper bound on the spectral norm.
    pub fn lambda(&self) -> f64 {
        self.terms.iter().map(|t| t.coef.norm()).sum()
    }

    /// True if every term is diagonal in the computational basis.
    pub fn is_diagonal(&self) -> bool {
        self.terms.iter().all(PauliTerm::is_diagonal)
    }

    /// Validate every term against [`qubit_count`](Self::qubit_count).
    pub fn validate(&self) -> IrResult<()> {
        self.terms
            .iter()
            .enumerate()
            .try_for_each(|(k, t)| t.validate(k, self.qubit_count))
    }
}
