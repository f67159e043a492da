//! Quantum state boundary and the reference state vector.

use num_complex::Complex64;

use crate::error::{IrError, IrResult};
use crate::pauli::PauliId;
use crate::qubit::QubitId;

/// A mutable quantum state that gates act on.
///
/// The circuit only forwards the state to its gates; it never looks at the
/// amplitudes.
pub trait QuantumState {
    /// Number of qubits in the register.
    fn qubit_count(&self) -> u32;

    /// Apply a row-major `2^k × 2^k` matrix to `targets` (bit `j` of the
    /// matrix index is `targets[j]`), on the subspace where every control
    /// qubit is |1⟩.
    fn apply_matrix(
        &mut self,
        targets: &[QubitId],
        controls: &[QubitId],
        matrix: &[Complex64],
    ) -> IrResult<()>;

    /// Apply the Pauli string `⊗_j paulis[j]` on `targets[j]`, on the
    /// subspace where every control qubit is |1⟩.
    fn apply_pauli(
        &mut self,
        targets: &[QubitId],
        controls: &[QubitId],
        paulis: &[PauliId],
    ) -> IrResult<()>;

    /// Apply `exp(-iθ/2 · P)` for the Pauli string `P` described as in
    /// [`apply_pauli`](Self::apply_pauli). With no targets this is the
    /// global phase `e^{-iθ/2}`.
    fn apply_pauli_rotation(
        &mut self,
        targets: &[QubitId],
        controls: &[QubitId],
        paulis: &[PauliId],
        angle: f64,
    ) -> IrResult<()>;
}

/// A statevector representing a quantum state.
#[derive(Debug, Clone, PartialEq)]
pub struct StateVector {
    /// The state amplitudes (2^n complex numbers).
    amplitudes: Vec<Complex64>,
    /// Number of qubits.
    num_qubits: u32,
}

impl StateVector {
    /// Widest register [`new`](Self::new) will allocate (16 GiB of
    /// amplitudes).
    pub const MAX_QUBITS: u32 = 30;

    /// Create a new statevector initialized to |0...0⟩.
    pub fn new(num_qubits: u32) -> IrResult<Self> {
        if num_qubits > Self::MAX_QUBITS {
            return Err(IrError::TooManyQubits {
                requested: num_qubits,
                max: Self::MAX_QUBITS,
            });
        }
        let size = 1usize << num_qubits;
        let mut amplitudes = vec![Complex64::new(0.0, 0.0); size];
        amplitudes[0] = Complex64::new(1.0, 0.0);
        Ok(Self {
            amplitudes,
            num_qubits,
        })
    }

    /// Wrap raw amplitudes. The length must be a non-zero power of two.
    pub fn from_amplitudes(amplitudes: Vec<Complex64>) -> IrResult<Self> {
        let len = amplitudes.len();
        if len == 0 || !len.is_power_of_two() {
            return Err(IrError::InvalidStateDimension(len));
        }
        Ok(Self {
            amplitudes,
            num_qubits: len.trailing_zeros(),
        })
    }

    /// Reset to the computational basis state `|index⟩`.
    pub fn set_computational_basis(&mut self, index: usize) -> IrResult<()> {
        if index >= self.amplitudes.len() {
            return Err(IrError::InvalidStateDimension(index));
        }
        self.amplitudes.fill(Complex64::new(0.0, 0.0));
        self.amplitudes[index] = Complex64::new(1.0, 0.0);
        Ok(())
    }

    /// The amplitudes, indexed by basis state (qubit `q` is bit `q`).
    pub fn amplitudes(&self) -> &[Complex64] {
        &self.amplitudes
    }

    /// Measurement probabilities per basis state.
    pub fn probabilities(&self) -> Vec<f64> {
        self.amplitudes.iter().map(|a| a.norm_sqr()).collect()
    }

    /// Squared norm; 1 for a normalized state.
    pub fn norm_squared(&self) -> f64 {
        self.amplitudes.iter().map(|a| a.norm_sqr()).sum()
    }

    /// ⟨self|other⟩, or `None` if the dimensions differ.
    pub fn inner_product(&self, other: &StateVector) -> Option<Complex64> {
        if self.amplitudes.len() != other.amplitudes.len() {
            return None;
        }
        Some(
            self.amplitudes
                .iter()
                .zip(&other.amplitudes)
                .map(|(a, b)| a.conj() * b)
                .sum(),
        )
    }

    /// Amplitude-wise comparison within `tolerance`.
    pub fn approx_eq(&self, other: &StateVector, tolerance: f64) -> bool {
        self.amplitudes.len() == other.amplitudes.len()
            && self
                .amplitudes
                .iter()
                .zip(&other.amplitudes)
                .all(|(a, b)| (a - b).norm() <= tolerance)
    }

    /// Bit mask for a list of operand qubits; rejects out-of-range and
    /// repeated qubits.
    fn operand_mask(&self, qubits: &[QubitId], mut mask: usize) -> IrResult<usize> {
        for &q in qubits {
            if q.0 >= self.num_qubits {
                return Err(IrError::QubitOutOfRange {
                    qubit: q,
                    qubit_count: self.num_qubits,
                    gate_name: None,
                });
            }
            let bit = 1usize << q.index();
            if mask & bit != 0 {
                return Err(IrError::DuplicateQubit {
                    qubit: q,
                    gate_name: None,
                });
            }
            mask |= bit;
        }
        Ok(mask)
    }

    /// `amp[b] ← stay·amp[b] + flip·phase(b ^ x)·amp[b ^ x]` over the
    /// control subspace, where `P|b⟩ = phase(b)·|b ^ x⟩`.
    fn apply_pauli_mix(
        &mut self,
        targets: &[QubitId],
        controls: &[QubitId],
        paulis: &[PauliId],
        stay: Complex64,
        flip: Complex64,
    ) -> IrResult<()> {
        if targets.len() != paulis.len() {
            return Err(IrError::QubitCountMismatch {
                gate_name: "pauli".into(),
                expected: u32::try_from(paulis.len()).unwrap_or(u32::MAX),
                got: u32::try_from(targets.len()).unwrap_or(u32::MAX),
            });
        }
        let target_mask = self.operand_mask(targets, 0)?;
        let control_mask = self.operand_mask(controls, target_mask)? & !target_mask;

        // X and Y flip the bit, Z and Y contribute a sign, each Y a factor i
        let mut x_mask = 0usize;
        let mut z_mask = 0usize;
        let mut y_count = 0u32;
        for (q, p) in targets.iter().zip(paulis) {
            let bit = 1usize << q.index();
            match p {
                PauliId::I => {}
                PauliId::X => x_mask |= bit,
                PauliId::Y => {
                    x_mask |= bit;
                    z_mask |= bit;
                    y_count += 1;
                }
                PauliId::Z => z_mask |= bit,
            }
        }
        let i_pow = Complex64::new(0.0, 1.0).powu(y_count % 4);
        let phase = |b: usize| {
            if (b & z_mask).count_ones() % 2 == 0 {
                i_pow
            } else {
                -i_pow
            }
        };

        if x_mask == 0 {
            for (b, amp) in self.amplitudes.iter_mut().enumerate() {
                if b & control_mask == control_mask {
                    *amp *= stay + flip * phase(b);
                }
            }
            return Ok(());
        }

        // visit each pair {b, b ^ x} once, from the side with the pivot bit clear
        let pivot = x_mask & x_mask.wrapping_neg();
        for b in 0..self.amplitudes.len() {
            if b & pivot != 0 || b & control_mask != control_mask {
                continue;
            }
            let partner = b ^ x_mask;
            let a = self.amplitudes[b];
            let a_partner = self.amplitudes[partner];
            self.amplitudes[b] = stay * a + flip * phase(partner) * a_partner;
            self.amplitudes[partner] = stay * a_partner + flip * phase(b) * a;
        }
        Ok(())
    }
}

impl QuantumState for StateVector {
    fn qubit_count(&self) -> u32 {
        self.num_qubits
    }

    fn apply_matrix(
        &mut self,
        targets: &[QubitId],
        controls: &[QubitId],
        matrix: &[Complex64],
    ) -> IrResult<()> {
        let target_mask = self.operand_mask(targets, 0)?;
        let control_mask = self.operand_mask(controls, target_mask)? & !target_mask;

        let dim = 1usize << targets.len();
        if matrix.len() != dim * dim {
            return Err(IrError::InvalidMatrix {
                expected: dim * dim,
                got: matrix.len(),
            });
        }

        // offsets[m]: basis-index bits set by matrix index m
        let offsets: Vec<usize> = (0..dim)
            .map(|m| {
                targets
                    .iter()
                    .enumerate()
                    .filter(|(j, _)| (m >> j) & 1 == 1)
                    .fold(0, |acc, (_, q)| acc | (1 << q.index()))
            })
            .collect();

        let mut old = vec![Complex64::new(0.0, 0.0); dim];
        for base in 0..self.amplitudes.len() {
            if base & target_mask != 0 || base & control_mask != control_mask {
                continue;
            }
            for (m, &off) in offsets.iter().enumerate() {
                old[m] = self.amplitudes[base | off];
            }
            for (row, &off) in offsets.iter().enumerate() {
                self.amplitudes[base | off] = matrix[row * dim..(row + 1) * dim]
                    .iter()
                    .zip(&old)
                    .map(|(m, a)| m * a)
                    .sum();
            }
        }
        Ok(())
    }

    fn apply_pauli(
        &mut self,
        targets: &[QubitId],
        controls: &[QubitId],
        paulis: &[PauliId],
    ) -> IrResult<()> {
        let zero = Complex64::new(0.0, 0.0);
        let one = Complex64::new(1.0, 0.0);
        self.apply_pauli_mix(targets, controls, paulis, zero, one)
    }

    fn apply_pauli_rotation(
        &mut self,
        targets: &[QubitId],
        controls: &[QubitId],
        paulis: &[PauliId],
        angle: f64,
    ) -> IrResult<()> {
        let (s, co) = (angle / 2.0).sin_cos();
        self.apply_pauli_mix(
            targets,
            controls,
            paulis,
            Complex64::new(co, 0.0),
            Complex64::new(0.0, -s),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::FRAC_1_SQRT_2;

    fn c(re: f64, im: f64) -> Complex64 {
        Complex64::new(re, im)
    }

    const X: [Complex64; 4] = [
        Complex64::new(0.0, 0.0),
        Complex64::new(1.0, 0.0),
        Complex64::new(1.0, 0.0),
        Complex64::new(0.0, 0.0),
    ];

    #[test]
    fn test_new_is_all_zero_state() {
        let sv = StateVector::new(3).unwrap();
        assert_eq!(sv.qubit_count(), 3);
        assert_eq!(sv.amplitudes().len(), 8);
        assert_eq!(sv.amplitudes()[0], c(1.0, 0.0));
        assert!((sv.norm_squared() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_from_amplitudes_rejects_bad_dimension() {
        assert!(matches!(
            StateVector::from_amplitudes(vec![c(1.0, 0.0); 3]),
            Err(IrError::InvalidStateDimension(3))
        ));
        let sv = StateVector::from_amplitudes(vec![c(0.5, 0.0); 4]).unwrap();
        assert_eq!(sv.qubit_count(), 2);
    }

    #[test]
    fn test_single_qubit_matrix_targets_correct_bit() {
        let mut sv = StateVector::new(2).unwrap();
        sv.apply_matrix(&[QubitId(1)], &[], &X).unwrap();
        // |q1 q0⟩ = |10⟩ → index 2
        assert_eq!(sv.amplitudes()[2], c(1.0, 0.0));
    }

    #[test]
    fn test_controlled_matrix() {
        let mut sv = StateVector::new(2).unwrap();
        // control q0 is |0⟩: nothing happens
        sv.apply_matrix(&[QubitId(1)], &[QubitId(0)], &X).unwrap();
        assert_eq!(sv.amplitudes()[0], c(1.0, 0.0));

        sv.set_computational_basis(1).unwrap();
        sv.apply_matrix(&[QubitId(1)], &[QubitId(0)], &X).unwrap();
        assert_eq!(sv.amplitudes()[3], c(1.0, 0.0));
    }

    #[test]
    fn test_hadamard_superposition() {
        let h = c(FRAC_1_SQRT_2, 0.0);
        let mut sv = StateVector::new(1).unwrap();
        sv.apply_matrix(&[QubitId(0)], &[], &[h, h, h, -h]).unwrap();
        let probs = sv.probabilities();
        assert!((probs[0] - 0.5).abs() < 1e-12);
        assert!((probs[1] - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_kernel_validation() {
        let mut sv = StateVector::new(2).unwrap();
        assert!(matches!(
            sv.apply_matrix(&[QubitId(2)], &[], &X),
            Err(IrError::QubitOutOfRange { .. })
        ));
        assert!(matches!(
            sv.apply_matrix(&[QubitId(0)], &[QubitId(0)], &X),
            Err(IrError::DuplicateQubit { .. })
        ));
        assert!(matches!(
            sv.apply_matrix(&[QubitId(0), QubitId(1)], &[], &X),
            Err(IrError::InvalidMatrix {
                expected: 16,
                got: 4
            })
        ));
    }

    fn sample_state() -> StateVector {
        let amps: Vec<Complex64> = (0..8)
            .map(|k| c(0.1 * k as f64 + 0.05, 0.3 - 0.07 * k as f64))
            .collect();
        StateVector::from_amplitudes(amps).unwrap()
    }

    #[test]
    fn test_new_refuses_oversized_register() {
        assert!(matches!(
            StateVector::new(64),
            Err(IrError::TooManyQubits { requested: 64, max: 30 })
        ));
        assert!(StateVector::new(StateVector::MAX_QUBITS + 1).is_err());
    }

    #[test]
    fn test_pauli_kernels_match_dense_matrices() {
        use crate::gate::GateKind;

        let targets = [QubitId(2), QubitId(0), QubitId(1)];
        let paulis = vec![PauliId::Y, PauliId::Z, PauliId::X];
        for angle in [0.0, 0.37, -1.9, std::f64::consts::PI] {
            let kind = GateKind::PauliRotation {
                paulis: paulis.clone(),
                angle,
            };
            let mut dense = sample_state();
            dense
                .apply_matrix(&targets, &[], &kind.matrix().unwrap())
                .unwrap();
            let mut masked = sample_state();
            masked
                .apply_pauli_rotation(&targets, &[], &paulis, angle)
                .unwrap();
            assert!(dense.approx_eq(&masked, 1e-12), "angle {angle}");
        }

        let kind = GateKind::Pauli(vec![PauliId::Y, PauliId::I]);
        let mut dense = sample_state();
        dense
            .apply_matrix(&[QubitId(0), QubitId(2)], &[QubitId(1)], &kind.matrix().unwrap())
            .unwrap();
        let mut masked = sample_state();
        masked
            .apply_pauli(&[QubitId(0), QubitId(2)], &[QubitId(1)], &[PauliId::Y, PauliId::I])
            .unwrap();
        assert!(dense.approx_eq(&masked, 1e-12));
    }

    #[test]
    fn test_diagonal_pauli_rotation_phases() {
        let mut sv = sample_state();
        let before = sv.clone();
        sv.apply_pauli_rotation(&[QubitId(0), QubitId(1)], &[], &[PauliId::Z, PauliId::Z], 0.8)
            .unwrap();
        for (b, (new, old)) in sv.amplitudes().iter().zip(before.amplitudes()).enumerate() {
            let parity = ((b & 0b11).count_ones() % 2) as f64;
            // even parity: e^{-iθ/2}, odd parity: e^{iθ/2}
            let expected = old * Complex64::from_polar(1.0, -0.4 * (1.0 - 2.0 * parity));
            assert!((new - expected).norm() < 1e-12);
        }
    }

    #[test]
    fn test_empty_pauli_rotation_is_global_phase() {
        let mut sv = sample_state();
        sv.apply_pauli_rotation(&[], &[], &[], 1.2).unwrap();
        let phase = Complex64::from_polar(1.0, -0.6);
        for (new, old) in sv.amplitudes().iter().zip(sample_state().amplitudes()) {
            assert!((new - old * phase).norm() < 1e-12);
        }
    }

    #[test]
    fn test_wide_pauli_rotation_stays_linear() {
        let n = 16;
        let targets: Vec<QubitId> = (0..n).map(QubitId).collect();
        let paulis = vec![PauliId::X; n as usize];
        let mut sv = StateVector::new(n).unwrap();
        sv.apply_pauli_rotation(&targets, &[], &paulis, 1.0).unwrap();
        let (s, co) = 0.5_f64.sin_cos();
        assert!((sv.amplitudes()[0] - c(co, 0.0)).norm() < 1e-12);
        assert!((sv.amplitudes()[(1 << n) - 1] - c(0.0, -s)).norm() < 1e-12);
    }

    #[test]
    fn test_pauli_kernel_validation() {
        let mut sv = StateVector::new(2).unwrap();
        assert!(matches!(
            sv.apply_pauli(&[QubitId(0)], &[], &[PauliId::X, PauliId::Z]),
            Err(IrError::QubitCountMismatch { expected: 2, got: 1, .. })
        ));
        assert!(matches!(
            sv.apply_pauli_rotation(&[QubitId(3)], &[], &[PauliId::X], 0.1),
            Err(IrError::QubitOutOfRange { .. })
        ));
    }

    #[test]
    fn test_inner_product() {
        let a = StateVector::new(1).unwrap();
        let mut b = StateVector::new(1).unwrap();
        b.set_computational_basis(1).unwrap();
        assert_eq!(a.inner_product(&a), Some(c(1.0, 0.0)));
        assert_eq!(a.inner_product(&b), Some(c(0.0, 0.0)));
        assert_eq!(a.inner_product(&StateVector::new(2).unwrap()), None);
    }
}
