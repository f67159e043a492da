//! Tests for circuit mutation, execution and the analysis passes.

use std::f64::consts::PI;

use num_complex::Complex64;
use qcircuit::factory;
use qcircuit::{Circuit, IrError, PauliId, QuantumGate, QubitId, StateVector};

fn q(i: u32) -> QubitId {
    QubitId(i)
}

// ---------------------------------------------------------------------------
// Mutation
// ---------------------------------------------------------------------------

#[test]
fn insertion_preserves_relative_order() {
    let mut circuit = Circuit::new(3).unwrap();
    for i in 0..3 {
        circuit.add_x_gate(q(i)).unwrap();
    }
    circuit.add_gate_at(Box::new(factory::h(q(1))), 0).unwrap();

    let targets: Vec<QubitId> = circuit
        .gates()
        .iter()
        .map(|g| g.target_qubit_list()[0])
        .collect();
    assert_eq!(targets, [q(1), q(0), q(1), q(2)]);
    assert_eq!(circuit.gate(0).map(|g| g.name()), Some("h"));
}

#[test]
fn rejected_insert_leaves_circuit_unchanged() {
    let mut circuit = Circuit::new(2).unwrap();
    circuit.add_h_gate(q(0)).unwrap();

    assert!(circuit.add_gate_at(Box::new(factory::x(q(0))), 2).is_err());
    assert!(circuit.add_gate(Box::new(factory::x(q(5)))).is_err());
    assert!(matches!(
        circuit.add_cnot_gate(q(1), q(1)),
        Err(IrError::DuplicateQubit { .. })
    ));
    assert_eq!(circuit.gate_count(), 1);
}

#[test]
fn copy_executes_identically() {
    let mut circuit = Circuit::new(3).unwrap();
    circuit
        .add_h_gate(q(0))
        .unwrap()
        .add_rx_gate(q(1), 0.3)
        .unwrap()
        .add_cnot_gate(q(0), q(2))
        .unwrap()
        .add_u3_gate(q(1), 0.1, 0.2, 0.3)
        .unwrap();
    let copy = circuit.copy();

    let mut a = StateVector::new(3).unwrap();
    let mut b = StateVector::new(3).unwrap();
    circuit.update_quantum_state(&mut a).unwrap();
    copy.update_quantum_state(&mut b).unwrap();
    assert!(a.approx_eq(&b, 1e-12));
}

#[test]
fn remove_from_copy_does_not_touch_original() {
    let mut circuit = Circuit::new(1).unwrap();
    circuit.add_x_gate(q(0)).unwrap().add_y_gate(q(0)).unwrap();
    let mut copy = circuit.clone();
    copy.remove_gate(1).unwrap();
    copy.remove_gate(0).unwrap();
    assert!(copy.is_empty());
    assert_eq!(circuit.gate_count(), 2);
}

// ---------------------------------------------------------------------------
// Execution
// ---------------------------------------------------------------------------

#[test]
fn ghz_state_amplitudes() {
    let n = 4;
    let mut circuit = Circuit::new(n).unwrap();
    circuit.add_h_gate(q(0)).unwrap();
    for i in 0..n - 1 {
        circuit.add_cnot_gate(q(i), q(i + 1)).unwrap();
    }
    let mut state = StateVector::new(n).unwrap();
    circuit.update_quantum_state(&mut state).unwrap();

    let probs = state.probabilities();
    assert!((probs[0] - 0.5).abs() < 1e-12);
    assert!((probs[(1 << n) - 1] - 0.5).abs() < 1e-12);
    assert_eq!(circuit.calculate_depth(), n as usize);
}

#[test]
fn state_with_extra_qubits_is_accepted() {
    let mut circuit = Circuit::new(1).unwrap();
    circuit.add_x_gate(q(0)).unwrap();
    let mut state = StateVector::new(3).unwrap();
    circuit.update_quantum_state(&mut state).unwrap();
    assert!((state.probabilities()[1] - 1.0).abs() < 1e-12);
}

#[test]
fn split_range_matches_full_run() {
    let mut circuit = Circuit::new(2).unwrap();
    circuit
        .add_h_gate(q(0))
        .unwrap()
        .add_t_gate(q(0))
        .unwrap()
        .add_cz_gate(q(0), q(1))
        .unwrap()
        .add_sqrt_y_gate(q(1))
        .unwrap();

    let mut full = StateVector::new(2).unwrap();
    circuit.update_quantum_state(&mut full).unwrap();

    let mut split = StateVector::new(2).unwrap();
    circuit.update_quantum_state_range(&mut split, 0, 2).unwrap();
    circuit.update_quantum_state_range(&mut split, 2, 4).unwrap();
    assert!(full.approx_eq(&split, 1e-12));
}

#[test]
fn projection_is_not_normalized() {
    let mut circuit = Circuit::new(1).unwrap();
    circuit.add_h_gate(q(0)).unwrap().add_p1_gate(q(0)).unwrap();
    let mut state = StateVector::new(1).unwrap();
    circuit.update_quantum_state(&mut state).unwrap();
    assert!((state.norm_squared() - 0.5).abs() < 1e-12);
}

#[test]
fn swap_and_dense_matrix_agree() {
    let zero = Complex64::new(0.0, 0.0);
    let one = Complex64::new(1.0, 0.0);
    let mut swap = vec![zero; 16];
    swap[0] = one;
    swap[4 + 2] = one;
    swap[8 + 1] = one;
    swap[15] = one;

    let mut a = Circuit::new(2).unwrap();
    a.add_x_gate(q(0)).unwrap().add_swap_gate(q(0), q(1)).unwrap();
    let mut b = Circuit::new(2).unwrap();
    b.add_x_gate(q(0))
        .unwrap()
        .add_dense_matrix_gate(&[q(0), q(1)], swap)
        .unwrap();

    let mut sa = StateVector::new(2).unwrap();
    let mut sb = StateVector::new(2).unwrap();
    a.update_quantum_state(&mut sa).unwrap();
    b.update_quantum_state(&mut sb).unwrap();
    assert!(sa.approx_eq(&sb, 1e-12));
    assert!((sa.probabilities()[2] - 1.0).abs() < 1e-12);
}

#[test]
fn pauli_rotation_by_pi_is_pauli_up_to_phase() {
    let mut rot = Circuit::new(2).unwrap();
    rot.add_multi_pauli_rotation_gate(&[q(0), q(1)], &[PauliId::X, PauliId::Y], PI)
        .unwrap();
    let mut pauli = Circuit::new(2).unwrap();
    pauli
        .add_multi_pauli_gate(&[q(0), q(1)], &[PauliId::X, PauliId::Y])
        .unwrap();

    let mut a = StateVector::new(2).unwrap();
    let mut b = StateVector::new(2).unwrap();
    rot.update_quantum_state(&mut a).unwrap();
    pauli.update_quantum_state(&mut b).unwrap();
    let overlap = a.inner_product(&b).unwrap();
    assert!((overlap.norm() - 1.0).abs() < 1e-12);
}

// ---------------------------------------------------------------------------
// Analysis
// ---------------------------------------------------------------------------

#[test]
fn disjoint_gates_have_depth_one() {
    let mut circuit = Circuit::new(5).unwrap();
    circuit.add_cnot_gate(q(0), q(1)).unwrap();
    circuit.add_swap_gate(q(2), q(3)).unwrap();
    circuit.add_t_gate(q(4)).unwrap();
    assert_eq!(circuit.calculate_depth(), 1);
}

#[test]
fn serial_chain_depth_grows_by_one() {
    let mut circuit = Circuit::new(1).unwrap();
    for expected in 1..=6 {
        circuit.add_s_gate(q(0)).unwrap();
        assert_eq!(circuit.calculate_depth(), expected);
    }
}

#[test]
fn one_non_clifford_gate_taints_circuit() {
    let mut circuit = Circuit::new(2).unwrap();
    circuit.add_h_gate(q(0)).unwrap();
    assert!(circuit.is_clifford());
    circuit.add_rz_gate(q(1), 0.1).unwrap();
    for _ in 0..3 {
        circuit.add_cnot_gate(q(0), q(1)).unwrap();
    }
    assert!(!circuit.is_clifford());
    assert!(circuit.is_gaussian());

    circuit.add_p0_gate(q(0)).unwrap();
    assert!(!circuit.is_gaussian());
}

#[test]
fn report_lists_every_arity_up_to_max() {
    let mut circuit = Circuit::new(3).unwrap();
    circuit.add_h_gate(q(0)).unwrap();
    circuit.add_h_gate(q(1)).unwrap();
    circuit
        .add_multi_pauli_gate(&[q(0), q(1), q(2)], &[PauliId::Z; 3])
        .unwrap();

    let report = circuit.to_string();
    let lines: Vec<&str> = report.lines().collect();
    assert_eq!(
        lines,
        [
            "*** Quantum Circuit Info ***",
            "# of qubit: 3",
            "# of step : 2",
            "# of gate : 3",
            "# of 1 qubit gate: 2",
            "# of 2 qubit gate: 0",
            "# of 3 qubit gate: 1",
            "Clifford  : yes",
            "Gaussian  : no",
            "",
        ]
    );
}

#[test]
fn empty_report_has_no_arity_lines() {
    let report = Circuit::new(2).unwrap().to_string();
    assert!(!report.contains("qubit gate"));
    assert!(report.contains("# of step : 0\n"));
    assert!(report.contains("Clifford  : yes\n"));
}
