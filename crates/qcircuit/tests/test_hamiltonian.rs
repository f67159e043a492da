//! Tests for Hamiltonian construction and the Pauli-term helpers.

use num_complex::Complex64;
use qcircuit::{Circuit, Hamiltonian, IrError, PauliId, PauliTerm, QubitId};

#[test]
fn parse_matches_from_ops() {
    let parsed = PauliTerm::parse(0.25, "Y 2 I 0 x 1").unwrap();
    let built = PauliTerm::from_ops(0.25, [(2, PauliId::Y), (0, PauliId::I), (1, PauliId::X)]);
    assert_eq!(parsed, built);
    assert!(!parsed.is_diagonal());
    assert!(!parsed.is_identity());
}

#[test]
fn identity_term() {
    let t = PauliTerm::parse(1.0, "I 0 I 1").unwrap();
    assert!(t.is_identity());
    assert!(t.is_diagonal());
}

#[test]
fn parse_rejects_unknown_operator() {
    assert!(matches!(
        PauliTerm::parse(1.0, "Q 0"),
        Err(IrError::InvalidPauliString(_))
    ));
}

#[test]
fn numeric_pauli_ids() {
    let ids: Vec<PauliId> = (0..4).map(|i| PauliId::from_id(i).unwrap()).collect();
    assert_eq!(ids, [PauliId::I, PauliId::X, PauliId::Y, PauliId::Z]);
    assert!(matches!(PauliId::from_id(4), Err(IrError::InvalidPauliId(4))));
}

#[test]
fn lambda_uses_coefficient_magnitude() {
    let h = Hamiltonian::from_terms(
        1,
        vec![
            PauliTerm::z(0, -3.0),
            PauliTerm::new(Complex64::new(0.0, 4.0), vec![QubitId(0)], vec![PauliId::X]),
        ],
    );
    assert!((h.lambda() - 7.0).abs() < 1e-12);
}

#[test]
fn validate_reports_offending_term() {
    let h = Hamiltonian::from_terms(
        2,
        vec![
            PauliTerm::zz(0, 1, 1.0),
            PauliTerm::new(1.0, vec![QubitId(0)], vec![PauliId::X, PauliId::Z]),
        ],
    );
    assert!(matches!(h.validate(), Err(IrError::MalformedTerm { term: 1, .. })));
}

#[test]
fn hamiltonian_deserializes_from_json() {
    let json = r#"{
        "qubit_count": 2,
        "terms": [
            { "index_list": [0, 1], "pauli_id_list": ["Z", "Z"], "coef": [1.5, 0.0] }
        ]
    }"#;
    let h: Hamiltonian = serde_json::from_str(json).unwrap();
    assert_eq!(h.qubit_count(), 2);
    assert_eq!(h.terms()[0], PauliTerm::zz(0, 1, 1.5));
}

#[test]
fn term_drives_named_pauli_constructors() {
    let term = PauliTerm::parse(0.5, "X 0 Z 1").unwrap();
    let mut circuit = Circuit::new(2).unwrap();
    circuit.add_multi_pauli_gate_from_term(&term).unwrap();
    circuit.add_multi_pauli_rotation_gate_from_term(&term).unwrap();
    assert_eq!(circuit.gate_count(), 2);
    assert!(!circuit.is_clifford());

    let complex = PauliTerm::new(Complex64::new(0.0, 1.0), vec![QubitId(0)], vec![PauliId::Z]);
    assert!(circuit.add_multi_pauli_rotation_gate_from_term(&complex).is_err());
    assert_eq!(circuit.gate_count(), 2);
}
