//! Read-only passes over a circuit: depth, classification and the summary
//! report.

use std::fmt;

use serde::Serialize;

use crate::circuit::Circuit;

impl Circuit {
    /// Circuit depth: the length of the longest chain of gates that share a
    /// qubit (targets and controls both count).
    ///
    /// Each qubit tracks the layer its last gate landed in; a gate lands one
    /// layer above the highest of its operands. An empty circuit has depth 0.
    pub fn calculate_depth(&self) -> usize {
        let mut filled_step = vec![0usize; self.qubit_count() as usize];
        let mut depth = 0;
        for gate in self.gates() {
            let operands = || {
                gate.target_qubit_list()
                    .iter()
                    .chain(gate.control_qubit_list())
            };
            let layer = operands()
                .map(|q| filled_step[q.index()])
                .max()
                .unwrap_or(0)
                + 1;
            for q in operands() {
                filled_step[q.index()] = layer;
            }
            depth = depth.max(layer);
        }
        depth
    }

    /// True if every gate is Clifford. Vacuously true when empty.
    pub fn is_clifford(&self) -> bool {
        self.gates().iter().all(|g| g.is_clifford())
    }

    /// True if every gate is Gaussian. Vacuously true when empty.
    pub fn is_gaussian(&self) -> bool {
        self.gates().iter().all(|g| g.is_gaussian())
    }

    /// Snapshot of the circuit's size and classification.
    pub fn summary(&self) -> CircuitSummary {
        let mut arity_counts: Vec<usize> = vec![];
        for gate in self.gates() {
            let arity = gate.num_qubits();
            if arity == 0 {
                continue;
            }
            if arity_counts.len() < arity {
                arity_counts.resize(arity, 0);
            }
            arity_counts[arity - 1] += 1;
        }

        CircuitSummary {
            qubit_count: self.qubit_count(),
            depth: self.calculate_depth(),
            gate_count: self.gate_count(),
            arity_counts,
            is_clifford: self.is_clifford(),
            is_gaussian: self.is_gaussian(),
        }
    }
}

/// Size and classification of a circuit at one point in time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CircuitSummary {
    /// Register width.
    pub qubit_count: u32,
    /// Result of [`Circuit::calculate_depth`].
    pub depth: usize,
    /// Total number of gates.
    pub gate_count: usize,
    /// `arity_counts[k - 1]` is the number of gates touching `k` qubits.
    pub arity_counts: Vec<usize>,
    /// Result of [`Circuit::is_clifford`].
    pub is_clifford: bool,
    /// Result of [`Circuit::is_gaussian`].
    pub is_gaussian: bool,
}

impl CircuitSummary {
    /// Number of gates touching exactly `k` qubits.
    pub fn gates_with_arity(&self, k: usize) -> usize {
        k.checked_sub(1)
            .and_then(|i| self.arity_counts.get(i))
            .copied()
            .unwrap_or(0)
    }
}

fn yes_no(flag: bool) -> &'static str {
    if flag { "yes" } else { "no" }
}

impl fmt::Display for CircuitSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "*** Quantum Circuit Info ***")?;
        writeln!(f, "# of qubit: {}", self.qubit_count)?;
        writeln!(f, "# of step : {}", self.depth)?;
        writeln!(f, "# of gate : {}", self.gate_count)?;
        for (i, count) in self.arity_counts.iter().enumerate() {
            writeln!(f, "# of {} qubit gate: {}", i + 1, count)?;
        }
        writeln!(f, "Clifford  : {}", yes_no(self.is_clifford))?;
        writeln!(f, "Gaussian  : {}", yes_no(self.is_gaussian))?;
        writeln!(f)
    }
}
