//! Lower command implementation.

use anyhow::{Context, Result};
use console::style;
use serde::Serialize;
use tracing::{info, warn};

use qcircuit::{Circuit, CircuitSummary, StateVector, default_repeat_count};

use super::common::{BasisProbability, load_hamiltonian, print_outcomes, top_outcomes};

/// Number of outcomes shown after `--simulate`.
const TOP_OUTCOMES: usize = 8;

/// Widest Hamiltonian `--simulate` accepts.
const MAX_SIMULATED_QUBITS: u32 = 20;

/// Options of the lower command.
#[derive(Debug, Clone)]
pub struct LowerOptions {
    pub input: String,
    pub angle: f64,
    pub repeats: u32,
    pub diagonal: bool,
    pub simulate: bool,
    pub json: bool,
}

/// Machine-readable output of the lower command.
#[derive(Debug, Serialize)]
struct LowerReport {
    policy: &'static str,
    repeats: Option<u32>,
    summary: CircuitSummary,
    #[serde(skip_serializing_if = "Option::is_none")]
    outcomes: Option<Vec<BasisProbability>>,
}

/// Execute the lower command.
pub fn execute(opts: &LowerOptions) -> Result<()> {
    if !opts.angle.is_finite() {
        anyhow::bail!("Angle must be finite, got {}", opts.angle);
    }

    let hamiltonian = load_hamiltonian(&opts.input)?;
    info!(
        qubits = hamiltonian.qubit_count(),
        terms = hamiltonian.n_terms(),
        "loaded Hamiltonian"
    );

    if opts.simulate && hamiltonian.qubit_count() > MAX_SIMULATED_QUBITS {
        anyhow::bail!(
            "Hamiltonian has {} qubits but --simulate supports at most {}",
            hamiltonian.qubit_count(),
            MAX_SIMULATED_QUBITS
        );
    }

    let mut circuit =
        Circuit::new(hamiltonian.qubit_count()).context("Invalid Hamiltonian width")?;
    let (policy, repeats) = if opts.diagonal {
        if opts.repeats != 0 {
            warn!("--repeats is ignored with --diagonal");
        }
        circuit
            .add_diagonal_hamiltonian_rotation_gate(&hamiltonian, opts.angle)
            .context("Diagonal lowering failed")?;
        ("diagonal", None)
    } else {
        let repeats = match opts.repeats {
            0 => default_repeat_count(opts.angle, hamiltonian.qubit_count()),
            r => r,
        };
        circuit
            .add_hamiltonian_rotation_gate(&hamiltonian, opts.angle, repeats)
            .context("Trotter lowering failed")?;
        ("trotter", Some(repeats))
    };

    let outcomes = if opts.simulate {
        let mut state =
            StateVector::new(circuit.qubit_count()).context("Failed to allocate state")?;
        circuit
            .update_quantum_state(&mut state)
            .context("Simulation failed")?;
        Some(top_outcomes(&state, TOP_OUTCOMES))
    } else {
        None
    };

    if opts.json {
        let report = LowerReport {
            policy,
            repeats,
            summary: circuit.summary(),
            outcomes,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!(
        "{} Lowered {} ({} terms, angle {}) with {} policy{}",
        style("→").cyan().bold(),
        style(&opts.input).green(),
        hamiltonian.n_terms(),
        opts.angle,
        style(policy).yellow(),
        repeats.map(|r| format!(", {r} repeats")).unwrap_or_default()
    );
    print!("{circuit}");

    if let Some(outcomes) = outcomes {
        print_outcomes(&outcomes);
    }

    Ok(())
}
