//! Shared helpers for CLI commands.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use console::style;
use num_complex::Complex64;
use serde::{Deserialize, Serialize};

use qcircuit::{Hamiltonian, PauliTerm, StateVector};

/// On-disk Hamiltonian description.
///
/// ```yaml
/// qubit_count: 2
/// terms:
///   - coef: 1.0
///     pauli: "Z 0 Z 1"
///   - coef: -0.5
///     pauli: "X 0"
/// ```
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HamiltonianConfig {
    /// Register width.
    pub qubit_count: u32,
    /// Weighted Pauli strings.
    #[serde(default)]
    pub terms: Vec<TermConfig>,
}

/// One weighted Pauli string.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TermConfig {
    /// Real part of the coefficient.
    pub coef: f64,
    /// Imaginary part of the coefficient.
    #[serde(default)]
    pub imag: f64,
    /// `<pauli> <index>` pairs, e.g. `"X 0 Z 1"`.
    pub pauli: String,
}

impl HamiltonianConfig {
    /// Parse every term into a [`Hamiltonian`].
    pub fn into_hamiltonian(self) -> Result<Hamiltonian> {
        let mut hamiltonian = Hamiltonian::new(self.qubit_count);
        for (k, term) in self.terms.into_iter().enumerate() {
            let coef = Complex64::new(term.coef, term.imag);
            let parsed = PauliTerm::parse(coef, &term.pauli)
                .with_context(|| format!("Invalid Pauli string in term {k}: '{}'", term.pauli))?;
            hamiltonian.add_term(parsed);
        }
        Ok(hamiltonian)
    }
}

/// Load a Hamiltonian description from a YAML or JSON file.
pub fn load_hamiltonian(path: &str) -> Result<Hamiltonian> {
    let path_obj = Path::new(path);

    if !path_obj.exists() {
        anyhow::bail!("File not found: {path}");
    }

    let source =
        fs::read_to_string(path).with_context(|| format!("Failed to read file: {path}"))?;

    let ext = path_obj.extension().and_then(|e| e.to_str()).unwrap_or("");

    let config: HamiltonianConfig = match ext.to_lowercase().as_str() {
        "yaml" | "yml" => serde_yaml_ng::from_str(&source)
            .with_context(|| format!("Failed to parse YAML: {path}"))?,
        "json" => {
            serde_json::from_str(&source).with_context(|| format!("Failed to parse JSON: {path}"))?
        }
        other => anyhow::bail!("Unsupported file extension '{other}', expected yaml, yml or json"),
    };

    config.into_hamiltonian()
}

/// A basis state and its measurement probability.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BasisProbability {
    /// Bitstring with qubit 0 rightmost.
    pub bitstring: String,
    /// Probability of measuring it.
    pub probability: f64,
}

/// The `limit` most likely basis states, highest first.
pub fn top_outcomes(state: &StateVector, limit: usize) -> Vec<BasisProbability> {
    let width = state.amplitudes().len().trailing_zeros() as usize;
    let mut probs: Vec<(usize, f64)> = state.probabilities().into_iter().enumerate().collect();
    probs.sort_by(|a, b| b.1.total_cmp(&a.1).then(a.0.cmp(&b.0)));
    probs
        .into_iter()
        .take(limit)
        .map(|(index, probability)| BasisProbability {
            bitstring: format!("{index:0width$b}"),
            probability,
        })
        .collect()
}

/// Print outcome probabilities as a bar table.
pub fn print_outcomes(outcomes: &[BasisProbability]) {
    println!("\n{} Most likely outcomes:", style("✓").green().bold());

    for outcome in outcomes {
        let pct = outcome.probability * 100.0;
        let bar_len = (pct / 2.0).round() as usize;
        let bar: String = "█".repeat(bar_len);

        println!(
            "  {}: {:>6.2}% {}",
            style(&outcome.bitstring).cyan(),
            pct,
            style(bar).green()
        );
    }
}
