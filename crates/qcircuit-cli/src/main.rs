//! qcircuit Command-Line Interface
//!
//! Lowers a Hamiltonian description into a Pauli-rotation circuit, reports
//! its shape and optionally runs it on the reference state vector.

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use clap::{Parser, Subcommand};
use console::style;
use tracing_subscriber::EnvFilter;

mod commands;

use commands::{lower, version};

/// qcircuit - quantum circuit IR and Hamiltonian lowering
#[derive(Parser)]
#[command(name = "qcircuit")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Lower exp(-i·angle·H) into a circuit of Pauli rotations
    Lower {
        /// Hamiltonian file (YAML or JSON)
        #[arg(short, long)]
        input: String,

        /// Evolution angle
        #[arg(short, long, allow_negative_numbers = true)]
        angle: f64,

        /// Trotter repetitions (0 picks ceil(angle · qubits · 100))
        #[arg(short, long, default_value = "0")]
        repeats: u32,

        /// Exact lowering for Hamiltonians built from I and Z only
        #[arg(long)]
        diagonal: bool,

        /// Run the circuit on |0…0⟩ and print the most likely outcomes
        #[arg(long)]
        simulate: bool,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show version information
    Version,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let filter = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Lower {
            input,
            angle,
            repeats,
            diagonal,
            simulate,
            json,
        } => lower::execute(&lower::LowerOptions {
            input,
            angle,
            repeats,
            diagonal,
            simulate,
            json,
        }),

        Commands::Version => {
            version::execute();
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("{} {:#}", style("Error:").red().bold(), e);
        std::process::exit(1);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_lower() {
        let cli = Cli::try_parse_from([
            "qcircuit", "-vv", "lower", "-i", "h.yaml", "--angle", "-0.5", "--diagonal",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 2);
        match cli.command {
            Commands::Lower {
                input,
                angle,
                repeats,
                diagonal,
                simulate,
                json,
            } => {
                assert_eq!(input, "h.yaml");
                assert_eq!(angle, -0.5);
                assert_eq!(repeats, 0);
                assert!(diagonal);
                assert!(!simulate);
                assert!(!json);
            }
            Commands::Version => panic!("expected lower"),
        }
    }

    #[test]
    fn test_lower_requires_angle() {
        assert!(Cli::try_parse_from(["qcircuit", "lower", "-i", "h.yaml"]).is_err());
    }
}
