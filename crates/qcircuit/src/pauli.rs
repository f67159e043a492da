//! Single-qubit Pauli basis ids.

use num_complex::Complex64;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{IrError, IrResult};

/// Single-qubit Pauli operator, numbered I=0, X=1, Y=2, Z=3.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PauliId {
    /// Identity.
    I,
    /// Pauli-X.
    X,
    /// Pauli-Y.
    Y,
    /// Pauli-Z.
    Z,
}

impl PauliId {
    /// Convert from the conventional numeric id.
    pub fn from_id(id: u32) -> IrResult<Self> {
        match id {
            0 => Ok(PauliId::I),
            1 => Ok(PauliId::X),
            2 => Ok(PauliId::Y),
            3 => Ok(PauliId::Z),
            other => Err(IrError::InvalidPauliId(other)),
        }
    }

    /// The conventional numeric id.
    #[inline]
    pub fn id(self) -> u32 {
        match self {
            PauliId::I => 0,
            PauliId::X => 1,
            PauliId::Y => 2,
            PauliId::Z => 3,
        }
    }

    /// True for I and Z, the operators diagonal in the computational basis.
    #[inline]
    pub fn is_diagonal(self) -> bool {
        matches!(self, PauliId::I | PauliId::Z)
    }

    /// Row-major 2x2 matrix.
    pub fn matrix(self) -> [Complex64; 4] {
        let zero = Complex64::new(0.0, 0.0);
        let one = Complex64::new(1.0, 0.0);
        let i = Complex64::new(0.0, 1.0);
        match self {
            PauliId::I => [one, zero, zero, one],
            PauliId::X => [zero, one, one, zero],
            PauliId::Y => [zero, -i, i, zero],
            PauliId::Z => [one, zero, zero, -one],
        }
    }
}

impl TryFrom<u32> for PauliId {
    type Error = IrError;

    fn try_from(id: u32) -> IrResult<Self> {
        Self::from_id(id)
    }
}

impl FromStr for PauliId {
    type Err = IrError;

    fn from_str(s: &str) -> IrResult<Self> {
        match s {
            "I" | "i" => Ok(PauliId::I),
            "X" | "x" => Ok(PauliId::X),
            "Y" | "y" => Ok(PauliId::Y),
            "Z" | "z" => Ok(PauliId::Z),
            other => Err(IrError::InvalidPauliString(format!(
                "unknown Pauli operator '{other}'"
            ))),
        }
    }
}

impl fmt::Display for PauliId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let c = match self {
            PauliId::I => "I",
            PauliId::X => "X",
            PauliId::Y => "Y",
            PauliId::Z => "Z",
        };
        f.write_str(c)
    }
}
