//! Random key material for the sender and both measuring parties.

use rand::Rng;
use std::fmt;

/// Encoding basis of a single transmitted bit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Basis {
    /// `+` basis
    Rectilinear,
    /// `x` basis
    Diagonal,
}

impl Basis {
    /// Draws a basis uniformly at random.
    pub fn random<R: Rng>(rng: &mut R) -> Self {
        if rng.random_bool(0.5) {
            Basis::Diagonal
        } else {
            Basis::Rectilinear
        }
    }
}

impl fmt::Display for Basis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Basis::Rectilinear => write!(f, "+"),
            Basis::Diagonal => write!(f, "x"),
        }
    }
}

/// Generates `n` independent, uniformly random bits.
pub fn generate_bits<R: Rng>(rng: &mut R, n: usize) -> Vec<bool> {
    (0..n).map(|_| rng.random_bool(0.5)).collect()
}

/// Generates `n` independent, uniformly random bases.
pub fn generate_bases<R: Rng>(rng: &mut R, n: usize) -> Vec<Basis> {
    (0..n).map(|_| Basis::random(rng)).collect()
}
