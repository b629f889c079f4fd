//! Quantum Key Distribution (QKD) Protocols.
//!
//! - **BB84**: the full prepare-and-measure run, from key generation to reconciliation.
//! - **Sifting**: dropping positions measured in the wrong basis.
//! - **Estimation**: disclosing a random sample of the sifted key to estimate the QBER.

pub mod bb84;
pub mod estimation;
pub mod sifting;
