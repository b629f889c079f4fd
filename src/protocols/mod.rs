//! Quantum Cryptography Protocols.
//!
//! This module contains the BB84 key distribution protocol and the classical
//! post-processing that follows it.

pub mod qkd;
pub mod reconciliation;
pub use qkd::{bb84, estimation, sifting};
