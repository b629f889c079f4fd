//! Basis reconciliation ("sifting").
//!
//! After the quantum exchange both parties announce their bases over the public
//! channel and keep only the positions where the bases agree.

use crate::core::{
    Basis,
    errors::{ParameterError, check_len},
    utils,
};
use log::debug;

/// Alice's and Bob's keys restricted to positions where their bases agreed.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SiftedKey {
    pub alice: Vec<bool>,
    pub bob: Vec<bool>,
    /// Positions thrown away because the bases disagreed.
    pub discarded: usize,
}

impl SiftedKey {
    /// Builds a key pair from two aligned sequences.
    pub fn new(alice: Vec<bool>, bob: Vec<bool>) -> Result<Self, ParameterError> {
        check_len(alice.len(), bob.len())?;
        Ok(Self {
            alice,
            bob,
            discarded: 0,
        })
    }

    pub fn len(&self) -> usize {
        self.alice.len()
    }

    pub fn is_empty(&self) -> bool {
        self.alice.is_empty()
    }

    /// Positions where the two keys differ.
    pub fn mismatches(&self) -> usize {
        utils::count_mismatches(&self.alice, &self.bob)
    }

    /// Mismatch rate over the whole key, `None` when the key is empty.
    pub fn error_rate(&self) -> Option<f64> {
        utils::error_rate(&self.alice, &self.bob)
    }
}

/// Keeps the positions where `alice_bases[i] == bob_bases[i]`, in their original order.
pub fn sift(
    alice_bits: &[bool],
    alice_bases: &[Basis],
    bob_bits: &[bool],
    bob_bases: &[Basis],
) -> Result<SiftedKey, ParameterError> {
    let n = alice_bits.len();
    check_len(n, alice_bases.len())?;
    check_len(n, bob_bits.len())?;
    check_len(n, bob_bases.len())?;

    let mut alice = Vec::new();
    let mut bob = Vec::new();

    for i in 0..n {
        if alice_bases[i] == bob_bases[i] {
            alice.push(alice_bits[i]);
            bob.push(bob_bits[i]);
        }
    }

    let discarded = n - alice.len();
    debug!("sifting kept {} of {} bits", alice.len(), n);

    Ok(SiftedKey {
        alice,
        bob,
        discarded,
    })
}
