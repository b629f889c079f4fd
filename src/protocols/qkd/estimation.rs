//! Sampled QBER estimation.
//!
//! Both parties agree on a random permutation of the sifted key, disclose a prefix of it
//! and compare. The disclosed sample is burned; the rest stays usable key material.

use super::sifting::SiftedKey;
use crate::core::{
    errors::{ParameterError, check_len},
    utils::{self, permute},
};
use log::{debug, warn};
use rand::Rng;
use rand::seq::SliceRandom;

/// Result of splitting a sifted key into a disclosed sample and a remainder.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SampleSplit {
    /// Mismatch rate inside the sample, `None` for an empty sample.
    pub estimate: Option<f64>,
    /// Number of positions disclosed.
    pub sample_size: usize,
    pub sample: SiftedKey,
    pub remainder: SiftedKey,
}

/// Permutes `key` jointly and estimates the error rate from its first `sample_size` positions.
///
/// A request that does not leave at least one bit behind (`sample_size >= key.len()`)
/// is clamped to half the key.
pub fn estimate_error<R: Rng>(
    rng: &mut R,
    key: &SiftedKey,
    sample_size: usize,
) -> Result<SampleSplit, ParameterError> {
    check_len(key.alice.len(), key.bob.len())?;

    let n = key.len();
    let sample_size = if sample_size >= n {
        if n > 0 {
            warn!(
                "requested sample of {} exceeds sifted key of {}, using {}",
                sample_size,
                n,
                n / 2
            );
        }
        n / 2
    } else {
        sample_size
    };

    let mut order: Vec<usize> = (0..n).collect();
    order.shuffle(rng);

    let alice = permute(&key.alice, &order);
    let bob = permute(&key.bob, &order);

    let (alice_sample, alice_rest) = alice.split_at(sample_size);
    let (bob_sample, bob_rest) = bob.split_at(sample_size);

    let estimate = utils::error_rate(alice_sample, bob_sample);
    debug!(
        "disclosed {} bits, {} remain, estimate {:?}",
        sample_size,
        n - sample_size,
        estimate
    );

    Ok(SampleSplit {
        estimate,
        sample_size,
        sample: SiftedKey {
            alice: alice_sample.to_vec(),
            bob: bob_sample.to_vec(),
            discarded: 0,
        },
        remainder: SiftedKey {
            alice: alice_rest.to_vec(),
            bob: bob_rest.to_vec(),
            discarded: 0,
        },
    })
}
