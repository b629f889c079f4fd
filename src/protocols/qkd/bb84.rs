use super::estimation::estimate_error;
use super::sifting::sift;
use crate::SimulationConfig;
use crate::core::{
    apply_interception, errors::ParameterError, generate_bases, generate_bits, receive,
};
use crate::protocols::reconciliation::reconcile;
use log::{info, warn};
use rand::{Rng, SeedableRng, rngs::StdRng};

/// BB84 results
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BB84Result {
    /// Bits sent by Alice
    pub raw_length: usize,
    /// Bits kept after sifting
    pub sifted_length: usize,
    /// Bits dropped during sifting
    pub discarded: usize,
    /// Bits the eavesdropper intercepted
    pub intercepted_count: usize,
    /// Mismatches over the full sifted key
    pub sifted_errors: usize,
    /// Mismatch rate over the full sifted key
    pub raw_qber: Option<f64>,
    /// Sifted bits disclosed for estimation
    pub sample_size: usize,
    /// QBER estimated from the disclosed sample
    pub error_estimate: Option<f64>,
    /// Key bits left after estimation
    pub remainder_length: usize,
    /// Bits flipped by reconciliation
    pub corrected_bits: usize,
    /// Parity bits disclosed by reconciliation
    pub disclosed_parities: usize,
    /// Mismatch rate left after reconciliation
    pub residual_error_rate: Option<f64>,
    /// Bob's reconciled key
    pub reconciled_key: Vec<bool>,
}

/// QBER expected on the sifted key for a given attack and channel.
///
/// A fully intercepted bit is wrong with probability 1/4. Noise then flips the bit
/// with probability `channel_error`, independently of the attack.
pub fn expected_qber(intercept_fraction: f64, channel_error: f64) -> f64 {
    let e = 0.25 * intercept_fraction;
    e * (1.0 - channel_error) + (1.0 - e) * channel_error
}

/// Runs BB84 protocol
///
/// Seeds a fresh generator from `config.seed`, or from the thread generator when no
/// seed is set.
pub fn run(config: &SimulationConfig) -> Result<BB84Result, ParameterError> {
    config.validate()?;

    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_rng(&mut rand::rng()),
    };
    run_with_rng(config, &mut rng)
}

/// Runs BB84 protocol with a caller-owned generator.
pub fn run_with_rng<R: Rng>(
    config: &SimulationConfig,
    rng: &mut R,
) -> Result<BB84Result, ParameterError> {
    config.validate()?;
    let n = config.total_bits;

    // Alice prepares bits
    let alice_bits = generate_bits(rng, n);
    let alice_bases = generate_bases(rng, n);

    // Eavesdropper intercepts
    let transmitted = apply_interception(
        rng,
        &alice_bits,
        &alice_bases,
        config.eavesdropper,
        config.intercept_fraction,
    )?;

    // Bob measures
    let bob = receive(rng, &transmitted.bits, &transmitted.bases, config.channel_error)?;

    // Sifting stage
    let sifted = sift(&alice_bits, &alice_bases, &bob.bits, &bob.bases)?;
    if sifted.is_empty() {
        warn!("no bases agreed out of {} bits, key is empty", n);
    }

    // Parameter estimation
    let split = estimate_error(rng, &sifted, config.sample_size)?;

    // Error correction
    let reconciliation = reconcile(
        &split.remainder.alice,
        &split.remainder.bob,
        config.reconciliation_blocks,
    )?;

    let result = BB84Result {
        raw_length: n,
        sifted_length: sifted.len(),
        discarded: sifted.discarded,
        intercepted_count: transmitted.intercepted_count(),
        sifted_errors: sifted.mismatches(),
        raw_qber: sifted.error_rate(),
        sample_size: split.sample_size,
        error_estimate: split.estimate,
        remainder_length: split.remainder.len(),
        corrected_bits: reconciliation.corrected_bits,
        disclosed_parities: reconciliation.disclosed_parities,
        residual_error_rate: reconciliation.residual_error_rate,
        reconciled_key: reconciliation.corrected,
    };

    info!(
        "bb84: {} sent, {} sifted, estimate {:?}, residual {:?}",
        result.raw_length, result.sifted_length, result.error_estimate, result.residual_error_rate
    );
    Ok(result)
}
