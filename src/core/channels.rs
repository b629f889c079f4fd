use crate::core::errors::{ParameterError, check_len, validate_fraction, validate_prob};
use crate::core::measurements::measure_bit;
use crate::core::source::Basis;
use log::debug;
use rand::Rng;

/// What actually reaches the receiver after the eavesdropper had its turn.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct InterceptionOutcome {
    /// Bits sent on to the receiver
    pub bits: Vec<bool>,
    /// Basis each bit was (re)prepared in
    pub bases: Vec<Basis>,
    /// Positions the eavesdropper measured and resent
    pub intercepted: Vec<bool>,
}

impl InterceptionOutcome {
    /// Number of intercepted positions.
    pub fn intercepted_count(&self) -> usize {
        self.intercepted.iter().filter(|&&i| i).count()
    }
}

/// Intercept-resend attack on the quantum channel.
///
/// When `active` is false or `fraction <= 0` the sender's bits and bases pass through
/// unchanged. Otherwise every position is intercepted independently with probability
/// `fraction`: the eavesdropper measures under its own random basis and resends the
/// result prepared in that basis. A full attack is `fraction = 1.0`.
pub fn apply_interception<R: Rng>(
    rng: &mut R,
    bits: &[bool],
    bases: &[Basis],
    active: bool,
    fraction: f64,
) -> Result<InterceptionOutcome, ParameterError> {
    check_len(bits.len(), bases.len())?;
    validate_fraction(fraction)?;

    let n = bits.len();
    if !active || fraction <= 0.0 {
        return Ok(InterceptionOutcome {
            bits: bits.to_vec(),
            bases: bases.to_vec(),
            intercepted: vec![false; n],
        });
    }

    let mut out_bits = Vec::with_capacity(n);
    let mut out_bases = Vec::with_capacity(n);
    let mut intercepted = Vec::with_capacity(n);

    for (&bit, &basis) in bits.iter().zip(bases) {
        if rng.random_bool(fraction) {
            let e_basis = Basis::random(rng);
            out_bits.push(measure_bit(rng, bit, basis, e_basis));
            out_bases.push(e_basis);
            intercepted.push(true);
        } else {
            out_bits.push(bit);
            out_bases.push(basis);
            intercepted.push(false);
        }
    }

    let outcome = InterceptionOutcome {
        bits: out_bits,
        bases: out_bases,
        intercepted,
    };
    debug!(
        "eavesdropper intercepted {} of {} bits",
        outcome.intercepted_count(),
        n
    );
    Ok(outcome)
}

/// Bit Flip Channel
///
/// Flips each bit independently with probability `error_prob`. Always returns a fresh
/// vector, even when no flips can happen.
pub fn apply_channel_noise<R: Rng>(
    rng: &mut R,
    bits: &[bool],
    error_prob: f64,
) -> Result<Vec<bool>, ParameterError> {
    validate_prob(error_prob)?;

    if error_prob <= 0.0 {
        return Ok(bits.to_vec());
    }

    Ok(bits
        .iter()
        .map(|&b| b ^ rng.random_bool(error_prob))
        .collect())
}
