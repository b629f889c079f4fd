use crate::core::channels::apply_channel_noise;
use crate::core::errors::{ParameterError, check_len, validate_prob};
use crate::core::source::{Basis, generate_bases};
use rand::Rng;

/// Bits read out by a measuring party together with the bases it chose.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MeasurementOutcome {
    /// Measured bit values
    pub bits: Vec<bool>,
    /// Basis used for each measurement
    pub bases: Vec<Basis>,
}

/// Measures one bit prepared in `prepared` using basis `measured`.
///
/// Matching bases reproduce the prepared bit. Otherwise the outcome is a fair coin,
/// independent of the prepared value.
pub fn measure_bit<R: Rng>(rng: &mut R, bit: bool, prepared: Basis, measured: Basis) -> bool {
    if prepared == measured {
        bit
    } else {
        rng.random_bool(0.5)
    }
}

/// Measures every bit of `bits` under a freshly drawn random basis.
///
/// This is the rule shared by the eavesdropper and the legitimate receiver.
pub fn measure<R: Rng>(
    rng: &mut R,
    bits: &[bool],
    prepared: &[Basis],
) -> Result<MeasurementOutcome, ParameterError> {
    check_len(bits.len(), prepared.len())?;

    let bases = generate_bases(rng, bits.len());
    let bits = bits
        .iter()
        .zip(prepared)
        .zip(&bases)
        .map(|((&bit, &p), &m)| measure_bit(rng, bit, p, m))
        .collect();

    Ok(MeasurementOutcome { bits, bases })
}

/// Receiver side of the transmission.
///
/// Bob measures what reached him under his own random bases, then channel noise
/// flips each measured bit with probability `error_prob`.
pub fn receive<R: Rng>(
    rng: &mut R,
    transmitted: &[bool],
    sender_bases: &[Basis],
    error_prob: f64,
) -> Result<MeasurementOutcome, ParameterError> {
    validate_prob(error_prob)?;

    let measured = measure(rng, transmitted, sender_bases)?;
    let bits = apply_channel_noise(rng, &measured.bits, error_prob)?;

    Ok(MeasurementOutcome {
        bits,
        bases: measured.bases,
    })
}
