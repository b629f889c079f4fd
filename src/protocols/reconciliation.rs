//! Block parity reconciliation.
//!
//! The remainder key is cut into contiguous blocks. For every block whose parity differs
//! between Alice and Bob, Bob bisects the block by comparing the parity of the left half
//! until a single bit is isolated, then flips it. This is a single pass of a Cascade-style
//! protocol: blocks holding an even number of errors have matching parities and are left
//! alone, and a block with an odd number of errors gets exactly one bit flipped.

use crate::core::{
    errors::{ParameterError, check_len},
    utils::{count_mismatches, error_rate, parity},
};
use log::debug;

/// Outcome of reconciling Bob's key against Alice's.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Reconciliation {
    /// Bob's key after correction
    pub corrected: Vec<bool>,
    /// Number of blocks the key was cut into
    pub blocks: usize,
    /// Bits flipped in Bob's key
    pub corrected_bits: usize,
    /// Parity bits exchanged over the public channel
    pub disclosed_parities: usize,
    /// Positions still differing from Alice's key
    pub residual_errors: usize,
    /// `residual_errors` over key length, `None` for an empty key
    pub residual_error_rate: Option<f64>,
}

/// Block boundaries for a key of length `n` split into `num_blocks` blocks.
///
/// Blocks have size `max(1, n / num_blocks)` and the last block absorbs the rest.
pub fn block_ranges(n: usize, num_blocks: usize) -> Vec<std::ops::Range<usize>> {
    if n == 0 || num_blocks == 0 {
        return Vec::new();
    }

    let size = (n / num_blocks).max(1);
    let mut ranges = Vec::with_capacity(num_blocks.min(n));

    for b in 0..num_blocks {
        let start = b * size;
        if start >= n {
            break;
        }
        let end = if b == num_blocks - 1 {
            n
        } else {
            (start + size).min(n)
        };
        ranges.push(start..end);
    }

    ranges
}

/// Reconciles `bob` against `alice` and returns the corrected copy of `bob`.
pub fn reconcile(
    alice: &[bool],
    bob: &[bool],
    num_blocks: usize,
) -> Result<Reconciliation, ParameterError> {
    let mut corrected = bob.to_vec();
    let (blocks, corrected_bits, disclosed_parities) =
        reconcile_in_place(alice, &mut corrected, num_blocks)?;

    let residual_errors = count_mismatches(alice, &corrected);
    let residual_error_rate = error_rate(alice, &corrected);

    Ok(Reconciliation {
        corrected,
        blocks,
        corrected_bits,
        disclosed_parities,
        residual_errors,
        residual_error_rate,
    })
}

/// Corrects `bob` in place.
///
/// Returns `(blocks, corrected_bits, disclosed_parities)`. `alice` is never modified.
pub fn reconcile_in_place(
    alice: &[bool],
    bob: &mut [bool],
    num_blocks: usize,
) -> Result<(usize, usize, usize), ParameterError> {
    if num_blocks == 0 {
        return Err(ParameterError::ZeroBlocks);
    }
    check_len(alice.len(), bob.len())?;

    let ranges = block_ranges(alice.len(), num_blocks);
    let mut corrected_bits = 0;
    let mut disclosed = 0;

    for range in &ranges {
        let a_block = &alice[range.clone()];
        let b_block = &mut bob[range.clone()];

        disclosed += 1;
        if parity(a_block) == parity(b_block) {
            continue;
        }

        if let Some(offset) = bisect(a_block, b_block, &mut disclosed) {
            debug!("flipped bit {} in block {:?}", range.start + offset, range);
            corrected_bits += 1;
        }
    }

    debug!(
        "reconciled {} blocks, {} bits flipped, {} parities disclosed",
        ranges.len(),
        corrected_bits,
        disclosed
    );
    Ok((ranges.len(), corrected_bits, disclosed))
}

/// Binary search for the bit responsible for a parity mismatch.
///
/// Caller guarantees the parities of `alice` and `bob` differ. Returns the offset of the
/// flipped bit.
fn bisect(alice: &[bool], bob: &mut [bool], disclosed: &mut usize) -> Option<usize> {
    match alice.len() {
        0 => None,
        1 => {
            bob[0] = !bob[0];
            Some(0)
        }
        len => {
            let mid = len / 2;
            let (a_left, a_right) = alice.split_at(mid);
            let (b_left, b_right) = bob.split_at_mut(mid);

            *disclosed += 1;
            if parity(a_left) != parity(b_left) {
                bisect(a_left, b_left, disclosed)
            } else {
                bisect(a_right, b_right, disclosed).map(|i| i + mid)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alice_key(n: usize) -> Vec<bool> {
        (0..n).map(|i| (i * 7 + 3) % 5 < 2).collect()
    }

    fn flip(bits: &[bool], positions: &[usize]) -> Vec<bool> {
        let mut out = bits.to_vec();
        for &p in positions {
            out[p] = !out[p];
        }
        out
    }

    #[test]
    fn block_ranges_cover_the_key() {
        assert_eq!(block_ranges(10, 3), vec![0..3, 3..6, 6..10]);
        assert_eq!(block_ranges(10, 1), vec![0..10]);
        assert_eq!(block_ranges(3, 8), vec![0..1, 1..2, 2..3]);
        assert!(block_ranges(0, 4).is_empty());
    }

    #[test]
    fn single_error_is_corrected_exactly() {
        let alice = alice_key(16);
        for pos in 0..16 {
            let bob = flip(&alice, &[pos]);
            let result = reconcile(&alice, &bob, 4).unwrap();
            assert_eq!(result.corrected, alice, "error at {pos}");
            assert_eq!(result.corrected_bits, 1);
            assert_eq!(result.residual_errors, 0);
            assert_eq!(result.residual_error_rate, Some(0.0));
        }
    }

    #[test]
    fn one_error_per_block_is_fully_corrected() {
        let alice = alice_key(40);
        let bob = flip(&alice, &[2, 13, 27, 39]);
        let result = reconcile(&alice, &bob, 4).unwrap();
        assert_eq!(result.corrected, alice);
        assert_eq!(result.corrected_bits, 4);
    }

    #[test]
    fn even_errors_in_a_block_are_invisible() {
        let alice = alice_key(8);
        let bob = flip(&alice, &[1, 5]);
        let result = reconcile(&alice, &bob, 1).unwrap();
        assert_eq!(result.corrected, bob);
        assert_eq!(result.corrected_bits, 0);
        assert_eq!(result.residual_errors, 2);
        assert_eq!(result.disclosed_parities, 1);
    }

    #[test]
    fn odd_error_count_flips_one_bit() {
        let alice = alice_key(16);
        let bob = flip(&alice, &[0, 6, 11]);
        let result = reconcile(&alice, &bob, 1).unwrap();
        assert_eq!(result.corrected_bits, 1);
        assert_eq!(result.residual_errors, 2);
    }

    #[test]
    fn reconciling_twice_changes_nothing() {
        let alice = alice_key(64);
        let bob = flip(&alice, &[3, 4, 20, 41, 42, 43, 63]);
        let once = reconcile(&alice, &bob, 8).unwrap();
        let twice = reconcile(&alice, &once.corrected, 8).unwrap();
        assert_eq!(twice.corrected, once.corrected);
        assert_eq!(twice.corrected_bits, 0);
    }

    #[test]
    fn disclosure_counts_bisection_levels() {
        let alice = alice_key(16);
        let bob = flip(&alice, &[9]);
        let result = reconcile(&alice, &bob, 1).unwrap();
        // one block parity plus log2(16) halvings
        assert_eq!(result.disclosed_parities, 5);
    }

    #[test]
    fn more_blocks_than_bits() {
        let alice = vec![true, false, true];
        let bob = vec![false, true, true];
        let result = reconcile(&alice, &bob, 10).unwrap();
        assert_eq!(result.blocks, 3);
        assert_eq!(result.corrected, alice);
    }

    #[test]
    fn empty_key_is_a_no_op() {
        let result = reconcile(&[], &[], 4).unwrap();
        assert!(result.corrected.is_empty());
        assert_eq!(result.blocks, 0);
        assert_eq!(result.residual_error_rate, None);
    }

    #[test]
    fn rejects_zero_blocks_and_misaligned_keys() {
        assert_eq!(reconcile(&[true], &[true], 0), Err(ParameterError::ZeroBlocks));
        assert!(matches!(
            reconcile(&[true, false], &[true], 1),
            Err(ParameterError::LengthMismatch { .. })
        ));
    }
}
