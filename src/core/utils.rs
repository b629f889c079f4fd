//! Bit-level helpers shared by the estimation and reconciliation stages.

/// XOR-reduction of all bits in `bits`.
pub fn parity(bits: &[bool]) -> bool {
    bits.iter().fold(false, |acc, &b| acc ^ b)
}

/// Number of positions where `a` and `b` differ.
///
/// Only the common prefix is compared; callers check lengths beforehand.
pub fn count_mismatches(a: &[bool], b: &[bool]) -> usize {
    a.iter().zip(b).filter(|(x, y)| x != y).count()
}

/// Mismatch fraction between `a` and `b`, or `None` for empty input.
pub fn error_rate(a: &[bool], b: &[bool]) -> Option<f64> {
    let len = a.len().min(b.len());
    if len == 0 {
        return None;
    }
    Some(count_mismatches(a, b) as f64 / len as f64)
}

/// Applies the same index permutation to a bit sequence.
pub(crate) fn permute(bits: &[bool], order: &[usize]) -> Vec<bool> {
    order.iter().map(|&i| bits[i]).collect()
}
