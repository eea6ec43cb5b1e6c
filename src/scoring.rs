//! Global alignment score with match = 1, mismatch = 0, gap = 0.
//!
//! Under this scheme the optimal global score equals the longest common
//! subsequence of the two inputs, so a single rolling DP row suffices and
//! no traceback is kept.
use crate::alignment::GAP;

#[inline]
fn symbols_match(a: u8, b: u8) -> bool {
    a != GAP && b != GAP && a.eq_ignore_ascii_case(&b)
}

/// Best achievable end-to-end score between two (possibly gapped) seed windows.
///
/// Gap symbols never score, so a window scored against itself yields its
/// ungapped length.
pub fn global_match_score(a: &str, b: &str) -> u32 {
    let a = a.as_bytes();
    let b = b.as_bytes();
    if a.is_empty() || b.is_empty() {
        return 0;
    }

    let m = b.len();
    let mut prev = vec![0u32; m + 1];
    let mut curr = vec![0u32; m + 1];

    for &x in a {
        for j in 1..=m {
            curr[j] = if symbols_match(x, b[j - 1]) {
                prev[j - 1] + 1
            } else {
                prev[j].max(curr[j - 1])
            };
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[m]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identical_sequences() {
        assert_eq!(global_match_score("ACGU", "ACGU"), 4);
        assert_eq!(global_match_score("A-GU", "A-GU"), 3);
        assert_eq!(global_match_score("---", "---"), 0);
    }

    #[test]
    fn test_mismatches_and_shifts() {
        assert_eq!(global_match_score("CAG", "CAA"), 2);
        // best alignment skips the leading A: -ACG / AC-G style
        assert_eq!(global_match_score("ACGU", "CGUA"), 3);
        assert_eq!(global_match_score("AAAA", "UUUU"), 0);
    }

    #[test]
    fn test_case_insensitive_and_empty() {
        assert_eq!(global_match_score("acgu", "ACGU"), 4);
        assert_eq!(global_match_score("", "ACGU"), 0);
        assert_eq!(global_match_score("ACGU", ""), 0);
    }

    #[test]
    fn test_symmetric() {
        let pairs = [("GAUUACA", "GCAUGCU"), ("A-CG", "ACG-"), ("UUAG", "GAUU")];
        for (a, b) in pairs {
            assert_eq!(global_match_score(a, b), global_match_score(b, a));
        }
    }
}
