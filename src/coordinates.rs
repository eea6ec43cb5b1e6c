/// Ungapped-to-gapped coordinate translation on an anchor row
use crate::alignment::{AlignedRecord, GAP};

/// Translate a 1-based ungapped seed start into a 0-based alignment column.
///
/// Gaps are counted in the anchor window `[offset, offset + position)` and
/// added on top of the plain offset shift. No bounds check is made: a
/// position past the anchor's residues yields a column that may sit on a
/// gap or beyond the alignment width, and callers slice defensively.
/// Sums saturate, so absurd positions land past any real width.
pub fn gapped_column(anchor: &[u8], offset: usize, position: usize) -> usize {
    debug_assert!(position >= 1, "seed positions are 1-based");
    let start = offset.min(anchor.len());
    let end = offset.saturating_add(position).min(anchor.len());
    let gaps = anchor[start..end].iter().filter(|&&b| b == GAP).count();
    gaps.saturating_add(position)
        .saturating_add(offset)
        .saturating_sub(1)
}

/// Anchor row paired with its leading-gap offset, computed once per
/// candidate and reused for every seed.
#[derive(Debug, Clone, Copy)]
pub struct CoordinateTranslator<'a> {
    anchor: &'a AlignedRecord,
    offset: usize,
}

impl<'a> CoordinateTranslator<'a> {
    pub fn new(anchor: &'a AlignedRecord) -> Self {
        CoordinateTranslator {
            anchor,
            offset: anchor.leading_gap_offset(),
        }
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    /// 0-based gapped column of the seed starting at 1-based `position`
    pub fn column(&self, position: usize) -> usize {
        gapped_column(self.anchor.bytes(), self.offset, position)
    }
}
