/// In-memory multiple sequence alignment and anchor lookup
use crate::error::SeedError;

/// Gap symbol used by every supported alignment format
pub const GAP: u8 = b'-';

/// One named row of the alignment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlignedRecord {
    pub id: String,
    /// Gapped sequence, ASCII only
    pub sequence: String,
}

impl AlignedRecord {
    pub fn new(id: impl Into<String>, sequence: impl Into<String>) -> Self {
        AlignedRecord {
            id: id.into(),
            sequence: sequence.into(),
        }
    }

    /// Number of gap symbols before the first residue.
    ///
    /// An all-gap row returns its full length.
    pub fn leading_gap_offset(&self) -> usize {
        self.sequence
            .bytes()
            .position(|b| b != GAP)
            .unwrap_or(self.sequence.len())
    }

    pub fn bytes(&self) -> &[u8] {
        self.sequence.as_bytes()
    }

    /// Slice of the gapped row with Python slice semantics: bounds past the
    /// end are clamped, an empty string comes back when `start` is past the end.
    pub fn window(&self, start: usize, len: usize) -> &str {
        let width = self.sequence.len();
        let start = start.min(width);
        let end = start.saturating_add(len).min(width);
        &self.sequence[start..end]
    }
}

/// How a candidate's identifier fragment selects its anchor record.
///
/// `delimiter` cuts candidate identifiers down to their fragment; under
/// `Exact` it cuts record ids too.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorMatch {
    /// Record id, cut at the first delimiter, must equal the fragment.
    /// More than one hit is an error.
    Exact { delimiter: char },
    /// First record whose id contains the fragment anywhere
    Substring { delimiter: char },
}

impl Default for AnchorMatch {
    fn default() -> Self {
        AnchorMatch::Exact { delimiter: '.' }
    }
}

impl AnchorMatch {
    pub fn delimiter(&self) -> char {
        match *self {
            AnchorMatch::Exact { delimiter } | AnchorMatch::Substring { delimiter } => delimiter,
        }
    }

    /// Text before the first delimiter, or the whole identifier
    pub fn fragment<'s>(&self, identifier: &'s str) -> &'s str {
        identifier.split(self.delimiter()).next().unwrap_or(identifier)
    }

    pub fn matches(&self, id: &str, fragment: &str) -> bool {
        match *self {
            AnchorMatch::Exact { .. } => self.fragment(id) == fragment,
            AnchorMatch::Substring { .. } => id.contains(fragment),
        }
    }
}

/// Ordered, immutable collection of equal-width aligned records
#[derive(Debug, Clone)]
pub struct Alignment {
    records: Vec<AlignedRecord>,
    width: usize,
}

impl Alignment {
    /// Validate and wrap records. All rows must share one width and hold
    /// only ASCII letters or the gap symbol.
    pub fn new(records: Vec<AlignedRecord>) -> Result<Self, SeedError> {
        let width = match records.first() {
            Some(first) => first.sequence.len(),
            None => return Err(SeedError::EmptyAlignment),
        };

        for record in &records {
            if let Some((column, symbol)) = record
                .sequence
                .char_indices()
                .find(|&(_, c)| !(c.is_ascii_alphabetic() || c == GAP as char))
            {
                return Err(SeedError::InvalidSymbol {
                    id: record.id.clone(),
                    symbol,
                    column,
                });
            }
            if record.sequence.len() != width {
                return Err(SeedError::RaggedAlignment {
                    id: record.id.clone(),
                    expected: width,
                    found: record.sequence.len(),
                });
            }
        }

        Ok(Alignment { records, width })
    }

    pub fn records(&self) -> &[AlignedRecord] {
        &self.records
    }

    /// Shared column count L
    pub fn width(&self) -> usize {
        self.width
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Resolve an identifier fragment to its anchor record
    pub fn find_anchor(
        &self,
        fragment: &str,
        policy: AnchorMatch,
    ) -> Result<&AlignedRecord, SeedError> {
        let mut hits = self
            .records
            .iter()
            .filter(|r| policy.matches(&r.id, fragment));

        let first = hits.next().ok_or_else(|| SeedError::AnchorNotFound {
            fragment: fragment.to_string(),
        })?;

        if let AnchorMatch::Exact { .. } = policy {
            let rest: Vec<&AlignedRecord> = hits.collect();
            if !rest.is_empty() {
                let matches = std::iter::once(first)
                    .chain(rest)
                    .map(|r| r.id.clone())
                    .collect();
                return Err(SeedError::AmbiguousAnchor {
                    fragment: fragment.to_string(),
                    matches,
                });
            }
        }

        Ok(first)
    }

    /// Records not matched by `fragment`, in alignment order
    pub fn others<'a>(
        &'a self,
        fragment: &'a str,
        policy: AnchorMatch,
    ) -> impl Iterator<Item = &'a AlignedRecord> + 'a {
        self.records
            .iter()
            .filter(move |r| !policy.matches(&r.id, fragment))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Alignment {
        Alignment::new(vec![
            AlignedRecord::new("seqA.1", "----CAGUGCAU"),
            AlignedRecord::new("seqB.1", "-AAACAGAGCAU"),
            AlignedRecord::new("seqAB.2", "AAAACAGAGCAU"),
        ])
        .unwrap()
    }

    #[test]
    fn test_leading_gap_offset() {
        let aln = sample();
        assert_eq!(aln.records()[0].leading_gap_offset(), 4);
        assert_eq!(aln.records()[1].leading_gap_offset(), 1);
        assert_eq!(aln.records()[2].leading_gap_offset(), 0);
        assert_eq!(AlignedRecord::new("x", "---").leading_gap_offset(), 3);
    }

    #[test]
    fn test_exact_anchor_match() {
        let aln = sample();
        let anchor = aln.find_anchor("seqA", AnchorMatch::default()).unwrap();
        assert_eq!(anchor.id, "seqA.1");

        let others: Vec<&str> = aln
            .others("seqA", AnchorMatch::default())
            .map(|r| r.id.as_str())
            .collect();
        assert_eq!(others, vec!["seqB.1", "seqAB.2"]);
    }

    #[test]
    fn test_substring_match_takes_first() {
        let aln = sample();
        let policy = AnchorMatch::Substring { delimiter: '.' };
        let anchor = aln.find_anchor("seqA", policy).unwrap();
        assert_eq!(anchor.id, "seqA.1");

        // seqAB.2 contains "seqA", so it is not an "other" here
        let others: Vec<&str> = aln
            .others("seqA", policy)
            .map(|r| r.id.as_str())
            .collect();
        assert_eq!(others, vec!["seqB.1"]);
    }

    #[test]
    fn test_delimiter_shared_by_fragment_and_ids() {
        let policy = AnchorMatch::Exact { delimiter: '|' };
        assert_eq!(policy.fragment("seqA|7"), "seqA");
        assert!(policy.matches("seqA|1", "seqA"));
        assert!(!policy.matches("seqA.1", "seqA"));

        let policy = AnchorMatch::Substring { delimiter: '|' };
        assert_eq!(policy.delimiter(), '|');
        assert_eq!(policy.fragment("seqA.7|x"), "seqA.7");
        assert_eq!(AnchorMatch::default().fragment("ENST42"), "ENST42");
    }

    #[test]
    fn test_anchor_not_found() {
        let aln = sample();
        let err = aln.find_anchor("seqZ", AnchorMatch::default()).unwrap_err();
        assert_eq!(
            err,
            SeedError::AnchorNotFound {
                fragment: "seqZ".to_string()
            }
        );
    }

    #[test]
    fn test_ambiguous_exact_anchor() {
        let aln = Alignment::new(vec![
            AlignedRecord::new("seqA.1", "ACGU"),
            AlignedRecord::new("seqA.2", "ACGU"),
        ])
        .unwrap();
        let err = aln.find_anchor("seqA", AnchorMatch::default()).unwrap_err();
        assert!(matches!(err, SeedError::AmbiguousAnchor { ref matches, .. } if matches.len() == 2));
    }

    #[test]
    fn test_ragged_alignment_rejected() {
        let err = Alignment::new(vec![
            AlignedRecord::new("a", "ACGU"),
            AlignedRecord::new("b", "ACG"),
        ])
        .unwrap_err();
        assert!(matches!(err, SeedError::RaggedAlignment { found: 3, .. }));
        assert_eq!(Alignment::new(Vec::new()).unwrap_err(), SeedError::EmptyAlignment);
    }

    #[test]
    fn test_invalid_symbol_rejected() {
        let err = Alignment::new(vec![AlignedRecord::new("a", "AC*U")]).unwrap_err();
        assert_eq!(
            err,
            SeedError::InvalidSymbol {
                id: "a".to_string(),
                symbol: '*',
                column: 2
            }
        );
    }

    #[test]
    fn test_window_clamps_like_slices() {
        let rec = AlignedRecord::new("a", "ACGU");
        assert_eq!(rec.window(1, 2), "CG");
        assert_eq!(rec.window(3, 5), "U");
        assert_eq!(rec.window(9, 2), "");
    }
}
