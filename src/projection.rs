/// Projection of anchor seed windows onto every other alignment row
use log::{debug, warn};

use crate::alignment::{AlignedRecord, Alignment, AnchorMatch};
use crate::candidate::Candidate;
use crate::coordinates::CoordinateTranslator;
use crate::error::SeedError;
use crate::scoring::global_match_score;

/// What to do with a seed window that runs past the alignment end
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WindowPolicy {
    /// Keep the clamped (shorter, possibly empty) window
    #[default]
    Truncate,
    /// Drop that seed from the row and keep the others
    Reject,
}

/// One seed window on the anchor and on a variant row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedWindow {
    pub position: usize,
    /// 0-based gapped start column
    pub column: usize,
    pub anchor: String,
    pub variant: String,
}

/// A candidate projected onto one non-anchor record, not yet scored
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Projection {
    pub mirna: String,
    pub sequence: String,
    pub other_id: String,
    pub windows: Vec<SeedWindow>,
}

impl Projection {
    /// Score each window pair
    pub fn score(self) -> ProjectionRow {
        let scores = self
            .windows
            .iter()
            .map(|w| global_match_score(&w.anchor, &w.variant))
            .collect();
        ProjectionRow {
            mirna: self.mirna,
            sequence: self.sequence,
            positions: self.windows.iter().map(|w| w.position).collect(),
            other_id: self.other_id,
            anchor_seeds: self.windows.iter().map(|w| w.anchor.clone()).collect(),
            variant_seeds: self.windows.into_iter().map(|w| w.variant).collect(),
            scores,
        }
    }
}

/// Scored comparison of one candidate against one variant record.
/// `positions`, `anchor_seeds`, `variant_seeds` and `scores` are parallel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectionRow {
    pub mirna: String,
    pub sequence: String,
    pub positions: Vec<usize>,
    pub other_id: String,
    pub anchor_seeds: Vec<String>,
    pub variant_seeds: Vec<String>,
    pub scores: Vec<u32>,
}

impl ProjectionRow {
    /// (full sequence, miRNA) group key
    pub fn group_key(&self) -> (&str, &str) {
        (&self.sequence, &self.mirna)
    }
}

/// Anchor-side window for one seed, resolved once per candidate
#[derive(Debug, Clone)]
struct AnchorWindow {
    position: usize,
    column: usize,
    length: usize,
    anchor: String,
}

/// Maps candidate seeds through the anchor's gapped coordinates and cuts
/// the same column window out of every other record.
#[derive(Debug, Clone, Copy)]
pub struct SeedProjector<'a> {
    alignment: &'a Alignment,
    anchor_match: AnchorMatch,
    window_policy: WindowPolicy,
}

impl<'a> SeedProjector<'a> {
    pub fn new(alignment: &'a Alignment) -> Self {
        SeedProjector {
            alignment,
            anchor_match: AnchorMatch::default(),
            window_policy: WindowPolicy::default(),
        }
    }

    pub fn with_anchor_match(mut self, anchor_match: AnchorMatch) -> Self {
        self.anchor_match = anchor_match;
        self
    }

    pub fn with_window_policy(mut self, window_policy: WindowPolicy) -> Self {
        self.window_policy = window_policy;
        self
    }

    fn anchor_windows(
        &self,
        candidate: &Candidate,
        anchor: &AlignedRecord,
    ) -> Vec<AnchorWindow> {
        let translator = CoordinateTranslator::new(anchor);
        let width = self.alignment.width();

        candidate
            .seed_spans()
            .filter_map(|(position, length)| {
                let column = translator.column(position);
                let end = column.saturating_add(length);
                if end > width {
                    let err = SeedError::WindowOutOfBounds {
                        position,
                        column,
                        end,
                        width,
                    };
                    match self.window_policy {
                        WindowPolicy::Reject => {
                            warn!("{} ({}): dropping seed, {}", candidate.sequence, candidate.mirna, err);
                            return None;
                        }
                        WindowPolicy::Truncate => {
                            debug!("{} ({}): truncating seed, {}", candidate.sequence, candidate.mirna, err);
                        }
                    }
                }
                Some(AnchorWindow {
                    position,
                    column,
                    length,
                    anchor: anchor.window(column, length).to_string(),
                })
            })
            .collect()
    }

    /// Project every seed of `candidate` onto each non-anchor record.
    ///
    /// Fails only when the anchor cannot be resolved; one projection per
    /// other record is returned in alignment order.
    pub fn project(&self, candidate: &Candidate) -> Result<Vec<Projection>, SeedError> {
        let fragment = self.anchor_match.fragment(&candidate.sequence);
        let anchor = self.alignment.find_anchor(fragment, self.anchor_match)?;
        let windows = self.anchor_windows(candidate, anchor);

        Ok(self
            .alignment
            .others(fragment, self.anchor_match)
            .map(|other| Projection {
                mirna: candidate.mirna.clone(),
                sequence: candidate.sequence.clone(),
                other_id: other.id.clone(),
                windows: windows
                    .iter()
                    .map(|w| SeedWindow {
                        position: w.position,
                        column: w.column,
                        anchor: w.anchor.clone(),
                        variant: other.window(w.column, w.length).to_string(),
                    })
                    .collect(),
            })
            .collect())
    }

    /// Project and score in one step
    pub fn project_scored(&self, candidate: &Candidate) -> Result<Vec<ProjectionRow>, SeedError> {
        Ok(self
            .project(candidate)?
            .into_iter()
            .map(Projection::score)
            .collect())
    }
}
