/// Batch driver: project and score every candidate, then filter
use log::{info, warn};
use rayon::prelude::*;

use crate::alignment::{Alignment, AnchorMatch};
use crate::candidate::Candidate;
use crate::divergence::{DivergenceFilter, ScoreComparison};
use crate::projection::{ProjectionRow, SeedProjector, WindowPolicy};

/// Scan configuration
#[derive(Debug, Clone, Copy)]
pub struct ScanConfig {
    /// Anchor selection, including the identifier fragment delimiter
    pub anchor_match: AnchorMatch,
    pub window_policy: WindowPolicy,
    pub score_comparison: ScoreComparison,
}

impl Default for ScanConfig {
    fn default() -> Self {
        ScanConfig {
            anchor_match: AnchorMatch::default(),
            window_policy: WindowPolicy::default(),
            score_comparison: ScoreComparison::default(),
        }
    }
}

/// Rows produced by a scan: every scored row, and the divergent subset
#[derive(Debug, Default)]
pub struct ScanOutput {
    pub scored: Vec<ProjectionRow>,
    pub divergent: Vec<ProjectionRow>,
    pub skipped_candidates: usize,
}

/// Project and score all candidates, in input order.
///
/// Candidates are processed in parallel on the current rayon pool; a
/// candidate whose anchor cannot be resolved is logged and skipped.
pub fn score_candidates(
    alignment: &Alignment,
    candidates: &[Candidate],
    config: &ScanConfig,
) -> (Vec<ProjectionRow>, usize) {
    let projector = SeedProjector::new(alignment)
        .with_anchor_match(config.anchor_match)
        .with_window_policy(config.window_policy);

    let per_candidate: Vec<Option<Vec<ProjectionRow>>> = candidates
        .par_iter()
        .map(|candidate| match projector.project_scored(candidate) {
            Ok(rows) => Some(rows),
            Err(e) => {
                warn!("Skipping {} ({}): {}", candidate.sequence, candidate.mirna, e);
                None
            }
        })
        .collect();

    let skipped = per_candidate.iter().filter(|r| r.is_none()).count();
    let rows = per_candidate.into_iter().flatten().flatten().collect();
    (rows, skipped)
}

/// Full scan: score, then keep rows that are not their group's best match
pub fn scan(alignment: &Alignment, candidates: &[Candidate], config: &ScanConfig) -> ScanOutput {
    let (scored, skipped_candidates) = score_candidates(alignment, candidates, config);
    let divergent = DivergenceFilter::new(config.score_comparison).filter(scored.clone());

    info!(
        "Scanned {} candidates against {} records: {} skipped, {} scored rows, {} divergent",
        candidates.len(),
        alignment.len(),
        skipped_candidates,
        scored.len(),
        divergent.len()
    );

    ScanOutput {
        scored,
        divergent,
        skipped_candidates,
    }
}
