/// Divergent seed detection over scored projection rows
///
/// Rows are grouped by (full sequence, miRNA). Within each group of two or
/// more rows the group maximum is determined and every row whose scores
/// differ from it is kept. Single-row groups have no peer and are dropped.
use indexmap::IndexMap;
use log::debug;

use crate::projection::ProjectionRow;
use crate::seed_list::format_numbers;

/// How score vectors are compared against the group maximum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScoreComparison {
    /// Maximum taken per seed index; a row diverges when its vector differs
    /// from the vector of per-index maxima.
    #[default]
    ElementWise,
    /// Maximum of the serialized score column (`"[3.0, 2.0]"`) under string
    /// ordering, reproducing output that was written to and reloaded from
    /// a flat table before grouping. Scores serialize as floats there.
    Serialized,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct DivergenceFilter {
    comparison: ScoreComparison,
}

impl DivergenceFilter {
    pub fn new(comparison: ScoreComparison) -> Self {
        DivergenceFilter { comparison }
    }

    /// Group row indices by key in first-seen order
    fn groups(rows: &[ProjectionRow]) -> IndexMap<(&str, &str), Vec<usize>> {
        let mut groups: IndexMap<(&str, &str), Vec<usize>> = IndexMap::new();
        for (i, row) in rows.iter().enumerate() {
            groups.entry(row.group_key()).or_default().push(i);
        }
        groups
    }

    /// Indices (ascending) of rows whose score is not the group maximum
    pub fn divergent_indices(&self, rows: &[ProjectionRow]) -> Vec<usize> {
        let mut keep = vec![false; rows.len()];

        for (key, members) in Self::groups(rows) {
            if members.len() < 2 {
                debug!("Dropping single-row group {:?}", key);
                continue;
            }
            match self.comparison {
                ScoreComparison::ElementWise => {
                    let max = elementwise_max(members.iter().map(|&i| rows[i].scores.as_slice()));
                    for &i in &members {
                        keep[i] = rows[i].scores != max;
                    }
                }
                ScoreComparison::Serialized => {
                    let serialized: Vec<String> = members
                        .iter()
                        .map(|&i| serialize_scores(&rows[i].scores))
                        .collect();
                    if let Some(max) = serialized.iter().max() {
                        for (&i, s) in members.iter().zip(&serialized) {
                            keep[i] = s != max;
                        }
                    }
                }
            }
        }

        keep.iter()
            .enumerate()
            .filter_map(|(i, &k)| k.then_some(i))
            .collect()
    }

    /// Keep divergent rows, in their original order
    pub fn filter(&self, rows: Vec<ProjectionRow>) -> Vec<ProjectionRow> {
        let indices = self.divergent_indices(&rows);
        let mut wanted = indices.into_iter().peekable();
        rows.into_iter()
            .enumerate()
            .filter_map(|(i, row)| {
                if wanted.peek() == Some(&i) {
                    wanted.next();
                    Some(row)
                } else {
                    None
                }
            })
            .collect()
    }
}

/// Score list as the legacy flat table stored it, e.g. `[3.0, 10.0]`
fn serialize_scores(scores: &[u32]) -> String {
    let floats: Vec<String> = scores.iter().map(|s| format!("{s}.0")).collect();
    format_numbers(&floats)
}

/// Per-index maximum over score vectors of possibly different lengths
pub fn elementwise_max<'a, I>(scores: I) -> Vec<u32>
where
    I: IntoIterator<Item = &'a [u32]>,
{
    let mut max: Vec<u32> = Vec::new();
    for row in scores {
        if row.len() > max.len() {
            max.resize(row.len(), 0);
        }
        for (m, &s) in max.iter_mut().zip(row) {
            *m = (*m).max(s);
        }
    }
    max
}
