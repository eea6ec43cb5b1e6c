/// Seed prediction candidates and the CSV table they arrive in
use anyhow::{Context, Result};
use log::warn;
use serde::Deserialize;
use std::io::Read;
use std::path::Path;

use crate::error::SeedError;
use crate::seed_list::{parse_positions, parse_seeds};

/// One predicted target with its seed sites on the anchor's own sequence
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    /// Full sequence identifier, e.g. `NM_000123.4`
    pub sequence: String,
    pub mirna: String,
    /// 1-based ungapped seed starts
    pub positions: Vec<usize>,
    /// Seed substrings, parallel to `positions`
    pub seeds: Vec<String>,
}

impl Candidate {
    pub fn new(
        sequence: impl Into<String>,
        mirna: impl Into<String>,
        positions: Vec<usize>,
        seeds: Vec<String>,
    ) -> Result<Self, SeedError> {
        let sequence = sequence.into();
        if positions.len() != seeds.len() {
            return Err(SeedError::MalformedCandidate {
                reason: format!(
                    "{} seed positions but {} seed sequences",
                    positions.len(),
                    seeds.len()
                ),
                sequence,
            });
        }
        if positions.contains(&0) {
            return Err(SeedError::MalformedCandidate {
                sequence,
                reason: "seed positions are 1-based, found 0".to_string(),
            });
        }
        Ok(Candidate {
            sequence,
            mirna: mirna.into(),
            positions,
            seeds,
        })
    }

    /// (position, seed length) per seed, in table order
    pub fn seed_spans(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.positions
            .iter()
            .zip(&self.seeds)
            .map(|(&p, s)| (p, s.len()))
    }
}

/// Raw CSV row; extra columns in the prediction table are ignored
#[derive(Debug, Deserialize)]
struct CandidateRow {
    sequence: String,
    mirna: String,
    seeds_location: String,
    seeds: String,
}

impl CandidateRow {
    fn into_candidate(self) -> Result<Candidate, SeedError> {
        let malformed = |e: SeedError| SeedError::MalformedCandidate {
            sequence: self.sequence.clone(),
            reason: e.to_string(),
        };
        let positions = parse_positions(&self.seeds_location).map_err(malformed)?;
        let seeds = parse_seeds(&self.seeds).map_err(malformed)?;
        Candidate::new(self.sequence, self.mirna, positions, seeds)
    }
}

/// Candidates that parsed, plus the count of rows that were skipped
#[derive(Debug, Default)]
pub struct CandidateTable {
    pub candidates: Vec<Candidate>,
    pub skipped: usize,
}

/// Read a candidate table. Rows with unparseable list fields are logged and
/// skipped; a missing column or broken CSV is an error for the whole file.
pub fn read_candidates<R: Read>(reader: R) -> Result<CandidateTable> {
    let mut csv_reader = csv::ReaderBuilder::new().flexible(true).from_reader(reader);
    let mut table = CandidateTable::default();

    for (line, row) in csv_reader.deserialize::<CandidateRow>().enumerate() {
        let row = row.with_context(|| format!("Invalid candidate row {}", line + 1))?;
        match row.into_candidate() {
            Ok(candidate) => table.candidates.push(candidate),
            Err(e) => {
                warn!("Skipping candidate row {}: {}", line + 1, e);
                table.skipped += 1;
            }
        }
    }

    Ok(table)
}

pub fn read_candidates_file<P: AsRef<Path>>(path: P) -> Result<CandidateTable> {
    let path = path.as_ref();
    let input = crate::msa_io::open_input(path)?;
    read_candidates(input).with_context(|| format!("Failed to read candidates from {}", path.display()))
}
