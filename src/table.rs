/// Projection table I/O
///
/// Column layout: mirna, sequence, seeds_location, second_id, seqA, seqB, score.
/// List-valued columns use the bracketed form of `seed_list`.
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::io::{Read, Write};

use crate::projection::ProjectionRow;
use crate::seed_list::{format_numbers, format_strings, parse_positions, parse_scores, parse_seeds};

#[derive(Debug, Serialize, Deserialize)]
struct TableRow {
    mirna: String,
    sequence: String,
    seeds_location: String,
    second_id: String,
    #[serde(rename = "seqA")]
    seq_a: String,
    #[serde(rename = "seqB")]
    seq_b: String,
    score: String,
}

impl From<&ProjectionRow> for TableRow {
    fn from(row: &ProjectionRow) -> Self {
        TableRow {
            mirna: row.mirna.clone(),
            sequence: row.sequence.clone(),
            seeds_location: format_numbers(&row.positions),
            second_id: row.other_id.clone(),
            seq_a: format_strings(&row.anchor_seeds),
            seq_b: format_strings(&row.variant_seeds),
            score: format_numbers(&row.scores),
        }
    }
}

impl TryFrom<TableRow> for ProjectionRow {
    type Error = crate::error::SeedError;

    fn try_from(row: TableRow) -> Result<Self, Self::Error> {
        Ok(ProjectionRow {
            positions: parse_positions(&row.seeds_location)?,
            anchor_seeds: parse_seeds(&row.seq_a)?,
            variant_seeds: parse_seeds(&row.seq_b)?,
            scores: parse_scores(&row.score)?,
            mirna: row.mirna,
            sequence: row.sequence,
            other_id: row.second_id,
        })
    }
}

/// Write rows with a header line
pub fn write_projection_table<W: Write>(rows: &[ProjectionRow], writer: W) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for row in rows {
        csv_writer.serialize(TableRow::from(row))?;
    }
    // header is only emitted with the first record
    if rows.is_empty() {
        csv_writer.write_record([
            "mirna",
            "sequence",
            "seeds_location",
            "second_id",
            "seqA",
            "seqB",
            "score",
        ])?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// Read a table written by `write_projection_table`; extra columns such as
/// a leading row index are ignored.
pub fn read_projection_table<R: Read>(reader: R) -> Result<Vec<ProjectionRow>> {
    let mut csv_reader = csv::ReaderBuilder::new().flexible(true).from_reader(reader);
    csv_reader
        .deserialize::<TableRow>()
        .enumerate()
        .map(|(line, row)| {
            let row = row.with_context(|| format!("Invalid score table row {}", line + 1))?;
            ProjectionRow::try_from(row).with_context(|| format!("Invalid score table row {}", line + 1))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample_rows() -> Vec<ProjectionRow> {
        vec![
            ProjectionRow {
                mirna: "hsa-miR-21-5p".to_string(),
                sequence: "NM_001.2".to_string(),
                positions: vec![3, 10],
                other_id: "NM_009.1".to_string(),
                anchor_seeds: vec!["GUG".to_string(), "A-U".to_string()],
                variant_seeds: vec!["GAG".to_string(), "AAU".to_string()],
                scores: vec![2, 2],
            },
            ProjectionRow {
                mirna: "hsa-miR-21-5p".to_string(),
                sequence: "NM_001.2".to_string(),
                positions: vec![],
                other_id: "NM_010.1".to_string(),
                anchor_seeds: vec![],
                variant_seeds: vec![],
                scores: vec![],
            },
        ]
    }

    #[test]
    fn test_write_layout() {
        let mut out = Vec::new();
        write_projection_table(&sample_rows()[..1], &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(
            text,
            "mirna,sequence,seeds_location,second_id,seqA,seqB,score\n\
             hsa-miR-21-5p,NM_001.2,\"[3, 10]\",NM_009.1,\"['GUG', 'A-U']\",\"['GAG', 'AAU']\",\"[2, 2]\"\n"
        );
    }

    #[test]
    fn test_empty_table_has_header() {
        let mut out = Vec::new();
        write_projection_table(&[], &mut out).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "mirna,sequence,seeds_location,second_id,seqA,seqB,score\n"
        );
    }

    #[test]
    fn test_table_reloads() {
        let rows = sample_rows();
        let mut out = Vec::new();
        write_projection_table(&rows, &mut out).unwrap();
        assert_eq!(read_projection_table(out.as_slice()).unwrap(), rows);
    }

    #[test]
    fn test_reads_indexed_legacy_table() {
        let text = "\
Unnamed: 0,mirna,sequence,seeds_location,second_id,seqA,seqB,score
4,miR-7,NM_5.1,[12],NM_6.1,['ACGUACG'],['ACGAACG'],[6.0]
";
        let rows = read_projection_table(text.as_bytes()).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].scores, vec![6]);
        assert_eq!(rows[0].other_id, "NM_6.1");
    }
}
