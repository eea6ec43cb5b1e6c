/// Readers for the multiple sequence alignment artifact
///
/// Supports ClustalW-style block output and aligned FASTA. Both are folded
/// into an ordered id -> gapped sequence map before validation, so record
/// order is the order of first appearance in the file.
use anyhow::{bail, Context, Result};
use flate2::read::MultiGzDecoder;
use indexmap::IndexMap;
use log::debug;
use nom::{
    bytes::complete::{take_till1, take_while1},
    character::complete::{digit1, space0, space1},
    combinator::{all_consuming, opt},
    sequence::{preceded, terminated, tuple},
    IResult,
};
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use crate::alignment::{AlignedRecord, Alignment};

/// Header prefixes accepted for Clustal-style block files
const CLUSTAL_HEADERS: [&str; 3] = ["CLUSTAL", "MUSCLE", "PROBCONS"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlignmentFormat {
    Clustal,
    Fasta,
}

impl AlignmentFormat {
    /// Guess the format from the first non-blank line
    pub fn sniff(text: &str) -> Option<Self> {
        let first = text.lines().find(|l| !l.trim().is_empty())?;
        if first.starts_with('>') {
            Some(AlignmentFormat::Fasta)
        } else if CLUSTAL_HEADERS.iter().any(|h| first.starts_with(h)) {
            Some(AlignmentFormat::Clustal)
        } else {
            None
        }
    }
}

/// Open a file and auto-detect gzip compression, returning a boxed BufRead
pub fn open_input<P: AsRef<Path>>(path: P) -> Result<Box<dyn BufRead>> {
    let path = path.as_ref();
    let file = File::open(path).with_context(|| format!("Cannot open {}", path.display()))?;

    let is_compressed = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext == "gz" || ext == "bgz")
        .unwrap_or(false);

    if is_compressed {
        Ok(Box::new(BufReader::new(MultiGzDecoder::new(file))))
    } else {
        Ok(Box::new(BufReader::new(file)))
    }
}

/// `id  ACGU--AC  [count]`
fn clustal_line(input: &str) -> IResult<&str, (&str, &str)> {
    all_consuming(terminated(
        tuple((
            take_till1(|c: char| c.is_whitespace()),
            preceded(space1, take_while1(|c: char| !c.is_whitespace())),
        )),
        tuple((opt(preceded(space1, digit1)), space0)),
    ))(input)
}

fn push_chunk(rows: &mut IndexMap<String, String>, id: &str, chunk: &str) {
    rows.entry(id.to_string()).or_default().push_str(chunk);
}

fn into_alignment(rows: IndexMap<String, String>) -> Result<Alignment> {
    let records = rows
        .into_iter()
        .map(|(id, seq)| AlignedRecord::new(id, seq))
        .collect();
    Ok(Alignment::new(records)?)
}

/// Parse Clustal block format
pub fn parse_clustal(text: &str) -> Result<Alignment> {
    let mut lines = text.lines().enumerate().skip_while(|(_, l)| l.trim().is_empty());

    match lines.next() {
        Some((_, header)) if CLUSTAL_HEADERS.iter().any(|h| header.starts_with(h)) => {}
        _ => bail!("Missing CLUSTAL header line"),
    }

    let mut rows: IndexMap<String, String> = IndexMap::new();
    for (n, line) in lines {
        // blank separators and conservation lines start with whitespace
        if line.trim().is_empty() || line.starts_with(char::is_whitespace) {
            continue;
        }
        let (_, (id, chunk)) = clustal_line(line.trim_end())
            .map_err(|_| anyhow::anyhow!("Malformed alignment line {}: {}", n + 1, line))?;
        push_chunk(&mut rows, id, chunk);
    }

    debug!("Parsed {} Clustal records", rows.len());
    into_alignment(rows)
}

/// Parse aligned FASTA; the record id is the first header token
pub fn parse_fasta(text: &str) -> Result<Alignment> {
    let mut rows: IndexMap<String, String> = IndexMap::new();
    let mut current: Option<String> = None;

    for (n, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if let Some(header) = line.strip_prefix('>') {
            let id = header
                .split_whitespace()
                .next()
                .ok_or_else(|| anyhow::anyhow!("Empty FASTA header on line {}", n + 1))?;
            if rows.contains_key(id) {
                bail!("Duplicate sequence id '{}' on line {}", id, n + 1);
            }
            rows.insert(id.to_string(), String::new());
            current = Some(id.to_string());
        } else {
            match current {
                Some(ref id) => push_chunk(&mut rows, id, line),
                None => bail!("Sequence data before first FASTA header on line {}", n + 1),
            }
        }
    }

    debug!("Parsed {} FASTA records", rows.len());
    into_alignment(rows)
}

pub fn parse_alignment(text: &str, format: Option<AlignmentFormat>) -> Result<Alignment> {
    let format = match format.or_else(|| AlignmentFormat::sniff(text)) {
        Some(f) => f,
        None => bail!("Cannot detect alignment format (expected CLUSTAL header or FASTA)"),
    };
    match format {
        AlignmentFormat::Clustal => parse_clustal(text),
        AlignmentFormat::Fasta => parse_fasta(text),
    }
}

/// Read an alignment from file (auto-detects gzip compression)
pub fn read_alignment<P: AsRef<Path>>(path: P, format: Option<AlignmentFormat>) -> Result<Alignment> {
    let path = path.as_ref();
    let mut text = String::new();
    open_input(path)?
        .read_to_string(&mut text)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    parse_alignment(&text, format).with_context(|| format!("Invalid alignment {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    const CLUSTAL: &str = "\
CLUSTAL 2.1 multiple sequence alignment


NM_001.2      ----CAGUGC 6
NM_002.1      -AAACAGAGC 9
                  ***  *

NM_001.2      AU 8
NM_002.1      AU 11
              **
";

    #[test]
    fn test_parse_clustal_blocks() {
        let aln = parse_clustal(CLUSTAL).unwrap();
        assert_eq!(aln.len(), 2);
        assert_eq!(aln.width(), 12);
        assert_eq!(aln.records()[0].id, "NM_001.2");
        assert_eq!(aln.records()[0].sequence, "----CAGUGCAU");
        assert_eq!(aln.records()[1].sequence, "-AAACAGAGCAU");
    }

    #[test]
    fn test_parse_clustal_without_counts() {
        let text = "CLUSTAL W\n\nseqA ACG-\nseqB AC-G\n";
        let aln = parse_clustal(text).unwrap();
        assert_eq!(aln.records()[1].sequence, "AC-G");
    }

    #[test]
    fn test_parse_fasta() {
        let text = ">seqA.1 wild type\n----CAGU\nGCAU\n>seqB.1\n-AAACAGA\nGCAU\n";
        let aln = parse_fasta(text).unwrap();
        assert_eq!(aln.len(), 2);
        assert_eq!(aln.records()[0].id, "seqA.1");
        assert_eq!(aln.records()[0].sequence, "----CAGUGCAU");
    }

    #[test]
    fn test_sniff_format() {
        assert_eq!(AlignmentFormat::sniff(CLUSTAL), Some(AlignmentFormat::Clustal));
        assert_eq!(AlignmentFormat::sniff("\n>a\nAC\n"), Some(AlignmentFormat::Fasta));
        assert_eq!(AlignmentFormat::sniff("hello"), None);
        assert!(parse_alignment("hello", None).is_err());
    }

    #[test]
    fn test_ragged_fasta_is_rejected() {
        let text = ">a\nACGU\n>b\nACG\n";
        let err = parse_fasta(text).unwrap_err();
        assert!(err.to_string().contains("expected 4"), "got: {err}");
    }

    #[test]
    fn test_malformed_clustal_line() {
        let text = "CLUSTAL W\n\nseqA\n";
        assert!(parse_clustal(text).is_err());
    }
}
