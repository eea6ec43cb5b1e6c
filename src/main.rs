use anyhow::Result;
use clap::{Parser, ValueEnum};
use log::info;
use std::fs::File;
use std::io::{self, BufWriter, Write};

use seedshift::candidate::read_candidates_file;
use seedshift::msa_io::{read_alignment, AlignmentFormat};
use seedshift::table::{read_projection_table, write_projection_table};
use seedshift::{scan, AnchorMatch, DivergenceFilter, ScanConfig, ScoreComparison, WindowPolicy};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum FormatArg {
    Auto,
    Clustal,
    Fasta,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum AnchorMatchArg {
    /// Record id before the delimiter must equal the fragment, uniquely
    Exact,
    /// First record whose id contains the fragment
    Substring,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum WindowArg {
    Truncate,
    Reject,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum CompareArg {
    ElementWise,
    Serialized,
}

/// seedshift - locate predicted miRNA seed sites across an alignment
///
/// Projects each candidate's seed windows from its anchor record onto every
/// other aligned record, scores the matches, and reports the variants whose
/// seed match is not the best in their group.
#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// Multiple sequence alignment (Clustal or aligned FASTA, optionally gzipped)
    #[clap(short = 'a', long = "alignment", required_unless_present = "scores")]
    alignment: Option<String>,

    /// Seed prediction table (CSV with sequence, mirna, seeds_location, seeds)
    #[clap(short = 'c', long = "candidates", required_unless_present = "scores")]
    candidates: Option<String>,

    /// Re-filter an existing score table instead of scanning
    #[clap(long = "scores", conflicts_with_all = ["alignment", "candidates", "all_scores"])]
    scores: Option<String>,

    /// Alignment format
    #[clap(long = "format", value_enum, default_value = "auto")]
    format: FormatArg,

    /// Output table of divergent rows (stdout if not specified)
    #[clap(short = 'o', long = "output")]
    output: Option<String>,

    /// Also write every scored row, before filtering
    #[clap(long = "all-scores")]
    all_scores: Option<String>,

    /// How candidate identifiers select their anchor record
    #[clap(long = "anchor-match", value_enum, default_value = "exact")]
    anchor_match: AnchorMatchArg,

    /// Delimiter ending the identifier fragment
    #[clap(short = 'd', long = "delimiter", default_value = ".")]
    delimiter: char,

    /// Seed windows running past the alignment end
    #[clap(long = "window", value_enum, default_value = "truncate")]
    window: WindowArg,

    /// Score comparison against the group maximum
    #[clap(long = "compare", value_enum, default_value = "element-wise")]
    compare: CompareArg,

    /// Number of threads for parallel processing
    #[clap(short = 't', long = "threads", default_value = "8")]
    threads: usize,

    /// Quiet mode (warnings and errors only)
    #[clap(long = "quiet")]
    quiet: bool,
}

impl Args {
    fn scan_config(&self) -> ScanConfig {
        ScanConfig {
            anchor_match: match self.anchor_match {
                AnchorMatchArg::Exact => AnchorMatch::Exact {
                    delimiter: self.delimiter,
                },
                AnchorMatchArg::Substring => AnchorMatch::Substring {
                    delimiter: self.delimiter,
                },
            },
            window_policy: match self.window {
                WindowArg::Truncate => WindowPolicy::Truncate,
                WindowArg::Reject => WindowPolicy::Reject,
            },
            score_comparison: match self.compare {
                CompareArg::ElementWise => ScoreComparison::ElementWise,
                CompareArg::Serialized => ScoreComparison::Serialized,
            },
        }
    }

    fn alignment_format(&self) -> Option<AlignmentFormat> {
        match self.format {
            FormatArg::Auto => None,
            FormatArg::Clustal => Some(AlignmentFormat::Clustal),
            FormatArg::Fasta => Some(AlignmentFormat::Fasta),
        }
    }
}

fn open_output(path: Option<&str>) -> Result<Box<dyn Write>> {
    Ok(match path {
        Some(path) => Box::new(BufWriter::new(File::create(path)?)),
        None => Box::new(BufWriter::new(io::stdout())),
    })
}

fn main() -> Result<()> {
    let args = Args::parse();

    let default_level = if args.quiet { "warn" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .init();

    rayon::ThreadPoolBuilder::new()
        .num_threads(args.threads)
        .build_global()?;

    let config = args.scan_config();

    // Re-filter mode: the score table already holds every scored row
    if let Some(ref scores) = args.scores {
        let rows = read_projection_table(seedshift::msa_io::open_input(scores)?)?;
        let total = rows.len();
        let divergent = DivergenceFilter::new(config.score_comparison).filter(rows);
        info!("Re-filtered {} rows from {}: {} divergent", total, scores, divergent.len());
        return write_projection_table(&divergent, open_output(args.output.as_deref())?);
    }

    let (Some(alignment_path), Some(candidates_path)) = (&args.alignment, &args.candidates) else {
        anyhow::bail!("Both --alignment and --candidates are required unless --scores is given");
    };

    let alignment = read_alignment(alignment_path, args.alignment_format())?;
    info!(
        "Loaded {} aligned records of width {} from {}",
        alignment.len(),
        alignment.width(),
        alignment_path
    );

    let table = read_candidates_file(candidates_path)?;
    info!(
        "Loaded {} candidates from {} ({} malformed rows skipped)",
        table.candidates.len(),
        candidates_path,
        table.skipped
    );

    let output = scan(&alignment, &table.candidates, &config);

    if let Some(ref path) = args.all_scores {
        write_projection_table(&output.scored, open_output(Some(path))?)?;
    }
    write_projection_table(&output.divergent, open_output(args.output.as_deref())?)?;

    Ok(())
}
