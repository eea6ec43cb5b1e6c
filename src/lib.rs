// Library exports for seedshift
pub mod alignment;
pub mod candidate;
pub mod coordinates;
pub mod divergence;
pub mod error;
pub mod msa_io;
pub mod pipeline;
pub mod projection;
pub mod scoring;
pub mod seed_list;
pub mod table;

pub use alignment::{AlignedRecord, Alignment, AnchorMatch};
pub use candidate::Candidate;
pub use divergence::{DivergenceFilter, ScoreComparison};
pub use error::SeedError;
pub use pipeline::{scan, ScanConfig, ScanOutput};
pub use projection::{ProjectionRow, SeedProjector, WindowPolicy};
