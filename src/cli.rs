use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about = "k-mer seeded approximate matching and greedy read assembly")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Number of threads to use
    #[arg(short, long, global = true)]
    pub threads: Option<usize>,

    /// Path to log file
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,

    /// Output format
    #[arg(short = 'f', long, value_enum, default_value = "text", global = true)]
    pub format: OutputFormat,

    /// Output file (defaults to stdout)
    #[arg(short, long, global = true)]
    pub output: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Find occurrences of a sample sequence in a reference
    Match(MatchCommand),

    /// Minimum edit distance between a sample and any part of a reference
    EditDistance(InputPair),

    /// Find overlapping reads
    Overlap(ReadsCommand),

    /// Greedily assemble reads into a superstring
    Assemble(AssembleCommand),
}

#[derive(Args, Debug)]
pub struct InputPair {
    /// Reference genome (FASTA/FASTQ)
    #[arg(short, long, default_value = "ref.fasta")]
    pub reference: PathBuf,

    /// Sample sequence searched for in the reference (FASTA/FASTQ)
    #[arg(short, long, default_value = "sample.fasta")]
    pub sample: PathBuf,
}

#[derive(Args, Debug)]
pub struct MatchCommand {
    #[command(flatten)]
    pub inputs: InputPair,

    /// Matching algorithm
    #[arg(long, value_enum, default_value = "naive")]
    pub mode: MatchMode,

    /// Maximum number of mismatches allowed
    #[arg(short, long, default_value = "0")]
    pub mismatches: usize,

    /// k-mer size for pigeonhole seeding
    #[arg(short, long, default_value = "0")]
    pub kmer_size: usize,

    /// Interval for strided subsequence seeds (0 = contiguous k-mers)
    #[arg(short, long, default_value = "0")]
    pub interval: usize,

    /// Allow fewer seeds than mismatches + 1 (matches may be missed)
    #[arg(long)]
    pub lossy: bool,
}

#[derive(Args, Debug)]
pub struct ReadsCommand {
    /// Reads in FASTQ format
    #[arg(required = true)]
    pub reads: PathBuf,

    /// k-mer size, also the minimum overlap length
    #[arg(short, long)]
    pub kmer_size: usize,

    /// List every overlap
    #[arg(long)]
    pub detailed: bool,
}

#[derive(Args, Debug)]
pub struct AssembleCommand {
    /// Reads in FASTQ format
    #[arg(required = true)]
    pub reads: PathBuf,

    /// k-mer size, also the minimum overlap length
    #[arg(short, long)]
    pub kmer_size: usize,

    /// Stop contracting after this many seconds and report the partial assembly
    #[arg(long)]
    pub timeout: Option<u64>,
}

#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum, Debug)]
pub enum MatchMode {
    Naive,
    ReverseComplement,
    Exact,
    Pigeonhole,
}

#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum, Debug)]
pub enum OutputFormat {
    Text,
    Json,
    Tsv,
}

impl From<MatchMode> for seqsift::matching::MatchMode {
    fn from(mode: MatchMode) -> Self {
        match mode {
            MatchMode::Naive => Self::Naive,
            MatchMode::ReverseComplement => Self::ReverseComplement,
            MatchMode::Exact => Self::Exact,
            MatchMode::Pigeonhole => Self::Pigeonhole,
        }
    }
}

impl From<OutputFormat> for seqsift::io::OutputFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Text => Self::Text,
            OutputFormat::Json => Self::Json,
            OutputFormat::Tsv => Self::Tsv,
        }
    }
}
