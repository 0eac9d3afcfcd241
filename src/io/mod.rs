pub(crate) mod reader;
pub(crate) mod writer;

pub use reader::{read_fastq, read_genome, read_reads, FastxReader};
pub use writer::{seconds, write_report, OutputFormat, Report};
