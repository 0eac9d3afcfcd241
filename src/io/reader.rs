use std::ops::ControlFlow;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use bytes::{Bytes, BytesMut};
use log::{debug, info, warn};
use needletail::parse_fastx_file;

use crate::assembly::Read;
use crate::error::SeqError;

/// Represents a FASTA/FASTQ sequence reader that can handle multiple files
pub struct FastxReader {
    files: Vec<PathBuf>,
}

impl FastxReader {
    /// Create a new FastxReader from a list of input files
    pub fn new<P: AsRef<Path>>(files: Vec<P>) -> Self {
        let files = files.into_iter().map(|p| p.as_ref().to_owned()).collect();

        FastxReader { files }
    }

    /// Feed every record (sequence, quality, id) of every file to `callback`
    /// until it breaks
    pub fn process_all<F>(&self, mut callback: F) -> Result<()>
    where
        F: FnMut(&[u8], Option<&[u8]>, &str) -> Result<ControlFlow<()>>,
    {
        for file in &self.files {
            let flow = self
                .process_file(file, &mut callback)
                .with_context(|| format!("Failed to process file: {}", file.display()))?;
            if flow.is_break() {
                break;
            }
        }
        Ok(())
    }

    /// Process a single FASTA/FASTQ file
    fn process_file<F>(&self, path: &Path, callback: &mut F) -> Result<ControlFlow<()>>
    where
        F: FnMut(&[u8], Option<&[u8]>, &str) -> Result<ControlFlow<()>>,
    {
        info!("Processing file: {}", path.display());

        let mut reader = parse_fastx_file(path)
            .map_err(|e| SeqError::Format(e.to_string()))
            .with_context(|| format!("Failed to open file: {}", path.display()))?;

        let mut num_sequences = 0;
        let mut flow = ControlFlow::Continue(());
        while let Some(record) = reader.next() {
            let record = record
                .map_err(|e| SeqError::Format(e.to_string()))
                .context("Failed to parse sequence record")?;

            let sequence = record.seq();
            let id = String::from_utf8_lossy(record.id());
            num_sequences += 1;

            flow = callback(&sequence, record.qual(), &id)?;
            if flow.is_break() {
                break;
            }
        }

        info!("Processed {} sequences from {}", num_sequences, path.display());
        Ok(flow)
    }
}

/// Load a reference or sample as one sequence: header lines are dropped and
/// every record's sequence lines are concatenated.
pub fn read_genome<P: AsRef<Path>>(path: P) -> Result<Bytes> {
    let mut genome = BytesMut::new();
    FastxReader::new(vec![path.as_ref()]).process_all(|sequence, _qual, _id| {
        genome.extend_from_slice(sequence);
        Ok(ControlFlow::Continue(()))
    })?;
    debug!("Loaded {} symbols from {}", genome.len(), path.as_ref().display());
    Ok(genome.freeze())
}

/// Load `(sequence, quality)` pairs, stopping at the first record whose
/// sequence is empty
pub fn read_fastq<P: AsRef<Path>>(path: P) -> Result<Vec<(Bytes, Bytes)>> {
    let mut records = Vec::new();
    FastxReader::new(vec![path.as_ref()]).process_all(|sequence, qual, id| {
        if sequence.is_empty() {
            warn!("Record {} has an empty sequence, ignoring the rest of the file", id);
            return Ok(ControlFlow::Break(()));
        }
        records.push((
            Bytes::copy_from_slice(sequence),
            Bytes::copy_from_slice(qual.unwrap_or_default()),
        ));
        Ok(ControlFlow::Continue(()))
    })?;
    Ok(records)
}

/// Load reads for overlap and assembly, numbered in file order
pub fn read_reads<P: AsRef<Path>>(path: P) -> Result<Vec<Read>> {
    let records = read_fastq(path)?;
    Ok(Read::from_sequences(records.iter().map(|(sequence, _)| sequence)))
}
