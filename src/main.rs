mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use log::{debug, info, warn};
use std::fs::File;
use std::io::Write;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use seqsift::assembly::{AssemblyConfig, Deadline, GreedyAssembler, Never, OverlapGraphBuilder};
use seqsift::io::{read_genome, read_reads, seconds, write_report, OutputFormat, Report};
use seqsift::matching::{find_matches, min_edit_distance, MatchConfig, MatchMode, SlicePolicy};
use seqsift::SeqError;

use crate::cli::{AssembleCommand, Cli, Commands, InputPair, MatchCommand, ReadsCommand};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    let mut builder = env_logger::Builder::from_default_env();
    if let Some(log_file) = &cli.log_file {
        let file = File::create(log_file)?;
        builder.target(env_logger::Target::Pipe(Box::new(file)));
    }
    if cli.verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.init();

    // Set up parallel processing
    if let Some(threads) = cli.threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()
            .context("Failed to initialize thread pool")?;
    }

    let format: OutputFormat = cli.format.into();
    let (report, detailed) = match cli.command {
        Commands::Match(cmd) => (handle_match_command(cmd)?, false),
        Commands::EditDistance(cmd) => (handle_edit_distance_command(cmd)?, false),
        Commands::Overlap(cmd) => {
            let detailed = cmd.detailed;
            (handle_overlap_command(cmd)?, detailed)
        }
        Commands::Assemble(cmd) => (handle_assemble_command(cmd)?, false),
    };

    output_report(&report, format, detailed, cli.output)
}

fn load_inputs(inputs: &InputPair) -> Result<(bytes::Bytes, bytes::Bytes)> {
    let reference = read_genome(&inputs.reference).with_context(|| {
        format!(
            "Reference file {} could not be read",
            inputs.reference.display()
        )
    })?;
    let sample = read_genome(&inputs.sample)
        .with_context(|| format!("Sample file {} could not be read", inputs.sample.display()))?;
    debug!(
        "Reference has {} symbols, sample has {}",
        reference.len(),
        sample.len()
    );
    Ok((reference, sample))
}

fn handle_match_command(cmd: MatchCommand) -> Result<Report> {
    let mode: MatchMode = cmd.mode.into();
    if mode == MatchMode::Pigeonhole && cmd.kmer_size == 0 {
        return Err(SeqError::Configuration(
            "pigeonhole matching requires a k-mer size > 0".to_string(),
        )
        .into());
    }
    if mode != MatchMode::Pigeonhole && (cmd.interval > 0 || cmd.lossy) {
        warn!("--interval and --lossy only apply to pigeonhole matching, ignoring");
    }

    let config = MatchConfig::new(cmd.kmer_size, cmd.mismatches)
        .with_interval(cmd.interval)
        .with_policy(if cmd.lossy {
            SlicePolicy::Lossy
        } else {
            SlicePolicy::Strict
        });
    let (reference, sample) = load_inputs(&cmd.inputs)?;

    info!("Searching with {} matching...", mode);
    let start = Instant::now();
    let report = find_matches(&reference, &sample, mode, &config)?;
    let duration = start.elapsed();
    info!("Found {} matches", report.matches.len());

    Ok(Report::Match {
        mode,
        report,
        duration_secs: seconds(duration),
    })
}

fn handle_edit_distance_command(cmd: InputPair) -> Result<Report> {
    let (reference, sample) = load_inputs(&cmd)?;

    let start = Instant::now();
    let distance = min_edit_distance(&reference, &sample);
    let duration = start.elapsed();

    Ok(Report::EditDistance {
        distance,
        duration_secs: seconds(duration),
    })
}

fn handle_overlap_command(cmd: ReadsCommand) -> Result<Report> {
    let builder = OverlapGraphBuilder::new(AssemblyConfig::new(cmd.kmer_size))?;
    let reads = read_reads(&cmd.reads)?;
    info!("Loaded {} reads", reads.len());

    let start = Instant::now();
    let graph = builder.build(&reads)?;
    let duration = start.elapsed();
    info!(
        "Found {} overlaps from {} source reads",
        graph.edge_count(),
        graph.source_nodes().len()
    );

    Ok(Report::Overlap {
        reads: reads.len(),
        overlaps: graph.edges().collect(),
        sources: graph.source_nodes().len(),
        duration_secs: seconds(duration),
    })
}

fn handle_assemble_command(cmd: AssembleCommand) -> Result<Report> {
    let assembler = GreedyAssembler::new(AssemblyConfig::new(cmd.kmer_size))?;
    let reads = read_reads(&cmd.reads)?;
    info!("Loaded {} reads", reads.len());

    let start = Instant::now();
    let outcome = match cmd.timeout {
        Some(secs) => assembler.assemble_with(&reads, &Deadline::after(Duration::from_secs(secs)))?,
        None => assembler.assemble_with(&reads, &Never)?,
    };
    let duration = start.elapsed();

    Ok(Report::Assembly {
        reads: reads.len(),
        merges: outcome.merges,
        remaining: outcome.reads.len(),
        status: outcome.status,
        sequence: String::from_utf8_lossy(&outcome.sequence).into_owned(),
        duration_secs: seconds(duration),
    })
}

fn output_report(
    report: &Report,
    format: OutputFormat,
    detailed: bool,
    output: Option<PathBuf>,
) -> Result<()> {
    let mut writer: Box<dyn Write> = match output {
        Some(path) => Box::new(
            File::create(&path)
                .with_context(|| format!("Failed to create output file: {}", path.display()))?,
        ),
        None => Box::new(std::io::stdout()),
    };

    write_report(&mut writer, report, format, detailed)?;
    writer.flush()?;
    Ok(())
}
