use std::io::Write;
use std::time::Duration;

use anyhow::Result;
use serde::Serialize;

use crate::assembly::{AssemblyStatus, OverlapEdge};
use crate::matching::{MatchMode, MatchReport};

/// How diagnostics are rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Tsv,
    Json,
}

/// Diagnostics of one driver run
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Report {
    Match {
        mode: MatchMode,
        #[serde(flatten)]
        report: MatchReport,
        duration_secs: f64,
    },
    EditDistance {
        distance: usize,
        duration_secs: f64,
    },
    Overlap {
        reads: usize,
        overlaps: Vec<OverlapEdge>,
        sources: usize,
        duration_secs: f64,
    },
    Assembly {
        reads: usize,
        merges: usize,
        remaining: usize,
        status: AssemblyStatus,
        sequence: String,
        duration_secs: f64,
    },
}

pub fn seconds(duration: Duration) -> f64 {
    duration.as_secs_f64()
}

fn metrics(report: &Report) -> Vec<(&'static str, String)> {
    match report {
        Report::Match {
            mode,
            report,
            duration_secs,
        } => vec![
            ("mode", mode.to_string()),
            ("matches", format!("{:?}", report.matches)),
            ("total_matches", report.matches.len().to_string()),
            ("alignments", report.alignments.to_string()),
            ("queries", report.queries.to_string()),
            ("char_comparisons", report.comparisons.to_string()),
            ("duration_secs", format!("{:.6}", duration_secs)),
        ],
        Report::EditDistance {
            distance,
            duration_secs,
        } => vec![
            ("edit_distance", distance.to_string()),
            ("duration_secs", format!("{:.6}", duration_secs)),
        ],
        Report::Overlap {
            reads,
            overlaps,
            sources,
            duration_secs,
        } => vec![
            ("reads", reads.to_string()),
            ("overlaps", overlaps.len().to_string()),
            ("sources", sources.to_string()),
            ("duration_secs", format!("{:.6}", duration_secs)),
        ],
        Report::Assembly {
            reads,
            merges,
            remaining,
            status,
            sequence,
            duration_secs,
        } => vec![
            ("reads", reads.to_string()),
            ("merges", merges.to_string()),
            ("remaining_reads", remaining.to_string()),
            ("status", status.to_string()),
            ("assembled_length", sequence.len().to_string()),
            ("assembled", sequence.clone()),
            ("duration_secs", format!("{:.6}", duration_secs)),
        ],
    }
}

/// Render `report`; `detailed` adds the edge list of overlap reports
pub fn write_report<W: Write>(
    writer: &mut W,
    report: &Report,
    format: OutputFormat,
    detailed: bool,
) -> Result<()> {
    match format {
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *writer, report)?;
            writeln!(writer)?;
        }
        OutputFormat::Tsv => {
            writeln!(writer, "metric\tvalue")?;
            for (name, value) in metrics(report) {
                writeln!(writer, "{}\t{}", name, value)?;
            }
        }
        OutputFormat::Text => {
            for (name, value) in metrics(report) {
                writeln!(writer, "{:<20}: {}", name, value)?;
            }
        }
    }

    if let (true, OutputFormat::Text | OutputFormat::Tsv, Report::Overlap { overlaps, .. }) =
        (detailed, format, report)
    {
        writeln!(writer, "\n# Overlaps")?;
        writeln!(writer, "source\ttarget\tlength")?;
        for edge in overlaps {
            writeln!(writer, "{}\t{}\t{}", edge.source, edge.target, edge.length)?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assembly::ReadId;
    use pretty_assertions::assert_eq;

    fn render(report: &Report, format: OutputFormat, detailed: bool) -> String {
        let mut out = Vec::new();
        write_report(&mut out, report, format, detailed).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_match_tsv() {
        let report = Report::Match {
            mode: MatchMode::Pigeonhole,
            report: MatchReport {
                matches: vec![0, 5],
                alignments: 0,
                queries: 4,
                comparisons: 10,
            },
            duration_secs: 0.5,
        };
        let out = render(&report, OutputFormat::Tsv, false);
        assert!(out.starts_with("metric\tvalue\nmode\tpigeonhole\n"));
        assert!(out.contains("matches\t[0, 5]\n"));
        assert!(out.contains("queries\t4\n"));
        assert!(out.contains("duration_secs\t0.500000\n"));
    }

    #[test]
    fn test_match_json() {
        let report = Report::Match {
            mode: MatchMode::Naive,
            report: MatchReport {
                matches: vec![3],
                alignments: 7,
                queries: 0,
                comparisons: 12,
            },
            duration_secs: 0.0,
        };
        let value: serde_json::Value =
            serde_json::from_str(&render(&report, OutputFormat::Json, false)).unwrap();
        assert_eq!(value["kind"], "match");
        assert_eq!(value["mode"], "naive");
        assert_eq!(value["matches"], serde_json::json!([3]));
        assert_eq!(value["alignments"], 7);
    }

    #[test]
    fn test_detailed_overlaps() {
        let report = Report::Overlap {
            reads: 2,
            overlaps: vec![OverlapEdge {
                source: ReadId(0),
                target: ReadId(1),
                length: 4,
            }],
            sources: 1,
            duration_secs: 0.0,
        };
        let out = render(&report, OutputFormat::Text, true);
        assert!(out.contains("overlaps            : 1\n"));
        assert!(out.ends_with("source\ttarget\tlength\nr0\tr1\t4\n"));
    }
}
