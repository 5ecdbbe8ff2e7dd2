//! Aggregation of benchmark timing runs into speedup tables
//!
//! Input is a semicolon-separated CSV with a header row and the columns
//! `file;run;program;cpus;seconds;cpu_percent;minor_pagefaults`. Rows for
//! the same graph file are consecutive, and within a file the rows of one
//! program at one CPU count are consecutive. The first run group of every
//! file is the sequential baseline the speedups are measured against.

use csv::StringRecord;
use std::fmt;
use std::fs;
use std::io;
use std::path::Path;
use thiserror::Error;

const COLUMNS: usize = 7;

/// Errors raised while reading benchmark data.
#[derive(Debug, Error)]
pub enum BenchError {
    #[error("Failed to read benchmark file: {0}")]
    Io(#[from] io::Error),

    #[error("Malformed benchmark CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("Benchmark data has no rows after the header")]
    Empty,

    #[error("Line {line} has {found} columns, expected 7")]
    MissingColumns { line: usize, found: usize },

    #[error("Line {line}, column {column}: invalid number '{value}'")]
    InvalidNumber {
        line: usize,
        column: usize,
        value: String,
    },

    #[error("{file} {program} with {cpus} CPUs has {runs} runs, need at least 3 to drop best and worst")]
    NotEnoughRuns {
        file: String,
        program: String,
        cpus: u32,
        runs: usize,
    },
}

/// One timed program run
#[derive(Debug, Clone, PartialEq)]
pub struct BenchRecord {
    pub file: String,
    pub program: String,
    pub cpus: u32,
    pub seconds: f64,
    pub cpu_percent: i64,
    pub minor_pagefaults: i64,
}

/// Trimmed averages for one program at one CPU count on one file
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    pub file: String,
    pub program: String,
    pub cpus: u32,
    pub average_seconds: f64,
    pub average_cpu_percent: f64,
    pub average_minor_pagefaults: f64,
    pub speedup: f64,
    pub efficiency: f64,
}

/// Parse the CSV body, skipping the header row.
pub fn parse_records(input: &str) -> Result<Vec<BenchRecord>, BenchError> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b';')
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(input.as_bytes());

    let mut records = Vec::new();
    for row in reader.records() {
        let row = row?;
        let line = row.position().map_or(0, |p| p.line() as usize);
        if row.len() < COLUMNS {
            return Err(BenchError::MissingColumns {
                line,
                found: row.len(),
            });
        }

        records.push(BenchRecord {
            file: row[0].to_string(),
            program: row[2].to_string(),
            cpus: parse_field(&row, 3, line)?,
            seconds: parse_field(&row, 4, line)?,
            cpu_percent: parse_field(&row, 5, line)?,
            minor_pagefaults: parse_field(&row, 6, line)?,
        });
    }

    if records.is_empty() {
        return Err(BenchError::Empty);
    }
    Ok(records)
}

fn parse_field<T: std::str::FromStr>(
    row: &StringRecord,
    column: usize,
    line: usize,
) -> Result<T, BenchError> {
    row[column].parse().map_err(|_| BenchError::InvalidNumber {
        line,
        column: column + 1,
        value: row[column].to_string(),
    })
}

/// Group records and compute trimmed averages, speedup and efficiency.
pub fn summarize(records: &[BenchRecord]) -> Result<Vec<RunSummary>, BenchError> {
    let mut summaries = Vec::new();

    for file_group in records.chunk_by(|a, b| a.file == b.file) {
        let run_groups: Vec<_> = file_group
            .chunk_by(|a, b| a.program == b.program && a.cpus == b.cpus)
            .collect();
        log::debug!(
            "File {} has {} run groups",
            file_group[0].file,
            run_groups.len()
        );

        let mut sequential_seconds = None;
        for run_group in run_groups {
            let (seconds, cpu_percent, pagefaults) = trimmed_averages(run_group)?;
            let baseline = *sequential_seconds.get_or_insert(seconds);
            let speedup = baseline / seconds;
            let first = &run_group[0];

            summaries.push(RunSummary {
                file: first.file.clone(),
                program: first.program.clone(),
                cpus: first.cpus,
                average_seconds: seconds,
                average_cpu_percent: cpu_percent,
                average_minor_pagefaults: pagefaults,
                speedup,
                efficiency: speedup / f64::from(first.cpus),
            });
        }
    }

    Ok(summaries)
}

/// Average of every run except the fastest and the slowest.
fn trimmed_averages(runs: &[BenchRecord]) -> Result<(f64, f64, f64), BenchError> {
    if runs.len() < 3 {
        let first = &runs[0];
        return Err(BenchError::NotEnoughRuns {
            file: first.file.clone(),
            program: first.program.clone(),
            cpus: first.cpus,
            runs: runs.len(),
        });
    }

    let mut by_time: Vec<&BenchRecord> = runs.iter().collect();
    by_time.sort_by(|a, b| a.seconds.total_cmp(&b.seconds));
    let kept = &by_time[1..by_time.len() - 1];

    let count = kept.len() as f64;
    let seconds = kept.iter().map(|r| r.seconds).sum::<f64>() / count;
    let cpu_percent = kept.iter().map(|r| r.cpu_percent as f64).sum::<f64>() / count;
    let pagefaults = kept.iter().map(|r| r.minor_pagefaults as f64).sum::<f64>() / count;
    Ok((seconds, cpu_percent, pagefaults))
}

/// Parse and summarize a benchmark CSV file.
pub fn aggregate_file(path: impl AsRef<Path>) -> Result<Report, BenchError> {
    let contents = fs::read_to_string(path)?;
    aggregate(&contents)
}

pub fn aggregate(input: &str) -> Result<Report, BenchError> {
    let records = parse_records(input)?;
    Ok(Report(summarize(&records)?))
}

/// Summaries rendered as a semicolon-separated table
#[derive(Debug, Clone, PartialEq)]
pub struct Report(pub Vec<RunSummary>);

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "File;Program;Number of CPUs;Average Time in Seconds;Average CPU Usage in Percentage;Average Minor Pagefaults;(absolute) speedup;(absolute) efficiency"
        )?;
        for s in &self.0 {
            writeln!(
                f,
                "{};{};{};{:.7};{:.7};{:.7};{:.7};{:.7}",
                s.file,
                s.program,
                s.cpus,
                s.average_seconds,
                s.average_cpu_percent,
                s.average_minor_pagefaults,
                s.speedup,
                s.efficiency
            )?;
        }
        Ok(())
    }
}
