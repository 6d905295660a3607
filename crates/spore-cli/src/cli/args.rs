use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "spore",
    version,
    about = "Verify the trace buffers recorded from SPORE tracing nodes"
)]
pub struct Cli {
    #[command(subcommand)]
    pub cmd: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Verify a recorded trace dump against the configured checks
    Verify(VerifyArgs),
    /// Write a `t + tid` fixture dump, optionally with one corrupted slot
    Fixture(FixtureArgs),
    /// Write a sample spore.yaml
    Init(InitArgs),
}

#[derive(clap::ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ReportFormat {
    #[default]
    Console,
    Json,
    Junit,
}

#[derive(clap::Args, Debug, Clone)]
pub struct VerifyArgs {
    /// Trace dump to verify (JSON: {"num_traces": N, "steps": [[...], ...]})
    #[arg(long)]
    pub trace_file: PathBuf,

    /// Check definitions; without it a single test_tracing_node check runs
    #[arg(long, env = "SPORE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Leading time steps to verify (default: the whole dump)
    #[arg(long, conflicts_with = "config")]
    pub time_step: Option<usize>,

    /// Expected number of trace buffers
    #[arg(
        long,
        default_value_t = spore_core::verify::DEFAULT_EXPECTED_TRACES,
        conflicts_with = "config"
    )]
    pub traces: usize,

    /// Accept values within this absolute tolerance instead of exact equality
    #[arg(long, allow_negative_numbers = true, conflicts_with = "config")]
    pub tolerance: Option<f64>,

    #[arg(long, value_enum, default_value_t = ReportFormat::Console)]
    pub format: ReportFormat,

    /// Report destination for json/junit (default: stdout)
    #[arg(long)]
    pub out: Option<PathBuf>,
}

#[derive(clap::Args, Debug, Clone)]
pub struct FixtureArgs {
    #[arg(long)]
    pub out: PathBuf,

    #[arg(long, default_value_t = 5)]
    pub traces: usize,

    #[arg(long, default_value_t = 3)]
    pub steps: usize,

    /// Overwrite one slot, written as T:TID=VALUE (e.g. 2:3=4)
    #[arg(long, value_parser = parse_corruption)]
    pub corrupt: Option<Corruption>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Corruption {
    pub time_index: usize,
    pub trace_id: usize,
    pub value: f64,
}

pub fn parse_corruption(s: &str) -> Result<Corruption, String> {
    let (slot, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected T:TID=VALUE, got '{}'", s))?;
    let (t, tid) = slot
        .split_once(':')
        .ok_or_else(|| format!("expected T:TID before '=', got '{}'", slot))?;
    Ok(Corruption {
        time_index: t
            .trim()
            .parse()
            .map_err(|e| format!("invalid time index '{}': {}", t, e))?,
        trace_id: tid
            .trim()
            .parse()
            .map_err(|e| format!("invalid trace id '{}': {}", tid, e))?,
        value: value
            .trim()
            .parse()
            .map_err(|e| format!("invalid value '{}': {}", value, e))?,
    })
}

#[derive(clap::Args, Debug, Clone)]
pub struct InitArgs {
    #[arg(long, default_value = "spore.yaml")]
    pub out: PathBuf,

    /// Replace an existing file
    #[arg(long)]
    pub force: bool,
}
