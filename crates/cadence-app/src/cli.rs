//! Command-line argument definitions.

use std::path::PathBuf;

use cadence_core::types::CohortId;
use chrono::{DateTime, Utc};
use clap::{Args, Parser, Subcommand};

/// Compile cohort session schedules and expand the current week.
#[derive(Parser, Debug)]
#[command(name = "cadence", version, about = "Recurring session scheduler")]
#[command(arg_required_else_help = true)]
pub struct Cli {
    /// Record store file (overrides `store.path` from configuration).
    #[arg(long, global = true)]
    pub store: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Compile a weekday schedule file and replace the cohort's records.
    Compile(CompileArgs),

    /// Print the cohort's sessions for the week containing `--now`.
    Week(WeekArgs),

    /// Print the cohort's stored recurrence records.
    Records(CohortArgs),
}

#[derive(Args, Debug)]
pub struct CohortArgs {
    /// Cohort identifier (UUID).
    #[arg(long)]
    pub cohort: CohortId,
}

#[derive(Args, Debug)]
pub struct CompileArgs {
    #[command(flatten)]
    pub cohort: CohortArgs,

    /// JSON file with `startDate`, `endDate` and weekday `schedules`.
    #[arg(long)]
    pub input: PathBuf,
}

#[derive(Args, Debug)]
pub struct WeekArgs {
    #[command(flatten)]
    pub cohort: CohortArgs,

    /// Reference instant as RFC 3339; defaults to the current time.
    #[arg(long)]
    pub now: Option<DateTime<Utc>>,
}
