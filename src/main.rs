//! Claims Analytics CLI
//!
//! Command-line interface for running the report catalog over a CSV snapshot

use anyhow::{bail, Context};
use chrono::NaiveDate;
use claims_analytics::config::{DEFAULT_TOP_N, DEFAULT_WINDOW_DAYS};
use claims_analytics::dataset::loader::DEFAULT_DATA_PATH;
use claims_analytics::{
    write_report, AnalysisConfig, Dataset, OutputFormat, ReportKind, ReportRunner,
};
use clap::{Parser, Subcommand};
use log::{info, warn};
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

#[derive(Debug, Parser)]
#[command(
    name = "claims_analytics",
    version,
    about = "Run analytic reports over a policy and claims snapshot"
)]
struct Cli {
    /// Directory containing policyholders.csv, policies.csv and claims.csv
    #[arg(long, global = true, default_value = DEFAULT_DATA_PATH)]
    data_dir: PathBuf,

    /// Reference date for ages and time windows (YYYY-MM-DD, default: today)
    #[arg(long, global = true)]
    as_of: Option<NaiveDate>,

    /// Length of the recent-claims window in days
    #[arg(long, global = true, default_value_t = DEFAULT_WINDOW_DAYS)]
    window_days: u32,

    /// Number of policyholders in the approved-amount ranking
    #[arg(long, global = true, default_value_t = DEFAULT_TOP_N)]
    top_n: usize,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List the report catalog
    List,

    /// Check the snapshot for invalid records and dangling references
    Validate,

    /// Run reports and print the results
    Run {
        /// Report numbers or names; all reports when omitted
        reports: Vec<ReportKind>,

        /// Output format: table, csv or json
        #[arg(long, short, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },

    /// Write every report to its own CSV file
    Export {
        /// Destination directory (created if missing)
        #[arg(long)]
        out_dir: PathBuf,
    },
}

impl Cli {
    fn analysis_config(&self) -> AnalysisConfig {
        let base = match self.as_of {
            Some(as_of) => AnalysisConfig::new(as_of),
            None => AnalysisConfig::default(),
        };
        AnalysisConfig {
            window_days: self.window_days,
            top_n: self.top_n,
            ..base
        }
    }

    fn load_runner(&self) -> anyhow::Result<ReportRunner> {
        let config = self.analysis_config();
        info!(
            "As-of {} with a {}-day window (from {})",
            config.as_of,
            config.window_days,
            config.window_start()
        );

        ReportRunner::from_dir(&self.data_dir, config)
            .with_context(|| format!("failed to load dataset from {}", self.data_dir.display()))
    }
}

/// Log bad records and dangling references; reports still run over the rest
fn warn_on_findings(dataset: &Dataset) {
    for err in dataset.invalid_records() {
        warn!("Invalid record: {}", err);
    }
    dataset.integrity_issues();
}

fn validate(runner: &ReportRunner) -> anyhow::Result<()> {
    let dataset = runner.dataset();
    println!(
        "{} policyholders, {} policies, {} claims",
        dataset.policyholders().len(),
        dataset.policies().len(),
        dataset.claims().len()
    );

    let skipped = dataset.skipped_rows();
    for row in skipped {
        println!("  skipped {}", row);
    }

    let invalid = dataset.invalid_records();
    for err in &invalid {
        println!("  {}", err);
    }

    let issues = dataset.integrity_issues();
    if issues.is_empty() {
        println!("No referential integrity issues");
    } else {
        println!("{} referential integrity issue(s):", issues.len());
        for issue in &issues {
            println!("  {}", issue);
        }
    }

    if !skipped.is_empty() || !invalid.is_empty() {
        bail!(
            "dataset failed validation: {} unreadable row(s), {} invalid record(s)",
            skipped.len(),
            invalid.len()
        );
    }
    Ok(())
}

fn run(
    runner: &ReportRunner,
    reports: &[ReportKind],
    format: OutputFormat,
) -> anyhow::Result<()> {
    let kinds: &[ReportKind] = if reports.is_empty() { &ReportKind::ALL } else { reports };
    let outputs = runner.run_many(kinds)?;

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    for (i, output) in outputs.iter().enumerate() {
        if i > 0 && format != OutputFormat::Json {
            writeln!(out)?;
        }
        write_report(output, format, &mut out)?;
    }
    out.flush()?;
    Ok(())
}

fn export(runner: &ReportRunner, out_dir: &Path) -> anyhow::Result<()> {
    if out_dir.exists() && !out_dir.is_dir() {
        bail!("{} exists and is not a directory", out_dir.display());
    }
    fs::create_dir_all(out_dir)
        .with_context(|| format!("failed to create {}", out_dir.display()))?;

    for output in runner.run_all()? {
        let kind = output.kind();
        let path = out_dir.join(format!("{:02}_{}.csv", kind.number(), kind.slug()));
        let file = File::create(&path)
            .with_context(|| format!("failed to create {}", path.display()))?;
        write_report(&output, OutputFormat::Csv, BufWriter::new(file))?;
        println!("Report {} written to {}", kind.number(), path.display());
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    match &cli.command {
        Command::List => {
            for kind in ReportKind::ALL {
                println!("{:>2}  {:<28} {}", kind.number(), kind.slug(), kind.title());
            }
            Ok(())
        }
        Command::Validate => validate(&cli.load_runner()?),
        Command::Run { reports, format } => {
            let runner = cli.load_runner()?;
            warn_on_findings(runner.dataset());
            run(&runner, reports, *format)
        }
        Command::Export { out_dir } => {
            let runner = cli.load_runner()?;
            warn_on_findings(runner.dataset());
            export(&runner, out_dir)
        }
    }
}
