//! admitlens command-line front end.
//!
//! Usage:
//!   admitlens sample --out data/sample.jsonl
//!   admitlens import --csv healthcare_dataset.csv --out data/admissions.jsonl
//!   admitlens duplicates --data data/admissions.jsonl --mode both
//!   admitlens dashboard --data data/admissions.jsonl --year 2023 --gender female
//!
//! `--config` loads an `admitlens.toml`; flags given on the command line win
//! over values from the file.

mod render;

use std::error::Error;
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::Serialize;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use admitlens_contracts::{
    criteria::FilterCriteria,
    duplicate::{CompositeKey, DuplicateReport, ExactKey},
    error::AdmitLensError,
    report::ReportKind,
    run::RunEnvelope,
};
use admitlens_core::{
    keys::{CompositeKeyExtractor, ExactKeyExtractor},
    snapshot,
    traits::DatasetAccessor,
    DuplicateDetector,
};
use admitlens_filter::{build_predicate, settings::DatasetSettings, AnalysisSettings};
use admitlens_report::AggregationEngine;
use admitlens_store::{import_csv_file, sample_admissions, save_jsonl, JsonLinesDataset};

type CliResult<T> = Result<T, Box<dyn Error>>;

// ── CLI definition ────────────────────────────────────────────────────────────

/// Duplicate detection and descriptive statistics over hospital admissions.
#[derive(Parser)]
#[command(name = "admitlens", version, about)]
struct Cli {
    /// TOML settings file; explicit flags override its values.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Find records sharing an identifier or a composite logical key.
    Duplicates(DuplicatesArgs),
    /// Filter the records, then compute dashboard reports.
    Dashboard(DashboardArgs),
    /// Normalize a healthcare CSV export into JSON Lines.
    Import {
        #[arg(long)]
        csv: PathBuf,
        #[arg(long)]
        out: PathBuf,
    },
    /// Write the built-in fictional sample set as JSON Lines.
    Sample {
        #[arg(long)]
        out: PathBuf,
    },
}

#[derive(Args)]
struct DatasetArgs {
    /// JSON Lines snapshot to read.
    #[arg(long)]
    data: Option<PathBuf>,
    /// Collection name shown in output.
    #[arg(long)]
    collection: Option<String>,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ModeArg {
    Exact,
    Composite,
    Both,
}

#[derive(Args)]
struct DuplicatesArgs {
    #[command(flatten)]
    dataset: DatasetArgs,
    /// Maximum number of groups shown per mode.
    #[arg(long)]
    limit: Option<usize>,
    #[arg(long, value_enum, default_value_t = ModeArg::Both)]
    mode: ModeArg,
    /// Print the full report envelope as JSON.
    #[arg(long)]
    json: bool,
}

#[derive(Args)]
struct DashboardArgs {
    #[command(flatten)]
    dataset: DatasetArgs,
    #[arg(long)]
    year: Option<i32>,
    /// 1-12.
    #[arg(long)]
    month: Option<u32>,
    #[arg(long)]
    condition: Option<String>,
    #[arg(long)]
    provider: Option<String>,
    #[arg(long)]
    test_result: Option<String>,
    #[arg(long)]
    blood_type: Option<String>,
    #[arg(long)]
    gender: Option<String>,
    /// Report to compute; repeat for several. Defaults to all.
    #[arg(long = "report")]
    reports: Vec<ReportKind>,
    /// How many conditions the condition report keeps.
    #[arg(long)]
    condition_limit: Option<usize>,
}

impl DashboardArgs {
    fn criteria(&self) -> FilterCriteria {
        FilterCriteria {
            year: self.year,
            month: self.month,
            medical_condition: self.condition.clone(),
            insurance_provider: self.provider.as_deref().map(Into::into),
            test_results: self.test_result.as_deref().map(Into::into),
            blood_type: self.blood_type.clone(),
            gender: self.gender.as_deref().map(Into::into),
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() {
    // Set RUST_LOG=debug for verbose output.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_target(false)
        .compact()
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = load_settings(cli.config.as_deref()).and_then(|settings| match cli.command {
        Command::Duplicates(args) => run_duplicates(&settings, &args),
        Command::Dashboard(args) => run_dashboard(&settings, &args),
        Command::Import { csv, out } => run_import(&csv, &out),
        Command::Sample { out } => run_sample(&out),
    });

    if let Err(e) = result {
        eprintln!("admitlens: {}", e);
        std::process::exit(1);
    }
}

fn load_settings(path: Option<&Path>) -> CliResult<AnalysisSettings> {
    let settings = match path {
        Some(path) => AnalysisSettings::from_file(path)?,
        None => AnalysisSettings::default(),
    };
    debug!(config = ?path, collection = %settings.dataset.collection, "settings loaded");
    Ok(settings)
}

// ── Commands ──────────────────────────────────────────────────────────────────

#[derive(Serialize)]
struct DuplicateOutput {
    #[serde(skip_serializing_if = "Option::is_none")]
    exact: Option<DuplicateReport<ExactKey>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    composite: Option<DuplicateReport<CompositeKey>>,
}

fn run_duplicates(settings: &AnalysisSettings, args: &DuplicatesArgs) -> CliResult<()> {
    let dataset = open_dataset(&settings.dataset, &args.dataset)?;
    let count = dataset.count()?;
    let records = snapshot(&dataset)?;
    let enforced = dataset.unique_identifier_enforced();

    let detector = DuplicateDetector::with_preview_limit(
        args.limit.unwrap_or_else(|| settings.duplicates.preview_limit()),
    );
    let output = DuplicateOutput {
        exact: (args.mode != ModeArg::Composite)
            .then(|| detector.run(&records, &ExactKeyExtractor, enforced)),
        composite: (args.mode != ModeArg::Exact)
            .then(|| detector.run(&records, &CompositeKeyExtractor, enforced)),
    };

    if args.json {
        return print_json(&RunEnvelope::new(dataset.collection(), count, output));
    }

    render::header(dataset.collection(), count);
    if let Some(report) = &output.exact {
        render::duplicate_report("Duplicates by admission_id", report);
    }
    if let Some(report) = &output.composite {
        render::duplicate_report(
            "Duplicates by composite key (name + admission day + hospital + room)",
            report,
        );
    }
    Ok(())
}

fn run_dashboard(settings: &AnalysisSettings, args: &DashboardArgs) -> CliResult<()> {
    let criteria = settings.filters.clone().overlay(args.criteria());
    let predicate = build_predicate(&criteria)?;

    let mut spec = settings.reports.clone();
    if !args.reports.is_empty() {
        spec.kinds = args.reports.clone();
    }
    if let Some(limit) = args.condition_limit {
        spec.condition_limit = limit;
    }

    let dataset = open_dataset(&settings.dataset, &args.dataset)?;
    let count = dataset.count()?;
    let records = snapshot(&dataset)?;
    let dashboard = AggregationEngine::new(spec).aggregate(&records, &predicate);

    print_json(&RunEnvelope::new(dataset.collection(), count, dashboard).with_criteria(criteria))
}

fn run_import(csv: &Path, out: &Path) -> CliResult<()> {
    let summary = import_csv_file(csv, out)?;
    print_json(&summary)
}

fn run_sample(out: &Path) -> CliResult<()> {
    let written = save_jsonl(out, &sample_admissions())?;
    println!("Wrote {} sample admissions to {}", written, out.display());
    Ok(())
}

// ── Helpers ───────────────────────────────────────────────────────────────────

fn open_dataset(settings: &DatasetSettings, args: &DatasetArgs) -> CliResult<JsonLinesDataset> {
    let path = args
        .data
        .clone()
        .or_else(|| settings.path.clone())
        .ok_or_else(|| AdmitLensError::ConfigError {
            reason: "no dataset given: pass --data or set [dataset] path".to_string(),
        })?;
    let collection = args
        .collection
        .clone()
        .unwrap_or_else(|| settings.collection.clone());
    Ok(JsonLinesDataset::new(collection, path))
}

fn print_json<T: Serialize>(value: &T) -> CliResult<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use clap::Parser;

    use admitlens_contracts::{
        criteria::FilterCriteria,
        record::Gender,
        report::ReportKind,
    };

    use crate::{Cli, Command, ModeArg};

    #[test]
    fn test_duplicates_defaults_to_both_modes() {
        let cli = Cli::try_parse_from(["admitlens", "duplicates", "--data", "a.jsonl"]).unwrap();
        match cli.command {
            Command::Duplicates(args) => {
                assert!(args.mode == ModeArg::Both);
                assert_eq!(args.limit, None);
                assert!(!args.json);
            }
            _ => panic!("expected duplicates command"),
        }
    }

    #[test]
    fn test_dashboard_flags_override_settings() {
        let cli = Cli::try_parse_from([
            "admitlens",
            "dashboard",
            "--data",
            "a.jsonl",
            "--gender",
            "female",
            "--report",
            "global-kpis",
            "--report",
            "patients-by-gender",
        ])
        .unwrap();
        let Command::Dashboard(args) = cli.command else {
            panic!("expected dashboard command");
        };

        let from_file = FilterCriteria::new().year(2022).gender("male");
        let merged = from_file.overlay(args.criteria());
        assert_eq!(merged.year, Some(2022));
        assert_eq!(merged.gender, Some(Gender::Female));
        assert_eq!(
            args.reports,
            vec![ReportKind::GlobalKpis, ReportKind::PatientsByGender]
        );
    }

    #[test]
    fn test_unknown_report_kind_is_rejected() {
        let parsed = Cli::try_parse_from(["admitlens", "dashboard", "--report", "nonsense"]);
        assert!(parsed.is_err());
    }

    #[test]
    fn test_config_flag_is_global() {
        let cli =
            Cli::try_parse_from(["admitlens", "sample", "--out", "s.jsonl", "--config", "x.toml"])
                .unwrap();
        assert_eq!(cli.config.as_deref(), Some(std::path::Path::new("x.toml")));
    }
}
