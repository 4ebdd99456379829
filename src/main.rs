use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use descstats::{
    list_numeric_columns, load_file, prepare_column, prepare_manual, report, Analysis, Settings,
};

#[derive(Parser)]
#[command(name = "descstats")]
#[command(about = "Mean, median, mode, variance and standard deviation of a dataset", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Print the analysis as JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    /// JSON settings file (precision, whisker, bins)
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Decimal places in the text report, overrides the settings file
    #[arg(long, global = true)]
    precision: Option<usize>,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze comma-separated numbers, e.g. "1,2,3,4"
    Manual {
        #[arg(value_name = "NUMBERS")]
        numbers: String,
    },
    /// Analyze a numeric column of a CSV or spreadsheet file
    File {
        #[arg(value_name = "PATH")]
        path: PathBuf,

        /// Column to analyze (defaults to the first numeric column)
        #[arg(short, long)]
        column: Option<String>,
    },
    /// List the numeric columns of a CSV or spreadsheet file
    Columns {
        #[arg(value_name = "PATH")]
        path: PathBuf,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut settings = match &cli.config {
        Some(path) => Settings::load(path)
            .with_context(|| format!("Failed to load settings from {}", path.display()))?,
        None => Settings::default(),
    };
    if let Some(precision) = cli.precision {
        settings.precision = precision;
    }

    match cli.command {
        Commands::Manual { numbers } => {
            let analysis = prepare_manual(&numbers, &settings)
                .context("Failed to analyze manual input")?;
            print_analysis(&analysis, &settings, cli.json)?;
        }
        Commands::File { path, column } => {
            let table = load_file(&path)
                .with_context(|| format!("Failed to load {}", path.display()))?;
            let numeric = list_numeric_columns(&table);
            if numeric.is_empty() {
                tracing::warn!("No numeric columns in {:?}", path);
            }
            let column = match column.or_else(|| numeric.first().cloned()) {
                Some(column) => column,
                None => anyhow::bail!("No numeric columns found in {}", path.display()),
            };
            tracing::info!("Analyzing column {:?}", column);
            let analysis = prepare_column(&table, &column, &settings)
                .with_context(|| format!("Failed to analyze column {column:?}"))?;
            print_analysis(&analysis, &settings, cli.json)?;
        }
        Commands::Columns { path } => {
            let table = load_file(&path)
                .with_context(|| format!("Failed to load {}", path.display()))?;
            let numeric = list_numeric_columns(&table);
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&numeric)?);
            } else {
                print!("{}", report::render_columns(&numeric));
            }
        }
    }

    Ok(())
}

fn print_analysis(analysis: &Analysis, settings: &Settings, json: bool) -> Result<()> {
    if json {
        println!("{}", report::render_json(analysis)?);
    } else {
        print!("{}", report::render_text(analysis, settings.precision));
    }
    Ok(())
}
