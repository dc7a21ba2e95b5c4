//! sicscan CLI binary.
//!
//! Screens the EDGAR company directory of a state and SIC code for year-over-year growth.

mod prompt;

use clap::{Args, Parser, Subcommand, ValueEnum};
use indicatif::{ProgressBar, ProgressStyle};
use sicscan::{EdgarScreener, ScreenConfig};
use sicscan_data::edgar::{EdgarClient, EdgarFacts};
use sicscan_data::{Cik, DirectorySource, EdgarConfig, Metric};
use sicscan_growth::{GrowthConfig, GrowthEngine};
use sicscan_output::{
    ExportFormat, Exporter, ScreenSummary, TextReport, render_directory, render_growth_detail,
};
use std::error::Error;
use std::io;
use std::path::{Path, PathBuf};
use std::process;
use std::time::Duration;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "sicscan")]
#[command(about = "sicscan: EDGAR growth screening by state and SIC code", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Screen every company of a state and SIC code for growth
    Screen {
        /// State abbreviation (prompted when omitted)
        #[arg(long)]
        state: Option<String>,

        /// SIC code (prompted when omitted)
        #[arg(long)]
        sic: Option<String>,

        /// List companies without growth data (asked when omitted in interactive mode)
        #[arg(long, num_args = 0..=1, default_missing_value = "true")]
        include_missing: Option<bool>,

        #[command(flatten)]
        growth: GrowthArgs,

        #[command(flatten)]
        output: OutputArgs,

        #[command(flatten)]
        edgar: EdgarArgs,
    },

    /// Show the year-over-year growth of one company
    Growth {
        /// Central Index Key
        #[arg(long)]
        cik: Cik,

        #[command(flatten)]
        growth: GrowthArgs,

        #[command(flatten)]
        output: OutputArgs,

        #[command(flatten)]
        edgar: EdgarArgs,
    },

    /// List the companies of a state and SIC code
    Directory {
        /// State abbreviation
        #[arg(long)]
        state: String,

        /// SIC code
        #[arg(long)]
        sic: String,

        #[command(flatten)]
        output: OutputArgs,

        #[command(flatten)]
        edgar: EdgarArgs,
    },
}

#[derive(Args)]
struct GrowthArgs {
    /// Metric to compute growth on
    #[arg(long, default_value = "revenue")]
    metric: Metric,

    /// Form types counted as annual reports
    #[arg(long = "annual-form", default_value = "10-K")]
    annual_forms: Vec<String>,
}

impl GrowthArgs {
    fn config(&self) -> GrowthConfig {
        GrowthConfig {
            annual_forms: self.annual_forms.clone(),
        }
    }
}

#[derive(Args)]
struct OutputArgs {
    /// Output format
    #[arg(long, value_enum, default_value = "text")]
    format: OutputFormat,

    /// Write output to a file instead of stdout
    #[arg(long)]
    output: Option<PathBuf>,
}

#[derive(Args)]
struct EdgarArgs {
    /// Delay between directory pages in milliseconds
    #[arg(long, default_value = "1000")]
    page_delay_ms: u64,

    /// User-Agent header sent to EDGAR
    #[arg(long)]
    user_agent: Option<String>,
}

impl EdgarArgs {
    fn config(&self) -> EdgarConfig {
        let config =
            EdgarConfig::default().with_page_delay(Duration::from_millis(self.page_delay_ms));
        match &self.user_agent {
            Some(user_agent) => config.with_user_agent(user_agent.as_str()),
            None => config,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// Plain text report
    Text,
    /// Aligned table
    Table,
    /// Pretty-printed JSON
    Json,
    /// Comma-separated values
    Csv,
}

impl OutputFormat {
    const fn export_format(self) -> Option<ExportFormat> {
        match self {
            Self::Text | Self::Table => None,
            Self::Json => Some(ExportFormat::PrettyJson),
            Self::Csv => Some(ExportFormat::Csv),
        }
    }
}

#[tokio::main]
async fn main() {
    init_tracing();

    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

/// Installs the stderr log subscriber, filtered by `RUST_LOG` (default `warn`).
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

async fn run() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Screen {
            state,
            sic,
            include_missing,
            growth,
            output,
            edgar,
        } => screen(state, sic, include_missing, &growth, &output, &edgar).await,
        Commands::Growth {
            cik,
            growth,
            output,
            edgar,
        } => company_growth(cik, &growth, &output, &edgar).await,
        Commands::Directory {
            state,
            sic,
            output,
            edgar,
        } => directory(&state, &sic, &output, &edgar).await,
    }
}

async fn screen(
    state: Option<String>,
    sic: Option<String>,
    include_missing: Option<bool>,
    growth: &GrowthArgs,
    output: &OutputArgs,
    edgar: &EdgarArgs,
) -> Result<(), Box<dyn Error>> {
    let interactive = state.is_none() || sic.is_none();
    let (state, sic, include_missing) = {
        let stdin = io::stdin();
        let mut input = stdin.lock();
        let mut prompt_out = io::stdout();

        let (state, sic) = prompt::directory_query(&mut input, &mut prompt_out, state, sic)?;
        let include_missing = match include_missing {
            Some(include) => include,
            None if interactive => prompt::include_missing(&mut input, &mut prompt_out)?,
            None => false,
        };
        (state, sic, include_missing)
    };

    let config = ScreenConfig {
        metric: growth.metric,
        growth: growth.config(),
    };
    let screener = EdgarScreener::edgar(edgar.config(), config)?;

    eprintln!("Fetching company directory for state {} and SIC {}...", state, sic);
    let pb = progress_bar();
    let result = screener
        .run(&state, &sic, |progress| {
            pb.set_length(progress.total as u64);
            pb.set_position(progress.completed as u64);
            pb.set_message(progress.entry.name.clone());
        })
        .await;
    let mut report = match result {
        Ok(report) => report,
        Err(e) => {
            pb.abandon_with_message("Failed!");
            return Err(e.into());
        }
    };
    pb.finish_with_message(format!(
        "Evaluated {} companies ({} with data)",
        report.companies.len(),
        report.with_data()
    ));

    let content = match output.format {
        OutputFormat::Text => {
            let text = TextReport::new(include_missing).render(&report);
            if report.companies.is_empty() {
                text
            } else {
                format!("{}\n{}", text, ScreenSummary::from_report(&report))
            }
        }
        OutputFormat::Table => TextReport::new(include_missing).to_ascii_table(&report),
        OutputFormat::Json | OutputFormat::Csv => {
            report
                .companies
                .retain(|c| include_missing || c.has_data());
            export(&report, output.format)?
        }
    };

    emit(&content, output.output.as_deref())
}

async fn company_growth(
    cik: Cik,
    growth: &GrowthArgs,
    output: &OutputArgs,
    edgar: &EdgarArgs,
) -> Result<(), Box<dyn Error>> {
    let facts = EdgarFacts::new(EdgarClient::new(edgar.config())?);
    let company = facts.fetch_company_facts(&cik).await?;
    let series = company.resolve(&cik, growth.metric.candidates())?;
    info!(
        %cik,
        concept = series.concept.as_str(),
        observations = series.observations.len(),
        "Metric resolved"
    );

    let summary = GrowthEngine::with_config(growth.config()).compute(&series.observations)?;

    let content = match output.format {
        OutputFormat::Text | OutputFormat::Table => {
            let title = format!(
                "{} (CIK {}): {} [{}]",
                company.entity_name().unwrap_or("Unknown company"),
                cik,
                growth.metric,
                series.concept
            );
            render_growth_detail(&title, &summary)
        }
        OutputFormat::Json | OutputFormat::Csv => export(&summary, output.format)?,
    };

    emit(&content, output.output.as_deref())
}

async fn directory(
    state: &str,
    sic: &str,
    output: &OutputArgs,
    edgar: &EdgarArgs,
) -> Result<(), Box<dyn Error>> {
    let screener = EdgarScreener::edgar(edgar.config(), ScreenConfig::default())?;

    let spinner = ProgressBar::new_spinner();
    spinner.set_message(format!("Fetching company directory for {} / SIC {}", state, sic));
    spinner.enable_steady_tick(Duration::from_millis(100));
    let result = screener.directory_source().list_companies(state, sic).await;
    spinner.finish_and_clear();
    let directory = result?;

    let content = match output.format {
        OutputFormat::Text | OutputFormat::Table => render_directory(&directory),
        OutputFormat::Json | OutputFormat::Csv => export(&directory, output.format)?,
    };

    emit(&content, output.output.as_deref())
}

/// Bar sized once the directory is known; empty until the first company is evaluated.
fn progress_bar() -> ProgressBar {
    let pb = ProgressBar::new(0);
    match ProgressStyle::default_bar()
        .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
    {
        Ok(style) => pb.set_style(style.progress_chars("█▓░")),
        Err(e) => warn!(error = %e, "Invalid progress template"),
    }
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

fn export<T: Exporter>(data: &T, format: OutputFormat) -> Result<String, Box<dyn Error>> {
    let format = format
        .export_format()
        .ok_or("format is not an export format")?;
    Ok(data.export_to_string(format)?)
}

/// Prints `content` or writes it to `path`.
fn emit(content: &str, path: Option<&Path>) -> Result<(), Box<dyn Error>> {
    match path {
        Some(path) => {
            std::fs::write(path, content)?;
            eprintln!("Output written to {}", path.display());
        }
        None => print!("{}", content),
    }
    Ok(())
}
