use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, warn};

use serc::config::Config;
use serc::evaluate::{Evaluation, ScoredEntry};
use serc::ingest::MissingColumn;
use serc::output::ScoredOfficial;

const EXIT_SUCCESS: i32 = 0;
const EXIT_INPUT: i32 = 1;
const EXIT_CONFIG: i32 = 2;
const EXIT_UNKNOWN_ID: i32 = 3;

#[derive(Clone, Copy, Debug, Default, ValueEnum)]
enum OutputFormat {
    #[default]
    Table,
    Tsv,
    Json,
}

#[derive(Clone, Copy, Debug, Default, ValueEnum)]
enum ThemeArg {
    #[default]
    Auto,
    Dark,
    Light,
}

impl From<ThemeArg> for serc::tui::Theme {
    fn from(arg: ThemeArg) -> Self {
        match arg {
            ThemeArg::Auto => serc::tui::Theme::Auto,
            ThemeArg::Dark => serc::tui::Theme::Dark,
            ThemeArg::Light => serc::tui::Theme::Light,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Score every official in a data file, highest risk first
    List {
        /// CSV or spreadsheet (.xlsx, .xls, .ods) with one or more rows per official
        file: PathBuf,
        #[arg(long, value_enum, default_value_t)]
        format: OutputFormat,
    },
    /// Show the detailed breakdown for one official
    Score {
        file: PathBuf,
        /// Identifier of the official
        #[arg(long)]
        id: String,
        #[arg(long, value_enum, default_value_t)]
        format: OutputFormat,
    },
    /// Print the unique identifiers in a data file
    Ids { file: PathBuf },
    /// Interactive dashboard
    Dashboard {
        file: PathBuf,
        /// Color palette (auto detects the terminal background)
        #[arg(long, value_enum, default_value_t)]
        theme: ThemeArg,
    },
    /// Write the default configuration file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

#[derive(Parser, Debug)]
#[command(name = "serc")]
#[command(about = "Corruption-risk scoring for public officials", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to config file (defaults to ~/.config/serc/config.yaml)
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    serc::logging::init(cli.verbose);
    let start_time = Instant::now();
    let config_path = cli.config.map(PathBuf::from);

    // init works without an existing config, so it runs before loading one
    if let Commands::Init { force } = cli.command {
        match serc::config::write_default_config(config_path, force) {
            Ok(path) => {
                println!("Wrote default config to {}", path.display());
                std::process::exit(EXIT_SUCCESS);
            }
            Err(e) => {
                eprintln!("Config error: {:#}", e);
                std::process::exit(EXIT_CONFIG);
            }
        }
    }

    let config = match serc::config::load_config(config_path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Config error: {:#}", e);
            std::process::exit(EXIT_CONFIG);
        }
    };

    // Validate config at startup
    if let Err(errors) = serc::config::validate_config(&config) {
        eprintln!("Config errors:");
        for error in errors {
            eprintln!("  - {}", error);
        }
        std::process::exit(EXIT_CONFIG);
    }

    let use_colors = !cli.no_color && serc::output::should_use_colors();
    let bands = config.bands();

    match cli.command {
        Commands::List { file, format } => {
            let evaluation = load_or_exit(&file, &config);
            let scored: Vec<ScoredOfficial> = evaluation.entries.iter().map(as_scored).collect();

            match render(&scored, format, &bands, use_colors) {
                Ok(output) => println!("{}", output),
                Err(e) => {
                    eprintln!("Failed to render output: {:#}", e);
                    std::process::exit(EXIT_INPUT);
                }
            }
            if matches!(format, OutputFormat::Table) && !scored.is_empty() {
                println!();
                println!("{}", serc::output::DISCLAIMER);
            }

            debug!(
                officials = evaluation.entries.len(),
                elapsed = ?start_time.elapsed(),
                "listed"
            );
        }
        Commands::Score { file, id, format } => {
            let evaluation = load_or_exit(&file, &config);
            let Some(entry) = evaluation.find(&id) else {
                eprintln!("ID not found: {}", id.trim());
                std::process::exit(EXIT_UNKNOWN_ID);
            };
            let scored = as_scored(entry);

            let output = match format {
                OutputFormat::Table => Ok(serc::output::format_breakdown(&scored, &bands, use_colors)),
                _ => render(std::slice::from_ref(&scored), format, &bands, use_colors),
            };
            match output {
                Ok(output) => println!("{}", output),
                Err(e) => {
                    eprintln!("Failed to render output: {:#}", e);
                    std::process::exit(EXIT_INPUT);
                }
            }
        }
        Commands::Ids { file } => {
            let evaluation = load_or_exit(&file, &config);
            for id in serc::ingest::unique_ids(&evaluation.records) {
                println!("{}", id);
            }
        }
        Commands::Dashboard { file, theme } => {
            let evaluation = load_or_exit(&file, &config);
            let colors = serc::tui::resolve_theme(theme.into());
            let app = serc::tui::App::new(evaluation, file, config, colors);

            if let Err(e) = serc::tui::run_tui(app).await {
                eprintln!("Dashboard error: {:#}", e);
                std::process::exit(EXIT_INPUT);
            }
        }
        Commands::Init { .. } => unreachable!("handled before config load"),
    }

    std::process::exit(EXIT_SUCCESS);
}

/// Read and score a data file, exiting with an input error on failure.
fn load_or_exit(file: &Path, config: &Config) -> Evaluation {
    match serc::evaluate::load_and_score(file, config) {
        Ok(evaluation) => {
            for warning in &evaluation.warnings {
                warn!("{}", warning);
            }
            evaluation
        }
        Err(e) => {
            if let Some(missing) = e.downcast_ref::<MissingColumn>() {
                eprintln!("Input error: {}", missing);
            } else {
                eprintln!("Input error: {:#}", e);
            }
            std::process::exit(EXIT_INPUT);
        }
    }
}

fn as_scored(entry: &ScoredEntry) -> ScoredOfficial<'_> {
    ScoredOfficial {
        record: &entry.record,
        result: &entry.result,
    }
}

fn render(
    scored: &[ScoredOfficial],
    format: OutputFormat,
    bands: &serc::output::BandConfig,
    use_colors: bool,
) -> anyhow::Result<String> {
    match format {
        OutputFormat::Table => Ok(serc::output::format_scored_table(scored, bands, use_colors)),
        OutputFormat::Tsv => Ok(serc::output::format_tsv(scored, bands)),
        OutputFormat::Json => serc::output::format_json(scored, bands),
    }
}
