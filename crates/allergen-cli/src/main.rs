mod commands;
mod reader;

use std::path::PathBuf;
use std::process;

use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

/// Exit status when at least one product is flagged.
const EXIT_FLAGGED: i32 = 2;

#[derive(Parser)]
#[command(
    name = "allergen",
    version,
    about = "Allergen checker — match product allergen tags against your allergen preferences"
)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace). RUST_LOG takes precedence.
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Match allergen tags (e.g. en:milk) against preferences
    Match {
        /// Allergen tags as reported by the product database
        tags: Vec<String>,

        #[command(flatten)]
        settings: MatchSettings,
    },

    /// Check product lookup responses (file or directory of .json) against preferences
    Check {
        /// Input path (file or directory, defaults to current directory)
        #[arg(default_value = ".")]
        path: PathBuf,

        #[command(flatten)]
        settings: MatchSettings,
    },

    /// List the allergen catalog
    Catalog {
        /// Output format: human (default) or json
        #[arg(long, default_value = "human")]
        format: String,
    },

    /// Lint the catalog, or a preference file, for consistency issues
    Lint {
        /// Preference file (JSON or YAML). Lints the catalog alone when omitted
        #[arg(long)]
        prefs: Option<PathBuf>,

        /// Output format: human (default), json or sarif
        #[arg(long, default_value = "human")]
        format: String,
    },
}

#[derive(Args)]
pub struct MatchSettings {
    /// Preference file (JSON or YAML)
    #[arg(long)]
    pub prefs: Option<PathBuf>,

    /// Enable an allergen key in addition to the preference file (repeatable)
    #[arg(short, long = "allergen")]
    pub allergens: Vec<String>,

    /// Display name source: generated or catalog
    #[arg(long)]
    pub display_names: Option<String>,

    /// Show which tag matched which allergen
    #[arg(long)]
    pub explain: bool,

    /// Output format: human (default) or json
    #[arg(long, default_value = "human")]
    pub format: String,
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Match { tags, settings } => {
            match commands::check::run_match(&tags, &settings) {
                Ok((output, flagged)) => {
                    println!("{output}");
                    if flagged > 0 {
                        process::exit(EXIT_FLAGGED);
                    }
                }
                Err(e) => {
                    eprintln!("Error: {e}");
                    process::exit(1);
                }
            }
        }
        Commands::Check { path, settings } => {
            match commands::check::run_check(&path, &settings) {
                Ok((output, flagged)) => {
                    println!("{output}");
                    if flagged > 0 {
                        process::exit(EXIT_FLAGGED);
                    }
                }
                Err(e) => {
                    eprintln!("Error: {e}");
                    process::exit(1);
                }
            }
        }
        Commands::Catalog { format } => match commands::catalog::run_catalog(&format) {
            Ok(output) => {
                println!("{output}");
            }
            Err(e) => {
                eprintln!("Error: {e}");
                process::exit(1);
            }
        },
        Commands::Lint { prefs, format } => {
            match commands::lint::run_lint(prefs.as_deref(), &format) {
                Ok(output) => {
                    println!("{output}");
                }
                Err(e) => {
                    eprintln!("Error: {e}");
                    process::exit(1);
                }
            }
        }
    }
}

fn init_tracing(verbose: u8) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let level = match verbose {
            0 => "warn",
            1 => "debug",
            _ => "trace",
        };
        EnvFilter::new(level)
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
