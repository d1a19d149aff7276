use anyhow::Result;
use clap::{Parser, Subcommand};
use qml_i18n_extract::commands;
use qml_i18n_extract::config::Config;
use qml_i18n_extract::logging::{self, LogLevel};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "qml-i18n-extract")]
#[command(author, version, about = "Extract translatable strings from QML trees into JSON catalogs", long_about = None)]
struct Cli {
    /// Path to configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Only print errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Print debug output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scan the source tree and write the reference and template catalogs
    Extract {
        /// Root directory to scan (overrides config)
        #[arg(short, long)]
        root: Option<String>,

        /// Output directory (overrides config)
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Create a default configuration file
    Init {
        /// Overwrite an existing configuration file
        #[arg(long)]
        force: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    logging::set_level(LogLevel::from_flags(cli.quiet, cli.verbose));

    match cli.command {
        Commands::Extract { root, output } => {
            let config = Config::load_or_default(cli.config.as_ref())?;
            commands::extract::run(&config, root, output)?;
        }
        Commands::Init { force } => {
            commands::init::run(force)?;
        }
    }

    Ok(())
}
