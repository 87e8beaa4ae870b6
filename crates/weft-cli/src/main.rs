//! weft CLI — constraint inspection, relaxation and validation.

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "weft")]
#[command(version, about = "weft — position-based cloth constraint engine")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a flat quad-grid sheet as a mesh JSON file.
    Generate {
        /// Quads along X.
        #[arg(long, default_value_t = 10)]
        cols: usize,
        /// Quads along Y.
        #[arg(long, default_value_t = 10)]
        rows: usize,
        /// Sheet width.
        #[arg(long, default_value_t = 1.0)]
        width: f32,
        /// Sheet height.
        #[arg(long, default_value_t = 1.0)]
        height: f32,
        /// Output mesh path.
        #[arg(short, long, default_value = "sheet.json")]
        output: String,
    },

    /// Report topology, pins and constraints of a mesh JSON file.
    Inspect {
        /// Path to mesh (JSON).
        path: String,
        /// Height tolerance for top-row pins.
        #[arg(long, default_value_t = weft_types::constants::DEFAULT_TOP_ROW_TOLERANCE)]
        tolerance: f32,
    },

    /// Relax the tentative buffer of a relax input file.
    Relax {
        /// Path to relax input (JSON).
        input: String,
        /// Optional config (TOML); overrides the input's own config.
        #[arg(short, long)]
        config: Option<String>,
        /// Output path for corrected positions (JSON). Prints a summary only if omitted.
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Validate a config (.toml) or a mesh / relax input (.json).
    Validate {
        /// Path to file.
        path: String,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Generate {
            cols,
            rows,
            width,
            height,
            output,
        } => commands::generate(cols, rows, width, height, &output),
        Commands::Inspect { path, tolerance } => commands::inspect(&path, tolerance),
        Commands::Relax {
            input,
            config,
            output,
        } => commands::relax(&input, config.as_deref(), output.as_deref()),
        Commands::Validate { path } => commands::validate(&path),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
