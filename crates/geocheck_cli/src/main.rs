mod commands;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "geocheck")]
#[command(version, about = "GeoDataCheck CLI", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a building/address dataset
    Validate {
        /// Path to the dataset (CSV or JSON)
        data: String,

        /// Path to a validation config (YAML, TOML or JSON)
        #[arg(short, long)]
        config: Option<String>,

        /// Comma-separated rule ids to run (e.g. R-ADDR-01,R-EGID-02)
        #[arg(short, long)]
        rules: Option<String>,

        /// Run the rules of a checker preset (see `geocheck checkers`)
        #[arg(long)]
        checker: Option<String>,

        /// Dimension breakdown as NAME=COLUMN, repeatable
        #[arg(short, long = "dimension")]
        dimensions: Vec<String>,

        /// Rule option as KEY=VALUE, repeatable (e.g. coordinate_system=LV95)
        #[arg(short, long = "option")]
        options: Vec<String>,

        /// Output format: text, json
        #[arg(short, long, default_value = "text")]
        format: String,
    },

    /// List the rule catalogue
    Rules {
        /// Only rules of this category (address, coordinates, egid, general, custom)
        #[arg(long)]
        category: Option<String>,

        /// Output format: text, json
        #[arg(short, long, default_value = "text")]
        format: String,
    },

    /// Show the columns of a dataset and the fields detected for them
    Detect {
        /// Path to the dataset (CSV or JSON)
        data: String,

        /// Output format: text, json
        #[arg(short, long, default_value = "text")]
        format: String,
    },

    /// List the checker presets
    Checkers {
        /// Output format: text, json
        #[arg(short, long, default_value = "text")]
        format: String,
    },

    /// Show the BBL layer standard checked by `cad`
    Layers {
        /// Output format: text, json
        #[arg(short, long, default_value = "text")]
        format: String,
    },

    /// Validate a CAD base plan exported as JSON
    Cad {
        /// Path to the drawing JSON
        drawing: String,

        /// Output format: text, json
        #[arg(short, long, default_value = "text")]
        format: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing; RUST_LOG overrides the default level
    let default_level = if cli.verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_level(true)
                .with_writer(std::io::stderr)
                .compact(),
        )
        .with(filter)
        .init();

    // Execute command
    match cli.command {
        Commands::Validate {
            data,
            config,
            rules,
            checker,
            dimensions,
            options,
            format,
        } => commands::validate::execute(
            &data,
            config.as_deref(),
            rules.as_deref(),
            checker.as_deref(),
            &dimensions,
            &options,
            &format,
        ),

        Commands::Rules { category, format } => {
            commands::rules::execute(category.as_deref(), &format)
        }

        Commands::Detect { data, format } => commands::detect::execute(&data, &format),

        Commands::Checkers { format } => commands::checkers::execute(&format),

        Commands::Layers { format } => commands::layers::execute(&format),

        Commands::Cad { drawing, format } => commands::cad::execute(&drawing, &format),
    }
}
