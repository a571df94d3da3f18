//! Wisp command-line driver.

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "wisp")]
#[command(version, about = "Wisp: mass-spring hair strand simulator")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a scene for a number of frames.
    Simulate {
        /// Scene file (JSON). Uses a single curly hair when omitted.
        #[arg(short, long)]
        scene: Option<String>,

        /// Physical constants override (TOML).
        #[arg(short, long)]
        config: Option<String>,

        /// Frames to simulate.
        #[arg(short, long, default_value_t = 90)]
        frames: u32,

        /// Write the final state snapshot here.
        #[arg(long)]
        snapshot: Option<String>,

        /// Print every telemetry event.
        #[arg(long)]
        verbose: bool,
    },

    /// Run benchmark suite.
    Benchmark {
        /// Which scenario to run (hanging_strand, swinging_strand, zigzag_strand, strand_bundle, all).
        #[arg(short, long, default_value = "all")]
        scenario: String,

        /// Output CSV file path.
        #[arg(short, long)]
        output: Option<String>,

        /// Print metrics as JSON instead of CSV.
        #[arg(long)]
        json: bool,
    },

    /// Inspect a state snapshot file.
    Inspect {
        /// Path to snapshot file.
        path: String,
    },

    /// Validate a scene (.json) or simulation config (.toml).
    Validate {
        /// Path to scene or config file.
        path: String,
    },
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Simulate {
            scene,
            config,
            frames,
            snapshot,
            verbose,
        } => commands::simulate(
            scene.as_deref(),
            config.as_deref(),
            frames,
            snapshot.as_deref(),
            verbose,
        ),
        Commands::Benchmark {
            scenario,
            output,
            json,
        } => commands::benchmark(&scenario, output.as_deref(), json),
        Commands::Inspect { path } => commands::inspect(&path),
        Commands::Validate { path } => commands::validate(&path),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
