// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
use clap::{Parser, Subcommand};
use fixmac_cli::commands::{formats, generate, suite, verify};
use fixmac_cli::telemetry;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "fixmac")]
#[command(about = "Bit-exact fixed-point MAC golden-output generator", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate cosim files for the scenarios in a JSON config.
    Generate {
        /// Scenario JSON (one object or an array)
        #[arg(long, short)]
        config: PathBuf,

        /// Output root; each scenario writes into <out>/<name>
        #[arg(long, short)]
        out: PathBuf,

        /// Seed for scenarios that do not set one
        #[arg(long)]
        seed: Option<u64>,

        /// Stop at the first failing scenario
        #[arg(long)]
        fail_fast: bool,
    },
    /// Generate the built-in reference suite.
    Suite {
        #[arg(long, short)]
        out: Option<PathBuf>,

        /// Only this built-in scenario
        #[arg(long)]
        only: Option<String>,

        #[arg(long)]
        seed: Option<u64>,

        #[arg(long)]
        fail_fast: bool,

        /// List the built-in scenarios and exit
        #[arg(long)]
        list: bool,
    },
    /// Regenerate scenarios and compare against a previous output root.
    Verify {
        /// Scenario JSON; the built-in suite when omitted
        #[arg(long, short)]
        config: Option<PathBuf>,

        #[arg(long, short)]
        dir: PathBuf,
    },
    /// Show the exact product and sum formats of two operand formats.
    Formats {
        /// e.g. "(0,4,4)"
        a: String,
        b: String,
    },
}

fn main() -> anyhow::Result<()> {
    telemetry::init_tracing();

    let cli = Cli::parse();

    match cli.command {
        Commands::Generate {
            config,
            out,
            seed,
            fail_fast,
        } => generate::run(&config, &out, seed, fail_fast),
        Commands::Suite {
            out,
            only,
            seed,
            fail_fast,
            list,
        } => {
            if list {
                return suite::list();
            }
            let out = out.unwrap_or_else(|| PathBuf::from("cosim"));
            suite::run(&out, only.as_deref(), seed, fail_fast)
        }
        Commands::Verify { config, dir } => verify::run(config.as_deref(), &dir),
        Commands::Formats { a, b } => formats::run(&a, &b),
    }
}
