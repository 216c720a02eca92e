//! Command-line driver.
//!
//! Parses arguments, loads and analyzes the model, runs the enabled
//! generators, and exits non-zero if any phase reported an error.

use std::path::PathBuf;
use std::process::ExitCode;

use chrono::Utc;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use spec_parser::generate;
use spec_parser::{Config, Model, Reporter};

#[derive(Debug, Parser)]
#[command(
    name = "spec-parser",
    version,
    about = "Generate documentation and ontology artifacts from an SPDX 3 model"
)]
struct Cli {
    /// Directory containing the input specification files
    input_dir: PathBuf,

    /// Directory to write the output files to
    output_dir: Option<PathBuf>,

    /// Print debug output
    #[arg(short, long)]
    debug: bool,

    /// Overwrite existing generated files
    #[arg(short, long)]
    force: bool,

    /// Do not generate anything, only check the input
    #[arg(short = 'n', long)]
    nooutput: bool,

    /// Print no output
    #[arg(short, long)]
    quiet: bool,

    /// Print verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(&cli);

    let Some(cfg) = build_config(&cli) else {
        return ExitCode::FAILURE;
    };

    let mut rep = Reporter::new();

    let model = Model::load(&cfg.input_path, &mut rep);
    if rep.has_errors() {
        tracing::error!(
            errors = rep.error_count(),
            "model did not load cleanly, not generating output"
        );
        return ExitCode::FAILURE;
    }

    generate::gen_all(&model, &cfg, &mut rep);
    if rep.has_errors() {
        tracing::error!(errors = rep.error_count(), "generation failed");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

fn build_config(cli: &Cli) -> Option<Config> {
    let output_dir = match (&cli.output_dir, cli.nooutput) {
        (Some(dir), false) => dir.clone(),
        (Some(dir), true) => {
            tracing::warn!(
                "ignoring output directory {} specified with --nooutput",
                dir.display()
            );
            dir.clone()
        }
        (None, true) => PathBuf::from("."),
        (None, false) => {
            tracing::error!("no output directory specified");
            return None;
        }
    };

    let mut cfg = Config::new(&cli.input_dir, &output_dir, Utc::now());
    cfg.no_output = cli.nooutput;

    if !cli.force && !cfg.no_output {
        for path in [
            &cfg.output_jsondump_path,
            &cfg.output_plantuml_path,
            &cfg.output_rdf_path,
        ] {
            if path.exists() {
                tracing::error!(
                    "destination {} already exists, use --force to overwrite",
                    path.display()
                );
                return None;
            }
        }
    }

    Some(cfg)
}

fn init_tracing(cli: &Cli) {
    let default = if cli.quiet {
        "error"
    } else if cli.debug {
        "debug"
    } else if cli.verbose {
        "info"
    } else {
        "warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
