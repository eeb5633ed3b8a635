mod config;
mod evaluate;
mod pipeline;
mod report;
mod truth;

use clap::{Parser, Subcommand};
use std::path::Path;
use std::process::ExitCode;

use crate::config::{Config, SiteConfig};
use crate::pipeline::{run_site, PipelineError};

#[derive(Parser)]
#[command(name = "track-accuracy")]
#[command(about = "Positioning accuracy against a walked reference route")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a site configuration file
    Validate { config: String },
    /// Evaluate the recordings of every configured site
    Run {
        config: String,
        /// Only evaluate the site with this name
        #[arg(long)]
        site: Option<String>,
        /// Print the summary as JSON instead of text
        #[arg(long)]
        json: bool,
    },
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Validate { config } => validate(&config),
        Commands::Run { config, site, json } => run(&config, site.as_deref(), json),
    }
}

fn validate(path: &str) -> ExitCode {
    match Config::from_file(Path::new(path)) {
        Ok(config) => {
            println!("Configuration is valid ({} sites)", config.sites.len());
            for site in &config.sites {
                println!(
                    "  {}: {} waypoints, every {} from {}",
                    site.name,
                    site.waypoints.len(),
                    site.frequency,
                    site.input.display()
                );
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Config error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(path: &str, only: Option<&str>, json: bool) -> ExitCode {
    let config = match Config::from_file(Path::new(path)) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Config error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let sites: Vec<&SiteConfig> = match only {
        Some(name) => match config.find_site(name) {
            Some(site) => vec![site],
            None => {
                eprintln!("Unknown site: {}", name);
                return ExitCode::FAILURE;
            }
        },
        None => config.sites.iter().collect(),
    };

    for site in sites {
        if let Err(e) = run_one(site, json) {
            eprintln!("Error evaluating site {}: {}", site.name, e);
            return ExitCode::FAILURE;
        }
    }

    ExitCode::SUCCESS
}

fn run_one(site: &SiteConfig, json: bool) -> Result<(), PipelineError> {
    let evaluation = run_site(site)?;
    log::info!(
        "Scored {} samples of site {} against {} reference points",
        evaluation.errors.len(),
        site.name,
        evaluation.reference_len
    );

    if json {
        report::print_json(&site.name, &evaluation.summary)?;
    } else {
        report::print_summary(&site.title, &evaluation.summary);
    }
    if let Some(chart) = &site.chart {
        report::write_chart(chart, &site.title, &evaluation.summary)?;
    }
    Ok(())
}
