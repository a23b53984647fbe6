//! Survey text to polygon exports
//!
//! Reads a survey document's extracted text, builds the polygon and writes
//! KML/KMZ/DXF files plus a JSON report on stdout.
//!
//! Usage:
//!   cargo run --release --bin survey-polygon -- --input memorial.txt --zone 23
//!   cargo run --release --bin survey-polygon -- --input memorial.txt --config '{"utm_zone": 22}'
//!   RUST_LOG=debug cargo run --bin survey-polygon -- --input memorial.txt --output-dir out

use survey_oxide::config::{PipelineConfig, ZoneMetadata};
use survey_oxide::converters::export_report;
use survey_oxide::extractors::PlainTextSource;
use survey_oxide::pipeline::SurveyPipeline;
use survey_oxide::{Error, Result};
use std::path::PathBuf;
use std::process::ExitCode;

struct CliConfig {
    input: Option<PathBuf>,
    output_dir: PathBuf,
    config_json: String,
    zone: Option<String>,
    north: bool,
    name: Option<String>,
    no_fallback: bool,
}

impl CliConfig {
    fn from_args() -> Self {
        let args: Vec<String> = std::env::args().collect();
        let mut cfg = Self {
            input: None,
            output_dir: PathBuf::from("."),
            config_json: String::new(),
            zone: None,
            north: false,
            name: None,
            no_fallback: false,
        };

        let mut i = 1;
        while i < args.len() {
            match args[i].as_str() {
                "--input" | "-i" => {
                    i += 1;
                    if i < args.len() {
                        cfg.input = Some(PathBuf::from(&args[i]));
                    }
                },
                "--output-dir" | "-o" => {
                    i += 1;
                    if i < args.len() {
                        cfg.output_dir = PathBuf::from(&args[i]);
                    }
                },
                "--config" => {
                    i += 1;
                    if i < args.len() {
                        cfg.config_json = args[i].clone();
                    }
                },
                "--zone" => {
                    i += 1;
                    if i < args.len() {
                        cfg.zone = Some(args[i].clone());
                    }
                },
                "--name" => {
                    i += 1;
                    if i < args.len() {
                        cfg.name = Some(args[i].clone());
                    }
                },
                "--north" => cfg.north = true,
                "--no-fallback" => cfg.no_fallback = true,
                other => eprintln!("Ignoring unknown argument: {}", other),
            }
            i += 1;
        }

        cfg
    }

    /// Request metadata: `--config` JSON first, then individual flags on top.
    fn metadata(&self) -> Result<ZoneMetadata> {
        let mut meta = ZoneMetadata::from_json(&self.config_json)?;
        if let Some(zone) = &self.zone {
            let zone = zone
                .trim()
                .parse::<u8>()
                .map_err(|e| Error::InvalidConfig(format!("--zone '{}': {}", zone, e)))?;
            meta.utm_zone = Some(zone);
        }
        if self.north {
            meta.utm_south = false;
        }
        if let Some(name) = &self.name {
            meta.name = name.clone();
        }
        Ok(meta)
    }
}

fn print_usage() {
    eprintln!("Usage: survey-polygon --input <text file> [--zone N] [--north] [--name NAME]");
    eprintln!("                      [--config JSON] [--output-dir DIR] [--no-fallback]");
}

fn run(cli: &CliConfig) -> Result<()> {
    let Some(input) = &cli.input else {
        print_usage();
        return Err(Error::InvalidConfig("--input is required".to_string()));
    };

    let meta = cli.metadata()?;
    let config = PipelineConfig::new().with_mercator_fallback(!cli.no_fallback);
    let pipeline = SurveyPipeline::with_config(config);

    let mut source = PlainTextSource::new(input);
    let report = pipeline.process_source(&mut source, &meta)?;

    for path in export_report(&report, &cli.output_dir)? {
        log::info!("Wrote {}", path.display());
    }

    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();

    let cli = CliConfig::from_args();
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::debug!("Pipeline failed: {:?}", e);
            eprintln!("Error: {}", e.user_message());
            if e.is_user_resolvable() {
                eprintln!("Hint: pass --zone <N> (and --north for the northern hemisphere).");
            }
            ExitCode::FAILURE
        },
    }
}
