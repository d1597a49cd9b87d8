//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments
//! - loads configuration and installs logging
//! - runs the requested calculation
//! - prints results
//! - writes optional exports

use clap::Parser;

use crate::cli::{CatalogArgs, Cli, Command, CommonArgs};
use crate::config::Config;
use crate::error::AppError;
use crate::exporters::{DocxExporter, ExcelExporter, Exporter};
use crate::models::CalculationResult;

pub mod pipeline;

use pipeline::{Request, RunOutput};

/// Entry point for the `matcalc` binary.
pub fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let config = Config::load(cli.config.as_deref())?;
    config.logging.init(cli.quiet);
    tracing::debug!(?config, "configuration resolved");

    match cli.command {
        Command::Calc(args) => handle_calculation(
            Request::Area {
                material: args.material,
                area: args.area,
            },
            &args.common,
            &config,
        ),
        Command::Room(args) => {
            let room = crate::domain::RoomDimensions {
                length: args.length,
                width: args.width,
                height: args.height,
                door_area: args.door_area,
                window_area: args.window_area,
            };
            handle_calculation(
                Request::Room {
                    material: args.material,
                    room,
                    surface: args.surface,
                },
                &args.common,
                &config,
            )
        }
        Command::Compare(args) => handle_calculation(
            Request::Compare {
                materials: args.materials,
                area: args.area,
            },
            &args.common,
            &config,
        ),
        Command::Catalog(args) => handle_catalog(&args, &config),
    }
}

fn handle_calculation(request: Request, common: &CommonArgs, config: &Config) -> Result<(), AppError> {
    let config = config_with_overrides(config, common)?;
    let is_comparison = matches!(request, Request::Compare { .. });
    let run = pipeline::run_request(&config, request)?;

    if common.json {
        print_json(&run.results)?;
    } else if is_comparison {
        println!("{}", crate::report::format_comparison(&run.results, &config.currency));
    } else {
        print!("{}", crate::report::format_results(&run.results, &config.currency));
    }

    for path in export(&run, common, &config)? {
        if !common.json {
            println!("Report saved: {}", path.display());
        }
    }
    Ok(())
}

fn handle_catalog(args: &CatalogArgs, config: &Config) -> Result<(), AppError> {
    let path = args.catalog.as_deref().or(config.catalog.as_deref());
    let catalog = crate::io::load_catalog(path)?;

    if args.json {
        let json = serde_json::to_string_pretty(catalog.materials())
            .map_err(|e| AppError::io(format!("Failed to serialize catalog: {e}")))?;
        println!("{json}");
    } else {
        print!("{}", crate::report::format_catalog(&catalog, &config.currency));
    }
    Ok(())
}

/// Apply command-line overrides on top of the loaded configuration.
pub fn config_with_overrides(config: &Config, common: &CommonArgs) -> Result<Config, AppError> {
    let mut config = config.clone();
    if let Some(reserve) = common.reserve {
        config.reserve_percent = reserve;
    }
    if let Some(catalog) = &common.catalog {
        config.catalog = Some(catalog.clone());
    }
    config
        .validate()
        .map_err(|e| AppError::invalid(e.message()))?;
    Ok(config)
}

/// Run the requested exporters; returns the written paths.
pub fn export(run: &RunOutput, common: &CommonArgs, config: &Config) -> Result<Vec<std::path::PathBuf>, AppError> {
    let mut exporters: Vec<Box<dyn Exporter>> = Vec::new();
    if let Some(filename) = &common.docx {
        exporters.push(Box::new(DocxExporter::new(
            filename.clone(),
            &config.output_dir,
            &config.currency,
        )));
    }
    if let Some(filename) = &common.xlsx {
        exporters.push(Box::new(ExcelExporter::new(
            filename.clone(),
            &config.output_dir,
            &config.currency,
        )));
    }

    exporters
        .iter_mut()
        .map(|exporter| exporter.export(&run.results))
        .collect()
}

fn print_json(results: &[CalculationResult]) -> Result<(), AppError> {
    let json = serde_json::to_string_pretty(results)
        .map_err(|e| AppError::io(format!("Failed to serialize results: {e}")))?;
    println!("{json}");
    Ok(())
}
