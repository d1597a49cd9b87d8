//! Command-line parsing for the material calculator.
//!
//! The goal of this module is to keep **argument parsing** separate from the
//! calculation and export code.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::calculations::validate_positive_number;
use crate::domain::Surface;

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "matcalc", version, about = "Finishing material quantity and cost calculator")]
pub struct Cli {
    /// TOML configuration file (defaults to ./matcalc.toml when present).
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Only log warnings and errors.
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Units and cost of one material for a given area.
    Calc(CalcArgs),
    /// Units and cost of one material for a room's floor or walls.
    Room(RoomArgs),
    /// Compare several materials for the same area, cheapest first.
    Compare(CompareArgs),
    /// List the materials in the catalog.
    Catalog(CatalogArgs),
}

/// Options shared by every calculating command.
#[derive(Debug, Args, Clone, Default)]
pub struct CommonArgs {
    /// Reserve percentage (0-100); overrides the configured value.
    #[arg(long, value_name = "PERCENT")]
    pub reserve: Option<f64>,

    /// Material catalog JSON; overrides the configured catalog.
    #[arg(long, value_name = "PATH")]
    pub catalog: Option<PathBuf>,

    /// Export a Word report. Without a path a timestamped name is generated.
    #[arg(long, value_name = "PATH", num_args = 0..=1)]
    pub docx: Option<Option<PathBuf>>,

    /// Export an Excel report. Without a path a timestamped name is generated.
    #[arg(long, value_name = "PATH", num_args = 0..=1)]
    pub xlsx: Option<Option<PathBuf>>,

    /// Print results as JSON instead of text.
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Args, Clone)]
pub struct CalcArgs {
    /// Material name from the catalog.
    #[arg(short, long)]
    pub material: String,

    /// Area to cover (m²).
    #[arg(short, long, value_parser = parse_area)]
    pub area: f64,

    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Debug, Args, Clone)]
pub struct RoomArgs {
    /// Material name from the catalog.
    #[arg(short, long)]
    pub material: String,

    /// Room length (m).
    #[arg(long, value_parser = parse_length)]
    pub length: f64,

    /// Room width (m).
    #[arg(long, value_parser = parse_width)]
    pub width: f64,

    /// Ceiling height (m); required for walls.
    #[arg(long, value_parser = parse_height)]
    pub height: Option<f64>,

    /// Total door area (m²) subtracted from the walls.
    #[arg(long, default_value_t = 0.0)]
    pub door_area: f64,

    /// Total window area (m²) subtracted from the walls.
    #[arg(long, default_value_t = 0.0)]
    pub window_area: f64,

    /// Surface to finish.
    #[arg(long, value_enum, default_value_t = Surface::Floor)]
    pub surface: Surface,

    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Debug, Args, Clone)]
pub struct CompareArgs {
    /// Area to cover (m²).
    #[arg(short, long, value_parser = parse_area)]
    pub area: f64,

    /// Comma-separated material names; all catalog materials when omitted.
    #[arg(long, value_delimiter = ',')]
    pub materials: Vec<String>,

    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Debug, Args, Clone)]
pub struct CatalogArgs {
    /// Material catalog JSON; overrides the configured catalog.
    #[arg(long, value_name = "PATH")]
    pub catalog: Option<PathBuf>,

    /// Print the catalog as JSON.
    #[arg(long)]
    pub json: bool,
}

fn parse_area(value: &str) -> Result<f64, String> {
    validate_positive_number(value, "Area").map_err(|e| e.to_string())
}

fn parse_length(value: &str) -> Result<f64, String> {
    validate_positive_number(value, "Length").map_err(|e| e.to_string())
}

fn parse_width(value: &str) -> Result<f64, String> {
    validate_positive_number(value, "Width").map_err(|e| e.to_string())
}

fn parse_height(value: &str) -> Result<f64, String> {
    validate_positive_number(value, "Height").map_err(|e| e.to_string())
}
