//! `matcalc` library crate.
//!
//! The binary (`matcalc`) is a thin wrapper around this library so that:
//!
//! - core logic is testable without spawning processes
//! - calculators and exporters are reusable from other front-ends

pub mod app;
pub mod calculations;
pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod exporters;
pub mod io;
pub mod logging;
pub mod models;
pub mod report;
