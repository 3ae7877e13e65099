//! Command-line interface for oxifleet.
//!
//! This module provides the CLI structure and command handlers for the
//! `oxifleet` binary.

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub use commands::{
    AddDriverArgs, AddVehicleArgs, AuthCommand, ConfigCommand, DashboardCommand, DriverCommand,
    VehicleCommand,
};

/// oxifleet - Fleet management from the terminal
///
/// Observable, locally persisted registries for vehicles and drivers, a
/// session-backed sign-in flow, and the mock dashboard dataset.
#[derive(Debug, Parser)]
#[command(name = "oxifleet")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to custom configuration file
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Increase verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// The command to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Manage the vehicle registry
    #[command(subcommand)]
    Vehicle(VehicleCommand),

    /// Manage the driver registry
    #[command(subcommand)]
    Driver(DriverCommand),

    /// Sign up, sign in, sign out
    #[command(subcommand)]
    Auth(AuthCommand),

    /// Show the dashboard dataset
    Dashboard(DashboardCommand),

    /// View or validate configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

impl Cli {
    /// Get the verbosity level based on flags.
    #[must_use]
    pub fn verbosity(&self) -> crate::logging::Verbosity {
        if self.quiet {
            crate::logging::Verbosity::Quiet
        } else {
            match self.verbose {
                0 => crate::logging::Verbosity::Normal,
                1 => crate::logging::Verbosity::Verbose,
                _ => crate::logging::Verbosity::Trace,
            }
        }
    }
}
