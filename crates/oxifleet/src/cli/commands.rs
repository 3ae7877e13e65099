//! CLI command definitions.
//!
//! This module defines the structure of all CLI subcommands.

use std::path::PathBuf;

use clap::{Args, Subcommand};

/// Vehicle registry commands.
#[derive(Debug, Subcommand)]
pub enum VehicleCommand {
    /// Add a vehicle to the registry
    Add(AddVehicleArgs),

    /// List registered vehicles
    List {
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },
}

/// Arguments for `vehicle add`. Blank or omitted fields receive the
/// documented placeholder defaults.
#[derive(Debug, Args)]
pub struct AddVehicleArgs {
    /// Registry id (generated when omitted)
    #[arg(long)]
    pub id: Option<String>,

    /// Make and model
    #[arg(short, long)]
    pub model: Option<String>,

    /// License plate
    #[arg(short, long)]
    pub plate: Option<String>,

    /// Vehicle type: truck, van, trailer or utility
    #[arg(short = 't', long = "type")]
    pub kind: Option<String>,

    /// Status: active, "in service" or inactive
    #[arg(short, long)]
    pub status: Option<String>,

    /// Free-form notes
    #[arg(short, long)]
    pub notes: Option<String>,
}

/// Driver registry commands.
#[derive(Debug, Subcommand)]
pub enum DriverCommand {
    /// Add a driver to the registry
    Add(AddDriverArgs),

    /// List registered drivers
    List {
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },
}

/// Arguments for `driver add`. Blank or omitted fields receive the
/// documented placeholder defaults.
#[derive(Debug, Args)]
pub struct AddDriverArgs {
    /// Registry id (generated when omitted)
    #[arg(long)]
    pub id: Option<String>,

    /// Full name
    #[arg(short = 'n', long)]
    pub name: Option<String>,

    /// Contact email
    #[arg(short, long)]
    pub email: Option<String>,

    /// Contact phone number
    #[arg(short, long)]
    pub phone: Option<String>,

    /// Driving license number
    #[arg(short, long)]
    pub license: Option<String>,

    /// Status: active, "on leave" or inactive
    #[arg(short, long)]
    pub status: Option<String>,

    /// Free-form notes
    #[arg(long)]
    pub notes: Option<String>,
}

/// Authentication commands.
#[derive(Debug, Subcommand)]
pub enum AuthCommand {
    /// Register a new account
    Signup {
        /// Display name
        #[arg(short, long)]
        name: String,

        /// Email address
        #[arg(short, long)]
        email: String,

        /// Password
        #[arg(short, long)]
        password: String,
    },

    /// Sign in and store the session
    Signin {
        /// Email address
        #[arg(short, long)]
        email: String,

        /// Password
        #[arg(short, long)]
        password: String,
    },

    /// Clear the stored session
    Signout,

    /// Show the current session
    Show {
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },
}

/// Dashboard command arguments.
#[derive(Debug, Args)]
pub struct DashboardCommand {
    /// Output as JSON
    #[arg(short, long)]
    pub json: bool,
}

/// Configuration commands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration
    Show {
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Show the configuration file path
    Path,

    /// Validate configuration
    Validate {
        /// Path to configuration file to validate
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Debug, Parser)]
    struct TestCli {
        #[command(subcommand)]
        command: TestCommand,
    }

    #[derive(Debug, Subcommand)]
    enum TestCommand {
        #[command(subcommand)]
        Vehicle(VehicleCommand),
        #[command(subcommand)]
        Driver(DriverCommand),
        #[command(subcommand)]
        Auth(AuthCommand),
    }

    #[test]
    fn test_vehicle_add_parses() {
        let cli = TestCli::parse_from([
            "test", "vehicle", "add", "--model", "Volvo VNR", "--type", "van",
        ]);
        match cli.command {
            TestCommand::Vehicle(VehicleCommand::Add(args)) => {
                assert_eq!(args.model.as_deref(), Some("Volvo VNR"));
                assert_eq!(args.kind.as_deref(), Some("van"));
                assert!(args.id.is_none());
            }
            other => panic!("unexpected parse: {other:?}"),
        }
    }

    #[test]
    fn test_driver_list_json_flag() {
        let cli = TestCli::parse_from(["test", "driver", "list", "--json"]);
        match cli.command {
            TestCommand::Driver(DriverCommand::List { json }) => assert!(json),
            other => panic!("unexpected parse: {other:?}"),
        }
    }

    #[test]
    fn test_auth_signin_parses() {
        let cli = TestCli::parse_from([
            "test", "auth", "signin", "--email", "a@x.com", "--password", "pw",
        ]);
        match cli.command {
            TestCommand::Auth(AuthCommand::Signin { email, password }) => {
                assert_eq!(email, "a@x.com");
                assert_eq!(password, "pw");
            }
            other => panic!("unexpected parse: {other:?}"),
        }
    }
}
