//! `oxifleet` - CLI for the fleet-management core
//!
//! This binary provides the command-line interface for the registries, the
//! sign-in flow, and the dashboard dataset.

#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

use anyhow::Result;
use clap::Parser;

use oxifleet::cli::{
    AddDriverArgs, AddVehicleArgs, AuthCommand, Cli, Command, ConfigCommand, DashboardCommand,
    DriverCommand, VehicleCommand,
};
use oxifleet::dashboard::Dashboard;
use oxifleet::directory::Registration;
use oxifleet::fleet::{DriverDraft, VehicleDraft};
use oxifleet::{init_logging, App, Config};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity
    init_logging(cli.verbosity());

    // Load configuration
    let config = Config::load_from(cli.config.clone())?;

    // Execute the command
    match cli.command {
        Command::Vehicle(vehicle_cmd) => handle_vehicle(&App::open(&config)?, vehicle_cmd),
        Command::Driver(driver_cmd) => handle_driver(&App::open(&config)?, driver_cmd),
        Command::Auth(auth_cmd) => handle_auth(&App::open(&config)?, &auth_cmd),
        Command::Dashboard(dashboard_cmd) => handle_dashboard(&dashboard_cmd),
        Command::Config(config_cmd) => handle_config(&config, config_cmd),
    }
}

fn vehicle_draft(args: AddVehicleArgs) -> VehicleDraft {
    VehicleDraft {
        id: args.id,
        model: args.model,
        plate: args.plate,
        kind: args.kind,
        status: args.status,
        notes: args.notes,
    }
}

fn driver_draft(args: AddDriverArgs) -> DriverDraft {
    DriverDraft {
        id: args.id,
        name: args.name,
        email: args.email,
        phone: args.phone,
        license: args.license,
        status: args.status,
        notes: args.notes,
    }
}

fn handle_vehicle(app: &App, cmd: VehicleCommand) -> Result<()> {
    match cmd {
        VehicleCommand::Add(args) => {
            let vehicle = app.vehicles().add(vehicle_draft(args));
            println!("Added vehicle {}", vehicle.id);
            println!("  Model:   {}", vehicle.model);
            println!("  Plate:   {}", vehicle.plate);
            println!("  Type:    {}", vehicle.kind);
            println!("  Status:  {}", vehicle.status);
            if !vehicle.notes.is_empty() {
                println!("  Notes:   {}", vehicle.notes);
            }
        }
        VehicleCommand::List { json } => {
            let records = app.vehicles().records();
            if json {
                println!("{}", serde_json::to_string_pretty(&records)?);
            } else {
                for vehicle in &records {
                    println!(
                        "{}  {}  {}  {}",
                        vehicle.id, vehicle.model, vehicle.plate, vehicle.status
                    );
                }
                println!();
                println!(
                    "{} tracked here, {} in the fleet overall",
                    records.len(),
                    app.vehicles().total()
                );
            }
        }
    }
    Ok(())
}

fn handle_driver(app: &App, cmd: DriverCommand) -> Result<()> {
    match cmd {
        DriverCommand::Add(args) => {
            let driver = app.drivers().add(driver_draft(args));
            println!("Added driver {}", driver.id);
            println!("  Name:    {}", driver.name);
            println!("  Email:   {}", driver.email);
            println!("  Phone:   {}", driver.phone);
            println!("  License: {}", driver.license);
            println!("  Status:  {}", driver.status);
            if !driver.notes.is_empty() {
                println!("  Notes:   {}", driver.notes);
            }
        }
        DriverCommand::List { json } => {
            let records = app.drivers().records();
            if json {
                println!("{}", serde_json::to_string_pretty(&records)?);
            } else {
                for driver in &records {
                    println!(
                        "{}  {}  {}  {}",
                        driver.id, driver.name, driver.email, driver.status
                    );
                }
                println!();
                println!(
                    "{} tracked here, {} on staff overall",
                    records.len(),
                    app.drivers().total()
                );
            }
        }
    }
    Ok(())
}

fn handle_auth(app: &App, cmd: &AuthCommand) -> Result<()> {
    match cmd {
        AuthCommand::Signup {
            name,
            email,
            password,
        } => {
            let user = app.sign_up(Registration {
                name: name.clone(),
                email: email.clone(),
                password: password.clone(),
            })?;
            println!("Registered {} ({})", user.name, user.email);
            println!("Sign in to start a session.");
        }
        AuthCommand::Signin { email, password } => {
            let profile = app.sign_in(email, password)?;
            println!("Signed in as {} ({})", profile.name, profile.email);
        }
        AuthCommand::Signout => {
            app.sign_out();
            println!("Signed out.");
        }
        AuthCommand::Show { json } => match app.session().get() {
            Some(profile) => {
                if *json {
                    println!("{}", serde_json::to_string_pretty(&profile)?);
                } else {
                    println!("Signed in as {} ({})", profile.name, profile.email);
                }
            }
            None => {
                if *json {
                    println!("null");
                } else {
                    println!("No active session.");
                }
            }
        },
    }
    Ok(())
}

fn handle_dashboard(cmd: &DashboardCommand) -> Result<()> {
    let dashboard = Dashboard::sample();

    if cmd.json {
        println!("{}", serde_json::to_string_pretty(&dashboard)?);
        return Ok(());
    }

    for card in &dashboard.cards {
        println!("{:<20} {}", card.title, card.value);
    }

    println!();
    println!("Serviced vehicles");
    for entry in &dashboard.serviced {
        println!("  {}  {:<24} {}", entry.id, entry.model, entry.date);
    }

    println!();
    println!("Pending service");
    for entry in &dashboard.pending {
        println!("  {}  {:<24} {}", entry.id, entry.model, entry.date);
    }

    println!();
    println!("Recent invoices");
    for invoice in &dashboard.invoices {
        println!(
            "  {}  {:<24} {:>8}  {}",
            invoice.id, invoice.vendor, invoice.amount, invoice.status
        );
    }

    println!();
    println!("Service spend by week");
    for point in &dashboard.service_spend {
        println!("  {}  ${}", point.week, point.spend);
    }

    println!();
    println!("Utilization");
    for point in &dashboard.utilization {
        println!("  {}  {}%", point.day, point.rate);
    }

    Ok(())
}

fn handle_config(config: &Config, cmd: ConfigCommand) -> Result<()> {
    match cmd {
        ConfigCommand::Show { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(config)?);
            } else {
                println!("Current Configuration");
                println!("=====================");
                println!();
                println!("[Storage]");
                println!("  Database path: {}", config.database_path().display());
                println!();
                println!("[Api]");
                println!("  Listen addr:   {}", config.api.listen_addr);
                println!("  Base URL:      {}", config.api.base_url);
                println!("  Route prefix:  {}", config.api.route_prefix);
                match &config.api.dataset_path {
                    Some(path) => println!("  Dataset:       {}", path.display()),
                    None => println!("  Dataset:       (built-in seed)"),
                }
            }
        }
        ConfigCommand::Path => {
            println!("{}", Config::default_config_path().display());
        }
        ConfigCommand::Validate { file } => {
            let path = file.unwrap_or_else(Config::default_config_path);
            println!("Validating configuration: {}", path.display());
            match Config::load_from(Some(path)) {
                Ok(_) => println!("Configuration is valid."),
                Err(e) => println!("Configuration error: {e}"),
            }
        }
    }
    Ok(())
}
