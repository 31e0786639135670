//! `fdt vehicle` command - vehicle management

use clap::Subcommand;
use dialoguer::{theme::ColorfulTheme, Confirm};
use miette::{miette, IntoDiagnostic, Result};
use tabled::{Table, Tabled};

use crate::cli::{helpers, output};
use crate::core::config::Project;
use crate::core::store::Store;
use crate::entities::vehicle::{Vehicle, VehicleType};

#[derive(Subcommand, Debug)]
pub enum VehicleCommands {
    /// Register a new vehicle
    New(NewArgs),

    /// List vehicles
    List,

    /// Remove a vehicle
    Rm(RmArgs),
}

#[derive(clap::Args, Debug)]
pub struct NewArgs {
    /// Registration number (e.g. MH12AB1234)
    #[arg(long)]
    pub number: String,

    /// Driver name
    #[arg(long)]
    pub driver: String,

    /// Usual route description
    #[arg(long)]
    pub route: String,

    /// Standard route price
    #[arg(long)]
    pub price: f64,

    /// Ownership class
    #[arg(long, value_parser = clap::value_parser!(VehicleType), default_value = "personal")]
    pub r#type: VehicleType,
}

#[derive(clap::Args, Debug)]
pub struct RmArgs {
    /// Vehicle id or registration number
    pub vehicle: String,

    /// Skip the confirmation prompt
    #[arg(long, short = 'y')]
    pub yes: bool,
}

#[derive(Tabled)]
struct VehicleRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "NUMBER")]
    number: String,
    #[tabled(rename = "DRIVER")]
    driver: String,
    #[tabled(rename = "ROUTE")]
    route: String,
    #[tabled(rename = "PRICE")]
    price: String,
    #[tabled(rename = "TYPE")]
    vehicle_type: String,
}

pub fn run(cmd: VehicleCommands) -> Result<()> {
    let project = Project::discover().map_err(|e| miette!("{e}"))?;
    let mut store: Store<Vehicle> = Store::open_dir(project.data_dir());
    output::report_load_warning(&store);

    match cmd {
        VehicleCommands::New(args) => {
            let vehicle = Vehicle::new(args.number, args.driver, args.route, args.price, args.r#type);
            vehicle.validate().map_err(|e| miette!("{e}"))?;
            let label = vehicle.vehicle_number.clone();
            output::report_persist(store.add(vehicle));
            output::success(format!("Registered vehicle {label}"));
        }
        VehicleCommands::List => {
            let rows: Vec<VehicleRow> = store
                .iter()
                .map(|veh| VehicleRow {
                    id: veh.id.short(),
                    number: veh.vehicle_number.clone(),
                    driver: veh.driver_name.clone(),
                    route: veh.route.clone(),
                    price: format!("{:.2}", veh.route_price),
                    vehicle_type: veh.vehicle_type.to_string(),
                })
                .collect();
            if rows.is_empty() {
                println!("No vehicles registered");
            } else {
                println!("{}", Table::new(rows));
            }
        }
        VehicleCommands::Rm(args) => {
            let vehicle = helpers::find_vehicle(&store, &args.vehicle)?;
            let id = vehicle.id.clone();
            let number = vehicle.vehicle_number.clone();
            if !args.yes {
                let confirmed = Confirm::with_theme(&ColorfulTheme::default())
                    .with_prompt(format!("Remove vehicle {number}?"))
                    .default(false)
                    .interact()
                    .into_diagnostic()?;
                if !confirmed {
                    return Ok(());
                }
            }
            match store.remove(&id) {
                Ok(true) => output::success(format!("Removed vehicle {number}")),
                Ok(false) => {}
                Err(e) => output::warn(e.to_string()),
            }
        }
    }
    Ok(())
}
