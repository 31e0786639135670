//! Top-level argument tree

use clap::{Parser, Subcommand};

use crate::cli::commands::backup::BackupCommands;
use crate::cli::commands::company::CompanyCommands;
use crate::cli::commands::init::InitArgs;
use crate::cli::commands::inventory::InventoryCommands;
use crate::cli::commands::lookup::LookupCommands;
use crate::cli::commands::manifest::ManifestCommands;
use crate::cli::commands::vehicle::VehicleCommands;
use crate::cli::commands::waybill::WaybillCommands;

#[derive(Parser, Debug)]
#[command(
    name = "fdt",
    version,
    about = "Freight Dispatch Toolkit - book waybills, build vehicle manifests, track dispatch"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize an fdt workspace in the current directory
    Init(InitArgs),

    /// Manage partner companies
    #[command(subcommand)]
    Company(CompanyCommands),

    /// Manage vehicles
    #[command(subcommand)]
    Vehicle(VehicleCommands),

    /// Manage the pre-issued waybill number pool
    #[command(subcommand)]
    Inventory(InventoryCommands),

    /// Book and track waybills
    #[command(subcommand)]
    Waybill(WaybillCommands),

    /// Build, dispatch and receive manifests
    #[command(subcommand)]
    Manifest(ManifestCommands),

    /// Query the suggestion provider (pincode, city, address)
    #[command(subcommand)]
    Lookup(LookupCommands),

    /// Export a snapshot to the remote backup provider
    #[command(subcommand)]
    Backup(BackupCommands),
}
