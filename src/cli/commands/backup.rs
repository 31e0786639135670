//! `fdt backup` command - snapshot export to the remote backup provider

use clap::Subcommand;
use miette::{miette, Result};

use crate::cli::output;
use crate::core::config::Project;
use crate::core::provider::BackupClient;
use crate::core::store::Store;
use crate::entities::company::Company;
use crate::entities::inventory::InventoryItem;
use crate::entities::manifest::Manifest;
use crate::entities::vehicle::Vehicle;
use crate::entities::waybill::Waybill;

#[derive(Subcommand, Debug)]
pub enum BackupCommands {
    /// Upload a snapshot of every collection
    Push,
}

pub fn run(cmd: BackupCommands) -> Result<()> {
    let project = Project::discover().map_err(|e| miette!("{e}"))?;
    let backup = &project.config().backup;
    let (Some(endpoint), Some(token)) = (backup.endpoint.as_deref(), backup.token.as_deref())
    else {
        return Err(miette!(
            "Backup is not configured. Set backup.endpoint and backup.token in .fdt/config.yaml"
        ));
    };

    match cmd {
        BackupCommands::Push => {
            let data_dir = project.data_dir();
            let waybills: Store<Waybill> = Store::open_dir(&data_dir);
            let manifests: Store<Manifest> = Store::open_dir(&data_dir);
            let vehicles: Store<Vehicle> = Store::open_dir(&data_dir);
            let companies: Store<Company> = Store::open_dir(&data_dir);
            let inventory: Store<InventoryItem> = Store::open_dir(&data_dir);

            let snapshot = serde_json::json!({
                "waybills": waybills.snapshot().map_err(|e| miette!("{e}"))?,
                "manifests": manifests.snapshot().map_err(|e| miette!("{e}"))?,
                "vehicles": vehicles.snapshot().map_err(|e| miette!("{e}"))?,
                "companies": companies.snapshot().map_err(|e| miette!("{e}"))?,
                "inventory": inventory.snapshot().map_err(|e| miette!("{e}"))?,
            });

            let client = BackupClient::new(endpoint, token).map_err(|e| miette!("{e}"))?;
            // A failed upload degrades to a warning; local state is unaffected
            match client.push(&snapshot) {
                Ok(()) => output::success("Backup uploaded"),
                Err(e) => output::warn(format!("Backup failed: {e}")),
            }
        }
    }
    Ok(())
}
