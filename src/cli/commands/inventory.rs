//! `fdt inventory` command - the pre-issued waybill number pool

use clap::Subcommand;
use miette::{miette, Result};
use tabled::{Table, Tabled};

use crate::cli::output;
use crate::core::config::Project;
use crate::core::links::pool_remaining;
use crate::core::store::Store;
use crate::entities::inventory::InventoryItem;

#[derive(Subcommand, Debug)]
pub enum InventoryCommands {
    /// Issue a block of waybill numbers to a partner
    Issue(IssueArgs),

    /// List the number pool
    List(ListArgs),
}

#[derive(clap::Args, Debug)]
pub struct IssueArgs {
    /// Partner to issue the numbers to; defaults to the workspace partner
    #[arg(long)]
    pub partner: Option<String>,

    /// Comma-separated waybill numbers (e.g. WB1001,WB1002,WB1003)
    #[arg(long, value_delimiter = ',', required = true)]
    pub numbers: Vec<String>,
}

#[derive(clap::Args, Debug)]
pub struct ListArgs {
    /// Only show numbers for this partner
    #[arg(long)]
    pub partner: Option<String>,

    /// Only show unused numbers
    #[arg(long)]
    pub available: bool,
}

#[derive(Tabled)]
struct InventoryRow {
    #[tabled(rename = "NUMBER")]
    number: String,
    #[tabled(rename = "PARTNER")]
    partner: String,
    #[tabled(rename = "STATUS")]
    status: String,
}

pub fn run(cmd: InventoryCommands) -> Result<()> {
    let project = Project::discover().map_err(|e| miette!("{e}"))?;
    let mut store: Store<InventoryItem> = Store::open_dir(project.data_dir());
    output::report_load_warning(&store);

    match cmd {
        InventoryCommands::Issue(args) => {
            let partner = args
                .partner
                .unwrap_or_else(|| project.config().partner_code.clone());

            // Numbers already in the pool are skipped, used or not
            let mut issued = 0;
            for number in &args.numbers {
                let exists = store
                    .iter()
                    .any(|item| item.waybill_number == *number && item.partner_code == partner);
                if exists {
                    output::warn(format!("Number {number} already issued to {partner}, skipped"));
                    continue;
                }
                output::report_persist(store.add(InventoryItem::new(number.clone(), &partner)));
                issued += 1;
            }
            output::success(format!(
                "Issued {issued} number(s) to {partner} ({} now available)",
                pool_remaining(&store, &partner)
            ));
        }
        InventoryCommands::List(args) => {
            let rows: Vec<InventoryRow> = store
                .iter()
                .filter(|item| {
                    args.partner
                        .as_deref()
                        .map_or(true, |p| item.partner_code == p)
                })
                .filter(|item| !args.available || !item.is_used)
                .map(|item| InventoryRow {
                    number: item.waybill_number.clone(),
                    partner: item.partner_code.clone(),
                    status: if item.is_used { "used" } else { "available" }.to_string(),
                })
                .collect();
            if rows.is_empty() {
                println!("No inventory items");
            } else {
                println!("{}", Table::new(rows));
            }
        }
    }
    Ok(())
}
