//! `fdt waybill` command - booking and tracking

use clap::Subcommand;
use dialoguer::{theme::ColorfulTheme, Confirm};
use miette::{miette, IntoDiagnostic, Result};
use tabled::{Table, Tabled};

use crate::cli::{helpers, output};
use crate::core::config::Project;
use crate::core::links::{book_waybill, WaybillDraft};
use crate::core::store::Store;
use crate::entities::company::Company;
use crate::entities::inventory::InventoryItem;
use crate::entities::waybill::{Waybill, WaybillStatus};

#[derive(Subcommand, Debug)]
pub enum WaybillCommands {
    /// Book a new waybill, consuming a number from the partner's pool
    Book(BookArgs),

    /// List waybills
    List(ListArgs),

    /// Show a waybill's details
    Show(ShowArgs),

    /// Update a waybill's operational status
    Status(StatusArgs),

    /// Delete a waybill (manifests keep a dangling reference by design)
    Rm(RmArgs),
}

#[derive(clap::Args, Debug)]
pub struct BookArgs {
    /// Origin city
    #[arg(long)]
    pub from: String,

    /// Destination city
    #[arg(long)]
    pub to: String,

    /// Sending company (id or company code)
    #[arg(long)]
    pub sender: String,

    /// Receiving company (id or company code)
    #[arg(long)]
    pub receiver: String,

    /// Book on behalf of a different partner
    #[arg(long)]
    pub partner: Option<String>,
}

#[derive(clap::Args, Debug)]
pub struct ListArgs {
    /// Filter by status
    #[arg(long, short = 's')]
    pub status: Option<WaybillStatus>,

    /// Filter by destination city
    #[arg(long)]
    pub to: Option<String>,
}

#[derive(clap::Args, Debug)]
pub struct ShowArgs {
    /// Waybill id or number
    pub waybill: String,
}

#[derive(clap::Args, Debug)]
pub struct StatusArgs {
    /// Waybill id or number
    pub waybill: String,

    /// New status
    #[arg(long, short = 's')]
    pub status: WaybillStatus,
}

#[derive(clap::Args, Debug)]
pub struct RmArgs {
    /// Waybill id or number
    pub waybill: String,

    /// Skip the confirmation prompt
    #[arg(long, short = 'y')]
    pub yes: bool,
}

#[derive(Tabled)]
struct WaybillRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "NUMBER")]
    number: String,
    #[tabled(rename = "FROM")]
    from: String,
    #[tabled(rename = "TO")]
    to: String,
    #[tabled(rename = "STATUS")]
    status: String,
    #[tabled(rename = "PARTNER")]
    partner: String,
}

pub fn run(cmd: WaybillCommands) -> Result<()> {
    let project = Project::discover().map_err(|e| miette!("{e}"))?;
    let data_dir = project.data_dir();
    let mut waybills: Store<Waybill> = Store::open_dir(&data_dir);
    output::report_load_warning(&waybills);

    match cmd {
        WaybillCommands::Book(args) => {
            let mut inventory: Store<InventoryItem> = Store::open_dir(&data_dir);
            let companies: Store<Company> = Store::open_dir(&data_dir);
            output::report_load_warning(&inventory);
            output::report_load_warning(&companies);

            let sender = helpers::find_company(&companies, &args.sender)?.id.clone();
            let receiver = helpers::find_company(&companies, &args.receiver)?.id.clone();
            let draft = WaybillDraft {
                sender_city: args.from,
                receiver_city: args.to,
                sender_company: sender,
                receiver_company: receiver,
                partner_code: args
                    .partner
                    .unwrap_or_else(|| project.config().partner_code.clone()),
            };

            let booked =
                book_waybill(draft, &mut inventory, &mut waybills).map_err(|e| miette!("{e}"))?;
            for warning in &booked.persist_warnings {
                output::warn(warning);
            }
            output::success(format!(
                "Booked waybill {} ({})",
                booked.waybill.waybill_number,
                booked.waybill.id.short()
            ));
        }
        WaybillCommands::List(args) => {
            let rows: Vec<WaybillRow> = waybills
                .iter()
                .filter(|wb| args.status.map_or(true, |s| wb.status == s))
                .filter(|wb| args.to.as_deref().map_or(true, |c| wb.receiver_city == c))
                .map(|wb| WaybillRow {
                    id: wb.id.short(),
                    number: wb.waybill_number.clone(),
                    from: wb.sender_city.clone(),
                    to: wb.receiver_city.clone(),
                    status: wb.status.to_string(),
                    partner: wb.partner_code.clone(),
                })
                .collect();
            if rows.is_empty() {
                println!("No waybills");
            } else {
                println!("{}", Table::new(rows));
            }
        }
        WaybillCommands::Show(args) => {
            let wb = helpers::find_waybill(&waybills, &args.waybill)?;
            let companies: Store<Company> = Store::open_dir(&data_dir);
            println!("id:        {}", wb.id);
            println!("number:    {}", wb.waybill_number);
            println!("route:     {} -> {}", wb.sender_city, wb.receiver_city);
            println!("status:    {}", wb.status);
            println!("partner:   {}", wb.partner_code);
            println!("created:   {}", wb.created.to_rfc3339());
            // Company references are weak; show what still resolves
            let name = |id| {
                companies
                    .get(id)
                    .map(|c| c.company_name.clone())
                    .unwrap_or_else(|| "(missing)".to_string())
            };
            println!("sender:    {}", name(&wb.sender_company));
            println!("receiver:  {}", name(&wb.receiver_company));
        }
        WaybillCommands::Status(args) => {
            let mut wb = helpers::find_waybill(&waybills, &args.waybill)?.clone();
            wb.status = args.status;
            let number = wb.waybill_number.clone();
            output::report_persist(waybills.update(wb));
            output::success(format!("Waybill {number} is now {}", args.status));
        }
        WaybillCommands::Rm(args) => {
            let wb = helpers::find_waybill(&waybills, &args.waybill)?;
            let id = wb.id.clone();
            let number = wb.waybill_number.clone();
            if !args.yes {
                let confirmed = Confirm::with_theme(&ColorfulTheme::default())
                    .with_prompt(format!("Delete waybill {number}?"))
                    .default(false)
                    .interact()
                    .into_diagnostic()?;
                if !confirmed {
                    return Ok(());
                }
            }
            match waybills.remove(&id) {
                Ok(true) => output::success(format!("Deleted waybill {number}")),
                Ok(false) => {}
                Err(e) => output::warn(e.to_string()),
            }
        }
    }
    Ok(())
}
