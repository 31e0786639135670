//! `fdt company` command - partner company management

use clap::Subcommand;
use miette::{miette, Result};
use tabled::{Table, Tabled};

use crate::cli::output;
use crate::core::config::Project;
use crate::core::store::Store;
use crate::entities::company::{Company, CompanyContact};

#[derive(Subcommand, Debug)]
pub enum CompanyCommands {
    /// Register a new company
    New(NewArgs),

    /// List companies
    List,
}

#[derive(clap::Args, Debug)]
pub struct NewArgs {
    /// Short company code
    #[arg(long)]
    pub code: String,

    /// Registered company name
    #[arg(long)]
    pub name: String,

    /// Contact person name
    #[arg(long)]
    pub contact: String,

    /// Street address
    #[arg(long)]
    pub address: String,

    /// City
    #[arg(long)]
    pub city: String,

    /// Postal pincode
    #[arg(long)]
    pub pincode: String,

    /// Phone number
    #[arg(long)]
    pub phone: String,
}

#[derive(Tabled)]
struct CompanyRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "CODE")]
    code: String,
    #[tabled(rename = "NAME")]
    name: String,
    #[tabled(rename = "CITY")]
    city: String,
    #[tabled(rename = "PHONE")]
    phone: String,
}

pub fn run(cmd: CompanyCommands) -> Result<()> {
    let project = Project::discover().map_err(|e| miette!("{e}"))?;
    let mut store: Store<Company> = Store::open_dir(project.data_dir());
    output::report_load_warning(&store);

    match cmd {
        CompanyCommands::New(args) => {
            let company = Company::new(
                args.code,
                args.name,
                CompanyContact {
                    name: args.contact,
                    address: args.address,
                    city: args.city,
                    pincode: args.pincode,
                    phone: args.phone,
                },
            );
            company.validate().map_err(|e| miette!("{e}"))?;
            let label = format!("{} ({})", company.company_name, company.id.short());
            output::report_persist(store.add(company));
            output::success(format!("Registered company {label}"));
        }
        CompanyCommands::List => {
            let rows: Vec<CompanyRow> = store
                .iter()
                .map(|cmp| CompanyRow {
                    id: cmp.id.short(),
                    code: cmp.company_code.clone(),
                    name: cmp.company_name.clone(),
                    city: cmp.contact.city.clone(),
                    phone: cmp.contact.phone.clone(),
                })
                .collect();
            if rows.is_empty() {
                println!("No companies registered");
            } else {
                println!("{}", Table::new(rows));
            }
        }
    }
    Ok(())
}
