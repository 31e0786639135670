use clap::Parser;
use fdt::cli::{Cli, Commands};
use miette::Result;

fn main() -> Result<()> {
    // Install miette's fancy error handler for beautiful diagnostics
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(2)
                .tab_width(4)
                .build(),
        )
    }))?;

    let cli = Cli::parse();

    match cli.command {
        Commands::Init(args) => fdt::cli::commands::init::run(args),
        Commands::Company(cmd) => fdt::cli::commands::company::run(cmd),
        Commands::Vehicle(cmd) => fdt::cli::commands::vehicle::run(cmd),
        Commands::Inventory(cmd) => fdt::cli::commands::inventory::run(cmd),
        Commands::Waybill(cmd) => fdt::cli::commands::waybill::run(cmd),
        Commands::Manifest(cmd) => fdt::cli::commands::manifest::run(cmd),
        Commands::Lookup(cmd) => fdt::cli::commands::lookup::run(cmd),
        Commands::Backup(cmd) => fdt::cli::commands::backup::run(cmd),
    }
}
