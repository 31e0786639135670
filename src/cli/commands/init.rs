//! `fdt init` command - workspace scaffolding

use miette::{miette, IntoDiagnostic, Result};

use crate::cli::output;
use crate::core::config::Project;

#[derive(clap::Args, Debug)]
pub struct InitArgs {
    /// Partner code for this workspace (booking office or hub)
    #[arg(long, default_value = "MAIN")]
    pub partner: String,
}

pub fn run(args: InitArgs) -> Result<()> {
    let cwd = std::env::current_dir().into_diagnostic()?;
    let project = Project::init(&cwd, &args.partner).map_err(|e| miette!("{e}"))?;
    output::success(format!(
        "Initialized fdt workspace for partner '{}' at {}",
        args.partner,
        project.root().display()
    ));
    Ok(())
}
