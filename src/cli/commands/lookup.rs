//! `fdt lookup` command - convenience lookups via the suggestion provider
//!
//! All lookups are best-effort: an unconfigured or failing provider yields a
//! neutral "no suggestion" answer, never an error.

use clap::Subcommand;
use miette::{miette, Result};

use crate::core::config::Project;

#[derive(Subcommand, Debug)]
pub enum LookupCommands {
    /// Look up city and state for a pincode
    Pincode { pincode: String },

    /// Look up the state for a city
    City { city: String },

    /// Parse a free-text address into structured fields
    Address { text: String },
}

pub fn run(cmd: LookupCommands) -> Result<()> {
    let project = Project::discover().map_err(|e| miette!("{e}"))?;
    let client = project
        .config()
        .suggestion_client()
        .map_err(|e| miette!("{e}"))?;

    match cmd {
        LookupCommands::Pincode { pincode } => match client.lookup_pincode(&pincode) {
            Some(result) => println!("{pincode}: {}, {}", result.city, result.state),
            None => println!("No suggestion for pincode {pincode}"),
        },
        LookupCommands::City { city } => match client.lookup_state(&city) {
            Some(state) => println!("{city}: {state}"),
            None => println!("No suggestion for city {city}"),
        },
        LookupCommands::Address { text } => match client.parse_address(&text) {
            Some(parsed) => {
                let field = |value: Option<String>| value.unwrap_or_else(|| "-".to_string());
                println!("name:    {}", field(parsed.name));
                println!("address: {}", field(parsed.address));
                println!("city:    {}", field(parsed.city));
                println!("pincode: {}", field(parsed.pincode));
                println!("phone:   {}", field(parsed.phone));
            }
            None => println!("No suggestion for the given address"),
        },
    }
    Ok(())
}
