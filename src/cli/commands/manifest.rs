//! `fdt manifest` command - build, dispatch and receive manifests

use chrono::{NaiveDate, Utc};
use clap::Subcommand;
use miette::{miette, Result};
use tabled::{Table, Tabled};

use crate::cli::{helpers, output};
use crate::core::config::Project;
use crate::core::lifecycle::{LifecycleEngine, LifecycleError};
use crate::core::links::{destination_cities, resolve_waybills};
use crate::core::pallet::{
    DeterministicPolicy, PalletAssignmentPolicy, RemotePolicy, WithFallback,
};
use crate::core::store::Store;
use crate::entities::manifest::{Manifest, ManifestOrigin, ManifestStatus};
use crate::entities::waybill::Waybill;

#[derive(Subcommand, Debug)]
pub enum ManifestCommands {
    /// Create a new draft manifest
    New(NewArgs),

    /// Attach a waybill to a draft manifest
    Add(AddArgs),

    /// Show a manifest with its resolved waybills
    Show(ShowArgs),

    /// List manifests
    List,

    /// Dispatch a draft manifest, computing pallet assignments
    Dispatch(DispatchArgs),

    /// Receive a dispatched manifest in full
    Receive(ReceiveArgs),

    /// Receive a dispatched manifest with boxes missing
    ShortReceive(ShortReceiveArgs),
}

#[derive(clap::Args, Debug)]
pub struct NewArgs {
    /// Manifest number
    #[arg(long)]
    pub no: String,

    /// Trip date (YYYY-MM-DD); defaults to today
    #[arg(long)]
    pub date: Option<NaiveDate>,

    /// Where the manifest originates
    #[arg(long, default_value = "booking")]
    pub origin: OriginArg,

    /// Vehicle registration number
    #[arg(long)]
    pub vehicle: Option<String>,
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum OriginArg {
    Booking,
    Hub,
}

impl From<OriginArg> for ManifestOrigin {
    fn from(value: OriginArg) -> Self {
        match value {
            OriginArg::Booking => ManifestOrigin::Booking,
            OriginArg::Hub => ManifestOrigin::Hub,
        }
    }
}

#[derive(clap::Args, Debug)]
pub struct AddArgs {
    /// Manifest id or number
    pub manifest: String,

    /// Waybill id or number
    pub waybill: String,
}

#[derive(clap::Args, Debug)]
pub struct ShowArgs {
    /// Manifest id or number
    pub manifest: String,
}

#[derive(clap::Args, Debug)]
pub struct DispatchArgs {
    /// Manifest id or number
    pub manifest: String,

    /// Vehicle registration number; required if not set on the manifest
    #[arg(long)]
    pub vehicle: Option<String>,

    /// Number of pallets available for this trip (pool is 1..=N);
    /// defaults to the workspace setting
    #[arg(long)]
    pub pallets: Option<u32>,

    /// Skip the remote suggestion provider even if configured
    #[arg(long)]
    pub no_remote: bool,
}

#[derive(clap::Args, Debug)]
pub struct ReceiveArgs {
    /// Manifest id or number
    pub manifest: String,
}

#[derive(clap::Args, Debug)]
pub struct ShortReceiveArgs {
    /// Manifest id or number
    pub manifest: String,

    /// Comma-separated ids or numbers of the waybills actually scanned
    #[arg(long, value_delimiter = ',', required = true)]
    pub verified: Vec<String>,
}

#[derive(Tabled)]
struct ManifestRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "NUMBER")]
    number: String,
    #[tabled(rename = "DATE")]
    date: String,
    #[tabled(rename = "VEHICLE")]
    vehicle: String,
    #[tabled(rename = "BOXES")]
    boxes: usize,
    #[tabled(rename = "STATUS")]
    status: String,
}

pub fn run(cmd: ManifestCommands) -> Result<()> {
    let project = Project::discover().map_err(|e| miette!("{e}"))?;
    let data_dir = project.data_dir();
    let mut manifests: Store<Manifest> = Store::open_dir(&data_dir);
    output::report_load_warning(&manifests);
    let waybills: Store<Waybill> = Store::open_dir(&data_dir);
    output::report_load_warning(&waybills);
    let engine = LifecycleEngine;

    match cmd {
        ManifestCommands::New(args) => {
            let mut manifest = Manifest::new(
                args.no,
                args.date.unwrap_or_else(|| Utc::now().date_naive()),
                args.origin.into(),
                project.config().partner_code.clone(),
            );
            manifest.vehicle_no = args.vehicle;
            let label = format!("{} ({})", manifest.manifest_no, manifest.id.short());
            output::report_persist(manifests.add(manifest));
            output::success(format!("Created draft manifest {label}"));
        }
        ManifestCommands::Add(args) => {
            let mut manifest = helpers::find_manifest(&manifests, &args.manifest)?.clone();
            let waybill = helpers::find_waybill(&waybills, &args.waybill)?;
            let added = engine
                .attach_waybill(&mut manifest, waybill.id.clone())
                .map_err(|e| miette!("{e}"))?;
            if !added {
                output::warn(format!(
                    "Waybill {} is already on manifest {}",
                    waybill.waybill_number, manifest.manifest_no
                ));
                return Ok(());
            }
            let message = format!(
                "Added waybill {} to manifest {} ({} box(es))",
                waybill.waybill_number,
                manifest.manifest_no,
                manifest.waybill_ids.len()
            );
            output::report_persist(manifests.update(manifest));
            output::success(message);
        }
        ManifestCommands::Show(args) => {
            let manifest = helpers::find_manifest(&manifests, &args.manifest)?;
            show_manifest(manifest, &waybills);
        }
        ManifestCommands::List => {
            let rows: Vec<ManifestRow> = manifests
                .iter()
                .map(|mf| ManifestRow {
                    id: mf.id.short(),
                    number: mf.manifest_no.clone(),
                    date: mf.date.to_string(),
                    vehicle: mf.vehicle_no.clone().unwrap_or_default(),
                    boxes: mf.waybill_ids.len(),
                    status: mf.status.to_string(),
                })
                .collect();
            if rows.is_empty() {
                println!("No manifests");
            } else {
                println!("{}", Table::new(rows));
            }
        }
        ManifestCommands::Dispatch(args) => {
            let mut manifest = helpers::find_manifest(&manifests, &args.manifest)?.clone();
            // Fail the transition before the assignment policy runs; the
            // remote policy would otherwise make a pointless network call
            if !engine.is_valid_transition(manifest.status, ManifestStatus::Dispatched) {
                return Err(miette!(
                    "{}",
                    LifecycleError::InvalidTransition {
                        from: manifest.status,
                        to: ManifestStatus::Dispatched,
                    }
                ));
            }
            if let Some(vehicle) = args.vehicle {
                manifest.vehicle_no = Some(vehicle);
            }

            let cities = destination_cities(&manifest, &waybills);
            let pallet_count = args.pallets.unwrap_or(project.config().pallet_count);
            let pallets: Vec<u32> = (1..=pallet_count).collect();

            let client = project
                .config()
                .suggestion_client()
                .map_err(|e| miette!("{e}"))?;
            let use_remote = client.is_configured() && !args.no_remote;
            let assignments = if use_remote {
                WithFallback::new(RemotePolicy::new(&client), DeterministicPolicy)
                    .assign(&cities, &pallets)
            } else {
                DeterministicPolicy.assign(&cities, &pallets)
            }
            .map_err(|e| miette!("{e}"))?;

            engine
                .dispatch(&mut manifest, Some(assignments), &cities)
                .map_err(|e| miette!("{e}"))?;

            let summary = format!(
                "Dispatched manifest {} on {} ({} box(es), {} city/cities over {} pallet(s))",
                manifest.manifest_no,
                manifest.vehicle_no.as_deref().unwrap_or(""),
                manifest.waybill_ids.len(),
                cities.len(),
                pallet_count
            );
            output::report_persist(manifests.update(manifest));
            output::success(summary);
        }
        ManifestCommands::Receive(args) => {
            let mut manifest = helpers::find_manifest(&manifests, &args.manifest)?.clone();
            engine.receive(&mut manifest).map_err(|e| miette!("{e}"))?;
            let message = format!(
                "Received manifest {} in full ({} box(es) verified)",
                manifest.manifest_no,
                manifest.verified_box_ids.len()
            );
            output::report_persist(manifests.update(manifest));
            output::success(message);
        }
        ManifestCommands::ShortReceive(args) => {
            let mut manifest = helpers::find_manifest(&manifests, &args.manifest)?.clone();
            let verified = args
                .verified
                .iter()
                .map(|query| helpers::find_waybill(&waybills, query).map(|wb| wb.id.clone()))
                .collect::<Result<Vec<_>>>()?;
            engine
                .short_receive(&mut manifest, verified)
                .map_err(|e| miette!("{e}"))?;

            let missing: Vec<String> = manifest
                .missing_box_ids()
                .iter()
                .map(|id| {
                    waybills
                        .get(id)
                        .map(|wb| wb.waybill_number.clone())
                        .unwrap_or_else(|| id.short())
                })
                .collect();
            let message = format!(
                "Short received manifest {} ({} verified, {} missing: {})",
                manifest.manifest_no,
                manifest.verified_box_ids.len(),
                missing.len(),
                missing.join(", ")
            );
            output::report_persist(manifests.update(manifest));
            output::success(message);
        }
    }
    Ok(())
}

fn show_manifest(manifest: &Manifest, waybills: &Store<Waybill>) {
    println!("id:       {}", manifest.id);
    println!("number:   {}", manifest.manifest_no);
    println!("date:     {}", manifest.date);
    println!("vehicle:  {}", manifest.vehicle_no.as_deref().unwrap_or("-"));
    println!("origin:   {}", manifest.origin);
    println!("status:   {}", manifest.status);
    println!("creator:  {}", manifest.creator_partner_code);

    let resolved = resolve_waybills(manifest, waybills);
    println!(
        "boxes:    {} listed, {} resolvable",
        manifest.waybill_ids.len(),
        resolved.len()
    );
    for wb in &resolved {
        let verified = if manifest.verified_box_ids.contains(&wb.id) {
            " [verified]"
        } else {
            ""
        };
        println!(
            "  - {} {} -> {}{}",
            wb.waybill_number, wb.sender_city, wb.receiver_city, verified
        );
    }

    if !manifest.pallet_assignments.is_empty() {
        println!("pallets:");
        for (city, pallet) in &manifest.pallet_assignments {
            println!("  - {city}: pallet {pallet}");
        }
    }
}
