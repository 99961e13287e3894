mod cluster;
mod dashboard;
mod server;
mod util;

use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::cluster::{SheetNames, WorkbookLayout, load_workbook};
use crate::server::ServerConfig;

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    /// Workbook holding the precomputed clustering result.
    #[arg(long, env = "DATA_PATH", default_value = "data/Clusters_EQS_V2.xlsx")]
    data: PathBuf,

    #[arg(long, env = "PORT", default_value_t = 8050)]
    port: u16,

    #[arg(long, default_value = "0.0.0.0")]
    host: String,

    /// Directory for the optional logo and stylesheet.
    #[arg(long, default_value = "assets")]
    assets_dir: PathBuf,

    #[arg(long, default_value = "logo_medical_san.png")]
    logo: String,

    #[arg(long, default_value = "custom.css")]
    stylesheet: String,

    #[arg(long, default_value = "Regional Clusters – EQS Transition Network")]
    title: String,

    #[arg(long)]
    summary_sheet: Option<String>,

    #[arg(long)]
    references_sheet: Option<String>,

    #[arg(long)]
    equipment_sheet: Option<String>,
}

impl Args {
    fn layout(&self) -> WorkbookLayout {
        let defaults = SheetNames::default();
        WorkbookLayout {
            sheets: SheetNames {
                summary: self.summary_sheet.clone().unwrap_or(defaults.summary),
                references: self.references_sheet.clone().unwrap_or(defaults.references),
                equipment: self.equipment_sheet.clone().unwrap_or(defaults.equipment),
            },
            ..WorkbookLayout::default()
        }
    }

    fn server_config(&self) -> ServerConfig {
        ServerConfig {
            host: self.host.clone(),
            port: self.port,
            title: self.title.clone(),
            assets_dir: self.assets_dir.clone(),
            logo: self.logo.clone(),
            stylesheet: self.stylesheet.clone(),
        }
    }
}

fn main() {
    if let Err(err) = run() {
        eprintln!("{err:?}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();

    let args = Args::parse();

    let context = load_workbook(&args.data, &args.layout())
        .with_context(|| format!("cannot start dashboard without {}", args.data.display()))?;

    server::serve(context, &args.server_config())
}
