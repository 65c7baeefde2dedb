mod logging;
mod menu;

use std::io;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing::info;
use vet_clinic_core::clock::SystemClock;
use vet_clinic_core::entropy::{Entropy, RngEntropy};
use vet_clinic_core::{Clinic, ClinicConfig};

#[derive(Parser)]
#[command(name = "vet-clinic")]
#[command(about = "Menu-driven records for a small veterinary clinic.")]
pub struct CommandLine {
    /// JSON configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,
    /// Start without the sample animals, staff and stock
    #[arg(long)]
    pub no_seed: bool,
    /// Seed for ids and staff assignment
    #[arg(long, value_name = "SEED")]
    pub rng_seed: Option<u64>,
    /// Log JSON lines instead of text
    #[arg(long)]
    pub log_json: bool,
}

fn main() -> anyhow::Result<()> {
    let args = CommandLine::parse();
    logging::init(args.log_json);

    let config = match &args.config {
        Some(path) => ClinicConfig::from_path(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => ClinicConfig::default(),
    };

    let entropy: Box<dyn Entropy> = match args.rng_seed {
        Some(seed) => Box::new(RngEntropy::seeded(seed)),
        None => Box::new(RngEntropy::from_os()),
    };

    let mut clinic = Clinic::new(config, entropy, Box::new(SystemClock));
    if !args.no_seed {
        let seed = clinic.config().seed.clone();
        let ids = clinic.seed(&seed);
        info!(animals = ids.animals.len(), staff = ids.staff.len(), "clinic seeded");
    }

    let stdin = io::stdin();
    let stdout = io::stdout();
    menu::Menu::new(&mut clinic, stdin.lock(), stdout.lock()).run()
}
