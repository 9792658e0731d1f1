use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::Parser;
use glam::Vec3;

use varonia_backoffice::messaging::{format_message, SoftState};
use varonia_backoffice::paths::{ConfigDirectory, FixedDirectory, LocalLowDirectory};
use varonia_backoffice::store::SpatialStore;
use varonia_core::{Boundary, SpatialConfig};

/// Inspect a Varonia spatial configuration in engine coordinates.
#[derive(Parser, Debug)]
#[command(name = "varonia-inspect", version)]
struct Cli {
    /// Config directory holding NewSpatial.json
    #[arg(long, env = "VARONIA_CONFIG_DIR")]
    dir: Option<PathBuf>,

    /// Spatial file to load instead of the directory default
    #[arg(long)]
    file: Option<PathBuf>,

    /// Print the converted snapshot as JSON
    #[arg(long)]
    json: bool,

    /// Also print a back-office message with this method name
    #[arg(long)]
    message: Option<String>,

    /// Caller device id for --message
    #[arg(long, default_value_t = 0)]
    client_id: i32,

    /// Soft state code for --message
    #[arg(long)]
    soft_state: Option<i32>,
}

impl Cli {
    fn spatial_path(&self) -> anyhow::Result<PathBuf> {
        if let Some(file) = &self.file {
            return Ok(file.clone());
        }
        let path = match &self.dir {
            Some(dir) => FixedDirectory::new(dir).spatial_path(),
            None => LocalLowDirectory.spatial_path(),
        };
        path.context("could not resolve the Varonia config directory")
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let cli = Cli::parse();

    if let Some(method) = &cli.message {
        if let Some(code) = cli.soft_state {
            if SoftState::from_code(code).is_none() {
                log::warn!("soft state {code} is not a known code");
            }
        }
        println!("{}", format_message(cli.client_id, method, cli.soft_state));
    }

    let path = cli.spatial_path()?;
    let store = SpatialStore::new();
    let config = match store.reload(&path) {
        Ok(config) => config,
        Err(e) if e.is_not_found() => {
            log::info!("no spatial config yet at {} (first run)", path.display());
            return Ok(());
        }
        Err(e) => bail!(e),
    };

    if cli.json {
        let text = serde_json::to_string_pretty(config.as_ref())
            .context("failed to serialize spatial config")?;
        println!("{text}");
        return Ok(());
    }

    print_summary(&config, store.warnings().len());
    Ok(())
}

fn print_summary(config: &SpatialConfig, warning_count: usize) {
    println!("{} [{}]", config.name, config.id);
    println!("  area:        {}", config.area_value);
    println!("  max rect:    {}", config.max_rect);
    println!("  group:       {}", config.group_name);
    println!("  max players: {}", config.max_player);
    println!("  multiplier:  {}", config.multiplier);
    println!("  ortho key:   {}", config.ortho_key);
    println!("  sync pos:    {}", fmt_vec(config.sync_position));
    println!("  sync rot:    {}", config.sync_rotation);
    println!("  warnings:    {warning_count}");

    match config.main_boundary() {
        Some(main) => print_boundary("main", main),
        None => println!("  main: none"),
    }
    for sub in config.sub_boundaries() {
        print_boundary("sub", &sub);
    }
}

fn print_boundary(kind: &str, b: &Boundary) {
    let centroid = b.centroid().map(fmt_vec).unwrap_or_else(|| "-".into());
    println!(
        "  {kind:<4} {:<16} points={:<3} perimeter={:.1}cm centroid={} visible={} reverse={}",
        b.id,
        b.points.len(),
        b.perimeter(),
        centroid,
        b.visible,
        b.reverse
    );
}

fn fmt_vec(v: Vec3) -> String {
    format!("X={:.2} Y={:.2} Z={:.2}", v.x, v.y, v.z)
}
