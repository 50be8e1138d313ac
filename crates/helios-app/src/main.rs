//! The binary entry point for the helios viewer.

use clap::Parser;
use helios_app::platform::PlatformDirs;
use helios_app::session;
use helios_config::{CliArgs, Config};
use tracing::{error, info};

fn main() {
    let args = CliArgs::parse();

    // Resolve config and log directories
    let dirs = match args.config.clone() {
        Some(dir) => PlatformDirs::from_config_dir(dir),
        None => match PlatformDirs::resolve() {
            Ok(dirs) => dirs,
            Err(e) => {
                eprintln!("Failed to resolve platform directories: {e}");
                std::process::exit(1);
            }
        },
    };
    if let Err(e) = dirs.create_dirs() {
        eprintln!("Failed to create platform directories: {e}");
    }

    // Load or create config, then apply CLI overrides
    let mut config = Config::load_or_create(&dirs.config_dir).unwrap_or_else(|e| {
        eprintln!("Failed to load config: {e}, using defaults");
        Config::default()
    });
    config.apply_cli_overrides(&args);
    if let Err(e) = config.validate() {
        eprintln!("Invalid configuration: {e}");
        std::process::exit(2);
    }

    let log_file = helios_log::init_logging(Some(&dirs.log_dir), cfg!(debug_assertions), Some(&config));

    info!("{}", config.window.title);
    info!("  config: {}", dirs.config_dir.display());
    if let Some(path) = log_file {
        info!("  log:    {}", path.display());
    }

    match session::run(&config) {
        Ok(report) => {
            info!(
                "Finished {} frames: {} ticks, t={:.3}s, {} corona uploads ({} bytes)",
                report.frames,
                report.ticks,
                report.sim_time,
                report.corona_uploads,
                report.uploaded_bytes
            );
            if let Some(name) = report.hovered {
                info!("Under the cursor at viewport centre: {name}");
            }
        }
        Err(e) => {
            error!("Scene construction failed: {e}");
            std::process::exit(1);
        }
    }
}
