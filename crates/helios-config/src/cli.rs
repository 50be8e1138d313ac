//! Command-line argument parsing for the helios viewer.

use std::path::PathBuf;

use clap::Parser;

use crate::Config;

/// Helios command-line arguments.
///
/// CLI values override settings loaded from `config.ron`.
#[derive(Parser, Debug, Default)]
#[command(name = "helios", about = "Animated solar system model")]
pub struct CliArgs {
    /// Viewport width.
    #[arg(long)]
    pub width: Option<u32>,

    /// Viewport height.
    #[arg(long)]
    pub height: Option<u32>,

    /// Number of frames to run.
    #[arg(long)]
    pub frames: Option<u64>,

    /// Start paused.
    #[arg(long)]
    pub paused: Option<bool>,

    /// Seed for starfield and ring particles.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Pace frames off the wall clock.
    #[arg(long)]
    pub realtime: bool,

    /// Corona noise amplitude.
    #[arg(long)]
    pub noise_scale: Option<f64>,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Path to config directory (overrides default location).
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl Config {
    /// Apply CLI overrides to a loaded config.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(w) = args.width {
            self.window.width = w;
        }
        if let Some(h) = args.height {
            self.window.height = h;
        }
        if let Some(frames) = args.frames {
            self.simulation.frames = frames;
        }
        if let Some(paused) = args.paused {
            self.simulation.start_paused = paused;
        }
        if let Some(seed) = args.seed {
            self.simulation.seed = seed;
        }
        if args.realtime {
            self.simulation.realtime = true;
        }
        if let Some(scale) = args.noise_scale {
            self.corona.noise_scale = scale;
        }
        if let Some(ref level) = args.log_level {
            self.debug.log_level = level.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_override() {
        let mut config = Config::default();
        let args = CliArgs {
            width: Some(1920),
            frames: Some(5),
            noise_scale: Some(3.0),
            ..CliArgs::default()
        };
        config.apply_cli_overrides(&args);
        assert_eq!(config.window.width, 1920);
        assert_eq!(config.simulation.frames, 5);
        assert_eq!(config.corona.noise_scale, 3.0);
        // Non-overridden fields retain defaults
        assert_eq!(config.window.height, 720);
        assert_eq!(config.simulation.seed, 42);
    }

    #[test]
    fn test_cli_no_override() {
        let original = Config::default();
        let mut config = Config::default();
        config.apply_cli_overrides(&CliArgs::default());
        assert_eq!(config, original);
    }

    #[test]
    fn test_cli_parses_flags() {
        let args = CliArgs::parse_from(["helios", "--paused", "true", "--seed", "9"]);
        assert_eq!(args.paused, Some(true));
        assert_eq!(args.seed, Some(9));
        assert!(!args.realtime);
        assert!(args.config.is_none());
    }

    #[test]
    fn test_realtime_flag_enables_wall_clock_driver() {
        let args = CliArgs::parse_from(["helios", "--realtime"]);
        let mut config = Config::default();
        config.apply_cli_overrides(&args);
        assert!(config.simulation.realtime);
    }
}
