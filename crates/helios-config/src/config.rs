//! Configuration structs with sensible defaults and RON persistence.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

const CONFIG_FILE: &str = "config.ron";

/// Top-level viewer configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Window / viewport settings.
    pub window: WindowConfig,
    /// Clock and frame-driver settings.
    pub simulation: SimulationConfig,
    /// Star corona shape and look.
    pub corona: CoronaConfig,
    /// Scene dressing and display toggles.
    pub scene: SceneConfig,
    /// Debug/development settings.
    pub debug: DebugConfig,
}

/// Viewport configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct WindowConfig {
    /// Viewport width in logical pixels.
    pub width: u32,
    /// Viewport height in logical pixels.
    pub height: u32,
    /// Window title.
    pub title: String,
}

/// Simulation clock configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SimulationConfig {
    /// Simulation seconds per wall-clock millisecond.
    pub time_scale: f64,
    /// Start with the simulation paused.
    pub start_paused: bool,
    /// Frames per second the headless driver emulates.
    pub frame_rate: u32,
    /// Number of frames the headless driver runs before exiting.
    pub frames: u64,
    /// Seed for starfield and ring particle placement.
    pub seed: u64,
    /// Pace frames off the wall clock instead of emulating them.
    pub realtime: bool,
}

/// Corona construction parameters. Color and opacity are passed through to
/// the renderer untouched.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CoronaConfig {
    /// Whether the star asset is available. When false the scene runs without
    /// a star.
    pub enabled: bool,
    pub radius: f64,
    /// Icosphere subdivision level.
    pub detail: u32,
    pub noise_scale: f64,
    pub distortion: f64,
    /// Seed of the Perlin noise field.
    pub noise_seed: u32,
    /// `0xRRGGBB`.
    pub base_color: u32,
    pub opacity: f32,
    /// Uniform scale from corona space into the scene.
    pub scale: f32,
}

/// Scene dressing and display toggles.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SceneConfig {
    /// Number of background stars.
    pub star_count: u32,
    /// Number of particles in Saturn's ring.
    pub ring_particles: u32,
    /// Black background when true, white when false.
    pub dark_mode: bool,
    /// Draw planets with their texture maps.
    pub textures_enabled: bool,
    /// Vertical field of view in degrees.
    pub fov_degrees: f32,
}

/// Debug/development configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DebugConfig {
    /// Log level override (e.g., "debug", "info", "warn").
    pub log_level: String,
    /// Log the state of every body each time this many frames pass (0 = never).
    pub report_interval: u64,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 720,
            title: "Helios".to_string(),
        }
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            time_scale: 0.001,
            start_paused: false,
            frame_rate: 60,
            frames: 600,
            seed: 42,
            realtime: false,
        }
    }
}

impl Default for CoronaConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            radius: 10.0,
            detail: 18,
            noise_scale: 1.0,
            distortion: 20.0,
            noise_seed: 0,
            base_color: 0xffae42,
            opacity: 0.75,
            scale: 0.5,
        }
    }
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            star_count: 3000,
            ring_particles: 2500,
            dark_mode: true,
            textures_enabled: true,
            fov_degrees: 75.0,
        }
    }
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            report_interval: 0,
        }
    }
}

// --- Validation ---

impl Config {
    /// Reject values that parse but cannot drive the frame loop.
    ///
    /// Corona shape parameters are checked by the corona itself on construction.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |field, reason: &str| {
            Err(ConfigError::Invalid {
                field,
                reason: reason.to_string(),
            })
        };
        if self.window.width == 0 || self.window.height == 0 {
            return invalid("window", "width and height must be non-zero");
        }
        if !self.simulation.time_scale.is_finite() || self.simulation.time_scale <= 0.0 {
            return invalid("simulation.time_scale", "must be finite and positive");
        }
        if self.simulation.frame_rate == 0 {
            return invalid("simulation.frame_rate", "must be non-zero");
        }
        if !(1.0..180.0).contains(&self.scene.fov_degrees) {
            return invalid("scene.fov_degrees", "must lie in [1, 180)");
        }
        Ok(())
    }
}

// --- Load / Save / Reload ---

impl Config {
    /// Load config from the given directory, or create a default config file.
    pub fn load_or_create(config_dir: &Path) -> Result<Self, ConfigError> {
        let config_path = config_dir.join(CONFIG_FILE);

        if config_path.exists() {
            let config = Self::read(&config_path)?;
            log::info!("Loaded config from {}", config_path.display());
            Ok(config)
        } else {
            let config = Config::default();
            config.save(config_dir)?;
            log::info!("Created default config at {}", config_path.display());
            Ok(config)
        }
    }

    /// Save config to the given directory as `config.ron`.
    pub fn save(&self, config_dir: &Path) -> Result<(), ConfigError> {
        std::fs::create_dir_all(config_dir).map_err(|source| ConfigError::Write {
            path: config_dir.to_path_buf(),
            source,
        })?;

        let config_path = config_dir.join(CONFIG_FILE);
        let pretty = ron::ser::PrettyConfig::new()
            .depth_limit(3)
            .separate_tuple_members(true)
            .enumerate_arrays(false);

        let serialized = ron::ser::to_string_pretty(self, pretty).map_err(ConfigError::Serialize)?;

        std::fs::write(&config_path, serialized).map_err(|source| ConfigError::Write {
            path: config_path.clone(),
            source,
        })?;
        Ok(())
    }

    /// Hot-reload: returns `Some(new_config)` if the file changed, `None` otherwise.
    pub fn reload(&self, config_dir: &Path) -> Result<Option<Self>, ConfigError> {
        let new_config = Self::read(&config_dir.join(CONFIG_FILE))?;

        if &new_config != self {
            log::info!("Config reloaded with changes");
            Ok(Some(new_config))
        } else {
            Ok(None)
        }
    }

    fn read(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        ron::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}
