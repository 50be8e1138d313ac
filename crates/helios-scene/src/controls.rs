//! Control-panel state and the events it feeds into the scene.
//!
//! The panel owns presentation concerns (button labels, background color,
//! slider snapping). The orbital engine accepts any finite speed; only the
//! slider constrains values to its range.

use crate::catalog::PLANETS;
use crate::error::SceneError;
use crate::system::SolarSystem;

pub const SPEED_SLIDER_MIN: f64 = 0.0;
pub const SPEED_SLIDER_MAX: f64 = 0.05;
pub const SPEED_SLIDER_STEP: f64 = 0.001;

pub const DARK_BACKGROUND: u32 = 0x000000;
pub const LIGHT_BACKGROUND: u32 = 0xffffff;

/// Clamp a slider value to its range and snap it to the nearest step.
pub fn snap_speed(value: f64) -> f64 {
    if !value.is_finite() {
        return SPEED_SLIDER_MIN;
    }
    let clamped = value.clamp(SPEED_SLIDER_MIN, SPEED_SLIDER_MAX);
    let steps = ((clamped - SPEED_SLIDER_MIN) / SPEED_SLIDER_STEP).round();
    (SPEED_SLIDER_MIN + steps * SPEED_SLIDER_STEP).min(SPEED_SLIDER_MAX)
}

/// Label shown next to a speed slider.
pub fn speed_label(value: f64) -> String {
    format!("Speed: {value:.3}")
}

/// Text of the pause button for the given state.
pub fn pause_label(paused: bool) -> &'static str {
    if paused { "Resume" } else { "Pause" }
}

/// Background and material toggles.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DisplaySettings {
    pub dark_mode: bool,
    pub textures_enabled: bool,
}

impl DisplaySettings {
    /// `0xRRGGBB` clear color.
    pub fn background_color(&self) -> u32 {
        if self.dark_mode {
            DARK_BACKGROUND
        } else {
            LIGHT_BACKGROUND
        }
    }
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            dark_mode: true,
            textures_enabled: true,
        }
    }
}

/// A user interaction with the panel.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ControlEvent {
    TogglePause,
    ToggleDarkMode,
    ToggleTextures,
    SetVisible { planet: usize, visible: bool },
    SetSpeed { planet: usize, value: f64 },
}

/// Per-planet slider row.
#[derive(Clone, Debug, PartialEq)]
pub struct PlanetControl {
    pub name: &'static str,
    pub visible: bool,
    pub speed: f64,
}

impl PlanetControl {
    pub fn label(&self) -> String {
        speed_label(self.speed)
    }
}

/// Mirror of everything the panel displays.
#[derive(Clone, Debug, PartialEq)]
pub struct ControlPanel {
    display: DisplaySettings,
    planets: Vec<PlanetControl>,
    paused: bool,
}

impl ControlPanel {
    pub fn new(display: DisplaySettings, paused: bool) -> Self {
        let planets = PLANETS
            .iter()
            .map(|info| PlanetControl {
                name: info.name,
                visible: true,
                speed: snap_speed(info.orbit_speed),
            })
            .collect();
        Self {
            display,
            planets,
            paused,
        }
    }

    /// Apply an event to the panel and to the scene it controls.
    pub fn handle(&mut self, system: &mut SolarSystem, event: ControlEvent) -> Result<(), SceneError> {
        match event {
            ControlEvent::TogglePause => {
                self.paused = system.toggle_pause();
                log::info!("Simulation {}", if self.paused { "paused" } else { "resumed" });
            }
            ControlEvent::ToggleDarkMode => {
                self.display.dark_mode = !self.display.dark_mode;
                log::debug!("Background set to {:06x}", self.display.background_color());
            }
            ControlEvent::ToggleTextures => {
                self.display.textures_enabled = !self.display.textures_enabled;
                log::debug!("Textures enabled: {}", self.display.textures_enabled);
            }
            ControlEvent::SetVisible { planet, visible } => {
                let row = self.planets.get_mut(planet).ok_or(SceneError::UnknownPlanet(planet))?;
                system.set_visible(planet, visible)?;
                row.visible = visible;
            }
            ControlEvent::SetSpeed { planet, value } => {
                let row = self.planets.get_mut(planet).ok_or(SceneError::UnknownPlanet(planet))?;
                let speed = snap_speed(value);
                system.set_orbit_speed(planet, speed)?;
                row.speed = speed;
                log::debug!("{} orbit speed set to {speed:.3}", row.name);
            }
        }
        Ok(())
    }

    pub fn display(&self) -> DisplaySettings {
        self.display
    }

    pub fn planets(&self) -> &[PlanetControl] {
        &self.planets
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn pause_label(&self) -> &'static str {
        pause_label(self.paused)
    }
}
