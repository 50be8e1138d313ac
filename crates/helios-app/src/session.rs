//! Headless viewer session: builds the scene and drives it frame by frame.

use glam::Vec2;
use helios_config::Config;
use helios_render::{
    FrameUniforms, GeometrySink, build_instances, clear_color, frame_uniforms, ring_instances,
    sync_corona,
};
use helios_scene::controls::DisplaySettings;
use helios_scene::picking::hover;
use helios_scene::{Camera, ControlPanel, SceneError, SolarSystem};
use tracing::{debug, info};

use crate::game_loop::{run_fixed, run_realtime};

/// Summary of a finished run.
#[derive(Clone, Debug, PartialEq)]
pub struct RunReport {
    pub frames: u64,
    pub ticks: u64,
    pub sim_time: f64,
    pub corona_uploads: u64,
    pub uploaded_bytes: u64,
    pub instances: usize,
    pub ring_particles: usize,
    /// Tooltip text for the viewport centre on the last frame, if any.
    pub hovered: Option<String>,
    /// Uniforms of the last frame.
    pub uniforms: FrameUniforms,
}

/// Stands in for the GPU vertex buffer when no device is attached.
#[derive(Debug, Default)]
struct UploadCounter {
    uploads: u64,
    bytes: u64,
}

impl GeometrySink for UploadCounter {
    fn write_positions(&mut self, bytes: &[u8]) {
        self.uploads += 1;
        self.bytes += bytes.len() as u64;
    }
}

/// Build the solar system from `config` and run `config.simulation.frames`
/// frames at the configured rate, off the wall clock when
/// `config.simulation.realtime` is set.
pub fn run(config: &Config) -> Result<RunReport, SceneError> {
    let mut system = SolarSystem::new(config)?;
    let panel = ControlPanel::new(
        DisplaySettings {
            dark_mode: config.scene.dark_mode,
            textures_enabled: config.scene.textures_enabled,
        },
        system.is_paused(),
    );
    let camera = Camera::with_fov_degrees(
        config.scene.fov_degrees,
        config.window.width,
        config.window.height,
    );
    let viewport = Vec2::new(config.window.width as f32, config.window.height as f32);
    let report_interval = config.debug.report_interval;

    info!(
        "Running {} {} frames at {} Hz ({}, clear {:?})",
        config.simulation.frames,
        if config.simulation.realtime { "realtime" } else { "emulated" },
        config.simulation.frame_rate,
        panel.pause_label(),
        clear_color(&panel.display())
    );

    let mut counter = UploadCounter::default();
    let mut instances = 0;
    let mut ring_particles = 0;
    let mut hovered = None;
    let mut uniforms = frame_uniforms(&system.view(), &camera);

    let frame_fn = |ts: f64| {
        system.frame(ts);
        if let Some(star) = system.star_mut() {
            sync_corona(star.corona_mut(), &mut counter);
        }

        let frame = system.view();
        instances = build_instances(&frame, &panel.display()).len();
        ring_particles = ring_instances(&frame).len();
        uniforms = frame_uniforms(&frame, &camera);
        hovered = hover(&frame, &camera, viewport * 0.5, viewport).map(|tooltip| tooltip.text);

        if report_interval > 0 && frame.tick_count() % report_interval == 0 && frame.tick_count() > 0 {
            for body in frame.bodies() {
                debug!(
                    "t={:.3} {} at ({:.2}, {:.2}, {:.2})",
                    frame.sim_time(),
                    body.name,
                    body.world_position.x,
                    body.world_position.y,
                    body.world_position.z
                );
            }
        }
    };

    let (frames, frame_rate) = (config.simulation.frames, config.simulation.frame_rate);
    let scheduler = if config.simulation.realtime {
        run_realtime(frames, frame_rate, frame_fn)
    } else {
        run_fixed(frames, frame_rate, frame_fn)
    };

    let frame = system.view();
    for body in frame.bodies() {
        info!(
            "{:<8} ({:>7.2}, {:>5.2}, {:>7.2}){}",
            body.name,
            body.world_position.x,
            body.world_position.y,
            body.world_position.z,
            if body.visible { "" } else { " hidden" }
        );
    }

    Ok(RunReport {
        frames: scheduler.frame_count(),
        ticks: frame.tick_count(),
        sim_time: frame.sim_time(),
        corona_uploads: counter.uploads,
        uploaded_bytes: counter.bytes,
        instances,
        ring_particles,
        hovered,
        uniforms,
    })
}
