//! The composed solar system and its per-frame tick.

use glam::{Mat4, Quat, Vec3};
use helios_config::{Config, CoronaConfig};
use helios_corona::{CoronaAppearance, CoronaError, CoronaParams, CoronaSurface};
use helios_orbit::{Body, BodyHandle, OrbitalSystem};
use noise::Perlin;

use crate::catalog::{MOON, PLANETS, PlanetInfo, SUN_SPIN_RATE};
use crate::clock::SimulationClock;
use crate::error::SceneError;
use crate::guides::{GUIDE_SEGMENTS, GuideMesh, orbit_guide};
use crate::ring::ring_particles;
use crate::starfield::StarfieldGenerator;

/// The central star: its spin, its scale in the scene and its corona.
pub struct Star {
    corona: CoronaSurface<Perlin>,
    rotation: f64,
    scale: f32,
}

impl Star {
    /// Build the star's corona from configuration.
    ///
    /// # Errors
    ///
    /// Returns a [`CoronaError`] for invalid shape parameters or a scale that
    /// is not finite and positive.
    pub fn new(config: &CoronaConfig) -> Result<Self, CoronaError> {
        if !config.scale.is_finite() || config.scale <= 0.0 {
            return Err(CoronaError::InvalidParameter {
                name: "scale",
                value: f64::from(config.scale),
                reason: "must be finite and positive",
            });
        }
        let params = CoronaParams {
            radius: config.radius,
            detail: config.detail,
            noise_scale: config.noise_scale,
            distortion: config.distortion,
        };
        let corona = CoronaSurface::new(params, Perlin::new(config.noise_seed))?.with_appearance(
            CoronaAppearance {
                base_color: config.base_color,
                opacity: config.opacity,
            },
        );
        Ok(Self {
            corona,
            rotation: 0.0,
            scale: config.scale,
        })
    }

    /// Set the spin to `sim_time * SUN_SPIN_RATE` and re-deform the corona.
    pub fn update(&mut self, sim_time: f64) {
        self.rotation = sim_time * SUN_SPIN_RATE;
        self.corona.deform(sim_time);
    }

    /// Spin about Y in radians.
    pub fn rotation(&self) -> f64 {
        self.rotation
    }

    /// Spin as a rotation about Y.
    pub fn orientation(&self) -> Quat {
        Quat::from_rotation_y(self.rotation as f32)
    }

    /// Uniform scale from corona space into the scene.
    pub fn scale(&self) -> f32 {
        self.scale
    }

    /// Corona space to world: spin about Y, then the uniform scale, centred
    /// on the origin.
    pub fn model_matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(Vec3::splat(self.scale), self.orientation(), Vec3::ZERO)
    }

    /// The deformed corona in corona space.
    pub fn corona(&self) -> &CoronaSurface<Perlin> {
        &self.corona
    }

    /// Mutable corona, for consumers that clear its dirty flag after upload.
    pub fn corona_mut(&mut self) -> &mut CoronaSurface<Perlin> {
        &mut self.corona
    }
}

/// A catalog planet placed in the orbital system.
pub struct Planet {
    info: PlanetInfo,
    handle: BodyHandle,
    moon: Option<BodyHandle>,
    ring: Option<Vec<Vec3>>,
    guide: GuideMesh,
}

impl Planet {
    /// Catalog entry this planet was built from.
    pub fn info(&self) -> &PlanetInfo {
        &self.info
    }

    /// Handle of the planet's body in the orbital system.
    pub fn handle(&self) -> BodyHandle {
        self.handle
    }

    /// Handle of the attached moon, if any.
    pub fn moon(&self) -> Option<BodyHandle> {
        self.moon
    }

    /// Ring particles in the planet's local frame, for ringed planets.
    pub fn ring(&self) -> Option<&[Vec3]> {
        self.ring.as_deref()
    }

    /// Orbit guide annulus at the planet's distance.
    pub fn guide(&self) -> &GuideMesh {
        &self.guide
    }
}

/// Kind of body in a [`BodyView`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BodyKind {
    Planet,
    Moon,
}

/// Read-only snapshot of one body for rendering and picking.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BodyView {
    pub name: &'static str,
    pub kind: BodyKind,
    pub world_position: Vec3,
    pub orientation: Quat,
    /// Rotation and translation, without the size scale.
    pub transform: Mat4,
    /// Sphere radius.
    pub size: f32,
    /// `0xRRGGBB`.
    pub color: u32,
    /// False when the body or its parent is hidden.
    pub visible: bool,
}

impl BodyView {
    /// Transform of a unit sphere scaled to the body's size.
    pub fn model_matrix(&self) -> Mat4 {
        self.transform * Mat4::from_scale(Vec3::splat(self.size))
    }
}

/// Planets, the moon, the optional star, and the scene dressing, all advanced
/// together by [`SolarSystem::frame`].
pub struct SolarSystem {
    orbits: OrbitalSystem,
    planets: Vec<Planet>,
    star: Option<Star>,
    clock: SimulationClock,
    starfield: Vec<Vec3>,
    paused: bool,
    ticks: u64,
}

impl SolarSystem {
    /// Build the catalog into an orbital system.
    ///
    /// When `config.corona.enabled` is false the star asset is treated as
    /// missing: a warning is logged and the system runs without a star.
    ///
    /// # Errors
    ///
    /// Returns [`SceneError::Corona`] for invalid corona parameters and
    /// [`SceneError::Orbit`] for invalid body parameters.
    pub fn new(config: &Config) -> Result<Self, SceneError> {
        let seed = config.simulation.seed;
        let mut orbits = OrbitalSystem::new();
        let mut planets = Vec::with_capacity(PLANETS.len());

        for info in PLANETS {
            let handle = orbits.create_body(info.body_spec())?;
            let moon = if info.has_moon {
                let moon = orbits.create_body(MOON.body_spec())?;
                orbits.attach_child(handle, moon)?;
                Some(moon)
            } else {
                None
            };
            let ring = info
                .has_ring
                .then(|| ring_particles(seed, config.scene.ring_particles, info.size));
            planets.push(Planet {
                info,
                handle,
                moon,
                ring,
                guide: orbit_guide(info.distance as f32, GUIDE_SEGMENTS),
            });
        }

        let star = if config.corona.enabled {
            Some(Star::new(&config.corona)?)
        } else {
            log::warn!("Star asset unavailable, continuing without it");
            None
        };

        let starfield = StarfieldGenerator::new(seed, config.scene.star_count).generate();

        log::info!(
            "Solar system built: {} bodies, star {}",
            orbits.len(),
            if star.is_some() { "present" } else { "absent" }
        );

        Ok(Self {
            orbits,
            planets,
            star,
            clock: SimulationClock::new(config.simulation.time_scale),
            starfield,
            paused: config.simulation.start_paused,
            ticks: 0,
        })
    }

    /// One composite tick at `sim_time`: every body (parents before children),
    /// then the star's spin and corona. Ignores the pause flag.
    pub fn advance(&mut self, sim_time: f64) {
        self.orbits.tick(sim_time);
        if let Some(star) = &mut self.star {
            star.update(sim_time);
        }
        self.ticks += 1;
    }

    /// Drive one displayed frame from the host's millisecond timestamp.
    ///
    /// While paused nothing advances and the returned view repeats the last
    /// state. Otherwise the clock and the full composite tick complete before
    /// the view is handed out.
    pub fn frame(&mut self, timestamp_ms: f64) -> FrameView<'_> {
        let running = !self.paused;
        let sim_time = self.clock.advance(timestamp_ms, running);
        if running {
            self.advance(sim_time);
        }
        self.view()
    }

    /// View of the current state without advancing.
    pub fn view(&self) -> FrameView<'_> {
        FrameView { system: self }
    }

    /// Whether frames are currently skipped.
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Pause or resume. Resuming continues from the paused simulation time.
    pub fn set_paused(&mut self, paused: bool) {
        self.paused = paused;
    }

    /// Flip the pause flag and return the new value.
    pub fn toggle_pause(&mut self) -> bool {
        self.paused = !self.paused;
        self.paused
    }

    /// Set a planet's orbit speed in radians per tick. Takes effect on the next tick.
    pub fn set_orbit_speed(&mut self, planet: usize, speed: f64) -> Result<(), SceneError> {
        let handle = self.planet(planet)?.handle;
        self.orbits.set_orbit_speed(handle, speed)?;
        Ok(())
    }

    /// Show or hide a planet. Its moon and ring follow it.
    pub fn set_visible(&mut self, planet: usize, visible: bool) -> Result<(), SceneError> {
        let handle = self.planet(planet)?.handle;
        self.orbits.set_visible(handle, visible)?;
        Ok(())
    }

    /// Orbital state of the planet at catalog index `planet`.
    pub fn planet_body(&self, planet: usize) -> Result<&Body, SceneError> {
        let handle = self.planet(planet)?.handle;
        Ok(self.orbits.body(handle)?)
    }

    /// Planets in catalog order.
    pub fn planets(&self) -> &[Planet] {
        &self.planets
    }

    /// The underlying orbital system, for direct body queries.
    pub fn orbits(&self) -> &OrbitalSystem {
        &self.orbits
    }

    /// The star, absent when its asset is unavailable.
    pub fn star(&self) -> Option<&Star> {
        self.star.as_ref()
    }

    pub fn star_mut(&mut self) -> Option<&mut Star> {
        self.star.as_mut()
    }

    /// Background star positions.
    pub fn starfield(&self) -> &[Vec3] {
        &self.starfield
    }

    /// Simulation seconds accumulated while running.
    pub fn sim_time(&self) -> f64 {
        self.clock.sim_time()
    }

    /// Composite ticks performed so far.
    pub fn tick_count(&self) -> u64 {
        self.ticks
    }

    fn planet(&self, planet: usize) -> Result<&Planet, SceneError> {
        self.planets.get(planet).ok_or(SceneError::UnknownPlanet(planet))
    }

    fn body_view(
        &self,
        handle: BodyHandle,
        name: &'static str,
        kind: BodyKind,
        size: f32,
        color: u32,
        parent_visible: bool,
    ) -> Option<BodyView> {
        let body = self.orbits.body(handle).ok()?;
        let world_position = self.orbits.world_position(handle).ok()?;
        let orientation = self.orbits.orientation(handle).ok()?;
        Some(BodyView {
            name,
            kind,
            world_position,
            orientation,
            transform: Mat4::from_rotation_translation(orientation, world_position),
            size,
            color,
            visible: parent_visible && body.is_visible(),
        })
    }
}

/// Read-only access to the system as of the last completed tick.
#[derive(Clone, Copy)]
pub struct FrameView<'a> {
    system: &'a SolarSystem,
}

impl<'a> FrameView<'a> {
    /// Every planet followed by its moon, in catalog order.
    pub fn bodies(&self) -> impl Iterator<Item = BodyView> + 'a {
        let system = self.system;
        system.planets.iter().flat_map(move |planet| {
            let info = &planet.info;
            let planet_view =
                system.body_view(planet.handle, info.name, BodyKind::Planet, info.size, info.color, true);
            let parent_visible = planet_view.is_some_and(|view| view.visible);
            let moon_view = planet.moon.and_then(|moon| {
                system.body_view(moon, MOON.name, BodyKind::Moon, MOON.size, MOON.color, parent_visible)
            });
            planet_view.into_iter().chain(moon_view)
        })
    }

    pub fn planets(&self) -> &'a [Planet] {
        &self.system.planets
    }

    /// The corona, absent when the star asset is unavailable.
    pub fn corona(&self) -> Option<&'a CoronaSurface<Perlin>> {
        self.system.star.as_ref().map(Star::corona)
    }

    /// Star spin in radians, absent when the star asset is unavailable.
    pub fn sun_rotation(&self) -> Option<f64> {
        self.system.star.as_ref().map(Star::rotation)
    }

    /// Corona space to world, absent when the star asset is unavailable.
    pub fn sun_transform(&self) -> Option<Mat4> {
        self.system.star.as_ref().map(Star::model_matrix)
    }

    pub fn starfield(&self) -> &'a [Vec3] {
        &self.system.starfield
    }

    pub fn sim_time(&self) -> f64 {
        self.system.sim_time()
    }

    /// Whether this frame was skipped.
    pub fn paused(&self) -> bool {
        self.system.paused
    }

    /// Composite ticks performed as of this view.
    pub fn tick_count(&self) -> u64 {
        self.system.ticks
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_config() -> Config {
        let mut config = Config::default();
        config.corona.detail = 2;
        config.scene.ring_particles = 32;
        config.scene.star_count = 32;
        config
    }

    fn position_of(frame: &FrameView<'_>, name: &str) -> Vec3 {
        frame.bodies().find(|b| b.name == name).unwrap().world_position
    }

    #[test]
    fn test_catalog_is_built() {
        let system = SolarSystem::new(&small_config()).unwrap();
        assert_eq!(system.planets().len(), 8);
        assert_eq!(system.orbits().len(), 9);
        assert!(system.planets()[2].moon().is_some());
        assert_eq!(system.planets()[5].ring().map(<[Vec3]>::len), Some(32));
        assert!(system.planets()[0].ring().is_none());
        assert_eq!(system.starfield().len(), 32);
        assert!(system.star().is_some());
    }

    #[test]
    fn test_frame_advances_everything_once() {
        let mut system = SolarSystem::new(&small_config()).unwrap();
        let frame = system.frame(16.0);
        assert_eq!(frame.tick_count(), 1);
        assert!((frame.sim_time() - 0.016).abs() < 1e-12);
        assert!((frame.sun_rotation().unwrap() - 0.016 * 0.2).abs() < 1e-12);
        assert!(frame.corona().unwrap().is_dirty());

        let mercury = system.planet_body(0).unwrap();
        assert!((mercury.orbit_angle() - 0.02).abs() < 1e-12);
        assert!((mercury.spin_angle() - 0.01).abs() < 1e-12);
    }

    #[test]
    fn test_paused_frames_change_nothing() {
        let mut system = SolarSystem::new(&small_config()).unwrap();
        system.frame(16.0);
        let before: Vec<_> = system.view().bodies().collect();
        let corona_before = system.star().unwrap().corona().displaced().to_vec();

        system.set_paused(true);
        for ts in [32.0, 48.0, 5000.0] {
            let frame = system.frame(ts);
            assert!(frame.paused());
            assert_eq!(frame.tick_count(), 1);
        }
        let after: Vec<_> = system.view().bodies().collect();
        assert_eq!(before, after);
        assert_eq!(system.star().unwrap().corona().displaced(), corona_before.as_slice());

        system.set_paused(false);
        let frame = system.frame(5016.0);
        assert!((frame.sim_time() - 0.032).abs() < 1e-12);
    }

    #[test]
    fn test_pause_resume_matches_uninterrupted_ticks() {
        let mut a = SolarSystem::new(&small_config()).unwrap();
        let mut b = SolarSystem::new(&small_config()).unwrap();
        for i in 1..=5 {
            a.frame(i as f64 * 16.0);
        }
        b.frame(16.0);
        b.frame(32.0);
        b.set_paused(true);
        b.frame(48.0);
        b.frame(64.0);
        b.set_paused(false);
        for ts in [80.0, 96.0, 112.0] {
            b.frame(ts);
        }
        let pa: Vec<_> = a.view().bodies().map(|v| v.world_position).collect();
        let pb: Vec<_> = b.view().bodies().map(|v| v.world_position).collect();
        assert_eq!(pa, pb);
    }

    #[test]
    fn test_moon_follows_earth() {
        let mut system = SolarSystem::new(&small_config()).unwrap();
        for i in 1..=40 {
            system.frame(i as f64 * 16.0);
        }
        let frame = system.view();
        let earth = position_of(&frame, "Earth");
        let moon = position_of(&frame, "Moon");
        assert!(((moon - earth).length() - 2.0).abs() < 1e-4);
        assert!((earth.length() - 16.0).abs() < 1e-3);
    }

    #[test]
    fn test_invalid_corona_fails_construction() {
        let mut config = small_config();
        config.corona.radius = -5.0;
        assert!(matches!(
            SolarSystem::new(&config),
            Err(SceneError::Corona(CoronaError::InvalidParameter { name: "radius", .. }))
        ));

        let mut config = small_config();
        config.corona.scale = 0.0;
        assert!(matches!(
            SolarSystem::new(&config),
            Err(SceneError::Corona(CoronaError::InvalidParameter { name: "scale", .. }))
        ));
    }

    #[test]
    fn test_corona_stays_inside_mercury_orbit() {
        let mut system = SolarSystem::new(&Config::default()).unwrap();
        let frame = system.frame(16.0);
        let transform = frame.sun_transform().unwrap();
        let mercury = PLANETS[0].distance as f32;
        let max_radius = frame
            .corona()
            .unwrap()
            .displaced()
            .iter()
            .map(|v| transform.transform_point3(Vec3::from_array(*v)).length())
            .fold(0.0_f32, f32::max);
        assert!(max_radius <= 5.5 + 0.05, "corona reaches {max_radius}");
        assert!(max_radius < mercury);
    }

    #[test]
    fn test_sun_transform_spins_and_scales() {
        let mut system = SolarSystem::new(&small_config()).unwrap();
        system.frame(5000.0);
        let star = system.star().unwrap();
        assert_eq!(star.scale(), 0.5);
        let x = star.model_matrix().transform_vector3(Vec3::X);
        assert!((x.length() - 0.5).abs() < 1e-6);
        let expected = Quat::from_rotation_y(1.0) * Vec3::X * 0.5;
        assert!((x - expected).length() < 1e-5);
    }

    #[test]
    fn test_missing_star_still_ticks_bodies() {
        let mut config = small_config();
        config.corona.enabled = false;
        let mut system = SolarSystem::new(&config).unwrap();
        assert!(system.star().is_none());
        let frame = system.frame(16.0);
        assert!(frame.corona().is_none());
        assert!(frame.sun_rotation().is_none());
        assert_eq!(frame.tick_count(), 1);
        assert!((system.planet_body(2).unwrap().orbit_angle() - 0.01).abs() < 1e-12);
    }

    #[test]
    fn test_hidden_planet_hides_its_moon() {
        let mut system = SolarSystem::new(&small_config()).unwrap();
        system.set_visible(2, false).unwrap();
        let frame = system.view();
        let moon = frame.bodies().find(|b| b.kind == BodyKind::Moon).unwrap();
        assert!(!moon.visible);
        assert!(frame.bodies().filter(|b| b.name != "Earth" && b.name != "Moon").all(|b| b.visible));
    }

    #[test]
    fn test_speed_change_applies_next_tick() {
        let mut system = SolarSystem::new(&small_config()).unwrap();
        system.frame(16.0);
        system.set_orbit_speed(4, 0.05).unwrap();
        system.frame(32.0);
        let jupiter = system.planet_body(4).unwrap();
        assert!((jupiter.orbit_angle() - (0.006 + 0.05)).abs() < 1e-12);
        assert_eq!(system.set_orbit_speed(99, 0.01), Err(SceneError::UnknownPlanet(99)));
    }

    #[test]
    fn test_start_paused_from_config() {
        let mut config = small_config();
        config.simulation.start_paused = true;
        let mut system = SolarSystem::new(&config).unwrap();
        let frame = system.frame(1000.0);
        assert_eq!(frame.tick_count(), 0);
        assert_eq!(frame.sim_time(), 0.0);
    }

    #[test]
    fn test_model_matrix_scales_unit_sphere() {
        let system = SolarSystem::new(&small_config()).unwrap();
        let frame = system.view();
        let jupiter = frame.bodies().find(|b| b.name == "Jupiter").unwrap();
        let surface = jupiter.model_matrix().transform_point3(Vec3::Y);
        assert!(((surface - jupiter.world_position).length() - 3.0).abs() < 1e-4);
    }
}
