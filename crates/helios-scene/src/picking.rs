//! Pointer picking: which planet, if any, is under the cursor.
//!
//! The contract is small. A screen position and the current body positions go
//! in; the name of the nearest intersected planet and a tooltip anchor come
//! out. Planets are treated as spheres of their catalog size.

use glam::{Vec2, Vec3};

use crate::camera::{Camera, cursor_to_ndc};
use crate::system::{BodyKind, FrameView};

/// Tooltip offset from the cursor, in pixels.
pub const TOOLTIP_OFFSET: Vec2 = Vec2::new(10.0, 10.0);

/// A half-line with a unit direction.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Ray {
    /// Build a ray; `direction` is normalized (a zero direction stays zero and hits nothing).
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: direction.normalize_or_zero(),
        }
    }

    /// Distance along the ray to the first intersection with a sphere, if any
    /// lies in front of the origin. An origin inside the sphere reports the exit point.
    pub fn intersect_sphere(&self, center: Vec3, radius: f32) -> Option<f32> {
        if self.direction == Vec3::ZERO {
            return None;
        }
        let to_origin = self.origin - center;
        let b = to_origin.dot(self.direction);
        let c = to_origin.length_squared() - radius * radius;
        let discriminant = b * b - c;
        if discriminant < 0.0 {
            return None;
        }
        let root = discriminant.sqrt();
        let near = -b - root;
        let far = -b + root;
        if near >= 0.0 {
            Some(near)
        } else if far >= 0.0 {
            Some(far)
        } else {
            None
        }
    }
}

/// The nearest body hit by a ray.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PickHit {
    pub name: &'static str,
    pub distance: f32,
}

/// Text and pixel anchor of the hover tooltip.
#[derive(Clone, Debug, PartialEq)]
pub struct Tooltip {
    pub text: String,
    pub left: f32,
    pub top: f32,
}

/// Nearest visible planet along `ray`. Moons and hidden planets are not pickable.
pub fn pick(frame: &FrameView<'_>, ray: &Ray) -> Option<PickHit> {
    frame
        .bodies()
        .filter(|body| body.kind == BodyKind::Planet && body.visible)
        .filter_map(|body| {
            ray.intersect_sphere(body.world_position, body.size)
                .map(|distance| PickHit {
                    name: body.name,
                    distance,
                })
        })
        .min_by(|a, b| a.distance.total_cmp(&b.distance))
}

/// Hover query for a cursor at pixel `cursor` in a `viewport` of the given size.
pub fn hover(frame: &FrameView<'_>, camera: &Camera, cursor: Vec2, viewport: Vec2) -> Option<Tooltip> {
    if viewport.x <= 0.0 || viewport.y <= 0.0 {
        return None;
    }
    let ndc = cursor_to_ndc(cursor.x, cursor.y, viewport.x, viewport.y);
    let ray = camera.ray_from_ndc(ndc);
    let hit = pick(frame, &ray)?;
    log::trace!("Pointer over {} at distance {:.2}", hit.name, hit.distance);
    Some(Tooltip {
        text: hit.name.to_string(),
        left: cursor.x + TOOLTIP_OFFSET.x,
        top: cursor.y + TOOLTIP_OFFSET.y,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SolarSystem;
    use helios_config::Config;

    fn small_system() -> SolarSystem {
        let mut config = Config::default();
        config.corona.detail = 1;
        config.scene.ring_particles = 10;
        config.scene.star_count = 10;
        SolarSystem::new(&config).unwrap()
    }

    #[test]
    fn test_ray_hits_sphere_in_front() {
        let ray = Ray::new(Vec3::new(0.0, 0.0, -10.0), Vec3::Z);
        let d = ray.intersect_sphere(Vec3::ZERO, 2.0).unwrap();
        assert!((d - 8.0).abs() < 1e-5);
    }

    #[test]
    fn test_ray_misses_sphere_behind_or_aside() {
        let ray = Ray::new(Vec3::new(0.0, 0.0, -10.0), Vec3::NEG_Z);
        assert!(ray.intersect_sphere(Vec3::ZERO, 2.0).is_none());
        let aside = Ray::new(Vec3::new(5.0, 0.0, -10.0), Vec3::Z);
        assert!(aside.intersect_sphere(Vec3::ZERO, 2.0).is_none());
    }

    #[test]
    fn test_ray_from_inside_reports_exit() {
        let ray = Ray::new(Vec3::ZERO, Vec3::X);
        let d = ray.intersect_sphere(Vec3::ZERO, 3.0).unwrap();
        assert!((d - 3.0).abs() < 1e-5);
    }

    #[test]
    fn test_pick_finds_planet_straight_ahead() {
        let mut system = small_system();
        system.advance(0.0);
        let frame = system.view();
        let earth = frame.bodies().find(|b| b.name == "Earth").unwrap();
        let origin = earth.world_position + Vec3::new(0.0, 50.0, 0.0);
        let ray = Ray::new(origin, Vec3::NEG_Y);
        let hit = pick(&frame, &ray).unwrap();
        assert_eq!(hit.name, "Earth");
        assert!((hit.distance - (50.0 - 1.2)).abs() < 1e-3);
    }

    #[test]
    fn test_hidden_planet_is_not_pickable() {
        let mut system = small_system();
        system.set_visible(2, false).unwrap();
        system.advance(0.0);
        let frame = system.view();
        let earth = frame.bodies().find(|b| b.name == "Earth").unwrap();
        let ray = Ray::new(earth.world_position + Vec3::new(0.0, 50.0, 0.0), Vec3::NEG_Y);
        assert_ne!(pick(&frame, &ray).map(|h| h.name), Some("Earth"));
    }

    #[test]
    fn test_hover_over_projected_planet_shows_tooltip() {
        let mut system = small_system();
        system.advance(0.0);
        let frame = system.view();
        let camera = Camera::default();
        let viewport = Vec2::new(1600.0, 900.0);

        let jupiter = frame.bodies().find(|b| b.name == "Jupiter").unwrap();
        let clip = camera.view_projection_matrix() * jupiter.world_position.extend(1.0);
        let ndc = Vec2::new(clip.x / clip.w, clip.y / clip.w);
        let cursor = Vec2::new((ndc.x + 1.0) * 0.5 * viewport.x, (1.0 - ndc.y) * 0.5 * viewport.y);

        let tooltip = hover(&frame, &camera, cursor, viewport).unwrap();
        assert_eq!(tooltip.text, "Jupiter");
        assert_eq!(tooltip.left, cursor.x + 10.0);
        assert_eq!(tooltip.top, cursor.y + 10.0);
    }

    #[test]
    fn test_hover_over_empty_sky_is_none() {
        let mut system = small_system();
        system.advance(0.0);
        let frame = system.view();
        let camera = Camera::default();
        assert!(hover(&frame, &camera, Vec2::new(2.0, 2.0), Vec2::new(1600.0, 900.0)).is_none());
    }
}
