//! Owner of every body, their parent/child wiring, and the per-frame pass.

use glam::{Mat4, Quat, Vec3};

use crate::{Body, BodySpec, BodyState, OrbitError};

/// Opaque index of a body inside its [`OrbitalSystem`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BodyHandle(usize);

impl BodyHandle {
    /// Position in creation order.
    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Clone, Debug)]
struct Node {
    body: Body,
    parent: Option<BodyHandle>,
    children: Vec<BodyHandle>,
}

/// Arena of bodies with a two-level hierarchy (planets and their moons).
///
/// Bodies live as long as the system; there is no removal.
#[derive(Clone, Debug, Default)]
pub struct OrbitalSystem {
    nodes: Vec<Node>,
}

impl OrbitalSystem {
    /// Empty system.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a root body orbiting the world origin.
    ///
    /// # Errors
    ///
    /// Propagates [`OrbitError::InvalidParameter`] from [`Body::new`].
    pub fn create_body(&mut self, spec: BodySpec) -> Result<BodyHandle, OrbitError> {
        let body = Body::new(spec)?;
        let handle = BodyHandle(self.nodes.len());
        self.nodes.push(Node {
            body,
            parent: None,
            children: Vec::new(),
        });
        log::debug!(
            "Created body {} (radius {}, speed {})",
            handle.0,
            spec.orbit_radius,
            spec.orbit_speed
        );
        Ok(handle)
    }

    /// Make `child` orbit `parent`'s local origin instead of the world origin.
    ///
    /// # Errors
    ///
    /// Fails for unknown handles, self-attachment, a child that already has a
    /// parent or children of its own, and a parent that is itself a child.
    pub fn attach_child(&mut self, parent: BodyHandle, child: BodyHandle) -> Result<(), OrbitError> {
        self.node(parent)?;
        self.node(child)?;
        let refuse = |reason| OrbitError::InvalidNesting {
            parent,
            child,
            reason,
        };
        if parent == child {
            return Err(refuse("a body cannot orbit itself"));
        }
        if self.nodes[parent.0].parent.is_some() {
            return Err(refuse("parent is already a child body"));
        }
        if self.nodes[child.0].parent.is_some() {
            return Err(refuse("child already has a parent"));
        }
        if !self.nodes[child.0].children.is_empty() {
            return Err(refuse("child has children of its own"));
        }
        self.nodes[child.0].parent = Some(parent);
        self.nodes[parent.0].children.push(child);
        Ok(())
    }

    /// Advance one body by a single tick.
    ///
    /// `sim_time` is accepted for symmetry with the corona tick; advancement is
    /// one speed step per call regardless of its value.
    pub fn tick_body(&mut self, handle: BodyHandle, _sim_time: f64) -> Result<BodyState, OrbitError> {
        Ok(self.node_mut(handle)?.body.advance())
    }

    /// Advance every body once, each parent immediately before its children.
    pub fn tick(&mut self, _sim_time: f64) {
        for i in 0..self.nodes.len() {
            if self.nodes[i].parent.is_some() {
                continue;
            }
            self.nodes[i].body.advance();
            for k in 0..self.nodes[i].children.len() {
                let child = self.nodes[i].children[k];
                self.nodes[child.0].body.advance();
            }
        }
    }

    /// Kinematic state of `handle`.
    pub fn body(&self, handle: BodyHandle) -> Result<&Body, OrbitError> {
        Ok(&self.node(handle)?.body)
    }

    /// Change a body's orbit speed. Takes effect on the next tick.
    pub fn set_orbit_speed(&mut self, handle: BodyHandle, speed: f64) -> Result<(), OrbitError> {
        self.node_mut(handle)?.body.set_orbit_speed(speed);
        Ok(())
    }

    /// Change a body's spin speed. Takes effect on the next tick.
    pub fn set_spin_speed(&mut self, handle: BodyHandle, speed: f64) -> Result<(), OrbitError> {
        self.node_mut(handle)?.body.set_spin_speed(speed);
        Ok(())
    }

    /// Show or hide a body. Hidden bodies keep moving.
    pub fn set_visible(&mut self, handle: BodyHandle, visible: bool) -> Result<(), OrbitError> {
        self.node_mut(handle)?.body.set_visible(visible);
        Ok(())
    }

    /// The body `handle` is attached to, if any.
    pub fn parent(&self, handle: BodyHandle) -> Result<Option<BodyHandle>, OrbitError> {
        Ok(self.node(handle)?.parent)
    }

    /// Bodies attached to `handle`, in attachment order.
    pub fn children(&self, handle: BodyHandle) -> Result<&[BodyHandle], OrbitError> {
        Ok(&self.node(handle)?.children)
    }

    /// Position in the body's own frame (parent-local for moons).
    pub fn local_position(&self, handle: BodyHandle) -> Result<Vec3, OrbitError> {
        Ok(self.node(handle)?.body.local_position())
    }

    /// Position in the world frame: the parent's world position plus the local offset.
    pub fn world_position(&self, handle: BodyHandle) -> Result<Vec3, OrbitError> {
        let node = self.node(handle)?;
        let local = node.body.local_position();
        Ok(match node.parent {
            Some(parent) => self.nodes[parent.0].body.local_position() + local,
            None => local,
        })
    }

    /// Spin about Y applied after the fixed axial tilt about Z.
    pub fn orientation(&self, handle: BodyHandle) -> Result<Quat, OrbitError> {
        Ok(self.node(handle)?.body.orientation())
    }

    /// World translation combined with the body's own tilt and spin.
    pub fn world_transform(&self, handle: BodyHandle) -> Result<Mat4, OrbitError> {
        let position = self.world_position(handle)?;
        let orientation = self.orientation(handle)?;
        Ok(Mat4::from_rotation_translation(orientation, position))
    }

    /// Every handle in creation order.
    pub fn handles(&self) -> impl Iterator<Item = BodyHandle> + '_ {
        (0..self.nodes.len()).map(BodyHandle)
    }

    /// Number of bodies.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    fn node(&self, handle: BodyHandle) -> Result<&Node, OrbitError> {
        self.nodes
            .get(handle.0)
            .ok_or(OrbitError::UnknownBody(handle))
    }

    fn node_mut(&mut self, handle: BodyHandle) -> Result<&mut Node, OrbitError> {
        self.nodes
            .get_mut(handle.0)
            .ok_or(OrbitError::UnknownBody(handle))
    }
}
