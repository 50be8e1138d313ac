//! GPU-facing side of the helios scene.
//!
//! Turns a [`helios_scene::FrameView`] into plain-old-data instance and
//! uniform records, and keeps the corona's vertex buffer in sync with its
//! dirty flag. The buffer, layout and clear-color helpers are what a windowed
//! `wgpu` renderer binds each frame; the headless driver uses the device-free
//! parts.

pub mod corona;
pub mod instance;

pub use corona::{CoronaBuffers, GeometrySink, QueueSink, sync_corona};
pub use instance::{
    BodyInstance, CameraUniform, FrameUniforms, build_instances, clear_color, frame_uniforms,
    rgb_to_rgba, ring_instances,
};
