//! Per-body instance records and camera uniforms in GPU layout.

use bytemuck::{Pod, Zeroable};
use glam::Vec3;
use helios_scene::controls::DisplaySettings;
use helios_scene::{BodyKind, Camera, FrameView};

/// Camera uniform buffer data matching the WGSL `CameraUniform` struct.
#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct CameraUniform {
    pub view_proj: [[f32; 4]; 4], // 64 bytes, mat4x4
}

impl CameraUniform {
    /// Snapshot of the camera's combined view-projection matrix.
    pub fn from_camera(camera: &Camera) -> Self {
        Self {
            view_proj: camera.view_projection_matrix().to_cols_array_2d(),
        }
    }
}

/// One instanced sphere: model matrix (scale included) and tint.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct BodyInstance {
    pub model: [[f32; 4]; 4],
    /// Linear RGBA tint; white when the body is textured.
    pub color: [f32; 4],
}

/// Uniforms shared by every draw of one frame.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct FrameUniforms {
    pub view_proj: [[f32; 4]; 4],
    /// Corona space to world. All zeros when the star is absent.
    pub sun_model: [[f32; 4]; 4],
    /// Corona base color and opacity.
    pub corona_color: [f32; 4],
}

static_assertions::assert_eq_size!(BodyInstance, [u8; 80]);
static_assertions::assert_eq_size!(CameraUniform, [u8; 64]);
static_assertions::assert_eq_size!(FrameUniforms, [u8; 144]);

impl BodyInstance {
    /// Vertex buffer layout for instance-rate attributes at locations 2..=6.
    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        const ATTRIBUTES: [wgpu::VertexAttribute; 5] = wgpu::vertex_attr_array![
            2 => Float32x4,
            3 => Float32x4,
            4 => Float32x4,
            5 => Float32x4,
            6 => Float32x4,
        ];
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<BodyInstance>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &ATTRIBUTES,
        }
    }
}

/// `0xRRGGBB` to RGBA components in `[0, 1]`.
pub fn rgb_to_rgba(rgb: u32, alpha: f32) -> [f32; 4] {
    let channel = |shift: u32| ((rgb >> shift) & 0xff) as f32 / 255.0;
    [channel(16), channel(8), channel(0), alpha]
}

/// Clear color for the current background mode.
pub fn clear_color(display: &DisplaySettings) -> wgpu::Color {
    let [r, g, b, a] = rgb_to_rgba(display.background_color(), 1.0);
    wgpu::Color {
        r: r as f64,
        g: g as f64,
        b: b as f64,
        a: a as f64,
    }
}

/// Camera and star uniforms for `frame`.
pub fn frame_uniforms(frame: &FrameView<'_>, camera: &Camera) -> FrameUniforms {
    let (sun_model, corona_color) = match (frame.sun_transform(), frame.corona()) {
        (Some(transform), Some(corona)) => {
            let appearance = corona.appearance();
            (
                transform.to_cols_array_2d(),
                rgb_to_rgba(appearance.base_color, appearance.opacity),
            )
        }
        _ => ([[0.0; 4]; 4], [0.0; 4]),
    };
    FrameUniforms {
        view_proj: CameraUniform::from_camera(camera).view_proj,
        sun_model,
        corona_color,
    }
}

/// Instances for every visible planet and moon.
pub fn build_instances(frame: &FrameView<'_>, display: &DisplaySettings) -> Vec<BodyInstance> {
    frame
        .bodies()
        .filter(|body| body.visible)
        .map(|body| BodyInstance {
            model: body.model_matrix().to_cols_array_2d(),
            color: if display.textures_enabled {
                [1.0; 4]
            } else {
                rgb_to_rgba(body.color, 1.0)
            },
        })
        .collect()
}

/// World positions of the ring particles of visible ringed planets. Rings
/// share their planet's tilt and spin.
pub fn ring_instances(frame: &FrameView<'_>) -> Vec<[f32; 3]> {
    frame
        .bodies()
        .filter(|body| body.kind == BodyKind::Planet)
        .zip(frame.planets())
        .filter(|(body, _)| body.visible)
        .filter_map(|(body, planet)| planet.ring().map(|ring| (body.transform, ring)))
        .flat_map(|(transform, ring)| {
            ring.iter()
                .map(move |p: &Vec3| transform.transform_point3(*p).to_array())
        })
        .collect()
}
