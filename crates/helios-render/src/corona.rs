//! Corona mesh upload driven by the surface's dirty flag.
//!
//! The surface rewrites its displaced positions on every tick and raises its
//! dirty flag. The renderer copies the positions out at most once per raised
//! flag, so a paused scene costs no uploads.

use helios_corona::{CoronaSurface, NoiseField};
use wgpu::util::DeviceExt;

/// Destination of displaced corona positions.
pub trait GeometrySink {
    fn write_positions(&mut self, bytes: &[u8]);
}

/// Writes into an existing vertex buffer through the queue.
pub struct QueueSink<'a> {
    pub queue: &'a wgpu::Queue,
    pub buffer: &'a wgpu::Buffer,
}

impl GeometrySink for QueueSink<'_> {
    fn write_positions(&mut self, bytes: &[u8]) {
        self.queue.write_buffer(self.buffer, 0, bytes);
    }
}

/// Copy the corona's positions into `sink` if they changed since the last copy.
///
/// Returns `true` when an upload happened.
pub fn sync_corona<N: NoiseField, S: GeometrySink>(
    corona: &mut CoronaSurface<N>,
    sink: &mut S,
) -> bool {
    if !corona.take_dirty() {
        return false;
    }
    sink.write_positions(corona.as_bytes());
    true
}

/// GPU buffers for the corona: positions rewritten per tick, indices fixed.
pub struct CoronaBuffers {
    pub position_buffer: wgpu::Buffer,
    pub index_buffer: wgpu::Buffer,
    pub index_count: u32,
    pub vertex_count: u32,
}

impl CoronaBuffers {
    /// Create buffers sized for `corona` and fill them with its current state.
    /// Clears the dirty flag.
    pub fn upload<N: NoiseField>(device: &wgpu::Device, corona: &mut CoronaSurface<N>) -> Self {
        let position_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("corona_position_buffer"),
            contents: corona.as_bytes(),
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
        });

        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("corona_index_buffer"),
            contents: bytemuck::cast_slice(corona.indices()),
            usage: wgpu::BufferUsages::INDEX,
        });

        corona.take_dirty();
        log::debug!(
            "Corona buffers created: {} vertices, {} indices",
            corona.vertex_count(),
            corona.indices().len()
        );

        Self {
            position_buffer,
            index_buffer,
            index_count: corona.indices().len() as u32,
            vertex_count: corona.vertex_count() as u32,
        }
    }

    /// Re-upload positions if the corona changed. Returns `true` on upload.
    pub fn sync<N: NoiseField>(&self, queue: &wgpu::Queue, corona: &mut CoronaSurface<N>) -> bool {
        let mut sink = QueueSink {
            queue,
            buffer: &self.position_buffer,
        };
        sync_corona(corona, &mut sink)
    }

    /// Bind the corona's buffers to a render pass.
    pub fn bind<'a>(&'a self, render_pass: &mut wgpu::RenderPass<'a>) {
        render_pass.set_vertex_buffer(0, self.position_buffer.slice(..));
        render_pass.set_index_buffer(self.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
    }

    pub fn draw(&self, render_pass: &mut wgpu::RenderPass) {
        render_pass.draw_indexed(0..self.index_count, 0, 0..1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use helios_corona::CoronaParams;

    #[derive(Default)]
    struct RecordingSink {
        uploads: Vec<Vec<u8>>,
    }

    impl GeometrySink for RecordingSink {
        fn write_positions(&mut self, bytes: &[u8]) {
            self.uploads.push(bytes.to_vec());
        }
    }

    fn small_corona() -> CoronaSurface {
        CoronaSurface::with_default_noise(CoronaParams {
            detail: 2,
            ..CoronaParams::default()
        })
        .unwrap()
    }

    fn test_device() -> Option<(wgpu::Device, wgpu::Queue)> {
        pollster::block_on(async {
            let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
                backends: wgpu::Backends::all(),
                ..Default::default()
            });
            let adapter = instance
                .request_adapter(&wgpu::RequestAdapterOptions {
                    power_preference: wgpu::PowerPreference::default(),
                    compatible_surface: None,
                    force_fallback_adapter: false,
                })
                .await
                .ok()?;
            adapter
                .request_device(&wgpu::DeviceDescriptor::default())
                .await
                .ok()
        })
    }

    #[test]
    fn test_fresh_corona_uploads_once() {
        let mut corona = small_corona();
        let mut sink = RecordingSink::default();
        assert!(sync_corona(&mut corona, &mut sink));
        assert!(!sync_corona(&mut corona, &mut sink), "flag should be consumed");
        assert_eq!(sink.uploads.len(), 1);
        assert_eq!(sink.uploads[0].len(), corona.vertex_count() * 12);
    }

    #[test]
    fn test_each_deform_triggers_one_upload() {
        let mut corona = small_corona();
        let mut sink = RecordingSink::default();
        sync_corona(&mut corona, &mut sink);

        corona.deform(0.5);
        assert!(sync_corona(&mut corona, &mut sink));
        assert_eq!(sink.uploads.last().unwrap().as_slice(), corona.as_bytes());

        corona.deform(0.6);
        corona.deform(0.7);
        assert!(sync_corona(&mut corona, &mut sink));
        assert!(!sync_corona(&mut corona, &mut sink));
        assert_eq!(sink.uploads.len(), 3);
    }

    #[test]
    fn test_upload_to_gpu_when_available() {
        let Some((device, queue)) = test_device() else {
            eprintln!("no GPU adapter available, skipping");
            return;
        };
        let mut corona = small_corona();
        let buffers = CoronaBuffers::upload(&device, &mut corona);
        assert_eq!(buffers.vertex_count as usize, corona.vertex_count());
        assert_eq!(buffers.index_count as usize, corona.indices().len());
        assert_eq!(buffers.position_buffer.size() as usize, corona.as_bytes().len());
        assert!(!corona.is_dirty());

        assert!(!buffers.sync(&queue, &mut corona));
        corona.deform(1.0);
        assert!(buffers.sync(&queue, &mut corona));
    }
}
