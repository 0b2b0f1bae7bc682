use wgpu::{Buffer, BufferUsages, Device, Queue};

use grid_sandbox::render::{PixelBuffer, Rgba};

/// Storage buffer holding the latest rendered frame, plus the view uniform
pub struct FrameBuffers {
    /// One packed RGBA `u32` per grid cell, row-major
    pub pixel_buffer: Buffer,
    /// Uniform buffer for view parameters
    pub params_buffer: Buffer,
    pub grid_width: u32,
    pub grid_height: u32,
}

/// View parameters passed to the render shader (32 bytes, aligned to 16)
#[repr(C)]
#[derive(Clone, Copy, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ViewParams {
    // Dimensions (16 bytes)
    pub grid_width: u32,
    pub grid_height: u32,
    pub surface_width: u32,
    pub surface_height: u32,

    // 1 when the surface format is sRGB and colors must be linearised (16 bytes)
    pub srgb_output: u32,
    pub _padding: [u32; 3],
}

impl FrameBuffers {
    pub fn new(device: &Device, grid_width: u32, grid_height: u32) -> Self {
        let cell_count = (grid_width as u64 * grid_height as u64).max(1);
        let buffer_size = cell_count * std::mem::size_of::<Rgba>() as u64;

        let pixel_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("pixel-buffer"),
            size: buffer_size,
            usage: BufferUsages::STORAGE | BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let params_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("view-params-buffer"),
            size: std::mem::size_of::<ViewParams>() as u64,
            usage: BufferUsages::UNIFORM | BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        Self {
            pixel_buffer,
            params_buffer,
            grid_width,
            grid_height,
        }
    }

    /// Whether these buffers were sized for a `width` x `height` frame
    pub fn fits(&self, width: u32, height: u32) -> bool {
        self.grid_width == width && self.grid_height == height
    }

    pub fn upload_pixels(&self, queue: &Queue, frame: &PixelBuffer) {
        if !frame.pixels().is_empty() {
            queue.write_buffer(&self.pixel_buffer, 0, frame.as_bytes());
        }
    }

    pub fn update_params(&self, queue: &Queue, surface_size: (u32, u32), srgb_output: bool) {
        let params = ViewParams {
            grid_width: self.grid_width,
            grid_height: self.grid_height,
            surface_width: surface_size.0.max(1),
            surface_height: surface_size.1.max(1),
            srgb_output: srgb_output as u32,
            _padding: [0; 3],
        };
        queue.write_buffer(&self.params_buffer, 0, bytemuck::bytes_of(&params));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_view_params_size() {
        assert_eq!(std::mem::size_of::<ViewParams>(), 32);
    }
}
