use std::sync::Arc;

use wgpu::{Adapter, Device, Instance, Queue, Surface, SurfaceConfiguration, SurfaceTexture, TextureFormat};
use winit::dpi::PhysicalSize;
use winit::window::Window;

use crate::error::ViewerError;

/// Window surface plus the device that presents grid frames to it
pub struct GpuContext {
    pub surface: Surface<'static>,
    pub device: Device,
    pub queue: Queue,
    pub config: SurfaceConfiguration,
}

impl GpuContext {
    pub async fn new(window: Arc<Window>) -> Result<Self, ViewerError> {
        let instance = Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::PRIMARY,
            ..Default::default()
        });

        let surface = instance.create_surface(window.clone())?;
        let adapter = request_adapter(&instance, &surface).await?;

        // Presenting one storage buffer needs nothing beyond downlevel limits
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    label: Some("grid-sandbox-device"),
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::downlevel_defaults(),
                    memory_hints: wgpu::MemoryHints::MemoryUsage,
                },
                None,
            )
            .await?;

        let config = surface_config(&surface, &adapter, window.inner_size())?;
        surface.configure(&device, &config);
        log::info!(
            "Surface {:?} {}x{}, {:?}",
            config.format,
            config.width,
            config.height,
            config.present_mode
        );

        Ok(Self {
            surface,
            device,
            queue,
            config,
        })
    }

    /// Zero-sized windows (minimised) keep the old configuration
    pub fn resize(&mut self, new_size: PhysicalSize<u32>) {
        if new_size.width == 0 || new_size.height == 0 {
            return;
        }
        self.config.width = new_size.width;
        self.config.height = new_size.height;
        self.surface.configure(&self.device, &self.config);
    }

    /// Next texture to draw into. A lost or outdated surface is reconfigured
    /// and the frame skipped.
    pub fn acquire_frame(&self) -> Option<SurfaceTexture> {
        match self.surface.get_current_texture() {
            Ok(texture) => Some(texture),
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                log::debug!("Surface lost, reconfiguring");
                self.surface.configure(&self.device, &self.config);
                None
            }
            Err(e) => {
                log::error!("Surface error: {:?}", e);
                None
            }
        }
    }

    pub fn format(&self) -> TextureFormat {
        self.config.format
    }

    /// Whether writes are sRGB-encoded by the surface, so the shader has to
    /// hand it linear colour
    pub fn srgb_output(&self) -> bool {
        self.config.format.is_srgb()
    }

    pub fn size(&self) -> (u32, u32) {
        (self.config.width, self.config.height)
    }
}

async fn request_adapter(instance: &Instance, surface: &Surface<'_>) -> Result<Adapter, ViewerError> {
    let adapter = instance
        .request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::LowPower,
            compatible_surface: Some(surface),
            force_fallback_adapter: false,
        })
        .await
        .ok_or(ViewerError::NoAdapter)?;

    let info = adapter.get_info();
    log::info!("Using GPU: {} ({:?})", info.name, info.backend);
    Ok(adapter)
}

fn surface_config(
    surface: &Surface<'_>,
    adapter: &Adapter,
    size: PhysicalSize<u32>,
) -> Result<SurfaceConfiguration, ViewerError> {
    let caps = surface.get_capabilities(adapter);
    let format = pick_format(&caps.formats).ok_or(ViewerError::UnsupportedSurface)?;
    let alpha_mode = caps
        .alpha_modes
        .first()
        .copied()
        .ok_or(ViewerError::UnsupportedSurface)?;

    Ok(SurfaceConfiguration {
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
        format,
        width: size.width.max(1),
        height: size.height.max(1),
        present_mode: wgpu::PresentMode::AutoVsync,
        desired_maximum_frame_latency: 2,
        alpha_mode,
        view_formats: vec![],
    })
}

/// Palette colours are already sRGB-encoded bytes, so a plain 8-bit unorm
/// surface shows them untouched. Anything else offered still works through
/// the shader's linearisation.
fn pick_format(formats: &[TextureFormat]) -> Option<TextureFormat> {
    formats
        .iter()
        .copied()
        .find(|f| matches!(f, TextureFormat::Bgra8Unorm | TextureFormat::Rgba8Unorm))
        .or_else(|| formats.first().copied())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefers_unorm_surface() {
        let offered = [
            TextureFormat::Bgra8UnormSrgb,
            TextureFormat::Rgba16Float,
            TextureFormat::Bgra8Unorm,
        ];
        assert_eq!(pick_format(&offered), Some(TextureFormat::Bgra8Unorm));
    }

    #[test]
    fn test_falls_back_to_first_format() {
        let offered = [TextureFormat::Rgba8UnormSrgb, TextureFormat::Rgba16Float];
        assert_eq!(pick_format(&offered), Some(TextureFormat::Rgba8UnormSrgb));
        assert_eq!(pick_format(&[]), None);
    }
}
