use std::sync::Arc;
use std::time::Instant;
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalPosition;
use winit::event::{ElementState, MouseButton, WindowEvent};
use winit::event_loop::ActiveEventLoop;
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowId};

use grid_sandbox::config::WINDOW_SIZE;
use grid_sandbox::render::PixelBuffer;

use crate::demo::Demo;
use crate::error::ViewerError;
use crate::gpu::{FrameBuffers, GpuContext, RenderPipeline};

/// Application state
pub struct App {
    window: Option<Arc<Window>>,
    gpu: Option<GpuContext>,
    frame_buffers: Option<FrameBuffers>,
    render_pipeline: Option<RenderPipeline>,
    demo: Demo,
    frame: PixelBuffer,
    cursor: Option<PhysicalPosition<f64>>,
    painting: bool,
    fps_counter: FpsCounter,
    error: Option<ViewerError>,
}

impl App {
    pub fn new(demo: Demo) -> Self {
        Self {
            window: None,
            gpu: None,
            frame_buffers: None,
            render_pipeline: None,
            demo,
            frame: PixelBuffer::default(),
            cursor: None,
            painting: false,
            fps_counter: FpsCounter::new(),
            error: None,
        }
    }

    /// The error that stopped the event loop, if any
    pub fn take_error(&mut self) -> Option<ViewerError> {
        self.error.take()
    }

    fn init(&mut self, event_loop: &ActiveEventLoop) -> Result<(), ViewerError> {
        let (grid_width, grid_height) = self.demo.grid_size();
        log::info!("Starting {} on a {}x{} grid", self.demo.name(), grid_width, grid_height);

        let window_attrs = Window::default_attributes()
            .with_title(format!("{} - Initializing...", self.demo.name()))
            .with_inner_size(winit::dpi::LogicalSize::new(WINDOW_SIZE.0, WINDOW_SIZE.1));
        let window = Arc::new(event_loop.create_window(window_attrs)?);

        log::info!("Creating GPU context...");
        let gpu = pollster::block_on(GpuContext::new(window.clone()))?;

        let frame_buffers = FrameBuffers::new(&gpu.device, grid_width as u32, grid_height as u32);
        let render_pipeline = RenderPipeline::new(&gpu.device, gpu.format());

        log::info!("Controls:");
        log::info!("  Space: Pause/resume");
        log::info!("  N: Single tick");
        log::info!("  R: Reset");
        log::info!("  C: Clear");
        log::info!("  +/-: Ticks per frame");
        for line in self.demo.controls() {
            log::info!("  {}", line);
        }
        log::info!("  Escape: Quit");

        self.window = Some(window);
        self.gpu = Some(gpu);
        self.frame_buffers = Some(frame_buffers);
        self.render_pipeline = Some(render_pipeline);
        Ok(())
    }

    fn redraw(&mut self) {
        let (Some(gpu), Some(render)) = (self.gpu.as_ref(), self.render_pipeline.as_ref()) else {
            return;
        };

        self.demo.advance();
        self.demo.render(&mut self.frame);

        let (width, height) = (self.frame.width() as u32, self.frame.height() as u32);
        if !self.frame_buffers.as_ref().is_some_and(|b| b.fits(width, height)) {
            log::debug!("Reallocating frame buffers for {}x{}", width, height);
            self.frame_buffers = Some(FrameBuffers::new(&gpu.device, width, height));
        }
        let Some(buffers) = self.frame_buffers.as_ref() else {
            return;
        };

        buffers.upload_pixels(&gpu.queue, &self.frame);
        buffers.update_params(&gpu.queue, gpu.size(), gpu.srgb_output());

        let Some(output) = gpu.acquire_frame() else {
            return;
        };

        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = gpu
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("frame-encoder"),
            });

        let bind_group = render.create_bind_group(&gpu.device, buffers);
        render.draw(&mut encoder, &view, &bind_group);

        gpu.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        if let Some(fps) = self.fps_counter.tick() {
            if let Some(window) = &self.window {
                let paused = if self.demo.is_paused() { " [Paused]" } else { "" };
                window.set_title(&format!(
                    "{} - {:.0} FPS - tick {}{}",
                    self.demo.name(),
                    fps,
                    self.demo.tick_count(),
                    paused
                ));
            }
        }
    }

    fn paint_at_cursor(&mut self, pressed: bool) {
        let (Some(cursor), Some(gpu)) = (self.cursor, self.gpu.as_ref()) else {
            return;
        };
        let (x, y) = cursor_to_cell(cursor, gpu.size(), self.demo.grid_size());
        self.demo.paint(x, y, pressed);
    }
}

/// Map a window position onto the grid cell drawn under it
fn cursor_to_cell(
    cursor: PhysicalPosition<f64>,
    surface: (u32, u32),
    grid: (usize, usize),
) -> (i64, i64) {
    let sx = surface.0.max(1) as f64;
    let sy = surface.1.max(1) as f64;
    let x = (cursor.x / sx * grid.0 as f64).floor() as i64;
    let y = (cursor.y / sy * grid.1 as f64).floor() as i64;
    (x, y)
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        if let Err(e) = self.init(event_loop) {
            log::error!("Initialization failed: {}", e);
            self.error = Some(e);
            event_loop.exit();
            return;
        }
        log::info!("Initialization complete!");
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                log::info!("Close requested, exiting...");
                event_loop.exit();
            }
            WindowEvent::KeyboardInput { event, .. } => {
                if event.state.is_pressed() {
                    if let PhysicalKey::Code(key_code) = event.physical_key {
                        if key_code == KeyCode::Escape {
                            log::info!("Escape pressed, exiting...");
                            event_loop.exit();
                        } else {
                            self.demo.handle_key(key_code);
                        }
                    }
                }
            }
            WindowEvent::CursorMoved { position, .. } => {
                self.cursor = Some(position);
                if self.painting {
                    self.paint_at_cursor(false);
                }
            }
            WindowEvent::CursorLeft { .. } => {
                self.cursor = None;
                self.painting = false;
            }
            WindowEvent::MouseInput {
                state,
                button: MouseButton::Left,
                ..
            } => {
                self.painting = state == ElementState::Pressed;
                if self.painting {
                    self.paint_at_cursor(true);
                }
            }
            WindowEvent::Resized(new_size) => {
                if let Some(gpu) = &mut self.gpu {
                    log::info!("Window resized to {}x{}", new_size.width, new_size.height);
                    gpu.resize(new_size);
                }
            }
            WindowEvent::RedrawRequested => {
                self.redraw();
                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }
            _ => {}
        }
    }
}

/// Simple FPS counter
struct FpsCounter {
    last_update: Instant,
    frame_count: u32,
}

impl FpsCounter {
    fn new() -> Self {
        Self {
            last_update: Instant::now(),
            frame_count: 0,
        }
    }

    /// Returns Some(fps) about once a second
    fn tick(&mut self) -> Option<f64> {
        self.frame_count += 1;
        let elapsed = self.last_update.elapsed().as_secs_f64();

        if elapsed >= 1.0 {
            let fps = self.frame_count as f64 / elapsed;
            self.frame_count = 0;
            self.last_update = Instant::now();
            Some(fps)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cursor_maps_to_cell() {
        let grid = (160, 120);
        let surface = (800, 600);
        assert_eq!(cursor_to_cell(PhysicalPosition::new(0.0, 0.0), surface, grid), (0, 0));
        assert_eq!(cursor_to_cell(PhysicalPosition::new(799.0, 599.0), surface, grid), (159, 119));
        assert_eq!(cursor_to_cell(PhysicalPosition::new(400.0, 300.0), surface, grid), (80, 60));
    }

    #[test]
    fn test_cursor_outside_window_goes_negative() {
        let cell = cursor_to_cell(PhysicalPosition::new(-10.0, 5.0), (800, 600), (160, 120));
        assert_eq!(cell, (-2, 1));
    }

    #[test]
    fn test_fps_counter_waits_a_second() {
        let mut counter = FpsCounter::new();
        assert!(counter.tick().is_none());
    }
}
