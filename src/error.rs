use thiserror::Error;

/// Everything that can stop the viewer from starting or running
#[derive(Debug, Error)]
pub enum ViewerError {
    #[error("unknown demo {0:?} (expected sand, life or gray-scott)")]
    UnknownDemo(String),

    #[error("invalid seed {0:?} (expected an unsigned integer)")]
    InvalidSeed(String),

    #[error("event loop error: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),

    #[error("failed to create window: {0}")]
    Window(#[from] winit::error::OsError),

    #[error("failed to create surface: {0}")]
    Surface(#[from] wgpu::CreateSurfaceError),

    #[error("no suitable GPU adapter found")]
    NoAdapter,

    #[error("failed to create device: {0}")]
    Device(#[from] wgpu::RequestDeviceError),

    #[error("surface not supported by adapter")]
    UnsupportedSurface,
}
