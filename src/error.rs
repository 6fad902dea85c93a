//! Startup errors
//!
//! Anything that fails before the first frame is fatal: it is logged and the
//! process exits with status -1.

use thiserror::Error;

use crate::audio::AudioError;

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("event loop could not be created: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),
    #[error("window could not be created: {0}")]
    Window(#[from] winit::error::OsError),
    #[error("GPU surface could not be created: {0}")]
    Surface(#[from] wgpu::CreateSurfaceError),
    #[error("no suitable GPU adapter: {0}")]
    Adapter(#[from] wgpu::RequestAdapterError),
    #[error("GPU device could not be created: {0}")]
    Device(#[from] wgpu::RequestDeviceError),
    #[error("audio unavailable: {0}")]
    Audio(#[from] AudioError),
}

impl StartupError {
    /// Process exit status for a failed startup
    pub const EXIT_CODE: i32 = -1;
}
