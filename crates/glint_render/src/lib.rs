//! Glint Render
//!
//! Displays a generated fragment program on a fullscreen quad via wgpu

pub mod renderer;
pub mod uniforms;
pub mod window;

pub use renderer::ShaderRenderer;
pub use uniforms::FrameUniforms;

pub use wgpu;
pub use winit;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("failed to create event loop: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),

    #[error("failed to create window: {0}")]
    Window(#[from] winit::error::OsError),

    #[error("failed to create surface: {0}")]
    CreateSurface(#[from] wgpu::CreateSurfaceError),

    #[error("no suitable GPU adapter found")]
    NoAdapter,

    #[error("failed to create device: {0}")]
    RequestDevice(#[from] wgpu::RequestDeviceError),

    #[error("surface reports no supported formats")]
    NoSurfaceFormat,

    #[error("shader rejected: {0}")]
    Shader(String),
}
