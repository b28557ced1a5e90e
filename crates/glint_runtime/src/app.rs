//! Viewer application: one generated program at a time

use crate::settings::Settings;
use anyhow::{anyhow, Result};
use glint_core::hash::hash_u64;
use glint_gen::{GeneratedShader, ShaderGenerator};
use glint_render::window::window_attributes;
use glint_render::winit::{
    application::ApplicationHandler,
    event::{ElementState, KeyEvent, WindowEvent},
    event_loop::ActiveEventLoop,
    keyboard::{Key, NamedKey},
    window::{Window, WindowId},
};
use glint_render::{wgpu, ShaderRenderer};
use std::sync::Arc;
use std::time::{Instant, SystemTime, UNIX_EPOCH};

/// Seed for the next program after `seed`. The finalizer maps 0 to itself, so
/// the input is stepped before hashing.
pub fn next_seed(seed: u64) -> u64 {
    hash_u64(seed.wrapping_add(1))
}

/// Configured seed, or microseconds since the Unix epoch.
pub fn initial_seed(settings: &Settings) -> u64 {
    settings.seed.unwrap_or_else(|| {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_micros() as u64)
            .unwrap_or_default()
    })
}

pub struct GlintApp {
    settings: Settings,
    generator: ShaderGenerator,
    shader: GeneratedShader,
    window: Option<Arc<Window>>,
    renderer: Option<ShaderRenderer>,
    loaded_at: Instant,
    failure: Option<anyhow::Error>,
}

impl GlintApp {
    pub fn new(settings: Settings, seed: u64) -> Result<Self> {
        let generator = ShaderGenerator::new(settings.generator.clone())?;
        let shader = generator.generate(seed)?;
        log_shader(&shader);

        Ok(Self {
            settings,
            generator,
            shader,
            window: None,
            renderer: None,
            loaded_at: Instant::now(),
            failure: None,
        })
    }

    /// Error that stopped the event loop, if any.
    pub fn finish(self) -> Result<()> {
        match self.failure {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, err: anyhow::Error) {
        tracing::error!("{:#}", err);
        self.failure = Some(err);
        event_loop.exit();
    }

    fn start(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let attrs = window_attributes(&self.settings.window);
        let window = Arc::new(event_loop.create_window(attrs)?);
        let renderer = pollster::block_on(ShaderRenderer::new(
            Arc::clone(&window),
            &self.shader.source,
        ))?;

        self.window = Some(window);
        self.renderer = Some(renderer);
        self.loaded_at = Instant::now();
        Ok(())
    }

    /// Swap in the program for the next seed. On failure the current one stays.
    fn regenerate(&mut self) {
        let seed = next_seed(self.shader.seed);
        let shader = match self.generator.generate(seed) {
            Ok(shader) => shader,
            Err(err) => {
                tracing::error!("Generation failed for seed {}: {}", seed, err);
                return;
            }
        };

        if let Some(renderer) = &mut self.renderer {
            if let Err(err) = pollster::block_on(renderer.replace_shader(&shader.source)) {
                tracing::error!("Keeping seed {}: {}", self.shader.seed, err);
                return;
            }
        }

        log_shader(&shader);
        self.shader = shader;
        self.loaded_at = Instant::now();
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let Some(renderer) = &self.renderer else {
            return;
        };

        match renderer.render(self.loaded_at.elapsed().as_secs_f32()) {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => renderer.reconfigure(),
            Err(wgpu::SurfaceError::OutOfMemory) => {
                self.fail(event_loop, anyhow!("GPU out of memory"));
            }
            Err(e) => tracing::warn!("Frame skipped: {:?}", e),
        }
    }

    fn key_pressed(&mut self, event_loop: &ActiveEventLoop, event: KeyEvent) {
        if event.state != ElementState::Pressed || event.repeat {
            return;
        }
        match event.logical_key {
            Key::Named(NamedKey::Space) => self.regenerate(),
            Key::Named(NamedKey::Escape) => event_loop.exit(),
            _ => {}
        }
    }
}

impl ApplicationHandler for GlintApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_none() {
            if let Err(err) = self.start(event_loop) {
                self.fail(event_loop, err);
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                tracing::info!("Close requested, shutting down");
                event_loop.exit();
            }
            WindowEvent::RedrawRequested => self.redraw(event_loop),
            WindowEvent::Resized(new_size) => {
                if let Some(renderer) = &mut self.renderer {
                    renderer.resize(new_size.width, new_size.height);
                }
            }
            WindowEvent::KeyboardInput { event, .. } => self.key_pressed(event_loop, event),
            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

fn log_shader(shader: &GeneratedShader) {
    tracing::info!(
        "Shader code generated using seed {} (max depth {})",
        shader.seed,
        shader.max_depth
    );
}
