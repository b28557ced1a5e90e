//! Glint
//!
//! Generates a WGSL program from a seed and displays it.
//! Space loads the program for the next seed, Escape quits.

mod app;
mod settings;

use anyhow::Result;
use app::GlintApp;
use glint_render::window::create_event_loop;
use settings::{settings_path, Settings};

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt::init();

    tracing::info!("Glint v{}", glint_core::VERSION);

    let settings = Settings::load(&settings_path())?;
    let seed = app::initial_seed(&settings);
    let mut app = GlintApp::new(settings, seed)?;

    let event_loop = create_event_loop()?;
    event_loop.run_app(&mut app)?;

    app.finish()
}
