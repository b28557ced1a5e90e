//! Window management
//!
//! Window creation helpers for winit 0.30

use crate::RenderError;
use serde::{Deserialize, Serialize};
use winit::{
    dpi::LogicalSize,
    event_loop::EventLoop,
    window::{Window, WindowAttributes},
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Glint".to_string(),
            width: 1280,
            height: 720,
        }
    }
}

/// Create window attributes from config
pub fn window_attributes(config: &WindowConfig) -> WindowAttributes {
    Window::default_attributes()
        .with_title(config.title.clone())
        .with_inner_size(LogicalSize::new(config.width, config.height))
}

/// In winit 0.30+ the window itself must be created inside `resumed`.
pub fn create_event_loop() -> Result<EventLoop<()>, RenderError> {
    Ok(EventLoop::new()?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = WindowConfig::default();
        assert_eq!(config.title, "Glint");
        assert_eq!((config.width, config.height), (1280, 720));
    }

    #[test]
    fn test_partial_config() {
        let config: WindowConfig = serde_json::from_str(r#"{ "width": 640 }"#).unwrap();
        assert_eq!(config.width, 640);
        assert_eq!(config.height, 720);
        assert_eq!(config.title, "Glint");
    }
}
