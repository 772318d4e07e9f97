use bytepath_engine::coords::{Vec2, Viewport};
use bytepath_engine::paint::Color;

/// Game tuning and presentation settings.
#[derive(Debug, Clone)]
pub struct GameConfig {
    /// Logical coordinate space the game draws in; stretched to the window.
    pub viewport: Viewport,

    /// Ship speed in logical pixels per second.
    pub ship_speed: f32,

    /// Radius of the ship outline in logical pixels.
    pub ship_radius: f32,

    /// Ship start position; `None` means the viewport centre.
    pub ship_start: Option<Vec2>,

    pub clear_color: Color,
}

impl GameConfig {
    pub fn ship_start(&self) -> Vec2 {
        self.ship_start.unwrap_or_else(|| self.viewport.center())
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            viewport: Viewport::new(480.0, 270.0),
            ship_speed: 40.0,
            ship_radius: 16.0,
            ship_start: None,
            clear_color: Color::BLACK,
        }
    }
}
