mod button;
mod dropdown;

pub use button::Button;
pub use dropdown::Dropdown;

use macroquad::prelude::{Color, screen_height, screen_width};

pub const PANEL_WIDTH: f32 = 180.0;
pub const BUTTON_HEIGHT: f32 = 34.0;
pub const CELL_SIZE: f32 = 10.0;

pub(crate) const ACCENT: Color = Color::new(0.27, 0.51, 0.71, 1.0);
pub(crate) const ACCENT_HOVER: Color = Color::new(0.39, 0.58, 0.93, 1.0);

/// X position where the side panel starts
pub fn panel_x() -> f32 {
    screen_width() - PANEL_WIDTH
}

pub fn grid_area_width() -> f32 {
    screen_width() - PANEL_WIDTH
}

pub fn grid_area_height() -> f32 {
    screen_height()
}

/// Board sizes offered in the size dropdown, all within the accepted range
pub const GRID_SIZES: &[(usize, &str)] = &[
    (10, "10×10"),
    (25, "25×25"),
    (50, "50×50"),
    (100, "100×100"),
    (150, "150×150"),
    (200, "200×200"),
];

/// Commands bound to panel buttons
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    TogglePlay,
    Step,
    Clear,
    Randomize,
    ToggleWrap,
}

/// Panel buttons, top to bottom
pub fn create_buttons(top: f32) -> Vec<(Action, Button)> {
    let px = panel_x();
    [
        (Action::TogglePlay, "Play/Pause"),
        (Action::Step, "Step"),
        (Action::Clear, "Clear"),
        (Action::Randomize, "Random"),
        (Action::ToggleWrap, "Wrap edges"),
    ]
    .into_iter()
    .enumerate()
    .map(|(i, (action, label))| {
        let y = top + i as f32 * (BUTTON_HEIGHT + 8.0);
        (action, Button::new(px, y, PANEL_WIDTH, BUTTON_HEIGHT, label))
    })
    .collect()
}
