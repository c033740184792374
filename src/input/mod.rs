use macroquad::prelude::*;

use crate::application::{Camera, Simulation, SpeedLevel};
use crate::domain::{Cell, DEFAULT_DENSITY};
use crate::ui::{Action, Button, CELL_SIZE, grid_area_width};

/// Per-frame input bookkeeping that outlives a single frame
#[derive(Default)]
pub struct InputState {
    last_pan: Option<(f32, f32)>,
}

/// Zoom with the mouse wheel
pub fn handle_zoom(camera: &mut Camera) {
    let wheel = mouse_wheel().1;
    if wheel > 0.0 {
        camera.zoom_by(1.1);
    } else if wheel < 0.0 {
        camera.zoom_by(1.0 / 1.1);
    }
}

/// Pan while the middle button is held
pub fn handle_pan(input: &mut InputState, camera: &mut Camera, mouse_pos: (f32, f32)) {
    if !is_mouse_button_down(MouseButton::Middle) {
        input.last_pan = None;
        return;
    }
    if let Some((lx, ly)) = input.last_pan {
        camera.pan(mouse_pos.0 - lx, mouse_pos.1 - ly);
    }
    input.last_pan = Some(mouse_pos);
}

/// Grid cell under the cursor, if the cursor is over the grid area
pub fn hovered_cell(camera: &Camera, mouse_pos: (f32, f32)) -> Option<Cell> {
    (mouse_pos.0 < grid_area_width()).then(|| camera.screen_to_cell(mouse_pos.0, mouse_pos.1, CELL_SIZE))
}

/// Left button paints, right button erases. Disabled while running.
pub fn handle_mouse_paint(sim: &mut Simulation, camera: &Camera, mouse_pos: (f32, f32)) {
    if sim.snapshot().is_running {
        return;
    }
    let Some(cell) = hovered_cell(camera, mouse_pos) else {
        return;
    };

    if is_mouse_button_down(MouseButton::Left) {
        sim.set_cell(cell.row, cell.col, true);
    } else if is_mouse_button_down(MouseButton::Right) {
        sim.set_cell(cell.row, cell.col, false);
    }
}

/// Place the pending pattern centred on the cursor; right click or Escape cancels
pub fn handle_pattern_placement(sim: &mut Simulation, camera: &Camera, mouse_pos: (f32, f32)) {
    let state = sim.snapshot();
    let Some(pattern) = state.pending_pattern.as_ref() else {
        return;
    };

    if is_mouse_button_pressed(MouseButton::Right) || is_key_pressed(KeyCode::Escape) {
        sim.cancel_pattern_placement();
        return;
    }
    if !is_mouse_button_pressed(MouseButton::Left) {
        return;
    }
    if let Some(cell) = hovered_cell(camera, mouse_pos) {
        sim.place_pattern(cell.row - pattern.height() / 2, cell.col - pattern.width() / 2);
    }
}

pub fn process_keyboard_input(sim: &mut Simulation, camera: &mut Camera) {
    type KeyAction = (KeyCode, fn(&mut Simulation));

    let actions: [KeyAction; 7] = [
        (KeyCode::Space, Simulation::toggle_play_pause),
        (KeyCode::N, Simulation::step),
        (KeyCode::C, Simulation::clear),
        (KeyCode::R, |s| s.randomize(DEFAULT_DENSITY)),
        (KeyCode::W, Simulation::toggle_wrap_edges),
        (KeyCode::Up, |s| change_speed(s, SpeedLevel::faster)),
        (KeyCode::Down, |s| change_speed(s, SpeedLevel::slower)),
    ];

    for (key, action) in actions {
        if is_key_pressed(key) {
            action(sim);
        }
    }

    // H: home
    if is_key_pressed(KeyCode::H) {
        camera.reset();
    }
}

fn change_speed(sim: &mut Simulation, next: fn(SpeedLevel) -> SpeedLevel) {
    let current = SpeedLevel::nearest(sim.snapshot().config.step_interval_ms);
    sim.set_speed(next(current).delay_ms());
}

pub fn process_button_clicks(sim: &mut Simulation, buttons: &[(Action, Button)], mouse_pos: (f32, f32)) {
    for (action, button) in buttons {
        if !button.is_clicked(mouse_pos) {
            continue;
        }
        match action {
            Action::TogglePlay => sim.toggle_play_pause(),
            Action::Step => sim.step(),
            Action::Clear => sim.clear(),
            Action::Randomize => sim.randomize(DEFAULT_DENSITY),
            Action::ToggleWrap => sim.toggle_wrap_edges(),
        }
    }
}
