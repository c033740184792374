use std::time::Duration;

use macroquad::prelude::*;

use crate::application::{Camera, SimulationState, SpeedLevel};
use crate::domain::{Algorithm, Cell, Grid, Pattern};
use crate::ui::{Action, Button, CELL_SIZE, Dropdown, PANEL_WIDTH, grid_area_height, grid_area_width, panel_x};

const ALIVE: Color = Color::new(0.0, 1.0, 0.59, 1.0);
const GRID_LINE: Color = Color::new(0.16, 0.16, 0.16, 1.0);
const DEAD: Color = Color::new(0.06, 0.06, 0.06, 1.0);

/// Format large numbers with K/M suffixes
fn format_number(n: usize) -> String {
    if n >= 1_000_000 {
        format!("{:.1}M", n as f64 / 1_000_000.0)
    } else if n >= 1_000 {
        format!("{:.1}K", n as f64 / 1_000.0)
    } else {
        n.to_string()
    }
}

/// Draw the board: background for the visible part, then only alive cells
pub fn draw_grid(grid: &Grid, camera: &Camera) {
    let size = CELL_SIZE * camera.zoom;
    let (area_w, area_h) = (grid_area_width(), grid_area_height());
    let (rows, cols) = grid.dimensions();

    let (x0, y0) = camera.cell_to_screen(Cell::new(0, 0), CELL_SIZE);
    draw_rectangle(x0, y0, cols as f32 * size, rows as f32 * size, DEAD);

    let (first, last) = camera.visible_cells(area_w, area_h, CELL_SIZE);
    let visible = |c: Cell| (first.row..=last.row).contains(&c.row) && (first.col..=last.col).contains(&c.col);

    for cell in grid.alive_cells().filter(|&c| visible(c)) {
        let (x, y) = camera.cell_to_screen(cell, CELL_SIZE);
        draw_rectangle(x, y, size, size, ALIVE);
    }

    // Lines only once cells are big enough to tell apart
    if size >= 6.0 {
        let row_range = first.row.max(0)..=last.row.min(rows as i32);
        let col_range = first.col.max(0)..=last.col.min(cols as i32);
        let height = rows as f32 * size;
        let width = cols as f32 * size;
        for col in col_range {
            let x = x0 + col as f32 * size;
            draw_line(x, y0, x, y0 + height, 1.0, GRID_LINE);
        }
        for row in row_range {
            let y = y0 + row as f32 * size;
            draw_line(x0, y, x0 + width, y, 1.0, GRID_LINE);
        }
    }
}

/// Ghost of a pattern centred on the hovered cell
pub fn draw_pattern_preview(pattern: &Pattern, camera: &Camera, hovered: Cell) {
    let size = CELL_SIZE * camera.zoom;
    let origin = hovered.offset(-pattern.height() / 2, -pattern.width() / 2);

    for cell in &pattern.cells {
        let (x, y) = camera.cell_to_screen(cell.offset(origin.row, origin.col), CELL_SIZE);
        draw_rectangle(x, y, size, size, Color::from_rgba(0, 255, 150, 120));
        draw_rectangle_lines(x, y, size, size, 1.5, Color::from_rgba(0, 255, 150, 200));
    }

    let (bx, by) = camera.cell_to_screen(origin, CELL_SIZE);
    draw_rectangle_lines(
        bx,
        by,
        pattern.width() as f32 * size,
        pattern.height() as f32 * size,
        2.0,
        Color::from_rgba(255, 255, 0, 180),
    );
}

/// Colour for a step duration: green when cheap, red when it eats the frame
fn timing_color(elapsed: Duration) -> Color {
    match elapsed.as_secs_f32() * 1000.0 {
        ms if ms < 5.0 => GREEN,
        ms if ms < 33.0 => YELLOW,
        ms if ms < 100.0 => ORANGE,
        _ => RED,
    }
}

/// Everything the side panel reports besides the snapshot itself
pub struct PanelInfo<'a> {
    pub camera: &'a Camera,
    pub algorithm: Algorithm,
    pub last_step: Duration,
}

/// Side panel: buttons, status text, then dropdowns on top
pub fn draw_controls(
    state: &SimulationState,
    info: &PanelInfo<'_>,
    buttons: &[(Action, Button)],
    dropdowns: &[&Dropdown],
    mouse_pos: (f32, f32),
) {
    let px = panel_x();
    draw_rectangle(px, 0.0, PANEL_WIDTH, screen_height(), Color::from_rgba(30, 30, 30, 255));

    buttons.iter().for_each(|(_, button)| button.draw(mouse_pos));

    let (rows, cols) = state.grid.dimensions();
    let speed = SpeedLevel::nearest(state.config.step_interval_ms);
    let status = if state.is_running { "Running" } else { "Paused" };
    let status_color = if state.is_running { GREEN } else { ORANGE };
    let rule = state.config.rules.to_notation();

    let lines: [(String, f32, Color); 10] = [
        (format!("Generation: {}", state.generation), 18.0, ALIVE),
        (format!("Population: {}", format_number(state.population())), 16.0, WHITE),
        (format!("Status: {status}"), 16.0, status_color),
        (format!("Rule: {rule}"), 14.0, WHITE),
        (
            format!("Speed: {}/10 ({} ms)", speed.display_number(), state.config.step_interval_ms),
            14.0,
            WHITE,
        ),
        (
            format!("Edges: {}", if state.config.wrap_edges { "wrap" } else { "bounded" }),
            14.0,
            WHITE,
        ),
        (format!("Grid: {rows}×{cols}"), 14.0, GRAY),
        (
            format!("Step: {:.2} ms", info.last_step.as_secs_f32() * 1000.0),
            14.0,
            timing_color(info.last_step),
        ),
        (format!("{} | FPS: {}", info.algorithm.name(), get_fps()), 12.0, GRAY),
        (format!("Zoom: {:.1}x", info.camera.zoom), 12.0, GRAY),
    ];

    let mut y = 520.0;
    for (text, size, color) in &lines {
        draw_text(text, px + 5.0, y, *size, *color);
        y += size + 6.0;
    }

    let help = [
        "LMB paint / RMB erase",
        "Space play, N step",
        "C clear, R random, W wrap",
        "Up/Down speed, H home",
        "Wheel zoom, MMB pan",
    ];
    y += 10.0;
    for text in help {
        draw_text(text, px + 5.0, y, 12.0, GRAY);
        y += 14.0;
    }

    if let Some(pattern) = &state.pending_pattern {
        draw_text(&format!("Placing: {}", pattern.name), px + 5.0, y + 10.0, 14.0, YELLOW);
    }

    // Open dropdown last so its list covers the others
    let (open, closed): (Vec<&Dropdown>, Vec<&Dropdown>) = dropdowns.iter().copied().partition(|d| d.is_open());
    closed.into_iter().chain(open).for_each(|d| d.draw(mouse_pos));
}
