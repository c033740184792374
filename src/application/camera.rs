use crate::domain::Cell;

const MIN_ZOOM: f32 = 0.5;
const MAX_ZOOM: f32 = 10.0;

/// Camera maps between screen pixels and grid cells.
/// Columns run along x, rows along y.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Camera {
    pub offset_x: f32,
    pub offset_y: f32,
    pub zoom: f32, // 1.0 = normal, 2.0 = 2x zoomed in
}

impl Camera {
    pub fn new() -> Self {
        Self {
            offset_x: 0.0,
            offset_y: 0.0,
            zoom: 1.0,
        }
    }

    pub fn zoom_by(&mut self, factor: f32) {
        self.zoom = (self.zoom * factor).clamp(MIN_ZOOM, MAX_ZOOM);
    }

    pub fn pan(&mut self, dx: f32, dy: f32) {
        self.offset_x += dx;
        self.offset_y += dy;
    }

    /// Cell under a screen position; may be outside the grid
    pub fn screen_to_cell(&self, screen_x: f32, screen_y: f32, cell_size: f32) -> Cell {
        let size = cell_size * self.zoom;
        Cell::new(
            ((screen_y - self.offset_y) / size).floor() as i32,
            ((screen_x - self.offset_x) / size).floor() as i32,
        )
    }

    /// Top-left screen corner of a cell
    pub fn cell_to_screen(&self, cell: Cell, cell_size: f32) -> (f32, f32) {
        let size = cell_size * self.zoom;
        (
            cell.col as f32 * size + self.offset_x,
            cell.row as f32 * size + self.offset_y,
        )
    }

    /// First and last cell visible in a viewport, for culling
    pub fn visible_cells(&self, viewport_width: f32, viewport_height: f32, cell_size: f32) -> (Cell, Cell) {
        (
            self.screen_to_cell(0.0, 0.0, cell_size),
            self.screen_to_cell(viewport_width, viewport_height, cell_size),
        )
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new()
    }
}
