use macroquad::prelude::*;

use super::{ACCENT, ACCENT_HOVER};

const ROW_HEIGHT: f32 = 26.0;
const FONT_SIZE: f32 = 15.0;

/// Dropdown selector for the side panel
#[derive(Clone)]
pub struct Dropdown {
    x: f32,
    y: f32,
    width: f32,
    label: String,
    items: Vec<String>,
    selected: usize,
    is_open: bool,
}

impl Dropdown {
    pub fn new(x: f32, y: f32, width: f32, label: impl Into<String>, items: Vec<String>) -> Self {
        Self {
            x,
            y,
            width,
            label: label.into(),
            items,
            selected: 0,
            is_open: false,
        }
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn set_selected(&mut self, index: usize) {
        if index < self.items.len() {
            self.selected = index;
        }
    }

    pub fn is_open(&self) -> bool {
        self.is_open
    }

    pub fn close(&mut self) {
        self.is_open = false;
    }

    pub fn set_position(&mut self, x: f32, y: f32) {
        self.x = x;
        self.y = y;
    }

    fn header(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, ROW_HEIGHT)
    }

    fn item(&self, index: usize) -> Rect {
        Rect::new(self.x, self.y + ROW_HEIGHT * (index + 1) as f32, self.width, ROW_HEIGHT)
    }

    fn hovered_item(&self, mouse: Vec2) -> Option<usize> {
        (0..self.items.len()).find(|&i| self.item(i).contains(mouse))
    }

    /// Handle clicks; true when the selection changed
    pub fn update(&mut self, mouse_pos: (f32, f32)) -> bool {
        if !is_mouse_button_pressed(MouseButton::Left) {
            return false;
        }
        let mouse = Vec2::from(mouse_pos);

        if self.header().contains(mouse) {
            self.is_open = !self.is_open;
            return false;
        }
        if !self.is_open {
            return false;
        }

        self.is_open = false;
        match self.hovered_item(mouse) {
            Some(index) if index != self.selected => {
                self.selected = index;
                true
            }
            _ => false,
        }
    }

    pub fn draw(&self, mouse_pos: (f32, f32)) {
        let mouse = Vec2::from(mouse_pos);
        let header = self.header();

        draw_text(&self.label, header.x, header.y - 4.0, 14.0, GRAY);
        let fill = if header.contains(mouse) { ACCENT_HOVER } else { ACCENT };
        draw_rectangle(header.x, header.y, header.w, header.h, fill);
        draw_rectangle_lines(header.x, header.y, header.w, header.h, 2.0, WHITE);

        if let Some(text) = self.items.get(self.selected) {
            draw_text(&fit_text(text, header.w - 26.0), header.x + 5.0, header.y + 18.0, FONT_SIZE, WHITE);
        }
        draw_text("v", header.x + header.w - 16.0, header.y + 18.0, FONT_SIZE, WHITE);

        if !self.is_open {
            return;
        }

        let hovered = self.hovered_item(mouse);
        for (i, text) in self.items.iter().enumerate() {
            let row = self.item(i);
            let fill = if hovered == Some(i) {
                ACCENT_HOVER
            } else if i == self.selected {
                Color::from_rgba(50, 100, 150, 255)
            } else {
                Color::from_rgba(45, 45, 45, 255)
            };
            draw_rectangle(row.x, row.y, row.w, row.h, fill);
            draw_rectangle_lines(row.x, row.y, row.w, row.h, 1.0, Color::from_rgba(80, 80, 80, 255));
            draw_text(&fit_text(text, row.w - 10.0), row.x + 5.0, row.y + 18.0, FONT_SIZE, WHITE);
        }
    }
}

/// Truncate with an ellipsis until the text fits `max_width`
fn fit_text(text: &str, max_width: f32) -> String {
    let fits = |s: &str| measure_text(s, None, FONT_SIZE as u16, 1.0).width <= max_width;
    if fits(text) {
        return text.to_owned();
    }

    let mut chars: Vec<char> = text.chars().collect();
    while !chars.is_empty() {
        chars.pop();
        let candidate = format!("{}...", chars.iter().collect::<String>());
        if fits(&candidate) {
            return candidate;
        }
    }
    "...".to_owned()
}
