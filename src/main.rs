use std::time::Duration;

use macroquad::prelude::*;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use life_engine::{
    Algorithm, Camera, Simulation, SimulationConfig, presets,
    domain::all_rules,
    input::{self, InputState},
    rendering::{self, PanelInfo},
    ui::{self, Dropdown, GRID_SIZES},
};

const DROPDOWN_TOPS: [f32; 4] = [20.0, 70.0, 120.0, 170.0];
const BUTTONS_TOP: f32 = 230.0;

fn window_conf() -> Conf {
    Conf {
        window_title: "Game of Life".to_owned(),
        window_width: 1000,
        window_height: 800,
        window_resizable: true,
        ..Default::default()
    }
}

#[macroquad::main(window_conf)]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(true)
        .init();

    let config = SimulationConfig::from_env().unwrap_or_else(|e| {
        warn!(error = %e, "invalid configuration, using defaults");
        SimulationConfig::default()
    });
    info!(
        rows = config.rows,
        cols = config.cols,
        rules = %config.rules,
        step_ms = config.step_interval_ms,
        wrap = config.wrap_edges,
        "life_engine starting"
    );

    let mut sim = Simulation::new(config);
    let mut camera = Camera::new();
    let mut input_state = InputState::default();

    let rules = all_rules();
    let algorithms = Algorithm::all();
    let patterns = presets::all_patterns();

    let px = ui::panel_x();
    let mut size_dropdown = Dropdown::new(
        px,
        DROPDOWN_TOPS[0],
        ui::PANEL_WIDTH,
        "Grid Size",
        GRID_SIZES.iter().map(|(_, name)| name.to_string()).collect(),
    );
    let mut rule_dropdown = Dropdown::new(
        px,
        DROPDOWN_TOPS[1],
        ui::PANEL_WIDTH,
        "Rule",
        rules.iter().map(|(name, _)| name.to_string()).collect(),
    );
    let mut algorithm_dropdown = Dropdown::new(
        px,
        DROPDOWN_TOPS[2],
        ui::PANEL_WIDTH,
        "Algorithm",
        algorithms.iter().map(|a| a.name().to_string()).collect(),
    );
    let mut pattern_dropdown = Dropdown::new(
        px,
        DROPDOWN_TOPS[3],
        ui::PANEL_WIDTH,
        "Pattern",
        patterns.iter().map(|p| p.name.to_string()).collect(),
    );

    if let Some(i) = GRID_SIZES.iter().position(|&(size, _)| size == config.rows) {
        size_dropdown.set_selected(i);
    }
    if let Some(i) = rules.iter().position(|&(_, rule)| rule == config.rules) {
        rule_dropdown.set_selected(i);
    }

    loop {
        let mouse_pos = mouse_position();

        let px = ui::panel_x();
        let mut dropdowns = [&mut size_dropdown, &mut rule_dropdown, &mut algorithm_dropdown, &mut pattern_dropdown];
        for (dropdown, top) in dropdowns.iter_mut().zip(DROPDOWN_TOPS) {
            dropdown.set_position(px, top);
        }

        // Only one dropdown may be open; a click resolves at most one of them
        let mut changed = None;
        for i in 0..dropdowns.len() {
            if dropdowns[i].update(mouse_pos) {
                changed = Some(i);
            }
            if dropdowns[i].is_open() {
                for (j, other) in dropdowns.iter_mut().enumerate() {
                    if j != i {
                        other.close();
                    }
                }
            }
        }
        let any_open = dropdowns.iter().any(|d| d.is_open());

        match changed {
            Some(0) => {
                let size = GRID_SIZES[size_dropdown.selected()].0;
                sim.set_grid_size(size, size);
                camera.reset();
            }
            Some(1) => {
                if let Some(&(_, rule)) = rules.get(rule_dropdown.selected()) {
                    sim.set_rules(rule);
                }
            }
            Some(2) => {
                if let Some(&algorithm) = algorithms.get(algorithm_dropdown.selected()) {
                    sim.set_algorithm(algorithm);
                }
            }
            Some(3) => {
                if let Some(pattern) = patterns.get(pattern_dropdown.selected()) {
                    sim.select_pattern(pattern.clone());
                }
            }
            _ => {}
        }

        let buttons = ui::create_buttons(BUTTONS_TOP);

        if !any_open && changed.is_none() {
            input::process_button_clicks(&mut sim, &buttons, mouse_pos);
            if sim.snapshot().is_placing_pattern() {
                input::handle_pattern_placement(&mut sim, &camera, mouse_pos);
            } else {
                input::handle_mouse_paint(&mut sim, &camera, mouse_pos);
            }
        }
        input::handle_zoom(&mut camera);
        input::handle_pan(&mut input_state, &mut camera, mouse_pos);
        input::process_keyboard_input(&mut sim, &mut camera);

        sim.tick(Duration::from_secs_f32(get_frame_time()));

        let state = sim.snapshot();
        clear_background(BLACK);
        rendering::draw_grid(&state.grid, &camera);

        if let (Some(pattern), Some(cell)) = (&state.pending_pattern, input::hovered_cell(&camera, mouse_pos)) {
            rendering::draw_pattern_preview(pattern, &camera, cell);
        }

        let info = PanelInfo {
            camera: &camera,
            algorithm: sim.algorithm(),
            last_step: sim.last_step_duration(),
        };
        rendering::draw_controls(
            &state,
            &info,
            &buttons,
            &[&size_dropdown, &rule_dropdown, &algorithm_dropdown, &pattern_dropdown],
            mouse_pos,
        );

        next_frame().await;
    }
}
