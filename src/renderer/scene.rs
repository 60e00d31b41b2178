//! Scene assembly: game state to triangles
//!
//! Draw order is track, warnings, missiles, ship. Coordinates are canvas
//! pixels with y growing downward.

use glam::Vec2;

use super::shapes::{ellipse, push_centered_rect, push_rect, push_triangle};
use super::vertex::{Vertex, colors};
use crate::consts::TRACK_DASH_PERIOD;
use crate::settings::Settings;
use crate::sim::{GameState, Obstacle, Player};

/// Lane-divider dash length
const DASH_LENGTH: f32 = 18.0;
/// Lane-divider dash thickness
const DASH_WIDTH: f32 = 4.0;
/// Inset of the warning band from the lane edges
const WARNING_INSET: f32 = 4.0;
/// Kerb dash pattern (on/off)
const KERB_DASH: f32 = 6.0;
/// Ship art is drawn slightly larger than its nominal size
const SHIP_ART_SCALE: f32 = 1.05;

/// Build the full frame
pub fn build(state: &GameState, settings: &Settings) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity(1024);
    push_track(&mut vertices, state, settings);
    push_warnings(&mut vertices, state, settings);
    for obstacle in &state.obstacles {
        push_missile(&mut vertices, state, obstacle);
    }
    push_ship(&mut vertices, state, &state.player);
    vertices
}

fn push_track(vertices: &mut Vec<Vertex>, state: &GameState, settings: &Settings) {
    let (width, height) = (state.tuning.width, state.tuning.height);
    let layout = &state.layout;
    let pad = layout.padding;

    push_rect(vertices, 0.0, 0.0, width, height, colors::GRASS);
    push_rect(vertices, pad - 10.0, 0.0, width - pad * 2.0 + 20.0, height, colors::TRACK_GLOW);
    push_rect(vertices, pad + 4.0, 0.0, width - pad * 2.0 - 8.0, height, colors::TRACK);

    // Scrolling dashes between lanes
    let offset = if settings.effective_track_scroll() {
        state.track_offset
    } else {
        0.0
    };
    let dash_color = if settings.high_contrast {
        colors::LANE_DASH_HIGH_CONTRAST
    } else {
        colors::LANE_DASH
    };
    for lane in 1..layout.lanes {
        let boundary = layout.lane_left(lane);
        let mut y = -TRACK_DASH_PERIOD;
        while y < height + TRACK_DASH_PERIOD {
            push_rect(
                vertices,
                boundary - DASH_WIDTH / 2.0,
                y + offset,
                DASH_WIDTH,
                DASH_LENGTH,
                dash_color,
            );
            y += TRACK_DASH_PERIOD;
        }
    }

    // Solid edges, dashed kerbs outside them
    for x in [pad - 12.0, width - pad + 12.0] {
        push_rect(vertices, x - 1.5, 0.0, 3.0, height, colors::TRACK_EDGE);
    }
    for x in [pad - 20.0, width - pad + 20.0] {
        let mut y = 0.0;
        while y < height {
            push_rect(vertices, x - 1.0, y, 2.0, KERB_DASH, colors::TRACK_KERB);
            y += KERB_DASH * 2.0;
        }
    }
}

fn push_warnings(vertices: &mut Vec<Vertex>, state: &GameState, settings: &Settings) {
    let color = if settings.high_contrast {
        colors::WARNING_HIGH_CONTRAST
    } else {
        colors::WARNING
    };
    for warning in state.warnings.iter().filter(|w| w.active && w.visible) {
        push_rect(
            vertices,
            state.layout.lane_left(warning.lane) + WARNING_INSET,
            0.0,
            state.layout.lane_width - WARNING_INSET * 2.0,
            state.tuning.height,
            color,
        );
    }
}

/// Missile art, nose pointing down
fn push_missile(vertices: &mut Vec<Vertex>, state: &GameState, obstacle: &Obstacle) {
    let center = Vec2::new(state.layout.lane_center(obstacle.lane), obstacle.y);
    let body = obstacle.body_size();
    // Art is authored nose-up and flipped
    let at = |x: f32, y: f32| center - Vec2::new(x * body.x, y * body.y);

    push_centered_rect(vertices, center, body * 0.9, colors::MISSILE_BODY);
    push_triangle(vertices, at(0.0, -0.65), at(0.45, -0.2), at(-0.45, -0.2), colors::MISSILE_TIP);
    push_centered_rect(
        vertices,
        at(0.0, -0.025),
        Vec2::new(body.x * 0.4, body.y * 0.25),
        colors::MISSILE_BAND,
    );
    push_triangle(vertices, at(-0.45, 0.15), at(-0.75, 0.35), at(-0.45, 0.35), colors::MISSILE_FIN);
    push_triangle(vertices, at(0.45, 0.15), at(0.75, 0.35), at(0.45, 0.35), colors::MISSILE_FIN);
    push_triangle(vertices, at(0.0, 0.55), at(0.25, 0.2), at(-0.25, 0.2), colors::MISSILE_FLAME);
}

fn push_ship(vertices: &mut Vec<Vertex>, state: &GameState, player: &Player) {
    let center = Vec2::new(state.layout.lane_center(player.lane), player.y);
    let body = Vec2::new(player.width, player.height) * SHIP_ART_SCALE;
    let at = |x: f32, y: f32| center + Vec2::new(x * body.x, y * body.y);
    let rect = |vertices: &mut Vec<Vertex>, x: f32, y: f32, w: f32, h: f32, color| {
        let corner = at(x, y);
        push_rect(vertices, corner.x, corner.y, w * body.x, h * body.y, color);
    };

    rect(vertices, -0.18, -0.55, 0.36, 1.1, colors::SHIP_BODY);

    // Nose diamond
    push_triangle(vertices, at(0.0, -0.7), at(0.18, -0.35), at(-0.18, -0.35), colors::SHIP_NOSE);
    push_triangle(vertices, at(-0.18, -0.35), at(0.18, -0.35), at(0.0, -0.15), colors::SHIP_NOSE);

    rect(vertices, -0.14, -0.18, 0.28, 0.25, colors::SHIP_COCKPIT);

    for (x, y) in [(-0.5, -0.28), (0.32, -0.28), (-0.5, 0.12), (0.32, 0.12)] {
        rect(vertices, x, y, 0.18, 0.24, colors::SHIP_WHEEL);
    }

    rect(vertices, -0.6, -0.48, 1.2, 0.12, colors::SHIP_WING);
    rect(vertices, -0.55, 0.42, 1.1, 0.16, colors::SHIP_BODY);

    vertices.extend(ellipse(
        at(0.0, -0.42),
        Vec2::new(body.x * 0.1, body.y * 0.08),
        colors::SHIP_GLINT,
        12,
    ));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::trigger_warning;

    fn count_color(vertices: &[Vertex], color: [f32; 4]) -> usize {
        vertices.iter().filter(|v| v.color == color).count()
    }

    #[test]
    fn test_warning_drawn_only_when_visible() {
        let mut state = GameState::new(1);
        let settings = Settings::default();
        assert_eq!(count_color(&build(&state, &settings), colors::WARNING), 0);

        trigger_warning(&mut state, 4);
        assert_eq!(count_color(&build(&state, &settings), colors::WARNING), 6);

        state.warnings[4].visible = false;
        assert_eq!(count_color(&build(&state, &settings), colors::WARNING), 0);
    }

    #[test]
    fn test_missile_drawn_in_lane() {
        let mut state = GameState::new(1);
        state.obstacles.push(Obstacle {
            lane: 6,
            y: 300.0,
            radius: 25.0,
            speed: 3.0,
        });
        let vertices = build(&state, &Settings::default());

        let lane_center = state.layout.lane_center(6);
        let body: Vec<&Vertex> = vertices
            .iter()
            .filter(|v| v.color == colors::MISSILE_BODY)
            .collect();
        assert_eq!(body.len(), 6);
        assert!(body.iter().all(|v| (v.position[0] - lane_center).abs() < 25.0));

        // Nose points down
        let tip_max_y = vertices
            .iter()
            .filter(|v| v.color == colors::MISSILE_TIP)
            .map(|v| v.position[1])
            .fold(f32::MIN, f32::max);
        assert!(tip_max_y > 300.0);
    }

    #[test]
    fn test_reduced_motion_freezes_dashes() {
        let mut state = GameState::new(1);
        let settings = Settings {
            reduced_motion: true,
            ..Settings::default()
        };
        let before = build(&state, &settings);
        state.track_offset = 17.0;
        assert_eq!(build(&state, &settings), before);

        let moving = build(&state, &Settings::default());
        assert_ne!(moving, before);
    }
}
