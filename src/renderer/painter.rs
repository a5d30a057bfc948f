//! Frame painting for both variants

use glam::Vec2;

use super::{Surface, TextAlign};
use crate::session::Session;
use crate::sim::{ObstacleCourse, World};

/// Colors
pub mod theme {
    pub const PAPER: &str = "#EAE7D9";
    pub const INK: &str = "#000000";

    pub const NIGHT_TOP: &str = "#1b2140";
    pub const NIGHT_BOTTOM: &str = "#050714";
    pub const GROUND: &str = "#141b2d";
    pub const OBSTACLE: &str = "#ffcc4d";
    pub const RUNNER: &str = "#ffffff";
}

const WAVE_LINE_WIDTH: f32 = 3.0;
/// Paper-colored rim around the player so it reads against the line
const PLAYER_OUTLINE: f32 = 2.0;
const HUD_RIGHT_INSET: f32 = 16.0;
const HUD_BOTTOM_INSET: f32 = 18.0;

/// Terrain line, player and HUD for the EEG variant
pub fn paint_brainwave(surface: &mut impl Surface, session: &Session) {
    let (w, h) = session.size();
    surface.fill_rect(0.0, 0.0, w, h, theme::PAPER);

    // Half-pixel offset keeps the 3px stroke crisp
    let points: Vec<Vec2> = session
        .terrain()
        .height_field()
        .iter()
        .enumerate()
        .map(|(x, &y)| Vec2::new(x as f32 + 0.5, y + 0.5))
        .collect();
    surface.stroke_polyline(&points, theme::INK, WAVE_LINE_WIDTH);

    let player = session.player();
    let center = player.center();
    let angle = player.angle();
    surface.fill_rotated_square(center, player.size + PLAYER_OUTLINE * 2.0, angle, theme::PAPER);
    surface.fill_rotated_square(center, player.size, angle, theme::INK);

    let hud = session.hud();
    let x = w - HUD_RIGHT_INSET;
    let y = h - HUD_BOTTOM_INSET;
    surface.fill_text(&hud.stage, x, y, "20px 'Courier New', monospace", theme::INK, TextAlign::Right);
    surface.fill_text(&hud.clock, x, y + 20.0, "16px 'Courier New', monospace", theme::INK, TextAlign::Right);
}

/// Night sky, ground strip, blocks and runner
pub fn paint_obstacle_course(surface: &mut impl Surface, world: &World<ObstacleCourse>, w: f32, h: f32) {
    surface.fill_vertical_gradient(w, h, theme::NIGHT_TOP, theme::NIGHT_BOTTOM);

    let ground_y = world.terrain.ground_y;
    surface.fill_rect(0.0, ground_y, w, h - ground_y, theme::GROUND);

    for obs in &world.terrain.obstacles {
        surface.fill_rect(obs.x, ground_y - obs.height, obs.width, obs.height, theme::OBSTACLE);
    }

    let player = &world.player;
    surface.fill_rect(player.pos.x, player.pos.y, player.size, player.size, theme::RUNNER);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;
    use crate::sim::{PhysicsParams, Player};

    #[derive(Debug, Clone, PartialEq)]
    enum Op {
        Rect { x: f32, y: f32, w: f32, h: f32, color: String },
        Gradient,
        Line { points: usize, first: Vec2, last: Vec2 },
        Square { center: Vec2, size: f32, angle: f32 },
        Text { text: String, align: TextAlign },
    }

    #[derive(Default)]
    struct Recorder {
        ops: Vec<Op>,
    }

    impl Surface for Recorder {
        fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: &str) {
            self.ops.push(Op::Rect { x, y, w, h, color: color.to_string() });
        }

        fn fill_vertical_gradient(&mut self, _w: f32, _h: f32, _top: &str, _bottom: &str) {
            self.ops.push(Op::Gradient);
        }

        fn stroke_polyline(&mut self, points: &[Vec2], _color: &str, _width: f32) {
            self.ops.push(Op::Line {
                points: points.len(),
                first: points[0],
                last: points[points.len() - 1],
            });
        }

        fn fill_rotated_square(&mut self, center: Vec2, size: f32, angle: f32, _color: &str) {
            self.ops.push(Op::Square { center, size, angle });
        }

        fn fill_text(&mut self, text: &str, _x: f32, _y: f32, _font: &str, _color: &str, align: TextAlign) {
            self.ops.push(Op::Text { text: text.to_string(), align });
        }
    }

    #[test]
    fn test_brainwave_frame() {
        let session = Session::new(200.0, 120.0, Settings::default());
        let mut surface = Recorder::default();
        paint_brainwave(&mut surface, &session);

        assert_eq!(surface.ops.len(), 6);
        assert!(matches!(surface.ops[0], Op::Rect { w, h, .. } if w == 200.0 && h == 120.0));
        match &surface.ops[1] {
            Op::Line { points, first, .. } => {
                assert_eq!(*points, 200);
                assert_eq!(first.x, 0.5);
            }
            op => panic!("expected terrain line, got {:?}", op),
        }
        match (&surface.ops[2], &surface.ops[3]) {
            (Op::Square { size: outline, .. }, Op::Square { size, angle, .. }) => {
                assert_eq!(*outline, 44.0);
                assert_eq!(*size, 40.0);
                assert_eq!(*angle, 0.0);
            }
            ops => panic!("expected player squares, got {:?}", ops),
        }
        assert_eq!(
            surface.ops[4],
            Op::Text { text: "Stage: Unknown".into(), align: TextAlign::Right }
        );
        assert_eq!(
            surface.ops[5],
            Op::Text { text: "EDF time: 00:00:00".into(), align: TextAlign::Right }
        );
    }

    #[test]
    fn test_obstacle_frame() {
        let params = PhysicsParams::obstacle_course(800.0);
        let player = Player::new(Vec2::new(50.0, 300.0), params.player_size, false);
        let world = World::new(player, ObstacleCourse::starter(params.ground_y), params);
        let mut surface = Recorder::default();
        paint_obstacle_course(&mut surface, &world, 800.0, 450.0);

        // gradient, ground, 3 blocks, runner
        assert_eq!(surface.ops.len(), 6);
        assert_eq!(surface.ops[0], Op::Gradient);
        assert_eq!(
            surface.ops[3],
            Op::Rect { x: 480.0, y: 300.0, w: 60.0, h: 80.0, color: theme::OBSTACLE.into() }
        );
        assert_eq!(
            surface.ops[5],
            Op::Rect { x: 50.0, y: 300.0, w: 24.0, h: 24.0, color: theme::RUNNER.into() }
        );
    }
}
