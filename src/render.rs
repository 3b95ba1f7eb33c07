//! Rendering adapter
//!
//! Turns a simulation snapshot into a flat list of 2D draw commands. The
//! list is backend-agnostic; the web build paints it on a canvas.

use crate::consts::*;
use crate::sim::Snapshot;
use crate::sim::collision::{character_rect, obstacle_rect};

pub const BACKGROUND_COLOR: &str = "#f3f4f6";
pub const GROUND_COLOR: &str = "#9ca3af";
pub const CHARACTER_COLOR: &str = "#16a34a";
pub const OBSTACLE_COLOR: &str = "#dc2626";
pub const TEXT_COLOR: &str = "#111827";
pub const OVERLAY_COLOR: &str = "rgba(0, 0, 0, 0.5)";
pub const OVERLAY_TEXT_COLOR: &str = "#ffffff";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAlign {
    Left,
    Center,
    Right,
}

impl TextAlign {
    /// Canvas `textAlign` value
    pub fn as_str(&self) -> &'static str {
        match self {
            TextAlign::Left => "left",
            TextAlign::Center => "center",
            TextAlign::Right => "right",
        }
    }
}

/// A single 2D primitive in play-field coordinates
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Rect {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        color: &'static str,
    },
    Text {
        x: f32,
        y: f32,
        text: String,
        font: &'static str,
        align: TextAlign,
        color: &'static str,
    },
}

impl DrawCommand {
    fn rect(x: f32, y: f32, width: f32, height: f32, color: &'static str) -> Self {
        DrawCommand::Rect {
            x,
            y,
            width,
            height,
            color,
        }
    }

    fn text(x: f32, y: f32, text: String, font: &'static str, align: TextAlign, color: &'static str) -> Self {
        DrawCommand::Text {
            x,
            y,
            text,
            font,
            align,
            color,
        }
    }
}

/// Build the draw list for one frame, back to front
pub fn draw_list(snapshot: &Snapshot) -> Vec<DrawCommand> {
    let mut commands = Vec::with_capacity(snapshot.obstacles.len() + 8);

    commands.push(DrawCommand::rect(0.0, 0.0, GAME_WIDTH, GAME_HEIGHT, BACKGROUND_COLOR));
    commands.push(DrawCommand::rect(
        0.0,
        GROUND_LINE_Y,
        GAME_WIDTH,
        GAME_HEIGHT - GROUND_LINE_Y,
        GROUND_COLOR,
    ));

    for obstacle in &snapshot.obstacles {
        let rect = obstacle_rect(obstacle);
        commands.push(DrawCommand::rect(
            rect.min.x,
            rect.min.y,
            rect.width(),
            rect.height(),
            OBSTACLE_COLOR,
        ));
    }

    let character = character_rect(snapshot.character_y);
    commands.push(DrawCommand::rect(
        character.min.x,
        character.min.y,
        character.width(),
        character.height(),
        CHARACTER_COLOR,
    ));

    commands.push(DrawCommand::text(
        GAME_WIDTH - 8.0,
        24.0,
        format!("Score: {}", snapshot.score),
        "18px monospace",
        TextAlign::Right,
        TEXT_COLOR,
    ));

    if snapshot.is_game_over {
        let cx = GAME_WIDTH / 2.0;
        commands.push(DrawCommand::rect(0.0, 0.0, GAME_WIDTH, GAME_HEIGHT, OVERLAY_COLOR));
        commands.push(DrawCommand::text(
            cx,
            70.0,
            "GAME OVER".to_string(),
            "bold 36px sans-serif",
            TextAlign::Center,
            OVERLAY_TEXT_COLOR,
        ));
        commands.push(DrawCommand::text(
            cx,
            110.0,
            format!("Score: {}", snapshot.score),
            "20px sans-serif",
            TextAlign::Center,
            OVERLAY_TEXT_COLOR,
        ));
        commands.push(DrawCommand::text(
            cx,
            145.0,
            "Press Space to Restart".to_string(),
            "18px sans-serif",
            TextAlign::Center,
            OVERLAY_TEXT_COLOR,
        ));
    }

    commands
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::Obstacle;

    fn snapshot() -> Snapshot {
        Snapshot {
            character_y: -12.0,
            is_airborne: true,
            obstacles: vec![
                Obstacle {
                    x: 300.0,
                    width: 20.0,
                    height: 40.0,
                },
                Obstacle {
                    x: 520.0,
                    width: 20.0,
                    height: 35.0,
                },
            ],
            score: 42,
            is_game_over: false,
            speed: 5.5,
        }
    }

    fn rects_with(commands: &[DrawCommand], wanted: &str) -> Vec<(f32, f32, f32, f32)> {
        commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Rect {
                    x,
                    y,
                    width,
                    height,
                    color,
                } if *color == wanted => Some((*x, *y, *width, *height)),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_obstacles_stand_on_ground_line() {
        let commands = draw_list(&snapshot());
        let obstacles = rects_with(&commands, OBSTACLE_COLOR);
        assert_eq!(obstacles.len(), 2);
        for (_, y, _, h) in obstacles {
            assert_eq!(y + h, GROUND_LINE_Y);
        }
    }

    #[test]
    fn test_character_follows_offset() {
        let commands = draw_list(&snapshot());
        let character = rects_with(&commands, CHARACTER_COLOR);
        assert_eq!(
            character,
            vec![(CHARACTER_X, GROUND_LINE_Y - CHARACTER_HEIGHT - 12.0, CHARACTER_WIDTH, CHARACTER_HEIGHT)]
        );
    }

    #[test]
    fn test_overlay_only_after_game_over() {
        let running = draw_list(&snapshot());
        assert!(rects_with(&running, OVERLAY_COLOR).is_empty());

        let over = draw_list(&Snapshot {
            is_game_over: true,
            ..snapshot()
        });
        assert_eq!(rects_with(&over, OVERLAY_COLOR).len(), 1);
        assert!(over.iter().any(|c| matches!(c, DrawCommand::Text { text, .. } if text == "GAME OVER")));
    }

    #[test]
    fn test_score_label() {
        let commands = draw_list(&snapshot());
        assert!(
            commands
                .iter()
                .any(|c| matches!(c, DrawCommand::Text { text, .. } if text == "Score: 42"))
        );
    }
}
