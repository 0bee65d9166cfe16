use macroquad::prelude::*;

use crate::game::{Cell, GameState};

pub const SNAKE_HEAD: Color = Color::new(0.298, 0.686, 0.314, 1.0); // #4CAF50
pub const SNAKE_BODY: Color = Color::new(0.545, 0.765, 0.290, 1.0); // #8BC34A
pub const SNAKE_EDGE: Color = Color::new(0.180, 0.490, 0.196, 1.0); // #2E7D32
pub const FOOD: Color = Color::new(1.0, 0.341, 0.133, 1.0); // #FF5722
pub const BOARD_BG: Color = Color::new(0.09, 0.10, 0.11, 1.0);

/// The drawing primitives the game needs from a 2D surface, in surface pixels.
pub trait Surface {
    fn clear(&mut self);
    fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: Color);
    fn stroke_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: Color);
    fn fill_circle(&mut self, x: f32, y: f32, r: f32, color: Color);
}

fn cell_origin(c: Cell, cell_px: f32) -> (f32, f32) {
    (c.x as f32 * cell_px, c.y as f32 * cell_px)
}

/// Draws the snake, head first, then the food on top.
pub fn render(state: &GameState, cell_px: f32, surface: &mut impl Surface) {
    surface.clear();

    for (i, c) in state.snake().iter().enumerate() {
        let (x, y) = cell_origin(*c, cell_px);
        let fill = if i == 0 { SNAKE_HEAD } else { SNAKE_BODY };
        surface.fill_rect(x, y, cell_px, cell_px, fill);
        surface.stroke_rect(x, y, cell_px, cell_px, SNAKE_EDGE);
    }

    let (x, y) = cell_origin(state.food(), cell_px);
    let half = cell_px / 2.0;
    surface.fill_circle(x + half, y + half, half * 0.8, FOOD);
}

/// The board area of the macroquad window, offset to `origin`.
pub struct ScreenSurface {
    origin: Vec2,
    size: Vec2,
}

impl ScreenSurface {
    pub fn new(origin: Vec2, size: Vec2) -> Self {
        Self { origin, size }
    }
}

impl Surface for ScreenSurface {
    fn clear(&mut self) {
        draw_rectangle(self.origin.x, self.origin.y, self.size.x, self.size.y, BOARD_BG);
    }

    fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: Color) {
        draw_rectangle(self.origin.x + x, self.origin.y + y, w, h, color);
    }

    fn stroke_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: Color) {
        draw_rectangle_lines(self.origin.x + x, self.origin.y + y, w, h, 1.0, color);
    }

    fn fill_circle(&mut self, x: f32, y: f32, r: f32, color: Color) {
        draw_circle(self.origin.x + x, self.origin.y + y, r, color);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Board, Heading, SpeedCurve};
    use std::time::Duration;

    #[derive(Debug, PartialEq)]
    enum Op {
        Clear,
        Fill(f32, f32, f32, f32, Color),
        Stroke(f32, f32, f32, f32, Color),
        Circle(f32, f32, f32, Color),
    }

    #[derive(Default)]
    struct Recorder(Vec<Op>);

    impl Surface for Recorder {
        fn clear(&mut self) {
            self.0.push(Op::Clear);
        }
        fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: Color) {
            self.0.push(Op::Fill(x, y, w, h, color));
        }
        fn stroke_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: Color) {
            self.0.push(Op::Stroke(x, y, w, h, color));
        }
        fn fill_circle(&mut self, x: f32, y: f32, r: f32, color: Color) {
            self.0.push(Op::Circle(x, y, r, color));
        }
    }

    #[test]
    fn draws_snake_then_food() {
        let state = GameState::from_parts(
            vec![Cell::new(2, 1), Cell::new(1, 1)],
            Heading::Right,
            Cell::new(5, 0),
            0,
            Board { width: 20, height: 20 },
            SpeedCurve {
                base: Duration::from_millis(150),
                step: Duration::from_millis(10),
                floor: Duration::from_millis(50),
                every: 5,
            },
        );
        let mut rec = Recorder::default();
        render(&state, 20.0, &mut rec);

        assert_eq!(
            rec.0,
            vec![
                Op::Clear,
                Op::Fill(40.0, 20.0, 20.0, 20.0, SNAKE_HEAD),
                Op::Stroke(40.0, 20.0, 20.0, 20.0, SNAKE_EDGE),
                Op::Fill(20.0, 20.0, 20.0, 20.0, SNAKE_BODY),
                Op::Stroke(20.0, 20.0, 20.0, 20.0, SNAKE_EDGE),
                Op::Circle(110.0, 10.0, 8.0, FOOD),
            ]
        );
    }
}
