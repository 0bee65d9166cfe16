use macroquad::prelude::*;

use crate::input::Action;

const TEXT: Color = Color::new(0.85, 0.92, 0.85, 1.0);
const DIM: Color = Color::new(0.55, 0.62, 0.55, 1.0);

pub struct HudView<'a> {
    pub paused: bool,
    pub score: u32,
    pub high_score: u32,
    pub message: &'a str,
}

/// Draws the strip under the board and returns the control clicked this frame.
pub fn draw_hud(top: f32, width: f32, view: &HudView) -> Option<Action> {
    draw_line(0.0, top, width, top, 2.0, DIM);

    draw_text(&format!("Score: {}", view.score), 12.0, top + 26.0, 24.0, TEXT);
    let best = format!("High Score: {}", view.high_score);
    let m = measure_text(&best, None, 24, 1.0);
    draw_text(&best, width - m.width - 12.0, top + 26.0, 24.0, TEXT);

    let mm = measure_text(view.message, None, 20, 1.0);
    draw_text(view.message, (width - mm.width) * 0.5, top + 52.0, 20.0, DIM);

    let controls = [
        ("START", Action::Start),
        (pause_label(view.paused), Action::TogglePause),
        ("RESTART", Action::Restart),
    ];
    let gap = 12.0;
    let w = (width - gap * (controls.len() as f32 + 1.0)) / controls.len() as f32;
    let mut clicked = None;
    for (i, (label, action)) in controls.iter().enumerate() {
        let x = gap + i as f32 * (w + gap);
        if button_hit(x, top + 64.0, w, 34.0, label) {
            clicked = Some(*action);
        }
    }
    clicked
}

fn pause_label(paused: bool) -> &'static str {
    if paused { "RESUME" } else { "PAUSE" }
}

fn button_hit(x: f32, y: f32, w: f32, h: f32, label: &str) -> bool {
    let hovered = {
        let (mx, my) = mouse_position();
        mx >= x && mx <= x + w && my >= y && my <= y + h
    };
    let pressed = hovered && is_mouse_button_pressed(MouseButton::Left);
    let bg = if hovered {
        Color::from_rgba(76, 175, 80, 90)
    } else {
        Color::from_rgba(0, 0, 0, 60)
    };
    draw_rectangle(x, y, w, h, bg);
    draw_rectangle_lines(x, y, w, h, 2.0, Color::from_rgba(255, 255, 255, 50));
    let m = measure_text(label, None, 20, 1.0);
    draw_text(label, x + (w - m.width) * 0.5, y + h * 0.68, 20.0, WHITE);
    pressed
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pause_control_reads_resume_while_paused() {
        assert_eq!(pause_label(false), "PAUSE");
        assert_eq!(pause_label(true), "RESUME");
    }
}
