use std::sync::OnceLock;
use std::time::Duration;

use macroquad::prelude::*;
use tracing_subscriber::EnvFilter;

mod config;
mod controller;
mod game;
mod hud;
mod input;
mod render;
mod storage;
mod ticker;

use config::GameConfig;
use controller::{Controller, Phase};
use hud::HudView;
use render::ScreenSurface;
use storage::{KeyValueStore, LocalHighScore};

static STARTUP_CONFIG: OnceLock<GameConfig> = OnceLock::new();

fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .try_init();
}

/// Read once, after logging is up, so override warnings are not lost.
fn startup_config() -> &'static GameConfig {
    STARTUP_CONFIG.get_or_init(|| {
        init_logging();
        GameConfig::from_env()
    })
}

fn window_conf() -> Conf {
    let (window_width, window_height) = startup_config().window_size();
    Conf {
        window_title: "Snake".to_owned(),
        window_width,
        window_height,
        window_resizable: false,
        high_dpi: true,
        ..Default::default()
    }
}

#[macroquad::main(window_conf)]
async fn main() {
    let config = startup_config().clone();
    macroquad::rand::srand((macroquad::miniquad::date::now() * 1000.0) as u64);

    let board_px = vec2(config.surface_width as f32, config.surface_height as f32);
    let store = LocalHighScore::new(KeyValueStore::new(config.store_path.clone()));
    let mut game = Controller::new(config, store);
    tracing::info!(board = ?game.state().board(), "snake ready");

    loop {
        for action in input::pressed_actions() {
            game.handle_key(action);
        }
        game.advance(Duration::from_secs_f32(get_frame_time()));

        clear_background(BLACK);
        let mut surface = ScreenSurface::new(Vec2::ZERO, board_px);
        render::render(game.state(), game.cell_size() as f32, &mut surface);

        let clicked = hud::draw_hud(
            board_px.y,
            board_px.x,
            &HudView {
                paused: game.phase() == Phase::Paused,
                score: game.score(),
                high_score: game.high_score(),
                message: game.message(),
            },
        );
        if let Some(action) = clicked {
            game.apply(action);
        }

        next_frame().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn window_and_game_share_one_config() {
        let first = startup_config();
        let second = startup_config();
        assert!(std::ptr::eq(first, second));
        assert_eq!(window_conf().window_height, first.window_size().1);
    }
}
