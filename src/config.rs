use std::env;
use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

use crate::game::{Board, Cell, SpeedCurve};

pub const DEFAULT_SURFACE_WIDTH: u32 = 400;
pub const DEFAULT_SURFACE_HEIGHT: u32 = 400;
pub const DEFAULT_CELL_SIZE: u32 = 20;
pub const DEFAULT_BASE_INTERVAL_MS: u32 = 150;
pub const DEFAULT_INTERVAL_STEP_MS: u32 = 10;
pub const DEFAULT_MIN_INTERVAL_MS: u32 = 50;
pub const DEFAULT_SPEEDUP_EVERY: u32 = 5;
pub const DEFAULT_STORE_PATH: &str = "snake_storage.json";
pub const HUD_HEIGHT: u32 = 110;
pub const MAX_SURFACE_PX: u32 = 8192;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("surface {width}x{height}px exceeds the {max}px limit")]
    SurfaceTooLarge { width: u32, height: u32, max: u32 },
    #[error("surface {width}x{height}px holds no more than one {cell}px cell")]
    BoardTooSmall { width: u32, height: u32, cell: u32 },
    #[error("start cell ({x},{y}) lies outside the board")]
    StartOutOfBounds { x: i32, y: i32 },
    #[error("minimum interval {min}ms exceeds base interval {base}ms")]
    FloorAboveBase { min: u32, base: u32 },
    #[error("interval step and speed-up milestone must be non-zero")]
    ZeroSpeedStep,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GameConfig {
    pub surface_width: u32,
    pub surface_height: u32,
    pub cell_size: u32,
    pub start: Cell,
    pub base_interval_ms: u32,
    pub interval_step_ms: u32,
    pub min_interval_ms: u32,
    pub speedup_every: u32,
    pub store_path: PathBuf,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            surface_width: DEFAULT_SURFACE_WIDTH,
            surface_height: DEFAULT_SURFACE_HEIGHT,
            cell_size: DEFAULT_CELL_SIZE,
            start: Cell::new(10, 10),
            base_interval_ms: DEFAULT_BASE_INTERVAL_MS,
            interval_step_ms: DEFAULT_INTERVAL_STEP_MS,
            min_interval_ms: DEFAULT_MIN_INTERVAL_MS,
            speedup_every: DEFAULT_SPEEDUP_EVERY,
            store_path: PathBuf::from(DEFAULT_STORE_PATH),
        }
    }
}

impl GameConfig {
    /// Defaults overridden by `SNAKE_*` environment variables. An invalid
    /// combination is logged and the defaults are used instead.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let config = Self {
            surface_width: read_env_u32("SNAKE_SURFACE_WIDTH", defaults.surface_width),
            surface_height: read_env_u32("SNAKE_SURFACE_HEIGHT", defaults.surface_height),
            cell_size: read_env_u32("SNAKE_CELL_SIZE", defaults.cell_size),
            base_interval_ms: read_env_u32("SNAKE_BASE_INTERVAL_MS", defaults.base_interval_ms),
            min_interval_ms: read_env_u32("SNAKE_MIN_INTERVAL_MS", defaults.min_interval_ms),
            store_path: env::var("SNAKE_STORE_PATH")
                .ok()
                .filter(|value| !value.trim().is_empty())
                .map(PathBuf::from)
                .unwrap_or_else(|| defaults.store_path.clone()),
            ..defaults.clone()
        };

        match config.validate() {
            Ok(()) => config,
            Err(err) => {
                tracing::warn!("ignoring SNAKE_* overrides: {}", err);
                defaults
            }
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.surface_width > MAX_SURFACE_PX || self.surface_height > MAX_SURFACE_PX {
            return Err(ConfigError::SurfaceTooLarge {
                width: self.surface_width,
                height: self.surface_height,
                max: MAX_SURFACE_PX,
            });
        }
        let board = self.board();
        if board.area() < 2 {
            return Err(ConfigError::BoardTooSmall {
                width: self.surface_width,
                height: self.surface_height,
                cell: self.cell_size,
            });
        }
        if !board.contains(self.start) {
            return Err(ConfigError::StartOutOfBounds {
                x: self.start.x,
                y: self.start.y,
            });
        }
        if self.min_interval_ms > self.base_interval_ms {
            return Err(ConfigError::FloorAboveBase {
                min: self.min_interval_ms,
                base: self.base_interval_ms,
            });
        }
        if self.interval_step_ms == 0 || self.speedup_every == 0 {
            return Err(ConfigError::ZeroSpeedStep);
        }
        Ok(())
    }

    pub fn board(&self) -> Board {
        Board::from_surface(self.surface_width, self.surface_height, self.cell_size)
    }

    pub fn speed_curve(&self) -> SpeedCurve {
        SpeedCurve {
            base: Duration::from_millis(self.base_interval_ms as u64),
            step: Duration::from_millis(self.interval_step_ms as u64),
            floor: Duration::from_millis(self.min_interval_ms as u64),
            every: self.speedup_every,
        }
    }

    pub fn window_size(&self) -> (i32, i32) {
        let height = self.surface_height.saturating_add(HUD_HEIGHT);
        (
            i32::try_from(self.surface_width).unwrap_or(i32::MAX),
            i32::try_from(height).unwrap_or(i32::MAX),
        )
    }
}

fn read_env_u32(name: &str, default: u32) -> u32 {
    env::var(name)
        .ok()
        .and_then(|value| value.parse::<u32>().ok())
        .filter(|value| *value > 0)
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = GameConfig::default();
        assert_eq!(config.validate(), Ok(()));
        assert_eq!(config.board(), Board { width: 20, height: 20 });
        assert_eq!(config.speed_curve().base, Duration::from_millis(150));
        assert_eq!(config.speed_curve().floor, Duration::from_millis(50));
        assert_eq!(config.window_size(), (400, 510));
    }

    #[test]
    fn tiny_surface_is_rejected() {
        let config = GameConfig {
            surface_width: 20,
            surface_height: 20,
            ..GameConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::BoardTooSmall { .. })
        ));
    }

    #[test]
    fn start_must_be_on_the_board() {
        let config = GameConfig {
            surface_width: 200,
            surface_height: 200,
            ..GameConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::StartOutOfBounds { x: 10, y: 10 })
        );
    }

    #[test]
    fn floor_cannot_exceed_base() {
        let config = GameConfig {
            base_interval_ms: 40,
            ..GameConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::FloorAboveBase { min: 50, base: 40 })
        );
    }

    #[test]
    fn oversized_surface_is_rejected_and_sizing_stays_finite() {
        let config = GameConfig {
            surface_height: u32::MAX,
            ..GameConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::SurfaceTooLarge {
                width: 400,
                height: u32::MAX,
                max: MAX_SURFACE_PX,
            })
        );
        assert_eq!(config.window_size(), (400, i32::MAX));

        let at_limit = GameConfig {
            surface_width: MAX_SURFACE_PX,
            surface_height: MAX_SURFACE_PX,
            ..GameConfig::default()
        };
        assert_eq!(at_limit.validate(), Ok(()));
        assert_eq!(
            at_limit.window_size(),
            (MAX_SURFACE_PX as i32, (MAX_SURFACE_PX + HUD_HEIGHT) as i32)
        );
    }

    #[test]
    fn unset_env_falls_back_to_default() {
        assert_eq!(read_env_u32("SNAKE_TEST_SURELY_UNSET", 7), 7);
    }
}
