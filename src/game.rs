use std::time::Duration;

// Segments nearest the head that a candidate head may overlap without it
// counting as a self-collision. A fixed window rather than a geometric
// rule; see DESIGN.md.
pub const SELF_COLLISION_GRACE: usize = 4;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Heading {
    Up,
    Down,
    Left,
    Right,
}

impl Heading {
    pub fn opposite(self) -> Heading {
        match self {
            Heading::Up => Heading::Down,
            Heading::Down => Heading::Up,
            Heading::Left => Heading::Right,
            Heading::Right => Heading::Left,
        }
    }
}

/// A grid position, in cells rather than pixels.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn step(self, heading: Heading) -> Cell {
        match heading {
            Heading::Up => Cell { x: self.x, y: self.y - 1 },
            Heading::Down => Cell { x: self.x, y: self.y + 1 },
            Heading::Left => Cell { x: self.x - 1, y: self.y },
            Heading::Right => Cell { x: self.x + 1, y: self.y },
        }
    }
}

/// Playfield dimensions in cells.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Board {
    pub width: i32,
    pub height: i32,
}

impl Board {
    /// Whole cells that fit on a surface of the given pixel size.
    pub fn from_surface(width_px: u32, height_px: u32, cell_px: u32) -> Self {
        let cell_px = cell_px.max(1);
        Self {
            width: i32::try_from(width_px / cell_px).unwrap_or(i32::MAX),
            height: i32::try_from(height_px / cell_px).unwrap_or(i32::MAX),
        }
    }

    pub fn contains(&self, c: Cell) -> bool {
        c.x >= 0 && c.y >= 0 && c.x < self.width && c.y < self.height
    }

    pub fn area(&self) -> usize {
        (self.width.max(0) as usize) * (self.height.max(0) as usize)
    }
}

/// Picks a uniformly random cell not covered by `snake`.
///
/// Returns `None` when the snake already covers the whole board; otherwise
/// rejection sampling is guaranteed to find a free cell.
pub fn place_food(snake: &[Cell], board: Board) -> Option<Cell> {
    if snake.len() >= board.area() {
        return None;
    }
    loop {
        let x = macroquad::rand::gen_range(0, board.width);
        let y = macroquad::rand::gen_range(0, board.height);
        let cell = Cell { x, y };
        if !snake.iter().any(|c| *c == cell) {
            return Some(cell);
        }
    }
}

/// True if `head` leaves the board or lands on the body past the grace window.
pub fn is_collision(head: Cell, snake: &[Cell], board: Board) -> bool {
    if !board.contains(head) {
        return true;
    }
    snake
        .iter()
        .skip(SELF_COLLISION_GRACE)
        .any(|c| *c == head)
}

/// How the tick interval shrinks as the score climbs.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct SpeedCurve {
    pub base: Duration,
    pub step: Duration,
    pub floor: Duration,
    pub every: u32,
}

impl SpeedCurve {
    /// The interval to switch to after reaching `score`, if it changes.
    pub fn next_interval(&self, score: u32, current: Duration) -> Option<Duration> {
        if score == 0 || score % self.every != 0 || current <= self.floor {
            return None;
        }
        Some(current.saturating_sub(self.step).max(self.floor))
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    Moved,
    Ate {
        score: u32,
        speed_up: Option<Duration>,
    },
    Collided {
        score: u32,
    },
    BoardFilled {
        score: u32,
    },
}

#[derive(Clone, Debug)]
pub struct GameState {
    snake: Vec<Cell>,
    heading: Heading,
    queued: Heading,
    food: Cell,
    score: u32,
    interval: Duration,
    board: Board,
    speed: SpeedCurve,
}

impl GameState {
    /// Fresh round: single-cell snake at `start` heading right, new food, base speed.
    pub fn new(board: Board, start: Cell, speed: SpeedCurve) -> Self {
        let snake = vec![start];
        // A one-cell snake on a board of at least two cells always leaves room.
        let food = place_food(&snake, board).unwrap_or(start);
        Self::from_parts(snake, Heading::Right, food, 0, board, speed)
    }

    pub fn from_parts(
        snake: Vec<Cell>,
        heading: Heading,
        food: Cell,
        score: u32,
        board: Board,
        speed: SpeedCurve,
    ) -> Self {
        Self {
            snake,
            heading,
            queued: heading,
            food,
            score,
            interval: speed.base,
            board,
            speed,
        }
    }

    pub fn snake(&self) -> &[Cell] {
        &self.snake
    }

    pub fn head(&self) -> Cell {
        self.snake[0]
    }

    pub fn food(&self) -> Cell {
        self.food
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn board(&self) -> Board {
        self.board
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub(crate) fn set_interval(&mut self, interval: Duration) {
        self.interval = interval;
    }

    /// The heading the next tick will move with.
    #[cfg(test)]
    pub fn heading(&self) -> Heading {
        self.queued
    }

    /// Queues a heading change. Reversing onto the neck is refused; the check
    /// is made against the heading of the last completed move.
    pub fn steer(&mut self, heading: Heading) -> bool {
        if heading == self.heading.opposite() {
            return false;
        }
        self.queued = heading;
        true
    }

    /// Advances the snake by one cell.
    pub fn tick(&mut self) -> TickOutcome {
        self.heading = self.queued;
        let candidate = self.head().step(self.heading);

        if is_collision(candidate, &self.snake, self.board) {
            return TickOutcome::Collided { score: self.score };
        }

        self.snake.insert(0, candidate);

        if candidate != self.food {
            self.snake.pop();
            tracing::trace!(x = candidate.x, y = candidate.y, "moved");
            return TickOutcome::Moved;
        }

        self.score += 1;
        let speed_up = self.speed.next_interval(self.score, self.interval);
        if let Some(interval) = speed_up {
            self.interval = interval;
        }
        match place_food(&self.snake, self.board) {
            Some(food) => {
                self.food = food;
                TickOutcome::Ate {
                    score: self.score,
                    speed_up,
                }
            }
            None => TickOutcome::BoardFilled { score: self.score },
        }
    }
}
