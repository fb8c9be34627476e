use std::collections::VecDeque;

use crate::snake::{Snake, Cell, Direction::{*, self}};
use crate::{ROWS, TICK_RATE, TILE_SIZE};

use ggez::event::EventHandler;
use ggez::graphics::{self, Color, DrawMode, DrawParam, Mesh, Rect};
use ggez::input::keyboard::{KeyCode, KeyInput};
use ggez::{Context, GameResult};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const BOARD_CELLS: usize = (ROWS as usize) * (ROWS as usize);
const SECONDS_PER_TICK: f32 = 1.0 / TICK_RATE as f32;

// Turns buffered past this count are dropped until the queue drains.
const MAX_BUFFERED_TURNS: usize = 4;

const LIGHT_TILE: Color = Color::new(92.0 / 255.0, 92.0 / 255.0, 92.0 / 255.0, 1.0);
const DARK_TILE: Color = Color::new(61.0 / 255.0, 61.0 / 255.0, 61.0 / 255.0, 1.0);
const SNAKE_COLOR: Color = Color::GREEN;
#[allow(dead_code)] // reserved for the head, not drawn separately yet
const SNAKE_HEAD_COLOR: Color = Color::new(0.0, 200.0 / 255.0, 0.0, 1.0);
const FOOD_COLOR: Color = Color::RED;

pub struct SnakeGame {
    snake: Snake,
    direction: Direction,
    buffered_turns: VecDeque<Direction>,
    food: Cell,
    game_over: bool,
    rng: StdRng,
    last_tick: f32,
}

impl SnakeGame {
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    fn with_rng(mut rng: StdRng) -> Self {
        let snake = Snake::new(center_cell());
        let food = spawn_food(&snake, &mut rng);

        SnakeGame {
            snake,
            direction: Still,
            buffered_turns: VecDeque::new(),
            food,
            game_over: false,
            rng,
            last_tick: 0.0,
        }
    }

    // A directional key press: buffered for an upcoming tick, unless the game
    // is over, the buffer is backed up, or the turn would reverse the snake
    // straight into its own body.
    fn steer(&mut self, turn: Direction) {
        if self.game_over || self.buffered_turns.len() > MAX_BUFFERED_TURNS {
            return;
        }

        if turn.opposes(self.direction) {
            return;
        }

        self.direction = turn;
        self.buffered_turns.push_back(turn);
    }

    fn restart(&mut self) {
        if !self.game_over {
            return;
        }

        self.snake = Snake::new(center_cell());
        self.direction = Right;
        self.buffered_turns.clear();
        self.food = spawn_food(&self.snake, &mut self.rng);
        self.game_over = false;
    }

    fn tick(&mut self) {
        if self.game_over {
            return;
        }

        if let Some(turn) = self.buffered_turns.pop_front() {
            self.direction = turn;
        }

        let (new_head, old_tail) = self.snake.advance(self.direction);

        if self.snake.len() == BOARD_CELLS {
            self.game_over = true;
            return;
        }

        if !new_head.in_bounds() {
            self.game_over = true;
            return;
        }

        if self.snake.bites_itself() {
            self.game_over = true;
            return;
        }

        if new_head == self.food {
            self.snake.grow(old_tail);
            // On a completely filled board there is nowhere left to put food;
            // the next tick ends the game instead.
            if self.snake.len() < BOARD_CELLS {
                self.food = spawn_food(&self.snake, &mut self.rng);
            }
        }
    }

    ///////////////////////////////////////////////////////////////////////////

    fn draw_checkerboard(&self, ctx: &mut Context, canvas: &mut graphics::Canvas) -> GameResult {
        // The frame is cleared to the light grey, so only the dark squares
        // need drawing.
        for y in 0..ROWS {
            for x in 0..ROWS {
                if (x + y) % 2 == 1 {
                    let tile =
                        Mesh::new_rectangle(ctx, DrawMode::fill(), tile_rect(Cell::new(x, y)), DARK_TILE)?;
                    canvas.draw(&tile, DrawParam::default());
                }
            }
        }

        Ok(())
    }

    fn draw_food(&self, ctx: &mut Context, canvas: &mut graphics::Canvas) -> GameResult {
        let food = Mesh::new_rectangle(ctx, DrawMode::fill(), tile_rect(self.food), FOOD_COLOR)?;
        canvas.draw(&food, DrawParam::default());
        Ok(())
    }

    fn draw_snake(&self, ctx: &mut Context, canvas: &mut graphics::Canvas) -> GameResult {
        for cell in self.snake.cells() {
            let segment = Mesh::new_rectangle(ctx, DrawMode::fill(), tile_rect(cell), SNAKE_COLOR)?;
            canvas.draw(&segment, DrawParam::default());
        }

        Ok(())
    }
}

impl EventHandler for SnakeGame {
    fn update(&mut self, ctx: &mut Context) -> GameResult {
        let now = ctx.time.time_since_start().as_secs_f32();

        if now - self.last_tick >= SECONDS_PER_TICK {
            self.tick();
            self.last_tick = now;
        }

        Ok(())
    }

    fn draw(&mut self, ctx: &mut Context) -> GameResult {
        let mut canvas = graphics::Canvas::from_frame(ctx, LIGHT_TILE);

        self.draw_checkerboard(ctx, &mut canvas)?;
        self.draw_food(ctx, &mut canvas)?;
        self.draw_snake(ctx, &mut canvas)?;

        canvas.finish(ctx)
    }

    fn key_down_event(&mut self, _ctx: &mut Context, input: KeyInput, _repeated: bool) -> GameResult {
        match input.keycode {
            Some(KeyCode::Up | KeyCode::W) => self.steer(Up),
            Some(KeyCode::Down | KeyCode::S) => self.steer(Down),
            Some(KeyCode::Left | KeyCode::A) => self.steer(Left),
            Some(KeyCode::Right | KeyCode::D) => self.steer(Right),
            Some(KeyCode::Space) => self.restart(),
            _ => {}
        }

        Ok(())
    }
}

fn center_cell() -> Cell {
    Cell::new(ROWS / 2 - 1, ROWS / 2 - 1)
}

fn spawn_food(snake: &Snake, rng: &mut StdRng) -> Cell {
    loop {
        let candidate = Cell::new(rng.gen_range(0..ROWS), rng.gen_range(0..ROWS));

        if !snake.contains(candidate) {
            return candidate;
        }
    }
}

fn tile_rect(cell: Cell) -> Rect {
    Rect::new(
        (cell.x * TILE_SIZE) as f32,
        (cell.y * TILE_SIZE) as f32,
        TILE_SIZE as f32,
        TILE_SIZE as f32,
    )
}
