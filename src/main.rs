mod game;
mod snake;

use std::process::exit;

use ggez::conf::{WindowMode, WindowSetup};
use ggez::event;
use log::error;

use crate::game::SnakeGame;

pub const ROWS: i16 = 16;
pub const TILE_SIZE: i16 = 50;
pub const WINDOW_LENGTH: f32 = (ROWS * TILE_SIZE) as f32;
pub const TICK_RATE: u32 = 8;

fn main() {
    env_logger::init();

    let context = ggez::ContextBuilder::new("snake", "agubelu")
        .window_setup(WindowSetup::default().title("Snake"))
        .window_mode(WindowMode::default().dimensions(WINDOW_LENGTH, WINDOW_LENGTH))
        .build();

    let (ctx, event_loop) = match context {
        Ok(pair) => pair,
        Err(err) => {
            error!("Could not initialize the window: {}", err);
            exit(1);
        }
    };

    event::run(ctx, event_loop, SnakeGame::new())
}
