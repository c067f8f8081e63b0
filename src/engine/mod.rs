pub mod attacks;
pub mod board;
pub mod disambiguate;
pub mod game;
pub mod movegen;
pub mod notation;
pub mod types;

pub use board::{Board, STANDARD_LAYOUT};
pub use game::{GameState, MoveRecord};
pub use types::*;
