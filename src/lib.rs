//! Text-driven chess rules engine.
//!
//! Moves arrive as short algebraic (`Nbd2`, `exd5`) or coordinate (`e2-e4`)
//! strings. The engine works out which piece is meant, rejects moves that
//! would leave the mover's own king attacked, and otherwise plays them.

pub mod config;
pub mod engine;
pub mod models;
pub mod session;
