//! A player's hand and the driver that evaluates it.
pub mod evaluation;
pub use evaluation::*;

pub mod hand;
pub use hand::*;

pub mod player;
pub use player::*;
