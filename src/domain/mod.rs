//! Доменная модель шахматных часов: время, метки времени, состояние партии.

pub mod game_state;
pub mod time;

// Идентификатор игрока (1 и 2 в обычной партии, но часов может быть и больше).
pub type PlayerId = u32;

pub use game_state::*;
pub use time::*;
