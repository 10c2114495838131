// src/time_ctrl/mod.rs
//! Контроль времени.
//!
//! Здесь собираем:
//! - часы одного игрока (`PlayerClock`);
//! - правила партии (`TimeControl`, пресеты `TimeProfile`);
//! - добавку за ход (`Increment`, пока только нулевая).

pub mod clock;
pub mod increment;
pub mod time_rules;

pub use clock::PlayerClock;
pub use increment::{Increment, IncrementType};
pub use time_rules::{ConfigError, PlayerTimeRules, TimeControl, TimeProfile};
