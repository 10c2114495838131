//! Движок шахматных часов.
//!
//! Высокоуровневый объект: `GameController`
//! Основные операции:
//!   - `turn_passed` – передать ход
//!   - `pause` / `reset` – пауза и сброс
//!   - `tick` – пересчёт времени активного игрока и флажок

pub mod controller;
pub mod events;

pub use controller::GameController;
pub use events::ClockEvent;
