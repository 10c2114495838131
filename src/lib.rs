//! Шахматные часы: два (или больше) независимых бюджета времени,
//! в каждый момент идут часы только одного игрока.
//!
//! Слои:
//! - `domain` — время, метки времени, `GameState`;
//! - `time_ctrl` — часы игрока и контроль времени;
//! - `engine` — автомат состояний `GameController`;
//! - `api` — команды/запросы/DTO для фронта;
//! - `infra` — источники времени и логгер;
//! - `runtime` — очередь событий и тики на tokio.

pub mod api;
pub mod domain;
pub mod engine;
pub mod infra;
pub mod runtime;
pub mod time_ctrl;

pub use domain::{GameState, PlayerId, Seconds, Timestamp};
pub use engine::{ClockEvent, GameController};
pub use time_ctrl::{ConfigError, PlayerClock, TimeControl, TimeProfile};
