// src/engine/events.rs

use serde::{Deserialize, Serialize};

use crate::domain::{PlayerId, Timestamp};

/// Внешнее событие для часов. Метку времени всегда даёт источник события.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
pub enum ClockEvent {
    /// Передать ход игроку `to` (первое нажатие стартует партию).
    TurnPassed { to: PlayerId, now: Timestamp },
    /// Пауза (имеет смысл только во время партии).
    Pause { now: Timestamp },
    /// Сброс всех часов на стартовое время.
    Reset,
    /// Периодический тик: пересчитать остаток активного игрока.
    Tick { now: Timestamp },
}
