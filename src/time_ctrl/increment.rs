// src/time_ctrl/increment.rs
//! Добавка времени за ход (задел на будущее).
//!
//! Сейчас поддерживается только нулевая добавка: `TimeControl::validate`
//! отклоняет всё остальное.

use serde::{Deserialize, Serialize};

use crate::domain::Seconds;

/// Вид добавки.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum IncrementType {
    /// Простая задержка: часы стартуют после паузы `amount`.
    #[default]
    Simple,
    /// Бронштейн: возвращается потраченное время, но не больше `amount`.
    Bronstein,
    /// Фишер: `amount` добавляется после каждого хода.
    Fischer,
}

/// Добавка за ход для одного игрока.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct Increment {
    pub kind: IncrementType,
    pub amount: Seconds,
}

impl Increment {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn new(kind: IncrementType, amount: Seconds) -> Self {
        Self { kind, amount }
    }

    pub fn is_active(&self) -> bool {
        self.amount.0 > 0.0
    }
}
