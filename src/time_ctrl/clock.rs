// src/time_ctrl/clock.rs
//! Часы одного игрока.
//!
//! Часы не знают, который сейчас час: каждая операция получает `now` снаружи.
//! Пока часы идут, хранится момент `clock_end`, когда остаток дойдёт до нуля;
//! остаток пересчитывается из него на каждом `refresh`.

use serde::{Deserialize, Serialize};

use crate::domain::{PlayerId, Seconds, Timestamp};

/// Состояние часов игрока.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct PlayerClock {
    id: PlayerId,
    /// Стартовый бюджет из контроля времени.
    initial_time: Seconds,
    /// Текущий остаток. Может уйти в минус между тиками.
    remaining_time: Seconds,
    /// Момент, когда остаток станет нулём. Есть только пока часы идут.
    clock_end: Option<Timestamp>,
}

impl PlayerClock {
    /// Часы с полным бюджетом. Отрицательный бюджет считается нулём.
    pub fn new(id: PlayerId, initial_time: Seconds) -> Self {
        let initial_time = initial_time.clamp_non_negative();
        Self {
            id,
            initial_time,
            remaining_time: initial_time,
            clock_end: None,
        }
    }

    pub fn id(&self) -> PlayerId {
        self.id
    }

    pub fn initial_time(&self) -> Seconds {
        self.initial_time
    }

    /// Остаток как он есть (может быть отрицательным).
    pub fn remaining_time(&self) -> Seconds {
        self.remaining_time
    }

    /// Остаток для отображения: не меньше нуля.
    pub fn reported_remaining(&self) -> Seconds {
        self.remaining_time.clamp_non_negative()
    }

    pub fn clock_end(&self) -> Option<Timestamp> {
        self.clock_end
    }

    pub fn is_running(&self) -> bool {
        self.clock_end.is_some()
    }

    pub fn is_expired(&self) -> bool {
        self.remaining_time.is_expired()
    }

    /// Запустить часы с момента `now`: `clock_end = now + remaining`.
    ///
    /// Вызывается только для игрока, который сейчас станет активным.
    pub fn arm_clock_end(&mut self, now: Timestamp) {
        self.clock_end = Some(now + self.remaining_time);
    }

    /// Пересчитать остаток на момент `now`.
    ///
    /// Если часы не были запущены, считаем, что их только что запустили
    /// с полного бюджета (тик пришёл раньше, чем `arm_clock_end`).
    pub fn refresh(&mut self, now: Timestamp) {
        let end = *self
            .clock_end
            .get_or_insert_with(|| now + self.initial_time);
        self.remaining_time = end - now;
    }

    /// Остановить часы. Остаток остаётся последним посчитанным значением.
    pub fn freeze(&mut self) {
        self.clock_end = None;
    }

    /// Вернуть полный бюджет и остановить часы.
    pub fn reset(&mut self) {
        self.remaining_time = self.initial_time;
        self.clock_end = None;
    }
}
