// src/domain/time.rs
//! Время на часах и абсолютные метки времени.
//!
//! Обе величины — вещественные секунды: тики приходят чаще, чем раз в секунду,
//! поэтому целых секунд недостаточно.

use core::fmt;
use core::ops::{Add, AddAssign, Sub, SubAssign};

use serde::{Deserialize, Serialize};

/// Длительность в секундах. Может быть отрицательной (часы "ушли в минус"
/// между двумя тиками), наружу такое значение отдаётся через `clamp_non_negative`.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, PartialOrd)]
pub struct Seconds(pub f64);

impl Seconds {
    pub const ZERO: Seconds = Seconds(0.0);

    pub const fn from_secs(secs: f64) -> Self {
        Seconds(secs)
    }

    pub fn from_millis(millis: i64) -> Self {
        Seconds(millis as f64 / 1000.0)
    }

    pub fn from_minutes(minutes: u32) -> Self {
        Seconds(f64::from(minutes) * 60.0)
    }

    pub const fn as_secs(self) -> f64 {
        self.0
    }

    /// Время вышло: ноль тоже считается флажком.
    pub fn is_expired(self) -> bool {
        self.0 <= 0.0
    }

    /// То, что показываем игроку: отрицательное время — это ноль.
    pub fn clamp_non_negative(self) -> Seconds {
        Seconds(self.0.max(0.0))
    }

    pub fn is_valid_budget(self) -> bool {
        self.0.is_finite() && self.0 >= 0.0
    }
}

impl Add for Seconds {
    type Output = Seconds;

    fn add(self, rhs: Seconds) -> Self::Output {
        Seconds(self.0 + rhs.0)
    }
}

impl AddAssign for Seconds {
    fn add_assign(&mut self, rhs: Seconds) {
        self.0 += rhs.0;
    }
}

impl Sub for Seconds {
    type Output = Seconds;

    fn sub(self, rhs: Seconds) -> Self::Output {
        Seconds(self.0 - rhs.0)
    }
}

impl SubAssign for Seconds {
    fn sub_assign(&mut self, rhs: Seconds) {
        self.0 -= rhs.0;
    }
}

/// Циферблат: `H:MM:SS`, если есть часы, иначе `M:SS`.
/// Доли секунды отбрасываются, отрицательное время показывается как `0:00`.
impl fmt::Display for Seconds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let total = self.clamp_non_negative().0.floor() as u64;
        let hours = total / 3600;
        let minutes = (total / 60) % 60;
        let secs = total % 60;

        if hours > 0 {
            write!(f, "{}:{:02}:{:02}", hours, minutes, secs)
        } else {
            write!(f, "{}:{:02}", minutes, secs)
        }
    }
}

/// Абсолютная метка времени (секунды от произвольной эпохи).
///
/// Ядро никогда не читает системные часы само — метку всегда передаёт вызывающий.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, PartialOrd)]
pub struct Timestamp(pub f64);

impl Timestamp {
    pub const EPOCH: Timestamp = Timestamp(0.0);

    pub const fn from_secs(secs: f64) -> Self {
        Timestamp(secs)
    }

    pub const fn as_secs(self) -> f64 {
        self.0
    }
}

impl Add<Seconds> for Timestamp {
    type Output = Timestamp;

    fn add(self, rhs: Seconds) -> Self::Output {
        Timestamp(self.0 + rhs.0)
    }
}

impl Sub for Timestamp {
    type Output = Seconds;

    fn sub(self, rhs: Timestamp) -> Self::Output {
        Seconds(self.0 - rhs.0)
    }
}
