// src/infra/time_source.rs

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

use crate::domain::{Seconds, Timestamp};

/// Откуда брать "сейчас".
///
/// Ядро (часы и контроллер) этот трейт не использует: метку времени
/// в него передают явно. Трейт нужен рантайму и dev-CLI.
pub trait TimeSource {
    fn now(&self) -> Timestamp;
}

/// Монотонное время процесса: секунды с момента создания источника.
#[derive(Debug, Clone)]
pub struct SystemTimeSource {
    origin: Instant,
}

impl SystemTimeSource {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemTimeSource {
    fn default() -> Self {
        Self::new()
    }
}

impl TimeSource for SystemTimeSource {
    fn now(&self) -> Timestamp {
        Timestamp(self.origin.elapsed().as_secs_f64())
    }
}

/// Время, которое двигают руками. Для тестов и симуляций.
///
/// `f64` хранится битами в `AtomicU64`, поэтому источник можно
/// делить между потоками без мьютекса.
#[derive(Debug)]
pub struct ManualTimeSource {
    bits: AtomicU64,
}

impl ManualTimeSource {
    pub fn new(start: Timestamp) -> Self {
        Self {
            bits: AtomicU64::new(start.0.to_bits()),
        }
    }

    pub fn set(&self, now: Timestamp) {
        self.bits.store(now.0.to_bits(), Ordering::SeqCst);
    }

    /// Сдвинуть время вперёд, вернуть новое значение.
    pub fn advance(&self, by: Seconds) -> Timestamp {
        let shift = |bits: u64| Some((Timestamp(f64::from_bits(bits)) + by).0.to_bits());
        // Замыкание всегда возвращает Some, так что Err здесь не бывает.
        let previous = match self
            .bits
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, shift)
        {
            Ok(bits) | Err(bits) => bits,
        };
        Timestamp(f64::from_bits(previous)) + by
    }
}

impl Default for ManualTimeSource {
    fn default() -> Self {
        Self::new(Timestamp::EPOCH)
    }
}

impl TimeSource for ManualTimeSource {
    fn now(&self) -> Timestamp {
        Timestamp(f64::from_bits(self.bits.load(Ordering::SeqCst)))
    }
}

impl<T: TimeSource + ?Sized> TimeSource for std::sync::Arc<T> {
    fn now(&self) -> Timestamp {
        (**self).now()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manual_source_advances() {
        let time = ManualTimeSource::new(Timestamp(1.5));
        assert_eq!(time.now(), Timestamp(1.5));
        assert_eq!(time.advance(Seconds(0.25)), Timestamp(1.75));
        time.set(Timestamp(10.0));
        assert_eq!(time.now(), Timestamp(10.0));
    }

    #[test]
    fn concurrent_advances_are_not_lost() {
        let time = ManualTimeSource::default();
        std::thread::scope(|scope| {
            for _ in 0..8 {
                scope.spawn(|| {
                    for _ in 0..1000 {
                        time.advance(Seconds(0.5));
                    }
                });
            }
        });
        assert_eq!(time.now(), Timestamp(4000.0));
    }

    #[test]
    fn system_source_is_monotonic() {
        let time = SystemTimeSource::new();
        let a = time.now();
        let b = time.now();
        assert!(b >= a);
    }
}
