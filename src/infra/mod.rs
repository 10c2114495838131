//! Инфраструктурный слой вокруг часов:
//! - источники времени для рантайма и CLI;
//! - инициализация логгера.

pub mod logging;
pub mod time_source;

pub use logging::{effective_filter, init_logging, LoggingConfig, DEFAULT_FILTER};
pub use time_source::{ManualTimeSource, SystemTimeSource, TimeSource};
