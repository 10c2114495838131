// src/runtime/mod.rs

pub mod clock_runtime;

pub use clock_runtime::{ClockHandle, ClockRuntime, RuntimeConfig, RuntimeError};
