//! Platform abstraction layer for reading the benchmark clock.
//!
//! This module allows switching between the real monotonic clock of the operating system and a
//! fake clock whose time only moves when a test says so.

mod abstractions;
mod facade;
#[cfg(test)]
mod fake;
mod real;

pub(crate) use abstractions::Clock;
pub(crate) use facade::ClockFacade;
#[cfg(test)]
pub(crate) use fake::FakeClock;
