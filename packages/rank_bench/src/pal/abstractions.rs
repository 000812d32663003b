//! Platform abstraction trait definitions.

use std::fmt::Debug;
use std::time::Duration;

/// Provides monotonic timestamps.
///
/// Timestamps are expressed as the time elapsed since an arbitrary origin chosen when the clock
/// was created. They never decrease and are not affected by wall clock adjustments.
pub(crate) trait Clock: Debug {
    /// Gets the current timestamp.
    fn now(&self) -> Duration;
}
