//! UI-independent core of the temperature monitor.
//!
//! Everything the dashboard shows is derived from a single [`SensorMonitor`]
//! owned by the frontend. The monitor mutates only through four actions:
//! the power toggle, the manual log action, the reset action, and the
//! periodic driver tick. The drift source behind the tick is injected via
//! the [`TemperatureProbe`] trait, so tests can swap the random walk for a
//! fixed probe.

pub mod format;
pub mod monitor;
pub mod probe;

pub use format::{format_counter, format_temperature};
pub use monitor::{Reading, SensorMonitor};
pub use probe::{RandomWalkProbe, TemperatureProbe};
