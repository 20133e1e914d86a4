use serde::{Deserialize, Serialize};

use crate::probe::{RandomWalkProbe, TemperatureProbe};

/// Temperature shown before the driver ever runs, in °C.
pub const INITIAL_TEMPERATURE: f32 = 23.5;

/// Lower bound of the simulated range, in °C.
pub const MIN_TEMPERATURE: f32 = 15.0;

/// Upper bound of the simulated range, in °C.
pub const MAX_TEMPERATURE: f32 = 35.0;

/// Number of readings kept in the history.
pub const HISTORY_CAPACITY: usize = 10;

/// One logged reading, as shown in the serial monitor panel.
///
/// Created only by [`SensorMonitor::log_reading`] and never mutated.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Reading {
    pub timestamp: String,
    pub temperature: f32,
    pub counter: u32,
}

/// The single owner of all dashboard state.
///
/// The frontend holds exactly one instance and forwards user actions and
/// timer ticks to it; it never mutates the fields directly. History is kept
/// most-recent-first and never grows beyond [`HISTORY_CAPACITY`] entries.
pub struct SensorMonitor {
    probe: Box<dyn TemperatureProbe>,
    temperature: f32,
    active: bool,
    counter: u32,
    readings: Vec<Reading>,
    last_update: String,
}

impl SensorMonitor {
    pub fn new(probe: Box<dyn TemperatureProbe>) -> Self {
        Self {
            probe,
            temperature: INITIAL_TEMPERATURE,
            active: false,
            counter: 0,
            readings: Vec::with_capacity(HISTORY_CAPACITY),
            last_update: String::new(),
        }
    }

    pub fn temperature(&self) -> f32 {
        self.temperature
    }

    pub fn active(&self) -> bool {
        self.active
    }

    pub fn counter(&self) -> u32 {
        self.counter
    }

    pub fn readings(&self) -> &[Reading] {
        &self.readings
    }

    /// Time of the most recent tick while active. Empty before the first
    /// activation and after a reset.
    pub fn last_update(&self) -> &str {
        &self.last_update
    }

    /// Flips between ACTIVE and STANDBY.
    ///
    /// On the transition to active the last-update time is stamped
    /// immediately, so the display reads "just started" before the first
    /// tick arrives. Deactivation leaves it untouched.
    pub fn toggle_power(&mut self) {
        self.active = !self.active;

        if self.active {
            self.last_update = now_string();
            log::info!("Monitoring started");
        } else {
            log::info!("Monitoring stopped");
        }
    }

    /// One driver tick: perturb the temperature by the probe's drift and
    /// clamp to the realistic range. Mutates nothing while in standby.
    pub fn tick(&mut self) {
        if !self.active {
            return;
        }

        let next = self.temperature + self.probe.drift();
        self.temperature = next.clamp(MIN_TEMPERATURE, MAX_TEMPERATURE);
        self.last_update = now_string();

        log::debug!("Temp: {:.2}°C", self.temperature);
    }

    /// The COUNT action: bump the counter and snapshot the current
    /// temperature into the history, dropping the oldest entry once the
    /// history is full. Works in standby too, logging whatever the
    /// temperature happens to be.
    pub fn log_reading(&mut self) -> Reading {
        self.counter += 1;

        let reading = Reading {
            timestamp: now_string(),
            temperature: self.temperature,
            counter: self.counter,
        };

        self.readings.insert(0, reading.clone());
        self.readings.truncate(HISTORY_CAPACITY);

        log::info!(
            "[{}] Temp: {:.1}°C, Count: {}",
            reading.timestamp,
            reading.temperature,
            reading.counter
        );

        reading
    }

    /// The RESET action: back to the initial temperature, counter zero,
    /// empty history, empty last-update. The active flag is left alone, so
    /// a running driver keeps ticking from the reset temperature.
    pub fn reset(&mut self) {
        self.counter = 0;
        self.temperature = INITIAL_TEMPERATURE;
        self.readings.clear();
        self.last_update.clear();

        log::info!("Monitor reset");
    }

    /// Highest logged temperature, or `0.0` with an empty history.
    pub fn max_temperature(&self) -> f32 {
        self.readings
            .iter()
            .map(|r| r.temperature)
            .reduce(f32::max)
            .unwrap_or(0.0)
    }

    /// Lowest logged temperature, or `0.0` with an empty history.
    pub fn min_temperature(&self) -> f32 {
        self.readings
            .iter()
            .map(|r| r.temperature)
            .reduce(f32::min)
            .unwrap_or(0.0)
    }
}

impl Default for SensorMonitor {
    fn default() -> Self {
        Self::new(Box::new(RandomWalkProbe::new()))
    }
}

fn now_string() -> String {
    chrono::Local::now().format("%H:%M:%S").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    /// A probe that always drifts by the same delta.
    struct FixedProbe(f32);

    impl TemperatureProbe for FixedProbe {
        fn drift(&mut self) -> f32 {
            self.0
        }
    }

    fn monitor_with_drift(delta: f32) -> SensorMonitor {
        SensorMonitor::new(Box::new(FixedProbe(delta)))
    }

    #[test]
    fn initial_state() {
        let monitor = SensorMonitor::default();

        assert_eq!(monitor.temperature(), INITIAL_TEMPERATURE);
        assert!(!monitor.active());
        assert_eq!(monitor.counter(), 0);
        assert!(monitor.readings().is_empty());
        assert_eq!(monitor.last_update(), "");
    }

    #[test]
    fn tick_is_a_no_op_in_standby() {
        let mut monitor = monitor_with_drift(1.0);

        monitor.tick();
        monitor.tick();

        assert_eq!(monitor.temperature(), INITIAL_TEMPERATURE);
        assert_eq!(monitor.last_update(), "");
    }

    #[test]
    fn tick_applies_drift_while_active() {
        let mut monitor = monitor_with_drift(0.5);

        monitor.toggle_power();
        monitor.tick();

        assert_eq!(monitor.temperature(), INITIAL_TEMPERATURE + 0.5);
        assert!(!monitor.last_update().is_empty());
    }

    #[test]
    fn temperature_clamps_to_upper_bound() {
        let mut monitor = monitor_with_drift(0.9);

        monitor.toggle_power();
        for _ in 0..100 {
            monitor.tick();
            assert!(monitor.temperature() <= MAX_TEMPERATURE);
        }

        assert_eq!(monitor.temperature(), MAX_TEMPERATURE);
    }

    #[test]
    fn temperature_clamps_to_lower_bound() {
        let mut monitor = monitor_with_drift(-0.9);

        monitor.toggle_power();
        for _ in 0..100 {
            monitor.tick();
            assert!(monitor.temperature() >= MIN_TEMPERATURE);
        }

        assert_eq!(monitor.temperature(), MIN_TEMPERATURE);
    }

    #[test]
    fn random_walk_stays_in_range() {
        let mut monitor = SensorMonitor::new(Box::new(RandomWalkProbe::seeded(1234)));

        monitor.toggle_power();
        for _ in 0..10_000 {
            monitor.tick();
            let t = monitor.temperature();
            assert!((MIN_TEMPERATURE..=MAX_TEMPERATURE).contains(&t));
        }
    }

    #[test]
    fn double_toggle_restores_standby() {
        let mut monitor = SensorMonitor::default();

        monitor.toggle_power();
        assert!(monitor.active());
        let stamped = monitor.last_update().to_string();
        assert!(!stamped.is_empty());

        monitor.toggle_power();
        assert!(!monitor.active());
        // Deactivation leaves the last-update time in place.
        assert_eq!(monitor.last_update(), stamped);
    }

    #[test]
    fn first_count_snapshots_initial_temperature() {
        let mut monitor = SensorMonitor::default();

        let reading = monitor.log_reading();

        assert_eq!(reading.temperature, INITIAL_TEMPERATURE);
        assert_eq!(reading.counter, 1);
        assert_eq!(monitor.counter(), 1);
        assert_eq!(monitor.readings().len(), 1);
        assert_eq!(monitor.max_temperature(), INITIAL_TEMPERATURE);
        assert_eq!(monitor.min_temperature(), INITIAL_TEMPERATURE);
    }

    #[test]
    fn count_leaves_temperature_and_power_alone() {
        let mut monitor = monitor_with_drift(0.0);
        monitor.toggle_power();

        monitor.log_reading();

        assert!(monitor.active());
        assert_eq!(monitor.temperature(), INITIAL_TEMPERATURE);
    }

    #[test]
    fn history_keeps_the_ten_most_recent_readings() {
        let mut monitor = SensorMonitor::default();

        for _ in 0..12 {
            monitor.log_reading();
        }

        assert_eq!(monitor.counter(), 12);
        assert_eq!(monitor.readings().len(), HISTORY_CAPACITY);

        // Most-recent-first: counters 12, 11, ..., 3; the first two dropped.
        let counters: Vec<u32> = monitor.readings().iter().map(|r| r.counter).collect();
        assert_eq!(counters, (3..=12).rev().collect::<Vec<u32>>());

        for reading in monitor.readings() {
            assert_eq!(reading.temperature, INITIAL_TEMPERATURE);
        }
    }

    #[test]
    fn stats_default_to_zero_on_empty_history() {
        let monitor = SensorMonitor::default();

        assert_eq!(monitor.max_temperature(), 0.0);
        assert_eq!(monitor.min_temperature(), 0.0);
    }

    #[test]
    fn stats_track_logged_extremes() {
        let mut monitor = monitor_with_drift(2.0);

        monitor.log_reading(); // 23.5
        monitor.toggle_power();
        monitor.tick(); // 25.5
        monitor.log_reading();
        monitor.tick(); // 27.5
        monitor.log_reading();

        assert_eq!(monitor.max_temperature(), 27.5);
        assert_eq!(monitor.min_temperature(), 23.5);
    }

    #[test]
    fn reset_restores_everything_but_the_power_state() {
        let mut monitor = monitor_with_drift(1.0);

        monitor.toggle_power();
        monitor.tick();
        for _ in 0..5 {
            monitor.log_reading();
        }

        monitor.reset();

        assert_eq!(monitor.counter(), 0);
        assert_eq!(monitor.temperature(), INITIAL_TEMPERATURE);
        assert!(monitor.readings().is_empty());
        assert_eq!(monitor.last_update(), "");
        assert!(monitor.active(), "reset must not stop the driver");

        // A running driver keeps ticking from the reset temperature.
        monitor.tick();
        assert_eq!(monitor.temperature(), INITIAL_TEMPERATURE + 1.0);
    }

    #[test]
    fn counting_resumes_at_one_after_reset() {
        let mut monitor = SensorMonitor::default();

        for _ in 0..12 {
            monitor.log_reading();
        }
        monitor.reset();

        let reading = monitor.log_reading();
        assert_eq!(reading.counter, 1);
        assert_eq!(monitor.readings().len(), 1);
    }
}
