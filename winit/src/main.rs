// Prevent console window in addition to Slint window in Windows release builds when, e.g., starting the app via file manager. Ignored on other platforms.
#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

slint::include_modules!();

use std::cell::RefCell;
use std::rc::Rc;

use temp_monitor_model::{format_counter, format_temperature, RandomWalkProbe, SensorMonitor};

/// Our App struct that holds the UI, the sensor monitor and the driver timer.
///
/// The App struct is responsible for initializing the UI and wiring the
/// three control callbacks to the monitor. The repeating timer is started on
/// the transition to active and stopped on the transition to standby, so no
/// tick can fire while the monitor reads STANDBY.
struct App {
    ui: AppWindow,
    monitor: Rc<RefCell<SensorMonitor>>,
    timer: Rc<slint::Timer>,
    readings: Rc<slint::VecModel<ReadingRecord>>,
}

impl App {
    const TICK_INTERVAL: std::time::Duration = std::time::Duration::from_secs(1);

    /// Create a new App struct with a freshly initialized monitor.
    fn new() -> anyhow::Result<Self> {
        // Make a new AppWindow
        let ui = AppWindow::new()?;

        // The monitor is shared between the control callbacks and the timer
        // closure; everything runs on the Slint event loop, so Rc<RefCell>
        // is all the sharing we need.
        let monitor = Rc::new(RefCell::new(SensorMonitor::new(Box::new(
            RandomWalkProbe::new(),
        ))));

        // Create a shared model for the reading rows
        let readings: Rc<slint::VecModel<ReadingRecord>> = Rc::default();

        // Initialize the view model with the readings
        let model = slint::ModelRc::from(readings.clone());
        ui.global::<ViewModel>().set_readings(model);

        let app = Self {
            ui,
            monitor,
            timer: Rc::new(slint::Timer::default()),
            readings,
        };

        refresh(&app.ui, &app.readings, &app.monitor.borrow());

        Ok(app)
    }

    /// Wire the callbacks and run the UI until the window is closed.
    fn run(&mut self) -> anyhow::Result<()> {
        let view_model = self.ui.global::<ViewModel>();

        // START/STOP: flip the monitor, then start or stop the driver timer
        // to match. Stopping is synchronous, so no tick outlives a STOP.
        {
            let ui_handle = self.ui.as_weak();
            let monitor = self.monitor.clone();
            let readings = self.readings.clone();
            let timer = self.timer.clone();

            view_model.on_toggle_power(move || {
                let ui = ui_handle.unwrap();
                monitor.borrow_mut().toggle_power();

                if monitor.borrow().active() {
                    let tick_handle = ui.as_weak();
                    let tick_monitor = monitor.clone();
                    let tick_readings = readings.clone();

                    timer.start(slint::TimerMode::Repeated, App::TICK_INTERVAL, move || {
                        let ui = tick_handle.unwrap();
                        tick_monitor.borrow_mut().tick();
                        refresh(&ui, &tick_readings, &tick_monitor.borrow());
                    });
                } else {
                    timer.stop();
                }

                refresh(&ui, &readings, &monitor.borrow());
            });
        }

        // COUNT: log a reading of whatever the temperature currently is.
        {
            let ui_handle = self.ui.as_weak();
            let monitor = self.monitor.clone();
            let readings = self.readings.clone();

            view_model.on_log_reading(move || {
                let ui = ui_handle.unwrap();
                monitor.borrow_mut().log_reading();
                refresh(&ui, &readings, &monitor.borrow());
            });
        }

        // RESET: back to the initial state, driver state untouched.
        {
            let ui_handle = self.ui.as_weak();
            let monitor = self.monitor.clone();
            let readings = self.readings.clone();

            view_model.on_reset(move || {
                let ui = ui_handle.unwrap();
                monitor.borrow_mut().reset();
                refresh(&ui, &readings, &monitor.borrow());
            });
        }

        // Run the UI (and map an error to an anyhow::Error).
        self.ui.run().map_err(|e| e.into())
    }
}

/// Push the whole monitor state into the view model. Cheap enough to redo
/// after every mutation, which keeps the UI a pure function of the monitor.
fn refresh(ui: &AppWindow, readings: &slint::VecModel<ReadingRecord>, monitor: &SensorMonitor) {
    let view_model = ui.global::<ViewModel>();

    view_model.set_temperature_text(format_temperature(monitor.temperature()).into());
    view_model.set_counter_text(format_counter(monitor.counter()).into());
    view_model.set_active(monitor.active());
    view_model.set_last_update(monitor.last_update().into());
    view_model.set_max_text(format_temperature(monitor.max_temperature()).into());
    view_model.set_min_text(format_temperature(monitor.min_temperature()).into());

    let rows: Vec<ReadingRecord> = monitor.readings().iter().map(Into::into).collect();
    readings.set_vec(rows);
}

/// Convert a logged reading into a row for the serial monitor list.
impl From<&temp_monitor_model::Reading> for ReadingRecord {
    fn from(reading: &temp_monitor_model::Reading) -> Self {
        Self {
            timestamp: reading.timestamp.as_str().into(),
            temperature: format_temperature(reading.temperature).into(),
            counter: slint::format!("{}", reading.counter),
        }
    }
}

/// A minimal main function that initializes the App and runs it.
fn main() -> anyhow::Result<()> {
    env_logger::init();
    log::info!("Starting temperature monitor dashboard");

    let mut app = App::new()?;

    app.run()
}
