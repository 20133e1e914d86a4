//! Presentation helpers shared by the LCD panel and the serial monitor.

/// Renders a temperature with one decimal place, fixed notation.
pub fn format_temperature(temperature: f32) -> String {
    format!("{temperature:.1}")
}

/// Renders the counter zero-padded to three digits, e.g. `007`.
pub fn format_counter(counter: u32) -> String {
    format!("{counter:03}")
}
