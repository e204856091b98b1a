use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

/// Spinner shown while a build runs. Draws to stderr alongside log output.
pub fn create_spinner(message: String) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner()
        .tick_strings(&["◐", "◓", "◑", "◒", "●"])
        .template("{spinner} {msg} {elapsed:.dim}")
    {
        spinner.set_style(style);
    }
    spinner.set_message(message);
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner
}
