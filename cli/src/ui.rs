use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Spinner for the slow steps (fetching, installing). Cleared on drop so an
/// early `?` return does not leave it ticking.
pub struct Spinner(ProgressBar);

impl Spinner {
    pub fn start(message: impl Into<String>) -> Self {
        let pb = ProgressBar::new_spinner();
        if let Ok(spinner_style) = ProgressStyle::with_template("  {spinner:.cyan} {msg}") {
            pb.set_style(spinner_style);
        }
        pb.set_message(message.into());
        pb.enable_steady_tick(Duration::from_millis(80));
        Self(pb)
    }

    pub fn succeed(self, message: impl AsRef<str>) {
        self.0.finish_and_clear();
        println!("  {} {}", style("✓").green(), message.as_ref());
    }

    pub fn fail(self, message: impl AsRef<str>) {
        self.0.finish_and_clear();
        eprintln!("  {} {}", style("✗").red(), message.as_ref());
    }
}

impl Drop for Spinner {
    fn drop(&mut self) {
        if !self.0.is_finished() {
            self.0.finish_and_clear();
        }
    }
}

pub fn success(message: impl AsRef<str>) {
    println!("{} {}", style("✓").green().bold(), message.as_ref());
}

pub fn warning(message: impl AsRef<str>) {
    println!("{} {}", style("!").yellow(), message.as_ref());
}

pub fn info(message: impl AsRef<str>) {
    println!("{} {}", style("→").cyan(), message.as_ref());
}
