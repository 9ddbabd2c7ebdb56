//! Output formatting and progress reporting

use console::{style, Color, Term};
use geofix::{Progress, RunSummary};
use indicatif::{ProgressBar, ProgressStyle};

/// Progress reporter for location runs
#[derive(Debug)]
pub struct ProgressReporter {
    term: Term,
    progress_bar: Option<ProgressBar>,
    /// Whether to use colors
    pub use_color: bool,
    /// Quiet mode
    pub quiet: bool,
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new(true, false)
    }
}

impl ProgressReporter {
    /// Create a new progress reporter
    #[must_use]
    pub fn new(use_color: bool, quiet: bool) -> Self {
        Self {
            term: Term::stderr(),
            progress_bar: None,
            use_color,
            quiet,
        }
    }

    /// Start a progress bar over the coordinates of a run
    pub fn start_progress(&mut self, total: u64, message: &str) {
        if self.quiet {
            return;
        }

        let pb = ProgressBar::new(total);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("=>-"),
        );
        pb.set_message(message.to_string());
        self.progress_bar = Some(pb);
    }

    /// Advance the bar for one broadcast step
    pub fn step(&self, progress: &Progress<'_>) {
        if let Some(ref pb) = self.progress_bar {
            pb.set_length(progress.total as u64);
            pb.set_position(progress.step as u64);
            pb.set_message(format!(
                "{} -> {} device(s)",
                progress.coordinate, progress.devices
            ));
        }
    }

    /// Finish progress bar
    pub fn finish(&self) {
        if let Some(ref pb) = self.progress_bar {
            pb.finish_and_clear();
        }
    }

    /// Print a failure message; shown even in quiet mode
    pub fn failure(&self, message: &str) {
        let _ = self
            .term
            .write_line(&self.render("✗", Color::Red, "Error:", message));
    }

    /// Print a warning message
    pub fn warning(&self, message: &str) {
        if self.quiet {
            return;
        }
        let _ = self
            .term
            .write_line(&self.render("⚠", Color::Yellow, "Warning:", message));
    }

    fn render(&self, marker: &str, color: Color, plain: &str, message: &str) -> String {
        if self.use_color {
            format!("{} {message}", style(marker).fg(color).bold())
        } else {
            format!("{plain} {message}")
        }
    }
}

/// Human-readable line for a finished run
#[must_use]
pub fn format_summary(summary: &RunSummary) -> String {
    format!(
        "Simulated {} coordinate(s) on {} device(s)",
        summary.coordinates,
        summary.devices.len()
    )
}

/// `{"total":N}`, the same body the HTTP endpoint returns
#[must_use]
pub fn summary_json(summary: &RunSummary) -> String {
    serde_json::json!({ "total": summary.coordinates }).to_string()
}
