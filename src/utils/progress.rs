#[cfg(feature = "cli")]
use indicatif::{ProgressBar, ProgressStyle};

#[cfg(feature = "cli")]
const BAR_TEMPLATE: &str = "{spinner:.green} {prefix} [{bar:40.cyan/blue}] {pos}/{len} {msg}";

/// Terminal progress bar for a fetch loop. Log lines emitted through
/// `suspend` are printed above the bar instead of tearing it.
#[cfg(feature = "cli")]
pub struct ScrapeProgress {
    bar: Option<ProgressBar>,
}

#[cfg(feature = "cli")]
impl ScrapeProgress {
    pub fn new(enabled: bool, len: usize, prefix: &'static str) -> Self {
        let bar = enabled.then(|| {
            let bar = ProgressBar::new(len as u64);
            bar.set_style(
                ProgressStyle::default_bar()
                    .template(BAR_TEMPLATE)
                    .unwrap_or_else(|_| ProgressStyle::default_bar())
                    .progress_chars("█▓▒░"),
            );
            bar.set_prefix(prefix);
            bar
        });

        Self { bar }
    }

    pub fn set_message(&self, message: &str) {
        if let Some(bar) = &self.bar {
            bar.set_message(message.to_string());
        }
    }

    pub fn inc(&self) {
        if let Some(bar) = &self.bar {
            bar.inc(1);
        }
    }

    pub fn suspend<F, R>(&self, f: F) -> R
    where
        F: FnOnce() -> R,
    {
        match &self.bar {
            Some(bar) => bar.suspend(f),
            None => f(),
        }
    }

    pub fn position(&self) -> u64 {
        self.bar.as_ref().map(|bar| bar.position()).unwrap_or(0)
    }

    pub fn finish(&self) {
        if let Some(bar) = &self.bar {
            bar.finish_and_clear();
        }
    }
}

#[cfg(not(feature = "cli"))]
pub struct ScrapeProgress;

#[cfg(not(feature = "cli"))]
impl ScrapeProgress {
    pub fn new(_enabled: bool, _len: usize, _prefix: &'static str) -> Self {
        Self
    }

    pub fn set_message(&self, _message: &str) {}

    pub fn inc(&self) {}

    pub fn suspend<F, R>(&self, f: F) -> R
    where
        F: FnOnce() -> R,
    {
        f()
    }

    pub fn position(&self) -> u64 {
        0
    }

    pub fn finish(&self) {}
}
