use std::time::Duration;

use cse_rs::{CseError, FetchObserver};
use indicatif::{ProgressBar, ProgressStyle};

/// Progress bar driven by the fetch loop.
pub(crate) struct Bar {
    bar: ProgressBar,
    failures: u64,
}

impl Bar {
    pub(crate) fn new(label: &'static str) -> Self {
        let bar = ProgressBar::new(0);
        if let Ok(style) = ProgressStyle::default_bar()
            .template("{spinner:.magenta} {prefix:>9.white} |{bar:40.white/grey}| {pos}/{len} [{elapsed}, ETA {eta}] {msg}")
        {
            bar.set_style(style.progress_chars("## "));
        }
        bar.set_prefix(label);
        Self { bar, failures: 0 }
    }
}

impl FetchObserver for Bar {
    fn on_start(&mut self, total: usize) {
        self.bar.set_length(total as u64);
        self.bar.enable_steady_tick(Duration::from_millis(100));
    }

    fn on_success(&mut self, id: &str) {
        self.bar.set_message(id.to_string());
        self.bar.inc(1);
    }

    fn on_failure(&mut self, id: &str, _error: &CseError) {
        self.failures += 1;
        self.bar.set_message(format!("{id} failed ({} so far)", self.failures));
        self.bar.inc(1);
    }

    fn on_finish(&mut self) {
        self.bar.finish_with_message(format!("done, {} failed", self.failures));
    }
}
