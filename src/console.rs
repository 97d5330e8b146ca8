use std::io::{self, Write};
use std::time::{Duration, Instant};

/// Timestamped status lines on stderr; stdout stays reserved for JSON output.
pub struct ConsoleLog {
    enabled: bool,
    t0: Instant,
}

impl ConsoleLog {
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled,
            t0: Instant::now(),
        }
    }

    pub fn info(&self, msg: impl AsRef<str>) {
        self.line("", msg.as_ref());
    }

    pub fn warn(&self, msg: impl AsRef<str>) {
        self.line("warning: ", msg.as_ref());
    }

    /// Summary of one suggestion batch.
    pub fn batch_summary(&self, total: usize, suggested: usize, groups: usize) {
        let pct = if total == 0 {
            0.0
        } else {
            (suggested as f64 / total as f64) * 100.0
        };
        self.info(format!(
            "suggested {suggested}/{total} ({pct:5.1}%) across {groups} group(s)"
        ));
    }

    fn line(&self, prefix: &str, msg: &str) {
        if !self.enabled {
            return;
        }
        let ts = fmt_elapsed(self.t0.elapsed());
        let mut stderr = io::stderr().lock();
        let _ = writeln!(stderr, "[{ts}] {prefix}{msg}");
    }
}

// Batches usually finish in well under a second, so stamps keep milliseconds.
fn fmt_elapsed(elapsed: Duration) -> String {
    let ms = elapsed.as_millis();
    let (minutes, ms) = (ms / 60_000, ms % 60_000);
    if minutes > 0 {
        format!("{minutes}m{:02}.{:03}s", ms / 1000, ms % 1000)
    } else {
        format!("{}.{:03}s", ms / 1000, ms % 1000)
    }
}
