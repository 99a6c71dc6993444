use std::io::{self, Stdout, Write};
use std::time::{Duration, Instant};

/// Scope timer that writes `<label><elapsed>` once it is finished or dropped.
///
/// The line is written on every exit path, including early returns and
/// unwinding out of the timed work. Write failures are ignored.
pub struct DurationLogger<W: Write = Stdout> {
    label: String,
    start: Instant,
    writer: Option<W>,
}

impl DurationLogger<Stdout> {
    pub fn new(label: impl Into<String>) -> Self {
        Self::with_writer(label, io::stdout())
    }
}

impl<W: Write> DurationLogger<W> {
    pub fn with_writer(label: impl Into<String>, writer: W) -> Self {
        Self {
            label: label.into(),
            start: Instant::now(),
            writer: Some(writer),
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    /// Writes the line now and returns the measured duration.
    pub fn finish(mut self) -> Duration {
        self.emit()
    }

    fn emit(&mut self) -> Duration {
        let elapsed = self.start.elapsed();
        if let Some(mut writer) = self.writer.take() {
            tracing::debug!(label = %self.label, ?elapsed, "timed scope finished");
            let _ = writeln!(writer, "{}", render_duration_line(&self.label, elapsed));
            let _ = writer.flush();
        }
        elapsed
    }
}

impl<W: Write> Drop for DurationLogger<W> {
    fn drop(&mut self) {
        self.emit();
    }
}

pub fn render_duration_line(label: &str, elapsed: Duration) -> String {
    format!("{}{:?}", label, elapsed)
}
