use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use std::io::{self, Write};
use std::time::Duration;
use tracing_subscriber::fmt::MakeWriter;

pub trait MultiProgressNew {
    fn add_with_style(&self, pb: ProgressBar, style: ProgressStyle) -> ProgressBar;
    fn add_spinner(&self, style: ProgressStyle, message: impl Into<String>) -> ProgressBar;
}

impl MultiProgressNew for MultiProgress {
    fn add_with_style(&self, pb: ProgressBar, style: ProgressStyle) -> ProgressBar {
        let pb = self.add(pb);
        pb.set_style(style);
        pb.enable_steady_tick(Duration::from_millis(100));
        pb
    }

    fn add_spinner(&self, style: ProgressStyle, message: impl Into<String>) -> ProgressBar {
        let pb = self.add_with_style(ProgressBar::new_spinner(), style);
        pb.set_message(message.into());
        pb
    }
}

/// Log sink for `tracing_subscriber::fmt` that hides the bars while a line is
/// written to stderr, so log lines never cut through a redraw.
#[derive(Clone)]
pub struct ProgressWriter {
    multi_progress: MultiProgress,
}

impl ProgressWriter {
    pub fn new(multi_progress: MultiProgress) -> Self {
        Self { multi_progress }
    }
}

impl io::Write for ProgressWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.multi_progress
            .suspend(|| io::stderr().lock().write_all(buf))?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        io::stderr().flush()
    }
}

impl<'a> MakeWriter<'a> for ProgressWriter {
    type Writer = ProgressWriter;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use indicatif::ProgressDrawTarget;

    #[test]
    fn writer_consumes_whole_buffer_while_bars_are_drawn() {
        let multi_progress = MultiProgress::with_draw_target(ProgressDrawTarget::hidden());
        let pb = multi_progress.add_spinner(ProgressStyle::default_spinner(), "working");

        let mut writer = ProgressWriter::new(multi_progress.clone()).make_writer();
        let line = b"INFO Report written\n";
        assert_eq!(writer.write(line).unwrap(), line.len());
        writer.flush().unwrap();

        pb.finish_and_clear();
        assert!(pb.is_finished());
    }
}
