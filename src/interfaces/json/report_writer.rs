use crate::domain::report::ValidationReport;
use crate::error::Result;
use std::io::Write;

/// Writes validation reports as pretty-printed JSON.
///
/// Slashes and non-ASCII text are written as-is. Each report is followed by a
/// newline.
pub struct ReportWriter<W: Write> {
    writer: W,
}

impl<W: Write> ReportWriter<W> {
    /// Creates a new `ReportWriter` over any `Write` sink (e.g. Stdout, File).
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn write_report(&mut self, report: &ValidationReport) -> Result<()> {
        serde_json::to_writer_pretty(&mut self.writer, report)?;
        self.writer.write_all(b"\n")?;
        self.writer.flush()?;
        Ok(())
    }
}
