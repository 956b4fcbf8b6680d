//! Narration of a count.
//!
//! Counters write to two append-only channels: the terse result channel
//! (the media report) and the verbose audit channel. Either may be closed,
//! in which case writes are dropped, so counters can run headless.

pub mod summary;

pub use summary::ElectionSummary;

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;
use tracing::warn;

pub enum Channel {
    Closed,
    Writer(Box<dyn Write>),
    Transcript(Vec<String>),
}

impl Channel {
    fn append(&mut self, line: &str) -> io::Result<()> {
        match self {
            Channel::Closed => Ok(()),
            Channel::Writer(writer) => writeln!(writer, "{}", line),
            Channel::Transcript(lines) => {
                lines.push(line.to_string());
                Ok(())
            }
        }
    }

    fn lines(&self) -> &[String] {
        match self {
            Channel::Transcript(lines) => lines.as_slice(),
            _ => &[],
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            Channel::Writer(writer) => writer.flush(),
            _ => Ok(()),
        }
    }
}

pub struct Narrator {
    audit: Channel,
    result: Channel,
    error: Option<io::Error>,
}

impl Default for Narrator {
    fn default() -> Self {
        Self::silent()
    }
}

impl Narrator {
    pub fn new(audit: Channel, result: Channel) -> Self {
        Self {
            audit,
            result,
            error: None,
        }
    }

    /// Both channels closed.
    pub fn silent() -> Self {
        Self::new(Channel::Closed, Channel::Closed)
    }

    /// Both channels kept in memory.
    pub fn transcript() -> Self {
        Self::new(
            Channel::Transcript(Vec::new()),
            Channel::Transcript(Vec::new()),
        )
    }

    /// Creates (truncating) the audit and result files.
    pub fn create_files(audit_path: &Path, result_path: &Path) -> io::Result<Self> {
        let audit = BufWriter::new(File::create(audit_path)?);
        let result = BufWriter::new(File::create(result_path)?);
        Ok(Self::new(
            Channel::Writer(Box::new(audit)),
            Channel::Writer(Box::new(result)),
        ))
    }

    pub fn audit(&mut self, line: impl AsRef<str>) {
        let outcome = self.audit.append(line.as_ref());
        self.keep_first_error(outcome);
    }

    pub fn result(&mut self, line: impl AsRef<str>) {
        let outcome = self.result.append(line.as_ref());
        self.keep_first_error(outcome);
    }

    pub fn audit_lines(&self) -> &[String] {
        self.audit.lines()
    }

    pub fn result_lines(&self) -> &[String] {
        self.result.lines()
    }

    /// Flushes both channels and reports the first write error seen so far.
    pub fn finish(&mut self) -> io::Result<()> {
        let audit = self.audit.flush();
        self.keep_first_error(audit);
        let result = self.result.flush();
        self.keep_first_error(result);
        match self.error.take() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }

    fn keep_first_error(&mut self, outcome: io::Result<()>) {
        if let Err(error) = outcome {
            if self.error.is_none() {
                warn!(%error, "narration write failed");
                self.error = Some(error);
            }
        }
    }
}
