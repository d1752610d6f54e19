//! Output sink implementations

use std::io::{self, Stdout, Write};

use crate::core::Result;
use crate::generation::OutputSink;

/// Writes each block followed by a newline and flushes immediately
pub struct WriterSink<W: Write> {
    writer: W,
}

/// Sink used by the command line: blocks go straight to stdout
pub type StdoutSink = WriterSink<Stdout>;

impl<W: Write> WriterSink<W> {
    pub fn with_writer(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl WriterSink<Stdout> {
    pub fn new() -> Self {
        Self::with_writer(io::stdout())
    }
}

impl Default for WriterSink<Stdout> {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: Write> OutputSink for WriterSink<W> {
    fn emit(&mut self, block: &str) -> Result<()> {
        writeln!(self.writer, "{block}")?;
        self.writer.flush()?;
        Ok(())
    }
}

/// Collects blocks in memory
#[derive(Debug, Default)]
pub struct BufferSink {
    blocks: Vec<String>,
}

impl BufferSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn blocks(&self) -> &[String] {
        &self.blocks
    }

    /// Blocks joined the way [`WriterSink`] would have printed them
    pub fn output(&self) -> String {
        self.blocks.iter().map(|b| format!("{b}\n")).collect()
    }
}

impl OutputSink for BufferSink {
    fn emit(&mut self, block: &str) -> Result<()> {
        self.blocks.push(block.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_writer_sink_appends_newline() {
        let mut sink = WriterSink::with_writer(Vec::new());
        sink.emit("# Demo").unwrap();
        sink.emit("body").unwrap();

        assert_eq!(String::from_utf8(sink.into_inner()).unwrap(), "# Demo\nbody\n");
    }

    #[test]
    fn test_buffer_sink_collects_blocks() {
        let mut sink = BufferSink::new();
        sink.emit("one").unwrap();
        sink.emit("two").unwrap();

        assert_eq!(sink.blocks(), ["one", "two"]);
        assert_eq!(sink.output(), "one\ntwo\n");
    }
}
