//! Line writer routing formatted events to the host console.
//!
//! The `fmt` layer formats each event into a fresh [`ConsoleLine`]; the line
//! is emitted when the writer is dropped, through the console method matching
//! the event level. In a browser that is `console.error`/`warn`/`info`/`log`/
//! `debug`; everywhere else the line goes to stderr.

use std::io::{self, Write};

use tracing::{Level, Metadata};
use tracing_subscriber::fmt::MakeWriter;

/// [`MakeWriter`] producing one [`ConsoleLine`] per event.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleWriter;

impl<'a> MakeWriter<'a> for ConsoleWriter {
    type Writer = ConsoleLine;

    fn make_writer(&'a self) -> Self::Writer {
        ConsoleLine::new(Level::INFO)
    }

    fn make_writer_for(&'a self, meta: &Metadata<'_>) -> Self::Writer {
        ConsoleLine::new(*meta.level())
    }
}

/// Buffered event text, flushed to the console on drop.
#[derive(Debug)]
pub struct ConsoleLine {
    level: Level,
    buffer: Vec<u8>,
}

impl ConsoleLine {
    const fn new(level: Level) -> Self {
        Self {
            level,
            buffer: Vec::new(),
        }
    }

    fn emit(&mut self) {
        if self.buffer.is_empty() {
            return;
        }
        let text = String::from_utf8_lossy(&self.buffer);
        let line = text.trim_end_matches('\n');
        emit(self.level, line);
        self.buffer.clear();
    }
}

impl Write for ConsoleLine {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buffer.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Drop for ConsoleLine {
    fn drop(&mut self) {
        self.emit();
    }
}

#[cfg(target_arch = "wasm32")]
fn emit(level: Level, line: &str) {
    use wasm_bindgen::JsValue;
    use web_sys::console;

    let value = JsValue::from_str(line);
    match level {
        Level::ERROR => console::error_1(&value),
        Level::WARN => console::warn_1(&value),
        Level::INFO => console::info_1(&value),
        Level::DEBUG => console::log_1(&value),
        Level::TRACE => console::debug_1(&value),
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn emit(_level: Level, line: &str) {
    let _ = writeln!(io::stderr().lock(), "{line}");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_are_buffered_until_drop() {
        let mut line = ConsoleWriter.make_writer();
        writeln!(line, "bound {} controls", 3).unwrap();
        assert_eq!(line.buffer, b"bound 3 controls\n");
        line.emit();
        assert!(line.buffer.is_empty());
    }
}
