//! Line-oriented protocol output

use barfeed_types::Header;
use std::io::{self, Write};
use std::sync::{Arc, Mutex};

/// Shared, line-buffered writer for the status stream
///
/// Clones write to the same stream; each line is written and flushed
/// under one lock so lines from different writers never interleave.
#[derive(Clone)]
pub struct Output {
    inner: Arc<Mutex<Box<dyn Write + Send>>>,
}

impl Output {
    pub fn new(writer: impl Write + Send + 'static) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Box::new(writer))),
        }
    }

    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }

    pub fn write_line(&self, line: &str) -> io::Result<()> {
        let mut writer = self
            .inner
            .lock()
            .map_err(|_| io::Error::new(io::ErrorKind::Other, "output lock poisoned"))?;
        writeln!(writer, "{}", line)?;
        writer.flush()
    }

    /// Write the protocol header and open the status array
    pub fn write_handshake(&self, header: &Header) -> io::Result<()> {
        for line in header.handshake()? {
            self.write_line(&line)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Default)]
    struct Sink(Arc<Mutex<Vec<u8>>>);

    impl Write for Sink {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_handshake_lines() {
        let sink = Sink::default();
        let output = Output::new(sink.clone());
        output.write_handshake(&Header::default()).unwrap();
        output.write_line(",[  ]").unwrap();

        let written = String::from_utf8(sink.0.lock().unwrap().clone()).unwrap();
        assert_eq!(
            written,
            "{\"version\":1,\"click_events\":true}\n[[]\n,[  ]\n"
        );
    }
}
