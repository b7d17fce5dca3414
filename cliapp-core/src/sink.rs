use std::cell::RefCell;
use std::io::{self, Write};
use std::rc::Rc;

use crate::error::Result;

/// Destination for normal or error text.
pub struct Sink {
    inner: Box<dyn Write>,
}

impl Sink {
    pub fn new(writer: impl Write + 'static) -> Self {
        Self {
            inner: Box::new(writer),
        }
    }

    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }

    pub fn stderr() -> Self {
        Self::new(io::stderr())
    }

    // Raw content, flushed immediately
    pub fn write(&mut self, content: &str) -> Result<()> {
        self.inner.write_all(content.as_bytes())?;
        self.inner.flush()?;
        Ok(())
    }

    pub fn write_line(&mut self, line: &str) -> Result<()> {
        self.write(line)?;
        self.write("\n")
    }

    pub fn writer(&mut self) -> &mut dyn Write {
        self.inner.as_mut()
    }
}

/// In-memory sink for capturing output, e.g. in tests or when embedding.
///
/// Clones share one buffer, so keep a clone and hand the other to the app.
#[derive(Clone, Default)]
pub struct MemorySink {
    buffer: Rc<RefCell<Vec<u8>>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.buffer.borrow()).into_owned()
    }

    pub fn clear(&self) {
        self.buffer.borrow_mut().clear();
    }
}

impl Write for MemorySink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buffer.borrow_mut().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl From<MemorySink> for Sink {
    fn from(sink: MemorySink) -> Self {
        Sink::new(sink)
    }
}
