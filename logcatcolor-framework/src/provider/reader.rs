use super::{LogProvider, decode_line};
use anyhow::{Context, Result};
use std::io::BufRead;

/// provider over any buffered reader (stdin, a captured logcat file)
pub struct ReaderProvider<R> {
    reader: R,
    buffer: Vec<u8>,
}

impl<R: BufRead + Send> ReaderProvider<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            buffer: Vec::new(),
        }
    }
}

impl<R: BufRead + Send> LogProvider for ReaderProvider<R> {
    fn start(&mut self) -> Result<()> {
        log::debug!("ReaderProvider: Starting");
        Ok(())
    }

    fn stop(&mut self) -> Result<()> {
        log::debug!("ReaderProvider: Stopping");
        Ok(())
    }

    fn next_line(&mut self) -> Result<Option<String>> {
        self.buffer.clear();
        let bytes_read = self
            .reader
            .read_until(b'\n', &mut self.buffer)
            .context("Error reading log input")?;

        if bytes_read == 0 {
            return Ok(None);
        }
        Ok(Some(decode_line(&self.buffer)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_reads_lines_until_eof() {
        let mut provider = ReaderProvider::new(Cursor::new(b"one\r\ntwo\n\nthree".to_vec()));
        provider.start().unwrap();
        assert_eq!(provider.next_line().unwrap().as_deref(), Some("one"));
        assert_eq!(provider.next_line().unwrap().as_deref(), Some("two"));
        assert_eq!(provider.next_line().unwrap().as_deref(), Some(""));
        assert_eq!(provider.next_line().unwrap().as_deref(), Some("three"));
        assert_eq!(provider.next_line().unwrap(), None);
        provider.stop().unwrap();
    }

    #[test]
    fn test_empty_input() {
        let mut provider = ReaderProvider::new(Cursor::new(Vec::new()));
        assert_eq!(provider.next_line().unwrap(), None);
    }
}
