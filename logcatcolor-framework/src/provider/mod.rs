//! Line sources for a rendering session.
//!
//! A [`LogProvider`] hands out raw logcat lines one at a time:
//!
//! ```text
//! ┌──────────────┐   next_line()   ┌──────────┐   render()   ┌────────┐
//! │ LogProvider  │ ──────────────> │ Renderer │ ───────────> │ stdout │
//! └──────────────┘                 └──────────┘              └────────┘
//! ```
//!
//! Providers are single-use: a session calls `start()`, drains `next_line()`
//! until it returns `Ok(None)`, then calls `stop()`. Restarting means building
//! a new provider.

mod reader;

pub use reader::ReaderProvider;

use anyhow::Result;

/// Trait for acquiring raw log lines from any source.
///
/// # Blocking Contract
///
/// `next_line()` blocks until a full line is available. It returns
/// `Ok(None)` once the stream has ended; the session then stops the provider.
///
/// # Examples
///
/// ```rust
/// use logcatcolor_framework::LogProvider;
/// use anyhow::Result;
///
/// struct VecProvider {
///     lines: std::vec::IntoIter<String>,
/// }
///
/// impl LogProvider for VecProvider {
///     fn start(&mut self) -> Result<()> {
///         Ok(())
///     }
///
///     fn stop(&mut self) -> Result<()> {
///         Ok(())
///     }
///
///     fn next_line(&mut self) -> Result<Option<String>> {
///         Ok(self.lines.next())
///     }
/// }
/// ```
pub trait LogProvider: Send {
    /// Acquire resources (spawn processes, open files).
    ///
    /// # Errors
    ///
    /// An error here is fatal for the run; the supervisor does not retry it.
    fn start(&mut self) -> Result<()>;

    /// Release resources. Called once after the stream ended or failed.
    ///
    /// # Errors
    ///
    /// Errors are logged but do not stop a restart.
    fn stop(&mut self) -> Result<()>;

    /// Block until the next line (without line terminator) is available.
    ///
    /// # Errors
    ///
    /// A read error ends the current session.
    fn next_line(&mut self) -> Result<Option<String>>;
}

/// decode one raw line, dropping the `\n` / `\r\n` terminator
///
/// Invalid UTF-8 is replaced rather than rejected so a bad line never stops
/// the stream.
pub fn decode_line(bytes: &[u8]) -> String {
    let bytes = bytes.strip_suffix(b"\n").unwrap_or(bytes);
    let bytes = bytes.strip_suffix(b"\r").unwrap_or(bytes);
    String::from_utf8_lossy(bytes).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_line_terminators() {
        assert_eq!(decode_line(b"hello\n"), "hello");
        assert_eq!(decode_line(b"hello\r\n"), "hello");
        assert_eq!(decode_line(b"hello"), "hello");
        assert_eq!(decode_line(b""), "");
    }

    #[test]
    fn test_decode_line_invalid_utf8() {
        assert_eq!(decode_line(b"ab\xffcd\n"), "ab\u{fffd}cd");
    }
}
