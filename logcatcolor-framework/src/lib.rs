//! # logcatcolor-framework
//!
//! Turns a stream of `adb logcat -v threadtime` lines into colorized,
//! deduplicated output.
//!
//! ## Overview
//!
//! - **[`Renderer`]**: parses each line with `logcatcolor-parser` and renders it,
//!   keeping a [`RenderState`] (last tag, last printed timestamp) between lines
//! - **[`Palette`]**: level-to-color map and tag style, passed to the renderer
//! - **[`LogProvider`]**: where lines come from (adb, stdin, a file)
//! - **[`run_session`]** / **[`Supervisor`]**: the read-render-write loop and
//!   the restart-on-exit policy around it
//!
//! ## Deduplication
//!
//! When a line has the same tag as the previous recognized line and is less
//! than `max_delta` after the last line that printed its metadata, the
//! date/time/pid/tid column is replaced by `+<delta>`, padded to the same width:
//!
//! ```text
//! 04-19 19:34:18.813  5587  5708 I artd     : GetBestInfo no usable artifacts
//! +1ms                           I artd     : second line
//! ```
//!
//! Lines that do not look like threadtime records are written unchanged.
//!
//! ## Quick Start
//!
//! ```rust
//! use logcatcolor_framework::{Palette, ReaderProvider, Renderer, run_session};
//! use std::io::Cursor;
//! use std::time::Duration;
//!
//! let input = "04-19 19:34:18.813  5587  5708 I artd    : hello\n";
//! let mut provider = ReaderProvider::new(Cursor::new(input.as_bytes().to_vec()));
//! let mut renderer = Renderer::new(Palette::plain(), Duration::from_secs(10));
//! let mut out = Vec::new();
//!
//! run_session(&mut provider, &mut renderer, &mut out).unwrap();
//! assert_eq!(
//!     String::from_utf8(out).unwrap(),
//!     "04-19 19:34:18.813  5587  5708 I artd     : hello\n"
//! );
//! ```

pub mod options;
pub mod palette;
pub mod provider;
pub mod render;
pub mod session;

// re-export commonly used types
pub use options::{
    ColorMode, DEFAULT_MAX_DELTA, DEFAULT_RESTART_DELAY, Device, Options, OptionsError,
    parse_duration, parse_level,
};
pub use palette::Palette;
pub use provider::{LogProvider, ReaderProvider, decode_line};
pub use render::{RenderState, Renderer, format_delta};
pub use session::{RestartPolicy, Supervisor, run_session};
