// logcatcolor-parser - field extraction for `adb logcat -v threadtime` lines
//
// Nothing here allocates per field: offsets and borrowed slices point back
// into the raw line so the renderer can re-emit the original whitespace.

mod fields;
mod level;
mod line;
mod timestamp;

pub use fields::{field_at, field_starts};
pub use level::Level;
pub use line::{FIELD_COUNT, LogLine};
pub use timestamp::parse_timestamp;
