use crate::{Level, field_at, field_starts, parse_timestamp};
use chrono::NaiveDateTime;

/// number of leading fields in a threadtime line: date, time, pid, tid, level, tag
pub const FIELD_COUNT: usize = 6;

const TIME_FIELD: usize = 1;
const LEVEL_FIELD: usize = 4;
const TAG_FIELD: usize = 5;

/// a recognized `adb logcat -v threadtime` line
///
/// Format: `MM-DD HH:MM:SS.mmm  PID  TID LEVEL TAG   : MESSAGE`
///
/// All slices borrow from `raw`, so the original column padding survives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogLine<'a> {
    pub raw: &'a str,
    pub timestamp: NaiveDateTime,
    pub level: Level,
    /// byte offset of the level character, also the width of the metadata column
    pub level_offset: usize,
    pub tag: &'a str,
    /// whitespace between the trimmed tag and its colon
    pub tag_padding: &'a str,
    pub message: &'a str,
    /// text before the time field plus the pid/tid segment, kept as one blob
    pub other: String,
}

impl<'a> LogLine<'a> {
    /// returns `None` when the line does not have the threadtime shape
    pub fn parse(raw: &'a str) -> Option<Self> {
        let starts = field_starts(raw, FIELD_COUNT);
        if starts.len() < FIELD_COUNT {
            return None;
        }

        let level_offset = starts[LEVEL_FIELD];
        let level = raw[level_offset..].chars().next().and_then(Level::from_code)?;

        let tag_start = starts[TAG_FIELD];
        let colon = tag_start + raw[tag_start..].find(':')?;
        let tag_region = &raw[tag_start..colon];
        let tag = tag_region.trim_end();
        let tag_padding = &tag_region[tag.len()..];

        let time_start = starts[TIME_FIELD];
        let time = field_at(raw, time_start);
        let timestamp = parse_timestamp(field_at(raw, starts[0]), time)?;

        let time_end = time_start + time.len();
        let mut other = String::with_capacity(level_offset);
        other.push_str(&raw[..time_start]);
        other.push_str(&raw[time_end..level_offset]);

        // the colon and the single separator after it are dropped as-is
        let mut rest = raw[colon + 1..].chars();
        rest.next();
        let message = rest.as_str();

        Some(Self {
            raw,
            timestamp,
            level,
            level_offset,
            tag,
            tag_padding,
            message,
            other,
        })
    }

    /// the date, time, pid and tid columns including trailing padding
    pub fn metadata(&self) -> &'a str {
        &self.raw[..self.level_offset]
    }
}
