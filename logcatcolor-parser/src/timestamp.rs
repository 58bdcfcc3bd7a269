use chrono::NaiveDateTime;

// logcat omits the year; a leap year keeps 02-29 parseable
const REFERENCE_YEAR: i32 = 2000;
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.3f";

// `9` marks an ASCII digit, anything else must match literally
const DATE_SHAPE: &[u8] = b"99-99";
const TIME_SHAPE: &[u8] = b"99:99:99.999";

/// parse the `MM-DD` and `HH:MM:SS.mmm` fields of a threadtime line
///
/// Deltas between timestamps on either side of a new year are meaningless.
pub fn parse_timestamp(date: &str, time: &str) -> Option<NaiveDateTime> {
    // chrono accepts one-digit fields and a variable fraction, logcat always zero-pads
    if !matches_shape(date, DATE_SHAPE) || !matches_shape(time, TIME_SHAPE) {
        return None;
    }

    let stamped = format!("{REFERENCE_YEAR}-{date} {time}");
    NaiveDateTime::parse_from_str(&stamped, TIMESTAMP_FORMAT).ok()
}

fn matches_shape(text: &str, shape: &[u8]) -> bool {
    text.len() == shape.len()
        && text.bytes().zip(shape).all(|(b, &expected)| match expected {
            b'9' => b.is_ascii_digit(),
            _ => b == expected,
        })
}
