/// returns the byte offset of the first non-space character of each field,
/// stopping after `max_fields` fields
///
/// Only `' '` separates fields; runs of spaces count as one separator.
pub fn field_starts(line: &str, max_fields: usize) -> Vec<usize> {
    let mut starts = Vec::with_capacity(max_fields);
    if max_fields == 0 {
        return starts;
    }

    let mut in_field = false;
    for (idx, ch) in line.char_indices() {
        if ch == ' ' {
            in_field = false;
        } else if !in_field {
            starts.push(idx);
            in_field = true;
            if starts.len() >= max_fields {
                break;
            }
        }
    }

    starts
}

/// the field beginning at `start`, up to (not including) the next space
pub fn field_at(line: &str, start: usize) -> &str {
    let rest = line.get(start..).unwrap_or("");
    match rest.find(' ') {
        Some(end) => &rest[..end],
        None => rest,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_threadtime_line() {
        let line = "04-19 19:34:18.813  5587  5708 I artd    : GetBestInfo no usable artifacts";
        assert_eq!(field_starts(line, 6), vec![0, 6, 20, 26, 31, 33]);
    }

    #[test]
    fn test_fewer_fields_than_requested() {
        assert_eq!(field_starts("a b", 6), vec![0, 2]);
    }

    #[test]
    fn test_empty_line() {
        assert!(field_starts("", 6).is_empty());
        assert!(field_starts("     ", 6).is_empty());
    }

    #[test]
    fn test_leading_spaces() {
        assert_eq!(field_starts("   x  y", 6), vec![3, 6]);
    }

    #[test]
    fn test_zero_fields() {
        assert!(field_starts("a b c", 0).is_empty());
    }

    #[test]
    fn test_stops_at_max() {
        assert_eq!(field_starts("a b c d", 2), vec![0, 2]);
    }

    #[test]
    fn test_tabs_are_not_separators() {
        assert_eq!(field_starts("a\tb c", 6), vec![0, 4]);
    }

    #[test]
    fn test_multibyte_offsets_are_byte_offsets() {
        let line = "é ü";
        let starts = field_starts(line, 6);
        assert_eq!(starts, vec![0, 3]);
        assert_eq!(field_at(line, starts[1]), "ü");
    }

    #[test]
    fn test_field_at() {
        let line = "04-19 19:34:18.813  5587";
        assert_eq!(field_at(line, 0), "04-19");
        assert_eq!(field_at(line, 6), "19:34:18.813");
        assert_eq!(field_at(line, 20), "5587");
        assert_eq!(field_at(line, 100), "");
    }
}
