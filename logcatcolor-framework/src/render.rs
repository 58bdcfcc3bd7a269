use crate::palette::Palette;
use chrono::{NaiveDateTime, TimeDelta};
use logcatcolor_parser::LogLine;
use std::time::Duration;

/// what the renderer remembers between lines of one stream session
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderState {
    pub last_tag: String,
    /// timestamp of the last line whose metadata was printed in full
    pub last_timestamp: Option<NaiveDateTime>,
    pub last_other: String,
}

/// turns raw logcat lines into colorized, deduplicated output lines
///
/// Each renderer owns its state, so independent streams (one per device)
/// need one renderer each.
#[derive(Debug, Clone)]
pub struct Renderer {
    palette: Palette,
    max_delta: TimeDelta,
    state: RenderState,
}

impl Renderer {
    pub fn new(palette: Palette, max_delta: Duration) -> Self {
        Self {
            palette,
            max_delta: TimeDelta::from_std(max_delta).unwrap_or(TimeDelta::MAX),
            state: RenderState::default(),
        }
    }

    pub fn state(&self) -> &RenderState {
        &self.state
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    pub fn reset(&mut self) {
        self.state = RenderState::default();
    }

    /// render one line (without trailing newline)
    ///
    /// Lines that are not threadtime records come back unchanged and leave
    /// the state untouched.
    pub fn render(&mut self, raw: &str) -> String {
        let Some(line) = LogLine::parse(raw) else {
            log::trace!("Passing through unrecognized line");
            return raw.to_string();
        };

        let delta = self.state.last_timestamp.map(|last| line.timestamp - last);
        let metadata = match delta {
            Some(delta) if line.tag == self.state.last_tag && delta < self.max_delta => {
                let delta_text = format!("+{}", format_delta(delta));
                format!("{:<width$}", delta_text, width = line.level_offset)
            }
            _ => {
                self.state.last_timestamp = Some(line.timestamp);
                self.state.last_other.clone_from(&line.other);
                line.metadata().to_string()
            }
        };

        self.state.last_tag.clear();
        self.state.last_tag.push_str(line.tag);

        let level_code = line.level.code().to_string();
        format!(
            "{}{} {}{} : {}",
            metadata,
            self.palette.paint_level(line.level, &level_code),
            self.palette.paint_tag(line.tag),
            line.tag_padding,
            self.palette.paint_level(line.level, line.message),
        )
    }
}

/// compact duration text: `0s`, `250ms`, `1.5s`, `2m3.004s`, `1h0m0s`
pub fn format_delta(delta: TimeDelta) -> String {
    let sign = if delta < TimeDelta::zero() { "-" } else { "" };
    let abs = delta.abs();
    let secs = abs.num_seconds().unsigned_abs();
    let nanos = u64::from(abs.subsec_nanos().unsigned_abs());

    if secs == 0 {
        return match nanos {
            0 => "0s".to_string(),
            1..=999 => format!("{sign}{nanos}ns"),
            1_000..=999_999 => format!("{sign}{}µs", with_fraction(nanos / 1_000, nanos % 1_000, 3)),
            _ => format!(
                "{sign}{}ms",
                with_fraction(nanos / 1_000_000, nanos % 1_000_000, 6)
            ),
        };
    }

    let hours = secs / 3600;
    let minutes = secs % 3600 / 60;
    let seconds = with_fraction(secs % 60, nanos, 9);
    if hours > 0 {
        format!("{sign}{hours}h{minutes}m{seconds}s")
    } else if minutes > 0 {
        format!("{sign}{minutes}m{seconds}s")
    } else {
        format!("{sign}{seconds}s")
    }
}

fn with_fraction(whole: u64, fraction: u64, digits: usize) -> String {
    if fraction == 0 {
        return whole.to_string();
    }
    let fraction = format!("{fraction:0digits$}");
    format!("{whole}.{}", fraction.trim_end_matches('0'))
}
