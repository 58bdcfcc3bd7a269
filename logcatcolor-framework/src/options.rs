use crate::{palette::Palette, render::Renderer, session::RestartPolicy};
use crossterm::style::force_color_output;
use logcatcolor_parser::Level;
use std::{env, io::IsTerminal, str::FromStr, time::Duration};
use thiserror::Error;

// constants
pub const DEFAULT_MAX_DELTA: Duration = Duration::from_secs(10);
pub const DEFAULT_RESTART_DELAY: Duration = Duration::from_secs(1);
pub const DEFAULT_ADB_PATH: &str = "adb";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum OptionsError {
    #[error("invalid log level '{0}', expected one of V/D/I/W/E/F")]
    InvalidLevel(String),

    #[error("invalid duration '{0}', expected e.g. 10s, 500ms or 1m30s")]
    InvalidDuration(String),

    #[error("invalid color mode '{0}', expected auto, always or never")]
    InvalidColorMode(String),
}

/// which device adb should read from
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Device {
    /// let adb pick (fails when several devices are attached)
    #[default]
    Any,
    /// the only USB-attached device (`adb -d`)
    Usb,
    /// the only running emulator (`adb -e`)
    Emulator,
    /// a device by serial number (`adb -s SERIAL`)
    Serial(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorMode {
    /// color when stdout is a terminal and `NO_COLOR` is unset
    #[default]
    Auto,
    Always,
    Never,
}

impl ColorMode {
    /// whether output written to stdout should be colored
    pub fn resolve(self) -> bool {
        self.enabled_for(std::io::stdout().is_terminal())
    }

    /// whether a stream with the given terminal status should be colored
    ///
    /// `Always` also overrides crossterm's own `NO_COLOR` check, which would
    /// otherwise strip the colors but keep empty escape sequences.
    pub fn enabled_for(self, is_terminal: bool) -> bool {
        match self {
            Self::Always => {
                force_color_output(true);
                true
            }
            Self::Never => false,
            Self::Auto => is_terminal && env::var_os("NO_COLOR").is_none(),
        }
    }
}

impl FromStr for ColorMode {
    type Err = OptionsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "auto" => Ok(Self::Auto),
            "always" => Ok(Self::Always),
            "never" => Ok(Self::Never),
            _ => Err(OptionsError::InvalidColorMode(s.to_string())),
        }
    }
}

/// run configuration, built once and read-only afterwards
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Options {
    /// filter specs forwarded to adb, each as `-s FILTER`
    pub filters: Vec<String>,
    pub tag: Option<String>,
    pub level: Option<Level>,
    pub device: Device,
    /// same-tag lines closer than this collapse their metadata into a delta
    pub max_delta: Duration,
    /// restart the stream when adb exits
    pub keep_going: bool,
    pub color: ColorMode,
    pub adb_path: String,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            filters: Vec::new(),
            tag: None,
            level: None,
            device: Device::Any,
            max_delta: DEFAULT_MAX_DELTA,
            keep_going: false,
            color: ColorMode::Auto,
            adb_path: DEFAULT_ADB_PATH.to_string(),
        }
    }
}

impl Options {
    pub fn palette(&self) -> Palette {
        Palette::new().with_enabled(self.color.resolve())
    }

    /// a fresh renderer with empty state
    pub fn renderer(&self) -> Renderer {
        Renderer::new(self.palette(), self.max_delta)
    }

    pub fn restart_policy(&self) -> RestartPolicy {
        if self.keep_going {
            RestartPolicy::After(DEFAULT_RESTART_DELAY)
        } else {
            RestartPolicy::Never
        }
    }
}

/// single level letter, case-insensitive
pub fn parse_level(text: &str) -> Result<Level, OptionsError> {
    let mut chars = text.trim().chars();
    match (chars.next(), chars.next()) {
        (Some(code), None) => Level::from_code(code.to_ascii_uppercase())
            .ok_or_else(|| OptionsError::InvalidLevel(text.to_string())),
        _ => Err(OptionsError::InvalidLevel(text.to_string())),
    }
}

/// parse durations like `10s`, `500ms`, `1.5s`, `1m30s` or `2h`
///
/// Units: `ns`, `us`/`µs`, `ms`, `s`, `m`, `h`. A bare `0` is accepted.
pub fn parse_duration(text: &str) -> Result<Duration, OptionsError> {
    let invalid = || OptionsError::InvalidDuration(text.to_string());

    let s = text.trim();
    if s == "0" {
        return Ok(Duration::ZERO);
    }
    if s.is_empty() {
        return Err(invalid());
    }

    let mut total_nanos: u128 = 0;
    let mut rest = s;
    while !rest.is_empty() {
        let number_len = rest
            .find(|c: char| !(c.is_ascii_digit() || c == '.'))
            .unwrap_or(rest.len());
        let (number, tail) = rest.split_at(number_len);
        let unit_len = tail
            .find(|c: char| c.is_ascii_digit() || c == '.')
            .unwrap_or(tail.len());
        let (unit, tail) = tail.split_at(unit_len);

        let unit_nanos: u128 = match unit {
            "ns" => 1,
            "us" | "µs" | "μs" => 1_000,
            "ms" => 1_000_000,
            "s" => 1_000_000_000,
            "m" => 60_000_000_000,
            "h" => 3_600_000_000_000,
            _ => return Err(invalid()),
        };

        let (whole, fraction) = number.split_once('.').unwrap_or((number, ""));
        if whole.is_empty() && fraction.is_empty() {
            return Err(invalid());
        }
        let whole: u128 = if whole.is_empty() {
            0
        } else {
            whole.parse().map_err(|_| invalid())?
        };
        total_nanos += whole * unit_nanos;

        if !fraction.is_empty() {
            // digits past nanosecond precision cannot change the result
            let fraction = &fraction[..fraction.len().min(18)];
            let value: u128 = fraction.parse().map_err(|_| invalid())?;
            total_nanos += value * unit_nanos / 10u128.pow(fraction.len() as u32);
        }

        rest = tail;
    }

    u64::try_from(total_nanos)
        .map(Duration::from_nanos)
        .map_err(|_| invalid())
}
