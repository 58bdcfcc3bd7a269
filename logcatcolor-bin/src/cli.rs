use clap::{ArgAction, Parser};
use logcatcolor_framework::{ColorMode, Device, Options, parse_duration, parse_level};
use logcatcolor_parser::Level;
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(
    name = "logcatcolor",
    version,
    about = "Colorized, deduplicated adb logcat",
    long_about = "Streams `adb logcat -v threadtime` and prints each line with its level \
                  colored. Consecutive lines from the same tag show the time since the last \
                  full line instead of repeating date, time, pid and tid."
)]
pub struct Cli {
    /// Filter spec passed to adb as `-s FILTER` (repeatable)
    #[arg(short = 's', value_name = "FILTER")]
    pub filters: Vec<String>,

    /// Filter by tag (used together with -l)
    #[arg(short = 't', value_name = "TAG")]
    pub tag: Option<String>,

    /// Filter by log level (V/D/I/W/E/F)
    #[arg(short = 'l', value_name = "LEVEL", value_parser = parse_level)]
    pub level: Option<Level>,

    /// Device serial number; a bare -d selects the USB device
    #[arg(
        short = 'd',
        value_name = "SERIAL",
        num_args = 0..=1,
        default_missing_value = ""
    )]
    pub device: Option<String>,

    /// Use the default emulator
    #[arg(short = 'e')]
    pub emulator: bool,

    /// Maximum time difference shown as a delta instead of full metadata
    #[arg(long, value_name = "DURATION", value_parser = parse_duration, default_value = "10s")]
    pub delta: Duration,

    /// Restart adb logcat when it exits
    #[arg(short = 'k')]
    pub keep_going: bool,

    /// When to color output
    #[arg(long, value_name = "WHEN", default_value = "auto")]
    pub color: ColorMode,

    /// adb executable
    #[arg(long, value_name = "PATH", env = "ADB", default_value = "adb")]
    pub adb: String,

    /// Read logcat output from stdin instead of running adb
    #[arg(long)]
    pub stdin: bool,

    /// Diagnostic verbosity on stderr (-v, -vv, -vvv)
    #[arg(short = 'v', action = ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    pub fn device(&self) -> Device {
        if self.emulator {
            return Device::Emulator;
        }
        match self.device.as_deref() {
            None => Device::Any,
            Some("") => Device::Usb,
            Some(serial) => Device::Serial(serial.to_string()),
        }
    }

    pub fn to_options(&self) -> Options {
        Options {
            filters: self.filters.clone(),
            tag: self.tag.clone().filter(|tag| !tag.is_empty()),
            level: self.level,
            device: self.device(),
            max_delta: self.delta,
            keep_going: self.keep_going,
            color: self.color,
            adb_path: self.adb.clone(),
        }
    }
}
