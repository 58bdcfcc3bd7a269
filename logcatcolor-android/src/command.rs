use logcatcolor_framework::{Device, Options};
use std::io;
use std::process::Command;

/// arguments for `adb`, e.g. `-s SERIAL logcat -v threadtime TAG:W -s FILTER`
pub fn adb_args(options: &Options) -> Vec<String> {
    let mut args: Vec<String> = Vec::new();

    match &options.device {
        Device::Any => {}
        Device::Usb => args.push("-d".to_string()),
        Device::Emulator => args.push("-e".to_string()),
        Device::Serial(serial) => {
            args.push("-s".to_string());
            args.push(serial.clone());
        }
    }

    args.extend(["logcat", "-v", "threadtime"].map(String::from));

    // adb only understands TAG:LEVEL as a pair
    if let (Some(tag), Some(level)) = (&options.tag, options.level) {
        args.push(format!("{}:{}", tag, level.code()));
    }

    for filter in &options.filters {
        args.push("-s".to_string());
        args.push(filter.clone());
    }

    args
}

pub fn check_adb_available(adb_path: &str) -> io::Result<()> {
    // try to execute adb version to check if it's available
    match Command::new(adb_path).arg("version").output() {
        Ok(_) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Err(io::Error::new(
            io::ErrorKind::NotFound,
            format!(
                "Error: '{adb_path}' not found in PATH.\n\
                 \n\
                 logcatcolor reads device logs through adb, which ships with the Android SDK Platform-Tools.\n\
                 \n\
                 Installation instructions:\n\
                 - macOS: brew install android-platform-tools\n\
                 - Linux: apt-get install android-tools-adb (Ubuntu/Debian)\n\
                 - Linux: yum install android-tools (CentOS/RHEL)\n\
                 - Windows: Download from https://developer.android.com/studio/releases/platform-tools\n\
                 \n\
                 Use --adb or the ADB environment variable to point at a different executable."
            ),
        )),
        Err(e) => Err(e),
    }
}
