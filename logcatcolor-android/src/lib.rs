mod command;
mod provider;

pub use command::{adb_args, check_adb_available};
pub use provider::AndroidLogProvider;
