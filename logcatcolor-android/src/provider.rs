use crate::command::adb_args;
use anyhow::{Context, Result};
use logcatcolor_framework::{LogProvider, Options, decode_line};
use std::process::Stdio;
use tokio::io::{AsyncBufReadExt, BufReader, Split};
use tokio::process::{Child, ChildStdout, Command};
use tokio::runtime::{Builder, Runtime};

/// log provider for Android device logs (adb logcat)
///
/// Each provider runs adb once; the supervisor builds a new one to restart.
pub struct AndroidLogProvider {
    adb_path: String,
    args: Vec<String>,
    runtime: Option<Runtime>,
    child: Option<Child>,
    reader: Option<Split<BufReader<ChildStdout>>>,
    reached_eof: bool,
}

impl AndroidLogProvider {
    pub fn new(options: &Options) -> Self {
        Self {
            adb_path: options.adb_path.clone(),
            args: adb_args(options),
            runtime: None,
            child: None,
            reader: None,
            reached_eof: false,
        }
    }

    /// the full command, for diagnostics
    pub fn command_line(&self) -> String {
        let mut parts = vec![self.adb_path.as_str()];
        parts.extend(self.args.iter().map(String::as_str));
        parts.join(" ")
    }
}

impl LogProvider for AndroidLogProvider {
    fn start(&mut self) -> Result<()> {
        log::debug!("AndroidLogProvider: Starting `{}`", self.command_line());

        // a current-thread runtime is enough: only this thread ever awaits the child
        let runtime = Builder::new_current_thread()
            .enable_all()
            .build()
            .context("Failed to create tokio runtime")?;

        let mut child = {
            let _guard = runtime.enter();
            Command::new(&self.adb_path)
                .args(&self.args)
                .stdout(Stdio::piped())
                .stderr(Stdio::inherit())
                .kill_on_drop(true)
                .spawn()
                .with_context(|| format!("Error starting {}", self.command_line()))?
        };

        let stdout = child
            .stdout
            .take()
            .context("Error creating stdout pipe")?;

        self.reader = Some(BufReader::new(stdout).split(b'\n'));
        self.child = Some(child);
        self.runtime = Some(runtime);
        self.reached_eof = false;

        log::debug!("Android device connected, streaming logs...");
        Ok(())
    }

    fn stop(&mut self) -> Result<()> {
        log::debug!("AndroidLogProvider: Stopping");

        self.reader = None;

        if let (Some(runtime), Some(mut child)) = (self.runtime.as_ref(), self.child.take()) {
            // adb may still be running after a read error
            if !self.reached_eof
                && let Err(e) = child.start_kill()
            {
                log::debug!("Failed to kill adb logcat: {}", e);
            }

            match runtime.block_on(child.wait()) {
                Ok(status) if status.success() => log::debug!("adb logcat exited normally"),
                Ok(status) => log::error!("Error waiting for adb logcat: {}", status),
                Err(e) => log::error!("Error waiting for adb logcat: {}", e),
            }
        }

        self.runtime = None;
        Ok(())
    }

    fn next_line(&mut self) -> Result<Option<String>> {
        let (Some(runtime), Some(reader)) = (self.runtime.as_ref(), self.reader.as_mut()) else {
            return Ok(None);
        };

        let segment = runtime
            .block_on(reader.next_segment())
            .context("Error reading logcat output")?;

        match segment {
            Some(bytes) => Ok(Some(decode_line(&bytes))),
            None => {
                log::debug!("adb logcat stream ended, device disconnected");
                self.reached_eof = true;
                Ok(None)
            }
        }
    }
}
