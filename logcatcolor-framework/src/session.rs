use crate::{provider::LogProvider, render::Renderer};
use anyhow::{Context, Result};
use std::{
    io::Write,
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
    thread,
    time::Duration,
};

/// what to do when a session's stream ends
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RestartPolicy {
    Never,
    /// start a new session after the given delay
    After(Duration),
}

/// Stream one provider through one renderer into `out`.
///
/// Lines are handled one at a time: read, render, write. A read error ends the
/// session like end-of-stream does; start and write errors are returned.
/// Returns the number of lines written.
pub fn run_session<P, W>(provider: &mut P, renderer: &mut Renderer, out: &mut W) -> Result<u64>
where
    P: LogProvider + ?Sized,
    W: Write + ?Sized,
{
    provider.start()?;
    log::debug!("Session started");

    let result = pump_lines(provider, renderer, out);

    if let Err(e) = provider.stop() {
        log::error!("Failed to stop log provider: {:#}", e);
    }

    if let Ok(count) = &result {
        log::debug!("Session ended after {} lines", count);
    }
    result
}

fn pump_lines<P, W>(provider: &mut P, renderer: &mut Renderer, out: &mut W) -> Result<u64>
where
    P: LogProvider + ?Sized,
    W: Write + ?Sized,
{
    let mut count = 0;
    loop {
        match provider.next_line() {
            Ok(Some(line)) => {
                writeln!(out, "{}", renderer.render(&line)).context("Error writing output")?;
                count += 1;
            }
            Ok(None) => break,
            Err(e) => {
                log::error!("{:#}", e);
                break;
            }
        }
    }
    out.flush().context("Error writing output")?;
    Ok(count)
}

/// Runs sessions back to back according to a [`RestartPolicy`].
///
/// Every session gets a new provider and a new renderer, so no render state
/// survives a restart.
pub struct Supervisor {
    policy: RestartPolicy,
    should_stop: Arc<AtomicBool>,
}

impl Supervisor {
    pub fn new(policy: RestartPolicy) -> Self {
        Self {
            policy,
            should_stop: Arc::new(AtomicBool::new(false)),
        }
    }

    /// set to `true` to stop restarting once the current session ends
    pub fn stop_signal(&self) -> Arc<AtomicBool> {
        self.should_stop.clone()
    }

    /// Returns the number of sessions that ran.
    pub fn run<P, W>(
        &self,
        mut make_provider: impl FnMut() -> P,
        mut make_renderer: impl FnMut() -> Renderer,
        out: &mut W,
    ) -> Result<u64>
    where
        P: LogProvider,
        W: Write + ?Sized,
    {
        let mut sessions = 0;
        loop {
            let mut provider = make_provider();
            let mut renderer = make_renderer();
            run_session(&mut provider, &mut renderer, out)?;
            sessions += 1;

            let RestartPolicy::After(delay) = self.policy else {
                return Ok(sessions);
            };
            if self.should_stop.load(Ordering::Relaxed) {
                return Ok(sessions);
            }

            thread::sleep(delay);
            if self.should_stop.load(Ordering::Relaxed) {
                return Ok(sessions);
            }
            log::warn!("adb logcat exited, restarting...");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{palette::Palette, provider::ReaderProvider};
    use anyhow::anyhow;
    use std::io::Cursor;

    const LINES: &str = "04-19 19:34:18.813  5587  5708 I artd    : first\n\
                         --------- beginning of main\n\
                         04-19 19:34:18.814  5587  5708 I artd    : second\n";

    fn renderer() -> Renderer {
        Renderer::new(Palette::plain(), Duration::from_secs(10))
    }

    fn reader(text: &str) -> ReaderProvider<Cursor<Vec<u8>>> {
        ReaderProvider::new(Cursor::new(text.as_bytes().to_vec()))
    }

    struct FailingProvider {
        lines: Vec<Result<String>>,
        fail_start: bool,
        stopped: bool,
    }

    impl LogProvider for FailingProvider {
        fn start(&mut self) -> Result<()> {
            if self.fail_start {
                return Err(anyhow!("Failed to spawn adb"));
            }
            Ok(())
        }

        fn stop(&mut self) -> Result<()> {
            self.stopped = true;
            Ok(())
        }

        fn next_line(&mut self) -> Result<Option<String>> {
            if self.lines.is_empty() {
                return Ok(None);
            }
            self.lines.remove(0).map(Some)
        }
    }

    #[test]
    fn test_session_renders_every_line() {
        let mut out = Vec::new();
        let mut renderer = renderer();
        let count = run_session(&mut reader(LINES), &mut renderer, &mut out).unwrap();
        assert_eq!(count, 3);

        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(
            lines[0],
            "04-19 19:34:18.813  5587  5708 I artd     : first"
        );
        assert_eq!(lines[1], "--------- beginning of main");
        assert!(lines[2].starts_with("+1ms"));
        assert!(lines[2].ends_with("I artd     : second"));
    }

    #[test]
    fn test_read_error_ends_session() {
        let mut provider = FailingProvider {
            lines: vec![
                Ok("plain".to_string()),
                Err(anyhow!("Error reading logcat output")),
                Ok("never seen".to_string()),
            ],
            fail_start: false,
            stopped: false,
        };
        let mut out = Vec::new();
        let count = run_session(&mut provider, &mut renderer(), &mut out).unwrap();
        assert_eq!(count, 1);
        assert!(provider.stopped);
        assert_eq!(String::from_utf8(out).unwrap(), "plain\n");
    }

    #[test]
    fn test_start_error_is_returned() {
        let mut provider = FailingProvider {
            lines: Vec::new(),
            fail_start: true,
            stopped: false,
        };
        let mut out = Vec::new();
        assert!(run_session(&mut provider, &mut renderer(), &mut out).is_err());
        assert!(!provider.stopped);
    }

    #[test]
    fn test_no_restart_runs_once() {
        let supervisor = Supervisor::new(RestartPolicy::Never);
        let mut out = Vec::new();
        let sessions = supervisor
            .run(|| reader(LINES), renderer, &mut out)
            .unwrap();
        assert_eq!(sessions, 1);
    }

    #[test]
    fn test_restart_starts_with_fresh_state() {
        let supervisor = Supervisor::new(RestartPolicy::After(Duration::ZERO));
        let stop = supervisor.stop_signal();
        let mut made = 0;
        let mut out = Vec::new();

        let sessions = supervisor
            .run(
                || {
                    made += 1;
                    if made == 2 {
                        stop.store(true, Ordering::Relaxed);
                    }
                    reader("04-19 19:34:18.813  5587  5708 I artd    : hello\n")
                },
                renderer,
                &mut out,
            )
            .unwrap();
        assert_eq!(sessions, 2);

        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        // same tag and timestamp, but the second session must not dedup
        assert_eq!(lines[0], lines[1]);
        assert!(lines[1].starts_with("04-19 19:34:18.813"));
    }

    #[test]
    fn test_restart_stops_on_fatal_start_error() {
        let supervisor = Supervisor::new(RestartPolicy::After(Duration::ZERO));
        let mut out = Vec::new();
        let result = supervisor.run(
            || FailingProvider {
                lines: Vec::new(),
                fail_start: true,
                stopped: false,
            },
            renderer,
            &mut out,
        );
        assert!(result.is_err());
    }
}
