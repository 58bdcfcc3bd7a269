use anyhow::{Result, anyhow};
use clap::Parser;
use logcatcolor_android::{AndroidLogProvider, check_adb_available};
use logcatcolor_framework::{
    ColorMode, Options, Palette, ReaderProvider, Supervisor, run_session,
};
use logcatcolor_parser::Level;
use simplelog::{ColorChoice, ConfigBuilder, LevelFilter, TermLogger, TerminalMode};
use std::io::{self, IsTerminal, Write};
use std::process::ExitCode;

mod cli;

use cli::Cli;

fn log_level(verbose: u8) -> LevelFilter {
    match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

fn setup_logger(verbose: u8) {
    // diagnostics go to stderr so they never mix with the rendered stream
    let config = ConfigBuilder::new()
        .add_filter_allow_str("logcatcolor")
        .set_time_level(LevelFilter::Off)
        .build();

    if TermLogger::init(
        log_level(verbose),
        config,
        TerminalMode::Stderr,
        ColorChoice::Auto,
    )
    .is_err()
    {
        eprintln!("Failed to initialize logger");
    }
}

fn run_adb(options: &Options, out: &mut impl Write) -> Result<()> {
    let supervisor = Supervisor::new(options.restart_policy());
    let sessions = supervisor.run(
        || AndroidLogProvider::new(options),
        || options.renderer(),
        out,
    )?;
    log::debug!("Finished after {} adb sessions", sessions);
    Ok(())
}

fn run_stdin(options: &Options, out: &mut impl Write) -> Result<()> {
    let mut provider = ReaderProvider::new(io::BufReader::new(io::stdin()));
    let mut renderer = options.renderer();
    let lines = run_session(&mut provider, &mut renderer, out)?;
    log::debug!("Rendered {} lines from stdin", lines);
    Ok(())
}

fn is_broken_pipe(err: &anyhow::Error) -> bool {
    err.chain().any(|cause| {
        cause
            .downcast_ref::<io::Error>()
            .is_some_and(|e| e.kind() == io::ErrorKind::BrokenPipe)
    })
}

/// fatal error line for stderr, colored only when stderr itself is a terminal
fn error_report(err: &anyhow::Error, color: ColorMode, stderr_is_terminal: bool) -> String {
    let message = format!("Error: {:#}", err);
    let palette = Palette::new().with_enabled(color.enabled_for(stderr_is_terminal));
    palette.paint_level(Level::Error, &message)
}

fn main() -> Result<ExitCode> {
    color_eyre::install().or(Err(anyhow!("Error installing color_eyre")))?;

    let cli = Cli::parse();
    setup_logger(cli.verbose);

    let options = cli.to_options();
    log::debug!("Options: {:?}", options);

    if !cli.stdin
        && let Err(e) = check_adb_available(&options.adb_path)
    {
        eprintln!("{}", e);
        return Ok(ExitCode::FAILURE);
    }

    let mut stdout = io::stdout().lock();
    let result = if cli.stdin {
        run_stdin(&options, &mut stdout)
    } else {
        run_adb(&options, &mut stdout)
    };

    match result {
        Ok(()) => Ok(ExitCode::SUCCESS),
        // the reader went away (e.g. piped into `head`)
        Err(e) if is_broken_pipe(&e) => Ok(ExitCode::SUCCESS),
        Err(e) => {
            eprintln!(
                "{}",
                error_report(&e, options.color, io::stderr().is_terminal())
            );
            Ok(ExitCode::FAILURE)
        }
    }
}
