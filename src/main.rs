//! Adjudicator: reads commands from stdin and writes responses to stdout.
//!
//! An optional first argument names a JSON config file. Set `RUST_LOG` to
//! see what the resolver is doing on stderr.

use std::io::{self, BufRead, Write};
use std::process::ExitCode;

use log::error;

use adjudicator::config::Config;
use adjudicator::engine::Engine;
use adjudicator::error::Result;
use adjudicator::protocol::parser::{parse_command, Command};

/// Handles one command. Returns `false` once the loop should stop.
fn dispatch<W: Write>(engine: &mut Engine, cmd: Command, out: &mut W) -> Result<bool> {
    match cmd {
        Command::IsReady => engine.handle_isready(out)?,
        Command::SetOption { name, value } => engine.set_option(&name, value.as_deref())?,
        Command::NewGame => engine.new_game()?,
        Command::Order { text } => engine.submit(&text)?,
        Command::Next => engine.handle_next(out)?,
        Command::Resolutions => engine.handle_resolutions(out)?,
        Command::Dump => engine.handle_dump(out)?,
        Command::Load { json } => engine.load(&json)?,
        Command::Options { nation } => engine.handle_options(&nation, out)?,
        Command::Check { nation } => engine.handle_check(&nation, out)?,
        Command::Messages { nation } => engine.handle_messages(&nation, out)?,
        Command::Status => engine.handle_status(out)?,
        Command::Quit => return Ok(false),
    }
    Ok(true)
}

fn run() -> Result<()> {
    let config = match std::env::args().nth(1) {
        Some(path) => Config::from_path(path)?,
        None => Config::default(),
    };
    let mut engine = Engine::new(config)?;

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut out = io::BufWriter::new(stdout.lock());

    for line in stdin.lock().lines() {
        let line = line?;
        let Some(cmd) = parse_command(&line) else {
            continue;
        };
        match dispatch(&mut engine, cmd, &mut out) {
            Ok(true) => {}
            Ok(false) => break,
            Err(e) => {
                error!("{}: {}", line.trim(), e);
                writeln!(out, "error {}", e)?;
                out.flush()?;
            }
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
