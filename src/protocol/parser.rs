//! Command parser.
//!
//! Parses incoming protocol commands from raw text into structured
//! `Command` variants that the main loop can dispatch on.

use log::warn;

use crate::board::province::Nation;

/// A parsed command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Synchronization ping; the engine replies `readyok`.
    IsReady,

    /// Set a game option: `setoption name <id> [value <x>]`.
    SetOption { name: String, value: Option<String> },

    /// Start a new game from the configured variant's starting position.
    NewGame,

    /// Submit one or more orders, separated by `;`.
    Order { text: String },

    /// Adjudicate the current phase and advance to the next one.
    Next,

    /// Print the resolution of every order from the last adjudication.
    Resolutions,

    /// Print the board as a one-line JSON snapshot.
    Dump,

    /// Replace the board with a JSON snapshot.
    Load { json: String },

    /// Print the legal orders for a nation.
    Options { nation: Nation },

    /// Print the inconsistencies in a nation's submitted orders.
    Check { nation: Nation },

    /// Print the adjustment summary for a nation.
    Messages { nation: Nation },

    /// Print the current phase and, if there is one, the winner.
    Status,

    /// Terminate the process.
    Quit,
}

/// Parses a single line of input into a `Command`.
///
/// Returns `None` for empty lines or unrecognized commands. Malformed
/// arguments for known commands also return `None` after logging a warning.
pub fn parse_command(line: &str) -> Option<Command> {
    let trimmed = line.trim();
    let tokens: Vec<&str> = trimmed.split_whitespace().collect();
    let first = *tokens.first()?;

    match first {
        "isready" => Some(Command::IsReady),
        "quit" => Some(Command::Quit),
        "newgame" => Some(Command::NewGame),
        "next" => Some(Command::Next),
        "resolutions" => Some(Command::Resolutions),
        "dump" => Some(Command::Dump),
        "status" => Some(Command::Status),

        "setoption" => parse_setoption(&tokens),
        "order" => rest(trimmed, first).map(|text| Command::Order { text }),
        "load" => rest(trimmed, first).map(|json| Command::Load { json }),
        "options" => parse_nation(&tokens).map(|nation| Command::Options { nation }),
        "check" => parse_nation(&tokens).map(|nation| Command::Check { nation }),
        "messages" => parse_nation(&tokens).map(|nation| Command::Messages { nation }),

        other => {
            warn!("unknown command: {}", other);
            None
        }
    }
}

/// Everything after the command word, which must not be empty.
fn rest(line: &str, command: &str) -> Option<String> {
    let rest = line.strip_prefix(command).unwrap_or_default().trim();
    if rest.is_empty() {
        warn!("malformed {}: missing argument", command);
        return None;
    }
    Some(rest.to_string())
}

/// Parses `<command> <nation>`.
fn parse_nation(tokens: &[&str]) -> Option<Nation> {
    match tokens {
        [_, nation] => Some(Nation::from(*nation)),
        _ => {
            warn!("malformed {}: expected '{} <nation>'", tokens[0], tokens[0]);
            None
        }
    }
}

/// Parses `setoption name <id> [value <x>]`.
fn parse_setoption(tokens: &[&str]) -> Option<Command> {
    if tokens.len() < 3 || tokens[1] != "name" {
        warn!("malformed setoption: expected 'setoption name <id> [value <x>]'");
        return None;
    }

    let value_idx = tokens.iter().position(|&t| t == "value");

    let (name, value) = match value_idx {
        Some(vi) => {
            let name_parts = &tokens[2..vi];
            let value_parts = &tokens[vi + 1..];
            if name_parts.is_empty() {
                warn!("malformed setoption: empty name");
                return None;
            }
            let name = name_parts.join(" ");
            let value = if value_parts.is_empty() {
                None
            } else {
                Some(value_parts.join(" "))
            };
            (name, value)
        }
        None => (tokens[2..].join(" "), None),
    };

    Some(Command::SetOption { name, value })
}
