//! Command line parsing for the interactive prompt

use anyhow::{bail, Context, Result};

use crate::actions::CounterAction;

/// Parse one input line into an action
///
/// Returns `Ok(None)` for blank lines.
///
/// Accepted commands: `+`/`inc`, `-`/`dec`, `add <n>`, `reset`, `q`/`quit`/`exit`
pub fn parse_command(line: &str) -> Result<Option<CounterAction>> {
    let mut words = line.split_whitespace();
    let Some(command) = words.next() else {
        return Ok(None);
    };

    let action = match command.to_lowercase().as_str() {
        "+" | "inc" | "increment" => CounterAction::Increment,
        "-" | "dec" | "decrement" => CounterAction::Decrement,
        "reset" => CounterAction::Reset,
        "q" | "quit" | "exit" => CounterAction::Quit,
        "add" => {
            let amount = words.next().context("Usage: add <amount>")?;
            let amount = amount
                .parse::<i64>()
                .with_context(|| format!("Invalid amount: {}", amount))?;
            CounterAction::Add(amount)
        }
        other => bail!("Unknown command: {}", other),
    };

    if let Some(extra) = words.next() {
        bail!("Unexpected argument: {}", extra);
    }

    Ok(Some(action))
}
