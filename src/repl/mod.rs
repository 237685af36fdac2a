//! REPL Module
//!
//! Reads newline-delimited commands and dispatches them to a [`Session`].

mod commands;

use std::io::Write;

use anyhow::Result;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::warn;

pub use commands::{
    catch_succeeds, default_commands, Command, CommandKind, Flow, Session, CATCH_THRESHOLD,
};

pub const PROMPT: &str = "Pokedex > ";

/// Lowercases `input` and splits it into words.
pub fn clean_input(input: &str) -> Vec<String> {
    input
        .split_whitespace()
        .map(|word| word.to_lowercase())
        .collect()
}

/// Runs the prompt loop until `exit` or end of input.
///
/// Command failures are printed and the loop carries on; only I/O errors on
/// `input`/`out` end it early.
pub async fn run<R, W>(session: &mut Session, input: R, out: &mut W) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let mut lines = input.lines();

    loop {
        write!(out, "{}", PROMPT)?;
        out.flush()?;

        let Some(line) = lines.next_line().await? else {
            writeln!(out)?;
            break;
        };

        let words = clean_input(&line);
        let Some((name, args)) = words.split_first() else {
            continue;
        };

        match session.execute(name, args, out).await {
            Ok(Flow::Exit) => break,
            Ok(Flow::Continue) => {}
            Err(e) => {
                warn!(command = %name, "Command failed: {:#}", e);
                writeln!(out, "Error: {:#}", e)?;
            }
        }
    }

    Ok(())
}
