//! Review step: clipboard copy, framed display, and the y/n gate

use anyhow::{Context, Result};
use arboard::Clipboard;
use std::io::{BufRead, Write};

pub const AFFIRMATIVE: &str = "y";

/// Destination for the final message before review
pub trait ClipboardSink {
    fn copy(&mut self, text: &str) -> Result<()>;
}

/// The system clipboard
#[derive(Debug, Default)]
pub struct SystemClipboard;

impl ClipboardSink for SystemClipboard {
    fn copy(&mut self, text: &str) -> Result<()> {
        let mut clipboard = Clipboard::new().context("Clipboard unavailable")?;
        clipboard
            .set_text(text)
            .context("Failed to write to clipboard")?;
        Ok(())
    }
}

/// True only for a "y" answer, ignoring case and surrounding whitespace
pub fn is_affirmative(answer: &str) -> bool {
    answer.trim().to_lowercase() == AFFIRMATIVE
}

/// Show `message` and ask once whether to commit it.
///
/// The message is first copied to `clipboard` when one is given; a copy
/// failure is logged and the review continues. Returns `Ok(true)` only for an
/// affirmative answer. End of input or an unreadable line counts as "no".
pub fn confirm<C, R, W>(
    message: &str,
    clipboard: Option<&mut C>,
    input: &mut R,
    output: &mut W,
) -> Result<bool>
where
    C: ClipboardSink,
    R: BufRead,
    W: Write,
{
    if let Some(clipboard) = clipboard {
        match clipboard.copy(message) {
            Ok(()) => writeln!(output, "Commit message copied to clipboard.")?,
            Err(e) => log::warn!("Could not copy commit message: {:#}", e),
        }
    }

    writeln!(output)?;
    writeln!(output, "--- commit ---")?;
    writeln!(output, "{}", message)?;
    writeln!(output, "--------------")?;
    writeln!(output)?;
    write!(output, "Do you want to perform the commit? (y/n): ")?;
    output.flush()?;

    let mut answer = String::new();
    if let Err(e) = input.read_line(&mut answer) {
        log::warn!("Failed to read confirmation: {}", e);
        return Ok(false);
    }

    Ok(is_affirmative(&answer))
}
