//! The commit flow: diff, draft, assemble, review, commit

use anyhow::Result;
use llm_client::LlmProvider;
use std::io::{BufRead, Write};

use crate::confirm::{self, ClipboardSink};
use crate::git::{self, Vcs};
use crate::llm::{GenerationError, MessageGenerator};
use crate::message;

/// How a run ended. None of these is an error exit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    NoChanges,
    Cancelled,
    Committed,
    CommitFailed,
}

pub struct Pipeline<'a, V: Vcs, P: LlmProvider> {
    vcs: &'a V,
    generator: &'a MessageGenerator<P>,
    exclude: &'a [String],
}

impl<'a, V: Vcs, P: LlmProvider> Pipeline<'a, V, P> {
    pub fn new(vcs: &'a V, generator: &'a MessageGenerator<P>, exclude: &'a [String]) -> Self {
        Self {
            vcs,
            generator,
            exclude,
        }
    }

    /// Run the flow once. Only console I/O errors are returned; git and
    /// generation failures are reported and folded into the outcome.
    pub async fn run<C, R, W>(
        &self,
        prefix: &str,
        clipboard: Option<&mut C>,
        input: &mut R,
        output: &mut W,
    ) -> Result<Outcome>
    where
        C: ClipboardSink,
        R: BufRead,
        W: Write,
    {
        let diff = git::collect_diff(self.vcs, self.exclude);
        if diff.is_empty() {
            writeln!(output, "No changes to commit.")?;
            return Ok(Outcome::NoChanges);
        }

        writeln!(
            output,
            "Generating commit message with {}",
            self.generator.provider().name()
        )?;

        let generated = match self.generator.generate(&diff).await {
            Ok(generated) => generated,
            Err(e) => {
                match &e {
                    GenerationError::Empty => log::warn!("Failed to generate a commit message: {}", e),
                    GenerationError::Request(_) => log::error!("Error generating commit message: {}", e),
                }
                e.fallback_message().to_string()
            }
        };

        let final_message = message::assemble(&generated, prefix);

        if !confirm::confirm(&final_message, clipboard, input, output)? {
            writeln!(output, "Commit cancelled.")?;
            return Ok(Outcome::Cancelled);
        }

        match self.vcs.commit(&final_message) {
            Ok(()) => {
                writeln!(output, "Commit successfully made.")?;
                Ok(Outcome::Committed)
            }
            Err(e) => {
                log::error!("Error performing commit: {:#}", e);
                Ok(Outcome::CommitFailed)
            }
        }
    }
}
