use std::io::{self, BufRead, Write};

use libq8isa::{parse_word, Word, WordParseError};
use log::{debug, info};
use thiserror::Error;

#[cfg(test)]
mod tests;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Line {line}: {source} ({text:?})")]
    InvalidLine {
        line: usize,
        text: String,
        #[source]
        source: WordParseError,
    },

    #[error("Input ended while correcting line {line}")]
    EndOfInput { line: usize },

    #[error("Couldn't read program ({0})")]
    Io(#[from] io::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidLinePolicy {
    /// Fail on the first invalid line.
    Strict,
    /// Ask for a replacement until a valid one (or nothing, to skip the line) is given.
    Prompt,
}

/// An instruction word and the program file line it came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgramLine {
    pub line: usize,
    pub word: Word,
}

pub struct Loader<R, W> {
    policy: InvalidLinePolicy,
    input: R,
    output: W,
}

impl<R, W> Loader<R, W>
where
    R: BufRead,
    W: Write,
{
    /// `input` and `output` are only used for correction prompts.
    pub fn new(policy: InvalidLinePolicy, input: R, output: W) -> Self {
        Self {
            policy,
            input,
            output,
        }
    }

    /// Reads one token per line. Blank lines and `#` comments are skipped.
    pub fn load<S>(&mut self, source: S) -> Result<Vec<ProgramLine>, LoadError>
    where
        S: BufRead,
    {
        let mut program = Vec::new();

        for (index, text) in source.lines().enumerate() {
            let text = text?;
            let line = index + 1;

            let token = text.trim();
            if token.is_empty() || token.starts_with('#') {
                continue;
            }

            let word = match parse_word(token) {
                Ok(word) => Some(word),
                Err(e) => self.invalid_line(line, token, e)?,
            };

            if let Some(word) = word {
                debug!("Line {}: {:04X}", line, word);
                program.push(ProgramLine { line, word });
            }
        }

        Ok(program)
    }

    fn invalid_line(
        &mut self,
        line: usize,
        text: &str,
        source: WordParseError,
    ) -> Result<Option<Word>, LoadError> {
        match self.policy {
            InvalidLinePolicy::Strict => Err(LoadError::InvalidLine {
                line,
                text: text.to_string(),
                source,
            }),
            InvalidLinePolicy::Prompt => self.prompt_correction(line, text, source),
        }
    }

    fn prompt_correction(
        &mut self,
        line: usize,
        text: &str,
        error: WordParseError,
    ) -> Result<Option<Word>, LoadError> {
        writeln!(
            self.output,
            "Line {}: {:?} is not a valid instruction ({})",
            line, text, error
        )?;

        loop {
            write!(
                self.output,
                "Enter 4 hex digits for line {} (empty to skip): ",
                line
            )?;
            self.output.flush()?;

            let mut reply = String::new();
            if self.input.read_line(&mut reply)? == 0 {
                return Err(LoadError::EndOfInput { line });
            }

            let reply = reply.trim();
            if reply.is_empty() {
                info!("Skipping line {}", line);
                return Ok(None);
            }

            match parse_word(reply) {
                Ok(word) => {
                    info!("Line {} corrected to {:04X}", line, word);
                    return Ok(Some(word));
                }
                Err(e) => writeln!(self.output, "{:?} is not valid either ({})", reply, e)?,
            }
        }
    }
}
