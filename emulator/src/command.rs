use std::{
    error::Error,
    io::{self, BufRead, Write},
    str::FromStr,
};

use libq8isa::{parse_word, Byte, Word};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CommandError {
    // Not thrown directly by the arg reader
    #[error("Unknown command {0:?}")]
    UnknownCommand(String),

    #[error("Missing argument {0}")]
    MissingArgument(usize),

    #[error("Bad argument {index} ({message})")]
    ParseError { index: usize, message: String },

    #[error("{0} unused arguments")]
    UnusedArguments(usize),
}

pub struct Command(String);

impl Command {
    pub fn new<S>(line: S) -> Self
    where
        S: Into<String>,
    {
        Self(line.into())
    }

    /// Returns `None` once the input has ended.
    pub fn prompt<R, W>(input: &mut R, output: &mut W) -> io::Result<Option<Self>>
    where
        R: BufRead,
        W: Write,
    {
        write!(output, "> ")?;
        output.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            return Ok(None);
        }

        Ok(Some(Self::new(line)))
    }

    pub fn args(&self) -> CommandArgs<impl Iterator<Item = &str> + '_> {
        CommandArgs {
            iter: self.0.split_whitespace(),
            index: 0,
        }
    }
}

pub struct CommandArgs<I> {
    iter: I,
    index: usize,
}

impl<'a, I> CommandArgs<I>
where
    I: Iterator<Item = &'a str>,
{
    pub fn next(&mut self) -> Result<&'a str, CommandError> {
        self.index += 1;

        self.iter
            .next()
            .ok_or(CommandError::MissingArgument(self.index))
    }

    pub fn next_optional(&mut self) -> Option<&'a str> {
        self.next().ok()
    }

    pub fn next_parsed<T>(&mut self) -> Result<T, CommandError>
    where
        T: FromStr,
        <T as FromStr>::Err: Error + 'static,
    {
        let arg_str = self.next()?;
        self.parse(arg_str)
    }

    pub fn next_parsed_optional<T>(&mut self) -> Result<Option<T>, CommandError>
    where
        T: FromStr,
        <T as FromStr>::Err: Error + 'static,
    {
        self.next_optional()
            .map(|arg_str| self.parse(arg_str))
            .transpose()
    }

    pub fn next_word(&mut self) -> Result<Word, CommandError> {
        let arg_str = self.next()?;
        parse_word(arg_str).map_err(|e| self.parse_error(e))
    }

    /// A byte given in hex, with or without a `0x` prefix.
    pub fn next_byte(&mut self) -> Result<Byte, CommandError> {
        let arg_str = self.next()?;
        self.parse_byte(arg_str)
    }

    pub fn next_byte_optional(&mut self) -> Result<Option<Byte>, CommandError> {
        self.next_optional()
            .map(|arg_str| self.parse_byte(arg_str))
            .transpose()
    }

    pub fn finish(self) -> Result<(), CommandError> {
        match self.iter.count() {
            0 => Ok(()),
            unused => Err(CommandError::UnusedArguments(unused)),
        }
    }

    fn parse<T>(&self, arg_str: &str) -> Result<T, CommandError>
    where
        T: FromStr,
        <T as FromStr>::Err: Error + 'static,
    {
        T::from_str(arg_str).map_err(|e| self.parse_error(e))
    }

    fn parse_byte(&self, arg_str: &str) -> Result<Byte, CommandError> {
        let digits = arg_str.trim_start_matches("0x");
        Byte::from_str_radix(digits, 16).map_err(|e| self.parse_error(e))
    }

    fn parse_error<E>(&self, e: E) -> CommandError
    where
        E: Error,
    {
        CommandError::ParseError {
            index: self.index,
            message: e.to_string(),
        }
    }
}
