use thiserror::Error;

use crate::Word;

#[cfg(test)]
mod tests;

pub const HEX_DIGITS_PER_WORD: usize = 4;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum WordParseError {
    #[error("Expected 4 hex digits, got {len} characters")]
    WrongLength { len: usize },

    #[error("Invalid hex digit {found:?} at position {position}")]
    InvalidDigit { position: usize, found: char },
}

/// Parses an instruction token of exactly four hex digits, most significant digit first.
/// Both cases are accepted. Whitespace is not trimmed.
pub fn parse_word(token: &str) -> Result<Word, WordParseError> {
    let len = token.chars().count();
    if len != HEX_DIGITS_PER_WORD {
        return Err(WordParseError::WrongLength { len });
    }

    token
        .chars()
        .enumerate()
        .try_fold(0, |word: Word, (position, found)| {
            let digit = found
                .to_digit(16)
                .ok_or(WordParseError::InvalidDigit { position, found })?;

            Ok(word << 4 | digit as Word)
        })
}
