use crate::{parse_word, WordParseError};

#[test]
fn parses_most_significant_digit_first() {
    assert_eq!(parse_word("2A05"), Ok(0x2A05));
    assert_eq!(parse_word("0001"), Ok(0x0001));
    assert_eq!(parse_word("FFFF"), Ok(0xFFFF));
}

#[test]
fn accepts_either_case() {
    assert_eq!(parse_word("abCD"), parse_word("ABCD"));
    assert_eq!(parse_word("beef"), Ok(0xBEEF));
}

#[test]
fn rejects_wrong_lengths() {
    assert_eq!(parse_word(""), Err(WordParseError::WrongLength { len: 0 }));
    assert_eq!(parse_word("123"), Err(WordParseError::WrongLength { len: 3 }));
    assert_eq!(
        parse_word("12345"),
        Err(WordParseError::WrongLength { len: 5 })
    );
    // Not trimmed, that's up to the caller.
    assert_eq!(
        parse_word(" 1234"),
        Err(WordParseError::WrongLength { len: 5 })
    );
}

#[test]
fn rejects_non_hex_digits() {
    assert_eq!(
        parse_word("12G4"),
        Err(WordParseError::InvalidDigit {
            position: 2,
            found: 'G'
        })
    );
    assert_eq!(
        parse_word("+123"),
        Err(WordParseError::InvalidDigit {
            position: 0,
            found: '+'
        })
    );
}
