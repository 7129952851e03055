use std::io::{empty, Cursor};

use libq8isa::WordParseError;

use super::{InvalidLinePolicy, LoadError, Loader, ProgramLine};

#[test]
fn skips_blank_lines_and_comments() -> Result<(), LoadError> {
    let source = "# load 5 into %10\n2a05\n\n   \n  C000  \n";

    let program = Loader::new(InvalidLinePolicy::Strict, empty(), Vec::new())
        .load(Cursor::new(source))?;

    assert_eq!(
        program,
        [
            ProgramLine {
                line: 2,
                word: 0x2A05
            },
            ProgramLine {
                line: 5,
                word: 0xC000
            },
        ]
    );

    Ok(())
}

#[test]
fn strict_fails_on_first_invalid_line() {
    let source = "2A05\n2A5\nXYZW\n";

    let result =
        Loader::new(InvalidLinePolicy::Strict, empty(), Vec::new()).load(Cursor::new(source));

    match result {
        Err(LoadError::InvalidLine { line, text, source }) => {
            assert_eq!(line, 2);
            assert_eq!(text, "2A5");
            assert_eq!(source, WordParseError::WrongLength { len: 3 });
        }
        other => panic!("Expected invalid line error, got {:?}", other),
    }
}

#[test]
fn prompt_replaces_invalid_line() -> Result<(), LoadError> {
    let source = "2A05\n1G00\n3A10\n";
    let replies = "nope\n1A00\n";
    let mut output = Vec::new();

    let program = Loader::new(InvalidLinePolicy::Prompt, Cursor::new(replies), &mut output)
        .load(Cursor::new(source))?;

    let words: Vec<_> = program.iter().map(|line| line.word).collect();
    assert_eq!(words, [0x2A05, 0x1A00, 0x3A10]);
    assert_eq!(program[1].line, 2);

    let output = String::from_utf8(output).unwrap();
    assert!(output.contains("Line 2: \"1G00\" is not a valid instruction"));
    assert!(output.contains("\"nope\" is not valid either"));

    Ok(())
}

#[test]
fn empty_reply_skips_line() -> Result<(), LoadError> {
    let source = "bad!\n2A05\n";

    let program =
        Loader::new(InvalidLinePolicy::Prompt, Cursor::new("\n"), Vec::new())
            .load(Cursor::new(source))?;

    assert_eq!(
        program,
        [ProgramLine {
            line: 2,
            word: 0x2A05
        }]
    );

    Ok(())
}

#[test]
fn end_of_input_while_prompting() {
    let result = Loader::new(InvalidLinePolicy::Prompt, empty(), Vec::new())
        .load(Cursor::new("2A05\n12345\n"));

    assert!(matches!(result, Err(LoadError::EndOfInput { line: 2 })));
}
