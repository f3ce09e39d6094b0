use calc_core::environment::prelude::{Value, FALSE, TRUE};

use super::{classify, format_values, Line, MAX_CODE_LENGTH};

#[test]
fn test_commands() {
    assert_eq!(Line::Skip, classify("", MAX_CODE_LENGTH));
    assert_eq!(Line::Exit, classify(".exit", MAX_CODE_LENGTH));
    assert_eq!(Line::ShowStore, classify(".vars", MAX_CODE_LENGTH));
    assert_eq!(Line::Source, classify("x = 1", MAX_CODE_LENGTH));
    assert_eq!(Line::Source, classify(" .exit", MAX_CODE_LENGTH));
}

#[test]
fn test_whitespace_is_evaluated() {
    assert_eq!(Line::Source, classify("   ", MAX_CODE_LENGTH));
    assert_eq!(Line::Source, classify("\t", MAX_CODE_LENGTH));
}

#[test]
fn test_length_guard() {
    let longest = "1".repeat(MAX_CODE_LENGTH);

    assert_eq!(Line::Source, classify(&longest, MAX_CODE_LENGTH));
    assert_eq!(Line::TooLong, classify(&format!("{longest}1"), MAX_CODE_LENGTH));
    assert_eq!(Line::TooLong, classify(&" ".repeat(MAX_CODE_LENGTH + 1), MAX_CODE_LENGTH));

    // characters, not bytes
    assert_eq!(Line::Source, classify(&"é".repeat(3), 3));
    assert_eq!(Line::TooLong, classify(".exit", 4));
}

#[test]
fn test_format_values() {
    assert_eq!("[]", format_values(&[]));
    assert_eq!("[5]", format_values(&[Value::from(5)]));
    assert_eq!("[-1, true, false]", format_values(&[Value::from(-1), TRUE, FALSE]));
}
