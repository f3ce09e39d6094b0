use termcolor::Buffer;
use thiserror::Error;

use crate::{
    eval::prelude::RuntimeError,
    parser::prelude::{ParseError, ParseErrorType},
    utils::prelude::SrcSpan,
};
use super::diagnostic::{Diagnostic, Label, Level, Location, INPUT_NAME};

/// A failure that stopped a whole line. Carries the line so it can be
/// rendered with a source snippet.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum Error {
    #[error("failed to parse input")]
    Parse {
        src: String,
        error: ParseError
    },
    #[error("evaluation failed")]
    Runtime {
        src: String,
        error: RuntimeError
    },
}

impl Error {
    /// Headline and detail lines without any source rendering.
    pub fn details(&self) -> (&'static str, Vec<String>) {
        match self {
            Error::Parse { error, .. } => error.details(),
            Error::Runtime { error, .. } => error.details()
        }
    }

    pub fn pretty_string(&self) -> String {
        let mut nocolor = Buffer::no_color();
        self.pretty(&mut nocolor);
        String::from_utf8(nocolor.into_inner()).expect("Error printing produced invalid utf8")
    }

    pub fn pretty(&self, buf: &mut Buffer) {
        use std::io::Write;

        self.to_diagnostic().write(buf);
        writeln!(buf).expect("write new line diagnostic");
    }

    pub fn to_diagnostic(&self) -> Diagnostic<'_> {
        match self {
            Error::Parse { src, error } => {
                let (label, extra) = error.details();

                let title = match &error.error {
                    ParseErrorType::LexError { .. } => "Lexical error",
                    ParseErrorType::TooManyStatements { .. } => "Statement limit exceeded",
                    ParseErrorType::TooDeeplyNested { .. } => "Nesting limit exceeded",
                    _ => "Syntax error"
                };

                // spans of the end of input point one past the line
                let span = if matches!(error.error, ParseErrorType::UnexpectedEof) {
                    SrcSpan {
                        start: src.len() as u32,
                        end: src.len() as u32,
                    }
                } else {
                    error.span
                };

                Diagnostic {
                    title: title.into(),
                    text: extra.join("\n"),
                    level: Level::Error,
                    location: Some(Location {
                        src,
                        name: INPUT_NAME,
                        label: Label {
                            text: Some(label.to_string()),
                            span,
                        },
                    }),
                }
            },
            Error::Runtime { src, error } => {
                let (label, extra) = error.details();

                let title = if error.is_limit() {
                    "Variable limit exceeded"
                } else {
                    "Runtime error"
                };

                Diagnostic {
                    title: title.into(),
                    text: extra.join("\n"),
                    level: Level::Error,
                    location: Some(Location {
                        src,
                        name: INPUT_NAME,
                        label: Label {
                            text: Some(label.to_string()),
                            span: error.location,
                        },
                    }),
                }
            }
        }
    }
}
