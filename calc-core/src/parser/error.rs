use crate::{lexer::prelude::{LexicalError, Token}, utils::prelude::SrcSpan};

#[derive(Debug, Clone, PartialEq)]
pub enum ParseErrorType {
    UnexpectedEof,
    UnexpectedToken {
        token: Token,
        expected: Vec<String>,
    },
    MissingSeparator {
        token: Token,
    },
    TooManyStatements {
        limit: usize,
    },
    TooDeeplyNested {
        limit: usize,
    },
    LexError { error: LexicalError },
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParseError {
    pub error: ParseErrorType,
    pub span: SrcSpan
}

impl ParseError {
    pub fn details(&self) -> (&'static str, Vec<String>) {
        match &self.error {
            ParseErrorType::UnexpectedToken { token, expected } => {
                let messages = std::iter::once(format!("Found {}, expected one of: ", token.describe()))
                    .chain(expected.iter().map(|s| format!("- {s}")))
                    .collect();

                ("Not expected this", messages)
            },
            ParseErrorType::MissingSeparator { token } => (
                "Expected separator or closing brace",
                vec![format!("Found {}, expected `;` or `}}`", token.describe())]
            ),
            ParseErrorType::TooManyStatements { limit } => (
                "Too many statements",
                vec![format!("Exceeded the maximum limit of {limit} commands per line")]
            ),
            ParseErrorType::TooDeeplyNested { limit } => (
                "Nested too deeply",
                vec![format!("Parentheses, signs and blocks may nest at most {limit} levels deep")]
            ),
            ParseErrorType::UnexpectedEof => ("Unexpected end of input", vec![]),
            ParseErrorType::LexError { error } => error.details()
        }
    }

    /// Resource limits are reported apart from syntax errors.
    pub fn is_limit(&self) -> bool {
        matches!(
            self.error,
            ParseErrorType::TooManyStatements { .. } | ParseErrorType::TooDeeplyNested { .. }
        )
    }

    pub fn is_lexical(&self) -> bool {
        matches!(self.error, ParseErrorType::LexError { .. })
    }
}
