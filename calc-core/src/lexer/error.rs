use crate::utils::prelude::SrcSpan;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LexicalErrorType {
    UnrecognizedToken { tok: char },
    IdentifierTooLong { length: usize },
    IntegerTooLarge,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LexicalError {
    pub error: LexicalErrorType,
    pub location: SrcSpan
}

impl LexicalError {
    pub fn details(&self) -> (&'static str, Vec<String>) {
        match self.error {
            LexicalErrorType::UnrecognizedToken { tok } => {
                ("Unrecognized character", vec![format!("`{}` is not part of the language", tok.escape_debug())])
            },
            LexicalErrorType::IdentifierTooLong { length } => {
                ("Identifier too long", vec![format!(
                    "Identifier names can only be up to {} letters long, this one has {length}",
                    super::lexer::MAX_IDENTIFIER_LENGTH
                )])
            },
            LexicalErrorType::IntegerTooLarge => {
                ("Integer literal too large", vec![])
            }
        }
    }
}
