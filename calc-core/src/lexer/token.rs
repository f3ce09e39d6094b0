#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    // <letter>{<letter>}, at most four letters unless a keyword
    Ident(String),
    // <digit>{<digit>}
    Int(i64),

    // Comparison group
    Equal, // ==
    LessThan, // <
    GreaterThan, // >

    // Additive group
    Plus, // +
    Minus, // -

    // Multiplicative group
    Mult, // *
    Div, // /

    Assign, // =

    // Keywords
    If,
    Then,
    Else,
    While,
    Do,

    // Delimiters
    Semicolon, // ;
    LParen, // (
    RParen, // )
    LBrace, // {
    RBrace, // }

    Eof,
}

impl Token {
    pub fn is_reserved_word(&self) -> bool {
        matches!(
            self,
            Token::If
            | Token::Then
            | Token::Else
            | Token::While
            | Token::Do
        )
    }


    pub fn as_literal(&self) -> String {
        match self {
            Token::Ident(value) => value.clone(),
            Token::Int(value) => value.to_string(),

            Token::Equal => "==".to_string(),
            Token::LessThan => "<".to_string(),
            Token::GreaterThan => ">".to_string(),
            Token::Plus => "+".to_string(),
            Token::Minus => "-".to_string(),
            Token::Mult => "*".to_string(),
            Token::Div => "/".to_string(),
            Token::Assign => "=".to_string(),

            Token::If => "if".to_string(),
            Token::Then => "then".to_string(),
            Token::Else => "else".to_string(),
            Token::While => "while".to_string(),
            Token::Do => "do".to_string(),

            Token::Semicolon => ";".to_string(),
            Token::LParen => "(".to_string(),
            Token::RParen => ")".to_string(),
            Token::LBrace => "{".to_string(),
            Token::RBrace => "}".to_string(),

            Token::Eof => "\0".to_string(),
        }
    }

    /// How the token is named in "expected ..., found ..." messages.
    pub fn describe(&self) -> String {
        match self {
            Token::Int(_) => "an Int".to_string(),
            Token::Ident(_) => "an Identifier".to_string(),
            Token::Eof => "end of input".to_string(),
            _ if self.is_reserved_word() => format!("the keyword `{}`", self.as_literal()),
            _ => format!("`{}`", self.as_literal()),
        }
    }
}
