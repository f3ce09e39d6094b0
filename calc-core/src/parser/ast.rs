use std::fmt::Display;

use crate::{
    lexer::prelude::{LexResult, Token},
    parser::prelude::{parse_error, Parse, ParseError, ParseErrorType, Parser, Precedence, MAX_STATEMENTS_PER_LINE},
    utils::prelude::SrcSpan
};

// program -> <statement> {; <statement> } [;]
#[derive(Debug, Clone, PartialEq)]
pub struct Program {
    pub statements: Vec<Statement>,
    pub location: SrcSpan
}

impl<T: Iterator<Item = LexResult>> Parse<T> for Program {
    fn parse(parser: &mut Parser<T>) -> Result<Self, ParseError> {
        let first = Statement::parse(parser)?;
        let mut location = first.location();
        let mut statements = vec![first];

        while parser.current_is(&Token::Semicolon) {
            let (_, end) = parser.expect_one(Token::Semicolon)?;
            location.end = end;

            // a single trailing separator closes the line
            if parser.current_is(&Token::Eof) {
                break;
            }

            // an empty slot is a lexical error, reported in preference to the cap
            if statements.len() >= MAX_STATEMENTS_PER_LINE && parser.current_token.is_some() {
                return parse_error(
                    ParseErrorType::TooManyStatements { limit: MAX_STATEMENTS_PER_LINE },
                    parser.current_span()
                );
            }

            let statement = Statement::parse(parser)?;
            location.end = statement.location().end;
            statements.push(statement);
        }

        Ok(Self {
            statements,
            location
        })
    }
}

impl Display for Program {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", join(&self.statements, "; "))
    }
}

// statement -> <if> | <while> | <assignment> | <expression>
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    Assignment(Assignment),
    IfThen(IfThen),
    IfThenElse(IfThenElse),
    While(While),
    Expression(Expression),
}

impl<T: Iterator<Item = LexResult>> Parse<T> for Statement {
    fn parse(parser: &mut Parser<T>) -> Result<Self, ParseError> {
        let res = match &parser.current_token {
            Some((_, Token::If, _)) => parser.nested(parse_conditional)?,
            Some((_, Token::While, _)) => Self::While(parser.nested(|parser| While::parse(parser))?),
            Some((_, Token::Ident(_), _)) if parser.next_is(&Token::Assign) => {
                Self::Assignment(Assignment::parse(parser)?)
            },
            _ => Self::Expression(Expression::parse(parser)?)
        };

        Ok(res)
    }
}

impl Display for Statement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Assignment(assignment) => write!(f, "{assignment}"),
            Self::IfThen(conditional) => write!(f, "{conditional}"),
            Self::IfThenElse(conditional) => write!(f, "{conditional}"),
            Self::While(loop_) => write!(f, "{loop_}"),
            Self::Expression(expression) => write!(f, "{expression}")
        }
    }
}

impl Statement {
    pub fn location(&self) -> SrcSpan {
        match self {
            Self::Assignment(assignment) => assignment.location,
            Self::IfThen(conditional) => conditional.location,
            Self::IfThenElse(conditional) => conditional.location,
            Self::While(loop_) => loop_.location,
            Self::Expression(expression) => expression.location()
        }
    }
}

// assignment -> <identifier> = <expression>
#[derive(Debug, Clone, PartialEq)]
pub struct Assignment {
    pub identifier: Identifier,
    pub value: Expression,
    pub location: SrcSpan
}

impl<T: Iterator<Item = LexResult>> Parse<T> for Assignment {
    fn parse(parser: &mut Parser<T>) -> Result<Self, ParseError> {
        let identifier = Identifier::from(parser.expect_ident()?);

        parser.expect_one(Token::Assign)?;

        let value = Expression::parse(parser)?;
        let location = identifier.location.to(value.location());

        Ok(Self {
            identifier,
            value,
            location
        })
    }
}

impl Display for Assignment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} = {}", self.identifier, self.value)
    }
}

// if -> if <expression> then <statement> [else <statement>]
fn parse_conditional<T: Iterator<Item = LexResult>>(
    parser: &mut Parser<T>
) -> Result<Statement, ParseError> {
    let (start, _) = parser.expect_one(Token::If)?;

    let condition = Expression::parse(parser)?;

    parser.expect_one(Token::Then)?;

    let resolution = Box::new(Statement::parse(parser)?);

    if !parser.current_is(&Token::Else) {
        let location = SrcSpan { start, end: resolution.location().end };

        return Ok(Statement::IfThen(IfThen {
            condition,
            resolution,
            location
        }));
    }

    parser.expect_one(Token::Else)?;

    let alternative = Box::new(Statement::parse(parser)?);
    let location = SrcSpan { start, end: alternative.location().end };

    Ok(Statement::IfThenElse(IfThenElse {
        condition,
        resolution,
        alternative,
        location
    }))
}

#[derive(Debug, Clone, PartialEq)]
pub struct IfThen {
    pub condition: Expression,
    pub resolution: Box<Statement>,
    pub location: SrcSpan
}

impl Display for IfThen {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "if {} then {}", self.condition, self.resolution)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct IfThenElse {
    pub condition: Expression,
    pub resolution: Box<Statement>,
    pub alternative: Box<Statement>,
    pub location: SrcSpan
}

impl Display for IfThenElse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "if {} then {} else {}", self.condition, self.resolution, self.alternative)
    }
}

// while -> while <expression> do { [<statement> {; <statement>} [;]] }
#[derive(Debug, Clone, PartialEq)]
pub struct While {
    pub condition: Expression,
    pub body: Vec<Statement>,
    pub location: SrcSpan
}

impl<T: Iterator<Item = LexResult>> Parse<T> for While {
    fn parse(parser: &mut Parser<T>) -> Result<Self, ParseError> {
        let (start, _) = parser.expect_one(Token::While)?;

        let condition = Expression::parse(parser)?;

        parser.expect_one(Token::Do)?;
        parser.expect_one(Token::LBrace)?;

        let mut body = vec![];

        while !parser.current_is(&Token::RBrace) {
            body.push(Statement::parse(parser)?);

            if parser.current_is(&Token::Semicolon) {
                parser.step();
            } else if parser.current_is(&Token::RBrace) {
                break;
            } else {
                return match &parser.current_token {
                    Some((start, token, end)) => parse_error(
                        ParseErrorType::MissingSeparator { token: token.clone() },
                        SrcSpan { start: *start, end: *end }
                    ),
                    None => parse_error(ParseErrorType::UnexpectedEof, SrcSpan::default())
                };
            }
        }

        let (_, end) = parser.expect_one(Token::RBrace)?;

        Ok(Self {
            condition,
            body,
            location: SrcSpan { start, end }
        })
    }
}

impl Display for While {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.body.is_empty() {
            write!(f, "while {} do {{ }}", self.condition)
        } else {
            write!(f, "while {} do {{ {} }}", self.condition, join(&self.body, "; "))
        }
    }
}

// expression -> <term> {(+ | - | > | < | ==) <term>}
// term       -> <factor> {(* | /) <factor>}
// factor     -> + <factor> | - <factor> | <int> | ( <expression> ) | <identifier>
#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    Number(Number),
    Variable(Identifier),
    Unary(Unary),
    Binary(Binary),
}

impl<T: Iterator<Item = LexResult>> Parse<T> for Expression {
    fn parse(parser: &mut Parser<T>) -> Result<Self, ParseError> {
        parse_infix(parser, Precedence::Sum)
    }
}

fn parse_infix<T: Iterator<Item = LexResult>>(
    parser: &mut Parser<T>,
    precedence: Precedence
) -> Result<Expression, ParseError> {
    let mut expr = parse_operand(parser, precedence)?;

    while parser.current_precedence() == precedence {
        let operator = match &parser.current_token {
            Some((_, token, _)) => match BinaryOperator::from_token(token) {
                Some(operator) => operator,
                None => break
            },
            None => break
        };

        parser.step();

        let right = parse_operand(parser, precedence)?;
        let location = expr.location().to(right.location());

        expr = Expression::Binary(Binary {
            left: Box::new(expr),
            operator,
            right: Box::new(right),
            location
        });
    }

    Ok(expr)
}

fn parse_operand<T: Iterator<Item = LexResult>>(
    parser: &mut Parser<T>,
    precedence: Precedence
) -> Result<Expression, ParseError> {
    match precedence {
        Precedence::Lowest | Precedence::Sum => parse_infix(parser, Precedence::Product),
        Precedence::Product => parse_factor(parser)
    }
}

fn parse_factor<T: Iterator<Item = LexResult>>(
    parser: &mut Parser<T>
) -> Result<Expression, ParseError> {
    let Some((start, token, end)) = parser.current_token.clone() else {
        return parse_error(ParseErrorType::UnexpectedEof, SrcSpan::default());
    };

    match token {
        Token::Plus => parser.nested(|parser| {
            parser.step();

            parse_factor(parser)
        }),
        Token::Minus => {
            let operand = parser.nested(|parser| {
                parser.step();

                parse_factor(parser)
            })?;
            let location = SrcSpan { start, end: operand.location().end };

            Ok(Expression::Unary(Unary {
                operator: UnaryOperator::Negate,
                operand: Box::new(operand),
                location
            }))
        },
        Token::Int(value) => {
            parser.step();

            Ok(Expression::Number(Number {
                value,
                location: SrcSpan { start, end }
            }))
        },
        Token::LParen => parser.nested(|parser| {
            parser.step();

            let expression = Expression::parse(parser)?;

            parser.expect_one(Token::RParen)?;

            Ok(expression)
        }),
        Token::Ident(_) => Ok(Expression::Variable(parser.expect_ident()?.into())),
        _ => Err(parser.unexpected(vec![
            "an Int".to_string(),
            "an Identifier".to_string(),
            "`(`".to_string(),
            "`+`".to_string(),
            "`-`".to_string(),
        ]))
    }
}

impl Display for Expression {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Number(number) => write!(f, "{}", number.value),
            Self::Variable(ident) => write!(f, "{ident}"),
            Self::Unary(unary) => write!(f, "{unary}"),
            Self::Binary(binary) => write!(f, "{binary}")
        }
    }
}

impl Expression {
    pub fn location(&self) -> SrcSpan {
        match self {
            Self::Number(number) => number.location,
            Self::Variable(ident) => ident.location,
            Self::Unary(unary) => unary.location,
            Self::Binary(binary) => binary.location
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Number {
    pub value: i64,
    pub location: SrcSpan
}

// identifier -> <letter> {<letter>}
#[derive(Debug, Clone, PartialEq)]
pub struct Identifier {
    pub value: String,
    pub location: SrcSpan
}

impl Display for Identifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.value)
    }
}

impl From<(u32, String, u32)> for Identifier {
    fn from(value: (u32, String, u32)) -> Self {
        Identifier {
            value: value.1,
            location: SrcSpan { start: value.0, end: value.2 }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOperator {
    Negate,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Unary {
    pub operator: UnaryOperator,
    pub operand: Box<Expression>,
    pub location: SrcSpan
}

impl Display for Unary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.operator {
            UnaryOperator::Negate => write!(f, "-{}", self.operand)
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOperator {
    Add,
    Sub,
    Mul,
    Div,
    Greater,
    Less,
    Equal,
}

impl BinaryOperator {
    pub fn from_token(token: &Token) -> Option<Self> {
        Some(match token {
            Token::Plus => Self::Add,
            Token::Minus => Self::Sub,
            Token::Mult => Self::Mul,
            Token::Div => Self::Div,
            Token::GreaterThan => Self::Greater,
            Token::LessThan => Self::Less,
            Token::Equal => Self::Equal,
            _ => return None
        })
    }

    pub fn is_comparison(&self) -> bool {
        matches!(self, Self::Greater | Self::Less | Self::Equal)
    }

    pub fn as_literal(&self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
            Self::Greater => ">",
            Self::Less => "<",
            Self::Equal => "==",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Binary {
    pub left: Box<Expression>,
    pub operator: BinaryOperator,
    pub right: Box<Expression>,
    pub location: SrcSpan
}

impl Display for Binary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({} {} {})", self.left, self.operator.as_literal(), self.right)
    }
}

fn join(statements: &[Statement], separator: &str) -> String {
    statements.iter()
        .map(|statement| statement.to_string())
        .collect::<Vec<String>>()
        .join(separator)
}
