//! Recursive descent over the token stream, producing a [`ast::Program`].

pub mod ast;
pub mod error;
pub mod parser;

pub mod prelude {
    pub use super::{
        ast::*,
        error::*,
        parser::*
    };
}
