//! Turns a line into spanned tokens. Bad input becomes an `Err` item in
//! the stream so the parser can report it after the fact.

pub mod error;
pub mod lexer;
pub mod token;

pub mod prelude {
	pub use super::{
		error::*,
		lexer::*,
		token::*
	};
}
