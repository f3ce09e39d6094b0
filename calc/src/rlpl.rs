use calc_core::{
    lexer::prelude::{lexer_for, Token},
    parser::prelude::{ParseError, ParseErrorType},
    utils::prelude::{Error, SrcSpan},
};

use crate::cli::{read_line, stderr_buffer_writer};

const PROMPT: &str = "lex> ";

pub fn start() -> std::io::Result<()> {
	let buf_writer = stderr_buffer_writer();

	while let Some(input) = read_line(PROMPT)? {
		match input.as_str() {
			"" => {},
			".exit" => return Ok(()),
			_ => {
				for res in lexer_for(&input) {
					match res {
						Ok((start, token, end)) => {
							println!("{}\t{token:?}", SrcSpan::from(start, end));

							if token == Token::Eof {
								break;
							}
						},
						// the lexer skips the offending characters, keep going
						Err(error) => {
							let err = Error::Parse {
								src: input.clone(),
								error: ParseError {
									error: ParseErrorType::LexError { error },
									span: error.location
								}
							};

							let mut buf = buf_writer.buffer();
							err.pretty(&mut buf);
							buf_writer.print(&buf)?;
						}
					}
				}
			}
		}
	}

	Ok(())
}
