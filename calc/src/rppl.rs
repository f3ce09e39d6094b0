use calc_core::{parser::prelude::parse_line, utils::prelude::Error};

use crate::cli::{read_line, stderr_buffer_writer};

const PROMPT: &str = "parse> ";

pub fn start(print_ast: bool) -> std::io::Result<()> {
	let buf_writer = stderr_buffer_writer();

	while let Some(input) = read_line(PROMPT)? {
		match input.as_str() {
			"" => {},
			".exit" => return Ok(()),
			_ => match parse_line(&input) {
				Ok(program) if print_ast => println!("{program:#?}"),
				Ok(program) => println!("{program}"),
				Err(error) => {
					let mut buf = buf_writer.buffer();
					Error::Parse { src: input, error }.pretty(&mut buf);
					buf_writer.print(&buf)?;
				}
			}
		}
	}

	Ok(())
}
