use std::{
    rc::Rc,
    sync::{atomic::{AtomicBool, Ordering}, Arc},
    time::Instant,
};

use calc_core::{
    environment::prelude::{Environment, Value},
    eval::prelude::{run, EvalOptions, RuntimeErrorType},
    utils::prelude::{Error, WarningEmitterIO},
};

use crate::{
    cli::{print_evaluated, print_exiting, print_interrupted, print_rejected, read_line, stderr_buffer_writer},
    ConsoleWarningEmitter, ReplArgs,
};

#[cfg(test)]
mod tests;

const PROMPT: &str = "calc> ";

/// Longest line, in characters, accepted by default.
pub const MAX_CODE_LENGTH: usize = 1000;

pub fn start(args: &ReplArgs) -> std::io::Result<()> {
    // set while a line is being evaluated, so Ctrl-C stops the line
    // instead of the whole session
    let busy = Arc::new(AtomicBool::new(false));
    let interrupt = Arc::new(AtomicBool::new(false));

    ctrlc::set_handler({
        let busy = busy.clone();
        let interrupt = interrupt.clone();

        move || {
            if busy.load(Ordering::SeqCst) {
                interrupt.store(true, Ordering::SeqCst);
            } else {
                println!();
                print_exiting();
                std::process::exit(0);
            }
        }
    })
    .map_err(std::io::Error::other)?;

    let options = EvalOptions {
        max_loop_iterations: args.loop_limit,
        interrupt: Some(interrupt.clone()),
    };
    let warnings: Rc<dyn WarningEmitterIO> = Rc::new(ConsoleWarningEmitter);
    let buf_writer = stderr_buffer_writer();
    let mut env = Environment::new();

    println!("Enter commands (Ctrl+D or Ctrl+C to exit):");

    loop {
        let Some(input) = read_line(PROMPT)? else {
            println!();
            print_exiting();

            return Ok(());
        };

        match classify(&input, args.max_length) {
            Line::Skip => continue,
            Line::Exit => return Ok(()),
            Line::ShowStore => {
                println!("{env}");
                continue;
            },
            Line::TooLong => {
                print_rejected("code exceeds maximum allowed length");
                continue;
            },
            Line::Source => {}
        }

        interrupt.store(false, Ordering::SeqCst);
        busy.store(true, Ordering::SeqCst);

        let start = Instant::now();
        let result = run(&input, &mut env, warnings.clone(), &options);
        let elapsed = start.elapsed();

        busy.store(false, Ordering::SeqCst);

        match result {
            Ok(values) => {
                if !values.is_empty() {
                    println!("{}", format_values(&values));
                }
            },
            Err(Error::Runtime { error, .. }) if error.error == RuntimeErrorType::Interrupted => {
                print_interrupted();
            },
            Err(err) => {
                let mut buf = buf_writer.buffer();
                err.pretty(&mut buf);
                buf_writer.print(&buf)?;
            }
        }

        if args.timings {
            print_evaluated(elapsed);
        }

        if args.show_store {
            println!("{env}");
        }
    }
}

/// What the shell does with a line read at the prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Line {
    Skip,
    Exit,
    ShowStore,
    TooLong,
    Source,
}

// only the empty line is skipped; whitespace still goes to the parser
fn classify(input: &str, max_length: usize) -> Line {
    if input.chars().count() > max_length {
        return Line::TooLong;
    }

    match input {
        "" => Line::Skip,
        ".exit" => Line::Exit,
        ".vars" => Line::ShowStore,
        _ => Line::Source
    }
}

fn format_values(values: &[Value]) -> String {
    let values = values.iter()
        .map(Value::to_string)
        .collect::<Vec<String>>();

    format!("[{}]", values.join(", "))
}
