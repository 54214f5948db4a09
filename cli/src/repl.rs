//! REPL for calculator expressions.

use codespan_reporting::term::termcolor::ColorChoice;
use rustyline::{error::ReadlineError, DefaultEditor};

use std::io;

use calc_eval::{AngleUnit, Session};

use crate::common::Env;

const HELP: &str = "\
REPL commands:
  .help           Show this help
  .history        Show the most recent calculations
  .clear          Clear the calculation history
  .deg / .rad     Switch trigonometry to degrees / radians
  .fn NAME ARGS   Call a scientific function, e.g. `.fn sin 1.57`
                  or `.fn power 2 10`
  .m+ [VALUE]     Add VALUE (default: last result) to memory
  .m- [VALUE]     Subtract VALUE (default: last result) from memory
  .mr             Recall the memory register
  .mc             Clear the memory register

Anything else is evaluated as an arithmetic expression.";

pub fn repl(session: Session, color_choice: ColorChoice) -> io::Result<()> {
    let mut rl =
        DefaultEditor::new().map_err(|err| io::Error::new(io::ErrorKind::Other, err))?;
    let mut env = Env::new(session, color_choice);
    env.print_greeting()?;

    loop {
        let line = rl.readline(">>> ");
        match line {
            Ok(line) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }
                let _ = rl.add_history_entry(line);

                if let Some(command) = line.strip_prefix('.') {
                    process_command(&mut env, line, command)?;
                } else {
                    env.evaluate(line)?;
                }
            }

            Err(ReadlineError::Interrupted) => {
                println!("Bye");
                break Ok(());
            }

            Err(ReadlineError::Eof) => {
                break Ok(());
            }

            Err(err) => break Err(io::Error::new(io::ErrorKind::Other, err)),
        }
    }
}

fn process_command(env: &mut Env, line: &str, command: &str) -> io::Result<()> {
    let mut parts = command.split_whitespace();
    let name = parts.next().unwrap_or_default();
    let args: Vec<&str> = parts.collect();

    match (name, args.as_slice()) {
        ("help", []) => env.print_text(HELP),

        ("history", []) => env.print_history(),

        ("clear", []) => {
            env.session_mut().clear_history();
            env.print_text("History cleared")
        }

        ("deg", []) => {
            env.session_mut().set_angle_unit(AngleUnit::Degrees);
            env.print_text("Trigonometry switched to degrees")
        }

        ("rad", []) => {
            env.session_mut().set_angle_unit(AngleUnit::Radians);
            env.print_text("Trigonometry switched to radians")
        }

        ("fn", [fn_name, operands @ ..]) => match parse_operands(operands) {
            Some(operands) => env.call_function(fn_name, &operands).map(drop),
            None => env.report_usage_error(
                line,
                "Function operands must be numbers",
                "Use `.fn NAME VALUE` or `.fn power BASE EXPONENT`",
            ),
        },

        ("m+", operands) | ("m-", operands) if operands.len() <= 1 => {
            let value = match operands.first() {
                Some(raw) => raw.parse::<f64>().ok(),
                None => env.last_result(),
            };
            match value {
                Some(value) => {
                    if name == "m+" {
                        env.session_mut().memory_add(value);
                    } else {
                        env.session_mut().memory_subtract(value);
                    }
                    let memory = env.session().memory_recall();
                    env.print_text(&format!("M = {memory}"))
                }
                None => env.report_usage_error(
                    line,
                    "Nothing to store in memory",
                    "Provide a numeric value or evaluate an expression first",
                ),
            }
        }

        ("mr", []) => {
            let memory = env.session().memory_recall();
            env.print_value(memory)
        }

        ("mc", []) => {
            env.session_mut().memory_clear();
            env.print_text("Memory cleared")
        }

        _ => env.report_usage_error(line, "Unknown command", "Use .help to list commands"),
    }
}

fn parse_operands(raw: &[&str]) -> Option<Vec<f64>> {
    if raw.is_empty() {
        return None;
    }
    raw.iter().map(|value| value.parse::<f64>().ok()).collect()
}
