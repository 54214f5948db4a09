//! Simple CLI / REPL for safely evaluating calculator expressions.

use clap::Parser;
use codespan_reporting::term::termcolor::ColorChoice;
use is_terminal::IsTerminal;

use std::{
    io::{self, Read},
    process,
};

use calc_eval::{AngleUnit, Limits, Session};

mod common;
mod repl;

use crate::{
    common::{Env, ERROR_EXIT_CODE},
    repl::repl,
};

const ABOUT: &str = "CLI and REPL for safely evaluating calculator expressions.";

const AFTER_HELP: &str = "\
EXIT CODES:
    0    Normal exit
    1    Invalid command-line option
    2    Evaluation error in non-interactive mode";

#[derive(Debug, Parser)]
#[command(version, about = ABOUT, after_help = AFTER_HELP)]
enum Args {
    /// Parse an expression and output its AST.
    Ast {
        /// Expression to parse. If omitted, the expression will be read from stdin.
        expression: Option<String>,
    },
    /// Evaluate an expression, optionally in an interactive REPL.
    Eval(EvalArgs),
    /// Apply a scientific function to its operands.
    Fn(FnCallArgs),
}

#[derive(Debug, clap::Args)]
struct EvalArgs {
    /// Launch the REPL for calculator expressions.
    #[arg(long, short = 'i')]
    interactive: bool,
    /// Interpret trigonometric operands and results in degrees instead of radians.
    #[arg(long)]
    degrees: bool,
    /// Maximum expression length in chars.
    #[arg(long, default_value_t = Limits::default().max_len)]
    max_len: usize,
    /// Maximum number of parenthesis pairs per expression.
    #[arg(long, default_value_t = Limits::default().max_paren_pairs)]
    max_parens: usize,
    /// Expression to evaluate. If omitted, the expression will be read from stdin.
    #[arg(conflicts_with = "interactive")]
    expression: Option<String>,
}

#[derive(Debug, clap::Args)]
struct FnCallArgs {
    /// Interpret trigonometric operands and results in degrees instead of radians.
    #[arg(long)]
    degrees: bool,
    /// Function name: sin, cos, tan, asin, acos, atan, log, ln, exp, sqrt,
    /// square, reciprocal or power.
    name: String,
    /// Function operands: one value, or two (base, exponent) for `power`.
    #[arg(required = true, num_args = 1..=2)]
    operands: Vec<f64>,
}

fn color_choice() -> ColorChoice {
    if io::stderr().is_terminal() {
        ColorChoice::Auto
    } else {
        ColorChoice::Never
    }
}

fn read_expression(expression: Option<String>) -> io::Result<String> {
    match expression {
        Some(expression) => Ok(expression),
        None => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer)?;
            Ok(buffer.trim_end().to_owned())
        }
    }
}

impl Args {
    fn run(self) -> io::Result<()> {
        match self {
            Self::Ast { expression } => Self::output_ast(expression),
            Self::Eval(eval_args) => eval_args.run(),
            Self::Fn(fn_args) => fn_args.run(),
        }
    }

    fn output_ast(expression: Option<String>) -> io::Result<()> {
        let expression = read_expression(expression)?;
        let mut env = Env::new(Session::new(), color_choice());

        let parsed = Limits::default()
            .validate(&expression)
            .and_then(|()| calc_parser::parse_expression(&expression));
        match parsed {
            Ok(ast) => {
                env.print_text(&format!("{ast:#?}"))?;
                Ok(())
            }
            Err(err) => {
                env.report_parse_error(&expression, err)?;
                process::exit(ERROR_EXIT_CODE);
            }
        }
    }
}

impl EvalArgs {
    fn session(&self) -> Session {
        let limits = Limits {
            max_len: self.max_len,
            max_paren_pairs: self.max_parens,
            ..Limits::default()
        };
        let mut session = Session::with_limits(limits);
        if self.degrees {
            session.set_angle_unit(AngleUnit::Degrees);
        }
        session
    }

    fn run(self) -> io::Result<()> {
        let session = self.session();
        if self.interactive {
            repl(session, color_choice())
        } else {
            let expression = read_expression(self.expression)?;
            let mut env = Env::new(session, color_choice());
            if env.evaluate(&expression)? {
                Ok(())
            } else {
                process::exit(ERROR_EXIT_CODE);
            }
        }
    }
}

impl FnCallArgs {
    fn run(self) -> io::Result<()> {
        let mut session = Session::new();
        if self.degrees {
            session.set_angle_unit(AngleUnit::Degrees);
        }
        let mut env = Env::new(session, color_choice());
        if env.call_function(&self.name, &self.operands)? {
            Ok(())
        } else {
            process::exit(ERROR_EXIT_CODE);
        }
    }
}

fn main() -> io::Result<()> {
    let args = Args::parse();
    args.run()
}
