//! Common utils.

use codespan::{FileId, Files};
use codespan_reporting::{
    diagnostic::{Diagnostic, Label},
    term::termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor},
    term::{emit, Config as ReportingConfig},
};

use std::io::{self, Write};

use calc_eval::{Error, ErrorKind, FnArgs, Session};

pub const ERROR_EXIT_CODE: i32 = 2;

/// Terminal environment around a calculator [`Session`]: it owns the snippet
/// map used for spanned diagnostics and the output streams.
pub struct Env {
    session: Session,
    files: Files<String>,
    snippet_count: usize,
    last_result: Option<f64>,
    writer: StandardStream,
    out: StandardStream,
    config: ReportingConfig,
}

impl Env {
    pub fn new(session: Session, color_choice: ColorChoice) -> Self {
        Self {
            session,
            files: Files::new(),
            snippet_count: 0,
            last_result: None,
            writer: StandardStream::stderr(color_choice),
            out: StandardStream::stdout(color_choice),
            config: ReportingConfig::default(),
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut Session {
        &mut self.session
    }

    pub fn last_result(&self) -> Option<f64> {
        self.last_result
    }

    pub fn print_greeting(&mut self) -> io::Result<()> {
        let mut writer = self.writer.lock();
        writer.set_color(ColorSpec::new().set_bold(true))?;
        writeln!(writer, "calc REPL v{}", env!("CARGO_PKG_VERSION"))?;
        writer.reset()?;
        writeln!(writer, "{}", env!("CARGO_PKG_DESCRIPTION"))?;
        writeln!(writer, "Use .help to list commands")
    }

    fn add_snippet(&mut self, code: &str) -> FileId {
        self.snippet_count += 1;
        let file_name = format!("Snip #{}", self.snippet_count);
        self.files.add(file_name, code.to_owned())
    }

    /// Reports an evaluation error as a spanned diagnostic. The label points
    /// at the offending fragment if the error carries a location, and at the
    /// whole snippet otherwise.
    fn report_error(&mut self, file: FileId, err: &Error) -> io::Result<()> {
        let code = match err.kind() {
            ErrorKind::InvalidCharacter
            | ErrorKind::TooLong { .. }
            | ErrorKind::TooComplex(_)
            | ErrorKind::Syntax(_) => "PARSE",
            _ => "EVAL",
        };

        let range = match err.location() {
            Some(location) => location.range(),
            None => 0..self.files.source(file).len(),
        };
        let label = Label::primary(file, range).with_message("Error occurred here");
        let mut diagnostic = Diagnostic::error()
            .with_message(err.kind().to_string())
            .with_code(code)
            .with_labels(vec![label]);
        if let Some(help) = err.kind().help() {
            diagnostic = diagnostic.with_notes(vec![help.to_owned()]);
        }

        emit(&mut self.writer.lock(), &self.config, &self.files, &diagnostic)
            .map_err(|err| io::Error::new(io::ErrorKind::Other, err))
    }

    /// Reports a standalone parsing error, e.g. from the `ast` subcommand.
    pub fn report_parse_error(
        &mut self,
        code_str: &str,
        err: calc_parser::Error<'_>,
    ) -> io::Result<()> {
        let file = self.add_snippet(code_str);
        self.report_error(file, &err.into())
    }

    /// Reports a REPL usage problem (e.g. an unknown command) against the
    /// whole snippet.
    pub fn report_usage_error(&mut self, code_str: &str, message: &str, note: &str) -> io::Result<()> {
        let file = self.add_snippet(code_str);
        let label = Label::primary(file, 0..code_str.len()).with_message(note.to_owned());
        let diagnostic = Diagnostic::error()
            .with_message(message.to_owned())
            .with_code("CMD")
            .with_labels(vec![label]);
        emit(&mut self.writer.lock(), &self.config, &self.files, &diagnostic)
            .map_err(|err| io::Error::new(io::ErrorKind::Other, err))
    }

    pub fn print_value(&mut self, value: f64) -> io::Result<()> {
        let num_color = ColorSpec::new().set_fg(Some(Color::Green)).clone();
        let mut out = self.out.lock();
        out.set_color(&num_color)?;
        writeln!(out, "{}", value)?;
        out.reset()
    }

    pub fn print_text(&mut self, text: &str) -> io::Result<()> {
        writeln!(self.out.lock(), "{}", text)
    }

    /// Prints the display window of the session history, oldest first.
    pub fn print_history(&mut self) -> io::Result<()> {
        if self.session.history().is_empty() {
            return writeln!(self.writer.lock(), "(history is empty)");
        }
        let lines: Vec<_> = self
            .session
            .history()
            .recent()
            .map(|entry| format!("{} = {}", entry.expression, entry.result))
            .collect();
        let mut out = self.out.lock();
        for line in lines {
            writeln!(out, "{}", line)?;
        }
        Ok(())
    }

    /// Evaluates an expression in the session, printing the result or a
    /// diagnostic. Returns whether the evaluation succeeded.
    pub fn evaluate(&mut self, expression: &str) -> io::Result<bool> {
        let file = self.add_snippet(expression);
        match self.session.evaluate(expression) {
            Ok(value) => {
                self.last_result = Some(value);
                self.print_value(value)?;
                Ok(true)
            }
            Err(err) => {
                self.report_error(file, &err)?;
                Ok(false)
            }
        }
    }

    /// Calls a scientific function in the session, printing the result or a
    /// diagnostic. Returns whether the call succeeded.
    pub fn call_function(&mut self, name: &str, operands: &[f64]) -> io::Result<bool> {
        let code_str = format!(
            "{} {}",
            name,
            operands
                .iter()
                .map(f64::to_string)
                .collect::<Vec<_>>()
                .join(" ")
        );
        let args = match *operands {
            [value] => FnArgs::Unary(value),
            [first, second] => FnArgs::Binary(first, second),
            _ => {
                return self
                    .report_usage_error(
                        &code_str,
                        "Functions take one operand, or two for `power`",
                        "Provided here",
                    )
                    .map(|()| false);
            }
        };

        let file = self.add_snippet(&code_str);
        match self.session.call_function(name, args) {
            Ok(value) => {
                self.last_result = Some(value);
                self.print_value(value)?;
                Ok(true)
            }
            Err(err) => {
                self.report_error(file, &err)?;
                Ok(false)
            }
        }
    }
}
