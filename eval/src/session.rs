//! Session-scoped calculator state.
//!
//! The evaluation pipeline is a pure function library; everything stateful
//! about a calculator — history, angle mode, the memory register — lives in a
//! [`Session`] owned by the caller and passed explicitly, never in globals.

use core::fmt;

use calc_parser::Limits;

use crate::{
    error::Error,
    fns::{FnArgs, SciFunction},
    history::History,
};

/// Unit in which trigonometric operands and results are expressed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AngleUnit {
    /// Radians (the unit the dispatcher itself operates in).
    #[default]
    Radians,
    /// Degrees.
    Degrees,
}

impl AngleUnit {
    /// Converts a value in this unit to radians.
    pub fn to_radians(self, value: f64) -> f64 {
        match self {
            Self::Radians => value,
            Self::Degrees => value.to_radians(),
        }
    }

    /// Converts a value in radians to this unit.
    pub fn from_radians(self, value: f64) -> f64 {
        match self {
            Self::Radians => value,
            Self::Degrees => value.to_degrees(),
        }
    }
}

impl fmt::Display for AngleUnit {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(match self {
            Self::Radians => "rad",
            Self::Degrees => "deg",
        })
    }
}

/// Calculator session: input limits plus the per-session state a calculator
/// UI needs (history, angle mode, memory register) as explicit fields.
#[derive(Debug, Clone, Default)]
pub struct Session {
    limits: Limits,
    history: History,
    angle_unit: AngleUnit,
    memory: f64,
}

impl Session {
    /// Creates a session with default limits, radian angle mode, empty
    /// history and a zeroed memory register.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a session with the provided input limits.
    pub fn with_limits(limits: Limits) -> Self {
        Self {
            limits,
            ..Self::default()
        }
    }

    /// Returns the angle unit used for trigonometric calls.
    pub fn angle_unit(&self) -> AngleUnit {
        self.angle_unit
    }

    /// Switches the angle unit used for trigonometric calls.
    pub fn set_angle_unit(&mut self, unit: AngleUnit) {
        self.angle_unit = unit;
    }

    /// Returns the recorded history.
    pub fn history(&self) -> &History {
        &self.history
    }

    /// Clears the recorded history.
    pub fn clear_history(&mut self) {
        self.history.clear();
    }

    /// Returns the value of the memory register.
    pub fn memory_recall(&self) -> f64 {
        self.memory
    }

    /// Adds a value to the memory register (the `M+` key).
    pub fn memory_add(&mut self, value: f64) {
        self.memory += value;
    }

    /// Subtracts a value from the memory register (the `M-` key).
    pub fn memory_subtract(&mut self, value: f64) {
        self.memory -= value;
    }

    /// Zeroes the memory register (the `MC` key).
    pub fn memory_clear(&mut self) {
        self.memory = 0.0;
    }

    /// Evaluates an expression through the full validation pipeline and
    /// records it in the history on success.
    ///
    /// # Errors
    ///
    /// Propagates errors from the expression pipeline
    /// ([`evaluate_expression_with_limits()`](crate::evaluate_expression_with_limits));
    /// nothing is recorded on failure.
    pub fn evaluate(&mut self, expression: &str) -> Result<f64, Error> {
        let result = crate::evaluate_expression_with_limits(expression, &self.limits)?;
        self.history.record(expression, result);
        Ok(result)
    }

    /// Calls a scientific function, applying the session angle unit around
    /// the radian-based dispatcher: operands of `sin`/`cos`/`tan` are
    /// converted to radians, results of `asin`/`acos`/`atan` are converted
    /// from radians.
    ///
    /// Function calls are not recorded in the history.
    ///
    /// # Errors
    ///
    /// Propagates errors from [`evaluate_function()`](crate::evaluate_function).
    pub fn call_function(&mut self, name: &str, args: impl Into<FnArgs>) -> Result<f64, Error> {
        let function: SciFunction = name.parse()?;
        let mut args = args.into();
        if function.takes_angle() {
            if let FnArgs::Unary(angle) = args {
                args = FnArgs::Unary(self.angle_unit.to_radians(angle));
            }
        }

        let result = crate::apply_function(function, args)?;
        Ok(if function.returns_angle() {
            self.angle_unit.from_radians(result)
        } else {
            result
        })
    }
}
