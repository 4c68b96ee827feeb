//! The scientific calculator: keypad state machine, expression evaluation and the
//! LaTeX preview.
//!
//! [`CalculatorState::apply`] is the only way the state changes. Arithmetic is typed
//! into the display, moved into the pending formula by an operator, and handed to
//! [`evaluator::evaluate`] on `=`; precedence is whatever the evaluator decides.

pub mod evaluator;
pub mod latex;

use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use tracing::debug;

pub use evaluator::EvalError;

use crate::core::utils::format::format_number;

pub const ERROR_DISPLAY: &str = "Error";

/// Largest `n` whose factorial is finite in `f64`.
pub const MAX_FACTORIAL: u32 = 170;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AngleMode {
    #[default]
    Deg,
    Rad,
}

impl AngleMode {
    pub fn toggled(self) -> Self {
        match self {
            AngleMode::Deg => AngleMode::Rad,
            AngleMode::Rad => AngleMode::Deg,
        }
    }

    fn to_radians(self, value: f64) -> f64 {
        match self {
            AngleMode::Deg => value.to_radians(),
            AngleMode::Rad => value,
        }
    }
}

impl fmt::Display for AngleMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            AngleMode::Deg => "DEG",
            AngleMode::Rad => "RAD",
        })
    }
}

#[derive(Debug, Error, PartialEq, Eq, Clone)]
#[error("Unknown angle mode '{0}' (expected DEG or RAD)")]
pub struct ParseAngleModeError(String);

impl FromStr for AngleMode {
    type Err = ParseAngleModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "deg" | "degree" | "degrees" => Ok(AngleMode::Deg),
            "rad" | "radian" | "radians" => Ok(AngleMode::Rad),
            _ => Err(ParseAngleModeError(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl Operator {
    pub fn symbol(&self) -> &'static str {
        match self {
            Operator::Add => "+",
            Operator::Subtract => "-",
            Operator::Multiply => "*",
            Operator::Divide => "/",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScientificFn {
    Sin,
    Cos,
    Tan,
    Log,
    Ln,
    Sqrt,
    Square,
    Cube,
    Reciprocal,
    Factorial,
    Abs,
}

impl ScientificFn {
    /// Name used in history lines, e.g. `sqrt(16) = 4`.
    pub fn name(&self) -> &'static str {
        match self {
            ScientificFn::Sin => "sin",
            ScientificFn::Cos => "cos",
            ScientificFn::Tan => "tan",
            ScientificFn::Log => "log",
            ScientificFn::Ln => "ln",
            ScientificFn::Sqrt => "sqrt",
            ScientificFn::Square => "square",
            ScientificFn::Cube => "cube",
            ScientificFn::Reciprocal => "inv",
            ScientificFn::Factorial => "fact",
            ScientificFn::Abs => "abs",
        }
    }

    pub fn apply(&self, value: f64, mode: AngleMode) -> Result<f64, EvalError> {
        let result = match self {
            ScientificFn::Sin => snap_to_zero(mode.to_radians(value).sin()),
            ScientificFn::Cos => snap_to_zero(mode.to_radians(value).cos()),
            ScientificFn::Tan => snap_to_zero(mode.to_radians(value).tan()),
            ScientificFn::Log => value.log10(),
            ScientificFn::Ln => value.ln(),
            ScientificFn::Sqrt => value.sqrt(),
            ScientificFn::Square => value * value,
            ScientificFn::Cube => value * value * value,
            ScientificFn::Reciprocal => 1.0 / value,
            ScientificFn::Factorial => factorial(value)?,
            ScientificFn::Abs => value.abs(),
        };
        if result.is_nan() {
            return Err(EvalError::Domain {
                function: self.name(),
                value,
            });
        }
        Ok(result)
    }
}

// Trig of whole degrees lands a few ulps off zero (cos 90° = 6.1e-17).
fn snap_to_zero(value: f64) -> f64 {
    if value.abs() < 1e-12 { 0.0 } else { value }
}

pub fn factorial(value: f64) -> Result<f64, EvalError> {
    if value < 0.0 || value.fract() != 0.0 || value > f64::from(MAX_FACTORIAL) {
        return Err(EvalError::Domain {
            function: "fact",
            value,
        });
    }
    Ok((2..=value as u32).fold(1.0, |acc, n| acc * f64::from(n)))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemoryOp {
    Clear,
    Recall,
    Add,
    Subtract,
}

#[derive(Debug, Clone, PartialEq)]
pub enum CalculatorEvent {
    /// Digits, `.`, or a whole numeric literal typed into the display.
    Input(String),
    Operator(Operator),
    Equals,
    Clear,
    Backspace,
    Memory(MemoryOp),
    Scientific(ScientificFn),
    Pi,
    ToggleAngleMode,
    SetAngleMode(AngleMode),
}

#[derive(Debug, Error, PartialEq, Eq, Clone)]
#[error("Unknown calculator key '{0}'")]
pub struct KeyParseError(pub String);

impl FromStr for CalculatorEvent {
    type Err = KeyParseError;

    /// Parses a keypad label (`7`, `÷`, `x²`, `M+`, `π`, ...) or a numeric literal.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim();
        if !key.is_empty() && key.chars().all(|c| c.is_ascii_digit() || c == '.') {
            return Ok(CalculatorEvent::Input(key.to_string()));
        }
        let event = match key.to_lowercase().as_str() {
            "+" => CalculatorEvent::Operator(Operator::Add),
            "-" | "−" => CalculatorEvent::Operator(Operator::Subtract),
            "*" | "×" | "x" => CalculatorEvent::Operator(Operator::Multiply),
            "/" | "÷" => CalculatorEvent::Operator(Operator::Divide),
            "=" => CalculatorEvent::Equals,
            "c" | "clear" => CalculatorEvent::Clear,
            "←" | "back" | "backspace" => CalculatorEvent::Backspace,
            "mc" => CalculatorEvent::Memory(MemoryOp::Clear),
            "mr" => CalculatorEvent::Memory(MemoryOp::Recall),
            "m+" => CalculatorEvent::Memory(MemoryOp::Add),
            "m-" => CalculatorEvent::Memory(MemoryOp::Subtract),
            "sin" => CalculatorEvent::Scientific(ScientificFn::Sin),
            "cos" => CalculatorEvent::Scientific(ScientificFn::Cos),
            "tan" => CalculatorEvent::Scientific(ScientificFn::Tan),
            "log" => CalculatorEvent::Scientific(ScientificFn::Log),
            "ln" => CalculatorEvent::Scientific(ScientificFn::Ln),
            "√" | "sqrt" => CalculatorEvent::Scientific(ScientificFn::Sqrt),
            "x²" | "square" => CalculatorEvent::Scientific(ScientificFn::Square),
            "x³" | "cube" => CalculatorEvent::Scientific(ScientificFn::Cube),
            "1/x" | "inv" => CalculatorEvent::Scientific(ScientificFn::Reciprocal),
            "n!" | "fact" => CalculatorEvent::Scientific(ScientificFn::Factorial),
            "|x|" | "abs" => CalculatorEvent::Scientific(ScientificFn::Abs),
            "π" | "pi" => CalculatorEvent::Pi,
            "deg/rad" | "mode" => CalculatorEvent::ToggleAngleMode,
            "deg" => CalculatorEvent::SetAngleMode(AngleMode::Deg),
            "rad" => CalculatorEvent::SetAngleMode(AngleMode::Rad),
            _ => return Err(KeyParseError(s.to_string())),
        };
        Ok(event)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CalculatorState {
    display: String,
    formula: String,
    memory: Option<f64>,
    history: Vec<String>,
    angle_mode: AngleMode,
    latex: String,
}

impl Default for CalculatorState {
    fn default() -> Self {
        Self::new(AngleMode::default())
    }
}

impl CalculatorState {
    pub fn new(angle_mode: AngleMode) -> Self {
        Self {
            display: "0".to_string(),
            formula: String::new(),
            memory: None,
            history: Vec::new(),
            angle_mode,
            latex: String::new(),
        }
    }

    pub fn display(&self) -> &str {
        &self.display
    }

    /// The pending left-hand side, e.g. `2 +`.
    pub fn formula(&self) -> &str {
        &self.formula
    }

    pub fn memory(&self) -> Option<f64> {
        self.memory
    }

    pub fn history(&self) -> &[String] {
        &self.history
    }

    pub fn angle_mode(&self) -> AngleMode {
        self.angle_mode
    }

    pub fn latex(&self) -> &str {
        &self.latex
    }

    pub fn is_error(&self) -> bool {
        self.display == ERROR_DISPLAY
    }

    fn display_value(&self) -> Result<f64, EvalError> {
        self.display
            .parse::<f64>()
            .map_err(|_| EvalError::NotANumber(self.display.clone()))
    }

    fn show(&mut self, value: f64) {
        self.display = format_number(value);
        self.latex = latex::to_latex(&self.display);
    }

    fn fail(&mut self, error: &EvalError) {
        debug!(%error, "Calculator input rejected");
        self.display = ERROR_DISPLAY.to_string();
    }

    pub fn apply(mut self, event: CalculatorEvent) -> Self {
        match event {
            CalculatorEvent::Input(text) => {
                if self.display == "0" || self.is_error() {
                    self.display = text;
                } else {
                    self.display.push_str(&text);
                }
                self.latex = latex::to_latex(&self.display);
            }
            CalculatorEvent::Operator(op) => {
                self.formula = if self.formula.is_empty() {
                    format!("{} {}", self.display, op.symbol())
                } else {
                    format!("{} {} {}", self.formula, self.display, op.symbol())
                };
                self.display = "0".to_string();
                self.latex = latex::to_latex(op.symbol());
            }
            CalculatorEvent::Equals => {
                let expression = format!("{} {}", self.formula, self.display)
                    .trim()
                    .to_string();
                match evaluator::evaluate(&expression) {
                    Ok(value) => {
                        self.show(value);
                        self.history
                            .push(format!("{expression} = {}", self.display));
                        self.formula.clear();
                    }
                    Err(e) => self.fail(&e),
                }
            }
            CalculatorEvent::Clear => {
                self.display = "0".to_string();
                self.formula.clear();
                self.latex.clear();
            }
            CalculatorEvent::Backspace => {
                if self.is_error() {
                    self.display = "0".to_string();
                } else {
                    self.display.pop();
                    if self.display.is_empty() {
                        self.display = "0".to_string();
                    }
                }
            }
            CalculatorEvent::Memory(op) => self.apply_memory(op),
            CalculatorEvent::Scientific(function) => {
                match self
                    .display_value()
                    .and_then(|v| function.apply(v, self.angle_mode).map(|r| (v, r)))
                {
                    Ok((value, result)) => {
                        self.display = format_number(result);
                        let line = format!(
                            "{}({}) = {}",
                            function.name(),
                            format_number(value),
                            self.display
                        );
                        self.latex = latex::to_latex(&line);
                        self.history.push(line);
                    }
                    Err(e) => self.fail(&e),
                }
            }
            CalculatorEvent::Pi => self.show(std::f64::consts::PI),
            CalculatorEvent::ToggleAngleMode => self.angle_mode = self.angle_mode.toggled(),
            CalculatorEvent::SetAngleMode(mode) => self.angle_mode = mode,
        }
        self
    }

    fn apply_memory(&mut self, op: MemoryOp) {
        match op {
            MemoryOp::Clear => self.memory = None,
            MemoryOp::Recall => {
                if let Some(value) = self.memory {
                    self.show(value);
                }
            }
            MemoryOp::Add | MemoryOp::Subtract => {
                // A non-numeric display leaves memory untouched.
                if let Ok(value) = self.display_value() {
                    let current = self.memory.unwrap_or(0.0);
                    self.memory = Some(if op == MemoryOp::Add {
                        current + value
                    } else {
                        current - value
                    });
                }
            }
        }
    }

    /// Applies a sequence of events left to right.
    pub fn apply_all(self, events: impl IntoIterator<Item = CalculatorEvent>) -> Self {
        events.into_iter().fold(self, CalculatorState::apply)
    }
}
