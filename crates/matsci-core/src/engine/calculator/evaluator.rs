use meval::{Context, Expr};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum EvalError {
    #[error("Invalid expression '{expression}': {message}")]
    Parse { expression: String, message: String },
    #[error("Cannot evaluate '{expression}': {message}")]
    Evaluate { expression: String, message: String },
    #[error("'{0}' is not a number")]
    NotANumber(String),
    #[error("{function} is undefined for {value}")]
    Domain { function: &'static str, value: f64 },
}

/// The evaluator's function table: the usual builtins, plus `log` as the natural
/// logarithm and an explicit `log10`. `Infinity` is bound so a displayed
/// infinite result can be chained into the next expression.
pub fn context() -> Context<'static> {
    let mut ctx = Context::new();
    ctx.var("Infinity", f64::INFINITY);
    ctx.func("log", f64::ln);
    ctx.func("log10", f64::log10);
    ctx
}

pub fn parse(expression: &str) -> Result<Expr, EvalError> {
    expression
        .trim()
        .parse::<Expr>()
        .map_err(|e| EvalError::Parse {
            expression: expression.trim().to_string(),
            message: e.to_string(),
        })
}

/// Evaluates an infix expression. Operator precedence is the evaluator's own.
///
/// Infinite results are returned as-is; a NaN result is a domain error.
pub fn evaluate(expression: &str) -> Result<f64, EvalError> {
    let expr = parse(expression)?;
    let value = expr
        .eval_with_context(context())
        .map_err(|e| EvalError::Evaluate {
            expression: expression.trim().to_string(),
            message: e.to_string(),
        })?;
    if value.is_nan() {
        return Err(EvalError::Domain {
            function: "expression",
            value,
        });
    }
    Ok(value)
}
