use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("Invalid assignment '{0}'. Expected KEY=VALUE (e.g., 'workflow.iterations=10').")]
    InvalidAssignment(String),

    #[error("Invalid k-point grid '{0}'. Expected three positive integers (e.g., '4x4x4').")]
    InvalidKPoints(String),

    #[error("Component '{component}' cannot be empty in '{input}'.")]
    EmptyComponent {
        component: &'static str,
        input: String,
    },
}

/// Splits a `KEY=VALUE` override. Surrounding whitespace is dropped from both sides;
/// the value may be empty but the key may not.
pub fn parse_assignment(input: &str) -> Result<(String, String), ParseError> {
    let (key, value) = input
        .split_once('=')
        .ok_or_else(|| ParseError::InvalidAssignment(input.to_string()))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(ParseError::EmptyComponent {
            component: "key",
            input: input.to_string(),
        });
    }
    Ok((key.to_ascii_lowercase(), value.trim().to_string()))
}

/// Parses a Monkhorst-Pack grid written as `4x4x4`, `4,4,4` or `4 4 4`.
pub fn parse_k_points(input: &str) -> Result<[u32; 3], ParseError> {
    let invalid = || ParseError::InvalidKPoints(input.to_string());
    let parts: Vec<u32> = input
        .split(|c: char| c == 'x' || c == 'X' || c == ',' || c.is_whitespace())
        .filter(|p| !p.is_empty())
        .map(|p| p.parse::<u32>().map_err(|_| invalid()))
        .collect::<Result<_, _>>()?;
    match parts.as_slice() {
        &[a, b, c] if a > 0 && b > 0 && c > 0 => Ok([a, b, c]),
        _ => Err(invalid()),
    }
}
