use thiserror::Error;
use tracing::debug;

use super::calculator::evaluator;

pub const PLOT_MIN: f64 = -10.0;
pub const PLOT_MAX: f64 = 10.0;
pub const CURVE_STEP: f64 = 0.1;
pub const SURFACE_SIZE: usize = 30;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum PlotError {
    #[error("Nothing to plot: the expression is empty")]
    Empty,
    #[error("Invalid expression for plotting '{expression}': {message}")]
    InvalidExpression { expression: String, message: String },
    #[error("Invalid expression for 3D plotting '{expression}': {message}")]
    InvalidSurfaceExpression { expression: String, message: String },
}

/// `y = f(x)` sampled on `[-10, 10]` every 0.1 (201 points).
///
/// Points where `f` is undefined keep a NaN `y` so a renderer can break the line there.
#[derive(Debug, Clone, PartialEq)]
pub struct Curve {
    pub expression: String,
    pub points: Vec<(f64, f64)>,
}

impl Curve {
    /// Finite y-range of the samples, if any sample is finite.
    pub fn y_range(&self) -> Option<(f64, f64)> {
        finite_range(self.points.iter().map(|&(_, y)| y))
    }
}

/// `z = f(x, y)` on a 30×30 grid with `xs[i] = ys[i] = -10 + (20/30)·i`.
///
/// `z[i][j]` is the value at `(xs[j], ys[i])`.
#[derive(Debug, Clone, PartialEq)]
pub struct Surface {
    pub expression: String,
    pub xs: Vec<f64>,
    pub ys: Vec<f64>,
    pub z: Vec<Vec<f64>>,
}

impl Surface {
    pub fn z_range(&self) -> Option<(f64, f64)> {
        finite_range(self.z.iter().flatten().copied())
    }

    pub fn value_at(&self, x_index: usize, y_index: usize) -> Option<f64> {
        self.z.get(y_index).and_then(|row| row.get(x_index)).copied()
    }
}

fn finite_range(values: impl Iterator<Item = f64>) -> Option<(f64, f64)> {
    values.filter(|v| v.is_finite()).fold(None, |acc, v| match acc {
        None => Some((v, v)),
        Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
    })
}

pub fn curve_abscissae() -> Vec<f64> {
    let steps = ((PLOT_MAX - PLOT_MIN) / CURVE_STEP).round() as usize;
    (0..=steps)
        .map(|i| PLOT_MIN + CURVE_STEP * i as f64)
        .collect()
}

pub fn surface_axis() -> Vec<f64> {
    let step = (PLOT_MAX - PLOT_MIN) / SURFACE_SIZE as f64;
    (0..SURFACE_SIZE)
        .map(|i| PLOT_MIN + step * i as f64)
        .collect()
}

pub fn sample_curve(expression: &str) -> Result<Curve, PlotError> {
    let expression = expression.trim();
    if expression.is_empty() {
        return Err(PlotError::Empty);
    }
    let invalid = |message: String| PlotError::InvalidExpression {
        expression: expression.to_string(),
        message,
    };
    let expr = evaluator::parse(expression).map_err(|e| invalid(e.to_string()))?;
    let f = expr
        .bind_with_context(evaluator::context(), "x")
        .map_err(|e| invalid(e.to_string()))?;

    let points = curve_abscissae().into_iter().map(|x| (x, f(x))).collect();
    debug!(expression, "Sampled 2D curve");
    Ok(Curve {
        expression: expression.to_string(),
        points,
    })
}

pub fn sample_surface(expression: &str) -> Result<Surface, PlotError> {
    let expression = expression.trim();
    if expression.is_empty() {
        return Err(PlotError::Empty);
    }
    let invalid = |message: String| PlotError::InvalidSurfaceExpression {
        expression: expression.to_string(),
        message,
    };
    let expr = evaluator::parse(expression).map_err(|e| invalid(e.to_string()))?;
    let f = expr
        .bind2_with_context(evaluator::context(), "x", "y")
        .map_err(|e| invalid(e.to_string()))?;

    let xs = surface_axis();
    let ys = xs.clone();
    let z = ys
        .iter()
        .map(|&y| xs.iter().map(|&x| f(x, y)).collect())
        .collect();
    debug!(expression, size = SURFACE_SIZE, "Sampled 3D surface");
    Ok(Surface {
        expression: expression.to_string(),
        xs,
        ys,
        z,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn curve_covers_closed_interval_at_tenth_steps() {
        let xs = curve_abscissae();
        assert_eq!(xs.len(), 201);
        assert_eq!(xs[0], -10.0);
        assert!((xs[200] - 10.0).abs() < 1e-9);
        assert!((xs[1] - xs[0] - 0.1).abs() < 1e-12);
    }

    #[test]
    fn curve_samples_expression_in_x() {
        let curve = sample_curve("x^2 - 1").unwrap();
        assert_eq!(curve.points[0], (-10.0, 99.0));
        assert_eq!(curve.y_range(), Some((-1.0, 99.0)));
    }

    #[test]
    fn undefined_points_stay_nan() {
        let curve = sample_curve("sqrt(x)").unwrap();
        assert!(curve.points[0].1.is_nan());
        assert!((curve.points[200].1 - 10f64.sqrt()).abs() < 1e-9);
    }

    #[test]
    fn surface_is_thirty_by_thirty_and_excludes_upper_bound() {
        let s = sample_surface("x + 2 * y").unwrap();
        assert_eq!(s.xs.len(), 30);
        assert_eq!(s.z.len(), 30);
        assert!(s.z.iter().all(|row| row.len() == 30));
        assert_eq!(s.xs[0], -10.0);
        assert!((s.xs[29] - (-10.0 + 20.0 / 30.0 * 29.0)).abs() < 1e-12);
        let x = s.xs[3];
        let y = s.ys[5];
        assert!((s.value_at(3, 5).unwrap() - (x + 2.0 * y)).abs() < 1e-12);
    }

    #[test]
    fn invalid_expressions_are_reported_inline() {
        assert_eq!(sample_curve("   "), Err(PlotError::Empty));
        assert!(matches!(
            sample_curve("sin("),
            Err(PlotError::InvalidExpression { .. })
        ));
        assert!(matches!(
            sample_curve("x + y"),
            Err(PlotError::InvalidExpression { .. })
        ));
        assert!(matches!(
            sample_surface("x + z"),
            Err(PlotError::InvalidSurfaceExpression { .. })
        ));
    }

    #[test]
    fn surface_accepts_single_variable_expressions() {
        let s = sample_surface("sin(x)").unwrap();
        assert_eq!(s.value_at(0, 0), s.value_at(0, 29));
    }
}
