use crate::error::{CliError, Result};
use matsci::engine::plot::{Curve, PLOT_MAX, PLOT_MIN, Surface};
use plotters::coord::Shift;
use plotters::prelude::*;
use std::path::Path;
use tracing::{debug, info};

pub const PLOT_SIZE: (u32, u32) = (800, 600);

type DrawResult<DB> = std::result::Result<(), DrawingAreaErrorKind<<DB as DrawingBackend>::ErrorType>>;

/// Splits a sampled curve into runs of finite points, so undefined stretches
/// (like `log(x)` for `x <= 0`) leave a gap instead of a spike.
pub fn finite_segments(points: &[(f64, f64)]) -> Vec<Vec<(f64, f64)>> {
    let mut segments = Vec::new();
    let mut current = Vec::new();
    for &(x, y) in points {
        if y.is_finite() {
            current.push((x, y));
        } else if !current.is_empty() {
            segments.push(std::mem::take(&mut current));
        }
    }
    if !current.is_empty() {
        segments.push(current);
    }
    segments
}

/// Widens a degenerate range so constant functions still get a visible axis.
fn padded(range: Option<(f64, f64)>) -> (f64, f64) {
    match range {
        Some((lo, hi)) if (hi - lo).abs() > f64::EPSILON => (lo, hi),
        Some((lo, _)) => (lo - 1.0, lo + 1.0),
        None => (-1.0, 1.0),
    }
}

pub fn draw_curve<DB: DrawingBackend>(root: &DrawingArea<DB, Shift>, curve: &Curve) -> DrawResult<DB> {
    root.fill(&WHITE)?;
    let (y_min, y_max) = padded(curve.y_range());

    let mut chart = ChartBuilder::on(root)
        .caption(format!("y = {}", curve.expression), ("sans-serif", 20))
        .margin(20)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(PLOT_MIN..PLOT_MAX, y_min..y_max)?;

    chart
        .configure_mesh()
        .x_desc("x")
        .y_desc("y")
        .axis_desc_style(("sans-serif", 16))
        .draw()?;

    for segment in finite_segments(&curve.points) {
        chart.draw_series(LineSeries::new(segment, &BLUE))?;
    }
    Ok(())
}

pub fn draw_surface<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    surface: &Surface,
) -> DrawResult<DB> {
    root.fill(&WHITE)?;
    let (z_min, z_max) = padded(surface.z_range());
    let index_of = |axis: &[f64], v: f64| axis.iter().position(|&a| a == v).unwrap_or(0);

    let mut chart = ChartBuilder::on(root)
        .caption(format!("z = {}", surface.expression), ("sans-serif", 20))
        .margin(20)
        .build_cartesian_3d(PLOT_MIN..PLOT_MAX, z_min..z_max, PLOT_MIN..PLOT_MAX)?;

    chart.with_projection(|mut pb| {
        pb.yaw = 0.6;
        pb.pitch = 0.4;
        pb.scale = 0.85;
        pb.into_matrix()
    });

    chart
        .configure_axes()
        .light_grid_style(BLACK.mix(0.15))
        .max_light_lines(3)
        .draw()?;

    // Plotters' vertical axis is the middle coordinate, so the grid's y runs along depth.
    chart.draw_series(
        SurfaceSeries::xoz(
            surface.xs.iter().copied(),
            surface.ys.iter().copied(),
            |x, y| {
                surface
                    .value_at(index_of(&surface.xs, x), index_of(&surface.ys, y))
                    .filter(|z| z.is_finite())
                    .unwrap_or(z_min)
            },
        )
        .style(BLUE.mix(0.3).filled()),
    )?;
    Ok(())
}

pub fn render_curve_svg(curve: &Curve, path: &Path) -> Result<()> {
    debug!(points = curve.points.len(), "Rendering 2D plot");
    let root = SVGBackend::new(path, PLOT_SIZE).into_drawing_area();
    draw_curve(&root, curve).map_err(|e| CliError::Render(e.to_string()))?;
    root.present().map_err(|e| CliError::Render(e.to_string()))?;
    info!("Plot written to {:?}", path);
    Ok(())
}

pub fn render_surface_svg(surface: &Surface, path: &Path) -> Result<()> {
    debug!(size = surface.xs.len(), "Rendering 3D surface");
    let root = SVGBackend::new(path, PLOT_SIZE).into_drawing_area();
    draw_surface(&root, surface).map_err(|e| CliError::Render(e.to_string()))?;
    root.present().map_err(|e| CliError::Render(e.to_string()))?;
    info!("Surface written to {:?}", path);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use matsci::engine::plot::{sample_curve, sample_surface};

    #[test]
    fn segments_break_at_undefined_points() {
        let points = [
            (0.0, f64::NAN),
            (1.0, 1.0),
            (2.0, 2.0),
            (3.0, f64::INFINITY),
            (4.0, 4.0),
        ];
        let segments = finite_segments(&points);
        assert_eq!(segments, vec![vec![(1.0, 1.0), (2.0, 2.0)], vec![(4.0, 4.0)]]);
    }

    #[test]
    fn all_undefined_curve_has_no_segments() {
        assert!(finite_segments(&[(0.0, f64::NAN)]).is_empty());
    }

    #[test]
    fn padded_range_handles_constants() {
        assert_eq!(padded(Some((3.0, 3.0))), (2.0, 4.0));
        assert_eq!(padded(None), (-1.0, 1.0));
        assert_eq!(padded(Some((-2.0, 5.0))), (-2.0, 5.0));
    }

    #[test]
    fn curve_renders_to_svg() {
        let curve = sample_curve("sin(x)").unwrap();
        let mut svg = String::new();
        {
            let root = SVGBackend::with_string(&mut svg, PLOT_SIZE).into_drawing_area();
            draw_curve(&root, &curve).unwrap();
            root.present().unwrap();
        }
        assert!(svg.contains("<svg"));
        assert!(svg.contains("polyline"));
        assert!(svg.contains("y = sin(x)"));
    }

    #[test]
    fn surface_renders_to_svg() {
        let surface = sample_surface("x^2 + y^2").unwrap();
        let mut svg = String::new();
        {
            let root = SVGBackend::with_string(&mut svg, PLOT_SIZE).into_drawing_area();
            draw_surface(&root, &surface).unwrap();
            root.present().unwrap();
        }
        assert!(svg.contains("polygon"));
    }

    #[test]
    fn curve_file_is_written() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("plot.svg");
        render_curve_svg(&sample_curve("x^2").unwrap(), &path).unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("</svg>"));
    }
}
