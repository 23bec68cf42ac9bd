//! Renders trajectories as x-y path plots.

use crate::error::PlotError;
use crate::simulation::Trajectory;
use crate::util::Interval;
use plotters::prelude::*;
use std::path::Path;

/// Output bitmap size in px.
const PLOT_SIZE: (u32, u32) = (1024, 768);

/// Smallest half-span of a plot axis in m, so degenerate paths (a point,
/// a horizontal line) still get a visible extent.
const MIN_HALF_SPAN: f64 = 0.5; // m

/// Fraction of the span left as padding around the path.
const MARGIN_FRAC: f64 = 0.05;

/// Renders the travelled path as a 2D line with equally scaled axes.
pub fn plot_trajectory(
    trajectory: &Trajectory,
    title: &str,
    path: &Path,
) -> Result<(), PlotError> {
    let (x_range, y_range) = axis_ranges(trajectory).ok_or(PlotError::EmptyTrajectory)?;
    draw(trajectory, title, path, x_range, y_range).map_err(|source| PlotError::Backend {
        path: path.to_path_buf(),
        message: source.to_string(),
    })?;
    log::info!("rendered trajectory plot to {}", path.display());
    Ok(())
}

/// Pads both axes to the same span about their midpoints, so a metre of x
/// covers the same distance as a metre of y.
fn axis_ranges(trajectory: &Trajectory) -> Option<(Interval<f64>, Interval<f64>)> {
    let (x, y) = trajectory.bounds()?;
    let half = (0.5 * f64::max(x.length(), y.length())).max(MIN_HALF_SPAN) * (1.0 + MARGIN_FRAC);
    Some((
        Interval::disc(x.midpoint(), half),
        Interval::disc(y.midpoint(), half),
    ))
}

fn draw(
    trajectory: &Trajectory,
    title: &str,
    path: &Path,
    x_range: Interval<f64>,
    y_range: Interval<f64>,
) -> Result<(), Box<dyn std::error::Error>> {
    let root = BitMapBackend::new(path, PLOT_SIZE).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(title, ("sans-serif", 28))
        .margin(20)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(x_range.min..x_range.max, y_range.min..y_range.max)?;

    chart.configure_mesh().x_desc("x [m]").y_desc("y [m]").draw()?;

    chart
        .draw_series(LineSeries::new(
            trajectory.positions().map(|p| (p.x, p.y)),
            &BLUE,
        ))?
        .label("Trajectory")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], BLUE.filled()));

    chart.configure_series_labels().border_style(&BLACK).draw()?;

    root.present()?;
    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::maneuver::{ControlProfile, ControlSample};
    use crate::model::BicycleModel;
    use crate::simulation::simulate;
    use assert_approx_eq::assert_approx_eq;

    #[test]
    fn axis_ranges_are_equal_and_padded() {
        let mut model = BicycleModel::default();
        let profile = ControlProfile {
            sample_time: 0.1,
            samples: (0..100)
                .map(|i| ControlSample {
                    time: i as f64 * 0.1,
                    velocity: 1.0,
                    steer_rate: 0.0,
                })
                .collect(),
        };
        let trajectory = simulate(&mut model, &profile).unwrap();

        let (x, y) = axis_ranges(&trajectory).unwrap();
        assert_approx_eq!(x.length(), y.length(), 1e-12);
        // The 9.9 m of travelled x span pads by 5% on each axis.
        assert_approx_eq!(x.length(), 10.395, 1e-9);
        assert!(x.contains(0.1) && x.contains(10.0));
        assert!(y.contains(0.0));
    }

    #[test]
    fn empty_trajectory_is_rejected() {
        let trajectory = Trajectory::default();
        assert!(matches!(
            plot_trajectory(&trajectory, "empty", Path::new("unused.png")),
            Err(PlotError::EmptyTrajectory)
        ));
    }
}
