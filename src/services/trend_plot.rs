use std::ops::Range;

use plotters::prelude::*;
use thiserror::Error;

use crate::domain::trend::TrendLine;
use crate::services::scope_palette::{ScopePalette, hex_to_rgb};
use crate::services::trend_projection::TrendProjection;

#[derive(Error, Debug)]
pub enum TrendPlotError {
    #[error("projection has no points to plot")]
    EmptyProjection,
    #[error("failed to render trend plot: {0}")]
    Plot(String),
}

struct ScatterSeries {
    label: String,
    color: RGBColor,
    points: Vec<(f64, f64)>,
}

/// Renders present-value cost against length, one colored series per scope
/// plus the trend line when there is one.
pub async fn write_trend_png(
    output_path: &str,
    projection: &TrendProjection,
    palette: &mut ScopePalette,
) -> Result<(), TrendPlotError> {
    if projection.points.is_empty() {
        return Err(TrendPlotError::EmptyProjection);
    }

    let series: Vec<ScatterSeries> = projection
        .groups
        .iter()
        .map(|(label, indices)| {
            let (r, g, b) = hex_to_rgb(palette.color_for(label)).unwrap_or((170, 170, 170));
            ScatterSeries {
                label: label.clone(),
                color: RGBColor(r, g, b),
                points: indices
                    .iter()
                    .filter_map(|idx| projection.points.get(*idx))
                    .map(|point| (point.length_km, point.cost_at_present_year))
                    .collect(),
            }
        })
        .collect();

    let output_path = output_path.to_string();
    let trend_line = projection.trend_line.clone();
    let present_year = projection.present_year;
    tokio::task::spawn_blocking(move || {
        render_trend_png(&output_path, &series, trend_line.as_ref(), present_year)
    })
    .await
    .map_err(|e| TrendPlotError::Plot(e.to_string()))??;
    Ok(())
}

fn render_trend_png(
    output_path: &str,
    series: &[ScatterSeries],
    trend_line: Option<&TrendLine>,
    present_year: i32,
) -> Result<(), TrendPlotError> {
    let (x_range, y_range) = chart_bounds(series, trend_line);

    let root = BitMapBackend::new(output_path, (900, 600)).into_drawing_area();
    root.fill(&WHITE)
        .map_err(|e| TrendPlotError::Plot(e.to_string()))?;

    let caption = format!("Present value cost by length ({present_year})");
    let mut chart = ChartBuilder::on(&root)
        .margin(20)
        .caption(caption, ("sans-serif", 30))
        .x_label_area_size(55)
        .y_label_area_size(75)
        .build_cartesian_2d(x_range, y_range)
        .map_err(|e| TrendPlotError::Plot(e.to_string()))?;

    chart
        .configure_mesh()
        .disable_mesh()
        .x_desc("Length (km)")
        .y_desc("Cost (millions)")
        .label_style(("sans-serif", 18))
        .axis_desc_style(("sans-serif", 22))
        .draw()
        .map_err(|e| TrendPlotError::Plot(e.to_string()))?;

    for scatter in series {
        let color = scatter.color;
        chart
            .draw_series(
                scatter
                    .points
                    .iter()
                    .map(move |point| Circle::new(*point, 6, color.filled())),
            )
            .map_err(|e| TrendPlotError::Plot(e.to_string()))?
            .label(scatter.label.clone())
            .legend(move |(x, y)| Circle::new((x + 10, y), 5, color.filled()));
    }

    if let Some(line) = trend_line {
        let trend_color = RGBColor(231, 76, 60);
        chart
            .draw_series(LineSeries::new(
                vec![(line.x[0], line.y[0]), (line.x[1], line.y[1])],
                trend_color.stroke_width(2),
            ))
            .map_err(|e| TrendPlotError::Plot(e.to_string()))?
            .label("Linear trend")
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], trend_color.stroke_width(2)));
    }

    chart
        .configure_series_labels()
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .position(SeriesLabelPosition::UpperLeft)
        .label_font(("sans-serif", 16))
        .draw()
        .map_err(|e| TrendPlotError::Plot(e.to_string()))?;

    root.present()
        .map_err(|e| TrendPlotError::Plot(e.to_string()))?;
    Ok(())
}

/// Axis ranges covering every point, the trend line and the origin.
fn chart_bounds(
    series: &[ScatterSeries],
    trend_line: Option<&TrendLine>,
) -> (Range<f64>, Range<f64>) {
    let (mut min_x, mut max_x, mut min_y, mut max_y) = (0.0_f64, 0.0_f64, 0.0_f64, 0.0_f64);
    for (x, y) in series.iter().flat_map(|s| s.points.iter()) {
        min_x = min_x.min(*x);
        max_x = max_x.max(*x);
        min_y = min_y.min(*y);
        max_y = max_y.max(*y);
    }
    if let Some(line) = trend_line {
        for y in line.y {
            min_y = min_y.min(y);
            max_y = max_y.max(y);
        }
    }

    let span_x = (max_x - min_x).max(1.0);
    let min_x = if min_x < 0.0 { min_x - span_x * 0.05 } else { 0.0 };
    let max_x = if max_x > 0.0 { max_x + span_x * 0.05 } else { 1.0 };
    let span_y = (max_y - min_y).max(1.0);
    (
        min_x..max_x,
        (min_y - span_y * 0.05)..(max_y + span_y * 0.1),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::present_value::{PresentValue, RateSource};
    use crate::services::trend_projection::project_trend;
    use crate::test_support::sample;
    use assert_fs::prelude::*;
    use predicates::prelude::*;

    #[tokio::test]
    async fn write_trend_png_creates_a_chart() {
        let samples = vec![
            sample("A", Some("Nuevo"), Some(10.0), Some(250.0), 2018),
            sample("B", Some("Mejoramiento"), Some(4.0), Some(80.0), 2020),
            sample("C", None, Some(7.5), Some(140.0), 2022),
        ];
        let pv = PresentValue::new(RateSource::Constant(0.04)).unwrap();
        let projection = project_trend(&samples, 2025, &pv);
        let output_file = assert_fs::NamedTempFile::new("trend.png").unwrap();
        let mut palette = ScopePalette::new();

        write_trend_png(output_file.path().to_str().unwrap(), &projection, &mut palette)
            .await
            .unwrap();

        output_file.assert(predicate::path::exists());
        assert!(std::fs::metadata(output_file.path()).unwrap().len() > 0);
        assert_eq!(palette.len(), 2);
    }

    #[tokio::test]
    async fn write_trend_png_rejects_empty_projection() {
        let pv = PresentValue::new(RateSource::Constant(0.04)).unwrap();
        let projection = project_trend(&[], 2025, &pv);
        let mut palette = ScopePalette::new();

        let error = write_trend_png("unused.png", &projection, &mut palette)
            .await
            .expect_err("expected empty projection error");
        assert!(matches!(error, TrendPlotError::EmptyProjection));
    }

    fn series(points: Vec<(f64, f64)>) -> ScatterSeries {
        ScatterSeries {
            label: "Nuevo".to_string(),
            color: RGBColor(0, 0, 0),
            points,
        }
    }

    #[test]
    fn chart_bounds_include_negative_lengths() {
        let (x_range, y_range) = chart_bounds(&[series(vec![(-2.0, 5.0), (8.0, 20.0)])], None);

        assert!(x_range.start < -2.0);
        assert!(x_range.end > 8.0);
        assert!(y_range.start < 0.0);
        assert!(y_range.end > 20.0);
    }

    #[test]
    fn chart_bounds_start_at_the_origin_for_positive_data() {
        let (x_range, _) = chart_bounds(&[series(vec![(3.0, 5.0), (8.0, 20.0)])], None);

        assert_eq!(x_range.start, 0.0);
        assert!(x_range.end > 8.0);
    }
}
