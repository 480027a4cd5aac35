//! # Chart Rendering
//!
//! Draws a [`ChartData`] snapshot into a single SVG file with three panels
//! side by side: per-category bars, the category distribution as a pie, and
//! the amounts over time as a line.
//!
//! Every render replaces the previous file. Nothing is kept between renders.

use log::info;
use plotters::prelude::*;
use shared::{CategorySlice, CategoryTotal, ChartData, TrendPoint};
use std::f64::consts::PI;
use std::path::{Path, PathBuf};

const CHART_SIZE: (u32, u32) = (1500, 500);
const PRIMARY_COLOR: RGBColor = RGBColor(102, 126, 234);

#[derive(Debug, thiserror::Error)]
pub enum ChartError {
    #[error("Failed to draw charts to {}: {message}", .path.display())]
    Draw { path: PathBuf, message: String },
}

type DrawResult = Result<(), ChartError>;

/// Renders the expense charts to an SVG file
#[derive(Debug, Clone)]
pub struct ChartRenderer {
    output_path: PathBuf,
}

impl ChartRenderer {
    pub fn new(output_path: impl Into<PathBuf>) -> Self {
        Self {
            output_path: output_path.into(),
        }
    }

    pub fn output_path(&self) -> &Path {
        &self.output_path
    }

    /// Draw all three panels, overwriting any earlier output
    pub fn render(&self, data: &ChartData) -> DrawResult {
        let root = SVGBackend::new(&self.output_path, CHART_SIZE).into_drawing_area();
        root.fill(&WHITE).map_err(|e| self.draw_error(e))?;

        let panels = root.split_evenly((1, 3));
        self.draw_category_bars(&panels[0], &data.by_category)?;
        self.draw_distribution_pie(&panels[1], &data.distribution)?;
        self.draw_trend_line(&panels[2], &data.trend)?;

        root.present().map_err(|e| self.draw_error(e))?;
        info!("Charts rendered to {:?}", self.output_path);
        Ok(())
    }

    fn draw_category_bars(
        &self,
        area: &DrawingArea<SVGBackend, plotters::coord::Shift>,
        totals: &[CategoryTotal],
    ) -> DrawResult {
        let labels: Vec<String> = totals.iter().map(|t| t.category.clone()).collect();
        let max_amount = totals
            .iter()
            .map(|t| t.amount.to_f64())
            .fold(0.0_f64, f64::max);

        let mut chart = ChartBuilder::on(area)
            .caption("By Category", ("sans-serif", 20))
            .margin(15)
            .x_label_area_size(40)
            .y_label_area_size(60)
            .build_cartesian_2d(
                (0u32..labels.len() as u32).into_segmented(),
                0.0_f64..(max_amount * 1.1).max(1.0),
            )
            .map_err(|e| self.draw_error(e))?;

        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_labels(labels.len() + 1)
            .x_label_formatter(&|value| match value {
                SegmentValue::CenterOf(idx) => labels.get(*idx as usize).cloned().unwrap_or_default(),
                _ => String::new(),
            })
            .y_desc("Amount")
            .y_label_formatter(&|v| format!("{:.2}", v))
            .label_style(("sans-serif", 12))
            .draw()
            .map_err(|e| self.draw_error(e))?;

        chart
            .draw_series(
                Histogram::vertical(&chart)
                    .style(PRIMARY_COLOR.mix(0.8).filled())
                    .margin(10)
                    .data(
                        totals
                            .iter()
                            .enumerate()
                            .map(|(idx, t)| (idx as u32, t.amount.to_f64())),
                    ),
            )
            .map_err(|e| self.draw_error(e))?;

        Ok(())
    }

    fn draw_distribution_pie(
        &self,
        area: &DrawingArea<SVGBackend, plotters::coord::Shift>,
        slices: &[CategorySlice],
    ) -> DrawResult {
        let area = area
            .titled("Distribution by Category", ("sans-serif", 20))
            .map_err(|e| self.draw_error(e))?;

        let (width, height) = area.dim_in_pixel();
        let center = (width as f64 / 2.0, height as f64 / 2.0);
        let radius = width.min(height) as f64 * 0.35;

        let grand_total: f64 = slices.iter().map(|s| s.amount.to_f64()).sum();
        let mut start_angle = -PI / 2.0;

        for (idx, slice) in slices.iter().enumerate() {
            let sweep = slice.amount.to_f64() / grand_total * 2.0 * PI;
            let end_angle = start_angle + sweep;

            // one vertex per degree keeps the arc smooth
            let steps = ((sweep.to_degrees()).ceil() as usize).max(2);
            let mut points = vec![(center.0 as i32, center.1 as i32)];
            points.extend((0..=steps).map(|step| {
                let angle = start_angle + sweep * step as f64 / steps as f64;
                polar_point(center, radius, angle)
            }));

            area.draw(&Polygon::new(points, Palette99::pick(idx).filled()))
                .map_err(|e| self.draw_error(e))?;

            let label_position = polar_point(center, radius * 1.2, start_angle + sweep / 2.0);
            area.draw(&Text::new(
                format!("{} {:.1}%", slice.category, slice.percentage),
                label_position,
                ("sans-serif", 13).into_font(),
            ))
            .map_err(|e| self.draw_error(e))?;

            start_angle = end_angle;
        }

        Ok(())
    }

    fn draw_trend_line(
        &self,
        area: &DrawingArea<SVGBackend, plotters::coord::Shift>,
        points: &[TrendPoint],
    ) -> DrawResult {
        let (dates, series) = trend_positions(points);
        let max_amount = points
            .iter()
            .map(|p| p.amount.to_f64())
            .fold(0.0_f64, f64::max);

        let mut chart = ChartBuilder::on(area)
            .caption("Trend Over Time", ("sans-serif", 20))
            .margin(15)
            .x_label_area_size(45)
            .y_label_area_size(60)
            .build_cartesian_2d(
                -0.5_f64..(dates.len() as f64 - 0.5),
                0.0_f64..(max_amount * 1.1).max(1.0),
            )
            .map_err(|e| self.draw_error(e))?;

        chart
            .configure_mesh()
            .x_labels(dates.len().min(6))
            .x_label_formatter(&|x| date_label(&dates, *x))
            .x_desc("Date")
            .y_desc("Amount")
            .y_label_formatter(&|v| format!("{:.2}", v))
            .label_style(("sans-serif", 12))
            .draw()
            .map_err(|e| self.draw_error(e))?;

        chart
            .draw_series(LineSeries::new(
                series.iter().copied(),
                PRIMARY_COLOR.stroke_width(2),
            ))
            .map_err(|e| self.draw_error(e))?;
        chart
            .draw_series(
                series
                    .iter()
                    .map(|&point| Circle::new(point, 4, PRIMARY_COLOR.filled())),
            )
            .map_err(|e| self.draw_error(e))?;

        Ok(())
    }

    fn draw_error(&self, e: impl std::fmt::Display) -> ChartError {
        ChartError::Draw {
            path: self.output_path.clone(),
            message: e.to_string(),
        }
    }
}

fn polar_point(center: (f64, f64), radius: f64, angle: f64) -> (i32, i32) {
    (
        (center.0 + radius * angle.cos()).round() as i32,
        (center.1 + radius * angle.sin()).round() as i32,
    )
}

/// Distinct dates as x labels, and each point placed at its date's position
///
/// Points sharing a date share an x position. Expects `points` sorted by date.
fn trend_positions(points: &[TrendPoint]) -> (Vec<String>, Vec<(f64, f64)>) {
    let mut dates: Vec<String> = Vec::new();
    let mut series = Vec::with_capacity(points.len());
    for point in points {
        let label = point.date.to_string();
        if dates.last() != Some(&label) {
            dates.push(label);
        }
        series.push(((dates.len() - 1) as f64, point.amount.to_f64()));
    }
    (dates, series)
}

/// Date under an x position of the trend chart, blank between points
fn date_label(dates: &[String], x: f64) -> String {
    let nearest = x.round();
    if (x - nearest).abs() > 1e-6 || nearest < 0.0 {
        return String::new();
    }
    dates.get(nearest as usize).cloned().unwrap_or_default()
}
