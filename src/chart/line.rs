// Copyright 2025 Fernando Borretti
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use chrono::NaiveDate;

use crate::chart::series::date_label;
use crate::chart::series::fill_days;
use crate::chart::series::percent_bounds;
use crate::chart::series::seam_predictions;
use crate::chart::surface::Align;
use crate::chart::surface::Point;
use crate::chart::surface::Stroke;
use crate::chart::surface::Surface;
use crate::chart::surface::TextStyle;
use crate::chart::theme::Palette;
use crate::chart::theme::Theme;
use crate::types::series::AccuracyPoint;
use crate::types::series::RetentionData;

const TOP: f64 = 40.0;
const RIGHT: f64 = 40.0;
const BOTTOM: f64 = 60.0;
const LEFT: f64 = 60.0;

/// Number of gaps between horizontal gridlines.
const GRID_STEPS: u32 = 5;

/// Retention charts label every this many points.
const RETENTION_LABEL_STEP: usize = 15;

/// Side of the square drawn for a point with no neighbours.
const DOT: f64 = 4.0;

/// Maps series indices and percentages to pixels.
struct Frame {
    width: f64,
    height: f64,
    points: usize,
    lo: f64,
    hi: f64,
}

impl Frame {
    fn new<S: Surface>(surface: &S, points: usize, (lo, hi): (f64, f64)) -> Self {
        Self {
            width: surface.width(),
            height: surface.height(),
            points,
            lo,
            hi,
        }
    }

    fn plot_width(&self) -> f64 {
        self.width - LEFT - RIGHT
    }

    fn plot_height(&self) -> f64 {
        self.height - TOP - BOTTOM
    }

    fn bottom(&self) -> f64 {
        self.height - BOTTOM
    }

    fn x(&self, index: usize) -> f64 {
        if self.points <= 1 {
            return LEFT + self.plot_width() / 2.0;
        }
        LEFT + (index as f64 / (self.points - 1) as f64) * self.plot_width()
    }

    fn y(&self, value: f64) -> f64 {
        TOP + self.plot_height() - ((value - self.lo) / (self.hi - self.lo)) * self.plot_height()
    }
}

/// Horizontal gridlines with percentage labels, then the two axes.
fn draw_grid<S: Surface>(surface: &mut S, frame: &Frame, palette: &Palette) {
    let label = TextStyle::new(palette.label, 12.0, Align::Right);
    for step in 0..=GRID_STEPS {
        let value = frame.lo + (frame.hi - frame.lo) * (step as f64 / GRID_STEPS as f64);
        let y = frame.y(value);
        surface.stroke_path(
            &[Point::new(LEFT, y), Point::new(frame.width - RIGHT, y)],
            Stroke::solid(palette.grid, 1.0),
        );
        surface.fill_text(
            &format!("{}%", value.round() as i64),
            Point::new(LEFT - 10.0, y + 4.0),
            label,
        );
    }
    surface.stroke_path(
        &[
            Point::new(LEFT, TOP),
            Point::new(LEFT, frame.bottom()),
            Point::new(frame.width - RIGHT, frame.bottom()),
        ],
        Stroke::solid(palette.axis, 2.0),
    );
}

/// Draw a series, lifting the pen at every gap. A value between two gaps is
/// drawn as a dot so that it stays visible.
fn draw_series<S: Surface>(
    surface: &mut S,
    frame: &Frame,
    values: &[Option<f64>],
    stroke: Stroke,
) {
    let mut run: Vec<Point> = Vec::new();
    for (index, value) in values.iter().enumerate() {
        match value {
            Some(value) => run.push(Point::new(frame.x(index), frame.y(*value))),
            None => flush_run(surface, &mut run, stroke),
        }
    }
    flush_run(surface, &mut run, stroke);
}

fn flush_run<S: Surface>(surface: &mut S, run: &mut Vec<Point>, stroke: Stroke) {
    match run.as_slice() {
        [] => {}
        [point] => surface.fill_rect(
            point.x - DOT / 2.0,
            point.y - DOT / 2.0,
            DOT,
            DOT,
            stroke.color,
        ),
        points => surface.stroke_path(points, stroke),
    }
    run.clear();
}

fn draw_date_labels<S: Surface>(
    surface: &mut S,
    frame: &Frame,
    dates: &[NaiveDate],
    step: usize,
    palette: &Palette,
) {
    let style = TextStyle::new(palette.label, 11.0, Align::Center);
    for (index, date) in dates.iter().enumerate().step_by(step) {
        surface.fill_text(
            &date_label(*date),
            Point::new(frame.x(index), frame.bottom() + 20.0),
            style,
        );
    }
}

fn format_percent(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{value:.0}")
    } else {
        format!("{value:.1}")
    }
}

/// Draw measured retention as a solid line and the server's forecast as a
/// dashed line that starts where the measured line ends. Days without a
/// retention value are left out of the shared axis.
pub fn draw_retention_chart<S: Surface>(surface: &mut S, data: &RetentionData, theme: Theme) {
    let palette = theme.palette();
    surface.clear();

    let historical: Vec<(NaiveDate, f64)> = data
        .historical
        .iter()
        .filter_map(|point| point.retention.map(|value| (point.date, value)))
        .collect();
    let past: Vec<f64> = historical.iter().map(|(_, value)| *value).collect();
    let forecast: Vec<f64> = data
        .predictions
        .iter()
        .map(|point| point.predicted_retention)
        .collect();

    let dates: Vec<NaiveDate> = historical
        .iter()
        .map(|(date, _)| *date)
        .chain(data.predictions.iter().map(|point| point.date))
        .collect();
    if dates.is_empty() {
        return;
    }

    let measured: Vec<Option<f64>> = past
        .iter()
        .copied()
        .map(Some)
        .chain(forecast.iter().map(|_| None))
        .collect();

    let all: Vec<f64> = past.iter().chain(forecast.iter()).copied().collect();
    let frame = Frame::new(surface, dates.len(), percent_bounds(&all));

    draw_grid(surface, &frame, palette);
    draw_series(
        surface,
        &frame,
        &measured,
        Stroke::solid(palette.historical, 3.0),
    );
    if !forecast.is_empty() {
        draw_series(
            surface,
            &frame,
            &seam_predictions(&past, &forecast),
            Stroke::dashed(palette.predicted, 3.0, 5.0, 5.0),
        );
    }
    draw_date_labels(surface, &frame, &dates, RETENTION_LABEL_STEP, palette);

    if !past.is_empty() {
        let x = frame.x(past.len() - 1);
        surface.stroke_path(
            &[Point::new(x, TOP), Point::new(x, frame.bottom())],
            Stroke::dashed(palette.today, 2.0, 3.0, 3.0),
        );
        surface.fill_text(
            "Today",
            Point::new(x, TOP - 10.0),
            TextStyle::new(palette.today, 11.0, Align::Center).bold(),
        );
    }

    if let Some(average) = data.avg_retention {
        if average != 0.0 {
            surface.fill_text(
                &format!("Average Retention: {}%", format_percent(average)),
                Point::new(LEFT, TOP - 15.0),
                TextStyle::new(palette.text, 13.0, Align::Left).bold(),
            );
        }
    }
}

/// Draw daily accuracy for the `days` days up to `today`. Days without
/// reviews are gaps in the line.
pub fn draw_accuracy_chart<S: Surface>(
    surface: &mut S,
    accuracy: &[AccuracyPoint],
    today: NaiveDate,
    days: u32,
    theme: Theme,
) {
    let palette = theme.palette();
    surface.clear();

    let filled = fill_days(
        accuracy
            .iter()
            .filter_map(|point| point.accuracy.map(|value| (point.date, value))),
        today,
        days,
    );
    let dates: Vec<NaiveDate> = filled.iter().map(|(date, _)| *date).collect();
    let values: Vec<Option<f64>> = filled.iter().map(|(_, value)| *value).collect();
    let present: Vec<f64> = values.iter().flatten().copied().collect();

    let frame = Frame::new(surface, values.len(), percent_bounds(&present));
    draw_grid(surface, &frame, palette);
    draw_series(surface, &frame, &values, Stroke::solid(palette.bar, 2.0));
    let step = ((values.len() + 9) / 10).max(1);
    draw_date_labels(surface, &frame, &dates, step, palette);
}
