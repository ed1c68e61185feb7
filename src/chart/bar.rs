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
use crate::chart::surface::Align;
use crate::chart::surface::Point;
use crate::chart::surface::Stroke;
use crate::chart::surface::Surface;
use crate::chart::surface::TextStyle;
use crate::chart::theme::Theme;
use crate::types::series::CountPoint;

const PADDING: f64 = 40.0;

/// Gap on either side of each bar.
const BAR_GAP: f64 = 5.0;

/// Bars are scaled against at least this value, so a day with a handful of
/// reviews does not fill the whole chart.
const SCALE_FLOOR: u32 = 10;

const FONT_SIZE: f64 = 12.0;

/// Draw one bar per day, labelled with its value and date.
pub fn draw_bar_chart<S: Surface>(surface: &mut S, bars: &[(NaiveDate, u32)], theme: Theme) {
    let palette = theme.palette();
    let width = surface.width();
    let height = surface.height();
    surface.clear();

    if !bars.is_empty() {
        let scale = bars
            .iter()
            .map(|(_, count)| *count)
            .max()
            .unwrap_or(0)
            .max(SCALE_FLOOR) as f64;
        let bar_width = width / bars.len() as f64;
        let plot_height = height - PADDING * 2.0;
        let label = TextStyle::new(palette.bar_label, FONT_SIZE, Align::Center);

        for (index, (date, count)) in bars.iter().enumerate() {
            let bar_height = (*count as f64 / scale) * plot_height;
            let x = index as f64 * bar_width;
            let y = height - PADDING - bar_height;
            let center = x + bar_width / 2.0;
            surface.fill_rect(
                x + BAR_GAP,
                y,
                (bar_width - BAR_GAP * 2.0).max(0.0),
                bar_height,
                palette.bar,
            );
            surface.fill_text(&count.to_string(), Point::new(center, y - 5.0), label);
            surface.fill_text(&date_label(*date), Point::new(center, height - 10.0), label);
        }
    }

    let axis_x = PADDING - 10.0;
    surface.stroke_path(
        &[Point::new(axis_x, PADDING), Point::new(axis_x, height - PADDING)],
        Stroke::solid(palette.axis, 1.0),
    );
}

/// Draw review counts for the `days` days up to `today`. Days without
/// reviews are drawn as zero-height bars.
pub fn draw_count_chart<S: Surface>(
    surface: &mut S,
    counts: &[CountPoint],
    today: NaiveDate,
    days: u32,
    theme: Theme,
) {
    let filled: Vec<(NaiveDate, u32)> =
        fill_days(counts.iter().map(|p| (p.date, p.count)), today, days)
            .into_iter()
            .map(|(date, count)| (date, count.unwrap_or(0)))
            .collect();
    draw_bar_chart(surface, &filled, theme);
}
