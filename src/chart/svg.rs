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

//! Render recorded draw commands as inline SVG.

use maud::Markup;
use maud::html;

use crate::chart::surface::Align;
use crate::chart::surface::Color;
use crate::chart::surface::DrawCommand;
use crate::chart::surface::Point;
use crate::chart::surface::Recorder;
use crate::chart::surface::Stroke;
use crate::chart::surface::Surface;

fn points_attr(points: &[Point]) -> String {
    points
        .iter()
        .map(|p| format!("{},{}", p.x, p.y))
        .collect::<Vec<_>>()
        .join(" ")
}

fn dash_attr(stroke: &Stroke) -> Option<String> {
    stroke.dash.map(|(dash, gap)| format!("{dash},{gap}"))
}

fn anchor(align: Align) -> &'static str {
    match align {
        Align::Left => "start",
        Align::Center => "middle",
        Align::Right => "end",
    }
}

pub fn to_svg(recorder: &Recorder, background: Color) -> Markup {
    let width = recorder.width();
    let height = recorder.height();
    html! {
        svg xmlns="http://www.w3.org/2000/svg"
            width=(width)
            height=(height)
            viewBox=(format!("0 0 {width} {height}")) {
            rect x="0" y="0" width=(width) height=(height) fill=(background) {}
            @for command in recorder.commands() {
                @match command {
                    DrawCommand::Path { points, stroke } => {
                        polyline
                            points=(points_attr(points))
                            fill="none"
                            stroke=(stroke.color)
                            stroke-width=(stroke.width)
                            stroke-dasharray=[dash_attr(stroke)] {}
                    }
                    DrawCommand::Rect { x, y, width, height, color } => {
                        rect x=(x) y=(y) width=(width) height=(height) fill=(color) {}
                    }
                    DrawCommand::Text { text, at, style } => {
                        text
                            x=(at.x)
                            y=(at.y)
                            fill=(style.color)
                            font-size=(style.size)
                            font-family="sans-serif"
                            text-anchor=(anchor(style.align))
                            font-weight=[style.bold.then_some("bold")] {
                            (text)
                        }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::surface::TextStyle;

    #[test]
    fn test_render() {
        let mut recorder = Recorder::new(200.0, 100.0);
        recorder.stroke_path(
            &[Point::new(0.0, 0.0), Point::new(10.0, 5.5)],
            Stroke::dashed("#2196F3", 3.0, 5.0, 5.0),
        );
        recorder.fill_rect(1.0, 2.0, 3.0, 4.0, "#4CAF50");
        recorder.fill_text(
            "<Today>",
            Point::new(5.0, 6.0),
            TextStyle::new("#FF9800", 11.0, Align::Center).bold(),
        );
        let svg = to_svg(&recorder, "#ffffff").into_string();
        assert!(svg.starts_with("<svg"));
        assert!(svg.contains(r#"viewBox="0 0 200 100""#));
        assert!(svg.contains(r#"points="0,0 10,5.5""#));
        assert!(svg.contains(r#"stroke-dasharray="5,5""#));
        assert!(svg.contains(r##"<rect x="1" y="2" width="3" height="4" fill="#4CAF50"></rect>"##));
        assert!(svg.contains(r#"text-anchor="middle""#));
        assert!(svg.contains(r#"font-weight="bold""#));
        assert!(svg.contains("&lt;Today&gt;"));
    }

    #[test]
    fn test_solid_lines_have_no_dash() {
        let mut recorder = Recorder::new(50.0, 50.0);
        recorder.stroke_path(
            &[Point::new(0.0, 0.0), Point::new(1.0, 1.0)],
            Stroke::solid("#000", 1.0),
        );
        let svg = to_svg(&recorder, "#ffffff").into_string();
        assert!(!svg.contains("stroke-dasharray"));
    }
}
