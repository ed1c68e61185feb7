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

/// A CSS colour string.
pub type Color = &'static str;

#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Stroke {
    pub color: Color,
    pub width: f64,
    /// Dash and gap lengths, or `None` for a solid line.
    pub dash: Option<(f64, f64)>,
}

impl Stroke {
    pub fn solid(color: Color, width: f64) -> Self {
        Self {
            color,
            width,
            dash: None,
        }
    }

    pub fn dashed(color: Color, width: f64, dash: f64, gap: f64) -> Self {
        Self {
            color,
            width,
            dash: Some((dash, gap)),
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Align {
    Left,
    Center,
    Right,
}

#[derive(Clone, Copy, PartialEq, Debug)]
pub struct TextStyle {
    pub color: Color,
    pub size: f64,
    pub bold: bool,
    pub align: Align,
}

impl TextStyle {
    pub fn new(color: Color, size: f64, align: Align) -> Self {
        Self {
            color,
            size,
            bold: false,
            align,
        }
    }

    pub fn bold(self) -> Self {
        Self { bold: true, ..self }
    }
}

/// A 2D drawing target.
pub trait Surface {
    fn width(&self) -> f64;

    fn height(&self) -> f64;

    /// Erase everything drawn so far.
    fn clear(&mut self);

    /// Draw connected line segments through `points`.
    fn stroke_path(&mut self, points: &[Point], stroke: Stroke);

    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64, color: Color);

    fn fill_text(&mut self, text: &str, at: Point, style: TextStyle);
}

#[derive(Clone, PartialEq, Debug)]
pub enum DrawCommand {
    Path {
        points: Vec<Point>,
        stroke: Stroke,
    },
    Rect {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        color: Color,
    },
    Text {
        text: String,
        at: Point,
        style: TextStyle,
    },
}

/// A surface that keeps the list of commands drawn onto it.
#[derive(Clone, PartialEq, Debug)]
pub struct Recorder {
    width: f64,
    height: f64,
    commands: Vec<DrawCommand>,
}

impl Recorder {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            commands: Vec::new(),
        }
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Text of every label drawn, in order.
    #[cfg(test)]
    pub fn texts(&self) -> Vec<&str> {
        self.commands
            .iter()
            .filter_map(|command| match command {
                DrawCommand::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Every path drawn in `color`.
    #[cfg(test)]
    pub fn paths(&self, color: Color) -> Vec<&[Point]> {
        self.commands
            .iter()
            .filter_map(|command| match command {
                DrawCommand::Path { points, stroke } if stroke.color == color => {
                    Some(points.as_slice())
                }
                _ => None,
            })
            .collect()
    }
}

impl Surface for Recorder {
    fn width(&self) -> f64 {
        self.width
    }

    fn height(&self) -> f64 {
        self.height
    }

    fn clear(&mut self) {
        self.commands.clear();
    }

    fn stroke_path(&mut self, points: &[Point], stroke: Stroke) {
        if points.len() < 2 {
            return;
        }
        self.commands.push(DrawCommand::Path {
            points: points.to_vec(),
            stroke,
        });
    }

    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64, color: Color) {
        self.commands.push(DrawCommand::Rect {
            x,
            y,
            width,
            height,
            color,
        });
    }

    fn fill_text(&mut self, text: &str, at: Point, style: TextStyle) {
        self.commands.push(DrawCommand::Text {
            text: text.to_string(),
            at,
            style,
        });
    }
}
