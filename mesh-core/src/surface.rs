use alloc::string::String;
use alloc::vec::Vec;

/// Compositing modes the painter needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompositeMode {
    /// Draw on top of what is already there.
    SourceOver,
    /// Erase existing pixels wherever the new shape is drawn.
    DestinationOut,
}

impl CompositeMode {
    /// Name used by canvas-style `globalCompositeOperation`.
    pub fn as_str(&self) -> &'static str {
        match self {
            CompositeMode::SourceOver => "source-over",
            CompositeMode::DestinationOut => "destination-out",
        }
    }
}

/// A 2D immediate-mode drawing context.
pub trait Surface {
    type Error;

    fn set_fill_color(&mut self, color: &str);
    fn set_stroke_color(&mut self, color: &str);
    fn set_line_width(&mut self, width: f64);
    fn set_composite(&mut self, mode: CompositeMode) -> Result<(), Self::Error>;
    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64);
    fn begin_path(&mut self);
    fn move_to(&mut self, x: f64, y: f64);
    fn line_to(&mut self, x: f64, y: f64);
    fn close_path(&mut self);
    fn stroke(&mut self);
    fn arc(&mut self, x: f64, y: f64, radius: f64, start: f64, end: f64) -> Result<(), Self::Error>;
    fn fill(&mut self);
}

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    FillColor(String),
    StrokeColor(String),
    LineWidth(f64),
    Composite(CompositeMode),
    FillRect { x: f64, y: f64, width: f64, height: f64 },
    BeginPath,
    MoveTo(f64, f64),
    LineTo(f64, f64),
    ClosePath,
    Stroke,
    Arc { x: f64, y: f64, radius: f64 },
    Fill,
}

/// A [`Surface`] that records every call, for inspecting painted frames
/// without a real drawing backend.
#[derive(Debug, Clone, Default)]
pub struct CommandRecorder {
    pub commands: Vec<DrawCommand>,
}

impl CommandRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }

    pub fn count(&self, pred: impl Fn(&DrawCommand) -> bool) -> usize {
        self.commands.iter().filter(|c| pred(c)).count()
    }
}

impl Surface for CommandRecorder {
    type Error = core::convert::Infallible;

    fn set_fill_color(&mut self, color: &str) {
        self.commands.push(DrawCommand::FillColor(String::from(color)));
    }

    fn set_stroke_color(&mut self, color: &str) {
        self.commands.push(DrawCommand::StrokeColor(String::from(color)));
    }

    fn set_line_width(&mut self, width: f64) {
        self.commands.push(DrawCommand::LineWidth(width));
    }

    fn set_composite(&mut self, mode: CompositeMode) -> Result<(), Self::Error> {
        self.commands.push(DrawCommand::Composite(mode));
        Ok(())
    }

    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.commands.push(DrawCommand::FillRect { x, y, width, height });
    }

    fn begin_path(&mut self) {
        self.commands.push(DrawCommand::BeginPath);
    }

    fn move_to(&mut self, x: f64, y: f64) {
        self.commands.push(DrawCommand::MoveTo(x, y));
    }

    fn line_to(&mut self, x: f64, y: f64) {
        self.commands.push(DrawCommand::LineTo(x, y));
    }

    fn close_path(&mut self) {
        self.commands.push(DrawCommand::ClosePath);
    }

    fn stroke(&mut self) {
        self.commands.push(DrawCommand::Stroke);
    }

    fn arc(&mut self, x: f64, y: f64, radius: f64, _start: f64, _end: f64) -> Result<(), Self::Error> {
        self.commands.push(DrawCommand::Arc { x, y, radius });
        Ok(())
    }

    fn fill(&mut self) {
        self.commands.push(DrawCommand::Fill);
    }
}
