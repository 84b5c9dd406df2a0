use mesh_core::{CompositeMode, Surface};
use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

/// [`Surface`] over a browser 2d canvas context
pub struct CanvasSurface {
    context: CanvasRenderingContext2d,
}

impl CanvasSurface {
    pub fn new(context: CanvasRenderingContext2d) -> Self {
        Self { context }
    }
}

impl Surface for CanvasSurface {
    type Error = JsValue;

    fn set_fill_color(&mut self, color: &str) {
        self.context.set_fill_style_str(color);
    }

    fn set_stroke_color(&mut self, color: &str) {
        self.context.set_stroke_style_str(color);
    }

    fn set_line_width(&mut self, width: f64) {
        self.context.set_line_width(width);
    }

    fn set_composite(&mut self, mode: CompositeMode) -> Result<(), JsValue> {
        self.context.set_global_composite_operation(mode.as_str())
    }

    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.context.fill_rect(x, y, width, height);
    }

    fn begin_path(&mut self) {
        self.context.begin_path();
    }

    fn move_to(&mut self, x: f64, y: f64) {
        self.context.move_to(x, y);
    }

    fn line_to(&mut self, x: f64, y: f64) {
        self.context.line_to(x, y);
    }

    fn close_path(&mut self) {
        self.context.close_path();
    }

    fn stroke(&mut self) {
        self.context.stroke();
    }

    fn arc(&mut self, x: f64, y: f64, radius: f64, start: f64, end: f64) -> Result<(), JsValue> {
        self.context.arc(x, y, radius, start, end)
    }

    fn fill(&mut self) {
        self.context.fill();
    }
}
