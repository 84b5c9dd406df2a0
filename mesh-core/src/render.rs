//! Two-pass painter.
//!
//! Pass one fills the whole surface with the opaque background. Pass two
//! switches to `destination-out` and strokes the mesh, so the lines become
//! holes through which whatever sits behind the surface shows.

use core::f64::consts::TAU;

use crate::config::{CoordinateSpace, StyleConfig};
use crate::node::AnimatedNode;
use crate::surface::{CompositeMode, Surface};
use crate::triangulation::Edge;
use crate::vector::Vector2D;

/// Backing-store size of the drawing surface, in device pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SurfaceSize {
    pub width: u32,
    pub height: u32,
}

impl SurfaceSize {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Backing size for an on-screen size at the given device pixel ratio.
    pub fn from_css(css_width: f64, css_height: f64, pixel_ratio: f64) -> Self {
        let to_pixels = |css: f64| {
            let scaled = css * pixel_ratio;
            if scaled.is_finite() && scaled > 0.0 {
                scaled as u32
            } else {
                0
            }
        };
        Self::new(to_pixels(css_width), to_pixels(css_height))
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// Map a simulation position to surface pixels.
pub fn to_surface(position: Vector2D, space: CoordinateSpace, size: SurfaceSize) -> (f64, f64) {
    match space {
        CoordinateSpace::DevicePixels => (position.x, position.y),
        CoordinateSpace::Normalized => (
            position.x * f64::from(size.width),
            position.y * f64::from(size.height),
        ),
    }
}

pub fn paint_background<S: Surface>(
    surface: &mut S,
    style: &StyleConfig,
    size: SurfaceSize,
) -> Result<(), S::Error> {
    surface.set_fill_color(&style.background);
    surface.set_composite(CompositeMode::SourceOver)?;
    surface.fill_rect(0.0, 0.0, f64::from(size.width), f64::from(size.height));
    Ok(())
}

fn draw_edge<S: Surface>(surface: &mut S, edge: &Edge<'_>, space: CoordinateSpace, size: SurfaceSize) {
    let (ax, ay) = to_surface(edge.a.position, space, size);
    let (bx, by) = to_surface(edge.b.position, space, size);
    surface.begin_path();
    surface.move_to(ax, ay);
    surface.line_to(bx, by);
    surface.close_path();
    surface.stroke();
}

fn draw_node<S: Surface>(
    surface: &mut S,
    node: &AnimatedNode,
    radius: f64,
    space: CoordinateSpace,
    size: SurfaceSize,
) -> Result<(), S::Error> {
    let (x, y) = to_surface(node.position, space, size);
    surface.begin_path();
    surface.arc(x, y, radius, 0.0, TAU)?;
    surface.close_path();
    surface.fill();
    Ok(())
}

/// Paint one frame. With no edges only the background is painted.
pub fn paint<S: Surface>(
    surface: &mut S,
    style: &StyleConfig,
    space: CoordinateSpace,
    size: SurfaceSize,
    nodes: &[AnimatedNode],
    edges: &[Edge<'_>],
) -> Result<(), S::Error> {
    paint_background(surface, style, size)?;

    if edges.is_empty() {
        log::trace!("degenerate mesh, painting background only");
        return Ok(());
    }

    surface.set_stroke_color(&style.stroke);
    surface.set_line_width(style.line_width);
    surface.set_composite(CompositeMode::DestinationOut)?;

    for edge in edges {
        draw_edge(surface, edge, space, size);
    }

    if style.draw_nodes {
        // Fill color only matters for its alpha under destination-out.
        surface.set_fill_color(&style.stroke);
        for node in nodes {
            draw_node(surface, node, style.disc_radius, space, size)?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::{CommandRecorder, DrawCommand};

    #[test]
    fn test_surface_size_from_css() {
        assert_eq!(SurfaceSize::from_css(400.0, 300.0, 2.0), SurfaceSize::new(800, 600));
        assert_eq!(SurfaceSize::from_css(100.5, 10.0, 1.5), SurfaceSize::new(150, 15));
        assert!(SurfaceSize::from_css(0.0, 300.0, 2.0).is_empty());
        assert!(SurfaceSize::from_css(400.0, 300.0, f64::NAN).is_empty());
    }

    #[test]
    fn test_to_surface_normalized() {
        let size = SurfaceSize::new(800, 600);
        let point = to_surface(Vector2D::new(0.5, 0.25), CoordinateSpace::Normalized, size);
        assert_eq!(point, (400.0, 150.0));
    }

    #[test]
    fn test_background_only_without_edges() {
        let mut recorder = CommandRecorder::new();
        let nodes = [AnimatedNode::new(Vector2D::new(1.0, 1.0), Vector2D::zero())];
        paint(
            &mut recorder,
            &StyleConfig::default(),
            CoordinateSpace::DevicePixels,
            SurfaceSize::new(10, 10),
            &nodes,
            &[],
        )
        .unwrap();

        assert_eq!(
            recorder.commands,
            vec![
                DrawCommand::FillColor("#eee".into()),
                DrawCommand::Composite(CompositeMode::SourceOver),
                DrawCommand::FillRect {
                    x: 0.0,
                    y: 0.0,
                    width: 10.0,
                    height: 10.0
                },
            ]
        );
    }

    #[test]
    fn test_erase_pass_follows_background() {
        let nodes = [
            AnimatedNode::new(Vector2D::new(1.0, 1.0), Vector2D::zero()),
            AnimatedNode::new(Vector2D::new(5.0, 1.0), Vector2D::zero()),
        ];
        let edges = [Edge::new(&nodes[0], &nodes[1])];
        let mut recorder = CommandRecorder::new();
        paint(
            &mut recorder,
            &StyleConfig::default(),
            CoordinateSpace::DevicePixels,
            SurfaceSize::new(10, 10),
            &nodes,
            &edges,
        )
        .unwrap();

        let over = recorder
            .commands
            .iter()
            .position(|c| *c == DrawCommand::Composite(CompositeMode::SourceOver))
            .unwrap();
        let out = recorder
            .commands
            .iter()
            .position(|c| *c == DrawCommand::Composite(CompositeMode::DestinationOut))
            .unwrap();
        let first_stroke = recorder
            .commands
            .iter()
            .position(|c| *c == DrawCommand::Stroke)
            .unwrap();
        assert!(over < out && out < first_stroke);
        assert_eq!(recorder.count(|c| matches!(c, DrawCommand::Stroke)), 1);
        assert_eq!(recorder.count(|c| matches!(c, DrawCommand::Arc { .. })), 2);
    }

    #[test]
    fn test_nodes_hidden_when_disabled() {
        let nodes = [
            AnimatedNode::new(Vector2D::new(1.0, 1.0), Vector2D::zero()),
            AnimatedNode::new(Vector2D::new(5.0, 1.0), Vector2D::zero()),
        ];
        let edges = [Edge::new(&nodes[0], &nodes[1])];
        let style = StyleConfig {
            draw_nodes: false,
            ..StyleConfig::default()
        };
        let mut recorder = CommandRecorder::new();
        paint(
            &mut recorder,
            &style,
            CoordinateSpace::DevicePixels,
            SurfaceSize::new(10, 10),
            &nodes,
            &edges,
        )
        .unwrap();
        assert_eq!(recorder.count(|c| matches!(c, DrawCommand::Arc { .. })), 0);
    }
}
