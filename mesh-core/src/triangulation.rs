//! Turns the live node set into the edge list the painter strokes.
//!
//! The triangulation itself is an external capability behind [`Triangulator`];
//! this module only flattens its triangles into edges.

use alloc::vec::Vec;

use crate::node::AnimatedNode;
use crate::vector::Vector2D;

/// Indices into the point sequence passed to [`Triangulator::triangulate`].
pub type Triangle = [usize; 3];

/// Anything that can produce a Delaunay triangulation of a point set.
///
/// Degenerate input (fewer than three points, all collinear, duplicates)
/// may yield an empty result.
pub trait Triangulator {
    fn triangulate(&self, points: &[Vector2D]) -> Vec<Triangle>;
}

impl<F> Triangulator for F
where
    F: Fn(&[Vector2D]) -> Vec<Triangle>,
{
    fn triangulate(&self, points: &[Vector2D]) -> Vec<Triangle> {
        self(points)
    }
}

/// A drawn connection between two nodes of the current frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Edge<'a> {
    pub a: &'a AnimatedNode,
    pub b: &'a AnimatedNode,
}

impl<'a> Edge<'a> {
    pub fn new(a: &'a AnimatedNode, b: &'a AnimatedNode) -> Self {
        Self { a, b }
    }
}

pub fn edges_for_triangle<'a>(nodes: &'a [AnimatedNode], [a, b, c]: Triangle) -> [Edge<'a>; 3] {
    [
        Edge::new(&nodes[a], &nodes[b]),
        Edge::new(&nodes[b], &nodes[c]),
        Edge::new(&nodes[c], &nodes[a]),
    ]
}

/// Triangulate the node positions and flatten every triangle into three edges.
///
/// Shared edges between neighbouring triangles appear twice. Triangles with
/// indices outside `nodes` are dropped.
pub fn edges_for_nodes<'a, T>(triangulator: &T, nodes: &'a [AnimatedNode]) -> Vec<Edge<'a>>
where
    T: Triangulator + ?Sized,
{
    if nodes.len() < 3 {
        return Vec::new();
    }

    let points: Vec<Vector2D> = nodes.iter().map(|node| node.position).collect();
    triangulator
        .triangulate(&points)
        .into_iter()
        .filter(|triangle| triangle.iter().all(|&i| i < nodes.len()))
        .flat_map(|triangle| edges_for_triangle(nodes, triangle))
        .collect()
}

/// [`Triangulator`] backed by the `delaunator` crate.
#[cfg(feature = "delaunator")]
#[derive(Debug, Clone, Copy, Default)]
pub struct DelaunatorTriangulator;

#[cfg(feature = "delaunator")]
impl Triangulator for DelaunatorTriangulator {
    fn triangulate(&self, points: &[Vector2D]) -> Vec<Triangle> {
        let points: Vec<delaunator::Point> = points
            .iter()
            .map(|p| delaunator::Point { x: p.x, y: p.y })
            .collect();

        delaunator::triangulate(&points)
            .triangles
            .chunks_exact(3)
            .map(|t| [t[0], t[1], t[2]])
            .collect()
    }
}
