#[cfg(feature = "std")]
use rand::Rng;

#[cfg(feature = "std")]
use crate::config::{PhysicsConfig, SeedPlacement};
use crate::config::ViewportParams;
use crate::vector::Vector2D;

/// A single simulated mesh node
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimatedNode {
    pub position: Vector2D,
    pub speed: Vector2D,
    pub acceleration: Vector2D,
}

impl AnimatedNode {
    pub fn new(position: Vector2D, speed: Vector2D) -> Self {
        Self {
            position,
            speed,
            acceleration: Vector2D::zero(),
        }
    }

    /// A node moving at `angle` radians with the given speed magnitude.
    pub fn with_heading(position: Vector2D, angle: f64, magnitude: f64) -> Self {
        Self::new(position, Vector2D::from_angle(angle) * magnitude)
    }

    /// A node with a random heading and a speed magnitude drawn uniformly
    /// from `[min_speed, max_speed]`.
    #[cfg(feature = "std")]
    pub fn random<R: Rng + ?Sized>(position: Vector2D, physics: &PhysicsConfig, rng: &mut R) -> Self {
        let angle = rng.gen_range(0.0..core::f64::consts::TAU);
        let magnitude = if physics.max_speed > physics.min_speed {
            rng.gen_range(physics.min_speed..=physics.max_speed)
        } else {
            physics.min_speed
        };
        Self::with_heading(position, angle, magnitude)
    }
}

/// Starting position for a node under the given placement.
#[cfg(feature = "std")]
pub fn seed_position<R: Rng + ?Sized>(
    placement: SeedPlacement,
    viewport: &ViewportParams,
    rng: &mut R,
) -> Vector2D {
    match placement {
        SeedPlacement::Center => center_of(viewport),
        SeedPlacement::Uniform => {
            let (min_x, max_x) = viewport.x_bounds();
            let (min_y, max_y) = viewport.y_bounds();
            Vector2D::new(
                if max_x > min_x { rng.gen_range(min_x..max_x) } else { min_x },
                if max_y > min_y { rng.gen_range(min_y..max_y) } else { min_y },
            )
        }
    }
}

pub fn center_of(viewport: &ViewportParams) -> Vector2D {
    Vector2D::new(viewport.width / 2.0, viewport.height / 2.0)
}

/// Allocate `count` nodes for a fresh run.
#[cfg(feature = "std")]
pub fn spawn_nodes<R: Rng + ?Sized>(
    count: usize,
    placement: SeedPlacement,
    physics: &PhysicsConfig,
    viewport: &ViewportParams,
    rng: &mut R,
) -> alloc::vec::Vec<AnimatedNode> {
    (0..count)
        .map(|_| {
            let position = seed_position(placement, viewport, rng);
            AnimatedNode::random(position, physics, rng)
        })
        .collect()
}
