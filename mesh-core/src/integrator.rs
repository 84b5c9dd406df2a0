//! One-tick update rule for a single node.
//!
//! A tick runs five steps in a fixed order, each a pure function from node
//! to node: acceleration, speed, position, bounce, clamp. Later steps correct
//! for earlier ones, so the order must not change.

use crate::config::{PhysicsConfig, ViewportParams};
use crate::node::AnimatedNode;
use crate::vector::Vector2D;

/// Drift deceleration, or repulsion from a pointer within `mouse_radius`.
pub fn update_acceleration(
    node: AnimatedNode,
    pointer: Option<Vector2D>,
    physics: &PhysicsConfig,
) -> AnimatedNode {
    let drift = node.speed.inverse().scale(physics.damping);

    let acceleration = match pointer {
        Some(pointer) => {
            let away = node.position - pointer;
            let distance = away.length();
            if distance > physics.mouse_radius {
                drift
            } else {
                away.set_length(physics.mouse_radius - distance)
                    .scale(physics.damping)
            }
        }
        None => drift,
    };

    AnimatedNode { acceleration, ..node }
}

pub fn update_speed(node: AnimatedNode, physics: &PhysicsConfig) -> AnimatedNode {
    let speed = (node.speed + node.acceleration).clamp_length(physics.min_speed, physics.max_speed);
    AnimatedNode { speed, ..node }
}

pub fn update_position(node: AnimatedNode) -> AnimatedNode {
    AnimatedNode {
        position: node.position + node.speed,
        ..node
    }
}

/// Reflect speed off any wall the position has crossed. Position is untouched.
pub fn bounce(node: AnimatedNode, viewport: &ViewportParams) -> AnimatedNode {
    let (min_x, max_x) = viewport.x_bounds();
    let (min_y, max_y) = viewport.y_bounds();
    let mut speed = node.speed;

    if node.position.x < min_x {
        speed = speed.reflect_min_x();
    } else if node.position.x > max_x {
        speed = speed.reflect_max_x();
    }

    if node.position.y < min_y {
        speed = speed.reflect_min_y();
    } else if node.position.y > max_y {
        speed = speed.reflect_max_y();
    }

    AnimatedNode { speed, ..node }
}

pub fn clamp_position(node: AnimatedNode, viewport: &ViewportParams) -> AnimatedNode {
    let (min_x, max_x) = viewport.x_bounds();
    let (min_y, max_y) = viewport.y_bounds();
    let position = Vector2D::new(
        node.position.x.clamp(min_x, max_x),
        node.position.y.clamp(min_y, max_y),
    );
    AnimatedNode { position, ..node }
}

/// Advance a node by one tick.
pub fn step(
    node: &AnimatedNode,
    pointer: Option<Vector2D>,
    viewport: &ViewportParams,
    physics: &PhysicsConfig,
) -> AnimatedNode {
    let node = update_acceleration(*node, pointer, physics);
    let node = update_speed(node, physics);
    let node = update_position(node);
    let node = bounce(node, viewport);
    clamp_position(node, viewport)
}
