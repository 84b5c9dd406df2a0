use alloc::string::String;

use crate::EngineError;

/// Units shared by node positions, speeds, radii and pointer coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CoordinateSpace {
    /// Backing-store pixels of the drawing surface.
    #[default]
    DevicePixels,
    /// The unit square; the painter scales to the surface size.
    Normalized,
}

/// Where nodes are placed when the simulation starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SeedPlacement {
    /// Every node starts at the viewport center and drifts outwards.
    #[default]
    Center,
    /// Uniformly random inside the bounded area.
    Uniform,
}

/// Constants driving the integrator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhysicsConfig {
    pub min_speed: f64,
    pub max_speed: f64,
    /// Distance under which the pointer repels a node.
    pub mouse_radius: f64,
    /// Scale applied to both the drift restoring force and pointer repulsion.
    pub damping: f64,
    /// Margin kept between a node's center and the viewport edges.
    pub node_radius: f64,
}

impl PhysicsConfig {
    pub fn device_pixels() -> Self {
        Self {
            min_speed: 0.02,
            max_speed: 1.0,
            mouse_radius: 120.0,
            damping: 0.01,
            node_radius: 5.0,
        }
    }

    pub fn normalized() -> Self {
        Self {
            min_speed: 0.00002,
            max_speed: 0.01,
            mouse_radius: 0.12,
            damping: 0.01,
            node_radius: 0.0,
        }
    }
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self::device_pixels()
    }
}

/// How the mesh is painted. Sizes are in device pixels.
#[derive(Debug, Clone, PartialEq)]
pub struct StyleConfig {
    pub background: String,
    pub stroke: String,
    pub line_width: f64,
    pub draw_nodes: bool,
    pub disc_radius: f64,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            background: String::from("#eee"),
            stroke: String::from("#000"),
            line_width: 10.0,
            draw_nodes: true,
            disc_radius: 5.0,
        }
    }
}

/// Configuration for one mesh simulation run
#[derive(Debug, Clone, PartialEq)]
pub struct MeshConfig {
    pub node_count: usize,
    pub space: CoordinateSpace,
    pub seed: SeedPlacement,
    pub physics: PhysicsConfig,
    pub style: StyleConfig,
}

impl MeshConfig {
    pub const DEFAULT_NODE_COUNT: usize = 100;

    /// Defaults for the given space, with constants expressed in its units.
    pub fn for_space(space: CoordinateSpace) -> Self {
        let physics = match space {
            CoordinateSpace::DevicePixels => PhysicsConfig::device_pixels(),
            CoordinateSpace::Normalized => PhysicsConfig::normalized(),
        };
        Self {
            node_count: Self::DEFAULT_NODE_COUNT,
            space,
            seed: SeedPlacement::Center,
            physics,
            style: StyleConfig::default(),
        }
    }

    pub fn normalized() -> Self {
        Self::for_space(CoordinateSpace::Normalized)
    }

    pub fn validate(&self) -> Result<(), EngineError> {
        let p = &self.physics;
        if self.node_count == 0 {
            return Err(EngineError::InvalidConfig("node_count must be positive"));
        }
        let values = [p.min_speed, p.max_speed, p.mouse_radius, p.damping, p.node_radius];
        if values.iter().any(|v| !v.is_finite() || *v < 0.0) {
            return Err(EngineError::InvalidConfig(
                "physics values must be finite and non-negative",
            ));
        }
        if p.min_speed > p.max_speed {
            return Err(EngineError::InvalidConfig("min_speed exceeds max_speed"));
        }
        let s = &self.style;
        if !s.line_width.is_finite() || s.line_width < 0.0 {
            return Err(EngineError::InvalidConfig("line_width must be non-negative"));
        }
        if !s.disc_radius.is_finite() || s.disc_radius < 0.0 {
            return Err(EngineError::InvalidConfig("disc_radius must be non-negative"));
        }
        Ok(())
    }
}

impl Default for MeshConfig {
    fn default() -> Self {
        Self::for_space(CoordinateSpace::DevicePixels)
    }
}

/// Extent of the simulated area in the active coordinate space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportParams {
    pub width: f64,
    pub height: f64,
    pub node_radius: f64,
}

impl ViewportParams {
    pub fn new(width: f64, height: f64, node_radius: f64) -> Self {
        Self {
            width,
            height,
            node_radius,
        }
    }

    /// Allowed `[min, max]` range for a coordinate along an axis of `extent`.
    /// Axes narrower than two radii collapse to their midpoint.
    pub fn axis_bounds(&self, extent: f64) -> (f64, f64) {
        let lo = self.node_radius;
        let hi = extent - self.node_radius;
        if hi < lo {
            let mid = extent / 2.0;
            (mid, mid)
        } else {
            (lo, hi)
        }
    }

    pub fn x_bounds(&self) -> (f64, f64) {
        self.axis_bounds(self.width)
    }

    pub fn y_bounds(&self) -> (f64, f64) {
        self.axis_bounds(self.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(MeshConfig::default().validate().is_ok());
        assert!(MeshConfig::normalized().validate().is_ok());
    }

    #[test]
    fn test_normalized_constants() {
        let config = MeshConfig::normalized();
        assert_eq!(config.node_count, 100);
        assert_eq!(config.physics.max_speed, 0.01);
        assert_eq!(config.physics.mouse_radius, 0.12);
        assert_eq!(config.physics.node_radius, 0.0);
    }

    #[test]
    fn test_validate_rejects_inverted_speeds() {
        let mut config = MeshConfig::default();
        config.physics.min_speed = 2.0;
        config.physics.max_speed = 1.0;
        assert_eq!(
            config.validate(),
            Err(EngineError::InvalidConfig("min_speed exceeds max_speed"))
        );
    }

    #[test]
    fn test_validate_rejects_empty_mesh() {
        let mut config = MeshConfig::default();
        config.node_count = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_nan() {
        let mut config = MeshConfig::default();
        config.physics.damping = f64::NAN;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_axis_bounds() {
        let viewport = ViewportParams::new(100.0, 4.0, 5.0);
        assert_eq!(viewport.x_bounds(), (5.0, 95.0));
        assert_eq!(viewport.y_bounds(), (2.0, 2.0));
    }
}
