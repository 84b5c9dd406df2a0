/// Square root that works with or without `std`.
pub(crate) fn sqrt(value: f64) -> f64 {
    #[cfg(feature = "std")]
    {
        value.sqrt()
    }
    #[cfg(not(feature = "std"))]
    {
        libm::sqrt(value)
    }
}

pub(crate) fn abs(value: f64) -> f64 {
    #[cfg(feature = "std")]
    {
        value.abs()
    }
    #[cfg(not(feature = "std"))]
    {
        libm::fabs(value)
    }
}

pub(crate) fn sin_cos(angle: f64) -> (f64, f64) {
    #[cfg(feature = "std")]
    {
        angle.sin_cos()
    }
    #[cfg(not(feature = "std"))]
    {
        (libm::sin(angle), libm::cos(angle))
    }
}

/// A 2D vector used for position, speed and acceleration.
///
/// Values are immutable in spirit: every operation returns a new vector.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vector2D {
    pub x: f64,
    pub y: f64,
}

impl Vector2D {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub const fn zero() -> Self {
        Self { x: 0.0, y: 0.0 }
    }

    /// Unit vector pointing at `angle` radians.
    pub fn from_angle(angle: f64) -> Self {
        let (sin, cos) = sin_cos(angle);
        Self { x: cos, y: sin }
    }

    pub fn length(&self) -> f64 {
        sqrt(self.x * self.x + self.y * self.y)
    }

    pub fn dot(&self, other: &Vector2D) -> f64 {
        self.x * other.x + self.y * other.y
    }

    /// Unit vector in the same direction. A zero vector stays zero.
    pub fn normalize(&self) -> Self {
        let len = self.length();
        let divisor = if len == 0.0 { 1.0 } else { len };
        Self {
            x: self.x / divisor,
            y: self.y / divisor,
        }
    }

    pub fn inverse(&self) -> Self {
        Self {
            x: -self.x,
            y: -self.y,
        }
    }

    pub fn scale(&self, factor: f64) -> Self {
        Self {
            x: self.x * factor,
            y: self.y * factor,
        }
    }

    pub fn set_length(&self, length: f64) -> Self {
        self.normalize().scale(length)
    }

    /// Rescale so the length lies in `[min, max]`.
    ///
    /// A zero vector has no direction to keep; with `min > 0` it becomes
    /// `(min, 0)`.
    pub fn clamp_length(&self, min: f64, max: f64) -> Self {
        let len = self.length();
        if len > max {
            self.set_length(max)
        } else if len < min {
            if len == 0.0 {
                Self::new(min, 0.0)
            } else {
                self.set_length(min)
            }
        } else {
            *self
        }
    }

    /// Bounce off a minimum-x wall: x becomes non-negative.
    pub fn reflect_min_x(&self) -> Self {
        Self {
            x: abs(self.x),
            y: self.y,
        }
    }

    /// Bounce off a maximum-x wall: x becomes non-positive.
    pub fn reflect_max_x(&self) -> Self {
        Self {
            x: -abs(self.x),
            y: self.y,
        }
    }

    pub fn reflect_min_y(&self) -> Self {
        Self {
            x: self.x,
            y: abs(self.y),
        }
    }

    pub fn reflect_max_y(&self) -> Self {
        Self {
            x: self.x,
            y: -abs(self.y),
        }
    }
}

impl core::ops::Add for Vector2D {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self {
            x: self.x + other.x,
            y: self.y + other.y,
        }
    }
}

impl core::ops::Sub for Vector2D {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self {
            x: self.x - other.x,
            y: self.y - other.y,
        }
    }
}

impl core::ops::Mul<f64> for Vector2D {
    type Output = Self;

    fn mul(self, scalar: f64) -> Self {
        self.scale(scalar)
    }
}

impl core::ops::Neg for Vector2D {
    type Output = Self;

    fn neg(self) -> Self {
        self.inverse()
    }
}
