use core::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Sub, SubAssign};

use rand::Rng;

use crate::math;

/// A 2D vector used for position, velocity and steering forces.
///
/// Value-returning methods leave the receiver untouched; the `*_mut`
/// variants update in place and return `&mut Self` so they chain.
/// Dividing by zero, normalizing a zero vector and setting the magnitude of
/// a zero vector are all no-ops rather than sources of NaN.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vector2 {
    pub x: f32,
    pub y: f32,
}

impl Vector2 {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub const fn zero() -> Self {
        Self { x: 0.0, y: 0.0 }
    }

    /// Random vector with both components drawn from `[-1, 1)`.
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self {
            x: rng.gen::<f32>() * 2.0 - 1.0,
            y: rng.gen::<f32>() * 2.0 - 1.0,
        }
    }

    pub fn set(&mut self, x: f32, y: f32) -> &mut Self {
        self.x = x;
        self.y = y;
        self
    }

    pub fn magnitude(&self) -> f32 {
        math::sqrt(self.magnitude_squared())
    }

    pub fn magnitude_squared(&self) -> f32 {
        self.x * self.x + self.y * self.y
    }

    pub fn is_zero(&self) -> bool {
        self.x == 0.0 && self.y == 0.0
    }

    pub fn normalize(&self) -> Self {
        let mut v = *self;
        v.normalize_mut();
        v
    }

    pub fn normalize_mut(&mut self) -> &mut Self {
        let mag = self.magnitude();
        if mag != 0.0 {
            *self /= mag;
        }
        self
    }

    /// Clamps the magnitude to `max`, leaving shorter vectors untouched.
    pub fn limit(&self, max: f32) -> Self {
        let mut v = *self;
        v.limit_mut(max);
        v
    }

    pub fn limit_mut(&mut self, max: f32) -> &mut Self {
        if self.magnitude_squared() > max * max {
            self.normalize_mut();
            *self *= max;
        }
        self
    }

    /// Rescales to length `mag`. A zero vector stays zero.
    pub fn set_magnitude(&self, mag: f32) -> Self {
        let mut v = *self;
        v.set_magnitude_mut(mag);
        v
    }

    pub fn set_magnitude_mut(&mut self, mag: f32) -> &mut Self {
        self.normalize_mut();
        *self *= mag;
        self
    }

    pub fn add_mut(&mut self, other: Vector2) -> &mut Self {
        *self += other;
        self
    }

    pub fn sub_mut(&mut self, other: Vector2) -> &mut Self {
        *self -= other;
        self
    }

    pub fn scale_mut(&mut self, scalar: f32) -> &mut Self {
        *self *= scalar;
        self
    }

    pub fn div_mut(&mut self, scalar: f32) -> &mut Self {
        *self /= scalar;
        self
    }

    pub fn distance(&self, other: &Vector2) -> f32 {
        math::sqrt(self.distance_squared(other))
    }

    pub fn distance_squared(&self, other: &Vector2) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }

    /// Angle of the vector in radians, in `(-π, π]`.
    pub fn heading(&self) -> f32 {
        math::atan2(self.y, self.x)
    }
}

impl Add for Vector2 {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self {
            x: self.x + other.x,
            y: self.y + other.y,
        }
    }
}

impl Sub for Vector2 {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self {
            x: self.x - other.x,
            y: self.y - other.y,
        }
    }
}

impl Mul<f32> for Vector2 {
    type Output = Self;

    fn mul(self, scalar: f32) -> Self {
        Self {
            x: self.x * scalar,
            y: self.y * scalar,
        }
    }
}

impl Div<f32> for Vector2 {
    type Output = Self;

    fn div(self, scalar: f32) -> Self {
        if scalar == 0.0 {
            return self;
        }
        Self {
            x: self.x / scalar,
            y: self.y / scalar,
        }
    }
}

impl Neg for Vector2 {
    type Output = Self;

    fn neg(self) -> Self {
        Self {
            x: -self.x,
            y: -self.y,
        }
    }
}

impl AddAssign for Vector2 {
    fn add_assign(&mut self, other: Self) {
        self.x += other.x;
        self.y += other.y;
    }
}

impl SubAssign for Vector2 {
    fn sub_assign(&mut self, other: Self) {
        self.x -= other.x;
        self.y -= other.y;
    }
}

impl MulAssign<f32> for Vector2 {
    fn mul_assign(&mut self, scalar: f32) {
        self.x *= scalar;
        self.y *= scalar;
    }
}

impl DivAssign<f32> for Vector2 {
    fn div_assign(&mut self, scalar: f32) {
        *self = *self / scalar;
    }
}
