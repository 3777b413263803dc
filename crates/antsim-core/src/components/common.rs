//! Common components and math used across agents and food.

use serde::{Deserialize, Serialize};

/// 2D point / vector in screen units
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn distance_squared(&self, other: &Self) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }

    pub fn distance(&self, other: &Self) -> f32 {
        self.distance_squared(other).sqrt()
    }

    pub fn length(&self) -> f32 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    /// Unit vector in the same direction, or zero for a zero-length vector
    pub fn normalize(&self) -> Self {
        let len = self.length();
        if len > 0.0 {
            Self {
                x: self.x / len,
                y: self.y / len,
            }
        } else {
            Self::ZERO
        }
    }

    pub fn is_zero(&self) -> bool {
        self.x == 0.0 && self.y == 0.0
    }

    /// Angle of the vector in radians, measured from +x toward +y
    pub fn angle(&self) -> f32 {
        self.y.atan2(self.x)
    }

    /// Component-wise clamp into `[min, max]`
    pub fn clamp(&self, min: Self, max: Self) -> Self {
        Self {
            x: self.x.max(min.x).min(max.x),
            y: self.y.max(min.y).min(max.y),
        }
    }
}

impl std::ops::Add for Vec2 {
    type Output = Self;
    fn add(self, other: Self) -> Self {
        Self {
            x: self.x + other.x,
            y: self.y + other.y,
        }
    }
}

impl std::ops::AddAssign for Vec2 {
    fn add_assign(&mut self, other: Self) {
        self.x += other.x;
        self.y += other.y;
    }
}

impl std::ops::Sub for Vec2 {
    type Output = Self;
    fn sub(self, other: Self) -> Self {
        Self {
            x: self.x - other.x,
            y: self.y - other.y,
        }
    }
}

impl std::ops::Mul<f32> for Vec2 {
    type Output = Self;
    fn mul(self, scalar: f32) -> Self {
        Self {
            x: self.x * scalar,
            y: self.y * scalar,
        }
    }
}

/// Screen rectangle anchored at the origin
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Bounds {
    pub width: u32,
    pub height: u32,
}

impl Bounds {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Whole-pixel center; odd dimensions round down
    pub fn center(&self) -> Vec2 {
        Vec2::new((self.width / 2) as f32, (self.height / 2) as f32)
    }

    /// Largest top-left corner an entity of `size` can occupy while fully on screen
    pub fn max_corner(&self, size: f32) -> Vec2 {
        Vec2::new(self.width as f32 - size, self.height as f32 - size)
    }

    /// Clamp a point so an entity of `size` stays inside the screen
    pub fn clamp(&self, point: Vec2, size: f32) -> Vec2 {
        point.clamp(Vec2::ZERO, self.max_corner(size))
    }

    pub fn contains(&self, point: &Vec2, size: f32) -> bool {
        let max = self.max_corner(size);
        point.x >= 0.0 && point.x <= max.x && point.y >= 0.0 && point.y <= max.y
    }
}

/// Where an entity is on screen (top-left corner, matching the renderer)
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct Position(pub Vec2);

impl Position {
    pub fn new(x: f32, y: f32) -> Self {
        Self(Vec2::new(x, y))
    }
}

/// Per-tick displacement direction; each component is -1, 0 or 1 for workers
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct Velocity(pub Vec2);

/// Facing angle in radians, derived from velocity
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct Heading(pub f32);

impl Heading {
    /// Follow the velocity direction; a zero velocity keeps the old angle
    pub fn follow(&mut self, velocity: &Velocity) {
        if !velocity.0.is_zero() {
            self.0 = velocity.0.angle();
        }
    }
}
