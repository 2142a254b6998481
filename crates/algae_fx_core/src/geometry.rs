//! Geometry for container-local positioning.
//!
//! All pixel coordinates are relative to the top-left corner of the
//! container an effect is mounted in.

use serde::{Deserialize, Serialize};

/// A 2D point or offset in pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec2 {
    /// Horizontal component.
    pub x: f32,
    /// Vertical component.
    pub y: f32,
}

impl Vec2 {
    /// The origin.
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    /// Creates a new vector.
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Euclidean length.
    #[must_use]
    pub fn length(self) -> f32 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    /// Distance to another point.
    #[must_use]
    pub fn distance(self, other: Self) -> f32 {
        (other - self).length()
    }

    /// Returns a vector of the given length pointing from `from` towards
    /// `self`, or zero when the two points coincide.
    #[must_use]
    pub fn away_from(self, from: Self, magnitude: f32) -> Self {
        let delta = from - self;
        if delta.x == 0.0 && delta.y == 0.0 {
            return Self::ZERO;
        }
        // Angle from the element to the pointer; pushing goes the other way.
        let angle = delta.y.atan2(delta.x);
        Self::new(-angle.cos() * magnitude, -angle.sin() * magnitude)
    }
}

impl std::ops::Add for Vec2 {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl std::ops::Sub for Vec2 {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// A rectangle in container or page coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    /// X position (left edge).
    pub x: f32,
    /// Y position (top edge).
    pub y: f32,
    /// Width.
    pub width: f32,
    /// Height.
    pub height: f32,
}

impl Rect {
    /// Creates a new rectangle.
    #[must_use]
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    /// Creates a rectangle anchored at the origin.
    #[must_use]
    pub const fn sized(width: f32, height: f32) -> Self {
        Self::new(0.0, 0.0, width, height)
    }

    /// Returns the right edge.
    #[must_use]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Returns the bottom edge.
    #[must_use]
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Returns the center point.
    #[must_use]
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.width * 0.5, self.y + self.height * 0.5)
    }

    /// Returns true if the point is inside the rectangle.
    #[must_use]
    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.x && point.x < self.right() && point.y >= self.y && point.y < self.bottom()
    }

    /// The overlapping part of two rectangles, `None` when they only touch
    /// or are apart.
    #[must_use]
    pub fn intersection(&self, other: &Self) -> Option<Self> {
        let (left, right) = (self.x.max(other.x), self.right().min(other.right()));
        let (top, bottom) = (self.y.max(other.y), self.bottom().min(other.bottom()));
        (left < right && top < bottom).then(|| Self::new(left, top, right - left, bottom - top))
    }

    /// Shrinks the rectangle vertically by `amount` at the top and bottom.
    #[must_use]
    pub fn inset_vertical(&self, amount: f32) -> Self {
        Self::new(self.x, self.y + amount, self.width, (self.height - amount * 2.0).max(0.0))
    }

    /// Area in square pixels.
    #[must_use]
    pub fn area(&self) -> f32 {
        self.width.max(0.0) * self.height.max(0.0)
    }

    /// Converts a percentage position (0-100 on each axis) to pixels.
    #[must_use]
    pub fn percent_to_px(&self, x_percent: f32, y_percent: f32) -> Vec2 {
        Vec2::new(x_percent / 100.0 * self.width, y_percent / 100.0 * self.height)
    }
}
