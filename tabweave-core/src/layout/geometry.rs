//! 2D geometry primitives used by directional navigation
//!
//! Coordinates follow screen conventions: x grows to the right and y grows
//! downwards.

use super::types::Direction;

/// A point in 2D space.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    /// Horizontal coordinate.
    pub x: f64,
    /// Vertical coordinate.
    pub y: f64,
}

impl Point {
    /// Creates a new point.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// An axis-aligned rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    /// Left edge.
    pub x: f64,
    /// Top edge.
    pub y: f64,
    /// Width (non-negative).
    pub width: f64,
    /// Height (non-negative).
    pub height: f64,
}

impl Rect {
    /// Creates a new rectangle from origin and size.
    #[must_use]
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Creates the smallest rectangle containing both points.
    #[must_use]
    pub fn from_corners(a: Point, b: Point) -> Self {
        let left = a.x.min(b.x);
        let top = a.y.min(b.y);
        Self {
            x: left,
            y: top,
            width: (a.x - b.x).abs(),
            height: (a.y - b.y).abs(),
        }
    }

    /// Left edge.
    #[must_use]
    pub fn left(&self) -> f64 {
        self.x
    }

    /// Top edge.
    #[must_use]
    pub fn top(&self) -> f64 {
        self.y
    }

    /// Right edge.
    #[must_use]
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    /// Bottom edge.
    #[must_use]
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Returns the center point.
    #[must_use]
    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }
}

/// A 2D affine transform.
///
/// Maps `(x, y)` to `(a*x + c*y + e, b*x + d*y + f)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    /// x scale.
    pub a: f64,
    /// Contribution of x to y (vertical shear).
    pub b: f64,
    /// Contribution of y to x (horizontal shear).
    pub c: f64,
    /// y scale.
    pub d: f64,
    /// x translation.
    pub e: f64,
    /// y translation.
    pub f: f64,
}

impl Transform {
    /// The identity transform.
    pub const IDENTITY: Self = Self::new(1.0, 0.0, 0.0, 1.0, 0.0, 0.0);

    /// Creates a transform from its six coefficients.
    #[must_use]
    pub const fn new(a: f64, b: f64, c: f64, d: f64, e: f64, f: f64) -> Self {
        Self { a, b, c, d, e, f }
    }

    /// Returns the transform that turns a query in `direction` into a
    /// query to the right.
    ///
    /// After applying it, "the nearest box towards `direction` overlapping
    /// the center line" becomes "the box with the smallest left edge past
    /// the center x whose vertical span contains the center y".
    #[must_use]
    pub const fn facing(direction: Direction) -> Self {
        match direction {
            Direction::Right => Self::IDENTITY,
            // mirror x
            Direction::Left => Self::new(-1.0, 0.0, 0.0, 1.0, 0.0, 0.0),
            // (x, y) -> (-y, x)
            Direction::Above => Self::new(0.0, 1.0, -1.0, 0.0, 0.0, 0.0),
            // (x, y) -> (y, x)
            Direction::Below => Self::new(0.0, 1.0, 1.0, 0.0, 0.0, 0.0),
        }
    }

    /// Applies the transform to a point.
    #[must_use]
    pub fn apply(&self, p: Point) -> Point {
        Point::new(
            self.a * p.x + self.c * p.y + self.e,
            self.b * p.x + self.d * p.y + self.f,
        )
    }

    /// Applies the transform to a rectangle, returning the axis-aligned
    /// bounds of the transformed corners.
    ///
    /// Exact for the axis-preserving transforms returned by [`Self::facing`].
    #[must_use]
    pub fn apply_rect(&self, r: &Rect) -> Rect {
        let p1 = self.apply(Point::new(r.left(), r.top()));
        let p2 = self.apply(Point::new(r.right(), r.bottom()));
        Rect::from_corners(p1, p2)
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}
