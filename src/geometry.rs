use std::{
    fmt,
    ops::{Add, Mul, Sub},
};

pub type Scalar = f64;
pub const EPSILON: f64 = f64::EPSILON;
pub const PI: f64 = std::f64::consts::PI;

/// Convert angle in degrees to radians
#[inline]
pub fn deg2rad(deg: Scalar) -> Scalar {
    PI * deg / 180.0
}

/// Value representing a 2D point or vector.
#[derive(Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point(pub [Scalar; 2]);

impl fmt::Debug for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Point([x, y]) = self;
        write!(f, "{},{}", x, y)
    }
}

impl Point {
    #[inline]
    pub fn new(x: Scalar, y: Scalar) -> Self {
        Self([x, y])
    }

    /// Get `x` component of the point
    #[inline]
    pub fn x(&self) -> Scalar {
        self.0[0]
    }

    /// Get `y` compenent of the point
    #[inline]
    pub fn y(self) -> Scalar {
        self.0[1]
    }

    /// Get length of the vector (distance from the origin)
    pub fn length(self) -> Scalar {
        let Self([x, y]) = self;
        x.hypot(y)
    }

    /// Distance between two points
    pub fn dist(self, other: Self) -> Scalar {
        (self - other).length()
    }

    /// Dot product between two vectors
    pub fn dot(self, other: Self) -> Scalar {
        let Self([x0, y0]) = self;
        let Self([x1, y1]) = other;
        x0 * x1 + y0 * y1
    }

    /// Rotate the vector around the origin by `a` radians (counterclockwise)
    pub fn rotate(self, a: Scalar) -> Self {
        let (sin, cos) = a.sin_cos();
        let Self([x, y]) = self;
        Self([x * cos - y * sin, x * sin + y * cos])
    }

    /// Determine if self is close to the other within the marging of error (EPSILON)
    pub fn is_close_to(self, other: Point) -> bool {
        let Self([x0, y0]) = self;
        let Self([x1, y1]) = other;
        (x0 - x1).abs() < EPSILON && (y0 - y1).abs() < EPSILON
    }
}

impl From<(Scalar, Scalar)> for Point {
    #[inline]
    fn from(xy: (Scalar, Scalar)) -> Self {
        Self([xy.0, xy.1])
    }
}

impl Mul<Point> for Scalar {
    type Output = Point;

    #[inline]
    fn mul(self, other: Point) -> Self::Output {
        let Point([x, y]) = other;
        Point([self * x, self * y])
    }
}

impl Add for Point {
    type Output = Point;

    #[inline]
    fn add(self, other: Point) -> Self::Output {
        let Point([x0, y0]) = self;
        let Point([x1, y1]) = other;
        Point([x0 + x1, y0 + y1])
    }
}

impl Sub for Point {
    type Output = Point;

    #[inline]
    fn sub(self, other: Point) -> Self::Output {
        let Point([x0, y0]) = self;
        let Point([x1, y1]) = other;
        Point([x0 - x1, y0 - y1])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assert_approx_eq;

    #[test]
    fn test_point_ops() {
        let p0 = Point::new(3.0, 4.0);
        let p1 = Point::from((1.0, 2.0));
        assert_approx_eq!(p0.length(), 5.0);
        assert_approx_eq!(p0.dist(p1), (8.0 as Scalar).sqrt(), 1e-12);
        assert_approx_eq!(p0.dot(p1), 11.0);
        assert!((p0 + p1).is_close_to(Point::new(4.0, 6.0)));
        assert!((p0 - p1).is_close_to(Point::new(2.0, 2.0)));
        assert!((2.0 * p1).is_close_to(Point::new(2.0, 4.0)));
    }

    #[test]
    fn test_rotate() {
        let up = Point::new(0.0, 1.0);
        let p = up.rotate(deg2rad(-90.0));
        assert_approx_eq!(p.x(), 1.0, 1e-12);
        assert_approx_eq!(p.y(), 0.0, 1e-12);

        let p = up.rotate(deg2rad(-45.0));
        let inv = 1.0 / (2.0 as Scalar).sqrt();
        assert_approx_eq!(p.x(), inv, 1e-12);
        assert_approx_eq!(p.y(), inv, 1e-12);

        let right = Point::new(1.0, 0.0);
        let p = right.rotate(deg2rad(180.0));
        assert_approx_eq!(p.x(), -1.0, 1e-12);
        assert_approx_eq!(p.y(), 0.0, 1e-12);
    }

    #[test]
    fn test_deg2rad() {
        assert_approx_eq!(deg2rad(180.0), PI);
        assert_approx_eq!(deg2rad(90.0), PI / 2.0);
        assert_approx_eq!(deg2rad(-360.0), -2.0 * PI);
    }
}
