// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Immutable 3D point/direction value

use nalgebra::{Point3, Vector3};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Div, Mul, Neg, Sub};

/// Point or direction in model space. Every operation returns a new value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Vector {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vector {
    pub const ZERO: Vector = Vector::new(0.0, 0.0, 0.0);
    pub const X: Vector = Vector::new(1.0, 0.0, 0.0);
    pub const Y: Vector = Vector::new(0.0, 1.0, 0.0);
    pub const Z: Vector = Vector::new(0.0, 0.0, 1.0);

    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Shift by `(x, y, z)`
    pub fn t(&self, x: f64, y: f64, z: f64) -> Self {
        Self::new(self.x + x, self.y + y, self.z + z)
    }

    pub fn tx(&self, x: f64) -> Self {
        self.t(x, 0.0, 0.0)
    }

    pub fn ty(&self, y: f64) -> Self {
        self.t(0.0, y, 0.0)
    }

    pub fn tz(&self, z: f64) -> Self {
        self.t(0.0, 0.0, z)
    }

    /// Component-wise product
    pub fn scale(&self, other: Vector) -> Self {
        Self::new(self.x * other.x, self.y * other.y, self.z * other.z)
    }

    pub fn min(&self, other: Vector) -> Self {
        Self::new(self.x.min(other.x), self.y.min(other.y), self.z.min(other.z))
    }

    pub fn max(&self, other: Vector) -> Self {
        Self::new(self.x.max(other.x), self.y.max(other.y), self.z.max(other.z))
    }

    pub fn dot(&self, other: Vector) -> f64 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    pub fn length(&self) -> f64 {
        self.dot(*self).sqrt()
    }

    pub fn is_zero(&self) -> bool {
        self.x == 0.0 && self.y == 0.0 && self.z == 0.0
    }

    pub fn to_array(&self) -> [f64; 3] {
        [self.x, self.y, self.z]
    }

    pub fn to_point(&self) -> Point3<f64> {
        Point3::new(self.x, self.y, self.z)
    }

    pub fn to_nalgebra(&self) -> Vector3<f64> {
        Vector3::new(self.x, self.y, self.z)
    }
}

impl From<[f64; 3]> for Vector {
    fn from(v: [f64; 3]) -> Self {
        Self::new(v[0], v[1], v[2])
    }
}

impl From<(f64, f64, f64)> for Vector {
    fn from((x, y, z): (f64, f64, f64)) -> Self {
        Self::new(x, y, z)
    }
}

impl From<Point3<f64>> for Vector {
    fn from(p: Point3<f64>) -> Self {
        Self::new(p.x, p.y, p.z)
    }
}

impl From<Vector3<f64>> for Vector {
    fn from(v: Vector3<f64>) -> Self {
        Self::new(v.x, v.y, v.z)
    }
}

impl Add for Vector {
    type Output = Vector;

    fn add(self, rhs: Vector) -> Vector {
        self.t(rhs.x, rhs.y, rhs.z)
    }
}

impl Sub for Vector {
    type Output = Vector;

    fn sub(self, rhs: Vector) -> Vector {
        self.t(-rhs.x, -rhs.y, -rhs.z)
    }
}

impl Neg for Vector {
    type Output = Vector;

    fn neg(self) -> Vector {
        Vector::new(-self.x, -self.y, -self.z)
    }
}

impl Mul<f64> for Vector {
    type Output = Vector;

    fn mul(self, rhs: f64) -> Vector {
        Vector::new(self.x * rhs, self.y * rhs, self.z * rhs)
    }
}

impl Div<f64> for Vector {
    type Output = Vector;

    fn div(self, rhs: f64) -> Vector {
        Vector::new(self.x / rhs, self.y / rhs, self.z / rhs)
    }
}

impl fmt::Display for Vector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_translate() {
        let v = Vector::new(0.0, 0.0, 0.0);

        assert_eq!(v.tx(1.0), Vector::new(1.0, 0.0, 0.0));
        assert_eq!(v.ty(1.0), Vector::new(0.0, 1.0, 0.0));
        assert_eq!(v.tz(1.0), Vector::new(0.0, 0.0, 1.0));
        assert_eq!(v.t(1.0, 2.0, 3.0), Vector::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn test_translate_is_componentwise() {
        let v = Vector::new(-1.5, 2.0, 7.25);
        let moved = v.t(0.5, -2.0, 0.75);
        assert_eq!(moved, Vector::new(v.x + 0.5, v.y - 2.0, v.z + 0.75));
        // the source is untouched
        assert_eq!(v, Vector::new(-1.5, 2.0, 7.25));
    }

    #[test]
    fn test_arithmetic() {
        let a = Vector::new(1.0, 2.0, 3.0);
        let b = Vector::new(4.0, 5.0, 6.0);
        assert_eq!(a + b, Vector::new(5.0, 7.0, 9.0));
        assert_eq!(b - a, Vector::new(3.0, 3.0, 3.0));
        assert_eq!(-a, Vector::new(-1.0, -2.0, -3.0));
        assert_eq!(a * 2.0, Vector::new(2.0, 4.0, 6.0));
        assert_eq!(b / 2.0, Vector::new(2.0, 2.5, 3.0));
        assert_eq!(a.scale(b), Vector::new(4.0, 10.0, 18.0));
        assert_eq!(a.dot(b), 32.0);
    }

    #[test]
    fn test_conversions() {
        let v = Vector::from([1.0, -2.0, 0.5]);
        assert_eq!(v, Vector::from((1.0, -2.0, 0.5)));
        assert_eq!(v.to_array(), [1.0, -2.0, 0.5]);
        assert_eq!(Vector::from(v.to_point()), v);
        assert_eq!(Vector::from(v.to_nalgebra()), v);
    }
}
