// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Math utilities

use crate::geometry::Vector;
use nalgebra::{Matrix3, UnitQuaternion, Vector3};

/// Check if two floats are approximately equal
pub fn approx_eq(a: f64, b: f64, epsilon: f64) -> bool {
    (a - b).abs() < epsilon
}

/// Component-wise [`approx_eq`]
pub fn vector_approx_eq(a: Vector, b: Vector, epsilon: f64) -> bool {
    approx_eq(a.x, b.x, epsilon) && approx_eq(a.y, b.y, epsilon) && approx_eq(a.z, b.z, epsilon)
}

/// Rotation for Euler angles in degrees, applied about X, then Y, then Z
pub fn euler_rotation(degrees: Vector) -> UnitQuaternion<f64> {
    let rx = UnitQuaternion::from_axis_angle(&Vector3::x_axis(), degrees.x.to_radians());
    let ry = UnitQuaternion::from_axis_angle(&Vector3::y_axis(), degrees.y.to_radians());
    let rz = UnitQuaternion::from_axis_angle(&Vector3::z_axis(), degrees.z.to_radians());
    rz * ry * rx
}

/// Reflection across the plane through the origin with the given normal.
/// A zero normal gives the identity.
pub fn reflection(normal: Vector) -> Matrix3<f64> {
    let length = normal.length();
    if length == 0.0 {
        return Matrix3::identity();
    }
    let n = normal.to_nalgebra() / length;
    Matrix3::identity() - (n * n.transpose()) * 2.0
}
