// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Bounding box utilities

use super::Vector;
use crate::utils::math::vector_approx_eq;
use nalgebra::Matrix4;
use serde::{Deserialize, Serialize};

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min: Vector,
    pub max: Vector,
}

impl BoundingBox {
    pub fn new(min: Vector, max: Vector) -> Self {
        Self { min, max }
    }

    /// Degenerate box at the origin, used for nodes without known geometry
    pub fn zero() -> Self {
        Self::new(Vector::ZERO, Vector::ZERO)
    }

    fn empty() -> Self {
        Self {
            min: Vector::new(f64::INFINITY, f64::INFINITY, f64::INFINITY),
            max: Vector::new(f64::NEG_INFINITY, f64::NEG_INFINITY, f64::NEG_INFINITY),
        }
    }

    /// Smallest box holding every point; the zero box when there are none
    pub fn from_points<I>(points: I) -> Self
    where
        I: IntoIterator<Item = Vector>,
    {
        let mut bbox = Self::empty();
        let mut seen = false;
        for point in points {
            bbox.expand_to_include(point);
            seen = true;
        }
        if seen {
            bbox
        } else {
            Self::zero()
        }
    }

    pub fn expand_to_include(&mut self, point: Vector) {
        self.min = self.min.min(point);
        self.max = self.max.max(point);
    }

    pub fn union(&self, other: &BoundingBox) -> Self {
        Self::new(self.min.min(other.min), self.max.max(other.max))
    }

    pub fn center(&self) -> Vector {
        (self.min + self.max) / 2.0
    }

    pub fn size(&self) -> Vector {
        self.max - self.min
    }

    pub fn volume(&self) -> f64 {
        let size = self.size();
        size.x * size.y * size.z
    }

    pub fn contains(&self, point: Vector) -> bool {
        (self.min.x..=self.max.x).contains(&point.x)
            && (self.min.y..=self.max.y).contains(&point.y)
            && (self.min.z..=self.max.z).contains(&point.z)
    }

    pub fn translate(&self, offset: Vector) -> Self {
        Self::new(self.min + offset, self.max + offset)
    }

    /// The eight corners, `min` first and `max` last
    pub fn corners(&self) -> [Vector; 8] {
        let (a, b) = (self.min, self.max);
        [
            Vector::new(a.x, a.y, a.z),
            Vector::new(b.x, a.y, a.z),
            Vector::new(a.x, b.y, a.z),
            Vector::new(b.x, b.y, a.z),
            Vector::new(a.x, a.y, b.z),
            Vector::new(b.x, a.y, b.z),
            Vector::new(a.x, b.y, b.z),
            Vector::new(b.x, b.y, b.z),
        ]
    }

    /// Axis-aligned box around the transformed corners
    pub fn transform(&self, matrix: &Matrix4<f64>) -> Self {
        Self::from_points(
            self.corners()
                .iter()
                .map(|corner| Vector::from(matrix.transform_point(&corner.to_point()))),
        )
    }

    /// Check if two bounding boxes are approximately equal within tolerance
    pub fn approx_eq(&self, other: &BoundingBox, tolerance: f64) -> bool {
        vector_approx_eq(self.min, other.min, tolerance)
            && vector_approx_eq(self.max, other.max, tolerance)
    }
}

impl Default for BoundingBox {
    fn default() -> Self {
        Self::zero()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounding_box() {
        let bbox = BoundingBox::from_points([
            Vector::new(1.0, 2.0, 3.0),
            Vector::new(-1.0, -2.0, -3.0),
        ]);

        assert_eq!(bbox.min, Vector::new(-1.0, -2.0, -3.0));
        assert_eq!(bbox.max, Vector::new(1.0, 2.0, 3.0));
        assert_eq!(bbox.center(), Vector::ZERO);
        assert_eq!(bbox.volume(), 48.0);
    }

    #[test]
    fn test_contains_is_inclusive() {
        let bbox = BoundingBox::new(Vector::ZERO, Vector::new(2.0, 1.0, 1.0));
        assert!(bbox.contains(Vector::new(1.0, 0.5, 0.5)));
        assert!(bbox.contains(Vector::new(2.0, 1.0, 0.0)));
        assert!(!bbox.contains(Vector::new(2.5, 0.5, 0.5)));
        assert!(!bbox.contains(Vector::new(1.0, 0.5, -0.1)));
        assert!(bbox.contains(bbox.center()));
    }

    #[test]
    fn test_no_points_is_zero_box() {
        let bbox = BoundingBox::from_points(std::iter::empty());
        assert_eq!(bbox, BoundingBox::zero());
    }

    #[test]
    fn test_union_and_transform() {
        let a = BoundingBox::new(Vector::ZERO, Vector::new(1.0, 1.0, 1.0));
        let b = a.translate(Vector::new(5.0, 0.0, 0.0));
        let joined = a.union(&b);
        assert_eq!(joined.max, Vector::new(6.0, 1.0, 1.0));

        let flipped = a.transform(&Matrix4::new_nonuniform_scaling(
            &nalgebra::Vector3::new(-1.0, 1.0, 1.0),
        ));
        assert!(flipped.approx_eq(
            &BoundingBox::new(Vector::new(-1.0, 0.0, 0.0), Vector::new(0.0, 1.0, 1.0)),
            1e-9
        ));
    }
}
