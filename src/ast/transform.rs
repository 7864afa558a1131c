// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Spatial transformations and the clone/pivot rules built on them

use super::node::Role;
use super::{distributive, Kwargs, Node, NodeKind, Value};
use crate::error::Result;
use crate::geometry::Vector;
use crate::utils::math::{euler_rotation, reflection};
use nalgebra::Matrix4;
use tracing::trace;

/// Translation along one axis
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Delta {
    By(f64),
    /// Move so the node's own center of mass lands at 0 on this axis
    Center,
}

/// Shorthand for [`Delta::Center`]
pub const CENTER: Delta = Delta::Center;

impl Delta {
    fn resolve(self, com: f64) -> f64 {
        match self {
            Delta::By(v) => v,
            Delta::Center => -com,
        }
    }
}

impl From<f64> for Delta {
    fn from(v: f64) -> Self {
        Delta::By(v)
    }
}

impl From<f32> for Delta {
    fn from(v: f32) -> Self {
        Delta::By(v.into())
    }
}

impl From<i32> for Delta {
    fn from(v: i32) -> Self {
        Delta::By(v.into())
    }
}

/// Transformation operations
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TransformOp {
    Translate([Delta; 3]),
    /// Euler angles in degrees, applied X then Y then Z about `pivot`
    Rotate { angles: Vector, pivot: Vector },
    Scale(Vector),
    /// Reflection across the plane through `pivot` with normal `normal`
    Mirror { normal: Vector, pivot: Vector },
}

/// A transformation request, optionally in clone mode.
///
/// In clone mode the result is the union of the original and the
/// transformed copy instead of the copy alone.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub op: TransformOp,
    pub clone: bool,
}

impl Transform {
    fn new(op: TransformOp) -> Self {
        Self { op, clone: false }
    }

    pub fn translate(x: impl Into<Delta>, y: impl Into<Delta>, z: impl Into<Delta>) -> Self {
        Self::new(TransformOp::Translate([x.into(), y.into(), z.into()]))
    }

    pub fn translate_by(offset: Vector) -> Self {
        Self::translate(offset.x, offset.y, offset.z)
    }

    pub fn rotate(x: impl Into<f64>, y: impl Into<f64>, z: impl Into<f64>) -> Self {
        Self::rotate_about(Vector::new(x.into(), y.into(), z.into()), Vector::ZERO)
    }

    pub fn rotate_about(angles: Vector, pivot: Vector) -> Self {
        Self::new(TransformOp::Rotate { angles, pivot })
    }

    pub fn scale(x: impl Into<f64>, y: impl Into<f64>, z: impl Into<f64>) -> Self {
        Self::new(TransformOp::Scale(Vector::new(x.into(), y.into(), z.into())))
    }

    pub fn mirror(normal: Vector) -> Self {
        Self::mirror_about(normal, Vector::ZERO)
    }

    pub fn mirror_about(normal: Vector, pivot: Vector) -> Self {
        Self::new(TransformOp::Mirror { normal, pivot })
    }

    pub fn tx(x: impl Into<Delta>) -> Self {
        Self::translate(x, 0, 0)
    }

    pub fn ty(y: impl Into<Delta>) -> Self {
        Self::translate(0, y, 0)
    }

    pub fn tz(z: impl Into<Delta>) -> Self {
        Self::translate(0, 0, z)
    }

    pub fn rx(angle: impl Into<f64>) -> Self {
        Self::rotate(angle, 0, 0)
    }

    pub fn ry(angle: impl Into<f64>) -> Self {
        Self::rotate(0, angle, 0)
    }

    pub fn rz(angle: impl Into<f64>) -> Self {
        Self::rotate(0, 0, angle)
    }

    /// Mirror across the plane `x = center`
    pub fn mx(center: impl Into<f64>) -> Self {
        Self::mirror_about(Vector::X, Vector::new(center.into(), 0.0, 0.0))
    }

    pub fn my(center: impl Into<f64>) -> Self {
        Self::mirror_about(Vector::Y, Vector::new(0.0, center.into(), 0.0))
    }

    pub fn mz(center: impl Into<f64>) -> Self {
        Self::mirror_about(Vector::Z, Vector::new(0.0, 0.0, center.into()))
    }

    /// Keep the original next to the transformed copy
    pub fn cloned(self) -> Self {
        Self {
            clone: true,
            ..self
        }
    }
}

/// Homogeneous matrix the engine applies for a transform node's vector
/// argument; `None` for kinds that are not plain spatial transforms.
pub(crate) fn matrix(kind: &NodeKind, v: Vector) -> Option<Matrix4<f64>> {
    let v3 = v.to_nalgebra();
    match kind {
        NodeKind::Translate => Some(Matrix4::new_translation(&v3)),
        NodeKind::Rotate => Some(euler_rotation(v).to_homogeneous()),
        NodeKind::Scale => Some(Matrix4::new_nonuniform_scaling(&v3)),
        NodeKind::Mirror => Some(reflection(v).to_homogeneous()),
        _ => None,
    }
}

impl Node {
    /// Wrap `self` in a single-child transformation node
    fn wrap(&self, kind: NodeKind, args: Vec<Value>, kwargs: Kwargs) -> Node {
        Node::with_role(kind, vec![self.clone()], args, kwargs, Role::Transformation)
    }

    /// Apply a transformation request, honouring clone mode
    pub fn apply(&self, transform: &Transform) -> Result<Node> {
        let moved = match transform.op {
            TransformOp::Translate(deltas) => self.translate_deltas(deltas)?,
            TransformOp::Rotate { angles, pivot } => self.rotate_about(angles, pivot),
            TransformOp::Scale(factors) => self.scale_by(factors),
            TransformOp::Mirror { normal, pivot } => self.mirror_about(normal, pivot),
        };
        if !transform.clone || Node::ptr_eq(&moved, self) {
            return Ok(moved);
        }
        Ok(distributive::clone_union(self.clone(), moved))
    }

    fn translate_deltas(&self, deltas: [Delta; 3]) -> Result<Node> {
        // centering uses this node's centroid, before any shift
        let com = if deltas.contains(&Delta::Center) {
            self.center_of_mass()?
        } else {
            Vector::ZERO
        };
        let [x, y, z] = deltas;
        Ok(self.translate_by(Vector::new(
            x.resolve(com.x),
            y.resolve(com.y),
            z.resolve(com.z),
        )))
    }

    /// Translate; any axis may be [`CENTER`]. A zero offset returns `self`.
    pub fn translate(
        &self,
        x: impl Into<Delta>,
        y: impl Into<Delta>,
        z: impl Into<Delta>,
    ) -> Result<Node> {
        self.translate_deltas([x.into(), y.into(), z.into()])
    }

    pub fn translate_by(&self, offset: Vector) -> Node {
        if offset.is_zero() {
            trace!(kind = %self.kind(), "zero translate elided");
            return self.clone();
        }
        self.wrap(NodeKind::Translate, vec![offset.into()], Kwargs::new())
    }

    pub fn tx(&self, x: impl Into<Delta>) -> Result<Node> {
        self.apply(&Transform::tx(x))
    }

    pub fn ty(&self, y: impl Into<Delta>) -> Result<Node> {
        self.apply(&Transform::ty(y))
    }

    pub fn tz(&self, z: impl Into<Delta>) -> Result<Node> {
        self.apply(&Transform::tz(z))
    }

    /// Rotate about the origin by Euler angles in degrees
    pub fn rotate(&self, x: impl Into<f64>, y: impl Into<f64>, z: impl Into<f64>) -> Node {
        self.rotate_about(Vector::new(x.into(), y.into(), z.into()), Vector::ZERO)
    }

    /// Rotate about `pivot`: shift the pivot to the origin, rotate, shift back
    pub fn rotate_about(&self, angles: Vector, pivot: Vector) -> Node {
        if angles.is_zero() {
            trace!(kind = %self.kind(), "zero rotation elided");
            return self.clone();
        }
        self.translate_by(-pivot)
            .wrap(NodeKind::Rotate, vec![angles.into()], Kwargs::new())
            .translate_by(pivot)
    }

    pub fn rx(&self, angle: impl Into<f64>) -> Node {
        self.rotate(angle, 0, 0)
    }

    pub fn ry(&self, angle: impl Into<f64>) -> Node {
        self.rotate(0, angle, 0)
    }

    pub fn rz(&self, angle: impl Into<f64>) -> Node {
        self.rotate(0, 0, angle)
    }

    /// Scale per axis. A factor of 1 still produces a node.
    pub fn scale(&self, x: impl Into<f64>, y: impl Into<f64>, z: impl Into<f64>) -> Node {
        self.scale_by(Vector::new(x.into(), y.into(), z.into()))
    }

    pub fn scale_by(&self, factors: Vector) -> Node {
        self.wrap(NodeKind::Scale, vec![factors.into()], Kwargs::new())
    }

    pub fn mirror(&self, normal: Vector) -> Node {
        self.mirror_about(normal, Vector::ZERO)
    }

    pub fn mirror_about(&self, normal: Vector, pivot: Vector) -> Node {
        self.translate_by(-pivot)
            .wrap(NodeKind::Mirror, vec![normal.into()], Kwargs::new())
            .translate_by(pivot)
    }

    /// Mirror across the plane `x = center`
    pub fn mx(&self, center: impl Into<f64>) -> Node {
        self.mirror_about(Vector::X, Vector::new(center.into(), 0.0, 0.0))
    }

    pub fn my(&self, center: impl Into<f64>) -> Node {
        self.mirror_about(Vector::Y, Vector::new(0.0, center.into(), 0.0))
    }

    pub fn mz(&self, center: impl Into<f64>) -> Node {
        self.mirror_about(Vector::Z, Vector::new(0.0, 0.0, center.into()))
    }

    pub fn extrude(&self, height: impl Into<f64>) -> Node {
        self.linear_extrude(height)
    }

    pub fn linear_extrude(&self, height: impl Into<f64>) -> Node {
        self.linear_extrude_with(super::kwargs([("height", height.into())]))
    }

    pub fn linear_extrude_with(&self, kwargs: Kwargs) -> Node {
        self.wrap(NodeKind::LinearExtrude, Vec::new(), kwargs)
    }

    pub fn rotate_extrude(&self) -> Node {
        self.rotate_extrude_with(Kwargs::new())
    }

    pub fn rotate_extrude_with(&self, kwargs: Kwargs) -> Node {
        self.wrap(NodeKind::RotateExtrude, Vec::new(), kwargs)
    }

    /// Apply the transformations stacked on `other` to `self`.
    ///
    /// Walks down `other` through transformation nodes and clone unions,
    /// rebuilding each one around `self` in place of what it wrapped.
    pub fn same_moves(&self, other: &Node) -> Node {
        other.replay_onto(self)
    }

    fn replay_onto(&self, target: &Node) -> Node {
        match self.role() {
            Role::Transformation => self.with_children(
                self.children()
                    .iter()
                    .map(|child| child.replay_onto(target))
                    .collect(),
            ),
            Role::Distributive { replay: true } => {
                let children = self
                    .children()
                    .iter()
                    .map(|child| child.replay_onto(target))
                    .collect();
                self.with_children(distributive::flatten(self.kind(), children))
            }
            _ => target.clone(),
        }
    }
}
