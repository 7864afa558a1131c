// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Per-kind bounding box and center-of-mass rules
//!
//! Values are placement heuristics, not exact analysis:
//!
//! * `cube` and `cylinder` derive extents from their parameters.
//! * Transformations map their child's box and centroid through the same
//!   matrix the engine will apply.
//! * Extrusions, `offset` and `projection` reshape the child's box.
//! * Any other leaf is a zero box at the origin; any other composite
//!   bounds all of its children.

use super::{BoundingBox, Vector};
use crate::ast::{transform, Node, NodeKind, Value};
use crate::error::{Error, Result};

/// Cached spatial summary of a node
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Geometry {
    pub bounding_box: BoundingBox,
    pub center_of_mass: Vector,
}

impl Geometry {
    fn from_box(bounding_box: BoundingBox) -> Self {
        Self {
            bounding_box,
            center_of_mass: bounding_box.center(),
        }
    }

    fn zero() -> Self {
        Self::from_box(BoundingBox::zero())
    }
}

type Provider = fn(&Node) -> Result<Geometry>;

/// Dispatch table from node kind to its rule
fn provider(node: &Node) -> Provider {
    match node.kind() {
        NodeKind::Cube => cube_geometry,
        NodeKind::Cylinder => cylinder_geometry,
        NodeKind::Translate | NodeKind::Rotate | NodeKind::Scale | NodeKind::Mirror => {
            transformed_geometry
        }
        NodeKind::LinearExtrude => linear_extrude_geometry,
        NodeKind::RotateExtrude => rotate_extrude_geometry,
        NodeKind::Offset => offset_geometry,
        NodeKind::Projection => projection_geometry,
        _ if node.children().is_empty() => generic_geometry,
        _ => composite_geometry,
    }
}

/// Compute the geometry of `node`; cached by [`Node`]
pub(crate) fn geometry(node: &Node) -> Result<Geometry> {
    provider(node)(node)
}

fn configuration(node: &Node, message: impl Into<String>) -> Error {
    Error::Configuration {
        kind: node.name().to_owned(),
        message: message.into(),
    }
}

/// Numeric named argument; `Ok(None)` when absent
fn number(node: &Node, key: &str) -> Result<Option<f64>> {
    match node.kwarg(key) {
        None => Ok(None),
        Some(value) => value
            .as_f64()
            .map(Some)
            .ok_or_else(|| configuration(node, format!("`{key}` must be a number"))),
    }
}

fn flag(node: &Node, key: &str) -> bool {
    node.kwarg(key).and_then(Value::as_bool).unwrap_or(false)
}

fn generic_geometry(_node: &Node) -> Result<Geometry> {
    Ok(Geometry::zero())
}

/// Union of the children's boxes, centroid at its middle
fn composite_geometry(node: &Node) -> Result<Geometry> {
    let mut children = node.children().iter();
    let Some(first) = children.next() else {
        return Ok(Geometry::zero());
    };
    let mut bbox = first.bounding_box()?;
    for child in children {
        bbox = bbox.union(&child.bounding_box()?);
    }
    Ok(Geometry::from_box(bbox))
}

/// Geometry of the children as a group, before this node acts on them
fn inner_geometry(node: &Node) -> Result<Geometry> {
    match node.children() {
        [only] => Ok(Geometry {
            bounding_box: only.bounding_box()?,
            center_of_mass: only.center_of_mass()?,
        }),
        _ => composite_geometry(node),
    }
}

fn cube_geometry(node: &Node) -> Result<Geometry> {
    let size = match node.args().first().or_else(|| node.kwarg("size")) {
        None => Vector::new(1.0, 1.0, 1.0),
        Some(value) => value
            .as_vector()
            .ok_or_else(|| configuration(node, "size must be a number or [x, y, z]"))?,
    };
    let bbox = BoundingBox::new(Vector::ZERO, size);
    if flag(node, "center") {
        Ok(Geometry::from_box(bbox.translate(-size / 2.0)))
    } else {
        Ok(Geometry::from_box(bbox))
    }
}

/// Resolved dimensions of a cylinder or cone
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cylinder {
    pub h: f64,
    /// Bottom radius
    pub r1: f64,
    /// Top radius
    pub r2: f64,
    pub center: bool,
}

impl Cylinder {
    /// Read the dimensions of a `cylinder` node.
    ///
    /// Each face resolves independently: explicit radius, explicit
    /// diameter, shared `r`, shared `d`. A face with none of them is a
    /// configuration error.
    pub fn resolve(node: &Node) -> Result<Self> {
        if node.kind() != &NodeKind::Cylinder {
            return Err(configuration(node, "not a cylinder"));
        }
        let h = match number(node, "h")? {
            Some(h) => h,
            None => node.args().first().and_then(Value::as_f64).unwrap_or(1.0),
        };
        Ok(Self {
            h,
            r1: Self::face(node, "r1", "d1", "bottom")?,
            r2: Self::face(node, "r2", "d2", "top")?,
            center: flag(node, "center"),
        })
    }

    fn face(node: &Node, radius: &str, diameter: &str, face: &str) -> Result<f64> {
        if let Some(r) = number(node, radius)? {
            return Ok(r);
        }
        if let Some(d) = number(node, diameter)? {
            return Ok(d / 2.0);
        }
        if let Some(r) = number(node, "r")? {
            return Ok(r);
        }
        if let Some(d) = number(node, "d")? {
            return Ok(d / 2.0);
        }
        Err(configuration(
            node,
            format!("{face} radius undefined: none of {radius}, {diameter}, r, d given"),
        ))
    }

    pub fn d1(&self) -> f64 {
        self.r1 * 2.0
    }

    pub fn d2(&self) -> f64 {
        self.r2 * 2.0
    }

    /// Smaller of the two radii
    pub fn r(&self) -> f64 {
        self.r1.min(self.r2)
    }

    /// Larger of the two radii
    pub fn big_r(&self) -> f64 {
        self.r1.max(self.r2)
    }

    pub fn d(&self) -> f64 {
        self.r() * 2.0
    }

    pub fn big_d(&self) -> f64 {
        self.big_r() * 2.0
    }
}

fn cylinder_geometry(node: &Node) -> Result<Geometry> {
    let cylinder = Cylinder::resolve(node)?;
    let r = cylinder.big_r();
    let bbox = BoundingBox::new(Vector::new(-r, -r, 0.0), Vector::new(r, r, cylinder.h));
    let bbox = if cylinder.center {
        bbox.translate(Vector::new(0.0, 0.0, -cylinder.h / 2.0))
    } else {
        bbox
    };
    Ok(Geometry::from_box(bbox))
}

fn transformed_geometry(node: &Node) -> Result<Geometry> {
    let inner = inner_geometry(node)?;
    let matrix = node
        .args()
        .first()
        .and_then(Value::as_vector)
        .and_then(|v| transform::matrix(node.kind(), v));
    let Some(matrix) = matrix else {
        return Ok(inner);
    };
    Ok(Geometry {
        bounding_box: inner.bounding_box.transform(&matrix),
        center_of_mass: Vector::from(matrix.transform_point(&inner.center_of_mass.to_point())),
    })
}

fn linear_extrude_geometry(node: &Node) -> Result<Geometry> {
    let inner = inner_geometry(node)?;
    let height = match number(node, "height")? {
        Some(h) => h,
        None => node.args().first().and_then(Value::as_f64).unwrap_or(100.0),
    };
    let profile = inner.bounding_box;
    // a top scale grows or shrinks the profile about the Z axis
    let top = match node.kwarg("scale").and_then(Value::as_vector) {
        Some(s) => BoundingBox::from_points([
            profile.min.scale(Vector::new(s.x, s.y, 1.0)),
            profile.max.scale(Vector::new(s.x, s.y, 1.0)),
        ]),
        None => profile,
    };
    let footprint = profile.union(&top);
    let z0 = if flag(node, "center") { -height / 2.0 } else { 0.0 };
    let bbox = BoundingBox::new(
        Vector::new(footprint.min.x, footprint.min.y, z0),
        Vector::new(footprint.max.x, footprint.max.y, z0 + height),
    );
    Ok(Geometry {
        bounding_box: bbox,
        center_of_mass: Vector::new(
            inner.center_of_mass.x,
            inner.center_of_mass.y,
            z0 + height / 2.0,
        ),
    })
}

fn rotate_extrude_geometry(node: &Node) -> Result<Geometry> {
    let profile = inner_geometry(node)?.bounding_box;
    let r = profile.min.x.abs().max(profile.max.x.abs());
    let bbox = BoundingBox::new(
        Vector::new(-r, -r, profile.min.y),
        Vector::new(r, r, profile.max.y),
    );
    Ok(Geometry::from_box(bbox))
}

fn offset_geometry(node: &Node) -> Result<Geometry> {
    let inner = inner_geometry(node)?;
    let amount = match number(node, "r")? {
        Some(r) => r,
        None => number(node, "delta")?.unwrap_or(0.0),
    };
    let b = inner.bounding_box;
    let grow = Vector::new(amount, amount, 0.0);
    let bbox = if amount >= 0.0 {
        BoundingBox::new(b.min - grow, b.max + grow)
    } else {
        // shrinking never inverts the box
        let c = b.center();
        BoundingBox::new((b.min - grow).min(c), (b.max + grow).max(c))
    };
    Ok(Geometry {
        bounding_box: bbox,
        center_of_mass: inner.center_of_mass,
    })
}

fn projection_geometry(node: &Node) -> Result<Geometry> {
    let inner = inner_geometry(node)?;
    let b = inner.bounding_box;
    let com = inner.center_of_mass;
    Ok(Geometry {
        bounding_box: BoundingBox::new(
            Vector::new(b.min.x, b.min.y, 0.0),
            Vector::new(b.max.x, b.max.y, 0.0),
        ),
        center_of_mass: Vector::new(com.x, com.y, 0.0),
    })
}
